//! Interactive sign-in flow
//!
//! First run asks for the login code (and the 2FA password when enabled) on
//! the terminal; the session file makes subsequent runs non-interactive.

use grammers_client::SignInError;
use tracing::info;

use tgdigest_common::utils::prompt;
use tgdigest_common::{DigestError, Result};

use crate::TelegramCollector;

impl TelegramCollector {
    /// Make sure the account is signed in, running the interactive login
    /// flow when the stored session is missing or expired.
    pub async fn ensure_authorized(&self) -> Result<()> {
        let authorized = self
            .client
            .is_authorized()
            .await
            .map_err(|e| DigestError::telegram_with_source("authorization check failed", e))?;

        if authorized {
            info!("Telegram session is authorized");
            return Ok(());
        }

        info!("Not authorized, starting sign-in flow");

        let token = self
            .client
            .request_login_code(&self.phone_number)
            .await
            .map_err(|e| DigestError::telegram_with_source("failed to request login code", e))?;

        let code = prompt("Enter the code you received: ")?;

        match self.client.sign_in(&token, &code).await {
            Ok(_user) => {
                info!("Signed in successfully");
            }
            Err(SignInError::PasswordRequired(password_token)) => {
                let password = prompt("2FA is enabled. Enter your password: ")?;
                self.client
                    .check_password(password_token, password.trim())
                    .await
                    .map_err(|e| {
                        DigestError::telegram_with_source("2FA password check failed", e)
                    })?;
                info!("Signed in with 2FA");
            }
            Err(e) => {
                return Err(DigestError::telegram_with_source("sign-in failed", e));
            }
        }

        self.client.session().save_to_file(&self.session_file)?;
        info!(session_file = %self.session_file, "Session saved");

        Ok(())
    }
}
