//! Prompt template selection
//!
//! A small registry of prompt pairs (system + user template). Selection order:
//! an explicit prompt type, then a substring match on the topic name, then the
//! general template. System and user prompts can each be overridden per call.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::SummaryOptions;

/// Placeholder in user templates that is replaced with the transcript
pub const TEXT_PLACEHOLDER: &str = "{text}";

/// A system prompt plus a user prompt template
#[derive(Debug, Clone, Copy)]
pub struct PromptSet {
    pub system: &'static str,
    pub user_template: &'static str,
}

pub const GENERAL_SYSTEM_PROMPT: &str = "\
You are an expert summarization assistant designed to extract key insights \
from conversations.

Core guidelines:
1. Identify the most significant information
2. Maintain objectivity and precision
3. Provide clear, structured insights
4. Focus on actionable and meaningful content
5. Adapt to the specific context of the conversation";

pub const GENERAL_USER_PROMPT: &str = "\
Analyze and summarize the following conversation with attention to context, \
key themes, and important details.

Conversation transcript:
{text}

Summary expectations:
- Concise yet comprehensive overview
- Highlight main topics and notable interactions
- Capture essential insights and potential implications";

const DEFI_SYSTEM_PROMPT: &str = "\
You are a DeFi analyst focusing on extracting critical insights from \
cryptocurrency and blockchain-related discussions.

Analysis priorities:
1. Identify yield farming opportunities
2. Assess liquidity provision strategies
3. Highlight market sentiment and trends
4. Evaluate potential risks and rewards
5. Detect emerging protocols and innovations";

const DEFI_USER_PROMPT: &str = "\
Analyze the following DeFi conversation, emphasizing financial strategies, \
market dynamics, and technological innovations. Extract specific numbers, \
APYs, protocols, and technical details where available.

Conversation transcript:
{text}";

static SPECIALIZED_PROMPTS: Lazy<HashMap<&'static str, PromptSet>> = Lazy::new(|| {
    HashMap::from([
        (
            "general",
            PromptSet {
                system: GENERAL_SYSTEM_PROMPT,
                user_template: GENERAL_USER_PROMPT,
            },
        ),
        (
            "defi",
            PromptSet {
                system: DEFI_SYSTEM_PROMPT,
                user_template: DEFI_USER_PROMPT,
            },
        ),
    ])
});

/// Select a prompt set: explicit type first, then topic substring, then general.
pub fn select(topic_name: Option<&str>, prompt_type: Option<&str>) -> PromptSet {
    if let Some(kind) = prompt_type {
        if let Some(set) = SPECIALIZED_PROMPTS.get(kind.to_lowercase().as_str()) {
            return *set;
        }
    }

    if let Some(topic) = topic_name {
        let topic = topic.to_lowercase();
        for (key, set) in SPECIALIZED_PROMPTS.iter() {
            if *key != "general" && topic.contains(key) {
                return *set;
            }
        }
    }

    SPECIALIZED_PROMPTS["general"]
}

/// Resolve the final (system, user) prompt pair for one summarization call.
pub fn resolve(options: &SummaryOptions, transcript: &str) -> (String, String) {
    let set = select(options.topic_name.as_deref(), options.prompt_type.as_deref());

    let system = options
        .override_system_prompt
        .clone()
        .unwrap_or_else(|| set.system.to_string());

    let user = options
        .override_user_prompt
        .as_deref()
        .unwrap_or(set.user_template)
        .replace(TEXT_PLACEHOLDER, transcript);

    (system, user)
}
