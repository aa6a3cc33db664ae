//! Anthropic Messages API wire types

#[derive(serde::Serialize)]
pub struct MessagesRequest {
    pub model: String,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub messages: Vec<Message>,
}

#[derive(serde::Serialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

#[derive(serde::Deserialize)]
pub struct MessagesResponse {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub error: Option<ApiError>,
}

#[derive(serde::Deserialize)]
pub struct ContentBlock {
    pub text: String,
}

#[derive(serde::Deserialize)]
pub struct ApiError {
    pub message: String,
}
