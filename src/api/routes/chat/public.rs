//! Public types for the chat API
use serde::{Deserialize, Serialize};

use crate::chat::Message;

#[derive(Deserialize)]
pub struct ChatRequest {
    pub model: Option<String>,
    pub system_prompt: Option<String>,
    pub include_notes: Option<bool>,
    pub notes: Option<String>,
    pub history: Vec<Message>,
}

#[derive(Serialize)]
pub struct ChatReplyResponse {
    pub reply: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
