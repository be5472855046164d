use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub citations: Vec<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ChatSessionSummary {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub message_count: u32,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ChatSession {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

/// Message sent to the assistant.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ChatRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub language: String,
}

/// Assistant answer for one message.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ChatReply {
    pub session_id: String,
    pub response: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub citations: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// Prompts offered when a new conversation starts.
pub const STARTER_PROMPTS: &[&str] = &[
    "What are bail laws in Pakistan?",
    "Tell me about property disputes",
    "How to file a writ petition?",
    "Explain family law in Pakistan",
];
