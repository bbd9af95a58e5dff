//! Wire payloads exchanged with the debugging-assistant backend.

use serde::{Deserialize, Serialize};

pub mod health;

/// Body of `POST /api/chat`.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ChatRequest {
    pub message: String,
    pub model: String,
    pub prev_model: String,
}

/// Successful reply from `POST /api/chat`.
///
/// `reply` is markdown. `system_note` is plain text announcing a model switch
/// and is rendered ahead of the reply.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ChatReply {
    pub reply: String,
    #[serde(default)]
    pub system_note: Option<String>,
    #[serde(default)]
    pub model_used: Option<String>,
}

/// FastAPI-style error body (`{"detail": ...}`).
#[derive(Deserialize, Debug)]
pub struct ErrorBody {
    pub detail: serde_json::Value,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub ollama_reachable: bool,
    #[serde(default)]
    pub models_available: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_request_serializes_expected_fields() {
        let request = ChatRequest {
            message: "why does this panic?".into(),
            model: "llama3.2:1b".into(),
            prev_model: "qwen2.5-coder:1.5b".into(),
        };
        let value = serde_json::to_value(&request).expect("serialize");
        assert_eq!(
            value,
            serde_json::json!({
                "message": "why does this panic?",
                "model": "llama3.2:1b",
                "prev_model": "qwen2.5-coder:1.5b",
            })
        );
    }

    #[test]
    fn chat_reply_tolerates_missing_optional_fields() {
        let reply: ChatReply = serde_json::from_str(r#"{"reply":"hi"}"#).expect("decode");
        assert_eq!(reply.reply, "hi");
        assert!(reply.system_note.is_none());
        assert!(reply.model_used.is_none());
    }

    #[test]
    fn chat_reply_requires_reply_field() {
        assert!(serde_json::from_str::<ChatReply>(r#"{"detail":"nope"}"#).is_err());
    }
}
