use std::fmt;

use reqwest::StatusCode;
use tokio::sync::mpsc;

use crate::api::{ChatReply, ChatRequest, ErrorBody};
use crate::core::constants::CHAT_ENDPOINT;
use crate::utils::url::construct_api_url;

/// Identifies one send-and-wait round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TurnId(pub u64);

#[derive(Debug)]
pub enum BackendError {
    Request(reqwest::Error),
    Status { status: StatusCode, detail: String },
    Decode(serde_json::Error),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Request(err) => write!(f, "request to backend failed: {err}"),
            BackendError::Status { status, detail } if detail.is_empty() => {
                write!(f, "backend returned {status}")
            }
            BackendError::Status { status, detail } => {
                write!(f, "backend returned {status}: {detail}")
            }
            BackendError::Decode(err) => write!(f, "could not decode backend reply: {err}"),
        }
    }
}

impl std::error::Error for BackendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BackendError::Request(err) => Some(err),
            BackendError::Decode(err) => Some(err),
            BackendError::Status { .. } => None,
        }
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        BackendError::Request(err)
    }
}

pub type TurnOutcome = Result<ChatReply, BackendError>;

/// Pull a readable message out of an error body. FastAPI puts it under
/// `detail`, either as a string or as a list of validation errors.
fn extract_error_detail(body: &str) -> String {
    let trimmed = body.trim();
    let Ok(ErrorBody { detail }) = serde_json::from_str::<ErrorBody>(trimmed) else {
        return trimmed.split_whitespace().collect::<Vec<_>>().join(" ");
    };
    match detail {
        serde_json::Value::String(text) => text,
        serde_json::Value::Array(items) => items
            .iter()
            .map(|item| {
                item.get("msg")
                    .and_then(|msg| msg.as_str())
                    .map(str::to_owned)
                    .unwrap_or_else(|| item.to_string())
            })
            .collect::<Vec<_>>()
            .join("; "),
        other => other.to_string(),
    }
}

/// Interpret a raw backend response.
pub fn parse_chat_reply(status: StatusCode, body: &str) -> TurnOutcome {
    if !status.is_success() {
        return Err(BackendError::Status {
            status,
            detail: extract_error_detail(body),
        });
    }
    serde_json::from_str::<ChatReply>(body).map_err(BackendError::Decode)
}

pub struct TurnParams {
    pub client: reqwest::Client,
    pub base_url: String,
    pub turn_id: TurnId,
    pub request: ChatRequest,
}

impl fmt::Debug for TurnParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TurnParams")
            .field("base_url", &self.base_url)
            .field("turn_id", &self.turn_id)
            .field("request", &self.request)
            .finish()
    }
}

/// Runs one backend POST per turn and reports each outcome tagged with its
/// turn id.
#[derive(Clone)]
pub struct ChatService {
    tx: mpsc::UnboundedSender<(TurnOutcome, TurnId)>,
}

impl ChatService {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<(TurnOutcome, TurnId)>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn spawn_turn(&self, params: TurnParams) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let TurnParams {
                client,
                base_url,
                turn_id,
                request,
            } = params;

            tracing::debug!(turn = turn_id.0, model = %request.model, "sending chat turn");
            let outcome = send_chat(&client, &base_url, &request).await;
            // The receiver only disappears while the app is shutting down.
            let _ = tx.send((outcome, turn_id));
        });
    }

    #[cfg(test)]
    pub fn send_for_test(&self, outcome: TurnOutcome, turn_id: TurnId) {
        let _ = self.tx.send((outcome, turn_id));
    }
}

async fn send_chat(
    client: &reqwest::Client,
    base_url: &str,
    request: &ChatRequest,
) -> TurnOutcome {
    let chat_url = construct_api_url(base_url, CHAT_ENDPOINT);
    let response = client
        .post(chat_url)
        .header("Content-Type", "application/json")
        .json(request)
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;
    parse_chat_reply(status, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_body_decodes() {
        let reply = parse_chat_reply(
            StatusCode::OK,
            r#"{"reply":"Try `cargo clean`.","system_note":"Switched to llama3.2:1b","model_used":"llama3.2:1b"}"#,
        )
        .expect("reply");
        assert_eq!(reply.reply, "Try `cargo clean`.");
        assert_eq!(reply.system_note.as_deref(), Some("Switched to llama3.2:1b"));
        assert_eq!(reply.model_used.as_deref(), Some("llama3.2:1b"));
    }

    #[test]
    fn non_success_status_extracts_detail() {
        let err = parse_chat_reply(
            StatusCode::SERVICE_UNAVAILABLE,
            r#"{"detail":"Ollama is not reachable"}"#,
        )
        .expect_err("status error");
        match err {
            BackendError::Status { status, detail } => {
                assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
                assert_eq!(detail, "Ollama is not reachable");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn validation_detail_lists_are_joined() {
        let body = r#"{"detail":[{"loc":["body","message"],"msg":"field required"},{"msg":"too long"}]}"#;
        assert_eq!(extract_error_detail(body), "field required; too long");
    }

    #[test]
    fn non_json_error_body_is_collapsed() {
        assert_eq!(
            extract_error_detail("  Internal\n   Server Error "),
            "Internal Server Error"
        );
    }

    #[test]
    fn success_with_garbage_body_is_a_decode_error() {
        let err = parse_chat_reply(StatusCode::OK, "<html>oops</html>").expect_err("decode");
        assert!(matches!(err, BackendError::Decode(_)));
        assert!(err.to_string().starts_with("could not decode backend reply"));
    }

    #[test]
    fn success_without_reply_field_is_a_decode_error() {
        let err = parse_chat_reply(StatusCode::OK, r#"{"answer":"hi"}"#).expect_err("decode");
        assert!(matches!(err, BackendError::Decode(_)));
    }

    #[test]
    fn status_display_includes_detail() {
        let err = BackendError::Status {
            status: StatusCode::BAD_REQUEST,
            detail: "Unknown model".into(),
        };
        assert_eq!(err.to_string(), "backend returned 400 Bad Request: Unknown model");
    }

    #[tokio::test]
    async fn outcomes_arrive_tagged_with_turn_id() {
        let (service, mut rx) = ChatService::new();
        service.send_for_test(
            parse_chat_reply(StatusCode::OK, r#"{"reply":"ok"}"#),
            TurnId(7),
        );
        let (outcome, turn_id) = rx.recv().await.expect("message");
        assert_eq!(turn_id, TurnId(7));
        assert_eq!(outcome.expect("reply").reply, "ok");
    }
}
