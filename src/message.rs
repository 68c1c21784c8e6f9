// src/message.rs
use serde::{Deserialize, Serialize};

/// Fixed text shown when no usable reply came back.
pub const FALLBACK_REPLY: &str = "Sorry, something went wrong.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Role {
    User,
    Assistant,
}

impl From<String> for Role {
    // Anything that is not an assistant turn is sent upstream as the user.
    fn from(value: String) -> Self {
        if value.eq_ignore_ascii_case("assistant") {
            Role::Assistant
        } else {
            Role::User
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

/// Body accepted by `POST /chat`.
///
/// Both the single-message and the history shape are accepted; when a body
/// carries both keys the history wins.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatRequest {
    History { messages: Vec<Message> },
    Single { message: String },
}

impl ChatRequest {
    /// Conversation to forward, oldest first.
    pub fn into_messages(self) -> Vec<Message> {
        match self {
            ChatRequest::History { messages } => messages,
            ChatRequest::Single { message } => vec![Message::user(message)],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_request_shapes() {
        let single: ChatRequest = serde_json::from_str(r#"{"message":"Hello"}"#).unwrap();
        assert_eq!(single.into_messages(), vec![Message::user("Hello")]);

        let history: ChatRequest = serde_json::from_str(
            r#"{"messages":[{"role":"user","content":"a"},{"role":"assistant","content":"b"}]}"#,
        )
        .unwrap();
        assert_eq!(
            history.into_messages(),
            vec![Message::user("a"), Message::assistant("b")]
        );
    }

    #[test]
    fn history_wins_over_single_message() {
        let req: ChatRequest = serde_json::from_str(
            r#"{"message":"ignored","messages":[{"role":"user","content":"kept"}]}"#,
        )
        .unwrap();
        assert_eq!(req.into_messages(), vec![Message::user("kept")]);
    }

    #[test]
    fn unknown_roles_become_user() {
        let msg: Message = serde_json::from_str(r#"{"role":"system","content":"x"}"#).unwrap();
        assert_eq!(msg.role, Role::User);
        let msg: Message = serde_json::from_str(r#"{"role":"Assistant","content":"x"}"#).unwrap();
        assert_eq!(msg.role, Role::Assistant);
    }

    #[test]
    fn error_body_omits_missing_details() {
        let body = ErrorBody { error: "Server error".into(), details: None };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"error":"Server error"}"#);
    }
}
