use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;

use crate::message::{ChatResponse, ErrorBody, Message};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("could not reach chat proxy: {0}")]
    Transport(String),

    #[error("chat proxy rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("chat proxy answered without a reply")]
    MissingReply,
}

/// Anything that can turn a conversation into the next assistant reply.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, conversation: &[Message]) -> Result<String, ClientError>;
}

#[derive(Serialize)]
struct HistoryBody<'a> {
    messages: &'a [Message],
}

/// Talks to the proxy's `POST /chat` with the history shape.
#[derive(Clone, Debug)]
pub struct ProxyTransport {
    client: Client,
    url: String,
}

impl ProxyTransport {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl ChatTransport for ProxyTransport {
    async fn send(&self, conversation: &[Message]) -> Result<String, ClientError> {
        let response = self
            .client
            .post(&self.url)
            .json(&HistoryBody { messages: conversation })
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or(body);
            return Err(ClientError::Rejected { status: status.as_u16(), message });
        }

        serde_json::from_str::<ChatResponse>(&body)
            .ok()
            .map(|r| r.reply)
            .filter(|r| !r.is_empty())
            .ok_or(ClientError::MissingReply)
    }
}
