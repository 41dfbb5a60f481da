//! Typed client for the TEE inference service.
//!
//! Speaks the OpenAI chat-completions wire shape: request is
//! `{model, messages, stream}`, response is either a single JSON object
//! with `choices[0].message.content` or an SSE stream of
//! `data: {json}` chunk lines carrying `choices[0].delta.content`,
//! terminated by `data: [DONE]`.
//!
//! The model identifier is checked against the configured allow-list
//! *before* any request is issued. A rejected model is a security control
//! firing, not a retryable condition.

use futures_util::StreamExt;
use serde::Serialize;
use url::Url;

use tribune_core::ModelAllowList;

use crate::error::InferenceError;
use crate::stream::{LineBuffer, StreamAccumulator};

pub use crate::stream::ChatResponse;

const ENDPOINT: &str = "POST /v1/chat/completions";

/// One message in a chat completion request.
#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Chat completion request body.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    stream: bool,
}

/// Client for the TEE inference service.
#[derive(Debug, Clone)]
pub struct InferenceClient {
    http: reqwest::Client,
    base_url: Url,
    allow_list: ModelAllowList,
}

impl InferenceClient {
    pub(crate) fn new(http: reqwest::Client, base_url: Url, allow_list: ModelAllowList) -> Self {
        Self {
            http,
            base_url,
            allow_list,
        }
    }

    /// Run one chat completion and assemble the full response text.
    ///
    /// `system_context` carries the anonymized dispute block;
    /// `user_prompt` carries the round prompt. The response stream is
    /// folded chunk by chunk into a [`ChatResponse`]; the conversation id
    /// is taken from the first chunk that carries one.
    ///
    /// Calls `POST {base_url}v1/chat/completions`.
    pub async fn chat(
        &self,
        model: &str,
        system_context: &str,
        user_prompt: &str,
    ) -> Result<ChatResponse, InferenceError> {
        self.allow_list.check(model)?;

        let url = format!("{}v1/chat/completions", self.base_url);
        let body = ChatRequest {
            model,
            messages: vec![
                WireMessage {
                    role: "system",
                    content: system_context,
                },
                WireMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            stream: true,
        };

        tracing::debug!(model, "issuing inference request");
        let resp = crate::retry::retry_send(|| self.http.post(&url).json(&body).send())
            .await
            .map_err(|e| InferenceError::Http {
                endpoint: ENDPOINT.into(),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(InferenceError::Service {
                endpoint: ENDPOINT.into(),
                status,
                body,
            });
        }

        // Fold the byte stream into complete lines, and the lines into the
        // accumulated response. Chunks may split a line anywhere, even
        // mid-character; the buffer carries bytes until a newline arrives.
        let mut byte_stream = resp.bytes_stream();
        let mut acc = StreamAccumulator::new();
        let mut buffer = LineBuffer::new();
        while let Some(chunk) = byte_stream.next().await {
            let chunk = chunk.map_err(|e| InferenceError::Http {
                endpoint: ENDPOINT.into(),
                source: e,
            })?;
            for line in buffer.push(&chunk) {
                acc = acc.absorb_line(&line);
            }
        }
        if let Some(tail) = buffer.finish() {
            acc = acc.absorb_line(&tail);
        }

        let response = acc.finish(model, ENDPOINT)?;
        tracing::debug!(
            model,
            chat_id = %response.chat_id,
            content_len = response.content.len(),
            "inference response assembled"
        );
        Ok(response)
    }
}
