//! Streaming response accumulation.
//!
//! The inference service answers either as a single JSON chat completion or
//! as an SSE-style stream of `data: {json}` chunk lines terminated by
//! `data: [DONE]`. Accumulation is modeled as a fold over complete lines —
//! each step consumes the accumulator and returns the next one — so the
//! whole assembly is testable without a socket.

use serde_json::Value;

use crate::error::InferenceError;

/// Fully assembled inference response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatResponse {
    /// The complete response text, assembled across all chunks.
    pub content: String,
    /// Service-assigned conversation id, required for attestation.
    pub chat_id: String,
}

/// Byte-level line splitter for a chunked response body.
///
/// Network chunks may split a line anywhere, including inside a multibyte
/// UTF-8 character. Bytes are carried until a newline arrives, so decoding
/// only ever sees complete lines and split characters reassemble intact.
#[derive(Debug, Default)]
pub(crate) struct LineBuffer {
    carry: Vec<u8>,
}

impl LineBuffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Absorb one network chunk, returning the complete lines it finished.
    pub(crate) fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.carry.extend_from_slice(chunk);
        let mut lines = Vec::new();
        while let Some(newline) = self.carry.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.carry.drain(..=newline).collect();
            lines.push(String::from_utf8_lossy(&line).trim_end().to_string());
        }
        lines
    }

    /// Drain the unterminated tail after the stream ends.
    pub(crate) fn finish(self) -> Option<String> {
        if self.carry.is_empty() {
            None
        } else {
            Some(String::from_utf8_lossy(&self.carry).trim_end().to_string())
        }
    }
}

/// Fold state for assembling a chat response from wire lines.
#[derive(Debug, Default)]
pub(crate) struct StreamAccumulator {
    content: String,
    chat_id: Option<String>,
    saw_sse: bool,
    raw: String,
}

impl StreamAccumulator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Fold step: absorb one complete line from the response body.
    ///
    /// Non-`data:` lines are retained verbatim so a plain (non-streamed)
    /// JSON body can still be parsed at [`StreamAccumulator::finish`].
    pub(crate) fn absorb_line(mut self, line: &str) -> Self {
        if !self.raw.is_empty() {
            self.raw.push('\n');
        }
        self.raw.push_str(line);

        let Some(data) = line.strip_prefix("data:") else {
            return self;
        };
        let data = data.trim();
        self.saw_sse = true;
        if data == "[DONE]" || data.is_empty() {
            return self;
        }
        // Undecodable chunks are skipped; the stream sentinel and the final
        // empty-content check decide whether the response as a whole is usable.
        if let Ok(chunk) = serde_json::from_str::<Value>(data) {
            self.absorb_chunk(&chunk);
        }
        self
    }

    /// Absorb one parsed chunk object: conversation id from the first chunk
    /// that carries one, content from delta or message shapes.
    fn absorb_chunk(&mut self, chunk: &Value) {
        if self.chat_id.is_none() {
            if let Some(id) = chunk
                .get("id")
                .or_else(|| chunk.get("chat_id"))
                .and_then(Value::as_str)
            {
                self.chat_id = Some(id.to_string());
            }
        }
        if let Some(delta) = chunk
            .pointer("/choices/0/delta/content")
            .and_then(Value::as_str)
        {
            self.content.push_str(delta);
        } else if let Some(message) = chunk
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
        {
            self.content.push_str(message);
        }
    }

    /// Complete the fold: a plain JSON body is parsed whole, then the
    /// assembled response is checked for content and a conversation id.
    pub(crate) fn finish(
        mut self,
        model: &str,
        endpoint: &str,
    ) -> Result<ChatResponse, InferenceError> {
        if !self.saw_sse {
            let body: Value =
                serde_json::from_str(&self.raw).map_err(|e| InferenceError::Decode {
                    endpoint: endpoint.to_string(),
                    detail: format!("response is neither SSE nor JSON: {e}"),
                })?;
            self.absorb_chunk(&body);
        }

        if self.content.is_empty() {
            return Err(InferenceError::EmptyResponse {
                model: model.to_string(),
            });
        }
        let chat_id = self.chat_id.ok_or_else(|| InferenceError::Decode {
            endpoint: endpoint.to_string(),
            detail: "no conversation id in any response chunk".to_string(),
        })?;
        Ok(ChatResponse {
            content: self.content,
            chat_id,
        })
    }
}
