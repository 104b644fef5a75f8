//! The streaming chat client. One call to [`ChatClient::send`] is one turn:
//! it probes backend health, appends the user message, consumes the
//! newline-delimited JSON stream, and returns exactly one terminal outcome.
//! Fragments are pushed through a channel in arrival order while the turn
//! is live.

use crate::conversation::Conversation;
use crate::error::ChatError;
use crate::manager::BackendManager;
use futures_util::StreamExt;
use serde::Deserialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Overall budget for one streamed reply.
const STREAM_TIMEOUT: Duration = Duration::from_secs(300);
/// Error bodies are cut to this length before being surfaced.
const BODY_LIMIT: usize = 300;

/// Per-turn cancellation flag, settable once by the initiator and polled
/// by the streaming loop between records.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Terminal state of one turn. Exactly one of these is produced per send;
/// a cancelled turn produces `Cancelled` and nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatOutcome {
    /// Stream finished; `reply` is the full accumulated assistant text
    /// (may be empty, in which case nothing was appended to history).
    Completed { reply: String },
    /// The cancellation flag was observed set between records.
    Cancelled,
    /// The configured model is missing but others are installed; the
    /// pending user message has been rolled back so a retry starts clean.
    ModelUnavailable { installed: Vec<String> },
}

/// One record of the newline-delimited JSON chat stream.
#[derive(Debug, Default, Deserialize)]
struct StreamRecord {
    #[serde(default)]
    message: Option<StreamMessage>,
    #[serde(default)]
    done: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct StreamMessage {
    #[serde(default)]
    content: String,
}

/// Parse one stream line. Malformed records are skipped, not fatal.
fn parse_record(line: &str) -> Option<StreamRecord> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    match serde_json::from_str(line) {
        Ok(record) => Some(record),
        Err(err) => {
            tracing::debug!("skipping malformed stream record: {err}");
            None
        }
    }
}

pub struct ChatClient {
    client: reqwest::Client,
    manager: BackendManager,
    base_url: String,
    model: String,
}

impl ChatClient {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            manager: BackendManager::new(base_url.clone()),
            base_url,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn manager(&self) -> &BackendManager {
        &self.manager
    }

    /// Run one conversational turn. Fragments are delivered through
    /// `fragments` in arrival order; the terminal outcome is the return
    /// value. The user message is appended once the backend is known to be
    /// reachable and stays in history even when the turn later fails -
    /// the turn was attempted. Only a successful completion appends an
    /// assistant message.
    pub async fn send(
        &self,
        conversation: &mut Conversation,
        user_text: &str,
        cancel: &CancelFlag,
        fragments: &mpsc::Sender<String>,
    ) -> Result<ChatOutcome, ChatError> {
        if self.base_url.is_empty() || self.model.is_empty() {
            return Err(ChatError::MissingConfig);
        }

        if !self.manager.is_running().await {
            return Err(ChatError::Unreachable(self.base_url.clone()));
        }

        conversation.push_user(user_text);

        let url = format!("{}/api/chat", self.base_url);
        let body = serde_json::json!({
            "model": self.model,
            "messages": conversation.messages(),
            "stream": true,
        });

        let resp = self
            .client
            .post(&url)
            .timeout(STREAM_TIMEOUT)
            .json(&body)
            .send()
            .await
            .map_err(|e| ChatError::from_reqwest(e, &self.base_url))?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            let installed = self.manager.list_models().await;
            if installed.is_empty() {
                return Err(ChatError::ModelMissing(self.model.clone()));
            }
            conversation.rollback_user();
            tracing::info!(model = %self.model, "model missing, offering alternatives");
            return Ok(ChatOutcome::ModelUnavailable { installed });
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ChatError::Http {
                status: status.as_u16(),
                body: truncate(&body, BODY_LIMIT),
            });
        }

        let mut stream = resp.bytes_stream();
        let mut buffer = String::new();
        let mut reply = String::new();

        'stream: while let Some(chunk) = stream.next().await {
            if cancel.is_cancelled() {
                tracing::debug!("turn cancelled mid-stream");
                return Ok(ChatOutcome::Cancelled);
            }
            let bytes = chunk.map_err(|e| ChatError::from_reqwest(e, &self.base_url))?;
            buffer.push_str(&String::from_utf8_lossy(&bytes));

            while let Some(pos) = buffer.find('\n') {
                // One chunk can carry several records; a cancel must stop
                // the remainder, not just the next chunk.
                if cancel.is_cancelled() {
                    tracing::debug!("turn cancelled mid-stream");
                    return Ok(ChatOutcome::Cancelled);
                }
                let line = buffer[..pos].to_string();
                buffer.drain(..=pos);

                let Some(record) = parse_record(&line) else {
                    continue;
                };
                if let Some(error) = record.error {
                    return Err(ChatError::Backend(error));
                }
                if let Some(message) = record.message {
                    if !message.content.is_empty() {
                        reply.push_str(&message.content);
                        // Receiver gone means the UI no longer cares about
                        // deltas; the final reply is still returned.
                        let _ = fragments.send(message.content).await;
                    }
                }
                if record.done {
                    break 'stream;
                }
            }
        }

        if cancel.is_cancelled() {
            return Ok(ChatOutcome::Cancelled);
        }

        if !reply.is_empty() {
            conversation.push_assistant(reply.clone());
        }
        Ok(ChatOutcome::Completed { reply })
    }
}

fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        text.to_string()
    } else {
        text.chars().take(limit).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_flag_latches() {
        let flag = CancelFlag::new();
        assert!(!flag.is_cancelled());
        flag.cancel();
        assert!(flag.is_cancelled());
        let clone = flag.clone();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn parse_record_extracts_content_delta() {
        let record = parse_record(r#"{"message":{"content":"hel"},"done":false}"#).unwrap();
        assert_eq!(record.message.unwrap().content, "hel");
        assert!(!record.done);
        assert!(record.error.is_none());
    }

    #[test]
    fn parse_record_reads_done_flag() {
        let record = parse_record(r#"{"done":true}"#).unwrap();
        assert!(record.done);
        assert!(record.message.is_none());
    }

    #[test]
    fn parse_record_reads_inline_error() {
        let record = parse_record(r#"{"error":"boom"}"#).unwrap();
        assert_eq!(record.error.as_deref(), Some("boom"));
    }

    #[test]
    fn malformed_records_are_skipped() {
        assert!(parse_record("").is_none());
        assert!(parse_record("   ").is_none());
        assert!(parse_record("not json").is_none());
        assert!(parse_record(r#"{"message":"#).is_none());
    }

    #[test]
    fn missing_config_fails_before_any_network() {
        let client = ChatClient::new("", "");
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let (tx, _rx) = mpsc::channel(4);
        let mut conv = Conversation::new();
        let result = rt.block_on(client.send(&mut conv, "hi", &CancelFlag::new(), &tx));
        assert!(matches!(result, Err(ChatError::MissingConfig)));
        // conversation untouched
        assert_eq!(conv.len(), 1);
    }

    #[test]
    fn truncate_respects_limit() {
        assert_eq!(truncate("abc", 5), "abc");
        assert_eq!(truncate("abcdef", 3), "abc");
    }
}
