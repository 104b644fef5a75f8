use crate::prompt::SYSTEM_PROMPT;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// Ordered message history for one chat session. The first element is
/// always the fixed system prompt; only the tail ever changes.
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage {
                role: Role::System,
                content: SYSTEM_PROMPT.to_string(),
            }],
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage {
            role: Role::User,
            content: content.into(),
        });
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage {
            role: Role::Assistant,
            content: content.into(),
        });
    }

    /// Remove the just-appended user message so a retried turn starts clean.
    /// No-op when the tail is not a user message.
    pub fn rollback_user(&mut self) {
        if matches!(self.messages.last(), Some(m) if m.role == Role::User) {
            self.messages.pop();
        }
    }

    /// Reset to exactly the single system message.
    pub fn clear(&mut self) {
        self.messages.truncate(1);
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_system_prompt() {
        let conv = Conversation::new();
        assert_eq!(conv.len(), 1);
        assert_eq!(conv.messages()[0].role, Role::System);
        assert_eq!(conv.messages()[0].content, SYSTEM_PROMPT);
    }

    #[test]
    fn messages_keep_insertion_order() {
        let mut conv = Conversation::new();
        conv.push_user("hi");
        conv.push_assistant("hello");
        conv.push_user("again");
        let roles: Vec<Role> = conv.messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::System, Role::User, Role::Assistant, Role::User]);
    }

    #[test]
    fn clear_resets_to_system_and_is_idempotent() {
        let mut conv = Conversation::new();
        conv.push_user("hi");
        conv.push_assistant("hello");
        conv.clear();
        assert_eq!(conv.len(), 1);
        assert_eq!(conv.messages()[0].role, Role::System);
        let after_once = conv.clone().messages().to_vec();
        conv.clear();
        assert_eq!(conv.messages(), after_once.as_slice());
    }

    #[test]
    fn rollback_removes_only_a_trailing_user_message() {
        let mut conv = Conversation::new();
        conv.push_user("hi");
        conv.rollback_user();
        assert_eq!(conv.len(), 1);

        conv.push_user("hi");
        conv.push_assistant("hello");
        conv.rollback_user();
        assert_eq!(conv.len(), 3);
    }

    #[test]
    fn wire_serialization_uses_lowercase_roles() {
        let msg = ChatMessage {
            role: Role::Assistant,
            content: "x".into(),
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"x"}"#);
    }
}
