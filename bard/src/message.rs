//! Conversation message types.
//!
//! Three roles: System (prompt, usually first), User, Assistant. Tool output is
//! folded back into the conversation as a User message by the observe node, so
//! no separate tool role exists at this layer.

/// A single message in a conversation.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub enum Message {
    /// System prompt; placed first in the message list.
    System(String),
    /// User input (or a tool result merged back by observe).
    User(String),
    /// Model reply.
    Assistant(String),
}

impl Message {
    /// Creates a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::System(content.into())
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::User(content.into())
    }

    /// Creates an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::Assistant(content.into())
    }

    /// Returns the text content regardless of role.
    pub fn content(&self) -> &str {
        match self {
            Message::System(s) | Message::User(s) | Message::Assistant(s) => s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: constructors produce the matching variant with the given content.
    #[test]
    fn constructors_build_matching_variants() {
        assert!(matches!(Message::system("s"), Message::System(c) if c == "s"));
        assert!(matches!(Message::user("u"), Message::User(c) if c == "u"));
        assert!(matches!(Message::assistant("a"), Message::Assistant(c) if c == "a"));
    }

    /// **Scenario**: content() returns the inner text for every role.
    #[test]
    fn content_returns_inner_text() {
        for (msg, expected) in [
            (Message::system("sys"), "sys"),
            (Message::user("usr"), "usr"),
            (Message::assistant("ast"), "ast"),
        ] {
            assert_eq!(msg.content(), expected);
        }
    }

    /// **Scenario**: each variant round-trips through serde JSON.
    #[test]
    fn serde_roundtrip_preserves_role_and_content() {
        for msg in [
            Message::system("sys"),
            Message::user("usr"),
            Message::assistant("ast"),
        ] {
            let json = serde_json::to_string(&msg).expect("serialize");
            let back: Message = serde_json::from_str(&json).expect("deserialize");
            assert_eq!(
                std::mem::discriminant(&msg),
                std::mem::discriminant(&back)
            );
            assert_eq!(msg.content(), back.content());
        }
    }
}
