//! Message trimming: keep the newest messages that fit a token budget.
//!
//! Token counts use a ~4 chars/token heuristic, good enough to keep a
//! long-running conversation inside the model's context window without calling
//! a tokenizer.

use crate::message::Message;

/// Heuristic characters-per-token for English/mixed text.
const CHARS_PER_TOKEN: usize = 4;

/// Heuristic token estimate over all message contents.
pub fn estimate_tokens(messages: &[Message]) -> u32 {
    let total: usize = messages.iter().map(|m| m.content().len()).sum();
    (total / CHARS_PER_TOKEN) as u32
}

/// How [`trim_messages`] selects the kept window.
#[derive(Debug, Clone)]
pub struct TrimConfig {
    /// Token budget for the kept messages (system message included).
    pub max_tokens: u32,
    /// Always retain a leading system message, counted against the budget.
    pub include_system: bool,
    /// Drop leading assistant messages so the kept window opens with user input.
    pub start_on_user: bool,
}

impl Default for TrimConfig {
    fn default() -> Self {
        Self {
            max_tokens: 650,
            include_system: true,
            start_on_user: true,
        }
    }
}

/// Keep-last trimming: retains the newest messages that fit the budget.
///
/// Messages are never split. A leading system message is kept (when
/// `include_system`) even if the remaining budget then admits fewer recent
/// messages. With `start_on_user`, non-user messages at the front of the kept
/// window are dropped so the model always sees a conversation that opens with
/// the user speaking.
pub fn trim_messages(messages: &[Message], config: &TrimConfig) -> Vec<Message> {
    let (system, rest): (Option<&Message>, &[Message]) = match messages.first() {
        Some(m @ Message::System(_)) if config.include_system => (Some(m), &messages[1..]),
        _ => (None, messages),
    };

    let mut budget = config.max_tokens;
    if let Some(sys) = system {
        budget = budget.saturating_sub(estimate_tokens(std::slice::from_ref(sys)));
    }

    // Walk newest to oldest, admitting whole messages while they fit.
    let mut kept_rev: Vec<&Message> = Vec::new();
    let mut used = 0u32;
    for m in rest.iter().rev() {
        let cost = estimate_tokens(std::slice::from_ref(m));
        if used + cost > budget {
            break;
        }
        used += cost;
        kept_rev.push(m);
    }
    let mut kept: Vec<&Message> = kept_rev.into_iter().rev().collect();

    if config.start_on_user {
        let first_user = kept.iter().position(|m| matches!(m, Message::User(_)));
        kept = match first_user {
            Some(idx) => kept.split_off(idx),
            None => Vec::new(),
        };
    }

    system
        .into_iter()
        .chain(kept)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(len: usize) -> Message {
        Message::user("u".repeat(len))
    }

    fn assistant(len: usize) -> Message {
        Message::assistant("a".repeat(len))
    }

    /// **Scenario**: estimate divides total characters by four, integer division.
    #[test]
    fn estimate_tokens_four_chars_per_token() {
        assert_eq!(estimate_tokens(&[]), 0);
        assert_eq!(estimate_tokens(&[Message::user("12345678")]), 2);
        assert_eq!(
            estimate_tokens(&[
                Message::system("ab"),
                Message::user("cdef"),
                Message::assistant("ghij"),
            ]),
            2
        );
    }

    /// **Scenario**: everything fits, so nothing is dropped.
    #[test]
    fn trim_keeps_all_when_under_budget() {
        let messages = vec![Message::system("sys"), user(40), assistant(40)];
        let out = trim_messages(&messages, &TrimConfig::default());
        assert_eq!(out.len(), 3);
    }

    /// **Scenario**: over budget, the oldest non-system messages go first and the
    /// newest survive.
    #[test]
    fn trim_drops_oldest_first() {
        let messages = vec![
            user(400),      // 100 tokens, oldest
            assistant(400), // 100 tokens
            user(400),      // 100 tokens, newest
        ];
        let config = TrimConfig {
            max_tokens: 150,
            include_system: false,
            start_on_user: true,
        };
        let out = trim_messages(&messages, &config);
        assert_eq!(out.len(), 1);
        assert!(matches!(&out[0], Message::User(s) if s.len() == 400));
    }

    /// **Scenario**: the system message survives trimming and costs budget.
    #[test]
    fn trim_retains_system_message() {
        let messages = vec![
            Message::system("s".repeat(200)), // 50 tokens
            user(400),                        // 100 tokens
            assistant(200),                   // 50 tokens
            user(200),                        // 50 tokens
        ];
        let config = TrimConfig {
            max_tokens: 160,
            include_system: true,
            start_on_user: true,
        };
        let out = trim_messages(&messages, &config);
        // 50 for system leaves 110: newest user (50) + assistant (50) fit, the
        // older 100-token user does not; start_on_user then drops the leading
        // assistant.
        assert!(matches!(&out[0], Message::System(_)));
        assert_eq!(out.len(), 2);
        assert!(matches!(&out[1], Message::User(s) if s.len() == 200));
    }

    /// **Scenario**: start_on_user drops a leading assistant message even when
    /// it would fit the budget.
    #[test]
    fn trim_window_starts_on_user() {
        let messages = vec![assistant(40), user(40), assistant(40)];
        let config = TrimConfig {
            max_tokens: 1000,
            include_system: false,
            start_on_user: true,
        };
        let out = trim_messages(&messages, &config);
        assert_eq!(out.len(), 2);
        assert!(matches!(&out[0], Message::User(_)));
    }

    /// **Scenario**: a budget too small for even the newest message yields just
    /// the system message.
    #[test]
    fn trim_tiny_budget_keeps_only_system() {
        let messages = vec![Message::system("sys"), user(4000)];
        let config = TrimConfig {
            max_tokens: 10,
            include_system: true,
            start_on_user: true,
        };
        let out = trim_messages(&messages, &config);
        assert_eq!(out.len(), 1);
        assert!(matches!(&out[0], Message::System(_)));
    }
}
