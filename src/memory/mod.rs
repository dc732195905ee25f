//! Conversation memory: the bounded, token-budgeted interaction window.
//!
//! This module owns the rolling history of one iterative image-edit session:
//! - Appending user/assistant interactions with token accounting
//! - Evicting the oldest interactions once the window overflows
//! - Folding evicted interactions into a rolling summary
//! - Producing token-budgeted context slices for a generation backend
//!
//! Persistence is the caller's responsibility; everything here is a
//! synchronous, in-memory transformation over an already-loaded
//! [`ConversationState`].

mod conversation;

pub use conversation::ConversationState;

/// Default number of interactions retained verbatim in the window.
pub const DEFAULT_WINDOW_SIZE: usize = 10;

/// Smallest configurable window.
pub const MIN_WINDOW_SIZE: usize = 1;

/// Largest configurable window.
pub const MAX_WINDOW_SIZE: usize = 50;

/// Characters per token assumed by [`estimate_tokens`].
pub const CHARS_PER_TOKEN: usize = 4;

/// Estimates token count for a piece of text (rough approximation).
///
/// Uses a simple heuristic of ~4 characters per token for English text,
/// ceiling-rounded, so any non-empty text costs at least one token. This is
/// deliberately not a real tokenizer: the estimate only has to be
/// deterministic and cheap, since it gates a context-window budget rather
/// than billing.
pub fn estimate_tokens(text: &str) -> usize {
    text.len().div_ceil(CHARS_PER_TOKEN)
}

/// Validates a window size against the configurable bounds (1–50).
pub fn validate_window_size(window_size: usize) -> crate::types::Result<usize> {
    if !(MIN_WINDOW_SIZE..=MAX_WINDOW_SIZE).contains(&window_size) {
        return Err(crate::types::ContextError::Validation(format!(
            "window_size must be between {} and {}, got {}",
            MIN_WINDOW_SIZE, MAX_WINDOW_SIZE, window_size
        )));
    }
    Ok(window_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_tokens_empty() {
        assert_eq!(estimate_tokens(""), 0);
    }

    #[test]
    fn test_estimate_tokens_rounds_up() {
        assert_eq!(estimate_tokens("a"), 1);
        assert_eq!(estimate_tokens("test"), 1);
        assert_eq!(estimate_tokens("tests"), 2);
        assert_eq!(estimate_tokens("this is a longer test string"), 7);
    }

    #[test]
    fn test_estimate_tokens_deterministic() {
        let text = "make it darker";
        assert_eq!(estimate_tokens(text), estimate_tokens(text));
    }

    #[test]
    fn test_validate_window_size_bounds() {
        assert!(validate_window_size(0).is_err());
        assert!(validate_window_size(51).is_err());
        assert_eq!(validate_window_size(1).unwrap(), 1);
        assert_eq!(validate_window_size(50).unwrap(), 50);
        assert_eq!(validate_window_size(DEFAULT_WINDOW_SIZE).unwrap(), 10);
    }
}
