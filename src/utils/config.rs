//! Environment-driven configuration for the conversation service.

use serde::Deserialize;
use std::env;

use crate::memory::{validate_window_size, DEFAULT_WINDOW_SIZE};
use crate::types::{ContextError, Result};

/// Default token budget for generation-bound context slices.
pub const DEFAULT_GENERATION_BUDGET: usize = 4000;

/// Default token budget for display-bound context slices.
pub const DEFAULT_DISPLAY_BUDGET: usize = 8000;

/// Tunables for [`crate::service::ConversationService`].
#[derive(Debug, Clone, Deserialize)]
pub struct ContextConfig {
    /// Retained-interaction window for fresh conversations (1–50).
    pub window_size: usize,
    /// Token budget for context handed to the generation backend; kept
    /// smaller than the display budget to leave headroom for the new
    /// request payload.
    pub generation_budget: usize,
    /// Token budget for human-facing history rendering.
    pub display_budget: usize,
    /// Aspect-ratio tag applied when the caller does not supply one.
    pub default_aspect_ratio: String,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            generation_budget: DEFAULT_GENERATION_BUDGET,
            display_budget: DEFAULT_DISPLAY_BUDGET,
            default_aspect_ratio: "16:9".to_string(),
        }
    }
}

impl ContextConfig {
    /// Build a config from environment variables, falling back to defaults.
    ///
    /// Reads `CONTEXT_WINDOW_SIZE`, `CONTEXT_GENERATION_BUDGET`,
    /// `CONTEXT_DISPLAY_BUDGET`, and `CONTEXT_ASPECT_RATIO`.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            window_size: parse_var("CONTEXT_WINDOW_SIZE", defaults.window_size)?,
            generation_budget: parse_var(
                "CONTEXT_GENERATION_BUDGET",
                defaults.generation_budget,
            )?,
            display_budget: parse_var("CONTEXT_DISPLAY_BUDGET", defaults.display_budget)?,
            default_aspect_ratio: env::var("CONTEXT_ASPECT_RATIO")
                .unwrap_or(defaults.default_aspect_ratio),
        };
        config.validate()
    }

    /// Check the window bound and budget sanity.
    pub fn validate(self) -> Result<Self> {
        validate_window_size(self.window_size)?;
        if self.generation_budget == 0 {
            return Err(ContextError::Validation(
                "generation_budget must be positive".into(),
            ));
        }
        if self.display_budget == 0 {
            return Err(ContextError::Validation(
                "display_budget must be positive".into(),
            ));
        }
        Ok(self)
    }
}

fn parse_var(name: &str, default: usize) -> Result<usize> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ContextError::Validation(format!("{} is not a number: {}", name, raw))),
        Err(_) => Ok(default),
    }
}
