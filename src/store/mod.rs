//! Persistence abstraction for conversation state.
//!
//! This module provides the [`ConversationStore`] trait that abstracts over
//! whatever actually persists conversations (a document database, a
//! key-value store, an in-memory map for tests). The context manager never
//! talks to storage directly; callers load a [`ConversationState`], mutate
//! it, and save it back through an implementation of this trait.
//!
//! # Example
//!
//! ```rust,ignore
//! use thumbtrail::store::{ConversationStore, StoreProvider};
//!
//! // In-memory store (default for development/testing)
//! let store = StoreProvider::Memory.create_client();
//! ```

use async_trait::async_trait;

use crate::memory::ConversationState;
use crate::types::{ConversationKey, Result};

mod memory;

pub use memory::InMemoryStore;

/// Store provider configuration.
///
/// Real deployments implement [`ConversationStore`] over their own database
/// client and construct it themselves; this enum only covers the backends
/// the crate ships.
#[derive(Debug, Clone, Default)]
pub enum StoreProvider {
    /// In-memory map (ephemeral, lost on drop)
    #[default]
    Memory,
}

impl StoreProvider {
    /// Create a store client from this provider configuration.
    pub fn create_client(&self) -> Box<dyn ConversationStore> {
        match self {
            StoreProvider::Memory => Box::new(InMemoryStore::new()),
        }
    }
}

/// Abstract trait for conversation persistence.
///
/// Implementations own retries, transactions, and consistency; this crate
/// performs none of that and surfaces every failure immediately as
/// [`crate::types::ContextError::Storage`]. A save must replace the stored
/// state for the conversation's id wholesale — partial updates would break
/// the multi-step eviction/summary bookkeeping.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Load the single active conversation for a (project, user) key, if
    /// one exists. Absence is expected and non-fatal: callers respond by
    /// creating a fresh conversation, not by treating it as an error.
    async fn load_active(&self, key: &ConversationKey) -> Result<Option<ConversationState>>;

    /// Persist a conversation, inserting or replacing by conversation id.
    /// Archived conversations are kept; this component never hard-deletes.
    async fn save(&self, state: &ConversationState) -> Result<()>;
}
