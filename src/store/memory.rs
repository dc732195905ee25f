//! In-memory conversation store.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use super::ConversationStore;
use crate::memory::ConversationState;
use crate::types::{ConversationKey, ConversationStatus, Result};

/// Conversation store backed by a process-local map.
///
/// The default backend for development and tests. Everything lives behind a
/// single `RwLock`; archived conversations are retained alongside active
/// ones, keyed by conversation id, so at most one active conversation per
/// (project, user) key exists as long as callers archive before recreating.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    conversations: RwLock<HashMap<Uuid, ConversationState>>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored conversations, archived included.
    pub fn count(&self) -> usize {
        self.conversations.read().len()
    }
}

#[async_trait]
impl ConversationStore for InMemoryStore {
    async fn load_active(&self, key: &ConversationKey) -> Result<Option<ConversationState>> {
        let conversations = self.conversations.read();
        Ok(conversations
            .values()
            .find(|c| c.key() == key && c.status() == ConversationStatus::Active)
            .cloned())
    }

    async fn save(&self, state: &ConversationState) -> Result<()> {
        self.conversations.write().insert(state.id(), state.clone());
        tracing::debug!(conversation = %state.id(), "saved conversation");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProjectType;

    fn key() -> ConversationKey {
        ConversationKey::new("proj-1", "user-1").unwrap()
    }

    #[tokio::test]
    async fn test_load_missing_returns_none() {
        let store = InMemoryStore::new();
        let loaded = store.load_active(&key()).await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_save_and_load_active() {
        let store = InMemoryStore::new();
        let state = ConversationState::new(key(), ProjectType::Youtube, "16:9");
        store.save(&state).await.unwrap();

        let loaded = store.load_active(&key()).await.unwrap().unwrap();
        assert_eq!(loaded.id(), state.id());
        assert_eq!(loaded.key(), &key());
    }

    #[tokio::test]
    async fn test_archived_conversations_are_kept_but_not_active() {
        let store = InMemoryStore::new();
        let mut state = ConversationState::new(key(), ProjectType::Youtube, "16:9");
        store.save(&state).await.unwrap();

        state.archive().unwrap();
        store.save(&state).await.unwrap();

        assert!(store.load_active(&key()).await.unwrap().is_none());
        assert_eq!(store.count(), 1);
    }

    #[tokio::test]
    async fn test_save_replaces_by_id() {
        let store = InMemoryStore::new();
        let state = ConversationState::new(key(), ProjectType::Youtube, "16:9");
        store.save(&state).await.unwrap();
        store.save(&state).await.unwrap();
        assert_eq!(store.count(), 1);
    }
}
