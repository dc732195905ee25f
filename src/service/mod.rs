//! Request-handler-facing conversation service.
//!
//! [`ConversationService`] wraps a [`ConversationStore`] and owns the
//! load → mutate → save cycle for conversation state, including the per-key
//! write serialization the core requires: eviction and summary folding are
//! multi-step, so at most one write per (project, user) key may be in
//! flight at a time. Reads take no lock.
//!
//! The service is constructed by the caller with an explicit store client —
//! there is no process-wide connection singleton.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use uuid::Uuid;

use crate::memory::ConversationState;
use crate::store::ConversationStore;
use crate::types::{
    ArtifactRef, ContextEntry, ContextError, ConversationKey, InteractionKind, ProjectType,
    Result, Role,
};
use crate::utils::config::ContextConfig;

/// Serializes writes per conversation key and mediates store access.
pub struct ConversationService {
    store: Arc<dyn ConversationStore>,
    config: ContextConfig,
    write_locks: Mutex<HashMap<ConversationKey, Arc<tokio::sync::Mutex<()>>>>,
}

impl ConversationService {
    /// Create a service over a caller-constructed store client.
    pub fn new(store: Arc<dyn ConversationStore>, config: ContextConfig) -> Self {
        Self {
            store,
            config,
            write_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Load the active conversation for a key, or construct a fresh one.
    ///
    /// A fresh conversation is not persisted until its first interaction is
    /// recorded, matching the store's one-active-per-key contract. The
    /// missing-conversation case is expected, not an error path.
    pub async fn find_or_create(
        &self,
        key: &ConversationKey,
        project_type: ProjectType,
        aspect_ratio: Option<String>,
    ) -> Result<ConversationState> {
        if let Some(existing) = self.store.load_active(key).await? {
            return Ok(existing);
        }
        let aspect_ratio =
            aspect_ratio.unwrap_or_else(|| self.config.default_aspect_ratio.clone());
        let state = ConversationState::with_window_size(
            key.clone(),
            project_type,
            aspect_ratio,
            self.config.window_size,
        )?;
        tracing::info!(
            conversation = %state.id(),
            project = %key.project_id,
            "started fresh conversation"
        );
        Ok(state)
    }

    /// Record one interaction for a key and persist the updated state.
    ///
    /// Takes the per-key write lock for the whole load → append → save
    /// cycle. Returns the persisted state along with the new interaction's
    /// id, so the caller can thread it through as the parent of a follow-up
    /// edit.
    #[allow(clippy::too_many_arguments)]
    pub async fn record_interaction(
        &self,
        key: &ConversationKey,
        project_type: ProjectType,
        aspect_ratio: Option<String>,
        role: Role,
        content: impl Into<String>,
        artifact: ArtifactRef,
        kind: InteractionKind,
        parent: Option<Uuid>,
    ) -> Result<(ConversationState, Uuid)> {
        let lock = self.write_lock(key);
        let _guard = lock.lock().await;

        let mut state = self.find_or_create(key, project_type, aspect_ratio).await?;
        let interaction_id = state.add_interaction(role, content, artifact, kind, parent)?;
        self.store.save(&state).await?;
        Ok((state, interaction_id))
    }

    /// Token-budgeted context slice for the active conversation, or `None`
    /// when the key has no active conversation. Read-only, takes no lock.
    pub async fn context(
        &self,
        key: &ConversationKey,
        max_tokens: usize,
    ) -> Result<Option<Vec<ContextEntry>>> {
        let state = self.store.load_active(key).await?;
        Ok(state.map(|s| s.context_for_generation(max_tokens)))
    }

    /// Context slice at the configured generation budget (headroom left for
    /// the new request payload).
    pub async fn generation_context(
        &self,
        key: &ConversationKey,
    ) -> Result<Option<Vec<ContextEntry>>> {
        self.context(key, self.config.generation_budget).await
    }

    /// Context slice at the larger display budget, for human-facing
    /// history rendering.
    pub async fn display_context(
        &self,
        key: &ConversationKey,
    ) -> Result<Option<Vec<ContextEntry>>> {
        self.context(key, self.config.display_budget).await
    }

    /// Archive the active conversation for a key (the "reset" action).
    ///
    /// Archival is terminal for that conversation instance; the next
    /// [`find_or_create`](Self::find_or_create) starts a fresh one. Returns
    /// whether an active conversation was archived.
    pub async fn archive(&self, key: &ConversationKey) -> Result<bool> {
        let lock = self.write_lock(key);
        let _guard = lock.lock().await;

        let Some(mut state) = self.store.load_active(key).await? else {
            return Ok(false);
        };
        state.archive()?;
        self.store.save(&state).await?;
        tracing::info!(conversation = %state.id(), "archived conversation");
        Ok(true)
    }

    /// Update the retained-interaction window (1–50) of the active
    /// conversation, evicting immediately if it shrank.
    ///
    /// # Errors
    ///
    /// [`ContextError::NotFound`] when the key has no active conversation.
    pub async fn set_window_size(
        &self,
        key: &ConversationKey,
        window_size: usize,
    ) -> Result<ConversationState> {
        let lock = self.write_lock(key);
        let _guard = lock.lock().await;

        let Some(mut state) = self.store.load_active(key).await? else {
            return Err(ContextError::NotFound(format!(
                "no active conversation for project {} and user {}",
                key.project_id, key.user_id
            )));
        };
        state.set_window_size(window_size)?;
        self.store.save(&state).await?;
        Ok(state)
    }

    fn write_lock(&self, key: &ConversationKey) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.write_locks.lock();
        locks.entry(key.clone()).or_default().clone()
    }
}
