//! The conversation state owned by the context manager.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use uuid::Uuid;

use super::{estimate_tokens, validate_window_size, DEFAULT_WINDOW_SIZE};
use crate::types::{
    ArtifactRef, ContextEntry, ContextError, ConversationKey, ConversationStatus, Interaction,
    InteractionKind, ProjectType, Result, Role,
};

/// Prefix applied to the rolling summary when it is emitted as a context
/// entry.
const SUMMARY_ENTRY_PREFIX: &str = "Previous conversation summary: ";

/// The bounded, token-accounted history of one iterative image-edit
/// conversation.
///
/// Owns the ordered interaction log for a single (project, user) key,
/// enforces the retained-interaction window, and maintains a rolling summary
/// of everything evicted from it. All methods are synchronous and touch only
/// owned state; persisting the result is the caller's job (call your store's
/// `save` after any mutating method).
///
/// Writers must be serialized per key: eviction and summary folding are
/// multi-step and not atomic under concurrent mutation. Read-only methods
/// like [`context_for_generation`](Self::context_for_generation) are safe to
/// call from any number of readers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationState {
    id: Uuid,
    key: ConversationKey,
    history: VecDeque<Interaction>,
    window_size: usize,
    /// Lifetime counter: never decreases, even across eviction.
    total_tokens_used: u64,
    current_artifact: Option<ArtifactRef>,
    summary: String,
    /// First `create`-kind content evicted from the window, ever.
    original_request: Option<String>,
    /// All `edit`-kind contents evicted from the window, in order.
    edit_trail: Vec<String>,
    last_interaction_at: Option<DateTime<Utc>>,
    last_summary_update: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    archived_at: Option<DateTime<Utc>>,
    status: ConversationStatus,
    project_type: ProjectType,
    aspect_ratio: String,
}

impl ConversationState {
    /// Create a fresh active conversation with the default window size.
    pub fn new(
        key: ConversationKey,
        project_type: ProjectType,
        aspect_ratio: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            key,
            history: VecDeque::new(),
            window_size: DEFAULT_WINDOW_SIZE,
            total_tokens_used: 0,
            current_artifact: None,
            summary: String::new(),
            original_request: None,
            edit_trail: Vec::new(),
            last_interaction_at: None,
            last_summary_update: None,
            created_at: Utc::now(),
            archived_at: None,
            status: ConversationStatus::Active,
            project_type,
            aspect_ratio: aspect_ratio.into(),
        }
    }

    /// Create a fresh conversation with an explicit window size (1–50).
    pub fn with_window_size(
        key: ConversationKey,
        project_type: ProjectType,
        aspect_ratio: impl Into<String>,
        window_size: usize,
    ) -> Result<Self> {
        let window_size = validate_window_size(window_size)?;
        let mut state = Self::new(key, project_type, aspect_ratio);
        state.window_size = window_size;
        Ok(state)
    }

    // ============= Accessors =============

    /// Unique identifier of this conversation instance.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The (project, user) key this conversation belongs to.
    pub fn key(&self) -> &ConversationKey {
        &self.key
    }

    /// Interactions currently retained verbatim, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &Interaction> {
        self.history.iter()
    }

    /// Number of interactions currently in the window.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Maximum number of interactions retained verbatim.
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Lifetime token counter across every append, eviction included.
    pub fn total_tokens_used(&self) -> u64 {
        self.total_tokens_used
    }

    /// Estimated tokens of the interactions currently in the window.
    ///
    /// Distinct from [`total_tokens_used`](Self::total_tokens_used): this
    /// one shrinks on eviction.
    pub fn window_tokens(&self) -> usize {
        self.history.iter().map(|i| i.token_count).sum()
    }

    /// Reference to the most recently produced or submitted artifact.
    pub fn current_artifact(&self) -> Option<&ArtifactRef> {
        self.current_artifact.as_ref()
    }

    /// Rolling digest of evicted interactions; empty until the first
    /// eviction.
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Timestamp of the most recent append.
    pub fn last_interaction_at(&self) -> Option<DateTime<Utc>> {
        self.last_interaction_at
    }

    /// Timestamp of the most recent summary fold.
    pub fn last_summary_update(&self) -> Option<DateTime<Utc>> {
        self.last_summary_update
    }

    /// Lifecycle status.
    pub fn status(&self) -> ConversationStatus {
        self.status
    }

    /// When this conversation was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When this conversation was archived, if it has been.
    pub fn archived_at(&self) -> Option<DateTime<Utc>> {
        self.archived_at
    }

    /// Project-type context tag, immutable for the conversation's lifetime.
    pub fn project_type(&self) -> ProjectType {
        self.project_type
    }

    /// Aspect-ratio context tag, immutable for the conversation's lifetime.
    pub fn aspect_ratio(&self) -> &str {
        &self.aspect_ratio
    }

    // ============= Mutations =============

    /// Append one interaction and evict down to the window size.
    ///
    /// Computes the token estimate for `content`, appends to the tail of the
    /// history, bumps the lifetime token counter, and records `artifact` as
    /// the current artifact. If the window then overflows, the oldest
    /// interactions are removed from the head and folded into the rolling
    /// summary — the only path by which the summary changes.
    ///
    /// Returns the new interaction's id so a follow-up edit can reference it
    /// as its parent.
    ///
    /// # Errors
    ///
    /// [`ContextError::Validation`] for empty content, an empty artifact
    /// reference, or the synthetic `System` role.
    /// [`ContextError::StateInvariant`] if the conversation is no longer
    /// active.
    pub fn add_interaction(
        &mut self,
        role: Role,
        content: impl Into<String>,
        artifact: ArtifactRef,
        kind: InteractionKind,
        parent: Option<Uuid>,
    ) -> Result<Uuid> {
        self.add_interaction_at(Utc::now(), role, content, artifact, kind, parent)
    }

    /// [`add_interaction`](Self::add_interaction) with a caller-supplied
    /// clock, for deterministic callers. Timestamps must be monotonically
    /// non-decreasing; a regression is a [`ContextError::StateInvariant`].
    pub fn add_interaction_at(
        &mut self,
        now: DateTime<Utc>,
        role: Role,
        content: impl Into<String>,
        artifact: ArtifactRef,
        kind: InteractionKind,
        parent: Option<Uuid>,
    ) -> Result<Uuid> {
        if self.status != ConversationStatus::Active {
            return Err(ContextError::StateInvariant(format!(
                "interaction appended to {} conversation {}",
                status_name(self.status),
                self.id
            )));
        }
        if role == Role::System {
            return Err(ContextError::Validation(
                "system is reserved for summary entries, not interactions".into(),
            ));
        }
        let content = content.into();
        if content.trim().is_empty() {
            return Err(ContextError::Validation("content is empty".into()));
        }
        if artifact.is_empty() {
            return Err(ContextError::Validation(
                "artifact reference is empty".into(),
            ));
        }
        if let Some(last) = self.last_interaction_at {
            if now < last {
                return Err(ContextError::StateInvariant(format!(
                    "timestamp {} precedes last interaction at {}",
                    now, last
                )));
            }
        }

        let token_count = estimate_tokens(&content);
        let id = Uuid::new_v4();
        self.history.push_back(Interaction {
            id,
            role,
            content,
            artifact: artifact.clone(),
            created_at: now,
            token_count,
            kind,
            parent,
        });
        self.total_tokens_used += token_count as u64;
        self.current_artifact = Some(artifact);
        self.last_interaction_at = Some(now);

        self.evict_to_window(now)?;
        Ok(id)
    }

    /// Change the retained-interaction window (1–50).
    ///
    /// Shrinking below the current history length evicts immediately, so
    /// `history_len() <= window_size()` holds unconditionally rather than
    /// only after the next append.
    pub fn set_window_size(&mut self, window_size: usize) -> Result<()> {
        self.window_size = validate_window_size(window_size)?;
        self.evict_to_window(Utc::now())
    }

    /// Archive this conversation. Terminal: no transition back to active —
    /// callers start a fresh conversation for the same key instead.
    ///
    /// # Errors
    ///
    /// [`ContextError::StateInvariant`] if the conversation is not active.
    pub fn archive(&mut self) -> Result<()> {
        if self.status != ConversationStatus::Active {
            return Err(ContextError::StateInvariant(format!(
                "archive of {} conversation {}",
                status_name(self.status),
                self.id
            )));
        }
        self.status = ConversationStatus::Archived;
        self.archived_at = Some(Utc::now());
        Ok(())
    }

    // ============= Context Slicing =============

    /// Build a token-budgeted context slice for a generation request.
    ///
    /// The slice is chronological: the rolling summary first (as a single
    /// `System` entry, always included in full — it is cheap and essential
    /// context — but still counted against the budget), then as many of the
    /// most recent interactions as fit. The walk runs newest-to-oldest and
    /// stops at the first interaction that would exceed the remaining
    /// budget; it never skips over one to reach an older entry.
    ///
    /// Read-only: mutates nothing, so repeated calls with the same budget
    /// return identical slices. Call it with a large budget for display and
    /// a smaller one to leave headroom for the new request payload.
    pub fn context_for_generation(&self, max_tokens: usize) -> Vec<ContextEntry> {
        let mut used = 0usize;
        let mut entries = Vec::new();

        if !self.summary.is_empty() {
            entries.push(ContextEntry {
                role: Role::System,
                content: format!("{}{}", SUMMARY_ENTRY_PREFIX, self.summary),
                artifact: None,
                created_at: None,
            });
            used += estimate_tokens(&self.summary);
        }

        // Walk newest-to-oldest, then restore chronological order.
        let mut recent = Vec::new();
        for interaction in self.history.iter().rev() {
            if used + interaction.token_count > max_tokens {
                break;
            }
            used += interaction.token_count;
            recent.push(ContextEntry {
                role: interaction.role,
                content: interaction.content.clone(),
                artifact: Some(interaction.artifact.clone()),
                created_at: Some(interaction.created_at),
            });
        }
        recent.reverse();
        entries.extend(recent);
        entries
    }

    // ============= Eviction & Summary =============

    /// Remove head entries until the history fits the window, folding them
    /// into the rolling summary.
    fn evict_to_window(&mut self, now: DateTime<Utc>) -> Result<()> {
        if self.history.len() <= self.window_size {
            return Ok(());
        }
        let excess = self.history.len() - self.window_size;
        if excess > self.history.len() {
            return Err(ContextError::StateInvariant(format!(
                "eviction of {} entries from a history of {}",
                excess,
                self.history.len()
            )));
        }
        let evicted: Vec<Interaction> = self.history.drain(..excess).collect();
        tracing::debug!(
            conversation = %self.id,
            evicted = evicted.len(),
            retained = self.history.len(),
            "evicted oldest interactions from window"
        );
        self.fold_into_summary(&evicted);
        self.last_summary_update = Some(now);
        Ok(())
    }

    /// Fold evicted interactions into the rolling summary.
    ///
    /// The summary is a deliberate lossy compression favoring the original
    /// ask and the edit trajectory over the exact wording of every step:
    /// one line naming the project type and aspect ratio, one with the
    /// first evicted `create` content, one chaining evicted `edit` contents
    /// in order. It is derived from evicted interactions only — entries
    /// still in the window are never folded, so the summary always lags the
    /// live history. Folding nothing into an empty summary is a no-op.
    fn fold_into_summary(&mut self, evicted: &[Interaction]) {
        if evicted.is_empty() {
            return;
        }
        for interaction in evicted {
            match interaction.kind {
                InteractionKind::Create => {
                    if self.original_request.is_none() {
                        self.original_request = Some(interaction.content.clone());
                    }
                }
                InteractionKind::Edit => self.edit_trail.push(interaction.content.clone()),
                InteractionKind::Refine => {}
            }
        }
        self.summary = self.render_summary();
    }

    fn render_summary(&self) -> String {
        let mut lines = vec![format!(
            "Project Type: {} ({})",
            self.project_type, self.aspect_ratio
        )];
        if let Some(original) = &self.original_request {
            lines.push(format!("Original Creation: {}", original));
        }
        if !self.edit_trail.is_empty() {
            lines.push(format!("Previous Edits: {}", self.edit_trail.join(" → ")));
        }
        lines.join("\n")
    }
}

fn status_name(status: ConversationStatus) -> &'static str {
    match status {
        ConversationStatus::Active => "active",
        ConversationStatus::Archived => "archived",
        ConversationStatus::Paused => "paused",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn key() -> ConversationKey {
        ConversationKey::new("proj-1", "user-1").unwrap()
    }

    fn conversation() -> ConversationState {
        ConversationState::new(key(), ProjectType::Youtube, "16:9")
    }

    fn append(state: &mut ConversationState, content: &str, kind: InteractionKind) -> Uuid {
        let role = if state.history_len() % 2 == 0 {
            Role::User
        } else {
            Role::Assistant
        };
        state
            .add_interaction(role, content, ArtifactRef::new("img-x"), kind, None)
            .expect("append should succeed")
    }

    #[rstest]
    #[case(5, 10, 5)]
    #[case(10, 10, 10)]
    #[case(25, 10, 10)]
    #[case(3, 1, 1)]
    fn test_window_bound(#[case] appends: usize, #[case] window: usize, #[case] expected: usize) {
        let mut state =
            ConversationState::with_window_size(key(), ProjectType::Youtube, "16:9", window)
                .unwrap();
        for i in 0..appends {
            append(&mut state, &format!("step number {}", i), InteractionKind::Edit);
        }
        assert_eq!(state.history_len(), expected);
    }

    #[test]
    fn test_total_tokens_is_lifetime_counter() {
        let mut state =
            ConversationState::with_window_size(key(), ProjectType::Youtube, "16:9", 2).unwrap();
        let contents = [
            "create a gaming thumbnail",
            "make the title pop",
            "add a red border",
            "darken the background",
        ];
        let expected: u64 = contents
            .iter()
            .map(|c| crate::memory::estimate_tokens(c) as u64)
            .sum();
        for content in contents {
            append(&mut state, content, InteractionKind::Edit);
        }
        // Two entries were evicted, yet the lifetime counter keeps them.
        assert_eq!(state.history_len(), 2);
        assert_eq!(state.total_tokens_used(), expected);
        assert!(state.total_tokens_used() >= state.window_tokens() as u64);
        assert!((state.window_tokens() as u64) < expected);
    }

    #[test]
    fn test_history_stays_chronological() {
        let mut state =
            ConversationState::with_window_size(key(), ProjectType::Youtube, "16:9", 3).unwrap();
        for i in 0..6 {
            append(&mut state, &format!("edit {}", i), InteractionKind::Edit);
        }
        let stamps: Vec<_> = state.history().map(|i| i.created_at).collect();
        let mut sorted = stamps.clone();
        sorted.sort();
        assert_eq!(stamps, sorted);
        // Eviction removed from the head: the newest three remain.
        let contents: Vec<_> = state.history().map(|i| i.content.as_str()).collect();
        assert_eq!(contents, vec!["edit 3", "edit 4", "edit 5"]);
    }

    #[test]
    fn test_summary_lags_window() {
        let mut state =
            ConversationState::with_window_size(key(), ProjectType::Youtube, "16:9", 3).unwrap();
        for content in ["one", "two", "three", "four", "five"] {
            append(&mut state, content, InteractionKind::Edit);
        }
        // Only the two evicted entries are summarized; "three" survives in
        // the window even though it is older than "four" and "five".
        assert_eq!(state.summary(), "Project Type: youtube (16:9)\nPrevious Edits: one → two");
        assert!(!state.summary().contains("three"));
    }

    #[test]
    fn test_eviction_scenario_window_two() {
        let mut state =
            ConversationState::with_window_size(key(), ProjectType::Youtube, "16:9", 2).unwrap();
        state
            .add_interaction(
                Role::User,
                "make it blue",
                ArtifactRef::new("img1"),
                InteractionKind::Edit,
                None,
            )
            .unwrap();
        state
            .add_interaction(
                Role::Assistant,
                "Done, blue background applied",
                ArtifactRef::new("img2"),
                InteractionKind::Edit,
                None,
            )
            .unwrap();
        assert_eq!(state.history_len(), 2);
        assert_eq!(state.summary(), "");

        state
            .add_interaction(
                Role::User,
                "now add text",
                ArtifactRef::new("img2"),
                InteractionKind::Edit,
                None,
            )
            .unwrap();
        assert_eq!(state.history_len(), 2);
        assert!(state.summary().contains("Previous Edits: make it blue"));
        let contents: Vec<_> = state.history().map(|i| i.content.as_str()).collect();
        assert_eq!(contents, vec!["Done, blue background applied", "now add text"]);
        assert!(state.last_summary_update().is_some());
    }

    #[test]
    fn test_summary_unchanged_without_eviction() {
        let mut state = conversation();
        append(&mut state, "create something", InteractionKind::Create);
        assert_eq!(state.summary(), "");
        assert!(state.last_summary_update().is_none());
    }

    #[test]
    fn test_summary_keeps_first_create_and_edit_chain() {
        let mut state =
            ConversationState::with_window_size(key(), ProjectType::Reels, "9:16", 1).unwrap();
        append(&mut state, "make me a cooking short cover", InteractionKind::Create);
        append(&mut state, "add steam over the pot", InteractionKind::Edit);
        append(&mut state, "slightly warmer colors", InteractionKind::Refine);
        append(&mut state, "zoom in on the dish", InteractionKind::Edit);
        assert_eq!(
            state.summary(),
            "Project Type: reels (9:16)\n\
             Original Creation: make me a cooking short cover\n\
             Previous Edits: add steam over the pot → zoom in on the dish"
        );
    }

    #[test]
    fn test_summary_omits_create_line_when_none_evicted() {
        let mut state =
            ConversationState::with_window_size(key(), ProjectType::Youtube, "16:9", 1).unwrap();
        append(&mut state, "brighter", InteractionKind::Edit);
        append(&mut state, "sharper", InteractionKind::Edit);
        assert!(!state.summary().contains("Original Creation"));
        assert!(state.summary().contains("Previous Edits: brighter"));
    }

    #[test]
    fn test_context_budget_respected() {
        let mut state =
            ConversationState::with_window_size(key(), ProjectType::Youtube, "16:9", 10).unwrap();
        for i in 0..8 {
            append(
                &mut state,
                &format!("a reasonably long edit instruction number {}", i),
                InteractionKind::Edit,
            );
        }
        let budget = 20;
        let entries = state.context_for_generation(budget);
        let spent: usize = entries
            .iter()
            .filter(|e| e.role != Role::System)
            .map(|e| crate::memory::estimate_tokens(&e.content))
            .sum();
        assert!(spent <= budget, "spent {} tokens over budget {}", spent, budget);
        // The newest entries win the budget.
        assert_eq!(
            entries.last().unwrap().content,
            "a reasonably long edit instruction number 7"
        );
    }

    #[test]
    fn test_context_zero_budget_still_returns_summary() {
        let mut state =
            ConversationState::with_window_size(key(), ProjectType::Youtube, "16:9", 1).unwrap();
        append(&mut state, "make it blue", InteractionKind::Edit);
        append(&mut state, "make it red", InteractionKind::Edit);
        assert!(!state.summary().is_empty());

        let entries = state.context_for_generation(0);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].role, Role::System);
        assert!(entries[0].content.starts_with("Previous conversation summary: "));
        assert!(entries[0].artifact.is_none());
    }

    #[test]
    fn test_context_is_chronological_with_summary_first() {
        let mut state =
            ConversationState::with_window_size(key(), ProjectType::Youtube, "16:9", 2).unwrap();
        for content in ["one", "two", "three"] {
            append(&mut state, content, InteractionKind::Edit);
        }
        let entries = state.context_for_generation(10_000);
        assert_eq!(entries[0].role, Role::System);
        assert_eq!(entries[1].content, "two");
        assert_eq!(entries[2].content, "three");
        assert!(entries[1].created_at.unwrap() <= entries[2].created_at.unwrap());
        assert!(entries[1].artifact.is_some());
    }

    #[test]
    fn test_context_read_is_idempotent() {
        let mut state = conversation();
        for i in 0..4 {
            append(&mut state, &format!("edit {}", i), InteractionKind::Edit);
        }
        let first = state.context_for_generation(100);
        let second = state.context_for_generation(100);
        assert_eq!(first, second);
        // And the read mutated nothing.
        assert_eq!(state.history_len(), 4);
        assert_eq!(state.summary(), "");
    }

    #[test]
    fn test_token_estimate_is_deterministic_per_content() {
        let mut state = conversation();
        append(&mut state, "make it darker", InteractionKind::Edit);
        append(&mut state, "make it darker", InteractionKind::Edit);
        let counts: Vec<_> = state.history().map(|i| i.token_count).collect();
        assert_eq!(counts[0], counts[1]);
    }

    #[test]
    fn test_rejects_empty_content() {
        let mut state = conversation();
        let err = state
            .add_interaction(
                Role::User,
                "   ",
                ArtifactRef::new("img1"),
                InteractionKind::Create,
                None,
            )
            .unwrap_err();
        assert!(matches!(err, ContextError::Validation(_)));
    }

    #[test]
    fn test_rejects_empty_artifact() {
        let mut state = conversation();
        let err = state
            .add_interaction(
                Role::User,
                "make it blue",
                ArtifactRef::new(""),
                InteractionKind::Edit,
                None,
            )
            .unwrap_err();
        assert!(matches!(err, ContextError::Validation(_)));
    }

    #[test]
    fn test_rejects_system_role_interaction() {
        let mut state = conversation();
        let err = state
            .add_interaction(
                Role::System,
                "sneaky summary",
                ArtifactRef::new("img1"),
                InteractionKind::Create,
                None,
            )
            .unwrap_err();
        assert!(matches!(err, ContextError::Validation(_)));
    }

    #[test]
    fn test_rejects_timestamp_regression() {
        let mut state = conversation();
        let now = Utc::now();
        state
            .add_interaction_at(
                now,
                Role::User,
                "first",
                ArtifactRef::new("img1"),
                InteractionKind::Create,
                None,
            )
            .unwrap();
        let err = state
            .add_interaction_at(
                now - chrono::Duration::seconds(5),
                Role::Assistant,
                "second",
                ArtifactRef::new("img2"),
                InteractionKind::Edit,
                None,
            )
            .unwrap_err();
        assert!(matches!(err, ContextError::StateInvariant(_)));
    }

    #[test]
    fn test_archived_is_terminal() {
        let mut state = conversation();
        append(&mut state, "create it", InteractionKind::Create);
        state.archive().unwrap();
        assert_eq!(state.status(), ConversationStatus::Archived);
        assert!(state.archived_at().is_some());

        let err = state
            .add_interaction(
                Role::User,
                "one more",
                ArtifactRef::new("img9"),
                InteractionKind::Edit,
                None,
            )
            .unwrap_err();
        assert!(matches!(err, ContextError::StateInvariant(_)));
        assert!(matches!(
            state.archive().unwrap_err(),
            ContextError::StateInvariant(_)
        ));
    }

    #[test]
    fn test_shrinking_window_evicts_immediately() {
        let mut state = conversation();
        for i in 0..6 {
            append(&mut state, &format!("edit {}", i), InteractionKind::Edit);
        }
        state.set_window_size(2).unwrap();
        assert_eq!(state.history_len(), 2);
        assert!(state.summary().contains("edit 0"));
        assert!(state.summary().contains("edit 3"));
        assert!(!state.summary().contains("edit 4"));
    }

    #[test]
    fn test_window_size_out_of_bounds() {
        let mut state = conversation();
        assert!(matches!(
            state.set_window_size(0).unwrap_err(),
            ContextError::Validation(_)
        ));
        assert!(matches!(
            state.set_window_size(51).unwrap_err(),
            ContextError::Validation(_)
        ));
        assert_eq!(state.window_size(), DEFAULT_WINDOW_SIZE);
    }

    #[test]
    fn test_current_artifact_tracks_latest_append() {
        let mut state = conversation();
        state
            .add_interaction(
                Role::User,
                "create it",
                ArtifactRef::new("img1"),
                InteractionKind::Create,
                None,
            )
            .unwrap();
        state
            .add_interaction(
                Role::Assistant,
                "created",
                ArtifactRef::new("img2"),
                InteractionKind::Create,
                None,
            )
            .unwrap();
        assert_eq!(state.current_artifact().unwrap().as_str(), "img2");
    }

    #[test]
    fn test_parent_reference_is_kept() {
        let mut state = conversation();
        let first = state
            .add_interaction(
                Role::User,
                "create a thumbnail",
                ArtifactRef::new("img1"),
                InteractionKind::Create,
                None,
            )
            .unwrap();
        state
            .add_interaction(
                Role::User,
                "tweak the colors",
                ArtifactRef::new("img1"),
                InteractionKind::Edit,
                Some(first),
            )
            .unwrap();
        let last = state.history().last().unwrap();
        assert_eq!(last.parent, Some(first));
    }
}
