//! Core types for conversation context management.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============= Conversation Identity =============

/// Identifies one active conversation: a (project, user) pair.
///
/// Both components are opaque identifiers owned by external systems (the
/// project store and the identity provider). The only validation applied is
/// non-emptiness.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationKey {
    /// Project identifier
    pub project_id: String,
    /// User identifier (opaque, from the identity provider)
    pub user_id: String,
}

impl ConversationKey {
    /// Create a key, rejecting empty components.
    pub fn new(project_id: impl Into<String>, user_id: impl Into<String>) -> Result<Self> {
        let project_id = project_id.into();
        let user_id = user_id.into();
        if project_id.is_empty() {
            return Err(ContextError::Validation("project_id is empty".into()));
        }
        if user_id.is_empty() {
            return Err(ContextError::Validation("user_id is empty".into()));
        }
        Ok(Self {
            project_id,
            user_id,
        })
    }
}

/// Opaque reference to an image artifact owned by external storage.
///
/// This component never fetches, decodes, or validates reachability of the
/// reference; it only records it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactRef(String);

impl ArtifactRef {
    /// Wrap an externally produced artifact identifier or URL.
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// The raw reference string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for ArtifactRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ============= Interaction Types =============

/// Author of a context entry or interaction.
///
/// `System` is synthetic: it tags the rolling-summary entry in a context
/// slice and is rejected as an interaction role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Synthetic entries (the rolling summary)
    System,
    /// The person driving the edit session
    User,
    /// The generation backend's textual response
    Assistant,
}

/// Classifies an interaction's intent within the edit session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    /// The original ask that produced the first artifact
    #[default]
    Create,
    /// A modification of an existing artifact
    Edit,
    /// A wording refinement that did not change the artifact's direction
    Refine,
}

/// Lifecycle status of a conversation.
///
/// `Paused` is declared for schema compatibility but reserved: no operation
/// transitions into or out of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationStatus {
    /// Accepting interactions
    #[default]
    Active,
    /// Terminal; a fresh conversation is created on next use
    Archived,
    /// Reserved, currently unused
    Paused,
}

/// The kind of project the conversation is editing thumbnails for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    /// Landscape video thumbnails
    Youtube,
    /// Vertical short-form thumbnails
    Reels,
}

impl std::fmt::Display for ProjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectType::Youtube => f.write_str("youtube"),
            ProjectType::Reels => f.write_str("reels"),
        }
    }
}

/// One turn in the editing conversation. Immutable once appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    /// Unique interaction identifier
    pub id: Uuid,
    /// Who authored this turn (`User` or `Assistant`)
    pub role: Role,
    /// Prompt text or the backend's textual response
    pub content: String,
    /// The artifact submitted with or produced by this turn
    pub artifact: ArtifactRef,
    /// Append time, monotonically non-decreasing within a conversation
    pub created_at: DateTime<Utc>,
    /// Estimated token count of `content`, computed at append time
    pub token_count: usize,
    /// Intent classification
    pub kind: InteractionKind,
    /// The interaction this one edits or extends, if any
    pub parent: Option<Uuid>,
}

/// One element of a token-budgeted context slice handed to a generation
/// backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextEntry {
    /// Original role, or `System` for the summary entry
    pub role: Role,
    /// Entry text
    pub content: String,
    /// Artifact reference, absent on the summary entry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact: Option<ArtifactRef>,
    /// Original append time, absent on the summary entry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

// ============= Error Types =============

/// Errors surfaced by the context manager and its collaborators.
#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    /// Malformed input; never retried, the caller must fix the call.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// No active conversation exists for the key. Expected and non-fatal;
    /// callers create a fresh conversation in response.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A programming-contract bug. Fatal, never retried or recovered.
    #[error("State invariant violated: {0}")]
    StateInvariant(String),

    /// Failure reported by the persistence collaborator. Propagated as-is;
    /// this component performs no retries.
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, ContextError>;
