//! # thumbtrail
//!
//! A bounded, token-budgeted conversation context manager for iterative
//! AI image-editing sessions.
//!
//! ## Overview
//!
//! One conversation exists per (project, user) key and is linearly ordered.
//! The core, [`ConversationState`], keeps a verbatim window of the most
//! recent interactions, evicts the oldest once the window overflows, folds
//! evicted turns into a rolling summary, and produces chronological,
//! token-budgeted context slices for a generation backend. Everything heavy
//! — images, identity, the real database, the generation model — stays
//! outside: this crate only holds text and opaque references.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use thumbtrail::{
//!     ArtifactRef, ContextConfig, ConversationKey, ConversationService,
//!     InMemoryStore, InteractionKind, ProjectType, Role,
//! };
//!
//! #[tokio::main]
//! async fn main() -> thumbtrail::Result<()> {
//!     let service = ConversationService::new(
//!         Arc::new(InMemoryStore::new()),
//!         ContextConfig::default(),
//!     );
//!     let key = ConversationKey::new("project-1", "user-1")?;
//!
//!     service
//!         .record_interaction(
//!             &key,
//!             ProjectType::Youtube,
//!             None,
//!             Role::User,
//!             "create a bold gaming thumbnail",
//!             ArtifactRef::new("cdn://img-1"),
//!             InteractionKind::Create,
//!             None,
//!         )
//!         .await?;
//!
//!     // Budget-respecting slice for the next generation request.
//!     let context = service.generation_context(&key).await?;
//!     println!("{:?}", context);
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`memory`] - The windowed history, summary, and context-slicing core
//! - [`service`] - Request-handler-facing wrapper with per-key write locks
//! - [`store`] - Persistence abstraction and the in-memory reference store
//! - [`types`] - Data model and error taxonomy
//! - [`utils`] - Configuration

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

/// Conversation memory and context management.
pub mod memory;
/// Conversation service for request handlers.
pub mod service;
/// Persistence abstraction.
pub mod store;
/// Core types (interactions, context entries, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;

// Re-export commonly used types
pub use memory::{estimate_tokens, ConversationState, DEFAULT_WINDOW_SIZE};
pub use service::ConversationService;
pub use store::{ConversationStore, InMemoryStore, StoreProvider};
pub use types::{
    ArtifactRef, ContextEntry, ContextError, ConversationKey, ConversationStatus, Interaction,
    InteractionKind, ProjectType, Result, Role,
};
pub use utils::config::ContextConfig;
