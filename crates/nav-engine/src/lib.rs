//! Navtree Engine
//!
//! Pure, synchronous operations over an immutable [`Forest`](nav_model::Forest):
//!
//! - [`IdSynthesizer`]: deterministic ids for nodes the store has not saved
//! - [`find_path`]: ancestor chain of a node, stored order
//! - [`apply_at`] / [`resolve_and_mutate`]: insert, replace or remove at a
//!   path, sharing every untouched subtree
//! - [`review`] / [`set_status`]: per-node approval workflow
//! - [`public_tree`] / [`pending_queue`]: projections for the public site and
//!   the moderation dashboard
//!
//! Nothing here suspends, retries or performs I/O; sequencing against the
//! remote store belongs to the host.
//!
//! # Example
//!
//! ```rust,ignore
//! use nav_engine::{EngineConfig, IdSynthesizer, resolve_and_mutate, Mutation};
//!
//! let config = EngineConfig::default();
//! let forest = IdSynthesizer::new(&config).decorate_forest(&records);
//! let next = resolve_and_mutate(&forest, &target, Mutation::Remove)?;
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod approval;
mod config;
mod error;
mod identity;
mod mutate;
mod projection;
mod resolve;
mod slug;

// Re-exports
pub use approval::{allowed_transitions, review, set_status, validate_transition};
pub use config::EngineConfig;
pub use error::EngineError;
pub use identity::IdSynthesizer;
pub use mutate::{apply_at, insert_root, remove_root, resolve_and_mutate, Mutation};
pub use projection::{
    display_title, pending_queue, public_tree, resolve_path, status_counts, PendingEntry, PublicNode,
    StatusCounts,
};
pub use resolve::{contains, find_by_key, find_node, find_path};
pub use slug::{join_path, slugify};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the engine
    pub use crate::{
        find_path, pending_queue, public_tree, resolve_and_mutate, review, EngineConfig, EngineError,
        IdSynthesizer, Mutation,
    };
    pub use nav_model::{Decision, Forest, Node, NodeId, NodeKind, NodePath, NodeRecord, Status};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
