//! Navtree Model
//!
//! Data model for hierarchical navigation menus.
//!
//! # Core Concepts
//!
//! - [`Node`]: a root menu or nested item, same shape at every depth
//! - [`Forest`]: immutable, structurally shared sequence of root menus
//! - [`NodePath`]: ancestor chain from a root down to one node
//! - [`NodeId`]: persisted or synthesized identity, see [`NodeId::is_persisted`]
//! - [`NodeRecord`]: wire shape exchanged with the remote store
//! - [`Fingerprint`]: Blake3 digest used to derive synthesized ids
//!
//! # Example
//!
//! ```rust,ignore
//! use nav_model::{Forest, Node, NodeId, NodeKind, LocalizedText};
//!
//! let root = Node::new(NodeId::persisted("r1"), NodeKind::Menu, LocalizedText::single("en", "Home"));
//! let forest = Forest::new().push_root(root);
//! assert_eq!(forest.node_count(), 1);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod fingerprint;
mod forest;
mod id;
mod node;
mod path;
mod record;
mod status;
mod text;

// Re-exports
pub use fingerprint::Fingerprint;
pub use forest::{Forest, Iter};
pub use id::NodeId;
pub use node::{Children, Destination, Node, NodeKind};
pub use path::{NodePath, PathError, PathStep};
pub use record::NodeRecord;
pub use status::{Decision, Status};
pub use text::LocalizedText;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
