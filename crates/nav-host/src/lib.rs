//! Navtree Host
//!
//! Sequences engine operations against a remote [`ForestStore`]:
//!
//! - [`NavigationHost`]: owns the current forest, persists one root per edit,
//!   installs the store's authoritative copy and locks a root while it saves
//! - [`EventBus`]: broadcasts [`ForestChanged`] to every render surface
//! - [`Latest`] / [`RequestClock`]: last-response-wins gating
//! - [`PendingQueuePoller`]: periodic refresh for the moderation dashboard
//!
//! # Example
//!
//! ```rust,ignore
//! use nav_host::{HostConfig, NavigationHost};
//! use nav_model::Decision;
//!
//! # async fn example(store: std::sync::Arc<impl nav_host::ForestStore>) -> Result<(), nav_host::HostError> {
//! let host = NavigationHost::new(store, HostConfig::default());
//! let forest = host.refresh().await?;
//! let draft = host.pending_queue()[0].node.id.clone();
//! host.review(&draft, Decision::Approve).await?;
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod config;
mod error;
mod events;
mod gate;
mod host;
mod poller;
mod store;

// Re-exports
pub use config::HostConfig;
pub use error::{ConfigError, HostError, StoreError};
pub use events::{ChangeCause, EventBus, ForestChanged};
pub use gate::{Latest, RequestClock, RequestStamp};
pub use host::NavigationHost;
pub use poller::PendingQueuePoller;
pub use store::ForestStore;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for embedding the host
    pub use crate::{
        ChangeCause, ForestChanged, ForestStore, HostConfig, HostError, NavigationHost, PendingQueuePoller,
        StoreError,
    };
    pub use nav_engine::prelude::*;
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
