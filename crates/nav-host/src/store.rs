//! Remote store collaborator
//!
//! The host talks to persistence only through [`ForestStore`]. Transport,
//! authentication and server-side validation live behind it.

use crate::error::StoreError;
use async_trait::async_trait;
use nav_model::NodeRecord;

/// Authoritative storage of the navigation forest
///
/// Every write returns the store's own copy of what it saved; ids in that
/// copy may differ from the ones sent.
#[async_trait]
pub trait ForestStore: Send + Sync {
    /// Load every root menu with its nested items
    async fn fetch_forest(&self) -> Result<Vec<NodeRecord>, StoreError>;

    /// Replace one stored root (and its items) wholesale
    async fn persist_root(&self, root_id: &str, root: NodeRecord) -> Result<NodeRecord, StoreError>;

    /// Store a root menu that has never been saved
    async fn create_root(&self, root: NodeRecord) -> Result<NodeRecord, StoreError>;

    /// Delete a stored root and everything under it
    async fn delete_root(&self, root_id: &str) -> Result<(), StoreError>;
}
