//! Navigation host
//!
//! Owns the in-memory forest and sequences every change against the store:
//!
//! 1. Read the current forest
//! 2. Compute the new forest with the engine
//! 3. Send the changed root to the store
//! 4. On success, swap the store's copy of that root (re-decorated, ids
//!    may change) into the forest as it is *now* and broadcast
//!    [`ForestChanged`](crate::ForestChanged)
//! 5. On failure, keep the old forest and surface the error
//!
//! A root is locked for editing while its save is in flight. Saves on
//! different roots may overlap and land in any order; each one only replaces
//! its own root, so none is lost.

use crate::config::HostConfig;
use crate::error::{HostError, StoreError};
use crate::events::{ChangeCause, EventBus, ForestChanged};
use crate::gate::{Latest, RequestClock, RequestStamp};
use crate::store::ForestStore;
use dashmap::DashSet;
use nav_engine::{
    apply_at, find_path, insert_root, pending_queue, public_tree, remove_root, review, status_counts,
    EngineError, IdSynthesizer, Mutation, PendingEntry, PublicNode, StatusCounts,
};
use nav_model::{Decision, Forest, Node, NodeId, NodePath, NodeRecord};
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Host application state around one forest
#[derive(Debug)]
pub struct NavigationHost<S: ForestStore> {
    store: Arc<S>,
    config: HostConfig,
    synthesizer: IdSynthesizer,
    forest: RwLock<Latest<Forest>>,
    clock: RequestClock,
    busy: DashSet<NodeId>,
    events: EventBus,
}

/// Edit lock on one root, released on drop
struct RootLock<'a> {
    busy: &'a DashSet<NodeId>,
    id: NodeId,
}

impl Drop for RootLock<'_> {
    fn drop(&mut self) {
        self.busy.remove(&self.id);
    }
}

impl<S: ForestStore> NavigationHost<S> {
    /// Create host with an empty forest; call [`refresh`](Self::refresh) to load
    #[must_use]
    pub fn new(store: Arc<S>, config: HostConfig) -> Self {
        Self {
            synthesizer: IdSynthesizer::new(&config.engine),
            events: EventBus::new(config.event_capacity),
            store,
            config,
            forest: RwLock::new(Latest::new(Forest::new())),
            clock: RequestClock::new(),
            busy: DashSet::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Current forest (cheap, shared)
    #[must_use]
    pub fn snapshot(&self) -> Forest {
        self.forest.read().get().clone()
    }

    /// Stamp of the request that produced the current forest
    #[must_use]
    pub fn applied_stamp(&self) -> RequestStamp {
        self.forest.read().stamp()
    }

    /// Subscribe to forest changes
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ForestChanged> {
        self.events.subscribe()
    }

    /// Public navigation tree of the current forest
    #[must_use]
    pub fn public_tree(&self) -> Vec<PublicNode> {
        public_tree(&self.snapshot(), &self.config.engine)
    }

    /// Moderation queue of the current forest
    #[must_use]
    pub fn pending_queue(&self) -> Vec<PendingEntry> {
        pending_queue(&self.snapshot(), &self.config.engine)
    }

    /// Dashboard counters of the current forest
    #[must_use]
    pub fn status_counts(&self) -> StatusCounts {
        status_counts(&self.snapshot())
    }

    /// Whether node `id` may be edited now
    ///
    /// False while its root is being saved, and for ids not in the forest.
    #[must_use]
    pub fn is_editable(&self, id: &NodeId) -> bool {
        find_path(&self.snapshot(), id).is_ok_and(|path| !self.busy.contains(path.first().id()))
    }

    /// Fetch the forest from the store and install it
    ///
    /// A response is dropped if a newer request has already been installed.
    ///
    /// # Errors
    /// Returns [`HostError::Fetch`] if the store fails
    pub async fn refresh(&self) -> Result<Forest, HostError> {
        let stamp = self.clock.issue();
        let records = self.store.fetch_forest().await.map_err(HostError::Fetch)?;
        let forest = self.synthesizer.decorate_forest(&records);
        let nodes = forest.node_count();

        if self.install(stamp, forest, ChangeCause::Refreshed) {
            tracing::info!(%stamp, nodes, "forest refreshed");
        } else {
            tracing::warn!(%stamp, applied = %self.applied_stamp(), "dropping stale forest response");
        }
        Ok(self.snapshot())
    }

    /// Apply `mutation` at `target` and persist the containing root
    ///
    /// # Errors
    /// - [`HostError::Engine`] if the target is missing or the edit invalid
    /// - [`HostError::RootBusy`] if the root is already being saved
    /// - [`HostError::PersistenceRejected`] if the store refuses
    pub async fn mutate(&self, target: &NodeId, mutation: Mutation) -> Result<Forest, HostError> {
        let operation = mutation.name();
        let cause = ChangeCause::Mutated {
            target: target.clone(),
            operation,
        };
        self.commit(target, cause, |forest, path| apply_at(forest, path, mutation))
            .await
    }

    /// Approve or reject node `target` and persist its root
    ///
    /// Repeating a decision already in effect does not touch the store.
    ///
    /// # Errors
    /// Same as [`mutate`](Self::mutate)
    pub async fn review(&self, target: &NodeId, decision: Decision) -> Result<Forest, HostError> {
        let cause = ChangeCause::Reviewed {
            target: target.clone(),
            decision,
        };
        self.commit(target, cause, |forest, _| review(forest, target, decision))
            .await
    }

    /// Add a new item under `parent`
    ///
    /// The item receives a synthesized id until the store answers.
    ///
    /// # Errors
    /// Same as [`mutate`](Self::mutate)
    pub async fn insert_child(&self, parent: &NodeId, item: &NodeRecord) -> Result<Forest, HostError> {
        let forest = self.snapshot();
        let path = find_path(&forest, parent)?;
        let child = self.synthesizer.decorate_child(item, &path.target().node);
        self.mutate(parent, Mutation::InsertChild(child)).await
    }

    /// Overwrite the content of node `target`
    ///
    /// Title, path, redirect and order come from `content`; id, status and
    /// children are kept.
    ///
    /// # Errors
    /// Same as [`mutate`](Self::mutate)
    pub async fn edit(&self, target: &NodeId, content: &NodeRecord) -> Result<Forest, HostError> {
        let forest = self.snapshot();
        let path = find_path(&forest, target)?;
        let current = &path.target().node;
        let edited = Node {
            title: content.title.clone(),
            path: content.path.clone(),
            redirect: content.redirect.clone(),
            order: content.order,
            ..Node::clone(current)
        };
        self.mutate(target, Mutation::Replace(edited)).await
    }

    /// Remove nested item `target`
    ///
    /// # Errors
    /// Same as [`mutate`](Self::mutate); roots go through
    /// [`delete_root`](Self::delete_root)
    pub async fn remove(&self, target: &NodeId) -> Result<Forest, HostError> {
        self.mutate(target, Mutation::Remove).await
    }

    /// Store a new root menu
    ///
    /// If the stored copy clashes with ids that arrived in memory during the
    /// save, the whole forest is refetched instead.
    ///
    /// # Errors
    /// - [`HostError::Engine`] if the record's ids collide with the forest
    /// - [`HostError::PersistenceRejected`] if the store refuses
    /// - [`HostError::Fetch`] if the refetch after a clash fails
    pub async fn create_root(&self, record: NodeRecord) -> Result<Forest, HostError> {
        let record = NodeRecord { menu: true, ..record };
        let before = self.snapshot();
        let node = self.synthesizer.decorate_root(&record, before.root_count());
        let local_id = node.id.clone();
        let _ = insert_root(&before, node)?;
        let _lock = self.lock_root(&local_id)?;

        let stored = self.store.create_root(record.clone()).await.map_err(|source| {
            tracing::warn!(root = %local_id, error = %source, "create root rejected");
            HostError::PersistenceRejected {
                root: local_id.clone(),
                attempted: Box::new(record),
                source,
            }
        })?;

        let root = self.synthesizer.decorate_root(&stored, self.snapshot().root_count());
        let root_id = root.id.clone();
        let installed = self.install_with(ChangeCause::RootCreated(root_id.clone()), |current| {
            // A refresh that landed during the save may already carry the new root.
            match current.replace_root(&root_id, Arc::new(root.clone())) {
                Some(next) => Ok(next),
                None => insert_root(current, root),
            }
        });
        match installed {
            Ok(forest) => {
                tracing::info!(root = %root_id, "root created");
                Ok(forest)
            }
            Err(e) => {
                tracing::warn!(root = %root_id, error = %e, "stored root clashes with the forest in memory, refetching");
                self.refresh().await
            }
        }
    }

    /// Delete root menu `id` and its whole subtree
    ///
    /// # Errors
    /// - [`HostError::Engine`] if `id` is missing or not a root
    /// - [`HostError::RootBusy`] if the root is being saved
    /// - [`HostError::PersistenceRejected`] if the store refuses
    pub async fn delete_root(&self, id: &NodeId) -> Result<Forest, HostError> {
        let before = self.snapshot();
        let _ = remove_root(&before, id)?;
        let _lock = self.lock_root(id)?;

        if let Some(key) = id.store_key() {
            if let Err(source) = self.store.delete_root(key).await {
                tracing::warn!(root = %id, error = %source, "delete root rejected");
                let attempted = before.root(id).map(|r| r.to_record()).unwrap_or_default();
                return Err(HostError::PersistenceRejected {
                    root: id.clone(),
                    attempted: Box::new(attempted),
                    source,
                });
            }
        }

        let forest = self.install_with(ChangeCause::RootDeleted(id.clone()), |current| {
            Ok(current.remove_root(id).unwrap_or_else(|| current.clone()))
        })?;
        tracing::info!(root = %id, "root deleted");
        Ok(forest)
    }

    /// Shared pipeline for nested changes
    async fn commit<F>(&self, target: &NodeId, cause: ChangeCause, change: F) -> Result<Forest, HostError>
    where
        F: FnOnce(&Forest, &NodePath) -> Result<Forest, EngineError>,
    {
        let before = self.snapshot();
        let path = find_path(&before, target)?;
        let root_index = path.first().index;
        let root_id = path.first().id().clone();

        let _lock = self.lock_root(&root_id)?;
        let after = change(&before, &path)?;

        let Some(changed_root) = after.roots().get(root_index).cloned() else {
            return Err(EngineError::TargetNotFound(root_id).into());
        };
        if Arc::ptr_eq(&changed_root, &path.first().node) {
            tracing::debug!(%target, "change is a no-op, nothing to persist");
            return Ok(before);
        }

        let stored = self.persist(&root_id, changed_root.to_record()).await?;
        self.reconcile(&root_id, &stored, cause)
    }

    async fn persist(&self, root_id: &NodeId, record: NodeRecord) -> Result<NodeRecord, HostError> {
        let result = match root_id.store_key() {
            Some(key) => self.store.persist_root(key, record.clone()).await,
            // Root was never saved: the store has nothing to replace yet.
            None => self.store.create_root(record.clone()).await,
        };
        result.map_err(|source: StoreError| {
            tracing::warn!(root = %root_id, error = %source, "persist rejected, keeping previous forest");
            HostError::PersistenceRejected {
                root: root_id.clone(),
                attempted: Box::new(record),
                source,
            }
        })
    }

    /// Swap the store's copy of a root into the current forest
    fn reconcile(&self, root_id: &NodeId, stored: &NodeRecord, cause: ChangeCause) -> Result<Forest, HostError> {
        let forest = self.install_with(cause, |current| {
            let index = current.root_position(root_id).unwrap_or(current.root_count());
            let root = Arc::new(self.synthesizer.decorate_root(stored, index));
            Ok(current.replace_root(root_id, root.clone()).unwrap_or_else(|| {
                tracing::warn!(root = %root_id, "root vanished during save, appending store copy");
                let mut roots = current.roots().clone();
                roots.push_back(root);
                Forest::from_roots(roots)
            }))
        })?;
        tracing::info!(root = %root_id, stamp = %self.applied_stamp(), "root persisted");
        Ok(forest)
    }

    /// Install a fetched `forest` if `stamp` is newer than the current one;
    /// broadcast on success
    fn install(&self, stamp: RequestStamp, forest: Forest, cause: ChangeCause) -> bool {
        let mut guard = self.forest.write();
        let installed = guard.offer(stamp, forest.clone());
        if installed {
            self.events.publish(forest, cause, stamp);
        }
        installed
    }

    /// Install the result of an accepted write, built from the forest as it is
    /// now, and broadcast it
    ///
    /// Nothing is installed if `build` fails.
    fn install_with<F>(&self, cause: ChangeCause, build: F) -> Result<Forest, EngineError>
    where
        F: FnOnce(&Forest) -> Result<Forest, EngineError>,
    {
        let mut guard = self.forest.write();
        let next = build(guard.get())?;
        let stamp = guard.advance(&self.clock, next.clone());
        self.events.publish(next.clone(), cause, stamp);
        Ok(next)
    }

    fn lock_root(&self, id: &NodeId) -> Result<RootLock<'_>, HostError> {
        if !self.busy.insert(id.clone()) {
            tracing::debug!(root = %id, "root busy");
            return Err(HostError::RootBusy(id.clone()));
        }
        Ok(RootLock {
            busy: &self.busy,
            id: id.clone(),
        })
    }
}
