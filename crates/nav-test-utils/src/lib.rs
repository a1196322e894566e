//! Testing utilities for the navtree workspace
//!
//! Record builders, the canonical sample forest and an in-memory
//! [`ForestStore`] with failure injection.

#![allow(missing_docs)]

use async_trait::async_trait;
use nav_engine::{EngineConfig, IdSynthesizer};
use nav_host::{ForestStore, StoreError};
use nav_model::{Forest, LocalizedText, NodeRecord, Status};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub fn record(id: &str, title: &str, status: Status, order: i64) -> NodeRecord {
    NodeRecord {
        id: Some(id.to_owned()),
        title: LocalizedText::single("en", title),
        status,
        order,
        ..NodeRecord::default()
    }
}

/// Record the store has never seen
pub fn draft(title: &str, order: i64) -> NodeRecord {
    NodeRecord {
        title: LocalizedText::single("en", title),
        order,
        ..NodeRecord::default()
    }
}

pub fn menu(id: &str, title: &str, status: Status, items: Vec<NodeRecord>) -> NodeRecord {
    NodeRecord {
        menu: true,
        items,
        ..record(id, title, status, 1)
    }
}

/// `r1` (approved) holding `c1` (created, order 1) and `c2` (approved, order 2)
pub fn sample_records() -> Vec<NodeRecord> {
    vec![menu(
        "r1",
        "r1",
        Status::Approved,
        vec![
            record("c1", "c1", Status::Created, 1),
            record("c2", "c2", Status::Approved, 2),
        ],
    )]
}

pub fn sample_forest() -> Forest {
    decorate(&sample_records())
}

pub fn decorate(records: &[NodeRecord]) -> Forest {
    IdSynthesizer::new(&EngineConfig::default()).decorate_forest(records)
}

/// Calls received by a [`MemoryStore`]
#[derive(Debug, Default)]
pub struct StoreCalls {
    pub fetch: AtomicUsize,
    pub persist: AtomicUsize,
    pub create: AtomicUsize,
    pub delete: AtomicUsize,
}

impl StoreCalls {
    pub fn fetches(&self) -> usize {
        self.fetch.load(Ordering::SeqCst)
    }

    /// Writes of any kind
    pub fn writes(&self) -> usize {
        self.persist.load(Ordering::SeqCst) + self.create.load(Ordering::SeqCst) + self.delete.load(Ordering::SeqCst)
    }
}

/// In-memory store
///
/// Behaves like the real backend: records without an id get a fresh `m{n}`
/// id on every write, and each write returns the stored copy.
#[derive(Debug, Default)]
pub struct MemoryStore {
    roots: Mutex<Vec<NodeRecord>>,
    failures: Mutex<VecDeque<StoreError>>,
    latency: Mutex<Option<Duration>>,
    next_id: AtomicUsize,
    pub calls: StoreCalls,
}

impl MemoryStore {
    pub fn new(roots: Vec<NodeRecord>) -> Self {
        Self {
            roots: Mutex::new(roots),
            ..Self::default()
        }
    }

    pub fn with_sample() -> Self {
        Self::new(sample_records())
    }

    /// Fail the next request with `error`; queued failures are used in order
    pub fn fail_next(&self, error: StoreError) {
        self.failures.lock().push_back(error);
    }

    /// Delay every request
    pub fn set_latency(&self, latency: Option<Duration>) {
        *self.latency.lock() = latency;
    }

    /// Replace stored content directly, as another editor would
    pub fn set_roots(&self, roots: Vec<NodeRecord>) {
        *self.roots.lock() = roots;
    }

    pub fn roots(&self) -> Vec<NodeRecord> {
        self.roots.lock().clone()
    }

    async fn enter(&self) -> Result<(), StoreError> {
        let latency = *self.latency.lock();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        match self.failures.lock().pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn assign_ids(&self, record: &mut NodeRecord) {
        if record.id.is_none() {
            let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
            record.id = Some(format!("m{n}"));
        }
        for item in &mut record.items {
            self.assign_ids(item);
        }
    }
}

#[async_trait]
impl ForestStore for MemoryStore {
    async fn fetch_forest(&self) -> Result<Vec<NodeRecord>, StoreError> {
        self.calls.fetch.fetch_add(1, Ordering::SeqCst);
        // Response content is fixed when the request is served, not when it lands.
        let roots = self.roots();
        self.enter().await?;
        Ok(roots)
    }

    async fn persist_root(&self, root_id: &str, mut root: NodeRecord) -> Result<NodeRecord, StoreError> {
        self.calls.persist.fetch_add(1, Ordering::SeqCst);
        self.enter().await?;
        self.assign_ids(&mut root);
        let mut roots = self.roots.lock();
        let slot = roots
            .iter_mut()
            .find(|r| r.id.as_deref() == Some(root_id))
            .ok_or_else(|| StoreError::NotFound(root_id.to_owned()))?;
        *slot = root.clone();
        Ok(root)
    }

    async fn create_root(&self, mut root: NodeRecord) -> Result<NodeRecord, StoreError> {
        self.calls.create.fetch_add(1, Ordering::SeqCst);
        self.enter().await?;
        self.assign_ids(&mut root);
        self.roots.lock().push(root.clone());
        Ok(root)
    }

    async fn delete_root(&self, root_id: &str) -> Result<(), StoreError> {
        self.calls.delete.fetch_add(1, Ordering::SeqCst);
        self.enter().await?;
        let mut roots = self.roots.lock();
        let before = roots.len();
        roots.retain(|r| r.id.as_deref() != Some(root_id));
        if roots.len() == before {
            return Err(StoreError::NotFound(root_id.to_owned()));
        }
        Ok(())
    }
}
