//! Forest change notifications
//!
//! Render surfaces (navigation bar, dashboard counters, editors) subscribe to
//! the host's [`EventBus`] and re-derive their projections from the forest
//! carried by each [`ForestChanged`]. Events carry the whole forest, never a
//! diff.

use crate::gate::RequestStamp;
use chrono::{DateTime, Utc};
use nav_model::{Decision, Forest, NodeId};
use tokio::sync::broadcast;

/// What produced a new forest
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeCause {
    /// Fresh copy fetched from the store
    Refreshed,
    /// Nested edit persisted
    Mutated { target: NodeId, operation: &'static str },
    /// Review decision persisted
    Reviewed { target: NodeId, decision: Decision },
    /// New root menu stored
    RootCreated(NodeId),
    /// Root menu deleted
    RootDeleted(NodeId),
}

/// Broadcast after every successful change
#[derive(Debug, Clone)]
pub struct ForestChanged {
    pub forest: Forest,
    pub cause: ChangeCause,
    /// Request that produced this forest
    pub stamp: RequestStamp,
    pub at: DateTime<Utc>,
}

/// Fan-out of [`ForestChanged`] events
#[derive(Debug)]
pub struct EventBus {
    tx: broadcast::Sender<ForestChanged>,
}

impl EventBus {
    /// Create bus; slow subscribers lag after `capacity` events
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Publish to every current subscriber
    pub fn publish(&self, forest: Forest, cause: ChangeCause, stamp: RequestStamp) {
        let event = ForestChanged {
            forest,
            cause,
            stamp,
            at: Utc::now(),
        };
        if let Err(e) = self.tx.send(event) {
            tracing::debug!(cause = ?e.0.cause, "forest changed with no subscribers");
        }
    }

    /// New subscription, receives events published from now on
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ForestChanged> {
        self.tx.subscribe()
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}
