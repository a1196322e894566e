//! Approval state machine
//!
//! Transitions are per node and never cascade. Reviewers may flip between
//! `Approved` and `Rejected` as often as they like; nothing goes back to
//! `Created` through review.

use crate::error::EngineError;
use crate::mutate::{apply_at, Mutation};
use crate::resolve::find_path;
use nav_model::{Decision, Forest, Node, NodeId, Status};

/// Statuses reachable from `from` through review
#[must_use]
pub fn allowed_transitions(from: Status) -> &'static [Status] {
    use Status::{Approved, Created, Rejected};
    match from {
        Created => &[Approved, Rejected],
        Approved => &[Rejected, Approved],
        Rejected => &[Approved, Rejected],
    }
}

/// Validates a status transition for node `id`
///
/// # Errors
/// Returns [`EngineError::IllegalTransition`] if `to` is not reachable
pub fn validate_transition(id: &NodeId, from: Status, to: Status) -> Result<(), EngineError> {
    if allowed_transitions(from).contains(&to) {
        Ok(())
    } else {
        Err(EngineError::IllegalTransition {
            id: id.clone(),
            from,
            to,
        })
    }
}

/// Set the status of one node, leaving its children's statuses alone
///
/// Returns a clone of `forest` (sharing everything) when the node already
/// has the requested status.
///
/// # Errors
/// - [`EngineError::TargetNotFound`] if `id` is not in `forest`
/// - [`EngineError::IllegalTransition`] if the change is not allowed
pub fn set_status(forest: &Forest, id: &NodeId, to: Status) -> Result<Forest, EngineError> {
    let path = find_path(forest, id)?;
    let current = &path.target().node;

    validate_transition(id, current.status, to)?;
    if current.status == to {
        tracing::trace!(%id, status = %to, "status unchanged");
        return Ok(forest.clone());
    }

    tracing::debug!(%id, from = %current.status, to = %to, "status transition");
    let updated = Node {
        status: to,
        ..Node::clone(current)
    };
    apply_at(forest, &path, Mutation::Replace(updated))
}

/// Apply a reviewer's decision to node `id`
///
/// # Errors
/// Same as [`set_status`]
#[inline]
pub fn review(forest: &Forest, id: &NodeId, decision: Decision) -> Result<Forest, EngineError> {
    set_status(forest, id, decision.target_status())
}
