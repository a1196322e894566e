//! Approval status carried by every node

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Moderation state of a single node
///
/// Stored per node and never inherited: an approved child of a pending
/// parent is still `Approved` in its own right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Newly authored, awaiting review
    #[default]
    Created,
    /// Cleared for public display
    Approved,
    /// Hidden from public display; reversible by approval
    Rejected,
}

impl Status {
    /// All states, in declaration order
    pub const ALL: [Status; 3] = [Status::Created, Status::Approved, Status::Rejected];

    /// Awaiting review
    #[inline]
    #[must_use]
    pub fn is_pending(self) -> bool {
        self == Status::Created
    }

    /// Eligible for public display (subject to ancestors)
    #[inline]
    #[must_use]
    pub fn is_approved(self) -> bool {
        self == Status::Approved
    }

    /// Lowercase wire name
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Created => "created",
            Status::Approved => "approved",
            Status::Rejected => "rejected",
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reviewer verdict applied to one node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    /// Status a node ends up in after this decision
    #[inline]
    #[must_use]
    pub fn target_status(self) -> Status {
        match self {
            Decision::Approve => Status::Approved,
            Decision::Reject => Status::Rejected,
        }
    }
}

impl Display for Decision {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Approve => f.write_str("approve"),
            Decision::Reject => f.write_str("reject"),
        }
    }
}
