//! Last-response-wins gating
//!
//! Every fetch is stamped when it is *issued*. Its response is only installed
//! if that stamp is newer than the one currently installed, so a slow early
//! fetch can never overwrite the result of a later one.
//!
//! Accepted writes are authoritative for the root they touched and are never
//! dropped. They are installed with [`Latest::advance`], which stamps them at
//! install time: any fetch issued before the write landed is older and will be
//! discarded, any fetch issued after it sees the write.

use std::fmt::{self, Display, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic request number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RequestStamp(u64);

impl RequestStamp {
    #[inline]
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl Display for RequestStamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Issues request stamps
#[derive(Debug, Default)]
pub struct RequestClock {
    next: AtomicU64,
}

impl RequestClock {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp for a request about to be sent
    #[inline]
    pub fn issue(&self) -> RequestStamp {
        RequestStamp(self.next.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

/// A value together with the stamp of the request that produced it
#[derive(Debug, Clone)]
pub struct Latest<T> {
    value: T,
    stamp: RequestStamp,
}

impl<T> Latest<T> {
    /// Initial value, older than any issued stamp
    #[inline]
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            value,
            stamp: RequestStamp::default(),
        }
    }

    #[inline]
    #[must_use]
    pub fn get(&self) -> &T {
        &self.value
    }

    #[inline]
    #[must_use]
    pub fn stamp(&self) -> RequestStamp {
        self.stamp
    }

    /// Install `value` if `stamp` is newer than the installed one
    ///
    /// Returns whether the value was installed.
    pub fn offer(&mut self, stamp: RequestStamp, value: T) -> bool {
        if stamp <= self.stamp {
            return false;
        }
        self.value = value;
        self.stamp = stamp;
        true
    }

    /// Install `value` unconditionally under a stamp issued now
    ///
    /// The caller must hold exclusive access across the call so no other
    /// stamp from `clock` is installed in between.
    pub fn advance(&mut self, clock: &RequestClock, value: T) -> RequestStamp {
        self.value = value;
        self.stamp = clock.issue().max(self.stamp);
        self.stamp
    }
}
