//! Timestamped remote reads

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::ops::Deref;

/// A value read from the chain together with the time it was fetched.
///
/// On-chain state can change between the read and its use, so callers that
/// feed a snapshot into transaction parameters re-read it first.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<T> {
    pub value: T,
    pub fetched_at: DateTime<Utc>,
}

impl<T> Snapshot<T> {
    pub fn now(value: T) -> Self {
        Self {
            value,
            fetched_at: Utc::now(),
        }
    }

    pub fn age(&self) -> chrono::Duration {
        Utc::now().signed_duration_since(self.fetched_at)
    }
}

impl<T> Deref for Snapshot<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}
