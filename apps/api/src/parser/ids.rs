#![allow(dead_code)]

//! Record-identifier generation, injected so tests get deterministic IDs.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

/// Produces opaque record identifiers. The only contract is uniqueness
/// within a single parse; IDs are list-item identity for client-side
/// editing, never foreign keys.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Default generator backed by random UUIDs.
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic generator for tests: `entry-1`, `entry-2`, …
#[derive(Default)]
pub struct SequentialIds {
    counter: AtomicU64,
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("entry-{n}")
    }
}
