//! Durable-store boundary and persistence synchronization.
//!
//! The match core treats durable storage as an external collaborator:
//! the [`MatchStore`] trait is the whole contract, and everything that
//! writes through it is best-effort mirroring — in-memory match state
//! is authoritative for gameplay, store failures are logged and never
//! surfaced back to a player action.
//!
//! # Key pieces
//!
//! - [`MatchStore`] — the document-store operations the core depends on
//! - [`MemoryStore`] — in-memory implementation for tests/development
//! - [`RecorderHandle`] — per-match ordered append queue (one task per
//!   match drains jobs strictly in enqueue order)
//! - [`ledger`] — the bootstrap / shot / completion write sequences,
//!   including the idempotence and repeat-opponent guards

mod error;
pub mod ledger;
mod memory;
mod records;
mod recorder;
mod store;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use records::{AccountRecord, LogEntry, MatchRecord, PlayerRef, ShotEntry};
pub use recorder::{CompletionOutcome, RecorderHandle, spawn_recorder};
pub use store::MatchStore;

/// Wall-clock milliseconds since the unix epoch.
///
/// Durable timestamps (start/end times, last win date) all use this
/// representation.
pub fn unix_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
