//! The authoritative match core.
//!
//! Each live match runs as an isolated tokio task (actor model) owning
//! its state machine, with commands arriving over an mpsc channel — at
//! most one action is in flight per match, and matches proceed fully in
//! parallel with each other. Durable mirroring happens on a per-match
//! recorder queue and is never awaited on the gameplay path.
//!
//! # Key types
//!
//! - [`BattleshipMatch`] — the synchronous, in-memory state machine
//! - [`MatchHandle`] — send commands to a running match actor
//! - [`MatchRegistry`] — creates matches, resolves identities, owns handles
//! - [`IdentityResolver`] — the session → account seam the caller implements

mod actor;
mod error;
mod identity;
mod registry;
mod state;

pub use actor::{MatchHandle, MatchInfo};
pub use error::MatchError;
pub use identity::IdentityResolver;
pub use registry::MatchRegistry;
pub use state::{BattleshipMatch, GameStateView, GridView, ShotReport};
