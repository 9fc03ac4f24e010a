//! Shared types for the Broadside match server.
//!
//! Everything that more than one crate needs to name lives here:
//! identity newtypes, the board configuration, ship placements, shot
//! outcomes, and the match status enumeration.

mod board;
mod ids;
mod ship;
mod status;

pub use board::{BoardConfig, Position};
pub use ids::{AccountId, GameKey, MatchId, SessionId};
pub use ship::ShipPlacement;
pub use status::{MatchStatus, ShotOutcome};
