//! Per-player grid bookkeeping.
//!
//! A [`PlayerGrid`] owns one participant's ship layout and the flat
//! record of every cell fired upon against it. The match state machine
//! drives it exclusively through [`PlayerGrid::shoot`],
//! [`PlayerGrid::ships_remaining`], and [`PlayerGrid::sunk_ships`] —
//! it never touches ship geometry directly.

mod player;

pub use player::{CellShot, PlayerGrid};
