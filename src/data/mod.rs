//! Data structures for the game world
//!
//! The mansion layout, the evidence tree the player fills while exploring,
//! the clue → suspect index, and the case files they are built from.

pub mod case;
pub mod clues;
pub mod mansion;
pub mod suspects;

pub use case::*;
pub use clues::*;
pub use mansion::*;
pub use suspects::*;

use serde::{Deserialize, Serialize};

/// A way out of a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Left, Direction::Right];

    pub fn symbol(&self) -> &'static str {
        match self {
            Direction::Left => "←",
            Direction::Right => "→",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}
