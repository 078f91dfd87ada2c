//! Detective Quest: a mansion mystery
//!
//! A text adventure where you walk the rooms of a mansion, pick up the clues
//! left behind, and finally accuse a suspect. The accusation sticks only if
//! enough of the clues you collected point at that person.
//!
//! # Game Mechanics
//!
//! - **Exploration**: The mansion is a binary tree of rooms; from each room you
//!   may go left, go right, or leave
//! - **Evidence**: Every clue found is filed in a sorted evidence tree
//! - **Accusation**: Each collected clue is looked up in the case's
//!   clue → suspect index and counted against the accused
//!
//! # Architecture
//!
//! - `data` - The mansion layout, the evidence tree, the suspect index and case files
//! - `game` - Exploration state machine, verdict engine and the session driver
//! - `tui` - Terminal user interface with ratatui

pub mod data;
pub mod game;
pub mod tui;

pub use data::*;
pub use game::{Collaborator, Outcome, Session};

/// Game version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type for the game
pub type Result<T> = anyhow::Result<T>;

/// Custom error types
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Malformed case data: {0}")]
    Construction(#[from] ConstructionError),

    #[error("Out of memory while building the case: {0}")]
    Allocation(#[from] std::collections::TryReserveError),

    #[error("Case file could not be parsed: {0}")]
    CaseFile(#[from] serde_json::Error),

    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),
}

/// Reasons a case layout or suspect list is rejected before play starts
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    #[error("room #{position} has an empty name")]
    EmptyRoomName { position: usize },

    #[error("room '{0}' is defined more than once")]
    DuplicateRoom(String),

    #[error("entry room '{0}' is not defined")]
    MissingEntry(String),

    #[error("room '{room}' leads to undefined room '{child}'")]
    UndefinedChild { room: String, child: String },

    #[error("room '{child}' is reachable from both '{first}' and '{second}'")]
    MultipleParents {
        child: String,
        first: String,
        second: String,
    },

    #[error("entry room '{entry}' is listed as a child of '{parent}'")]
    EntryAsChild { entry: String, parent: String },

    #[error("room '{0}' is part of a cycle")]
    Cycle(String),

    #[error("room '{0}' cannot be reached from the entry")]
    Unreachable(String),

    #[error("the mansion has no rooms left to explore")]
    EmptyMansion,

    #[error("association #{position} has an empty clue")]
    EmptyAssociationClue { position: usize },

    #[error("association for clue '{0}' has an empty suspect")]
    EmptySuspect(String),

    #[error("a suspect index needs at least one bucket")]
    ZeroBuckets,

    #[error("the guilty threshold must be at least 1")]
    ZeroThreshold,
}
