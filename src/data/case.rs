//! Case files: the mansion layout and the clue → suspect list as data
//!
//! A case is plain JSON so new mysteries need no code changes. The reference
//! mansion ships embedded in the binary.

use super::{HashIndex, MansionGraph, RoomSpec, DEFAULT_BUCKETS};
use crate::{ConstructionError, GameError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

const BUILTIN_CASE: &str = include_str!("../../cases/mansion.json");

/// Clues needed against a suspect for a guilty verdict in the reference case
pub const DEFAULT_GUILTY_THRESHOLD: usize = 2;

/// One clue → suspect association
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Association {
    pub clue: String,
    pub suspect: String,
}

impl Association {
    pub fn new(clue: &str, suspect: &str) -> Self {
        Self {
            clue: clue.to_string(),
            suspect: suspect.to_string(),
        }
    }
}

/// A complete mystery as loaded from disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseFile {
    #[serde(default = "default_title")]
    pub title: String,
    pub entry: String,
    #[serde(default = "default_buckets")]
    pub buckets: usize,
    #[serde(default = "default_guilty_threshold")]
    pub guilty_threshold: usize,
    pub rooms: Vec<RoomSpec>,
    #[serde(default)]
    pub associations: Vec<Association>,
}

fn default_title() -> String {
    "Untitled Case".to_string()
}

fn default_buckets() -> usize {
    DEFAULT_BUCKETS
}

fn default_guilty_threshold() -> usize {
    DEFAULT_GUILTY_THRESHOLD
}

/// How a session is judged and run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    /// Clues against the accused needed for a guilty verdict
    pub guilty_threshold: usize,
    /// End exploration automatically on reaching a room with no way onward
    pub leaf_stop: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            guilty_threshold: DEFAULT_GUILTY_THRESHOLD,
            leaf_stop: false,
        }
    }
}

/// Everything a session needs, built and validated from a [`CaseFile`]
#[derive(Debug)]
pub struct Case {
    pub title: String,
    pub mansion: MansionGraph,
    pub suspects: HashIndex,
    pub rules: Rules,
    /// Number of distinct clues hidden in the mansion
    pub clue_count: usize,
}

impl CaseFile {
    /// The reference mansion
    pub fn builtin() -> Result<Self, GameError> {
        Self::from_json(BUILTIN_CASE)
    }

    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let case: CaseFile = serde_json::from_str(json)?;
        tracing::debug!(title = %case.title, rooms = case.rooms.len(), "case parsed");
        Ok(case)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading case file");
        Self::from_json(&json)
    }

    /// Validate the case and build its mansion and suspect index
    pub fn build(&self) -> Result<Case, GameError> {
        if self.guilty_threshold == 0 {
            return Err(ConstructionError::ZeroThreshold.into());
        }

        let mansion = MansionGraph::build(&self.entry, &self.rooms)?;

        let mut suspects = HashIndex::with_buckets(self.buckets)?;
        let mut seen = HashSet::new();
        for (position, association) in self.associations.iter().enumerate() {
            if association.clue.is_empty() {
                return Err(ConstructionError::EmptyAssociationClue { position }.into());
            }
            if association.suspect.trim().is_empty() {
                return Err(ConstructionError::EmptySuspect(association.clue.clone()).into());
            }
            if !seen.insert(association.clue.as_str()) {
                tracing::warn!(clue = %association.clue, "clue associated more than once; the last suspect listed wins");
            }
            suspects.insert(&association.clue, &association.suspect);
        }

        let room_clues: HashSet<&str> = self.rooms.iter().filter_map(RoomSpec::clue_text).collect();
        for clue in &room_clues {
            if !seen.contains(clue) {
                tracing::warn!(clue, "clue implicates no suspect");
            }
        }
        for clue in seen.iter().filter(|c| !room_clues.contains(*c)) {
            tracing::warn!(clue, "associated clue is not found in any room");
        }

        tracing::info!(
            title = %self.title,
            rooms = mansion.room_count(),
            associations = suspects.len(),
            "case ready"
        );

        Ok(Case {
            title: self.title.clone(),
            mansion,
            suspects,
            rules: Rules {
                guilty_threshold: self.guilty_threshold,
                leaf_stop: false,
            },
            clue_count: room_clues.len(),
        })
    }

    /// Every distinct suspect named in the case, in first-mention order
    pub fn suspects(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.associations
            .iter()
            .map(|a| a.suspect.as_str())
            .filter(|s| seen.insert(*s))
            .collect()
    }
}
