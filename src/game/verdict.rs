//! The accusation: counting the evidence against a suspect
//!
//! Matching is exact. Suspect names and clue texts are compared byte for byte,
//! with no case folding and no trimming.

use crate::data::{ClueTree, HashIndex, DEFAULT_GUILTY_THRESHOLD};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Guilty,
    InsufficientEvidence,
}

impl Verdict {
    /// Guilty once `count` reaches `threshold`
    pub fn render(count: usize, threshold: usize) -> Self {
        if count >= threshold {
            Verdict::Guilty
        } else {
            Verdict::InsufficientEvidence
        }
    }

    pub fn headline(&self, accused: &str) -> String {
        match self {
            Verdict::Guilty => format!("The evidence confirms it! {} is the culprit.", accused),
            Verdict::InsufficientEvidence => format!(
                "The clues are insufficient. {} is innocent (or far too clever).",
                accused
            ),
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Guilty => write!(f, "guilty"),
            Verdict::InsufficientEvidence => write!(f, "insufficient evidence"),
        }
    }
}

/// Verdict under the standard two-clue rule
pub fn render_verdict(count: usize) -> Verdict {
    Verdict::render(count, DEFAULT_GUILTY_THRESHOLD)
}

/// Number of collected clues whose suspect is exactly `accused`. Clues the
/// index does not know implicate nobody.
pub fn tally(clues: &ClueTree, suspects: &HashIndex, accused: &str) -> usize {
    clues
        .iter()
        .filter(|clue| suspects.lookup(clue) == Some(accused))
        .count()
}
