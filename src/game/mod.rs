//! Core game logic: commands, events and the session driver
//!
//! The game never touches a terminal itself. Whatever front end is in use
//! implements [`Collaborator`]: it hands over the player's commands and the
//! accused name, and is told about everything that happens.

pub mod console;
pub mod exploration;
pub mod verdict;

pub use exploration::{ExplorationState, Explorer};
pub use verdict::{render_verdict, tally, Verdict};

use crate::data::{Case, Direction};
use crate::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};

/// One step of player input during exploration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Go(Direction),
    Exit,
    Invalid(String),
}

impl Command {
    /// Parse a typed token. Case-insensitive; surrounding whitespace ignored.
    pub fn parse(token: &str) -> Self {
        match token.trim().to_lowercase().as_str() {
            "l" | "left" => Command::Go(Direction::Left),
            "r" | "right" => Command::Go(Direction::Right),
            "x" | "exit" | "q" | "quit" => Command::Exit,
            _ => Command::Invalid(token.trim().to_string()),
        }
    }
}

/// Recoverable exploration mistakes. The player is told and asked again.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigationError {
    #[error("There is no room to the {0}!")]
    NoRoomThatWay(Direction),

    #[error("Invalid option '{0}'.")]
    InvalidCommand(String),
}

/// Something the player should hear about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    RoomEntered {
        room: String,
        exits: Vec<(Direction, String)>,
    },
    ClueFound {
        clue: String,
        /// `false` when the clue was already in the evidence tree
        new: bool,
    },
    Navigation(NavigationError),
    /// Reached a room with no way onward while leaf-stop is on
    ExplorationComplete { room: String },
    /// The player chose to leave the mansion
    ExplorationEnded,
    CluesCollected(Vec<String>),
    VerdictRendered {
        accused: String,
        tally: usize,
        verdict: Verdict,
    },
}

impl Event {
    /// Tagged display lines, e.g. `[CLUE] ...`
    pub fn lines(&self) -> Vec<String> {
        match self {
            Event::RoomEntered { room, exits } => {
                let mut lines = vec![format!("[ROOM] You are in the {}.", room)];
                for (direction, name) in exits {
                    let key = match direction {
                        Direction::Left => 'l',
                        Direction::Right => 'r',
                    };
                    lines.push(format!("[PATH] ({}) {} {} {}", key, direction, direction.symbol(), name));
                }
                lines.push("[PATH] (x) leave the mansion".to_string());
                lines
            }
            Event::ClueFound { clue, new: true } => vec![format!("[CLUE] Clue found: \"{}\"", clue)],
            Event::ClueFound { clue, new: false } => vec![format!("[CLUE] Already noted: \"{}\"", clue)],
            Event::Navigation(e) => vec![format!("[WARN] {}", e)],
            Event::ExplorationComplete { room } => vec![format!(
                "[SYSTEM] The {} leads nowhere else. Exploration complete.",
                room
            )],
            Event::ExplorationEnded => vec!["[SYSTEM] You decide to end the exploration.".to_string()],
            Event::CluesCollected(clues) if clues.is_empty() => {
                vec!["[EVIDENCE] No clues were collected.".to_string()]
            }
            Event::CluesCollected(clues) => {
                let mut lines = vec!["[EVIDENCE] Clues collected:".to_string()];
                lines.extend(clues.iter().map(|c| format!("[EVIDENCE]  - {}", c)));
                lines
            }
            Event::VerdictRendered {
                accused,
                tally,
                verdict,
            } => vec![
                format!("[VERDICT] {} clue(s) point at {}.", tally, accused),
                format!("[VERDICT] {}", verdict.headline(accused)),
            ],
        }
    }
}

/// The game's window on the outside world
pub trait Collaborator {
    /// Block until the player picks a direction (or something unusable)
    fn request_command(&mut self) -> Result<Command>;

    /// Block until the player names a suspect
    fn request_accused_name(&mut self) -> Result<String>;

    /// Show an event. Must not block on the player.
    fn report(&mut self, event: &Event);
}

/// How a finished session turned out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub accused: String,
    pub tally: usize,
    pub verdict: Verdict,
    /// Collected clues in sorted order
    pub clues: Vec<String>,
}

/// One play-through of a case
#[derive(Debug)]
pub struct Session {
    case: Case,
}

impl Session {
    pub fn new(case: Case) -> Self {
        Self { case }
    }

    pub fn case(&self) -> &Case {
        &self.case
    }

    /// Explore until the player leaves, then take the accusation and judge it
    pub fn run<C: Collaborator>(&self, io: &mut C) -> Result<Outcome> {
        let (mut explorer, arrival) = Explorer::enter(&self.case.mansion, self.case.rules)
            .context("cannot start exploring")?;
        report_all(io, &arrival);

        while !explorer.is_finished() {
            let command = io.request_command().context("reading a command")?;
            let events = explorer.step(command);
            report_all(io, &events);
        }

        let evidence = explorer.into_clues();
        let clues: Vec<String> = evidence.iter().map(str::to_string).collect();
        io.report(&Event::CluesCollected(clues.clone()));

        let accused = io
            .request_accused_name()
            .context("reading the accused name")?
            .trim()
            .to_string();

        let count = tally(&evidence, &self.case.suspects, &accused);
        let verdict = Verdict::render(count, self.case.rules.guilty_threshold);
        tracing::info!(accused = %accused, tally = count, ?verdict, "verdict rendered");

        io.report(&Event::VerdictRendered {
            accused: accused.clone(),
            tally: count,
            verdict,
        });

        Ok(Outcome {
            accused,
            tally: count,
            verdict,
            clues,
        })
    }
}

fn report_all<C: Collaborator>(io: &mut C, events: &[Event]) {
    for event in events {
        io.report(event);
    }
}
