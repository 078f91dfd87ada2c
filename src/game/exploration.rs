//! Exploration: walking the mansion and picking up clues
//!
//! The explorer is either standing in a room or has left the mansion. Every
//! room entered (the entry room included) has its clue filed in the evidence
//! tree and reported.

use super::{Command, Event, NavigationError};
use crate::data::{ClueTree, Direction, MansionGraph, Room, Rules};
use crate::ConstructionError;

#[derive(Debug, Clone, Copy)]
pub enum ExplorationState<'g> {
    AtRoom(&'g Room),
    Exited,
}

/// Drives one player through a [`MansionGraph`]
#[derive(Debug)]
pub struct Explorer<'g> {
    state: ExplorationState<'g>,
    clues: ClueTree,
    rules: Rules,
    visits: usize,
}

impl<'g> Explorer<'g> {
    /// Step into the entry room. Returns the explorer along with what
    /// happened on arrival.
    pub fn enter(mansion: &'g MansionGraph, rules: Rules) -> Result<(Self, Vec<Event>), ConstructionError> {
        let entry = mansion.root().ok_or(ConstructionError::EmptyMansion)?;
        let mut explorer = Self {
            state: ExplorationState::Exited,
            clues: ClueTree::new(),
            rules,
            visits: 0,
        };
        let events = explorer.arrive(entry);
        Ok((explorer, events))
    }

    /// Apply one command. Commands after leaving are ignored.
    pub fn step(&mut self, command: Command) -> Vec<Event> {
        let ExplorationState::AtRoom(current) = self.state else {
            return Vec::new();
        };

        match command {
            Command::Go(direction) => match current.neighbor(direction) {
                Some(next) => self.arrive(next),
                None => {
                    tracing::debug!(room = current.name(), %direction, "no room that way");
                    vec![Event::Navigation(NavigationError::NoRoomThatWay(direction))]
                }
            },
            Command::Exit => {
                self.state = ExplorationState::Exited;
                vec![Event::ExplorationEnded]
            }
            Command::Invalid(token) => {
                tracing::debug!(token = %token, "invalid command");
                vec![Event::Navigation(NavigationError::InvalidCommand(token))]
            }
        }
    }

    fn arrive(&mut self, room: &'g Room) -> Vec<Event> {
        self.state = ExplorationState::AtRoom(room);
        self.visits += 1;

        let exits = Direction::ALL
            .into_iter()
            .filter_map(|d| room.neighbor(d).map(|n| (d, n.name().to_string())))
            .collect();
        let mut events = vec![Event::RoomEntered {
            room: room.name().to_string(),
            exits,
        }];

        if let Some(clue) = room.clue() {
            let new = self.clues.insert(clue);
            tracing::debug!(room = room.name(), clue, new, "clue collected");
            events.push(Event::ClueFound {
                clue: clue.to_string(),
                new,
            });
        }

        if self.rules.leaf_stop && room.is_leaf() {
            self.state = ExplorationState::Exited;
            events.push(Event::ExplorationComplete {
                room: room.name().to_string(),
            });
        }

        events
    }

    pub fn state(&self) -> ExplorationState<'g> {
        self.state
    }

    /// The room the player is standing in, if still inside
    pub fn current(&self) -> Option<&'g Room> {
        match self.state {
            ExplorationState::AtRoom(room) => Some(room),
            ExplorationState::Exited => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, ExplorationState::Exited)
    }

    pub fn clues(&self) -> &ClueTree {
        &self.clues
    }

    pub fn into_clues(self) -> ClueTree {
        self.clues
    }

    /// Rooms entered so far, the entry room included
    pub fn visited(&self) -> usize {
        self.visits
    }
}
