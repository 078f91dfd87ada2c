//! The mansion: a fixed binary tree of rooms
//!
//! Each room is owned by exactly one parent and the entry room is owned by the
//! graph. Rooms never change once the graph is built.

use super::Direction;
use crate::{ConstructionError, GameError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One row of a mansion layout table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSpec {
    pub name: String,
    #[serde(default)]
    pub clue: Option<String>,
    #[serde(default)]
    pub left: Option<String>,
    #[serde(default)]
    pub right: Option<String>,
}

impl RoomSpec {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            clue: None,
            left: None,
            right: None,
        }
    }

    pub fn clue(mut self, clue: &str) -> Self {
        self.clue = Some(clue.to_string());
        self
    }

    pub fn left(mut self, room: &str) -> Self {
        self.left = Some(room.to_string());
        self
    }

    pub fn right(mut self, room: &str) -> Self {
        self.right = Some(room.to_string());
        self
    }

    /// Clue text, with an empty string meaning "no clue"
    pub fn clue_text(&self) -> Option<&str> {
        self.clue.as_deref().filter(|c| !c.is_empty())
    }

    pub fn child(&self, direction: Direction) -> Option<&str> {
        let child = match direction {
            Direction::Left => &self.left,
            Direction::Right => &self.right,
        };
        child.as_deref().filter(|c| !c.is_empty())
    }
}

/// A room of the mansion
#[derive(Debug)]
pub struct Room {
    name: String,
    clue: Option<String>,
    left: Option<Box<Room>>,
    right: Option<Box<Room>>,
}

impl Room {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn clue(&self) -> Option<&str> {
        self.clue.as_deref()
    }

    /// The room reached by going `direction`, if there is one
    pub fn neighbor(&self, direction: Direction) -> Option<&Room> {
        match direction {
            Direction::Left => self.left.as_deref(),
            Direction::Right => self.right.as_deref(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// The room layout of a case
#[derive(Debug)]
pub struct MansionGraph {
    entry: Option<Box<Room>>,
    room_count: usize,
}

impl MansionGraph {
    /// Build the tree from a layout table rooted at `entry`.
    ///
    /// The table must describe a single tree: every child name defined, no
    /// room with two parents, no cycles, and every room reachable from the
    /// entry.
    pub fn build(entry: &str, layout: &[RoomSpec]) -> Result<Self, GameError> {
        let count = layout.len();

        let mut index: HashMap<&str, usize> = HashMap::new();
        index.try_reserve(count)?;
        for (position, spec) in layout.iter().enumerate() {
            if spec.name.trim().is_empty() {
                return Err(ConstructionError::EmptyRoomName { position }.into());
            }
            if index.insert(spec.name.as_str(), position).is_some() {
                return Err(ConstructionError::DuplicateRoom(spec.name.clone()).into());
            }
        }

        let entry_idx = *index
            .get(entry)
            .ok_or_else(|| ConstructionError::MissingEntry(entry.to_string()))?;

        let mut parents: Vec<Option<usize>> = Vec::new();
        parents.try_reserve_exact(count)?;
        parents.resize(count, None);
        let mut children: Vec<[Option<usize>; 2]> = Vec::new();
        children.try_reserve_exact(count)?;
        children.resize(count, [None, None]);

        for (idx, spec) in layout.iter().enumerate() {
            for (slot, direction) in Direction::ALL.into_iter().enumerate() {
                let Some(child_name) = spec.child(direction) else {
                    continue;
                };
                let child = *index.get(child_name).ok_or_else(|| ConstructionError::UndefinedChild {
                    room: spec.name.clone(),
                    child: child_name.to_string(),
                })?;
                if child == entry_idx {
                    return Err(ConstructionError::EntryAsChild {
                        entry: entry.to_string(),
                        parent: spec.name.clone(),
                    }
                    .into());
                }
                if let Some(first) = parents[child] {
                    return Err(ConstructionError::MultipleParents {
                        child: child_name.to_string(),
                        first: layout[first].name.clone(),
                        second: spec.name.clone(),
                    }
                    .into());
                }
                parents[child] = Some(idx);
                children[idx][slot] = Some(child);
            }
        }

        // With one parent per room and none for the entry, a walk from the
        // entry can never meet the same room twice.
        let mut preorder = Vec::new();
        preorder.try_reserve_exact(count)?;
        let mut reached = vec![false; count];
        let mut stack = vec![entry_idx];
        while let Some(idx) = stack.pop() {
            reached[idx] = true;
            preorder.push(idx);
            stack.extend(children[idx].iter().rev().flatten().copied());
        }

        if let Some(stray) = reached.iter().position(|r| !r) {
            return Err(classify_stray(stray, &parents, layout).into());
        }

        let mut built: Vec<Option<Box<Room>>> = Vec::new();
        built.try_reserve_exact(count)?;
        built.resize_with(count, || None);
        for &idx in preorder.iter().rev() {
            let spec = &layout[idx];
            let [left, right] = children[idx];
            let room = Room {
                name: spec.name.clone(),
                clue: spec.clue_text().map(str::to_string),
                left: left.and_then(|c| built[c].take()),
                right: right.and_then(|c| built[c].take()),
            };
            built[idx] = Some(Box::new(room));
        }

        tracing::info!(rooms = count, entry, "mansion built");

        Ok(Self {
            entry: built[entry_idx].take(),
            room_count: count,
        })
    }

    /// The entry room, or `None` once the graph has been torn down
    pub fn root(&self) -> Option<&Room> {
        self.entry.as_deref()
    }

    pub fn neighbor<'g>(&self, room: &'g Room, direction: Direction) -> Option<&'g Room> {
        room.neighbor(direction)
    }

    pub fn room_count(&self) -> usize {
        self.room_count
    }

    /// Find a room by exact name
    pub fn find(&self, name: &str) -> Option<&Room> {
        let mut stack: Vec<&Room> = self.entry.as_deref().into_iter().collect();
        while let Some(room) = stack.pop() {
            if room.name == name {
                return Some(room);
            }
            stack.extend(room.left.as_deref());
            stack.extend(room.right.as_deref());
        }
        None
    }

    /// Release every room, children before their parent, reporting each one
    /// to `visit` just before it is freed. Returns the number released.
    pub fn teardown_with(&mut self, visit: impl FnMut(&Room)) -> usize {
        let released = teardown_with(self.entry.take(), visit);
        self.room_count = 0;
        released
    }
}

impl Drop for MansionGraph {
    fn drop(&mut self) {
        let released = teardown(self.entry.take());
        tracing::trace!(released, "mansion torn down");
    }
}

/// Release a subtree of rooms. A `None` root releases nothing.
pub fn teardown(root: Option<Box<Room>>) -> usize {
    teardown_with(root, |_| {})
}

/// Post-order release of a subtree. Uses an explicit stack, never recursion.
pub fn teardown_with(root: Option<Box<Room>>, mut visit: impl FnMut(&Room)) -> usize {
    let mut pending: Vec<Box<Room>> = root.into_iter().collect();
    let mut detached = Vec::new();
    while let Some(mut room) = pending.pop() {
        let left = room.left.take();
        let right = room.right.take();
        detached.push(room);
        pending.extend(left);
        pending.extend(right);
    }

    let mut released = 0;
    while let Some(room) = detached.pop() {
        visit(&room);
        drop(room);
        released += 1;
    }
    released
}

/// Explain why a room was never reached from the entry: either it hangs off
/// an orphaned subtree, or following its parents loops back on itself.
fn classify_stray(stray: usize, parents: &[Option<usize>], layout: &[RoomSpec]) -> ConstructionError {
    let mut current = stray;
    for _ in 0..=parents.len() {
        match parents[current] {
            Some(parent) => current = parent,
            None => return ConstructionError::Unreachable(layout[stray].name.clone()),
        }
    }
    ConstructionError::Cycle(layout[current].name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_layout() -> Vec<RoomSpec> {
        vec![
            RoomSpec::new("Hall").clue("mud").left("Lounge").right("Kitchen"),
            RoomSpec::new("Lounge").clue("glove").left("Garden").right("Library"),
            RoomSpec::new("Kitchen").clue("glass").right("Study"),
            RoomSpec::new("Garden").clue("footprint"),
            RoomSpec::new("Library").clue("book"),
            RoomSpec::new("Study").clue("papers"),
        ]
    }

    fn construction_error(result: Result<MansionGraph, GameError>) -> ConstructionError {
        match result {
            Err(GameError::Construction(e)) => e,
            other => panic!("expected a construction error, got {:?}", other),
        }
    }

    #[test]
    fn builds_reference_layout() {
        let graph = MansionGraph::build("Hall", &reference_layout()).unwrap();
        let root = graph.root().unwrap();
        assert_eq!(root.name(), "Hall");
        assert_eq!(root.clue(), Some("mud"));
        assert_eq!(graph.room_count(), 6);

        let lounge = graph.neighbor(root, Direction::Left).unwrap();
        assert_eq!(lounge.name(), "Lounge");
        let kitchen = root.neighbor(Direction::Right).unwrap();
        assert!(kitchen.neighbor(Direction::Left).is_none());
        assert_eq!(kitchen.neighbor(Direction::Right).unwrap().name(), "Study");
        assert!(graph.find("Library").unwrap().is_leaf());
        assert!(graph.find("Attic").is_none());
    }

    #[test]
    fn empty_clue_means_no_clue() {
        let layout = vec![RoomSpec::new("A").clue("").left("")];
        let graph = MansionGraph::build("A", &layout).unwrap();
        let root = graph.root().unwrap();
        assert_eq!(root.clue(), None);
        assert!(root.is_leaf());
    }

    #[test]
    fn rejects_undefined_child() {
        let layout = vec![RoomSpec::new("A").left("Ghost")];
        assert_eq!(
            construction_error(MansionGraph::build("A", &layout)),
            ConstructionError::UndefinedChild {
                room: "A".to_string(),
                child: "Ghost".to_string()
            }
        );
    }

    #[test]
    fn rejects_room_with_two_parents() {
        let layout = vec![
            RoomSpec::new("A").left("B").right("C"),
            RoomSpec::new("B").left("D"),
            RoomSpec::new("C").right("D"),
            RoomSpec::new("D"),
        ];
        assert!(matches!(
            construction_error(MansionGraph::build("A", &layout)),
            ConstructionError::MultipleParents { child, .. } if child == "D"
        ));
    }

    #[test]
    fn rejects_cycles() {
        let back_to_entry = vec![RoomSpec::new("A").left("B"), RoomSpec::new("B").right("A")];
        assert!(matches!(
            construction_error(MansionGraph::build("A", &back_to_entry)),
            ConstructionError::EntryAsChild { .. }
        ));

        let detached_loop = vec![
            RoomSpec::new("A"),
            RoomSpec::new("B").left("C"),
            RoomSpec::new("C").left("B"),
        ];
        assert!(matches!(
            construction_error(MansionGraph::build("A", &detached_loop)),
            ConstructionError::Cycle(_)
        ));

        let self_loop = vec![RoomSpec::new("A"), RoomSpec::new("B").left("B")];
        assert_eq!(
            construction_error(MansionGraph::build("A", &self_loop)),
            ConstructionError::Cycle("B".to_string())
        );
    }

    #[test]
    fn rejects_unreachable_and_duplicate_rooms() {
        let orphan = vec![RoomSpec::new("A"), RoomSpec::new("B").left("C"), RoomSpec::new("C")];
        assert!(matches!(
            construction_error(MansionGraph::build("A", &orphan)),
            ConstructionError::Unreachable(_)
        ));

        let twice = vec![RoomSpec::new("A"), RoomSpec::new("A")];
        assert_eq!(
            construction_error(MansionGraph::build("A", &twice)),
            ConstructionError::DuplicateRoom("A".to_string())
        );

        assert_eq!(
            construction_error(MansionGraph::build("Nowhere", &reference_layout())),
            ConstructionError::MissingEntry("Nowhere".to_string())
        );
    }

    #[test]
    fn teardown_releases_every_room_children_first() {
        let mut graph = MansionGraph::build("Hall", &reference_layout()).unwrap();
        let mut released = Vec::new();
        let count = graph.teardown_with(|room| released.push(room.name().to_string()));

        assert_eq!(count, 6);
        assert_eq!(released, ["Garden", "Library", "Lounge", "Study", "Kitchen", "Hall"]);
        assert!(graph.root().is_none());
        assert_eq!(graph.teardown_with(|_| panic!("already released")), 0);
    }

    #[test]
    fn teardown_of_nothing_is_a_no_op() {
        assert_eq!(teardown(None), 0);
    }

    #[test]
    fn deep_corridor_builds_and_drops_without_recursion() {
        let depth = 50_000;
        let layout: Vec<RoomSpec> = (0..depth)
            .map(|i| {
                let spec = RoomSpec::new(&format!("R{}", i));
                if i + 1 < depth {
                    spec.left(&format!("R{}", i + 1))
                } else {
                    spec
                }
            })
            .collect();
        let graph = MansionGraph::build("R0", &layout).unwrap();
        assert_eq!(graph.room_count(), depth);
        drop(graph);
    }
}
