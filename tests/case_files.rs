//! Loading case files from disk and rejecting malformed ones.

use detective_quest::{CaseFile, ConstructionError, Direction, GameError};
use std::path::PathBuf;

fn builtin_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("cases/mansion.json")
}

fn construction_error(json: &str) -> ConstructionError {
    match CaseFile::from_json(json).unwrap().build() {
        Err(GameError::Construction(e)) => e,
        other => panic!("expected a construction error, got {:?}", other.map(|c| c.title)),
    }
}

#[test]
fn loads_the_shipped_case_from_disk() {
    let from_disk = CaseFile::load(builtin_path()).unwrap();
    assert_eq!(from_disk, CaseFile::builtin().unwrap());

    let case = from_disk.build().unwrap();
    let hall = case.mansion.root().unwrap();
    assert_eq!(hall.name(), "Entrance Hall");
    let lounge = hall.neighbor(Direction::Left).unwrap();
    assert_eq!(lounge.name(), "Living Room");
    assert_eq!(
        lounge.neighbor(Direction::Right).unwrap().clue(),
        Some("A book about poisons with torn pages.")
    );
}

#[test]
fn builtin_suspect_index_covers_every_room_clue() {
    let case = CaseFile::builtin().unwrap().build().unwrap();
    let file = CaseFile::builtin().unwrap();
    for room in &file.rooms {
        let clue = room.clue_text().unwrap();
        assert!(case.suspects.lookup(clue).is_some(), "no suspect for {:?}", clue);
    }
}

#[test]
fn missing_file_is_an_io_error() {
    let missing = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("cases/no-such-case.json");
    assert!(matches!(CaseFile::load(missing), Err(GameError::Io(_))));
}

#[test]
fn rejects_layouts_that_are_not_trees() {
    let undefined = r#"{ "entry": "A", "rooms": [ { "name": "A", "left": "B" } ] }"#;
    assert!(matches!(
        construction_error(undefined),
        ConstructionError::UndefinedChild { .. }
    ));

    let shared = r#"{ "entry": "A", "rooms": [
        { "name": "A", "left": "B", "right": "B" },
        { "name": "B" } ] }"#;
    assert!(matches!(
        construction_error(shared),
        ConstructionError::MultipleParents { .. }
    ));

    let looped = r#"{ "entry": "A", "rooms": [
        { "name": "A", "left": "B" },
        { "name": "B", "left": "A" } ] }"#;
    assert!(matches!(
        construction_error(looped),
        ConstructionError::EntryAsChild { .. }
    ));

    let missing_entry = r#"{ "entry": "Z", "rooms": [ { "name": "A" } ] }"#;
    assert_eq!(
        construction_error(missing_entry),
        ConstructionError::MissingEntry("Z".to_string())
    );
}

#[test]
fn duplicate_associations_are_accepted_and_newest_wins() {
    let json = r#"{ "entry": "A",
        "rooms": [ { "name": "A", "clue": "c" } ],
        "associations": [
            { "clue": "c", "suspect": "First" },
            { "clue": "c", "suspect": "Second" } ] }"#;
    let case = CaseFile::from_json(json).unwrap().build().unwrap();
    assert_eq!(case.suspects.len(), 2);
    assert_eq!(case.suspects.lookup("c"), Some("Second"));
}
