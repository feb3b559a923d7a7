use proptest::prelude::*;
use tempfile::TempDir;

use takelist::store::{load_into, save_tree, CsvTakeListStore, TakeListStore};
use takelist::tree::TakeTree;
use takelist::{ApiError, Status, TakeRecord, Timecode};

use crate::integration::support::{add_op_strategy, AddOp};

fn tc(s: &str) -> Timecode {
    s.parse().unwrap()
}

#[test]
fn shot_scenario_exports_header_and_two_rows() {
    let mut tree = TakeTree::new();
    tree.add_take("Shot1", "Run in place", 1, "Good take", Status::Good, tc("00:00:01:00"));
    tree.add_take("Shot1", "Run in place", 2, "Bad take", Status::NoGood, tc("00:00:02:00"));

    let records = tree.flatten();
    assert_eq!(records.len(), 2);
    assert!(records
        .iter()
        .all(|r| r.sequence == "Shot1" && r.slate == "Run in place"));
    assert_eq!(records[0].take, 1);
    assert_eq!(records[1].take, 2);

    let temp = TempDir::new().unwrap();
    let store = CsvTakeListStore::new(temp.path().join("takelist.csv"));
    save_tree(&tree, &store).unwrap();

    let content = std::fs::read_to_string(store.path()).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "Sequence,Slate,Take,Timecode,Duration,Status,Notes");
    assert_eq!(lines[1].split(',').nth(5), Some("G"));
    assert_eq!(lines[2].split(',').nth(5), Some("NG"));
}

#[test]
fn save_overwrites_instead_of_appending() {
    let temp = TempDir::new().unwrap();
    let store = CsvTakeListStore::new(temp.path().join("takelist.csv"));
    let mut tree = TakeTree::new();
    tree.add_take("A", "B", 1, "", Status::Good, Timecode::ZERO);
    save_tree(&tree, &store).unwrap();
    save_tree(&tree, &store).unwrap();
    let content = std::fs::read_to_string(store.path()).unwrap();
    assert_eq!(content.lines().count(), 2);
}

#[test]
fn malformed_file_leaves_tree_untouched() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("takelist.csv");
    std::fs::write(
        &path,
        "Sequence,Slate,Take,Timecode,Duration,Status,Notes\n\
         New,Slate,1,00:00:00:00,0,G,fine\n\
         New,Slate,two,00:00:00:00,0,G,broken\n",
    )
    .unwrap();

    let mut tree = TakeTree::new();
    tree.add_take("Existing", "S", 1, "keep", Status::Star, Timecode::ZERO);
    let before = tree.flatten();

    let result = load_into(&mut tree, &CsvTakeListStore::new(&path));
    assert!(matches!(result, Err(ApiError::MalformedFile { line: 3, .. })));
    assert_eq!(tree.flatten(), before);
    assert!(tree.find_sequence("New").is_none());
}

#[test]
fn loading_merges_and_skips_duplicates() {
    let temp = TempDir::new().unwrap();
    let store = CsvTakeListStore::new(temp.path().join("takelist.csv"));
    store
        .save(&[
            TakeRecord {
                sequence: "A".to_string(),
                slate: "B".to_string(),
                take: 1,
                timecode: Timecode::ZERO,
                duration: 1.5,
                status: Status::NoGood,
                notes: "from file".to_string(),
            },
            TakeRecord {
                sequence: "A".to_string(),
                slate: "B".to_string(),
                take: 2,
                timecode: Timecode::ZERO,
                duration: 0.0,
                status: Status::Unset,
                notes: String::new(),
            },
        ])
        .unwrap();

    let mut tree = TakeTree::new();
    tree.add_take("A", "B", 1, "in memory", Status::Good, Timecode::ZERO);
    let report = load_into(&mut tree, &store).unwrap();
    assert_eq!(report.inserted, 1);
    assert_eq!(report.duplicates, 1);

    let records = tree.flatten();
    assert_eq!(records[0].notes, "in memory");
    assert_eq!(records[1].take, 2);
}

fn build(ops: &[AddOp], durations: &[f64]) -> TakeTree {
    let mut tree = TakeTree::new();
    for (op, duration) in ops.iter().zip(durations.iter().cycle()) {
        tree.insert_record(&TakeRecord {
            sequence: op.sequence.to_string(),
            slate: op.slate.to_string(),
            take: op.take,
            timecode: op.timecode,
            duration: *duration,
            status: op.status,
            notes: op.notes.clone(),
        });
    }
    tree
}

proptest! {
    #[test]
    fn export_then_reload_reproduces_the_tree(
        ops in prop::collection::vec(add_op_strategy(), 0..30),
        durations in prop::collection::vec((0u32..100_000).prop_map(|n| n as f64 / 24.0), 1..5),
    ) {
        let tree = build(&ops, &durations);

        let temp = TempDir::new().unwrap();
        let store = CsvTakeListStore::new(temp.path().join("projects").join("p").join("takelist.csv"));
        save_tree(&tree, &store).unwrap();

        let mut reloaded = TakeTree::new();
        let report = load_into(&mut reloaded, &store).unwrap();
        prop_assert_eq!(report.duplicates, 0);
        prop_assert_eq!(report.inserted, tree.take_count());
        prop_assert_eq!(reloaded.flatten(), tree.flatten());
        prop_assert_eq!(reloaded.sequence_count(), tree.sequence_count());
    }
}
