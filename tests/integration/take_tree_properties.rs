use std::collections::{HashMap, HashSet};

use proptest::prelude::*;
use takelist::tree::{TakeTree, TreeAccess};
use takelist::{NodeId, NodeKind, Status};

use crate::integration::support::{add_op_strategy, AddOp};

fn build(ops: &[AddOp]) -> TakeTree {
    let mut tree = TakeTree::new();
    for op in ops {
        tree.add_take(op.sequence, op.slate, op.take, &op.notes, op.status, op.timecode);
    }
    tree
}

/// Expected flatten order: first appearance at every level.
fn expected_keys(ops: &[AddOp]) -> Vec<(String, String, u32)> {
    let mut model: Vec<(&str, Vec<(&str, Vec<u32>)>)> = Vec::new();
    for op in ops {
        let seq = match model.iter().position(|(name, _)| *name == op.sequence) {
            Some(i) => i,
            None => {
                model.push((op.sequence, Vec::new()));
                model.len() - 1
            }
        };
        let slates = &mut model[seq].1;
        let slate = match slates.iter().position(|(name, _)| *name == op.slate) {
            Some(i) => i,
            None => {
                slates.push((op.slate, Vec::new()));
                slates.len() - 1
            }
        };
        let takes = &mut slates[slate].1;
        if !takes.contains(&op.take) {
            takes.push(op.take);
        }
    }

    let mut keys = Vec::new();
    for (seq, slates) in model {
        for (slate, takes) in slates {
            for take in takes {
                keys.push((seq.to_string(), slate.to_string(), take));
            }
        }
    }
    keys
}

fn sibling_labels(tree: &TakeTree, parent: NodeId) -> Vec<String> {
    (0..tree.row_count_under(parent))
        .filter_map(|i| tree.child_at(parent, i))
        .map(|child| match tree.node_kind(child) {
            Some(NodeKind::Take) => tree.field_value(child, "Take").unwrap().to_string(),
            Some(NodeKind::Sequence) => tree.field_value(child, "Sequence").unwrap().to_string(),
            _ => tree.field_value(child, "Slate").unwrap().to_string(),
        })
        .collect()
}

proptest! {
    #[test]
    fn insertion_is_idempotent_and_keeps_first_data(ops in prop::collection::vec(add_op_strategy(), 0..40)) {
        let tree = build(&ops);

        let mut first: HashMap<(&str, &str, u32), &AddOp> = HashMap::new();
        for op in &ops {
            first.entry((op.sequence, op.slate, op.take)).or_insert(op);
        }
        prop_assert_eq!(tree.take_count(), first.len());

        for record in tree.flatten() {
            let op = first[&(record.sequence.as_str(), record.slate.as_str(), record.take)];
            prop_assert_eq!(&record.notes, &op.notes);
            prop_assert_eq!(record.status, op.status);
            prop_assert_eq!(record.timecode, op.timecode);
        }
    }

    #[test]
    fn siblings_are_unique(ops in prop::collection::vec(add_op_strategy(), 0..40)) {
        let tree = build(&ops);
        let mut stack = vec![NodeId::ROOT];
        while let Some(node) = stack.pop() {
            let labels = sibling_labels(&tree, node);
            let unique: HashSet<&String> = labels.iter().collect();
            prop_assert_eq!(unique.len(), labels.len());
            for i in 0..tree.row_count_under(node) {
                let child = tree.child_at(node, i).unwrap();
                prop_assert_eq!(tree.parent_of(child), Some(node));
                prop_assert_eq!(tree.row_of(child), i);
                stack.push(child);
            }
        }
    }

    #[test]
    fn flatten_is_complete_and_ordered(ops in prop::collection::vec(add_op_strategy(), 0..40)) {
        let tree = build(&ops);
        let records = tree.flatten();
        prop_assert_eq!(records.len(), tree.take_count());
        let keys: Vec<(String, String, u32)> = records
            .into_iter()
            .map(|r| (r.sequence, r.slate, r.take))
            .collect();
        prop_assert_eq!(keys, expected_keys(&ops));
    }

    #[test]
    fn only_notes_and_status_are_mutable(
        ops in prop::collection::vec(add_op_strategy(), 1..10),
        field in prop::sample::select(vec![
            "Notes", "notes", "Status", "Take", "Timecode", "Duration", "Sequence", "Slate", "Bogus",
        ]),
        value in prop::sample::select(vec!["S", "G", "NG", "", "edited", "00:00:09:00", "7"]),
    ) {
        let mut tree = build(&ops);
        let target = &ops[0];
        let node = tree.find_take_by_key(target.sequence, target.slate, target.take).unwrap();
        let before = tree.flatten();

        let changed = tree.set_take_field(node, field, value);
        let after = tree.flatten();

        let expect_success = field.eq_ignore_ascii_case("notes")
            || (field == "Status" && value.parse::<Status>().is_ok());
        prop_assert_eq!(changed, expect_success);

        let idx = before
            .iter()
            .position(|r| r.sequence == target.sequence && r.slate == target.slate && r.take == target.take)
            .unwrap();
        if changed {
            if field.eq_ignore_ascii_case("notes") {
                prop_assert_eq!(after[idx].notes.as_str(), value);
            } else {
                prop_assert_eq!(after[idx].status, value.parse::<Status>().unwrap());
            }
            let mut expected = before.clone();
            expected[idx] = after[idx].clone();
            prop_assert_eq!(after, expected);
        } else {
            prop_assert_eq!(after, before);
        }
    }
}
