use std::collections::BTreeSet;

use proptest::prelude::*;

use kpimap_model::{RelationshipPatch, Table};
use kpimap_session::{RelationshipList, TableRegistry};

fn table_names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set("[a-z]{1,6}", 0..6).prop_map(|set| set.into_iter().collect())
}

// Endpoint pool deliberately overlaps registered names only partially, so
// relationships may also reference tables that were never registered.
fn endpoints() -> impl Strategy<Value = Vec<(Option<String>, Option<String>)>> {
    prop::collection::vec(
        (
            prop::option::of("[a-z]{1,6}"),
            prop::option::of("[a-z]{1,6}"),
        ),
        0..8,
    )
}

proptest! {
    // connectivity_gap(R, L) == names(R) \ union of referenced endpoints.
    #[test]
    fn gap_is_registry_minus_referenced(names in table_names(), rels in endpoints()) {
        let mut registry = TableRegistry::new();
        for name in &names {
            registry.register(Table::new(name.clone(), vec![]));
        }

        let mut list = RelationshipList::new();
        for (source, target) in &rels {
            let idx = list.add();
            list.update(idx, RelationshipPatch {
                source_table: source.clone(),
                target_table: target.clone(),
                ..RelationshipPatch::default()
            }).unwrap();
        }

        let referenced: BTreeSet<&String> = rels
            .iter()
            .flat_map(|(s, t)| s.iter().chain(t.iter()))
            .collect();
        let expected: Vec<String> = names
            .iter()
            .filter(|name| !referenced.contains(name))
            .cloned()
            .collect();

        prop_assert_eq!(list.connectivity_gap(&registry), expected);
    }

    // Removing index i shifts i+1.. down by one and keeps relative order.
    #[test]
    fn removal_preserves_relative_order(len in 1usize..12, seed in 0usize..12) {
        let index = seed % len;

        let mut list = RelationshipList::new();
        for i in 0..len {
            let at = list.add();
            list.update(at, RelationshipPatch {
                source_column: Some(format!("col-{i}")),
                ..RelationshipPatch::default()
            }).unwrap();
        }

        list.remove(index).unwrap();

        prop_assert_eq!(list.len(), len - 1);
        for (pos, entry) in list.iter().enumerate() {
            let original = if pos < index { pos } else { pos + 1 };
            prop_assert_eq!(
                entry.source_column.as_deref(),
                Some(format!("col-{original}").as_str())
            );
        }
    }
}
