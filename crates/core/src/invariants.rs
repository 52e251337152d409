//! Developer guardrails and invariants
//!
//! Debug assertions for detecting impossible states during development.
//! These checks are compiled out in release builds.

use std::collections::HashSet;

use crate::models::Pass;
use crate::store::{Collection, Record};

/// Validate that a collection's ids are unique and below its counter
pub fn assert_collection_invariants<T: Record>(collection: &Collection<T>) {
    if !cfg!(debug_assertions) {
        return;
    }

    let mut seen = HashSet::new();
    for record in collection.iter() {
        let id = record.id();

        debug_assert!(id != 0, "{} record with id 0", T::ENTITY);

        debug_assert!(
            seen.insert(id),
            "{} id {} appears more than once",
            T::ENTITY,
            id
        );

        debug_assert!(
            id < collection.next_id(),
            "{} id {} is not below next id {}",
            T::ENTITY,
            id,
            collection.next_id()
        );
    }
}

/// Validate that a pass window is ordered
pub fn assert_pass_invariants(pass: &Pass) {
    debug_assert!(
        pass.valid_from <= pass.valid_until,
        "Pass {} ends before it starts",
        pass.id
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed;

    #[test]
    fn test_seeded_collections_valid() {
        assert_collection_invariants(&Collection::from_records(seed::users()));
        assert_collection_invariants(&Collection::from_records(seed::keys()));
    }

    #[test]
    fn test_seeded_passes_valid() {
        for pass in seed::passes() {
            assert_pass_invariants(&pass);
        }
    }

    #[test]
    #[should_panic(expected = "appears more than once")]
    fn test_duplicate_ids_detected() {
        let mut users = seed::users();
        users[1].id = 1;
        Collection::from_records(users);
    }
}
