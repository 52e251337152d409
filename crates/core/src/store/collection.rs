//! Generic in-memory record collection
//!
//! Ids come from a counter owned by the collection. The counter only moves
//! forward, so ids freed by deletion are never handed out again.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::{Error, Result};
use crate::invariants::assert_collection_invariants;

/// A record stored in a [`Collection`]
pub trait Record: Clone {
    /// Entity name used in errors and logs
    const ENTITY: &'static str;

    fn id(&self) -> u64;

    /// Refresh the update timestamp, for entities that carry one
    fn touch(&mut self, _now: DateTime<Utc>) {}
}

#[derive(Debug, Clone)]
pub struct Collection<T> {
    records: Vec<T>,
    next_id: u64,
}

impl<T: Record> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> Collection<T> {
    /// Empty collection; the first record gets id 1
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }

    /// Collection pre-filled with records; new ids continue above the highest one
    pub fn from_records(records: Vec<T>) -> Self {
        let next_id = records
            .iter()
            .map(Record::id)
            .max()
            .map_or(1, |max| max + 1);
        let collection = Self { records, next_id };
        assert_collection_invariants(&collection);
        collection
    }

    pub fn all(&self) -> &[T] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Id the next inserted record will receive
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn get(&self, id: u64) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.get(id).is_some()
    }

    /// Build and append a record under the next id
    ///
    /// The counter only advances when `build` succeeds.
    pub fn insert_with<F>(&mut self, build: F) -> Result<T>
    where
        F: FnOnce(u64, DateTime<Utc>) -> Result<T>,
    {
        let id = self.next_id;
        let record = build(id, Utc::now())?;
        debug_assert_eq!(record.id(), id, "{} built with a foreign id", T::ENTITY);

        self.next_id += 1;
        self.records.push(record.clone());
        debug!(entity = T::ENTITY, id, "Record created");

        assert_collection_invariants(self);
        Ok(record)
    }

    /// Apply a change to the record with `id` and refresh its timestamp
    ///
    /// The change runs against a copy; the stored record is only replaced
    /// when `apply` succeeds.
    pub fn update_with<F>(&mut self, id: u64, apply: F) -> Result<T>
    where
        F: FnOnce(&mut T) -> Result<()>,
    {
        let index = self.position(id)?;
        let mut record = self.records[index].clone();
        apply(&mut record)?;
        debug_assert_eq!(record.id(), id, "{} id changed by update", T::ENTITY);

        record.touch(Utc::now());
        self.records[index] = record.clone();
        debug!(entity = T::ENTITY, id, "Record updated");
        Ok(record)
    }

    /// Remove the record with `id`, returning it
    pub fn remove(&mut self, id: u64) -> Result<T> {
        let index = self.position(id)?;
        let record = self.records.remove(index);
        debug!(entity = T::ENTITY, id, "Record deleted");
        Ok(record)
    }

    fn position(&self, id: u64) -> Result<usize> {
        self.records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| Error::not_found(T::ENTITY, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Note {
        id: u64,
        text: String,
        updated_on: Option<DateTime<Utc>>,
    }

    impl Record for Note {
        const ENTITY: &'static str = "Note";

        fn id(&self) -> u64 {
            self.id
        }

        fn touch(&mut self, now: DateTime<Utc>) {
            self.updated_on = Some(now);
        }
    }

    fn note(id: u64, text: &str) -> Note {
        Note {
            id,
            text: text.to_string(),
            updated_on: None,
        }
    }

    fn insert(collection: &mut Collection<Note>, text: &str) -> Note {
        collection
            .insert_with(|id, _| Ok(note(id, text)))
            .unwrap()
    }

    #[test]
    fn test_empty_collection_starts_at_one() {
        let mut notes = Collection::new();
        assert_eq!(insert(&mut notes, "first").id, 1);
        assert_eq!(insert(&mut notes, "second").id, 2);
    }

    #[test]
    fn test_seeded_collection_continues_above_max() {
        let mut notes = Collection::from_records(vec![note(3, "a"), note(7, "b")]);
        assert_eq!(notes.next_id(), 8);
        assert_eq!(insert(&mut notes, "c").id, 8);
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let mut notes = Collection::from_records(vec![note(1, "a"), note(2, "b")]);
        notes.remove(2).unwrap();
        assert_eq!(insert(&mut notes, "c").id, 3);
    }

    #[test]
    fn test_failed_build_does_not_consume_id() {
        let mut notes: Collection<Note> = Collection::new();
        let result = notes.insert_with(|_, _| Err(Error::Validation("nope".into())));
        assert!(result.is_err());
        assert_eq!(notes.next_id(), 1);
        assert!(notes.is_empty());
    }

    #[test]
    fn test_update_touches_record() {
        let mut notes = Collection::from_records(vec![note(1, "a")]);
        let updated = notes
            .update_with(1, |n| {
                n.text = "b".to_string();
                Ok(())
            })
            .unwrap();
        assert_eq!(updated.text, "b");
        assert!(updated.updated_on.is_some());
        assert_eq!(notes.get(1), Some(&updated));
    }

    #[test]
    fn test_failed_update_leaves_record_untouched() {
        let mut notes = Collection::from_records(vec![note(1, "a")]);
        let result = notes.update_with(1, |n| {
            n.text = "changed".to_string();
            Err(Error::Validation("rejected".into()))
        });
        assert!(result.is_err());
        assert_eq!(notes.get(1).unwrap().text, "a");
    }

    #[test]
    fn test_missing_id_is_not_found() {
        let mut notes = Collection::from_records(vec![note(1, "a")]);
        assert!(matches!(
            notes.update_with(9, |_| Ok(())),
            Err(Error::NotFound { entity: "Note", id: 9 })
        ));
        assert!(matches!(notes.remove(9), Err(Error::NotFound { .. })));
        assert_eq!(notes.len(), 1);
    }
}
