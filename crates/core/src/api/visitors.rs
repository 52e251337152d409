//! Visitor operations

use tracing::{debug, instrument};

use super::{Ack, MockApi, VisitorRepository};
use crate::error::Result;
use crate::models::{NewVisitor, Visitor, VisitorPatch};
use crate::store::{Page, VisitorFilter};

impl VisitorRepository for MockApi<'_> {
    #[instrument(skip(self, filter))]
    fn get_visitors(&self, filter: &VisitorFilter) -> Result<Page<Visitor>> {
        let matching: Vec<Visitor> = self
            .store
            .visitors
            .iter()
            .filter(|v| filter.matches(v))
            .cloned()
            .collect();

        let page = Page {
            results: filter.pagination.apply(&matching),
            count: matching.len(),
        };
        debug!(
            count = page.count,
            returned = page.results.len(),
            offset = filter.pagination.offset,
            "Visitor search"
        );
        Ok(page)
    }

    #[instrument(skip(self, visitor), fields(gov_id_no = %visitor.gov_id_no))]
    fn create_visitor(&mut self, visitor: NewVisitor) -> Result<Visitor> {
        self.store
            .visitors
            .insert_with(|id, now| Ok(visitor.into_visitor(id, now)))
    }

    #[instrument(skip(self, patch))]
    fn update_visitor(&mut self, id: u64, patch: VisitorPatch) -> Result<Visitor> {
        self.store.visitors.update_with(id, |visitor| {
            patch.apply(visitor);
            Ok(())
        })
    }

    #[instrument(skip(self))]
    fn delete_visitor(&mut self, id: u64) -> Result<Ack> {
        self.store.visitors.remove(id)?;
        Ok(Ack::ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::store::{DataStore, DEFAULT_PAGE_SIZE};
    use chrono::{Duration, Utc};

    fn new_visitor(first: &str, last: &str) -> NewVisitor {
        NewVisitor {
            first_name: first.to_string(),
            last_name: last.to_string(),
            phone_number: "555-4242".to_string(),
            gov_id_no: "GOV-Z9999".to_string(),
            email: None,
            address: None,
            visitor_type: "Guest".to_string(),
        }
    }

    #[test]
    fn test_default_page() {
        let mut store = DataStore::seeded();
        let api = MockApi::new(&mut store);

        let page = api.get_visitors(&VisitorFilter::new()).unwrap();
        assert_eq!(page.count, 12);
        assert_eq!(page.results.len(), DEFAULT_PAGE_SIZE);
        assert_eq!(page.results[0].id, 1);
    }

    #[test]
    fn test_second_page() {
        let mut store = DataStore::seeded();
        let api = MockApi::new(&mut store);

        let page = api.get_visitors(&VisitorFilter::new().page(10, 10)).unwrap();
        assert_eq!(page.count, 12);
        let ids: Vec<u64> = page.results.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![11, 12]);
    }

    #[test]
    fn test_filter_case_insensitive_and_count_before_pagination() {
        let mut store = DataStore::seeded();
        let api = MockApi::new(&mut store);

        // "ali" matches Alice and Alicia
        let filter = VisitorFilter::new().first_name("ALI").page(0, 1);
        let page = api.get_visitors(&filter).unwrap();
        assert_eq!(page.count, 2);
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].first_name, "Alice");
    }

    #[test]
    fn test_filters_combine_with_and() {
        let mut store = DataStore::seeded();
        let api = MockApi::new(&mut store);

        // "john" matches Johnson and Johnston; the first name narrows to one
        let both = VisitorFilter::new().last_name("john");
        assert_eq!(api.get_visitors(&both).unwrap().count, 2);

        let narrowed = VisitorFilter::new().last_name("john").first_name("emi");
        let page = api.get_visitors(&narrowed).unwrap();
        assert_eq!(page.count, 1);
        assert_eq!(page.results[0].last_name, "Johnston");

        let none = VisitorFilter::new().last_name("john").gov_id_no("GOV-B");
        assert_eq!(api.get_visitors(&none).unwrap().count, 0);
    }

    #[test]
    fn test_phone_and_gov_id_filters() {
        let mut store = DataStore::seeded();
        let api = MockApi::new(&mut store);

        let page = api.get_visitors(&VisitorFilter::new().phone("0456")).unwrap();
        assert_eq!(page.count, 1);
        assert_eq!(page.results[0].first_name, "Bob");

        let page = api
            .get_visitors(&VisitorFilter::new().gov_id_no("gov-c3"))
            .unwrap();
        assert_eq!(page.count, 1);
        assert_eq!(page.results[0].first_name, "Carol");
    }

    #[test]
    fn test_created_range_filter() {
        let mut store = DataStore::seeded();
        let mut api = MockApi::new(&mut store);

        let created = api.create_visitor(new_visitor("Nora", "Fresh")).unwrap();
        let filter = VisitorFilter::new()
            .created_between(Some(Utc::now() - Duration::minutes(5)), None);
        let page = api.get_visitors(&filter).unwrap();
        assert_eq!(page.count, 1);
        assert_eq!(page.results[0].id, created.id);
    }

    #[test]
    fn test_create_update_delete() {
        let mut store = DataStore::seeded();
        let mut api = MockApi::new(&mut store);

        let created = api.create_visitor(new_visitor("Nora", "Fresh")).unwrap();
        assert_eq!(created.id, 13);

        let patch = VisitorPatch {
            address: Some(Some("1 Harbour Rd".to_string())),
            ..VisitorPatch::default()
        };
        let updated = api.update_visitor(created.id, patch).unwrap();
        assert_eq!(updated.first_name, "Nora");
        assert_eq!(updated.gov_id_no, created.gov_id_no);
        assert_eq!(updated.address.as_deref(), Some("1 Harbour Rd"));

        let clear = VisitorPatch {
            address: Some(None),
            ..VisitorPatch::default()
        };
        assert_eq!(api.update_visitor(created.id, clear).unwrap().address, None);

        api.delete_visitor(created.id).unwrap();
        assert!(matches!(
            api.delete_visitor(created.id),
            Err(Error::NotFound { entity: "Visitor", .. })
        ));
        assert!(matches!(
            api.update_visitor(created.id, VisitorPatch::default()),
            Err(Error::NotFound { .. })
        ));
    }
}
