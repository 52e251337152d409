//! Dashboard and report queries
//!
//! All reads; nothing here mutates the store.

use tracing::{debug, instrument};

use super::{MockApi, ReportRepository};
use crate::error::Result;
use crate::models::{
    DailyVisits, DateRange, HourlyVisits, KeyAssignmentRow, PassTimeLeft, ReportData,
    ReportEndpoint, SessionLogRow, ZoneOccupancy,
};

impl ReportRepository for MockApi<'_> {
    fn get_pass_time_left(&self) -> Result<Vec<PassTimeLeft>> {
        Ok(self.store.dashboard.pass_time_left.clone())
    }

    fn get_today_visitor_visit(&self) -> Result<Vec<HourlyVisits>> {
        Ok(self.store.dashboard.today_visitor_visit.clone())
    }

    fn get_weekly_visitor_visit(&self) -> Result<Vec<DailyVisits>> {
        Ok(self.store.dashboard.weekly_visitor_visit.clone())
    }

    fn get_visitor_in_zones(&self) -> Result<Vec<ZoneOccupancy>> {
        Ok(self.store.dashboard.visitor_in_zones.clone())
    }

    #[instrument(skip(self, range))]
    fn get_user_sessions(&self, user_id: u64, range: DateRange) -> Result<Vec<SessionLogRow>> {
        Ok(self
            .store
            .user_sessions
            .iter()
            .filter(|row| range.contains(row.login_time, row.logout_time))
            .cloned()
            .map(|mut row| {
                row.user.id = user_id;
                row
            })
            .collect())
    }

    #[instrument(skip(self, range))]
    fn get_visitor_zone_tracking(
        &self,
        visitor_id: u64,
        zone_id: u64,
        range: DateRange,
    ) -> Result<Vec<SessionLogRow>> {
        Ok(self
            .store
            .zone_tracking
            .iter()
            .filter(|row| range.contains(row.login_time, row.logout_time))
            .cloned()
            .collect())
    }

    /// The key id is only logged; every request reads the same fixed rows.
    #[instrument(skip(self, range))]
    fn get_key_assigned_report(
        &self,
        key_id: u64,
        range: DateRange,
    ) -> Result<Vec<KeyAssignmentRow>> {
        Ok(self
            .store
            .key_assignments
            .iter()
            .filter(|row| range.contains(row.valid_until, row.valid_until))
            .cloned()
            .collect())
    }

    #[instrument(skip(self))]
    fn get_report_data(&self, endpoint: &str) -> Result<ReportData> {
        let data = match ReportEndpoint::from_name(endpoint) {
            Some(ReportEndpoint::Users) => ReportData::Users(self.store.users.all().to_vec()),
            Some(ReportEndpoint::Visitors) => {
                ReportData::Visitors(self.store.visitors.all().to_vec())
            }
            Some(ReportEndpoint::Zones) => ReportData::Zones(self.store.zones.all().to_vec()),
            Some(ReportEndpoint::Keys) => ReportData::Keys(self.store.keys.all().to_vec()),
            None => {
                debug!("Unknown report endpoint, returning empty report");
                ReportData::Empty
            }
        };
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{KeyRepository, UserRepository};
    use crate::models::Zone;
    use crate::store::{seed, DataStore};
    use chrono::{DateTime, Utc};

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_dashboard_reads() {
        let mut store = DataStore::seeded();
        let api = MockApi::new(&mut store);

        assert_eq!(api.get_pass_time_left().unwrap().len(), 3);
        assert_eq!(api.get_today_visitor_visit().unwrap().len(), 8);
        assert_eq!(api.get_weekly_visitor_visit().unwrap().len(), 7);
        assert_eq!(api.get_visitor_in_zones().unwrap()[0].zone_name, "Reception");
    }

    #[test]
    fn test_user_sessions_attributed_to_requested_user() {
        let mut store = DataStore::seeded();
        let api = MockApi::new(&mut store);

        let rows = api.get_user_sessions(7, DateRange::default()).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.user.id == 7));
    }

    #[test]
    fn test_user_sessions_range() {
        let mut store = DataStore::seeded();
        let api = MockApi::new(&mut store);

        let range = DateRange {
            start: Some(at("2024-01-16T00:00:00Z")),
            end: None,
        };
        let rows = api.get_user_sessions(1, range).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, 2);
    }

    #[test]
    fn test_zone_tracking() {
        let mut store = DataStore::seeded();
        let api = MockApi::new(&mut store);

        let rows = api
            .get_visitor_zone_tracking(1, 1, DateRange::default())
            .unwrap();
        assert_eq!(rows, seed::zone_tracking());
    }

    #[test]
    fn test_key_assigned_report() {
        let mut store = DataStore::seeded();
        let mut api = MockApi::new(&mut store);

        let rows = api.get_key_assigned_report(1, DateRange::default()).unwrap();
        assert_eq!(rows, seed::key_assignments());
        assert_eq!(rows.len(), 2);
        assert_eq!(
            api.get_key_assigned_report(2, DateRange::default()).unwrap(),
            rows
        );
        assert_eq!(
            api.get_key_assigned_report(99, DateRange::default()).unwrap(),
            rows
        );

        let range = DateRange {
            start: None,
            end: Some(at("2024-01-19T00:00:00Z")),
        };
        let rows = api.get_key_assigned_report(1, range).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].visitor_name, "Bob Wilson");

        api.delete_key(1).unwrap();
        assert_eq!(
            api.get_key_assigned_report(1, DateRange::default()).unwrap().len(),
            2
        );
    }

    #[test]
    fn test_report_data_by_endpoint() {
        let mut store = DataStore::seeded();
        let api = MockApi::new(&mut store);

        assert_eq!(api.get_report_data("users").unwrap().len(), 12);
        assert_eq!(api.get_report_data("visitors").unwrap().len(), 12);
        assert_eq!(api.get_report_data("keys").unwrap().len(), 6);
        match api.get_report_data("zones").unwrap() {
            ReportData::Zones(zones) => {
                let names: Vec<&str> = zones.iter().map(|z: &Zone| z.name.as_str()).collect();
                assert!(names.contains(&"Server Room"));
            }
            other => panic!("unexpected report: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_endpoint_is_empty() {
        let mut store = DataStore::seeded();
        let api = MockApi::new(&mut store);

        let report = api.get_report_data("audit-log").unwrap();
        assert_eq!(report, ReportData::Empty);
        assert!(report.is_empty());
    }

    #[test]
    fn test_report_reflects_mutations() {
        let mut store = DataStore::seeded();
        let mut api = MockApi::new(&mut store);

        api.delete_user(1).unwrap();
        assert_eq!(api.get_report_data("users").unwrap().len(), 11);
    }
}
