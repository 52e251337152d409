//! Mock API repository traits
//!
//! These traits define the data surface the console views consume, allowing
//! the in-memory mock to be swapped for a real backend client later.

use crate::error::Result;
use crate::models::{
    AccessKey, AccessKeyPatch, Adam, Credentials, DailyVisits, DateRange, GuardReaderMapping,
    GuardReaderMappingForm, HourlyVisits, KeyAssignmentRow, LoginResponse, NewAccessKey, NewPass,
    NewUser, NewVisitor, NewZone, Pass, PassPatch, PassTimeLeft, Reader, ReportData,
    SessionLogRow, User, UserPatch, Visitor, VisitorPatch, Zone, ZoneOccupancy, ZonePatch,
};
use crate::store::{Page, VisitorFilter};

use super::Ack;

/// Credential check behind the login form
pub trait Authenticator {
    /// Resolve credentials to a session payload
    fn authenticate(&self, credentials: &Credentials) -> Result<LoginResponse>;
}

/// User administration
pub trait UserRepository {
    /// List every user
    fn get_all_users(&self) -> Result<Vec<User>>;

    /// Create a user under the next id
    fn create_user(&mut self, user: NewUser) -> Result<User>;

    /// Merge a patch into an existing user
    fn update_user(&mut self, id: u64, patch: UserPatch) -> Result<User>;

    /// Delete a user
    fn delete_user(&mut self, id: u64) -> Result<Ack>;

    /// Reset a user's password
    fn reset_user_password(&mut self, id: u64) -> Result<Ack>;
}

/// Visitor registry
pub trait VisitorRepository {
    /// Search visitors, returning one page and the filtered total
    fn get_visitors(&self, filter: &VisitorFilter) -> Result<Page<Visitor>>;

    fn create_visitor(&mut self, visitor: NewVisitor) -> Result<Visitor>;

    fn update_visitor(&mut self, id: u64, patch: VisitorPatch) -> Result<Visitor>;

    fn delete_visitor(&mut self, id: u64) -> Result<Ack>;
}

/// Zone configuration
pub trait ZoneRepository {
    fn get_zones(&self) -> Result<Vec<Zone>>;

    fn create_zone(&mut self, zone: NewZone) -> Result<Zone>;

    fn update_zone(&mut self, id: u64, patch: ZonePatch) -> Result<Zone>;

    fn delete_zone(&mut self, id: u64) -> Result<Ack>;
}

/// Physical key inventory
pub trait KeyRepository {
    fn get_keys(&self) -> Result<Vec<AccessKey>>;

    fn create_key(&mut self, key: NewAccessKey) -> Result<AccessKey>;

    fn update_key(&mut self, id: u64, patch: AccessKeyPatch) -> Result<AccessKey>;

    fn delete_key(&mut self, id: u64) -> Result<Ack>;
}

/// Visitor passes
pub trait PassRepository {
    fn get_passes(&self) -> Result<Vec<Pass>>;

    /// Issue a pass; the validity window must be ordered
    fn create_pass(&mut self, pass: NewPass) -> Result<Pass>;

    fn update_pass(&mut self, id: u64, patch: PassPatch) -> Result<Pass>;

    fn delete_pass(&mut self, id: u64) -> Result<Ack>;
}

/// Reader hardware and guard assignments
pub trait DeviceRepository {
    fn get_readers(&self) -> Result<Vec<Reader>>;

    fn get_adams(&self) -> Result<Vec<Adam>>;

    fn get_guard_reader_mappings(&self) -> Result<Vec<GuardReaderMapping>>;

    /// Assign a guard to a reader from the mapping form
    fn create_guard_reader_mapping(
        &mut self,
        form: &GuardReaderMappingForm,
    ) -> Result<GuardReaderMapping>;
}

/// Read-only dashboard and report queries
pub trait ReportRepository {
    fn get_pass_time_left(&self) -> Result<Vec<PassTimeLeft>>;

    fn get_today_visitor_visit(&self) -> Result<Vec<HourlyVisits>>;

    fn get_weekly_visitor_visit(&self) -> Result<Vec<DailyVisits>>;

    fn get_visitor_in_zones(&self) -> Result<Vec<ZoneOccupancy>>;

    /// Login history of a user
    fn get_user_sessions(&self, user_id: u64, range: DateRange) -> Result<Vec<SessionLogRow>>;

    /// Zone entry/exit history
    fn get_visitor_zone_tracking(
        &self,
        visitor_id: u64,
        zone_id: u64,
        range: DateRange,
    ) -> Result<Vec<SessionLogRow>>;

    /// Who held a key and until when
    fn get_key_assigned_report(&self, key_id: u64, range: DateRange)
        -> Result<Vec<KeyAssignmentRow>>;

    /// Export rows by endpoint name; unknown names yield an empty report
    fn get_report_data(&self, endpoint: &str) -> Result<ReportData>;
}

/// Combined data surface
///
/// Provides access to all repository operations.
pub trait ConsoleApi:
    Authenticator
    + UserRepository
    + VisitorRepository
    + ZoneRepository
    + KeyRepository
    + PassRepository
    + DeviceRepository
    + ReportRepository
{
}

// Blanket implementation: any type implementing all traits implements ConsoleApi
impl<T> ConsoleApi for T where
    T: Authenticator
        + UserRepository
        + VisitorRepository
        + ZoneRepository
        + KeyRepository
        + PassRepository
        + DeviceRepository
        + ReportRepository
{
}
