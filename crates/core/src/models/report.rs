//! Dashboard and report rows

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

use super::{AccessKey, User, Visitor, Zone};

/// Pass nearing expiry, shown on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassTimeLeft {
    pub pass_id: u64,
    pub visitor_name: String,
    pub zone_name: String,
    pub minutes_left: i64,
}

/// Visits in one hour of the current day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyVisits {
    pub hour: u8,
    pub visitors: u32,
}

/// Visits on one day of the current week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyVisits {
    pub day: String,
    pub visitors: u32,
}

/// Current head count in a zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneOccupancy {
    pub zone_name: String,
    pub visitors: u32,
}

/// Fixed dashboard datasets
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardData {
    pub pass_time_left: Vec<PassTimeLeft>,
    pub today_visitor_visit: Vec<HourlyVisits>,
    pub weekly_visitor_visit: Vec<DailyVisits>,
    pub visitor_in_zones: Vec<ZoneOccupancy>,
}

/// Person attached to a session log row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: u64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub user_type: String,
    pub phone: String,
    pub address: Option<String>,
    pub employee_code: String,
    pub department: String,
}

/// A login/logout (or zone entry/exit) interval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionLogRow {
    pub id: u64,
    pub user: SessionUser,
    pub login_time: DateTime<Utc>,
    pub logout_time: DateTime<Utc>,
}

/// A visitor holding a key during a validity window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyAssignmentRow {
    pub id: u64,
    pub image: String,
    pub key: String,
    pub visitor_name: String,
    pub visitor_type: String,
    pub contact: String,
    pub visiting_purpose: String,
    pub whom_to_visit: String,
    pub visiting_department: String,
    pub valid_until: DateTime<Utc>,
}

/// Optional bounds on a report query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    /// Whether the interval `[from, to]` lies inside the range
    pub fn contains(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> bool {
        self.start.map_or(true, |start| from >= start) && self.end.map_or(true, |end| to <= end)
    }
}

/// Report exports by name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportEndpoint {
    Users,
    Visitors,
    Zones,
    Keys,
}

impl ReportEndpoint {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "users" => Some(ReportEndpoint::Users),
            "visitors" => Some(ReportEndpoint::Visitors),
            "zones" => Some(ReportEndpoint::Zones),
            "keys" => Some(ReportEndpoint::Keys),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ReportEndpoint::Users => "users",
            ReportEndpoint::Visitors => "visitors",
            ReportEndpoint::Zones => "zones",
            ReportEndpoint::Keys => "keys",
        }
    }
}

/// Rows of a report export; serialises as a plain array
#[derive(Debug, Clone, PartialEq)]
pub enum ReportData {
    Users(Vec<User>),
    Visitors(Vec<Visitor>),
    Zones(Vec<Zone>),
    Keys(Vec<AccessKey>),
    Empty,
}

impl ReportData {
    pub fn len(&self) -> usize {
        match self {
            ReportData::Users(rows) => rows.len(),
            ReportData::Visitors(rows) => rows.len(),
            ReportData::Zones(rows) => rows.len(),
            ReportData::Keys(rows) => rows.len(),
            ReportData::Empty => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Serialize for ReportData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ReportData::Users(rows) => rows.serialize(serializer),
            ReportData::Visitors(rows) => rows.serialize(serializer),
            ReportData::Zones(rows) => rows.serialize(serializer),
            ReportData::Keys(rows) => rows.serialize(serializer),
            ReportData::Empty => serializer.collect_seq(std::iter::empty::<()>()),
        }
    }
}
