//! Demo datasets loaded into a seeded store

use chrono::{DateTime, Utc};

use crate::models::{
    AccessKey, Adam, DailyVisits, DashboardData, HourlyVisits, KeyAssignmentRow, KeyStatus, Pass,
    PassTimeLeft, Reader, SessionLogRow, SessionUser, User, UserType, Visitor, Zone,
    ZoneOccupancy,
};

/// Placeholder portrait used by the key assignment report
const PLACEHOLDER_IMAGE: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

fn at(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_default()
}

fn user(id: u64, username: &str, first: &str, last: &str, user_type: UserType) -> User {
    let created = at("2024-01-01T08:00:00Z");
    User {
        id,
        username: username.to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: Some(format!("{}@example.com", username)),
        phone: None,
        user_type,
        image: None,
        created_on: created,
        updated_on: created,
    }
}

pub fn users() -> Vec<User> {
    vec![
        user(1, "admin", "System", "Administrator", UserType::Admin),
        user(2, "shah", "Amit", "Shah", UserType::Admin),
        user(3, "sanjeev", "Sanjeev", "Kumar", UserType::Admin),
        user(4, "john", "John", "Doe", UserType::Receptionist),
        user(5, "jane", "Jane", "Smith", UserType::Receptionist),
        user(6, "mike", "Mike", "Brown", UserType::Receptionist),
        user(7, "sarah", "Sarah", "Davis", UserType::Receptionist),
        user(8, "david", "David", "Wilson", UserType::Receptionist),
        user(9, "lisa", "Lisa", "Taylor", UserType::Receptionist),
        user(10, "robert", "Robert", "Clark", UserType::Receptionist),
        user(11, "security1", "Ravi", "Singh", UserType::SecurityGuard),
        user(12, "security2", "Arjun", "Mehta", UserType::SecurityGuard),
    ]
}

fn visitor(
    id: u64,
    first: &str,
    last: &str,
    phone: &str,
    gov_id: &str,
    visitor_type: &str,
    created: &str,
) -> Visitor {
    Visitor {
        id,
        first_name: first.to_string(),
        last_name: last.to_string(),
        phone_number: phone.to_string(),
        gov_id_no: gov_id.to_string(),
        email: None,
        address: None,
        visitor_type: visitor_type.to_string(),
        created_on: at(created),
        updated_on: at(created),
    }
}

pub fn visitors() -> Vec<Visitor> {
    vec![
        visitor(1, "Alice", "Johnson", "555-0123", "GOV-A1001", "Contractor", "2024-01-10T09:15:00Z"),
        visitor(2, "Bob", "Wilson", "555-0456", "GOV-B2002", "Delivery", "2024-01-10T10:30:00Z"),
        visitor(3, "Carol", "Martinez", "555-0789", "GOV-C3003", "Guest", "2024-01-11T11:00:00Z"),
        visitor(4, "Daniel", "Lee", "555-1011", "GOV-D4004", "Interview", "2024-01-11T14:20:00Z"),
        visitor(5, "Emily", "Johnston", "555-1213", "GOV-E5005", "Guest", "2024-01-12T08:45:00Z"),
        visitor(6, "Frank", "Moore", "555-1415", "GOV-F6006", "Vendor", "2024-01-12T13:05:00Z"),
        visitor(7, "Grace", "Hall", "555-1617", "GOV-G7007", "Contractor", "2024-01-13T09:00:00Z"),
        visitor(8, "Henry", "Allen", "555-1819", "GOV-H8008", "Delivery", "2024-01-13T15:40:00Z"),
        visitor(9, "Isabel", "Young", "555-2021", "GOV-I9009", "Guest", "2024-01-14T10:10:00Z"),
        visitor(10, "Jack", "King", "555-2223", "GOV-J1010", "Vendor", "2024-01-14T16:25:00Z"),
        visitor(11, "Alicia", "Wright", "555-2425", "GOV-K1111", "Interview", "2024-01-15T09:35:00Z"),
        visitor(12, "Liam", "Scott", "555-2627", "GOV-L1212", "Guest", "2024-01-15T12:50:00Z"),
    ]
}

fn zone(id: u64, name: &str, description: &str) -> Zone {
    let created = at("2024-01-01T08:00:00Z");
    Zone {
        id,
        name: name.to_string(),
        description: Some(description.to_string()),
        is_active: true,
        created_on: created,
        updated_on: created,
    }
}

pub fn zones() -> Vec<Zone> {
    vec![
        zone(1, "Reception", "Main lobby and front desk"),
        zone(2, "Conference Room", "Ground floor meeting rooms"),
        zone(3, "Server Room", "Restricted data centre"),
        zone(4, "Cafeteria", "Staff and visitor dining"),
        zone(5, "Executive Floor", "Senior management offices"),
    ]
}

fn key(id: u64, zone_id: u64, status: KeyStatus) -> AccessKey {
    AccessKey {
        id,
        key_number: format!("RFID-KEY-{:03}", id),
        key_type: "RFID".to_string(),
        zone_id: Some(zone_id),
        status,
    }
}

pub fn keys() -> Vec<AccessKey> {
    vec![
        key(1, 1, KeyStatus::Assigned),
        key(2, 1, KeyStatus::Available),
        key(3, 2, KeyStatus::Available),
        key(4, 3, KeyStatus::Assigned),
        key(5, 4, KeyStatus::Lost),
        key(6, 5, KeyStatus::Available),
    ]
}

fn pass(id: u64, visitor_id: u64, zone_id: u64, pass_type: &str, from: &str, until: &str) -> Pass {
    Pass {
        id,
        visitor_id,
        zone_id,
        pass_type: pass_type.to_string(),
        valid_from: at(from),
        valid_until: at(until),
        created_on: at(from),
        updated_on: at(from),
    }
}

pub fn passes() -> Vec<Pass> {
    vec![
        pass(1, 1, 3, "Contractor", "2024-01-15T09:00:00Z", "2024-01-20T17:00:00Z"),
        pass(2, 2, 1, "Day", "2024-01-18T08:00:00Z", "2024-01-18T12:00:00Z"),
        pass(3, 3, 2, "Day", "2024-01-16T09:00:00Z", "2024-01-16T18:00:00Z"),
        pass(4, 11, 5, "Interview", "2024-01-15T09:30:00Z", "2024-01-15T13:00:00Z"),
    ]
}

pub fn dashboard() -> DashboardData {
    DashboardData {
        pass_time_left: vec![
            PassTimeLeft {
                pass_id: 2,
                visitor_name: "Bob Wilson".to_string(),
                zone_name: "Reception".to_string(),
                minutes_left: 25,
            },
            PassTimeLeft {
                pass_id: 4,
                visitor_name: "Alicia Wright".to_string(),
                zone_name: "Executive Floor".to_string(),
                minutes_left: 70,
            },
            PassTimeLeft {
                pass_id: 3,
                visitor_name: "Carol Martinez".to_string(),
                zone_name: "Conference Room".to_string(),
                minutes_left: 185,
            },
        ],
        today_visitor_visit: [
            (9, 4),
            (10, 7),
            (11, 5),
            (12, 3),
            (13, 6),
            (14, 8),
            (15, 4),
            (16, 2),
        ]
        .into_iter()
        .map(|(hour, visitors)| HourlyVisits { hour, visitors })
        .collect(),
        weekly_visitor_visit: [
            ("Mon", 32),
            ("Tue", 28),
            ("Wed", 41),
            ("Thu", 36),
            ("Fri", 45),
            ("Sat", 12),
            ("Sun", 5),
        ]
        .into_iter()
        .map(|(day, visitors)| DailyVisits {
            day: day.to_string(),
            visitors,
        })
        .collect(),
        visitor_in_zones: [
            ("Reception", 6),
            ("Conference Room", 9),
            ("Server Room", 1),
            ("Cafeteria", 14),
            ("Executive Floor", 2),
        ]
        .into_iter()
        .map(|(zone_name, visitors)| ZoneOccupancy {
            zone_name: zone_name.to_string(),
            visitors,
        })
        .collect(),
    }
}

pub fn readers() -> Vec<Reader> {
    vec![
        Reader {
            id: 1,
            adam_name: "ADAM-001".to_string(),
            zone_name: "Reception".to_string(),
            moxa_ip: "192.168.1.100".to_string(),
            reader_type: "RFID".to_string(),
            com_port: "COM1".to_string(),
        },
        Reader {
            id: 2,
            adam_name: "ADAM-002".to_string(),
            zone_name: "Conference Room".to_string(),
            moxa_ip: "192.168.1.101".to_string(),
            reader_type: "Biometric".to_string(),
            com_port: "COM2".to_string(),
        },
    ]
}

pub fn adams() -> Vec<Adam> {
    vec![
        Adam {
            id: 1,
            name: "ADAM-001".to_string(),
            ip: "192.168.1.100".to_string(),
            port: "502".to_string(),
            address: "1".to_string(),
        },
        Adam {
            id: 2,
            name: "ADAM-002".to_string(),
            ip: "192.168.1.101".to_string(),
            port: "502".to_string(),
            address: "2".to_string(),
        },
    ]
}

fn employee(id: u64, username: &str, (first, last): (&str, &str), phone: &str, code: &str) -> SessionUser {
    SessionUser {
        id,
        username: username.to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        user_type: "Employee".to_string(),
        phone: phone.to_string(),
        address: None,
        employee_code: code.to_string(),
        department: String::new(),
    }
}

fn located(mut user: SessionUser, address: &str, department: &str) -> SessionUser {
    user.address = Some(address.to_string());
    user.department = department.to_string();
    user
}

/// Login history rows; the user id is rewritten per query
pub fn user_sessions() -> Vec<SessionLogRow> {
    let mut john = employee(0, "john_doe", ("John", "Doe"), "1234567890", "EMP001");
    john.department = "IT".to_string();
    vec![
        SessionLogRow {
            id: 1,
            user: john.clone(),
            login_time: at("2024-01-15T09:00:00Z"),
            logout_time: at("2024-01-15T17:00:00Z"),
        },
        SessionLogRow {
            id: 2,
            user: john,
            login_time: at("2024-01-16T09:30:00Z"),
            logout_time: at("2024-01-16T18:00:00Z"),
        },
    ]
}

pub fn zone_tracking() -> Vec<SessionLogRow> {
    vec![
        SessionLogRow {
            id: 1,
            user: located(
                employee(1, "john_doe", ("John", "Doe"), "1234567890", "EMP001"),
                "123 Main St",
                "IT",
            ),
            login_time: at("2024-01-15T10:00:00Z"),
            logout_time: at("2024-01-15T11:00:00Z"),
        },
        SessionLogRow {
            id: 2,
            user: located(
                employee(2, "jane_smith", ("Jane", "Smith"), "0987654321", "EMP002"),
                "456 Oak Ave",
                "HR",
            ),
            login_time: at("2024-01-15T14:00:00Z"),
            logout_time: at("2024-01-15T15:30:00Z"),
        },
    ]
}

pub fn key_assignments() -> Vec<KeyAssignmentRow> {
    vec![
        KeyAssignmentRow {
            id: 1,
            image: PLACEHOLDER_IMAGE.to_string(),
            key: "RFID-KEY-001".to_string(),
            visitor_name: "Alice Johnson".to_string(),
            visitor_type: "Contractor".to_string(),
            contact: "555-0123".to_string(),
            visiting_purpose: "Maintenance Work".to_string(),
            whom_to_visit: "IT Department".to_string(),
            visiting_department: "IT".to_string(),
            valid_until: at("2024-01-20T17:00:00Z"),
        },
        KeyAssignmentRow {
            id: 2,
            image: PLACEHOLDER_IMAGE.to_string(),
            key: "RFID-KEY-001".to_string(),
            visitor_name: "Bob Wilson".to_string(),
            visitor_type: "Delivery".to_string(),
            contact: "555-0456".to_string(),
            visiting_purpose: "Package Delivery".to_string(),
            whom_to_visit: "Reception".to_string(),
            visiting_department: "Admin".to_string(),
            valid_until: at("2024-01-18T12:00:00Z"),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_timestamps_parse() {
        let epoch = DateTime::<Utc>::default();
        assert!(visitors().iter().all(|v| v.created_on != epoch));
        assert!(passes().iter().all(|p| p.valid_until != epoch));
        assert!(user_sessions().iter().all(|s| s.logout_time != epoch));
        assert!(key_assignments().iter().all(|k| k.valid_until != epoch));
    }

    #[test]
    fn test_seed_usernames_unique() {
        let users = users();
        let names: HashSet<_> = users.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names.len(), users.len());
    }

    #[test]
    fn test_seed_passes_have_valid_windows() {
        assert!(passes().iter().all(|p| p.valid_from <= p.valid_until));
    }
}
