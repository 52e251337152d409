//! Visitor model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered visitor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visitor {
    pub id: u64,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
    pub gov_id_no: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub visitor_type: String,
    #[serde(rename = "createdOn")]
    pub created_on: DateTime<Utc>,
    #[serde(rename = "updatedOn")]
    pub updated_on: DateTime<Utc>,
}

impl Visitor {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Payload for registering a visitor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewVisitor {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub gov_id_no: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    pub visitor_type: String,
}

impl NewVisitor {
    pub(crate) fn into_visitor(self, id: u64, now: DateTime<Utc>) -> Visitor {
        Visitor {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            phone_number: self.phone_number,
            gov_id_no: self.gov_id_no,
            email: self.email,
            address: self.address,
            visitor_type: self.visitor_type,
            created_on: now,
            updated_on: now,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VisitorPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub gov_id_no: Option<String>,
    #[serde(default, deserialize_with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub address: Option<Option<String>>,
    pub visitor_type: Option<String>,
}

impl VisitorPatch {
    pub(crate) fn apply(self, visitor: &mut Visitor) {
        if let Some(first_name) = self.first_name {
            visitor.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            visitor.last_name = last_name;
        }
        if let Some(phone_number) = self.phone_number {
            visitor.phone_number = phone_number;
        }
        if let Some(gov_id_no) = self.gov_id_no {
            visitor.gov_id_no = gov_id_no;
        }
        if let Some(email) = self.email {
            visitor.email = email;
        }
        if let Some(address) = self.address {
            visitor.address = address;
        }
        if let Some(visitor_type) = self.visitor_type {
            visitor.visitor_type = visitor_type;
        }
    }
}
