//! Zone model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A physical area guarded by readers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewZone {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl NewZone {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            is_active: true,
        }
    }

    pub(crate) fn into_zone(self, id: u64, now: DateTime<Utc>) -> Zone {
        Zone {
            id,
            name: self.name,
            description: self.description,
            is_active: self.is_active,
            created_on: now,
            updated_on: now,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZonePatch {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    pub is_active: Option<bool>,
}

impl ZonePatch {
    pub(crate) fn apply(self, zone: &mut Zone) {
        if let Some(name) = self.name {
            zone.name = name;
        }
        if let Some(description) = self.description {
            zone.description = description;
        }
        if let Some(is_active) = self.is_active {
            zone.is_active = is_active;
        }
    }
}
