//! Access key model
//!
//! Keys carry no timestamps; they are inventory items handed to visitors.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum KeyStatus {
    #[default]
    Available,
    Assigned,
    Lost,
}

impl KeyStatus {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "available" => Some(KeyStatus::Available),
            "assigned" => Some(KeyStatus::Assigned),
            "lost" => Some(KeyStatus::Lost),
            _ => None,
        }
    }
}

/// A physical access key (RFID card, fob)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessKey {
    pub id: u64,
    pub key_number: String,
    pub key_type: String,
    pub zone_id: Option<u64>,
    pub status: KeyStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAccessKey {
    pub key_number: String,
    pub key_type: String,
    #[serde(default)]
    pub zone_id: Option<u64>,
    #[serde(default)]
    pub status: KeyStatus,
}

impl NewAccessKey {
    pub(crate) fn into_key(self, id: u64) -> AccessKey {
        AccessKey {
            id,
            key_number: self.key_number,
            key_type: self.key_type,
            zone_id: self.zone_id,
            status: self.status,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccessKeyPatch {
    pub key_number: Option<String>,
    pub key_type: Option<String>,
    #[serde(default, deserialize_with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<Option<u64>>,
    pub status: Option<KeyStatus>,
}

impl AccessKeyPatch {
    pub(crate) fn apply(self, key: &mut AccessKey) {
        if let Some(key_number) = self.key_number {
            key.key_number = key_number;
        }
        if let Some(key_type) = self.key_type {
            key.key_type = key_type;
        }
        if let Some(zone_id) = self.zone_id {
            key.zone_id = zone_id;
        }
        if let Some(status) = self.status {
            key.status = status;
        }
    }
}
