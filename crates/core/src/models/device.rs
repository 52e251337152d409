//! Reader hardware and guard assignments

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A card reader attached to an ADAM I/O module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reader {
    pub id: u64,
    pub adam_name: String,
    pub zone_name: String,
    pub moxa_ip: String,
    pub reader_type: String,
    pub com_port: String,
}

/// An ADAM I/O module driving door relays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adam {
    pub id: u64,
    pub name: String,
    pub ip: String,
    pub port: String,
    pub address: String,
}

/// Assignment of a security guard to a reader
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuardReaderMapping {
    pub id: u64,
    pub user_id: u64,
    pub reader_id: u64,
    pub created_on: DateTime<Utc>,
}

/// Form state of the "map guard" screen
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuardReaderMappingForm {
    pub user_id: Option<u64>,
    pub reader_id: Option<u64>,
}

impl GuardReaderMappingForm {
    /// Share of required fields filled in, as a percentage
    pub fn progress(&self) -> u8 {
        let filled = [self.user_id.is_some(), self.reader_id.is_some()]
            .iter()
            .filter(|f| **f)
            .count();
        (filled * 50) as u8
    }

    /// Returns the selected (user, reader) pair or the first missing field
    pub fn validate(&self) -> Result<(u64, u64)> {
        let user_id = self
            .user_id
            .ok_or_else(|| Error::Validation("User is required".into()))?;
        let reader_id = self
            .reader_id
            .ok_or_else(|| Error::Validation("Reader is required".into()))?;
        Ok((user_id, reader_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_progress() {
        let mut form = GuardReaderMappingForm::default();
        assert_eq!(form.progress(), 0);
        form.user_id = Some(3);
        assert_eq!(form.progress(), 50);
        form.reader_id = Some(1);
        assert_eq!(form.progress(), 100);
    }

    #[test]
    fn test_form_validation_messages() {
        let form = GuardReaderMappingForm::default();
        match form.validate() {
            Err(Error::Validation(msg)) => assert_eq!(msg, "User is required"),
            other => panic!("unexpected: {:?}", other),
        }

        let form = GuardReaderMappingForm {
            user_id: Some(1),
            reader_id: None,
        };
        match form.validate() {
            Err(Error::Validation(msg)) => assert_eq!(msg, "Reader is required"),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
