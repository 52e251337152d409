//! Visitor pass model

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A time-boxed pass granting a visitor entry to a zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pass {
    pub id: u64,
    pub visitor_id: u64,
    pub zone_id: u64,
    pub pass_type: String,
    pub valid_from: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
}

impl Pass {
    /// Whether the pass admits entry at `at`
    pub fn is_active_at(&self, at: DateTime<Utc>) -> bool {
        self.valid_from <= at && at <= self.valid_until
    }

    /// Remaining validity, or `None` once expired
    pub fn time_left(&self, at: DateTime<Utc>) -> Option<Duration> {
        (at <= self.valid_until).then(|| self.valid_until - at)
    }

    pub(crate) fn check_window(&self) -> Result<()> {
        check_window(self.valid_from, self.valid_until)
    }
}

fn check_window(from: DateTime<Utc>, until: DateTime<Utc>) -> Result<()> {
    if from > until {
        return Err(Error::Validation(
            "Pass validity must start before it ends".into(),
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPass {
    pub visitor_id: u64,
    pub zone_id: u64,
    pub pass_type: String,
    pub valid_from: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
}

impl NewPass {
    pub(crate) fn into_pass(self, id: u64, now: DateTime<Utc>) -> Result<Pass> {
        check_window(self.valid_from, self.valid_until)?;
        Ok(Pass {
            id,
            visitor_id: self.visitor_id,
            zone_id: self.zone_id,
            pass_type: self.pass_type,
            valid_from: self.valid_from,
            valid_until: self.valid_until,
            created_on: now,
            updated_on: now,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PassPatch {
    pub visitor_id: Option<u64>,
    pub zone_id: Option<u64>,
    pub pass_type: Option<String>,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_until: Option<DateTime<Utc>>,
}

impl PassPatch {
    pub(crate) fn apply(self, pass: &mut Pass) -> Result<()> {
        if let Some(visitor_id) = self.visitor_id {
            pass.visitor_id = visitor_id;
        }
        if let Some(zone_id) = self.zone_id {
            pass.zone_id = zone_id;
        }
        if let Some(pass_type) = self.pass_type {
            pass.pass_type = pass_type;
        }
        if let Some(valid_from) = self.valid_from {
            pass.valid_from = valid_from;
        }
        if let Some(valid_until) = self.valid_until {
            pass.valid_until = valid_until;
        }
        pass.check_window()
    }
}
