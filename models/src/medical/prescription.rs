// models/src/medical/prescription.rs

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{ValidationError, ValidationResult};
use crate::identifiers::{MemberId, PrescriptionId, ProviderId};
use crate::references::EntityReference;

/// Refill count every new prescription starts with.
pub const DEFAULT_REFILLS: i32 = 3;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Lifecycle status of a prescription. No transition table is enforced:
/// every mutation may move a prescription from any status to its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrescriptionStatus {
    Active,
    Expired,
    Cancelled,
    Completed,
}

impl PrescriptionStatus {
    pub const ALL: [PrescriptionStatus; 4] = [
        PrescriptionStatus::Active,
        PrescriptionStatus::Expired,
        PrescriptionStatus::Cancelled,
        PrescriptionStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PrescriptionStatus::Active => "ACTIVE",
            PrescriptionStatus::Expired => "EXPIRED",
            PrescriptionStatus::Cancelled => "CANCELLED",
            PrescriptionStatus::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for PrescriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrescriptionStatus {
    type Err = ValidationError;

    /// Accepts only the exact enum names; there is no case folding.
    fn from_str(s: &str) -> ValidationResult<Self> {
        PrescriptionStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidStatus(s.to_string()))
    }
}

/// The caller-controlled part of a new prescription, already parsed into
/// domain values. Status and refill count are deliberately absent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewPrescription {
    pub member_id: MemberId,
    pub provider_id: ProviderId,
    pub medication_name: String,
    pub dosage: String,
    pub frequency: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub pharmacy: Option<String>,
    pub notes: Option<String>,
}

impl NewPrescription {
    /// Parses an ISO-8601 calendar date (`YYYY-MM-DD`), naming `field` in the
    /// error when the value is malformed.
    pub fn parse_date(field: &'static str, value: &str) -> ValidationResult<NaiveDate> {
        NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| ValidationError::InvalidDate {
            field,
            value: value.to_string(),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prescription {
    pub id: PrescriptionId,
    pub member_id: MemberId,
    pub provider_id: ProviderId,
    pub medication_name: String,
    pub dosage: String,
    pub frequency: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub pharmacy: Option<String>,
    /// May go negative: refills are added without a sign check.
    pub refills_remaining: i32,
    pub status: PrescriptionStatus,
    pub notes: Option<String>,
}

impl Prescription {
    /// Builds a fresh prescription with a generated identifier.
    pub fn create(new: NewPrescription) -> Self {
        Self::create_with_id(PrescriptionId::new(), new)
    }

    /// Builds a prescription with the given identifier. The record always
    /// starts `ACTIVE` with [`DEFAULT_REFILLS`] refills.
    pub fn create_with_id(id: PrescriptionId, new: NewPrescription) -> Self {
        Prescription {
            id,
            member_id: new.member_id,
            provider_id: new.provider_id,
            medication_name: new.medication_name,
            dosage: new.dosage,
            frequency: new.frequency,
            start_date: new.start_date,
            end_date: new.end_date,
            pharmacy: new.pharmacy,
            refills_remaining: DEFAULT_REFILLS,
            status: PrescriptionStatus::Active,
            notes: new.notes,
        }
    }

    pub fn cancel(&mut self) {
        self.status = PrescriptionStatus::Cancelled;
    }

    /// Adds `additional` refills. Negative values are accepted and lower the
    /// count; the sum saturates at the `i32` bounds.
    pub fn add_refills(&mut self, additional: i32) {
        self.refills_remaining = self.refills_remaining.saturating_add(additional);
    }

    pub fn complete(&mut self) {
        self.status = PrescriptionStatus::Completed;
        self.refills_remaining = 0;
    }

    pub fn member_reference(&self) -> EntityReference {
        EntityReference::member(&self.member_id)
    }

    pub fn provider_reference(&self) -> EntityReference {
        EntityReference::provider(&self.provider_id)
    }
}
