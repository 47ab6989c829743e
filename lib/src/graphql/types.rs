// lib/src/graphql/types.rs

use std::str::FromStr;

use async_graphql::{Enum, InputObject, Object, ID};
use models::errors::{ValidationError, ValidationResult};
use models::{NewPrescription, Prescription};

use crate::graphql::federation::{Member, Provider};

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
#[graphql(name = "PrescriptionStatus", remote = "models::PrescriptionStatus")]
pub enum PrescriptionStatusValue {
    Active,
    Expired,
    Cancelled,
    Completed,
}

/// GraphQL view of a stored prescription.
#[derive(Clone, Debug, PartialEq)]
pub struct PrescriptionObject(pub Prescription);

impl From<Prescription> for PrescriptionObject {
    fn from(prescription: Prescription) -> Self {
        PrescriptionObject(prescription)
    }
}

#[Object(name = "Prescription")]
impl PrescriptionObject {
    async fn id(&self) -> ID {
        ID(self.0.id.to_string())
    }

    async fn member_id(&self) -> ID {
        ID(self.0.member_id.to_string())
    }

    async fn provider_id(&self) -> ID {
        ID(self.0.provider_id.to_string())
    }

    async fn medication_name(&self) -> &str {
        &self.0.medication_name
    }

    async fn dosage(&self) -> &str {
        &self.0.dosage
    }

    async fn frequency(&self) -> &str {
        &self.0.frequency
    }

    /// ISO-8601 date, `YYYY-MM-DD`.
    async fn start_date(&self) -> String {
        self.0.start_date.to_string()
    }

    async fn end_date(&self) -> Option<String> {
        self.0.end_date.map(|date| date.to_string())
    }

    async fn pharmacy(&self) -> Option<&str> {
        self.0.pharmacy.as_deref()
    }

    async fn refills_remaining(&self) -> i32 {
        self.0.refills_remaining
    }

    async fn status(&self) -> PrescriptionStatusValue {
        self.0.status.into()
    }

    async fn notes(&self) -> Option<&str> {
        self.0.notes.as_deref()
    }

    /// Reference to the member in the members subgraph.
    async fn member(&self) -> Member {
        self.0.member_reference().into()
    }

    /// Reference to the prescribing provider in the providers subgraph.
    async fn provider(&self) -> Provider {
        self.0.provider_reference().into()
    }
}

#[derive(InputObject, Clone, Debug)]
pub struct CreatePrescriptionInput {
    pub member_id: ID,
    pub provider_id: ID,
    pub medication_name: String,
    pub dosage: String,
    pub frequency: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub pharmacy: Option<String>,
    pub notes: Option<String>,
    /// Ignored: new prescriptions always start `ACTIVE`.
    pub status: Option<PrescriptionStatusValue>,
    /// Ignored: new prescriptions always start with 3 refills.
    pub refills_remaining: Option<i32>,
}

impl TryFrom<CreatePrescriptionInput> for NewPrescription {
    type Error = ValidationError;

    fn try_from(input: CreatePrescriptionInput) -> ValidationResult<Self> {
        Ok(NewPrescription {
            member_id: parse_id(&input.member_id)?,
            provider_id: parse_id(&input.provider_id)?,
            medication_name: input.medication_name,
            dosage: input.dosage,
            frequency: input.frequency,
            start_date: NewPrescription::parse_date("startDate", &input.start_date)?,
            end_date: input
                .end_date
                .as_deref()
                .map(|date| NewPrescription::parse_date("endDate", date))
                .transpose()?,
            pharmacy: input.pharmacy,
            notes: input.notes,
        })
    }
}

#[derive(InputObject, Clone, Debug)]
pub struct RefillPrescriptionInput {
    pub prescription_id: ID,
    /// Added as-is; negative values lower the remaining count.
    pub additional_refills: i32,
}

/// Parses a GraphQL `ID` into one of the UUID identifier types.
pub fn parse_id<T>(id: &ID) -> ValidationResult<T>
where
    T: FromStr<Err = ValidationError>,
{
    id.as_str().parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use models::{MemberId, PrescriptionId};

    fn input() -> CreatePrescriptionInput {
        CreatePrescriptionInput {
            member_id: ID::from("0b6a2f4e-3c1d-4e5f-8a9b-1c2d3e4f5a6b"),
            provider_id: ID::from("7d8e9f0a-1b2c-4d3e-9f4a-5b6c7d8e9f0a"),
            medication_name: "Lisinopril".to_string(),
            dosage: "10mg".to_string(),
            frequency: "daily".to_string(),
            start_date: "2024-03-01".to_string(),
            end_date: Some("2024-09-01".to_string()),
            pharmacy: Some("Main St Pharmacy".to_string()),
            notes: None,
            status: None,
            refills_remaining: None,
        }
    }

    #[test]
    fn create_input_converts_into_new_prescription() {
        let new = NewPrescription::try_from(input()).unwrap();
        assert_eq!(new.member_id.to_string(), "0b6a2f4e-3c1d-4e5f-8a9b-1c2d3e4f5a6b");
        assert_eq!(new.start_date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(new.end_date, NaiveDate::from_ymd_opt(2024, 9, 1));
        assert_eq!(new.pharmacy.as_deref(), Some("Main St Pharmacy"));
    }

    #[test]
    fn blank_text_and_lifecycle_fields_do_not_block_conversion() {
        let mut loose = input();
        loose.dosage = String::new();
        loose.status = Some(PrescriptionStatusValue::Cancelled);
        loose.refills_remaining = Some(10);
        let new = NewPrescription::try_from(loose).unwrap();
        assert_eq!(new.dosage, "");
    }

    #[test]
    fn malformed_fields_are_rejected() {
        let mut bad_member = input();
        bad_member.member_id = ID::from("member-1");
        assert_eq!(
            NewPrescription::try_from(bad_member).unwrap_err(),
            ValidationError::InvalidIdentifier { kind: "member", value: "member-1".to_string() }
        );

        let mut bad_end = input();
        bad_end.end_date = Some("September".to_string());
        assert!(matches!(
            NewPrescription::try_from(bad_end).unwrap_err(),
            ValidationError::InvalidDate { field: "endDate", .. }
        ));
    }

    #[test]
    fn parse_id_names_the_identifier_kind() {
        let err = parse_id::<PrescriptionId>(&ID::from("42")).unwrap_err();
        assert_eq!(err.to_string(), "invalid prescription identifier '42'");
        assert!(parse_id::<MemberId>(&ID::from("0b6a2f4e-3c1d-4e5f-8a9b-1c2d3e4f5a6b")).is_ok());
    }
}
