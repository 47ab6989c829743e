// lib/src/storage_engine/storage_utils.rs

use bincode::config;
use bincode::serde::{decode_from_slice, encode_to_vec};
use models::errors::{PrescriptionError, PrescriptionResult};
use models::{Prescription, PrescriptionId};

/// Helper to serialize a Prescription to bytes using bincode.
pub fn serialize_prescription(prescription: &Prescription) -> PrescriptionResult<Vec<u8>> {
    encode_to_vec(prescription, config::standard())
        .map_err(|e| PrescriptionError::SerializationError(e.to_string()))
}

/// Helper to deserialize bytes to a Prescription using bincode.
pub fn deserialize_prescription(bytes: &[u8]) -> PrescriptionResult<Prescription> {
    decode_from_slice(bytes, config::standard())
        .map(|(val, _)| val) // decode_from_slice returns (value, bytes_read)
        .map_err(|e| PrescriptionError::DeserializationError(e.to_string()))
}

/// Storage key of a prescription: the 16 raw UUID bytes.
pub fn prescription_key(id: &PrescriptionId) -> [u8; 16] {
    *id.as_uuid().as_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use models::{NewPrescription, PrescriptionStatus};

    #[test]
    fn encoded_record_decodes_with_optional_fields_intact() {
        let mut prescription = Prescription::create(NewPrescription {
            member_id: "11111111-1111-1111-1111-111111111111".parse().unwrap(),
            provider_id: "22222222-2222-2222-2222-222222222222".parse().unwrap(),
            medication_name: "Amoxicillin".to_string(),
            dosage: "500mg".to_string(),
            frequency: "three times daily".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 10),
            pharmacy: None,
            notes: Some("Take with food".to_string()),
        });
        prescription.cancel();

        let bytes = serialize_prescription(&prescription).unwrap();
        let decoded = deserialize_prescription(&bytes).unwrap();
        assert_eq!(decoded, prescription);
        assert_eq!(decoded.status, PrescriptionStatus::Cancelled);
    }

    #[test]
    fn garbage_bytes_are_a_deserialization_error() {
        let err = deserialize_prescription(&[0xff, 0x00, 0x13]).unwrap_err();
        assert!(matches!(err, PrescriptionError::DeserializationError(_)));
    }

    #[test]
    fn key_is_the_raw_uuid() {
        let id = PrescriptionId::new();
        assert_eq!(&prescription_key(&id), id.as_uuid().as_bytes());
    }
}
