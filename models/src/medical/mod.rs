// models/src/medical/mod.rs

pub mod prescription;

pub use prescription::{NewPrescription, Prescription, PrescriptionStatus, DEFAULT_REFILLS};
