//! Domain layer: Core business types.
//!
//! Pure data definitions for the three prediction forms and the backend's
//! response. Nothing here performs I/O.

mod diabetes;
mod disease;
pub mod fields;
mod heart;
mod parkinsons;
mod prediction;

pub use diabetes::DiabetesInput;
pub use disease::Disease;
pub use fields::{FieldConstraint, FieldError, FieldSpec, PredictionInput};
pub use heart::HeartDiseaseInput;
pub use parkinsons::ParkinsonsInput;
pub use prediction::{HealthStatus, PredictionResult, RiskLevel};

/// Field table for a disease, for callers that only hold the tag.
#[must_use]
pub fn fields_for(disease: Disease) -> &'static [FieldSpec] {
    match disease {
        Disease::Diabetes => DiabetesInput::FIELDS,
        Disease::Heart => HeartDiseaseInput::FIELDS,
        Disease::Parkinsons => ParkinsonsInput::FIELDS,
    }
}

/// Reference-dataset sample values for a disease, in field order.
#[must_use]
pub fn sample_values(disease: Disease) -> Vec<f64> {
    match disease {
        Disease::Diabetes => DiabetesInput::sample().to_values(),
        Disease::Heart => HeartDiseaseInput::sample().to_values(),
        Disease::Parkinsons => ParkinsonsInput::sample().to_values(),
    }
}
