//! # MediPredict
//!
//! Terminal client for remote disease-risk prediction services.
//!
//! This crate provides:
//! - Typed request bodies for the diabetes, heart disease and Parkinson's
//!   prediction endpoints, with field-level validation
//! - An HTTP client for those endpoints plus a health probe
//! - A per-form submission state machine with injected notifications
//! - A pure mapping from a prediction result to its presentation
//! - Terminal UI for entering data and reading results
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types (input schemas, prediction result, disease tags)
//! - `ports`: Trait definitions for external operations
//! - `adapters`: Concrete implementations (HTTP via ureq, toast queue, log sanitizing)
//! - `application`: Submission controller, call worker, risk presenter
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use config::Config;
pub use domain::{Disease, HealthStatus, PredictionInput, PredictionResult, RiskLevel};

use adapters::HttpPredictionClient;
use ports::PredictionApi;

/// Result type for MediPredict operations
pub type Result<T> = std::result::Result<T, MediPredictError>;

/// Main error type for MediPredict
#[derive(Debug, thiserror::Error)]
pub enum MediPredictError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Prediction service error: {0}")]
    Api(#[from] ports::ApiError),

    #[error("Invalid form data: {0}")]
    Validation(String),
}

impl From<Vec<domain::FieldError>> for MediPredictError {
    fn from(errors: Vec<domain::FieldError>) -> Self {
        let joined: Vec<String> = errors.iter().map(ToString::to_string).collect();
        Self::Validation(joined.join(", "))
    }
}

/// Probe the configured backend once, blocking.
///
/// # Errors
/// Returns error if the backend is unreachable or answers unexpectedly.
pub fn probe_backend(config: &Config) -> Result<HealthStatus> {
    let client = HttpPredictionClient::new(&config.api);
    Ok(client.health_check()?)
}

/// Validate one record and submit it to the configured backend, blocking.
///
/// # Errors
/// Returns `Validation` before any request is made if a field is out of
/// its domain, otherwise any transport or response error.
pub fn predict_once<I: PredictionInput>(config: &Config, input: &I) -> Result<PredictionResult> {
    input.validate()?;
    let client = HttpPredictionClient::new(&config.api);
    Ok(client.predict_input(input)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HeartDiseaseInput;

    #[test]
    fn test_invalid_record_fails_before_request() {
        let mut config = Config::default();
        // Nothing listens here; a request would surface as Api, not Validation.
        config.api.base_url = "http://127.0.0.1:9/api".to_string();

        let input = HeartDiseaseInput {
            thal: 9,
            ..HeartDiseaseInput::sample()
        };
        let err = predict_once(&config, &input).expect_err("Should reject");
        assert!(matches!(err, MediPredictError::Validation(ref m) if m.starts_with("Thalassemia")));
    }
}
