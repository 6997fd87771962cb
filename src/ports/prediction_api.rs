//! Prediction API port: Trait for the remote prediction service.
//!
//! This trait abstracts the HTTP backend from the submission logic so the
//! state machine can be driven by a scripted implementation in tests.

use crate::domain::{Disease, HealthStatus, PredictionResult};

/// How a failed call should be treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Transport error, non-success status, or no response at all.
    RequestFailed,
    /// A success status whose body did not match the expected shape.
    MalformedResponse,
}

/// Error type for prediction service calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Request to {endpoint} failed: {reason}")]
    Transport { endpoint: String, reason: String },

    #[error("{endpoint} responded with HTTP {status}{}", detail_suffix(.detail))]
    Status {
        endpoint: String,
        status: u16,
        /// `error` field of the backend's JSON error body, if any
        detail: Option<String>,
    },

    #[error("Malformed response from {endpoint}: {reason}")]
    MalformedResponse { endpoint: String, reason: String },

    #[error("Could not encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Worker exited before the call completed")]
    WorkerLost,
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_ref()
        .map(|d| format!(" ({d})"))
        .unwrap_or_default()
}

impl ApiError {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::MalformedResponse { .. } => FailureKind::MalformedResponse,
            _ => FailureKind::RequestFailed,
        }
    }
}

/// Trait for the remote prediction service.
///
/// Implementations make exactly one attempt per call: no retry, no caching.
pub trait PredictionApi: Send + Sync {
    /// Base URL requests are issued against (no trailing `/`).
    fn base_url(&self) -> &str;

    /// Post `payload` as the whole JSON body to `/predict/{disease}`.
    ///
    /// # Errors
    /// Returns error on transport failure, non-success status, or a body
    /// that is not a `PredictionResult`.
    fn predict(
        &self,
        disease: Disease,
        payload: &serde_json::Value,
    ) -> Result<PredictionResult, ApiError>;

    /// Liveness probe (`GET /health`).
    ///
    /// # Errors
    /// Same failure modes as `predict`.
    fn health_check(&self) -> Result<HealthStatus, ApiError>;
}
