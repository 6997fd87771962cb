//! Prediction result types.
//!
//! Represents the response of the remote prediction service. The client never
//! computes these values; it only reads and displays them.

use serde::{Deserialize, Serialize};

/// Risk level classification assigned by the backend.
///
/// Deserializes from any string so an unexpected value is carried through
/// to presentation rather than failing the whole response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RiskLevel {
    /// Low risk
    Low,
    /// Moderate risk, monitoring recommended
    Medium,
    /// High risk, consultation recommended
    High,
    /// Any value outside the known set, kept verbatim
    Unrecognized(String),
}

impl RiskLevel {
    /// Wire representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Unrecognized(raw) => raw,
        }
    }

    /// Whether the value is one of `low`, `medium`, `high`.
    #[must_use]
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl From<String> for RiskLevel {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "low" => Self::Low,
            "medium" => Self::Medium,
            "high" => Self::High,
            _ => Self::Unrecognized(raw),
        }
    }
}

impl From<RiskLevel> for String {
    fn from(level: RiskLevel) -> Self {
        match level {
            RiskLevel::Unrecognized(raw) => raw,
            other => other.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response of `POST /predict/{disease}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    /// Binary prediction (0 = absent, 1 = present)
    pub prediction: u8,

    /// Model certainty, nominally 0.0 to 1.0 (not clamped)
    pub confidence: f64,

    /// Backend-authored explanation
    pub message: String,

    /// Authoritative risk classification
    pub risk_level: RiskLevel,
}

impl PredictionResult {
    /// Whether the backend reported the condition as present.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.prediction == 1
    }
}

/// Response of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
}
