//! Risk presentation: maps a prediction result to what the user sees.
//!
//! Pure functions only. The backend's `riskLevel` is taken as-is; nothing
//! here cross-checks it against `confidence` or `prediction`, and
//! confidence is not clamped.

use crate::domain::{Disease, PredictionResult, RiskLevel};

/// Semantic color of a display element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Affirmative,
    Cautionary,
    Danger,
    Neutral,
}

/// Icon shown next to the risk label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskIcon {
    Check,
    Alert,
    Activity,
}

impl RiskIcon {
    /// Terminal glyph.
    #[must_use]
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Check => "✓",
            Self::Alert => "!",
            Self::Activity => "~",
        }
    }
}

const RECOMMEND_CONSULT: &str = "Consult with a healthcare professional for proper evaluation";
const RECOMMEND_MAINTAIN: &str = "Continue maintaining a healthy lifestyle";
const RECOMMEND_CHECKUPS: &str = "Regular health check-ups are recommended";
const RECOMMEND_EDUCATIONAL: &str = "This prediction is for educational purposes only";

/// Everything needed to render one result card.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskPresentation {
    pub disease_name: &'static str,
    /// Confidence bar color (RGB)
    pub accent: (u8, u8, u8),
    pub risk_tone: Tone,
    pub icon: RiskIcon,
    /// e.g. "High Risk"
    pub risk_label: String,
    /// Raw level as sent by the backend
    pub risk_level: String,
    /// "Present" or "Not Present"
    pub prediction_label: &'static str,
    pub prediction_tone: Tone,
    /// `round(confidence * 100)`, may fall outside 0..=100
    pub confidence_percent: i64,
    /// Unclamped confidence
    pub confidence_ratio: f64,
    pub message: String,
    pub recommendations: [&'static str; 3],
}

/// Tone and icon for a risk level.
#[must_use]
pub fn risk_style(level: &RiskLevel) -> (Tone, RiskIcon) {
    match level {
        RiskLevel::Low => (Tone::Affirmative, RiskIcon::Check),
        RiskLevel::Medium => (Tone::Cautionary, RiskIcon::Alert),
        RiskLevel::High => (Tone::Danger, RiskIcon::Alert),
        RiskLevel::Unrecognized(_) => (Tone::Neutral, RiskIcon::Activity),
    }
}

/// Percent rounded half-up, matching how the value is printed.
#[must_use]
pub fn confidence_percent(confidence: f64) -> i64 {
    (confidence * 100.0 + 0.5).floor() as i64
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Build the presentation for a result of the given disease form.
#[must_use]
pub fn present(disease: Disease, result: &PredictionResult) -> RiskPresentation {
    let (risk_tone, icon) = risk_style(&result.risk_level);

    let (prediction_label, prediction_tone, first_recommendation) = if result.is_positive() {
        ("Present", Tone::Danger, RECOMMEND_CONSULT)
    } else {
        ("Not Present", Tone::Affirmative, RECOMMEND_MAINTAIN)
    };

    RiskPresentation {
        disease_name: disease.display_name(),
        accent: disease.accent(),
        risk_tone,
        icon,
        risk_label: format!("{} Risk", capitalize(result.risk_level.as_str())),
        risk_level: result.risk_level.to_string(),
        prediction_label,
        prediction_tone,
        confidence_percent: confidence_percent(result.confidence),
        confidence_ratio: result.confidence,
        message: result.message.clone(),
        recommendations: [
            first_recommendation,
            RECOMMEND_CHECKUPS,
            RECOMMEND_EDUCATIONAL,
        ],
    }
}
