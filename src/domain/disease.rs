//! Disease tags and their endpoint routing.

use serde::{Deserialize, Serialize};

/// One of the three conditions the prediction backend can score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Disease {
    Diabetes,
    Heart,
    Parkinsons,
}

impl Disease {
    /// All diseases in menu order.
    pub const ALL: [Disease; 3] = [Self::Diabetes, Self::Heart, Self::Parkinsons];

    /// Path segment under `/predict/`.
    #[must_use]
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Diabetes => "diabetes",
            Self::Heart => "heart",
            Self::Parkinsons => "parkinsons",
        }
    }

    /// Inverse of [`Disease::slug`].
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.slug() == slug)
    }

    /// Human-readable name.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Diabetes => "Diabetes",
            Self::Heart => "Heart Disease",
            Self::Parkinsons => "Parkinson's Disease",
        }
    }

    /// Short description shown on the dashboard.
    #[must_use]
    pub fn tagline(&self) -> &'static str {
        match self {
            Self::Diabetes => "Glucose, BMI, insulin and family history",
            Self::Heart => "Chest pain, ECG, cholesterol and exercise response",
            Self::Parkinsons => "Voice jitter, shimmer and nonlinear measures",
        }
    }

    /// Accent color used for the confidence bar (RGB).
    #[must_use]
    pub fn accent(&self) -> (u8, u8, u8) {
        match self {
            Self::Diabetes => (37, 99, 235),    // Blue (#2563EB)
            Self::Heart => (220, 38, 38),       // Red (#DC2626)
            Self::Parkinsons => (147, 51, 234), // Purple (#9333EA)
        }
    }
}

impl std::fmt::Display for Disease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}
