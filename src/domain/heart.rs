//! Heart disease prediction input.
//!
//! Based on the UCI (Cleveland) heart disease dataset. Several features are
//! categorical codes and are held as small integers.

use serde::{Deserialize, Serialize};

use super::fields::{check_values, expect_len, FieldSpec, PredictionInput};
use super::Disease;

/// Request body for `POST /predict/heart`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HeartDiseaseInput {
    /// Age in years
    pub age: f64,
    /// 0 = female, 1 = male
    pub sex: u8,
    /// Chest pain type (0-3)
    pub cp: u8,
    /// Resting blood pressure (mmHg)
    pub trestbps: f64,
    /// Serum cholesterol (mg/dL)
    pub chol: f64,
    /// Fasting blood sugar > 120 mg/dL
    pub fbs: u8,
    /// Resting ECG result (0-2)
    pub restecg: u8,
    /// Maximum heart rate achieved
    pub thalach: f64,
    /// Exercise induced angina
    pub exang: u8,
    /// ST depression induced by exercise
    pub oldpeak: f64,
    /// Slope of peak exercise ST segment (0-2)
    pub slope: u8,
    /// Number of major vessels colored by fluoroscopy (0-3)
    pub ca: u8,
    /// Thalassemia (0-2)
    pub thal: u8,
}

const BINARY: &[u8] = &[0, 1];
const TERNARY: &[u8] = &[0, 1, 2];
const QUATERNARY: &[u8] = &[0, 1, 2, 3];

const FIELDS: &[FieldSpec] = &[
    FieldSpec::non_negative("age", "Age", "Age is required", "years"),
    FieldSpec::one_of("sex", "Sex", "Sex is required", "0=female 1=male", BINARY),
    FieldSpec::one_of(
        "cp",
        "Chest Pain Type",
        "Chest pain type is required",
        "0=typical 1=atypical 2=non-anginal 3=asymptomatic",
        QUATERNARY,
    ),
    FieldSpec::non_negative(
        "trestbps",
        "Resting Blood Pressure",
        "Resting blood pressure is required",
        "mmHg",
    ),
    FieldSpec::non_negative("chol", "Cholesterol", "Cholesterol is required", "mg/dL"),
    FieldSpec::one_of(
        "fbs",
        "Fasting Blood Sugar",
        "Fasting blood sugar is required",
        "0=<120 1=>120 mg/dL",
        BINARY,
    ),
    FieldSpec::one_of(
        "restecg",
        "Resting ECG",
        "Resting ECG is required",
        "0=normal 1=ST-T 2=LVH",
        TERNARY,
    ),
    FieldSpec::non_negative("thalach", "Max Heart Rate", "Max heart rate is required", "bpm"),
    FieldSpec::one_of(
        "exang",
        "Exercise Angina",
        "Exercise induced angina is required",
        "0=no 1=yes",
        BINARY,
    ),
    FieldSpec::non_negative("oldpeak", "ST Depression", "ST depression is required", "oldpeak"),
    FieldSpec::one_of(
        "slope",
        "ST Slope",
        "Slope is required",
        "0=up 1=flat 2=down",
        TERNARY,
    ),
    FieldSpec::one_of(
        "ca",
        "Major Vessels",
        "Number of major vessels is required",
        "0-3",
        QUATERNARY,
    ),
    FieldSpec::one_of(
        "thal",
        "Thalassemia",
        "Thalassemia is required",
        "0=normal 1=fixed 2=reversible",
        TERNARY,
    ),
];

impl PredictionInput for HeartDiseaseInput {
    const DISEASE: Disease = Disease::Heart;
    const FIELDS: &'static [FieldSpec] = FIELDS;

    /// Rejects values outside their field rules before the categorical
    /// codes are narrowed to `u8`, so a fractional or NaN code never
    /// becomes a valid category.
    fn from_values(v: &[f64]) -> Result<Self, String> {
        expect_len(v, FIELDS.len())?;
        check_values(FIELDS, v).map_err(|errors| {
            errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ")
        })?;
        Ok(Self {
            age: v[0],
            sex: v[1] as u8,
            cp: v[2] as u8,
            trestbps: v[3],
            chol: v[4],
            fbs: v[5] as u8,
            restecg: v[6] as u8,
            thalach: v[7],
            exang: v[8] as u8,
            oldpeak: v[9],
            slope: v[10] as u8,
            ca: v[11] as u8,
            thal: v[12] as u8,
        })
    }

    fn to_values(&self) -> Vec<f64> {
        vec![
            self.age,
            f64::from(self.sex),
            f64::from(self.cp),
            self.trestbps,
            self.chol,
            f64::from(self.fbs),
            f64::from(self.restecg),
            self.thalach,
            f64::from(self.exang),
            self.oldpeak,
            f64::from(self.slope),
            f64::from(self.ca),
            f64::from(self.thal),
        ]
    }

    fn sample() -> Self {
        Self {
            age: 57.0,
            sex: 1,
            cp: 0,
            trestbps: 140.0,
            chol: 192.0,
            fbs: 0,
            restecg: 1,
            thalach: 148.0,
            exang: 0,
            oldpeak: 0.4,
            slope: 1,
            ca: 0,
            thal: 1,
        }
    }
}
