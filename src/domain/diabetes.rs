//! Diabetes prediction input.
//!
//! Based on the Pima Indians Diabetes dataset features.

use serde::{Deserialize, Serialize};

use super::fields::{expect_len, FieldSpec, PredictionInput};
use super::Disease;

/// Request body for `POST /predict/diabetes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DiabetesInput {
    /// Number of pregnancies
    pub pregnancies: f64,
    /// Plasma glucose concentration (mg/dL)
    pub glucose: f64,
    /// Diastolic blood pressure (mmHg)
    pub blood_pressure: f64,
    /// Triceps skin fold thickness (mm)
    pub skin_thickness: f64,
    /// 2-hour serum insulin (μU/mL)
    pub insulin: f64,
    /// Body mass index (kg/m²)
    pub bmi: f64,
    /// Family history score
    pub diabetes_pedigree_function: f64,
    /// Age in years
    pub age: f64,
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::non_negative("pregnancies", "Pregnancies", "Pregnancies is required", "count"),
    FieldSpec::non_negative("glucose", "Glucose Level", "Glucose level is required", "mg/dL"),
    FieldSpec::non_negative("bloodPressure", "Blood Pressure", "Blood pressure is required", "mmHg"),
    FieldSpec::non_negative("skinThickness", "Skin Thickness", "Skin thickness is required", "mm"),
    FieldSpec::non_negative("insulin", "Insulin Level", "Insulin level is required", "μU/mL"),
    FieldSpec::non_negative("bmi", "BMI", "BMI is required", "kg/m²"),
    FieldSpec::non_negative(
        "diabetesPedigreeFunction",
        "Diabetes Pedigree Function",
        "Diabetes pedigree function is required",
        "e.g. 0.5",
    ),
    FieldSpec::non_negative("age", "Age", "Age is required", "years"),
];

impl PredictionInput for DiabetesInput {
    const DISEASE: Disease = Disease::Diabetes;
    const FIELDS: &'static [FieldSpec] = FIELDS;

    fn from_values(v: &[f64]) -> Result<Self, String> {
        expect_len(v, FIELDS.len())?;
        Ok(Self {
            pregnancies: v[0],
            glucose: v[1],
            blood_pressure: v[2],
            skin_thickness: v[3],
            insulin: v[4],
            bmi: v[5],
            diabetes_pedigree_function: v[6],
            age: v[7],
        })
    }

    fn to_values(&self) -> Vec<f64> {
        vec![
            self.pregnancies,
            self.glucose,
            self.blood_pressure,
            self.skin_thickness,
            self.insulin,
            self.bmi,
            self.diabetes_pedigree_function,
            self.age,
        ]
    }

    fn sample() -> Self {
        Self {
            pregnancies: 4.0,
            glucose: 110.0,
            blood_pressure: 92.0,
            skin_thickness: 0.0,
            insulin: 0.0,
            bmi: 37.6,
            diabetes_pedigree_function: 0.191,
            age: 30.0,
        }
    }
}
