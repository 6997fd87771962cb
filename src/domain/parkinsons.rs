//! Parkinson's disease prediction input.
//!
//! 22 biomedical voice measures from the Oxford Parkinson's Disease
//! Detection dataset (name and status columns excluded).

use serde::{Deserialize, Serialize};

use super::fields::{expect_len, FieldSpec, PredictionInput};
use super::Disease;

/// Request body for `POST /predict/parkinsons`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkinsonsInput {
    /// MDVP:Fo(Hz), average vocal fundamental frequency
    pub mdvp_fo: f64,
    /// MDVP:Fhi(Hz), maximum vocal fundamental frequency
    pub mdvp_fhi: f64,
    /// MDVP:Flo(Hz), minimum vocal fundamental frequency
    pub mdvp_flo: f64,
    /// MDVP:Jitter(%)
    pub mdvp_jitter: f64,
    /// MDVP:Jitter(Abs)
    pub mdvp_jitter_abs: f64,
    /// MDVP:RAP
    pub mdvp_rap: f64,
    /// MDVP:PPQ
    pub mdvp_ppq: f64,
    /// Jitter:DDP
    pub jitter_ddp: f64,
    /// MDVP:Shimmer
    pub mdvp_shimmer: f64,
    /// MDVP:Shimmer(dB)
    pub mdvp_shimmer_db: f64,
    /// Shimmer:APQ3
    pub shimmer_apq3: f64,
    /// Shimmer:APQ5
    pub shimmer_apq5: f64,
    /// MDVP:APQ
    pub mdvp_apq: f64,
    /// Shimmer:DDA
    pub shimmer_dda: f64,
    /// Noise-to-harmonics ratio
    pub nhr: f64,
    /// Harmonics-to-noise ratio
    pub hnr: f64,
    /// Recurrence period density entropy
    pub rpde: f64,
    /// Detrended fluctuation analysis
    pub dfa: f64,
    /// Nonlinear fundamental frequency variation (may be negative)
    pub spread1: f64,
    /// Nonlinear fundamental frequency variation (may be negative)
    pub spread2: f64,
    /// Correlation dimension
    pub d2: f64,
    /// Pitch period entropy
    pub ppe: f64,
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::non_negative("mdvpFo", "MDVP:Fo(Hz)", "MDVP:Fo is required", "fundamental frequency"),
    FieldSpec::non_negative("mdvpFhi", "MDVP:Fhi(Hz)", "MDVP:Fhi is required", "highest frequency"),
    FieldSpec::non_negative("mdvpFlo", "MDVP:Flo(Hz)", "MDVP:Flo is required", "lowest frequency"),
    FieldSpec::non_negative("mdvpJitter", "MDVP:Jitter(%)", "MDVP:Jitter is required", "jitter %"),
    FieldSpec::non_negative(
        "mdvpJitterAbs",
        "MDVP:Jitter(Abs)",
        "MDVP:Jitter(Abs) is required",
        "absolute jitter",
    ),
    FieldSpec::non_negative("mdvpRap", "MDVP:RAP", "MDVP:RAP is required", "RAP"),
    FieldSpec::non_negative("mdvpPpq", "MDVP:PPQ", "MDVP:PPQ is required", "PPQ"),
    FieldSpec::non_negative("jitterDdp", "Jitter:DDP", "Jitter:DDP is required", "DDP"),
    FieldSpec::non_negative("mdvpShimmer", "MDVP:Shimmer", "MDVP:Shimmer is required", "shimmer"),
    FieldSpec::non_negative(
        "mdvpShimmerDb",
        "MDVP:Shimmer(dB)",
        "MDVP:Shimmer(dB) is required",
        "dB",
    ),
    FieldSpec::non_negative("shimmerApq3", "Shimmer:APQ3", "Shimmer:APQ3 is required", "APQ3"),
    FieldSpec::non_negative("shimmerApq5", "Shimmer:APQ5", "Shimmer:APQ5 is required", "APQ5"),
    FieldSpec::non_negative("mdvpApq", "MDVP:APQ", "MDVP:APQ is required", "APQ"),
    FieldSpec::non_negative("shimmerDda", "Shimmer:DDA", "Shimmer:DDA is required", "DDA"),
    FieldSpec::non_negative("nhr", "NHR", "NHR is required", "noise/harmonics"),
    FieldSpec::non_negative("hnr", "HNR", "HNR is required", "harmonics/noise"),
    FieldSpec::non_negative("rpde", "RPDE", "RPDE is required", "density entropy"),
    FieldSpec::non_negative("dfa", "DFA", "DFA is required", "fractal scaling"),
    FieldSpec::unbounded("spread1", "Spread1", "Spread1 is required", "may be negative"),
    FieldSpec::unbounded("spread2", "Spread2", "Spread2 is required", "may be negative"),
    FieldSpec::non_negative("d2", "D2", "D2 is required", "correlation dimension"),
    FieldSpec::non_negative("ppe", "PPE", "PPE is required", "pitch period entropy"),
];

impl PredictionInput for ParkinsonsInput {
    const DISEASE: Disease = Disease::Parkinsons;
    const FIELDS: &'static [FieldSpec] = FIELDS;

    fn from_values(v: &[f64]) -> Result<Self, String> {
        expect_len(v, FIELDS.len())?;
        Ok(Self {
            mdvp_fo: v[0],
            mdvp_fhi: v[1],
            mdvp_flo: v[2],
            mdvp_jitter: v[3],
            mdvp_jitter_abs: v[4],
            mdvp_rap: v[5],
            mdvp_ppq: v[6],
            jitter_ddp: v[7],
            mdvp_shimmer: v[8],
            mdvp_shimmer_db: v[9],
            shimmer_apq3: v[10],
            shimmer_apq5: v[11],
            mdvp_apq: v[12],
            shimmer_dda: v[13],
            nhr: v[14],
            hnr: v[15],
            rpde: v[16],
            dfa: v[17],
            spread1: v[18],
            spread2: v[19],
            d2: v[20],
            ppe: v[21],
        })
    }

    fn to_values(&self) -> Vec<f64> {
        vec![
            self.mdvp_fo,
            self.mdvp_fhi,
            self.mdvp_flo,
            self.mdvp_jitter,
            self.mdvp_jitter_abs,
            self.mdvp_rap,
            self.mdvp_ppq,
            self.jitter_ddp,
            self.mdvp_shimmer,
            self.mdvp_shimmer_db,
            self.shimmer_apq3,
            self.shimmer_apq5,
            self.mdvp_apq,
            self.shimmer_dda,
            self.nhr,
            self.hnr,
            self.rpde,
            self.dfa,
            self.spread1,
            self.spread2,
            self.d2,
            self.ppe,
        ]
    }

    fn sample() -> Self {
        Self {
            mdvp_fo: 119.992,
            mdvp_fhi: 157.302,
            mdvp_flo: 74.997,
            mdvp_jitter: 0.00784,
            mdvp_jitter_abs: 0.00007,
            mdvp_rap: 0.0037,
            mdvp_ppq: 0.00554,
            jitter_ddp: 0.01109,
            mdvp_shimmer: 0.04374,
            mdvp_shimmer_db: 0.426,
            shimmer_apq3: 0.02182,
            shimmer_apq5: 0.0313,
            mdvp_apq: 0.02971,
            shimmer_dda: 0.06545,
            nhr: 0.02211,
            hnr: 21.033,
            rpde: 0.414783,
            dfa: 0.815285,
            spread1: -4.813031,
            spread2: 0.266482,
            d2: 2.301442,
            ppe: 0.284654,
        }
    }
}
