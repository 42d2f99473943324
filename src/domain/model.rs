use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_X_SHIFT: f64 = 0.0;
pub const DEFAULT_STEEPNESS: f64 = 1.0;

/// Shift and steepness of `f(x) = 1 / (1 + e^(-k(x - x0)))`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SigmoidParameters {
    pub x_shift: f64,
    pub steepness: f64,
}

impl Default for SigmoidParameters {
    fn default() -> Self {
        Self {
            x_shift: DEFAULT_X_SHIFT,
            steepness: DEFAULT_STEEPNESS,
        }
    }
}

impl fmt::Display for SigmoidParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sigmoid(x_shift={}, steepness={})",
            self.x_shift, self.steepness
        )
    }
}

/// Persisted parameter row. Ids and timestamps belong to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterRecord {
    pub id: u64,
    pub x_shift: f64,
    pub steepness: f64,
    pub created_at: DateTime<Utc>,
}

impl ParameterRecord {
    pub fn parameters(&self) -> SigmoidParameters {
        SigmoidParameters {
            x_shift: self.x_shift,
            steepness: self.steepness,
        }
    }
}

impl fmt::Display for ParameterRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.parameters(), f)
    }
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterPatch {
    #[serde(default)]
    pub x_shift: Option<f64>,
    #[serde(default)]
    pub steepness: Option<f64>,
}

impl ParameterPatch {
    pub fn apply(&self, record: &mut ParameterRecord) {
        if let Some(x_shift) = self.x_shift {
            record.x_shift = x_shift;
        }
        if let Some(steepness) = self.steepness {
            record.steepness = steepness;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SyntheticPoint {
    pub x1: f64,
    pub x2: f64,
    #[serde(rename = "class")]
    pub true_class: u8,
    pub radius: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionPoint {
    pub radius: f64,
    pub probability: f64,
    pub predicted_class: u8,
}

/// Output of one run of the ring-classification demo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeparabilityReport {
    pub decision_boundary: f64,
    pub steepness: f64,
    pub accuracy: f64,
    pub seed: u64,
    #[serde(rename = "original_data")]
    pub points: Vec<SyntheticPoint>,
    pub predictions: Vec<PredictionPoint>,
}
