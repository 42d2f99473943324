use crate::core::sampler::{SamplerDefaults, SigmoidSampler};
use crate::core::separability::{DemoConfig, RadialSeparabilityDemo};
use crate::domain::model::{
    ParameterPatch, ParameterRecord, SamplePoint, SeparabilityReport, SigmoidParameters,
};
use crate::domain::ports::ParameterStore;
use crate::utils::error::{Result, SigmoidError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Range and resolution used when replaying stored parameters.
pub const STORED_RANGE: (f64, f64) = (-10.0, 10.0);
pub const STORED_NUM_POINTS: usize = 100;

pub const SEPARABILITY_EXPLANATION: &str = "Nonlinear separability demo: ring-shaped classes \
become separable after a radial transform (distance to origin) followed by a sigmoid decision \
function. Points come from a seeded StdRng stream; results repeat exactly for the same seed but \
do not match NumPy's random sequence.";

/// Calculation request; omitted fields take the configured defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_shift: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steepness: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_range_start: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_range_end: Option<f64>,
    /// Signed so that negative counts reach validation instead of failing to parse.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_points: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatedParameters {
    pub id: u64,
    pub x_shift: f64,
    pub steepness: f64,
    pub x_range: [f64; 2],
    pub num_points: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calculation {
    pub parameters: CalculatedParameters,
    pub data: Vec<SamplePoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredParameters {
    pub id: u64,
    pub x_shift: f64,
    pub steepness: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredCurve {
    pub parameters: StoredParameters,
    pub data: Vec<SamplePoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeparabilityDemonstration {
    pub explanation: String,
    #[serde(flatten)]
    pub report: SeparabilityReport,
}

/// Orchestrates the parameter store and the pure computations.
pub struct SigmoidService {
    store: Arc<dyn ParameterStore>,
    sampler_defaults: SamplerDefaults,
    demo_config: DemoConfig,
}

impl SigmoidService {
    pub fn new(store: Arc<dyn ParameterStore>) -> Self {
        Self {
            store,
            sampler_defaults: SamplerDefaults::default(),
            demo_config: DemoConfig::default(),
        }
    }

    pub fn with_sampler_defaults(mut self, defaults: SamplerDefaults) -> Self {
        self.sampler_defaults = defaults;
        self
    }

    pub fn with_demo_config(mut self, config: DemoConfig) -> Self {
        self.demo_config = config;
        self
    }

    /// Samples the curve, then stores the shift/steepness that were used.
    pub async fn calculate(&self, request: SampleRequest) -> Result<Calculation> {
        let defaults = &self.sampler_defaults;
        let x_shift = request.x_shift.unwrap_or(defaults.x_shift);
        let steepness = request.steepness.unwrap_or(defaults.steepness);
        let x_range_start = request.x_range_start.unwrap_or(defaults.x_range_start);
        let x_range_end = request.x_range_end.unwrap_or(defaults.x_range_end);
        let num_points = match request.num_points {
            None => defaults.num_points,
            Some(n) if n >= 1 => usize::try_from(n)
                .ok()
                .filter(|n| *n <= defaults.max_num_points)
                .ok_or_else(|| {
                    SigmoidError::invalid_argument(format!(
                        "num_points must be at most {}, got {}",
                        defaults.max_num_points, n
                    ))
                })?,
            Some(n) => {
                return Err(SigmoidError::invalid_argument(format!(
                    "num_points must be a positive integer, got {}",
                    n
                )))
            }
        };

        let data =
            SigmoidSampler::sample(x_shift, steepness, x_range_start, x_range_end, num_points)?;

        let record = self
            .store
            .create(SigmoidParameters { x_shift, steepness })
            .await?;

        tracing::info!(
            "🧮 Calculated {} points for {} (id={})",
            data.len(),
            record,
            record.id
        );

        Ok(Calculation {
            parameters: CalculatedParameters {
                id: record.id,
                x_shift,
                steepness,
                x_range: [x_range_start, x_range_end],
                num_points,
            },
            data,
        })
    }

    /// Replays stored parameters over the fixed [-10, 10] grid.
    pub async fn sigmoid_data(&self, id: u64) -> Result<StoredCurve> {
        let record = self.fetch(id).await?;
        let (start, end) = STORED_RANGE;
        let data = SigmoidSampler::sample(
            record.x_shift,
            record.steepness,
            start,
            end,
            STORED_NUM_POINTS,
        )?;

        Ok(StoredCurve {
            parameters: StoredParameters {
                id: record.id,
                x_shift: record.x_shift,
                steepness: record.steepness,
                created_at: record.created_at,
            },
            data,
        })
    }

    pub fn demonstrate(&self, seed: Option<u64>) -> Result<SeparabilityDemonstration> {
        let config = match seed {
            Some(seed) => self.demo_config.with_seed(seed),
            None => self.demo_config,
        };
        let report = RadialSeparabilityDemo::run(&config)?;

        tracing::info!(
            "🔵 Separability demo seed={} accuracy={:.3}",
            report.seed,
            report.accuracy
        );

        Ok(SeparabilityDemonstration {
            explanation: SEPARABILITY_EXPLANATION.to_string(),
            report,
        })
    }

    pub async fn list_parameters(&self) -> Result<Vec<ParameterRecord>> {
        self.store.list().await
    }

    pub async fn create_parameters(&self, patch: ParameterPatch) -> Result<ParameterRecord> {
        ensure_finite_patch(&patch)?;
        let defaults = SigmoidParameters::default();
        let record = self
            .store
            .create(SigmoidParameters {
                x_shift: patch.x_shift.unwrap_or(defaults.x_shift),
                steepness: patch.steepness.unwrap_or(defaults.steepness),
            })
            .await?;
        tracing::info!("➕ Created parameters {} (id={})", record, record.id);
        Ok(record)
    }

    pub async fn get_parameters(&self, id: u64) -> Result<ParameterRecord> {
        self.fetch(id).await
    }

    pub async fn update_parameters(&self, id: u64, patch: ParameterPatch) -> Result<ParameterRecord> {
        ensure_finite_patch(&patch)?;
        let record = self
            .store
            .update(id, patch)
            .await?
            .ok_or_else(|| SigmoidError::not_found("Parameters", id))?;
        tracing::info!("✏️ Updated parameters {} (id={})", record, record.id);
        Ok(record)
    }

    pub async fn delete_parameters(&self, id: u64) -> Result<()> {
        if !self.store.delete(id).await? {
            return Err(SigmoidError::not_found("Parameters", id));
        }
        tracing::info!("🗑️ Deleted parameters id={}", id);
        Ok(())
    }

    async fn fetch(&self, id: u64) -> Result<ParameterRecord> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| SigmoidError::not_found("Parameters", id))
    }
}

fn ensure_finite_patch(patch: &ParameterPatch) -> Result<()> {
    for (name, value) in [("x_shift", patch.x_shift), ("steepness", patch.steepness)] {
        if let Some(value) = value {
            if !value.is_finite() {
                return Err(SigmoidError::invalid_argument(format!(
                    "{} must be a finite number, got {}",
                    name, value
                )));
            }
        }
    }
    Ok(())
}
