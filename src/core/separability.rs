//! Ring-shaped two-class data made separable by a radial transform.
//!
//! Class 0 sits on a ring around `inner_radius`, class 1 around
//! `outer_radius`. Mapping each point to its distance from the origin turns
//! the problem into a 1D threshold, which a sigmoid centred on
//! `decision_boundary` classifies.
//!
//! Output is a pure function of [`DemoConfig`]: the generator is seeded from
//! `seed` and passed explicitly through every draw. Streams come from
//! `rand::rngs::StdRng`, so results are reproducible for a given build of this
//! crate but are not bit-compatible with NumPy's MT19937 sequence.

use crate::core::sampler::sigmoid;
use crate::domain::model::{PredictionPoint, SeparabilityReport, SyntheticPoint};
use crate::utils::error::{Result, SigmoidError};
use crate::utils::validation::{validate_finite, validate_positive_number, Validate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub seed: u64,
    pub points_per_class: usize,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub radial_noise_std_dev: f64,
    pub decision_boundary: f64,
    pub steepness: f64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            points_per_class: 100,
            inner_radius: 2.0,
            outer_radius: 5.0,
            radial_noise_std_dev: 0.3,
            decision_boundary: 3.5,
            steepness: 2.0,
        }
    }
}

impl DemoConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

impl Validate for DemoConfig {
    fn validate(&self) -> Result<()> {
        validate_positive_number("demo.points_per_class", self.points_per_class, 1)?;
        validate_finite("demo.inner_radius", self.inner_radius)?;
        validate_finite("demo.outer_radius", self.outer_radius)?;
        validate_finite("demo.radial_noise_std_dev", self.radial_noise_std_dev)?;
        validate_finite("demo.decision_boundary", self.decision_boundary)?;
        validate_finite("demo.steepness", self.steepness)?;
        if self.radial_noise_std_dev < 0.0 {
            return Err(SigmoidError::InvalidConfigValueError {
                field: "demo.radial_noise_std_dev".to_string(),
                value: self.radial_noise_std_dev.to_string(),
                reason: "Standard deviation cannot be negative".to_string(),
            });
        }
        Ok(())
    }
}

pub struct RadialSeparabilityDemo;

impl RadialSeparabilityDemo {
    pub fn run(config: &DemoConfig) -> Result<SeparabilityReport> {
        config
            .validate()
            .map_err(|e| SigmoidError::invalid_argument(e.to_string()))?;

        let noise = Normal::new(0.0, config.radial_noise_std_dev)
            .map_err(|e| SigmoidError::invalid_argument(format!("radial noise: {}", e)))?;
        let mut rng = StdRng::seed_from_u64(config.seed);

        let mut points = ring(&mut rng, &noise, config.inner_radius, config.points_per_class, 0);
        points.extend(ring(
            &mut rng,
            &noise,
            config.outer_radius,
            config.points_per_class,
            1,
        ));

        let predictions: Vec<PredictionPoint> = points
            .iter()
            .map(|point| {
                let probability =
                    sigmoid(point.radius, config.decision_boundary, config.steepness);
                PredictionPoint {
                    radius: point.radius,
                    probability,
                    predicted_class: u8::from(probability > 0.5),
                }
            })
            .collect();

        let correct = points
            .iter()
            .zip(&predictions)
            .filter(|(point, prediction)| point.true_class == prediction.predicted_class)
            .count();
        let accuracy = correct as f64 / points.len() as f64;

        tracing::debug!(
            "Separability demo seed={} accuracy={:.3} ({}/{})",
            config.seed,
            accuracy,
            correct,
            points.len()
        );

        Ok(SeparabilityReport {
            decision_boundary: config.decision_boundary,
            steepness: config.steepness,
            accuracy,
            seed: config.seed,
            points,
            predictions,
        })
    }

    pub fn run_with_seed(seed: u64) -> Result<SeparabilityReport> {
        Self::run(&DemoConfig::default().with_seed(seed))
    }
}

/// Draws all angles first, then all radii, for one class.
fn ring(
    rng: &mut StdRng,
    noise: &Normal<f64>,
    base_radius: f64,
    count: usize,
    label: u8,
) -> Vec<SyntheticPoint> {
    let angles: Vec<f64> = (0..count).map(|_| rng.gen_range(0.0..TAU)).collect();
    let radii: Vec<f64> = (0..count)
        .map(|_| base_radius + noise.sample(&mut *rng))
        .collect();

    angles
        .into_iter()
        .zip(radii)
        .map(|(theta, r)| {
            let x1 = r * theta.cos();
            let x2 = r * theta.sin();
            SyntheticPoint {
                x1,
                x2,
                true_class: label,
                radius: (x1 * x1 + x2 * x2).sqrt(),
            }
        })
        .collect()
}
