use crate::domain::model::{SamplePoint, DEFAULT_STEEPNESS, DEFAULT_X_SHIFT};
use crate::utils::error::{Result, SigmoidError};
use serde::{Deserialize, Serialize};

pub const DEFAULT_RANGE_START: f64 = -10.0;
pub const DEFAULT_RANGE_END: f64 = 10.0;
pub const DEFAULT_NUM_POINTS: usize = 100;
pub const DEFAULT_MAX_NUM_POINTS: usize = 100_000;
/// Upper bound for any configured `max_num_points`.
pub const MAX_NUM_POINTS: usize = 1_000_000;

/// Logistic function `1 / (1 + e^(-steepness * (x - x_shift)))`.
///
/// Large exponents saturate to 0.0 / 1.0 through IEEE `exp` overflow.
pub fn sigmoid(x: f64, x_shift: f64, steepness: f64) -> f64 {
    1.0 / (1.0 + (-steepness * (x - x_shift)).exp())
}

/// `num` evenly spaced values over `[start, end]`, both endpoints included.
///
/// A single value yields `start`. The last value is pinned to `end` so it is
/// exact regardless of accumulated rounding.
pub fn linspace(start: f64, end: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (num - 1) as f64;
            let mut values: Vec<f64> = (0..num).map(|i| start + i as f64 * step).collect();
            values[num - 1] = end;
            values
        }
    }
}

/// Defaults applied to omitted request fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerDefaults {
    pub x_shift: f64,
    pub steepness: f64,
    pub x_range_start: f64,
    pub x_range_end: f64,
    pub num_points: usize,
    /// Largest `num_points` a request may ask for.
    pub max_num_points: usize,
}

impl Default for SamplerDefaults {
    fn default() -> Self {
        Self {
            x_shift: DEFAULT_X_SHIFT,
            steepness: DEFAULT_STEEPNESS,
            x_range_start: DEFAULT_RANGE_START,
            x_range_end: DEFAULT_RANGE_END,
            num_points: DEFAULT_NUM_POINTS,
            max_num_points: DEFAULT_MAX_NUM_POINTS,
        }
    }
}

/// Samples the logistic curve over a range.
pub struct SigmoidSampler;

impl SigmoidSampler {
    pub fn sample(
        x_shift: f64,
        steepness: f64,
        range_start: f64,
        range_end: f64,
        num_points: usize,
    ) -> Result<Vec<SamplePoint>> {
        if num_points == 0 {
            return Err(SigmoidError::invalid_argument(
                "num_points must be a positive integer",
            ));
        }
        if num_points > MAX_NUM_POINTS {
            return Err(SigmoidError::invalid_argument(format!(
                "num_points must be at most {}, got {}",
                MAX_NUM_POINTS, num_points
            )));
        }
        for (name, value) in [
            ("x_shift", x_shift),
            ("steepness", steepness),
            ("x_range_start", range_start),
            ("x_range_end", range_end),
        ] {
            if !value.is_finite() {
                return Err(SigmoidError::invalid_argument(format!(
                    "{} must be a finite number, got {}",
                    name, value
                )));
            }
        }

        let points: Vec<SamplePoint> = linspace(range_start, range_end, num_points)
            .into_iter()
            .map(|x| SamplePoint {
                x,
                y: sigmoid(x, x_shift, steepness),
            })
            .collect();

        // 範圍跨度溢位時 x 會變成 inf/NaN
        if let Some(bad) = points.iter().find(|p| !p.x.is_finite() || p.y.is_nan()) {
            return Err(SigmoidError::invalid_argument(format!(
                "range [{}, {}] produced a non-finite sample at x={}",
                range_start, range_end, bad.x
            )));
        }

        tracing::debug!(
            "Sampled {} points of {} over [{}, {}]",
            points.len(),
            crate::domain::model::SigmoidParameters { x_shift, steepness },
            range_start,
            range_end
        );

        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_sample_count_and_endpoints() {
        let points = SigmoidSampler::sample(1.0, 2.0, -3.0, 7.0, 11).unwrap();
        assert_eq!(points.len(), 11);
        assert!((points[0].x - -3.0).abs() < EPS);
        assert!((points[10].x - 7.0).abs() < EPS);
        assert!((points[5].x - 2.0).abs() < EPS);
    }

    #[test]
    fn test_midpoint_is_half() {
        let points = SigmoidSampler::sample(0.0, 1.0, -10.0, 10.0, 101).unwrap();
        assert!((points[50].x).abs() < EPS);
        assert!((points[50].y - 0.5).abs() < EPS);
    }

    #[test]
    fn test_default_grid_index_fifty() {
        // 100 點時 index 50 的 x = 10/99，y 仍非常接近 0.5
        let points = SigmoidSampler::sample(0.0, 1.0, -10.0, 10.0, 100).unwrap();
        let expected = sigmoid(points[50].x, 0.0, 1.0);
        assert!((points[50].y - expected).abs() < EPS);
        assert!((points[50].y - 0.5).abs() < 0.026);
    }

    #[test]
    fn test_monotonicity_by_sign_of_steepness() {
        let rising = SigmoidSampler::sample(0.5, 3.0, -4.0, 4.0, 50).unwrap();
        assert!(rising.windows(2).all(|w| w[1].y > w[0].y));

        let falling = SigmoidSampler::sample(0.5, -3.0, -4.0, 4.0, 50).unwrap();
        assert!(falling.windows(2).all(|w| w[1].y < w[0].y));

        let flat = SigmoidSampler::sample(0.5, 0.0, -4.0, 4.0, 50).unwrap();
        assert!(flat.iter().all(|p| p.y == 0.5));
    }

    #[test]
    fn test_values_strictly_inside_unit_interval() {
        let points = SigmoidSampler::sample(-2.0, 0.75, -10.0, 10.0, 100).unwrap();
        assert!(points.iter().all(|p| p.y > 0.0 && p.y < 1.0));
    }

    #[test]
    fn test_extreme_steepness_saturates() {
        let points = SigmoidSampler::sample(0.0, 1e6, -10.0, 10.0, 5).unwrap();
        assert_eq!(points[0].y, 0.0);
        assert_eq!(points[4].y, 1.0);
        assert!(points.iter().all(|p| p.y.is_finite()));
    }

    #[test]
    fn test_degenerate_range() {
        let points = SigmoidSampler::sample(0.0, 1.0, 5.0, 5.0, 3).unwrap();
        assert_eq!(points.len(), 3);
        assert!(points.iter().all(|p| p.x == 5.0));
        assert!(points.iter().all(|p| (p.y - sigmoid(5.0, 0.0, 1.0)).abs() < EPS));

        let centred = SigmoidSampler::sample(5.0, 1.0, 5.0, 5.0, 3).unwrap();
        assert!(centred.iter().all(|p| p.x == 5.0 && p.y == 0.5));
    }

    #[test]
    fn test_reversed_range_and_single_point() {
        let reversed = SigmoidSampler::sample(0.0, 1.0, 10.0, -10.0, 3).unwrap();
        assert_eq!(
            reversed.iter().map(|p| p.x).collect::<Vec<_>>(),
            vec![10.0, 0.0, -10.0]
        );

        let single = SigmoidSampler::sample(0.0, 1.0, 3.0, 9.0, 1).unwrap();
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].x, 3.0);
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(matches!(
            SigmoidSampler::sample(0.0, 1.0, -10.0, 10.0, 0),
            Err(SigmoidError::InvalidArgument { .. })
        ));
        assert!(matches!(
            SigmoidSampler::sample(f64::NAN, 1.0, -10.0, 10.0, 10),
            Err(SigmoidError::InvalidArgument { .. })
        ));
        assert!(matches!(
            SigmoidSampler::sample(0.0, 1.0, -f64::MAX, f64::MAX, 10),
            Err(SigmoidError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_oversized_point_count_is_rejected() {
        assert!(SigmoidSampler::sample(0.0, 1.0, -10.0, 10.0, MAX_NUM_POINTS).is_ok());
        for huge in [MAX_NUM_POINTS + 1, 1 << 45, usize::MAX] {
            assert!(matches!(
                SigmoidSampler::sample(0.0, 1.0, -10.0, 10.0, huge),
                Err(SigmoidError::InvalidArgument { .. })
            ));
        }
    }

    #[test]
    fn test_sampling_is_idempotent() {
        let first = SigmoidSampler::sample(1.25, -0.5, -8.0, 3.0, 37).unwrap();
        let second = SigmoidSampler::sample(1.25, -0.5, -8.0, 3.0, 37).unwrap();
        assert_eq!(first, second);
    }
}
