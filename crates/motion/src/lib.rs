//! Relativistic kinematics of a laser-driven sail.
//!
//! The sail's speed fraction β follows the radiation-pressure ODE of
//! Kulkarni et al. (2018), eq. 23, under the optimal-mass condition
//! (payload mass equals sail mass). β is advanced with classical RK4.
//! Distance has no rate of its own and is advanced separately with the
//! trapezoidal rule on c·(β_i + β_{i+1})/2.

use sail_beam::BeamModel;
use sail_core::constants::SPEED_OF_LIGHT_M_S;
use serde::Serialize;
use thiserror::Error;

/// Physical inputs for a trajectory integration.
#[derive(Debug, Clone)]
pub struct TrajectoryInputs {
    /// Sail mass alone (kg); the accelerated mass is twice this.
    pub sail_mass_kg: f64,
    pub reflectance: f64,
    pub power_w: f64,
    pub beam: BeamModel,
}

/// Sampling grid: a short linear segment resolving the fast initial
/// dynamics, then logarithmic samples out to the mission horizon.
#[derive(Debug, Clone)]
pub struct TimeGrid {
    pub linear_span_s: f64,
    pub linear_samples: usize,
    pub log_start_exponent: f64,
    pub log_end_exponent: f64,
    pub log_samples: usize,
}

impl Default for TimeGrid {
    fn default() -> Self {
        Self {
            linear_span_s: 0.8,
            linear_samples: 5,
            log_start_exponent: 0.0,
            log_end_exponent: 4.0,
            log_samples: 195,
        }
    }
}

impl TimeGrid {
    /// Concatenated sample times in seconds, strictly increasing.
    pub fn sample_times(&self) -> Vec<f64> {
        let mut times = sail_core::grid::linspace(0.0, self.linear_span_s, self.linear_samples);
        times.extend(sail_core::grid::logspace(
            self.log_start_exponent,
            self.log_end_exponent,
            self.log_samples,
        ));
        times
    }
}

/// One trajectory sample.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TrajectorySample {
    pub time_s: f64,
    pub beta: f64,
    pub distance_m: f64,
}

/// Integration failures.
#[derive(Debug, Error)]
pub enum MotionError {
    #[error("sail mass must be positive, got {0} kg")]
    NonPositiveMass(f64),
    #[error("laser power must be non-negative, got {0} W")]
    NegativePower(f64),
    #[error(
        "beta reached {beta} at t = {time_s} s; the model is inconsistent (reduce power or increase mass)"
    )]
    SuperluminalBeta { time_s: f64, beta: f64 },
}

/// dβ/dt for the current state.
fn beta_dot(beta: f64, distance_m: f64, inputs: &TrajectoryInputs) -> f64 {
    let c = SPEED_OF_LIGHT_M_S;
    let total_mass_kg = 2.0 * inputs.sail_mass_kg;
    let fraction = inputs.beam.fraction_intercepted(distance_m);
    2.0 * inputs.reflectance * inputs.power_w * fraction * (1.0 - beta * beta).powf(1.5)
        * (1.0 - beta)
        / (total_mass_kg * c * c * (1.0 + beta))
}

/// Integrate the trajectory over `grid`, starting from rest at the origin.
///
/// β must stay strictly below 1; a step that reaches or overshoots light
/// speed aborts the integration instead of producing clipped samples.
pub fn integrate(
    inputs: &TrajectoryInputs,
    grid: &TimeGrid,
) -> Result<Vec<TrajectorySample>, MotionError> {
    if inputs.sail_mass_kg <= 0.0 {
        return Err(MotionError::NonPositiveMass(inputs.sail_mass_kg));
    }
    if inputs.power_w < 0.0 {
        return Err(MotionError::NegativePower(inputs.power_w));
    }

    let times = grid.sample_times();
    let mut beta = 0.0_f64;
    let mut distance_m = 0.0_f64;
    let mut samples = Vec::with_capacity(times.len());
    samples.push(TrajectorySample {
        time_s: times.first().copied().unwrap_or(0.0),
        beta,
        distance_m,
    });

    for step in times.windows(2) {
        let dt = step[1] - step[0];

        // RK4 stages perturb β only; distance is held at the step start.
        let k1 = dt * beta_dot(beta, distance_m, inputs);
        let k2 = dt * beta_dot(beta + k1 / 2.0, distance_m, inputs);
        let k3 = dt * beta_dot(beta + k2 / 2.0, distance_m, inputs);
        let k4 = dt * beta_dot(beta + k3, distance_m, inputs);
        let next_beta = beta + (k1 + 2.0 * k2 + 2.0 * k3 + k4) / 6.0;

        if !next_beta.is_finite() || next_beta >= 1.0 {
            return Err(MotionError::SuperluminalBeta {
                time_s: step[1],
                beta: next_beta,
            });
        }

        let velocity_m_s = SPEED_OF_LIGHT_M_S * (beta + next_beta) / 2.0;
        distance_m += velocity_m_s * dt;
        beta = next_beta;
        samples.push(TrajectorySample {
            time_s: step[1],
            beta,
            distance_m,
        });
    }

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(power_w: f64, beam: BeamModel) -> TrajectoryInputs {
        TrajectoryInputs {
            sail_mass_kg: 1.0e-3,
            reflectance: 1.0,
            power_w,
            beam,
        }
    }

    #[test]
    fn time_grid_is_strictly_increasing() {
        let times = TimeGrid::default().sample_times();
        assert_eq!(times.len(), 200);
        assert!(times.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn zero_power_stays_at_rest() {
        let samples = integrate(&inputs(0.0, BeamModel::Uniform), &TimeGrid::default()).unwrap();
        assert!(samples.iter().all(|s| s.beta == 0.0 && s.distance_m == 0.0));
    }

    #[test]
    fn non_positive_mass_is_rejected() {
        let mut bad = inputs(1.0e11, BeamModel::Uniform);
        bad.sail_mass_kg = 0.0;
        assert!(matches!(
            integrate(&bad, &TimeGrid::default()),
            Err(MotionError::NonPositiveMass(_))
        ));
    }

    #[test]
    fn absurd_power_to_mass_ratio_is_detected() {
        let mut extreme = inputs(1.0e25, BeamModel::Uniform);
        extreme.sail_mass_kg = 1.0e-9;
        assert!(matches!(
            integrate(&extreme, &TimeGrid::default()),
            Err(MotionError::SuperluminalBeta { .. })
        ));
    }
}
