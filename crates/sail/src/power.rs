//! Maximum sustainable laser power.
//!
//! Finds the power at which the sail's worst-case equilibrium temperature
//! meets the tightest material/payload limit, by secant iteration on probe
//! copies of the sail. The caller's sail is never mutated; every candidate
//! power is evaluated through [`probe`].

use serde::Serialize;

use crate::{MultilayerSail, SailError, SolverSettings};
use sail_thermal::EquilibriumSettings;

/// One evaluated candidate during the search, reported as telemetry.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PowerProbe {
    pub power_w: f64,
    pub temperature_k: f64,
}

/// Tuning knobs for the power search. The 100 GW seed is a heuristic
/// starting point, not a bracket guarantee.
#[derive(Debug, Clone)]
pub struct PowerSearchSettings {
    pub initial_guess_w: f64,
    /// Convergence window on the probe temperature (K). Must stay coarser
    /// than the inner equilibrium solver's tolerance or the two searches
    /// fight each other.
    pub temperature_tolerance_k: f64,
    pub max_iterations: usize,
}

impl Default for PowerSearchSettings {
    fn default() -> Self {
        Self {
            initial_guess_w: 100.0e9,
            temperature_tolerance_k: 1.0,
            max_iterations: 40,
        }
    }
}

/// Solved maximum power with the probe history that led to it.
#[derive(Debug, Clone)]
pub struct PowerSolution {
    pub power_w: f64,
    pub temperature_k: f64,
    pub probes: Vec<PowerProbe>,
}

/// Worst-case equilibrium temperature of a sail copy driven at `power_w`.
pub fn probe(
    sail: &MultilayerSail,
    power_w: f64,
    settings: &EquilibriumSettings,
) -> Result<f64, SailError> {
    let mut trial = sail.clone();
    trial.power_w = power_w;
    trial.equilibrium_temperature(settings)
}

/// Solve for the highest power the sail tolerates without exceeding its
/// limiting temperature.
pub fn max_power(
    sail: &MultilayerSail,
    settings: &SolverSettings,
) -> Result<PowerSolution, SailError> {
    let limit_k = sail.limiting_temperature_k();
    let search = &settings.power_search;
    let mut probes = Vec::new();

    let mut previous_power = search.initial_guess_w;
    let mut previous_residual = {
        let temperature = probe(sail, previous_power, &settings.equilibrium)?;
        probes.push(PowerProbe {
            power_w: previous_power,
            temperature_k: temperature,
        });
        if (temperature - limit_k).abs() <= search.temperature_tolerance_k {
            return Ok(PowerSolution {
                power_w: previous_power,
                temperature_k: temperature,
                probes,
            });
        }
        temperature - limit_k
    };

    // Radiated power scales roughly as T⁴, so the quartic rescaling of the
    // seed lands close to the root before the secant refinement starts.
    let seed_temperature = previous_residual + limit_k;
    let mut current_power = previous_power * (limit_k / seed_temperature).powi(4);

    for _ in 0..search.max_iterations {
        let temperature = probe(sail, current_power, &settings.equilibrium)?;
        probes.push(PowerProbe {
            power_w: current_power,
            temperature_k: temperature,
        });
        let residual = temperature - limit_k;
        if residual.abs() <= search.temperature_tolerance_k {
            return Ok(PowerSolution {
                power_w: current_power,
                temperature_k: temperature,
                probes,
            });
        }

        let denominator = residual - previous_residual;
        let next_power = if denominator == 0.0 {
            // Flat secant step; fall back to the quartic rescaling.
            current_power * (limit_k / temperature).powi(4)
        } else {
            current_power - residual * (current_power - previous_power) / denominator
        };

        previous_power = current_power;
        previous_residual = residual;
        // A wild secant step below zero power is never meaningful.
        current_power = if next_power > 0.0 {
            next_power
        } else {
            current_power / 2.0
        };
    }

    Err(SailError::PowerSearchFailed {
        iterations: search.max_iterations,
    })
}
