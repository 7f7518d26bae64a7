//! Radiative power balance for the two faces of a multilayer sail.
//!
//! Directional emissivity comes from the optics engine through Kirchhoff's
//! law (emissivity equals absorptance at a given angle and wavelength). The
//! hemispherical flux of each face is integrated over elevation, weighted by
//! Planck's law, then integrated over the thermal band to get the total
//! emitted power. The equilibrium temperature is the root of
//! absorbed − emitted, found with an expanding Brent bracket seeded at the
//! two-face blackbody estimate.

use std::f64::consts::{FRAC_PI_2, PI};

use sail_core::constants::{
    BOLTZMANN_J_K, PLANCK_J_S, SPEED_OF_LIGHT_M_S, STEFAN_BOLTZMANN_W_M2_K4,
};
use sail_core::grid::{linspace, trapezoid};
use sail_optics::{OpticsError, Stack};
use sail_solvers::{BrentConfig, SolverError, brent_expanding};
use thiserror::Error;

/// Sample counts and band limits for the emission integrals.
#[derive(Debug, Clone)]
pub struct EmissionSettings {
    /// Trapezoid samples over elevation θ ∈ [0, π/2].
    pub angle_samples: usize,
    /// Lower edge of the thermal band (m).
    pub band_lower_m: f64,
    /// Upper edge of the thermal band (m). The band must bracket the thermal
    /// peak for the temperatures being solved.
    pub band_upper_m: f64,
    /// Trapezoid samples over the thermal band.
    pub band_samples: usize,
}

impl Default for EmissionSettings {
    fn default() -> Self {
        Self {
            angle_samples: 50,
            band_lower_m: 1.0e-6,
            band_upper_m: 25.0e-6,
            band_samples: 100,
        }
    }
}

/// Settings for the equilibrium-temperature root search.
#[derive(Debug, Clone)]
pub struct EquilibriumSettings {
    pub emission: EmissionSettings,
    pub brent: BrentConfig,
    /// Doublings of the bracket's upper temperature before giving up. The
    /// starting bracket `[T_bb, 2·T_bb]` is a heuristic, not a guarantee.
    pub max_bracket_expansions: usize,
}

impl Default for EquilibriumSettings {
    fn default() -> Self {
        Self {
            emission: EmissionSettings::default(),
            brent: BrentConfig::default(),
            max_bracket_expansions: 40,
        }
    }
}

/// Errors raised by the radiative-balance solvers.
#[derive(Debug, Error)]
pub enum ThermalError {
    #[error("optics solve failed during emissivity integration: {0}")]
    Optics(#[from] OpticsError),
    #[error("equilibrium search failed: {0}")]
    Solver(#[from] SolverError),
    #[error("absorbed power must be positive, got {0} W/m^2")]
    NonPositiveAbsorbedPower(f64),
}

/// Planck spectral radiance (W/m²/sr/m) at `wavelength_m` and `temperature_k`.
pub fn planck_spectral_radiance(wavelength_m: f64, temperature_k: f64) -> f64 {
    let hc = PLANCK_J_S * SPEED_OF_LIGHT_M_S;
    let exponent = hc / (wavelength_m * BOLTZMANN_J_K * temperature_k);
    (2.0 * hc * SPEED_OF_LIGHT_M_S / wavelength_m.powi(5)) / (exponent.exp() - 1.0)
}

/// Directional emissivity of a face at `angle_rad`, per Kirchhoff's law:
/// ε(θ, λ) = 1 − R(θ, λ) − T(θ, λ).
pub fn directional_emissivity(
    stack: &Stack,
    wavelength_m: f64,
    angle_rad: f64,
) -> Result<f64, ThermalError> {
    let coefficients = sail_optics::solve(stack, wavelength_m, angle_rad)?;
    Ok(coefficients.absorptance())
}

/// Spectral hemispherical emissivity of one face: trapezoid of
/// 2·ε(θ)·cosθ·sinθ over θ ∈ [0, π/2].
fn hemispherical_emissivity(
    stack: &Stack,
    wavelength_m: f64,
    settings: &EmissionSettings,
) -> Result<f64, ThermalError> {
    let angles = linspace(0.0, FRAC_PI_2, settings.angle_samples);
    let mut integrand = Vec::with_capacity(angles.len());
    for &theta in &angles {
        // The cos θ weight vanishes at grazing incidence, so the endpoint
        // contributes nothing and the engine is queried strictly inside
        // [0, π/2).
        let emissivity = if theta < FRAC_PI_2 {
            directional_emissivity(stack, wavelength_m, theta)?
        } else {
            0.0
        };
        integrand.push(2.0 * emissivity * theta.cos() * theta.sin());
    }
    Ok(trapezoid(&angles, &integrand))
}

/// Spectral emissive power flux (W/m²/m) of both sail faces at the given
/// wavelength and temperature. The back face sees the layer stack reversed.
pub fn spectral_power_flux<F>(
    stack_at: &F,
    wavelength_m: f64,
    temperature_k: f64,
    settings: &EmissionSettings,
) -> Result<f64, ThermalError>
where
    F: Fn(f64) -> Stack,
{
    let front = stack_at(wavelength_m);
    let back = front.reversed();
    let radiance = planck_spectral_radiance(wavelength_m, temperature_k);
    let front_emissivity = hemispherical_emissivity(&front, wavelength_m, settings)?;
    let back_emissivity = hemispherical_emissivity(&back, wavelength_m, settings)?;
    Ok(PI * radiance * (front_emissivity + back_emissivity))
}

/// Total power (W per m² of one face) emitted by both faces at
/// `temperature_k`, integrated over the thermal band.
pub fn power_emitted<F>(
    stack_at: &F,
    temperature_k: f64,
    settings: &EmissionSettings,
) -> Result<f64, ThermalError>
where
    F: Fn(f64) -> Stack,
{
    let wavelengths = linspace(
        settings.band_lower_m,
        settings.band_upper_m,
        settings.band_samples,
    );
    let mut fluxes = Vec::with_capacity(wavelengths.len());
    for &wavelength in &wavelengths {
        fluxes.push(spectral_power_flux(
            stack_at,
            wavelength,
            temperature_k,
            settings,
        )?);
    }
    Ok(trapezoid(&wavelengths, &fluxes))
}

/// Temperature at which the emitted power balances `power_absorbed_w_m2`.
///
/// The bracket starts at the temperature a two-faced blackbody would need to
/// shed the absorbed power, with twice that as the upper bound; the upper
/// bound doubles until the balance changes sign or the retry budget runs out.
pub fn equilibrium_temperature<F>(
    stack_at: &F,
    power_absorbed_w_m2: f64,
    settings: &EquilibriumSettings,
) -> Result<f64, ThermalError>
where
    F: Fn(f64) -> Stack,
{
    if power_absorbed_w_m2 <= 0.0 {
        return Err(ThermalError::NonPositiveAbsorbedPower(power_absorbed_w_m2));
    }
    let blackbody_k = (power_absorbed_w_m2 / (2.0 * STEFAN_BOLTZMANN_W_M2_K4)).powf(0.25);
    brent_expanding(
        |temperature| {
            Ok(power_absorbed_w_m2 - power_emitted(stack_at, temperature, &settings.emission)?)
        },
        blackbody_k,
        2.0 * blackbody_k,
        &settings.brent,
        settings.max_bracket_expansions,
    )
}
