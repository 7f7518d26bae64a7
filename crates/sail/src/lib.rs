//! Multilayer lightsail model.
//!
//! Assembles the layer stack from a material catalog, derives the sail's
//! optical and thermal figures during construction, and drives the
//! trajectory integrator for mission scenarios. Once built, a
//! [`MultilayerSail`] is immutable; the max-power search probes value copies
//! instead of mutating the caller's sail.

pub mod power;
pub mod summary;

use std::f64::consts::PI;

use num_complex::Complex64;
use sail_beam::BeamModel;
use sail_core::constants::SPEED_OF_LIGHT_M_S;
use sail_core::grid::{linspace, trapezoid};
use sail_core::units::kg_to_g;
use sail_materials::{MaterialCatalog, MaterialError, MaterialRecord};
use sail_motion::{MotionError, TimeGrid, TrajectoryInputs, TrajectorySample};
use sail_optics::{Layer, OpticsError, Stack};
use sail_thermal::{EquilibriumSettings, ThermalError};
use thiserror::Error;

use crate::power::{PowerProbe, PowerSearchSettings};

/// Doppler-band and β-sweep sample counts used for the band averages and the
/// worst-case absorbed power.
const BAND_SAMPLES: usize = 100;
const BETA_SWEEP_SAMPLES: usize = 100;
/// β resolution of the acceleration-distance quadrature.
const DISTANCE_SAMPLES: usize = 200;

/// User-supplied description of a sail design.
#[derive(Debug, Clone)]
pub struct SailConfig {
    pub name: String,
    /// Layer material names, front to back.
    pub materials: Vec<String>,
    /// Layer thicknesses (m), same order and length as `materials`.
    pub thicknesses_m: Vec<f64>,
    /// At least one of mass and area is required; the other is derived from
    /// the surface density.
    pub mass_kg: Option<f64>,
    pub area_m2: Option<f64>,
    /// Target speed as a fraction of light speed.
    pub target_beta: f64,
    /// Temperature limit of the payload electronics (K).
    pub payload_max_temperature_k: f64,
    /// Laser power (W); when absent, the thermal maximum is solved for.
    pub power_w: Option<f64>,
    /// Laser wavelength (m).
    pub wavelength_m: f64,
    /// Sail fill factor k: 1 square, π/4 circular.
    pub fill_factor: f64,
    /// Laser-array diffraction constant α: 1 square, 1.22 circular.
    pub diffraction_constant: f64,
}

impl Default for SailConfig {
    fn default() -> Self {
        Self {
            name: "sail".to_string(),
            materials: Vec::new(),
            thicknesses_m: Vec::new(),
            mass_kg: None,
            area_m2: None,
            target_beta: 0.2,
            payload_max_temperature_k: 1000.0,
            power_w: None,
            wavelength_m: 1.064e-6,
            fill_factor: sail_beam::SQUARE_FILL,
            diffraction_constant: sail_beam::SQUARE_DIFFRACTION,
        }
    }
}

/// Solver settings shared by construction and later probing.
#[derive(Debug, Clone, Default)]
pub struct SolverSettings {
    pub equilibrium: EquilibriumSettings,
    pub power_search: PowerSearchSettings,
}

/// Errors surfaced while building or evaluating a sail.
#[derive(Debug, Error)]
pub enum SailError {
    #[error("at least one material layer is required")]
    NoLayers,
    #[error("materials and thicknesses differ in length ({materials} vs {thicknesses})")]
    LayerMismatch { materials: usize, thicknesses: usize },
    #[error("layer thickness must be positive, got {0} m")]
    NonPositiveThickness(f64),
    #[error("either mass or area must be supplied")]
    MissingMassAndArea,
    #[error("target speed must lie in (0, 1), got {0}")]
    InvalidTargetBeta(f64),
    #[error("laser wavelength must be positive, got {0} m")]
    NonPositiveWavelength(f64),
    #[error(transparent)]
    Material(#[from] MaterialError),
    #[error("optics solve failed: {0}")]
    Optics(#[from] OpticsError),
    #[error("thermal solve failed: {0}")]
    Thermal(#[from] ThermalError),
    #[error("trajectory integration failed: {0}")]
    Motion(#[from] MotionError),
    #[error("max-power search did not converge within {iterations} iterations")]
    PowerSearchFailed { iterations: usize },
}

/// A fully derived sail design.
#[derive(Debug, Clone)]
pub struct MultilayerSail {
    pub name: String,
    pub materials: Vec<MaterialRecord>,
    pub thicknesses_m: Vec<f64>,
    pub mass_kg: f64,
    pub area_m2: f64,
    pub surface_density_kg_m2: f64,
    /// Band-averaged reflectance over the Doppler-shifted laser band.
    pub reflectance: f64,
    /// Band-averaged transmittance over the Doppler-shifted laser band.
    pub transmittance: f64,
    /// Absorptance at the laser line, from the laser-band absorption
    /// coefficients.
    pub absorptance: f64,
    pub target_beta: f64,
    pub power_w: f64,
    pub wavelength_m: f64,
    pub payload_max_temperature_k: f64,
    /// Worst-case equilibrium temperature at `power_w`.
    pub temperature_reached_k: f64,
    /// Figure of merit W = √(ρ_s[g/m²]/R̄), per Ilic et al. (2018).
    pub figure_of_merit: f64,
    /// Laser-array diameter sized so the critical distance matches the
    /// diffraction-free acceleration distance to the target speed.
    pub laser_diameter_m: f64,
    pub fill_factor: f64,
    pub diffraction_constant: f64,
    /// (power, temperature) telemetry from the max-power search; empty when
    /// the power was supplied by the user.
    pub power_probes: Vec<PowerProbe>,
}

impl MultilayerSail {
    /// Build a sail with default solver settings.
    pub fn build(config: SailConfig, catalog: &MaterialCatalog) -> Result<Self, SailError> {
        Self::build_with_settings(config, catalog, &SolverSettings::default())
    }

    /// Build a sail, deriving every dependent quantity up front.
    pub fn build_with_settings(
        config: SailConfig,
        catalog: &MaterialCatalog,
        settings: &SolverSettings,
    ) -> Result<Self, SailError> {
        validate(&config)?;

        let materials: Vec<MaterialRecord> = config
            .materials
            .iter()
            .map(|name| catalog.get(name).cloned())
            .collect::<Result<_, _>>()?;

        let surface_density_kg_m2: f64 = materials
            .iter()
            .zip(&config.thicknesses_m)
            .map(|(material, thickness)| material.density_kg_m3 * thickness)
            .sum();

        let (mass_kg, area_m2) = match (config.mass_kg, config.area_m2) {
            (Some(mass), Some(area)) => (mass, area),
            (Some(mass), None) => (mass, mass / surface_density_kg_m2),
            (None, Some(area)) => (area * surface_density_kg_m2, area),
            (None, None) => return Err(SailError::MissingMassAndArea),
        };

        let mut sail = Self {
            name: config.name,
            materials,
            thicknesses_m: config.thicknesses_m,
            mass_kg,
            area_m2,
            surface_density_kg_m2,
            reflectance: 0.0,
            transmittance: 0.0,
            absorptance: 0.0,
            target_beta: config.target_beta,
            power_w: config.power_w.unwrap_or(0.0),
            wavelength_m: config.wavelength_m,
            payload_max_temperature_k: config.payload_max_temperature_k,
            temperature_reached_k: 0.0,
            figure_of_merit: 0.0,
            laser_diameter_m: 0.0,
            fill_factor: config.fill_factor,
            diffraction_constant: config.diffraction_constant,
            power_probes: Vec::new(),
        };

        sail.absorptance = sail.absorptance_at(sail.wavelength_m)?;
        let (reflectance, transmittance) = sail.band_averaged_optics()?;
        sail.reflectance = reflectance;
        sail.transmittance = transmittance;
        sail.figure_of_merit = (kg_to_g(surface_density_kg_m2) / reflectance).sqrt();

        if config.power_w.is_some() {
            sail.temperature_reached_k = sail.equilibrium_temperature(&settings.equilibrium)?;
        } else {
            let solution = power::max_power(&sail, settings)?;
            sail.power_w = solution.power_w;
            sail.temperature_reached_k = solution.temperature_k;
            sail.power_probes = solution.probes;
        }

        sail.laser_diameter_m = sail.sized_aperture_m();
        Ok(sail)
    }

    /// Stack of complex indices at `wavelength_m`, assembled front to back
    /// with the negative-thickness convention expected by the optics engine.
    pub fn stack_at(&self, wavelength_m: f64) -> Stack {
        let layers = self
            .materials
            .iter()
            .zip(&self.thicknesses_m)
            .map(|(material, &thickness_m)| {
                let index = Complex64::new(
                    material.refractive_index(wavelength_m),
                    material.extinction(wavelength_m),
                );
                Layer::new(index, -thickness_m)
            })
            .collect();
        Stack::new(layers)
    }

    /// Stack used inside the laser band, where extinction data is poor:
    /// each layer's k is reconstructed from its absorption coefficient,
    /// k = λ·(100·abs_coeff)/4π with abs_coeff in cm⁻¹.
    pub fn laser_band_stack(&self, wavelength_m: f64) -> Stack {
        let layers = self
            .materials
            .iter()
            .zip(&self.thicknesses_m)
            .map(|(material, &thickness_m)| {
                let extinction = wavelength_m * 100.0 * material.abs_coeff_cm / (4.0 * PI);
                let index = Complex64::new(material.refractive_index(wavelength_m), extinction);
                Layer::new(index, -thickness_m)
            })
            .collect();
        Stack::new(layers)
    }

    /// Absorptance at `wavelength_m` from the laser-band stack, normal
    /// incidence.
    pub fn absorptance_at(&self, wavelength_m: f64) -> Result<f64, SailError> {
        let stack = self.laser_band_stack(wavelength_m);
        let coefficients = sail_optics::solve(&stack, wavelength_m, 0.0)?;
        Ok(coefficients.absorptance())
    }

    /// Reflectance and transmittance averaged over the laser band swept by
    /// the relativistic Doppler shift up to the target speed.
    fn band_averaged_optics(&self) -> Result<(f64, f64), SailError> {
        let shift = ((1.0 + self.target_beta) / (1.0 - self.target_beta)).sqrt();
        let band = linspace(self.wavelength_m, self.wavelength_m * shift, BAND_SAMPLES);
        let mut reflectance_sum = 0.0;
        let mut transmittance_sum = 0.0;
        for &wavelength in &band {
            let stack = self.stack_at(wavelength);
            let coefficients = sail_optics::solve(&stack, wavelength, 0.0)?;
            reflectance_sum += coefficients.reflectance();
            transmittance_sum += coefficients.transmittance();
        }
        let n = band.len() as f64;
        Ok((reflectance_sum / n, transmittance_sum / n))
    }

    /// Highest power absorbed per unit area over the acceleration phase.
    ///
    /// As the sail speeds up, the laser redshifts (changing the stack's
    /// absorptance) while the intercepted intensity drops by (1−β)/(1+β);
    /// the worst case can sit anywhere in the sweep, not just at β = 0.
    pub fn worst_case_absorbed_power(&self) -> Result<f64, SailError> {
        let betas = linspace(0.0, self.target_beta, BETA_SWEEP_SAMPLES);
        let power_mass_ratio = self.power_w / self.mass_kg;
        let mut worst = 0.0_f64;
        for &beta in &betas {
            let doppler = self.wavelength_m * ((1.0 + beta) / (1.0 - beta)).sqrt();
            let absorptance = self.absorptance_at(doppler)?;
            let absorbed = power_mass_ratio
                * absorptance
                * self.surface_density_kg_m2
                * (1.0 - beta)
                / (1.0 + beta);
            worst = worst.max(absorbed);
        }
        Ok(worst)
    }

    /// Worst-case equilibrium temperature of the sail at its current power.
    pub fn equilibrium_temperature(
        &self,
        settings: &EquilibriumSettings,
    ) -> Result<f64, SailError> {
        let absorbed = self.worst_case_absorbed_power()?;
        let temperature =
            sail_thermal::equilibrium_temperature(&|w| self.stack_at(w), absorbed, settings)?;
        Ok(temperature)
    }

    /// Tightest temperature limit across layer materials and the payload.
    pub fn limiting_temperature_k(&self) -> f64 {
        self.materials
            .iter()
            .map(|material| material.max_temperature_k)
            .fold(self.payload_max_temperature_k, f64::min)
    }

    /// Side length of the sail for beam-geometry purposes.
    pub fn side_m(&self) -> f64 {
        sail_beam::sail_side_m(self.area_m2, self.fill_factor)
    }

    /// Diffraction-free distance at which the sail reaches its target speed,
    /// by quadrature of dx/dβ = (m_tot·c³/2RP)·β·(1+β)^(−1/2)·(1−β)^(−5/2).
    pub fn acceleration_distance_m(&self) -> f64 {
        let betas = linspace(0.0, self.target_beta, DISTANCE_SAMPLES);
        let integrand: Vec<f64> = betas
            .iter()
            .map(|&beta| beta / ((1.0 - beta).powf(2.5) * (1.0 + beta).sqrt()))
            .collect();
        let c = SPEED_OF_LIGHT_M_S;
        let scale = 2.0 * self.mass_kg * c.powi(3) / (2.0 * self.reflectance * self.power_w);
        scale * trapezoid(&betas, &integrand)
    }

    /// Laser-array aperture whose critical distance equals the
    /// diffraction-free acceleration distance.
    fn sized_aperture_m(&self) -> f64 {
        sail_beam::aperture_for_critical_distance(
            self.acceleration_distance_m(),
            self.side_m(),
            self.wavelength_m,
            self.diffraction_constant,
        )
    }

    /// Beam model implied by the sized laser array.
    pub fn beam_model(&self) -> BeamModel {
        BeamModel::Diffracting {
            critical_distance_m: sail_beam::critical_distance_m(
                self.laser_diameter_m,
                self.side_m(),
                self.wavelength_m,
                self.diffraction_constant,
            ),
        }
    }

    /// Integrate a trajectory under an explicit beam model.
    pub fn trajectory(
        &self,
        beam: BeamModel,
        grid: &TimeGrid,
    ) -> Result<Vec<TrajectorySample>, SailError> {
        let inputs = TrajectoryInputs {
            sail_mass_kg: self.mass_kg,
            reflectance: self.reflectance,
            power_w: self.power_w,
            beam,
        };
        Ok(sail_motion::integrate(&inputs, grid)?)
    }

    /// Mission trajectory under the sail's own diffraction-limited beam.
    pub fn mission_trajectory(&self, grid: &TimeGrid) -> Result<Vec<TrajectorySample>, SailError> {
        self.trajectory(self.beam_model(), grid)
    }
}

fn validate(config: &SailConfig) -> Result<(), SailError> {
    if config.materials.is_empty() {
        return Err(SailError::NoLayers);
    }
    if config.materials.len() != config.thicknesses_m.len() {
        return Err(SailError::LayerMismatch {
            materials: config.materials.len(),
            thicknesses: config.thicknesses_m.len(),
        });
    }
    if let Some(&thickness) = config
        .thicknesses_m
        .iter()
        .find(|&&thickness| thickness <= 0.0)
    {
        return Err(SailError::NonPositiveThickness(thickness));
    }
    if !(0.0..1.0).contains(&config.target_beta) || config.target_beta == 0.0 {
        return Err(SailError::InvalidTargetBeta(config.target_beta));
    }
    if config.wavelength_m <= 0.0 {
        return Err(SailError::NonPositiveWavelength(config.wavelength_m));
    }
    Ok(())
}
