//! Ordered presentation record for a sail design.
//!
//! Field order here fixes how summaries serialize for reports; the
//! computational [`MultilayerSail`] itself carries no presentation concerns.

use serde::Serialize;

use crate::MultilayerSail;

/// Serializable snapshot of a sail's parameters.
#[derive(Debug, Clone, Serialize)]
pub struct SailSummary {
    pub name: String,
    pub mass_kg: f64,
    pub area_m2: f64,
    pub materials: Vec<String>,
    pub thicknesses_m: Vec<f64>,
    pub surface_density_kg_m2: f64,
    pub absorptance: f64,
    pub reflectance: f64,
    pub transmittance: f64,
    pub target_beta: f64,
    pub power_w: f64,
    pub wavelength_m: f64,
    pub laser_diameter_m: f64,
    pub figure_of_merit: f64,
    pub payload_max_temperature_k: f64,
    pub temperature_reached_k: f64,
}

impl From<&MultilayerSail> for SailSummary {
    fn from(sail: &MultilayerSail) -> Self {
        Self {
            name: sail.name.clone(),
            mass_kg: sail.mass_kg,
            area_m2: sail.area_m2,
            materials: sail
                .materials
                .iter()
                .map(|material| material.name.clone())
                .collect(),
            thicknesses_m: sail.thicknesses_m.clone(),
            surface_density_kg_m2: sail.surface_density_kg_m2,
            absorptance: sail.absorptance,
            reflectance: sail.reflectance,
            transmittance: sail.transmittance,
            target_beta: sail.target_beta,
            power_w: sail.power_w,
            wavelength_m: sail.wavelength_m,
            laser_diameter_m: sail.laser_diameter_m,
            figure_of_merit: sail.figure_of_merit,
            payload_max_temperature_k: sail.payload_max_temperature_k,
            temperature_reached_k: sail.temperature_reached_k,
        }
    }
}
