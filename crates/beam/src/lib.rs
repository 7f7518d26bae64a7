//! Laser-beam geometry: sail sizing, diffraction-limited critical distance,
//! and the fraction of launched power intercepted downrange.

/// Fill factor k relating sail area to side length: 1 for a square sail.
pub const SQUARE_FILL: f64 = 1.0;
/// Fill factor k for a circular sail (area = π/4 · d²).
pub const CIRCULAR_FILL: f64 = std::f64::consts::FRAC_PI_4;
/// Diffraction constant α for a square laser array.
pub const SQUARE_DIFFRACTION: f64 = 1.0;
/// Diffraction constant α for a circular laser array (Airy limit).
pub const CIRCULAR_DIFFRACTION: f64 = 1.22;

/// Side length (or diameter, for circular sails) of a sail with the given
/// area and fill factor.
pub fn sail_side_m(area_m2: f64, fill_factor: f64) -> f64 {
    (area_m2 / fill_factor).sqrt()
}

/// Distance inside which the whole launched beam still lands on the sail.
pub fn critical_distance_m(
    aperture_m: f64,
    sail_side_m: f64,
    wavelength_m: f64,
    diffraction_constant: f64,
) -> f64 {
    aperture_m * sail_side_m / (2.0 * wavelength_m * diffraction_constant)
}

/// Laser-array aperture that puts the critical distance at `distance_m`.
pub fn aperture_for_critical_distance(
    distance_m: f64,
    sail_side_m: f64,
    wavelength_m: f64,
    diffraction_constant: f64,
) -> f64 {
    2.0 * wavelength_m * diffraction_constant * distance_m / sail_side_m
}

/// Beam falloff model seen by the accelerating sail.
#[derive(Debug, Clone, Copy)]
pub enum BeamModel {
    /// The whole launched beam lands on the sail at any distance.
    Uniform,
    /// Inverse-square falloff past the critical distance.
    Diffracting { critical_distance_m: f64 },
}

impl BeamModel {
    /// Fraction of launched power intercepted by the sail at `distance_m`,
    /// in [0, 1].
    pub fn fraction_intercepted(&self, distance_m: f64) -> f64 {
        match self {
            BeamModel::Uniform => 1.0,
            BeamModel::Diffracting { critical_distance_m } => {
                if distance_m <= *critical_distance_m {
                    1.0
                } else {
                    (critical_distance_m / distance_m).powi(2)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_beam_inside_critical_distance() {
        let beam = BeamModel::Diffracting {
            critical_distance_m: 1.0e9,
        };
        assert_eq!(beam.fraction_intercepted(0.0), 1.0);
        assert_eq!(beam.fraction_intercepted(1.0e9), 1.0);
    }

    #[test]
    fn inverse_square_falloff_beyond() {
        let beam = BeamModel::Diffracting {
            critical_distance_m: 1.0e9,
        };
        assert!((beam.fraction_intercepted(2.0e9) - 0.25).abs() < 1e-12);
        assert!((beam.fraction_intercepted(10.0e9) - 0.01).abs() < 1e-12);
    }

    #[test]
    fn aperture_sizing_round_trips() {
        let side = sail_side_m(16.0, SQUARE_FILL);
        assert_eq!(side, 4.0);
        let aperture = aperture_for_critical_distance(1.0e9, side, 1.064e-6, SQUARE_DIFFRACTION);
        let critical = critical_distance_m(aperture, side, 1.064e-6, SQUARE_DIFFRACTION);
        assert!((critical - 1.0e9).abs() < 1.0);
    }
}
