//! Core constants, units, and shared numeric primitives for the Lightsail Calculator workspace.

/// Physical constants expressed in SI units (unless stated otherwise).
pub mod constants {
    /// Speed of light in vacuum (m/s).
    pub const SPEED_OF_LIGHT_M_S: f64 = 299_792_458.0;
    /// Planck constant (J·s).
    pub const PLANCK_J_S: f64 = 6.626_070_04e-34;
    /// Boltzmann constant (J/K).
    pub const BOLTZMANN_J_K: f64 = 1.380_648_52e-23;
    /// Stefan-Boltzmann constant (W/m²/K⁴).
    pub const STEFAN_BOLTZMANN_W_M2_K4: f64 = 5.670_367e-8;
}

/// Basic unit conversion helpers.
pub mod units {
    /// Convert nanometres to metres.
    #[inline]
    pub fn nm_to_m(v: f64) -> f64 {
        v * 1.0e-9
    }

    /// Convert micrometres to metres.
    #[inline]
    pub fn um_to_m(v: f64) -> f64 {
        v * 1.0e-6
    }

    /// Convert grams to kilograms.
    #[inline]
    pub fn g_to_kg(v: f64) -> f64 {
        v * 1.0e-3
    }

    /// Convert kilograms to grams.
    #[inline]
    pub fn kg_to_g(v: f64) -> f64 {
        v * 1.0e3
    }

    /// Convert gigawatts to watts.
    #[inline]
    pub fn gw_to_w(v: f64) -> f64 {
        v * 1.0e9
    }

    /// Convert watts to gigawatts.
    #[inline]
    pub fn w_to_gw(v: f64) -> f64 {
        v * 1.0e-9
    }
}

/// Sampling grids and quadrature helpers shared by the integration-heavy crates.
pub mod grid {
    /// `n` evenly spaced samples covering `[start, end]` inclusive.
    /// Returns a single-element grid when `n <= 1`.
    pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
        if n <= 1 {
            return vec![start];
        }
        let step = (end - start) / (n - 1) as f64;
        (0..n).map(|i| start + step * i as f64).collect()
    }

    /// `n` logarithmically spaced samples from `10^start_exp` to `10^end_exp` inclusive.
    pub fn logspace(start_exp: f64, end_exp: f64, n: usize) -> Vec<f64> {
        linspace(start_exp, end_exp, n)
            .into_iter()
            .map(|e| 10f64.powf(e))
            .collect()
    }

    /// Trapezoidal quadrature of samples `y` over the (possibly non-uniform) grid `x`.
    pub fn trapezoid(x: &[f64], y: &[f64]) -> f64 {
        debug_assert_eq!(x.len(), y.len());
        let mut total = 0.0;
        for i in 1..x.len().min(y.len()) {
            total += 0.5 * (y[i] + y[i - 1]) * (x[i] - x[i - 1]);
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::grid::{linspace, logspace, trapezoid};

    #[test]
    fn linspace_hits_both_endpoints() {
        let xs = linspace(0.0, 1.0, 5);
        assert_eq!(xs.len(), 5);
        assert_eq!(xs[0], 0.0);
        assert_eq!(xs[4], 1.0);
        assert!((xs[2] - 0.5).abs() < 1e-15);
    }

    #[test]
    fn logspace_spans_decades() {
        let xs = logspace(0.0, 4.0, 5);
        assert!((xs[0] - 1.0).abs() < 1e-12);
        assert!((xs[2] - 100.0).abs() < 1e-9);
        assert!((xs[4] - 10_000.0).abs() < 1e-6);
    }

    #[test]
    fn trapezoid_is_exact_for_linear_integrands() {
        let xs = linspace(0.0, 2.0, 9);
        let ys: Vec<f64> = xs.iter().map(|&x| 3.0 * x + 1.0).collect();
        // integral of 3x + 1 over [0, 2] = 8
        assert!((trapezoid(&xs, &ys) - 8.0).abs() < 1e-12);
    }
}
