//! Transfer-matrix optics for stratified thin-film stacks.
//!
//! Computes complex reflection and transmission amplitudes of a layered
//! stack with vacuum on both sides, via the characteristic-matrix method.
//! Both polarizations are solved so the power coefficients can be averaged
//! for unpolarized light.

use num_complex::Complex64;
use thiserror::Error;

/// One homogeneous film in the stack.
#[derive(Debug, Clone, Copy)]
pub struct Layer {
    /// Complex refractive index n + i·k at the wavelength being solved.
    pub index: Complex64,
    /// Signed thickness (m). Stack assembly stores layers with negative
    /// thickness; the engine's phase sign matches that convention.
    pub thickness_m: f64,
}

impl Layer {
    pub fn new(index: Complex64, thickness_m: f64) -> Self {
        Self {
            index,
            thickness_m,
        }
    }
}

/// Ordered front-to-back sequence of layers. Reversing the order models
/// illumination of the opposite face.
#[derive(Debug, Clone, Default)]
pub struct Stack {
    pub layers: Vec<Layer>,
}

impl Stack {
    pub fn new(layers: Vec<Layer>) -> Self {
        Self { layers }
    }

    /// The same stack illuminated from the back face.
    pub fn reversed(&self) -> Self {
        let mut layers = self.layers.clone();
        layers.reverse();
        Self { layers }
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }
}

/// Errors for malformed solve inputs.
#[derive(Debug, Error)]
pub enum OpticsError {
    #[error("stack must contain at least one layer")]
    EmptyStack,
    #[error("wavelength must be positive, got {0} m")]
    NonPositiveWavelength(f64),
    #[error("incidence angle must lie in [0, pi/2), got {0} rad")]
    InvalidAngle(f64),
}

/// Complex amplitude coefficients for both polarizations.
#[derive(Debug, Clone, Copy)]
pub struct AmplitudeCoefficients {
    pub r_p: Complex64,
    pub t_p: Complex64,
    pub r_s: Complex64,
    pub t_s: Complex64,
}

impl AmplitudeCoefficients {
    /// Unpolarized power reflectance (|r_p|² + |r_s|²)/2.
    pub fn reflectance(&self) -> f64 {
        0.5 * (self.r_p.norm_sqr() + self.r_s.norm_sqr())
    }

    /// Unpolarized power transmittance (|t_p|² + |t_s|²)/2.
    /// Valid as written because the ambient medium is vacuum on both sides.
    pub fn transmittance(&self) -> f64 {
        0.5 * (self.t_p.norm_sqr() + self.t_s.norm_sqr())
    }

    /// Fraction of incident power absorbed in the stack, 1 − R − T.
    pub fn absorptance(&self) -> f64 {
        1.0 - self.reflectance() - self.transmittance()
    }
}

#[derive(Clone, Copy)]
enum Polarization {
    S,
    P,
}

/// Solve the stack at `wavelength_m` and incidence angle `angle_rad`,
/// returning amplitude coefficients `(r_p, t_p, r_s, t_s)`.
pub fn solve(
    stack: &Stack,
    wavelength_m: f64,
    angle_rad: f64,
) -> Result<AmplitudeCoefficients, OpticsError> {
    if stack.is_empty() {
        return Err(OpticsError::EmptyStack);
    }
    if wavelength_m <= 0.0 {
        return Err(OpticsError::NonPositiveWavelength(wavelength_m));
    }
    if !(0.0..std::f64::consts::FRAC_PI_2).contains(&angle_rad) {
        return Err(OpticsError::InvalidAngle(angle_rad));
    }

    let sin0 = angle_rad.sin();
    let cos0 = angle_rad.cos();
    let (r_s, t_s) = polarized(stack, wavelength_m, sin0, cos0, Polarization::S);
    let (r_p, t_p) = polarized(stack, wavelength_m, sin0, cos0, Polarization::P);
    Ok(AmplitudeCoefficients { r_p, t_p, r_s, t_s })
}

fn polarized(
    stack: &Stack,
    wavelength_m: f64,
    sin0: f64,
    cos0: f64,
    polarization: Polarization,
) -> (Complex64, Complex64) {
    let i = Complex64::i();
    let one = Complex64::new(1.0, 0.0);

    // Characteristic matrix product over the stack, front to back.
    let mut m00 = one;
    let mut m01 = Complex64::new(0.0, 0.0);
    let mut m10 = Complex64::new(0.0, 0.0);
    let mut m11 = one;

    for layer in &stack.layers {
        let n = layer.index;
        // Snell's law against the vacuum ambient: n·sinθ = sinθ₀.
        let cos_t = (one - (sin0 * sin0) / (n * n)).sqrt();
        let admittance = match polarization {
            Polarization::S => n * cos_t,
            Polarization::P => n / cos_t,
        };
        // Stored thickness is negative: δ = 2π·n·cosθ·t/λ keeps Im δ < 0
        // for k > 0, selecting the decaying branch of the field.
        let phase = n * cos_t * (std::f64::consts::TAU * layer.thickness_m / wavelength_m);
        let (c, s) = (phase.cos(), phase.sin());

        let a00 = c;
        let a01 = i * s / admittance;
        let a10 = i * admittance * s;
        let a11 = c;

        let b00 = m00 * a00 + m01 * a10;
        let b01 = m00 * a01 + m01 * a11;
        let b10 = m10 * a00 + m11 * a10;
        let b11 = m10 * a01 + m11 * a11;
        m00 = b00;
        m01 = b01;
        m10 = b10;
        m11 = b11;
    }

    // Vacuum admittance on both sides of the stack.
    let ambient = match polarization {
        Polarization::S => Complex64::new(cos0, 0.0),
        Polarization::P => Complex64::new(1.0 / cos0, 0.0),
    };
    let b = m00 + m01 * ambient;
    let c = m10 + m11 * ambient;
    let denominator = ambient * b + c;
    let r = (ambient * b - c) / denominator;
    let t = 2.0 * ambient / denominator;
    (r, t)
}
