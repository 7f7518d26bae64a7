//! Lightsail mission physics: multilayer optics, radiative balance, and
//! relativistic kinematics under a diffraction-limited laser beam.
//!
//! The computation lives in the workspace member crates; this root crate
//! re-exports them so front-ends (CLI, notebooks, web) can depend on a
//! single library.

pub mod constants {
    pub use sail_core::constants::*;
}

pub mod units {
    pub use sail_core::units::*;
}

pub mod grid {
    pub use sail_core::grid::*;
}

pub mod solvers {
    pub use sail_solvers::*;
}

pub mod materials {
    pub use sail_materials::*;
}

pub mod optics {
    pub use sail_optics::*;
}

pub mod beam {
    pub use sail_beam::*;
}

pub mod thermal {
    pub use sail_thermal::*;
}

pub mod motion {
    pub use sail_motion::*;
}

pub mod sail {
    pub use sail_model::*;
}

pub mod export {
    pub use sail_export::*;
}

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
