#![allow(clippy::field_reassign_with_default)]
// #![warn(missing_docs)]

//! Crate containing the computational core of the thermolab calculators:
//! - piecewise-linear table interpolation for tabulated Gibbs energies
//! - the methane steam-reforming equilibrium solver and fuel-cell voltage models
//! - a real-time, tick-driven battery-electric powertrain simulation
//!
//! # Logging
//! The crate emits through the [`log`] facade and never installs a logger itself.

#[macro_use]
pub mod macros;

pub mod combo_error;
pub mod drive_script;
pub mod imports;
pub mod params;
pub mod prelude;
pub mod simdrive;
pub mod thermo;
pub mod traits;
pub mod utils;
pub mod validate;
pub mod vehicle;
