//! Convenience module for exposing commonly used structs

pub use crate::drive_script::{DriveScript, PedalEvent};
pub use crate::params::{PedalResponse, SimParams};
pub use crate::simdrive::{
    advance, DriveState, PedalIntent, SimDrive, SimState, TelemetrySnapshot,
};
pub use crate::thermo::equilibrium::{solve_extent, MoleFractions};
pub use crate::thermo::fuel_cell::{gibbs_kj_per_mol, reversible_voltage};
pub use crate::thermo::reforming::{equilibrium, kp, ReformingEquilibrium};
pub use crate::traits::SerdeAPI;
pub use crate::utils::interp::Interp1D;
pub use crate::vehicle::VehicleSpec;
