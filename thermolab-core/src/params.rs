//! Module containing physical constants and simulation parameters.

use crate::imports::*;

/// Universal gas constant, J/(mol·K)
pub const R_GAS: f64 = 8.314;
/// Faraday constant, C/mol
pub const FARADAY: f64 = 96_485.0;
/// Standard gravity used to report acceleration in g, m/s²
pub const G_ACCEL: f64 = 9.81;

/// Unit conversions that should NEVER change
pub const KMH_PER_MPS: f64 = 3.6;
pub const S_PER_H: f64 = 3_600.0;
pub const W_PER_KW: f64 = 1_000.0;
pub const M_PER_KM: f64 = 1_000.0;
pub const WH_PER_KWH: f64 = 1_000.0;

/// First-order pedal response rates, in full pedal travel per second
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PedalResponse {
    /// rate at which the accelerator level rises while held
    pub gas_rise_per_s: f64,
    /// rate at which the accelerator level falls once released
    pub gas_fall_per_s: f64,
    /// rate at which the brake level rises while held
    pub brake_rise_per_s: f64,
    /// rate at which the brake level falls once released
    pub brake_fall_per_s: f64,
}

impl Default for PedalResponse {
    fn default() -> Self {
        Self {
            gas_rise_per_s: 2.5,
            gas_fall_per_s: 4.0,
            brake_rise_per_s: 4.0,
            brake_fall_per_s: 6.0,
        }
    }
}

impl ObjState for PedalResponse {
    fn validate(&self) -> ValidationResults {
        let mut errors = ValidationErrors::new();
        chk_num_gtz_fin(&mut errors, self.gas_rise_per_s, "Gas rise rate");
        chk_num_gtz_fin(&mut errors, self.gas_fall_per_s, "Gas fall rate");
        chk_num_gtz_fin(&mut errors, self.brake_rise_per_s, "Brake rise rate");
        chk_num_gtz_fin(&mut errors, self.brake_fall_per_s, "Brake fall rate");
        errors.make_err()
    }
}

/// Integrator parameters
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SimParams {
    /// largest time step a single tick may integrate over, s
    pub dt_max_s: f64,
    /// state of charge at session start and after reset, %
    pub soc_init_pct: f64,
    pub pedal_response: PedalResponse,
    /// electrical draw while fully idle (stopped, accelerator released), kW
    pub idle_drain_kw: f64,
    /// speed below which regenerative braking is unavailable, m/s
    pub regen_speed_min_mps: f64,
    /// speed below which road load (aero + rolling) is ignored, m/s
    pub drag_speed_min_mps: f64,
    /// whether [`SimDrive`](crate::simdrive::SimDrive) keeps every telemetry snapshot
    pub save_history: bool,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            dt_max_s: 0.1,
            soc_init_pct: 80.0,
            pedal_response: Default::default(),
            idle_drain_kw: 1.0,
            regen_speed_min_mps: 1.0,
            drag_speed_min_mps: 0.1,
            save_history: false,
        }
    }
}

impl ObjState for SimParams {
    fn validate(&self) -> ValidationResults {
        let mut errors = ValidationErrors::new();
        chk_num_gtz_fin(&mut errors, self.dt_max_s, "Max time step");
        chk_num_in_range(&mut errors, self.soc_init_pct, 0.0, 100.0, "Initial SOC");
        validate_field(&mut errors, &self.pedal_response, "Pedal response");
        chk_num_gez_fin(&mut errors, self.idle_drain_kw, "Idle drain");
        chk_num_gez_fin(&mut errors, self.regen_speed_min_mps, "Regen min speed");
        chk_num_gez_fin(&mut errors, self.drag_speed_min_mps, "Drag min speed");
        errors.make_err()
    }
}

impl SerdeAPI for SimParams {
    fn init(&mut self) -> anyhow::Result<()> {
        self.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_are_valid() {
        assert!(SimParams::default().is_valid());
    }

    #[test]
    fn test_partial_yaml_falls_back_to_defaults() {
        let params = SimParams::from_yaml("dt_max_s: 0.05\nsave_history: true\n").unwrap();
        assert_eq!(params.dt_max_s, 0.05);
        assert!(params.save_history);
        assert_eq!(params.soc_init_pct, 80.0);
        assert_eq!(params.pedal_response, PedalResponse::default());
    }

    #[test]
    fn test_partial_pedal_response_falls_back_to_defaults() {
        let params = SimParams::from_yaml("pedal_response:\n  gas_rise_per_s: 5.0\n").unwrap();
        assert_eq!(params.pedal_response.gas_rise_per_s, 5.0);
        assert_eq!(params.pedal_response.brake_fall_per_s, 6.0);
        assert_eq!(params.dt_max_s, 0.1);
    }

    #[test]
    fn test_invalid_params_report_every_field() {
        let mut params = SimParams::default();
        params.soc_init_pct = 120.0;
        params.pedal_response.brake_fall_per_s = -1.0;
        let errors = params.validate().unwrap_err();
        let shown = format!("{errors}");
        assert!(shown.contains("Initial SOC"));
        assert!(shown.contains("Brake fall rate"));
        assert!(SimParams::from_json(serde_json::to_string(&params).unwrap()).is_err());
    }
}
