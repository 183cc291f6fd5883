use super::drive_state::DriveState;
use super::sim_state::SimState;
use crate::imports::*;
use crate::vehicle::VehicleSpec;

/// Everything the dashboard shows after a tick
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct TelemetrySnapshot {
    pub speed_mps: f64,
    pub speed_kmh: f64,
    /// motor shaft torque from propulsion only, N·m
    pub motor_torque_nm: f64,
    pub motor_rpm: f64,
    /// longitudinal acceleration, g
    pub accel_g: f64,
    /// signed battery power, kW, negative while recovering energy
    pub elec_kw: f64,
    /// signed battery current, A, negative while charging
    pub batt_current_a: f64,
    /// power dissipated by aerodynamic drag, kW
    pub drag_kw: f64,
    /// power recovered by regenerative braking, kW
    pub regen_kw: f64,
    pub soc_pct: f64,
    pub gas: f64,
    pub brake: f64,
    pub dist_km: f64,
    pub energy_used_kwh: f64,
    /// `None` until more than 10 m have been covered
    pub efficiency_wh_per_km: Option<f64>,
    pub drive_state: DriveState,
    pub phase: f64,
    pub rot_rad: f64,
}

impl TelemetrySnapshot {
    /// Snapshot that can be derived from `state` alone, with no tick in progress
    /// (no acceleration, no battery power).
    pub fn from_state(veh: &VehicleSpec, state: &SimState) -> Self {
        Self {
            speed_mps: state.speed_mps,
            speed_kmh: state.speed_mps * KMH_PER_MPS,
            motor_torque_nm: veh.motor_torque_nm(state.gas * veh.max_prop_force_n),
            motor_rpm: veh.motor_rpm(state.speed_mps),
            accel_g: 0.0,
            elec_kw: 0.0,
            batt_current_a: 0.0,
            drag_kw: veh.aero_drag_n(state.speed_mps) * state.speed_mps / W_PER_KW,
            regen_kw: 0.0,
            soc_pct: state.soc_pct,
            gas: state.gas,
            brake: state.brake,
            dist_km: state.dist_km(),
            energy_used_kwh: state.energy_kwh(),
            efficiency_wh_per_km: state.efficiency_wh_per_km(),
            drive_state: DriveState::classify(state.gas, state.brake, state.speed_mps, 0.0),
            phase: state.phase,
            rot_rad: state.rot_rad,
        }
    }

    /// One-line human readable summary
    pub fn summary(&self) -> String {
        let efficiency = match self.efficiency_wh_per_km {
            Some(wh_per_km) => format!("{wh_per_km:.0} Wh/km"),
            None => "--".into(),
        };
        format!(
            "{}: {:.1} km/h, {:.0} rpm, {:.1} kW, SOC {:.2} %, {:.3} km, {:.4} kWh, {}",
            self.drive_state,
            self.speed_kmh,
            self.motor_rpm,
            self.elec_kw,
            self.soc_pct,
            self.dist_km,
            self.energy_used_kwh,
            efficiency
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_snapshot_is_standby() {
        let veh = VehicleSpec::default();
        let snap = TelemetrySnapshot::from_state(&veh, &SimState::default());
        assert_eq!(snap.drive_state, DriveState::Standby);
        assert_eq!(snap.soc_pct, 80.0);
        assert_eq!(snap.efficiency_wh_per_km, None);
        assert!(snap.summary().starts_with("STANDBY: 0.0 km/h"));
        assert!(snap.summary().ends_with("--"));
    }

    #[test]
    fn test_snapshot_serializes_label_and_missing_efficiency() {
        let veh = VehicleSpec::default();
        let snap = TelemetrySnapshot::from_state(&veh, &SimState::default());
        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains("\"drive_state\":\"STANDBY\""));
        assert!(json.contains("\"efficiency_wh_per_km\":null"));
    }
}
