//! Real-time powertrain integrator: one [`SimDrive`] per session, advanced by
//! [`SimDrive::tick`] with the elapsed host time and the current pedal intent.

use crate::drive_script::DriveScript;
use crate::imports::*;
use crate::vehicle::VehicleSpec;

pub mod drive_state;
pub mod sim_state;
pub mod telemetry;

pub use drive_state::DriveState;
pub use sim_state::{PedalIntent, SimState};
pub use telemetry::TelemetrySnapshot;

use sim_state::smooth_pedal;
use std::f64::consts::TAU;

/// Advances `state` by one tick and derives the telemetry for it.
/// Pure: the same inputs always give the same outputs.
///
/// # Arguments
/// - `veh`: vehicle being driven
/// - `params`: integrator parameters
/// - `state`: state at the start of the tick
/// - `dt`: elapsed time, s, clamped to [0, `params.dt_max_s`]
/// - `intent`: pedals held during the tick
pub fn advance(
    veh: &VehicleSpec,
    params: &SimParams,
    state: &SimState,
    dt: f64,
    intent: PedalIntent,
) -> (SimState, TelemetrySnapshot) {
    let dt = clamp_dt(dt, params.dt_max_s);
    let pr = &params.pedal_response;
    let gas = smooth_pedal(state.gas, intent.gas, pr.gas_rise_per_s, pr.gas_fall_per_s, dt);
    let brake = smooth_pedal(
        state.brake,
        intent.brake,
        pr.brake_rise_per_s,
        pr.brake_fall_per_s,
        dt,
    );

    // forces
    let speed_prev = state.speed_mps;
    let prop_force = gas * veh.max_prop_force_n;
    let brake_force = brake * veh.max_brake_force_n;
    let aero_force = veh.aero_drag_n(speed_prev);
    let drag_force = if speed_prev > params.drag_speed_min_mps {
        aero_force + veh.rolling_res_n
    } else {
        0.0
    };
    let mut net_force = prop_force - drag_force;
    if speed_prev > 0.0 {
        net_force -= brake_force;
    }
    let accel = net_force / veh.mass_kg;
    let speed = (speed_prev + accel * dt).max(0.0);

    // motor
    let wheel_omega = veh.wheel_omega(speed);

    // electrical
    let mut regen_kw = 0.0;
    let mut elec_kw = if gas > 0.0 {
        prop_force * speed / veh.motor_eff / W_PER_KW
    } else if brake > 0.0 && speed > params.regen_speed_min_mps {
        regen_kw = (brake_force * speed * veh.regen_eff / W_PER_KW).min(veh.regen_max_kw);
        -regen_kw
    } else {
        0.0
    };
    elec_kw += veh.aux_kw;
    if speed == 0.0 && gas == 0.0 {
        elec_kw = params.idle_drain_kw;
    }

    let soc_pct = (state.soc_pct
        - elec_kw * dt / S_PER_H / veh.demo_capacity_kwh * 100.0)
        .clamp(0.0, 100.0);
    if soc_pct != state.soc_pct && (soc_pct == 0.0 || soc_pct == 100.0) {
        log::info!("SOC saturated at {soc_pct} %");
    }

    // power-flow animation
    let (phase_speed, phase_dir) = if elec_kw > 2.0 {
        ((elec_kw / 20.0).clamp(0.2, 8.0), 1.0)
    } else if elec_kw < -1.0 {
        ((elec_kw.abs() / 20.0).clamp(0.2, 8.0), -1.0)
    } else {
        (0.0, 0.0)
    };

    let next = SimState {
        speed_mps: speed,
        soc_pct,
        gas,
        brake,
        phase: (state.phase + phase_speed * phase_dir * dt) % 1.0,
        rot_rad: (state.rot_rad - wheel_omega * dt) % TAU,
        dist_m: state.dist_m + speed * dt,
        energy_kws: state.energy_kws + elec_kw.abs() * dt,
    };

    let telemetry = TelemetrySnapshot {
        speed_mps: speed,
        speed_kmh: speed * KMH_PER_MPS,
        motor_torque_nm: veh.motor_torque_nm(prop_force),
        motor_rpm: veh.motor_rpm(speed),
        accel_g: accel / G_ACCEL,
        elec_kw,
        batt_current_a: elec_kw * W_PER_KW / veh.battery_voltage_v,
        drag_kw: aero_force * speed / W_PER_KW,
        regen_kw,
        soc_pct,
        gas,
        brake,
        dist_km: next.dist_km(),
        energy_used_kwh: next.energy_kwh(),
        efficiency_wh_per_km: next.efficiency_wh_per_km(),
        drive_state: DriveState::classify(gas, brake, speed, regen_kw),
        phase: next.phase,
        rot_rad: next.rot_rad,
    };

    (next, telemetry)
}

/// Host clocks can jump (tab switches, suspends) or go backwards
fn clamp_dt(dt: f64, dt_max: f64) -> f64 {
    if dt.is_nan() {
        0.0
    } else {
        dt.clamp(0.0, dt_max)
    }
}

/// Owns one simulation session
#[derive(Debug, Clone, PartialEq)]
pub struct SimDrive {
    veh: VehicleSpec,
    sim_params: SimParams,
    state: SimState,
    /// intent latched from the host, used by [`SimDrive::step`]
    intent: PedalIntent,
    telemetry: TelemetrySnapshot,
    /// elapsed simulated time, s
    time_s: f64,
    history: Vec<TelemetrySnapshot>,
}

impl SimDrive {
    /// # Arguments
    /// - `veh`: vehicle to drive
    /// - `sim_params`: integrator parameters, defaults if `None`
    pub fn new(veh: VehicleSpec, sim_params: Option<SimParams>) -> anyhow::Result<Self> {
        let sim_params = sim_params.unwrap_or_default();
        veh.validate()
            .with_context(|| format!("Invalid vehicle spec {:?}", veh.name))?;
        sim_params.validate().context("Invalid sim params")?;
        let state = SimState::new(sim_params.soc_init_pct);
        Ok(Self {
            telemetry: TelemetrySnapshot::from_state(&veh, &state),
            veh,
            sim_params,
            state,
            intent: PedalIntent::RELEASED,
            time_s: 0.0,
            history: Vec::new(),
        })
    }

    /// Latches `intent` and advances the session by `dt` seconds
    pub fn tick(&mut self, dt: f64, intent: PedalIntent) -> (SimState, TelemetrySnapshot) {
        self.intent = intent;
        self.step(dt)
    }

    /// Advances the session by `dt` seconds with the latched intent
    pub fn step(&mut self, dt: f64) -> (SimState, TelemetrySnapshot) {
        if dt > self.sim_params.dt_max_s {
            log::debug!(
                "{}",
                format_dbg!((dt, "clamped to", self.sim_params.dt_max_s))
            );
        }
        let (state, telemetry) =
            advance(&self.veh, &self.sim_params, &self.state, dt, self.intent);
        self.time_s += clamp_dt(dt, self.sim_params.dt_max_s);
        self.state = state;
        self.telemetry = telemetry;
        if self.sim_params.save_history {
            self.history.push(telemetry);
        }
        (state, telemetry)
    }

    /// Latches `intent` for subsequent calls to [`SimDrive::step`]
    pub fn set_intent(&mut self, intent: PedalIntent) {
        self.intent = intent;
    }

    /// Restores the initial state and clears latched intent and history
    pub fn reset(&mut self) {
        self.state = SimState::new(self.sim_params.soc_init_pct);
        self.intent = PedalIntent::RELEASED;
        self.telemetry = TelemetrySnapshot::from_state(&self.veh, &self.state);
        self.time_s = 0.0;
        self.history.clear();
    }

    /// Ticks through `script` at its fixed step, sampling intent before each
    /// tick, and returns the final telemetry
    pub fn walk(&mut self, script: &DriveScript) -> anyhow::Result<TelemetrySnapshot> {
        script
            .validate()
            .with_context(|| format!("Invalid drive script {:?}", script.name))?;
        if script.dt_s > self.sim_params.dt_max_s {
            log::warn!(
                "Drive script {:?} step of {} s exceeds the max tick of {} s; ticks will be clamped",
                script.name,
                script.dt_s,
                self.sim_params.dt_max_s
            );
        }
        let n_ticks = script.n_ticks();
        log::debug!(
            "walking {:?}: {n_ticks} ticks of {} s",
            script.name,
            script.dt_s
        );
        for i in 0..n_ticks {
            let intent = script.intent_at(i as f64 * script.dt_s);
            self.tick(script.dt_s, intent);
        }
        log::debug!("{}", format_dbg!(self.telemetry.summary()));
        Ok(self.telemetry)
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    /// Overwrites the session state, e.g. to start from speed
    pub fn set_state(&mut self, state: SimState) {
        self.state = state;
        self.telemetry = TelemetrySnapshot::from_state(&self.veh, &self.state);
    }

    /// Telemetry from the latest tick, or derived from the initial state
    pub fn telemetry(&self) -> &TelemetrySnapshot {
        &self.telemetry
    }

    /// Every snapshot since the last reset, empty unless
    /// [`SimParams::save_history`] is set
    pub fn history(&self) -> &[TelemetrySnapshot] {
        &self.history
    }

    pub fn time_s(&self) -> f64 {
        self.time_s
    }

    pub fn veh(&self) -> &VehicleSpec {
        &self.veh
    }

    pub fn sim_params(&self) -> &SimParams {
        &self.sim_params
    }
}
