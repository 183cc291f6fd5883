use crate::imports::*;

/// Pedal intent sampled from the host once per tick
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PedalIntent {
    /// accelerator held
    pub gas: bool,
    /// brake held
    pub brake: bool,
}

impl PedalIntent {
    pub const RELEASED: Self = Self {
        gas: false,
        brake: false,
    };
    pub const GAS: Self = Self {
        gas: true,
        brake: false,
    };
    pub const BRAKE: Self = Self {
        gas: false,
        brake: true,
    };
}

/// Lumped vehicle state advanced once per tick by [`advance`](super::advance)
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SimState {
    /// longitudinal speed, m/s, never negative
    pub speed_mps: f64,
    /// battery state of charge, %, within [0, 100]
    pub soc_pct: f64,
    /// smoothed accelerator level, [0, 1]
    pub gas: f64,
    /// smoothed brake level, [0, 1]
    pub brake: f64,
    /// cyclic animation phase of the power-flow display, wraps within (-1, 1)
    pub phase: f64,
    /// wheel rotation angle, rad, wraps modulo 2π
    pub rot_rad: f64,
    /// cumulative distance, m
    pub dist_m: f64,
    /// cumulative magnitude of electrical energy moved, kW·s
    pub energy_kws: f64,
}

impl SimState {
    /// State at session start: stopped, pedals released, nothing accumulated
    pub fn new(soc_init_pct: f64) -> Self {
        Self {
            speed_mps: 0.0,
            soc_pct: soc_init_pct,
            gas: 0.0,
            brake: 0.0,
            phase: 0.0,
            rot_rad: 0.0,
            dist_m: 0.0,
            energy_kws: 0.0,
        }
    }

    pub fn dist_km(&self) -> f64 {
        self.dist_m / M_PER_KM
    }

    pub fn energy_kwh(&self) -> f64 {
        self.energy_kws / S_PER_H
    }

    /// Average consumption since start, Wh/km, once more than 10 m have been covered
    pub fn efficiency_wh_per_km(&self) -> Option<f64> {
        let dist_km = self.dist_km();
        if dist_km > 0.01 {
            Some(self.energy_kwh() * WH_PER_KWH / dist_km)
        } else {
            None
        }
    }
}

impl Default for SimState {
    fn default() -> Self {
        Self::new(SimParams::default().soc_init_pct)
    }
}

/// Moves a pedal level toward 1 while `held`, toward 0 otherwise
pub(super) fn smooth_pedal(level: f64, held: bool, rise_per_s: f64, fall_per_s: f64, dt: f64) -> f64 {
    if held {
        (level + dt * rise_per_s).clamp(0.0, 1.0)
    } else {
        (level - dt * fall_per_s).clamp(0.0, 1.0)
    }
}
