//! Tabulated thermochemistry and the equilibrium models built on it.

use crate::imports::*;
use crate::utils::interp::Interp1D;

pub mod equilibrium;
pub mod fuel_cell;
pub mod reforming;

/// Temperatures at which the Gibbs energy tables are given, K
pub const TEMPS_K: [f64; 7] = [298.15, 500.0, 1000.0, 1500.0, 2000.0, 2500.0, 3000.0];

/// Looks `temp_k` up in a Gibbs energy table, warning when the query lands
/// far outside the tabulated range and gets clamped to an edge.
pub(crate) fn gibbs_lookup(table: &Interp1D, temp_k: f64, what: &str) -> f64 {
    let x = table.x();
    let (t_min, t_max) = (x[0], x[x.len() - 1]);
    if temp_k < 0.5 * t_min || temp_k > 1.5 * t_max {
        log::warn!(
            "{what}: T = {temp_k} K is far outside the table range [{t_min}, {t_max}] K, clamping"
        );
    }
    table.interpolate(temp_k)
}

/// Samples over a temperature x pressure grid, rows = pressure, cols = temperature
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Surface {
    pub temps_k: Array1<f64>,
    pub pressures_atm: Array1<f64>,
    pub values: Array2<f64>,
}

impl Surface {
    pub fn from_fn<F: Fn(f64, f64) -> f64>(
        temps_k: Array1<f64>,
        pressures_atm: Array1<f64>,
        f: F,
    ) -> Self {
        let values = Array2::from_shape_fn((pressures_atm.len(), temps_k.len()), |(i, j)| {
            f(temps_k[j], pressures_atm[i])
        });
        Self {
            temps_k,
            pressures_atm,
            values,
        }
    }
}
