//! Reversible voltage of a hydrogen fuel cell, H₂ + ½O₂ → H₂O(g).

use super::{gibbs_lookup, Surface, TEMPS_K};
use crate::imports::*;
use crate::utils::interp::Interp1D;
use lazy_static::lazy_static;

/// Gibbs energy of formation of H₂O(g) at [`TEMPS_K`], kJ/mol
pub const DG_H2O_G_KJ_PER_MOL: [f64; 7] = [
    -228.582, -219.051, -192.590, -164.376, -135.528, -106.416, -77.163,
];
/// Electrons transferred per H₂
pub const N_ELECTRONS: f64 = 2.0;

/// Temperature span of the bundled voltage curve and Gibbs surface, K
pub const TEMP_RANGE_K: (f64, f64) = (298.0, 3000.0);
/// H₂ partial pressure span of the bundled Gibbs surface, atm
pub const P_H2_RANGE_ATM: (f64, f64) = (0.2, 1.0);

lazy_static! {
    static ref GIBBS_H2O_G: Interp1D = Interp1D::from_const_table(&TEMPS_K, &DG_H2O_G_KJ_PER_MOL);
}

/// Gibbs energy of reaction at `temp_k`, kJ/mol
pub fn gibbs_kj_per_mol(temp_k: f64) -> f64 {
    gibbs_lookup(&GIBBS_H2O_G, temp_k, "H2O(g) formation")
}

/// Reversible (Nernst-free) cell voltage at `temp_k`, V
pub fn reversible_voltage(temp_k: f64) -> f64 {
    -gibbs_kj_per_mol(temp_k) * 1e3 / (N_ELECTRONS * FARADAY)
}

/// Gibbs energy of reaction corrected for H₂ partial pressure, kJ/mol
///
/// # Arguments
/// - `temp_k`: temperature, K
/// - `p_h2_atm`: H₂ partial pressure, atm, > 0
pub fn gibbs_at_partial_pressure(temp_k: f64, p_h2_atm: f64) -> f64 {
    gibbs_kj_per_mol(temp_k) + R_GAS * temp_k / 1e3 * p_h2_atm.ln()
}

/// Cell voltage from [`gibbs_at_partial_pressure`], V
pub fn voltage_at_partial_pressure(temp_k: f64, p_h2_atm: f64) -> f64 {
    -gibbs_at_partial_pressure(temp_k, p_h2_atm) * 1e3 / (N_ELECTRONS * FARADAY)
}

/// Reversible voltage sampled at `n_points` temperatures over [`TEMP_RANGE_K`]
pub fn voltage_curve(n_points: usize) -> (Array1<f64>, Array1<f64>) {
    let temps_k = utils::linspace(TEMP_RANGE_K.0, TEMP_RANGE_K.1, n_points);
    let volts = GIBBS_H2O_G
        .interpolate_many(&temps_k)
        .mapv(|dg| -dg * 1e3 / (N_ELECTRONS * FARADAY));
    (temps_k, volts)
}

/// Pressure-corrected Gibbs energy over [`TEMP_RANGE_K`] x [`P_H2_RANGE_ATM`]
pub fn gibbs_surface(n_temps: usize, n_pressures: usize) -> Surface {
    Surface::from_fn(
        utils::linspace(TEMP_RANGE_K.0, TEMP_RANGE_K.1, n_temps),
        utils::linspace(P_H2_RANGE_ATM.0, P_H2_RANGE_ATM.1, n_pressures),
        gibbs_at_partial_pressure,
    )
}
