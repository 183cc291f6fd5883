//! Methane steam reforming, CH₄ + H₂O ⇌ CO + 3H₂.

use super::equilibrium::{solve_extent, MoleFractions};
use super::{gibbs_lookup, Surface, TEMPS_K};
use crate::imports::*;
use crate::utils::interp::Interp1D;
use lazy_static::lazy_static;

/// Gibbs energy of reaction at [`TEMPS_K`], ΔG_CO − ΔG_CH₄ − ΔG_H₂O(g), kJ/mol
pub const DG_REFORM_KJ_PER_MOL: [f64; 7] = [
    -137.163 - (-50.768) - (-228.582),
    -155.414 - (-32.741) - (-219.051),
    -200.275 - 19.492 - (-192.590),
    -243.740 - 74.918 - (-164.376),
    -286.034 - 130.802 - (-135.528),
    -327.356 - 186.622 - (-106.416),
    -367.816 - 242.332 - (-77.163),
];

/// Pressures compared at a single temperature, atm
pub const SWEEP_PRESSURES_ATM: [f64; 3] = [1.0, 10.0, 100.0];
/// Pressure axis of the bundled H₂ fraction surface, atm
pub const SURFACE_PRESSURES_ATM: [f64; 9] = [0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 20.0, 50.0, 100.0];
/// Temperature span of the bundled H₂ fraction surface, K
pub const SURFACE_TEMP_RANGE_K: (f64, f64) = (600.0, 1500.0);

lazy_static! {
    static ref GIBBS_REFORM: Interp1D = Interp1D::from_const_table(&TEMPS_K, &DG_REFORM_KJ_PER_MOL);
}

/// Gibbs energy of reaction at `temp_k`, kJ/mol
pub fn gibbs_kj_per_mol(temp_k: f64) -> f64 {
    gibbs_lookup(&GIBBS_REFORM, temp_k, "steam reforming")
}

/// Equilibrium constant at `temp_k`, floored at the smallest positive `f64`
/// where the exponent underflows (cryogenic temperatures)
pub fn kp(temp_k: f64) -> f64 {
    (-gibbs_kj_per_mol(temp_k) * 1e3 / (R_GAS * temp_k))
        .exp()
        .max(f64::MIN_POSITIVE)
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ReformingEquilibrium {
    pub temp_k: f64,
    pub pressure_atm: f64,
    pub gibbs_kj_per_mol: f64,
    pub kp: f64,
    /// fractional conversion of CH₄
    pub extent: f64,
    pub fractions: MoleFractions,
}

/// Equilibrium composition at `temp_k` and total pressure `pressure_atm`
pub fn equilibrium(temp_k: f64, pressure_atm: f64) -> ReformingEquilibrium {
    let gibbs = gibbs_kj_per_mol(temp_k);
    let kp = kp(temp_k);
    let extent = solve_extent(kp, pressure_atm);
    ReformingEquilibrium {
        temp_k,
        pressure_atm,
        gibbs_kj_per_mol: gibbs,
        kp,
        extent,
        fractions: MoleFractions::from_extent(extent),
    }
}

/// [`equilibrium`] at `temp_k` for each of `pressures_atm`
pub fn pressure_sweep(temp_k: f64, pressures_atm: &[f64]) -> Vec<ReformingEquilibrium> {
    pressures_atm
        .iter()
        .map(|&p| equilibrium(temp_k, p))
        .collect()
}

/// Equilibrium H₂ mole fraction, rows = pressure, cols = temperature
pub fn h2_fraction_surface(temps_k: Array1<f64>, pressures_atm: &[f64]) -> Surface {
    Surface::from_fn(temps_k, Array1::from_vec(pressures_atm.to_vec()), |t, p| {
        equilibrium(t, p).fractions.h2
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thermo::equilibrium::EXTENT_STARVED;

    #[test]
    fn test_table_is_valid() {
        assert!(Interp1D::new(TEMPS_K.to_vec(), DG_REFORM_KJ_PER_MOL.to_vec()).is_ok());
        assert_almost_eq!(DG_REFORM_KJ_PER_MOL[0], 142.187);
    }

    #[test]
    fn test_kp_increases_with_temperature() {
        let kps: Vec<f64> = utils::linspace(300.0, 3000.0, 50).mapv(kp).to_vec();
        assert!(kps.windows(2).all(|w| w[0] < w[1]), "{}", format_dbg!(kps));
        assert!(kp(298.15) < 1e-20);
        assert!(kp(1200.0) > 1.0);
    }

    #[test]
    fn test_cryogenic_temperature_takes_starved_shortcut() {
        assert!(kp(20.0) > 0.0);
        let eq = equilibrium(20.0, 1.0);
        assert_eq!(eq.extent, EXTENT_STARVED);
        assert!((eq.fractions.total() - 1.0).abs() < 1e-6);
        assert_eq!(equilibrium(1.0, 100.0).extent, EXTENT_STARVED);
    }

    #[test]
    fn test_h2_fraction_falls_with_pressure() {
        let sweep = pressure_sweep(900.0, &SWEEP_PRESSURES_ATM);
        assert_eq!(sweep.len(), 3);
        assert!(sweep.windows(2).all(|w| w[0].fractions.h2 > w[1].fractions.h2));
        for eq in &sweep {
            assert!((eq.fractions.total() - 1.0).abs() < 1e-6);
            assert_eq!(eq.kp, sweep[0].kp);
        }
    }

    #[test]
    fn test_h2_surface() {
        let temps = utils::linspace(SURFACE_TEMP_RANGE_K.0, SURFACE_TEMP_RANGE_K.1, 20);
        let surface = h2_fraction_surface(temps, &SURFACE_PRESSURES_ATM);
        assert_eq!(surface.values.dim(), (9, 20));
        for row in surface.values.rows() {
            // hotter favours conversion
            assert!(row[19] > row[0]);
        }
        for col in surface.values.columns() {
            assert!(col.windows(2).into_iter().all(|w| w[0] >= w[1]));
        }
        assert!(surface.values.iter().all(|&h2| h2 > 0.0 && h2 < 0.75));
    }
}
