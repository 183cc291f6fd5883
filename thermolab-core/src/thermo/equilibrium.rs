//! Equilibrium extent of CH₄ + H₂O ⇌ CO + 3H₂ at a given equilibrium constant
//! and total pressure, starting from an equimolar CH₄/H₂O feed.

use crate::imports::*;

/// Above this Kp the reaction is treated as complete
pub const KP_SATURATED: f64 = 1e12;
/// Below this Kp the reaction is treated as not proceeding
pub const KP_STARVED: f64 = 1e-12;
pub const EXTENT_SATURATED: f64 = 0.9999;
pub const EXTENT_STARVED: f64 = 1e-4;
/// Open search bracket is (`EXTENT_BRACKET`, 1 - `EXTENT_BRACKET`)
pub const EXTENT_BRACKET: f64 = 1e-6;
pub const BISECTION_ITERS: usize = 50;

/// Equilibrium expression minus `kp`, increasing in `x` over (0, 1)
pub fn residual(x: f64, kp: f64, p_total: f64) -> f64 {
    27.0 * x.powi(4) * p_total.powi(2) / (4.0 * (1.0 - x).powi(2) * (1.0 + x).powi(2)) - kp
}

/// Solves for the equilibrium extent `x` in (0, 1) by fixed-count bisection.
///
/// # Arguments
/// - `kp`: equilibrium constant, finite and > 0
/// - `p_total`: total pressure, atm, finite and > 0
pub fn solve_extent(kp: f64, p_total: f64) -> f64 {
    debug_assert!(kp > 0.0 && kp.is_finite(), "{}", format_dbg!(kp));
    debug_assert!(p_total > 0.0 && p_total.is_finite(), "{}", format_dbg!(p_total));
    if kp > KP_SATURATED {
        log::warn!("Kp = {kp:e} above {KP_SATURATED:e}, taking extent {EXTENT_SATURATED}");
        return EXTENT_SATURATED;
    }
    if kp < KP_STARVED {
        log::warn!("Kp = {kp:e} below {KP_STARVED:e}, taking extent {EXTENT_STARVED}");
        return EXTENT_STARVED;
    }
    let mut low = EXTENT_BRACKET;
    let mut high = 1.0 - EXTENT_BRACKET;
    for _ in 0..BISECTION_ITERS {
        let mid = (low + high) / 2.0;
        if residual(mid, kp, p_total) > 0.0 {
            high = mid;
        } else {
            low = mid;
        }
    }
    (low + high) / 2.0
}

/// Equilibrium mole fractions; total moles are 2 + 2x per 2 mol of feed
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct MoleFractions {
    pub ch4: f64,
    pub h2o: f64,
    pub co: f64,
    pub h2: f64,
}

impl MoleFractions {
    pub fn from_extent(x: f64) -> Self {
        let n_tot = 2.0 + 2.0 * x;
        Self {
            ch4: (1.0 - x) / n_tot,
            h2o: (1.0 - x) / n_tot,
            co: x / n_tot,
            h2: 3.0 * x / n_tot,
        }
    }

    pub fn total(&self) -> f64 {
        self.ch4 + self.h2o + self.co + self.h2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_kp_matches_closed_form() {
        // Kp = p = 1 reduces to √27·x² = 2(1 - x²)
        let exact = (2.0 / (2.0 + 27f64.sqrt())).sqrt();
        let x = solve_extent(1.0, 1.0);
        assert!((x - exact).abs() < 1e-6, "{}", format_dbg!((x, exact)));
    }

    #[test]
    fn test_residual_is_small_at_solution() {
        for kp in [1e-6, 1e-3, 0.5, 1.0, 42.0, 1e3, 1e6] {
            for p in [0.1, 1.0, 10.0, 100.0] {
                let x = solve_extent(kp, p);
                assert!(x > 0.0 && x < 1.0);
                let rel = (residual(x, kp, p) / kp).abs();
                assert!(rel < 1e-6, "{}", format_dbg!((kp, p, x, rel)));
            }
        }
    }

    #[test]
    fn test_degenerate_shortcuts() {
        assert_eq!(solve_extent(1e13, 1.0), EXTENT_SATURATED);
        assert_eq!(solve_extent(f64::MAX, 5.0), EXTENT_SATURATED);
        assert_eq!(solve_extent(1e-13, 1.0), EXTENT_STARVED);
    }

    #[test]
    fn test_higher_pressure_lowers_extent() {
        let extents: Vec<f64> = [1.0, 10.0, 100.0]
            .iter()
            .map(|&p| solve_extent(50.0, p))
            .collect();
        assert!(extents.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_mole_fraction_closure() {
        for x in [EXTENT_STARVED, 0.1, 0.5, 0.9, EXTENT_SATURATED] {
            let fr = MoleFractions::from_extent(x);
            assert!((fr.total() - 1.0).abs() < 1e-6);
            assert_eq!(fr.ch4, fr.h2o);
            assert_almost_eq!(fr.h2, 3.0 * fr.co);
        }
        let fr = MoleFractions::from_extent(solve_extent(1.0, 1.0));
        assert!((fr.total() - 1.0).abs() < 1e-6);
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn test_non_positive_pressure_panics() {
        solve_extent(1.0, 0.0);
    }
}
