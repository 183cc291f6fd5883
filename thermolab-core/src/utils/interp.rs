//! 1-D table interpolation over monotonically increasing, non-repeating grids.
//!
//! Only piecewise-linear interpolation is provided, and points outside the
//! grid are clamped to the first/last value. The tabulated thermochemistry
//! data is historically described as "pchip" interpolated, but the curves and
//! surfaces built on top of it are sampled from the linear scheme, so a cubic
//! scheme must not be swapped in here.
//!
//! # Example
//! ```
//! use thermolab_core::utils::interp::Interp1D;
//! // f(x) = 0.2 * x + 0.2
//! let interp = Interp1D::new(vec![0., 1., 2.], vec![0.2, 0.4, 0.6]).unwrap();
//! assert_eq!(interp.interpolate(1.0), 0.4);
//! assert!((interp.interpolate(1.5) - 0.5).abs() < 1e-12);
//! assert_eq!(interp.interpolate(-1.), 0.2); // clamped below grid
//! assert_eq!(interp.interpolate(2.2), 0.6); // clamped above grid
//! ```

use crate::imports::*;

use std::marker::PhantomData; // used as a private field to disallow direct instantiation

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(try_from = "Interp1DData")]
pub struct Interp1D {
    x: Vec<f64>,
    f_x: Vec<f64>,
    #[serde(skip)]
    _phantom: PhantomData<()>, // phantom private field to prevent direct instantiation in other modules
}

/// Unvalidated shape used for deserialization
#[derive(Deserialize)]
struct Interp1DData {
    x: Vec<f64>,
    f_x: Vec<f64>,
}

impl TryFrom<Interp1DData> for Interp1D {
    type Error = anyhow::Error;

    fn try_from(data: Interp1DData) -> anyhow::Result<Self> {
        Self::new(data.x, data.f_x)
    }
}

impl Interp1D {
    /// Create and validate 1-D interpolator.
    ///
    /// Malformed tables are rejected here so that [`Interp1D::interpolate`]
    /// can never produce NaN from a degenerate grid.
    pub fn new(x: Vec<f64>, f_x: Vec<f64>) -> anyhow::Result<Self> {
        let interp = Self {
            x,
            f_x,
            _phantom: PhantomData,
        };
        interp.validate()?;
        Ok(interp)
    }

    /// Builds a table from compile-time data whose validity is covered by tests
    pub(crate) fn from_const_table(x: &[f64], f_x: &[f64]) -> Self {
        let interp = Self {
            x: x.to_vec(),
            f_x: f_x.to_vec(),
            _phantom: PhantomData,
        };
        debug_assert!(interp.validate().is_ok(), "{}", format_dbg!(interp));
        interp
    }

    fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.x.len() >= 2,
            "At least 2 data points are required for interpolation: x = {:?}, f_x = {:?}",
            self.x,
            self.f_x,
        );
        ensure!(
            self.x.len() == self.f_x.len(),
            "Supplied grid and values are not compatible shapes: {} x-coordinates, {} values",
            self.x.len(),
            self.f_x.len()
        );
        ensure!(
            self.x.iter().chain(self.f_x.iter()).all(|v| v.is_finite()),
            "Supplied grid and values must be finite: x = {:?}, f_x = {:?}",
            self.x,
            self.f_x
        );
        check_monotonicity(&self.x)
            .with_context(|| "Supplied x-coordinates must be sorted and non-repeating")?;
        Ok(())
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn f_x(&self) -> &[f64] {
        &self.f_x
    }

    /// Linearly interpolate at `point`, clamping to the end values outside the grid.
    pub fn interpolate(&self, point: f64) -> f64 {
        let last = self.x.len() - 1;
        if point <= self.x[0] {
            return self.f_x[0];
        }
        if point >= self.x[last] {
            return self.f_x[last];
        }
        let upper_index = self.x.partition_point(|&x| x < point);
        if self.x[upper_index] == point {
            return self.f_x[upper_index];
        }
        let lower_index = upper_index - 1;
        let frac =
            (point - self.x[lower_index]) / (self.x[lower_index + 1] - self.x[lower_index]);
        self.f_x[lower_index] + frac * (self.f_x[lower_index + 1] - self.f_x[lower_index])
    }

    /// Interpolate at every point of `points`
    pub fn interpolate_many(&self, points: &Array1<f64>) -> Array1<f64> {
        points.mapv(|p| self.interpolate(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gibbs_like() -> Interp1D {
        Interp1D::new(
            vec![298.15, 500., 1000., 1500., 2000., 2500., 3000.],
            vec![
                -228.582, -219.051, -192.590, -164.376, -135.528, -106.416, -77.163,
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_invalid_args() {
        assert!(Interp1D::new(vec![], vec![]).is_err());
        assert!(Interp1D::new(vec![0.], vec![1.]).is_err());
        assert!(Interp1D::new(vec![0., 1.], vec![1.]).is_err());
        assert!(Interp1D::new(vec![0., 1., 1.], vec![1., 2., 3.]).is_err());
        assert!(Interp1D::new(vec![1., 0.], vec![1., 2.]).is_err());
        assert!(Interp1D::new(vec![0., f64::NAN], vec![1., 2.]).is_err());
        assert!(Interp1D::new(vec![0., 1.], vec![1., f64::INFINITY]).is_err());
    }

    #[test]
    fn test_clamps_at_boundaries() {
        let interp = gibbs_like();
        for x in [-1e9, 0., 298.0, 298.15] {
            assert_eq!(interp.interpolate(x), -228.582);
        }
        for x in [3000., 3000.01, 1e9] {
            assert_eq!(interp.interpolate(x), -77.163);
        }
    }

    #[test]
    fn test_exact_at_knots() {
        let interp = gibbs_like();
        for (x, y) in interp.x().iter().zip(interp.f_x()) {
            assert_eq!(interp.interpolate(*x), *y);
        }
    }

    #[test]
    fn test_blend_lies_between_neighbors() {
        let interp = gibbs_like();
        for w in interp.x().windows(2).zip(interp.f_x().windows(2)) {
            let (xs, ys) = w;
            let (lo, hi) = (ys[0].min(ys[1]), ys[0].max(ys[1]));
            for frac in [0.01, 0.25, 0.5, 0.75, 0.99] {
                let y = interp.interpolate(xs[0] + frac * (xs[1] - xs[0]));
                assert!(lo <= y && y <= hi, "{}", format_dbg!((xs, y)));
            }
        }
    }

    #[test]
    fn test_non_evenly_spaced_x_data() {
        let interp = Interp1D::new(vec![0.0, 10.0, 100.0, 1000.0], vec![0.0, 1.0, 2.0, 3.0]).unwrap();
        assert_eq!(interp.interpolate(55.0), 1.5);
        assert_almost_eq!(interp.interpolate(1.0 / 3.0), 1.0 / 30.0);
    }

    #[test]
    fn test_linear_between_knots() {
        let interp = gibbs_like();
        // midpoint of [500, 1000]
        assert_almost_eq!(interp.interpolate(750.), 0.5 * (-219.051 + -192.590));
    }

    #[test]
    fn test_interpolate_many_matches_pointwise() {
        let interp = gibbs_like();
        let points = array![0., 298.15, 750., 1234.5, 2999.9, 5000.];
        let values = interp.interpolate_many(&points);
        assert_eq!(values.len(), points.len());
        for (p, v) in points.iter().zip(values.iter()) {
            assert_eq!(*v, interp.interpolate(*p));
        }
    }

    #[test]
    fn test_deserialize_validates() {
        let good: Interp1D = serde_json::from_str(r#"{"x": [0, 1], "f_x": [2, 4]}"#).unwrap();
        assert_eq!(good.interpolate(0.5), 3.0);
        let bad: Result<Interp1D, _> = serde_json::from_str(r#"{"x": [1, 0], "f_x": [2, 4]}"#);
        assert!(bad.is_err());
    }
}
