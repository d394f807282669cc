use super::rules::RuleFamily;
use crate::error::ElementError;

#[cfg(feature = "json_export")]
use json::{object, JsonValue};

/// A tensor-product quadrature rule over the reference cell `[-1, 1]^D`
///
/// Points are stored in a fixed order (see [QuadratureGrid::index_of]); element integration
/// loops rely on this ordering when pairing points with sampled basis values.
#[derive(Clone, Debug)]
pub struct QuadratureGrid<const D: usize> {
    /// The 1D rule family used along every axis
    pub family: RuleFamily,
    /// Number of points per axis
    pub order: usize,
    /// Quadrature points (`order^D` of them)
    pub points: Vec<[f64; D]>,
    /// Per-axis weights for each point
    pub weights: Vec<[f64; D]>,
}

impl<const D: usize> QuadratureGrid<D> {
    /// Build a grid of `order^D` points from the tabulated 1D rules
    ///
    /// `D` must be 2, 3, or 4. Tabulated families accept `order` within `[1, 8]`;
    /// [RuleFamily::GeneratedGauss] accepts any `order >= 1`.
    pub fn new(family: RuleFamily, order: usize) -> Result<Self, ElementError> {
        check_dim::<D>()?;
        let (line_points, line_weights) = family.line_rule(order)?;

        let tot_pts = order.pow(D as u32);
        let mut points = Vec::with_capacity(tot_pts);
        let mut weights = Vec::with_capacity(tot_pts);

        for m in 0..tot_pts {
            let axis_indices = line_indices::<D>(m, order);

            let mut point = [0.0; D];
            let mut weight = [1.0; D];
            for (axis, line_index) in axis_indices.iter().enumerate() {
                point[axis] = line_points[line_index - 1];
                weight[axis] *= line_weights[line_index - 1];
            }

            points.push(point);
            weights.push(weight);
        }

        tracing::debug!(?family, order, dim = D, points = tot_pts, "built quadrature grid");

        Ok(Self {
            family,
            order,
            points,
            weights,
        })
    }

    /// Number of points in the grid
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The 1-based line rule index used along each axis for the `m`-th grid point
    ///
    /// ```
    /// use fem_elements::quadrature::gauss_3d;
    ///
    /// let grid = gauss_3d(2).unwrap();
    /// assert_eq!(grid.index_of(0), [1, 1, 1]);
    /// assert_eq!(grid.index_of(1), [2, 1, 1]);
    /// assert_eq!(grid.index_of(2), [1, 2, 1]);
    /// assert_eq!(grid.index_of(4), [1, 1, 2]);
    /// ```
    pub fn index_of(&self, m: usize) -> [usize; D] {
        line_indices::<D>(m, self.order)
    }

    /// Product of the per-axis weights at the `m`-th point
    pub fn total_weight(&self, m: usize) -> f64 {
        self.weights[m].iter().product()
    }

    /// Products of the per-axis weights at every point
    pub fn total_weights(&self) -> Vec<f64> {
        (0..self.len()).map(|m| self.total_weight(m)).collect()
    }

    /// Integrate some function over the reference cell
    ///
    /// ```
    /// use fem_elements::quadrature::gauss_2d;
    ///
    /// let grid = gauss_2d(3).unwrap();
    /// let solution = grid.integrate(|[x, y]| x.powi(2) * y.powi(4));
    /// assert!((solution - 4.0 / 15.0).abs() < 1e-14);
    /// ```
    pub fn integrate<F>(&self, integrand: F) -> f64
    where
        F: Fn(&[f64; D]) -> f64,
    {
        self.points
            .iter()
            .enumerate()
            .map(|(m, point)| integrand(point) * self.total_weight(m))
            .sum()
    }

    /// Produce a Json Object that describes this grid
    #[cfg(feature = "json_export")]
    pub fn to_json(&self) -> JsonValue {
        object! {
            "family": format!("{:?}", self.family),
            "order": self.order,
            "dim": D,
            "points": self.points.iter().map(|p| JsonValue::from(p.to_vec())).collect::<Vec<_>>(),
            "weights": self.weights.iter().map(|w| JsonValue::from(w.to_vec())).collect::<Vec<_>>(),
            "total_weights": self.total_weights(),
        }
    }
}

pub(crate) fn check_dim<const D: usize>() -> Result<(), ElementError> {
    if !(2..=4).contains(&D) {
        return Err(ElementError::invalid(format!(
            "dimension {} is not one of 2, 3, or 4",
            D
        )));
    }
    Ok(())
}

// decompose a flat grid index into 1-based line rule indices [i, j, k, l]
fn line_indices<const D: usize>(m: usize, order: usize) -> [usize; D] {
    let ij = |r: usize| {
        let j = r / order + 1;
        let i = (r + 1) - order * (j - 1);
        (i, j)
    };

    let full = match D {
        2 => {
            let (i, j) = ij(m);
            [i, j, 0, 0]
        }
        3 => {
            let p12 = order * order;
            let k = m / p12 + 1;
            let jj = (m + 1) - p12 * (k - 1);
            let j = (jj - 1) / order + 1;
            let i = jj - order * (j - 1);
            [i, j, k, 0]
        }
        _ => {
            let a = order.pow(D as u32 - 1);
            let b = order.pow(D as u32 - 2);
            let l = m / a + 1;
            let r = m - a * (l - 1);
            let k = r / b + 1;
            let (i, j) = ij(r - b * (k - 1));
            [i, j, k, l]
        }
    };

    let mut indices = [0; D];
    indices.copy_from_slice(&full[..D]);
    indices
}

/// Gauss-Legendre points over `[-1, 1]^2`
pub fn gauss_2d(order: usize) -> Result<QuadratureGrid<2>, ElementError> {
    QuadratureGrid::new(RuleFamily::Gauss, order)
}

/// Gauss-Legendre points over `[-1, 1]^3`
pub fn gauss_3d(order: usize) -> Result<QuadratureGrid<3>, ElementError> {
    QuadratureGrid::new(RuleFamily::Gauss, order)
}

/// Gauss-Legendre points over `[-1, 1]^4`
pub fn gauss_4d(order: usize) -> Result<QuadratureGrid<4>, ElementError> {
    QuadratureGrid::new(RuleFamily::Gauss, order)
}

/// Gauss-Lobatto points over `[-1, 1]^2`
pub fn lobatto_2d(order: usize) -> Result<QuadratureGrid<2>, ElementError> {
    QuadratureGrid::new(RuleFamily::Lobatto, order)
}

/// Gauss-Lobatto points over `[-1, 1]^3`
pub fn lobatto_3d(order: usize) -> Result<QuadratureGrid<3>, ElementError> {
    QuadratureGrid::new(RuleFamily::Lobatto, order)
}

/// Gauss-Lobatto points over `[-1, 1]^4`
pub fn lobatto_4d(order: usize) -> Result<QuadratureGrid<4>, ElementError> {
    QuadratureGrid::new(RuleFamily::Lobatto, order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quadrature::{line_gauss_rule, line_lobatto_rule};

    #[test]
    fn grid_sizes() {
        for order in 1..=8 {
            assert_eq!(gauss_2d(order).unwrap().len(), order.pow(2));
            assert_eq!(lobatto_3d(order).unwrap().len(), order.pow(3));
        }
        assert_eq!(gauss_4d(3).unwrap().len(), 81);
        assert_eq!(lobatto_4d(2).unwrap().len(), 16);
    }

    #[test]
    fn two_dimensional_ordering() {
        let grid = gauss_2d(3).unwrap();

        // xi varies fastest
        for m in 0..9 {
            let (x, _) = line_gauss_rule(m % 3, 3).unwrap();
            let (y, _) = line_gauss_rule(m / 3, 3).unwrap();
            assert_eq!(grid.points[m], [x, y]);
        }
    }

    #[test]
    fn three_dimensional_ordering() {
        let order = 4;
        let grid = lobatto_3d(order).unwrap();

        for m in 0..grid.len() {
            let expected = [m % order + 1, (m / order) % order + 1, m / (order * order) + 1];
            assert_eq!(grid.index_of(m), expected);

            let (z, wz) = line_lobatto_rule(expected[2] - 1, order).unwrap();
            assert_eq!(grid.points[m][2], z);
            assert_eq!(grid.weights[m][2], wz);
        }
    }

    #[test]
    fn four_dimensional_ordering() {
        let order = 3;
        let grid = gauss_4d(order).unwrap();

        for m in 0..grid.len() {
            assert_eq!(
                grid.index_of(m),
                [
                    m % 3 + 1,
                    (m / 3) % 3 + 1,
                    (m / 9) % 3 + 1,
                    m / 27 + 1
                ]
            );
        }
    }

    #[test]
    fn total_weights_sum_to_cell_measure() {
        for order in 1..=8 {
            let g2: f64 = gauss_2d(order).unwrap().total_weights().iter().sum();
            let g3: f64 = gauss_3d(order).unwrap().total_weights().iter().sum();
            let l3: f64 = lobatto_3d(order).unwrap().total_weights().iter().sum();
            assert!((g2 - 4.0).abs() < 1e-12);
            assert!((g3 - 8.0).abs() < 1e-12);
            assert!((l3 - 8.0).abs() < 1e-12);
        }

        let g4: f64 = gauss_4d(5).unwrap().total_weights().iter().sum();
        assert!((g4 - 16.0).abs() < 1e-12);
    }

    #[test]
    fn gauss_integration_is_exact() {
        // degree <= 2 * order - 1 in each variable
        let grid = gauss_2d(2).unwrap();
        assert!(grid.integrate(|[x, y]| x * y).abs() < 1e-15);
        assert!((grid.integrate(|[x, y]| x.powi(2) * y.powi(2)) - 4.0 / 9.0).abs() < 1e-14);

        let grid = gauss_3d(3).unwrap();
        let exact = (2.0 / 5.0) * (2.0 / 5.0) * 2.0;
        let solution = grid.integrate(|[x, y, z]| x.powi(4) * y.powi(4) + z.powi(5));
        assert!((solution - exact).abs() < 1e-14);

        let grid = gauss_4d(2).unwrap();
        let exact = 2.0 / 3.0 * 8.0;
        assert!((grid.integrate(|[_, _, _, t]| t * t) - exact).abs() < 1e-13);
    }

    #[test]
    fn invalid_orders() {
        assert!(gauss_2d(0).is_err());
        assert!(gauss_3d(9).is_err());
        assert!(lobatto_4d(12).is_err());
    }

    #[test]
    fn generated_rules_beyond_the_tables() {
        let grid = QuadratureGrid::<2>::new(RuleFamily::GeneratedGauss, 12).unwrap();
        assert_eq!(grid.len(), 144);
        assert_eq!(grid.index_of(13), [2, 2]);

        // degree 23 per axis is still exact
        let solution = grid.integrate(|[x, y]| x.powi(22) * y.powi(20) + x.powi(23));
        assert!((solution - (2.0 / 23.0) * (2.0 / 21.0)).abs() < 1e-12);

        let total: f64 = grid.total_weights().iter().sum();
        assert!((total - 4.0).abs() < 1e-12);
    }

    #[test]
    fn generated_rules_reproduce_tabulated_grids() {
        let tabulated = gauss_3d(5).unwrap();
        let generated = QuadratureGrid::<3>::new(RuleFamily::GeneratedGauss, 5).unwrap();

        for m in 0..tabulated.len() {
            for axis in 0..3 {
                assert!((tabulated.points[m][axis] - generated.points[m][axis]).abs() < 1e-12);
                assert!((tabulated.weights[m][axis] - generated.weights[m][axis]).abs() < 1e-12);
            }
        }

        assert!(QuadratureGrid::<2>::new(RuleFamily::GeneratedGauss, 0).is_err());
    }

    #[test]
    fn unsupported_dimension() {
        assert!(matches!(
            QuadratureGrid::<5>::new(RuleFamily::Gauss, 2),
            Err(ElementError::InvalidArgument(_))
        ));
    }

    #[cfg(feature = "json_export")]
    #[test]
    fn json_export() {
        let grid = lobatto_2d(3).unwrap();
        let parsed = json::parse(&grid.to_json().dump()).unwrap();

        assert_eq!(parsed["order"].as_usize(), Some(3));
        assert_eq!(parsed["points"].members().count(), 9);
        assert_eq!(parsed["weights"][0].members().count(), 2);
    }
}
