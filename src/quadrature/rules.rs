use super::glq::gauss_quadrature_points;
use crate::error::ElementError;

/// Highest tabulated rule order for both the Gauss and Lobatto families
pub const MAX_RULE_ORDER: usize = 8;

/// The family of 1D quadrature rule used to build a [QuadratureGrid](super::QuadratureGrid)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleFamily {
    /// Gauss-Legendre: all points strictly inside `(-1, 1)`
    Gauss,
    /// Gauss-Lobatto: two points placed on the boundary `±1`
    Lobatto,
    /// Gauss-Legendre solved from the Jacobi matrix eigenproblem, so any order `>= 1` is allowed
    GeneratedGauss,
}

impl RuleFamily {
    /// The `index`-th point and weight of this family's rule of the given `order`
    pub fn point(&self, index: usize, order: usize) -> Result<(f64, f64), ElementError> {
        match self {
            Self::Gauss => line_gauss_rule(index, order),
            Self::Lobatto => line_lobatto_rule(index, order),
            Self::GeneratedGauss => {
                check_index(index, order)?;
                let (points, weights) = gauss_quadrature_points(order)?;
                Ok((points[index], weights[index]))
            }
        }
    }

    /// Every point and weight of this family's rule of the given `order`
    pub fn line_rule(&self, order: usize) -> Result<(Vec<f64>, Vec<f64>), ElementError> {
        match self {
            Self::GeneratedGauss => gauss_quadrature_points(order),
            tabulated => {
                check_order(order)?;
                let pairs = (0..order)
                    .map(|m| tabulated.point(m, order))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(pairs.into_iter().unzip())
            }
        }
    }
}

fn check_order(order: usize) -> Result<(), ElementError> {
    if order < 1 || order > MAX_RULE_ORDER {
        return Err(ElementError::invalid(format!(
            "rule order {} is outside [1, {}]",
            order, MAX_RULE_ORDER
        )));
    }
    Ok(())
}

fn check_index(index: usize, order: usize) -> Result<(), ElementError> {
    if index >= order {
        return Err(ElementError::invalid(format!(
            "point index {} is outside [0, {})",
            index, order
        )));
    }
    Ok(())
}

const G6: [f64; 3] = [-0.9324695142031521, -0.6612093864662645, -0.2386191860831969];
const GW6: [f64; 3] = [0.1713244923791704, 0.3607615730481386, 0.4679139345726910];

const G7: [f64; 4] = [-0.9491079123427585, -0.7415311855993945, -0.4058451513773972, 0.0];
const GW7: [f64; 4] = [
    0.1294849661688697,
    0.2797053914892766,
    0.3818300505051189,
    0.4179591836734694,
];

const G8: [f64; 4] = [
    -0.9602898564975363,
    -0.7966664774136267,
    -0.5255324099163290,
    -0.1834346424956498,
];
const GW8: [f64; 4] = [
    0.1012285362903763,
    0.2223810344533745,
    0.3137066458778873,
    0.3626837833783620,
];

/// Point and weight of the `index`-th (0-based) Gauss-Legendre point for a rule of `order` (1 through 8)
///
/// ```
/// use fem_elements::quadrature::line_gauss_rule;
///
/// let (x0, w0) = line_gauss_rule(0, 2).unwrap();
/// assert!((x0 + 1.0 / 3.0_f64.sqrt()).abs() < 1e-15);
/// assert!((w0 - 1.0).abs() < 1e-15);
///
/// assert!(line_gauss_rule(0, 9).is_err());
/// assert!(line_gauss_rule(2, 2).is_err());
/// ```
pub fn line_gauss_rule(index: usize, order: usize) -> Result<(f64, f64), ElementError> {
    check_order(order)?;
    check_index(index, order)?;

    let m = index;
    let xw = match order {
        1 => (0.0, 2.0),
        2 => {
            let g0 = -1.0 / 3.0_f64.sqrt();
            ([g0, -1.0 * g0][m], 1.0)
        }
        3 => {
            let g0 = -(3.0_f64 / 5.0).sqrt();
            let w0 = 5.0 / 9.0;
            ([g0, 0.0, -1.0 * g0][m], [w0, 8.0 / 9.0, w0][m])
        }
        4 => {
            let w0 = (1. / 2.) - (5.0_f64 / 6.).sqrt() / 6.;
            let w1 = (1. / 2.) + (5.0_f64 / 6.).sqrt() / 6.;
            let g0 = -((3. + 2. * (6.0_f64 / 5.).sqrt()) / 7.).sqrt();
            let g1 = -((3. - 2. * (6.0_f64 / 5.).sqrt()) / 7.).sqrt();
            ([g0, g1, -g1, -g0][m], [w0, w1, w1, w0][m])
        }
        5 => {
            let w0 = (322. - 13. * 70.0_f64.sqrt()) / 900.;
            let w1 = (322. + 13. * 70.0_f64.sqrt()) / 900.;
            let g0 = -(5. + 2. * (10.0_f64 / 7.).sqrt()).sqrt() / 3.;
            let g1 = -(5. - 2. * (10.0_f64 / 7.).sqrt()).sqrt() / 3.;
            (
                [g0, g1, 0.0, -g1, -g0][m],
                [w0, w1, 512. / 900., w1, w0][m],
            )
        }
        6 => mirrored(&G6, &GW6, m, 6),
        7 => mirrored(&G7, &GW7, m, 7),
        _ => mirrored(&G8, &GW8, m, 8),
    };

    Ok(xw)
}

const L6: [f64; 3] = [-1.0, -0.765055323929464692851, -0.2852315164806450963142];
const LW6: [f64; 3] = [
    0.06666666666666666666667,
    0.3784749562978469803166,
    0.5548583770354863530167,
];

const L7: [f64; 4] = [-1.0, -0.830223896278566929872, -0.4688487934707142138038, 0.0];
const LW7: [f64; 4] = [
    0.04761904761904761904762,
    0.276826047361565948011,
    0.4317453812098626234179,
    0.487619047619047619048,
];

const L8: [f64; 4] = [
    -1.0,
    -0.8717401485096066153375,
    -0.5917001814331423021445,
    -0.2092992179024788687687,
];
const LW8: [f64; 4] = [
    0.03571428571428571428571,
    0.210704227143506039383,
    0.3411226924835043647642,
    0.4124587946587038815671,
];

/// Point and weight of the `index`-th (0-based) Gauss-Lobatto point for a rule of `order` (1 through 8)
///
/// The order 3 rule lists its points from `+1` down to `-1`.
pub fn line_lobatto_rule(index: usize, order: usize) -> Result<(f64, f64), ElementError> {
    check_order(order)?;
    check_index(index, order)?;

    let m = index;
    let xw = match order {
        1 => (0.0, 2.0),
        2 => ([-1.0, 1.0][m], 1.0),
        3 => {
            let w0 = 1.0 / 3.0;
            ([1.0, 0.0, -1.0][m], [w0, 4.0 / 3.0, w0][m])
        }
        4 => {
            let l1 = -0.447213595499957939282;
            let w0 = 0.1666666666666666666667;
            let w1 = 0.8333333333333333333333;
            ([-1.0, l1, -l1, 1.0][m], [w0, w1, w1, w0][m])
        }
        5 => {
            let l1 = -0.6546536707079771437983;
            let w0 = 0.1;
            let w1 = 0.544444444444444444444;
            (
                [-1.0, l1, 0.0, -l1, 1.0][m],
                [w0, w1, 0.7111111111111111111111, w1, w0][m],
            )
        }
        6 => mirrored(&L6, &LW6, m, 6),
        7 => mirrored(&L7, &LW7, m, 7),
        _ => mirrored(&L8, &LW8, m, 8),
    };

    Ok(xw)
}

// rules are stored as their lower half (including the midpoint for odd orders);
// the upper half is the negated mirror image
fn mirrored(points: &[f64], weights: &[f64], m: usize, order: usize) -> (f64, f64) {
    if m < points.len() {
        (points[m], weights[m])
    } else {
        let mirror = order - 1 - m;
        (-points[mirror], weights[mirror])
    }
}
