use crate::error::ElementError;
use nalgebra::{DMatrix, SymmetricEigen};

/// Gauss-Legendre points and weights over `(-1, 1)` for a rule with any number of points
///
/// The nodes are the eigenvalues of the symmetric tridiagonal Jacobi matrix of the Legendre
/// recurrence; each weight is twice the squared first component of the matching eigenvector.
/// Points come back in ascending order.
///
/// ```
/// use fem_elements::quadrature::gauss_quadrature_points;
///
/// let (points, weights) = gauss_quadrature_points(10).unwrap();
/// assert_eq!(points.len(), 10);
/// assert!(points.iter().sum::<f64>().abs() < 1e-12);
/// assert!((weights.iter().sum::<f64>() - 2.0).abs() < 1e-12);
/// ```
pub fn gauss_quadrature_points(n: usize) -> Result<(Vec<f64>, Vec<f64>), ElementError> {
    if n == 0 {
        return Err(ElementError::invalid("cannot build a rule with zero points"));
    }

    let mut jacobi = DMatrix::<f64>::zeros(n, n);
    for k in 1..n {
        let kf = k as f64;
        let off_diag = kf / (4.0 * kf * kf - 1.0).sqrt();
        jacobi[(k - 1, k)] = off_diag;
        jacobi[(k, k - 1)] = off_diag;
    }

    let SymmetricEigen {
        eigenvalues,
        eigenvectors,
    } = SymmetricEigen::new(jacobi);

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|a, b| eigenvalues[*a].total_cmp(&eigenvalues[*b]));

    let points = order.iter().map(|col| eigenvalues[*col]).collect();
    let weights = order
        .iter()
        .map(|col| 2.0 * eigenvectors[(0, *col)].powi(2))
        .collect();

    Ok((points, weights))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quadrature::{line_gauss_rule, MAX_RULE_ORDER};

    const GLQ_ACCURACY: f64 = 1e-11;

    #[test]
    fn generated_rules_match_tables() {
        for order in 1..=MAX_RULE_ORDER {
            let (points, weights) = gauss_quadrature_points(order).unwrap();

            for m in 0..order {
                let (x, w) = line_gauss_rule(m, order).unwrap();
                assert!((points[m] - x).abs() < GLQ_ACCURACY, "order {} point {}", order, m);
                assert!((weights[m] - w).abs() < GLQ_ACCURACY, "order {} weight {}", order, m);
            }
        }
    }

    #[test]
    fn high_order_rules() {
        let (points, weights) = gauss_quadrature_points(20).unwrap();

        for pair in points.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert!((points[0] + 0.9931285991850949).abs() < 1e-12);
        assert!((weights.iter().sum::<f64>() - 2.0).abs() < 1e-12);

        // exact through degree 39
        let moment: f64 = points
            .iter()
            .zip(weights.iter())
            .map(|(x, w)| x.powi(38) * w)
            .sum();
        assert!((moment - 2.0 / 39.0).abs() < 1e-12);
    }

    #[test]
    fn zero_point_rule() {
        assert!(gauss_quadrature_points(0).is_err());
    }
}
