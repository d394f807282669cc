use crate::error::{check_len, ElementError};
use crate::quadrature::check_dim;
use nalgebra::SMatrix;

/// Default relative threshold below which a Jacobian is treated as singular
///
/// The check compares `|det J|` against this value times the product of the row norms of `J`
/// (an upper bound on `|det J|`), so it does not depend on the physical size of the element.
pub const DEFAULT_SINGULAR_TOLERANCE: f64 = 1e-12;

/// The Jacobian of the map from reference to physical space at a single point
///
/// Row `j` holds the derivatives of the physical coordinates with respect to reference axis `j`:
/// `matrix[(j, k)] = sum over nodes of vertices[node][k] * partials[node][j]`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Jacobian<const D: usize> {
    pub matrix: SMatrix<f64, D, D>,
    pub det: f64,
}

impl<const D: usize> Jacobian<D> {
    /// Assemble the Jacobian (and its determinant) for any supported dimension (2, 3, or 4)
    ///
    /// `partials` is the `[node][axis]` gradient table from
    /// [partials](crate::elements::ReferenceElement::partials)
    pub fn assemble(vertices: &[[f64; D]], partials: &[[f64; D]]) -> Result<Self, ElementError> {
        check_dim::<D>()?;
        check_len(vertices.len(), partials.len())?;

        let mut matrix = SMatrix::<f64, D, D>::zeros();
        for (vertex, node_partials) in vertices.iter().zip(partials.iter()) {
            for j in 0..D {
                for k in 0..D {
                    matrix[(j, k)] += vertex[k] * node_partials[j];
                }
            }
        }

        let det = determinant(&matrix);
        Ok(Self { matrix, det })
    }

    /// `|det J|` divided by the product of the row norms of `J`
    ///
    /// Falls within `[0, 1]`; `1` for orthogonal rows and `0` for degenerate ones.
    pub fn relative_det(&self) -> f64 {
        let scale: f64 = self.matrix.row_iter().map(|row| row.norm()).product();
        if scale > 0.0 {
            self.det.abs() / scale
        } else {
            0.0
        }
    }

    /// The analytic inverse of this Jacobian
    ///
    /// Fails with [SingularJacobian](ElementError::SingularJacobian) if the determinant is not
    /// finite or [relative_det](Self::relative_det) falls below `tolerance`.
    pub fn inverse(&self, tolerance: f64) -> Result<SMatrix<f64, D, D>, ElementError> {
        if !self.det.is_finite() || self.relative_det() < tolerance {
            tracing::debug!(det = self.det, tolerance, "rejected singular jacobian");
            return Err(ElementError::SingularJacobian {
                det: self.det,
                tolerance,
            });
        }

        Ok(adjugate(&self.matrix) / self.det)
    }
}

/// Assemble a 2D or 3D Jacobian
///
/// ```
/// use fem_elements::elements::{Quad4, ReferenceElement};
/// use fem_elements::jacobian::jacobian;
///
/// let partials = Quad4.partials(&[0.0, 0.0]).unwrap();
/// let j = jacobian(&Quad4::REF_VERT, &partials).unwrap();
///
/// assert!((j.det - 1.0).abs() < 1e-15);
/// assert!((j.matrix[(0, 0)] - 1.0).abs() < 1e-15);
/// assert!(j.matrix[(0, 1)].abs() < 1e-15);
/// ```
pub fn jacobian<const D: usize>(
    vertices: &[[f64; D]],
    partials: &[[f64; D]],
) -> Result<Jacobian<D>, ElementError> {
    if D != 2 && D != 3 {
        return Err(ElementError::invalid(format!(
            "jacobian supports 2D and 3D elements, not {}D; use jacobian_4d",
            D
        )));
    }
    Jacobian::assemble(vertices, partials)
}

/// Assemble a 4D Jacobian
pub fn jacobian_4d(
    vertices: &[[f64; 4]],
    partials: &[[f64; 4]],
) -> Result<Jacobian<4>, ElementError> {
    Jacobian::assemble(vertices, partials)
}

pub fn jacobian_inverse_2d(
    jacobian: &Jacobian<2>,
    tolerance: f64,
) -> Result<SMatrix<f64, 2, 2>, ElementError> {
    jacobian.inverse(tolerance)
}

pub fn jacobian_inverse_3d(
    jacobian: &Jacobian<3>,
    tolerance: f64,
) -> Result<SMatrix<f64, 3, 3>, ElementError> {
    jacobian.inverse(tolerance)
}

pub fn jacobian_inverse_4d(
    jacobian: &Jacobian<4>,
    tolerance: f64,
) -> Result<SMatrix<f64, 4, 4>, ElementError> {
    jacobian.inverse(tolerance)
}

fn det_3(m: [[f64; 3]; 3]) -> f64 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

// columns kept by each first-row minor of a 4x4 matrix
const MINOR_COLUMNS: [[usize; 3]; 4] = [[1, 2, 3], [0, 2, 3], [0, 1, 3], [0, 1, 2]];

// closed form cofactor expansion (callers have already checked D)
fn determinant<const D: usize>(matrix: &SMatrix<f64, D, D>) -> f64 {
    let m = |r: usize, c: usize| matrix[(r, c)];

    match D {
        2 => m(0, 0) * m(1, 1) - m(0, 1) * m(1, 0),
        3 => det_3([
            [m(0, 0), m(0, 1), m(0, 2)],
            [m(1, 0), m(1, 1), m(1, 2)],
            [m(2, 0), m(2, 1), m(2, 2)],
        ]),
        _ => {
            // expand along the first row; each minor contributes six signed triple products
            let minor = |skip: usize| {
                let [c0, c1, c2] = MINOR_COLUMNS[skip];
                det_3([
                    [m(1, c0), m(1, c1), m(1, c2)],
                    [m(2, c0), m(2, c1), m(2, c2)],
                    [m(3, c0), m(3, c1), m(3, c2)],
                ])
            };
            m(0, 0) * minor(0) - m(0, 1) * minor(1) + m(0, 2) * minor(2) - m(0, 3) * minor(3)
        }
    }
}

// transposed cofactor matrix
fn adjugate<const D: usize>(matrix: &SMatrix<f64, D, D>) -> SMatrix<f64, D, D> {
    let m = |r: usize, c: usize| matrix[(r, c)];
    let mut adj = SMatrix::<f64, D, D>::zeros();

    match D {
        2 => {
            adj[(0, 0)] = m(1, 1);
            adj[(0, 1)] = -m(0, 1);
            adj[(1, 0)] = -m(1, 0);
            adj[(1, 1)] = m(0, 0);
        }
        3 => {
            adj[(0, 0)] = m(1, 1) * m(2, 2) - m(1, 2) * m(2, 1);
            adj[(0, 1)] = m(0, 2) * m(2, 1) - m(0, 1) * m(2, 2);
            adj[(0, 2)] = m(0, 1) * m(1, 2) - m(0, 2) * m(1, 1);
            adj[(1, 0)] = m(1, 2) * m(2, 0) - m(1, 0) * m(2, 2);
            adj[(1, 1)] = m(0, 0) * m(2, 2) - m(0, 2) * m(2, 0);
            adj[(1, 2)] = m(0, 2) * m(1, 0) - m(0, 0) * m(1, 2);
            adj[(2, 0)] = m(1, 0) * m(2, 1) - m(1, 1) * m(2, 0);
            adj[(2, 1)] = m(0, 1) * m(2, 0) - m(0, 0) * m(2, 1);
            adj[(2, 2)] = m(0, 0) * m(1, 1) - m(0, 1) * m(1, 0);
        }
        _ => {
            let mut flat = [0.0; 16];
            for (i, entry) in flat.iter_mut().enumerate() {
                *entry = m(i / 4, i % 4);
            }
            for (i, value) in adjugate_4(&flat).iter().enumerate() {
                adj[(i / 4, i % 4)] = *value;
            }
        }
    }

    adj
}

// the classic flattened 4x4 adjugate
#[rustfmt::skip]
fn adjugate_4(m: &[f64; 16]) -> [f64; 16] {
    let mut inv = [0.0; 16];

    inv[0] = m[5] * m[10] * m[15] - m[5] * m[11] * m[14] - m[9] * m[6] * m[15]
        + m[9] * m[7] * m[14] + m[13] * m[6] * m[11] - m[13] * m[7] * m[10];
    inv[4] = -m[4] * m[10] * m[15] + m[4] * m[11] * m[14] + m[8] * m[6] * m[15]
        - m[8] * m[7] * m[14] - m[12] * m[6] * m[11] + m[12] * m[7] * m[10];
    inv[8] = m[4] * m[9] * m[15] - m[4] * m[11] * m[13] - m[8] * m[5] * m[15]
        + m[8] * m[7] * m[13] + m[12] * m[5] * m[11] - m[12] * m[7] * m[9];
    inv[12] = -m[4] * m[9] * m[14] + m[4] * m[10] * m[13] + m[8] * m[5] * m[14]
        - m[8] * m[6] * m[13] - m[12] * m[5] * m[10] + m[12] * m[6] * m[9];

    inv[1] = -m[1] * m[10] * m[15] + m[1] * m[11] * m[14] + m[9] * m[2] * m[15]
        - m[9] * m[3] * m[14] - m[13] * m[2] * m[11] + m[13] * m[3] * m[10];
    inv[5] = m[0] * m[10] * m[15] - m[0] * m[11] * m[14] - m[8] * m[2] * m[15]
        + m[8] * m[3] * m[14] + m[12] * m[2] * m[11] - m[12] * m[3] * m[10];
    inv[9] = -m[0] * m[9] * m[15] + m[0] * m[11] * m[13] + m[8] * m[1] * m[15]
        - m[8] * m[3] * m[13] - m[12] * m[1] * m[11] + m[12] * m[3] * m[9];
    inv[13] = m[0] * m[9] * m[14] - m[0] * m[10] * m[13] - m[8] * m[1] * m[14]
        + m[8] * m[2] * m[13] + m[12] * m[1] * m[10] - m[12] * m[2] * m[9];

    inv[2] = m[1] * m[6] * m[15] - m[1] * m[7] * m[14] - m[5] * m[2] * m[15]
        + m[5] * m[3] * m[14] + m[13] * m[2] * m[7] - m[13] * m[3] * m[6];
    inv[6] = -m[0] * m[6] * m[15] + m[0] * m[7] * m[14] + m[4] * m[2] * m[15]
        - m[4] * m[3] * m[14] - m[12] * m[2] * m[7] + m[12] * m[3] * m[6];
    inv[10] = m[0] * m[5] * m[15] - m[0] * m[7] * m[13] - m[4] * m[1] * m[15]
        + m[4] * m[3] * m[13] + m[12] * m[1] * m[7] - m[12] * m[3] * m[5];
    inv[14] = -m[0] * m[5] * m[14] + m[0] * m[6] * m[13] + m[4] * m[1] * m[14]
        - m[4] * m[2] * m[13] - m[12] * m[1] * m[6] + m[12] * m[2] * m[5];

    inv[3] = -m[1] * m[6] * m[11] + m[1] * m[7] * m[10] + m[5] * m[2] * m[11]
        - m[5] * m[3] * m[10] - m[9] * m[2] * m[7] + m[9] * m[3] * m[6];
    inv[7] = m[0] * m[6] * m[11] - m[0] * m[7] * m[10] - m[4] * m[2] * m[11]
        + m[4] * m[3] * m[10] + m[8] * m[2] * m[7] - m[8] * m[3] * m[6];
    inv[11] = -m[0] * m[5] * m[11] + m[0] * m[7] * m[9] + m[4] * m[1] * m[11]
        - m[4] * m[3] * m[9] - m[8] * m[1] * m[7] + m[8] * m[3] * m[5];
    inv[15] = m[0] * m[5] * m[10] - m[0] * m[6] * m[9] - m[4] * m[1] * m[10]
        + m[4] * m[2] * m[9] + m[8] * m[1] * m[6] - m[8] * m[2] * m[5];

    inv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{Hex20, Hex8, Quad4, Quad8, ReferenceElement, Tess16};

    const INVERSE_ACCURACY: f64 = 1e-10;

    fn assert_identity<const D: usize>(product: SMatrix<f64, D, D>) {
        for r in 0..D {
            for c in 0..D {
                let expected = if r == c { 1.0 } else { 0.0 };
                assert!(
                    (product[(r, c)] - expected).abs() < INVERSE_ACCURACY,
                    "entry ({}, {}) = {}",
                    r,
                    c,
                    product[(r, c)]
                );
            }
        }
    }

    #[test]
    fn reference_square_is_identity() {
        let partials = Quad4.partials(&[0.0, 0.0]).unwrap();
        let j = jacobian(&Quad4::REF_VERT, &partials).unwrap();

        assert!((j.det - 1.0).abs() < 1e-15);
        assert_identity(j.matrix);
    }

    #[test]
    fn jacobian_of_a_skewed_quad() {
        let vertices = [
            [0.0, 0.0],
            [3.0, 0.5],
            [3.5, 2.0],
            [0.2, 1.8],
            [1.5, 0.1],
            [3.3, 1.2],
            [1.8, 2.1],
            [0.1, 0.9],
        ];
        let xi = [0.3, -0.4];
        let partials = Quad8.partials(&xi).unwrap();
        let j = jacobian(&vertices, &partials).unwrap();

        let inverse = jacobian_inverse_2d(&j, DEFAULT_SINGULAR_TOLERANCE).unwrap();
        assert_identity(j.matrix * inverse);
        assert!((j.det - j.matrix.determinant()).abs() < 1e-12);
    }

    #[test]
    fn three_dimensional_inverse() {
        let vertices: Vec<[f64; 3]> = Hex20::REF_VERT
            .iter()
            .map(|[x, y, z]| [2.0 * x + 0.3 * y, y - 0.2 * z * x, 0.5 * z + 0.1 * x * y])
            .collect();
        let partials = Hex20.partials(&[0.2, -0.5, 0.7]).unwrap();
        let j = jacobian(&vertices, &partials).unwrap();

        let inverse = jacobian_inverse_3d(&j, DEFAULT_SINGULAR_TOLERANCE).unwrap();
        assert_identity(j.matrix * inverse);
        assert_identity(inverse * j.matrix);
        assert!((j.det - j.matrix.determinant()).abs() < 1e-12);
    }

    #[test]
    fn four_dimensional_inverse() {
        let vertices: Vec<[f64; 4]> = Tess16::REF_VERT
            .iter()
            .map(|[x, y, z, t]| {
                [
                    x + 0.2 * t,
                    1.5 * y - 0.1 * x,
                    z + 0.3 * y * t,
                    2.0 * t + 0.05 * x * z,
                ]
            })
            .collect();
        let partials = Tess16.partials(&[0.1, 0.4, -0.6, 0.25]).unwrap();
        let j = jacobian_4d(&vertices, &partials).unwrap();

        let inverse = jacobian_inverse_4d(&j, DEFAULT_SINGULAR_TOLERANCE).unwrap();
        assert_identity(j.matrix * inverse);
        assert!((j.det - j.matrix.determinant()).abs() < 1e-12);
    }

    #[test]
    fn singular_jacobian() {
        // every vertex collapsed onto a line
        let vertices: Vec<[f64; 3]> = Hex8::REF_VERT.iter().map(|[x, _, _]| [*x, *x, *x]).collect();
        let partials = Hex8.partials(&[0.0, 0.0, 0.0]).unwrap();
        let j = jacobian(&vertices, &partials).unwrap();

        assert!(matches!(
            j.inverse(DEFAULT_SINGULAR_TOLERANCE),
            Err(ElementError::SingularJacobian { .. })
        ));
    }

    #[test]
    fn singular_check_is_independent_of_element_size() {
        let partials = Hex8.partials(&[0.1, -0.2, 0.3]).unwrap();

        // a cube of side 1e-5 has det J = (0.5e-5)^3, far below any absolute threshold
        let vertices: Vec<[f64; 3]> = Hex8::REF_VERT
            .iter()
            .map(|[x, y, z]| [0.5e-5 * x, 0.5e-5 * y, 0.5e-5 * z])
            .collect();
        let j = jacobian(&vertices, &partials).unwrap();
        assert!((j.det - 1.25e-16).abs() < 1e-28);
        assert!((j.relative_det() - 1.0).abs() < 1e-12);

        let inverse = j.inverse(DEFAULT_SINGULAR_TOLERANCE).unwrap();
        assert!((inverse[(0, 0)] - 2.0e5).abs() < 1e-6);
        assert_identity(j.matrix * inverse);

        // flattening the same cube onto a plane is still rejected
        let flat: Vec<[f64; 3]> = vertices.iter().map(|[x, y, _]| [*x, *y, 0.0]).collect();
        let j = jacobian(&flat, &partials).unwrap();
        assert_eq!(j.relative_det(), 0.0);
        assert!(matches!(
            j.inverse(DEFAULT_SINGULAR_TOLERANCE),
            Err(ElementError::SingularJacobian { .. })
        ));
    }

    #[test]
    fn invalid_jacobian_requests() {
        let partials = Tess16.partials(&[0.0; 4]).unwrap();
        assert!(matches!(
            jacobian(&Tess16::REF_VERT, &partials),
            Err(ElementError::InvalidArgument(_))
        ));

        let partials = Quad4.partials(&[0.0, 0.0]).unwrap();
        assert!(matches!(
            jacobian(&Quad4::REF_VERT[..3], &partials),
            Err(ElementError::SizeMismatch { .. })
        ));
    }
}
