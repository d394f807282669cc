use super::{check_reference_point, unsupported_axis, Axis, NodalValues, ReferenceElement};
use crate::error::ElementError;
use smallvec::smallvec;

/// Bilinear 4 node quadrilateral
///
/// Nodes sit on the corners of the reference square, counter-clockwise from `(-1, -1)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Quad4;

impl Quad4 {
    pub const REF_VERT: [[f64; 2]; 4] = [[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]];
}

impl ReferenceElement<2> for Quad4 {
    fn num_nodes(&self) -> usize {
        4
    }

    fn ref_vertices(&self) -> Vec<[f64; 2]> {
        Self::REF_VERT.to_vec()
    }

    fn basis(&self, xi: &[f64; 2]) -> Result<NodalValues, ElementError> {
        check_reference_point(xi)?;
        let [x, y] = *xi;

        Ok(Self::REF_VERT
            .iter()
            .map(|[a, b]| 1.0 / 4.0 * (1.0 + x * a) * (1.0 + y * b))
            .collect())
    }

    fn partial(&self, axis: Axis, xi: &[f64; 2]) -> Result<NodalValues, ElementError> {
        check_reference_point(xi)?;
        let [x, y] = *xi;

        match axis {
            Axis::Xi => Ok(Self::REF_VERT
                .iter()
                .map(|[a, b]| 1.0 / 4.0 * a * (1.0 + y * b))
                .collect()),
            Axis::Eta => Ok(Self::REF_VERT
                .iter()
                .map(|[a, b]| 1.0 / 4.0 * (1.0 + x * a) * b)
                .collect()),
            _ => Err(unsupported_axis::<2>(axis)),
        }
    }
}

/// Quadratic serendipity 8 node quadrilateral
///
/// Nodes 0-3 are the corners (as in [Quad4]); 4-7 are the edge midpoints, starting on the bottom edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Quad8;

impl Quad8 {
    pub const REF_VERT: [[f64; 2]; 8] = [
        [-1.0, -1.0],
        [1.0, -1.0],
        [1.0, 1.0],
        [-1.0, 1.0],
        [0.0, -1.0],
        [1.0, 0.0],
        [0.0, 1.0],
        [-1.0, 0.0],
    ];
}

impl ReferenceElement<2> for Quad8 {
    fn num_nodes(&self) -> usize {
        8
    }

    fn ref_vertices(&self) -> Vec<[f64; 2]> {
        Self::REF_VERT.to_vec()
    }

    fn basis(&self, xi: &[f64; 2]) -> Result<NodalValues, ElementError> {
        check_reference_point(xi)?;
        let [x, y] = *xi;
        let mut basis: NodalValues = smallvec![0.0; 8];

        for this_vert in 0..4 {
            let [a, b] = Self::REF_VERT[this_vert];
            basis[this_vert] = 1.0 / 4.0 * (1.0 + x * a) * (1.0 + y * b) * (x * a + y * b - 1.0);
        }
        for this_vert in [4, 6] {
            let b = Self::REF_VERT[this_vert][1];
            basis[this_vert] = 1.0 / 2.0 * (1.0 - x * x) * (1.0 + y * b);
        }
        for this_vert in [5, 7] {
            let a = Self::REF_VERT[this_vert][0];
            basis[this_vert] = 1.0 / 2.0 * (1.0 + x * a) * (1.0 - y * y);
        }

        Ok(basis)
    }

    fn partial(&self, axis: Axis, xi: &[f64; 2]) -> Result<NodalValues, ElementError> {
        check_reference_point(xi)?;
        let [x, y] = *xi;
        let mut partial: NodalValues = smallvec![0.0; 8];

        match axis {
            Axis::Xi => {
                for this_vert in 0..4 {
                    let [a, b] = Self::REF_VERT[this_vert];
                    partial[this_vert] = 1.0 / 4.0 * a * (1.0 + b * y) * (2.0 * a * x + b * y);
                }
                for this_vert in [4, 6] {
                    let b = Self::REF_VERT[this_vert][1];
                    partial[this_vert] = -1.0 * x * (1.0 + b * y);
                }
                for this_vert in [5, 7] {
                    let a = Self::REF_VERT[this_vert][0];
                    partial[this_vert] = 1.0 / 2.0 * a * (1.0 - y * y);
                }
            }
            Axis::Eta => {
                for this_vert in 0..4 {
                    let [a, b] = Self::REF_VERT[this_vert];
                    partial[this_vert] = 1.0 / 4.0 * (1.0 + a * x) * b * (a * x + 2.0 * b * y);
                }
                for this_vert in [4, 6] {
                    let b = Self::REF_VERT[this_vert][1];
                    partial[this_vert] = 1.0 / 2.0 * (1.0 - x * x) * b;
                }
                for this_vert in [5, 7] {
                    let a = Self::REF_VERT[this_vert][0];
                    partial[this_vert] = -1.0 * (1.0 + a * x) * y;
                }
            }
            _ => return Err(unsupported_axis::<2>(axis)),
        }

        Ok(partial)
    }
}

/// Cubic serendipity 12 node quadrilateral
///
/// Nodes 0-3 are the corners; 4-7 sit at `xi = ±1/3` on the bottom and top edges and 8-11 at
/// `eta = ±1/3` on the left and right edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Quad12;

impl Quad12 {
    pub const REF_VERT: [[f64; 2]; 12] = [
        [-1.0, -1.0],
        [1.0, -1.0],
        [1.0, 1.0],
        [-1.0, 1.0],
        [-1.0 / 3.0, -1.0],
        [1.0 / 3.0, -1.0],
        [1.0 / 3.0, 1.0],
        [-1.0 / 3.0, 1.0],
        [-1.0, -1.0 / 3.0],
        [1.0, -1.0 / 3.0],
        [1.0, 1.0 / 3.0],
        [-1.0, 1.0 / 3.0],
    ];
}

impl ReferenceElement<2> for Quad12 {
    fn num_nodes(&self) -> usize {
        12
    }

    fn ref_vertices(&self) -> Vec<[f64; 2]> {
        Self::REF_VERT.to_vec()
    }

    fn basis(&self, xi: &[f64; 2]) -> Result<NodalValues, ElementError> {
        check_reference_point(xi)?;
        let [x, y] = *xi;
        let mut basis: NodalValues = smallvec![0.0; 12];

        for this_vert in 0..4 {
            let [a, b] = Self::REF_VERT[this_vert];
            basis[this_vert] =
                1.0 / 32.0 * (1.0 + x * a) * (1.0 + y * b) * (9.0 * (x * x + y * y) - 10.0);
        }
        for this_vert in 4..8 {
            let [a, b] = Self::REF_VERT[this_vert];
            basis[this_vert] = 9.0 / 32.0 * (1.0 - x * x) * (1.0 + y * b) * (1.0 + 9.0 * x * a);
        }
        for this_vert in 8..12 {
            let [a, b] = Self::REF_VERT[this_vert];
            basis[this_vert] = 9.0 / 32.0 * (1.0 + x * a) * (1.0 - y * y) * (1.0 + 9.0 * y * b);
        }

        Ok(basis)
    }

    fn partial(&self, axis: Axis, xi: &[f64; 2]) -> Result<NodalValues, ElementError> {
        check_reference_point(xi)?;
        let [x, y] = *xi;
        let mut partial: NodalValues = smallvec![0.0; 12];

        match axis {
            Axis::Xi => {
                for this_vert in 0..4 {
                    let [a, b] = Self::REF_VERT[this_vert];
                    partial[this_vert] = 1.0 / 32.0
                        * (1.0 + y * b)
                        * (9.0 * a * (x * x + y * y) + 18.0 * x * (1.0 + x * a) - 10.0 * a);
                }
                for this_vert in 4..8 {
                    let [a, b] = Self::REF_VERT[this_vert];
                    partial[this_vert] =
                        9.0 / 32.0 * (1.0 + y * b) * (9.0 * a * (1.0 - 3.0 * x * x) - 2.0 * x);
                }
                for this_vert in 8..12 {
                    let [a, b] = Self::REF_VERT[this_vert];
                    partial[this_vert] = 9.0 / 32.0 * a * (1.0 - y * y) * (1.0 + 9.0 * y * b);
                }
            }
            Axis::Eta => {
                for this_vert in 0..4 {
                    let [a, b] = Self::REF_VERT[this_vert];
                    partial[this_vert] = 1.0 / 32.0
                        * (1.0 + x * a)
                        * (9.0 * b * (x * x + y * y) + 18.0 * y * (1.0 + y * b) - 10.0 * b);
                }
                for this_vert in 4..8 {
                    let [a, b] = Self::REF_VERT[this_vert];
                    partial[this_vert] = 9.0 / 32.0 * (1.0 - x * x) * (1.0 + 9.0 * x * a) * b;
                }
                for this_vert in 8..12 {
                    let [a, b] = Self::REF_VERT[this_vert];
                    partial[this_vert] =
                        9.0 / 32.0 * (1.0 + x * a) * (9.0 * b * (1.0 - 3.0 * y * y) - 2.0 * y);
                }
            }
            _ => return Err(unsupported_axis::<2>(axis)),
        }

        Ok(partial)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::test_utils::check_element;

    #[test]
    fn quad4_shape_functions() {
        check_element(&Quad4);

        let basis = Quad4.basis(&[0.0, 0.0]).unwrap();
        for value in basis.iter() {
            assert!((value - 0.25).abs() < 1e-15);
        }

        let p_xi = Quad4.partial_xi(&[0.0, 0.0]).unwrap();
        assert_eq!(p_xi.as_slice(), &[-0.25, 0.25, 0.25, -0.25]);
    }

    #[test]
    fn quad8_shape_functions() {
        check_element(&Quad8);

        // corner functions are negative at the center, edge functions take 1/2
        let basis = Quad8.basis(&[0.0, 0.0]).unwrap();
        for corner in 0..4 {
            assert!((basis[corner] + 0.25).abs() < 1e-15);
        }
        for edge in 4..8 {
            assert!((basis[edge] - 0.5).abs() < 1e-15);
        }
    }

    #[test]
    fn quad12_shape_functions() {
        check_element(&Quad12);
    }

    #[test]
    fn quad12_reproduces_cubics_along_edges() {
        let ref_vert = Quad12.ref_vertices();
        let nodal: Vec<f64> = ref_vert.iter().map(|[x, y]| x.powi(3) + y).collect();

        for x in [-0.9, -0.2, 0.55] {
            let basis = Quad12.basis(&[x, -1.0]).unwrap();
            let value: f64 = basis.iter().zip(nodal.iter()).map(|(b, n)| b * n).sum();
            assert!((value - (x.powi(3) - 1.0)).abs() < 1e-13);
        }
    }

    #[test]
    fn quad_physical_position() {
        let vertices = [[0.0, 0.0], [2.0, 0.0], [2.0, 1.0], [0.0, 1.0]];
        let x = Quad4.physical_position(&[0.5, -0.5], &vertices).unwrap();
        assert!((x[0] - 1.5).abs() < 1e-15);
        assert!((x[1] - 0.25).abs() < 1e-15);
    }
}
