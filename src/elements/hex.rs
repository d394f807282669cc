use super::{check_reference_point, unsupported_axis, Axis, NodalValues, ReferenceElement};
use crate::error::ElementError;
use smallvec::smallvec;

const HEX_CORNERS: [[f64; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, -1.0, 1.0],
    [-1.0, -1.0, 1.0],
    [-1.0, 1.0, -1.0],
    [1.0, 1.0, -1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
];

/// Trilinear 8 node hexahedron
///
/// Nodes 0-3 are the `eta = -1` face and 4-7 the `eta = +1` face.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Hex8;

impl Hex8 {
    pub const REF_VERT: [[f64; 3]; 8] = HEX_CORNERS;
}

impl ReferenceElement<3> for Hex8 {
    fn num_nodes(&self) -> usize {
        8
    }

    fn ref_vertices(&self) -> Vec<[f64; 3]> {
        Self::REF_VERT.to_vec()
    }

    fn basis(&self, xi: &[f64; 3]) -> Result<NodalValues, ElementError> {
        check_reference_point(xi)?;
        let [x, y, z] = *xi;

        Ok(Self::REF_VERT
            .iter()
            .map(|[a, b, c]| 1.0 / 8.0 * (1.0 + x * a) * (1.0 + y * b) * (1.0 + z * c))
            .collect())
    }

    fn partial(&self, axis: Axis, xi: &[f64; 3]) -> Result<NodalValues, ElementError> {
        check_reference_point(xi)?;
        let [x, y, z] = *xi;

        let partial: NodalValues = match axis {
            Axis::Xi => Self::REF_VERT
                .iter()
                .map(|[a, b, c]| 1.0 / 8.0 * a * (1.0 + y * b) * (1.0 + z * c))
                .collect(),
            Axis::Eta => Self::REF_VERT
                .iter()
                .map(|[a, b, c]| 1.0 / 8.0 * (1.0 + x * a) * b * (1.0 + z * c))
                .collect(),
            Axis::Mu => Self::REF_VERT
                .iter()
                .map(|[a, b, c]| 1.0 / 8.0 * (1.0 + x * a) * (1.0 + y * b) * c)
                .collect(),
            Axis::Tau => return Err(unsupported_axis::<3>(axis)),
        };

        Ok(partial)
    }
}

/// Quadratic serendipity 20 node hexahedron
///
/// Nodes 0-7 are the corners (as in [Hex8]). Nodes 8, 10, 12, 14 sit at `xi = 0`, nodes 9, 11,
/// 13, 15 at `mu = 0`, and nodes 16-19 at `eta = 0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Hex20;

impl Hex20 {
    pub const REF_VERT: [[f64; 3]; 20] = [
        HEX_CORNERS[0],
        HEX_CORNERS[1],
        HEX_CORNERS[2],
        HEX_CORNERS[3],
        HEX_CORNERS[4],
        HEX_CORNERS[5],
        HEX_CORNERS[6],
        HEX_CORNERS[7],
        [0.0, -1.0, -1.0],
        [1.0, -1.0, 0.0],
        [0.0, -1.0, 1.0],
        [-1.0, -1.0, 0.0],
        [0.0, 1.0, -1.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 1.0],
        [-1.0, 1.0, 0.0],
        [-1.0, 0.0, -1.0],
        [1.0, 0.0, -1.0],
        [1.0, 0.0, 1.0],
        [-1.0, 0.0, 1.0],
    ];

    const XI_EDGES: [usize; 4] = [8, 10, 12, 14];
    const MU_EDGES: [usize; 4] = [9, 11, 13, 15];
    const ETA_EDGES: [usize; 4] = [16, 17, 18, 19];
}

impl ReferenceElement<3> for Hex20 {
    fn num_nodes(&self) -> usize {
        20
    }

    fn ref_vertices(&self) -> Vec<[f64; 3]> {
        Self::REF_VERT.to_vec()
    }

    fn basis(&self, xi: &[f64; 3]) -> Result<NodalValues, ElementError> {
        check_reference_point(xi)?;
        let [x, y, z] = *xi;
        let mut basis: NodalValues = smallvec![0.0; 20];

        for this_vert in 0..8 {
            let [a, b, c] = Self::REF_VERT[this_vert];
            basis[this_vert] = 1.0 / 8.0
                * (1.0 + x * a)
                * (1.0 + y * b)
                * (1.0 + z * c)
                * (x * a + y * b + z * c - 2.0);
        }
        for this_vert in Self::XI_EDGES {
            let [_, b, c] = Self::REF_VERT[this_vert];
            basis[this_vert] = 1.0 / 4.0 * (1.0 - x * x) * (1.0 + y * b) * (1.0 + z * c);
        }
        for this_vert in Self::ETA_EDGES {
            let [a, _, c] = Self::REF_VERT[this_vert];
            basis[this_vert] = 1.0 / 4.0 * (1.0 + x * a) * (1.0 - y * y) * (1.0 + z * c);
        }
        for this_vert in Self::MU_EDGES {
            let [a, b, _] = Self::REF_VERT[this_vert];
            basis[this_vert] = 1.0 / 4.0 * (1.0 + x * a) * (1.0 + y * b) * (1.0 - z * z);
        }

        Ok(basis)
    }

    fn partial(&self, axis: Axis, xi: &[f64; 3]) -> Result<NodalValues, ElementError> {
        check_reference_point(xi)?;
        let [x, y, z] = *xi;
        let mut partial: NodalValues = smallvec![0.0; 20];

        match axis {
            Axis::Xi => {
                for this_vert in 0..8 {
                    let [a, b, c] = Self::REF_VERT[this_vert];
                    partial[this_vert] = 1.0 / 8.0
                        * a
                        * (1.0 + y * b)
                        * (1.0 + z * c)
                        * (2.0 * x * a + y * b + z * c - 1.0);
                }
                for this_vert in Self::XI_EDGES {
                    let [_, b, c] = Self::REF_VERT[this_vert];
                    partial[this_vert] = -1.0 / 2.0 * x * (1.0 + y * b) * (1.0 + z * c);
                }
                for this_vert in Self::ETA_EDGES {
                    let [a, _, c] = Self::REF_VERT[this_vert];
                    partial[this_vert] = 1.0 / 4.0 * a * (1.0 - y * y) * (1.0 + z * c);
                }
                for this_vert in Self::MU_EDGES {
                    let [a, b, _] = Self::REF_VERT[this_vert];
                    partial[this_vert] = 1.0 / 4.0 * a * (1.0 + y * b) * (1.0 - z * z);
                }
            }
            Axis::Eta => {
                for this_vert in 0..8 {
                    let [a, b, c] = Self::REF_VERT[this_vert];
                    partial[this_vert] = 1.0 / 8.0
                        * (1.0 + x * a)
                        * b
                        * (1.0 + z * c)
                        * (x * a + 2.0 * y * b + z * c - 1.0);
                }
                for this_vert in Self::XI_EDGES {
                    let [_, b, c] = Self::REF_VERT[this_vert];
                    partial[this_vert] = 1.0 / 4.0 * (1.0 - x * x) * b * (1.0 + z * c);
                }
                for this_vert in Self::ETA_EDGES {
                    let [a, _, c] = Self::REF_VERT[this_vert];
                    partial[this_vert] = -1.0 / 2.0 * (1.0 + x * a) * y * (1.0 + z * c);
                }
                for this_vert in Self::MU_EDGES {
                    let [a, b, _] = Self::REF_VERT[this_vert];
                    partial[this_vert] = 1.0 / 4.0 * (1.0 + x * a) * b * (1.0 - z * z);
                }
            }
            Axis::Mu => {
                for this_vert in 0..8 {
                    let [a, b, c] = Self::REF_VERT[this_vert];
                    partial[this_vert] = 1.0 / 8.0
                        * (1.0 + x * a)
                        * (1.0 + y * b)
                        * c
                        * (x * a + y * b + 2.0 * z * c - 1.0);
                }
                for this_vert in Self::XI_EDGES {
                    let [_, b, c] = Self::REF_VERT[this_vert];
                    partial[this_vert] = 1.0 / 4.0 * (1.0 - x * x) * (1.0 + y * b) * c;
                }
                for this_vert in Self::ETA_EDGES {
                    let [a, _, c] = Self::REF_VERT[this_vert];
                    partial[this_vert] = 1.0 / 4.0 * (1.0 + x * a) * (1.0 - y * y) * c;
                }
                for this_vert in Self::MU_EDGES {
                    let [a, b, _] = Self::REF_VERT[this_vert];
                    partial[this_vert] = -1.0 / 2.0 * (1.0 + x * a) * (1.0 + y * b) * z;
                }
            }
            Axis::Tau => return Err(unsupported_axis::<3>(axis)),
        }

        Ok(partial)
    }
}

/// Cubic serendipity 32 node hexahedron
///
/// Nodes 0-7 are the corners. Nodes 8-15 sit at `mu = ±1/3`, nodes 16-23 at `xi = ±1/3` and
/// nodes 24-31 at `eta = ±1/3`, each group on the edges running along that axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Hex32;

impl Hex32 {
    pub const REF_VERT: [[f64; 3]; 32] = [
        HEX_CORNERS[0],
        HEX_CORNERS[1],
        HEX_CORNERS[2],
        HEX_CORNERS[3],
        HEX_CORNERS[4],
        HEX_CORNERS[5],
        HEX_CORNERS[6],
        HEX_CORNERS[7],
        // mu edges
        [-1.0, -1.0, -1.0 / 3.0],
        [1.0, -1.0, -1.0 / 3.0],
        [1.0, -1.0, 1.0 / 3.0],
        [-1.0, -1.0, 1.0 / 3.0],
        [-1.0, 1.0, -1.0 / 3.0],
        [1.0, 1.0, -1.0 / 3.0],
        [1.0, 1.0, 1.0 / 3.0],
        [-1.0, 1.0, 1.0 / 3.0],
        // xi edges
        [-1.0 / 3.0, -1.0, -1.0],
        [1.0 / 3.0, -1.0, -1.0],
        [1.0 / 3.0, -1.0, 1.0],
        [-1.0 / 3.0, -1.0, 1.0],
        [-1.0 / 3.0, 1.0, -1.0],
        [1.0 / 3.0, 1.0, -1.0],
        [1.0 / 3.0, 1.0, 1.0],
        [-1.0 / 3.0, 1.0, 1.0],
        // eta edges
        [-1.0, -1.0 / 3.0, -1.0],
        [1.0, -1.0 / 3.0, -1.0],
        [1.0, -1.0 / 3.0, 1.0],
        [-1.0, -1.0 / 3.0, 1.0],
        [-1.0, 1.0 / 3.0, -1.0],
        [1.0, 1.0 / 3.0, -1.0],
        [1.0, 1.0 / 3.0, 1.0],
        [-1.0, 1.0 / 3.0, 1.0],
    ];
}

impl ReferenceElement<3> for Hex32 {
    fn num_nodes(&self) -> usize {
        32
    }

    fn ref_vertices(&self) -> Vec<[f64; 3]> {
        Self::REF_VERT.to_vec()
    }

    fn basis(&self, xi: &[f64; 3]) -> Result<NodalValues, ElementError> {
        check_reference_point(xi)?;
        let [x, y, z] = *xi;
        let mut basis: NodalValues = smallvec![0.0; 32];

        for this_vert in 0..8 {
            let [a, b, c] = Self::REF_VERT[this_vert];
            basis[this_vert] = 1.0 / 64.0
                * (1.0 + x * a)
                * (1.0 + y * b)
                * (1.0 + z * c)
                * (9.0 * x * x + 9.0 * y * y + 9.0 * z * z - 19.0);
        }
        for this_vert in 8..16 {
            let [a, b, c] = Self::REF_VERT[this_vert];
            basis[this_vert] = 9.0 / 64.0
                * (1.0 + x * a)
                * (1.0 + y * b)
                * (1.0 + 9.0 * z * c)
                * (1.0 - z * z);
        }
        for this_vert in 16..24 {
            let [a, b, c] = Self::REF_VERT[this_vert];
            basis[this_vert] = 9.0 / 64.0
                * (1.0 - x * x)
                * (1.0 + 9.0 * x * a)
                * (1.0 + y * b)
                * (1.0 + z * c);
        }
        for this_vert in 24..32 {
            let [a, b, c] = Self::REF_VERT[this_vert];
            basis[this_vert] = 9.0 / 64.0
                * (1.0 + x * a)
                * (1.0 - y * y)
                * (1.0 + 9.0 * y * b)
                * (1.0 + z * c);
        }

        Ok(basis)
    }

    fn partial(&self, axis: Axis, xi: &[f64; 3]) -> Result<NodalValues, ElementError> {
        check_reference_point(xi)?;
        let [x, y, z] = *xi;
        let radius_sq = x * x + y * y + z * z;
        let mut partial: NodalValues = smallvec![0.0; 32];

        match axis {
            Axis::Xi => {
                for this_vert in 0..8 {
                    let [a, b, c] = Self::REF_VERT[this_vert];
                    partial[this_vert] = 1.0 / 64.0
                        * (1.0 + y * b)
                        * (1.0 + z * c)
                        * (9.0 * a * radius_sq + 18.0 * x * (1.0 + x * a) - 19.0 * a);
                }
                for this_vert in 8..16 {
                    let [a, b, c] = Self::REF_VERT[this_vert];
                    partial[this_vert] = 9.0 / 64.0
                        * a
                        * (1.0 + y * b)
                        * (1.0 + 9.0 * z * c)
                        * (1.0 - z * z);
                }
                for this_vert in 16..24 {
                    let [a, b, c] = Self::REF_VERT[this_vert];
                    partial[this_vert] = 9.0 / 64.0
                        * (1.0 + y * b)
                        * (1.0 + z * c)
                        * (9.0 * a * (1.0 - 3.0 * x * x) - 2.0 * x);
                }
                for this_vert in 24..32 {
                    let [a, b, c] = Self::REF_VERT[this_vert];
                    partial[this_vert] = 9.0 / 64.0
                        * a
                        * (1.0 - y * y)
                        * (1.0 + 9.0 * y * b)
                        * (1.0 + z * c);
                }
            }
            Axis::Eta => {
                for this_vert in 0..8 {
                    let [a, b, c] = Self::REF_VERT[this_vert];
                    partial[this_vert] = 1.0 / 64.0
                        * (1.0 + x * a)
                        * (1.0 + z * c)
                        * (9.0 * b * radius_sq + 18.0 * y * (1.0 + y * b) - 19.0 * b);
                }
                for this_vert in 8..16 {
                    let [a, b, c] = Self::REF_VERT[this_vert];
                    partial[this_vert] = 9.0 / 64.0
                        * (1.0 + x * a)
                        * b
                        * (1.0 + 9.0 * z * c)
                        * (1.0 - z * z);
                }
                for this_vert in 16..24 {
                    let [a, b, c] = Self::REF_VERT[this_vert];
                    partial[this_vert] = 9.0 / 64.0
                        * (1.0 - x * x)
                        * (1.0 + 9.0 * x * a)
                        * b
                        * (1.0 + z * c);
                }
                for this_vert in 24..32 {
                    let [a, b, c] = Self::REF_VERT[this_vert];
                    partial[this_vert] = 9.0 / 64.0
                        * (1.0 + x * a)
                        * (1.0 + z * c)
                        * (9.0 * b * (1.0 - 3.0 * y * y) - 2.0 * y);
                }
            }
            Axis::Mu => {
                for this_vert in 0..8 {
                    let [a, b, c] = Self::REF_VERT[this_vert];
                    partial[this_vert] = 1.0 / 64.0
                        * (1.0 + x * a)
                        * (1.0 + y * b)
                        * (9.0 * c * radius_sq + 18.0 * z * (1.0 + z * c) - 19.0 * c);
                }
                for this_vert in 8..16 {
                    let [a, b, c] = Self::REF_VERT[this_vert];
                    partial[this_vert] = 9.0 / 64.0
                        * (1.0 + x * a)
                        * (1.0 + y * b)
                        * (9.0 * c * (1.0 - 3.0 * z * z) - 2.0 * z);
                }
                for this_vert in 16..24 {
                    let [a, b, c] = Self::REF_VERT[this_vert];
                    partial[this_vert] = 9.0 / 64.0
                        * (1.0 - x * x)
                        * (1.0 + 9.0 * x * a)
                        * (1.0 + y * b)
                        * c;
                }
                for this_vert in 24..32 {
                    let [a, b, c] = Self::REF_VERT[this_vert];
                    partial[this_vert] = 9.0 / 64.0
                        * (1.0 + x * a)
                        * (1.0 - y * y)
                        * (1.0 + 9.0 * y * b)
                        * c;
                }
            }
            Axis::Tau => return Err(unsupported_axis::<3>(axis)),
        }

        Ok(partial)
    }
}
