use super::{check_reference_point, Axis, NodalValues, ReferenceElement};
use crate::error::ElementError;

/// Multilinear 16 node tesseract
///
/// Nodes 0-7 follow the [Hex8](super::Hex8) ordering on the `tau = -1` cube and nodes 8-15
/// repeat it on the `tau = +1` cube.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tess16;

impl Tess16 {
    pub const REF_VERT: [[f64; 4]; 16] = [
        // tau = -1
        [-1.0, -1.0, -1.0, -1.0],
        [1.0, -1.0, -1.0, -1.0],
        [1.0, -1.0, 1.0, -1.0],
        [-1.0, -1.0, 1.0, -1.0],
        [-1.0, 1.0, -1.0, -1.0],
        [1.0, 1.0, -1.0, -1.0],
        [1.0, 1.0, 1.0, -1.0],
        [-1.0, 1.0, 1.0, -1.0],
        // tau = +1
        [-1.0, -1.0, -1.0, 1.0],
        [1.0, -1.0, -1.0, 1.0],
        [1.0, -1.0, 1.0, 1.0],
        [-1.0, -1.0, 1.0, 1.0],
        [-1.0, 1.0, -1.0, 1.0],
        [1.0, 1.0, -1.0, 1.0],
        [1.0, 1.0, 1.0, 1.0],
        [-1.0, 1.0, 1.0, 1.0],
    ];
}

impl ReferenceElement<4> for Tess16 {
    fn num_nodes(&self) -> usize {
        16
    }

    fn ref_vertices(&self) -> Vec<[f64; 4]> {
        Self::REF_VERT.to_vec()
    }

    fn basis(&self, xi: &[f64; 4]) -> Result<NodalValues, ElementError> {
        check_reference_point(xi)?;
        let [x, y, z, t] = *xi;

        Ok(Self::REF_VERT
            .iter()
            .map(|[a, b, c, d]| {
                1.0 / 16.0 * (1.0 + x * a) * (1.0 + y * b) * (1.0 + z * c) * (1.0 + t * d)
            })
            .collect())
    }

    fn partial(&self, axis: Axis, xi: &[f64; 4]) -> Result<NodalValues, ElementError> {
        check_reference_point(xi)?;

        // the factor along `axis` differentiates to the node coordinate itself
        let along = axis.index();
        Ok(Self::REF_VERT
            .iter()
            .map(|node| {
                node.iter()
                    .zip(xi.iter())
                    .enumerate()
                    .fold(1.0 / 16.0, |acc, (dim, (r, x))| {
                        if dim == along {
                            acc * r
                        } else {
                            acc * (1.0 + x * r)
                        }
                    })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::test_utils::check_element;
    use crate::elements::TesseractPartials;

    #[test]
    fn tess16_shape_functions() {
        check_element(&Tess16);
    }

    #[test]
    fn tess16_partials_at_center() {
        let xi = [0.0; 4];
        let p_tau = Tess16.partial_tau(&xi).unwrap();
        let p_mu = Tess16.partial_mu(&xi).unwrap();

        for (node, [_, _, c, t]) in Tess16::REF_VERT.iter().enumerate() {
            assert!((p_tau[node] - t / 16.0).abs() < 1e-15);
            assert!((p_mu[node] - c / 16.0).abs() < 1e-15);
        }
    }

    #[test]
    fn tess16_maps_a_shifted_cell() {
        let vertices: Vec<[f64; 4]> = Tess16::REF_VERT
            .iter()
            .map(|[a, b, c, d]| [a + 1.0, *b, *c, 3.0 * d])
            .collect();

        let x = Tess16
            .physical_position(&[0.5, 0.0, -0.25, 0.5], &vertices)
            .unwrap();
        assert!((x[0] - 1.5).abs() < 1e-15);
        assert!((x[2] + 0.25).abs() < 1e-15);
        assert!((x[3] - 1.5).abs() < 1e-15);
    }
}
