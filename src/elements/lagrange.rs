use super::{check_reference_point, unsupported_axis, Axis, NodalValues, ReferenceElement};
use crate::error::{check_len, ElementError};
use std::f64::consts::PI;

/// Chebyshev-Lobatto node positions over `[-1, 1]` for a 1D element of the given order
///
/// Returns `order + 1` ascending positions `x_i = -cos(pi * i / order)` with the end points
/// pinned to exactly `-1` and `1`.
///
/// ```
/// use fem_elements::elements::chebyshev_nodes_1d;
///
/// let nodes = chebyshev_nodes_1d(2).unwrap();
/// assert_eq!(nodes[0], -1.0);
/// assert!(nodes[1].abs() < 1e-15);
/// assert_eq!(nodes[2], 1.0);
/// ```
pub fn chebyshev_nodes_1d(order: usize) -> Result<Vec<f64>, ElementError> {
    if order < 1 {
        return Err(ElementError::invalid("Lagrange elements require an order of at least 1"));
    }

    let mut nodes: Vec<f64> = (0..=order)
        .map(|i| -(PI * i as f64 / order as f64).cos())
        .collect();
    nodes[0] = -1.0;
    nodes[order] = 1.0;

    Ok(nodes)
}

/// Evaluate every 1D Lagrange interpolant defined on `nodes` (and its derivative) at `x`
///
/// Returns `(values, derivatives)`, one entry per node.
pub fn lagrange_1d(x: f64, nodes: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let n = nodes.len();
    let mut values = vec![0.0; n];
    let mut derivatives = vec![0.0; n];

    for i in 0..n {
        let mut numerator = 1.0;
        let mut denominator = 1.0;
        for j in (0..n).filter(|j| *j != i) {
            numerator *= x - nodes[j];
            denominator *= nodes[i] - nodes[j];
        }
        values[i] = numerator / denominator;

        // product rule: drop one factor at a time
        let mut d_numerator = 0.0;
        for k in (0..n).filter(|k| *k != i) {
            let mut term = 1.0;
            for j in (0..n).filter(|j| *j != i && *j != k) {
                term *= x - nodes[j];
            }
            d_numerator += term;
        }
        derivatives[i] = d_numerator / denominator;
    }

    (values, derivatives)
}

/// Tensor-product basis values and partials at a single reference point
#[derive(Clone, Debug, PartialEq)]
pub struct LagrangeSample<const D: usize> {
    pub basis: NodalValues,
    /// One vector of partials per reference axis
    pub partials: [NodalValues; D],
}

// decompose a node index `i + j*N (+ k*N^2)` into per-axis 1D node indices
fn node_indices<const D: usize>(node: usize, nodes_per_axis: usize) -> [usize; D] {
    let mut indices = [0; D];
    let mut remainder = node;
    for index in indices.iter_mut() {
        *index = remainder % nodes_per_axis;
        remainder /= nodes_per_axis;
    }
    indices
}

fn tensor_ref_vertices<const D: usize>(nodes_1d: &[f64]) -> Vec<[f64; D]> {
    let n = nodes_1d.len();
    (0..n.pow(D as u32))
        .map(|node| node_indices::<D>(node, n).map(|i| nodes_1d[i]))
        .collect()
}

fn tensor_basis_partials<const D: usize>(
    nodes_1d: &[f64],
    xi: &[f64; D],
) -> Result<LagrangeSample<D>, ElementError> {
    check_reference_point(xi)?;

    let n = nodes_1d.len();
    let num_nodes = n.pow(D as u32);
    let axis_interp: Vec<(Vec<f64>, Vec<f64>)> =
        xi.iter().map(|x| lagrange_1d(*x, nodes_1d)).collect();

    let mut basis = NodalValues::from_elem(0.0, num_nodes);
    let mut partials = [(); D].map(|_| NodalValues::from_elem(0.0, num_nodes));

    for node in 0..num_nodes {
        let indices = node_indices::<D>(node, n);

        basis[node] = indices
            .iter()
            .zip(axis_interp.iter())
            .map(|(i, (values, _))| values[*i])
            .product();

        for (axis, axis_partials) in partials.iter_mut().enumerate() {
            axis_partials[node] = indices
                .iter()
                .zip(axis_interp.iter())
                .enumerate()
                .map(|(dim, (i, (values, derivatives)))| {
                    if dim == axis {
                        derivatives[*i]
                    } else {
                        values[*i]
                    }
                })
                .product();
        }
    }

    Ok(LagrangeSample { basis, partials })
}

/// Arbitrary order Lagrange quadrilateral on Chebyshev-Lobatto nodes
///
/// Node `i + j*N` (with `N = order + 1`) sits at `(x_i, x_j)`.
#[derive(Clone, Debug, PartialEq)]
pub struct QuadN {
    order: usize,
    nodes_1d: Vec<f64>,
}

impl QuadN {
    pub fn new(order: usize) -> Result<Self, ElementError> {
        Ok(Self {
            order,
            nodes_1d: chebyshev_nodes_1d(order)?,
        })
    }

    pub fn order(&self) -> usize {
        self.order
    }

    /// The 1D node set along each axis
    pub fn nodes_1d(&self) -> &[f64] {
        &self.nodes_1d
    }

    /// Node indices of the four corners
    pub fn corners(&self) -> [usize; 4] {
        let n = self.order + 1;
        [0, n - 1, n * n - n, n * n - 1]
    }

    /// The physical positions of the four corner nodes
    pub fn corner_vertices(&self, vertices: &[[f64; 2]]) -> Result<[[f64; 2]; 4], ElementError> {
        check_len(self.num_nodes(), vertices.len())?;
        Ok(self.corners().map(|node| vertices[node]))
    }

    /// Basis values and both partials in one pass
    pub fn basis_partials(&self, xi: &[f64; 2]) -> Result<LagrangeSample<2>, ElementError> {
        tensor_basis_partials(&self.nodes_1d, xi)
    }
}

impl ReferenceElement<2> for QuadN {
    fn num_nodes(&self) -> usize {
        self.nodes_1d.len().pow(2)
    }

    fn ref_vertices(&self) -> Vec<[f64; 2]> {
        tensor_ref_vertices(&self.nodes_1d)
    }

    fn basis(&self, xi: &[f64; 2]) -> Result<NodalValues, ElementError> {
        Ok(self.basis_partials(xi)?.basis)
    }

    fn partial(&self, axis: Axis, xi: &[f64; 2]) -> Result<NodalValues, ElementError> {
        if axis.index() >= 2 {
            return Err(unsupported_axis::<2>(axis));
        }
        let [p_xi, p_eta] = self.basis_partials(xi)?.partials;
        Ok(if axis == Axis::Xi { p_xi } else { p_eta })
    }

    fn partials(&self, xi: &[f64; 2]) -> Result<Vec<[f64; 2]>, ElementError> {
        let [p_xi, p_eta] = self.basis_partials(xi)?.partials;
        Ok(p_xi.iter().zip(p_eta.iter()).map(|(a, b)| [*a, *b]).collect())
    }
}

/// Arbitrary order Lagrange hexahedron on Chebyshev-Lobatto nodes
///
/// Node `i + j*N + k*N^2` (with `N = order + 1`) sits at `(x_i, x_j, x_k)`.
#[derive(Clone, Debug, PartialEq)]
pub struct HexN {
    order: usize,
    nodes_1d: Vec<f64>,
}

impl HexN {
    pub fn new(order: usize) -> Result<Self, ElementError> {
        Ok(Self {
            order,
            nodes_1d: chebyshev_nodes_1d(order)?,
        })
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn nodes_1d(&self) -> &[f64] {
        &self.nodes_1d
    }

    /// Node indices of the eight corners: the `mu = -1` layer followed by the `mu = +1` layer
    pub fn corners(&self) -> [usize; 8] {
        let n = self.order + 1;
        let top = n * n * n - n * n;
        let [a, b, c, d] = [0, n - 1, n * n - n, n * n - 1];
        [a, b, c, d, a + top, b + top, c + top, d + top]
    }

    pub fn corner_vertices(&self, vertices: &[[f64; 3]]) -> Result<[[f64; 3]; 8], ElementError> {
        check_len(self.num_nodes(), vertices.len())?;
        Ok(self.corners().map(|node| vertices[node]))
    }

    pub fn basis_partials(&self, xi: &[f64; 3]) -> Result<LagrangeSample<3>, ElementError> {
        tensor_basis_partials(&self.nodes_1d, xi)
    }
}

impl ReferenceElement<3> for HexN {
    fn num_nodes(&self) -> usize {
        self.nodes_1d.len().pow(3)
    }

    fn ref_vertices(&self) -> Vec<[f64; 3]> {
        tensor_ref_vertices(&self.nodes_1d)
    }

    fn basis(&self, xi: &[f64; 3]) -> Result<NodalValues, ElementError> {
        Ok(self.basis_partials(xi)?.basis)
    }

    fn partial(&self, axis: Axis, xi: &[f64; 3]) -> Result<NodalValues, ElementError> {
        if axis == Axis::Tau {
            return Err(unsupported_axis::<3>(axis));
        }
        let [p_xi, p_eta, p_mu] = self.basis_partials(xi)?.partials;
        Ok(match axis {
            Axis::Xi => p_xi,
            Axis::Eta => p_eta,
            _ => p_mu,
        })
    }

    fn partials(&self, xi: &[f64; 3]) -> Result<Vec<[f64; 3]>, ElementError> {
        let [p_xi, p_eta, p_mu] = self.basis_partials(xi)?.partials;
        Ok((0..p_xi.len())
            .map(|node| [p_xi[node], p_eta[node], p_mu[node]])
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::test_utils::check_element;
    use crate::elements::SolidPartials;

    #[test]
    fn chebyshev_node_placement() {
        let nodes = chebyshev_nodes_1d(4).unwrap();
        assert_eq!(nodes.len(), 5);
        assert_eq!(nodes[0], -1.0);
        assert_eq!(nodes[4], 1.0);
        assert!((nodes[1] + 0.5_f64.sqrt()).abs() < 1e-15);
        assert!(nodes[2].abs() < 1e-15);

        for pair in nodes.windows(2) {
            assert!(pair[0] < pair[1]);
        }

        assert!(chebyshev_nodes_1d(0).is_err());
    }

    #[test]
    fn lagrange_interpolants() {
        let nodes = chebyshev_nodes_1d(3).unwrap();

        // kronecker delta at the nodes
        for (i, x) in nodes.iter().enumerate() {
            let (values, _) = lagrange_1d(*x, &nodes);
            for (j, value) in values.iter().enumerate() {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((value - expected).abs() < 1e-14);
            }
        }

        // exact derivative of a cubic
        let x = 0.3;
        let (_, derivatives) = lagrange_1d(x, &nodes);
        let slope: f64 = nodes
            .iter()
            .zip(derivatives.iter())
            .map(|(node, d)| node.powi(3) * d)
            .sum();
        assert!((slope - 3.0 * x * x).abs() < 1e-13);
    }

    #[test]
    fn quad_n_shape_functions() {
        for order in 1..=4 {
            let element = QuadN::new(order).unwrap();
            assert_eq!(element.num_nodes(), (order + 1).pow(2));
            check_element(&element);
        }
        assert!(QuadN::new(0).is_err());
    }

    #[test]
    fn hex_n_shape_functions() {
        for order in 1..=3 {
            let element = HexN::new(order).unwrap();
            assert_eq!(element.num_nodes(), (order + 1).pow(3));
            check_element(&element);
        }
    }

    #[test]
    fn order_one_matches_bilinear_quad() {
        let element = QuadN::new(1).unwrap();
        let xi = [0.4, -0.1];
        let basis = element.basis(&xi).unwrap();

        // nodes run (-1,-1), (1,-1), (-1,1), (1,1)
        let expected = [0.27, 0.385, 0.135, 0.21];
        for (value, e) in basis.iter().zip(expected.iter()) {
            assert!((value - e).abs() < 1e-15);
        }
    }

    #[test]
    fn corner_nodes() {
        let quad = QuadN::new(3).unwrap();
        assert_eq!(quad.corners(), [0, 3, 12, 15]);

        let ref_vert = quad.ref_vertices();
        let corners = quad.corner_vertices(&ref_vert).unwrap();
        assert_eq!(corners, [[-1.0, -1.0], [1.0, -1.0], [-1.0, 1.0], [1.0, 1.0]]);

        let hex = HexN::new(2).unwrap();
        assert_eq!(hex.corners(), [0, 2, 6, 8, 18, 20, 24, 26]);

        let ref_vert = hex.ref_vertices();
        let corners = hex.corner_vertices(&ref_vert).unwrap();
        assert_eq!(corners[4], [-1.0, -1.0, 1.0]);
        assert_eq!(corners[7], [1.0, 1.0, 1.0]);

        assert!(matches!(
            hex.corner_vertices(&ref_vert[..20]),
            Err(ElementError::SizeMismatch { .. })
        ));
    }

    #[test]
    fn named_partials_match_sample() {
        let hex = HexN::new(2).unwrap();
        let xi = [0.1, 0.2, -0.3];
        let sample = hex.basis_partials(&xi).unwrap();

        assert_eq!(hex.partial_mu(&xi).unwrap(), sample.partials[2]);
        assert_eq!(hex.partials(&xi).unwrap()[5][1], sample.partials[1][5]);
    }
}
