/// 8, 20, and 32 node hexahedral elements
mod hex;
/// Arbitrary order tensor-product Lagrange elements
mod lagrange;
/// 4, 8, and 12 node quadrilateral elements
mod quad;
/// 16 node tesseract element
mod tess;

pub use hex::{Hex20, Hex32, Hex8};
pub use lagrange::{chebyshev_nodes_1d, lagrange_1d, HexN, LagrangeSample, QuadN};
pub use quad::{Quad12, Quad4, Quad8};
pub use tess::Tess16;

use crate::error::{check_len, ElementError};
use smallvec::SmallVec;

/// Per-node values (basis function values or one axis of partial derivatives)
pub type NodalValues = SmallVec<[f64; 32]>;

/// Slack allowed when checking that a reference point falls inside `[-1, 1]^D`
pub const REFERENCE_TOLERANCE: f64 = 1e-12;

/// Reference space axes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Xi,
    Eta,
    Mu,
    Tau,
}

impl Axis {
    pub const ALL: [Axis; 4] = [Axis::Xi, Axis::Eta, Axis::Mu, Axis::Tau];

    pub fn index(self) -> usize {
        match self {
            Self::Xi => 0,
            Self::Eta => 1,
            Self::Mu => 2,
            Self::Tau => 3,
        }
    }
}

/// A finite element defined over the reference cell `[-1, 1]^D`
///
/// Implementors provide the shape functions and their partial derivatives; the isoparametric
/// map to physical space and the gradient table used by [jacobian](crate::jacobian::jacobian)
/// are built on top of those.
pub trait ReferenceElement<const D: usize>: Sync {
    /// Number of nodes (and shape functions)
    fn num_nodes(&self) -> usize;

    /// Node positions in reference space
    fn ref_vertices(&self) -> Vec<[f64; D]>;

    /// Value of each node's shape function at `xi`
    fn basis(&self, xi: &[f64; D]) -> Result<NodalValues, ElementError>;

    /// Partial derivative of each node's shape function with respect to `axis` at `xi`
    fn partial(&self, axis: Axis, xi: &[f64; D]) -> Result<NodalValues, ElementError>;

    fn partial_xi(&self, xi: &[f64; D]) -> Result<NodalValues, ElementError> {
        self.partial(Axis::Xi, xi)
    }

    fn partial_eta(&self, xi: &[f64; D]) -> Result<NodalValues, ElementError> {
        self.partial(Axis::Eta, xi)
    }

    /// Gradient of every shape function, indexed as `[node][axis]`
    fn partials(&self, xi: &[f64; D]) -> Result<Vec<[f64; D]>, ElementError> {
        let mut table = vec![[0.0; D]; self.num_nodes()];
        for axis in Axis::ALL.iter().take(D) {
            let axis_partials = self.partial(*axis, xi)?;
            for (node_partials, value) in table.iter_mut().zip(axis_partials.iter()) {
                node_partials[axis.index()] = *value;
            }
        }
        Ok(table)
    }

    /// Map a reference point into physical space through the element's shape functions
    ///
    /// `vertices` must hold one physical coordinate per node
    fn physical_position(
        &self,
        xi: &[f64; D],
        vertices: &[[f64; D]],
    ) -> Result<[f64; D], ElementError> {
        check_len(self.num_nodes(), vertices.len())?;
        let basis = self.basis(xi)?;

        let mut x_point = [0.0; D];
        let mut check_unity = 0.0;
        for (vertex, shape_fcn) in vertices.iter().zip(basis.iter()) {
            for dim in 0..D {
                x_point[dim] += vertex[dim] * shape_fcn;
            }
            check_unity += shape_fcn;
        }
        tracing::trace!(check_unity, "partition of unity");

        Ok(x_point)
    }
}

/// The Mu partial, available on three-dimensional elements
pub trait SolidPartials: ReferenceElement<3> {
    fn partial_mu(&self, xi: &[f64; 3]) -> Result<NodalValues, ElementError> {
        self.partial(Axis::Mu, xi)
    }
}

impl<T: ReferenceElement<3> + ?Sized> SolidPartials for T {}

/// The Mu and Tau partials, available on four-dimensional elements
pub trait TesseractPartials: ReferenceElement<4> {
    fn partial_mu(&self, xi: &[f64; 4]) -> Result<NodalValues, ElementError> {
        self.partial(Axis::Mu, xi)
    }

    fn partial_tau(&self, xi: &[f64; 4]) -> Result<NodalValues, ElementError> {
        self.partial(Axis::Tau, xi)
    }
}

impl<T: ReferenceElement<4> + ?Sized> TesseractPartials for T {}

pub(crate) fn check_reference_point<const D: usize>(xi: &[f64; D]) -> Result<(), ElementError> {
    for (axis, x) in xi.iter().enumerate() {
        if !x.is_finite() || x.abs() > 1.0 + REFERENCE_TOLERANCE {
            return Err(ElementError::invalid(format!(
                "reference coordinate {} along axis {} falls outside [-1, 1]",
                x, axis
            )));
        }
    }
    Ok(())
}

pub(crate) fn unsupported_axis<const D: usize>(axis: Axis) -> ElementError {
    ElementError::invalid(format!("{:?} is not a reference axis of a {}D element", axis, D))
}

/// The closed set of two-dimensional elements
#[derive(Clone, Debug, PartialEq)]
pub enum Element2D {
    Quad4(Quad4),
    Quad8(Quad8),
    Quad12(Quad12),
    QuadN(QuadN),
}

impl ReferenceElement<2> for Element2D {
    fn num_nodes(&self) -> usize {
        match self {
            Self::Quad4(e) => e.num_nodes(),
            Self::Quad8(e) => e.num_nodes(),
            Self::Quad12(e) => e.num_nodes(),
            Self::QuadN(e) => e.num_nodes(),
        }
    }

    fn ref_vertices(&self) -> Vec<[f64; 2]> {
        match self {
            Self::Quad4(e) => e.ref_vertices(),
            Self::Quad8(e) => e.ref_vertices(),
            Self::Quad12(e) => e.ref_vertices(),
            Self::QuadN(e) => e.ref_vertices(),
        }
    }

    fn basis(&self, xi: &[f64; 2]) -> Result<NodalValues, ElementError> {
        match self {
            Self::Quad4(e) => e.basis(xi),
            Self::Quad8(e) => e.basis(xi),
            Self::Quad12(e) => e.basis(xi),
            Self::QuadN(e) => e.basis(xi),
        }
    }

    fn partial(&self, axis: Axis, xi: &[f64; 2]) -> Result<NodalValues, ElementError> {
        match self {
            Self::Quad4(e) => e.partial(axis, xi),
            Self::Quad8(e) => e.partial(axis, xi),
            Self::Quad12(e) => e.partial(axis, xi),
            Self::QuadN(e) => e.partial(axis, xi),
        }
    }
}

/// The closed set of three-dimensional elements
#[derive(Clone, Debug, PartialEq)]
pub enum Element3D {
    Hex8(Hex8),
    Hex20(Hex20),
    Hex32(Hex32),
    HexN(HexN),
}

impl ReferenceElement<3> for Element3D {
    fn num_nodes(&self) -> usize {
        match self {
            Self::Hex8(e) => e.num_nodes(),
            Self::Hex20(e) => e.num_nodes(),
            Self::Hex32(e) => e.num_nodes(),
            Self::HexN(e) => e.num_nodes(),
        }
    }

    fn ref_vertices(&self) -> Vec<[f64; 3]> {
        match self {
            Self::Hex8(e) => e.ref_vertices(),
            Self::Hex20(e) => e.ref_vertices(),
            Self::Hex32(e) => e.ref_vertices(),
            Self::HexN(e) => e.ref_vertices(),
        }
    }

    fn basis(&self, xi: &[f64; 3]) -> Result<NodalValues, ElementError> {
        match self {
            Self::Hex8(e) => e.basis(xi),
            Self::Hex20(e) => e.basis(xi),
            Self::Hex32(e) => e.basis(xi),
            Self::HexN(e) => e.basis(xi),
        }
    }

    fn partial(&self, axis: Axis, xi: &[f64; 3]) -> Result<NodalValues, ElementError> {
        match self {
            Self::Hex8(e) => e.partial(axis, xi),
            Self::Hex20(e) => e.partial(axis, xi),
            Self::Hex32(e) => e.partial(axis, xi),
            Self::HexN(e) => e.partial(axis, xi),
        }
    }
}
