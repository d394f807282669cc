/// Reference elements: shape functions and their partial derivatives
pub mod elements;
/// Jacobian assembly, determinants, and analytic inverses
pub mod jacobian;
/// 1D quadrature rules and tensor-product quadrature grids
pub mod quadrature;
/// Parallel evaluation of an element over a quadrature grid
pub mod sampler;

mod error;

pub use error::ElementError;

pub use elements::{
    Axis, Element2D, Element3D, Hex20, Hex32, Hex8, HexN, NodalValues, Quad12, Quad4, Quad8,
    QuadN, ReferenceElement, SolidPartials, Tess16, TesseractPartials,
};
pub use jacobian::{Jacobian, DEFAULT_SINGULAR_TOLERANCE};
pub use quadrature::{QuadratureGrid, RuleFamily};
pub use sampler::{ElementSampler, ElementSamples};
