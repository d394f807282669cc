/// Gauss-Legendre rule generation for any point count
mod glq;
/// Tensor-product quadrature grids
mod grid;
/// Tabulated 1D Gauss and Lobatto rules
mod rules;

pub use glq::gauss_quadrature_points;
pub use grid::{gauss_2d, gauss_3d, gauss_4d, lobatto_2d, lobatto_3d, lobatto_4d, QuadratureGrid};
pub use rules::{line_gauss_rule, line_lobatto_rule, RuleFamily, MAX_RULE_ORDER};

pub(crate) use grid::check_dim;
