use crate::elements::{NodalValues, ReferenceElement};
use crate::error::{check_len, ElementError};
use crate::jacobian::{Jacobian, DEFAULT_SINGULAR_TOLERANCE};
use crate::quadrature::QuadratureGrid;
use nalgebra::SMatrix;
use rayon::prelude::*;

#[cfg(feature = "json_export")]
use json::{object, JsonValue};

/// Evaluates a reference element over every point of a quadrature grid
#[derive(Clone, Debug)]
pub struct ElementSampler<const D: usize> {
    grid: QuadratureGrid<D>,
    tolerance: f64,
}

/// Everything an integration loop needs at a single quadrature point
#[derive(Clone, Debug)]
pub struct PointSample<const D: usize> {
    /// Reference space location
    pub point: [f64; D],
    /// Physical space location
    pub position: [f64; D],
    /// Combined quadrature weight
    pub weight: f64,
    pub basis: NodalValues,
    /// Shape function gradients in reference space, indexed `[node][axis]`
    pub partials: Vec<[f64; D]>,
    pub jacobian: Jacobian<D>,
    pub inverse: SMatrix<f64, D, D>,
}

/// An element sampled at every point of a quadrature grid (in grid order)
#[derive(Clone, Debug)]
pub struct ElementSamples<const D: usize> {
    pub samples: Vec<PointSample<D>>,
}

impl<const D: usize> ElementSampler<D> {
    pub fn new(grid: QuadratureGrid<D>) -> Self {
        Self {
            grid,
            tolerance: DEFAULT_SINGULAR_TOLERANCE,
        }
    }

    /// Override the relative determinant threshold used when inverting each Jacobian
    ///
    /// See [DEFAULT_SINGULAR_TOLERANCE] for how the threshold is scaled.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn grid(&self) -> &QuadratureGrid<D> {
        &self.grid
    }

    /// Evaluate `element` with physical `vertices` at every grid point (in parallel)
    ///
    /// The first failing point aborts the whole sample
    pub fn sample<E>(
        &self,
        element: &E,
        vertices: &[[f64; D]],
    ) -> Result<ElementSamples<D>, ElementError>
    where
        E: ReferenceElement<D>,
    {
        check_len(element.num_nodes(), vertices.len())?;

        let samples = self
            .grid
            .points
            .par_iter()
            .enumerate()
            .map(|(m, point)| -> Result<PointSample<D>, ElementError> {
                let basis = element.basis(point)?;
                let partials = element.partials(point)?;
                let jacobian = Jacobian::assemble(vertices, &partials)?;
                let inverse = jacobian.inverse(self.tolerance)?;

                let mut position = [0.0; D];
                for (vertex, shape_fcn) in vertices.iter().zip(basis.iter()) {
                    for dim in 0..D {
                        position[dim] += vertex[dim] * shape_fcn;
                    }
                }

                Ok(PointSample {
                    point: *point,
                    position,
                    weight: self.grid.total_weight(m),
                    basis,
                    partials,
                    jacobian,
                    inverse,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            nodes = element.num_nodes(),
            points = samples.len(),
            dim = D,
            "sampled element"
        );

        Ok(ElementSamples { samples })
    }
}

impl<const D: usize> ElementSamples<D> {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Integrate a function of physical position over the element
    ///
    /// ```
    /// use fem_elements::elements::Quad4;
    /// use fem_elements::quadrature::gauss_2d;
    /// use fem_elements::sampler::ElementSampler;
    ///
    /// let sampler = ElementSampler::new(gauss_2d(2).unwrap());
    /// let unit_square = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
    /// let samples = sampler.sample(&Quad4, &unit_square).unwrap();
    ///
    /// let solution = samples.integrate(|[x, y]| x * y);
    /// assert!((solution - 0.25).abs() < 1e-14);
    /// ```
    pub fn integrate<F>(&self, integrand: F) -> f64
    where
        F: Fn(&[f64; D]) -> f64,
    {
        self.samples
            .iter()
            .map(|s| integrand(&s.position) * s.weight * s.jacobian.det.abs())
            .sum()
    }

    /// The physical measure (area, volume, ...) of the element
    pub fn volume(&self) -> f64 {
        self.integrate(|_| 1.0)
    }

    /// Interpolate nodal data at the `q`-th sample
    pub fn interpolate(&self, q: usize, nodal: &[f64]) -> Result<f64, ElementError> {
        let sample = self.get(q)?;
        check_len(sample.basis.len(), nodal.len())?;

        Ok(sample
            .basis
            .iter()
            .zip(nodal.iter())
            .map(|(b, u)| b * u)
            .sum())
    }

    /// The physical gradient of interpolated nodal data at the `q`-th sample
    pub fn gradient(&self, q: usize, nodal: &[f64]) -> Result<[f64; D], ElementError> {
        let sample = self.get(q)?;
        check_len(sample.partials.len(), nodal.len())?;

        let mut ref_gradient = [0.0; D];
        for (node_partials, u) in sample.partials.iter().zip(nodal.iter()) {
            for axis in 0..D {
                ref_gradient[axis] += node_partials[axis] * u;
            }
        }

        let mut gradient = [0.0; D];
        for (k, g) in gradient.iter_mut().enumerate() {
            for (j, rg) in ref_gradient.iter().enumerate() {
                *g += sample.inverse[(k, j)] * rg;
            }
        }
        Ok(gradient)
    }

    fn get(&self, q: usize) -> Result<&PointSample<D>, ElementError> {
        self.samples.get(q).ok_or_else(|| {
            ElementError::invalid(format!(
                "sample {} is outside [0, {})",
                q,
                self.samples.len()
            ))
        })
    }

    /// Produce a Json Object that describes the sampled element
    #[cfg(feature = "json_export")]
    pub fn to_json(&self) -> JsonValue {
        object! {
            "dim": D,
            "points": self.samples.iter().map(|s| JsonValue::from(s.point.to_vec())).collect::<Vec<_>>(),
            "positions": self.samples.iter().map(|s| JsonValue::from(s.position.to_vec())).collect::<Vec<_>>(),
            "weights": self.samples.iter().map(|s| s.weight).collect::<Vec<_>>(),
            "determinants": self.samples.iter().map(|s| s.jacobian.det).collect::<Vec<_>>(),
            "volume": self.volume(),
        }
    }
}
