//! Structured distributions for InfoGAN-style latent codes.
//!
//! An information code is drawn from an ordered product of named component
//! distributions; each component owns a contiguous block of columns in the
//! sampled batch.

use std::fmt;

use ndarray::{s, Array2};
use rand::{Rng, RngCore};

/// A structured distribution over a block of latent columns.
///
/// Implementations must return batches of shape `(batch_size, dim())` from
/// [`sample`](Self::sample); the sampler treats any other shape as a bug in
/// the implementation and aborts.
pub trait InformationDistribution {
    /// Total width of one sample.
    fn dim(&self) -> usize;

    /// Draw `batch_size` rows.
    fn sample(&self, rng: &mut dyn RngCore, batch_size: usize) -> Array2<f32>;
}

/// Uniform categorical code, sampled as a one-hot row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Categorical {
    /// Number of classes; must be > 0
    pub num_classes: usize,
}

impl InformationDistribution for Categorical {
    fn dim(&self) -> usize {
        self.num_classes
    }

    fn sample(&self, rng: &mut dyn RngCore, batch_size: usize) -> Array2<f32> {
        let mut out = Array2::zeros((batch_size, self.num_classes));
        for mut row in out.rows_mut() {
            let class = rng.random_range(0..self.num_classes);
            row[class] = 1.0;
        }
        out
    }
}

/// Independent uniform draws from `[low, high)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContinuousUniform {
    pub dim: usize,
    pub low: f32,
    pub high: f32,
}

impl InformationDistribution for ContinuousUniform {
    fn dim(&self) -> usize {
        self.dim
    }

    fn sample(&self, rng: &mut dyn RngCore, batch_size: usize) -> Array2<f32> {
        Array2::from_shape_fn((batch_size, self.dim), |_| {
            rng.random_range(self.low..self.high)
        })
    }
}

/// Independent normal draws via the Box-Muller transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsotropicGaussian {
    pub dim: usize,
    pub mean: f32,
    pub std_dev: f32,
}

impl InformationDistribution for IsotropicGaussian {
    fn dim(&self) -> usize {
        self.dim
    }

    fn sample(&self, rng: &mut dyn RngCore, batch_size: usize) -> Array2<f32> {
        Array2::from_shape_fn((batch_size, self.dim), |_| {
            let u1: f64 = rng.random::<f64>().max(1e-10);
            let u2: f64 = rng.random::<f64>();
            let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
            self.mean + z as f32 * self.std_dev
        })
    }
}

/// Ordered product of component distributions.
///
/// The total width is the sum of component widths; samples are component
/// blocks concatenated column-wise in insertion order.
#[derive(Default)]
pub struct ProductDist {
    components: Vec<Box<dyn InformationDistribution>>,
}

impl ProductDist {
    #[must_use]
    pub fn new(components: Vec<Box<dyn InformationDistribution>>) -> Self {
        Self { components }
    }

    /// Append a component after the existing ones.
    pub fn push(&mut self, component: impl InformationDistribution + 'static) {
        self.components.push(Box::new(component));
    }

    /// Number of components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl From<Vec<Box<dyn InformationDistribution>>> for ProductDist {
    fn from(components: Vec<Box<dyn InformationDistribution>>) -> Self {
        Self::new(components)
    }
}

impl fmt::Debug for ProductDist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProductDist")
            .field(
                "component_dims",
                &self.components.iter().map(|c| c.dim()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl InformationDistribution for ProductDist {
    fn dim(&self) -> usize {
        self.components.iter().map(|c| c.dim()).sum()
    }

    /// # Panics
    ///
    /// Panics if a component returns a batch that does not match its own
    /// declared shape.
    fn sample(&self, rng: &mut dyn RngCore, batch_size: usize) -> Array2<f32> {
        let mut out = Array2::zeros((batch_size, self.dim()));
        let mut col = 0;
        for component in &self.components {
            let block = component.sample(rng, batch_size);
            assert_eq!(
                block.nrows(),
                batch_size,
                "component returned {} rows, expected {}",
                block.nrows(),
                batch_size
            );
            assert_eq!(
                block.ncols(),
                component.dim(),
                "component returned {} columns, expected {}",
                block.ncols(),
                component.dim()
            );
            out.slice_mut(s![.., col..col + block.ncols()]).assign(&block);
            col += block.ncols();
        }
        out
    }
}
