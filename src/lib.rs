//! Generator network architectures for GAN image synthesis.
//!
//! This crate defines the architecture side of an image-synthesis GAN: shape
//! planning for the upsampling pyramid, latent-code sampling, and the
//! configuration types tying them together. Tensor execution is left to an
//! external backend behind the [`LatentMapper`] seam.
//!
//! # Architecture
//!
//! ```text
//! latent z ──► dense chain ──► reshape ──► deconv stages ──► tanh ──► image
//!              (ProjectionPlan)            (UpsampleStage × scales)
//! ```
//!
//! The latent code is plain uniform noise, or a noise prefix concatenated
//! with a structured information code drawn from an ordered product of
//! component distributions.
//!
//! # Example
//!
//! ```rust
//! use generar::{Generator, GeneratorConfig};
//! use rand::SeedableRng;
//!
//! let generator = Generator::new(GeneratorConfig::default()).unwrap();
//! assert_eq!(generator.plan().scales(), 4);
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let codes = generator.sample(&mut rng, 8);
//! assert_eq!(codes.dim(), (8, 200));
//! ```

pub mod config;
pub mod dist;
pub mod error;
pub mod generator;
pub mod latent;
pub mod shape;

pub use config::{GeneratorConfig, ImageSpec, NormalInit, MAX_SCALES};
pub use dist::{
    Categorical, ContinuousUniform, InformationDistribution, IsotropicGaussian, ProductDist,
};
pub use error::{GeneratorError, Result};
pub use generator::{Generator, LatentMapper, SamplingMode};
pub use latent::{sample_composite, sample_uniform, split_info};
pub use shape::{
    Activation, FeatureShape, ProjectionPlan, PyramidPlan, UpsampleStage, KERNEL_SIZE, PADDING,
    STRIDE,
};
