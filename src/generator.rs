//! Generator networks: configuration-driven architecture plus latent sampling.
//!
//! A [`Generator`] owns its configuration and the [`PyramidPlan`] derived from
//! it at construction. Its sampling mode decides how latent codes are drawn:
//!
//! ```text
//! Plain:          z ~ Uniform(-1, 1)^latent_dim
//! CompositeInfo:  z = [noise ~ Uniform(-1, 1)^noise_dim | info ~ ProductDist]
//! ```
//!
//! Executing the plan is the backend's job, reached through [`LatentMapper`].
//!
//! # Example
//!
//! ```rust
//! use generar::{Categorical, ContinuousUniform, Generator, GeneratorConfig, ProductDist};
//! use rand::SeedableRng;
//!
//! let mut info = ProductDist::default();
//! info.push(Categorical { num_classes: 10 });
//! info.push(ContinuousUniform { dim: 2, low: -1.0, high: 1.0 });
//!
//! let generator = Generator::with_info(GeneratorConfig::default(), 200, info).unwrap();
//! assert_eq!(generator.latent_dim(), 212);
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let batch = generator.sample(&mut rng, 4);
//! assert_eq!(generator.info_coding(&batch).dim(), (4, 12));
//! ```

use ndarray::{Array2, Array4, ArrayView2};
use rand::Rng;

use crate::config::GeneratorConfig;
use crate::dist::{InformationDistribution, ProductDist};
use crate::error::{GeneratorError, Result};
use crate::latent;
use crate::shape::PyramidPlan;

/// Maps latent code batches to image batches.
///
/// Implemented by the executing tensor backend that realizes a
/// [`PyramidPlan`]; the result has shape `(batch, channels, height, width)`.
pub trait LatentMapper {
    fn map_latent(&self, codes: &Array2<f32>) -> Array4<f32>;
}

/// How a generator draws its latent codes.
#[derive(Debug)]
pub enum SamplingMode {
    /// Uniform noise over the full latent code
    Plain,
    /// Uniform noise prefix plus a structured information suffix
    CompositeInfo {
        /// Width of the noise prefix
        noise_dim: usize,
        /// Distribution of the information suffix
        info: ProductDist,
    },
}

/// A generator network architecture.
///
/// Construction validates the configuration and derives the stage geometry
/// once; both are immutable for the generator's lifetime.
#[derive(Debug)]
pub struct Generator {
    config: GeneratorConfig,
    plan: PyramidPlan,
    mode: SamplingMode,
}

impl Generator {
    /// Create a plain generator sampling uniform latent codes.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        let plan = PyramidPlan::plan(&config)?;
        Ok(Self {
            config,
            plan,
            mode: SamplingMode::Plain,
        })
    }

    /// Create a generator whose latent code carries a structured information
    /// suffix.
    ///
    /// The total latent width is `noise_dim + info.dim()`; the `latent_dim`
    /// field of `config` is replaced by that sum.
    pub fn with_info(mut config: GeneratorConfig, noise_dim: usize, info: ProductDist) -> Result<Self> {
        if noise_dim == 0 {
            return Err(GeneratorError::InvalidNoiseDim(noise_dim));
        }
        config.latent_dim = noise_dim + info.dim();
        let plan = PyramidPlan::plan(&config)?;
        Ok(Self {
            config,
            plan,
            mode: SamplingMode::CompositeInfo { noise_dim, info },
        })
    }

    /// Create a generator conditioned on a class or attribute label.
    ///
    /// Not implemented: fails before planning anything, on every call.
    pub fn conditional(_config: GeneratorConfig, _cond_dim: usize) -> Result<Self> {
        Err(GeneratorError::Unsupported("conditional generation"))
    }

    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    #[must_use]
    pub fn plan(&self) -> &PyramidPlan {
        &self.plan
    }

    #[must_use]
    pub fn mode(&self) -> &SamplingMode {
        &self.mode
    }

    /// Total width of the latent code.
    #[must_use]
    pub fn latent_dim(&self) -> usize {
        self.config.latent_dim
    }

    /// Width of the uniform-noise prefix. Equals the full latent width in
    /// plain mode.
    #[must_use]
    pub fn noise_dim(&self) -> usize {
        match &self.mode {
            SamplingMode::Plain => self.config.latent_dim,
            SamplingMode::CompositeInfo { noise_dim, .. } => *noise_dim,
        }
    }

    /// Width of the information suffix. Zero in plain mode.
    #[must_use]
    pub fn info_dim(&self) -> usize {
        self.config.latent_dim - self.noise_dim()
    }

    /// Draw a latent batch of shape `(batch_size, latent_dim)` according to
    /// the sampling mode.
    pub fn sample<R: Rng>(&self, rng: &mut R, batch_size: usize) -> Array2<f32> {
        match &self.mode {
            SamplingMode::Plain => {
                latent::sample_uniform(rng, batch_size, self.config.latent_dim)
            }
            SamplingMode::CompositeInfo { noise_dim, info } => {
                latent::sample_composite(rng, batch_size, *noise_dim, info)
            }
        }
    }

    /// View of the information columns of a latent batch.
    #[must_use]
    pub fn info_coding<'a>(&self, batch: &'a Array2<f32>) -> ArrayView2<'a, f32> {
        latent::split_info(batch, self.noise_dim())
    }

    /// Map latent codes to images through the executing backend.
    ///
    /// Unsupported in composite-info mode; the backend is never touched.
    pub fn generate(&self, net: &dyn LatentMapper, codes: &Array2<f32>) -> Result<Array4<f32>> {
        if let SamplingMode::CompositeInfo { .. } = self.mode {
            return Err(GeneratorError::Unsupported(
                "image generation from a composite latent code",
            ));
        }
        if codes.ncols() != self.config.latent_dim {
            return Err(GeneratorError::LatentWidthMismatch {
                got: codes.ncols(),
                expected: self.config.latent_dim,
            });
        }
        Ok(net.map_latent(codes))
    }

    /// Generate a batch from freshly drawn standard-uniform `[0, 1)` codes.
    ///
    /// Unsupported in composite-info mode; the backend is never touched.
    pub fn random_generate<R: Rng>(
        &self,
        net: &dyn LatentMapper,
        rng: &mut R,
        batch_size: usize,
    ) -> Result<Array4<f32>> {
        if let SamplingMode::CompositeInfo { .. } = self.mode {
            return Err(GeneratorError::Unsupported(
                "unconditioned generation from a composite latent code",
            ));
        }
        let codes =
            Array2::from_shape_fn((batch_size, self.config.latent_dim), |_| rng.random::<f32>());
        Ok(net.map_latent(&codes))
    }

    /// Capture the feature maps after each stage.
    ///
    /// Not implemented: fails on every call with no side effects.
    pub fn generate_intermediate(&self, _codes: &Array2<f32>) -> Result<Vec<Array4<f32>>> {
        Err(GeneratorError::Unsupported(
            "intermediate activation capture",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ImageSpec;
    use crate::dist::Categorical;
    use crate::shape::FeatureShape;
    use ndarray::s;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn small_config() -> GeneratorConfig {
        GeneratorConfig {
            image: ImageSpec {
                channels: 1,
                height: 16,
                width: 16,
            },
            base_filters: 4,
            latent_dim: 8,
            scales: 2,
            ..Default::default()
        }
    }

    fn info_dist() -> ProductDist {
        let mut info = ProductDist::default();
        info.push(Categorical { num_classes: 10 });
        info
    }

    /// Backend stub returning zero images of the planned output shape.
    struct ZeroBackend {
        out: FeatureShape,
    }

    impl LatentMapper for ZeroBackend {
        fn map_latent(&self, codes: &Array2<f32>) -> Array4<f32> {
            Array4::zeros((codes.nrows(), self.out.channels, self.out.height, self.out.width))
        }
    }

    /// Backend stub that must never be reached.
    struct UnreachableBackend;

    impl LatentMapper for UnreachableBackend {
        fn map_latent(&self, _codes: &Array2<f32>) -> Array4<f32> {
            panic!("backend must not be invoked");
        }
    }

    #[test]
    fn test_new_plans_at_construction() {
        let generator = Generator::new(small_config()).unwrap();
        assert_eq!(generator.plan().scales(), 2);
        assert_eq!(generator.latent_dim(), 8);
        assert_eq!(generator.noise_dim(), 8);
        assert_eq!(generator.info_dim(), 0);
        assert!(matches!(generator.mode(), SamplingMode::Plain));
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let mut config = small_config();
        config.image.height = 18;
        assert_eq!(
            Generator::new(config).unwrap_err(),
            GeneratorError::IndivisibleHeight {
                height: 18,
                scales: 2
            }
        );
    }

    #[test]
    fn test_with_info_derives_latent_dim() {
        let generator = Generator::with_info(small_config(), 8, info_dist()).unwrap();
        assert_eq!(generator.latent_dim(), 18);
        assert_eq!(generator.noise_dim(), 8);
        assert_eq!(generator.info_dim(), 10);
    }

    #[test]
    fn test_with_info_rejects_zero_noise_dim() {
        assert_eq!(
            Generator::with_info(small_config(), 0, info_dist()).unwrap_err(),
            GeneratorError::InvalidNoiseDim(0)
        );
    }

    #[test]
    fn test_conditional_always_fails() {
        for _ in 0..3 {
            assert_eq!(
                Generator::conditional(small_config(), 10).unwrap_err(),
                GeneratorError::Unsupported("conditional generation")
            );
        }
    }

    #[test]
    fn test_sample_plain_shape_and_range() {
        let generator = Generator::new(small_config()).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let batch = generator.sample(&mut rng, 32);

        assert_eq!(batch.dim(), (32, 8));
        assert!(batch.iter().all(|&v| (-1.0..=1.0).contains(&v)));
        assert_eq!(generator.info_coding(&batch).dim(), (32, 0));
    }

    #[test]
    fn test_sample_composite_shape_and_split() {
        let generator = Generator::with_info(small_config(), 8, info_dist()).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let batch = generator.sample(&mut rng, 32);

        assert_eq!(batch.dim(), (32, 18));
        let coding = generator.info_coding(&batch);
        assert_eq!(coding.dim(), (32, 10));
        assert_eq!(coding, batch.slice(s![.., 8..]));
    }

    #[test]
    fn test_sample_deterministic_under_seed() {
        let generator = Generator::with_info(small_config(), 8, info_dist()).unwrap();
        let mut a = StdRng::seed_from_u64(9);
        let mut b = StdRng::seed_from_u64(9);
        assert_eq!(generator.sample(&mut a, 16), generator.sample(&mut b, 16));
    }

    #[test]
    fn test_generate_plain_delegates_to_backend() {
        let generator = Generator::new(small_config()).unwrap();
        let backend = ZeroBackend {
            out: generator.plan().output_shape(),
        };
        let mut rng = StdRng::seed_from_u64(42);
        let codes = generator.sample(&mut rng, 4);

        let images = generator.generate(&backend, &codes).unwrap();
        assert_eq!(images.dim(), (4, 1, 16, 16));
    }

    #[test]
    fn test_generate_rejects_wrong_code_width() {
        let generator = Generator::new(small_config()).unwrap();
        let codes = Array2::<f32>::zeros((4, 5));
        assert_eq!(
            generator.generate(&UnreachableBackend, &codes).unwrap_err(),
            GeneratorError::LatentWidthMismatch {
                got: 5,
                expected: 8
            }
        );
    }

    #[test]
    fn test_random_generate_plain() {
        let generator = Generator::new(small_config()).unwrap();
        let backend = ZeroBackend {
            out: generator.plan().output_shape(),
        };
        let mut rng = StdRng::seed_from_u64(42);

        let images = generator.random_generate(&backend, &mut rng, 6).unwrap();
        assert_eq!(images.dim(), (6, 1, 16, 16));
    }

    #[test]
    fn test_composite_generation_unsupported_without_side_effects() {
        let generator = Generator::with_info(small_config(), 8, info_dist()).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let codes = generator.sample(&mut rng, 4);

        // Every invocation fails identically and the backend is never hit.
        for _ in 0..2 {
            assert_eq!(
                generator.generate(&UnreachableBackend, &codes).unwrap_err(),
                GeneratorError::Unsupported("image generation from a composite latent code")
            );
            assert_eq!(
                generator
                    .random_generate(&UnreachableBackend, &mut rng, 4)
                    .unwrap_err(),
                GeneratorError::Unsupported(
                    "unconditioned generation from a composite latent code"
                )
            );
        }
    }

    #[test]
    fn test_generate_intermediate_unsupported_in_every_mode() {
        let mut rng = StdRng::seed_from_u64(42);

        let plain = Generator::new(small_config()).unwrap();
        let codes = plain.sample(&mut rng, 2);
        assert_eq!(
            plain.generate_intermediate(&codes).unwrap_err(),
            GeneratorError::Unsupported("intermediate activation capture")
        );

        let composite = Generator::with_info(small_config(), 8, info_dist()).unwrap();
        let codes = composite.sample(&mut rng, 2);
        assert_eq!(
            composite.generate_intermediate(&codes).unwrap_err(),
            GeneratorError::Unsupported("intermediate activation capture")
        );
    }
}
