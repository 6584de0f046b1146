//! Latent-code sampling and decomposition.
//!
//! Latent batches are `(batch_size, dim)` arrays. A composite code places
//! uniform noise in the low-index columns and a structured information code
//! in the suffix; [`split_info`] recovers the suffix.

use ndarray::{concatenate, s, Array2, ArrayView2, Axis};
use rand::Rng;

use crate::dist::InformationDistribution;

/// Draw a `(batch_size, dim)` batch of i.i.d. Uniform(-1, 1) values.
pub fn sample_uniform<R: Rng>(rng: &mut R, batch_size: usize, dim: usize) -> Array2<f32> {
    Array2::from_shape_fn((batch_size, dim), |_| rng.random_range(-1.0f32..1.0))
}

/// Draw a composite latent batch: `noise_dim` uniform columns followed by
/// `info.dim()` columns from the information distribution.
///
/// # Panics
///
/// Panics if `info` returns a batch whose shape does not match
/// `(batch_size, info.dim())`. A mismatch is a bug in the distribution
/// implementation and is never truncated or padded over.
pub fn sample_composite<R: Rng>(
    rng: &mut R,
    batch_size: usize,
    noise_dim: usize,
    info: &dyn InformationDistribution,
) -> Array2<f32> {
    let noise = sample_uniform(rng, batch_size, noise_dim);
    let coding = info.sample(rng, batch_size);
    assert_eq!(
        coding.nrows(),
        batch_size,
        "info distribution returned {} rows, expected {}",
        coding.nrows(),
        batch_size
    );
    assert_eq!(
        coding.ncols(),
        info.dim(),
        "info distribution returned {} columns, expected {}",
        coding.ncols(),
        info.dim()
    );
    concatenate(Axis(1), &[noise.view(), coding.view()]).expect("row counts already checked")
}

/// View of the information columns of a latent batch: everything from
/// `noise_dim` onward.
///
/// # Panics
///
/// Panics if `noise_dim` exceeds the batch width.
#[must_use]
pub fn split_info(batch: &Array2<f32>, noise_dim: usize) -> ArrayView2<'_, f32> {
    batch.slice(s![.., noise_dim..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dist::Categorical;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    #[test]
    fn test_sample_uniform_shape_and_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let batch = sample_uniform(&mut rng, 128, 200);

        assert_eq!(batch.dim(), (128, 200));
        assert!(batch.iter().all(|&v| (-1.0..=1.0).contains(&v)));
    }

    #[test]
    fn test_sample_uniform_deterministic_under_seed() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        assert_eq!(sample_uniform(&mut a, 16, 32), sample_uniform(&mut b, 16, 32));
    }

    #[test]
    fn test_sample_composite_layout() {
        let mut rng = StdRng::seed_from_u64(42);
        let info = Categorical { num_classes: 10 };
        let batch = sample_composite(&mut rng, 64, 200, &info);

        assert_eq!(batch.dim(), (64, 210));
        assert!(batch
            .slice(s![.., 0..200])
            .iter()
            .all(|&v| (-1.0..=1.0).contains(&v)));
        // Suffix keeps the information distribution's own contract.
        for row in batch.slice(s![.., 200..]).rows() {
            assert_eq!(row.iter().filter(|&&v| v == 1.0).count(), 1);
            assert_eq!(row.iter().filter(|&&v| v == 0.0).count(), 9);
        }
    }

    #[test]
    fn test_split_info_returns_trailing_columns() {
        let mut rng = StdRng::seed_from_u64(42);
        let info = Categorical { num_classes: 10 };
        let batch = sample_composite(&mut rng, 64, 200, &info);

        let coding = split_info(&batch, 200);
        assert_eq!(coding.dim(), (64, 10));
        assert_eq!(coding, batch.slice(s![.., 200..]));
    }

    #[test]
    fn test_split_info_empty_suffix() {
        let batch = Array2::<f32>::zeros((8, 16));
        assert_eq!(split_info(&batch, 16).dim(), (8, 0));
    }

    struct LyingDist;

    impl crate::dist::InformationDistribution for LyingDist {
        fn dim(&self) -> usize {
            10
        }

        fn sample(&self, _rng: &mut dyn RngCore, batch_size: usize) -> Array2<f32> {
            Array2::zeros((batch_size, 7))
        }
    }

    #[test]
    #[should_panic(expected = "info distribution returned 7 columns, expected 10")]
    fn test_sample_composite_rejects_width_mismatch() {
        let mut rng = StdRng::seed_from_u64(42);
        sample_composite(&mut rng, 8, 4, &LyingDist);
    }
}
