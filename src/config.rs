//! Configuration types for generator networks.

use serde::{Deserialize, Serialize};

use crate::error::{GeneratorError, Result};

/// Maximum supported scale count. Each scale halves the spatial resolution,
/// so 16 scales already divide a dimension by 65536.
pub const MAX_SCALES: usize = 16;

/// Target image geometry in channels-first order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSpec {
    /// Output channels (e.g. 3 for RGB)
    pub channels: usize,
    /// Output height in pixels
    pub height: usize,
    /// Output width in pixels
    pub width: usize,
}

impl Default for ImageSpec {
    fn default() -> Self {
        Self {
            channels: 3,
            height: 128,
            width: 64,
        }
    }
}

/// Normal weight-initialization scheme applied to every learnable stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalInit {
    pub mean: f32,
    pub std_dev: f32,
}

impl Default for NormalInit {
    fn default() -> Self {
        Self {
            mean: 0.0,
            std_dev: 0.02,
        }
    }
}

/// Configuration for a generator network.
///
/// The generator projects a latent code through an optional fully-connected
/// chain onto a coarse feature map, then upsamples it through `scales`
/// transposed-convolution stages to the target image size. Height and width
/// must be divisible by `2^scales`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Target image shape
    pub image: ImageSpec,
    /// Filter count of the finest upsampling stage; stage `s` uses
    /// `base_filters * 2^s` filters
    pub base_filters: usize,
    /// Width of the latent code
    pub latent_dim: usize,
    /// Number of upsampling stages
    pub scales: usize,
    /// Widths of fully-connected layers interposed between the latent code
    /// and the projection; empty for a single dense projection
    pub fc_widths: Vec<usize>,
    /// Weight initialization for every learnable layer
    pub init: NormalInit,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            image: ImageSpec::default(),
            base_filters: 128,
            latent_dim: 200,
            scales: 4,
            fc_widths: Vec::new(),
            init: NormalInit::default(),
        }
    }
}

impl GeneratorConfig {
    /// Check every construction-time constraint.
    ///
    /// Fails before any plan is derived, so a misconfigured generator can
    /// never propagate fractional feature-map sizes downstream.
    pub fn validate(&self) -> Result<()> {
        if self.image.channels == 0 {
            return Err(GeneratorError::InvalidChannels(self.image.channels));
        }
        if self.image.height == 0 {
            return Err(GeneratorError::InvalidHeight(self.image.height));
        }
        if self.image.width == 0 {
            return Err(GeneratorError::InvalidWidth(self.image.width));
        }
        if self.base_filters == 0 {
            return Err(GeneratorError::InvalidFilters(self.base_filters));
        }
        if self.latent_dim == 0 {
            return Err(GeneratorError::InvalidLatentDim(self.latent_dim));
        }
        if self.scales == 0 || self.scales > MAX_SCALES {
            return Err(GeneratorError::InvalidScales(self.scales));
        }
        if let Some(&width) = self.fc_widths.iter().find(|&&w| w == 0) {
            return Err(GeneratorError::InvalidFcWidth(width));
        }

        let divisor = 1usize << self.scales;
        if self.image.height % divisor != 0 {
            return Err(GeneratorError::IndivisibleHeight {
                height: self.image.height,
                scales: self.scales,
            });
        }
        if self.image.width % divisor != 0 {
            return Err(GeneratorError::IndivisibleWidth {
                width: self.image.width,
                scales: self.scales,
            });
        }

        Ok(())
    }
}
