//! Shape planning for the upsampling pyramid.
//!
//! Translates generator hyperparameters into the concrete per-stage geometry
//! an executing backend needs: the dense projection chain from latent code to
//! the first 3-D feature map, and one transposed-convolution stage per scale,
//! coarsest to finest. No tensor computation happens here.

use serde::{Deserialize, Serialize};

use crate::config::{GeneratorConfig, NormalInit};
use crate::error::Result;

/// Kernel size of every upsampling stage
pub const KERNEL_SIZE: usize = 5;
/// Spatial stride of every upsampling stage
pub const STRIDE: usize = 2;
/// Padding of every upsampling stage
pub const PADDING: usize = 2;

/// Shape of a 3-D feature map in channels-first order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureShape {
    pub channels: usize,
    pub height: usize,
    pub width: usize,
}

impl FeatureShape {
    /// Flattened element count.
    #[must_use]
    pub fn units(&self) -> usize {
        self.channels * self.height * self.width
    }
}

/// Activation applied at the end of a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activation {
    /// Rectifier, used by every intermediate stage
    Relu,
    /// Bounded output in (-1, 1), used by the final stage
    Tanh,
}

/// Dense chain from the latent code to the first feature map.
///
/// `widths` lists every dense layer in order and always ends in
/// `shape.units()`. The consuming builder follows each width with batch
/// normalization and a ReLU before reshaping to `shape`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPlan {
    /// Dense layer widths, ending in the flattened feature-map size
    pub widths: Vec<usize>,
    /// Reshape target after the last dense layer
    pub shape: FeatureShape,
    /// Weight initialization for each dense layer
    pub init: NormalInit,
}

impl ProjectionPlan {
    /// Flattened size of the projection target.
    #[must_use]
    pub fn units(&self) -> usize {
        self.shape.units()
    }
}

/// One stride-2 transposed-convolution stage of the pyramid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpsampleStage {
    /// Output feature-map shape of this stage
    pub out: FeatureShape,
    pub kernel: usize,
    pub stride: usize,
    pub padding: usize,
    /// Whether batch normalization follows the convolution
    pub batch_norm: bool,
    pub activation: Activation,
    /// Weight initialization for the convolution
    pub init: NormalInit,
}

/// Complete stage geometry of a generator network.
///
/// Stage `s` (counting down from `scales - 2` to 0) doubles the spatial size
/// and outputs `base_filters * 2^s` channels; the final stage doubles once
/// more, maps down to the image channel count, and ends in a tanh instead of
/// a ReLU.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PyramidPlan {
    /// Latent-to-feature-map projection
    pub projection: ProjectionPlan,
    /// Upsampling stages, coarsest to finest; length equals the scale count
    pub stages: Vec<UpsampleStage>,
}

impl PyramidPlan {
    /// Derive the stage geometry for a validated configuration.
    ///
    /// Pure function of the configuration. Fails with the matching
    /// configuration error before producing any geometry if a parameter is
    /// out of range or the image is not divisible by `2^scales`.
    pub fn plan(config: &GeneratorConfig) -> Result<Self> {
        config.validate()?;

        let image = config.image;
        let scales = config.scales;

        let shape = FeatureShape {
            channels: config.base_filters << (scales - 1),
            height: image.height >> scales,
            width: image.width >> scales,
        };
        let mut widths = config.fc_widths.clone();
        widths.push(shape.units());
        let projection = ProjectionPlan {
            widths,
            shape,
            init: config.init,
        };

        let mut stages = Vec::with_capacity(scales);
        for s in (0..scales - 1).rev() {
            stages.push(UpsampleStage {
                out: FeatureShape {
                    channels: config.base_filters << s,
                    height: image.height >> (s + 1),
                    width: image.width >> (s + 1),
                },
                kernel: KERNEL_SIZE,
                stride: STRIDE,
                padding: PADDING,
                batch_norm: true,
                activation: Activation::Relu,
                init: config.init,
            });
        }
        stages.push(UpsampleStage {
            out: FeatureShape {
                channels: image.channels,
                height: image.height,
                width: image.width,
            },
            kernel: KERNEL_SIZE,
            stride: STRIDE,
            padding: PADDING,
            batch_norm: false,
            activation: Activation::Tanh,
            init: config.init,
        });

        Ok(Self { projection, stages })
    }

    /// Number of upsampling stages.
    #[must_use]
    pub fn scales(&self) -> usize {
        self.stages.len()
    }

    /// Shape of the generated image.
    #[must_use]
    pub fn output_shape(&self) -> FeatureShape {
        self.stages.last().expect("plan has at least one stage").out
    }
}
