//! # PixelFlow Shade
//!
//! The shading-stage contract between the pixelflow software rasterizer and
//! pluggable vertex/pixel shaders, plus the reference shaders that satisfy it.
//!
//! ## Design Philosophy
//!
//! **Shaders are pure functions over lane batches.**
//!
//! - [`Batch`]: one quantity across [`LANES`] vertices or pixels
//! - [`VertexShader`]: attribute batches in, interpolable parameters out
//! - [`PixelShader`]: interpolated parameters in, premultiplied RGBA out
//!
//! Nothing is retained between calls, so a bound [`ShadingStages`] can be
//! shared freely across worker threads.

#![warn(missing_docs)]

pub mod batch;
pub mod config;
pub mod error;
pub mod mask;
pub mod math;
pub mod shader;
pub mod shaders;
pub mod stage;
pub mod texture;

pub use batch::{Batch, LANES};
pub use config::{ShadingConfig, TailLanes};
pub use error::{Result, ShadeError};
pub use mask::LaneMask;
pub use shader::{
    pixel_params, PixelColor, PixelParams, PixelShader, VertexLayout, VertexShader, MAX_PARAMS,
    PARAM_W, PARAM_X, PARAM_Y, PARAM_Z, POSITION_PARAMS,
};
pub use stage::ShadingStages;
pub use texture::{Texture, TextureBindings, MAX_TEXTURES};
