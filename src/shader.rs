//! The shading-stage contract.
//!
//! A rasterizer drives two pluggable stages:
//!
//! - [`VertexShader`] turns per-vertex attribute batches into the output
//!   parameters the rasterizer interpolates. Slots [`PARAM_X`]..=[`PARAM_W`]
//!   hold the clip-space position.
//! - [`PixelShader`] turns interpolated parameter batches into a
//!   four-channel color.
//!
//! Both are pure: no state survives a call, and a single shader value can be
//! invoked from any number of threads at once. Uniform data is an associated
//! type owned by the shader; the pipeline passes it through untouched.
//!
//! ## Tail lanes
//!
//! The last batch of a draw is usually only partly filled. Lanes at or
//! beyond `lane_count` hold whatever the caller's tail policy put there
//! (see [`TailLanes`](crate::config::TailLanes)). Shaders must compute them
//! without faulting; callers never read their results.

use crate::batch::Batch;
use crate::mask::LaneMask;
use crate::texture::TextureBindings;

/// Clip-space X output slot.
pub const PARAM_X: usize = 0;
/// Clip-space Y output slot.
pub const PARAM_Y: usize = 1;
/// Clip-space Z output slot.
pub const PARAM_Z: usize = 2;
/// Clip-space W output slot.
pub const PARAM_W: usize = 3;

/// Number of parameter slots handed to the pixel stage.
pub const MAX_PARAMS: usize = 16;

/// Interpolated parameters handed to the pixel stage.
pub type PixelParams = [Batch; MAX_PARAMS];

/// R, G, B, A output of the pixel stage.
pub type PixelColor = [Batch; 4];

/// Vertex output slots consumed by the rasterizer as clip-space position.
pub const POSITION_PARAMS: usize = 4;

/// Builds the pixel parameters seen exactly at a vertex.
///
/// The rasterizer consumes the position slots; pixel slot `i` carries
/// vertex slot `POSITION_PARAMS + i`. Unused pixel slots are zero.
pub fn pixel_params(vertex_params: &[Batch]) -> PixelParams {
    let mut out = [Batch::ZERO; MAX_PARAMS];
    let varyings = vertex_params.get(POSITION_PARAMS..).unwrap_or(&[]);
    let n = varyings.len().min(MAX_PARAMS);
    out[..n].copy_from_slice(&varyings[..n]);
    out
}

/// Attribute and parameter counts a vertex shader commits to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct VertexLayout {
    /// Input attributes per vertex.
    pub attributes: usize,
    /// Output parameters per vertex, including the four position slots.
    pub params: usize,
}

impl VertexLayout {
    /// Creates a layout of `attributes` inputs and `params` outputs per vertex.
    pub const fn new(attributes: usize, params: usize) -> Self {
        Self { attributes, params }
    }
}

/// Per-vertex shading.
pub trait VertexShader: Send + Sync {
    /// Per-draw constant data.
    type Uniforms: ?Sized + Sync;

    /// Buffer sizes this shader reads and writes. Fixed for the shader's lifetime.
    fn layout(&self) -> VertexLayout;

    /// Shades one batch of vertices.
    ///
    /// `in_attribs` holds `layout().attributes` batches and `out_params`
    /// holds `layout().params`; every output slot must be written.
    /// `lane_count` is the number of valid lanes, in `1..=LANES`.
    fn shade_vertices(
        &self,
        out_params: &mut [Batch],
        in_attribs: &[Batch],
        uniforms: &Self::Uniforms,
        lane_count: usize,
    );
}

/// Per-pixel shading.
pub trait PixelShader: Send + Sync {
    /// Per-draw constant data.
    type Uniforms: ?Sized + Sync;

    /// Shades one batch of pixels, writing all four channels of `out_color`.
    ///
    /// Slot meaning in `in_params` is agreed between the vertex and pixel
    /// shader of a pair. Lanes outside `mask` are discarded by the caller.
    fn shade_pixels(
        &self,
        in_params: &PixelParams,
        out_color: &mut PixelColor,
        uniforms: &Self::Uniforms,
        textures: &TextureBindings<'_>,
        mask: LaneMask,
    );
}

impl<S: VertexShader + ?Sized> VertexShader for &S {
    type Uniforms = S::Uniforms;

    #[inline(always)]
    fn layout(&self) -> VertexLayout {
        (**self).layout()
    }

    #[inline(always)]
    fn shade_vertices(
        &self,
        out_params: &mut [Batch],
        in_attribs: &[Batch],
        uniforms: &Self::Uniforms,
        lane_count: usize,
    ) {
        (**self).shade_vertices(out_params, in_attribs, uniforms, lane_count)
    }
}

impl<S: VertexShader + ?Sized> VertexShader for Box<S> {
    type Uniforms = S::Uniforms;

    #[inline(always)]
    fn layout(&self) -> VertexLayout {
        (**self).layout()
    }

    #[inline(always)]
    fn shade_vertices(
        &self,
        out_params: &mut [Batch],
        in_attribs: &[Batch],
        uniforms: &Self::Uniforms,
        lane_count: usize,
    ) {
        (**self).shade_vertices(out_params, in_attribs, uniforms, lane_count)
    }
}

impl<S: PixelShader + ?Sized> PixelShader for &S {
    type Uniforms = S::Uniforms;

    #[inline(always)]
    fn shade_pixels(
        &self,
        in_params: &PixelParams,
        out_color: &mut PixelColor,
        uniforms: &Self::Uniforms,
        textures: &TextureBindings<'_>,
        mask: LaneMask,
    ) {
        (**self).shade_pixels(in_params, out_color, uniforms, textures, mask)
    }
}

impl<S: PixelShader + ?Sized> PixelShader for Box<S> {
    type Uniforms = S::Uniforms;

    #[inline(always)]
    fn shade_pixels(
        &self,
        in_params: &PixelParams,
        out_color: &mut PixelColor,
        uniforms: &Self::Uniforms,
        textures: &TextureBindings<'_>,
        mask: LaneMask,
    ) {
        (**self).shade_pixels(in_params, out_color, uniforms, textures, mask)
    }
}
