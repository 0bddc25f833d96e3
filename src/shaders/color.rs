//! Flat vertex colors with premultiplied-alpha output.
//!
//! Vertex attributes: position `x, y, z`, then straight-alpha color
//! `r, g, b, a`. The vertex stage forwards both, color landing in vertex
//! slots 4..=7 and therefore pixel slots 0..=3. The pixel stage
//! premultiplies, since the blend stage expects premultiplied input.

use crate::batch::Batch;
use crate::mask::LaneMask;
use crate::shader::{
    PixelColor, PixelParams, PixelShader, VertexLayout, VertexShader, PARAM_W, PARAM_X, PARAM_Y,
    PARAM_Z,
};
use crate::texture::TextureBindings;

/// Passes position through as a homogeneous point and forwards the color.
#[derive(Copy, Clone, Debug)]
pub struct ColorVertexShader {
    layout: VertexLayout,
}

impl ColorVertexShader {
    /// Creates the shader with its 7-in, 8-out layout.
    pub const fn new() -> Self {
        Self {
            layout: VertexLayout::new(7, 8),
        }
    }
}

impl Default for ColorVertexShader {
    fn default() -> Self {
        Self::new()
    }
}

impl VertexShader for ColorVertexShader {
    type Uniforms = ();

    fn layout(&self) -> VertexLayout {
        self.layout
    }

    fn shade_vertices(
        &self,
        out_params: &mut [Batch],
        in_attribs: &[Batch],
        _uniforms: &(),
        _lane_count: usize,
    ) {
        debug_assert_eq!(in_attribs.len(), self.layout.attributes);
        debug_assert_eq!(out_params.len(), self.layout.params);

        // Position
        out_params[PARAM_X] = in_attribs[0];
        out_params[PARAM_Y] = in_attribs[1];
        out_params[PARAM_Z] = in_attribs[2];
        out_params[PARAM_W] = Batch::ONE;

        // Color
        out_params[4..8].copy_from_slice(&in_attribs[3..7]);
    }
}

/// Converts interpolated straight-alpha color in slots 0..=3 to premultiplied alpha.
#[derive(Copy, Clone, Debug, Default)]
pub struct ColorPixelShader;

impl PixelShader for ColorPixelShader {
    type Uniforms = ();

    fn shade_pixels(
        &self,
        in_params: &PixelParams,
        out_color: &mut PixelColor,
        _uniforms: &(),
        _textures: &TextureBindings<'_>,
        _mask: LaneMask,
    ) {
        let alpha = in_params[3];
        out_color[0] = in_params[0] * alpha;
        out_color[1] = in_params[1] * alpha;
        out_color[2] = in_params[2] * alpha;
        out_color[3] = alpha;
    }
}
