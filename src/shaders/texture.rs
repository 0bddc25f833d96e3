//! Textured geometry with ambient plus directional lighting.
//!
//! Vertex attributes: position `x, y, z`, normal `nx, ny, nz`, texture
//! coordinate `u, v`. Vertex output parameters:
//!
//! | vertex slot | pixel slot | value |
//! |------|------|-------|
//! | 0..=3 | - | clip-space position (`mvp * (x, y, z, 1)`) |
//! | 4, 5 | 0, 1 | `u`, `v` |
//! | 6..=8 | 2..=4 | view-space normal (`normal_matrix * n`) |

use log::warn;

use crate::batch::Batch;
use crate::mask::LaneMask;
use crate::math::{Mat3, Mat4, Vec3};
use crate::shader::{
    PixelColor, PixelParams, PixelShader, VertexLayout, VertexShader, POSITION_PARAMS,
};
use crate::texture::TextureBindings;

// Pixel-side slots; the vertex stage writes them POSITION_PARAMS higher.
const PARAM_U: usize = 0;
const PARAM_V: usize = 1;
const PARAM_NORMAL: usize = 2;

/// Texture slot sampled for the base color.
pub const DIFFUSE_SLOT: usize = 0;

/// Per-draw constants shared by the textured vertex and pixel shaders.
#[derive(Copy, Clone, Debug)]
pub struct TextureUniforms {
    /// Model-view-projection matrix applied to positions.
    pub mvp: Mat4,
    /// Applied to normals.
    pub normal_matrix: Mat3,
    /// Direction the light travels, normalized.
    pub light_direction: Vec3,
    /// Directional light strength.
    pub directional: f32,
    /// Ambient light strength.
    pub ambient: f32,
    /// Sample [`DIFFUSE_SLOT`] for the base color instead of using white.
    pub has_texture: bool,
}

impl Default for TextureUniforms {
    fn default() -> Self {
        Self {
            mvp: Mat4::IDENTITY,
            normal_matrix: Mat3::IDENTITY,
            light_direction: Vec3::new(0.0, 0.0, 1.0),
            directional: 0.3,
            ambient: 0.7,
            has_texture: false,
        }
    }
}

/// Transforms position and normal, forwarding the texture coordinate.
#[derive(Copy, Clone, Debug)]
pub struct TextureVertexShader {
    layout: VertexLayout,
}

impl TextureVertexShader {
    /// Creates the shader with its 8-in, 9-out layout.
    pub const fn new() -> Self {
        Self {
            layout: VertexLayout::new(8, 9),
        }
    }
}

impl Default for TextureVertexShader {
    fn default() -> Self {
        Self::new()
    }
}

impl VertexShader for TextureVertexShader {
    type Uniforms = TextureUniforms;

    fn layout(&self) -> VertexLayout {
        self.layout
    }

    fn shade_vertices(
        &self,
        out_params: &mut [Batch],
        in_attribs: &[Batch],
        uniforms: &TextureUniforms,
        _lane_count: usize,
    ) {
        debug_assert_eq!(in_attribs.len(), self.layout.attributes);
        debug_assert_eq!(out_params.len(), self.layout.params);

        let clip = uniforms
            .mvp
            .transform(in_attribs[0], in_attribs[1], in_attribs[2], Batch::ONE);
        out_params[..4].copy_from_slice(&clip);

        out_params[POSITION_PARAMS + PARAM_U] = in_attribs[6];
        out_params[POSITION_PARAMS + PARAM_V] = in_attribs[7];

        let normal = uniforms
            .normal_matrix
            .transform(in_attribs[3], in_attribs[4], in_attribs[5]);
        let normal_slot = POSITION_PARAMS + PARAM_NORMAL;
        out_params[normal_slot..normal_slot + 3].copy_from_slice(&normal);
    }
}

/// Lights the base color and premultiplies it by alpha.
#[derive(Copy, Clone, Debug, Default)]
pub struct TexturePixelShader;

impl TexturePixelShader {
    /// `max(n . -light, 0) * directional + ambient`, with `n` renormalized
    /// after interpolation.
    fn illumination(in_params: &PixelParams, uniforms: &TextureUniforms) -> Batch {
        let nx = in_params[PARAM_NORMAL];
        let ny = in_params[PARAM_NORMAL + 1];
        let nz = in_params[PARAM_NORMAL + 2];

        let len = (nx * nx + ny * ny + nz * nz).sqrt();
        // Degenerate normals get ambient light only.
        let inv_len = len.map(|l| if l > 0.0 { 1.0 / l } else { 0.0 });

        let to_light = -uniforms.light_direction;
        let dot = (nx * to_light.x + ny * to_light.y + nz * to_light.z) * inv_len;
        dot.max(Batch::ZERO) * uniforms.directional + uniforms.ambient
    }
}

impl PixelShader for TexturePixelShader {
    type Uniforms = TextureUniforms;

    fn shade_pixels(
        &self,
        in_params: &PixelParams,
        out_color: &mut PixelColor,
        uniforms: &TextureUniforms,
        textures: &TextureBindings<'_>,
        _mask: LaneMask,
    ) {
        let base = if uniforms.has_texture {
            match textures.get(DIFFUSE_SLOT) {
                Some(texture) => texture.sample(in_params[PARAM_U], in_params[PARAM_V]),
                None => {
                    warn!("has_texture set but texture slot {DIFFUSE_SLOT} is empty, using white");
                    [Batch::ONE; 4]
                }
            }
        } else {
            [Batch::ONE; 4]
        };

        let intensity = Self::illumination(in_params, uniforms);
        let alpha = base[3];
        let scale = intensity * alpha;
        out_color[0] = base[0] * scale;
        out_color[1] = base[1] * scale;
        out_color[2] = base[2] * scale;
        out_color[3] = alpha;
    }
}
