//! The rasterizer-facing side of a bound shader pair.
//!
//! [`ShadingStages`] validates a vertex/pixel shader pair once, at bind
//! time, and then drives them: vertex data arrives interleaved (one record
//! of `attributes` floats per vertex), is transposed into lane batches
//! [`LANES`] vertices at a time, shaded, and transposed back.

use log::{debug, trace};

use crate::batch::{Batch, LANES};
use crate::config::{ShadingConfig, TailLanes};
use crate::error::{Result, ShadeError};
use crate::mask::LaneMask;
use crate::shader::{
    PixelColor, PixelParams, PixelShader, VertexLayout, VertexShader, MAX_PARAMS, POSITION_PARAMS,
};
use crate::texture::TextureBindings;

/// A validated vertex and pixel shader pair sharing one uniform type.
#[derive(Debug)]
pub struct ShadingStages<V, P> {
    vertex: V,
    pixel: P,
    layout: VertexLayout,
    config: ShadingConfig,
}

impl<V, P> ShadingStages<V, P>
where
    V: VertexShader,
    P: PixelShader<Uniforms = V::Uniforms>,
{
    /// Binds a shader pair, checking the vertex layout against what the
    /// rasterizer can interpolate.
    pub fn new(vertex: V, pixel: P, config: ShadingConfig) -> Result<Self> {
        let layout = vertex.layout();
        if layout.attributes == 0 {
            return Err(ShadeError::NoAttributes);
        }
        if layout.params < POSITION_PARAMS {
            return Err(ShadeError::MissingClipPosition {
                params: layout.params,
            });
        }
        if layout.params > POSITION_PARAMS + MAX_PARAMS {
            return Err(ShadeError::TooManyParams {
                params: layout.params,
                max: POSITION_PARAMS + MAX_PARAMS,
            });
        }

        debug!(
            "Bound shading stages: {} attributes -> {} params, tail lanes {:?}",
            layout.attributes, layout.params, config.tail_lanes
        );

        Ok(Self {
            vertex,
            pixel,
            layout,
            config,
        })
    }

    /// The layout validated at bind time.
    pub fn vertex_layout(&self) -> VertexLayout {
        self.layout
    }

    /// The configuration the stages were bound with.
    pub fn config(&self) -> &ShadingConfig {
        &self.config
    }

    /// The bound vertex shader.
    pub fn vertex_shader(&self) -> &V {
        &self.vertex
    }

    /// The bound pixel shader.
    pub fn pixel_shader(&self) -> &P {
        &self.pixel
    }

    /// Shades one batch of vertices, checking buffer shapes first.
    pub fn shade_vertex_batch(
        &self,
        out_params: &mut [Batch],
        in_attribs: &[Batch],
        uniforms: &V::Uniforms,
        lane_count: usize,
    ) -> Result<()> {
        if in_attribs.len() != self.layout.attributes {
            return Err(ShadeError::BatchShape {
                expected: self.layout.attributes,
                actual: in_attribs.len(),
            });
        }
        if out_params.len() != self.layout.params {
            return Err(ShadeError::BatchShape {
                expected: self.layout.params,
                actual: out_params.len(),
            });
        }
        if lane_count == 0 || lane_count > LANES {
            return Err(ShadeError::LaneCount { lane_count });
        }

        self.vertex
            .shade_vertices(out_params, in_attribs, uniforms, lane_count);
        Ok(())
    }

    /// Shades interleaved vertex records.
    ///
    /// # Returns
    /// * Interleaved output records, `params` floats per input vertex.
    pub fn shade_vertices(&self, vertices: &[f32], uniforms: &V::Uniforms) -> Result<Vec<f32>> {
        let VertexLayout { attributes, params } = self.layout;
        if vertices.len() % attributes != 0 {
            return Err(ShadeError::VertexDataLength {
                len: vertices.len(),
                stride: attributes,
            });
        }

        let vertex_count = vertices.len() / attributes;
        let mut output = vec![0.0f32; vertex_count * params];
        let mut in_attribs = vec![Batch::ZERO; attributes];
        let mut out_params = vec![Batch::ZERO; params];
        let mut column = [0.0f32; LANES];

        let in_chunks = vertices.chunks(attributes * LANES);
        let out_chunks = output.chunks_mut(params * LANES);
        for (chunk, dest) in in_chunks.zip(out_chunks) {
            let lane_count = chunk.len() / attributes;
            self.gather(chunk, lane_count, &mut in_attribs);

            trace!("Shading vertex batch: {lane_count} lanes");
            self.vertex
                .shade_vertices(&mut out_params, &in_attribs, uniforms, lane_count);

            for (slot, batch) in out_params.iter().enumerate() {
                batch.store_into_slice(&mut column[..lane_count]);
                for (record, &value) in dest.chunks_exact_mut(params).zip(&column) {
                    record[slot] = value;
                }
            }
        }

        Ok(output)
    }

    /// Shades one batch of pixels.
    ///
    /// An empty `mask` skips the shader and yields transparent black. With
    /// `clear_inactive_pixels` set, lanes outside `mask` are zeroed.
    pub fn shade_pixels(
        &self,
        in_params: &PixelParams,
        uniforms: &P::Uniforms,
        textures: &TextureBindings<'_>,
        mask: LaneMask,
    ) -> PixelColor {
        let mut color = [Batch::ZERO; 4];
        if mask.is_empty() {
            return color;
        }

        self.pixel
            .shade_pixels(in_params, &mut color, uniforms, textures, mask);

        if self.config.clear_inactive_pixels && !mask.is_full() {
            for channel in &mut color {
                *channel = Batch::select(mask, *channel, Batch::ZERO);
            }
        }
        color
    }

    /// Transposes `lane_count` interleaved records into attribute batches,
    /// filling the spare lanes per the tail policy.
    fn gather(&self, chunk: &[f32], lane_count: usize, in_attribs: &mut [Batch]) {
        let stride = in_attribs.len();
        let mut column = [0.0f32; LANES];
        for (attr, batch) in in_attribs.iter_mut().enumerate() {
            for (value, record) in column.iter_mut().zip(chunk.chunks_exact(stride)) {
                *value = record[attr];
            }
            let filled = match self.config.tail_lanes {
                TailLanes::Zeroed => lane_count,
                TailLanes::ReplicateLast => {
                    let last = column[lane_count - 1];
                    column[lane_count..].fill(last);
                    LANES
                }
            };
            *batch = Batch::load_from_slice(&column[..filled]);
        }
    }
}
