//! Shades a quad through the color shader pair and logs what comes out.
//!
//! Usage: `shade_demo [config.json]`

use anyhow::Context;
use log::info;

use pixelflow_shade::shaders::{ColorPixelShader, ColorVertexShader};
use pixelflow_shade::{
    pixel_params, Batch, LaneMask, ShadingConfig, ShadingStages, TextureBindings, LANES,
};

// x, y, z, r, g, b, a
const QUAD: [[f32; 7]; 4] = [
    [-1.0, -1.0, 0.0, 1.0, 0.0, 0.0, 1.0],
    [1.0, -1.0, 0.0, 0.0, 1.0, 0.0, 0.5],
    [1.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.25],
    [-1.0, 1.0, 0.0, 1.0, 1.0, 1.0, 0.0],
];

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => ShadingConfig::load(&path)
            .with_context(|| format!("Failed to load shading config from {path}"))?,
        None => ShadingConfig::default(),
    };
    info!("Shading config: {:?}", config);

    let stages = ShadingStages::new(ColorVertexShader::new(), ColorPixelShader, config)
        .context("Failed to bind color shaders")?;
    let layout = stages.vertex_layout();

    let vertices: Vec<f32> = QUAD.iter().flatten().copied().collect();
    let shaded = stages.shade_vertices(&vertices, &())?;
    for (i, record) in shaded.chunks_exact(layout.params).enumerate() {
        info!("vertex {i}: {:?}", record);
    }

    // Evaluate the pixel stage at the vertices themselves, one vertex per lane.
    let mut params = vec![Batch::ZERO; layout.params];
    for (slot, batch) in params.iter_mut().enumerate() {
        *batch = Batch::from_fn(|lane| {
            shaded
                .get(lane * layout.params + slot)
                .copied()
                .unwrap_or_default()
        });
    }
    let colors = pixel_params(&params);
    let mask = LaneMask::first(QUAD.len().min(LANES));
    let out = stages.shade_pixels(&colors, &(), &TextureBindings::empty(), mask);

    for lane in mask.iter() {
        info!(
            "pixel {lane}: premultiplied rgba = ({:.3}, {:.3}, {:.3}, {:.3})",
            out[0].lane(lane),
            out[1].lane(lane),
            out[2].lane(lane),
            out[3].lane(lane)
        );
    }

    Ok(())
}
