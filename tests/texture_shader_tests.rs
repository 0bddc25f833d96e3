use pixelflow_shade::math::{Mat3, Mat4, Vec3};
use pixelflow_shade::shaders::{TexturePixelShader, TextureUniforms, TextureVertexShader};
use pixelflow_shade::{
    pixel_params, Batch, LaneMask, ShadingConfig, ShadingStages, Texture, TextureBindings,
    VertexShader, LANES, MAX_PARAMS,
};
use test_log::test;

/// Returns `u` in red, `v` in green, fixed blue and alpha.
struct Gradient;

impl Texture for Gradient {
    fn sample(&self, u: Batch, v: Batch) -> [Batch; 4] {
        [u, v, Batch::splat(0.5), Batch::splat(0.5)]
    }
}

fn stages() -> ShadingStages<TextureVertexShader, TexturePixelShader> {
    ShadingStages::new(
        TextureVertexShader::new(),
        TexturePixelShader,
        ShadingConfig::default(),
    )
    .unwrap()
}

// x, y, z, nx, ny, nz, u, v
fn vertex(normal: Vec3, u: f32, v: f32) -> [f32; 8] {
    [1.0, 2.0, 3.0, normal.x, normal.y, normal.z, u, v]
}

fn shade_at_vertex(
    uniforms: &TextureUniforms,
    textures: &TextureBindings<'_>,
    record: [f32; 8],
) -> [f32; 4] {
    let stages = stages();
    let params = stages.shade_vertices(&record, uniforms).unwrap();
    let batches: Vec<Batch> = params.iter().map(|&p| Batch::splat(p)).collect();
    let color = stages.shade_pixels(&pixel_params(&batches), uniforms, textures, LaneMask::ALL);
    color.map(|c| c.lane(0))
}

fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-5,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn layout_is_eight_in_nine_out() {
    let layout = TextureVertexShader::new().layout();
    assert_eq!((layout.attributes, layout.params), (8, 9));
}

#[test]
fn identity_transform_passes_position_through() {
    let uniforms = TextureUniforms::default();
    let out = stages()
        .shade_vertices(&vertex(Vec3::new(0.0, 1.0, 0.0), 0.25, 0.75), &uniforms)
        .unwrap();
    assert_eq!(out, vec![1.0, 2.0, 3.0, 1.0, 0.25, 0.75, 0.0, 1.0, 0.0]);
}

#[test]
fn mvp_and_normal_matrix_are_applied() {
    let model = Mat4::translation(10.0, 0.0, 0.0) * Mat4::scale(2.0, 2.0, 2.0);
    let uniforms = TextureUniforms {
        mvp: model,
        normal_matrix: Mat3 {
            m: [[0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]],
        },
        ..TextureUniforms::default()
    };
    let out = stages()
        .shade_vertices(&vertex(Vec3::new(1.0, 0.0, 0.0), 0.0, 0.0), &uniforms)
        .unwrap();

    assert_eq!(&out[..4], &[12.0, 4.0, 6.0, 1.0]);
    // (1, 0, 0) rotated a quarter turn about z.
    assert_eq!(&out[6..], &[0.0, 1.0, 0.0]);
}

#[test]
fn lighting_facing_the_light_adds_directional() {
    let uniforms = TextureUniforms {
        light_direction: Vec3::new(0.0, 0.0, -1.0),
        directional: 0.3,
        ambient: 0.7,
        ..TextureUniforms::default()
    };
    // Normal points back at the light: full directional contribution.
    let rgba = shade_at_vertex(
        &uniforms,
        &TextureBindings::empty(),
        vertex(Vec3::new(0.0, 0.0, 1.0), 0.0, 0.0),
    );
    for c in &rgba[..3] {
        assert_close(*c, 1.0);
    }
    assert_close(rgba[3], 1.0);
}

#[test]
fn lighting_facing_away_is_ambient_only() {
    let uniforms = TextureUniforms {
        light_direction: Vec3::new(0.0, 0.0, -1.0),
        directional: 0.3,
        ambient: 0.7,
        ..TextureUniforms::default()
    };
    let rgba = shade_at_vertex(
        &uniforms,
        &TextureBindings::empty(),
        vertex(Vec3::new(0.0, 0.0, -1.0), 0.0, 0.0),
    );
    assert_close(rgba[0], 0.7);
}

#[test]
fn unnormalized_normals_are_renormalized() {
    let uniforms = TextureUniforms {
        light_direction: Vec3::new(0.0, -1.0, 0.0),
        directional: 0.5,
        ambient: 0.0,
        ..TextureUniforms::default()
    };
    let rgba = shade_at_vertex(
        &uniforms,
        &TextureBindings::empty(),
        vertex(Vec3::new(0.0, 4.0, 0.0), 0.0, 0.0),
    );
    assert_close(rgba[0], 0.5);
}

#[test]
fn bound_texture_is_sampled_and_premultiplied() {
    let uniforms = TextureUniforms {
        light_direction: Vec3::new(0.0, 0.0, -1.0),
        directional: 0.0,
        ambient: 1.0,
        has_texture: true,
        ..TextureUniforms::default()
    };
    let gradient = Gradient;
    let textures = TextureBindings::empty().with(0, &gradient);

    let rgba = shade_at_vertex(
        &uniforms,
        &textures,
        vertex(Vec3::new(0.0, 0.0, 1.0), 0.8, 0.4),
    );
    assert_close(rgba[0], 0.4);
    assert_close(rgba[1], 0.2);
    assert_close(rgba[2], 0.25);
    assert_close(rgba[3], 0.5);
}

#[test]
fn texture_ignored_when_flag_clear() {
    let uniforms = TextureUniforms {
        directional: 0.0,
        ambient: 1.0,
        has_texture: false,
        ..TextureUniforms::default()
    };
    let gradient = Gradient;
    let textures = TextureBindings::empty().with(0, &gradient);

    let rgba = shade_at_vertex(
        &uniforms,
        &textures,
        vertex(Vec3::new(0.0, 0.0, 1.0), 0.8, 0.4),
    );
    assert_eq!(rgba, [1.0; 4]);
}

#[test]
fn missing_texture_falls_back_to_white() {
    let uniforms = TextureUniforms {
        directional: 0.0,
        ambient: 1.0,
        has_texture: true,
        ..TextureUniforms::default()
    };
    let rgba = shade_at_vertex(
        &uniforms,
        &TextureBindings::empty(),
        vertex(Vec3::new(0.0, 0.0, 1.0), 0.8, 0.4),
    );
    assert_eq!(rgba, [1.0; 4]);
}

#[test]
fn many_vertices_shade_consistently() {
    let uniforms = TextureUniforms::default();
    let records: Vec<f32> = (0..LANES + 5)
        .flat_map(|i| vertex(Vec3::new(0.0, 0.0, 1.0), i as f32, 0.0))
        .collect();
    let out = stages().shade_vertices(&records, &uniforms).unwrap();
    for (i, record) in out.chunks_exact(9).enumerate() {
        assert_eq!(record[4], i as f32);
    }
}

#[test]
fn concurrent_pixel_shading_shares_bound_texture() {
    let stages = stages();
    let uniforms = TextureUniforms {
        light_direction: Vec3::new(0.0, -0.6, -0.8),
        has_texture: true,
        ..TextureUniforms::default()
    };
    let gradient = Gradient;
    let textures = TextureBindings::empty().with(0, &gradient);

    // Per-lane u, v and a normal that swings from facing the light to away.
    let mut params = [Batch::ZERO; MAX_PARAMS];
    params[0] = Batch::sequential(0.0) / LANES as f32;
    params[1] = Batch::splat(1.0) - params[0];
    params[3] = Batch::sequential(-8.0) / 8.0;
    params[4] = Batch::splat(1.0);
    let mask = LaneMask::first(11);

    let expected = stages.shade_pixels(&params, &uniforms, &textures, mask);
    let n = Vec3::new(0.0, -0.5, 1.0).normalized();
    let intensity = n.dot(-uniforms.light_direction).max(0.0) * 0.3 + 0.7;
    assert_close(expected[0].lane(4), 0.25 * intensity * 0.5);
    assert_close(expected[3].lane(4), 0.5);
    assert_eq!(expected[3].lane(12), 0.0);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| stages.shade_pixels(&params, &uniforms, &textures, mask)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
