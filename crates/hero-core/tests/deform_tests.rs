// Host-side tests for the deformation reference and the simplex noise it uses.

use glam::{Vec2, Vec3};
use hero_core::noise::{octave_sum, snoise};
use hero_core::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn uniforms(seed: u64) -> DeformUniforms {
    let config = HeroConfig::default();
    let peaks = PeakSet::generate(&mut StdRng::seed_from_u64(seed), &config.peaks);
    DeformUniforms::new(&config, &peaks)
}

#[test]
fn snoise_is_deterministic_and_bounded() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..10_000 {
        let p = Vec3::new(
            rng.gen_range(-50.0..50.0),
            rng.gen_range(-50.0..50.0),
            rng.gen_range(-50.0..50.0),
        );
        let a = snoise(p);
        assert_eq!(a, snoise(p));
        assert!(a.is_finite());
        assert!((-1.05..=1.05).contains(&a), "noise {a} at {p:?}");
    }
}

#[test]
fn snoise_varies_over_space() {
    let samples: Vec<f32> = (0..64)
        .map(|i| snoise(Vec3::new(i as f32 * 0.37, 1.3, -0.7)))
        .collect();
    let min = samples.iter().cloned().fold(f32::MAX, f32::min);
    let max = samples.iter().cloned().fold(f32::MIN, f32::max);
    assert!(max - min > 0.5, "noise too flat: {min}..{max}");
}

#[test]
fn octave_sum_is_bounded_by_weight_total() {
    for i in 0..500 {
        let p = Vec3::new(i as f32 * 0.11, (i as f32 * 0.07).sin(), 0.3);
        assert!(octave_sum(p).abs() <= 1.75 * 1.05);
    }
}

#[test]
fn radial_mask_is_one_at_center_and_zero_beyond_fade() {
    let (falloff, sharp) = (0.4, 4.0);
    assert_eq!(radial_mask(0.0, falloff, sharp), 1.0);
    assert_eq!(radial_mask(falloff + RADIAL_FADE_WIDTH, falloff, sharp), 0.0);
    assert_eq!(radial_mask(5.0, falloff, sharp), 0.0);
}

#[test]
fn radial_mask_is_monotonically_non_increasing() {
    let mut prev = radial_mask(0.0, 0.4, 4.0);
    for i in 1..=200 {
        let d = i as f32 * 0.005;
        let m = radial_mask(d, 0.4, 4.0);
        assert!(m <= prev + f32::EPSILON, "mask rose at d={d}");
        assert!((0.0..=1.0).contains(&m));
        prev = m;
    }
}

#[test]
fn peak_influence_falls_off_sharply() {
    assert_eq!(peak_influence(0.0), 1.0);
    assert!(peak_influence(0.5) < 0.05);
    assert!(peak_influence(1.0) < 1e-5);
}

#[test]
fn twist_leaves_height_and_planar_radius_in_xz() {
    let p = Vec3::new(0.3, 0.5, -0.2);
    let t = twist(p, 1.5);
    assert_eq!(t.y, p.y);
    let r0 = Vec2::new(p.x, p.z).length();
    let r1 = Vec2::new(t.x, t.z).length();
    assert!((r0 - r1).abs() < 1e-6);
    // No twist at height zero
    assert_eq!(twist(Vec3::new(0.4, 0.0, 0.1), 1.5), Vec3::new(0.4, 0.0, 0.1));
}

#[test]
fn deform_vertex_is_pure() {
    let u = uniforms(3);
    let pos = Vec3::new(0.12, -0.05, 0.0);
    let a = deform_vertex(pos, Vec3::Z, &u);
    let b = deform_vertex(pos, Vec3::Z, &u);
    assert_eq!(a, b);
}

#[test]
fn output_respects_clamp_bounds_for_any_input() {
    let mut rng = StdRng::seed_from_u64(17);
    for seed in 0..20 {
        let mut u = uniforms(seed);
        // Exaggerate to push well past the bounds
        u.noise_amplitude = rng.gen_range(0.0..20.0);
        for _ in 0..500 {
            let p = Vec3::new(
                rng.gen_range(-3.0..3.0),
                rng.gen_range(-3.0..3.0),
                rng.gen_range(-3.0..3.0),
            );
            let out = deform_vertex(p, Vec3::Z, &u).position;
            assert!(out.x.abs() <= BOUND_XY && out.y.abs() <= BOUND_XY, "{out:?}");
            assert!(out.z.abs() <= BOUND_Z, "{out:?}");
        }
    }
}

#[test]
fn far_vertices_are_only_twisted() {
    let mut u = uniforms(4);
    u.noise_amplitude = 0.0;
    // Outside the radial mask nothing but the twist applies.
    let p = Vec3::new(0.8, 0.0, 0.0);
    let out = deform_vertex(p, Vec3::Z, &u);
    assert_eq!(out.position, twist(p, u.twist_amount));
}

#[test]
fn zero_direction_peak_contributes_nothing() {
    let mut u = uniforms(5);
    u.noise_amplitude = 0.0;
    for peak in u.peaks.iter_mut() {
        peak.direction = [0.0; 4];
    }
    let out = deform_vertex(Vec3::ZERO, Vec3::Z, &u);
    assert_eq!(out.position, Vec3::ZERO);
    assert_eq!(out.displacement, 0.0);
}

#[test]
fn single_pull_peak_lifts_center_toward_viewer() {
    let mut u = uniforms(6);
    u.noise_amplitude = 0.0;
    for peak in u.peaks.iter_mut() {
        *peak = PeakPacked::default();
    }
    u.peaks[0] = PeakPacked {
        pos_strength: [0.0, 0.0, 0.5, 0.0],
        direction: [0.0, 0.0, 2.0, 0.0],
    };
    let out = deform_vertex(Vec3::ZERO, Vec3::Z, &u);
    assert!((out.position.z - 0.5).abs() < 1e-6);
    assert!((out.displacement - 0.5).abs() < 1e-6);
}

#[test]
fn perturbed_normal_is_unit_length() {
    let u = uniforms(8);
    for i in 0..100 {
        let p = Vec3::new((i as f32 * 0.013) - 0.6, 0.2, 0.0);
        let n = deform_vertex(p, Vec3::Z, &u).normal;
        assert!((n.length() - 1.0).abs() < 1e-4);
    }
}

#[test]
fn uniforms_pack_peaks_in_order() {
    let config = HeroConfig::default();
    let peaks = PeakSet::generate(&mut StdRng::seed_from_u64(21), &config.peaks);
    let u = DeformUniforms::new(&config, &peaks);
    for (packed, peak) in u.peaks.iter().zip(peaks.iter()) {
        assert_eq!(packed.pos_strength[0], peak.position.x);
        assert_eq!(packed.pos_strength[1], peak.position.y);
        assert_eq!(packed.pos_strength[2], peak.strength);
        assert_eq!(&packed.direction[..3], &peak.direction.to_array()[..]);
    }
    assert_eq!(u.spring_displacement, 1.0);
    assert_eq!(u.shade_by_displacement, 0.0);
    assert_eq!(u.line_color, [0.0, 0.0, 0.0, 1.0]);
}

#[test]
fn uniform_sizes_match_wgsl_layout() {
    assert_eq!(std::mem::size_of::<PeakPacked>(), 32);
    assert_eq!(std::mem::size_of::<DeformUniforms>(), 48 + 32 * PEAK_COUNT);
    assert_eq!(std::mem::size_of::<SceneUniforms>(), 144);
}

#[test]
fn shader_source_has_constants_filled_in() {
    let src = deform_shader_source();
    assert!(!src.contains("__PEAK_COUNT__"));
    assert!(src.contains(&format!("array<PeakPacked, {PEAK_COUNT}>")));
    assert!(src.contains("const BOUND_XY: f32 = 0.9;"));
    assert!(src.contains("const BOUND_Z: f32 = 1.2;"));
    assert!(verify_shader_layout(&src).is_ok());
}

#[test]
fn shader_shares_shape_constants_with_cpu_reference() {
    let src = deform_shader_source();
    assert!(!src.contains("__"), "unresolved placeholder left in shader");
    for line in [
        "const RADIAL_FADE_WIDTH: f32 = 0.3;",
        "const PEAK_FALLOFF: f32 = 12.0;",
        "const NORMAL_PROBE: f32 = 0.1;",
        "const NORMAL_BEND: f32 = 0.1;",
        "const OCTAVE_SEED_0: vec3<f32> = vec3<f32>(123.456, 789.012, 345.678);",
        "const OCTAVE_SEED_1: vec3<f32> = vec3<f32>(987.654, 321.098, 765.432);",
        "const OCTAVE_SEED_2: vec3<f32> = vec3<f32>(555.111, 222.333, 999.888);",
    ] {
        assert!(src.contains(line), "missing {line:?}");
    }
    // the body refers to the constants rather than repeating their values
    assert!(src.contains("deform.radial_falloff + RADIAL_FADE_WIDTH"));
    assert!(src.contains("exp(-dist * dist * PEAK_FALLOFF)"));
    assert!(!src.contains("vec3<f32>(0.1, 0.0, 0.0)"));
}

#[test]
fn unresolved_shader_constant_is_rejected() {
    let src = deform_shader_source().replace(
        "const PEAK_FALLOFF: f32 = 12.0;",
        "const PEAK_FALLOFF: f32 = __PEAK_FALLOFF__;",
    );
    assert!(matches!(
        verify_shader_layout(&src),
        Err(HeroError::Construction(_))
    ));
}

#[test]
fn mismatched_shader_peak_array_is_rejected() {
    let src = deform_shader_source().replace(
        &format!("array<PeakPacked, {PEAK_COUNT}>"),
        "array<PeakPacked, 4>",
    );
    assert!(matches!(
        verify_shader_layout(&src),
        Err(HeroError::Construction(_))
    ));
}
