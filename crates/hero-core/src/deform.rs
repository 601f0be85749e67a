//! GPU uniform layouts for the deformation pass and a host-side reference
//! implementation of `vs_deform`.

use glam::{Mat4, Vec2, Vec3};

use crate::config::{hex_to_linear_rgba, HeroConfig};
use crate::error::HeroError;
use crate::noise::{octave_sum, snoise, OCTAVE_SEEDS};
use crate::peaks::{PeakSet, PEAK_COUNT};

/// Hard clip applied to deformed x and y.
pub const BOUND_XY: f32 = 0.9;
/// Hard clip applied to deformed z.
pub const BOUND_Z: f32 = 1.2;

/// Radial mask fades from full strength to zero over this distance past the falloff radius.
pub const RADIAL_FADE_WIDTH: f32 = 0.3;
/// Gaussian sharpness of each peak's planar falloff.
pub const PEAK_FALLOFF: f32 = 12.0;
/// Offset used when sampling the noise field for the perturbed normal.
pub const NORMAL_PROBE: f32 = 0.1;
/// Weight of the noise gradient added to the base normal.
pub const NORMAL_BEND: f32 = 0.1;

const PLACEHOLDERS: [&str; 10] = [
    "__PEAK_COUNT__",
    "__BOUND_XY__",
    "__BOUND_Z__",
    "__RADIAL_FADE_WIDTH__",
    "__PEAK_FALLOFF__",
    "__NORMAL_PROBE__",
    "__NORMAL_BEND__",
    "__OCTAVE_SEED_0__",
    "__OCTAVE_SEED_1__",
    "__OCTAVE_SEED_2__",
];

static DEFORM_WGSL_TEMPLATE: &str = include_str!("../shaders/deform.wgsl");

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PeakPacked {
    pub pos_strength: [f32; 4],
    pub direction: [f32; 4],
}

/// Frame-invariant deformation inputs, laid out to match `DeformUniforms` in WGSL.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DeformUniforms {
    pub spring_displacement: f32,
    pub noise_frequency: f32,
    pub noise_amplitude: f32,
    pub twist_amount: f32,
    pub radial_falloff: f32,
    pub radial_sharpness: f32,
    pub shade_by_displacement: f32,
    pub shade_scale: f32,
    pub line_color: [f32; 4],
    pub peaks: [PeakPacked; PEAK_COUNT],
}

/// Per-frame camera and model transform.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub time: f32,
    pub _pad: [f32; 3],
}

const _: () = assert!(std::mem::size_of::<DeformUniforms>() % 16 == 0);
const _: () = assert!(std::mem::size_of::<SceneUniforms>() % 16 == 0);

impl DeformUniforms {
    pub fn new(config: &HeroConfig, peaks: &PeakSet) -> Self {
        let mut packed = [PeakPacked::default(); PEAK_COUNT];
        for (slot, peak) in packed.iter_mut().zip(peaks.iter()) {
            *slot = PeakPacked {
                pos_strength: [peak.position.x, peak.position.y, peak.strength, 0.0],
                direction: [peak.direction.x, peak.direction.y, peak.direction.z, 0.0],
            };
        }
        let d = &config.deform;
        Self {
            spring_displacement: d.spring_displacement,
            noise_frequency: d.noise_frequency,
            noise_amplitude: d.noise_amplitude,
            twist_amount: d.twist_amount,
            radial_falloff: d.radial_falloff,
            radial_sharpness: d.radial_sharpness,
            shade_by_displacement: if config.colors.shade_by_displacement {
                1.0
            } else {
                0.0
            },
            shade_scale: config.colors.displacement_shade_scale,
            line_color: hex_to_linear_rgba(config.colors.wireframe),
            peaks: packed,
        }
    }
}

impl SceneUniforms {
    pub fn new(view_proj: Mat4, model: Mat4, time: f32) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            time,
            _pad: [0.0; 3],
        }
    }
}

/// WGSL source for the deformation pipeline with shared constants filled in.
pub fn deform_shader_source() -> String {
    DEFORM_WGSL_TEMPLATE
        .replace("__PEAK_COUNT__", &PEAK_COUNT.to_string())
        .replace("__BOUND_XY__", &format!("{BOUND_XY:?}"))
        .replace("__BOUND_Z__", &format!("{BOUND_Z:?}"))
        .replace("__RADIAL_FADE_WIDTH__", &format!("{RADIAL_FADE_WIDTH:?}"))
        .replace("__PEAK_FALLOFF__", &format!("{PEAK_FALLOFF:?}"))
        .replace("__NORMAL_PROBE__", &format!("{NORMAL_PROBE:?}"))
        .replace("__NORMAL_BEND__", &format!("{NORMAL_BEND:?}"))
        .replace("__OCTAVE_SEED_0__", &wgsl_vec3(OCTAVE_SEEDS[0]))
        .replace("__OCTAVE_SEED_1__", &wgsl_vec3(OCTAVE_SEEDS[1]))
        .replace("__OCTAVE_SEED_2__", &wgsl_vec3(OCTAVE_SEEDS[2]))
}

fn wgsl_vec3(v: Vec3) -> String {
    format!("{:?}, {:?}, {:?}", v.x, v.y, v.z)
}

/// Check that an assembled shader agrees with the host-side uniform layout.
pub fn verify_shader_layout(source: &str) -> Result<(), HeroError> {
    if PLACEHOLDERS.iter().any(|p| source.contains(p)) {
        return Err(HeroError::Construction(
            "deform shader has unresolved placeholders".to_string(),
        ));
    }
    let expected = format!("array<PeakPacked, {PEAK_COUNT}>");
    if !source.contains(&expected) {
        return Err(HeroError::Construction(format!(
            "deform shader peak array does not match PEAK_COUNT ({PEAK_COUNT})"
        )));
    }
    Ok(())
}

/// Output of the reference deformation for one vertex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeformedVertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub displacement: f32,
}

/// Spiral twist about Y by an angle proportional to height.
pub fn twist(p: Vec3, amount: f32) -> Vec3 {
    let (s, c) = (p.y * amount).sin_cos();
    Vec3::new(c * p.x - s * p.z, p.y, s * p.x + c * p.z)
}

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// 1 at the center, 0 beyond `falloff + RADIAL_FADE_WIDTH`, power-curved in between.
pub fn radial_mask(dist: f32, falloff: f32, sharpness: f32) -> f32 {
    let m = 1.0 - smoothstep(falloff, falloff + RADIAL_FADE_WIDTH, dist);
    m.powf(sharpness)
}

/// Gaussian-like planar influence of a peak at distance `dist`.
pub fn peak_influence(dist: f32) -> f32 {
    (-dist * dist * PEAK_FALLOFF).exp()
}

/// Host-side equivalent of `vs_deform`, used for testing and tooling.
pub fn deform_vertex(position: Vec3, normal: Vec3, u: &DeformUniforms) -> DeformedVertex {
    let pos = twist(position, u.twist_amount);

    let noise_pos = pos * u.noise_frequency;
    let total_noise = octave_sum(noise_pos) * u.noise_amplitude;
    let noise_displacement = total_noise * u.spring_displacement * 0.5;

    let mask = radial_mask(
        Vec2::new(pos.x, pos.y).length(),
        u.radial_falloff,
        u.radial_sharpness,
    );

    let mut peak_displacement = Vec3::ZERO;
    for peak in &u.peaks {
        let center = Vec2::new(peak.pos_strength[0], peak.pos_strength[1]);
        let dist = (Vec2::new(pos.x, pos.y) - center).length();
        let influence = peak_influence(dist);
        let dir = Vec3::from_slice(&peak.direction[..3]).normalize_or_zero();
        peak_displacement += dir * peak.pos_strength[2] * influence * u.spring_displacement;
    }
    peak_displacement *= mask;

    let moved = pos + Vec3::new(0.0, 0.0, noise_displacement * mask) + peak_displacement;
    let clamped = moved.clamp(
        Vec3::new(-BOUND_XY, -BOUND_XY, -BOUND_Z),
        Vec3::new(BOUND_XY, BOUND_XY, BOUND_Z),
    );

    let displacement = (Vec3::new(0.0, 0.0, noise_displacement) + peak_displacement).length();

    let perturb = Vec3::new(
        snoise(noise_pos + Vec3::new(NORMAL_PROBE, 0.0, 0.0)),
        snoise(noise_pos + Vec3::new(0.0, NORMAL_PROBE, 0.0)),
        snoise(noise_pos + Vec3::new(0.0, 0.0, NORMAL_PROBE)),
    );

    DeformedVertex {
        position: clamped,
        normal: (normal + perturb * NORMAL_BEND).normalize_or_zero(),
        displacement,
    }
}
