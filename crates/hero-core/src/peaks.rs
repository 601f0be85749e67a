use glam::{Vec2, Vec3};
use rand::prelude::*;
use std::f32::consts::TAU;

use crate::config::{DiscSampling, PeakParams};

/// Number of peaks uploaded to the deformation shader. The WGSL peak array is
/// sized from this constant when the shader source is assembled.
pub const PEAK_COUNT: usize = 8;

/// A localized pull (or push, when `strength < 0`) applied by the shader.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Peak {
    pub position: Vec2,
    /// Unnormalized; the shader normalizes before use.
    pub direction: Vec3,
    pub strength: f32,
}

impl Peak {
    pub fn is_push(&self) -> bool {
        self.strength < 0.0
    }
}

/// Draw a single peak from `rng`.
pub fn random_peak<R: Rng + ?Sized>(rng: &mut R, params: &PeakParams) -> Peak {
    let angle = rng.gen::<f32>() * TAU;
    let radius = match params.sampling {
        DiscSampling::CenterWeighted => rng.gen::<f32>() * params.area_radius,
        DiscSampling::Uniform => rng.gen::<f32>().sqrt() * params.area_radius,
    };
    let position = Vec2::new(angle.cos() * radius, angle.sin() * radius);

    let direction = Vec3::new(
        rng.gen_range(-1.0..=1.0),
        rng.gen_range(-1.0..=1.0),
        rng.gen_range(-1.0..=1.0) + 1.0,
    );

    let sign = if rng.gen_bool(params.push_probability) {
        -1.0
    } else {
        1.0
    };
    let magnitude = if params.strength_max > params.strength_min {
        rng.gen_range(params.strength_min..params.strength_max)
    } else {
        params.strength_min
    };

    Peak {
        position,
        direction,
        strength: magnitude * sign,
    }
}

/// Generate `count` independent peaks.
pub fn generate_peaks<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    params: &PeakParams,
) -> Vec<Peak> {
    (0..count).map(|_| random_peak(rng, params)).collect()
}

/// The fixed-size peak set held for the lifetime of the page.
#[derive(Clone, Debug, PartialEq)]
pub struct PeakSet {
    peaks: [Peak; PEAK_COUNT],
}

impl PeakSet {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, params: &PeakParams) -> Self {
        let mut peaks = [Peak::default(); PEAK_COUNT];
        for p in peaks.iter_mut() {
            *p = random_peak(rng, params);
        }
        Self { peaks }
    }

    pub fn from_array(peaks: [Peak; PEAK_COUNT]) -> Self {
        Self { peaks }
    }

    pub fn as_slice(&self) -> &[Peak] {
        &self.peaks
    }

    pub fn iter(&self) -> impl Iterator<Item = &Peak> {
        self.peaks.iter()
    }
}
