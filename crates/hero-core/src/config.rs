//! Static configuration for the hero animation.
//!
//! Every tunable lives in [`HeroConfig`]; the defaults reproduce the shipped
//! look. The record is read-only once `HeroAnimation::begin` has validated it.

use std::str::FromStr;

use crate::error::HeroError;

/// Which mesh to deform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GeometryKind {
    #[default]
    Plane,
    Box,
    Icosahedron,
    Torus,
}

impl FromStr for GeometryKind {
    type Err = HeroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plane" => Ok(GeometryKind::Plane),
            "box" => Ok(GeometryKind::Box),
            "icosahedron" => Ok(GeometryKind::Icosahedron),
            "torus" => Ok(GeometryKind::Torus),
            other => Err(HeroError::InvalidConfig(format!(
                "unknown geometry kind '{other}'"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlaneParams {
    pub width: f32,
    pub height: f32,
    pub width_segments: u32,
    pub height_segments: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BoxParams {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub width_segments: u32,
    pub height_segments: u32,
    pub depth_segments: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IcosahedronParams {
    pub radius: f32,
    /// Extra subdivisions per icosahedron edge (0 = plain icosahedron).
    pub detail: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TorusParams {
    pub radius: f32,
    pub tube: f32,
    pub radial_segments: u32,
    pub tubular_segments: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GeometryParams {
    pub kind: GeometryKind,
    pub plane: PlaneParams,
    pub cube: BoxParams,
    pub icosahedron: IcosahedronParams,
    pub torus: TorusParams,
}

/// How peak positions are spread over their disc.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DiscSampling {
    /// Uniform angle and uniform radius; denser toward the center.
    #[default]
    CenterWeighted,
    /// Area-uniform sampling (radius drawn as `R * sqrt(u)`).
    Uniform,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PeakParams {
    pub strength_min: f32,
    pub strength_max: f32,
    pub area_radius: f32,
    /// Chance that a peak pushes (negative strength) instead of pulls.
    pub push_probability: f64,
    pub sampling: DiscSampling,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DeformParams {
    /// Fixed scalar applied to both the noise and peak terms.
    pub spring_displacement: f32,
    pub noise_frequency: f32,
    pub noise_amplitude: f32,
    pub twist_amount: f32,
    pub radial_falloff: f32,
    pub radial_sharpness: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AnimationParams {
    /// Scale from elapsed milliseconds to the shader `time` uniform.
    pub time_scale: f32,
    pub auto_rotate: bool,
    pub rotation_speed: f32,
    pub rotation_variation: f32,
    /// Per-millisecond rate at which rotation direction drifts.
    pub direction_change_speed: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CameraParams {
    pub distance: f32,
    pub angle_x: f32,
    pub angle_y: f32,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CanvasParams {
    /// Maximum CSS width; also the reference for the aspect ratio.
    pub width: f64,
    pub height: f64,
    pub max_pixel_ratio: f64,
    pub reveal_delay_ms: u32,
    pub antialias: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ColorParams {
    pub background: u32,
    pub wireframe: u32,
    /// Brighten lines by displacement magnitude instead of flat color.
    pub shade_by_displacement: bool,
    pub displacement_shade_scale: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HeroConfig {
    pub geometry: GeometryParams,
    pub deform: DeformParams,
    pub peaks: PeakParams,
    pub animation: AnimationParams,
    pub camera: CameraParams,
    pub canvas: CanvasParams,
    pub colors: ColorParams,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            geometry: GeometryParams {
                kind: GeometryKind::Plane,
                plane: PlaneParams {
                    width: 1.5,
                    height: 1.5,
                    width_segments: 50,
                    height_segments: 50,
                },
                cube: BoxParams {
                    width: 2.0,
                    height: 2.0,
                    depth: 2.0,
                    width_segments: 30,
                    height_segments: 30,
                    depth_segments: 30,
                },
                icosahedron: IcosahedronParams {
                    radius: 1.5,
                    detail: 4,
                },
                torus: TorusParams {
                    radius: 1.2,
                    tube: 0.5,
                    radial_segments: 30,
                    tubular_segments: 60,
                },
            },
            deform: DeformParams {
                spring_displacement: 1.0,
                noise_frequency: 0.4,
                noise_amplitude: 0.3,
                twist_amount: 1.5,
                radial_falloff: 0.4,
                radial_sharpness: 4.0,
            },
            peaks: PeakParams {
                strength_min: 15.0,
                strength_max: 35.0,
                area_radius: 0.2,
                push_probability: 0.3,
                sampling: DiscSampling::CenterWeighted,
            },
            animation: AnimationParams {
                time_scale: 0.000_08,
                auto_rotate: true,
                rotation_speed: 0.03,
                rotation_variation: 0.02,
                direction_change_speed: 0.000_1,
            },
            camera: CameraParams {
                distance: 4.5,
                angle_x: 0.3,
                angle_y: 0.4,
                fov_degrees: 45.0,
                near: 0.1,
                far: 1000.0,
            },
            canvas: CanvasParams {
                width: 800.0,
                height: 450.0,
                max_pixel_ratio: 2.0,
                reveal_delay_ms: 100,
                antialias: true,
            },
            colors: ColorParams {
                background: 0xffffff,
                wireframe: 0x000000,
                shade_by_displacement: false,
                displacement_shade_scale: 0.05,
            },
        }
    }
}

impl HeroConfig {
    /// Height/width ratio of the configured canvas.
    pub fn aspect_ratio(&self) -> f64 {
        self.canvas.height / self.canvas.width
    }

    pub fn with_geometry(mut self, kind: GeometryKind) -> Self {
        self.geometry.kind = kind;
        self
    }

    pub fn validate(&self) -> Result<(), HeroError> {
        fn positive(name: &str, v: f64) -> Result<(), HeroError> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(HeroError::InvalidConfig(format!("{name} must be > 0, got {v}")))
            }
        }
        fn segments(name: &str, v: u32) -> Result<(), HeroError> {
            if v == 0 {
                Err(HeroError::InvalidConfig(format!("{name} must be at least 1")))
            } else {
                Ok(())
            }
        }

        let g = &self.geometry;
        match g.kind {
            GeometryKind::Plane => {
                positive("plane.width", g.plane.width as f64)?;
                positive("plane.height", g.plane.height as f64)?;
                segments("plane.width_segments", g.plane.width_segments)?;
                segments("plane.height_segments", g.plane.height_segments)?;
            }
            GeometryKind::Box => {
                positive("box.width", g.cube.width as f64)?;
                positive("box.height", g.cube.height as f64)?;
                positive("box.depth", g.cube.depth as f64)?;
                segments("box.width_segments", g.cube.width_segments)?;
                segments("box.height_segments", g.cube.height_segments)?;
                segments("box.depth_segments", g.cube.depth_segments)?;
            }
            GeometryKind::Icosahedron => {
                positive("icosahedron.radius", g.icosahedron.radius as f64)?;
            }
            GeometryKind::Torus => {
                positive("torus.radius", g.torus.radius as f64)?;
                positive("torus.tube", g.torus.tube as f64)?;
                segments("torus.radial_segments", g.torus.radial_segments)?;
                segments("torus.tubular_segments", g.torus.tubular_segments)?;
            }
        }

        let p = &self.peaks;
        if !(p.strength_min <= p.strength_max) {
            return Err(HeroError::InvalidConfig(format!(
                "peak strength range inverted: [{}, {}]",
                p.strength_min, p.strength_max
            )));
        }
        if !(p.area_radius >= 0.0) {
            return Err(HeroError::InvalidConfig(format!(
                "peak area radius must be >= 0, got {}",
                p.area_radius
            )));
        }
        if !(0.0..=1.0).contains(&p.push_probability) {
            return Err(HeroError::InvalidConfig(format!(
                "push probability must be within [0, 1], got {}",
                p.push_probability
            )));
        }
        if !(self.deform.radial_falloff >= 0.0) {
            return Err(HeroError::InvalidConfig(
                "radial falloff must be >= 0".to_string(),
            ));
        }

        positive("canvas.width", self.canvas.width)?;
        positive("canvas.height", self.canvas.height)?;
        positive("canvas.max_pixel_ratio", self.canvas.max_pixel_ratio)?;
        positive("camera.fov_degrees", self.camera.fov_degrees as f64)?;
        positive("camera.near", self.camera.near as f64)?;
        if self.camera.far <= self.camera.near {
            return Err(HeroError::InvalidConfig(
                "camera far plane must lie beyond the near plane".to_string(),
            ));
        }
        Ok(())
    }
}

/// Convert a `0xRRGGBB` sRGB color into linear RGBA for an sRGB surface.
pub fn hex_to_linear_rgba(hex: u32) -> [f32; 4] {
    let channel = |shift: u32| {
        let c = ((hex >> shift) & 0xff) as f32 / 255.0;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    [channel(16), channel(8), channel(0), 1.0]
}
