//! Bootstrap state machine for one hero animation instance.
//!
//! `HeroAnimation` owns everything the effect needs (configuration, peaks,
//! camera, rotation, renderer) and talks to the page only through
//! [`HostPage`] and to the GPU only through [`SceneRenderer`], so the whole
//! lifecycle can run against in-memory doubles on the host.

use rand::Rng;

use crate::camera::Camera;
use crate::config::HeroConfig;
use crate::deform::{deform_shader_source, verify_shader_layout, DeformUniforms, SceneUniforms};
use crate::error::{FailureKind, HeroError};
use crate::geometry::{build_geometry, MeshData};
use crate::motion::{frame_delta_sec, MeshRotation};
use crate::peaks::PeakSet;
use crate::viewport::{effective_pixel_ratio, Viewport};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeroState {
    Uninitialized,
    Initializing,
    Running,
    Failed(FailureKind),
    TornDown,
}

/// What the page offers before any GPU work starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capabilities {
    pub canvas: bool,
    pub gpu: bool,
}

impl Capabilities {
    pub fn check(&self) -> Result<(), HeroError> {
        if !self.canvas {
            return Err(HeroError::MissingDependency("hero canvas element"));
        }
        if !self.gpu {
            return Err(HeroError::MissingDependency("WebGPU"));
        }
        Ok(())
    }
}

/// Page-side effects requested by the state machine.
pub trait HostPage {
    /// Schedule one call to `HeroAnimation::frame`.
    fn request_frame(&mut self);
    /// Drop any frame scheduled by `request_frame`.
    fn cancel_frame(&mut self);
    /// Arrange for `HeroAnimation::on_reveal_timer` after `delay_ms`.
    fn schedule_reveal(&mut self, delay_ms: u32);
    /// Mark the canvas active/visible and fade the fallback image out.
    fn reveal_canvas(&mut self);
    /// Keep or restore the static fallback image.
    fn show_fallback(&mut self);
    /// Current width of the layout container, if it can be measured.
    fn container_width(&self) -> Option<f64>;
    fn device_pixel_ratio(&self) -> f64;
}

/// GPU-side operations the lifecycle drives.
pub trait SceneRenderer {
    fn resize(&mut self, viewport: Viewport, pixel_ratio: f64);
    fn render(&mut self, scene: &SceneUniforms) -> anyhow::Result<()>;
    /// Release GPU resources. Called at most once.
    fn dispose(&mut self);
}

/// Everything a renderer needs to build its pipeline.
#[derive(Clone, Debug)]
pub struct Prepared {
    pub mesh: MeshData,
    pub line_indices: Vec<u32>,
    pub deform: DeformUniforms,
    pub shader_source: String,
    pub viewport: Viewport,
    pub pixel_ratio: f64,
    pub background: [f32; 4],
    pub antialias: bool,
}

pub struct HeroAnimation<H: HostPage, R: SceneRenderer> {
    config: HeroConfig,
    host: H,
    renderer: Option<R>,
    state: HeroState,
    peaks: Option<PeakSet>,
    camera: Camera,
    rotation: MeshRotation,
    viewport: Viewport,
    started_ms: Option<f64>,
    last_frame_ms: Option<f64>,
}

impl<H: HostPage, R: SceneRenderer> HeroAnimation<H, R> {
    pub fn new(config: HeroConfig, host: H) -> Self {
        let viewport = Viewport {
            width: config.canvas.width,
            height: config.canvas.height,
        };
        let camera = Camera::orbit(&config.camera, viewport.aspect());
        Self {
            config,
            host,
            renderer: None,
            state: HeroState::Uninitialized,
            peaks: None,
            camera,
            rotation: MeshRotation::default(),
            viewport,
            started_ms: None,
            last_frame_ms: None,
        }
    }

    pub fn state(&self) -> HeroState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == HeroState::Running
    }

    pub fn config(&self) -> &HeroConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn renderer(&self) -> Option<&R> {
        self.renderer.as_ref()
    }

    pub fn peaks(&self) -> Option<&PeakSet> {
        self.peaks.as_ref()
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn rotation(&self) -> MeshRotation {
        self.rotation
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Validate, probe capabilities and build everything the renderer needs.
    /// On error the instance is already in `Failed` with the fallback shown.
    pub fn begin<G: Rng + ?Sized>(
        &mut self,
        capabilities: Capabilities,
        rng: &mut G,
    ) -> Result<Prepared, HeroError> {
        if self.state != HeroState::Uninitialized {
            return Err(HeroError::InvalidTransition {
                action: "begin",
                state: self.state,
            });
        }
        self.state = HeroState::Initializing;
        log::info!("initializing hero animation");

        match self.prepare(capabilities, rng) {
            Ok(prepared) => Ok(prepared),
            Err(e) => {
                self.fail(&e);
                Err(e)
            }
        }
    }

    fn prepare<G: Rng + ?Sized>(
        &mut self,
        capabilities: Capabilities,
        rng: &mut G,
    ) -> Result<Prepared, HeroError> {
        self.config.validate()?;
        capabilities.check()?;

        let shader_source = deform_shader_source();
        verify_shader_layout(&shader_source)?;

        let peaks = PeakSet::generate(rng, &self.config.peaks);
        for (i, p) in peaks.iter().enumerate() {
            log::debug!(
                "[peaks] #{i} pos=({:.3},{:.3}) dir=({:.2},{:.2},{:.2}) strength={:.2}",
                p.position.x,
                p.position.y,
                p.direction.x,
                p.direction.y,
                p.direction.z,
                p.strength
            );
        }
        let deform = DeformUniforms::new(&self.config, &peaks);
        self.peaks = Some(peaks);

        let mesh = build_geometry(&self.config.geometry);
        let line_indices = mesh.wireframe_indices();
        log::info!(
            "[geometry] {:?}: vertices={} triangles={} lines={}",
            self.config.geometry.kind,
            mesh.vertices.len(),
            mesh.triangle_count(),
            line_indices.len() / 2
        );

        let viewport = self.measure_viewport().unwrap_or(self.viewport);
        self.viewport = viewport;
        self.camera.set_aspect(viewport.aspect());

        Ok(Prepared {
            mesh,
            line_indices,
            deform,
            shader_source,
            viewport,
            pixel_ratio: self.pixel_ratio(),
            background: crate::config::hex_to_linear_rgba(self.config.colors.background),
            antialias: self.config.canvas.antialias,
        })
    }

    /// Hand over a constructed renderer and start the frame loop.
    pub fn attach(&mut self, mut renderer: R) -> Result<(), HeroError> {
        if self.state != HeroState::Initializing {
            renderer.dispose();
            return Err(HeroError::InvalidTransition {
                action: "attach",
                state: self.state,
            });
        }
        // the container may have changed while the device was being requested
        if let Some(viewport) = self.measure_viewport() {
            self.viewport = viewport;
            self.camera.set_aspect(viewport.aspect());
        }
        renderer.resize(self.viewport, self.pixel_ratio());
        self.renderer = Some(renderer);
        self.state = HeroState::Running;
        self.host.request_frame();
        self.host.schedule_reveal(self.config.canvas.reveal_delay_ms);
        log::info!("hero animation running");
        Ok(())
    }

    /// Abandon initialization and leave the fallback image in place.
    pub fn fail(&mut self, error: &HeroError) {
        if !matches!(self.state, HeroState::Uninitialized | HeroState::Initializing) {
            log::warn!("ignoring failure while {:?}: {}", self.state, error);
            return;
        }
        log::error!("hero animation unavailable: {error}");
        self.state = HeroState::Failed(error.kind());
        self.host.show_fallback();
    }

    /// `begin`, build the renderer, then `attach`, all synchronously.
    pub fn start<G, F>(
        &mut self,
        capabilities: Capabilities,
        rng: &mut G,
        build: F,
    ) -> Result<(), HeroError>
    where
        G: Rng + ?Sized,
        F: FnOnce(&Prepared) -> Result<R, HeroError>,
    {
        let prepared = self.begin(capabilities, rng)?;
        match build(&prepared) {
            Ok(renderer) => self.attach(renderer),
            Err(e) => {
                self.fail(&e);
                Err(e)
            }
        }
    }

    /// One animation frame at page time `now_ms`.
    pub fn frame(&mut self, now_ms: f64) {
        if self.state != HeroState::Running {
            return;
        }
        let started = *self.started_ms.get_or_insert(now_ms);
        let elapsed_ms = now_ms - started;
        let dt = frame_delta_sec(self.last_frame_ms, now_ms);
        self.last_frame_ms = Some(now_ms);

        self.rotation.advance(&self.config.animation, elapsed_ms, dt);

        let scene = SceneUniforms::new(
            self.camera.view_proj(),
            self.rotation.model_matrix(),
            (elapsed_ms as f32) * self.config.animation.time_scale,
        );
        if let Some(r) = self.renderer.as_mut() {
            if let Err(e) = r.render(&scene) {
                log::error!("render error: {e:?}");
            }
        }
        self.host.request_frame();
    }

    pub fn on_reveal_timer(&mut self) {
        if self.state == HeroState::Running {
            log::info!("revealing hero canvas");
            self.host.reveal_canvas();
        }
    }

    /// Refit the canvas to its container.
    pub fn resize(&mut self) {
        if self.state != HeroState::Running {
            return;
        }
        let Some(viewport) = self.measure_viewport() else {
            return;
        };
        self.viewport = viewport;
        self.camera.set_aspect(viewport.aspect());
        let ratio = self.pixel_ratio();
        if let Some(r) = self.renderer.as_mut() {
            r.resize(viewport, ratio);
        }
    }

    /// Stop the loop and release GPU resources. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        match self.state {
            HeroState::Running | HeroState::Initializing => {
                self.host.cancel_frame();
                if let Some(mut r) = self.renderer.take() {
                    r.dispose();
                }
                self.state = HeroState::TornDown;
                log::info!("hero animation torn down");
            }
            _ => {}
        }
    }

    fn measure_viewport(&self) -> Option<Viewport> {
        let width = self.host.container_width()?;
        Viewport::fit(width, self.config.canvas.width, self.config.canvas.height)
    }

    fn pixel_ratio(&self) -> f64 {
        effective_pixel_ratio(
            self.host.device_pixel_ratio(),
            self.config.canvas.max_pixel_ratio,
        )
    }
}
