use anyhow::{anyhow, bail};
use hero_core::{Prepared, SceneRenderer, SceneUniforms, Viewport};
use web_sys as web;

use crate::dom;

mod helpers;
mod wireframe;

use wireframe::{create_wireframe_resources, WireframeResources};

const MSAA_SAMPLES: u32 = 4;

pub struct GpuRenderer {
    canvas: web::HtmlCanvasElement,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    // sRGB view of the surface format; pipeline and MSAA target use it
    view_format: wgpu::TextureFormat,
    wireframe: WireframeResources,
    sample_count: u32,
    // multisampled color target, resolved into the swapchain image
    msaa: Option<(wgpu::Texture, wgpu::TextureView)>,
    clear_color: wgpu::Color,
}

impl GpuRenderer {
    pub async fn new(
        canvas: web::HtmlCanvasElement,
        prepared: &Prepared,
    ) -> anyhow::Result<Self> {
        let (width, height) =
            dom::apply_canvas_size(&canvas, prepared.viewport, prepared.pixel_ratio);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: Some("hero_device"),
                },
                None,
            )
            .await
            .map_err(|e| anyhow!("request_device error: {:?}", e))?;

        let caps = surface.get_capabilities(&adapter);
        let (format, view_format) = helpers::pick_surface_formats(&caps.formats)
            .ok_or_else(|| anyhow!("surface reports no usable formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: if view_format == format {
                vec![]
            } else {
                vec![view_format]
            },
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let sample_count = if prepared.antialias { MSAA_SAMPLES } else { 1 };

        // Shader compilation and pipeline validation report asynchronously
        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let wireframe = create_wireframe_resources(&device, prepared, view_format, sample_count);
        if let Some(err) = device.pop_error_scope().await {
            wireframe.destroy();
            device.destroy();
            bail!("deform pipeline rejected: {err}");
        }

        let msaa = (sample_count > 1).then(|| {
            helpers::create_color_texture(
                &device,
                "msaa_color",
                width,
                height,
                view_format,
                sample_count,
            )
        });
        let [r, g, b, a] = prepared.background;

        log::info!(
            "[gpu] surface {}x{} {:?} view={:?} samples={} lines={}",
            width,
            height,
            format,
            view_format,
            sample_count,
            wireframe.index_count / 2
        );

        Ok(Self {
            canvas,
            surface,
            device,
            queue,
            config,
            view_format,
            wireframe,
            sample_count,
            msaa,
            clear_color: wgpu::Color {
                r: r as f64,
                g: g as f64,
                b: b as f64,
                a: a as f64,
            },
        })
    }

    fn configure(&mut self, width: u32, height: u32) {
        self.config.width = width.max(1);
        self.config.height = height.max(1);
        self.surface.configure(&self.device, &self.config);
        if self.sample_count > 1 {
            if let Some((old, _)) = self.msaa.take() {
                old.destroy();
            }
            self.msaa = Some(helpers::create_color_texture(
                &self.device,
                "msaa_color",
                self.config.width,
                self.config.height,
                self.view_format,
                self.sample_count,
            ));
        }
    }

    fn acquire(&mut self) -> anyhow::Result<Option<wgpu::SurfaceTexture>> {
        match self.surface.get_current_texture() {
            Ok(frame) => Ok(Some(frame)),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("surface lost or outdated; reconfiguring");
                self.configure(self.config.width, self.config.height);
                Ok(None)
            }
            Err(wgpu::SurfaceError::Timeout) => Ok(None),
            Err(e) => Err(anyhow!("surface error: {e}")),
        }
    }
}

impl SceneRenderer for GpuRenderer {
    fn resize(&mut self, viewport: Viewport, pixel_ratio: f64) {
        let (width, height) = dom::apply_canvas_size(&self.canvas, viewport, pixel_ratio);
        if width != self.config.width || height != self.config.height {
            self.configure(width, height);
        }
    }

    fn render(&mut self, scene: &SceneUniforms) -> anyhow::Result<()> {
        let Some(frame) = self.acquire()? else {
            return Ok(());
        };
        let view = frame.texture.create_view(&wgpu::TextureViewDescriptor {
            format: Some(self.view_format),
            ..Default::default()
        });

        self.queue
            .write_buffer(&self.wireframe.scene_buffer, 0, bytemuck::bytes_of(scene));

        let (target, resolve_target) = match &self.msaa {
            Some((_, msaa_view)) => (msaa_view, Some(&view)),
            None => (&view, None),
        };
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("hero_encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("wireframe_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            let w = &self.wireframe;
            rpass.set_pipeline(&w.pipeline);
            rpass.set_bind_group(0, &w.bind_group, &[]);
            rpass.set_vertex_buffer(0, w.vertex_buffer.slice(..));
            rpass.set_index_buffer(w.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..w.index_count, 0, 0..1);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn dispose(&mut self) {
        self.wireframe.destroy();
        if let Some((tex, _)) = self.msaa.take() {
            tex.destroy();
        }
        self.device.destroy();
        log::info!("[gpu] resources released");
    }
}
