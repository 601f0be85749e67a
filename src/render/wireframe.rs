use hero_core::{MeshVertex, Prepared, SceneUniforms};
use wgpu::util::DeviceExt;

use super::helpers::uniform_layout_entry;

const VERTEX_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

pub(crate) struct WireframeResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) scene_buffer: wgpu::Buffer,
    pub(crate) deform_buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) index_buffer: wgpu::Buffer,
    pub(crate) index_count: u32,
}

impl WireframeResources {
    pub(crate) fn destroy(&self) {
        self.scene_buffer.destroy();
        self.deform_buffer.destroy();
        self.vertex_buffer.destroy();
        self.index_buffer.destroy();
    }
}

/// Deform pipeline drawing the mesh edges as a line list. Peaks and the
/// other deformation inputs are written once here and never touched again.
pub(crate) fn create_wireframe_resources(
    device: &wgpu::Device,
    prepared: &Prepared,
    color_format: wgpu::TextureFormat,
    sample_count: u32,
) -> WireframeResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("deform_shader"),
        source: wgpu::ShaderSource::Wgsl(prepared.shader_source.as_str().into()),
    });
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("deform_bgl"),
        entries: &[uniform_layout_entry(0), uniform_layout_entry(1)],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("deform_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("wireframe_pipeline"),
        layout: Some(&pl),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_deform"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &VERTEX_ATTRS,
            }],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::LineList,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState {
            count: sample_count,
            ..Default::default()
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_line"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });

    let scene_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("scene_uniforms"),
        size: std::mem::size_of::<SceneUniforms>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let deform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("deform_uniforms"),
        contents: bytemuck::bytes_of(&prepared.deform),
        usage: wgpu::BufferUsages::UNIFORM,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("deform_bg"),
        layout: &bgl,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: deform_buffer.as_entire_binding(),
            },
        ],
    });

    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("mesh_vertices"),
        contents: bytemuck::cast_slice(&prepared.mesh.vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("wireframe_indices"),
        contents: bytemuck::cast_slice(&prepared.line_indices),
        usage: wgpu::BufferUsages::INDEX,
    });

    WireframeResources {
        pipeline,
        scene_buffer,
        deform_buffer,
        bind_group,
        vertex_buffer,
        index_buffer,
        index_count: prepared.line_indices.len() as u32,
    }
}
