//! Render Pipeline Assembly
//!
//! One place that pairs a shader program with its vertex buffer layouts and
//! target state. The layout declared here must match what the shader's
//! input declarations expect — wgpu validates the pairing at pipeline
//! creation, so a mismatch surfaces through the debug channel instead of
//! rendering garbage silently.

use crate::gpu::shader::{FS_ENTRY, ShaderProgram, VS_ENTRY};

/// Declarative description of a render pipeline.
pub struct PipelineConfig<'a> {
    pub label: &'a str,
    /// Module providing the vertex stage.
    pub shader: &'a ShaderProgram,
    /// Module providing the fragment stage; defaults to `shader`.
    pub fragment_shader: Option<&'a ShaderProgram>,
    pub vertex_entry: &'a str,
    pub fragment_entry: &'a str,
    pub vertex_layouts: &'a [wgpu::VertexBufferLayout<'a>],
    pub bind_group_layouts: &'a [&'a wgpu::BindGroupLayout],
    pub color_format: wgpu::TextureFormat,
    pub depth_format: Option<wgpu::TextureFormat>,
    pub cull_mode: Option<wgpu::Face>,
    pub blend: Option<wgpu::BlendState>,
}

impl<'a> PipelineConfig<'a> {
    /// A pipeline rendering triangles to `color_format` with back-face
    /// culling and no depth or blending.
    #[must_use]
    pub fn new(
        label: &'a str,
        shader: &'a ShaderProgram,
        color_format: wgpu::TextureFormat,
    ) -> Self {
        Self {
            label,
            shader,
            fragment_shader: None,
            vertex_entry: VS_ENTRY,
            fragment_entry: FS_ENTRY,
            vertex_layouts: &[],
            bind_group_layouts: &[],
            color_format,
            depth_format: None,
            cull_mode: Some(wgpu::Face::Back),
            blend: None,
        }
    }
}

/// Builds a render pipeline from a [`PipelineConfig`].
#[must_use]
pub fn build_render_pipeline(
    device: &wgpu::Device,
    config: &PipelineConfig<'_>,
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(config.label),
        bind_group_layouts: config.bind_group_layouts,
        immediate_size: 0,
    });

    let fragment_module = config
        .fragment_shader
        .unwrap_or(config.shader)
        .module();

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(config.label),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: config.shader.module(),
            entry_point: Some(config.vertex_entry),
            buffers: config.vertex_layouts,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: fragment_module,
            entry_point: Some(config.fragment_entry),
            targets: &[Some(wgpu::ColorTargetState {
                format: config.color_format,
                blend: config.blend,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: config.cull_mode,
            ..Default::default()
        },
        depth_stencil: config.depth_format.map(|format| wgpu::DepthStencilState {
            format,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}
