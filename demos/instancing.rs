//! Instancing: a 10x10 grid of colored quads drawn with one instanced call.
//! Per-instance offset and color come from a second vertex buffer stepped
//! per instance.

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glint::prelude::*;
use wgpu::util::DeviceExt;

const GRID: u32 = 10;

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct Instance {
    offset: [f32; 2],
    color: [f32; 3],
}

impl Instance {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![3 => Float32x2, 4 => Float32x3];

    const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Instance>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &Self::ATTRIBUTES,
    };
}

fn grid_instances() -> Vec<Instance> {
    let mut instances = Vec::with_capacity((GRID * GRID) as usize);
    let step = 2.0 / GRID as f32;
    for y in 0..GRID {
        for x in 0..GRID {
            instances.push(Instance {
                offset: [
                    -1.0 + step * (x as f32 + 0.5),
                    -1.0 + step * (y as f32 + 0.5),
                ],
                color: [
                    x as f32 / GRID as f32,
                    y as f32 / GRID as f32,
                    0.6,
                ],
            });
        }
    }
    instances
}

struct Instancing {
    pipeline: wgpu::RenderPipeline,
    quad: Mesh,
    instance_buffer: wgpu::Buffer,
    instance_count: u32,
}

impl AppHandler for Instancing {
    fn setup(engine: &mut Engine, _window: &Arc<Window>) -> Result<Self> {
        let ctx = &engine.gpu;

        let shader = ShaderProgram::from_wgsl_source(
            &ctx.device,
            "instancing.wgsl",
            include_str!("shaders/instancing.wgsl"),
        )?;

        let mut config = PipelineConfig::new("instancing", &shader, ctx.color_format());
        config.vertex_layouts = &[Vertex::LAYOUT, Instance::LAYOUT];
        config.cull_mode = None;
        let pipeline = build_render_pipeline(&ctx.device, &config);

        let (quad_vertices, quad_indices) = mesh::fullscreen_quad();
        let quad = Mesh::new(&ctx.device, "quad", &quad_vertices, Some(&quad_indices));

        let instances = grid_instances();
        let instance_buffer = ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("instance offsets"),
                contents: bytemuck::cast_slice(&instances),
                usage: wgpu::BufferUsages::VERTEX,
            });

        Ok(Self {
            pipeline,
            quad,
            instance_buffer,
            instance_count: instances.len() as u32,
        })
    }

    fn render(&mut self, engine: &Engine, frame: &mut Frame) {
        let mut pass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Instancing Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &frame.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(engine.gpu.clear_color),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        pass.set_pipeline(&self.pipeline);
        pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
        self.quad.draw_instanced(&mut pass, 0..self.instance_count);
    }
}

fn main() {
    env_logger::init();
    if let Err(e) = App::new().with_title("glint / instancing").run::<Instancing>() {
        log::error!("{e}");
        std::process::exit(-1);
    }
}
