//! Indexed drawing: one triangle through a vertex + index buffer.

use std::sync::Arc;

use glint::prelude::*;

struct Triangle {
    pipeline: wgpu::RenderPipeline,
    mesh: Mesh,
}

impl AppHandler for Triangle {
    fn setup(engine: &mut Engine, _window: &Arc<Window>) -> Result<Self> {
        let ctx = &engine.gpu;

        let shader = ShaderProgram::from_wgsl_source(
            &ctx.device,
            "triangle.wgsl",
            include_str!("shaders/triangle.wgsl"),
        )?;

        let mut config = PipelineConfig::new("triangle", &shader, ctx.color_format());
        config.vertex_layouts = &[Vertex::LAYOUT];
        config.cull_mode = None;
        let pipeline = build_render_pipeline(&ctx.device, &config);

        let vertices = [
            Vertex::new([0.0, 0.5, 0.0], [0.0, 0.0, 1.0], [0.5, 1.0]),
            Vertex::new([-0.5, -0.5, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0]),
            Vertex::new([0.5, -0.5, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0]),
        ];
        let indices = [0, 1, 2];
        let mesh = Mesh::new(&ctx.device, "triangle", &vertices, Some(&indices));

        Ok(Self { pipeline, mesh })
    }

    fn render(&mut self, engine: &Engine, frame: &mut Frame) {
        let mut pass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Triangle Pass"),
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
        self.mesh.draw(&mut pass);
    }
}

fn main() {
    env_logger::init();
    if let Err(e) = App::new().with_title("glint / triangle").run::<Triangle>() {
        log::error!("{e}");
        std::process::exit(-1);
    }
}
