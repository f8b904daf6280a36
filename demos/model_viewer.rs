//! Model loading: imports a glTF scene and orbits the fly camera's view
//! around it. When no model file is present under the resource directory
//! the demo keeps running with a generated cube instead of aborting.

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glint::model::ModelMesh;
use glint::prelude::*;
use glint::resources;

const MODEL_FILE: &str = "duck.glb";

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct CameraBlock {
    view_proj: Mat4,
}

struct ModelViewer {
    pipeline: wgpu::RenderPipeline,
    frame_arena: UniformArena,
    frame_bind_group: wgpu::BindGroup,
    object_arena: UniformArena,
    object_bind_group: wgpu::BindGroup,

    /// One bind group per mesh, pairing it with its base-color texture.
    meshes: Vec<(ModelMesh, wgpu::BindGroup)>,
    /// Bound for meshes without a material texture.
    _white: Texture2D,

    camera: FlyCamera,
}

fn uniform_layout_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

impl AppHandler for ModelViewer {
    fn setup(engine: &mut Engine, _window: &Arc<Window>) -> Result<Self> {
        let ctx = &engine.gpu;

        let shader = ShaderProgram::from_wgsl_source(
            &ctx.device,
            "model.wgsl",
            include_str!("shaders/model.wgsl"),
        )?;

        // Importing is fallible like any other resource load; a missing or
        // broken file downgrades to a generated cube.
        let model = Model::from_path(ctx, resources::model_path(MODEL_FILE)).unwrap_or_else(|e| {
            log::warn!("{e}; showing a cube instead");
            let (vertices, indices) = mesh::cube();
            Model {
                meshes: vec![ModelMesh {
                    mesh: Mesh::new(&ctx.device, "cube", &vertices, Some(&indices)),
                    base_color: None,
                }],
            }
        });

        let white = Texture2D::solid_color(ctx, "white", [255, 255, 255, 255]);

        let frame_arena = UniformArena::new(
            &ctx.device,
            "frame uniforms",
            &[("camera", std::mem::size_of::<CameraBlock>() as u64)],
        );
        let object_arena = UniformArena::new(&ctx.device, "object uniforms", &[("model", 64)]);

        let frame_layout = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("viewer frame layout"),
                entries: &[uniform_layout_entry(0)],
            });
        let object_layout = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("viewer object layout"),
                entries: &[uniform_layout_entry(0)],
            });
        let material_layout = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("viewer material layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        let frame_bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("viewer frame bind group"),
            layout: &frame_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_arena.binding(),
            }],
        });
        let object_bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("viewer object bind group"),
            layout: &object_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: object_arena.binding(),
            }],
        });

        let meshes = model
            .meshes
            .into_iter()
            .map(|model_mesh| {
                let texture = model_mesh.base_color.as_ref().unwrap_or(&white);
                let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("viewer material bind group"),
                    layout: &material_layout,
                    entries: &[
                        wgpu::BindGroupEntry {
                            binding: 0,
                            resource: wgpu::BindingResource::TextureView(&texture.view),
                        },
                        wgpu::BindGroupEntry {
                            binding: 1,
                            resource: wgpu::BindingResource::Sampler(&texture.sampler),
                        },
                    ],
                });
                (model_mesh, bind_group)
            })
            .collect();

        let mut config = PipelineConfig::new("model viewer", &shader, ctx.color_format());
        let layouts = [&frame_layout, &object_layout, &material_layout];
        config.vertex_layouts = &[Vertex::LAYOUT];
        config.bind_group_layouts = &layouts;
        config.depth_format = Some(ctx.depth_format);
        let pipeline = build_render_pipeline(&ctx.device, &config);

        let mut camera = FlyCamera::new(
            Vec3::new(0.0, 1.5, 4.0),
            45f32.to_radians(),
            ctx.aspect(),
            0.1,
            100.0,
        );
        camera.look_at(Vec3::ZERO);

        Ok(Self {
            pipeline,
            frame_arena,
            frame_bind_group,
            object_arena,
            object_bind_group,
            meshes,
            _white: white,
            camera,
        })
    }

    fn update(&mut self, engine: &mut Engine, frame: &FrameState) {
        self.camera.set_aspect(engine.gpu.aspect());

        let camera_block = CameraBlock {
            view_proj: self.camera.view_projection(),
        };
        self.frame_arena
            .write_block(&engine.gpu.queue, "camera", bytemuck::bytes_of(&camera_block))
            .expect("camera block exists");

        let model = Mat4::from_rotation_y(frame.time * 0.5);
        self.object_arena
            .write_block(&engine.gpu.queue, "model", bytemuck::bytes_of(&model))
            .expect("model block exists");
    }

    fn render(&mut self, engine: &Engine, frame: &mut Frame) {
        let mut pass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Model Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &frame.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(engine.gpu.clear_color),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: engine.gpu.depth_view(),
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.frame_bind_group, &[]);
        pass.set_bind_group(1, &self.object_bind_group, &[]);

        for (model_mesh, material) in &self.meshes {
            pass.set_bind_group(2, material, &[]);
            model_mesh.mesh.draw(&mut pass);
        }
    }
}

fn main() {
    env_logger::init();
    if let Err(e) = App::new()
        .with_title("glint / model viewer")
        .run::<ModelViewer>()
    {
        log::error!("{e}");
        std::process::exit(-1);
    }
}
