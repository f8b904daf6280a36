//! Lighting: a textured cube and ground plane lit by one point light
//! (Blinn-Phong), with a WASD/mouse fly camera.
//!
//! Frame-level parameters live in one uniform arena (`camera` and `light`
//! blocks); each object carries its own model-matrix arena.

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glint::prelude::*;
use glint::resources;
use winit::window::CursorGrabMode;

const CAMERA_SPEED: f32 = 3.0;
const MOUSE_SENSITIVITY: f32 = 0.005;

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct CameraBlock {
    view_proj: Mat4,
    view_pos: Vec4,
}

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct LightBlock {
    position: Vec4,
    color: Vec4,
}

struct SceneObject {
    mesh: Mesh,
    arena: UniformArena,
    bind_group: wgpu::BindGroup,
}

impl SceneObject {
    fn new(
        ctx: &GpuContext,
        label: &str,
        mesh: Mesh,
        layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let arena = UniformArena::new(&ctx.device, label, &[("model", 64)]);
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: arena.binding(),
            }],
        });
        Self {
            mesh,
            arena,
            bind_group,
        }
    }

    fn set_model(&self, queue: &wgpu::Queue, model: Mat4) {
        self.arena
            .write_block(queue, "model", bytemuck::bytes_of(&model))
            .expect("model block exists");
    }
}

struct LitCube {
    pipeline: wgpu::RenderPipeline,
    frame_arena: UniformArena,
    frame_bind_group: wgpu::BindGroup,
    cube: SceneObject,
    plane: SceneObject,
    camera: FlyCamera,
}

impl AppHandler for LitCube {
    fn setup(engine: &mut Engine, window: &Arc<Window>) -> Result<Self> {
        // Fly-camera demos capture the cursor, like the originals.
        window.set_cursor_visible(false);
        if window.set_cursor_grab(CursorGrabMode::Locked).is_err() {
            let _ = window.set_cursor_grab(CursorGrabMode::Confined);
        }

        let ctx = &engine.gpu;

        let shader = ShaderProgram::from_wgsl_source(
            &ctx.device,
            "lit_cube.wgsl",
            include_str!("shaders/lit_cube.wgsl"),
        )?;

        // A missing texture file must not abort setup; fall back to the
        // 1x1 unit texture instead.
        let diffuse = Texture2D::from_path(ctx, resources::texture_path("container.jpg"), true)
            .unwrap_or_else(|e| {
                log::warn!("{e}; using fallback texture");
                Texture2D::solid_color(ctx, "fallback", [180, 120, 80, 255])
            });

        let frame_arena = UniformArena::new(
            &ctx.device,
            "frame uniforms",
            &[
                ("camera", std::mem::size_of::<CameraBlock>() as u64),
                ("light", std::mem::size_of::<LightBlock>() as u64),
            ],
        );

        let frame_layout = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("frame layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 2,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        let frame_bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame bind group"),
            layout: &frame_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: frame_arena.binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&diffuse.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&diffuse.sampler),
                },
            ],
        });

        let object_layout = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("object layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let mut config = PipelineConfig::new("lit cube", &shader, ctx.color_format());
        let bind_group_layouts = [&frame_layout, &object_layout];
        config.vertex_layouts = &[Vertex::LAYOUT];
        config.bind_group_layouts = &bind_group_layouts;
        config.depth_format = Some(ctx.depth_format);
        let pipeline = build_render_pipeline(&ctx.device, &config);

        let (cube_vertices, cube_indices) = mesh::cube();
        let cube_mesh = Mesh::new(&ctx.device, "cube", &cube_vertices, Some(&cube_indices));
        let (plane_vertices, plane_indices) = mesh::plane(10.0, 10.0);
        let plane_mesh = Mesh::new(&ctx.device, "plane", &plane_vertices, Some(&plane_indices));

        let cube = SceneObject::new(ctx, "cube", cube_mesh, &object_layout);
        let plane = SceneObject::new(ctx, "plane", plane_mesh, &object_layout);

        let light = LightBlock {
            position: Vec4::new(1.2, 2.0, 2.0, 1.0),
            color: Vec4::ONE,
        };
        frame_arena
            .write_block(&ctx.queue, "light", bytemuck::bytes_of(&light))
            .expect("light block exists");

        let camera = FlyCamera::new(
            Vec3::new(0.0, 1.0, 4.0),
            45f32.to_radians(),
            ctx.aspect(),
            0.1,
            100.0,
        );

        Ok(Self {
            pipeline,
            frame_arena,
            frame_bind_group,
            cube,
            plane,
            camera,
        })
    }

    fn update(&mut self, engine: &mut Engine, frame: &FrameState) {
        let input = &engine.input;

        let delta = input.cursor_delta;
        if delta != Vec2::ZERO {
            self.camera
                .rotate_tait_bryan(delta.x * MOUSE_SENSITIVITY, -delta.y * MOUSE_SENSITIVITY);
        }
        if input.scroll_delta.y != 0.0 {
            self.camera.zoom(input.scroll_delta.y);
        }
        self.camera.move_axes(
            input.forward_axis(),
            input.right_axis(),
            CAMERA_SPEED,
            frame.dt,
        );

        self.camera.set_aspect(engine.gpu.aspect());

        let camera_block = CameraBlock {
            view_proj: self.camera.view_projection(),
            view_pos: self.camera.position().extend(1.0),
        };
        self.frame_arena
            .write_block(&engine.gpu.queue, "camera", bytemuck::bytes_of(&camera_block))
            .expect("camera block exists");

        self.cube.set_model(
            &engine.gpu.queue,
            Mat4::from_translation(Vec3::new(0.0, 0.5, 0.0))
                * Mat4::from_rotation_y(frame.time * 0.8),
        );
        self.plane.set_model(&engine.gpu.queue, Mat4::IDENTITY);
    }

    fn render(&mut self, engine: &Engine, frame: &mut Frame) {
        let mut pass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Lit Cube Pass"),
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

        pass.set_bind_group(1, &self.cube.bind_group, &[]);
        self.cube.mesh.draw(&mut pass);

        pass.set_bind_group(1, &self.plane.bind_group, &[]);
        self.plane.mesh.draw(&mut pass);
    }
}

fn main() {
    env_logger::init();
    if let Err(e) = App::new().with_title("glint / lit cube").run::<LitCube>() {
        log::error!("{e}");
        std::process::exit(-1);
    }
}
