//! Framebuffers: render the scene into an off-screen target, then draw a
//! fullscreen quad that samples it through an inversion post-process shader.
//! Two passes, ordering fixed at compile time.

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glint::prelude::*;

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct CameraBlock {
    view_proj: Mat4,
}

struct Postprocess {
    scene_pipeline: wgpu::RenderPipeline,
    post_pipeline: wgpu::RenderPipeline,

    frame_arena: UniformArena,
    frame_bind_group: wgpu::BindGroup,
    object_arena: UniformArena,
    object_bind_group: wgpu::BindGroup,

    post_layout: wgpu::BindGroupLayout,
    post_bind_group: wgpu::BindGroup,
    target: RenderTarget,

    cube: Mesh,
    quad: Mesh,
    camera: FlyCamera,
}

const TARGET_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

fn build_target(ctx: &GpuContext, width: u32, height: u32) -> Result<RenderTarget> {
    RenderTargetBuilder::new("scene target")
        .color(Texture2D::attachment(
            ctx,
            "scene color",
            width,
            height,
            TARGET_FORMAT,
        ))
        .depth(Texture2D::attachment(
            ctx,
            "scene depth",
            width,
            height,
            ctx.depth_format,
        ))
        .build()
}

fn build_post_bind_group(
    ctx: &GpuContext,
    layout: &wgpu::BindGroupLayout,
    target: &RenderTarget,
) -> wgpu::BindGroup {
    let color = target.color(0).expect("target has a color attachment");
    ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("post bind group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&color.view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&color.sampler),
            },
        ],
    })
}

/// 8x8 checkerboard so the scene pass has something to sample.
fn checkerboard(ctx: &GpuContext) -> Texture2D {
    const SIZE: u32 = 8;
    let mut pixels = Vec::with_capacity((SIZE * SIZE * 4) as usize);
    for y in 0..SIZE {
        for x in 0..SIZE {
            let v = if (x + y) % 2 == 0 { 230 } else { 60 };
            pixels.extend_from_slice(&[v, v, v, 255]);
        }
    }
    Texture2D::from_pixels(
        ctx,
        "checkerboard",
        SIZE,
        SIZE,
        wgpu::TextureFormat::Rgba8Unorm,
        &pixels,
        SamplerOptions::clamp_nearest(),
    )
}

impl AppHandler for Postprocess {
    fn setup(engine: &mut Engine, _window: &Arc<Window>) -> Result<Self> {
        let ctx = &engine.gpu;
        let (width, height) = ctx.size();

        let scene_shader = ShaderProgram::from_wgsl_source(
            &ctx.device,
            "scene.wgsl",
            include_str!("shaders/scene.wgsl"),
        )?;
        let post_shader = ShaderProgram::from_wgsl_source(
            &ctx.device,
            "post.wgsl",
            include_str!("shaders/post.wgsl"),
        )?;

        let texture = checkerboard(ctx);

        let frame_arena = UniformArena::new(
            &ctx.device,
            "frame uniforms",
            &[("camera", std::mem::size_of::<CameraBlock>() as u64)],
        );
        let object_arena = UniformArena::new(&ctx.device, "object uniforms", &[("model", 64)]);

        let frame_layout = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("scene frame layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX,
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

        let object_layout = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("scene object layout"),
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

        let post_layout = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("post layout"),
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
            label: Some("scene frame bind group"),
            layout: &frame_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: frame_arena.binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&texture.sampler),
                },
            ],
        });

        let object_bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene object bind group"),
            layout: &object_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: object_arena.binding(),
            }],
        });

        // Scene pass renders into the off-screen target's format.
        let mut scene_config = PipelineConfig::new("scene", &scene_shader, TARGET_FORMAT);
        let scene_layouts = [&frame_layout, &object_layout];
        scene_config.vertex_layouts = &[Vertex::LAYOUT];
        scene_config.bind_group_layouts = &scene_layouts;
        scene_config.depth_format = Some(ctx.depth_format);
        let scene_pipeline = build_render_pipeline(&ctx.device, &scene_config);

        // Post pass renders the quad to the surface.
        let mut post_config = PipelineConfig::new("post", &post_shader, ctx.color_format());
        let post_layouts = [&post_layout];
        post_config.vertex_layouts = &[Vertex::LAYOUT];
        post_config.bind_group_layouts = &post_layouts;
        post_config.cull_mode = None;
        let post_pipeline = build_render_pipeline(&ctx.device, &post_config);

        let target = build_target(ctx, width, height)?;
        let post_bind_group = build_post_bind_group(ctx, &post_layout, &target);

        let (cube_vertices, cube_indices) = mesh::cube();
        let cube = Mesh::new(&ctx.device, "cube", &cube_vertices, Some(&cube_indices));
        let (quad_vertices, quad_indices) = mesh::fullscreen_quad();
        let quad = Mesh::new(&ctx.device, "fullscreen quad", &quad_vertices, Some(&quad_indices));

        let mut camera = FlyCamera::new(
            Vec3::new(0.0, 1.0, 3.0),
            45f32.to_radians(),
            ctx.aspect(),
            0.1,
            100.0,
        );
        camera.look_at(Vec3::ZERO);

        Ok(Self {
            scene_pipeline,
            post_pipeline,
            frame_arena,
            frame_bind_group,
            object_arena,
            object_bind_group,
            post_layout,
            post_bind_group,
            target,
            cube,
            quad,
            camera,
        })
    }

    fn update(&mut self, engine: &mut Engine, frame: &FrameState) {
        let (width, height) = engine.gpu.size();
        if (width, height) != self.target.size() {
            // The off-screen target tracks the surface size.
            match build_target(&engine.gpu, width, height) {
                Ok(target) => {
                    self.post_bind_group =
                        build_post_bind_group(&engine.gpu, &self.post_layout, &target);
                    self.target = target;
                    self.camera.set_aspect(engine.gpu.aspect());
                }
                Err(e) => log::error!("{e}"),
            }
        }

        let camera_block = CameraBlock {
            view_proj: self.camera.view_projection(),
        };
        self.frame_arena
            .write_block(&engine.gpu.queue, "camera", bytemuck::bytes_of(&camera_block))
            .expect("camera block exists");

        let model = Mat4::from_rotation_y(frame.time) * Mat4::from_rotation_x(frame.time * 0.4);
        self.object_arena
            .write_block(&engine.gpu.queue, "model", bytemuck::bytes_of(&model))
            .expect("model block exists");
    }

    fn render(&mut self, engine: &Engine, frame: &mut Frame) {
        // Pass 1: scene into the off-screen target.
        {
            let mut pass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[self
                    .target
                    .color_attachment(0, wgpu::LoadOp::Clear(engine.gpu.clear_color))],
                depth_stencil_attachment: self.target.depth_attachment(1.0),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
            pass.set_pipeline(&self.scene_pipeline);
            pass.set_bind_group(0, &self.frame_bind_group, &[]);
            pass.set_bind_group(1, &self.object_bind_group, &[]);
            self.cube.draw(&mut pass);
        }

        // Pass 2: fullscreen quad sampling the target, onto the surface.
        {
            let mut pass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Post Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
            pass.set_pipeline(&self.post_pipeline);
            pass.set_bind_group(0, &self.post_bind_group, &[]);
            self.quad.draw(&mut pass);
        }
    }
}

fn main() {
    env_logger::init();
    if let Err(e) = App::new()
        .with_title("glint / postprocess")
        .run::<Postprocess>()
    {
        log::error!("{e}");
        std::process::exit(-1);
    }
}
