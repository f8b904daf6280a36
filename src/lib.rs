//! # glint
//!
//! A compact render-loop shell over wgpu and winit: one generic application
//! shell — window/context lifecycle, fixed per-frame loop, resource setup,
//! teardown by ownership — instantiated by small technique demos (indexed
//! drawing, lighting, off-screen post-processing, instancing).
//!
//! The crate splits into:
//!
//! - [`app`]: the winit-driven application shell and polled input state
//! - [`engine`]: GPU context + frame clock shared by every demo
//! - [`camera`]: a fly camera with dirty-flag-cached matrices
//! - [`gpu`]: construction-checked wrappers for shaders, textures, uniform
//!   arenas, render targets and pipelines
//! - [`mesh`] / [`model`]: vertex layouts, primitive generators, glTF import
//! - [`resources`]: the executable-relative resource directory layout
//!
//! Everything is single-threaded: one thread owns the window, the GPU
//! context and the frame loop, and all GPU objects are created and mutated
//! from it. Resource construction returns `Result`s; runtime validation
//! messages go through the structured log channel in [`gpu::debug`].

pub mod app;
pub mod camera;
pub mod engine;
pub mod errors;
pub mod gpu;
pub mod mesh;
pub mod model;
pub mod resources;
pub mod utils;

pub use app::{App, AppHandler};
pub use camera::FlyCamera;
pub use engine::{Engine, Frame, FrameState};
pub use errors::{GlintError, Result};
pub use gpu::{
    GpuContext, PipelineConfig, RenderTarget, RenderTargetBuilder, SamplerOptions, ShaderProgram,
    ShellSettings, Texture2D, UniformArena, build_render_pipeline,
};
pub use mesh::{Mesh, Vertex};
pub use model::Model;

/// Everything a demo typically needs.
pub mod prelude {
    pub use crate::app::{App, AppHandler, Window};
    pub use crate::camera::FlyCamera;
    pub use crate::engine::{Engine, Frame, FrameState};
    pub use crate::errors::{GlintError, Result};
    pub use crate::gpu::{
        GpuContext, PipelineConfig, RenderTarget, RenderTargetBuilder, SamplerOptions,
        ShaderProgram, ShellSettings, Texture2D, UniformArena, build_render_pipeline,
    };
    pub use crate::mesh::{self, Mesh, Vertex};
    pub use crate::model::Model;
    pub use glam::{Mat4, Vec2, Vec3, Vec4};
}
