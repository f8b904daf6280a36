//! GPU-side object wrappers.
//!
//! Thin, construction-checked wrappers around wgpu objects: the device
//! context, shader programs, textures, uniform arenas, off-screen render
//! targets and pipeline assembly. Everything here is created once during
//! setup and released by `Drop` in reverse ownership order at teardown.

pub mod context;
pub mod debug;
pub mod pipeline;
pub mod shader;
pub mod target;
pub mod texture;
pub mod uniform;

pub use context::{GpuContext, ShellSettings};
pub use pipeline::{PipelineConfig, build_render_pipeline};
pub use shader::ShaderProgram;
pub use target::{RenderTarget, RenderTargetBuilder};
pub use texture::{CubeTexture, SamplerOptions, Texture2D};
pub use uniform::{BlockRange, UniformArena, block_layout};
