//! Error Types
//!
//! This module defines the error types used throughout the shell.
//!
//! All fallible construction paths — window and GPU context creation, file
//! reads, image decodes, shader compilation, render-target assembly — return
//! [`Result<T>`], an alias for `std::result::Result<T, GlintError>`.
//! Failures are values at the construction boundary; only runtime GPU
//! validation messages go through the log channel (see [`crate::gpu::debug`]).

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for the shell.
#[derive(Error, Debug)]
pub enum GlintError {
    // ========================================================================
    // Window & GPU Context Errors
    // ========================================================================
    /// Window creation failed.
    #[error("Failed to create window: {0}")]
    WindowCreateFailed(String),

    /// Event loop error (winit).
    #[error("Event loop error: {0}")]
    EventLoopError(#[from] winit::error::EventLoopError),

    /// Failed to create the rendering surface for a window.
    #[error("Failed to create surface: {0}")]
    SurfaceCreateFailed(#[from] wgpu::CreateSurfaceError),

    /// Failed to request a compatible GPU adapter.
    #[error("Failed to request WGPU adapter: {0}")]
    AdapterRequestFailed(String),

    /// Failed to create the GPU device.
    #[error("Failed to create WGPU device: {0}")]
    DeviceCreateFailed(#[from] wgpu::RequestDeviceError),

    /// The GPU ran out of memory while presenting a frame.
    #[error("Surface out of memory")]
    SurfaceOutOfMemory,

    // ========================================================================
    // Resource Loading Errors
    // ========================================================================
    /// File I/O error, with the path that failed.
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        /// The path being read
        path: PathBuf,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// Image decoding error.
    #[error("Image decode error: {0}")]
    ImageDecodeFailed(String),

    /// Cube map face validation error.
    #[error("Cube map error: {0}")]
    CubeMapInvalid(String),

    /// glTF parsing or loading error.
    #[error("glTF error: {0}")]
    GltfError(String),

    // ========================================================================
    // Shader & Pipeline Errors
    // ========================================================================
    /// Shader compilation failed. The message carries the compiler
    /// diagnostic captured from the validation layer.
    #[error("Error compiling shader '{label}':\n{message}")]
    ShaderCompileFailed {
        /// Label of the shader that failed
        label: String,
        /// Compiler diagnostic
        message: String,
    },

    // ========================================================================
    // Render Target Errors
    // ========================================================================
    /// The render target is not complete.
    #[error("Render target is not complete: {0}")]
    RenderTargetIncomplete(String),

    // ========================================================================
    // Uniform Buffer Errors
    // ========================================================================
    /// The named uniform block does not exist in the arena.
    #[error("Unknown uniform block: {0}")]
    UnknownUniformBlock(String),

    /// A uniform write exceeds the declared block size.
    #[error("Uniform block '{block}' is {size} bytes, write of {len} bytes does not fit")]
    UniformBlockOverflow {
        /// Block name
        block: String,
        /// Declared (aligned) block size in bytes
        size: u64,
        /// Attempted write length in bytes
        len: u64,
    },
}

impl From<image::ImageError> for GlintError {
    fn from(err: image::ImageError) -> Self {
        GlintError::ImageDecodeFailed(err.to_string())
    }
}

impl From<gltf::Error> for GlintError {
    fn from(err: gltf::Error) -> Self {
        GlintError::GltfError(err.to_string())
    }
}

/// Alias for `Result<T, GlintError>`.
pub type Result<T> = std::result::Result<T, GlintError>;
