//! Shader Programs
//!
//! A [`ShaderProgram`] is a validated WGSL module. Compilation happens
//! inside a validation error scope so compiler diagnostics surface as error
//! values at construction time; a program with an invalid handle is never
//! handed back to the caller.
//!
//! One WGSL module carries both stages (`vs_main` / `fs_main` by
//! convention); a pipeline may still take its vertex and fragment stages
//! from two different programs.

use std::borrow::Cow;
use std::path::Path;

use crate::errors::{GlintError, Result};

/// Default vertex entry point name.
pub const VS_ENTRY: &str = "vs_main";
/// Default fragment entry point name.
pub const FS_ENTRY: &str = "fs_main";

/// A compiled, validated shader module.
pub struct ShaderProgram {
    module: wgpu::ShaderModule,
    label: String,
}

impl ShaderProgram {
    /// Reads a WGSL source file and compiles it.
    ///
    /// The file name becomes the program label. I/O failures carry the path;
    /// compile failures carry the compiler diagnostic.
    pub fn from_wgsl_path(device: &wgpu::Device, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = read_shader_source(path)?;
        let label = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        Self::from_wgsl_source(device, &label, &source)
    }

    /// Compiles WGSL source text.
    pub fn from_wgsl_source(device: &wgpu::Device, label: &str, source: &str) -> Result<Self> {
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(source)),
        });

        if let Some(error) = pollster::block_on(device.pop_error_scope()) {
            return Err(GlintError::ShaderCompileFailed {
                label: label.to_string(),
                message: error.to_string(),
            });
        }

        Ok(Self {
            module,
            label: label.to_string(),
        })
    }

    #[inline]
    #[must_use]
    pub fn module(&self) -> &wgpu::ShaderModule {
        &self.module
    }

    #[inline]
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Reads a shader source file into a string.
///
/// Split out of [`ShaderProgram::from_wgsl_path`] so the read path is usable
/// (and testable) without a device.
pub fn read_shader_source(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|source| GlintError::Io {
        path: path.to_path_buf(),
        source,
    })
}
