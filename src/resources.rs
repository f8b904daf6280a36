//! Resource Path Layout
//!
//! Resources live in a fixed directory layout resolved relative to the
//! executable's own location at startup:
//!
//! ```text
//! <bin>/              shaders sit alongside the executable
//! <bin>/../resources/
//!     textures/
//!     models/
//!     cubemaps/<set>/
//! ```
//!
//! These functions only build paths; whether the file exists is the
//! loader's concern (and a `Result` there).

use std::path::{Path, PathBuf};

/// Directory containing the running executable.
///
/// Falls back to the current directory when the executable path cannot be
/// queried.
#[must_use]
pub fn exec_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Root of the resource tree: `<bin>/../resources`.
#[must_use]
pub fn resource_root() -> PathBuf {
    exec_dir().join("..").join("resources")
}

/// Path of a texture image: `resources/textures/<name>`.
#[must_use]
pub fn texture_path(name: impl AsRef<Path>) -> PathBuf {
    resource_root().join("textures").join(name)
}

/// Path of a model file: `resources/models/<name>`.
#[must_use]
pub fn model_path(name: impl AsRef<Path>) -> PathBuf {
    resource_root().join("models").join(name)
}

/// Path of one cube-map face: `resources/cubemaps/<set>/<face>`.
#[must_use]
pub fn cubemap_path(set: impl AsRef<Path>, face: impl AsRef<Path>) -> PathBuf {
    resource_root().join("cubemaps").join(set).join(face)
}

/// Path of a shader source file, resolved alongside the executable.
#[must_use]
pub fn shader_path(name: impl AsRef<Path>) -> PathBuf {
    exec_dir().join(name)
}
