//! GPU Context
//!
//! [`GpuContext`] holds the core GPU handles: device, queue, surface and
//! surface configuration. It owns window-surface management, resize
//! handling and the depth buffer, which is recreated whenever the surface
//! size changes.

use raw_window_handle::{HasDisplayHandle, HasWindowHandle};

use crate::errors::{GlintError, Result};
use crate::gpu::debug;

/// Compiled-in shell configuration.
///
/// There is no CLI surface and no environment configuration; every demo
/// bakes its settings in at compile time.
#[derive(Debug, Clone)]
pub struct ShellSettings {
    /// Initial window width in physical pixels.
    pub width: u32,
    /// Initial window height in physical pixels.
    pub height: u32,
    /// Cap the frame rate to the display refresh rate.
    pub vsync: bool,
    /// GPU adapter selection strategy.
    pub power_preference: wgpu::PowerPreference,
    /// Clear color for the main render target.
    pub clear_color: wgpu::Color,
    /// Depth buffer texture format.
    pub depth_format: wgpu::TextureFormat,
}

impl Default for ShellSettings {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 900,
            vsync: true,
            power_preference: wgpu::PowerPreference::HighPerformance,
            clear_color: wgpu::Color {
                r: 0.1,
                g: 0.1,
                b: 0.1,
                a: 1.0,
            },
            depth_format: wgpu::TextureFormat::Depth32Float,
        }
    }
}

/// Core wgpu context holding GPU handles.
pub struct GpuContext {
    /// The wgpu device for GPU operations
    pub device: wgpu::Device,
    /// The command queue for submitting work
    pub queue: wgpu::Queue,
    /// The window surface for presentation
    pub surface: wgpu::Surface<'static>,
    /// Surface configuration
    pub config: wgpu::SurfaceConfiguration,

    /// Depth buffer format
    pub depth_format: wgpu::TextureFormat,
    /// Depth buffer texture view (recreated on resize)
    depth_texture_view: wgpu::TextureView,
    /// Clear color for the frame
    pub clear_color: wgpu::Color,
}

impl GpuContext {
    /// Creates the surface, selects an adapter and opens a device.
    ///
    /// Every failure along the way is an error value; there is no retry.
    pub async fn new<W>(window: W, settings: &ShellSettings, width: u32, height: u32) -> Result<Self>
    where
        W: HasWindowHandle + HasDisplayHandle + Send + Sync + 'static,
    {
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: settings.power_preference,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| GlintError::AdapterRequestFailed(e.to_string()))?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::Performance,
                ..Default::default()
            })
            .await?;

        debug::install_error_hook(&device);

        let mut config = surface
            .get_default_config(&adapter, width, height)
            .ok_or_else(|| {
                GlintError::AdapterRequestFailed("Surface not supported by adapter".to_string())
            })?;

        config.present_mode = if settings.vsync {
            wgpu::PresentMode::AutoVsync
        } else {
            wgpu::PresentMode::AutoNoVsync
        };
        surface.configure(&device, &config);

        let depth_texture_view = Self::create_depth_texture(&device, &config, settings.depth_format);

        Ok(Self {
            device,
            queue,
            surface,
            config,
            depth_format: settings.depth_format,
            depth_texture_view,
            clear_color: settings.clear_color,
        })
    }

    /// Reconfigures the surface and rebuilds the depth buffer.
    ///
    /// Zero dimensions (minimized window) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.depth_texture_view =
                Self::create_depth_texture(&self.device, &self.config, self.depth_format);
        }
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        format: wgpu::TextureFormat,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: config.width,
                height: config.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    /// Returns the surface color format.
    #[must_use]
    pub fn color_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Returns the depth texture view for the window surface.
    #[inline]
    #[must_use]
    pub fn depth_view(&self) -> &wgpu::TextureView {
        &self.depth_texture_view
    }

    /// Returns the current surface dimensions.
    #[inline]
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Surface aspect ratio (width / height).
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.config.width as f32 / self.config.height.max(1) as f32
    }
}
