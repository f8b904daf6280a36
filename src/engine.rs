//! Engine Core
//!
//! [`Engine`] owns what every demo needs at runtime: the GPU context, the
//! polled input state and the frame clock. It is windowing-agnostic — the
//! winit driver in [`crate::app`] feeds it events and drives
//! [`begin_frame`](Engine::begin_frame) / [`finish_frame`](Engine::finish_frame)
//! once per redraw.

use raw_window_handle::{HasDisplayHandle, HasWindowHandle};

use crate::app::input::Input;
use crate::errors::{GlintError, Result};
use crate::gpu::context::{GpuContext, ShellSettings};

/// Per-frame timing passed to update callbacks.
#[derive(Debug, Clone, Copy)]
pub struct FrameState {
    /// Total elapsed time since startup, in seconds.
    pub time: f32,
    /// Delta time since the last frame, in seconds.
    pub dt: f32,
    /// Frames rendered since startup.
    pub frame_count: u64,
}

/// An in-flight frame: the acquired surface texture, its view and the
/// command encoder the render phase records into.
pub struct Frame {
    surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

/// Runtime state shared by every demo.
pub struct Engine {
    pub gpu: GpuContext,
    pub input: Input,

    time: f32,
    frame_count: u64,
}

impl Engine {
    /// Initializes the GPU context for a window.
    pub async fn new<W>(window: W, settings: &ShellSettings, width: u32, height: u32) -> Result<Self>
    where
        W: HasWindowHandle + HasDisplayHandle + Send + Sync + 'static,
    {
        let gpu = GpuContext::new(window, settings, width, height).await?;
        Ok(Self {
            gpu,
            input: Input::new(width, height),
            time: 0.0,
            frame_count: 0,
        })
    }

    /// Advances the frame clock. Called once per frame before user update.
    pub fn update(&mut self, dt: f32) {
        self.time += dt;
        self.frame_count += 1;
    }

    /// Handles a window resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
        self.input.handle_resize(width, height);
    }

    /// Acquires the next surface texture and opens a command encoder.
    ///
    /// A lost or outdated surface is reconfigured and the frame is skipped
    /// (`Ok(None)`); running out of memory is an error.
    pub fn begin_frame(&mut self) -> Result<Option<Frame>> {
        let surface_texture = match self.gpu.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (width, height) = self.gpu.size();
                self.gpu.resize(width, height);
                return Ok(None);
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Surface acquire timed out, skipping frame");
                return Ok(None);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                return Err(GlintError::SurfaceOutOfMemory);
            }
            Err(wgpu::SurfaceError::Other) => {
                log::error!("Surface acquire failed, skipping frame");
                return Ok(None);
            }
        };

        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        Ok(Some(Frame {
            surface_texture,
            view,
            encoder,
        }))
    }

    /// Submits the frame's commands and presents it.
    pub fn finish_frame(&mut self, frame: Frame) {
        self.gpu
            .queue
            .submit(std::iter::once(frame.encoder.finish()));
        frame.surface_texture.present();
    }

    /// Total elapsed time in seconds since startup.
    #[inline]
    #[must_use]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Frames rendered since startup.
    #[inline]
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Current surface size in pixels.
    #[inline]
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        self.gpu.size()
    }
}
