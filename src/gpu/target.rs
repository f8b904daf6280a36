//! Render Targets
//!
//! An off-screen render target: a fixed set of color attachment slots and an
//! optional depth attachment, each backed by an attachment-usage
//! [`Texture2D`]. Completeness is validated exactly once, when the builder
//! assembles the target — a terminal check, not a reactive one. An
//! incomplete target is an error value, never a half-configured object.

use crate::errors::{GlintError, Result};
use crate::gpu::texture::Texture2D;

/// Upper bound on color attachment slots (wgpu's own limit).
pub const MAX_COLOR_ATTACHMENTS: usize = 8;

/// Builder collecting attachments for a [`RenderTarget`].
#[derive(Default)]
pub struct RenderTargetBuilder {
    label: String,
    colors: Vec<Texture2D>,
    depth: Option<Texture2D>,
}

impl RenderTargetBuilder {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            colors: Vec::new(),
            depth: None,
        }
    }

    /// Adds a color attachment. Slots are assigned in call order.
    #[must_use]
    pub fn color(mut self, texture: Texture2D) -> Self {
        self.colors.push(texture);
        self
    }

    /// Sets the depth attachment.
    #[must_use]
    pub fn depth(mut self, texture: Texture2D) -> Self {
        self.depth = Some(texture);
        self
    }

    /// Validates completeness and assembles the target.
    ///
    /// A complete target has at least one attachment, every attachment
    /// agrees in dimensions, color slots carry color formats and the depth
    /// slot carries a depth format.
    pub fn build(self) -> Result<RenderTarget> {
        let incomplete = |reason: String| GlintError::RenderTargetIncomplete(reason);

        if self.colors.is_empty() && self.depth.is_none() {
            return Err(incomplete(format!("'{}' has no attachments", self.label)));
        }
        if self.colors.len() > MAX_COLOR_ATTACHMENTS {
            return Err(incomplete(format!(
                "'{}' has {} color attachments, limit is {MAX_COLOR_ATTACHMENTS}",
                self.label,
                self.colors.len()
            )));
        }

        let (width, height) = self
            .colors
            .first()
            .or(self.depth.as_ref())
            .map(|t| (t.width, t.height))
            .expect("checked non-empty above");

        for (slot, tex) in self.colors.iter().enumerate() {
            if tex.format.is_depth_stencil_format() {
                return Err(incomplete(format!(
                    "color slot {slot} of '{}' holds depth format {:?}",
                    self.label, tex.format
                )));
            }
            if (tex.width, tex.height) != (width, height) {
                return Err(incomplete(format!(
                    "color slot {slot} of '{}' is {}x{}, expected {width}x{height}",
                    self.label, tex.width, tex.height
                )));
            }
        }

        if let Some(depth) = &self.depth {
            if !depth.format.is_depth_stencil_format() {
                return Err(incomplete(format!(
                    "depth slot of '{}' holds color format {:?}",
                    self.label, depth.format
                )));
            }
            if (depth.width, depth.height) != (width, height) {
                return Err(incomplete(format!(
                    "depth slot of '{}' is {}x{}, expected {width}x{height}",
                    self.label, depth.width, depth.height
                )));
            }
        }

        Ok(RenderTarget {
            label: self.label,
            colors: self.colors,
            depth: self.depth,
            width,
            height,
        })
    }
}

/// A validated off-screen render target.
pub struct RenderTarget {
    label: String,
    colors: Vec<Texture2D>,
    depth: Option<Texture2D>,
    width: u32,
    height: u32,
}

impl RenderTarget {
    #[inline]
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The color texture in `slot`, for sampling in a later pass.
    #[must_use]
    pub fn color(&self, slot: usize) -> Option<&Texture2D> {
        self.colors.get(slot)
    }

    #[must_use]
    pub fn depth(&self) -> Option<&Texture2D> {
        self.depth.as_ref()
    }

    /// Pass attachment for the color texture in `slot`.
    #[must_use]
    pub fn color_attachment(
        &self,
        slot: usize,
        load: wgpu::LoadOp<wgpu::Color>,
    ) -> Option<wgpu::RenderPassColorAttachment<'_>> {
        self.colors
            .get(slot)
            .map(|tex| wgpu::RenderPassColorAttachment {
                view: &tex.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })
    }

    /// Pass attachment for the depth texture, clearing to `clear_depth`.
    #[must_use]
    pub fn depth_attachment(
        &self,
        clear_depth: f32,
    ) -> Option<wgpu::RenderPassDepthStencilAttachment<'_>> {
        self.depth
            .as_ref()
            .map(|tex| wgpu::RenderPassDepthStencilAttachment {
                view: &tex.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear_depth),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            })
    }
}
