//! Textures
//!
//! [`Texture2D`] bundles a texture, its view and a sampler. Pixel data comes
//! from an image file (decoded synchronously during setup), from memory, or
//! from nothing at all for render-target attachments. Storage is never
//! resized after creation.
//!
//! Decode failures are error values. Callers that want the classic
//! tutorial behavior — keep going with a placeholder — fall back to
//! [`Texture2D::solid_color`] explicitly:
//!
//! ```rust,ignore
//! let diffuse = Texture2D::from_path(&ctx, &path, true).unwrap_or_else(|e| {
//!     log::warn!("{e}; using fallback texture");
//!     Texture2D::solid_color(&ctx, "fallback", [255, 255, 255, 255])
//! });
//! ```

use std::path::Path;

use crate::errors::{GlintError, Result};
use crate::gpu::context::GpuContext;

/// Sampler configuration shared by the texture constructors.
#[derive(Debug, Clone, Copy)]
pub struct SamplerOptions {
    pub address_mode: wgpu::AddressMode,
    pub mag_filter: wgpu::FilterMode,
    pub min_filter: wgpu::FilterMode,
}

impl Default for SamplerOptions {
    fn default() -> Self {
        Self {
            address_mode: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
        }
    }
}

impl SamplerOptions {
    /// Clamp-to-edge, nearest filtering. Used for the 1×1 fallback texture
    /// and for sampling render-target attachments.
    #[must_use]
    pub fn clamp_nearest() -> Self {
        Self {
            address_mode: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
        }
    }

    /// Clamp-to-edge with linear filtering.
    #[must_use]
    pub fn clamp_linear() -> Self {
        Self {
            address_mode: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
        }
    }

    fn create_sampler(&self, device: &wgpu::Device, label: &str) -> wgpu::Sampler {
        device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: self.address_mode,
            address_mode_v: self.address_mode,
            address_mode_w: self.address_mode,
            mag_filter: self.mag_filter,
            min_filter: self.min_filter,
            ..Default::default()
        })
    }
}

/// A 2D texture with its view and sampler.
pub struct Texture2D {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub width: u32,
    pub height: u32,
    pub format: wgpu::TextureFormat,
}

impl Texture2D {
    /// Decodes an image file and uploads it as RGBA8.
    ///
    /// `srgb` selects `Rgba8UnormSrgb` for color data; linear `Rgba8Unorm`
    /// otherwise (normal maps, data textures).
    pub fn from_path(ctx: &GpuContext, path: impl AsRef<Path>, srgb: bool) -> Result<Self> {
        let path = path.as_ref();
        let (pixels, width, height) = decode_image(path)?;

        let format = if srgb {
            wgpu::TextureFormat::Rgba8UnormSrgb
        } else {
            wgpu::TextureFormat::Rgba8Unorm
        };
        let label = path
            .file_name()
            .map_or_else(String::new, |n| n.to_string_lossy().into_owned());

        Ok(Self::from_pixels(
            ctx,
            &label,
            width,
            height,
            format,
            &pixels,
            SamplerOptions::default(),
        ))
    }

    /// Creates a texture from in-memory pixel data.
    ///
    /// `data` must be tightly packed rows of `width` texels in `format`.
    pub fn from_pixels(
        ctx: &GpuContext,
        label: &str,
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
        data: &[u8],
        sampler: SamplerOptions,
    ) -> Self {
        let texture = Self::create_storage(
            &ctx.device,
            label,
            width,
            height,
            format,
            wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        );
        upload_pixels(&ctx.queue, &texture, width, height, 0, format, data);

        Self::wrap(&ctx.device, texture, label, sampler)
    }

    /// A 1×1 single-color texture: the standard load-failure fallback.
    pub fn solid_color(ctx: &GpuContext, label: &str, color: [u8; 4]) -> Self {
        Self::from_pixels(
            ctx,
            label,
            1,
            1,
            wgpu::TextureFormat::Rgba8Unorm,
            &color,
            SamplerOptions::clamp_nearest(),
        )
    }

    /// An empty texture usable as a render-target attachment.
    pub fn attachment(
        ctx: &GpuContext,
        label: &str,
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
    ) -> Self {
        let texture = Self::create_storage(
            &ctx.device,
            label,
            width,
            height,
            format,
            wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        );
        Self::wrap(&ctx.device, texture, label, SamplerOptions::clamp_linear())
    }

    fn create_storage(
        device: &wgpu::Device,
        label: &str,
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
        usage: wgpu::TextureUsages,
    ) -> wgpu::Texture {
        device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage,
            view_formats: &[],
        })
    }

    fn wrap(
        device: &wgpu::Device,
        texture: wgpu::Texture,
        label: &str,
        sampler: SamplerOptions,
    ) -> Self {
        let width = texture.width();
        let height = texture.height();
        let format = texture.format();
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = sampler.create_sampler(device, label);
        Self {
            texture,
            view,
            sampler,
            width,
            height,
            format,
        }
    }
}

/// A cube texture built from six face images.
pub struct CubeTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub size: u32,
}

impl CubeTexture {
    /// Loads six faces in +X, −X, +Y, −Y, +Z, −Z order.
    ///
    /// Every face must decode, be square, and agree in size with the others.
    pub fn from_paths(
        ctx: &GpuContext,
        label: &str,
        faces: &[impl AsRef<Path>; 6],
        srgb: bool,
    ) -> Result<Self> {
        let mut decoded = Vec::with_capacity(6);
        for face in faces {
            decoded.push(decode_image(face.as_ref())?);
        }

        let dimensions: Vec<(u32, u32)> = decoded.iter().map(|(_, w, h)| (*w, *h)).collect();
        let (width, height) = validate_cube_faces(&dimensions)?;

        let format = if srgb {
            wgpu::TextureFormat::Rgba8UnormSrgb
        } else {
            wgpu::TextureFormat::Rgba8Unorm
        };

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 6,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (layer, (pixels, ..)) in decoded.iter().enumerate() {
            upload_pixels(&ctx.queue, &texture, width, height, layer as u32, format, pixels);
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some(label),
            dimension: Some(wgpu::TextureViewDimension::Cube),
            ..Default::default()
        });
        let sampler = SamplerOptions::clamp_linear().create_sampler(&ctx.device, label);

        Ok(Self {
            texture,
            view,
            sampler,
            size: width,
        })
    }
}

/// Checks that six cube faces are square and agree in size.
///
/// Returns the shared face dimensions. Pure; exposed for tests.
pub fn validate_cube_faces(dimensions: &[(u32, u32)]) -> Result<(u32, u32)> {
    let Some(&(width, height)) = dimensions.first() else {
        return Err(GlintError::CubeMapInvalid("no faces".to_string()));
    };
    if dimensions.len() != 6 {
        return Err(GlintError::CubeMapInvalid(format!(
            "expected 6 faces, got {}",
            dimensions.len()
        )));
    }
    if width != height {
        return Err(GlintError::CubeMapInvalid(format!(
            "faces must be square, got {width}x{height}"
        )));
    }
    for (i, (w, h)) in dimensions.iter().enumerate() {
        if (*w, *h) != (width, height) {
            return Err(GlintError::CubeMapInvalid(format!(
                "face {i} is {w}x{h}, expected {width}x{height}"
            )));
        }
    }
    Ok((width, height))
}

/// Decodes an image file to tightly packed RGBA8 pixels.
///
/// Pure with respect to the GPU; exposed for the loaders and for tests.
pub fn decode_image(path: &Path) -> Result<(Vec<u8>, u32, u32)> {
    let image = image::open(path)
        .map_err(|e| GlintError::ImageDecodeFailed(format!("{}: {e}", path.display())))?
        .to_rgba8();
    let (width, height) = image.dimensions();
    Ok((image.into_raw(), width, height))
}

fn upload_pixels(
    queue: &wgpu::Queue,
    texture: &wgpu::Texture,
    width: u32,
    height: u32,
    layer: u32,
    format: wgpu::TextureFormat,
    data: &[u8],
) {
    let bytes_per_pixel = format
        .block_copy_size(Some(wgpu::TextureAspect::All))
        .unwrap_or(4);
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d {
                x: 0,
                y: 0,
                z: layer,
            },
            aspect: wgpu::TextureAspect::All,
        },
        data,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(width * bytes_per_pixel),
            rows_per_image: Some(height),
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );
}
