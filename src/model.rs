//! Model Import
//!
//! Populates per-mesh vertex/index/material data from a glTF file via the
//! `gltf` import collaborator. Only what the shell's demos consume is
//! extracted: positions, normals, the first uv set, indices, and the
//! material's base-color texture. Everything else in the scene graph is the
//! importer's business.

use std::path::Path;

use crate::errors::Result;
use crate::gpu::context::GpuContext;
use crate::gpu::texture::{SamplerOptions, Texture2D};
use crate::mesh::{Mesh, Vertex};

/// One imported primitive: geometry plus its base-color texture.
pub struct ModelMesh {
    pub mesh: Mesh,
    /// Base-color texture, when the material has one.
    pub base_color: Option<Texture2D>,
}

/// An imported model: a flat list of drawable meshes.
pub struct Model {
    pub meshes: Vec<ModelMesh>,
}

impl Model {
    /// Imports a glTF file (`.gltf` or `.glb`) with its buffers and images.
    pub fn from_path(ctx: &GpuContext, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let (document, buffers, images) = gltf::import(path)?;

        let mut meshes = Vec::new();

        for mesh in document.meshes() {
            for primitive in mesh.primitives() {
                let reader =
                    primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| &data.0[..]));

                let positions: Vec<[f32; 3]> = reader
                    .read_positions()
                    .map(Iterator::collect)
                    .unwrap_or_default();
                let vertex_count = positions.len();
                if vertex_count == 0 {
                    continue;
                }

                let normals: Vec<[f32; 3]> = reader
                    .read_normals()
                    .map_or_else(|| vec![[0.0, 0.0, 1.0]; vertex_count], Iterator::collect);

                let uvs: Vec<[f32; 2]> = reader
                    .read_tex_coords(0)
                    .map_or_else(|| vec![[0.0, 0.0]; vertex_count], |iter| {
                        iter.into_f32().collect()
                    });

                let vertices: Vec<Vertex> = positions
                    .into_iter()
                    .zip(normals)
                    .zip(uvs)
                    .map(|((position, normal), uv)| Vertex::new(position, normal, uv))
                    .collect();

                let indices: Option<Vec<u32>> =
                    reader.read_indices().map(|iter| iter.into_u32().collect());

                let label = mesh.name().unwrap_or("gltf mesh");
                let mesh = Mesh::new(&ctx.device, label, &vertices, indices.as_deref());

                let base_color = primitive
                    .material()
                    .pbr_metallic_roughness()
                    .base_color_texture()
                    .and_then(|info| images.get(info.texture().source().index()))
                    .map(|data| upload_gltf_image(ctx, label, data));

                meshes.push(ModelMesh { mesh, base_color });
            }
        }

        log::info!(
            "Imported {} with {} mesh(es)",
            path.display(),
            meshes.len()
        );

        Ok(Self { meshes })
    }

    /// Draws every mesh in sequence.
    ///
    /// The caller is responsible for binding pipelines and textures; this
    /// only issues the geometry draws.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        for model_mesh in &self.meshes {
            model_mesh.mesh.draw(pass);
        }
    }
}

/// Converts imported image data to RGBA8 and uploads it.
///
/// Base-color textures are sRGB. Formats outside the 8-bit family fall back
/// to a white texel rather than failing the whole import.
fn upload_gltf_image(ctx: &GpuContext, label: &str, data: &gltf::image::Data) -> Texture2D {
    use gltf::image::Format;

    let pixels: Vec<u8> = match data.format {
        Format::R8G8B8A8 => data.pixels.clone(),
        Format::R8G8B8 => data
            .pixels
            .chunks_exact(3)
            .flat_map(|rgb| [rgb[0], rgb[1], rgb[2], 255])
            .collect(),
        Format::R8 => data
            .pixels
            .iter()
            .flat_map(|&r| [r, r, r, 255])
            .collect(),
        Format::R8G8 => data
            .pixels
            .chunks_exact(2)
            .flat_map(|rg| [rg[0], rg[1], 0, 255])
            .collect(),
        other => {
            log::warn!("Unsupported glTF image format {other:?} for '{label}', using white");
            return Texture2D::solid_color(ctx, label, [255, 255, 255, 255]);
        }
    };

    Texture2D::from_pixels(
        ctx,
        label,
        data.width,
        data.height,
        wgpu::TextureFormat::Rgba8UnormSrgb,
        &pixels,
        SamplerOptions::default(),
    )
}
