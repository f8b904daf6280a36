//! Meshes & Vertex Layouts
//!
//! [`Vertex`] is the interleaved attribute layout shared by every mesh:
//! position, normal, uv. The layout is declared once as a constant and
//! handed to pipeline creation, where wgpu checks it against the shader's
//! input declarations.
//!
//! [`Mesh`] owns a vertex buffer and an optional index buffer; a draw call
//! binds them and issues exactly one `draw` or `draw_indexed`.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

/// Interleaved vertex attributes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

    /// Vertex buffer layout matching the attribute declaration above.
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &Self::ATTRIBUTES,
    };

    #[must_use]
    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }
}

/// A vertex buffer with an optional index buffer.
pub struct Mesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: Option<wgpu::Buffer>,
    vertex_count: u32,
    index_count: u32,
}

impl Mesh {
    /// Uploads vertex (and optionally index) data.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        vertices: &[Vertex],
        indices: Option<&[u32]>,
    ) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = indices.map(|indices| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            })
        });

        Self {
            vertex_buffer,
            index_buffer,
            vertex_count: vertices.len() as u32,
            index_count: indices.map_or(0, <[u32]>::len) as u32,
        }
    }

    /// Binds the buffers and issues one draw call.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        self.draw_instanced(pass, 0..1);
    }

    /// Instanced variant of [`draw`](Self::draw).
    pub fn draw_instanced(&self, pass: &mut wgpu::RenderPass<'_>, instances: std::ops::Range<u32>) {
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        if let Some(index_buffer) = &self.index_buffer {
            pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            pass.draw_indexed(0..self.index_count, 0, instances);
        } else {
            pass.draw(0..self.vertex_count, instances);
        }
    }

    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    #[inline]
    #[must_use]
    pub fn index_count(&self) -> u32 {
        self.index_count
    }
}

// ---------------------------------------------------------------------------
// Primitive generators
// ---------------------------------------------------------------------------

/// A unit cube centered on the origin: 24 vertices (4 per face, so normals
/// and uvs stay per-face), 36 indices.
#[must_use]
pub fn cube() -> (Vec<Vertex>, Vec<u32>) {
    // (normal, face corners in CCW order seen from outside)
    const FACES: [([f32; 3], [[f32; 3]; 4]); 6] = [
        // +Z
        (
            [0.0, 0.0, 1.0],
            [
                [-0.5, -0.5, 0.5],
                [0.5, -0.5, 0.5],
                [0.5, 0.5, 0.5],
                [-0.5, 0.5, 0.5],
            ],
        ),
        // -Z
        (
            [0.0, 0.0, -1.0],
            [
                [0.5, -0.5, -0.5],
                [-0.5, -0.5, -0.5],
                [-0.5, 0.5, -0.5],
                [0.5, 0.5, -0.5],
            ],
        ),
        // +X
        (
            [1.0, 0.0, 0.0],
            [
                [0.5, -0.5, 0.5],
                [0.5, -0.5, -0.5],
                [0.5, 0.5, -0.5],
                [0.5, 0.5, 0.5],
            ],
        ),
        // -X
        (
            [-1.0, 0.0, 0.0],
            [
                [-0.5, -0.5, -0.5],
                [-0.5, -0.5, 0.5],
                [-0.5, 0.5, 0.5],
                [-0.5, 0.5, -0.5],
            ],
        ),
        // +Y
        (
            [0.0, 1.0, 0.0],
            [
                [-0.5, 0.5, 0.5],
                [0.5, 0.5, 0.5],
                [0.5, 0.5, -0.5],
                [-0.5, 0.5, -0.5],
            ],
        ),
        // -Y
        (
            [0.0, -1.0, 0.0],
            [
                [-0.5, -0.5, -0.5],
                [0.5, -0.5, -0.5],
                [0.5, -0.5, 0.5],
                [-0.5, -0.5, 0.5],
            ],
        ),
    ];
    const CORNER_UVS: [[f32; 2]; 4] = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (normal, corners) in FACES {
        let base = vertices.len() as u32;
        for (corner, uv) in corners.iter().zip(CORNER_UVS) {
            vertices.push(Vertex::new(*corner, normal, uv));
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    (vertices, indices)
}

/// A ground plane in the XZ plane, facing +Y, with tiled uvs.
#[must_use]
pub fn plane(half_extent: f32, uv_tiling: f32) -> (Vec<Vertex>, Vec<u32>) {
    let e = half_extent;
    let t = uv_tiling;
    let normal = [0.0, 1.0, 0.0];

    let vertices = vec![
        Vertex::new([-e, 0.0, e], normal, [0.0, t]),
        Vertex::new([e, 0.0, e], normal, [t, t]),
        Vertex::new([e, 0.0, -e], normal, [t, 0.0]),
        Vertex::new([-e, 0.0, -e], normal, [0.0, 0.0]),
    ];
    let indices = vec![0, 1, 2, 0, 2, 3];

    (vertices, indices)
}

/// A quad covering the whole surface in NDC, uv origin at the top left.
/// Used by post-process passes.
#[must_use]
pub fn fullscreen_quad() -> (Vec<Vertex>, Vec<u32>) {
    let normal = [0.0, 0.0, 1.0];

    let vertices = vec![
        Vertex::new([-1.0, -1.0, 0.0], normal, [0.0, 1.0]),
        Vertex::new([1.0, -1.0, 0.0], normal, [1.0, 1.0]),
        Vertex::new([1.0, 1.0, 0.0], normal, [1.0, 0.0]),
        Vertex::new([-1.0, 1.0, 0.0], normal, [0.0, 0.0]),
    ];
    let indices = vec![0, 1, 2, 0, 2, 3];

    (vertices, indices)
}
