//! Mesh & Vertex Layout Tests
//!
//! Tests for:
//! - The interleaved vertex layout (stride, offsets, locations)
//! - Primitive generator invariants (cube, plane, fullscreen quad)

use glint::mesh::{Vertex, cube, fullscreen_quad, plane};

// ============================================================================
// Vertex Layout
// ============================================================================

#[test]
fn vertex_stride_matches_struct_size() {
    assert_eq!(std::mem::size_of::<Vertex>(), 32);
    assert_eq!(
        Vertex::LAYOUT.array_stride,
        std::mem::size_of::<Vertex>() as wgpu::BufferAddress
    );
    assert_eq!(Vertex::LAYOUT.step_mode, wgpu::VertexStepMode::Vertex);
}

#[test]
fn vertex_attributes_match_field_offsets() {
    let attributes = Vertex::LAYOUT.attributes;
    assert_eq!(attributes.len(), 3);

    assert_eq!(attributes[0].shader_location, 0);
    assert_eq!(attributes[0].offset, std::mem::offset_of!(Vertex, position) as u64);
    assert_eq!(attributes[0].format, wgpu::VertexFormat::Float32x3);

    assert_eq!(attributes[1].shader_location, 1);
    assert_eq!(attributes[1].offset, std::mem::offset_of!(Vertex, normal) as u64);
    assert_eq!(attributes[1].format, wgpu::VertexFormat::Float32x3);

    assert_eq!(attributes[2].shader_location, 2);
    assert_eq!(attributes[2].offset, std::mem::offset_of!(Vertex, uv) as u64);
    assert_eq!(attributes[2].format, wgpu::VertexFormat::Float32x2);
}

// ============================================================================
// Cube
// ============================================================================

#[test]
fn cube_has_24_vertices_and_36_indices() {
    let (vertices, indices) = cube();
    assert_eq!(vertices.len(), 24, "4 vertices per face, 6 faces");
    assert_eq!(indices.len(), 36, "2 triangles per face, 6 faces");
}

#[test]
fn cube_indices_stay_in_bounds() {
    let (vertices, indices) = cube();
    for &index in &indices {
        assert!(
            (index as usize) < vertices.len(),
            "Index {index} out of bounds for {} vertices",
            vertices.len()
        );
    }
}

#[test]
fn cube_positions_span_the_unit_cube() {
    let (vertices, _) = cube();
    for vertex in &vertices {
        for coordinate in vertex.position {
            assert!(coordinate.abs() <= 0.5 + f32::EPSILON);
        }
    }
}

#[test]
fn cube_normals_are_unit_axis_vectors() {
    let (vertices, _) = cube();
    for vertex in &vertices {
        let [x, y, z] = vertex.normal;
        let length_sq = x * x + y * y + z * z;
        assert!((length_sq - 1.0).abs() < f32::EPSILON);
        // Exactly one component is non-zero.
        let non_zero = [x, y, z].iter().filter(|c| **c != 0.0).count();
        assert_eq!(non_zero, 1);
    }
}

// ============================================================================
// Plane
// ============================================================================

#[test]
fn plane_is_flat_and_faces_up() {
    let (vertices, indices) = plane(10.0, 10.0);
    assert_eq!(vertices.len(), 4);
    assert_eq!(indices.len(), 6);

    for vertex in &vertices {
        assert_eq!(vertex.position[1], 0.0, "Plane vertices must sit at y = 0");
        assert_eq!(vertex.normal, [0.0, 1.0, 0.0]);
    }
}

#[test]
fn plane_uvs_tile_to_the_requested_factor() {
    let (vertices, _) = plane(10.0, 4.0);
    let max_u = vertices.iter().map(|v| v.uv[0]).fold(0.0, f32::max);
    let max_v = vertices.iter().map(|v| v.uv[1]).fold(0.0, f32::max);
    assert_eq!(max_u, 4.0);
    assert_eq!(max_v, 4.0);
}

#[test]
fn plane_extent_matches_half_extent() {
    let (vertices, _) = plane(7.5, 1.0);
    for vertex in &vertices {
        assert_eq!(vertex.position[0].abs(), 7.5);
        assert_eq!(vertex.position[2].abs(), 7.5);
    }
}

// ============================================================================
// Fullscreen Quad
// ============================================================================

#[test]
fn fullscreen_quad_covers_ndc() {
    let (vertices, indices) = fullscreen_quad();
    assert_eq!(vertices.len(), 4);
    assert_eq!(indices.len(), 6);

    for vertex in &vertices {
        assert_eq!(vertex.position[0].abs(), 1.0);
        assert_eq!(vertex.position[1].abs(), 1.0);
        assert_eq!(vertex.position[2], 0.0);
    }
}

#[test]
fn fullscreen_quad_uvs_hit_all_corners() {
    let (vertices, _) = fullscreen_quad();
    let uvs: Vec<[f32; 2]> = vertices.iter().map(|v| v.uv).collect();

    for corner in [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]] {
        assert!(uvs.contains(&corner), "Missing uv corner {corner:?}");
    }
}
