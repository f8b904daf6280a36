//! Resource Loading Tests
//!
//! Tests for:
//! - Executable-relative resource path layout
//! - Shader source reads failing as error values, not panics
//! - Image decode failure for missing files
//! - The explicit load-failure fallback pattern

use glint::errors::GlintError;
use glint::gpu::shader::read_shader_source;
use glint::gpu::texture::{decode_image, validate_cube_faces};
use glint::resources;

// ============================================================================
// Path Layout
// ============================================================================

#[test]
fn texture_paths_land_under_resources_textures() {
    let path = resources::texture_path("container.jpg");
    assert!(path.ends_with("resources/textures/container.jpg"), "got {path:?}");
}

#[test]
fn model_paths_land_under_resources_models() {
    let path = resources::model_path("backpack.glb");
    assert!(path.ends_with("resources/models/backpack.glb"), "got {path:?}");
}

#[test]
fn cubemap_paths_include_the_set_directory() {
    let path = resources::cubemap_path("skybox", "px.png");
    assert!(path.ends_with("resources/cubemaps/skybox/px.png"), "got {path:?}");
}

#[test]
fn shader_paths_sit_alongside_the_executable() {
    let path = resources::shader_path("triangle.wgsl");
    assert_eq!(path.parent().unwrap(), resources::exec_dir());
    assert!(path.ends_with("triangle.wgsl"));
}

// ============================================================================
// Missing Files
// ============================================================================

#[test]
fn missing_shader_file_is_an_io_error_carrying_the_path() {
    let result = read_shader_source("definitely/not/here.wgsl");

    match result {
        Err(GlintError::Io { path, .. }) => {
            assert!(path.ends_with("definitely/not/here.wgsl"));
        }
        other => panic!("Expected an Io error, got {other:?}"),
    }
}

#[test]
fn missing_shader_error_message_names_the_file() {
    let message = read_shader_source("no_such_shader.wgsl")
        .unwrap_err()
        .to_string();
    assert!(
        message.contains("no_such_shader.wgsl"),
        "Error message should name the file: {message}"
    );
}

#[test]
fn missing_image_is_an_error_not_a_panic() {
    let result = decode_image(std::path::Path::new("missing_texture.png"));
    assert!(matches!(result, Err(GlintError::ImageDecodeFailed(_))));
}

/// The tutorial-style "keep going with a placeholder" pattern: a missing
/// resource must not abort setup.
#[test]
fn setup_completes_with_a_fallback_source() {
    let source = read_shader_source("missing.wgsl")
        .unwrap_or_else(|_| String::from("// fallback shader"));
    assert_eq!(source, "// fallback shader");
}

// ============================================================================
// Cube Face Validation
// ============================================================================

#[test]
fn matching_square_faces_validate() {
    let faces = [(256, 256); 6];
    assert_eq!(validate_cube_faces(&faces).unwrap(), (256, 256));
}

#[test]
fn mismatched_face_size_is_rejected() {
    let mut faces = [(256, 256); 6];
    faces[3] = (128, 128);

    let message = validate_cube_faces(&faces).unwrap_err().to_string();
    assert!(message.contains("face 3"), "got: {message}");
}

#[test]
fn non_square_faces_are_rejected() {
    let faces = [(256, 128); 6];
    assert!(matches!(
        validate_cube_faces(&faces),
        Err(GlintError::CubeMapInvalid(_))
    ));
}

#[test]
fn wrong_face_count_is_rejected() {
    let faces = [(64, 64); 5];
    assert!(validate_cube_faces(&faces).is_err());
}

// ============================================================================
// Round Trip
// ============================================================================

#[test]
fn decode_image_reads_back_written_pixels() {
    let path = std::env::temp_dir().join("glint_decode_test.png");

    let mut img = image::RgbaImage::new(2, 2);
    img.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
    img.put_pixel(1, 0, image::Rgba([0, 255, 0, 255]));
    img.put_pixel(0, 1, image::Rgba([0, 0, 255, 255]));
    img.put_pixel(1, 1, image::Rgba([255, 255, 255, 255]));
    img.save(&path).expect("write temp png");

    let (pixels, width, height) = decode_image(&path).expect("decode temp png");
    assert_eq!((width, height), (2, 2));
    assert_eq!(pixels.len(), 16);
    assert_eq!(&pixels[0..4], &[255, 0, 0, 255]);

    let _ = std::fs::remove_file(&path);
}
