//! Fly Camera
//!
//! A free-roaming camera controlled by yaw/pitch rotation and camera-space
//! translation axes. View, inverse-view and projection matrices are cached
//! behind dirty flags and recomputed only when the pose or the projection
//! parameters change, so repeated reads between mutations return identical
//! matrices.

use glam::{Mat4, Vec3, Vec4};

/// Pitch is clamped to ±(π/2 − `PITCH_MARGIN`) to keep the forward vector
/// away from the world up axis.
pub const PITCH_MARGIN: f32 = 0.1;

/// Lower bound of the vertical field of view, in degrees.
pub const MIN_FOV_DEG: f32 = 1.0;
/// Upper bound of the vertical field of view, in degrees.
pub const MAX_FOV_DEG: f32 = 45.0;

const WORLD_UP: Vec3 = Vec3::Y;

/// Free-roaming fly camera.
///
/// Orientation is a Tait-Bryan yaw/pitch pair (no roll); yaw starts at −π/2
/// so the initial forward direction is −Z. The projection is a right-handed
/// perspective with depth in [0, 1], matching wgpu's NDC conventions.
#[derive(Debug, Clone)]
pub struct FlyCamera {
    yaw: f32,
    pitch: f32,

    fov: f32,
    aspect: f32,
    z_near: f32,
    z_far: f32,

    position: Vec3,
    forward: Vec3,

    view_matrix: Mat4,
    view_dirty: bool,

    inverse_view_matrix: Mat4,
    inverse_view_dirty: bool,

    projection_matrix: Mat4,
    projection_dirty: bool,
}

impl FlyCamera {
    /// Creates a camera at `position` looking down −Z.
    ///
    /// `fov` is the vertical field of view in radians.
    #[must_use]
    pub fn new(position: Vec3, fov: f32, aspect: f32, z_near: f32, z_far: f32) -> Self {
        Self {
            yaw: -std::f32::consts::FRAC_PI_2, // -90 deg, facing -Z
            pitch: 0.0,
            fov,
            aspect,
            z_near,
            z_far,
            position,
            forward: Vec3::new(0.0, 0.0, -1.0),
            view_matrix: Mat4::IDENTITY,
            view_dirty: true,
            inverse_view_matrix: Mat4::IDENTITY,
            inverse_view_dirty: true,
            projection_matrix: Mat4::IDENTITY,
            projection_dirty: true,
        }
    }

    // ------------------------------------------------------------------
    // Pose
    // ------------------------------------------------------------------

    /// Applies a yaw/pitch rotation delta, in radians.
    ///
    /// Pitch is clamped to ±(π/2 − [`PITCH_MARGIN`]) regardless of the
    /// cumulative input magnitude; the clamp is idempotent and leaves
    /// in-range values untouched.
    pub fn rotate_tait_bryan(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw += yaw_delta;
        self.pitch += pitch_delta;

        let limit = std::f32::consts::FRAC_PI_2 - PITCH_MARGIN;
        self.pitch = self.pitch.clamp(-limit, limit);

        self.forward = Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
        .normalize();

        self.view_dirty = true;
    }

    /// Points the camera at a world-space target.
    pub fn look_at(&mut self, target: Vec3) {
        self.forward = (target - self.position).normalize();
        // Keep yaw/pitch consistent with the new forward vector so a later
        // rotate_tait_bryan continues from here.
        self.pitch = self.forward.y.asin();
        self.yaw = self.forward.z.atan2(self.forward.x);
        self.view_dirty = true;
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.view_dirty = true;
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    /// Current pitch, in radians. Always within ±(π/2 − [`PITCH_MARGIN`]).
    #[inline]
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Adds a world-space translation to the camera position.
    pub fn translate(&mut self, translation: Vec3) {
        self.position += translation;
        self.view_dirty = true;
    }

    /// Transforms a camera-space direction into world space.
    ///
    /// Uses the rotation part of the inverse view matrix (w = 0), so the
    /// camera position does not leak into the result.
    pub fn transform_direction(&mut self, dir: Vec3) -> Vec3 {
        let world = self.inverse_view_matrix() * Vec4::new(dir.x, dir.y, dir.z, 0.0);
        world.truncate()
    }

    /// Moves the camera along the combined input axes.
    ///
    /// `front` and `right` are camera-space axes (each typically −1, 0 or
    /// +1; forward is −Z, so "move forward" is `front = -1`). The combined
    /// direction is normalized when non-zero, scaled by `speed * dt`,
    /// transformed to world space and added to the position. Zero axes leave
    /// the position unchanged for any `dt`.
    pub fn move_axes(&mut self, front: f32, right: f32, speed: f32, dt: f32) {
        if front == 0.0 && right == 0.0 {
            return;
        }
        let dir_cam_space = Vec3::new(right, 0.0, front).normalize();
        let dir_world_space = self.transform_direction(dir_cam_space);
        self.translate(dir_world_space * speed * dt);
    }

    // ------------------------------------------------------------------
    // Projection
    // ------------------------------------------------------------------

    /// Sets the vertical field of view, in radians.
    pub fn set_fov(&mut self, fov: f32) {
        self.fov = fov;
        self.projection_dirty = true;
    }

    /// Vertical field of view, in radians.
    #[inline]
    #[must_use]
    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Narrows or widens the field of view by a scroll delta, in degrees.
    ///
    /// The resulting fov is clamped to [[`MIN_FOV_DEG`], [`MAX_FOV_DEG`]].
    pub fn zoom(&mut self, scroll_delta: f32) {
        let fov_deg = (self.fov.to_degrees() - scroll_delta).clamp(MIN_FOV_DEG, MAX_FOV_DEG);
        self.set_fov(fov_deg.to_radians());
    }

    /// Updates the aspect ratio, typically after a window resize.
    /// A no-op when the value is unchanged, so per-frame calls do not
    /// invalidate the projection cache.
    pub fn set_aspect(&mut self, aspect: f32) {
        if (self.aspect - aspect).abs() > f32::EPSILON {
            self.aspect = aspect;
            self.projection_dirty = true;
        }
    }

    // ------------------------------------------------------------------
    // Matrices (cached)
    // ------------------------------------------------------------------

    /// View matrix (world → camera). Cached until the pose changes.
    pub fn view_matrix(&mut self) -> Mat4 {
        if self.view_dirty {
            self.view_matrix =
                Mat4::look_at_rh(self.position, self.position + self.forward, WORLD_UP);
            self.view_dirty = false;
            self.inverse_view_dirty = true;
        }
        self.view_matrix
    }

    /// Inverse view matrix (camera → world). Cached until the pose changes.
    pub fn inverse_view_matrix(&mut self) -> Mat4 {
        if self.view_dirty || self.inverse_view_dirty {
            let view = self.view_matrix();
            self.inverse_view_matrix = view.inverse();
            self.inverse_view_dirty = false;
        }
        self.inverse_view_matrix
    }

    /// Projection matrix. Right-handed, depth range [0, 1] (wgpu NDC; the
    /// OpenGL convention would be [-1, 1]).
    pub fn projection_matrix(&mut self) -> Mat4 {
        if self.projection_dirty {
            self.projection_matrix =
                Mat4::perspective_rh(self.fov, self.aspect, self.z_near, self.z_far);
            self.projection_dirty = false;
        }
        self.projection_matrix
    }

    /// Combined view-projection matrix (P × V).
    pub fn view_projection(&mut self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
