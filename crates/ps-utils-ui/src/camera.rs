//! Orbit camera for the scene view.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use glam::{Mat4, Vec3};

const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;
const MIN_DISTANCE: f32 = 1e-3;
/// Distance (or ortho scale) factor applied per zoom step.
const ZOOM_STEP: f32 = 0.9;

/// Camera projection mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectionMode {
    /// Perspective projection.
    #[default]
    Perspective,
    /// Orthographic projection.
    Orthographic,
}

/// A turntable camera orbiting `target` with +Y up.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Point the camera orbits and looks at.
    pub target: Vec3,
    /// Distance from the target.
    pub distance: f32,
    /// Rotation about +Y, in radians. Zero looks down -Z.
    pub yaw: f32,
    /// Elevation above the XZ plane, in radians.
    pub pitch: f32,
    /// Vertical field of view in radians.
    pub fov: f32,
    /// Aspect ratio (width / height).
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
    pub projection_mode: ProjectionMode,
    /// Half-height of the orthographic view volume.
    pub ortho_scale: f32,
}

impl Camera {
    #[must_use]
    pub fn new(aspect_ratio: f32) -> Self {
        Self {
            target: Vec3::ZERO,
            distance: 3.0,
            yaw: 0.0,
            pitch: 0.0,
            fov: FRAC_PI_4,
            aspect_ratio,
            near: 0.01,
            far: 1000.0,
            projection_mode: ProjectionMode::Perspective,
            ortho_scale: 1.0,
        }
    }

    /// Camera position in world space.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target + self.distance * Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }

    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        match self.projection_mode {
            ProjectionMode::Perspective => {
                Mat4::perspective_rh(self.fov, self.aspect_ratio, self.near, self.far)
            }
            ProjectionMode::Orthographic => {
                let half_height = self.ortho_scale;
                let half_width = half_height * self.aspect_ratio;
                // symmetric depth range around the eye so nothing near the target clips
                let depth = (self.distance + self.far).max(self.ortho_scale * 100.0);
                Mat4::orthographic_rh(
                    -half_width,
                    half_width,
                    -half_height,
                    half_height,
                    -depth,
                    depth,
                )
            }
        }
    }

    #[must_use]
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Unit vector from the camera towards the target.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position()).normalize_or_zero()
    }

    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize_or_zero()
    }

    /// Camera-space up vector.
    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }

    /// Rotates around the target by `delta_yaw`/`delta_pitch` radians.
    pub fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw -= delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Moves the target within the view plane. Deltas are fractions of the
    /// view height.
    pub fn pan(&mut self, delta_x: f32, delta_y: f32) {
        let extent = match self.projection_mode {
            ProjectionMode::Perspective => 2.0 * self.distance * (self.fov * 0.5).tan(),
            ProjectionMode::Orthographic => 2.0 * self.ortho_scale,
        };
        self.target += (self.right() * delta_x + self.up() * delta_y) * extent;
    }

    /// Zooms by `steps`; positive values move in.
    pub fn zoom(&mut self, steps: f32) {
        let factor = ZOOM_STEP.powf(steps);
        match self.projection_mode {
            ProjectionMode::Perspective => {
                self.distance = (self.distance * factor).max(MIN_DISTANCE);
            }
            ProjectionMode::Orthographic => {
                self.ortho_scale = (self.ortho_scale * factor).clamp(0.01, 1000.0);
            }
        }
    }

    /// Frames the axis-aligned box `[min, max]`.
    pub fn look_at_box(&mut self, min: Vec3, max: Vec3) {
        let radius = ((max - min).length() * 0.5).max(MIN_DISTANCE);
        self.target = (min + max) * 0.5;
        self.distance = radius / (self.fov * 0.5).sin() * 1.1;
        self.near = radius * 0.001;
        self.far = self.distance + radius * 100.0;
        self.ortho_scale = radius * 1.1;
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        if aspect_ratio.is_finite() && aspect_ratio > 0.0 {
            self.aspect_ratio = aspect_ratio;
        }
    }

    pub fn set_projection_mode(&mut self, mode: ProjectionMode) {
        self.projection_mode = mode;
    }

    /// Sets the field of view in radians.
    pub fn set_fov(&mut self, fov: f32) {
        self.fov = fov.clamp(0.1, std::f32::consts::PI - 0.1);
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(16.0 / 9.0)
    }
}
