//! Transform gizmo driven by a [`ControlMode`].

use egui::{Rect, Ui};
use glam::{DMat4, DQuat, DVec3, EulerRot, Mat4, Quat, Vec3};
use ps_utils_core::{key_control_mode, ControlMode, Key, KeyRepeatHandler};
use transform_gizmo_egui::math::Transform;
use transform_gizmo_egui::{mint, Gizmo, GizmoConfig, GizmoExt, GizmoMode, GizmoOrientation};

use crate::sliders::enum_slider;

/// A gizmo manipulating one model matrix.
pub struct TransformGizmo {
    gizmo: Gizmo,
    mode: ControlMode,
    orientation: GizmoOrientation,
}

impl Default for TransformGizmo {
    fn default() -> Self {
        Self::new(ControlMode::default())
    }
}

impl TransformGizmo {
    pub fn new(mode: ControlMode) -> Self {
        Self {
            gizmo: Gizmo::default(),
            mode,
            orientation: GizmoOrientation::Global,
        }
    }

    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ControlMode) {
        if self.mode != mode {
            log::debug!("Gizmo control mode: {mode:?}");
        }
        self.mode = mode;
    }

    /// Handles in local instead of world axes.
    pub fn set_local(&mut self, local: bool) {
        self.orientation = if local {
            GizmoOrientation::Local
        } else {
            GizmoOrientation::Global
        };
    }

    /// Switches mode when a key of `keymap` fires. Returns whether it did.
    pub fn update_from_keys(
        &mut self,
        keys: &KeyRepeatHandler,
        keymap: &[(Key, ControlMode)],
    ) -> bool {
        match key_control_mode(keys, keymap) {
            Some(mode) => {
                self.set_mode(mode);
                true
            }
            None => false,
        }
    }

    /// Draws the gizmo over `viewport` and returns the new model matrix
    /// while it is being dragged.
    pub fn interact(
        &mut self,
        ui: &mut Ui,
        view: Mat4,
        projection: Mat4,
        model: Mat4,
        viewport: Rect,
    ) -> Option<Mat4> {
        let translate = GizmoMode::TranslateX
            | GizmoMode::TranslateY
            | GizmoMode::TranslateZ
            | GizmoMode::TranslateXY
            | GizmoMode::TranslateXZ
            | GizmoMode::TranslateYZ;
        let rotate = GizmoMode::RotateX | GizmoMode::RotateY | GizmoMode::RotateZ;
        let modes = match self.mode {
            ControlMode::Translation => translate,
            ControlMode::Rotation => rotate,
            ControlMode::TranslationRotation => translate | rotate,
            ControlMode::Scale => {
                GizmoMode::ScaleX | GizmoMode::ScaleY | GizmoMode::ScaleZ | GizmoMode::ScaleUniform
            }
        };

        self.gizmo.update_config(GizmoConfig {
            view_matrix: row_major(view),
            projection_matrix: row_major(projection),
            viewport,
            modes,
            orientation: self.orientation,
            pixels_per_point: ui.ctx().pixels_per_point(),
            ..GizmoConfig::default()
        });

        let (_, transforms) = self.gizmo.interact(ui, &[to_gizmo_transform(model)])?;
        transforms.first().map(from_gizmo_transform)
    }

    /// Splits a matrix into translation, XYZ Euler angles in degrees, and scale.
    pub fn decompose_transform(matrix: Mat4) -> (Vec3, Vec3, Vec3) {
        let (scale, rotation, translation) = matrix.to_scale_rotation_translation();
        let (x, y, z) = rotation.to_euler(EulerRot::XYZ);
        (
            translation,
            Vec3::new(x.to_degrees(), y.to_degrees(), z.to_degrees()),
            scale,
        )
    }

    /// Inverse of [`TransformGizmo::decompose_transform`].
    pub fn compose_transform(translation: Vec3, euler_degrees: Vec3, scale: Vec3) -> Mat4 {
        let r = euler_degrees * std::f32::consts::PI / 180.0;
        let rotation = Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z);
        Mat4::from_scale_rotation_translation(scale, rotation, translation)
    }
}

/// Index slider over the four control modes. Returns whether it changed.
pub fn slider_control_mode(ui: &mut Ui, name: &str, mode: &mut ControlMode) -> bool {
    enum_slider(ui, name, mode)
}

fn row_major(m: Mat4) -> mint::RowMatrix4<f64> {
    let t = m.as_dmat4().transpose();
    let row = |v: glam::DVec4| mint::Vector4 {
        x: v.x,
        y: v.y,
        z: v.z,
        w: v.w,
    };
    mint::RowMatrix4 {
        x: row(t.x_axis),
        y: row(t.y_axis),
        z: row(t.z_axis),
        w: row(t.w_axis),
    }
}

fn mint3(v: DVec3) -> mint::Vector3<f64> {
    mint::Vector3 {
        x: v.x,
        y: v.y,
        z: v.z,
    }
}

fn to_gizmo_transform(model: Mat4) -> Transform {
    let (scale, rotation, translation) = model.as_dmat4().to_scale_rotation_translation();
    Transform {
        translation: mint3(translation),
        rotation: mint::Quaternion {
            v: mint3(DVec3::new(rotation.x, rotation.y, rotation.z)),
            s: rotation.w,
        },
        scale: mint3(scale),
    }
}

fn from_gizmo_transform(transform: &Transform) -> Mat4 {
    let v3 = |v: &mint::Vector3<f64>| DVec3::new(v.x, v.y, v.z);
    let q = &transform.rotation;
    let rotation = DQuat::from_xyzw(q.v.x, q.v.y, q.v.z, q.s);
    DMat4::from_scale_rotation_translation(
        v3(&transform.scale),
        rotation,
        v3(&transform.translation),
    )
    .as_mat4()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decompose_compose_roundtrip() {
        let translation = Vec3::new(1.0, 2.0, 3.0);
        let euler_degrees = Vec3::new(45.0, 30.0, 15.0);
        let scale = Vec3::new(1.0, 2.0, 1.5);

        let matrix = TransformGizmo::compose_transform(translation, euler_degrees, scale);
        let (t, r, s) = TransformGizmo::decompose_transform(matrix);

        assert!((t - translation).length() < 0.001);
        assert!((r - euler_degrees).length() < 0.1);
        assert!((s - scale).length() < 0.001);
    }

    #[test]
    fn test_gizmo_transform_conversion() {
        let model = TransformGizmo::compose_transform(
            Vec3::new(-1.0, 0.5, 2.0),
            Vec3::new(10.0, 20.0, 30.0),
            Vec3::splat(2.0),
        );
        let back = from_gizmo_transform(&to_gizmo_transform(model));
        assert!(back.abs_diff_eq(model, 1e-5));
    }

    #[test]
    fn test_row_major_transposes() {
        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let rows = row_major(m);
        // translation sits in the last column, i.e. the w entry of each row
        assert_eq!((rows.x.w, rows.y.w, rows.z.w, rows.w.w), (1.0, 2.0, 3.0, 1.0));
    }

    #[test]
    fn test_keys_switch_mode() {
        let mut gizmo = TransformGizmo::default();
        assert_eq!(gizmo.mode(), ControlMode::TranslationRotation);

        let mut keys = KeyRepeatHandler::default();
        keys.step(&|k: Key| k == Key::R);
        assert!(gizmo.update_from_keys(&keys, &ps_utils_core::DEFAULT_CONTROL_KEYMAP));
        assert_eq!(gizmo.mode(), ControlMode::Rotation);

        keys.step(&|_: Key| false);
        assert!(!gizmo.update_from_keys(&keys, &ps_utils_core::DEFAULT_CONTROL_KEYMAP));
        assert_eq!(gizmo.mode(), ControlMode::Rotation);
    }
}
