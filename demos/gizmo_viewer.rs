//! Demo showing transform gizmo control modes.
//!
//! A bounding box is moved by a gizmo whose handles are picked either with
//! the slider or with the `t`, `r`, `e` and `s` hotkeys.
//!
//! Run with: `cargo run --example gizmo_viewer`

use ps_utils::egui::{Color32, Ui};
use ps_utils::*;

struct GizmoViewer {
    scene: SceneView,
    gizmo: TransformGizmo,
    control_mode: ControlMode,
    model: Mat4,
    box_vertices: Vec<Vec3>,
    box_edges: Vec<[u32; 2]>,
}

impl GizmoViewer {
    fn new() -> Self {
        let (min, max) = (Vec3::splat(-0.5), Vec3::splat(0.5));
        let (box_vertices, box_edges) = bbox_wireframe(min, max);

        let mut scene = SceneView::new();
        scene.fit(min * 3.0, max * 3.0);

        Self {
            scene,
            gizmo: TransformGizmo::default(),
            control_mode: ControlMode::TranslationRotation,
            model: Mat4::IDENTITY,
            box_vertices,
            box_edges,
        }
    }
}

impl Viewer for GizmoViewer {
    fn gui(&mut self, ui: &mut Ui, frame: &mut Frame<'_>) {
        show_fps(ui, frame);

        ui.separator();
        ui.label("Slider");
        if slider_control_mode(ui, "Control", &mut self.control_mode) {
            self.gizmo.set_mode(self.control_mode);
        }

        ui.separator();
        ui.label("Keys");
        if self.gizmo.update_from_keys(frame.keys, &DEFAULT_CONTROL_KEYMAP) {
            self.control_mode = self.gizmo.mode();
        }
        for (key, mode) in DEFAULT_CONTROL_KEYMAP {
            ui.label(format!("{}: {}", key.name(), mode.label()));
        }

        ui.separator();
        let (translation, rotation, scale) = TransformGizmo::decompose_transform(self.model);
        ui.label(format!("translation: {translation:.2}"));
        ui.label(format!("rotation: {rotation:.1}"));
        ui.label(format!("scale: {scale:.2}"));
        if ui.button("Reset transform").clicked() {
            self.model = Mat4::IDENTITY;
        }
    }

    fn scene(&mut self, ui: &mut Ui, _frame: &mut Frame<'_>) {
        let lines = [SceneLines {
            vertices: &self.box_vertices,
            edges: &self.box_edges,
            color: Color32::from_rgb(230, 160, 40),
            transform: self.model,
        }];
        let response = self.scene.show(ui, &[], &lines);

        if let Some(model) = self.gizmo.interact(
            ui,
            response.view,
            response.projection,
            self.model,
            response.rect,
        ) {
            self.model = model;
        }
    }
}

fn main() -> Result<()> {
    run(
        GizmoViewer::new(),
        ViewerOptions::default().with_title("gizmo_viewer"),
    )
}
