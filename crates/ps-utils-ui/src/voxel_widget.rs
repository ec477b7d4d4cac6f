//! Voxel set with an interactive selection brush.

use glam::{IVec3, Mat4, Vec3};
use ps_utils_core::{
    voxel_mesh, BrushOptions, BrushShape, HoverTarget, Key, KeyRepeatHandler, MeshElement, Result,
    VoxelMesh, VoxelSelectionBrush,
};

use crate::input::BrushInput;
use crate::scene_view::{SceneMesh, SceneResponse};
use crate::sliders::enum_slider;

/// A voxel set rendered as cubes whose selection is painted with Alt+click.
///
/// Draw the panel with [`VoxelSetWidget::gui`], pass
/// [`VoxelSetWidget::scene_mesh`] to a scene view, then feed the scene's
/// response back through [`VoxelSetWidget::interact`].
pub struct VoxelSetWidget {
    name: String,
    brush: VoxelSelectionBrush,
    mesh: VoxelMesh,
    face_colors: Vec<Vec3>,
    enabled: bool,
}

impl VoxelSetWidget {
    /// Builds the widget for voxels at `coords` on a `resolution³` grid
    /// spanning `[bbox_min, bbox_max]`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        coords: Vec<IVec3>,
        resolution: u32,
        bbox_min: f32,
        bbox_max: f32,
        offset: Option<Vec3>,
        selection: Option<Vec<bool>>,
        options: &BrushOptions,
    ) -> Result<Self> {
        let mesh = voxel_mesh(&coords, resolution, bbox_min, bbox_max, offset);
        let brush = VoxelSelectionBrush::new(coords, resolution, selection, options)?;
        let face_colors = brush.render_buffer();
        let name = name.into();
        log::info!(
            "Voxel set '{name}': {} voxels, {} faces",
            brush.len(),
            mesh.num_faces()
        );

        Ok(Self {
            name,
            brush,
            mesh,
            face_colors,
            enabled: true,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn brush(&self) -> &VoxelSelectionBrush {
        &self.brush
    }

    /// Mutable access to the brush. Colours refresh on the next interaction.
    pub fn brush_mut(&mut self) -> &mut VoxelSelectionBrush {
        &mut self.brush
    }

    pub fn mesh(&self) -> &VoxelMesh {
        &self.mesh
    }

    /// Current colour of each face.
    pub fn face_colors(&self) -> &[Vec3] {
        &self.face_colors
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.brush.clear_hover();
            self.refresh_colors();
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The mesh to draw, or `None` when disabled.
    pub fn scene_mesh(&self) -> Option<SceneMesh<'_>> {
        self.enabled.then(|| SceneMesh {
            vertices: &self.mesh.vertices,
            faces: &self.mesh.faces,
            face_colors: &self.face_colors,
            transform: Mat4::IDENTITY,
        })
    }

    /// Draws the brush panel. Returns whether the selection changed since
    /// the last call.
    pub fn gui(&mut self, ui: &mut egui::Ui, keys: &KeyRepeatHandler) -> bool {
        ui.separator();
        ui.strong(&self.name);

        ui.push_id(&self.name, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Reset").clicked() {
                    self.brush.reset();
                }
                if ui.button("Invert").clicked() {
                    self.brush.invert();
                }
            });

            if keys.pressed(Key::S) {
                self.brush.toggle_mode();
            }

            let mut mode = self.brush.mode();
            if enum_slider(ui, "Brush Mode", &mut mode) {
                self.brush.set_mode(mode);
            }

            ui.horizontal(|ui| {
                let mut square = self.brush.shape() == BrushShape::Square;
                if ui.checkbox(&mut square, "Square").changed() {
                    self.brush.set_shape(if square {
                        BrushShape::Square
                    } else {
                        BrushShape::Sphere
                    });
                }
                ui.label(format!("Radius: {}", self.brush.radius()));
            });
        });

        let changed = self.brush.consume_dirty();
        if changed {
            self.refresh_colors();
        }
        changed
    }

    /// Applies this frame's pointer input. `mesh_index` is this widget's
    /// position in the meshes passed to the scene view.
    pub fn interact(&mut self, ui: &egui::Ui, scene: &SceneResponse, mesh_index: usize) {
        let input = ui.input(BrushInput::from_input);
        let hovered_face = scene
            .hovered
            .filter(|hit| hit.mesh == mesh_index)
            .map(|hit| hit.face);
        self.apply_input(input, hovered_face);
    }

    /// Hover, stroke and radius handling behind [`VoxelSetWidget::interact`].
    pub fn apply_input(&mut self, input: BrushInput, hovered_face: Option<usize>) {
        if !self.enabled {
            return;
        }

        if input.modifier && input.wheel_notches != 0.0 {
            self.brush.scroll_radius(input.wheel_notches);
        }

        match hovered_face {
            Some(face) => self.brush.on_hover(MeshElement::Face, face),
            None => self.brush.clear_hover(),
        }

        if input.primary_down && input.modifier {
            self.brush.on_click(true);
        } else {
            self.brush.end_stroke();
        }

        self.refresh_colors();
    }

    fn refresh_colors(&mut self) {
        self.face_colors = self.brush.render_buffer();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ps_utils_core::{BrushColors, BrushMode};

    fn row_widget() -> VoxelSetWidget {
        let coords = (0..6).map(|x| IVec3::new(x, 0, 0)).collect();
        let options = BrushOptions {
            radius: 1.5,
            ..BrushOptions::default()
        };
        VoxelSetWidget::new("row", coords, 8, -1.0, 1.0, None, None, &options).unwrap()
    }

    fn alt_click() -> BrushInput {
        BrushInput {
            modifier: true,
            primary_down: true,
            wheel_notches: 0.0,
        }
    }

    #[test]
    fn test_new_builds_mesh_and_colors() {
        let widget = row_widget();
        assert_eq!(widget.mesh().vertices.len(), 6 * 8);
        assert_eq!(widget.face_colors().len(), 6 * 12);
        assert!(widget
            .face_colors()
            .iter()
            .all(|&c| c == BrushColors::default().base));
    }

    #[test]
    fn test_invalid_coords_are_rejected() {
        let result = VoxelSetWidget::new(
            "bad",
            vec![IVec3::new(0, 9, 0)],
            8,
            -1.0,
            1.0,
            None,
            None,
            &BrushOptions::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_hover_paints_footprint() {
        let mut widget = row_widget();
        // face 24 belongs to voxel 2
        widget.apply_input(BrushInput::default(), Some(24));

        let colors = BrushColors::default();
        let voxel_color = |v: usize| widget.face_colors()[v * 12];
        assert_eq!(voxel_color(1), colors.hover_add);
        assert_eq!(voxel_color(2), colors.hover_add);
        assert_eq!(voxel_color(3), colors.hover_add);
        assert_eq!(voxel_color(0), colors.base);
        assert_eq!(voxel_color(4), colors.base);

        widget.apply_input(BrushInput::default(), None);
        assert!(widget.face_colors().iter().all(|&c| c == colors.base));
    }

    #[test]
    fn test_alt_drag_paints_once_per_voxel() {
        let mut widget = row_widget();

        widget.apply_input(alt_click(), Some(24));
        assert_eq!(widget.brush().selected_count(), 3);
        assert_eq!(widget.brush().last_affected(), Some(2));

        // holding still does not re-commit
        widget.brush_mut().set_mode(BrushMode::Remove);
        widget.apply_input(alt_click(), Some(24));
        assert_eq!(widget.brush().selected_count(), 3);

        // moving to a new voxel continues the stroke
        widget.apply_input(alt_click(), Some(4 * 12));
        assert_eq!(widget.brush().selection()[..4], [false, true, true, false]);
        assert_eq!(widget.brush().selected_count(), 2);

        // release, then click the same voxel again
        widget.apply_input(BrushInput::default(), Some(4 * 12));
        assert_eq!(widget.brush().last_affected(), None);
    }

    #[test]
    fn test_click_without_alt_does_nothing() {
        let mut widget = row_widget();
        let input = BrushInput {
            primary_down: true,
            ..BrushInput::default()
        };
        widget.apply_input(input, Some(0));
        assert_eq!(widget.brush().selected_count(), 0);
    }

    #[test]
    fn test_alt_wheel_changes_radius() {
        let mut widget = row_widget();
        let input = BrushInput {
            modifier: true,
            primary_down: false,
            wheel_notches: 2.0,
        };
        widget.apply_input(input, None);
        assert!((widget.brush().radius() - 2.5).abs() < 1e-6);

        // wheel alone zooms the camera instead
        let input = BrushInput {
            wheel_notches: 2.0,
            ..BrushInput::default()
        };
        widget.apply_input(input, None);
        assert!((widget.brush().radius() - 2.5).abs() < 1e-6);
    }

    #[test]
    fn test_disabled_widget_ignores_input() {
        let mut widget = row_widget();
        widget.set_enabled(false);
        assert!(widget.scene_mesh().is_none());
        widget.apply_input(alt_click(), Some(0));
        assert_eq!(widget.brush().selected_count(), 0);
    }
}
