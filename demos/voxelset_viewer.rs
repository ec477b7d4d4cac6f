#![allow(clippy::cast_possible_wrap, clippy::cast_precision_loss)]
//! Demo showing brush selection over a voxel set.
//!
//! Hold `Alt` and click (or drag) to add voxels to the selection, `s` flips
//! the brush to removal, and `Alt` + wheel resizes it.
//!
//! Run with: `cargo run --example voxelset_viewer [coords.json]`
//!
//! Without an argument a voxelised sphere is shown. A JSON file holds a list
//! of `[x, y, z]` grid coordinates in `[0, 32)`.

use ps_utils::egui::Ui;
use ps_utils::*;

const VOXEL_RES: u32 = 32;

/// Voxels of a ball inscribed in the grid.
fn sphere_coords(resolution: u32) -> Vec<IVec3> {
    let res = resolution as i32;
    let center = Vec3::splat((resolution as f32 - 1.0) / 2.0);
    let radius = resolution as f32 * 0.45;

    let mut coords = Vec::new();
    for x in 0..res {
        for y in 0..res {
            for z in 0..res {
                let c = IVec3::new(x, y, z);
                let d = c.as_vec3().distance(center);
                // shell only; the interior is never visible
                if d <= radius && d > radius - 1.5 {
                    coords.push(c);
                }
            }
        }
    }
    coords
}

struct VoxelSetViewer {
    voxels: VoxelSetWidget,
    scene: SceneView,
}

impl VoxelSetViewer {
    fn new(coords: Vec<IVec3>) -> Result<Self> {
        let voxels = VoxelSetWidget::new(
            "voxel set",
            coords,
            VOXEL_RES,
            -1.0,
            1.0,
            None,
            None,
            &BrushOptions::default(),
        )?;

        let mut scene = SceneView::new();
        if let Some((min, max)) = voxels.mesh().bounding_box() {
            scene.fit(min, max);
        }

        Ok(Self { voxels, scene })
    }
}

impl Viewer for VoxelSetViewer {
    fn gui(&mut self, ui: &mut Ui, frame: &mut Frame<'_>) {
        show_fps(ui, frame);

        ui.label("Press `Alt` to add/remove voxels from the selection.");
        ui.label("Maintain `Alt` pressed and scroll to change the radius of the selection.");

        if self.voxels.gui(ui, frame.keys) {
            log::info!(
                "Selection: {} / {} voxels",
                self.voxels.brush().selected_count(),
                self.voxels.brush().len()
            );
        }
    }

    fn scene(&mut self, ui: &mut Ui, _frame: &mut Frame<'_>) {
        let meshes: Vec<SceneMesh<'_>> = self.voxels.scene_mesh().into_iter().collect();
        let response = self.scene.show(ui, &meshes, &[]);
        self.voxels.interact(ui, &response, 0);
    }
}

fn main() -> Result<()> {
    let coords = match std::env::args().nth(1) {
        Some(path) => load_coords_json(path)?,
        None => sphere_coords(VOXEL_RES),
    };

    let viewer = VoxelSetViewer::new(coords)?;
    run(viewer, ViewerOptions::default().with_title("voxelset_viewer"))
}
