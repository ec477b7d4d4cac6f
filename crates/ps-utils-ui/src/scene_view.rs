//! Software 3D view painted with egui shapes.
//!
//! Triangles are projected on the CPU, back faces culled, and the rest drawn
//! far to near (painter's algorithm) as one egui mesh. The face under the
//! pointer is reported so widgets can hover and click on geometry.

use egui::{Color32, Mesh, Pos2, Rect, Response, Sense, Shape, Stroke, Ui};
use glam::{Mat4, UVec3, Vec3};

use crate::camera::Camera;

const ORBIT_SPEED: f32 = 0.01;
const SCROLL_POINTS_PER_STEP: f32 = 50.0;
const AMBIENT: f32 = 0.35;

/// A triangle mesh to draw, with one colour per face.
#[derive(Debug, Clone, Copy)]
pub struct SceneMesh<'a> {
    pub vertices: &'a [Vec3],
    pub faces: &'a [UVec3],
    /// Linear RGB in `[0, 1]`. Faces without a colour are drawn grey.
    pub face_colors: &'a [Vec3],
    pub transform: Mat4,
}

/// A set of line segments to draw on top of the meshes.
#[derive(Debug, Clone, Copy)]
pub struct SceneLines<'a> {
    pub vertices: &'a [Vec3],
    pub edges: &'a [[u32; 2]],
    pub color: Color32,
    pub transform: Mat4,
}

/// Face under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneHit {
    /// Index into the `meshes` slice passed to [`SceneView::show`].
    pub mesh: usize,
    pub face: usize,
}

/// Result of drawing a [`SceneView`] for one frame.
pub struct SceneResponse {
    pub response: Response,
    pub hovered: Option<SceneHit>,
    pub rect: Rect,
    pub view: Mat4,
    pub projection: Mat4,
}

/// A triangle in screen space.
#[derive(Debug, Clone, Copy)]
struct ScreenTriangle {
    hit: SceneHit,
    points: [Pos2; 3],
    depth: f32,
    color: Color32,
}

/// Maps world points to screen points within `rect`.
#[derive(Debug, Clone, Copy)]
struct Projector {
    mvp: Mat4,
    rect: Rect,
}

impl Projector {
    /// Screen position and NDC depth, or `None` behind the eye or outside the depth range.
    fn project(&self, point: Vec3) -> Option<(Pos2, f32)> {
        let clip = self.mvp * point.extend(1.0);
        if clip.w <= f32::EPSILON {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        if !(0.0..=1.0).contains(&ndc.z) {
            return None;
        }
        let center = self.rect.center();
        let pos = Pos2::new(
            center.x + ndc.x * self.rect.width() * 0.5,
            center.y - ndc.y * self.rect.height() * 0.5,
        );
        Some((pos, ndc.z))
    }
}

fn shade(color: Vec3, normal: Vec3, forward: Vec3) -> Color32 {
    let light = AMBIENT + (1.0 - AMBIENT) * normal.dot(forward).abs();
    let c = (color * light).clamp(Vec3::ZERO, Vec3::ONE) * 255.0;
    Color32::from_rgb(c.x as u8, c.y as u8, c.z as u8)
}

/// Projects, culls and shades every face, sorted far to near.
fn rasterize(meshes: &[SceneMesh<'_>], camera: &Camera, rect: Rect) -> Vec<ScreenTriangle> {
    let view_projection = camera.view_projection_matrix();
    let forward = camera.forward();
    let mut triangles = Vec::new();

    for (mesh_index, mesh) in meshes.iter().enumerate() {
        let projector = Projector {
            mvp: view_projection * mesh.transform,
            rect,
        };
        let projected: Vec<Option<(Pos2, f32)>> =
            mesh.vertices.iter().map(|&v| projector.project(v)).collect();

        for (face_index, face) in mesh.faces.iter().enumerate() {
            let corners = face.to_array().map(|i| projected.get(i as usize).copied().flatten());
            let [Some((a, da)), Some((b, db)), Some((c, dc))] = corners else {
                continue;
            };
            // screen y points down, so front faces wind clockwise here
            if (b - a).x * (c - a).y - (b - a).y * (c - a).x >= 0.0 {
                continue;
            }

            let world = face
                .to_array()
                .map(|i| mesh.transform.transform_point3(mesh.vertices[i as usize]));
            let normal = (world[1] - world[0]).cross(world[2] - world[0]).normalize_or_zero();
            let base = mesh
                .face_colors
                .get(face_index)
                .copied()
                .unwrap_or(Vec3::splat(0.7));

            triangles.push(ScreenTriangle {
                hit: SceneHit {
                    mesh: mesh_index,
                    face: face_index,
                },
                points: [a, b, c],
                depth: (da + db + dc) / 3.0,
                color: shade(base, normal, forward),
            });
        }
    }

    triangles.sort_by(|l, r| r.depth.total_cmp(&l.depth));
    triangles
}

fn contains(points: &[Pos2; 3], p: Pos2) -> bool {
    let edge = |a: Pos2, b: Pos2| (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
    let [a, b, c] = *points;
    let (d0, d1, d2) = (edge(a, b), edge(b, c), edge(c, a));
    let has_neg = d0 < 0.0 || d1 < 0.0 || d2 < 0.0;
    let has_pos = d0 > 0.0 || d1 > 0.0 || d2 > 0.0;
    !(has_neg && has_pos)
}

/// Nearest triangle containing `pointer`.
fn pick(triangles: &[ScreenTriangle], pointer: Pos2) -> Option<SceneHit> {
    triangles
        .iter()
        .rev()
        .find(|t| contains(&t.points, pointer))
        .map(|t| t.hit)
}

/// An interactive 3D viewport.
///
/// Primary drag orbits and the wheel zooms unless Alt is held, which is
/// reserved for brush interaction. Secondary drag pans.
#[derive(Debug, Clone, Default)]
pub struct SceneView {
    camera: Camera,
}

impl SceneView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Points the camera at the box `[min, max]`.
    pub fn fit(&mut self, min: Vec3, max: Vec3) {
        self.camera.look_at_box(min, max);
    }

    pub fn show(
        &mut self,
        ui: &mut Ui,
        meshes: &[SceneMesh<'_>],
        lines: &[SceneLines<'_>],
    ) -> SceneResponse {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        self.camera.set_aspect_ratio(rect.width() / rect.height());
        self.navigate(ui, &response, rect);

        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, ui.visuals().extreme_bg_color);

        let triangles = rasterize(meshes, &self.camera, rect);
        let mut mesh = Mesh::default();
        for triangle in &triangles {
            let base = mesh.vertices.len() as u32;
            for point in triangle.points {
                mesh.colored_vertex(point, triangle.color);
            }
            mesh.add_triangle(base, base + 1, base + 2);
        }
        painter.add(Shape::mesh(mesh));

        let view_projection = self.camera.view_projection_matrix();
        for set in lines {
            let projector = Projector {
                mvp: view_projection * set.transform,
                rect,
            };
            for &[a, b] in set.edges {
                let ends = [a, b].map(|i| {
                    set.vertices
                        .get(i as usize)
                        .and_then(|&v| projector.project(v))
                        .map(|(p, _)| p)
                });
                if let [Some(p), Some(q)] = ends {
                    painter.line_segment([p, q], Stroke::new(1.5, set.color));
                }
            }
        }

        let hovered = response.hover_pos().and_then(|pos| pick(&triangles, pos));

        SceneResponse {
            response,
            hovered,
            rect,
            view: self.camera.view_matrix(),
            projection: self.camera.projection_matrix(),
        }
    }

    fn navigate(&mut self, ui: &Ui, response: &Response, rect: Rect) {
        let (alt, scroll) = ui.input(|i| (i.modifiers.alt, i.raw_scroll_delta.y));

        if response.dragged_by(egui::PointerButton::Primary) && !alt {
            let delta = response.drag_delta();
            self.camera.orbit(delta.x * ORBIT_SPEED, delta.y * ORBIT_SPEED);
        }
        if response.dragged_by(egui::PointerButton::Secondary) {
            let delta = response.drag_delta() / rect.height().max(1.0);
            self.camera.pan(-delta.x, delta.y);
        }
        if response.hovered() && !alt && scroll != 0.0 {
            self.camera.zoom(scroll / SCROLL_POINTS_PER_STEP);
        }
    }
}
