//! Brush-based selection over a fixed set of voxels.
//!
//! A [`VoxelSelectionBrush`] keeps one boolean per voxel. The host renderer
//! reports which mesh element is under the pointer through
//! [`HoverTarget::on_hover`]; the brush maps it back to a voxel, previews the
//! voxels within the brush radius, and commits them to the selection when
//! [`on_click`](VoxelSelectionBrush::on_click) is called with the modifier held.

use std::path::Path;

use glam::{IVec3, Vec3};
use serde::{Deserialize, Serialize};

use crate::choice::Choice;
use crate::geometry::{CUBE_TRIANGLES, CUBE_VERTICES};
use crate::options::BrushOptions;
use crate::{PsUtilsError, Result};

/// Default brush radius in voxel units.
pub const DEFAULT_BRUSH_RADIUS: f32 = 4.0;
/// Radius change per mouse-wheel notch.
pub const BRUSH_RADIUS_SENSITIVITY: f32 = 0.5;
/// Smallest allowed brush radius.
pub const MIN_BRUSH_RADIUS: f32 = 0.001;
/// Largest allowed brush radius.
pub const MAX_BRUSH_RADIUS: f32 = 32.0;

/// Vertices emitted per voxel by [`voxel_mesh`](crate::voxel_mesh).
pub const VERTICES_PER_VOXEL: usize = CUBE_VERTICES.len();
/// Triangles emitted per voxel by [`voxel_mesh`](crate::voxel_mesh).
pub const FACES_PER_VOXEL: usize = CUBE_TRIANGLES.len();

/// Whether a stroke adds voxels to the selection or removes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BrushMode {
    /// Union with the brush footprint.
    #[default]
    Add,
    /// Difference with the brush footprint.
    Remove,
}

impl BrushMode {
    /// Returns the other mode.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            BrushMode::Add => BrushMode::Remove,
            BrushMode::Remove => BrushMode::Add,
        }
    }
}

impl Choice for BrushMode {
    const ALL: &'static [Self] = &[BrushMode::Add, BrushMode::Remove];

    fn label(self) -> &'static str {
        match self {
            BrushMode::Add => "add",
            BrushMode::Remove => "remove",
        }
    }
}

/// Distance metric of the brush footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BrushShape {
    /// Chebyshev (L-infinity) distance: a cube around the hovered voxel.
    #[default]
    Square,
    /// Euclidean distance: a ball around the hovered voxel.
    Sphere,
}

impl BrushShape {
    /// Returns true if `offset` lies strictly inside `radius` under this metric.
    #[must_use]
    pub fn contains(self, offset: IVec3, radius: f32) -> bool {
        match self {
            BrushShape::Square => {
                (offset.as_i64vec3().abs().max_element() as f64) < f64::from(radius)
            }
            BrushShape::Sphere => {
                offset.as_dvec3().length_squared() < f64::from(radius) * f64::from(radius)
            }
        }
    }
}

/// Kind of mesh element reported by a hover event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshElement {
    Vertex,
    Face,
    Edge,
    Halfedge,
    Corner,
}

/// Receiver of pointer-over events from the host renderer.
pub trait HoverTarget {
    /// Called when the pointer is over element `index` of kind `element`.
    fn on_hover(&mut self, element: MeshElement, index: usize);
}

/// Display colours of a voxel selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushColors {
    pub base: Vec3,
    pub selected: Vec3,
    pub hover_add: Vec3,
    pub hover_remove: Vec3,
}

impl Default for BrushColors {
    fn default() -> Self {
        Self {
            base: Vec3::new(1.0, 1.0, 1.0),
            selected: Vec3::new(0.0, 0.0, 1.0),
            hover_add: Vec3::new(0.0, 1.0, 0.0),
            hover_remove: Vec3::new(1.0, 0.0, 0.0),
        }
    }
}

#[derive(Debug, Clone)]
struct Hover {
    voxel: usize,
    within: Vec<bool>,
}

/// Selection mask over a fixed voxel set, edited with a spatial brush.
#[derive(Debug, Clone)]
pub struct VoxelSelectionBrush {
    coords: Vec<IVec3>,
    resolution: u32,
    selection: Vec<bool>,
    mode: BrushMode,
    shape: BrushShape,
    radius: f32,
    colors: BrushColors,
    hover: Option<Hover>,
    last_affected: Option<usize>,
    dirty: bool,
}

impl VoxelSelectionBrush {
    /// Creates a brush over `coords`, which must all lie in `[0, resolution)`.
    ///
    /// `selection`, if given, must have one entry per voxel.
    pub fn new(
        coords: Vec<IVec3>,
        resolution: u32,
        selection: Option<Vec<bool>>,
        options: &BrushOptions,
    ) -> Result<Self> {
        if resolution == 0 {
            return Err(PsUtilsError::InvalidResolution);
        }
        let limit = i32::try_from(resolution).unwrap_or(i32::MAX);
        if let Some((index, &coord)) = coords
            .iter()
            .enumerate()
            .find(|(_, c)| c.min_element() < 0 || c.max_element() >= limit)
        {
            return Err(PsUtilsError::InvalidCoordinate {
                index,
                coord,
                resolution,
            });
        }

        let selection = match selection {
            Some(mask) if mask.len() != coords.len() => {
                return Err(PsUtilsError::SizeMismatch {
                    expected: coords.len(),
                    actual: mask.len(),
                });
            }
            Some(mask) => mask,
            None => vec![false; coords.len()],
        };

        log::debug!(
            "Created voxel selection brush over {} voxels (resolution {resolution})",
            coords.len()
        );

        Ok(Self {
            coords,
            resolution,
            selection,
            mode: options.mode,
            shape: options.shape,
            radius: options.radius.clamp(MIN_BRUSH_RADIUS, MAX_BRUSH_RADIUS),
            colors: options.colors,
            hover: None,
            last_affected: None,
            dirty: false,
        })
    }

    /// Voxel coordinates, in construction order.
    pub fn coords(&self) -> &[IVec3] {
        &self.coords
    }

    /// Grid resolution the coordinates were validated against.
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Number of voxels.
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Returns true if the brush covers no voxels.
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Current selection mask, parallel to [`coords`](Self::coords).
    pub fn selection(&self) -> &[bool] {
        &self.selection
    }

    /// Number of selected voxels.
    pub fn selected_count(&self) -> usize {
        self.selection.iter().filter(|&&s| s).count()
    }

    pub fn mode(&self) -> BrushMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: BrushMode) {
        self.mode = mode;
    }

    /// Switches between add and remove.
    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
        log::debug!("Brush mode switched to {}", self.mode.label());
    }

    pub fn shape(&self) -> BrushShape {
        self.shape
    }

    /// Changes the brush metric. The hover preview is recomputed.
    pub fn set_shape(&mut self, shape: BrushShape) {
        self.shape = shape;
        self.refresh_hover();
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Adds `delta` to the radius, clamped to `[MIN_BRUSH_RADIUS, MAX_BRUSH_RADIUS]`.
    pub fn set_radius(&mut self, delta: f32) {
        self.radius = (self.radius + delta).clamp(MIN_BRUSH_RADIUS, MAX_BRUSH_RADIUS);
        self.refresh_hover();
    }

    /// Adjusts the radius by `notches` mouse-wheel steps.
    pub fn scroll_radius(&mut self, notches: f32) {
        self.set_radius(BRUSH_RADIUS_SENSITIVITY * notches);
    }

    pub fn colors(&self) -> &BrushColors {
        &self.colors
    }

    pub fn set_colors(&mut self, colors: BrushColors) {
        self.colors = colors;
    }

    /// Voxel currently under the pointer.
    pub fn hovered_voxel(&self) -> Option<usize> {
        self.hover.as_ref().map(|h| h.voxel)
    }

    /// Voxel most recently committed by a click, if any.
    pub fn last_affected(&self) -> Option<usize> {
        self.last_affected
    }

    /// Mask of voxels strictly within the brush radius of voxel `center`.
    ///
    /// # Panics
    /// Panics if `center` is out of range.
    pub fn in_radius(&self, center: usize) -> Vec<bool> {
        let origin = self.coords[center];
        self.coords
            .iter()
            .map(|&c| self.shape.contains(c - origin, self.radius))
            .collect()
    }

    /// Drops the hover preview, e.g. when the pointer leaves the voxels.
    pub fn clear_hover(&mut self) {
        self.hover = None;
    }

    /// Commits the hovered brush footprint to the selection.
    ///
    /// Only acts when `modifier_held` is true, a voxel is hovered, and that
    /// voxel differs from the last one committed, so a drag updates the mask
    /// once per voxel entered. Returns whether the mask was updated.
    pub fn on_click(&mut self, modifier_held: bool) -> bool {
        if !modifier_held {
            return false;
        }
        let Some(hover) = &self.hover else {
            return false;
        };
        if self.last_affected == Some(hover.voxel) {
            return false;
        }

        for (selected, &within) in self.selection.iter_mut().zip(&hover.within) {
            if within {
                *selected = self.mode == BrushMode::Add;
            }
        }

        self.last_affected = Some(hover.voxel);
        self.dirty = true;
        true
    }

    /// Ends the current stroke so the next click may start on the same voxel.
    pub fn end_stroke(&mut self) {
        self.last_affected = None;
    }

    /// Deselects every voxel.
    pub fn reset(&mut self) {
        self.selection.fill(false);
        self.dirty = true;
    }

    /// Complements the selection.
    pub fn invert(&mut self) {
        for selected in &mut self.selection {
            *selected = !*selected;
        }
        self.dirty = true;
    }

    /// Returns whether the selection changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// One colour per rendered face (12 per voxel), in voxel order.
    pub fn render_buffer(&self) -> Vec<Vec3> {
        let hover_color = match self.mode {
            BrushMode::Add => self.colors.hover_add,
            BrushMode::Remove => self.colors.hover_remove,
        };

        let mut buffer = Vec::with_capacity(self.coords.len() * FACES_PER_VOXEL);
        for (voxel, &selected) in self.selection.iter().enumerate() {
            let hovered = self.hover.as_ref().is_some_and(|h| h.within[voxel]);
            let color = if hovered {
                hover_color
            } else if selected {
                self.colors.selected
            } else {
                self.colors.base
            };
            buffer.extend(std::iter::repeat(color).take(FACES_PER_VOXEL));
        }
        buffer
    }

    fn refresh_hover(&mut self) {
        if let Some(voxel) = self.hovered_voxel() {
            let within = self.in_radius(voxel);
            self.hover = Some(Hover { voxel, within });
        }
    }
}

impl HoverTarget for VoxelSelectionBrush {
    fn on_hover(&mut self, element: MeshElement, index: usize) {
        let voxel = match element {
            MeshElement::Vertex => index / VERTICES_PER_VOXEL,
            MeshElement::Face => index / FACES_PER_VOXEL,
            _ => return,
        };
        if voxel >= self.coords.len() {
            return;
        }
        if self.hovered_voxel() != Some(voxel) {
            let within = self.in_radius(voxel);
            self.hover = Some(Hover { voxel, within });
        }
    }
}

/// Loads voxel coordinates from a JSON array of `[x, y, z]` triples.
pub fn load_coords_json(path: impl AsRef<Path>) -> Result<Vec<IVec3>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let coords: Vec<[i32; 3]> = serde_json::from_str(&text)?;
    log::info!("Loaded {} voxels from {}", coords.len(), path.display());
    Ok(coords.into_iter().map(IVec3::from).collect())
}
