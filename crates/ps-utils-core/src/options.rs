//! Configuration options for viewers and brushes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::key_handler::DEFAULT_KEY_REPEAT_INTERVAL;
use crate::voxel_set::{BrushColors, BrushMode, BrushShape, DEFAULT_BRUSH_RADIUS};
use crate::Result;

/// Window and frame-loop configuration for a viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerOptions {
    /// Window title.
    pub title: String,

    /// Initial window width in logical pixels.
    pub window_width: u32,

    /// Initial window height in logical pixels.
    pub window_height: u32,

    /// Maximum frames per second (0 = unlimited).
    pub max_fps: u32,

    /// Frames a hotkey stays silent after firing.
    pub key_repeat_interval: u32,

    /// Whether to use the dark egui theme.
    pub dark_mode: bool,

    /// Default width of the left control panel.
    pub left_panel_width: f32,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            title: "ps-utils-rs".to_string(),
            window_width: 1280,
            window_height: 720,
            max_fps: 120,
            key_repeat_interval: DEFAULT_KEY_REPEAT_INTERVAL,
            dark_mode: true,
            left_panel_width: 305.0,
        }
    }
}

impl ViewerOptions {
    /// Sets the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the initial window size.
    #[must_use]
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_width = width;
        self.window_height = height;
        self
    }

    /// Sets the frame rate cap.
    #[must_use]
    pub fn with_max_fps(mut self, max_fps: u32) -> Self {
        self.max_fps = max_fps;
        self
    }

    /// Loads options from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        load_json(path.as_ref())
    }

    /// Writes options to a JSON file.
    pub fn to_json_file(&self, path: impl AsRef<Path>) -> Result<()> {
        save_json(self, path.as_ref())
    }
}

/// Initial state of a [`VoxelSelectionBrush`](crate::VoxelSelectionBrush).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushOptions {
    /// Brush radius in voxel units.
    pub radius: f32,

    /// Whether strokes add to or remove from the selection.
    pub mode: BrushMode,

    /// Distance metric of the brush.
    pub shape: BrushShape,

    /// Display colours.
    pub colors: BrushColors,
}

impl Default for BrushOptions {
    fn default() -> Self {
        Self {
            radius: DEFAULT_BRUSH_RADIUS,
            mode: BrushMode::Add,
            shape: BrushShape::Square,
            colors: BrushColors::default(),
        }
    }
}

impl BrushOptions {
    /// Loads brush options from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        load_json(path.as_ref())
    }

    /// Writes brush options to a JSON file.
    pub fn to_json_file(&self, path: impl AsRef<Path>) -> Result<()> {
        save_json(self, path.as_ref())
    }
}

fn load_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)?;
    let value = serde_json::from_str(&text)?;
    log::info!("Loaded options from {}", path.display());
    Ok(value)
}

fn save_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    std::fs::write(path, text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewer_options_defaults() {
        let options = ViewerOptions::default();
        assert_eq!(options.max_fps, 120);
        assert_eq!(options.key_repeat_interval, 10);
        assert!(options.dark_mode);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let options: ViewerOptions =
            serde_json::from_str(r#"{ "title": "voxels", "max_fps": 0 }"#).unwrap();
        assert_eq!(options.title, "voxels");
        assert_eq!(options.max_fps, 0);
        assert_eq!(options.window_width, 1280);
    }

    #[test]
    fn test_brush_options_json_file() {
        let dir = std::env::temp_dir().join("ps_utils_brush_options_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("brush.json");

        let options = BrushOptions {
            radius: 2.5,
            mode: BrushMode::Remove,
            shape: BrushShape::Sphere,
            ..BrushOptions::default()
        };
        options.to_json_file(&path).unwrap();
        let loaded = BrushOptions::from_json_file(&path).unwrap();
        assert_eq!(loaded, options);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = ViewerOptions::from_json_file("/nonexistent/ps_utils/options.json");
        assert!(matches!(result, Err(crate::PsUtilsError::IoError(_))));
    }
}
