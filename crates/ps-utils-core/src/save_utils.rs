//! Helpers for export paths and user-typed values.

use std::path::{Path, PathBuf};

use crate::{PsUtilsError, Result};

/// Image extensions accepted by drag-and-drop thumbnails.
pub const BASIC_IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Returns the next free `{prefix}_{n:06}.{extension}` path in `folder`.
///
/// `n` is the number of existing entries matching `{prefix}_*.{extension}`.
/// Pass `None` as the extension to number folders instead of files. The
/// folder is created if needed.
pub fn next_save_path(
    folder: impl AsRef<Path>,
    extension: Option<&str>,
    prefix: &str,
) -> Result<PathBuf> {
    let folder = folder.as_ref();
    std::fs::create_dir_all(folder)?;

    let stem_prefix = format!("{prefix}_");
    let suffix = extension.map(|ext| format!(".{ext}"));

    let mut count = 0usize;
    for entry in std::fs::read_dir(folder)? {
        let name = entry?.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        let matches = name.starts_with(&stem_prefix)
            && suffix
                .as_deref()
                .map_or(true, |s| name.len() >= stem_prefix.len() + s.len() && name.ends_with(s));
        if matches {
            count += 1;
        }
    }

    let file_name = match extension {
        Some(ext) => format!("{prefix}_{count:06}.{ext}"),
        None => format!("{prefix}_{count:06}"),
    };
    Ok(folder.join(file_name))
}

/// Parses a list literal of integers such as `"[1, 2, -3]"`.
pub fn parse_int_list(text: &str) -> Result<Vec<i64>> {
    let value: serde_json::Value = serde_json::from_str(text.trim())
        .map_err(|_| PsUtilsError::ParseError(format!("not a valid literal: {text:?}")))?;

    let serde_json::Value::Array(items) = value else {
        return Err(PsUtilsError::ParseError(format!(
            "expected a list, got {text:?}"
        )));
    };

    let bad: Vec<String> = items
        .iter()
        .filter(|item| item.as_i64().is_none())
        .map(ToString::to_string)
        .collect();
    if !bad.is_empty() {
        return Err(PsUtilsError::ParseError(format!(
            "list contains non-int elements: [{}]",
            bad.join(", ")
        )));
    }

    Ok(items.iter().filter_map(serde_json::Value::as_i64).collect())
}

/// Returns true if `path` has one of `extensions` (given without the dot).
pub fn check_extension(path: impl AsRef<Path>, extensions: &[&str]) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.contains(&ext))
}

/// Writes `content` to `path`, replacing any existing file.
pub fn save_text(path: impl AsRef<Path>, content: &str) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, content)?;
    log::info!("Saved {} bytes to {}", content.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("ps_utils_{name}"));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_next_save_path_counts_matching_files() {
        let dir = scratch_dir("next_save_path");
        let first = next_save_path(&dir, Some("png"), "exported").unwrap();
        assert_eq!(first, dir.join("exported_000000.png"));

        std::fs::write(&first, b"").unwrap();
        std::fs::write(dir.join("exported_notes.txt"), b"").unwrap();
        std::fs::write(dir.join("other_000000.png"), b"").unwrap();

        let second = next_save_path(&dir, Some("png"), "exported").unwrap();
        assert_eq!(second, dir.join("exported_000001.png"));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_next_save_path_for_folders() {
        let dir = scratch_dir("next_save_folder");
        let first = next_save_path(&dir, None, "run").unwrap();
        std::fs::create_dir_all(&first).unwrap();
        let second = next_save_path(&dir, None, "run").unwrap();
        assert_eq!(second, dir.join("run_000001"));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_parse_int_list() {
        assert_eq!(parse_int_list("[1, 2, -3]").unwrap(), vec![1, 2, -3]);
        assert_eq!(parse_int_list(" [] ").unwrap(), Vec::<i64>::new());
        assert!(matches!(parse_int_list("[1, 2.5]"), Err(PsUtilsError::ParseError(_))));
        assert!(matches!(parse_int_list("42"), Err(PsUtilsError::ParseError(_))));
        assert!(matches!(parse_int_list("[1,"), Err(PsUtilsError::ParseError(_))));
    }

    #[test]
    fn test_check_extension() {
        assert!(check_extension("data/mit.jpg", &BASIC_IMAGE_EXTENSIONS));
        assert!(check_extension("/tmp/a.png", &BASIC_IMAGE_EXTENSIONS));
        assert!(!check_extension("bunny.obj", &BASIC_IMAGE_EXTENSIONS));
        assert!(!check_extension("README", &BASIC_IMAGE_EXTENSIONS));
    }

    #[test]
    fn test_save_text() {
        let dir = scratch_dir("save_text");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("message.txt");
        save_text(&path, "a poem").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a poem");

        assert!(save_text(dir.join("missing/message.txt"), "x").is_err());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
