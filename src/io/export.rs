//! Write the finished SVG document to disk.

use std::fs;
use std::path::Path;

use crate::error::AppError;

/// Write `svg` to `path`, replacing any existing file.
///
/// Missing parent directories are created first.
pub fn write_svg(path: &Path, svg: &str) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            AppError::io(format!(
                "Failed to create output directory '{}': {e}",
                parent.display()
            ))
        })?;
    }

    fs::write(path, svg)
        .map_err(|e| AppError::io(format!("Failed to write SVG '{}': {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("assets").join("nested").join("heatmap.svg");

        write_svg(&path, "<svg/>").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<svg/>");
    }

    #[test]
    fn overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("heatmap.svg");

        write_svg(&path, "<svg>first, and longer</svg>").unwrap();
        write_svg(&path, "<svg/>").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<svg/>");
    }

    #[test]
    fn unwritable_target_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be overwritten as a file.
        let err = write_svg(dir.path(), "<svg/>").unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.message().starts_with("Failed to write SVG"));
    }
}
