use log::warn;
use std::path::{Path, PathBuf};

use crate::error::ComponentError;

pub const DEFAULT_MARKER_DIR: &str = "addons";

/// Walks upward from the directory containing `known_file` until a directory
/// named `marker_dir` is found and returns that directory's parent.
///
/// Expected layout: `<project_root>/addons/<plugin>/<file>`.
pub fn resolve(known_file: &Path, marker_dir: &str) -> Result<PathBuf, ComponentError> {
    let not_found = || ComponentError::RootNotFound {
        path: known_file.display().to_string(),
        marker_dir: marker_dir.to_string(),
    };

    let start = known_file.parent().ok_or_else(not_found)?;
    start
        .ancestors()
        .find(|dir| dir.file_name().is_some_and(|name| name == marker_dir))
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .ok_or_else(not_found)
}

/// Like [`resolve`], but degrades to the directory containing `known_file`.
pub fn resolve_or_fallback(known_file: &Path, marker_dir: &str) -> PathBuf {
    match resolve(known_file, marker_dir) {
        Ok(root) => root,
        Err(err) => {
            let fallback = known_file
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| known_file.to_path_buf());
            warn!("{}, falling back to {:?}", err, fallback);
            fallback
        }
    }
}

/// Translates an absolute source path into a resource path addressed
/// relative to `project_root`, e.g. `/proj/samples/Foo.cs` to
/// `res://samples/Foo.cs`.
///
/// Returns `None` unless `source_path` is a strict descendant of
/// `project_root`. Both separators are accepted on input.
pub fn to_resource_path(source_path: &str, project_root: &Path, scheme: &str) -> Option<String> {
    let source = source_path.replace('\\', "/");
    let root = project_root.to_string_lossy().replace('\\', "/");
    let root = match root.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    };

    let rest = source.strip_prefix(root)?;
    if !root.ends_with('/') && !rest.starts_with('/') {
        return None;
    }

    let relative = rest.trim_start_matches('/');
    if relative.is_empty() {
        return None;
    }

    Some(format!("{}{}", scheme, relative))
}
