//! Path resolution for dirty checks

use std::path::{Component, Path, PathBuf};

/// Resolve a path to an absolute, lexically normalized form.
///
/// Existing paths are canonicalized through `dunce` (no `\\?\` prefixes on
/// Windows). Paths that do not exist yet are joined onto the current
/// directory and have `.` and `..` folded away, so missing inputs and
/// outputs still compare and report consistently.
pub fn absolute(path: &Path) -> PathBuf {
    if let Ok(canonical) = dunce::canonicalize(path) {
        return canonical;
    }
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };
    normalize(&joined)
}

/// Fold `.` and `..` components without touching the filesystem.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component.as_os_str());
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
