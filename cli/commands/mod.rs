pub mod dump;
pub mod normalize;

use srcdump_core::TargetConfig;
use std::path::{Path, PathBuf};

/// Config paths are interpreted relative to the project root.
pub fn resolve_path(project_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_root.join(path)
    }
}

pub fn target_root(project_root: &Path, target: &TargetConfig) -> PathBuf {
    resolve_path(project_root, &target.root_directory)
}
