use crate::error::{AppError, Result};
use indexmap::IndexMap;
use log;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Files grouped by their containing directory, in traversal order.
pub type FileGroups = IndexMap<PathBuf, Vec<PathBuf>>;

/// Suffix filter shared by the collector and the normalizer: the name must
/// end with `extension` and must not end with `excluded_suffix` when one is
/// given. Plain suffix matches, not globs.
pub(crate) fn matches_filter(file_name: &str, extension: &str, excluded_suffix: Option<&str>) -> bool {
    file_name.ends_with(extension)
        && excluded_suffix.is_none_or(|suffix| !file_name.ends_with(suffix))
}

/// Recursively collects every file under `root` matching the suffix filter,
/// grouped by immediate parent directory.
///
/// A missing root is an error; callers that want the lenient behavior check
/// for existence first (see `general.skip_missing_roots`).
pub fn collect_files(
    root: &Path,
    extension: &str,
    excluded_suffix: Option<&str>,
) -> Result<FileGroups> {
    if !root.exists() {
        return Err(AppError::MissingRoot {
            path: root.to_path_buf(),
        });
    }

    log::info!("Collecting '{}' files under: {}", extension, root.display());
    let mut groups = FileGroups::new();

    for entry_result in WalkDir::new(root) {
        let entry = entry_result?;
        if !entry.file_type().is_file() {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy();
        if !matches_filter(&file_name, extension, excluded_suffix) {
            log::trace!("Excluding file: {}", entry.path().display());
            continue;
        }
        let directory = entry
            .path()
            .parent()
            .unwrap_or(root)
            .to_path_buf();
        groups
            .entry(directory)
            .or_default()
            .push(entry.path().to_path_buf());
    }

    log::debug!(
        "Collection complete: {} files in {} directories.",
        groups.values().map(Vec::len).sum::<usize>(),
        groups.len()
    );
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "x").unwrap();
    }

    #[test]
    fn groups_matching_files_by_parent_directory() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("main.go"));
        touch(&root.join("handler/user.go"));
        touch(&root.join("handler/project.go"));
        touch(&root.join("handler/notes.txt"));
        touch(&root.join("model/deep/nested.go"));

        let groups = collect_files(root, ".go", None).unwrap();

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[&root.to_path_buf()], vec![root.join("main.go")]);
        let handler: &Vec<PathBuf> = &groups[&root.join("handler")];
        assert_eq!(handler.len(), 2);
        assert!(handler.contains(&root.join("handler/user.go")));
        assert!(handler.contains(&root.join("handler/project.go")));
        assert_eq!(
            groups[&root.join("model/deep")],
            vec![root.join("model/deep/nested.go")]
        );
    }

    #[test]
    fn excluded_suffix_wins_over_extension_match() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("app.dart"));
        touch(&root.join("app.g.dart"));

        let groups = collect_files(root, ".dart", Some(".g.dart")).unwrap();

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[&root.to_path_buf()], vec![root.join("app.dart")]);
    }

    #[test]
    fn empty_tree_yields_empty_groups() {
        let dir = tempdir().unwrap();
        let groups = collect_files(dir.path(), ".go", None).unwrap();
        assert!(groups.is_empty());
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        match collect_files(&missing, ".go", None) {
            Err(AppError::MissingRoot { path }) => assert_eq!(path, missing),
            other => panic!("expected MissingRoot, got {:?}", other.map(|_| ())),
        }
    }
}
