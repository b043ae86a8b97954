use crate::collect::matches_filter;
use crate::error::{AppError, Result};
use log;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Marker line that starts the real content for a given extension. Everything
/// before the first line containing the marker is boilerplate (license
/// headers, build tags) and gets stripped. Only Go sources define one.
fn content_start_marker(extension: &str) -> Option<&'static str> {
    match extension {
        ".go" => Some("package"),
        _ => None,
    }
}

const COMMENT_PREFIX: &str = "// ";

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Computes the normalized form of `content`: optional preamble strip, a
/// `// <label>/<relpath>` header as line one, exactly one blank line after it,
/// the rest untouched.
fn rewrite(content: &str, header_text: &str, strip_marker: Option<&str>) -> String {
    let mut lines: Vec<String> = content.split_inclusive('\n').map(str::to_string).collect();

    if let Some(marker) = strip_marker {
        if let Some(start) = lines.iter().position(|line| line.contains(marker)) {
            lines.drain(..start);
        }
    }

    let header_line = format!("{}\n", header_text);
    match lines.first() {
        Some(first) if first.starts_with(COMMENT_PREFIX) => {
            if first.trim() != header_text {
                lines[0] = header_line;
            }
        }
        _ => lines.insert(0, header_line),
    }

    // Exactly one blank line separates the header from the body.
    if !lines[0].ends_with('\n') {
        lines[0].push('\n');
    }
    let blank_run = lines[1..].iter().take_while(|l| is_blank(l)).count();
    if blank_run == 0 {
        lines.insert(1, "\n".to_string());
    } else if blank_run > 1 {
        lines.drain(2..1 + blank_run);
    }

    lines.concat()
}

fn expected_header(file_path: &Path, base_dir: &Path, label: &str) -> Result<String> {
    let relative = pathdiff::diff_paths(file_path, base_dir).ok_or_else(|| {
        AppError::InvalidArgument(format!(
            "Cannot express '{}' relative to '{}'",
            file_path.display(),
            base_dir.display()
        ))
    })?;
    Ok(format!("{}{}/{}", COMMENT_PREFIX, label, relative.display()))
}

/// Rewrites `file_path`'s leading comment in place so it names the file's
/// path relative to `base_dir`, prefixed with `label`. Returns whether the
/// file changed. Running it again on its own output is a no-op.
pub fn normalize_file(
    file_path: &Path,
    base_dir: &Path,
    extension: &str,
    label: &str,
) -> Result<bool> {
    let (original, normalized) = normalized_content(file_path, base_dir, extension, label)?;
    if normalized == original {
        log::trace!("Already normalized: {}", file_path.display());
        return Ok(false);
    }
    fs::write(file_path, &normalized).map_err(|e| AppError::FileWrite {
        path: file_path.to_path_buf(),
        source: e,
    })?;
    log::debug!("Normalized header of: {}", file_path.display());
    Ok(true)
}

fn normalized_content(
    file_path: &Path,
    base_dir: &Path,
    extension: &str,
    label: &str,
) -> Result<(String, String)> {
    let original = fs::read_to_string(file_path).map_err(|e| AppError::FileRead {
        path: file_path.to_path_buf(),
        source: e,
    })?;
    let header = expected_header(file_path, base_dir, label)?;
    let normalized = rewrite(&original, &header, content_start_marker(extension));
    Ok((original, normalized))
}

/// Normalizes every matching file under `root`, using the same suffix filter
/// as the collector. Returns the number of files that changed (or would
/// change, with `dry_run`).
pub fn normalize_target(
    root: &Path,
    extension: &str,
    excluded_suffix: Option<&str>,
    label: &str,
    dry_run: bool,
) -> Result<usize> {
    if !root.exists() {
        return Err(AppError::MissingRoot {
            path: root.to_path_buf(),
        });
    }

    log::info!(
        "Normalizing '{}' headers under: {} (label: {})",
        extension,
        root.display(),
        label
    );
    let mut changed = 0usize;
    for entry_result in WalkDir::new(root) {
        let entry = entry_result?;
        if !entry.file_type().is_file() {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy();
        if !matches_filter(&file_name, extension, excluded_suffix) {
            continue;
        }

        if dry_run {
            let (original, normalized) =
                normalized_content(entry.path(), root, extension, label)?;
            if normalized != original {
                log::info!("Would normalize: {}", entry.path().display());
                changed += 1;
            }
        } else if normalize_file(entry.path(), root, extension, label)? {
            changed += 1;
        }
    }
    log::debug!("Normalization complete: {} files changed.", changed);
    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn write_source(root: &Path, rel: &str, content: &str) -> PathBuf {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn inserts_header_and_blank_line_when_missing() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let file = write_source(root, "sub/file.go", "package sub\n\nfunc F() {}\n");

        let changed = normalize_file(&file, root, ".go", "internal").unwrap();

        assert!(changed);
        assert_eq!(
            fs::read_to_string(&file).unwrap(),
            "// internal/sub/file.go\n\npackage sub\n\nfunc F() {}\n"
        );
    }

    #[test]
    fn normalize_is_idempotent() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let file = write_source(root, "sub/file.go", "package sub\n");

        assert!(normalize_file(&file, root, ".go", "internal").unwrap());
        let after_first = fs::read_to_string(&file).unwrap();

        assert!(!normalize_file(&file, root, ".go", "internal").unwrap());
        assert_eq!(fs::read_to_string(&file).unwrap(), after_first);
    }

    #[test]
    fn already_normalized_file_is_untouched() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let content = "// internal/sub/file.go\n\npackage sub\n";
        let file = write_source(root, "sub/file.go", content);

        assert!(!normalize_file(&file, root, ".go", "internal").unwrap());
        assert_eq!(fs::read_to_string(&file).unwrap(), content);
    }

    #[test]
    fn stale_header_is_replaced_in_place() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let file = write_source(
            root,
            "sub/file.go",
            "// old/path.go\n\npackage sub\n\nvar X = 1\n",
        );

        assert!(normalize_file(&file, root, ".go", "internal").unwrap());
        assert_eq!(
            fs::read_to_string(&file).unwrap(),
            "// internal/sub/file.go\n\npackage sub\n\nvar X = 1\n"
        );
    }

    #[test]
    fn go_preamble_before_package_is_stripped() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let file = write_source(
            root,
            "main.go",
            "// Copyright 2024 Acme Inc.\n\
             // Licensed under the Apache License.\n\
             //\n\
             //go:build linux\n\
             \n\
             package main\n\
             \n\
             func main() {}\n",
        );

        assert!(normalize_file(&file, root, ".go", "internal").unwrap());
        assert_eq!(
            fs::read_to_string(&file).unwrap(),
            "// internal/main.go\n\npackage main\n\nfunc main() {}\n"
        );
    }

    #[test]
    fn blank_line_run_after_header_collapses_to_one() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let file = write_source(
            root,
            "a.go",
            "// internal/a.go\n\n\n\npackage a\n\nvar Y = 2\n",
        );

        assert!(normalize_file(&file, root, ".go", "internal").unwrap());
        // Blank lines inside the body stay untouched.
        assert_eq!(
            fs::read_to_string(&file).unwrap(),
            "// internal/a.go\n\npackage a\n\nvar Y = 2\n"
        );
    }

    #[test]
    fn missing_blank_line_after_header_is_inserted() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let file = write_source(root, "a.go", "// internal/a.go\npackage a\n");

        assert!(normalize_file(&file, root, ".go", "internal").unwrap());
        assert_eq!(
            fs::read_to_string(&file).unwrap(),
            "// internal/a.go\n\npackage a\n"
        );
    }

    #[test]
    fn non_go_extension_keeps_its_preamble() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let file = write_source(root, "app.dart", "import 'dart:io';\n\nvoid main() {}\n");

        assert!(normalize_file(&file, root, ".dart", "lib").unwrap());
        assert_eq!(
            fs::read_to_string(&file).unwrap(),
            "// lib/app.dart\n\nimport 'dart:io';\n\nvoid main() {}\n"
        );
    }

    #[test]
    fn empty_file_becomes_header_and_blank_line() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let file = write_source(root, "empty.go", "");

        assert!(normalize_file(&file, root, ".go", "internal").unwrap());
        assert_eq!(
            fs::read_to_string(&file).unwrap(),
            "// internal/empty.go\n\n"
        );
    }

    #[test]
    fn target_walk_honors_filters_and_dry_run() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let app = write_source(root, "app.dart", "void main() {}\n");
        let generated = write_source(root, "app.g.dart", "// generated\n");
        let other = write_source(root, "notes.txt", "notes\n");

        let would_change =
            normalize_target(root, ".dart", Some(".g.dart"), "lib", true).unwrap();
        assert_eq!(would_change, 1);
        // Dry run writes nothing.
        assert_eq!(fs::read_to_string(&app).unwrap(), "void main() {}\n");

        let changed = normalize_target(root, ".dart", Some(".g.dart"), "lib", false).unwrap();
        assert_eq!(changed, 1);
        assert_eq!(
            fs::read_to_string(&app).unwrap(),
            "// lib/app.dart\n\nvoid main() {}\n"
        );
        assert_eq!(fs::read_to_string(&generated).unwrap(), "// generated\n");
        assert_eq!(fs::read_to_string(&other).unwrap(), "notes\n");

        assert_eq!(
            normalize_target(root, ".dart", Some(".g.dart"), "lib", false).unwrap(),
            0
        );
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("gone");
        assert!(matches!(
            normalize_target(&missing, ".go", None, "internal", false),
            Err(AppError::MissingRoot { .. })
        ));
    }
}
