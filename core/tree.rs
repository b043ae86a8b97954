use crate::error::{AppError, Result};
use log;
use std::fs;
use std::path::Path;
use std::process::Command;

/// Runs the external tree-listing command against `root` and writes its
/// stdout verbatim to `output_path`, overwriting any previous listing.
///
/// A missing executable or a non-zero exit is a `ProcessExecution` error and
/// propagates to the caller.
pub fn write_tree(root: &Path, output_path: &Path, command: &str) -> Result<()> {
    log::info!(
        "Running '{} {}' for tree listing...",
        command,
        root.display()
    );
    let output = Command::new(command).arg(root).output().map_err(|e| {
        AppError::ProcessExecution(format!(
            "Failed to run '{} {}': {}",
            command,
            root.display(),
            e
        ))
    })?;

    if !output.status.success() {
        return Err(AppError::ProcessExecution(format!(
            "'{} {}' exited with {}: {}",
            command,
            root.display(),
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    fs::write(output_path, &output.stdout).map_err(|e| AppError::FileWrite {
        path: output_path.to_path_buf(),
        source: e,
    })?;
    log::debug!("Tree listing saved to: {}", output_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn captures_command_stdout_verbatim() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("tree.txt");
        // `echo <root>` stands in for a real tree command.
        write_tree(dir.path(), &out, "echo").unwrap();
        let listing = fs::read_to_string(&out).unwrap();
        assert_eq!(listing, format!("{}\n", dir.path().display()));
    }

    #[test]
    fn missing_command_is_a_process_execution_error() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("tree.txt");
        let result = write_tree(dir.path(), &out, "srcdump-no-such-command");
        assert!(matches!(result, Err(AppError::ProcessExecution(_))));
        assert!(!out.exists());
    }

    #[test]
    fn non_zero_exit_is_a_process_execution_error() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("tree.txt");
        let result = write_tree(dir.path(), &out, "false");
        assert!(matches!(result, Err(AppError::ProcessExecution(_))));
    }
}
