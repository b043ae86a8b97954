use crate::collect::FileGroups;
use crate::error::{AppError, Result};
use log;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

const FILE_SEPARATOR_WIDTH: usize = 40;

/// Writes the full content of every collected file to `output_path`, grouped
/// by directory. The existing file is truncated.
///
/// Format per directory: a `Directory:` header with an `=` underline, then per
/// file a `File:` header with a `-` underline, the raw content, and a 40-dash
/// separator. A read failure on any file aborts the dump.
pub fn write_contents(groups: &FileGroups, output_path: &Path) -> Result<()> {
    log::info!("Writing file contents to: {}", output_path.display());
    let file = File::create(output_path).map_err(|e| AppError::FileWrite {
        path: output_path.to_path_buf(),
        source: e,
    })?;
    let mut writer = BufWriter::new(file);

    let write_err = |e: std::io::Error| AppError::FileWrite {
        path: output_path.to_path_buf(),
        source: e,
    };

    for (directory, files) in groups {
        let dir_header = format!("Directory: {}", directory.display());
        writeln!(writer, "{}", dir_header).map_err(write_err)?;
        writeln!(writer, "{}", "=".repeat(dir_header.len())).map_err(write_err)?;
        writeln!(writer).map_err(write_err)?;

        for path in files {
            let file_header = format!("File: {}", path.display());
            writeln!(writer, "{}", file_header).map_err(write_err)?;
            writeln!(writer, "{}", "-".repeat(file_header.len())).map_err(write_err)?;

            let content = fs::read_to_string(path).map_err(|e| AppError::FileRead {
                path: path.clone(),
                source: e,
            })?;
            writer.write_all(content.as_bytes()).map_err(write_err)?;

            writeln!(writer, "\n{}", "-".repeat(FILE_SEPARATOR_WIDTH)).map_err(write_err)?;
            writeln!(writer).map_err(write_err)?;
        }
    }

    writer.flush().map_err(write_err)?;
    log::debug!("Content dump complete ({} directories).", groups.len());
    Ok(())
}
