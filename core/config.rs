use crate::error::{AppError, Result};
use log;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILENAME: &str = "srcdump.toml";
pub const DEFAULT_TREE_COMMAND: &str = "tree";
pub const DEFAULT_TREE_FILE: &str = "tree_structure.txt";
pub const DEFAULT_CONTENT_FILE: &str = "files_content.txt";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub targets: Vec<TargetConfig>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    /// External executable used by the tree reporter.
    #[serde(default = "default_tree_command")]
    pub tree_command: String,
    /// When true, a target whose root directory is missing yields an empty
    /// result instead of aborting the run.
    #[serde(default = "default_false")]
    pub skip_missing_roots: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default = "default_tree_file")]
    pub tree_file: PathBuf,
    #[serde(default = "default_content_file")]
    pub content_file: PathBuf,
}

/// One dump/normalize target: a root directory plus its file filters.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
    pub name: String,
    pub root_directory: PathBuf,
    pub file_extension: String,
    #[serde(default)]
    pub excluded_suffix: Option<String>,
    /// Label prefixed to relative paths in normalized header comments.
    /// Targets without one are skipped by the normalize pipeline.
    #[serde(default)]
    pub subdirectory: Option<String>,
}

fn default_false() -> bool {
    false
}
fn default_tree_command() -> String {
    DEFAULT_TREE_COMMAND.to_string()
}
fn default_tree_file() -> PathBuf {
    PathBuf::from(DEFAULT_TREE_FILE)
}
fn default_content_file() -> PathBuf {
    PathBuf::from(DEFAULT_CONTENT_FILE)
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            tree_command: default_tree_command(),
            skip_missing_roots: default_false(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            tree_file: default_tree_file(),
            content_file: default_content_file(),
        }
    }
}

impl Config {
    pub fn determine_project_root(cli_project_root: Option<&PathBuf>) -> Result<PathBuf> {
        let path_to_resolve = match cli_project_root {
            Some(p) => PathBuf::from(shellexpand::tilde(&p.to_string_lossy()).as_ref()),
            None => env::current_dir().map_err(AppError::Io)?,
        };

        path_to_resolve.canonicalize().map_err(|e| {
            AppError::Io(std::io::Error::new(
                e.kind(),
                format!(
                    "Failed to canonicalize project root '{}': {}",
                    path_to_resolve.display(),
                    e
                ),
            ))
        })
    }

    pub fn resolve_config_path(
        project_root: &Path,
        cli_config_file: Option<&String>,
        cli_disable_config: bool,
    ) -> Result<Option<PathBuf>> {
        if cli_disable_config {
            log::debug!("Config file loading disabled via CLI flag.");
            return Ok(None);
        }

        match cli_config_file {
            Some(p_str) => {
                let expanded = shellexpand::tilde(p_str);
                let mut path = PathBuf::from(expanded.as_ref());
                if !path.is_absolute() {
                    path = project_root.join(path);
                }
                if !path.exists() {
                    return Err(AppError::Config(format!(
                        "Specified config file not found at path: {}",
                        path.display()
                    )));
                }
                log::debug!("Using specified config file path: {}", path.display());
                Ok(Some(path))
            }
            None => {
                let default_path = project_root.join(DEFAULT_CONFIG_FILENAME);
                if default_path.exists() {
                    log::debug!("Using default config file path: {}", default_path.display());
                    Ok(Some(default_path))
                } else {
                    log::debug!(
                        "No config file specified and default not found at: {}",
                        default_path.display()
                    );
                    Ok(None)
                }
            }
        }
    }

    pub fn load_from_path(config_path: &Path) -> Result<Self> {
        log::info!("Loading configuration from: {}", config_path.display());
        let toml_content = fs::read_to_string(config_path).map_err(|e| AppError::FileRead {
            path: config_path.to_path_buf(),
            source: e,
        })?;
        toml::from_str::<Config>(&toml_content).map_err(|e| {
            AppError::TomlParse(format!(
                "Error parsing config file '{}': {}. Check TOML syntax and structure.",
                config_path.display(),
                e
            ))
        })
    }

    /// Targets selected for a run. A `name` filter matches case-insensitively.
    pub fn select_targets(&self, name: Option<&str>) -> Result<Vec<&TargetConfig>> {
        let selected: Vec<&TargetConfig> = match name {
            Some(n) => self
                .targets
                .iter()
                .filter(|t| t.name.eq_ignore_ascii_case(n))
                .collect(),
            None => self.targets.iter().collect(),
        };
        if selected.is_empty() {
            return Err(match name {
                Some(n) => {
                    AppError::InvalidArgument(format!("No target named '{}' in configuration", n))
                }
                None => AppError::Config("No targets defined in configuration".to_string()),
            });
        }
        Ok(selected)
    }

    /// Per-target output path: with a single target the configured path is
    /// used as-is; with several, the slugified target name is appended before
    /// the extension so successive targets do not overwrite each other.
    pub fn target_output_path(&self, base: &Path, target: &TargetConfig) -> PathBuf {
        if self.targets.len() <= 1 {
            return base.to_path_buf();
        }
        let slug: String = target
            .name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_lowercase()
                } else {
                    '-'
                }
            })
            .collect();
        match base.extension() {
            Some(ext) => base.with_extension(format!("{}.{}", slug, ext.to_string_lossy())),
            None => base.with_extension(slug),
        }
    }
}
