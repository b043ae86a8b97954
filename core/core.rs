pub mod collect;
pub mod config;
pub mod dump;
pub mod error;
pub mod normalize;
pub mod tree;

pub use collect::{FileGroups, collect_files};
pub use config::{Config, GeneralConfig, OutputConfig, TargetConfig};
pub use dump::write_contents;
pub use error::{AppError, Result};
pub use normalize::{normalize_file, normalize_target};
pub use tree::write_tree;
