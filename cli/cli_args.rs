use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Args, Debug, Clone, Default)]
pub struct ProjectConfigOpts {
    #[arg(
        long,
        help = "Specify the target project directory (default: current dir).",
        help_heading = "Project Setup",
        value_name = "PATH"
    )]
    pub project_root: Option<PathBuf>,

    #[arg(
        long,
        help = "Specify path of the TOML config file (default: srcdump.toml in the project root).",
        value_name = "CONFIG_FILE",
        conflicts_with = "disable_config_file",
        help_heading = "Project Setup"
    )]
    pub config_file: Option<String>,

    #[arg(
        long,
        help = "Disable loading any TOML config file.",
        conflicts_with = "config_file",
        help_heading = "Project Setup"
    )]
    pub disable_config_file: bool,

    #[arg(
        long,
        help = "Process only the named target (default: all configured targets).",
        value_name = "NAME",
        help_heading = "Project Setup"
    )]
    pub target: Option<String>,
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Dump source trees for review and keep header comments in sync.",
    long_about = "srcdump walks configured source directories and either dumps every \nmatching file (plus a tree listing) into flat review files, or rewrites \neach file's leading comment to name its path relative to the target root.",
    help_template = "{about-section}\nUsage: {usage}\n\n{all-args}{after-help}",
    after_help = "EXAMPLES:\n  srcdump dump\n  srcdump dump --target api --content-file review.txt\n  srcdump normalize --dry-run",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(short, long, action = clap::ArgAction::Count, global = true, help = "Increase message verbosity (-v, -vv).")]
    pub verbose: u8,

    #[arg(
        short,
        long,
        global = true,
        help = "Silence informational messages and warnings."
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    #[command(
        visible_alias = "d",
        about = "Write the tree listing and full-content dump for each target."
    )]
    Dump(DumpArgs),

    #[command(
        visible_alias = "n",
        about = "Rewrite each source file's leading path comment in place."
    )]
    Normalize(NormalizeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct DumpArgs {
    #[command(flatten)]
    pub project_config: ProjectConfigOpts,

    #[arg(
        long,
        help = "Override the tree listing output path.",
        value_name = "PATH",
        help_heading = "Output"
    )]
    pub tree_file: Option<PathBuf>,

    #[arg(
        long,
        help = "Override the content dump output path.",
        value_name = "PATH",
        help_heading = "Output"
    )]
    pub content_file: Option<PathBuf>,

    #[arg(
        long,
        help = "Skip the external tree listing and only write the content dump.",
        help_heading = "Output"
    )]
    pub no_tree: bool,
}

#[derive(Args, Debug, Clone)]
pub struct NormalizeArgs {
    #[command(flatten)]
    pub project_config: ProjectConfigOpts,

    #[arg(
        long,
        help = "Report the files that would change without writing anything.",
        help_heading = "Safety"
    )]
    pub dry_run: bool,
}
