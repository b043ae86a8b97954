use crate::cli_args::NormalizeArgs;
use crate::commands::target_root;
use crate::load_config_for_command;
use anyhow::{Context, Result};
use colored::Colorize;
use log;
use srcdump_core::{self as core, Config};

pub fn handle_normalize_command(args: NormalizeArgs, quiet: bool) -> Result<()> {
    let project_root = Config::determine_project_root(args.project_config.project_root.as_ref())
        .context("Failed to determine project root")?;
    log::info!("Project root determined: {}", project_root.display());

    let config = load_config_for_command(&project_root, &args.project_config)
        .context("Failed to load configuration")?;

    let targets = config
        .select_targets(args.project_config.target.as_deref())
        .context("Failed to select targets")?;

    for target in targets {
        let Some(label) = target.subdirectory.as_deref() else {
            log::warn!(
                "Skipping target '{}': no subdirectory label configured.",
                target.name
            );
            continue;
        };

        if !quiet {
            println!("Processing {} files...", target.name.cyan());
        }

        let root = target_root(&project_root, target);
        if !root.exists() && config.general.skip_missing_roots {
            log::warn!(
                "Skipping target '{}': root directory missing: {}",
                target.name,
                root.display()
            );
            continue;
        }

        let changed = core::normalize_target(
            &root,
            &target.file_extension,
            target.excluded_suffix.as_deref(),
            label,
            args.dry_run,
        )
        .with_context(|| format!("Failed to normalize target '{}'", target.name))?;

        if !quiet {
            if args.dry_run {
                println!(
                    "{} {} file(s) would change in {}",
                    "🔍".blue(),
                    changed.to_string().cyan(),
                    root.display().to_string().dimmed()
                );
            } else {
                println!(
                    "{} {} file(s) normalized in {}",
                    "✅".green(),
                    changed.to_string().cyan(),
                    root.display().to_string().dimmed()
                );
            }
        }
    }

    Ok(())
}
