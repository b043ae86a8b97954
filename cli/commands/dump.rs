use crate::cli_args::DumpArgs;
use crate::commands::{resolve_path, target_root};
use crate::load_config_for_command;
use anyhow::{Context, Result};
use colored::Colorize;
use log;
use srcdump_core::{self as core, Config};

pub fn handle_dump_command(args: DumpArgs, quiet: bool) -> Result<()> {
    let project_root = Config::determine_project_root(args.project_config.project_root.as_ref())
        .context("Failed to determine project root")?;
    log::info!("Project root determined: {}", project_root.display());

    let config = load_config_for_command(&project_root, &args.project_config)
        .context("Failed to load configuration")?;

    let targets = config
        .select_targets(args.project_config.target.as_deref())
        .context("Failed to select targets")?;

    let tree_base = args
        .tree_file
        .as_deref()
        .unwrap_or(config.output.tree_file.as_path());
    let content_base = args
        .content_file
        .as_deref()
        .unwrap_or(config.output.content_file.as_path());

    for target in targets {
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
            if !quiet {
                println!(
                    "{} Skipped {} (missing root: {})",
                    "⚠️".yellow(),
                    target.name,
                    root.display().to_string().dimmed()
                );
            }
            continue;
        }

        if !args.no_tree {
            let tree_path =
                resolve_path(&project_root, &config.target_output_path(tree_base, target));
            core::write_tree(&root, &tree_path, &config.general.tree_command).with_context(
                || format!("Failed to write tree listing for target '{}'", target.name),
            )?;
            if !quiet {
                println!(
                    "{} Tree structure saved to: {}",
                    "✅".green(),
                    tree_path.display().to_string().blue()
                );
            }
        }

        let groups = core::collect_files(
            &root,
            &target.file_extension,
            target.excluded_suffix.as_deref(),
        )
        .with_context(|| format!("Failed to collect files for target '{}'", target.name))?;

        let content_path =
            resolve_path(&project_root, &config.target_output_path(content_base, target));
        core::write_contents(&groups, &content_path)
            .with_context(|| format!("Failed to write content dump for target '{}'", target.name))?;
        if !quiet {
            println!(
                "{} Files content written to: {}",
                "✅".green(),
                content_path.display().to_string().blue()
            );
        }
    }

    Ok(())
}
