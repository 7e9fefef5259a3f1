//! Download command

use anyhow::{Context, Result};
use pyembed_core::{HierarchicalConfigLoader, Settings};
use pyembed_fetch::{Pipeline, PipelineReport, RunOutcome};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::cli::DownloadArgs;
use crate::output;

pub async fn run(args: DownloadArgs, quiet: bool) -> Result<()> {
    let mut config = HierarchicalConfigLoader::new()?
        .load_runtime_config()
        .context("Failed to load runtime configuration")?;

    // CLI flags sit on top of the config hierarchy
    if let Some(base_url) = &args.base_url {
        config.network.base_url = base_url.clone();
    }
    if quiet {
        config.network.show_progress = false;
    }
    debug!("Runtime config: {:?}", config);

    let settings = Settings::new(
        args.version.clone(),
        args.arch,
        args.include_debug(),
        args.include_stdlib(),
    )?;
    let output_dir = resolve_output_dir(args.dir.as_deref(), &settings)?;
    let use_cache = args.use_cache();

    if !quiet {
        output::header("Python embeddable runtime");
        output::kv("Version", settings.version());
        output::kv("Architecture", settings.arch().url_name());
        output::kv("Debug", output::yes_no(settings.debug()));
        output::kv("Stdlib", output::yes_no(settings.stdlib()));
        output::kv("Output", &output_dir.display().to_string());
        output::kv("Mirror", config.network.base_url());
        println!();

        if !use_cache && output_dir.exists() {
            output::warning(&format!(
                "Existing contents of {} will be replaced",
                output_dir.display()
            ));
        }
    }

    let pipeline = Pipeline::from_config(&config)?;
    let outcome = pipeline
        .run_with_cache(&settings, &output_dir, use_cache)
        .await
        .with_context(|| format!("Failed to download {}", settings))?;

    if quiet {
        return Ok(());
    }

    match outcome {
        RunOutcome::Cached => {
            output::info(&format!("{} is up to date", output_dir.display()));
        }
        RunOutcome::Downloaded(report) => print_summary(&settings, &report),
    }

    Ok(())
}

/// Resolve `--dir` against the current directory, or fall back to the
/// default directory beside this tool
fn resolve_output_dir(dir: Option<&Path>, settings: &Settings) -> Result<PathBuf> {
    match dir {
        Some(dir) => std::path::absolute(dir)
            .with_context(|| format!("Failed to resolve {}", dir.display())),
        None => Ok(settings.default_output_dir()),
    }
}

fn print_summary(settings: &Settings, report: &PipelineReport) {
    output::success(&format!(
        "Installed {} into {}",
        settings,
        report.output_dir.display()
    ));
    output::kv("Packages", &report.packages.join(", "));

    if let Some(stdlib) = &report.stdlib {
        let names: Vec<String> = stdlib
            .archives
            .iter()
            .chain(&stdlib.debug_copies)
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();
        output::kv("Stdlib", &names.join(", "));
    }

    output::kv("Cache marker", &report.marker.display().to_string());
}
