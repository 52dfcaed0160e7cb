use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use smith_gen::{Generator, GeneratorSettings};

mod bootstrap;
mod cli;
mod output;
mod progress;

fn main() {
    if let Err(error) = run() {
        eprintln!("tsmith error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;
    progress::init(cli.format, cli.quiet);

    let project_root = resolve_project_root(cli.project.as_deref())?;
    let config = bootstrap::load_config(&cli, &project_root)?;

    let settings = GeneratorSettings::from_config(&config, &project_root);
    let generator = Generator::new(settings).context("cannot use the skeleton test class")?;

    let files = generator.scan();
    let total = u64::try_from(files.len()).unwrap_or(u64::MAX);
    let progress = progress::Progress::bar(total, "parsing sources");
    let summary = generator.generate(&files, &|path: &Path| {
        progress.inc(1);
        if let Some(name) = path.file_name() {
            progress.set_message(&name.to_string_lossy());
        }
    });
    progress.finish_clear();

    if generator.settings().dry_run {
        tracing::warn!("dry run: no files were written");
    }
    output::output(&summary, cli.format)
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("TESTSMITH_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

fn resolve_project_root(project_override: Option<&Path>) -> anyhow::Result<PathBuf> {
    if let Some(path) = project_override {
        if path.is_dir() {
            return Ok(path.to_path_buf());
        }
        anyhow::bail!(
            "invalid --project '{}': directory does not exist",
            path.display()
        );
    }

    std::env::current_dir().context("failed to read current directory")
}
