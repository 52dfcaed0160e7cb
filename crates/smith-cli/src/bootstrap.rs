use std::path::Path;

use anyhow::Context;
use smith_config::SmithConfig;

use crate::cli::Cli;

/// `.env`, then files, environment and flags, in rising priority.
pub fn load_config(cli: &Cli, project_root: &Path) -> anyhow::Result<SmithConfig> {
    SmithConfig::load_dotenv(project_root);

    let config = SmithConfig::load_with_overrides(
        project_root,
        cli.config.as_deref(),
        &cli.overrides(),
    )
    .with_context(|| {
        format!(
            "failed to load configuration for {}",
            project_root.display()
        )
    })?;

    tracing::debug!(
        base = %config.source.base,
        roots = ?config.source.roots,
        namespace = %config.target.namespace,
        method_format = %config.target.method_format,
        "configuration loaded"
    );
    Ok(config)
}
