//! Extract command implementation.

use crate::cli::Cli;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Context;
use anyhow::Result;
use log::error;
use untar_core::ExtractionConfig;
use untar_core::extract_archive;
use untar_core::types::DestDir;

/// Extracts every archive argument in order.
///
/// Failures are reported per archive and never stop the remaining ones,
/// including failures to print a result.
/// Only an unusable output directory is returned as an error.
pub fn execute(cli: &Cli, formatter: &dyn OutputFormatter) -> Result<()> {
    let dest = match &cli.directory {
        Some(dir) => DestDir::new(dir)
            .with_context(|| format!("invalid output directory '{}'", dir.display()))?,
        None => DestDir::current().context("failed to get current directory")?,
    };

    let config = ExtractionConfig {
        preserve_permissions: !cli.no_preserve_permissions,
        ..Default::default()
    };

    for archive in &cli.archives {
        let result = {
            let mut progress = CliProgress::new(formatter, cli.quiet, cli.json);
            add_archive_context(
                extract_archive(archive, &dest, &config, &mut progress),
                archive,
            )
        };

        match result {
            Ok(report) => {
                if let Err(e) = formatter.format_extraction_result(archive, &report) {
                    error!("failed to report result for {}: {e:#}", archive.display());
                }
            }
            Err(err) => formatter.format_error(archive, &err),
        }
    }

    Ok(())
}
