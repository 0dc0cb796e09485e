use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use anyhow::{bail, Context};
use kdiff_diff::{render_report, Differ, JsonRenderer, Palette, PlainPalette, ReportStats, TextRenderer};
use kdiff_manifest::{parse_objects, KubeObject};
use tracing::debug;

use crate::cli::Cli;
use crate::config::{KdiffConfig, OutputFormat};
use crate::palette::AnsiPalette;

/// Compare the two manifests named on the command line and write the report
/// to `out`.
pub fn run_command<W: Write>(cli: &Cli, out: W) -> anyhow::Result<ReportStats> {
    let config = resolve_config(cli)?;

    for path in [&cli.file1, &cli.file2] {
        check_file_exists(path)?;
    }
    let old = load_manifest(&cli.file1)?;
    let new = load_manifest(&cli.file2)?;

    let differ = Differ::new(config.identity);
    let stats = match config.output.format {
        OutputFormat::Text => {
            let palette: &dyn Palette = if config.output.color { &AnsiPalette } else { &PlainPalette };
            let mut renderer = TextRenderer::new(out, palette);
            let stats = render_report(&differ, &old, &new, &mut renderer)?;
            renderer.into_inner().flush()?;
            stats
        }
        OutputFormat::Json => {
            let mut renderer = JsonRenderer::new(out);
            let stats = render_report(&differ, &old, &new, &mut renderer)?;
            renderer.into_inner().flush()?;
            stats
        }
    };
    debug!(?stats, "report written");
    Ok(stats)
}

/// Command-line flags take precedence over the configuration file.
fn resolve_config(cli: &Cli) -> anyhow::Result<KdiffConfig> {
    let mut config = match &cli.config {
        Some(path) => KdiffConfig::load(path)?,
        None => KdiffConfig::default(),
    };
    if cli.no_color {
        config.output.color = false;
    }
    if let Some(format) = cli.format {
        config.output.format = format;
    }
    Ok(config)
}

/// Only a missing file is reported as such; other failures keep their cause.
fn check_file_exists(path: &Path) -> anyhow::Result<()> {
    match fs::metadata(path) {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => bail!("file '{}' does not exist", path.display()),
        Err(e) => Err(e).with_context(|| format!("cannot access {}", path.display())),
    }
}

fn load_manifest(path: &Path) -> anyhow::Result<Vec<KubeObject>> {
    let text = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let objects = parse_objects(&text).with_context(|| format!("error parsing {}", path.display()))?;
    debug!(path = %path.display(), objects = objects.len(), "loaded manifest");
    Ok(objects)
}
