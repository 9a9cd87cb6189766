use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use geoscene::{init_logging, Config, Document, Precision, BUILD_DATE, VERSION};
use tracing::info;

#[derive(Parser)]
#[command(name = "geoscene")]
#[command(about = "Convert GeoJSON to an SVG scene")]
#[command(version)]
struct Cli {
    /// Input GeoJSON file
    input: PathBuf,

    /// Output path (defaults to the input filename with .svg extension, `-` for stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Precision in [0, 1]: 0 keeps every point, 1 keeps the fewest
    #[arg(short, long)]
    precision: Option<f64>,

    /// Config file (.toml or .json); defaults to the platform config directory
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output width in pixels
    #[arg(long)]
    width: Option<f64>,

    /// Output height in pixels
    #[arg(long)]
    height: Option<f64>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;
    info!("geoscene {} (built {})", VERSION, BUILD_DATE);

    let mut config = Config::load_or_default(cli.config.as_deref())?;
    if let Some(p) = cli.precision {
        config.render.precision = Precision::new(p)?;
    }
    if let Some(w) = cli.width {
        config.viewport.pixel_width = w;
    }
    if let Some(h) = cli.height {
        config.viewport.pixel_height = h;
    }
    config.validate()?;

    let text = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("Failed to read {}", cli.input.display()))?;

    let precision = config.render.precision;
    let mut document = Document::new(config);
    document.load_str(&text)?;
    let (svg, summary) = document.render_svg(precision)?;

    let output = cli
        .output
        .unwrap_or_else(|| cli.input.with_extension("svg"));
    if output.as_os_str() == "-" {
        print!("{}", svg);
    } else {
        std::fs::write(&output, svg)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        info!("Wrote {}", output.display());
    }
    info!(
        "{} primitives, {} labels, bbox {}",
        summary.primitives, summary.labels, summary.bbox
    );

    Ok(())
}
