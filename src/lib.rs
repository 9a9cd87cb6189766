//! # GeoScene
//!
//! Converts GeoJSON trees into precision-tunable 2D vector scenes and drives
//! a pan/zoom viewport over them.
//!
//! ## Architecture
//!
//! GeoScene is organized as a workspace with multiple crates:
//!
//! 1. **geoscene-core** - GeoJSON tree model, bounding boxes, errors, ingestion
//! 2. **geoscene-render** - Precision control, labels, styling, conversion, caching, SVG
//! 3. **geoscene-viewport** - Pan/zoom state machine
//! 4. **geoscene-settings** - Configuration files
//! 5. **geoscene** - Pipeline and the `geoscene` command-line tool
//!
//! ## Features
//!
//! - **Precision Control**: one knob trades point count and rounding for fidelity
//! - **Stable Styling**: fill colors derived from feature names
//! - **Hover Labels**: hidden labels revealed over their feature
//! - **Zoom-to-Cursor**: the scene point under the pointer stays put

pub mod pipeline;

pub use geoscene_core::{BoundingBox, Feature, GeoNode, Position, SceneError, SceneResult, SourceSlot};
pub use geoscene_render::{
    convert, render_document, render_elements, Precision, RenderOptions, Scene, SceneCache,
    StyleAssigner, SvgOptions,
};
pub use geoscene_settings::{Config, SettingsError};
pub use geoscene_viewport::{PointerEvent, ViewportController, ZoomOptions};
pub use pipeline::{geojson_to_svg, Document, RenderSummary};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging with:
/// - Output on stderr, leaving stdout free for SVG output
/// - RUST_LOG environment variable support, falling back to `default_level`
pub fn init_logging(default_level: &str) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
