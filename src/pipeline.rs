//! GeoJSON text to SVG document, end to end.

use std::sync::Arc;

use anyhow::{bail, Context};
use geoscene_core::{BoundingBox, CommitOutcome, GeoNode, SourceSlot};
use geoscene_render::{render_document, Precision, Scene, SceneCache};
use geoscene_settings::Config;
use geoscene_viewport::ViewportController;
use tracing::info;

/// Counts and extents of one rendered document.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSummary {
    pub primitives: usize,
    pub labels: usize,
    pub bbox: BoundingBox,
    pub view_box: String,
}

/// Holds the loaded source, the scene cache and the viewport for one document.
#[derive(Debug)]
pub struct Document {
    slot: SourceSlot,
    cache: SceneCache,
    viewport: ViewportController,
    config: Config,
    /// Set when a new source was committed but not yet converted.
    stale: bool,
}

impl Document {
    pub fn new(config: Config) -> Self {
        let viewport = ViewportController::new(
            config.viewport.pixel_width,
            config.viewport.pixel_height,
            BoundingBox::default(),
        )
        .with_zoom_options(config.viewport.zoom.clone());
        Self {
            slot: SourceSlot::new(),
            cache: SceneCache::new().with_options(config.render.clone()),
            viewport,
            config,
            stale: false,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut ViewportController {
        &mut self.viewport
    }

    /// Parses GeoJSON text and makes it the current source.
    ///
    /// The next [`Document::scene`] call rebuilds. The previously built scene
    /// stays held until that rebuild succeeds.
    pub fn load_str(&mut self, text: &str) -> anyhow::Result<()> {
        let ticket = self.slot.begin_load();
        let tree = GeoNode::from_json_str(text).context("Failed to parse GeoJSON")?;
        if self.slot.commit(ticket, tree) == CommitOutcome::Stale {
            bail!("A newer load superseded this one");
        }
        self.stale = true;
        Ok(())
    }

    /// Builds (or reuses) the scene at `precision` and binds it to the viewport.
    pub fn scene(&mut self, precision: Precision, refresh: bool) -> anyhow::Result<Arc<Scene>> {
        let Some(tree) = self.slot.current() else {
            bail!("No GeoJSON loaded");
        };
        let tree = Arc::clone(tree);
        let scene = self
            .cache
            .get_or_build(&tree, precision, refresh || self.stale)
            .context("Failed to convert GeoJSON")?;
        self.stale = false;
        self.viewport.sync_scene(&scene);
        Ok(scene)
    }

    /// The last successfully built scene, if any.
    pub fn current_scene(&self) -> Option<&Arc<Scene>> {
        self.cache.current()
    }

    /// Serializes the scene at `precision` through the current view.
    pub fn render_svg(&mut self, precision: Precision) -> anyhow::Result<(String, RenderSummary)> {
        let scene = self.scene(precision, false)?;
        let (width, height) = self.viewport.pixel_size();
        let svg = render_document(
            &scene,
            &self.viewport.view_rect(),
            width,
            height,
            &self.config.output.svg_options(),
        );
        let summary = RenderSummary {
            primitives: scene.primitive_count(),
            labels: scene.labels.len(),
            bbox: scene.bbox,
            view_box: self.viewport.view_box_string(),
        };
        info!(
            "Rendered {} primitives and {} labels, viewBox {}",
            summary.primitives, summary.labels, summary.view_box
        );
        Ok((svg, summary))
    }
}

/// Converts GeoJSON text to an SVG document using `config`.
pub fn geojson_to_svg(text: &str, config: &Config) -> anyhow::Result<(String, RenderSummary)> {
    let mut document = Document::new(config.clone());
    document.load_str(text)?;
    document.render_svg(config.render.precision)
}
