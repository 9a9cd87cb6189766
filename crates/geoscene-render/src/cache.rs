//! Single-entry scene cache keyed by precision.

use std::sync::Arc;

use geoscene_core::{BoundingBox, GeoNode, SceneResult};
use tracing::debug;

use crate::options::RenderOptions;
use crate::precision::Precision;
use crate::scene::Scene;
use crate::style::{SeedSource, StyleAssigner, ThreadSeeds};
use crate::walker::convert;

/// Holds the most recent scene and the precision that built it.
///
/// The cache is a plain value owned by its caller. Repeated requests at the
/// same precision hand back the same `Arc`, so callers can detect a changed
/// scene by pointer identity.
#[derive(Debug, Default)]
pub struct SceneCache<S = ThreadSeeds> {
    styles: StyleAssigner<S>,
    options: RenderOptions,
    scene: Option<Arc<Scene>>,
    precision: Precision,
}

impl SceneCache<ThreadSeeds> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: SeedSource> SceneCache<S> {
    /// Creates a cache whose style assigner draws replacement seeds from `source`.
    pub fn with_seed_source(source: S) -> Self {
        Self {
            styles: StyleAssigner::with_source(source),
            options: RenderOptions::default(),
            scene: None,
            precision: Precision::FULL,
        }
    }

    /// Replaces the render options. Drops any held scene.
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self.scene = None;
        self
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Whether a request at `precision` would rebuild.
    pub fn needs_update(&self, precision: Precision, refresh: bool) -> bool {
        refresh || self.scene.is_none() || self.precision != precision
    }

    /// Returns the cached scene, rebuilding it when `refresh` is set, the
    /// precision differs, or nothing is held yet.
    ///
    /// The held scene is replaced only when the build succeeds; on error the
    /// previous scene stays available through [`SceneCache::current`].
    pub fn get_or_build(
        &mut self,
        tree: &GeoNode,
        precision: Precision,
        refresh: bool,
    ) -> SceneResult<Arc<Scene>> {
        if !self.needs_update(precision, refresh) {
            if let Some(scene) = &self.scene {
                debug!("Scene cache hit at precision {}", precision);
                return Ok(Arc::clone(scene));
            }
        }

        debug!(
            "Rebuilding scene (precision {} -> {}, refresh {})",
            self.precision, precision, refresh
        );
        let scene = Arc::new(convert(tree, precision, &mut self.styles, &self.options)?);
        self.scene = Some(Arc::clone(&scene));
        self.precision = precision;
        Ok(scene)
    }

    /// The held scene, if any.
    pub fn current(&self) -> Option<&Arc<Scene>> {
        self.scene.as_ref()
    }

    /// Precision of the held scene.
    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Bounding box of the held scene, or `(0, 0, 0, 0)` before any build.
    pub fn bbox(&self) -> BoundingBox {
        self.scene.as_ref().map(|s| s.bbox).unwrap_or_default()
    }

    /// Drops the held scene so the next request rebuilds.
    pub fn invalidate(&mut self) {
        debug!("Scene cache invalidated");
        self.scene = None;
    }
}
