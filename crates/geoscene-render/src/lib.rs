//! # GeoScene Render
//!
//! Converts a GeoJSON tree into a [`Scene`] of drawable primitives:
//!
//! - [`precision`]: coordinate rounding and stride decimation
//! - [`labels`]: display-name selection from feature properties
//! - [`style`]: deterministic per-feature fill colors
//! - [`walker`]: the tree-to-scene conversion
//! - [`cache`]: single-entry scene cache keyed by precision
//! - [`svg`]: SVG serialization

pub mod cache;
pub mod labels;
pub mod options;
pub mod precision;
pub mod scene;
pub mod style;
pub mod svg;
pub mod walker;

pub use cache::SceneCache;
pub use labels::{resolve_label, resolve_label_or, FALLBACK_LABEL};
pub use options::RenderOptions;
pub use precision::{Precision, StrideDecimator};
pub use scene::{
    Color, DrawablePrimitive, ElementId, FeatureGroup, FillRule, LabelPrimitive, Length, Scene,
    SceneNode, ScenePoint, Shape, Style, SubPath,
};
pub use style::{color_for_seed, SeedSource, SeededSeeds, StyleAssigner, ThreadSeeds};
pub use svg::{render_document, render_elements, SvgOptions};
pub use walker::convert;
