//! # GeoScene Viewport
//!
//! Pan/zoom state machine over a rendered [`geoscene_render::Scene`].

pub mod viewport;

pub use viewport::{DragState, PointerButton, PointerEvent, ViewportController, ZoomOptions};
