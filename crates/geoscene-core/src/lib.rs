//! # GeoScene Core
//!
//! Core types shared by the GeoScene crates: the GeoJSON tree model,
//! bounding-box algebra, the error taxonomy and the ingestion boundary that
//! hands parsed trees to the scene engine.

pub mod bbox;
pub mod error;
pub mod geo;
pub mod ingest;

pub use bbox::{merge_optional, BoundingBox};
pub use error::{SceneError, SceneResult};
pub use geo::{Feature, GeoNode, Position, Properties};
pub use ingest::{CommitOutcome, LoadTicket, SourceSlot};
