//! Error handling for GeoScene
//!
//! Conversion failures are synchronous and fail-fast: the first invalid
//! substructure aborts the request and no partial scene is produced.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Scene conversion error type
///
/// Represents structural problems in the input tree and invalid request
/// parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// A coordinate entry does not have 2 or 3 finite components
    #[error("Found malformed position {position:?}: {reason}")]
    MalformedPosition {
        /// The offending coordinate values.
        position: Vec<f64>,
        /// Why the position was rejected.
        reason: String,
    },

    /// A LineString (or MultiLineString member) has fewer than 2 points
    #[error("Found LineString with less than 2 points ({points} given)")]
    MalformedLineString {
        /// The raw number of points in the rejected line.
        points: usize,
    },

    /// A Polygon (or MultiPolygon member) has no exterior ring
    #[error("No bounding polygon specified: {reason}")]
    MalformedPolygon {
        /// Why the polygon was rejected.
        reason: String,
    },

    /// A node appeared where a geometry was required
    #[error("Unrecognized geometry type: {found}")]
    UnrecognizedGeometryType {
        /// The tag of the node that was found.
        found: String,
    },

    /// Precision outside the closed unit interval
    #[error("Precision must be within [0, 1], got {value}")]
    InvalidPrecision {
        /// The rejected value.
        value: f64,
    },

    /// GeoJSON text could not be deserialized into a tree
    #[error("Failed to parse GeoJSON: {reason}")]
    Parse {
        /// The deserializer message.
        reason: String,
    },
}

impl SceneError {
    /// Create a malformed-position error for the given coordinates
    pub fn malformed_position(position: &[f64], reason: impl Into<String>) -> Self {
        SceneError::MalformedPosition {
            position: position.to_vec(),
            reason: reason.into(),
        }
    }

    /// Check if this error was caused by the shape of the input tree
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            SceneError::MalformedPosition { .. }
                | SceneError::MalformedLineString { .. }
                | SceneError::MalformedPolygon { .. }
                | SceneError::UnrecognizedGeometryType { .. }
        )
    }
}

impl From<serde_json::Error> for SceneError {
    fn from(err: serde_json::Error) -> Self {
        SceneError::Parse {
            reason: err.to_string(),
        }
    }
}

/// Result type using SceneError
pub type SceneResult<T> = std::result::Result<T, SceneError>;
