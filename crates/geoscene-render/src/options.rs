//! Conversion options shared by the walker, the cache and the SVG writer.

use serde::{Deserialize, Serialize};

use crate::labels::FALLBACK_LABEL;
use crate::precision::Precision;
use crate::scene::{Color, Length};

/// Stroke width of every primitive, as a percentage of the viewport.
pub const STROKE_WIDTH_PERCENT: f64 = 0.1;
/// Radius of point markers, as a percentage of the viewport.
pub const POINT_RADIUS_PERCENT: f64 = 0.1;

/// Styling constants applied during conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Default precision used when the caller does not pass one.
    pub precision: Precision,
    pub stroke_color: String,
    pub stroke_width_percent: f64,
    pub point_radius_percent: f64,
    /// Label font size in drawing units.
    pub label_font_size: f64,
    pub fallback_label: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            precision: Precision::FULL,
            stroke_color: "black".to_string(),
            stroke_width_percent: STROKE_WIDTH_PERCENT,
            point_radius_percent: POINT_RADIUS_PERCENT,
            label_font_size: STROKE_WIDTH_PERCENT * 10.0,
            fallback_label: FALLBACK_LABEL.to_string(),
        }
    }
}

impl RenderOptions {
    pub fn stroke(&self) -> Color {
        Color::new(self.stroke_color.clone())
    }

    pub fn stroke_width(&self) -> Length {
        Length::Percent(self.stroke_width_percent)
    }

    pub fn point_radius(&self) -> Length {
        Length::Percent(self.point_radius_percent)
    }

    /// Checks that every size is positive and finite.
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("stroke_width_percent", self.stroke_width_percent),
            ("point_radius_percent", self.point_radius_percent),
            ("label_font_size", self.label_font_size),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("{} must be positive, got {}", name, value));
            }
        }
        if self.stroke_color.trim().is_empty() {
            return Err("stroke_color must not be empty".to_string());
        }
        Ok(())
    }
}
