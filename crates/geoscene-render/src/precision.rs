//! Precision control: coordinate rounding and stride decimation.
//!
//! A precision of 0 keeps every point at 10 decimal places; a precision of 1
//! keeps only one seam point per sequence, rounded to whole units.
//!
//! Decimation is a fixed-stride pattern driven by a fractional counter, not
//! a topological simplification.

use std::fmt;

use geoscene_core::{Position, SceneError, SceneResult};
use serde::{Deserialize, Serialize};

use crate::scene::ScenePoint;

/// Fidelity/volume trade-off in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Precision(f64);

impl Precision {
    /// Keep every point.
    pub const FULL: Precision = Precision(0.0);

    /// Creates a precision, rejecting values outside `[0, 1]` and NaN.
    pub fn new(value: f64) -> SceneResult<Self> {
        if !(0.0..=1.0).contains(&value) {
            return Err(SceneError::InvalidPrecision { value });
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Number of decimal places retained: `floor((1 - p) * 10)`.
    pub fn decimal_places(&self) -> i32 {
        ((1.0 - self.0) * 10.0).floor() as i32
    }

    /// Truncates a coordinate toward negative infinity at the retained
    /// decimal places.
    pub fn round(&self, v: f64) -> f64 {
        const EXACT_LIMIT: f64 = 4_503_599_627_370_496.0; // 2^52

        let scale = 10f64.powi(self.decimal_places());
        let scaled = v * scale;
        // Beyond 2^52 every double is already an integer at this scale.
        if scaled.abs() >= EXACT_LIMIT {
            return v + 0.0;
        }
        // Adding 0.0 turns -0.0 into 0.0 so output never prints "-0".
        scaled.floor() / scale + 0.0
    }

    /// Maps a geographic position into drawing space.
    ///
    /// X is floored, Y is floored then negated (north up), Z passes through.
    pub fn transform(&self, position: &Position) -> SceneResult<ScenePoint> {
        let (x, y, z) = position.validate()?;
        Ok(ScenePoint {
            x: self.round(x),
            y: -self.round(y) + 0.0,
            z,
        })
    }

    /// A fresh decimator for one coordinate sequence.
    pub fn decimator(&self) -> StrideDecimator {
        StrideDecimator {
            step: self.0,
            counter: 0.0,
        }
    }

    /// Validates, decimates, transforms and de-duplicates one sequence.
    ///
    /// Every raw position is validated, including ones the stride drops. A
    /// non-empty sequence always keeps at least its first point.
    pub fn process_sequence(&self, positions: &[Position]) -> SceneResult<Vec<ScenePoint>> {
        for p in positions {
            p.validate()?;
        }

        let mut decimator = self.decimator();
        let mut kept: Vec<&Position> = positions.iter().filter(|_| decimator.keep()).collect();
        if kept.is_empty() {
            if let Some(first) = positions.first() {
                kept.push(first);
            }
        }

        let mut out: Vec<ScenePoint> = Vec::with_capacity(kept.len());
        for p in kept {
            let point = self.transform(p)?;
            if out.last() != Some(&point) {
                out.push(point);
            }
        }
        Ok(out)
    }
}

impl TryFrom<f64> for Precision {
    type Error = SceneError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Precision> for f64 {
    fn from(p: Precision) -> Self {
        p.0
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Running fractional counter deciding which points of a sequence survive.
#[derive(Debug, Clone)]
pub struct StrideDecimator {
    step: f64,
    counter: f64,
}

impl StrideDecimator {
    /// Advances the counter for the next candidate point and reports whether
    /// it is kept.
    pub fn keep(&mut self) -> bool {
        self.counter += self.step;
        if self.counter >= 1.0 {
            self.counter -= 1.0;
            return false;
        }
        true
    }
}
