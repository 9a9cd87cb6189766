//! Per-feature fill colors.
//!
//! Colors are a pure function of a seed string. Seeds that are too short to
//! give a distinctive color are replaced by a random alphanumeric string
//! drawn from an injectable [`SeedSource`], so tests can pin the output.

use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use crate::scene::Color;

/// Seeds shorter than this are replaced with a random string.
pub const MIN_SEED_LEN: usize = 6;
/// Length of generated replacement seeds.
pub const RANDOM_SEED_LEN: usize = 8;

/// Derives a `#rrggbb` color from a seed string.
///
/// Each character code `t` becomes one byte: codes below 108 are first
/// shifted down by 32, then 100 is added, which keeps every channel away from
/// the dark end. Control characters land at 68 or above, so the shift never
/// goes negative. The first six hex digits of the concatenation form the color.
pub fn color_for_seed(seed: &str) -> Color {
    let hex: String = seed
        .chars()
        .map(|c| {
            let code = u64::from(c);
            let t = if code < 108 { code + 100 - 32 } else { code + 100 };
            format!("{:02x}", t)
        })
        .collect();
    let digits: String = hex.chars().take(6).collect();
    Color::new(format!("#{}", digits))
}

/// Source of replacement seeds for degenerate labels.
pub trait SeedSource {
    /// Returns a random alphanumeric string of `len` characters.
    fn random_seed(&mut self, len: usize) -> String;
}

fn alphanumeric<R: Rng>(rng: &mut R, len: usize) -> String {
    (0..len).map(|_| rng.sample(Alphanumeric) as char).collect()
}

/// Seeds from the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSeeds;

impl SeedSource for ThreadSeeds {
    fn random_seed(&mut self, len: usize) -> String {
        alphanumeric(&mut rand::thread_rng(), len)
    }
}

/// Reproducible seeds from a fixed RNG seed.
#[derive(Debug, Clone)]
pub struct SeededSeeds {
    rng: StdRng,
}

impl SeededSeeds {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl SeedSource for SeededSeeds {
    fn random_seed(&mut self, len: usize) -> String {
        alphanumeric(&mut self.rng, len)
    }
}

/// Assigns fill colors to features.
#[derive(Debug, Clone, Default)]
pub struct StyleAssigner<S = ThreadSeeds> {
    source: S,
}

impl StyleAssigner<ThreadSeeds> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: SeedSource> StyleAssigner<S> {
    pub fn with_source(source: S) -> Self {
        Self { source }
    }

    /// Color for a feature labelled `seed`.
    pub fn next_color(&mut self, seed: &str) -> Color {
        if seed.chars().count() < MIN_SEED_LEN {
            let replacement = self.source.random_seed(RANDOM_SEED_LEN);
            trace!("Seed {:?} too short, using {:?}", seed, replacement);
            return color_for_seed(&replacement);
        }
        color_for_seed(seed)
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}
