//! Random source abstraction.
//!
//! The engine only ever asks for uniform draws in `[0, 1)`; index picks,
//! coin flips, and integer ranges are derived from them. That keeps a
//! scripted fixture able to drive every branch with plain numbers.
//!
//! Each exploration owns its own [`EntropySource`], seeded from the
//! thread-local generator, so no generator is shared across requests.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniform draws.
pub trait RandomSource {
    /// A uniform draw in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// A uniform index in `0..len`. Returns 0 when `len` is 0.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn next_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        let idx = (self.next_f64() * len as f64).floor() as usize;
        idx.min(len.saturating_sub(1))
    }

    /// A fair coin. `true` when the draw is below one half.
    fn coin_flip(&mut self) -> bool {
        self.next_f64() < 0.5
    }

    /// A uniform integer in `low..=high`.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn next_in_range(&mut self, low: i64, high: i64) -> i64 {
        if high <= low {
            return low;
        }
        let span = high.saturating_sub(low).saturating_add(1);
        let offset = (self.next_f64() * span as f64).floor() as i64;
        low.saturating_add(offset.min(span.saturating_sub(1)))
    }
}

/// A [`RandomSource`] backed by a seeded [`StdRng`].
#[derive(Debug, Clone)]
pub struct EntropySource {
    rng: StdRng,
}

impl EntropySource {
    /// A fresh generator seeded from the thread-local entropy source.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// A deterministic generator, for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for EntropySource {
    fn next_f64(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// A [`RandomSource`] that replays a fixed script of draws, then repeats
/// a fallback value.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    draws: VecDeque<f64>,
    fallback: f64,
    consumed: usize,
}

impl ScriptedSource {
    /// Replay `draws` in order, then return `fallback` forever.
    pub fn new(draws: impl IntoIterator<Item = f64>, fallback: f64) -> Self {
        Self {
            draws: draws.into_iter().collect(),
            fallback,
            consumed: 0,
        }
    }

    /// Return `value` for every draw.
    pub fn constant(value: f64) -> Self {
        Self::new([], value)
    }

    /// Number of draws taken so far.
    pub const fn consumed(&self) -> usize {
        self.consumed
    }
}

impl RandomSource for ScriptedSource {
    fn next_f64(&mut self) -> f64 {
        self.consumed = self.consumed.saturating_add(1);
        self.draws.pop_front().unwrap_or(self.fallback)
    }
}
