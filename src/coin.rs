//! Skip lists distribute nodes over their levels probabilistically: every
//! key lives on the bottom level, and each successive level holds a random
//! subset of the one beneath it. Here the distribution is driven by a coin
//! flipped repeatedly during insertion, with each "grow" outcome extending
//! the new key's tower by one level.
//!
//! It is very unlikely that the default fair coin will need to be changed,
//! but custom coins can be implemented (a biased coin is provided, and
//! tests inject fully deterministic ones).

use rand::prelude::*;
use thiserror::Error;

// ////////////////////////////////////////////////////////////////////////////
// Coin Flipper
// ////////////////////////////////////////////////////////////////////////////

/// Upon the insertion of a new key, the key's tower is extended one level at
/// a time for as long as a [`CoinFlipper`] keeps answering `true`.
pub trait CoinFlipper {
    /// Flip the coin once. `true` means the tower grows another level.
    #[must_use]
    fn flip(&mut self) -> bool;
}

/// A fair coin backed by a small, fast PRNG.
///
/// This is the default source of randomness: each flip is an independent
/// 50/50 draw, giving towers an expected height of two levels.
#[derive(Debug)]
pub struct FairCoin {
    /// The random number generator.
    rng: SmallRng,
}

impl FairCoin {
    /// Create a fair coin seeded from system entropy.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        FairCoin {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Create a fair coin with a fixed seed, so that every flip sequence is
    /// reproducible.
    #[inline]
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        FairCoin {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for FairCoin {
    fn default() -> Self {
        Self::new()
    }
}

impl CoinFlipper for FairCoin {
    #[inline]
    fn flip(&mut self) -> bool {
        self.rng.gen()
    }
}

/// Errors that can occur when creating a [`BiasedCoin`].
#[derive(Error, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum CoinError {
    /// The probability `p` must be in the range `(0, 1)`.
    #[error("p must be in (0, 1).")]
    InvalidProbability,
}

/// A coin which answers "grow" with probability `p`.
///
/// With `p = 1/2` this behaves like [`FairCoin`]; smaller values produce
/// flatter lists, larger values taller ones. The structural ceiling on
/// tower height applies regardless of `p`.
#[derive(Debug)]
pub struct BiasedCoin {
    /// The probability that a flip answers "grow".
    p: f64,
    /// The random number generator.
    rng: SmallRng,
}

impl BiasedCoin {
    /// Create a biased coin which answers "grow" with probability `p`,
    /// seeded from system entropy.
    ///
    /// # Errors
    ///
    /// `p` must lie strictly between 0 and 1.
    #[inline]
    pub fn new(p: f64) -> Result<Self, CoinError> {
        if !(0.0 < p && p < 1.0) {
            return Err(CoinError::InvalidProbability);
        }
        Ok(BiasedCoin {
            p,
            rng: SmallRng::from_entropy(),
        })
    }

    /// Create a biased coin with a fixed seed.
    ///
    /// # Errors
    ///
    /// `p` must lie strictly between 0 and 1.
    #[inline]
    pub fn with_seed(p: f64, seed: u64) -> Result<Self, CoinError> {
        if !(0.0 < p && p < 1.0) {
            return Err(CoinError::InvalidProbability);
        }
        Ok(BiasedCoin {
            p,
            rng: SmallRng::seed_from_u64(seed),
        })
    }
}

impl CoinFlipper for BiasedCoin {
    #[inline]
    fn flip(&mut self) -> bool {
        self.rng.gen_bool(self.p)
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Tests
// ////////////////////////////////////////////////////////////////////////////
