//! RNG module - uniform random piece selection
//!
//! Every draw picks one of the seven templates with equal probability, independent of
//! history. There is deliberately no bag: the same piece may repeat any number of times.
//!
//! The catalog is generic over [`rand::Rng`]; [`PieceCatalog::new`] seeds a `StdRng` so
//! a game can be replayed from its seed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::pieces::{get_shape, Shape};
use crate::types::PieceKind;

/// Source of new pieces.
#[derive(Debug, Clone)]
pub struct PieceCatalog<R = StdRng> {
    rng: R,
}

impl PieceCatalog<StdRng> {
    /// Create a catalog with a deterministic seed
    pub fn new(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Create a catalog seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl<R: Rng> PieceCatalog<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Draw a piece kind uniformly at random
    pub fn random_piece(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.gen_range(0..PieceKind::ALL.len())]
    }

    /// Draw a piece and return a copy of its template
    pub fn random_shape(&mut self) -> Shape {
        get_shape(self.random_piece())
    }
}

impl Default for PieceCatalog<StdRng> {
    fn default() -> Self {
        Self::new(1)
    }
}
