use rand::{distributions::uniform::SampleUniform, seq::SliceRandom, Rng, SeedableRng};
use rand_wyrand::WyRand;

use crate::config::Bounds;

/// The only source of randomness of a generation pass.
///
/// Every draw is on a fixed width integer, so the stream is the same on every
/// platform for a given seed.
pub struct DungeonRng(WyRand);

impl DungeonRng {
    pub fn new(seed: u32) -> Self {
        Self(WyRand::seed_from_u64(u64::from(seed)))
    }

    /// Uniform draw in `[min, max]`
    pub fn range<T>(&mut self, min: T, max: T) -> T
    where
        T: SampleUniform + PartialOrd,
    {
        debug_assert!(min <= max);
        self.0.gen_range(min..=max)
    }

    pub fn bounds(&mut self, bounds: Bounds) -> u8 {
        self.range(bounds.min, bounds.max)
    }

    pub fn coin(&mut self) -> bool {
        self.0.gen_bool(0.5)
    }

    /// Index in `0..len`
    pub fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0 && len <= u32::MAX as usize);
        self.range(0, len as u32 - 1) as usize
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.0)
    }
}
