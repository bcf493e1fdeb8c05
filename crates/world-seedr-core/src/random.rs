//! The two derived draws the generator takes from its RNG.
//!
//! Every probability decision funnels through these, in generation order, so
//! a seeded RNG reproduces a generation exactly.

use rand::Rng;

pub(crate) trait SeedrRng {
    /// Uniform roll in `[1, 100]`, matched against author-declared percents.
    fn percentage_roll(&mut self) -> u64;

    /// Uniform integer in `[min, max]`, both ends inclusive.
    fn between(&mut self, min: i64, max: i64) -> i64;
}

impl<R: Rng + ?Sized> SeedrRng for R {
    fn percentage_roll(&mut self) -> u64 {
        self.gen_range(1..=100)
    }

    fn between(&mut self, min: i64, max: i64) -> i64 {
        self.gen_range(min..=max)
    }
}
