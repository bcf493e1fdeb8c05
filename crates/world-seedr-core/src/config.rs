//! Construction-time settings for a generation session.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Result, WorldSeedrError};
use crate::model::{Choice, PossibilityContainer};
use crate::seedr::{PlacementSink, WorldSeedr};

/// Recursion ceiling applied when none is configured. Generous for real
/// libraries; a cycle of schemas that never consumes space hits it instead of
/// the stack.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Fluent builder for [`WorldSeedr`].
///
/// A possibilities container is the one required setting; the RNG, the
/// placement sink, and the recursion ceiling all have defaults.
pub struct WorldSeedrBuilder<R: Rng = StdRng> {
    possibilities: Option<PossibilityContainer>,
    rng: R,
    on_placement: Option<PlacementSink>,
    max_depth: usize,
}

impl WorldSeedrBuilder<StdRng> {
    pub fn new() -> Self {
        Self {
            possibilities: None,
            rng: StdRng::from_entropy(),
            on_placement: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Default for WorldSeedrBuilder<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> WorldSeedrBuilder<R> {
    pub fn possibilities(mut self, possibilities: PossibilityContainer) -> Self {
        self.possibilities = Some(possibilities);
        self
    }

    /// Replace the RNG; supply a seeded one for reproducible worlds.
    pub fn rng<R2: Rng>(self, rng: R2) -> WorldSeedrBuilder<R2> {
        WorldSeedrBuilder {
            possibilities: self.possibilities,
            rng,
            on_placement: self.on_placement,
            max_depth: self.max_depth,
        }
    }

    /// Consumer invoked with the command buffer on flush; defaults to a
    /// logging sink.
    pub fn on_placement(mut self, sink: impl FnMut(&[Choice]) + 'static) -> Self {
        self.on_placement = Some(Box::new(sink));
        self
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Errors with [`WorldSeedrError::MissingSettings`] when no possibilities
    /// container was supplied.
    pub fn build(self) -> Result<WorldSeedr<R>> {
        let possibilities = self.possibilities.ok_or(WorldSeedrError::MissingSettings(
            "a possibilities container is required",
        ))?;
        Ok(WorldSeedr::from_parts(
            possibilities,
            self.rng,
            self.on_placement,
            self.max_depth,
        ))
    }
}
