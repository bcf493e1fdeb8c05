//! The stateful generation session.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

use crate::config::{WorldSeedrBuilder, DEFAULT_MAX_DEPTH};
use crate::error::Result;
use crate::generator::Engine;
use crate::model::{Choice, ChoiceType, Command, Generated, PossibilityContainer};

/// Callback receiving the flushed command buffer.
pub type PlacementSink = Box<dyn FnMut(&[Choice])>;

/// Expands possibility schemas into concrete placements.
///
/// Owns the possibility library, the RNG, and the buffer of terminal
/// commands accumulated by [`generate_full`](WorldSeedr::generate_full).
/// Identical `(library, command, seed)` triples reproduce identical buffers.
pub struct WorldSeedr<R: Rng = StdRng> {
    possibilities: PossibilityContainer,
    rng: R,
    on_placement: PlacementSink,
    generated_commands: Vec<Choice>,
    max_depth: usize,
}

impl WorldSeedr<StdRng> {
    /// Session over `possibilities` with an entropy-seeded RNG.
    pub fn new(possibilities: PossibilityContainer) -> Self {
        Self::with_rng(possibilities, StdRng::from_entropy())
    }

    /// Session with a deterministic RNG seeded from `seed`.
    pub fn from_seed(possibilities: PossibilityContainer, seed: u64) -> Self {
        Self::with_rng(possibilities, StdRng::seed_from_u64(seed))
    }

    /// Fluent construction; see [`WorldSeedrBuilder`].
    pub fn builder() -> WorldSeedrBuilder<StdRng> {
        WorldSeedrBuilder::new()
    }
}

impl<R: Rng> WorldSeedr<R> {
    /// Session with a caller-supplied RNG.
    pub fn with_rng(possibilities: PossibilityContainer, rng: R) -> Self {
        Self::from_parts(possibilities, rng, None, DEFAULT_MAX_DEPTH)
    }

    pub(crate) fn from_parts(
        possibilities: PossibilityContainer,
        rng: R,
        on_placement: Option<PlacementSink>,
        max_depth: usize,
    ) -> Self {
        Self {
            possibilities,
            rng,
            on_placement: on_placement.unwrap_or_else(default_sink),
            generated_commands: Vec::new(),
            max_depth,
        }
    }

    /// The possibility library consulted during generation.
    pub fn possibilities(&self) -> &PossibilityContainer {
        &self.possibilities
    }

    pub fn possibilities_mut(&mut self) -> &mut PossibilityContainer {
        &mut self.possibilities
    }

    /// Swap the library. Safe between generation calls.
    pub fn set_possibilities(&mut self, possibilities: PossibilityContainer) {
        self.possibilities = possibilities;
    }

    /// Swap the placement sink.
    pub fn set_on_placement(&mut self, sink: impl FnMut(&[Choice]) + 'static) {
        self.on_placement = Box::new(sink);
    }

    /// Terminal commands accumulated so far, in emission order.
    pub fn generated_commands(&self) -> &[Choice] {
        &self.generated_commands
    }

    /// Expand the schema named `name` into the region `command` describes and
    /// return the aggregate subtree. `Ok(None)` means the branch produced
    /// nothing (no child fit, chance of nothing, or a Random branch past its
    /// limit).
    #[instrument(skip_all, fields(name = %name))]
    pub fn generate(&mut self, name: &str, command: &Command) -> Result<Option<Generated>> {
        self.engine().generate(name, command, 0)
    }

    /// Expand `command` and append every terminal `Known` choice, in
    /// depth-first traversal order, to the command buffer. `Random` children
    /// are re-issued as commands of their own.
    #[instrument(skip_all, fields(title = %command.title))]
    pub fn generate_full(&mut self, command: &Command) -> Result<()> {
        self.generate_full_at(command, 0)
    }

    fn generate_full_at(&mut self, command: &Command, depth: usize) -> Result<()> {
        let Some(generated) = self.engine().generate(&command.title, command, depth)? else {
            return Ok(());
        };
        for child in generated.children {
            match child.kind {
                ChoiceType::Known => self.generated_commands.push(child),
                ChoiceType::Random => {
                    let next = child.to_command();
                    self.generate_full_at(&next, depth + 1)?;
                }
            }
        }
        Ok(())
    }

    /// Drop every accumulated command.
    pub fn clear_generated_commands(&mut self) {
        self.generated_commands.clear();
    }

    /// Hand the accumulated commands to the placement sink. The buffer is
    /// left intact; clearing is a separate, explicit step.
    pub fn run_generated_commands(&mut self) {
        (self.on_placement)(&self.generated_commands);
    }

    fn engine(&mut self) -> Engine<'_, R> {
        Engine {
            possibilities: &self.possibilities,
            rng: &mut self.rng,
            max_depth: self.max_depth,
        }
    }
}

fn default_sink() -> PlacementSink {
    Box::new(|commands| {
        debug!(count = commands.len(), "placement commands flushed");
    })
}

impl<R: Rng> fmt::Debug for WorldSeedr<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorldSeedr")
            .field("possibilities", &self.possibilities.len())
            .field("generated_commands", &self.generated_commands.len())
            .field("max_depth", &self.max_depth)
            .finish_non_exhaustive()
    }
}
