//! Core library for procedural world generation from possibility schemas.
//!
//! - A [`PossibilityContainer`] maps titles to recipes describing how a
//!   region of the plane is filled with labeled rectangles (Certain / Repeat
//!   / Random / Multiple content modes, weighted child selection, snap and
//!   stretch placement, randomized spacing).
//! - [`WorldSeedr`] expands a starting [`Command`] into a tree of concrete
//!   [`Choice`] placements, buffering the terminal ones for an injectable
//!   placement callback.
//! - Generation is deterministic for a given library, command, and RNG seed.
//!
//! Quick example:
//! ```ignore
//! use world_seedr_core::{Command, Position, PossibilityContainer, WorldSeedr};
//! # fn main() -> world_seedr_core::Result<()> {
//! let library = PossibilityContainer::from_json_str(include_str!("overworld.json"))?;
//! let mut seedr = WorldSeedr::from_seed(library, 0xBEEF);
//! seedr.generate_full(&Command::new("overworld", Position::new(64, 256, 0, 0)))?;
//! seedr.run_generated_commands();
//! # Ok(()) }
//! ```

pub mod choose;
pub mod config;
pub mod error;
pub mod geometry;
pub mod model;
pub mod seedr;
pub mod spacing;

mod generator;
mod parse;
mod random;

pub use config::*;
pub use error::*;
pub use geometry::wrap_extremes;
pub use model::*;
pub use seedr::*;

/// Convenience prelude for common types and functions.
/// Importing `world_seedr_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::config::{WorldSeedrBuilder, DEFAULT_MAX_DEPTH};
    pub use crate::error::{Result, WorldSeedrError};
    pub use crate::model::{
        Arguments, ArgumentsSpec, ChildType, Choice, ChoiceType, Command, Contents, Direction,
        Generated, Mode, Possibility, PossibilityChild, PossibilityContainer, Position, Sizing,
        Spacing, SpacingRange, Stretch,
    };
    pub use crate::seedr::{PlacementSink, WorldSeedr};
}
