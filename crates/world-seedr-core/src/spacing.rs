//! Resolving a polymorphic spacing description to one concrete distance.

use rand::Rng;

use crate::choose::choose_among;
use crate::error::{Result, WorldSeedrError};
use crate::model::{Spacing, SpacingRange};
use crate::random::SeedrRng;

/// Resolve `spacing` to a single distance, consulting the RNG for range and
/// weighted forms. A weighted pool whose total leaves the roll uncovered
/// resolves to zero.
pub fn calculate<R: Rng + ?Sized>(rng: &mut R, spacing: &Spacing) -> Result<i64> {
    match spacing {
        Spacing::Exact(value) => Ok(*value),
        Spacing::Range(range) => from_range(rng, range),
        Spacing::Weighted(pool) => match choose_among(rng, pool) {
            Some(entry) => calculate(rng, &entry.value),
            None => Ok(0),
        },
    }
}

fn from_range<R: Rng + ?Sized>(rng: &mut R, range: &SpacingRange) -> Result<i64> {
    let SpacingRange { min, max, units } = *range;
    if units <= 0 {
        return Err(WorldSeedrError::MalformedSchema(format!(
            "spacing units must be positive (got {units})"
        )));
    }
    if min > max {
        return Err(WorldSeedrError::MalformedSchema(format!(
            "spacing range is inverted ({min} > {max})"
        )));
    }
    Ok(rng.between(min.div_euclid(units), max.div_euclid(units)) * units)
}
