//! Weighted selection over percent-declared pools.

use rand::Rng;

use crate::error::Result;
use crate::model::{
    ChildType, Position, PossibilityChild, PossibilityContainer, WeightedArguments,
    WeightedSpacing,
};
use crate::random::SeedrRng;

/// An entry in a percent-weighted pool.
pub trait Weighted {
    fn percent(&self) -> u64;
}

impl Weighted for PossibilityChild {
    fn percent(&self) -> u64 {
        self.percent
    }
}

impl Weighted for WeightedSpacing {
    fn percent(&self) -> u64 {
        self.percent
    }
}

impl Weighted for WeightedArguments {
    fn percent(&self) -> u64 {
        self.percent
    }
}

impl<W: Weighted + ?Sized> Weighted for &W {
    fn percent(&self) -> u64 {
        (**self).percent()
    }
}

/// Pick one entry by its declared percent.
///
/// Empty pools yield `None`; a single entry is returned without consuming a
/// roll. Otherwise a roll in `[1, 100]` is walked against the running percent
/// total, and `None` comes back when the pool's total falls short of the roll
/// (totals under 100 are an intentional chance of nothing).
pub fn choose_among<'a, R, W>(rng: &mut R, pool: &'a [W]) -> Option<&'a W>
where
    R: Rng + ?Sized,
    W: Weighted,
{
    match pool {
        [] => None,
        [only] => Some(only),
        _ => {
            let goal = rng.percentage_roll();
            let mut total = 0;
            pool.iter().find(|entry| {
                total += entry.percent();
                total >= goal
            })
        }
    }
}

/// [`choose_among`] restricted to children whose referenced schema fits
/// inside `position`. A child naming an unknown schema fails fast.
///
/// `Final` children are measured by their `source` schema — their own title
/// is a label only, exactly as the parser treats it.
pub fn choose_among_position<'a, R: Rng + ?Sized>(
    rng: &mut R,
    pool: &'a [PossibilityChild],
    position: &Position,
    possibilities: &PossibilityContainer,
) -> Result<Option<&'a PossibilityChild>> {
    let mut fitting = Vec::with_capacity(pool.len());
    for child in pool {
        let schema = match child.kind {
            ChildType::Final => possibilities.require(child.final_source()?)?,
            ChildType::Known | ChildType::Random => possibilities.require(&child.title)?,
        };
        if schema.fits_position(position) {
            fitting.push(child);
        }
    }
    Ok(choose_among(rng, &fitting).copied())
}
