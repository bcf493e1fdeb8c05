//! Schema expansion: the recursive core behind the driver, and the four
//! content modes.

use rand::Rng;

use crate::choose::choose_among_position;
use crate::error::{Result, WorldSeedrError};
use crate::geometry::wrap_extremes;
use crate::model::{
    Choice, ChoiceType, Command, Contents, Direction, Generated, Mode, Position, Possibility,
    PossibilityContainer,
};
use crate::parse::parse_choice;
use crate::spacing;

/// Expansion context: the library, the RNG, and the recursion ceiling.
///
/// Working positions are mutated in place by the packing modes; every
/// expansion starts from its own copy of the command's region, so sibling
/// subtrees never share one.
pub(crate) struct Engine<'a, R: ?Sized> {
    pub possibilities: &'a PossibilityContainer,
    pub rng: &'a mut R,
    pub max_depth: usize,
}

impl<R: Rng + ?Sized> Engine<'_, R> {
    /// Expand the schema named `name` into the region `command` describes,
    /// wrapping the emitted children in their tight bounding box. `Ok(None)`
    /// means the branch produced nothing.
    pub fn generate(
        &mut self,
        name: &str,
        command: &Command,
        depth: usize,
    ) -> Result<Option<Generated>> {
        if depth > self.max_depth {
            return Err(WorldSeedrError::DepthExceeded {
                limit: self.max_depth,
            });
        }
        let schema = self.possibilities.require(name)?;
        // The host region is authoritative; the schema contributes only its
        // layout rules here.
        let mut position = command.position;
        let direction = schema.contents.direction.or(command.direction);
        self.generate_children(name, schema, &mut position, direction, depth)
    }

    fn generate_children(
        &mut self,
        title: &str,
        schema: &Possibility,
        position: &mut Position,
        direction: Option<Direction>,
        depth: usize,
    ) -> Result<Option<Generated>> {
        let contents = &schema.contents;
        let direction = direction.ok_or_else(|| WorldSeedrError::MissingDirection {
            title: title.to_owned(),
        })?;
        let children = match contents.mode {
            Mode::Certain => Some(self.certain(contents, position, direction, depth)?),
            Mode::Repeat => Some(self.repeat(contents, position, direction, depth)?),
            Mode::Random => self.random(contents, position, direction, depth)?,
            Mode::Multiple => Some(self.multiple(contents, position, direction, depth)?),
        };
        Ok(children.and_then(|children| {
            wrap_extremes(&children).map(|position| Generated { position, children })
        }))
    }

    /// Every child, once, in order, regardless of fit. Overflowing the host
    /// is the schema author's responsibility.
    fn certain(
        &mut self,
        contents: &Contents,
        position: &mut Position,
        direction: Direction,
        depth: usize,
    ) -> Result<Vec<Choice>> {
        let mut children = Vec::with_capacity(contents.children.len());
        for entry in &contents.children {
            let mut child = parse_choice(self.possibilities, self.rng, entry, position, direction)?;
            self.recurse(&mut child, depth)?;
            let gap = self.gap(contents)?;
            position.shrink_past(&child.position, direction, gap);
            children.push(child);
        }
        Ok(children)
    }

    /// Cycle the child list until the region runs out along the packing axis
    /// or the next parsed child no longer fits.
    fn repeat(
        &mut self,
        contents: &Contents,
        position: &mut Position,
        direction: Direction,
        depth: usize,
    ) -> Result<Vec<Choice>> {
        let mut children = Vec::new();
        let entries = &contents.children;
        if entries.is_empty() {
            return Ok(children);
        }
        let mut index = 0;
        while position.is_not_empty(direction) {
            let entry = &entries[index % entries.len()];
            let mut child = parse_choice(self.possibilities, self.rng, entry, position, direction)?;
            if !child.fits_position(position) {
                break;
            }
            self.recurse(&mut child, depth)?;
            let gap = self.gap(contents)?;
            position.shrink_past(&child.position, direction, gap);
            children.push(child);
            index += 1;
        }
        Ok(children)
    }

    /// Weighted draws among fitting children until space or chance runs out.
    /// Exceeding `limit` abandons the whole branch.
    fn random(
        &mut self,
        contents: &Contents,
        position: &mut Position,
        direction: Direction,
        depth: usize,
    ) -> Result<Option<Vec<Choice>>> {
        let mut children = Vec::new();
        while position.is_not_empty(direction) {
            let Some(entry) =
                choose_among_position(self.rng, &contents.children, position, self.possibilities)?
            else {
                break;
            };
            let mut child = parse_choice(self.possibilities, self.rng, entry, position, direction)?;
            self.recurse(&mut child, depth)?;
            let gap = self.gap(contents)?;
            position.shrink_past(&child.position, direction, gap);
            children.push(child);
            if contents.limit.is_some_and(|limit| children.len() > limit) {
                return Ok(None);
            }
        }
        Ok(Some(children))
    }

    /// Every child parsed against a snapshot of the same starting region,
    /// with the region translated by the spacing between entries. Siblings
    /// fan out instead of packing.
    fn multiple(
        &mut self,
        contents: &Contents,
        position: &mut Position,
        direction: Direction,
        depth: usize,
    ) -> Result<Vec<Choice>> {
        let mut children = Vec::with_capacity(contents.children.len());
        for entry in &contents.children {
            let snapshot = *position;
            let mut child = parse_choice(self.possibilities, self.rng, entry, &snapshot, direction)?;
            self.recurse(&mut child, depth)?;
            let gap = self.gap(contents)?;
            position.translate(direction, gap);
            children.push(child);
        }
        Ok(children)
    }

    /// Non-terminal children are expanded in place, within their own parsed
    /// box; terminal `Known` children never are.
    fn recurse(&mut self, child: &mut Choice, depth: usize) -> Result<()> {
        if child.kind == ChoiceType::Random {
            let command = child.to_command();
            child.contents = self.generate(&command.title, &command, depth + 1)?;
        }
        Ok(())
    }

    /// Spacing draws happen per placement, in traversal order.
    fn gap(&mut self, contents: &Contents) -> Result<i64> {
        match &contents.spacing {
            Some(spacing) => spacing::calculate(self.rng, spacing),
            None => Ok(0),
        }
    }
}
