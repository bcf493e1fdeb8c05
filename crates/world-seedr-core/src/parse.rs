//! Turning an abstract possibility child into a concrete placement.

use rand::Rng;
use serde_json::Value;

use crate::choose::choose_among;
use crate::error::Result;
use crate::model::{
    Arguments, ArgumentsSpec, ChildType, Choice, ChoiceType, Direction, Position,
    PossibilityChild, PossibilityContainer,
};

/// Parse `child` against the host `position`, collapsing it along the layout
/// `direction` and applying its schema's snap and its own stretch flags.
///
/// `Final` children take the shortcut path: the host's box verbatim, the
/// source schema's dimensions, emitted as `Known`.
pub(crate) fn parse_choice<R: Rng + ?Sized>(
    possibilities: &PossibilityContainer,
    rng: &mut R,
    child: &PossibilityChild,
    position: &Position,
    direction: Direction,
) -> Result<Choice> {
    let kind = match child.kind {
        ChildType::Known => ChoiceType::Known,
        ChildType::Random => ChoiceType::Random,
        ChildType::Final => return parse_choice_final(possibilities, rng, child, position),
    };

    let schema = possibilities.require(&child.title)?;
    let mut arguments = resolve_arguments(rng, child.arguments.as_ref());
    let sizing = child.sizing.unwrap_or_default();
    let mut width = sizing.width.unwrap_or(schema.width);
    let mut height = sizing.height.unwrap_or(schema.height);

    // Start from the host's box, then collapse along the layout axis so the
    // child hugs the edge opposite `direction`.
    let mut output = *position;
    match direction {
        Direction::Top => output.top = output.bottom + height,
        Direction::Right => output.right = output.left + width,
        Direction::Bottom => output.bottom = output.top - height,
        Direction::Left => output.left = output.right - width,
    }

    // Snap re-aligns the orthogonal axis, translating the child's extent
    // inward from the named host edge.
    if let Some(snap) = schema.contents.snap {
        match snap {
            Direction::Top => output.bottom = output.top - height,
            Direction::Right => output.left = output.right - width,
            Direction::Bottom => output.top = output.bottom + height,
            Direction::Left => output.right = output.left + width,
        }
    }

    if let Some(stretch) = child.stretch {
        if stretch.width || stretch.height {
            let map = arguments.get_or_insert_with(Arguments::new);
            if stretch.width {
                output.left = position.left;
                output.right = position.right;
                width = output.width();
                map.insert("width".to_owned(), Value::from(width));
            }
            if stretch.height {
                output.bottom = position.bottom;
                output.top = position.top;
                height = output.height();
                map.insert("height".to_owned(), Value::from(height));
            }
        }
    }

    Ok(Choice {
        title: child.title.clone(),
        kind,
        position: output,
        width,
        height,
        arguments,
        contents: None,
    })
}

/// The `Final` shortcut: adopt the source schema's dimensions but keep the
/// host's full box, and emit a terminal `Known` placement.
fn parse_choice_final<R: Rng + ?Sized>(
    possibilities: &PossibilityContainer,
    rng: &mut R,
    child: &PossibilityChild,
    position: &Position,
) -> Result<Choice> {
    let schema = possibilities.require(child.final_source()?)?;
    Ok(Choice {
        title: child.title.clone(),
        kind: ChoiceType::Known,
        position: *position,
        width: schema.width,
        height: schema.height,
        arguments: resolve_arguments(rng, child.arguments.as_ref()),
        contents: None,
    })
}

fn resolve_arguments<R: Rng + ?Sized>(
    rng: &mut R,
    spec: Option<&ArgumentsSpec>,
) -> Option<Arguments> {
    match spec {
        None => None,
        Some(ArgumentsSpec::Fixed(map)) => Some(map.clone()),
        Some(ArgumentsSpec::Weighted(pool)) => {
            choose_among(rng, pool).map(|entry| entry.values.clone())
        }
    }
}
