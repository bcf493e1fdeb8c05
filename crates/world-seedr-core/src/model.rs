use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::error::{Result, WorldSeedrError};

/// Axis-aligned region of the world plane, described by its four edges.
/// Non-empty regions have `top > bottom` and `right > left`; edges are signed
/// world units.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Position {
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
    pub left: i64,
}

impl Position {
    pub fn new(top: i64, right: i64, bottom: i64, left: i64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// Cardinal packing direction: the axis along which successive children are
/// placed, or along which a spacing move is applied.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Top,
    Right,
    Bottom,
    Left,
}

impl Direction {
    /// The facing edge (top ↔ bottom, left ↔ right).
    pub fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
        }
    }
}

/// How a schema's child list is interpreted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Mode {
    /// Every child, once, in order, regardless of fit.
    Certain,
    /// Cycle the child list until the region runs out of space.
    Repeat,
    /// Weighted draws among fitting children until space or chance runs out.
    Random,
    /// Every child against the same starting region, offset by spacing.
    Multiple,
}

/// Authored type of a possibility child: a terminal placement, a nested
/// generation, or a dimension borrow from another schema.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ChildType {
    Known,
    Random,
    Final,
}

/// What a produced choice is: a terminal placement or a nested generation.
/// The `Final` shortcut emits terminal `Known` placements, so produced
/// choices never carry a third case.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ChoiceType {
    Known,
    Random,
}

/// Distance inserted between consecutive children.
///
/// Authored as a plain number, a `{min, max, units}` object, a `[min, max]`
/// pair, or a weighted list of nested spacings. The pair form is normalized
/// to [`Spacing::Range`] when the library is deserialized.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Spacing {
    Exact(i64),
    Range(SpacingRange),
    Weighted(Vec<WeightedSpacing>),
}

impl Default for Spacing {
    fn default() -> Self {
        Self::Exact(0)
    }
}

/// Uniform integer draw in `[min, max]`, rounded down onto the `units` grid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpacingRange {
    pub min: i64,
    pub max: i64,
    #[serde(default = "default_units")]
    pub units: i64,
}

fn default_units() -> i64 {
    1
}

/// One entry of a weighted spacing pool.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeightedSpacing {
    pub value: Spacing,
    pub percent: u64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SpacingRepr {
    Exact(i64),
    Range(SpacingRange),
    Pair([i64; 2]),
    Weighted(Vec<WeightedSpacing>),
}

impl<'de> Deserialize<'de> for Spacing {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(match SpacingRepr::deserialize(deserializer)? {
            SpacingRepr::Exact(value) => Spacing::Exact(value),
            SpacingRepr::Range(range) => Spacing::Range(range),
            SpacingRepr::Pair([min, max]) => Spacing::Range(SpacingRange {
                min,
                max,
                units: 1,
            }),
            SpacingRepr::Weighted(pool) => Spacing::Weighted(pool),
        })
    }
}

/// Free-form key/value payload handed through to the placement consumer.
pub type Arguments = serde_json::Map<String, Value>;

/// Arguments on a possibility child: either one fixed map, or a weighted pool
/// of maps resolved per placement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ArgumentsSpec {
    Fixed(Arguments),
    Weighted(Vec<WeightedArguments>),
}

/// One entry of a weighted arguments pool.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeightedArguments {
    pub values: Arguments,
    pub percent: u64,
}

/// Per-child override of the referenced schema's dimensions.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Sizing {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<i64>,
}

/// Flags expanding a child to fill the host region on an axis.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stretch {
    #[serde(default)]
    pub width: bool,
    #[serde(default)]
    pub height: bool,
}

/// A reference from inside a schema's content list to another possibility.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PossibilityChild {
    /// Title of the referenced possibility.
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ChildType,
    /// Weight for random selection; pools totalling under 100 leave a chance
    /// of nothing.
    #[serde(default)]
    pub percent: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizing: Option<Sizing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stretch: Option<Stretch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<ArgumentsSpec>,
    /// `Final` children only: the schema whose dimensions the emitted
    /// placement adopts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl PossibilityChild {
    /// The source schema a `Final` child re-materializes from. Its own
    /// `title` is a label only and need not name a schema.
    pub(crate) fn final_source(&self) -> Result<&str> {
        self.source.as_deref().ok_or_else(|| {
            WorldSeedrError::MalformedSchema(format!(
                "'Final' child '{}' names no source schema",
                self.title
            ))
        })
    }
}

/// The content block of a possibility: how its region gets filled.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Contents {
    pub mode: Mode,
    /// Default layout direction; a command may supply a hint, but this wins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing: Option<Spacing>,
    /// Host edge onto which placed children collapse on the orthogonal axis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snap: Option<Direction>,
    /// Random mode only: hard cap on emitted children before the branch is
    /// abandoned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(default)]
    pub children: Vec<PossibilityChild>,
}

/// A named recipe describing how one region of the plane is filled.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Possibility {
    pub width: i64,
    pub height: i64,
    pub contents: Contents,
}

/// The possibility library: schema title → schema. Read-only for the duration
/// of one generation call; swapping between calls is fine.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct PossibilityContainer {
    map: HashMap<String, Possibility>,
}

impl PossibilityContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a library from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a library from an already-parsed JSON value.
    pub fn from_json_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn insert(
        &mut self,
        title: impl Into<String>,
        possibility: Possibility,
    ) -> Option<Possibility> {
        self.map.insert(title.into(), possibility)
    }

    pub fn get(&self, title: &str) -> Option<&Possibility> {
        self.map.get(title)
    }

    pub fn remove(&mut self, title: &str) -> Option<Possibility> {
        self.map.remove(title)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }

    /// Library lookups are programming errors when they miss.
    pub(crate) fn require(&self, title: &str) -> Result<&Possibility> {
        self.get(title)
            .ok_or_else(|| WorldSeedrError::UnknownPossibility {
                title: title.to_owned(),
            })
    }
}

impl FromIterator<(String, Possibility)> for PossibilityContainer {
    fn from_iter<I: IntoIterator<Item = (String, Possibility)>>(iter: I) -> Self {
        Self {
            map: iter.into_iter().collect(),
        }
    }
}

/// Instruction handed to the driver: which schema to expand and the region it
/// must fill. `arguments` is passed through onto produced choices.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Command {
    pub title: String,
    #[serde(flatten)]
    pub position: Position,
    /// Layout hint, overridden by the schema's own `contents.direction`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Arguments>,
}

impl Command {
    pub fn new(title: impl Into<String>, position: Position) -> Self {
        Self {
            title: title.into(),
            position,
            direction: None,
            arguments: None,
        }
    }
}

/// Concrete placement produced from a possibility child: a labeled rectangle
/// plus the declared dimensions and any resolved arguments.
///
/// `width`/`height` are the declared dimensions and can differ from the box
/// (a `Final` child keeps the host's box but adopts its source's dimensions).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Choice {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ChoiceType,
    #[serde(flatten)]
    pub position: Position,
    pub width: i64,
    pub height: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Arguments>,
    /// Recursed subtree for non-`Known` children; `Known` leaves never carry
    /// one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contents: Option<Generated>,
}

impl Choice {
    /// Re-issue this choice as a command, e.g. to expand a `Random` child
    /// into its own region. No direction hint is carried; the recursed
    /// schema's `contents.direction` governs.
    pub fn to_command(&self) -> Command {
        Command {
            title: self.title.clone(),
            position: self.position,
            direction: None,
            arguments: self.arguments.clone(),
        }
    }
}

/// Aggregate result of expanding one schema: the tight bounding box around
/// the emitted children.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Generated {
    #[serde(flatten)]
    pub position: Position,
    pub children: Vec<Choice>,
}
