use world_seedr_core::{
    ChildType, Command, Contents, Direction, Mode, Possibility, PossibilityChild,
    PossibilityContainer, Position, Spacing, WorldSeedr,
};

fn leaf(width: i64, height: i64) -> Possibility {
    Possibility {
        width,
        height,
        contents: Contents {
            mode: Mode::Certain,
            direction: None,
            spacing: None,
            snap: None,
            limit: None,
            children: vec![],
        },
    }
}

fn known(title: &str) -> PossibilityChild {
    PossibilityChild {
        title: title.to_owned(),
        kind: ChildType::Known,
        percent: 0,
        sizing: None,
        stretch: None,
        arguments: None,
        source: None,
    }
}

fn strip(direction: Direction, spacing: Option<Spacing>) -> Possibility {
    Possibility {
        width: 25,
        height: 10,
        contents: Contents {
            mode: Mode::Repeat,
            direction: Some(direction),
            spacing,
            snap: None,
            limit: None,
            children: vec![known("block")],
        },
    }
}

#[test]
fn repeat_stops_when_the_next_unit_cannot_fit() {
    let mut lib = PossibilityContainer::new();
    lib.insert("strip", strip(Direction::Right, None));
    lib.insert("block", leaf(10, 10));

    let mut seedr = WorldSeedr::from_seed(lib, 3);
    seedr
        .generate_full(&Command::new("strip", Position::new(10, 25, 0, 0)))
        .unwrap();

    // 25 units of width hold two 10-wide blocks; the third would overflow.
    let commands = seedr.generated_commands();
    assert_eq!(commands.len(), 2);
    assert_eq!(commands[0].position, Position::new(10, 10, 0, 0));
    assert_eq!(commands[1].position, Position::new(10, 20, 0, 10));
}

#[test]
fn repeat_inserts_spacing_between_units() {
    let mut lib = PossibilityContainer::new();
    lib.insert("strip", strip(Direction::Right, Some(Spacing::Exact(5))));
    lib.insert("block", leaf(10, 10));

    let mut seedr = WorldSeedr::from_seed(lib, 3);
    seedr
        .generate_full(&Command::new("strip", Position::new(10, 25, 0, 0)))
        .unwrap();

    let commands = seedr.generated_commands();
    assert_eq!(commands.len(), 2);
    assert_eq!(commands[0].position, Position::new(10, 10, 0, 0));
    assert_eq!(commands[1].position, Position::new(10, 25, 0, 15));
}

#[test]
fn repeat_packs_downward_until_exhaustion() {
    let mut lib = PossibilityContainer::new();
    lib.insert("strip", strip(Direction::Bottom, None));
    lib.insert("block", leaf(10, 10));

    let mut seedr = WorldSeedr::from_seed(lib, 3);
    seedr
        .generate_full(&Command::new("strip", Position::new(30, 10, 0, 0)))
        .unwrap();

    let commands = seedr.generated_commands();
    assert_eq!(commands.len(), 3);
    assert_eq!(commands[0].position, Position::new(30, 10, 20, 0));
    assert_eq!(commands[1].position, Position::new(20, 10, 10, 0));
    assert_eq!(commands[2].position, Position::new(10, 10, 0, 0));
}

#[test]
fn repeat_with_no_children_generates_nothing() {
    let mut lib = PossibilityContainer::new();
    lib.insert(
        "strip",
        Possibility {
            width: 25,
            height: 10,
            contents: Contents {
                mode: Mode::Repeat,
                direction: Some(Direction::Right),
                spacing: None,
                snap: None,
                limit: None,
                children: vec![],
            },
        },
    );

    let mut seedr = WorldSeedr::from_seed(lib, 3);
    let generated = seedr
        .generate("strip", &Command::new("strip", Position::new(10, 25, 0, 0)))
        .unwrap();
    assert!(generated.is_none());
}
