use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use world_seedr_core::{
    ChildType, Choice, ChoiceType, Command, Contents, Direction, Mode, Possibility,
    PossibilityChild, PossibilityContainer, Position, WorldSeedr, WorldSeedrError,
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

fn child(title: &str, kind: ChildType) -> PossibilityChild {
    PossibilityChild {
        title: title.to_owned(),
        kind,
        percent: 0,
        sizing: None,
        stretch: None,
        arguments: None,
        source: None,
    }
}

fn certain(
    width: i64,
    height: i64,
    children: Vec<PossibilityChild>,
) -> Possibility {
    Possibility {
        width,
        height,
        contents: Contents {
            mode: Mode::Certain,
            direction: Some(Direction::Right),
            spacing: None,
            snap: None,
            limit: None,
            children,
        },
    }
}

fn nested_library() -> PossibilityContainer {
    let mut lib = PossibilityContainer::new();
    lib.insert(
        "world",
        certain(100, 20, vec![child("region", ChildType::Random)]),
    );
    lib.insert("region", certain(40, 20, vec![child("hut", ChildType::Known)]));
    lib.insert("hut", leaf(10, 10));
    lib
}

#[test]
fn random_children_are_reissued_as_commands() {
    let mut seedr = WorldSeedr::from_seed(nested_library(), 31);
    seedr
        .generate_full(&Command::new("world", Position::new(20, 100, 0, 0)))
        .unwrap();

    // Only the terminal leaf lands in the buffer, inside the region's box.
    let commands = seedr.generated_commands();
    assert_eq!(commands.len(), 1);
    assert_eq!(commands[0].title, "hut");
    assert_eq!(commands[0].kind, ChoiceType::Known);
    assert_eq!(commands[0].position, Position::new(20, 10, 0, 0));
}

#[test]
fn generate_populates_contents_on_random_children_only() {
    let mut seedr = WorldSeedr::from_seed(nested_library(), 31);
    let generated = seedr
        .generate("world", &Command::new("world", Position::new(20, 100, 0, 0)))
        .unwrap()
        .expect("world expands");

    let region = &generated.children[0];
    assert_eq!(region.kind, ChoiceType::Random);
    let contents = region.contents.as_ref().expect("random child recursed");
    assert_eq!(contents.children.len(), 1);

    let hut = &contents.children[0];
    assert_eq!(hut.kind, ChoiceType::Known);
    assert!(hut.contents.is_none());
}

#[test]
fn capturing_sink_receives_the_buffer_intact() {
    let captured: Rc<RefCell<Vec<Choice>>> = Rc::new(RefCell::new(Vec::new()));
    let sink_target = Rc::clone(&captured);

    let mut seedr = WorldSeedr::builder()
        .possibilities(nested_library())
        .rng(StdRng::seed_from_u64(31))
        .on_placement(move |commands: &[Choice]| {
            *sink_target.borrow_mut() = commands.to_vec();
        })
        .build()
        .unwrap();

    seedr
        .generate_full(&Command::new("world", Position::new(20, 100, 0, 0)))
        .unwrap();
    seedr.run_generated_commands();

    assert_eq!(captured.borrow().as_slice(), seedr.generated_commands());
    assert_eq!(captured.borrow().len(), 1);

    // Flushing does not clear; clearing is explicit.
    assert_eq!(seedr.generated_commands().len(), 1);
    seedr.clear_generated_commands();
    seedr.run_generated_commands();
    assert!(captured.borrow().is_empty());
}

#[test]
fn unknown_starting_title_fails_fast() {
    let mut seedr = WorldSeedr::from_seed(nested_library(), 31);
    let err = seedr
        .generate_full(&Command::new("nowhere", Position::new(20, 100, 0, 0)))
        .unwrap_err();
    assert!(matches!(
        err,
        WorldSeedrError::UnknownPossibility { title } if title == "nowhere"
    ));
}

#[test]
fn self_reference_without_consuming_space_hits_the_ceiling() {
    let mut lib = PossibilityContainer::new();
    lib.insert(
        "ouroboros",
        certain(10, 10, vec![child("ouroboros", ChildType::Random)]),
    );

    let mut seedr = WorldSeedr::builder()
        .possibilities(lib)
        .rng(StdRng::seed_from_u64(31))
        .max_depth(8)
        .build()
        .unwrap();

    let err = seedr
        .generate_full(&Command::new("ouroboros", Position::new(10, 10, 0, 0)))
        .unwrap_err();
    assert!(matches!(err, WorldSeedrError::DepthExceeded { limit: 8 }));
}

#[test]
fn builder_without_possibilities_is_missing_settings() {
    let err = WorldSeedr::builder().build().unwrap_err();
    assert!(matches!(err, WorldSeedrError::MissingSettings(_)));
}

#[test]
fn swapping_libraries_between_calls_is_supported() {
    let mut seedr = WorldSeedr::from_seed(nested_library(), 31);
    seedr
        .generate_full(&Command::new("world", Position::new(20, 100, 0, 0)))
        .unwrap();
    assert_eq!(seedr.generated_commands().len(), 1);

    let mut other = PossibilityContainer::new();
    other.insert("den", certain(30, 10, vec![child("hut", ChildType::Known)]));
    other.insert("hut", leaf(10, 10));
    seedr.set_possibilities(other);

    seedr
        .generate_full(&Command::new("den", Position::new(10, 30, 0, 0)))
        .unwrap();
    assert_eq!(seedr.generated_commands().len(), 2);
    assert_eq!(seedr.generated_commands()[1].title, "hut");
}
