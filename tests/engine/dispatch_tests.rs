//! Handler selection and failure isolation.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tocs_engine::{
    CommandHandler, DispatchOutcome, HandlerRegistry, INTERNAL_ERROR, NOT_UNDERSTOOD, Session,
    Transcript,
};
use tocs_foundation::{Error, Result};
use tocs_world::{NodeSpec, Team, World};

struct Recorder {
    name: &'static str,
    keywords: &'static [&'static str],
    calls: Arc<AtomicUsize>,
}

impl Recorder {
    fn boxed(name: &'static str, keywords: &'static [&'static str]) -> (Box<Self>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let handler = Box::new(Self {
            name,
            keywords,
            calls: Arc::clone(&calls),
        });
        (handler, calls)
    }
}

impl CommandHandler for Recorder {
    fn name(&self) -> &'static str {
        self.name
    }

    fn keywords(&self) -> &'static [&'static str] {
        self.keywords
    }

    fn handle(&self, _input: &str, session: &mut dyn Session, _world: &mut World) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        session.write(self.name);
        Ok(())
    }
}

struct Broken {
    panics: bool,
}

impl CommandHandler for Broken {
    fn name(&self) -> &'static str {
        "broken"
    }

    fn keywords(&self) -> &'static [&'static str] {
        &["explode"]
    }

    fn handle(&self, _input: &str, _session: &mut dyn Session, _world: &mut World) -> Result<()> {
        assert!(!self.panics, "handler blew up");
        Err(Error::internal("handler gave up"))
    }
}

fn world_with_player() -> (World, Transcript) {
    let mut world = World::new();
    let root = world.root();
    let room = world
        .spawn(Some(root), NodeSpec::named("yard", "A yard.").room())
        .unwrap();
    let player = world.spawn_player("ann", Team::Terrorists, 0).unwrap();
    world.move_node(player, Some(room)).unwrap();
    (world, Transcript::new(player))
}

#[test]
fn first_suitable_handler_runs() {
    let registry = HandlerRegistry::new();
    let (go, go_calls) = Recorder::boxed("go", &["go", "walk"]);
    let (take, take_calls) = Recorder::boxed("take", &["take", "pick"]);
    registry.register(go);
    registry.register(take);
    let (mut world, mut transcript) = world_with_player();

    let outcome = registry.dispatch("pick up the sword", &mut transcript, &mut world);

    assert_eq!(outcome, DispatchOutcome::Handled("take"));
    assert_eq!(take_calls.load(Ordering::SeqCst), 1);
    assert_eq!(go_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn unmatched_input_is_not_understood() {
    let registry = HandlerRegistry::new();
    let (go, go_calls) = Recorder::boxed("go", &["go", "walk"]);
    let (take, take_calls) = Recorder::boxed("take", &["take", "pick"]);
    registry.register(go);
    registry.register(take);
    let (mut world, mut transcript) = world_with_player();

    let outcome = registry.dispatch("dance", &mut transcript, &mut world);

    assert_eq!(outcome, DispatchOutcome::NotUnderstood);
    assert_eq!(transcript.lines(), [NOT_UNDERSTOOD.to_string()]);
    assert_eq!(go_calls.load(Ordering::SeqCst) + take_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn matching_is_a_raw_prefix_test() {
    let registry = HandlerRegistry::new();
    let (go, _) = Recorder::boxed("go", &["go"]);
    registry.register(go);
    let (mut world, mut transcript) = world_with_player();

    assert_eq!(
        registry.dispatch("GOLDEN apple", &mut transcript, &mut world),
        DispatchOutcome::Handled("go")
    );
}

#[test]
fn registration_order_breaks_ties() {
    let registry = HandlerRegistry::new();
    let (first, first_calls) = Recorder::boxed("first", &["lo"]);
    let (second, second_calls) = Recorder::boxed("second", &["look"]);
    registry.register(first);
    registry.register(second);
    let (mut world, mut transcript) = world_with_player();

    registry.dispatch("look", &mut transcript, &mut world);

    assert_eq!(first_calls.load(Ordering::SeqCst), 1);
    assert_eq!(second_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn handler_errors_and_panics_stay_contained() {
    let registry = HandlerRegistry::new();
    registry.register(Box::new(Broken { panics: false }));
    let (mut world, mut transcript) = world_with_player();

    let outcome = registry.dispatch("explode", &mut transcript, &mut world);
    assert_eq!(outcome, DispatchOutcome::Failed("broken"));
    assert_eq!(transcript.last(), Some(INTERNAL_ERROR));

    let registry = HandlerRegistry::new();
    registry.register(Box::new(Broken { panics: true }));
    let outcome = registry.dispatch("explode now", &mut transcript, &mut world);
    assert_eq!(outcome, DispatchOutcome::Failed("broken"));
    assert_eq!(transcript.last(), Some(INTERNAL_ERROR));

    // The world is still usable afterwards.
    let (look, _) = Recorder::boxed("look", &["look"]);
    registry.register(look);
    assert_eq!(
        registry.dispatch("look", &mut transcript, &mut world),
        DispatchOutcome::Handled("look")
    );
}

#[test]
fn builtins_cover_every_command() {
    let registry = HandlerRegistry::with_builtins();
    let keywords = registry.keywords();

    for verb in [
        "look", "go", "take", "pick", "put", "open", "close", "lock", "unlock", "inventory",
        "reload",
    ] {
        assert!(keywords.contains(&verb), "missing {verb}");
    }
}
