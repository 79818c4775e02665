//! End-to-end session scenarios
//!
//! Drives the checkout simulation through the world container and the
//! command channel, the same way the host runner does, with recording
//! collaborators standing in for the real registry/HUD/audio.

use std::cell::RefCell;
use std::rc::Rc;

use checkout_rush::sim::{
    AudioSink, CheckoutConfig, CheckoutSimulation, Conveyor, Hud, ItemId, ItemSpawner, MenuId,
    SessionCommand, SessionPhase, SoundEffect, World,
};

#[derive(Default)]
struct SpawnerState {
    next_id: u64,
    live: Vec<ItemId>,
}

#[derive(Clone, Default)]
struct RecordingSpawner(Rc<RefCell<SpawnerState>>);

impl RecordingSpawner {
    fn live_ids(&self) -> Vec<ItemId> {
        self.0.borrow().live.clone()
    }

    fn live_count(&self) -> usize {
        self.0.borrow().live.len()
    }
}

impl ItemSpawner for RecordingSpawner {
    fn spawn(&mut self, _position: [f32; 2]) -> ItemId {
        let mut state = self.0.borrow_mut();
        state.next_id += 1;
        let id = ItemId(state.next_id);
        state.live.push(id);
        id
    }

    fn destroy(&mut self, id: ItemId) {
        let mut state = self.0.borrow_mut();
        if let Some(index) = state.live.iter().position(|&item| item == id) {
            state.live.swap_remove(index);
        }
    }
}

#[derive(Default)]
struct HudState {
    score_text: String,
    start_menu: Option<bool>,
    retry_menu: Option<bool>,
}

#[derive(Clone, Default)]
struct RecordingHud(Rc<RefCell<HudState>>);

impl Hud for RecordingHud {
    fn set_score_text(&mut self, text: &str) {
        self.0.borrow_mut().score_text = text.to_string();
    }

    fn set_timer_text(&mut self, _text: &str) {}

    fn set_menu_visible(&mut self, menu: MenuId, visible: bool) {
        let mut state = self.0.borrow_mut();
        match menu {
            MenuId::Start => state.start_menu = Some(visible),
            MenuId::Retry => state.retry_menu = Some(visible),
        }
    }
}

#[derive(Clone, Default)]
struct RecordingSink(Rc<RefCell<Vec<SoundEffect>>>);

impl RecordingSink {
    fn receipts(&self) -> usize {
        self.0
            .borrow()
            .iter()
            .filter(|&&e| e == SoundEffect::Receipt)
            .count()
    }

    fn scans(&self) -> usize {
        self.0
            .borrow()
            .iter()
            .filter(|&&e| e == SoundEffect::Scan)
            .count()
    }
}

impl AudioSink for RecordingSink {
    fn play_one_shot(&mut self, effect: SoundEffect) {
        self.0.borrow_mut().push(effect);
    }
}

fn world_with_checkout() -> (World, RecordingSpawner, RecordingHud, RecordingSink) {
    let spawner = RecordingSpawner::default();
    let hud = RecordingHud::default();
    let sink = RecordingSink::default();

    let checkout = CheckoutSimulation::new(
        CheckoutConfig {
            session_duration: 30.0,
            min_items: 1,
            max_items: 9,
            seed: Some(20260807),
        },
        Conveyor::new([-4.0, 0.0], [4.0, 0.0]),
        Box::new(spawner.clone()),
        Box::new(hud.clone()),
        Some(Box::new(sink.clone())),
    );

    let mut world = World::new();
    world.add_simulation(Box::new(checkout));
    (world, spawner, hud, sink)
}

fn send(world: &mut World, command: SessionCommand) {
    world
        .get_simulation_typed_mut::<CheckoutSimulation>("checkout")
        .expect("checkout simulation registered")
        .apply(command);
}

fn checkout(world: &World) -> &CheckoutSimulation {
    world
        .get_simulation_typed::<CheckoutSimulation>("checkout")
        .expect("checkout simulation registered")
}

#[test]
fn full_session_from_start_to_timer_expiry() {
    let (mut world, spawner, hud, sink) = world_with_checkout();

    // Start: running, zero score, a non-empty batch on the belt
    send(&mut world, SessionCommand::Start);
    assert_eq!(checkout(&world).phase(), SessionPhase::Running);
    assert_eq!(checkout(&world).score(), 0);
    let first_batch = spawner.live_ids();
    assert!(!first_batch.is_empty());
    assert!((1..=9).contains(&first_batch.len()));

    // Scan every item once: score equals the batch size, the receipt rings
    // once, and the next customer's batch appears
    for id in &first_batch {
        send(&mut world, SessionCommand::ItemClicked(*id));
    }
    assert_eq!(checkout(&world).score(), first_batch.len() as u32);
    assert_eq!(sink.scans(), first_batch.len());
    assert_eq!(sink.receipts(), 1);
    assert!(spawner.live_count() >= 1, "replacement batch expected");

    // Let the countdown run out
    for _ in 0..60 {
        world.tick(0.5);
    }
    let state = checkout(&world);
    assert_eq!(state.phase(), SessionPhase::Ended);
    assert_eq!(state.batch_size(), 0);
    assert_eq!(spawner.live_count(), 0);
    assert_eq!(hud.0.borrow().retry_menu, Some(true));
    // The start menu keeps the hidden state the session start gave it
    assert_eq!(hud.0.borrow().start_menu, Some(false));
}

#[test]
fn rapid_restart_resets_score_and_leaks_nothing() {
    let (mut world, spawner, hud, _sink) = world_with_checkout();

    send(&mut world, SessionCommand::Start);
    let first_batch = spawner.live_ids();

    send(&mut world, SessionCommand::Start);

    let state = checkout(&world);
    assert_eq!(state.score(), 0);
    assert_eq!(hud.0.borrow().score_text, "Score: 0");
    assert_eq!(spawner.live_count(), state.batch_size());
    for id in first_batch {
        assert!(
            !spawner.live_ids().contains(&id),
            "item from the first start leaked"
        );
    }
}

#[test]
fn retry_from_the_end_screen_runs_a_second_session() {
    let (mut world, spawner, _hud, sink) = world_with_checkout();

    send(&mut world, SessionCommand::Start);
    world.tick(31.0);
    assert_eq!(checkout(&world).phase(), SessionPhase::Ended);

    send(&mut world, SessionCommand::Retry);
    assert_eq!(checkout(&world).phase(), SessionPhase::Running);
    assert_eq!(checkout(&world).score(), 0);

    // Clear the new batch: the receipt count keeps growing across sessions
    let receipts_before = sink.receipts();
    for id in spawner.live_ids() {
        send(&mut world, SessionCommand::ItemClicked(id));
    }
    assert_eq!(sink.receipts(), receipts_before + 1);
}

#[test]
fn pausing_the_world_freezes_the_countdown() {
    let (mut world, _spawner, _hud, _sink) = world_with_checkout();

    send(&mut world, SessionCommand::Start);
    world.tick(1.0);
    let remaining = checkout(&world).time_remaining();

    world.pause();
    world.tick(5.0);
    assert_eq!(checkout(&world).time_remaining(), remaining);

    world.resume();
    world.tick(1.0);
    assert!(checkout(&world).time_remaining() < remaining);
}

#[test]
fn time_scale_stretches_the_countdown() {
    let (mut world, _spawner, _hud, _sink) = world_with_checkout();

    send(&mut world, SessionCommand::Start);
    world.set_time_scale(2.0);
    world.tick(1.0);

    let state = checkout(&world);
    assert!((state.time_remaining() - 28.0).abs() < 0.001);
}

#[test]
fn reset_all_returns_the_session_to_the_menu() {
    let (mut world, spawner, hud, _sink) = world_with_checkout();

    send(&mut world, SessionCommand::Start);
    world.tick(3.0);

    world.reset_all_simulations();

    let state = checkout(&world);
    assert_eq!(state.phase(), SessionPhase::Idle);
    assert_eq!(state.score(), 0);
    assert_eq!(spawner.live_count(), 0);
    assert_eq!(hud.0.borrow().start_menu, Some(true));
    assert_eq!(hud.0.borrow().retry_menu, Some(false));
}
