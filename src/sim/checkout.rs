//! Checkout session simulation - a pure game logic implementation
//!
//! One session: the countdown starts, batches of items appear on the
//! conveyor, each scan scores a point, and clearing a batch rings up the
//! next customer. When the timer expires the conveyor is cleared and the
//! retry menu comes up.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::conveyor::Conveyor;
use super::ports::{AudioSink, Hud, ItemId, ItemSpawner, MenuId, NullAudioSink, SoundEffect};
use super::Simulation;

/// Where a session currently is in its life cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Waiting at the start menu
    Idle,
    /// Countdown running, items scannable
    Running,
    /// Timer expired, retry menu up
    Ended,
}

/// Host-facing commands, the single entry channel for discrete input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    /// Start a session from the start menu
    Start,
    /// Start another session from the retry menu
    Retry,
    /// The entity with this id was clicked
    ItemClicked(ItemId),
}

/// Configuration for the checkout simulation
#[derive(Debug, Clone)]
pub struct CheckoutConfig {
    /// Countdown length in seconds
    pub session_duration: f32,
    /// Smallest batch size, at least 1 by the configuration contract
    pub min_items: u32,
    /// Largest batch size, at least `min_items` by the configuration contract
    pub max_items: u32,
    /// RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            session_duration: 30.0,
            min_items: 1,
            max_items: 9,
            seed: None,
        }
    }
}

/// Checkout session controller
///
/// Owns the phase machine, score, countdown, and the active batch. All side
/// effects (entities, text, sound) go through the injected capabilities.
pub struct CheckoutSimulation {
    config: CheckoutConfig,
    conveyor: Conveyor,
    phase: SessionPhase,
    score: u32,
    time_remaining: f32,
    /// Ids of currently-unscanned items; unordered
    batch: Vec<ItemId>,
    rng: StdRng,
    spawner: Box<dyn ItemSpawner>,
    hud: Box<dyn Hud>,
    audio: Box<dyn AudioSink>,
}

impl CheckoutSimulation {
    /// Creates the controller and puts the scene into its attract state:
    /// full timer rendered, start menu up, retry menu down.
    ///
    /// Passing `None` for the audio sink provisions a silent one; that is
    /// tolerated but logged, since it usually means a misconfigured host.
    pub fn new(
        config: CheckoutConfig,
        conveyor: Conveyor,
        spawner: Box<dyn ItemSpawner>,
        hud: Box<dyn Hud>,
        audio: Option<Box<dyn AudioSink>>,
    ) -> Self {
        let audio = audio.unwrap_or_else(|| {
            warn!("no audio sink supplied, provisioning a silent one");
            Box::new(NullAudioSink)
        });

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        let time_remaining = config.session_duration;
        let mut sim = Self {
            config,
            conveyor,
            phase: SessionPhase::Idle,
            score: 0,
            time_remaining,
            batch: Vec::new(),
            rng,
            spawner,
            hud,
            audio,
        };

        sim.render_timer();
        sim.hud.set_menu_visible(MenuId::Start, true);
        sim.hud.set_menu_visible(MenuId::Retry, false);
        sim
    }

    /// Applies one host command; retry is a pure alias of start
    pub fn apply(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::Start | SessionCommand::Retry => self.start_session(),
            SessionCommand::ItemClicked(id) => self.handle_item_clicked(id),
        }
    }

    /// Starts (or restarts) a session
    ///
    /// Any items left over from a previous session are destroyed first, so
    /// rapid restarts never leak entities.
    pub fn start_session(&mut self) {
        self.clear_batch();

        self.score = 0;
        self.render_score();
        self.time_remaining = self.config.session_duration;
        self.phase = SessionPhase::Running;

        self.hud.set_menu_visible(MenuId::Start, false);
        self.hud.set_menu_visible(MenuId::Retry, false);

        self.spawn_batch();
    }

    /// Resolves a click on an item entity
    ///
    /// Ignored entirely unless a session is running. A click whose id is no
    /// longer in the batch (a double-click racing the destruction) still
    /// scans: the removal is skipped but the destroy request, scan sound,
    /// and score all go through.
    pub fn handle_item_clicked(&mut self, id: ItemId) {
        if self.phase != SessionPhase::Running {
            return;
        }

        if let Some(index) = self.batch.iter().position(|&item| item == id) {
            self.batch.swap_remove(index);
        }
        self.spawner.destroy(id);

        self.audio.play_one_shot(SoundEffect::Scan);

        self.score += 1;
        self.render_score();

        if self.batch.is_empty() {
            self.audio.play_one_shot(SoundEffect::Receipt);
            self.spawn_batch();
        }
    }

    /// Puts the next customer's items on the belt
    ///
    /// The count is uniform in `[min_items, max_items]`; each item lands at
    /// a uniform fraction along the belt with up to half a unit of lateral
    /// jitter to either side.
    fn spawn_batch(&mut self) {
        let count = self
            .rng
            .random_range(self.config.min_items..=self.config.max_items);

        for _ in 0..count {
            let t = self.rng.random_range(0.0_f32..=1.0);
            let offset = self.rng.random_range(-0.5..=0.5);
            let position = self.conveyor.jittered_point(t, offset);

            let id = self.spawner.spawn(position);
            self.batch.push(id);
        }
    }

    fn end_session(&mut self) {
        self.phase = SessionPhase::Ended;
        self.clear_batch();
        // Only the retry menu is raised; the start menu keeps whatever
        // visibility it last had.
        self.hud.set_menu_visible(MenuId::Retry, true);
    }

    /// Destroys every item still in the batch; destruction is idempotent,
    /// so ids that already died are harmless.
    fn clear_batch(&mut self) {
        for id in self.batch.drain(..) {
            self.spawner.destroy(id);
        }
    }

    fn render_score(&mut self) {
        let text = format!("Score: {}", self.score);
        self.hud.set_score_text(&text);
    }

    fn render_timer(&mut self) {
        let text = format!("Time: {}", self.time_remaining.max(0.0).ceil() as u32);
        self.hud.set_timer_text(&text);
    }

    // Public accessors for rendering

    /// Returns the current session phase
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Returns the current score
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Returns the remaining session time in seconds
    pub fn time_remaining(&self) -> f32 {
        self.time_remaining
    }

    /// Returns the number of unscanned items on the belt
    pub fn batch_size(&self) -> usize {
        self.batch.len()
    }
}

impl Simulation for CheckoutSimulation {
    fn tick(&mut self, delta_time: f32) {
        if self.phase != SessionPhase::Running {
            return;
        }

        self.time_remaining -= delta_time;
        self.render_timer();

        if self.time_remaining <= 0.0 {
            self.end_session();
        }
    }

    fn reset(&mut self) {
        // Back to the attract state the constructor leaves the scene in
        self.clear_batch();
        self.score = 0;
        self.time_remaining = self.config.session_duration;
        self.phase = SessionPhase::Idle;
        self.render_timer();
        self.hud.set_menu_visible(MenuId::Start, true);
        self.hud.set_menu_visible(MenuId::Retry, false);
    }

    fn name(&self) -> &str {
        "checkout"
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
