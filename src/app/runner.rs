//! Headless game runner
//!
//! Owns the world, drives fixed-timestep ticks, and routes session commands
//! into the checkout simulation. A scripted autoplayer stands in for the
//! player: it starts the session, scans items at a configured pace, and
//! retries when the timer runs out.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{error, info, warn};

use super::audio::RodioAudioSink;
use super::console::ConsoleHud;
use super::registry::SharedRegistry;
use crate::config::GameConfig;
use crate::sim::{
    AudioSink, CheckoutConfig, CheckoutSimulation, Conveyor, SessionCommand, SessionPhase, World,
};

/// Fixed simulation timestep (60 Hz)
const TIMESTEP: f32 = 1.0 / 60.0;

/// Main game application
pub struct App {
    config: GameConfig,
    world: World,
    registry: SharedRegistry,
    /// Pending host commands, drained before every tick
    commands: VecDeque<SessionCommand>,
    /// Autoplayer randomness (click choice and pacing)
    rng: StdRng,
}

impl App {
    /// Creates the application with the provided configuration
    pub fn new(config: GameConfig) -> Self {
        info!(profile = %config.profile, "Starting game");
        info!(?config.session, "Session configuration");

        let registry = SharedRegistry::new();
        let hud = ConsoleHud::new();

        let audio: Option<Box<dyn AudioSink>> = match RodioAudioSink::new() {
            Ok(sink) => Some(Box::new(sink)),
            Err(error) => {
                warn!(error = %error, "No audio device available, running silent");
                None
            }
        };

        let checkout = CheckoutSimulation::new(
            CheckoutConfig {
                session_duration: config.session.duration_secs,
                min_items: config.session.min_items,
                max_items: config.session.max_items,
                seed: config.session.seed,
            },
            Conveyor::new(config.conveyor.start, config.conveyor.end),
            Box::new(registry.clone()),
            Box::new(hud),
            audio,
        );

        let mut world = World::new();
        world.add_simulation(Box::new(checkout));

        let autoplay_seed = config
            .session
            .seed
            .map(|seed| seed.wrapping_add(1))
            .unwrap_or_else(rand::random);

        Self {
            config,
            world,
            registry,
            commands: VecDeque::new(),
            rng: StdRng::seed_from_u64(autoplay_seed),
        }
    }

    /// Creates the application with configuration loaded from environment
    pub fn from_env() -> Self {
        let config = GameConfig::load_from_env().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load config, using default configuration");
            GameConfig::default()
        });
        Self::new(config)
    }

    /// Plays the configured number of sessions and returns their final scores
    pub fn run(&mut self) -> Vec<u32> {
        let sessions_target = self.config.autoplay.sessions.max(1) as usize;
        let mut scores = Vec::new();
        let mut scan_timer = self.config.autoplay.scan_interval_secs;
        let mut prev_phase = SessionPhase::Idle;

        self.commands.push_back(SessionCommand::Start);

        // Bound the loop: a session is duration plus some slack, per session
        let ticks_per_session =
            ((self.config.session.duration_secs + 10.0) / TIMESTEP) as u64 + 600;
        let max_ticks = ticks_per_session * sessions_target as u64;

        for _ in 0..max_ticks {
            self.drive_autoplay(&mut scan_timer);
            self.drain_commands();
            self.world.tick(TIMESTEP);

            let phase = self
                .checkout()
                .map(|checkout| checkout.phase())
                .unwrap_or(SessionPhase::Idle);

            if prev_phase == SessionPhase::Running && phase == SessionPhase::Ended {
                let score = self.checkout().map(|checkout| checkout.score()).unwrap_or(0);
                info!(session = scores.len() + 1, score, "session over");
                scores.push(score);

                if scores.len() >= sessions_target {
                    return scores;
                }
                self.commands.push_back(SessionCommand::Retry);
            }
            prev_phase = phase;
        }

        error!("runner hit its tick bound before finishing, stopping");
        scores
    }

    /// Generates the next scripted input, if any is due this frame
    fn drive_autoplay(&mut self, scan_timer: &mut f32) {
        let running = self
            .checkout()
            .map(|checkout| checkout.phase() == SessionPhase::Running)
            .unwrap_or(false);
        if !running {
            return;
        }

        *scan_timer -= TIMESTEP;
        if *scan_timer > 0.0 {
            return;
        }

        let live = self.registry.live_ids();
        if !live.is_empty() {
            let pick = live[self.rng.random_range(0..live.len())];
            self.commands.push_back(SessionCommand::ItemClicked(pick));
        }

        // Vary the pace a little so sessions do not all look alike
        let interval = self.config.autoplay.scan_interval_secs;
        *scan_timer = interval * self.rng.random_range(0.6..=1.4);
    }

    /// Applies all pending commands to the checkout simulation
    fn drain_commands(&mut self) {
        while let Some(command) = self.commands.pop_front() {
            if let Some(checkout) = self
                .world
                .get_simulation_typed_mut::<CheckoutSimulation>("checkout")
            {
                checkout.apply(command);
            }
        }
    }

    fn checkout(&self) -> Option<&CheckoutSimulation> {
        self.world.get_simulation_typed::<CheckoutSimulation>("checkout")
    }

    /// Returns the world, for diagnostics
    pub fn world(&self) -> &World {
        &self.world
    }
}

impl Default for App {
    fn default() -> Self {
        Self::from_env()
    }
}
