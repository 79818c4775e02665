//! Game world/simulation health check

use crate::app::{ConsoleHud, SharedRegistry};
use crate::health::check::{CheckResult, SystemCheck};
use crate::sim::{
    CheckoutConfig, CheckoutSimulation, Conveyor, NullAudioSink, SessionCommand, SessionPhase,
    World,
};

/// Checks that the world boots and a checkout session can run a frame
pub struct WorldCheck;

impl WorldCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WorldCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for WorldCheck {
    fn name(&self) -> &'static str {
        "World/Simulation"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates world initialization and a checkout session tick")
    }

    fn check(&self) -> CheckResult {
        let mut details = Vec::new();

        let mut world = World::new();
        details.push("  ✓ World initialized successfully".to_string());

        if world.tick_count() != 0 || world.sim_time() != 0.0 {
            details.push("  ✗ World should start at tick 0, time 0.0".to_string());
            return CheckResult::fail("World initialization failed")
                .with_details(details.join("\n"));
        }
        details.push(format!(
            "  ✓ Initial state: tick {}, {:.2}s",
            world.tick_count(),
            world.sim_time()
        ));

        // Boot a checkout sim with inert collaborators
        let config = CheckoutConfig {
            seed: Some(1),
            ..CheckoutConfig::default()
        };
        let min_items = config.min_items;
        let max_items = config.max_items;
        let checkout = CheckoutSimulation::new(
            config,
            Conveyor::new([-4.0, 0.0], [4.0, 0.0]),
            Box::new(SharedRegistry::new()),
            Box::new(ConsoleHud::new()),
            Some(Box::new(NullAudioSink)),
        );
        world.add_simulation(Box::new(checkout));
        details.push("  ✓ Checkout simulation registered".to_string());

        let Some(checkout) = world.get_simulation_typed_mut::<CheckoutSimulation>("checkout")
        else {
            details.push("  ✗ Typed lookup by name failed".to_string());
            return CheckResult::fail("Simulation lookup failed").with_details(details.join("\n"));
        };

        checkout.apply(SessionCommand::Start);
        if checkout.phase() != SessionPhase::Running {
            details.push("  ✗ Session did not start".to_string());
            return CheckResult::fail("Session start failed").with_details(details.join("\n"));
        }
        let batch = checkout.batch_size() as u32;
        if !(min_items..=max_items).contains(&batch) {
            details.push(format!("  ✗ Batch of {} outside configured range", batch));
            return CheckResult::fail("Batch size out of range").with_details(details.join("\n"));
        }
        details.push(format!("  ✓ Session running with {} items", batch));

        world.tick(0.016); // ~60 FPS
        if world.tick_count() != 1 {
            details.push("  ✗ Tick count should increment".to_string());
            return CheckResult::fail("World tick failed").with_details(details.join("\n"));
        }
        details.push(format!("  ✓ After tick: count={}", world.tick_count()));

        world.pause();
        if !world.is_paused() {
            details.push("  ✗ Pause failed".to_string());
            return CheckResult::fail("World pause failed").with_details(details.join("\n"));
        }
        world.resume();
        world.set_time_scale(2.0);
        if world.time_scale() != 2.0 {
            details.push("  ✗ Time scale failed".to_string());
            return CheckResult::fail("World time scale failed").with_details(details.join("\n"));
        }
        details.push("  ✓ Pause and time scale: working".to_string());

        CheckResult::pass("All world systems operational").with_details(details.join("\n"))
    }
}
