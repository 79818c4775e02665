//! Audio backend health check

use crate::app::RodioAudioSink;
use crate::health::check::{CheckResult, SystemCheck};

/// Checks whether a default audio output device is available
///
/// A missing device is a warning, not a failure: the game provisions a
/// silent sink and keeps running, so headless machines stay healthy.
pub struct AudioBackendCheck;

impl AudioBackendCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AudioBackendCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for AudioBackendCheck {
    fn name(&self) -> &'static str {
        "Audio Backend"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Probes the default audio output device used for one-shots")
    }

    fn check(&self) -> CheckResult {
        match RodioAudioSink::new() {
            Ok(_sink) => CheckResult::pass("Default output device available")
                .with_details("  ✓ Output stream opened and closed cleanly".to_string()),
            Err(error) => CheckResult::warn("No audio device, effects will be silent")
                .with_details(format!("  ⚠ {}", error)),
        }
    }
}
