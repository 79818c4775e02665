//! Build information health check

use crate::build_info;
use crate::health::check::{CheckResult, SystemCheck};

/// Checks that build information is accessible and valid
pub struct BuildInfoCheck;

impl BuildInfoCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BuildInfoCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for BuildInfoCheck {
    fn name(&self) -> &'static str {
        "Build Info"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates build metadata (rustc, target, timestamps)")
    }

    fn check(&self) -> CheckResult {
        let mut details = Vec::new();

        details.push(format!("  Build time: {}", build_info::BUILD_TIMESTAMP));
        details.push(format!(
            "  Rustc: {} ({})",
            build_info::RUSTC_SEMVER,
            build_info::RUSTC_CHANNEL
        ));
        details.push(format!("  Target: {}", build_info::CARGO_TARGET_TRIPLE));
        details.push(format!("  Opt level: {}", build_info::CARGO_OPT_LEVEL));
        details.push(format!("  Version: {}", build_info::version_string()));

        if build_info::RUSTC_SEMVER.is_empty() || build_info::CARGO_TARGET_TRIPLE.is_empty() {
            return CheckResult::warn("Build metadata partially missing")
                .with_details(details.join("\n"));
        }

        CheckResult::pass("Build metadata accessible").with_details(details.join("\n"))
    }
}
