//! Console HUD
//!
//! Renders the score, timer, and menus as structured log lines. Text is
//! only logged when it changes, so the per-frame timer re-render does not
//! flood the output.

use enum_map::EnumMap;
use tracing::info;

use crate::sim::{Hud, MenuId};

/// HUD implementation over the log output
#[derive(Debug, Default)]
pub struct ConsoleHud {
    score_text: String,
    timer_text: String,
    menus: EnumMap<MenuId, bool>,
}

impl ConsoleHud {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether a menu is currently visible
    pub fn menu_visible(&self, menu: MenuId) -> bool {
        self.menus[menu]
    }

    /// Returns the last rendered score text
    pub fn score_text(&self) -> &str {
        &self.score_text
    }

    /// Returns the last rendered timer text
    pub fn timer_text(&self) -> &str {
        &self.timer_text
    }
}

impl Hud for ConsoleHud {
    fn set_score_text(&mut self, text: &str) {
        if text != self.score_text {
            self.score_text = text.to_string();
            info!("{}", text);
        }
    }

    fn set_timer_text(&mut self, text: &str) {
        if text != self.timer_text {
            self.timer_text = text.to_string();
            info!("{}", text);
        }
    }

    fn set_menu_visible(&mut self, menu: MenuId, visible: bool) {
        if self.menus[menu] != visible {
            self.menus[menu] = visible;
            info!(?menu, visible, "menu visibility changed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menus_start_hidden() {
        let hud = ConsoleHud::new();
        assert!(!hud.menu_visible(MenuId::Start));
        assert!(!hud.menu_visible(MenuId::Retry));
    }

    #[test]
    fn tracks_the_latest_text_and_menu_state() {
        let mut hud = ConsoleHud::new();

        hud.set_score_text("Score: 3");
        hud.set_timer_text("Time: 12");
        hud.set_menu_visible(MenuId::Retry, true);

        assert_eq!(hud.score_text(), "Score: 3");
        assert_eq!(hud.timer_text(), "Time: 12");
        assert!(hud.menu_visible(MenuId::Retry));

        hud.set_menu_visible(MenuId::Retry, false);
        assert!(!hud.menu_visible(MenuId::Retry));
    }
}
