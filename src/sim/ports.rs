//! Collaborator capabilities supplied by the host
//!
//! The session controller never talks to an engine directly. It is handed
//! three capabilities at construction: something that spawns and destroys
//! item entities, something that renders text and menus, and something that
//! plays one-shot sounds. Hosts provide real implementations; tests provide
//! recording doubles.

use enum_map::Enum;
use serde::{Deserialize, Serialize};

/// Identity of one spawned item entity
///
/// Allocated by the spawner; unique for the lifetime of the registry that
/// issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u64);

/// The two menus the game toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum, Serialize, Deserialize)]
pub enum MenuId {
    Start,
    Retry,
}

/// Short sound effects the controller triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum, Serialize, Deserialize)]
pub enum SoundEffect {
    /// One item scanned
    Scan,
    /// A whole batch cleared
    Receipt,
}

/// Creates and destroys item entities
///
/// `destroy` must be idempotent: destroying an id that is already gone is a
/// silent no-op, never an error.
pub trait ItemSpawner {
    /// Instantiates an item entity at the given position and returns its id
    fn spawn(&mut self, position: [f32; 2]) -> ItemId;

    /// Removes the entity for `id`, tolerating ids that are already gone
    fn destroy(&mut self, id: ItemId);
}

/// Renders score/timer text and menu visibility
pub trait Hud {
    fn set_score_text(&mut self, text: &str);
    fn set_timer_text(&mut self, text: &str);
    fn set_menu_visible(&mut self, menu: MenuId, visible: bool);
}

/// Plays short one-shot sound effects
pub trait AudioSink {
    fn play_one_shot(&mut self, effect: SoundEffect);
}

/// Sink that swallows every effect
///
/// Provisioned automatically when the host supplies no audio sink, so a
/// misconfigured scene degrades to silence instead of failing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudioSink;

impl AudioSink for NullAudioSink {
    fn play_one_shot(&mut self, _effect: SoundEffect) {}
}
