//! Engine configuration.
//!
//! Plain `Default`-able structs; hosts tweak the fields they care about.

use crate::logging::LoggingConfig;
use crate::scene::SceneConfig;

/// Input conversion settings.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct InputConfig {
    /// Emit pointer `Move` events while no button is held. Off by default:
    /// most scenes only react to presses and drags.
    pub pointer_move_events: bool,
}

/// Top-level configuration handed to [`Stage`](crate::core::Stage).
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub logging: LoggingConfig,
    pub scene: SceneConfig,
    pub input: InputConfig,
}

impl EngineConfig {
    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = logging;
        self
    }

    pub fn with_scene(mut self, scene: SceneConfig) -> Self {
        self.scene = scene;
        self
    }

    pub fn with_input(mut self, input: InputConfig) -> Self {
        self.input = input;
        self
    }
}
