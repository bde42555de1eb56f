//! Session state advanced by the tick

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::player::Player;
use crate::map::CollisionRegistry;
use crate::settings::{PhysicsSettings, Settings};

/// Everything one tick reads or writes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub player: Player,
    /// Built once at setup; only `visited` flags change afterwards
    pub registry: CollisionRegistry,
    pub physics: PhysicsSettings,
    /// Drawing surface size in pixels
    pub canvas: Vec2,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    pub fn new(registry: CollisionRegistry, settings: &Settings) -> Self {
        Self {
            player: Player::new(&settings.physics),
            registry,
            physics: settings.physics.clone(),
            canvas: Vec2::new(settings.canvas_width, settings.canvas_height),
            time_ticks: 0,
        }
    }

    /// Put the player back at the spawn point; visited platforms stay visited
    pub fn respawn(&mut self) {
        self.player = Player::new(&self.physics);
    }

    /// Platform ids the player has reached, ascending
    pub fn visited_platforms(&self) -> Vec<u32> {
        self.registry
            .platform_ids()
            .filter(|&id| self.registry.is_platform_visited(id))
            .collect()
    }
}
