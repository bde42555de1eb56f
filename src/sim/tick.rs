//! Per-frame simulation tick
//!
//! Called once per display refresh by the host. There is no internal loop:
//! the session ends when the host stops calling [`tick`].

use serde::{Deserialize, Serialize};

use super::state::GameState;
use crate::map::{BlockId, CollisionRegistry};

/// Input snapshot for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Right direction held
    pub right: bool,
    /// Left direction held
    pub left: bool,
    /// Jump impulse (one-shot)
    pub jump: bool,
}

/// A platform landing, handed to whatever performs lesson navigation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformLanding {
    pub block: BlockId,
    pub level: u32,
    pub lesson_id: String,
    pub url: Option<String>,
    /// No block of this platform had been visited before
    pub first_visit: bool,
}

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub landing: Option<PlatformLanding>,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) -> TickReport {
    state.time_ticks += 1;

    if input.jump {
        state.player.velocity.y = -state.physics.jump_velocity;
    }

    state.player.check_canvas_bounds(state.canvas.x);

    let landed = state.player.update(&state.registry, state.physics.gravity);
    let landing = landed.and_then(|id| record_landing(&mut state.registry, id));

    if state.player.hitbox().top() > state.canvas.y {
        log::debug!("Player fell out of the map at tick {}", state.time_ticks);
        state.respawn();
    }

    // Takes effect on the next frame's movement
    state.player.apply_movement(input.right, input.left, state.physics.move_speed);
    state.player.select_animation();

    TickReport { landing }
}

fn record_landing(registry: &mut CollisionRegistry, id: BlockId) -> Option<PlatformLanding> {
    let first_visit = registry.mark_visited(id);
    let block = registry.block(id)?;
    let tag = block.tag.as_ref()?;

    if first_visit {
        log::info!(
            "Reached {} (level {}) -> {}",
            tag.lesson_id,
            tag.level,
            tag.url.as_deref().unwrap_or("<no url>")
        );
    }

    Some(PlatformLanding {
        block: id,
        level: tag.level,
        lesson_id: tag.lesson_id.clone(),
        url: tag.url.clone(),
        first_visit,
    })
}
