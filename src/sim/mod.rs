//! Per-frame simulation
//!
//! Everything that changes while the game runs lives here. This module has no
//! rendering or platform dependencies:
//! - One tick per display refresh, fixed step (no delta time)
//! - Stable iteration order (registry order)
//! - Only `visited` flags in the registry are mutated

pub mod animation;
pub mod collision;
pub mod player;
pub mod state;
pub mod tick;

pub use animation::{Animation, AnimationSpec, SpriteState};
pub use collision::{Rect, feet_on_platform, overlaps};
pub use player::{Facing, Player};
pub use state::GameState;
pub use tick::{PlatformLanding, TickInput, TickReport, tick};
