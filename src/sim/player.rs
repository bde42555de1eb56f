//! Player body: position, velocity, hitbox and collision response

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::animation::{Animation, SpriteState};
use super::collision::{Rect, feet_on_platform, overlaps};
use crate::consts::COLLISION_EPSILON;
use crate::map::{BlockId, BlockLayer, CollisionBlock, CollisionRegistry};
use crate::settings::PhysicsSettings;

/// Last horizontal direction the player moved in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Sprite top-left corner
    pub position: Vec2,
    pub velocity: Vec2,
    pub hitbox_offset: Vec2,
    pub hitbox_size: Vec2,
    pub facing: Facing,
    pub sprite: SpriteState,
}

impl Player {
    pub fn new(physics: &PhysicsSettings) -> Self {
        Self {
            position: physics.spawn,
            velocity: Vec2::ZERO,
            hitbox_offset: physics.hitbox_offset,
            hitbox_size: physics.hitbox_size,
            facing: Facing::Right,
            sprite: SpriteState::default(),
        }
    }

    pub fn hitbox(&self) -> Rect {
        Rect::new(self.position + self.hitbox_offset, self.hitbox_size)
    }

    pub fn animation(&self) -> Animation {
        self.sprite.animation
    }

    /// Stop at the left/right canvas edges, pulling the hitbox back inside
    /// if it already crossed.
    pub fn check_canvas_bounds(&mut self, canvas_width: f32) {
        let hitbox = self.hitbox();
        if hitbox.right() + self.velocity.x >= canvas_width {
            self.velocity.x = 0.0;
            if hitbox.right() > canvas_width {
                self.position.x -= hitbox.right() - canvas_width;
            }
        } else if hitbox.left() + self.velocity.x <= 0.0 {
            self.velocity.x = 0.0;
            if hitbox.left() < 0.0 {
                self.position.x -= hitbox.left();
            }
        }
    }

    /// Advance one frame of physics against `registry`.
    ///
    /// Returns the platform block landed on this frame, if any.
    pub fn update(&mut self, registry: &CollisionRegistry, gravity: f32) -> Option<BlockId> {
        self.sprite.advance();

        self.position.x += self.velocity.x;
        self.resolve_horizontal(registry.floor_blocks());

        self.velocity.y += gravity;
        self.position.y += self.velocity.y;
        self.resolve_vertical(registry.floor_blocks());
        self.land_on_platforms(registry.platform_blocks())
    }

    fn resolve_horizontal(&mut self, blocks: &[CollisionBlock]) {
        for block in blocks {
            let block = Rect::from(block);
            if !overlaps(&self.hitbox(), &block) {
                continue;
            }
            if self.velocity.x > 0.0 {
                self.velocity.x = 0.0;
                let offset = self.hitbox_offset.x + self.hitbox_size.x;
                self.position.x = block.left() - offset - COLLISION_EPSILON;
                break;
            }
            if self.velocity.x < 0.0 {
                self.velocity.x = 0.0;
                self.position.x = block.right() - self.hitbox_offset.x + COLLISION_EPSILON;
                break;
            }
        }
    }

    fn resolve_vertical(&mut self, blocks: &[CollisionBlock]) {
        for block in blocks {
            let block = Rect::from(block);
            if !overlaps(&self.hitbox(), &block) {
                continue;
            }
            if self.velocity.y > 0.0 {
                self.velocity.y = 0.0;
                self.snap_feet_to(block.top());
                break;
            }
            if self.velocity.y < 0.0 {
                self.velocity.y = 0.0;
                self.position.y = block.bottom() - self.hitbox_offset.y + COLLISION_EPSILON;
                break;
            }
        }
    }

    /// Platforms only stop a falling player
    fn land_on_platforms(&mut self, blocks: &[CollisionBlock]) -> Option<BlockId> {
        if self.velocity.y <= 0.0 {
            return None;
        }
        let index = blocks
            .iter()
            .position(|block| feet_on_platform(&self.hitbox(), &Rect::from(block)))?;
        self.velocity.y = 0.0;
        self.snap_feet_to(blocks[index].position.y as f32);
        Some(BlockId {
            layer: BlockLayer::Platform,
            index,
        })
    }

    fn snap_feet_to(&mut self, top: f32) {
        let offset = self.hitbox_offset.y + self.hitbox_size.y;
        self.position.y = top - offset - COLLISION_EPSILON;
    }

    /// Replace horizontal velocity from the held direction keys. Right wins
    /// when both are held.
    pub fn apply_movement(&mut self, right: bool, left: bool, speed: f32) {
        self.velocity.x = 0.0;
        if right {
            self.velocity.x = speed;
            self.facing = Facing::Right;
        } else if left {
            self.velocity.x = -speed;
            self.facing = Facing::Left;
        }
    }

    /// Pick the animation matching the current motion
    pub fn select_animation(&mut self) {
        let animation = if self.velocity.y < 0.0 {
            Animation::jump(self.facing)
        } else if self.velocity.y > 0.0 {
            Animation::fall(self.facing)
        } else if self.velocity.x > 0.0 {
            Animation::Run
        } else if self.velocity.x < 0.0 {
            Animation::RunLeft
        } else {
            Animation::idle(self.facing)
        };
        self.sprite.switch_to(animation);
    }
}
