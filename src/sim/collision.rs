//! Axis-aligned overlap tests between the player hitbox and blocks
//!
//! Edges are inclusive: touching counts as overlapping, so a player resting
//! exactly on a block top keeps registering the contact.

use glam::Vec2;

use crate::map::CollisionBlock;

/// Axis-aligned rectangle in pixel space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    fn overlaps_x(&self, other: &Rect) -> bool {
        self.left() <= other.right() && self.right() >= other.left()
    }
}

impl From<&CollisionBlock> for Rect {
    fn from(block: &CollisionBlock) -> Self {
        Rect::new(
            block.position.as_vec2(),
            Vec2::new(block.width as f32, block.height as f32),
        )
    }
}

/// Full overlap test used for floor blocks
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.bottom() >= b.top() && a.top() <= b.bottom() && a.overlaps_x(b)
}

/// One-way platform test: only the feet count, and only while they sit
/// inside the ledge's height band.
#[inline]
pub fn feet_on_platform(hitbox: &Rect, ledge: &Rect) -> bool {
    hitbox.bottom() >= ledge.top() && hitbox.bottom() <= ledge.bottom() && hitbox.overlaps_x(ledge)
}
