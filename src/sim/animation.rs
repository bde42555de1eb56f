//! Player sprite animations
//!
//! Each animation is a horizontal strip of `frame_rate` frames. A frame is
//! held for `frame_buffer` ticks before advancing.

use serde::{Deserialize, Serialize};

use super::player::Facing;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Animation {
    #[default]
    Idle,
    Run,
    Jump,
    Fall,
    FallLeft,
    RunLeft,
    IdleLeft,
    JumpLeft,
}

/// Sprite sheet parameters for one animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationSpec {
    /// Sheet file name inside the sprite directory
    pub image_src: &'static str,
    /// Frames in the strip
    pub frame_rate: u32,
    /// Ticks per frame
    pub frame_buffer: u32,
}

impl Animation {
    pub const ALL: [Animation; 8] = [
        Animation::Idle,
        Animation::Run,
        Animation::Jump,
        Animation::Fall,
        Animation::FallLeft,
        Animation::RunLeft,
        Animation::IdleLeft,
        Animation::JumpLeft,
    ];

    pub fn spec(self) -> AnimationSpec {
        let (image_src, frame_rate, frame_buffer) = match self {
            Animation::Idle => ("Idle.png", 8, 3),
            Animation::Run => ("Run.png", 8, 5),
            Animation::Jump => ("Jump.png", 2, 3),
            Animation::Fall => ("Fall.png", 2, 3),
            Animation::FallLeft => ("FallLeft.png", 2, 3),
            Animation::RunLeft => ("RunLeft.png", 8, 5),
            Animation::IdleLeft => ("IdleLeft.png", 8, 3),
            Animation::JumpLeft => ("JumpLeft.png", 2, 3),
        };
        AnimationSpec {
            image_src,
            frame_rate,
            frame_buffer,
        }
    }

    /// Full path of the sheet under `sprite_dir`
    pub fn image_path(self, sprite_dir: &str) -> String {
        format!("{}/{}", sprite_dir.trim_end_matches('/'), self.spec().image_src)
    }

    pub fn idle(facing: Facing) -> Self {
        match facing {
            Facing::Right => Animation::Idle,
            Facing::Left => Animation::IdleLeft,
        }
    }

    pub fn jump(facing: Facing) -> Self {
        match facing {
            Facing::Right => Animation::Jump,
            Facing::Left => Animation::JumpLeft,
        }
    }

    pub fn fall(facing: Facing) -> Self {
        match facing {
            Facing::Right => Animation::Fall,
            Facing::Left => Animation::FallLeft,
        }
    }
}

/// Which frame of which animation is on screen
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteState {
    pub animation: Animation,
    pub current_frame: u32,
    pub elapsed_frames: u32,
}

impl SpriteState {
    /// Count one tick, stepping the frame every `frame_buffer` ticks
    pub fn advance(&mut self) {
        let spec = self.animation.spec();
        self.elapsed_frames = self.elapsed_frames.wrapping_add(1);
        if self.elapsed_frames % spec.frame_buffer == 0 {
            self.current_frame = (self.current_frame + 1) % spec.frame_rate;
        }
    }

    /// Change animation, restarting from the first frame. No-op if already playing.
    pub fn switch_to(&mut self, animation: Animation) {
        if self.animation == animation {
            return;
        }
        self.animation = animation;
        self.current_frame = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_advance_respects_buffer() {
        let mut sprite = SpriteState::default();
        // Idle: 8 frames, 3 ticks each
        sprite.advance();
        sprite.advance();
        assert_eq!(sprite.current_frame, 0);
        sprite.advance();
        assert_eq!(sprite.current_frame, 1);
    }

    #[test]
    fn test_frame_wraps() {
        let mut sprite = SpriteState::default();
        sprite.switch_to(Animation::Jump);
        for _ in 0..6 {
            sprite.advance();
        }
        // 2 frames x 3 ticks: back to the start
        assert_eq!(sprite.current_frame, 0);
    }

    #[test]
    fn test_switch_resets_frame() {
        let mut sprite = SpriteState::default();
        for _ in 0..9 {
            sprite.advance();
        }
        assert_eq!(sprite.current_frame, 3);
        sprite.switch_to(Animation::Idle);
        assert_eq!(sprite.current_frame, 3);
        sprite.switch_to(Animation::Run);
        assert_eq!(sprite.current_frame, 0);
    }

    #[test]
    fn test_image_path() {
        assert_eq!(
            Animation::RunLeft.image_path("./img/warrior/"),
            "./img/warrior/RunLeft.png"
        );
    }

    #[test]
    fn test_every_sheet_is_distinct() {
        let mut paths: Vec<String> = Animation::ALL
            .iter()
            .map(|a| a.image_path("./img/warrior"))
            .collect();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), Animation::ALL.len());
        assert!(Animation::ALL
            .iter()
            .all(|a| a.spec().frame_rate > 0 && a.spec().frame_buffer > 0));
    }
}
