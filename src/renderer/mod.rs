//! Scene painting
//!
//! The simulation never draws. Each frame the host hands a [`Surface`] to
//! [`draw_scene`], which issues the draw calls: background, every collision
//! block, then the player sprite.

use crate::map::{CollisionBlock, CollisionRegistry};
use crate::settings::Settings;
use crate::sim::{GameState, Rect};

/// RGBA colour, components 0-255 except alpha 0.0-1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// CSS `rgba(...)` form for 2D canvas fill styles
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

pub const BACKGROUND: Color = Color::rgba(20, 24, 40, 1.0);
pub const FLOOR_BLOCK: Color = Color::rgba(255, 0, 0, 0.5);
pub const PLATFORM_BLOCK: Color = Color::rgba(255, 200, 0, 0.5);
pub const VISITED_PLATFORM_BLOCK: Color = Color::rgba(0, 200, 0, 0.6);
pub const HITBOX: Color = Color::rgba(0, 0, 255, 0.3);

/// A 2D drawing target (canvas, test recorder, ...)
pub trait Surface {
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);

    /// Draw a whole image with its top-left at (x, y)
    fn draw_image(&mut self, src: &str, x: f32, y: f32);

    /// Draw frame `frame` of a horizontal strip of `frame_count` frames,
    /// scaled by `scale`
    fn draw_sprite_frame(&mut self, src: &str, frame: u32, frame_count: u32, x: f32, y: f32, scale: f32);
}

/// Fill colour for a block. Platform blocks share their look across the whole
/// platform id: one visited block lights up all of them.
pub fn block_color(block: &CollisionBlock, registry: &CollisionRegistry) -> Color {
    match block.platform_id() {
        None => FLOOR_BLOCK,
        Some(id) if registry.is_platform_visited(id) => VISITED_PLATFORM_BLOCK,
        Some(_) => PLATFORM_BLOCK,
    }
}

fn fill(surface: &mut impl Surface, rect: Rect, color: Color) {
    surface.fill_rect(rect.pos.x, rect.pos.y, rect.size.x, rect.size.y, color);
}

/// Paint one frame
pub fn draw_scene(state: &GameState, settings: &Settings, surface: &mut impl Surface) {
    fill(
        surface,
        Rect::new(glam::Vec2::ZERO, state.canvas),
        BACKGROUND,
    );
    surface.draw_image(&settings.background_src, 0.0, 0.0);

    let registry = &state.registry;
    for block in registry.floor_blocks().iter().chain(registry.platform_blocks()) {
        fill(surface, Rect::from(block), block_color(block, registry));
    }

    let player = &state.player;
    let animation = player.animation();
    let spec = animation.spec();
    surface.draw_sprite_frame(
        &animation.image_path(&settings.sprite_dir),
        player.sprite.current_frame,
        spec.frame_rate,
        player.position.x,
        player.position.y,
        settings.sprite_scale,
    );

    if settings.show_hitbox {
        fill(surface, player.hitbox(), HITBOX);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{MAP_COLUMNS, SOLID_TILE};
    use crate::map::{BlockId, BlockLayer, LevelUrls, MapData, build_registry};

    #[derive(Default)]
    struct Recorder {
        rects: Vec<(f32, f32, f32, f32, Color)>,
        images: Vec<String>,
        sprites: Vec<(String, u32, u32)>,
    }

    impl Surface for Recorder {
        fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
            self.rects.push((x, y, w, h, color));
        }

        fn draw_image(&mut self, src: &str, _x: f32, _y: f32) {
            self.images.push(src.to_string());
        }

        fn draw_sprite_frame(&mut self, src: &str, frame: u32, frame_count: u32, _x: f32, _y: f32, _scale: f32) {
            self.sprites.push((src.to_string(), frame, frame_count));
        }
    }

    fn state() -> GameState {
        let mut map = MapData {
            floor_collisions: vec![0; 27 * MAP_COLUMNS],
            platform_collisions: vec![0; 27 * MAP_COLUMNS],
        };
        map.floor_collisions[26 * MAP_COLUMNS] = SOLID_TILE;
        for col in [4, 5, 6, 20] {
            map.platform_collisions[10 * MAP_COLUMNS + col] = SOLID_TILE;
        }
        let registry = build_registry(&map, &[], &LevelUrls::default()).unwrap();
        GameState::new(registry, &Settings::default())
    }

    #[test]
    fn test_draw_order() {
        let state = state();
        let mut recorder = Recorder::default();
        draw_scene(&state, &Settings::default(), &mut recorder);

        // Background + 1 floor + 4 platform blocks
        assert_eq!(recorder.rects.len(), 6);
        assert_eq!(recorder.rects[0].4, BACKGROUND);
        assert_eq!(recorder.rects[1], (0.0, 416.0, 16.0, 16.0, FLOOR_BLOCK));
        assert_eq!(recorder.rects[2].3, 4.0);
        assert_eq!(recorder.images, vec!["./img/background.png".to_string()]);
        assert_eq!(
            recorder.sprites,
            vec![("./img/warrior/Idle.png".to_string(), 0, 8)]
        );
    }

    #[test]
    fn test_visited_colour_is_shared() {
        let mut state = state();
        // Columns 4-6 are level 1, column 20 is level 2
        state.registry.mark_visited(BlockId {
            layer: BlockLayer::Platform,
            index: 2,
        });

        let mut recorder = Recorder::default();
        draw_scene(&state, &Settings::default(), &mut recorder);
        let platform_colors: Vec<Color> = recorder.rects[2..].iter().map(|r| r.4).collect();
        assert_eq!(
            platform_colors,
            vec![
                VISITED_PLATFORM_BLOCK,
                VISITED_PLATFORM_BLOCK,
                VISITED_PLATFORM_BLOCK,
                PLATFORM_BLOCK
            ]
        );
    }

    #[test]
    fn test_hitbox_overlay() {
        let state = state();
        let settings = Settings {
            show_hitbox: true,
            ..Settings::default()
        };
        let mut recorder = Recorder::default();
        draw_scene(&state, &settings, &mut recorder);
        let last = recorder.rects.last().unwrap();
        assert_eq!(*last, (85.0, 326.0, 14.0, 27.0, HITBOX));
    }

    #[test]
    fn test_css_color() {
        assert_eq!(FLOOR_BLOCK.to_css(), "rgba(255, 0, 0, 0.5)");
    }
}
