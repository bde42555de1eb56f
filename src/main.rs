//! Lesson Platformer entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Map shipped with the game
const BUNDLED_MAP: &str = include_str!("../assets/map.json");

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, KeyboardEvent};

    use lesson_platformer::input::KeyState;
    use lesson_platformer::map::{LevelUrls, MapData, STANDARD_PATCHES, build_registry};
    use lesson_platformer::renderer::{Color, Surface, draw_scene};
    use lesson_platformer::sim::{Animation, GameState, PlatformLanding, tick};
    use lesson_platformer::Settings;

    /// 2D canvas implementation of the draw seam
    struct CanvasSurface {
        ctx: CanvasRenderingContext2d,
        images: HashMap<String, HtmlImageElement>,
    }

    impl CanvasSurface {
        fn new(ctx: CanvasRenderingContext2d) -> Self {
            Self {
                ctx,
                images: HashMap::new(),
            }
        }

        /// Start decoding every sheet so animation switches don't flicker
        fn preload_sprites(&mut self, sprite_dir: &str) {
            for animation in Animation::ALL {
                let _ = self.image(&animation.image_path(sprite_dir));
            }
        }

        /// Cached image element, or None until the browser has decoded it
        fn image(&mut self, src: &str) -> Option<&HtmlImageElement> {
            if !self.images.contains_key(src) {
                let img = HtmlImageElement::new().ok()?;
                img.set_src(src);
                self.images.insert(src.to_string(), img);
            }
            self.images
                .get(src)
                .filter(|img| img.complete() && img.natural_width() > 0)
        }
    }

    impl Surface for CanvasSurface {
        fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
            self.ctx.set_fill_style_str(&color.to_css());
            self.ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
        }

        fn draw_image(&mut self, src: &str, x: f32, y: f32) {
            let ctx = self.ctx.clone();
            if let Some(img) = self.image(src) {
                let _ = ctx.draw_image_with_html_image_element(img, x as f64, y as f64);
            }
        }

        fn draw_sprite_frame(&mut self, src: &str, frame: u32, frame_count: u32, x: f32, y: f32, scale: f32) {
            let ctx = self.ctx.clone();
            if let Some(img) = self.image(src) {
                let frame_w = img.natural_width() as f64 / frame_count.max(1) as f64;
                let frame_h = img.natural_height() as f64;
                let scale = scale as f64;
                let _ = ctx.draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                    img,
                    frame as f64 * frame_w,
                    0.0,
                    frame_w,
                    frame_h,
                    x as f64,
                    y as f64,
                    frame_w * scale,
                    frame_h * scale,
                );
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        keys: KeyState,
        surface: CanvasSurface,
    }

    impl Game {
        /// Run one simulation tick and paint the result
        fn frame(&mut self) {
            let input = self.keys.take_input();
            let report = tick(&mut self.state, &input);
            if let Some(landing) = report.landing.filter(|l| l.first_visit) {
                publish_lesson(&landing);
            }
            draw_scene(&self.state, &self.settings, &mut self.surface);
        }
    }

    /// Expose the reached lesson to the page; navigation itself is up to the page
    fn publish_lesson(landing: &PlatformLanding) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Some(link) = document.get_element_by_id("lesson-link") else {
            return;
        };
        match &landing.url {
            Some(url) => {
                let _ = link.set_attribute("href", url);
                let _ = link.set_attribute("data-lesson", &landing.lesson_id);
                link.set_text_content(Some(&format!("Open {}", landing.lesson_id)));
            }
            None => log::warn!("{} has no lesson URL", landing.lesson_id),
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Lesson Platformer starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let settings = Settings::load();
        // Store the full set so new fields show up for hand editing
        settings.save();

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_width(settings.canvas_width as u32);
        canvas.set_height(settings.canvas_height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let map = match MapData::from_json(super::BUNDLED_MAP) {
            Ok(map) => map,
            Err(e) => {
                log::error!("{e}");
                return;
            }
        };
        let registry = match build_registry(&map, &STANDARD_PATCHES, &LevelUrls::from(&settings)) {
            Ok(registry) => registry,
            Err(e) => {
                log::error!("Map setup failed: {e}");
                return;
            }
        };

        let mut surface = CanvasSurface::new(ctx);
        surface.preload_sprites(&settings.sprite_dir);

        let game = Rc::new(RefCell::new(Game {
            state: GameState::new(registry, &settings),
            settings,
            keys: KeyState::default(),
            surface,
        }));

        setup_input_handlers(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Lesson Platformer running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().keys.key_down(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().keys.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        game.borrow_mut().frame();
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

/// Headless driver for the native build
#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use lesson_platformer::sim::{GameState, Rect, TickInput, tick};

    /// Highest ledge, measured up from the feet, a standing jump still lands on
    const JUMP_REACH: f32 = 72.0;
    /// How far ahead a ledge may start and still be jumped at on the run
    const LOOKAHEAD: f32 = 32.0;

    /// Paces across the map, turning at the canvas edges, and jumps at
    /// ledges it has not reached yet.
    pub struct Autopilot {
        heading: f32,
    }

    impl Autopilot {
        pub fn new() -> Self {
            Self { heading: 1.0 }
        }

        pub fn next_input(&mut self, state: &GameState) -> TickInput {
            let hitbox = state.player.hitbox();
            if hitbox.right() >= state.canvas.x - 1.0 {
                self.heading = -1.0;
            } else if hitbox.left() <= 1.0 {
                self.heading = 1.0;
            }

            let overhead = unvisited_ledge_between(state, hitbox.left(), hitbox.right());
            let ahead = if self.heading > 0.0 {
                unvisited_ledge_between(state, hitbox.right(), hitbox.right() + LOOKAHEAD)
            } else {
                unvisited_ledge_between(state, hitbox.left() - LOOKAHEAD, hitbox.left())
            };
            let grounded = state.player.velocity.y == 0.0;

            // Hold still under a ledge so the jump comes straight back down on it
            TickInput {
                right: !overhead && self.heading > 0.0,
                left: !overhead && self.heading < 0.0,
                jump: grounded && (overhead || ahead),
            }
        }
    }

    fn unvisited_ledge_between(state: &GameState, from: f32, to: f32) -> bool {
        let feet = state.player.hitbox().bottom();
        state.registry.platform_blocks().iter().any(|block| {
            let ledge = Rect::from(block);
            ledge.left() <= to
                && ledge.right() >= from
                && ledge.top() < feet
                && feet - ledge.top() <= JUMP_REACH
                && block
                    .platform_id()
                    .is_some_and(|id| !state.registry.is_platform_visited(id))
        })
    }

    /// Drive `frames` ticks, returning `(frame, lesson_id)` for each first visit
    pub fn run(state: &mut GameState, frames: u32) -> Vec<(u32, String)> {
        let mut pilot = Autopilot::new();
        let mut reached = Vec::new();
        for frame in 0..frames {
            let input = pilot.next_input(state);
            let report = tick(state, &input);
            if let Some(landing) = report.landing.filter(|l| l.first_visit) {
                reached.push((frame, landing.lesson_id));
            }
        }
        reached
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use lesson_platformer::Settings;
    use lesson_platformer::map::{LevelUrls, MapData, STANDARD_PATCHES, build_registry};
    use lesson_platformer::sim::GameState;

    env_logger::init();
    log::info!("Lesson Platformer (native) starting...");
    log::info!("Native mode runs the simulation headless - serve the wasm build for the playable version");

    // Usage: lesson-platformer [map.json] [settings.json]
    let mut args = std::env::args().skip(1);
    let map_json = match args.next() {
        Some(path) => std::fs::read_to_string(path)?,
        None => BUNDLED_MAP.to_string(),
    };
    let settings = args.next().map(Settings::load_from_path).unwrap_or_default();

    let map = MapData::from_json(&map_json)?;
    let registry = build_registry(&map, &STANDARD_PATCHES, &LevelUrls::from(&settings))?;
    for id in registry.platform_ids() {
        let blocks: Vec<_> = registry.blocks_for_platform(id).collect();
        if let Some(first) = blocks.first() {
            println!(
                "level {:>2}: {} block(s) at y={:<3} from x={:<3} {}",
                id,
                blocks.len(),
                first.position.y,
                first.position.x,
                first.url().unwrap_or("-")
            );
        }
    }

    let mut state = GameState::new(registry, &settings);
    for (frame, lesson_id) in autopilot::run(&mut state, 1200) {
        println!("frame {frame}: reached {lesson_id}");
    }

    println!(
        "Visited levels after {} frames: {:?}",
        state.time_ticks,
        state.visited_platforms()
    );
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
