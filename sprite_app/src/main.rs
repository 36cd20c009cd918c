//! Sprite batching demo application
//!
//! Drives the sprite batcher through a few frames against the headless
//! backend and reports batching statistics. Serves as the reference frame
//! loop for applications that bring a real windowed graphics backend.

use sprite_engine::prelude::*;
use sprite_engine::render::api::GraphicsDevice;
use sprite_engine::render::backends::headless::HeadlessDevice;

const SETTINGS_PATH: &str = "sprite_app/render_settings.toml";
const FRAME_COUNT: u32 = 3;
const SPRITE_SIZE: f32 = 16.0;

/// 2x2 black/white checkerboard, RGBA8
const CHECKER_PIXELS: [u8; 16] = [
    0xff, 0xff, 0xff, 0xff, 0x00, 0x00, 0x00, 0xff, //
    0x00, 0x00, 0x00, 0xff, 0xff, 0xff, 0xff, 0xff,
];

struct DemoApp {
    batch: SpriteBatch,
    settings: RenderSettings,
    checker_texture: TextureId,
}

impl DemoApp {
    fn new(settings: RenderSettings) -> RenderResult<Self> {
        log::info!("Creating sprite demo application...");

        let mut device = HeadlessDevice::new();
        let shader = device.create_shader_program()?;
        let checker_texture = device.create_texture_rgba8(2, 2, &CHECKER_PIXELS)?;

        let mut batch = SpriteBatch::new(Box::new(device), shader)?;
        batch.set_projection(&Mat4::orthographic_2d(
            settings.viewport_width,
            settings.viewport_height,
        ))?;

        Ok(Self {
            batch,
            settings,
            checker_texture,
        })
    }

    fn render_frame(&mut self, frame: u32) -> RenderResult<()> {
        self.batch.begin();

        // Background quad covering the whole viewport.
        let clear = self.settings.clear_color;
        self.batch.draw_quad(
            Vec2::new(0.0, 0.0),
            Vec2::new(self.settings.viewport_width, self.settings.viewport_height),
            Vec3::new(clear[0], clear[1], clear[2]),
        )?;

        let columns = (self.settings.viewport_width / SPRITE_SIZE).max(1.0) as u32;
        for i in 0..self.settings.sprite_count {
            let col = i % columns;
            let row = i / columns;
            let position = Vec2::new(
                col as f32 * SPRITE_SIZE,
                row as f32 * SPRITE_SIZE + frame as f32,
            );
            let size = Vec2::new(SPRITE_SIZE, SPRITE_SIZE);

            if i % 4 == 0 {
                self.batch
                    .draw_textured_quad(position, size, self.checker_texture)?;
            } else {
                let shade = (i % 8) as f32 / 8.0;
                self.batch
                    .draw_quad(position, size, Vec3::new(shade, 1.0 - shade, 0.4))?;
            }
        }

        self.batch.end()?;
        self.batch.flush()?;

        let stats = self.batch.stats();
        log::info!(
            "Frame {}: {} quads in {} draw calls",
            frame,
            stats.quad_count,
            stats.draw_count
        );
        Ok(())
    }
}

fn run(settings: RenderSettings) -> RenderResult<()> {
    let mut app = DemoApp::new(settings)?;
    for frame in 0..FRAME_COUNT {
        app.render_frame(frame)?;
    }
    Ok(())
}

fn main() {
    sprite_engine::foundation::logging::init_with_level(log::LevelFilter::Info);

    log::info!("Starting sprite batching demo");

    let settings = RenderSettings::load_from_file(SETTINGS_PATH).unwrap_or_else(|err| {
        log::warn!("Using default render settings: {}", err);
        RenderSettings::default()
    });

    if let Err(err) = run(settings) {
        log::error!("Demo failed: {}", err);
        std::process::exit(1);
    }
}
