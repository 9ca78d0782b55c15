//! Cylinder Viewer: an interactive software-rendered cylinder
//!
//! Everything is drawn by a small CPU rasterizer into a framebuffer that is
//! blitted to the window each frame:
//! - Wireframe, flat colored, and textured display modes
//! - Orbit camera (drag) with wheel zoom
//! - Live radius / height / subdivision controls

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod config;
mod mesh;
mod rasterizer;
mod ui;
mod viewer;

use std::path::PathBuf;

use macroquad::logging::{info, warn};
use macroquad::prelude::*;
use ::rand::rngs::StdRng;
use ::rand::SeedableRng;

use config::ViewerConfig;
use rasterizer::Framebuffer;
use ui::{draw_control_panel, MouseState, PanelAction, PanelState, Rect, UiContext, PANEL_WIDTH};
use viewer::Viewer;

/// Drag id for the 3D viewport
const VIEWPORT_ID: u64 = u64::MAX;

fn window_conf() -> Conf {
    Conf {
        window_title: "Cylinder Viewer".to_owned(),
        window_width: 800,
        window_height: 600,
        window_resizable: true,
        ..Default::default()
    }
}

/// Config path from the first CLI argument, else the per-user default.
/// A missing per-user file is created with the defaults.
fn resolve_config() -> ViewerConfig {
    if let Some(arg) = std::env::args().nth(1) {
        return ViewerConfig::load_or_default(&PathBuf::from(arg));
    }

    let Some(path) = config::default_config_path() else {
        info!("No config directory, using defaults");
        return ViewerConfig::default();
    };
    if !path.exists() {
        let defaults = ViewerConfig::default();
        match defaults.save(&path) {
            Ok(()) => info!("Wrote default config to {}", path.display()),
            Err(e) => warn!("Could not write default config {}: {}", path.display(), e),
        }
        return defaults;
    }
    ViewerConfig::load_or_default(&path)
}

fn color_rng(config: &ViewerConfig) -> StdRng {
    match config.color_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::seed_from_u64((miniquad::date::now() * 1000.0) as u64),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn pick_texture(viewer: &mut Viewer) {
    let dialog = rfd::FileDialog::new()
        .set_title("Load Texture")
        .add_filter("Images", &["png", "jpg", "jpeg", "bmp"]);

    if let Some(path) = dialog.pick_file() {
        viewer.load_texture(&path);
    }
}

#[cfg(target_arch = "wasm32")]
fn pick_texture(_viewer: &mut Viewer) {
    warn!("Texture loading is not available in the browser");
}

fn apply_action(viewer: &mut Viewer, config: &ViewerConfig, action: PanelAction) {
    match action {
        PanelAction::SetRadius(v) => viewer.set_radius(config.radius_range.clamp(v)),
        PanelAction::SetHeight(v) => viewer.set_height(config.height_range.clamp(v)),
        PanelAction::SetSubdivisions(v) => viewer.set_subdivisions(config.subdivision_range.clamp(v)),
        PanelAction::LoadTexture => pick_texture(viewer),
        PanelAction::SetDisplayMode(mode) => viewer.set_display_mode(mode),
    }
}

/// Upload the framebuffer and draw it at the viewport origin
fn blit(fb: &Framebuffer, viewport: Rect) {
    let texture = Texture2D::from_rgba8(fb.width as u16, fb.height as u16, &fb.pixels);
    texture.set_filter(FilterMode::Nearest);
    draw_texture_ex(
        &texture,
        viewport.x,
        viewport.y,
        WHITE,
        DrawTextureParams {
            dest_size: Some(vec2(fb.width as f32, fb.height as f32)),
            ..Default::default()
        },
    );
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    info!("Cylinder Viewer v{}", VERSION);

    let config = resolve_config();
    info!(
        "Initial cylinder r={} h={} n={}, mode {}",
        config.radius,
        config.height,
        config.subdivisions,
        config.display_mode.label()
    );

    let mut viewer = Viewer::new(&config, color_rng(&config));
    let mut fb = Framebuffer::new(1, 1);
    let mut ui_ctx = UiContext::new();

    loop {
        ui_ctx.begin_frame(MouseState::poll());

        let screen = Rect::screen(screen_width(), screen_height());
        let (viewport, panel) = screen.split_right_px(PANEL_WIDTH);

        if let Some((dx, dy)) = ui_ctx.drag_region(VIEWPORT_ID, &viewport) {
            if dx != 0.0 || dy != 0.0 {
                viewer.orbit(dx, dy);
            }
        }
        if ui_ctx.mouse.scroll != 0.0 && ui_ctx.mouse.inside(&viewport) {
            viewer.zoom(ui_ctx.mouse.scroll);
        }

        clear_background(BLACK);

        let fb_w = (viewport.w as usize).clamp(1, u16::MAX as usize);
        let fb_h = (viewport.h as usize).clamp(1, u16::MAX as usize);
        fb.resize(fb_w, fb_h);
        viewer.render(&mut fb);
        blit(&fb, viewport);

        let state = PanelState {
            radius: viewer.radius(),
            height: viewer.height(),
            subdivisions: viewer.subdivisions(),
            radius_range: config.radius_range,
            height_range: config.height_range,
            subdivision_range: config.subdivision_range,
            display_mode: viewer.display_mode(),
            has_texture: viewer.texture().is_some(),
        };
        if let Some(action) = draw_control_panel(&mut ui_ctx, panel, &state) {
            apply_action(&mut viewer, &config, action);
        }

        next_frame().await;
    }
}
