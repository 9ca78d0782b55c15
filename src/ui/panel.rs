//! Control panel on the right side of the window
//!
//! Sections top to bottom: shape parameters, texture, display mode.

use macroquad::prelude::*;

use super::theme::*;
use super::{spin_box, text_button, Rect, UiContext};
use crate::config::ParamRange;
use crate::rasterizer::DisplayMode;

/// Fixed panel width in pixels
pub const PANEL_WIDTH: f32 = 220.0;

const PADDING: f32 = 8.0;
const ROW_HEIGHT: f32 = 24.0;
const ROW_SPACING: f32 = 6.0;
const HEADER_HEIGHT: f32 = 20.0;

/// What the user asked for this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelAction {
    SetRadius(i32),
    SetHeight(i32),
    SetSubdivisions(i32),
    LoadTexture,
    SetDisplayMode(DisplayMode),
}

/// Values shown by the panel
#[derive(Debug, Clone, Copy)]
pub struct PanelState {
    pub radius: i32,
    pub height: i32,
    pub subdivisions: i32,
    pub radius_range: ParamRange,
    pub height_range: ParamRange,
    pub subdivision_range: ParamRange,
    pub display_mode: DisplayMode,
    pub has_texture: bool,
}

/// Row rects for every control
#[derive(Debug, Clone, Copy)]
pub struct PanelLayout {
    pub shape_header: Rect,
    pub radius: Rect,
    pub height: Rect,
    pub subdivisions: Rect,
    pub texture_header: Rect,
    pub load_texture: Rect,
    pub texture_status: Rect,
    pub mode_header: Rect,
    pub modes: [Rect; 3],
}

impl PanelLayout {
    pub fn new(bounds: Rect) -> Self {
        let mut rest = bounds.pad(PADDING);
        let mut take = |h: f32| {
            let row = rest.slice_top(h);
            rest = rest.remaining_after_top(h + ROW_SPACING);
            row
        };

        let shape_header = take(HEADER_HEIGHT);
        let radius = take(ROW_HEIGHT);
        let height = take(ROW_HEIGHT);
        let subdivisions = take(ROW_HEIGHT);
        let texture_header = take(HEADER_HEIGHT);
        let load_texture = take(ROW_HEIGHT);
        let texture_status = take(ROW_HEIGHT);
        let mode_header = take(HEADER_HEIGHT);
        let modes = [take(ROW_HEIGHT), take(ROW_HEIGHT), take(ROW_HEIGHT)];

        Self {
            shape_header,
            radius,
            height,
            subdivisions,
            texture_header,
            load_texture,
            texture_status,
            mode_header,
            modes,
        }
    }
}

/// Draw the panel and collect at most one action
pub fn draw_control_panel(ctx: &mut UiContext, bounds: Rect, state: &PanelState) -> Option<PanelAction> {
    draw_rectangle(bounds.x, bounds.y, bounds.w, bounds.h, BG_COLOR);
    draw_line(bounds.x, bounds.y, bounds.x, bounds.bottom(), 1.0, BORDER_COLOR);

    let layout = PanelLayout::new(bounds);
    let mut action = None;

    draw_section_header(layout.shape_header, "Cylinder");
    if let Some(v) = spin_box(ctx, layout.radius, "Radius", state.radius, state.radius_range) {
        action = Some(PanelAction::SetRadius(v));
    }
    if let Some(v) = spin_box(ctx, layout.height, "Height", state.height, state.height_range) {
        action = Some(PanelAction::SetHeight(v));
    }
    if let Some(v) = spin_box(ctx, layout.subdivisions, "Subdivs", state.subdivisions, state.subdivision_range) {
        action = Some(PanelAction::SetSubdivisions(v));
    }

    draw_section_header(layout.texture_header, "Texture");
    if text_button(ctx, layout.load_texture, "Load Texture", false) {
        action = Some(PanelAction::LoadTexture);
    }
    let (status, color) = if state.has_texture {
        ("texture loaded", TEXT_COLOR)
    } else {
        ("no texture", TEXT_DIM)
    };
    let text_y = (layout.texture_status.center_y() + FONT_SIZE_CONTENT * 0.35).round();
    draw_text(status, layout.texture_status.x.round(), text_y, FONT_SIZE_CONTENT + 2.0, color);

    draw_section_header(layout.mode_header, "Display");
    for (mode, rect) in DisplayMode::ALL.iter().zip(layout.modes) {
        if text_button(ctx, rect, mode.label(), *mode == state.display_mode) {
            action = Some(PanelAction::SetDisplayMode(*mode));
        }
    }

    action
}

fn draw_section_header(rect: Rect, title: &str) {
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, HEADER_COLOR);
    let text_y = (rect.center_y() + FONT_SIZE_HEADER * 0.35).round();
    draw_text(title, (rect.x + 4.0).round(), text_y, FONT_SIZE_HEADER + 2.0, TEXT_COLOR);
}
