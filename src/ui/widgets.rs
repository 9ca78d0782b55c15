//! Basic UI widgets

use macroquad::prelude::*;

use super::theme::*;
use super::{Rect, UiContext};
use crate::config::ParamRange;

/// Draw a text button, returns true if clicked. `is_active` paints the
/// accent background (used for the selected display mode).
pub fn text_button(ctx: &mut UiContext, rect: Rect, label: &str, is_active: bool) -> bool {
    let id = ctx.next_id();
    let hovered = ctx.mouse.inside(&rect);
    let pressed = ctx.mouse.clicking(&rect);
    let clicked = ctx.mouse.clicked(&rect);

    if hovered {
        ctx.set_hot(id);
    }

    let bg = if is_active {
        ACCENT_COLOR
    } else if pressed {
        BUTTON_PRESSED
    } else if ctx.is_hot(id) {
        BUTTON_HOVER
    } else {
        BUTTON_BG
    };
    draw_rounded_rect(rect.x, rect.y, rect.w, rect.h, 3.0, bg);

    let text_color = if is_active { WHITE } else { TEXT_COLOR };
    draw_text_centered(label, &rect, FONT_SIZE_CONTENT, text_color);

    clicked
}

/// Draw a labeled integer spin control: `label  [-] value [+]`.
/// Returns the new value when a button changes it.
pub fn spin_box(ctx: &mut UiContext, rect: Rect, label: &str, value: i32, range: ParamRange) -> Option<i32> {
    let (label_rect, controls) = rect.split_h_px(rect.w * 0.4);
    let button_w = rect.h;
    let (minus_rect, rest) = controls.split_h_px(button_w);
    let (value_rect, plus_rect) = rest.split_right_px(button_w);

    let text_y = (label_rect.center_y() + FONT_SIZE_CONTENT * 0.35).round();
    draw_text(label, label_rect.x.round(), text_y, FONT_SIZE_CONTENT + 2.0, TEXT_COLOR);

    let mut result = None;
    if text_button(ctx, minus_rect, "-", false) {
        result = step_value(value, -1, range);
    }
    draw_text_centered(&value.to_string(), &value_rect, FONT_SIZE_CONTENT + 2.0, WHITE);
    if text_button(ctx, plus_rect, "+", false) {
        result = step_value(value, 1, range);
    }
    result
}

/// Step `value` by `delta` inside `range`. None when the result would not
/// change the value.
pub fn step_value(value: i32, delta: i32, range: ParamRange) -> Option<i32> {
    let next = range.clamp(value.saturating_add(delta));
    if next != value {
        Some(next)
    } else {
        None
    }
}

/// Draw text centered in a rect, rounded to integer pixels for crisp rendering
fn draw_text_centered(text: &str, rect: &Rect, font_size: f32, color: Color) {
    let dims = measure_text(text, None, font_size as u16, 1.0);
    let x = (rect.x + (rect.w - dims.width) * 0.5).round();
    let y = (rect.y + (rect.h + dims.height) * 0.5).round();
    draw_text(text, x, y, font_size, color);
}

/// Draw a rounded rectangle (simple approximation using overlapping rects)
fn draw_rounded_rect(x: f32, y: f32, w: f32, h: f32, r: f32, color: Color) {
    // Main body
    draw_rectangle(x + r, y, w - r * 2.0, h, color);
    draw_rectangle(x, y + r, w, h - r * 2.0, color);
    // Corners (circles)
    draw_circle(x + r, y + r, r, color);
    draw_circle(x + w - r, y + r, r, color);
    draw_circle(x + r, y + h - r, r, color);
    draw_circle(x + w - r, y + h - r, r, color);
}
