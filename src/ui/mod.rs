//! Immediate-mode UI for the viewer window
//!
//! Design principles:
//! - Immediate mode (no retained state, rebuilt each frame)
//! - Simple rectangle-based layout
//! - Macroquad integration for rendering

mod input;
mod panel;
mod rect;
pub mod theme;
mod widgets;

pub use input::*;
pub use panel::*;
pub use rect::*;
pub use widgets::*;
