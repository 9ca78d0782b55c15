//! UI Theme - Shared colors and styling constants

use macroquad::prelude::Color;

// =============================================================================
// Base UI Colors
// =============================================================================

/// Panel background
pub const BG_COLOR: Color = Color::new(0.11, 0.11, 0.13, 1.0);

/// Section header background
pub const HEADER_COLOR: Color = Color::new(0.15, 0.15, 0.18, 1.0);

/// Primary text color
pub const TEXT_COLOR: Color = Color::new(0.8, 0.8, 0.85, 1.0);

/// Dimmed/secondary text
pub const TEXT_DIM: Color = Color::new(0.4, 0.4, 0.45, 1.0);

/// Active button background (cyan)
pub const ACCENT_COLOR: Color = Color::new(0.0, 0.75, 0.9, 1.0);

/// Button background
pub const BUTTON_BG: Color = Color::new(0.196, 0.196, 0.216, 1.0); // ~50, 50, 55

/// Button background while hovered
pub const BUTTON_HOVER: Color = Color::new(0.235, 0.235, 0.275, 1.0); // ~60, 60, 70

/// Button background while pressed
pub const BUTTON_PRESSED: Color = Color::new(0.235, 0.314, 0.392, 1.0); // ~60, 80, 100

/// Separator line between panel and viewport
pub const BORDER_COLOR: Color = Color::new(0.314, 0.314, 0.314, 1.0); // ~80, 80, 80

// =============================================================================
// Font Sizes
// =============================================================================

/// Header/title text size
pub const FONT_SIZE_HEADER: f32 = 14.0;

/// Standard content text size
pub const FONT_SIZE_CONTENT: f32 = 12.0;
