//! Input state for UI interaction

use macroquad::prelude::{is_mouse_button_down, is_mouse_button_pressed, mouse_position, mouse_wheel, MouseButton};

use super::Rect;

/// Mouse button state
#[derive(Debug, Clone, Copy, Default)]
pub struct MouseState {
    pub x: f32,
    pub y: f32,
    pub left_down: bool,
    pub left_pressed: bool, // Just pressed this frame
    pub scroll: f32,        // Wheel steps, one notch = +/-1
}

impl MouseState {
    /// Sample the current macroquad input state
    pub fn poll() -> Self {
        let (x, y) = mouse_position();
        let (_, wheel_y) = mouse_wheel();
        Self {
            x,
            y,
            left_down: is_mouse_button_down(MouseButton::Left),
            left_pressed: is_mouse_button_pressed(MouseButton::Left),
            scroll: wheel_step(wheel_y),
        }
    }

    /// Check if mouse is inside a rect
    pub fn inside(&self, rect: &Rect) -> bool {
        rect.contains(self.x, self.y)
    }

    /// Check if mouse is clicking inside a rect
    pub fn clicking(&self, rect: &Rect) -> bool {
        self.left_down && rect.contains(self.x, self.y)
    }

    /// Check if mouse just clicked inside a rect
    pub fn clicked(&self, rect: &Rect) -> bool {
        self.left_pressed && rect.contains(self.x, self.y)
    }
}

/// Normalize a raw wheel reading to one step per notch. Backends disagree on
/// the magnitude (lines vs pixels), only the sign is kept.
pub fn wheel_step(raw: f32) -> f32 {
    if raw > 0.0 {
        1.0
    } else if raw < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// UI context passed through the frame
pub struct UiContext {
    pub mouse: MouseState,
    /// Pointer movement since the previous frame
    pub delta: (f32, f32),
    /// ID of the widget currently being dragged (if any)
    pub dragging: Option<u64>,
    /// ID of the widget that is "hot" (mouse hovering)
    pub hot: Option<u64>,
    /// Counter for generating unique IDs
    id_counter: u64,
    last_position: Option<(f32, f32)>,
}

impl UiContext {
    pub fn new() -> Self {
        Self {
            mouse: MouseState::default(),
            delta: (0.0, 0.0),
            dragging: None,
            hot: None,
            id_counter: 0,
            last_position: None,
        }
    }

    /// Generate a unique ID for a widget
    pub fn next_id(&mut self) -> u64 {
        self.id_counter += 1;
        self.id_counter
    }

    /// Reset at start of frame (call before UI code)
    pub fn begin_frame(&mut self, mouse: MouseState) {
        self.delta = match self.last_position {
            Some((lx, ly)) => (mouse.x - lx, mouse.y - ly),
            None => (0.0, 0.0),
        };
        self.last_position = Some((mouse.x, mouse.y));
        self.mouse = mouse;
        self.hot = None;
        self.id_counter = 0;

        // Clear dragging if mouse released
        if !self.mouse.left_down {
            self.dragging = None;
        }
    }

    /// Check if this widget is being dragged
    pub fn is_dragging(&self, id: u64) -> bool {
        self.dragging == Some(id)
    }

    /// Start dragging a widget
    pub fn start_drag(&mut self, id: u64) {
        self.dragging = Some(id);
    }

    /// Set hot widget (hovering)
    pub fn set_hot(&mut self, id: u64) {
        // Only set hot if not dragging something else
        if self.dragging.is_none() || self.dragging == Some(id) {
            self.hot = Some(id);
        }
    }

    /// Check if widget is hot
    pub fn is_hot(&self, id: u64) -> bool {
        self.hot == Some(id)
    }

    /// Drag tracking for a region that owns the pointer while the left
    /// button is held. Returns the per-frame delta while `id` is dragged.
    pub fn drag_region(&mut self, id: u64, rect: &Rect) -> Option<(f32, f32)> {
        if self.dragging.is_none() && self.mouse.clicked(rect) {
            self.start_drag(id);
            // The press frame has no movement yet
            return None;
        }
        if self.is_dragging(id) {
            Some(self.delta)
        } else {
            None
        }
    }
}

impl Default for UiContext {
    fn default() -> Self {
        Self::new()
    }
}
