//! Winit input binding and projection for the orbit view.
//!
//! The widget owns the one and only rotation state; this adapter just
//! translates raw window events into [`WidgetEvent`]s and turns the
//! widget's per-frame eye/up pair into view and projection matrices.

use glam::{Mat4, Vec3};
use lapidary_interact::{ArrowDirection, WidgetEvent};
use winit::event::{ElementState, MouseButton, MouseScrollDelta};
use winit::keyboard::KeyCode;

/// Pixels of wheel scroll equivalent to one line.
const PIXELS_PER_LINE: f32 = 100.0;

/// Input adapter + projection parameters.
pub struct OrbitCamera {
    /// Field of view in radians
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,

    cursor: (f32, f32),
    dragging: bool,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            fov: 50f32.to_radians(),
            near: 0.1,
            far: 100.0,
            cursor: (0.0, 0.0),
            dragging: false,
        }
    }
}

impl OrbitCamera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last known cursor position.
    pub fn cursor(&self) -> (f32, f32) {
        self.cursor
    }

    /// Whether the left button is held.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Cursor moved: emits a drag sample while the button is held.
    pub fn on_cursor_moved(&mut self, x: f64, y: f64) -> Option<WidgetEvent> {
        self.cursor = (x as f32, y as f32);
        self.dragging.then_some(WidgetEvent::DragMoved {
            x: self.cursor.0,
            y: self.cursor.1,
        })
    }

    /// Left-button press/release toggles the drag.
    pub fn on_mouse_button(
        &mut self,
        button: MouseButton,
        state: ElementState,
    ) -> Option<WidgetEvent> {
        if button != MouseButton::Left {
            return None;
        }
        match state {
            ElementState::Pressed => {
                self.dragging = true;
                Some(WidgetEvent::DragStarted {
                    x: self.cursor.0,
                    y: self.cursor.1,
                })
            }
            ElementState::Released => {
                self.dragging = false;
                Some(WidgetEvent::DragEnded)
            }
        }
    }

    /// Wheel scroll in either delta flavor.
    pub fn on_scroll(&mut self, delta: MouseScrollDelta) -> WidgetEvent {
        let lines = match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_LINE,
        };
        WidgetEvent::Scrolled { delta: lines }
    }

    /// Arrow keys become discrete rotation steps.
    pub fn on_key(&mut self, key: KeyCode) -> Option<WidgetEvent> {
        let direction = match key {
            KeyCode::ArrowUp => ArrowDirection::Up,
            KeyCode::ArrowDown => ArrowDirection::Down,
            KeyCode::ArrowLeft => ArrowDirection::Left,
            KeyCode::ArrowRight => ArrowDirection::Right,
            _ => return None,
        };
        Some(WidgetEvent::ArrowPressed { direction })
    }

    /// View matrix for the widget's current eye/up pair, aimed at the
    /// origin.
    pub fn view_matrix(eye: Vec3, up: Vec3) -> Mat4 {
        Mat4::look_at_rh(eye, Vec3::ZERO, up)
    }

    /// Projection matrix for the given aspect ratio.
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov, aspect, self.near, self.far)
    }

    /// Combined view-projection matrix.
    pub fn view_projection_matrix(&self, eye: Vec3, up: Vec3, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * Self::view_matrix(eye, up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_drag_release_sequence() {
        let mut cam = OrbitCamera::new();
        cam.on_cursor_moved(10.0, 20.0);

        assert_eq!(
            cam.on_mouse_button(MouseButton::Left, ElementState::Pressed),
            Some(WidgetEvent::DragStarted { x: 10.0, y: 20.0 })
        );
        assert_eq!(
            cam.on_cursor_moved(15.0, 20.0),
            Some(WidgetEvent::DragMoved { x: 15.0, y: 20.0 })
        );
        assert_eq!(
            cam.on_mouse_button(MouseButton::Left, ElementState::Released),
            Some(WidgetEvent::DragEnded)
        );
        // No drag samples once released
        assert_eq!(cam.on_cursor_moved(30.0, 20.0), None);
    }

    #[test]
    fn other_buttons_are_ignored() {
        let mut cam = OrbitCamera::new();
        assert_eq!(
            cam.on_mouse_button(MouseButton::Right, ElementState::Pressed),
            None
        );
        assert!(!cam.is_dragging());
    }

    #[test]
    fn scroll_flavors_normalize() {
        let mut cam = OrbitCamera::new();
        assert_eq!(
            cam.on_scroll(MouseScrollDelta::LineDelta(0.0, 2.0)),
            WidgetEvent::Scrolled { delta: 2.0 }
        );
        let pixels = winit::dpi::PhysicalPosition::new(0.0, 150.0);
        assert_eq!(
            cam.on_scroll(MouseScrollDelta::PixelDelta(pixels)),
            WidgetEvent::Scrolled { delta: 1.5 }
        );
    }

    #[test]
    fn arrows_map_and_others_do_not() {
        let mut cam = OrbitCamera::new();
        assert_eq!(
            cam.on_key(KeyCode::ArrowLeft),
            Some(WidgetEvent::ArrowPressed {
                direction: ArrowDirection::Left
            })
        );
        assert_eq!(cam.on_key(KeyCode::KeyW), None);
    }

    #[test]
    fn view_matrix_is_valid() {
        let view = OrbitCamera::view_matrix(Vec3::new(0.0, 0.0, 8.0), Vec3::Y);
        assert!(view.determinant().abs() > 0.0001);
    }

    #[test]
    fn projection_matrix_is_valid() {
        let cam = OrbitCamera::new();
        let proj = cam.projection_matrix(16.0 / 9.0);
        assert!(proj.determinant().abs() > 0.0001);
    }
}
