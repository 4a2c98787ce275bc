//! Unbounded orbit rotation from pointer drags and arrow keys.
//!
//! Yaw and pitch are plain accumulators, never clamped or wrapped, so
//! repeated drags in one direction keep rotating instead of sticking at
//! a pole. The camera position is rebuilt every query by composing a yaw
//! quaternion with a pitch quaternion and applying the result to a point at
//! the current distance on the forward axis; spherical-angle clamping and
//! its gimbal flip never enter the picture. Zoom is the one clamped axis.

use glam::{Quat, Vec2, Vec3};
use lapidary_interact::ArrowDirection;

/// Radians of rotation per pixel of drag.
pub const DRAG_SENSITIVITY: f32 = 0.01;

/// Radians per arrow-key press.
pub const KEY_STEP: f32 = 0.15;

/// Closest the camera may come to the gem.
pub const MIN_DISTANCE: f32 = 6.0;

/// Farthest the camera may pull back.
pub const MAX_DISTANCE: f32 = 16.0;

const DEFAULT_DISTANCE: f32 = 8.0;

#[derive(Debug, Clone, Copy)]
struct DragState {
    /// Last sampled pointer position.
    last: Vec2,
    /// Camera distance captured at press time; zoom applies after release.
    distance: f32,
}

/// Accumulates rotation input and produces the camera position.
#[derive(Debug, Clone)]
pub struct OrbitController {
    yaw: f32,
    pitch: f32,
    distance: f32,
    drag: Option<DragState>,
    /// Drag sensitivity in rad/px.
    pub sensitivity: f32,
    /// Arrow-key step in radians.
    pub key_step: f32,
}

impl Default for OrbitController {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance: DEFAULT_DISTANCE,
            drag: None,
            sensitivity: DRAG_SENSITIVITY,
            key_step: KEY_STEP,
        }
    }
}

impl OrbitController {
    /// Create at the default distance, looking down the forward axis.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulated yaw in radians (unbounded).
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Accumulated pitch in radians (unbounded).
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Current camera distance from the target.
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Pointer pressed: capture the anchor position and current distance.
    pub fn begin_drag(&mut self, x: f32, y: f32) {
        self.drag = Some(DragState {
            last: Vec2::new(x, y),
            distance: self.distance,
        });
    }

    /// Pointer moved while pressed: accumulate rotation from the delta
    /// since the last sampled position. No-op when not dragging.
    pub fn drag_to(&mut self, x: f32, y: f32) {
        let Some(drag) = &mut self.drag else {
            return;
        };
        let position = Vec2::new(x, y);
        let delta = position - drag.last;
        drag.last = position;

        self.yaw -= delta.x * self.sensitivity;
        self.pitch -= delta.y * self.sensitivity;
    }

    /// Pointer released.
    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Discrete arrow-key step, sharing the drag accumulators so both
    /// input paths interleave without desynchronizing.
    pub fn arrow(&mut self, direction: ArrowDirection) {
        match direction {
            ArrowDirection::Up => self.pitch -= self.key_step,
            ArrowDirection::Down => self.pitch += self.key_step,
            ArrowDirection::Left => self.yaw -= self.key_step,
            ArrowDirection::Right => self.yaw += self.key_step,
        }
    }

    /// Wheel zoom. Distance is clamped; rotation never is.
    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance - delta).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// The combined rotation, yaw composed over pitch.
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw) * Quat::from_rotation_x(self.pitch)
    }

    /// Camera position: the rotation applied to a point at the active
    /// distance on the initial forward axis. The camera re-aims at the
    /// origin from here.
    pub fn eye(&self) -> Vec3 {
        let distance = match &self.drag {
            Some(drag) => drag.distance,
            None => self.distance,
        };
        self.rotation() * Vec3::new(0.0, 0.0, distance)
    }

    /// Camera up vector, rotated with the same quaternion as the eye so
    /// orientation stays continuous through the poles (a fixed world-up
    /// would flip roll there).
    pub fn up(&self) -> Vec3 {
        self.rotation() * Vec3::Y
    }

    /// Back to the mount pose.
    pub fn reset(&mut self) {
        *self = Self {
            sensitivity: self.sensitivity,
            key_step: self.key_step,
            ..Self::default()
        };
    }
}
