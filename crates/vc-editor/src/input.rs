//! Input abstraction layer.
//!
//! Pointer events arrive in surface-local logical coordinates; hosts
//! translate client coordinates with [`Position::from_client`] first.

use crate::error::CaptureError;
use vc_core::Position;

/// Keyboard modifier state at the time of an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// A normalized input event from any pointing device or keyboard.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed (mouse down, touch start, pen contact).
    PointerDown {
        x: f32,
        y: f32,
        pointer_id: i32,
        /// Pressure from 0.0 (none) to 1.0 (max). Mouse is always 1.0.
        pressure: f32,
    },

    PointerMove {
        x: f32,
        y: f32,
        pointer_id: i32,
        pressure: f32,
    },

    PointerUp { x: f32, y: f32, pointer_id: i32 },

    /// Keyboard shortcut.
    Key { key: String, modifiers: Modifiers },
}

impl InputEvent {
    pub fn pointer_down(x: f32, y: f32, pointer_id: i32) -> Self {
        Self::PointerDown {
            x,
            y,
            pointer_id,
            pressure: 1.0,
        }
    }

    pub fn pointer_move(x: f32, y: f32, pointer_id: i32) -> Self {
        Self::PointerMove {
            x,
            y,
            pointer_id,
            pressure: 1.0,
        }
    }

    pub fn pointer_up(x: f32, y: f32, pointer_id: i32) -> Self {
        Self::PointerUp { x, y, pointer_id }
    }

    /// Extract position if this is a pointer event.
    pub fn position(&self) -> Option<Position> {
        match self {
            Self::PointerDown { x, y, .. } | Self::PointerMove { x, y, .. } | Self::PointerUp { x, y, .. } => {
                Some(Position::new(*x, *y))
            }
            Self::Key { .. } => None,
        }
    }

    pub fn pointer_id(&self) -> Option<i32> {
        match self {
            Self::PointerDown { pointer_id, .. }
            | Self::PointerMove { pointer_id, .. }
            | Self::PointerUp { pointer_id, .. } => Some(*pointer_id),
            Self::Key { .. } => None,
        }
    }
}

/// Routes a pointer's subsequent events to the surface while a gesture is
/// active. Capture is best-effort: callers log failures and carry on.
pub trait PointerCapture {
    fn capture(&mut self, pointer_id: i32) -> Result<(), CaptureError>;
    fn release(&mut self, pointer_id: i32) -> Result<(), CaptureError>;
}

/// Capture for hosts without a pointer-capture concept.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCapture;

impl PointerCapture for NoCapture {
    fn capture(&mut self, _pointer_id: i32) -> Result<(), CaptureError> {
        Ok(())
    }

    fn release(&mut self, _pointer_id: i32) -> Result<(), CaptureError> {
        Ok(())
    }
}
