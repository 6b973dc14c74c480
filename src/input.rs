//! Pointer input as the controller sees it.
//!
//! Window systems report button presses without a position, so the position
//! of the last cursor movement is attached when a winit event is translated.

use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, WindowEvent};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Pressed { button: MouseButton, position: PhysicalPosition<f64> },
    Released { button: MouseButton, position: PhysicalPosition<f64> },
    Moved { position: PhysicalPosition<f64> },
}

impl PointerEvent {
    pub fn pressed(button: MouseButton, x: f64, y: f64) -> Self {
        Self::Pressed { button, position: PhysicalPosition::new(x, y) }
    }

    pub fn released(button: MouseButton, x: f64, y: f64) -> Self {
        Self::Released { button, position: PhysicalPosition::new(x, y) }
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self::Moved { position: PhysicalPosition::new(x, y) }
    }

    pub fn position(&self) -> PhysicalPosition<f64> {
        match self {
            Self::Pressed { position, .. } | Self::Released { position, .. } | Self::Moved { position } => *position,
        }
    }

    /// Translate a window event, using `cursor` as the position of button
    /// events. Returns `None` for events that are not pointer input.
    pub fn from_window_event(event: &WindowEvent, cursor: PhysicalPosition<f64>) -> Option<Self> {
        match event {
            WindowEvent::CursorMoved { position, .. } => Some(Self::Moved { position: *position }),
            WindowEvent::MouseInput { state: ElementState::Pressed, button, .. } => {
                Some(Self::Pressed { button: *button, position: cursor })
            }
            WindowEvent::MouseInput { state: ElementState::Released, button, .. } => {
                Some(Self::Released { button: *button, position: cursor })
            }
            _ => None,
        }
    }
}
