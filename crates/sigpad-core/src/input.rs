//! Pointer input routing for mouse and touch devices.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Which family of events the widget listens to.
///
/// The two are exclusive: a touch-capable device ignores mouse events and
/// vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InputDevice {
    #[default]
    Mouse,
    Touch,
}

impl InputDevice {
    /// Pick the device family from host capabilities.
    pub fn detect(touch_capable: bool) -> Self {
        if touch_capable {
            InputDevice::Touch
        } else {
            InputDevice::Mouse
        }
    }
}

/// Raw host event delivered to the widget.
///
/// Mouse positions are relative to the surface. Touch positions are page
/// coordinates, with the surface's page offset supplied alongside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    MouseDown { position: Point },
    MouseMove { position: Point },
    MouseUp { position: Point },
    /// Pointer left the surface.
    MouseOut,
    TouchStart { touches: Vec<Point>, offset: Vec2 },
    TouchMove { touches: Vec<Point>, offset: Vec2 },
    TouchEnd,
}

/// Device-independent stroke step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Begin(Point),
    Extend(Point),
    End,
}

/// Maps raw host events for one device family onto gestures.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputRouter {
    device: InputDevice,
}

impl InputRouter {
    pub fn new(device: InputDevice) -> Self {
        Self { device }
    }

    pub fn device(&self) -> InputDevice {
        self.device
    }

    /// Translate an event. Events for the other device family, and touch
    /// events without any touch point, yield `None`.
    pub fn route(&self, event: &PointerEvent) -> Option<Gesture> {
        match (self.device, event) {
            (InputDevice::Mouse, PointerEvent::MouseDown { position }) => {
                Some(Gesture::Begin(*position))
            }
            (InputDevice::Mouse, PointerEvent::MouseMove { position }) => {
                Some(Gesture::Extend(*position))
            }
            (InputDevice::Mouse, PointerEvent::MouseUp { .. } | PointerEvent::MouseOut) => {
                Some(Gesture::End)
            }
            (InputDevice::Touch, PointerEvent::TouchStart { touches, offset }) => {
                first_touch(touches, *offset).map(Gesture::Begin)
            }
            (InputDevice::Touch, PointerEvent::TouchMove { touches, offset }) => {
                first_touch(touches, *offset).map(Gesture::Extend)
            }
            (InputDevice::Touch, PointerEvent::TouchEnd) => Some(Gesture::End),
            _ => {
                log::trace!("Ignoring {:?} on {:?} input", event, self.device);
                None
            }
        }
    }
}

/// Position of the first touch relative to the surface.
fn first_touch(touches: &[Point], offset: Vec2) -> Option<Point> {
    touches.first().map(|page| *page - offset)
}
