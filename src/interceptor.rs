/*
 * Contract between the registry and the per-window interception strategies.
 * One interceptor instance exists per registered window; the registry owns it
 * for exactly the lifetime of the window's record.
 *
 * Native variants (Win32 subclass, macOS proxy) do their work inside the OS
 * message/notification stream and ignore toolkit-level input events; the
 * portable variant consumes the toolkit events the adapter forwards through
 * `WindowRegistry::dispatch_event`.
 */

use crate::error::Result as PlatformResult;
use crate::types::Point;

/// Toolkit-level input event, client-space physical pixels. Fed by the host
/// adapter to the portable interceptor variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    MouseMove { pos: Point },
    MousePress { button: MouseButton, pos: Point },
    MouseRelease { button: MouseButton, pos: Point },
    MouseDoubleClick { button: MouseButton, pos: Point },
}

impl InputEvent {
    pub fn pos(&self) -> Point {
        match *self {
            InputEvent::MouseMove { pos }
            | InputEvent::MousePress { pos, .. }
            | InputEvent::MouseRelease { pos, .. }
            | InputEvent::MouseDoubleClick { pos, .. } => pos,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Other,
}

pub trait Interceptor: Send {
    /// Begins intercepting for the window. Idempotent: attaching an already
    /// attached interceptor is a no-op returning `Ok`.
    fn attach(&mut self) -> PlatformResult<()>;

    /// Stops intercepting and restores whatever native state attach changed.
    /// Must be safe during window teardown and safe to call twice.
    fn detach(&mut self);

    /// Offers a toolkit input event to the interceptor. `true` means the
    /// event was consumed and the host should not process it further. Native
    /// variants keep the default pass-through.
    fn handle_event(&mut self, event: &InputEvent) -> bool {
        let _ = event;
        false
    }
}
