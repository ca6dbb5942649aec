/*
 * The capability table: the fixed set of accessors a host toolkit supplies
 * for one window. The core never talks to a toolkit directly; everything it
 * needs to know or do to a window goes through this trait, so one adapter
 * implementation per toolkit is the entire integration surface.
 *
 * Implementations must validate window liveness themselves: every method may
 * be called while the native window is being torn down and must degrade to a
 * harmless default instead of touching a dead handle.
 */

use crate::types::{
    CursorShape, Point, Rect, ResizeEdges, SystemButton, WindowId, WindowState,
};

pub trait WindowParams: Send + Sync {
    /// Native handle value for this window. A null id makes the whole table
    /// invalid and registration will refuse it.
    fn window_id(&self) -> WindowId;

    /// Window frame geometry in screen coordinates, physical pixels.
    fn geometry(&self) -> Rect;

    fn set_geometry(&self, rect: Rect);

    fn window_state(&self) -> WindowState;

    /// Requests a state change (maximize toggle on caption double-click).
    /// Hosts that disallow the transition may ignore it.
    fn set_window_state(&self, state: WindowState);

    /// Whether the host currently forbids user resizing. Checked per event,
    /// not cached, because hosts flip this at runtime.
    fn is_fixed_size(&self) -> bool;

    fn set_fixed_size(&self, fixed: bool);

    /// Effective device-pixel-ratio of the screen the window is on.
    fn device_pixel_ratio(&self) -> f64;

    fn set_cursor(&self, shape: CursorShape);

    /// Restores the host's own cursor handling after a resize-band hover.
    fn unset_cursor(&self);

    /// Client-space to screen-space.
    fn map_to_global(&self, pos: Point) -> Point;

    /// Screen-space to client-space.
    fn map_from_global(&self, pos: Point) -> Point;

    /// Which caption button (if any) covers this client-space point. Button
    /// rectangles win over the draggable caption strip so a drag can never
    /// start on top of a button.
    fn hit_test_system_button(&self, pos: Point) -> Option<SystemButton>;

    /// Host veto for mouse handling at this client-space point (e.g. a popup
    /// is open, or the point belongs to embedded native content).
    fn should_ignore_mouse_event(&self, pos: Point) -> bool;

    /// Hands the in-progress drag to the OS move loop so snap previews and
    /// cross-monitor dragging keep working.
    fn start_system_move(&self);

    /// Hands off to the OS resize loop. Must be a no-op for an empty edge
    /// set.
    fn start_system_resize(&self, edges: ResizeEdges);
}
