/*
 * Portable interception strategy: a pure input-event filter driven entirely
 * through the capability table, used when the cross-platform implementation
 * is forced by config or when no native variant exists for the OS.
 *
 * The host adapter forwards its toolkit's mouse events through
 * `WindowRegistry::dispatch_event`; this filter classifies each point and
 * hands drags and resizes to the OS loop via `start_system_move` /
 * `start_system_resize`. It never touches a native handle itself, which is
 * what keeps it portable.
 */

use std::sync::Arc;

use crate::error::Result as PlatformResult;
use crate::hit_test::{HitTestContext, classify_point};
use crate::interceptor::{InputEvent, Interceptor, MouseButton};
use crate::params::WindowParams;
use crate::types::{
    CursorShape, FrameMetrics, HitTestResult, Point, WindowOptions, WindowSettings, WindowState,
};

pub(crate) struct GenericInterceptor {
    settings: WindowSettings,
    params: Arc<dyn WindowParams>,
    attached: bool,
    /// Set while we own the cursor shape, so we only unset what we set.
    cursor_overridden: bool,
}

impl GenericInterceptor {
    pub(crate) fn new(settings: WindowSettings, params: Arc<dyn WindowParams>) -> Self {
        Self {
            settings,
            params,
            attached: false,
            cursor_overridden: false,
        }
    }

    /// Metrics for the current event: logical defaults (plus the caller's
    /// title-bar override) scaled by the window's device pixel ratio.
    fn current_metrics(&self) -> FrameMetrics {
        let dpr = self.params.device_pixel_ratio();
        let mut metrics = FrameMetrics::scaled_defaults(dpr);
        if let Some(height) = self.settings.title_bar_height {
            metrics.title_bar_height = ((height as f64) * dpr).round() as i32;
        }
        metrics
    }

    fn classify(&self, pos: Point) -> HitTestResult {
        let ctx = HitTestContext {
            size: self.params.geometry().size(),
            metrics: self.current_metrics(),
            window_state: self.params.window_state(),
            fixed_size: self.params.is_fixed_size(),
            ignore_areas: &self.settings.ignore_areas,
            draggable_areas: &self.settings.draggable_areas,
        };
        let params = &self.params;
        classify_point(&ctx, pos, |p| params.hit_test_system_button(p))
    }

    fn update_cursor(&mut self, hit: HitTestResult) {
        if self.settings.options.contains(WindowOptions::DONT_TOUCH_CURSOR_SHAPE) {
            return;
        }
        match cursor_for_hit(hit) {
            Some(shape) => {
                self.params.set_cursor(shape);
                self.cursor_overridden = true;
            }
            None => {
                if self.cursor_overridden {
                    self.params.unset_cursor();
                    self.cursor_overridden = false;
                }
            }
        }
    }

    fn handle_left_press(&mut self, hit: HitTestResult) -> bool {
        if hit.is_resize_border() {
            // classify() already suppressed resize bands for fixed-size
            // windows, so an empty edge set cannot reach here.
            self.params.start_system_resize(hit.resize_edges());
            return true;
        }
        if hit == HitTestResult::Caption {
            self.params.start_system_move();
            return true;
        }
        false
    }

    fn handle_double_click(&mut self, hit: HitTestResult) -> bool {
        if hit != HitTestResult::Caption || self.params.is_fixed_size() {
            return false;
        }
        let next = match self.params.window_state() {
            WindowState::Maximized => WindowState::Normal,
            WindowState::Normal => WindowState::Maximized,
            // Minimized/fullscreen double-clicks should not reach us; leave
            // the state alone if they somehow do.
            _ => return false,
        };
        self.params.set_window_state(next);
        true
    }
}

impl Interceptor for GenericInterceptor {
    fn attach(&mut self) -> PlatformResult<()> {
        // Nothing native to install; the adapter starts forwarding events
        // once registration succeeds.
        self.attached = true;
        Ok(())
    }

    fn detach(&mut self) {
        if self.cursor_overridden {
            self.params.unset_cursor();
            self.cursor_overridden = false;
        }
        self.attached = false;
    }

    fn handle_event(&mut self, event: &InputEvent) -> bool {
        if !self.attached {
            return false;
        }
        let pos = event.pos();
        if self.params.should_ignore_mouse_event(pos) {
            return false;
        }
        let hit = self.classify(pos);
        match *event {
            InputEvent::MouseMove { .. } => {
                self.update_cursor(hit);
                // Moves are never consumed; the host still needs hover state.
                false
            }
            InputEvent::MousePress {
                button: MouseButton::Left,
                ..
            } => self.handle_left_press(hit),
            InputEvent::MouseDoubleClick {
                button: MouseButton::Left,
                ..
            } => self.handle_double_click(hit),
            _ => false,
        }
    }
}

fn cursor_for_hit(hit: HitTestResult) -> Option<CursorShape> {
    match hit {
        HitTestResult::Left | HitTestResult::Right => Some(CursorShape::SizeHorizontal),
        HitTestResult::Top | HitTestResult::Bottom => Some(CursorShape::SizeVertical),
        HitTestResult::TopLeft | HitTestResult::BottomRight => Some(CursorShape::SizeFdiag),
        HitTestResult::TopRight | HitTestResult::BottomLeft => Some(CursorShape::SizeBdiag),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Rect, ResizeEdges, Size, SystemButton, WindowId};
    use std::sync::Mutex;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Call {
        SetCursor(CursorShape),
        UnsetCursor,
        StartMove,
        StartResize(ResizeEdges),
        SetState(WindowState),
    }

    /// Capability-table fake recording every mutation, 800x600 window at
    /// 1.0 device pixel ratio.
    struct FakeParams {
        state: Mutex<WindowState>,
        fixed_size: Mutex<bool>,
        ignore_all_mouse: bool,
        calls: Mutex<Vec<Call>>,
    }

    impl FakeParams {
        fn new() -> Self {
            Self {
                state: Mutex::new(WindowState::Normal),
                fixed_size: Mutex::new(false),
                ignore_all_mouse: false,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
        }
    }

    impl WindowParams for FakeParams {
        fn window_id(&self) -> WindowId {
            WindowId(0x5EED)
        }
        fn geometry(&self) -> Rect {
            Rect::new(100, 100, 800, 600)
        }
        fn set_geometry(&self, _rect: Rect) {}
        fn window_state(&self) -> WindowState {
            *self.state.lock().unwrap()
        }
        fn set_window_state(&self, state: WindowState) {
            self.record(Call::SetState(state));
            *self.state.lock().unwrap() = state;
        }
        fn is_fixed_size(&self) -> bool {
            *self.fixed_size.lock().unwrap()
        }
        fn set_fixed_size(&self, fixed: bool) {
            *self.fixed_size.lock().unwrap() = fixed;
        }
        fn device_pixel_ratio(&self) -> f64 {
            1.0
        }
        fn set_cursor(&self, shape: CursorShape) {
            self.record(Call::SetCursor(shape));
        }
        fn unset_cursor(&self) {
            self.record(Call::UnsetCursor);
        }
        fn map_to_global(&self, pos: Point) -> Point {
            Point::new(pos.x + 100, pos.y + 100)
        }
        fn map_from_global(&self, pos: Point) -> Point {
            Point::new(pos.x - 100, pos.y - 100)
        }
        fn hit_test_system_button(&self, _pos: Point) -> Option<SystemButton> {
            None
        }
        fn should_ignore_mouse_event(&self, _pos: Point) -> bool {
            self.ignore_all_mouse
        }
        fn start_system_move(&self) {
            self.record(Call::StartMove);
        }
        fn start_system_resize(&self, edges: ResizeEdges) {
            self.record(Call::StartResize(edges));
        }
    }

    fn attached_filter(
        settings: WindowSettings,
        params: Arc<FakeParams>,
    ) -> GenericInterceptor {
        let mut filter = GenericInterceptor::new(settings, params);
        filter.attach().unwrap();
        filter
    }

    #[test]
    // [CHL-CursorShapeV1] Hovering a resize band requests the matching
    // cursor; leaving it restores the host cursor exactly once.
    fn test_move_over_edge_sets_and_resets_cursor() {
        let params = Arc::new(FakeParams::new());
        let mut filter = attached_filter(WindowSettings::default(), params.clone());

        // Act: edge, then interior, then interior again.
        filter.handle_event(&InputEvent::MouseMove {
            pos: Point::new(4, 300),
        });
        filter.handle_event(&InputEvent::MouseMove {
            pos: Point::new(400, 300),
        });
        filter.handle_event(&InputEvent::MouseMove {
            pos: Point::new(401, 300),
        });

        assert_eq!(
            params.calls(),
            vec![
                Call::SetCursor(CursorShape::SizeHorizontal),
                Call::UnsetCursor
            ]
        );
    }

    #[test]
    fn test_corner_hover_uses_diagonal_cursors() {
        let params = Arc::new(FakeParams::new());
        let mut filter = attached_filter(WindowSettings::default(), params.clone());
        filter.handle_event(&InputEvent::MouseMove {
            pos: Point::new(4, 4),
        });
        filter.handle_event(&InputEvent::MouseMove {
            pos: Point::new(795, 4),
        });
        assert_eq!(
            params.calls(),
            vec![
                Call::SetCursor(CursorShape::SizeFdiag),
                Call::SetCursor(CursorShape::SizeBdiag)
            ]
        );
    }

    #[test]
    // [CHL-SystemResizeV1] Left press on a corner hands the interaction to
    // the OS resize loop with the right edge set.
    fn test_left_press_on_corner_starts_system_resize() {
        let params = Arc::new(FakeParams::new());
        let mut filter = attached_filter(WindowSettings::default(), params.clone());
        let handled = filter.handle_event(&InputEvent::MousePress {
            button: MouseButton::Left,
            pos: Point::new(4, 4),
        });
        assert!(handled);
        assert_eq!(
            params.calls(),
            vec![Call::StartResize(ResizeEdges::TOP | ResizeEdges::LEFT)]
        );
    }

    #[test]
    // [CHL-SystemMoveV1] Left press on the caption strip starts the OS move
    // loop; presses in the client area pass through untouched.
    fn test_left_press_on_caption_starts_system_move() {
        let params = Arc::new(FakeParams::new());
        let mut filter = attached_filter(WindowSettings::default(), params.clone());
        assert!(filter.handle_event(&InputEvent::MousePress {
            button: MouseButton::Left,
            pos: Point::new(400, 20),
        }));
        assert!(!filter.handle_event(&InputEvent::MousePress {
            button: MouseButton::Left,
            pos: Point::new(400, 300),
        }));
        assert_eq!(params.calls(), vec![Call::StartMove]);
    }

    #[test]
    fn test_fixed_size_blocks_resize_but_not_move() {
        let params = Arc::new(FakeParams::new());
        params.set_fixed_size(true);
        let mut filter = attached_filter(WindowSettings::default(), params.clone());
        assert!(!filter.handle_event(&InputEvent::MousePress {
            button: MouseButton::Left,
            pos: Point::new(4, 300),
        }));
        assert!(filter.handle_event(&InputEvent::MousePress {
            button: MouseButton::Left,
            pos: Point::new(400, 20),
        }));
        assert_eq!(params.calls(), vec![Call::StartMove]);
    }

    #[test]
    fn test_dont_touch_cursor_shape_option() {
        let params = Arc::new(FakeParams::new());
        let settings = WindowSettings {
            options: WindowOptions::DONT_TOUCH_CURSOR_SHAPE,
            ..Default::default()
        };
        let mut filter = attached_filter(settings, params.clone());
        filter.handle_event(&InputEvent::MouseMove {
            pos: Point::new(4, 300),
        });
        assert!(params.calls().is_empty());
    }

    #[test]
    fn test_ignored_mouse_events_pass_through() {
        let mut params = FakeParams::new();
        params.ignore_all_mouse = true;
        let params = Arc::new(params);
        let mut filter = attached_filter(WindowSettings::default(), params.clone());
        assert!(!filter.handle_event(&InputEvent::MousePress {
            button: MouseButton::Left,
            pos: Point::new(400, 20),
        }));
        assert!(params.calls().is_empty());
    }

    #[test]
    fn test_double_click_on_caption_toggles_maximize() {
        let params = Arc::new(FakeParams::new());
        let mut filter = attached_filter(WindowSettings::default(), params.clone());
        let event = InputEvent::MouseDoubleClick {
            button: MouseButton::Left,
            pos: Point::new(400, 20),
        };
        assert!(filter.handle_event(&event));
        assert!(filter.handle_event(&event));
        assert_eq!(
            params.calls(),
            vec![
                Call::SetState(WindowState::Maximized),
                Call::SetState(WindowState::Normal)
            ]
        );
    }

    #[test]
    fn test_right_press_and_release_are_not_consumed() {
        let params = Arc::new(FakeParams::new());
        let mut filter = attached_filter(WindowSettings::default(), params.clone());
        assert!(!filter.handle_event(&InputEvent::MousePress {
            button: MouseButton::Right,
            pos: Point::new(400, 20),
        }));
        assert!(!filter.handle_event(&InputEvent::MouseRelease {
            button: MouseButton::Left,
            pos: Point::new(400, 20),
        }));
        assert!(params.calls().is_empty());
    }

    #[test]
    fn test_detach_restores_cursor_and_stops_handling() {
        let params = Arc::new(FakeParams::new());
        let mut filter = attached_filter(WindowSettings::default(), params.clone());
        filter.handle_event(&InputEvent::MouseMove {
            pos: Point::new(4, 300),
        });
        filter.detach();
        assert!(!filter.handle_event(&InputEvent::MousePress {
            button: MouseButton::Left,
            pos: Point::new(400, 20),
        }));
        assert_eq!(
            params.calls(),
            vec![
                Call::SetCursor(CursorShape::SizeHorizontal),
                Call::UnsetCursor
            ]
        );
    }
}
