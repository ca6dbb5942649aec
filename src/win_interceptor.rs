/*
 * Win32 message interceptor: subclasses a registered window's procedure and
 * re-synthesizes nonclient behavior after the visual frame is stripped.
 *
 * WM_NCCALCSIZE removes the frame (clamping to the work area when maximized,
 * with the auto-hide-taskbar gutter), WM_NCHITTEST funnels into the shared
 * hit-test core, the WM_NCUAH* / WM_NCPAINT / WM_NCACTIVATE family keeps the
 * legacy frame from painting, and the DWM/theme notifications re-apply the
 * shadow and feed the theme watcher.
 *
 * The per-window context rides as subclass refdata. All message handling runs
 * on the window's owning thread (the OS guarantees this); the context is
 * therefore mutated without a lock. Errors never unwind across the pump: the
 * proc always returns a defined LRESULT.
 */

use std::ffi::c_void;
use std::sync::Arc;

use windows::Win32::{
    Foundation::{HWND, LPARAM, LRESULT, POINT, RECT, WPARAM},
    Graphics::Gdi::{InvalidateRect, ScreenToClient},
    System::Threading::GetCurrentThreadId,
    UI::Shell::{
        ABE_LEFT, ABE_RIGHT, ABE_TOP, DefSubclassProc, RemoveWindowSubclass, SetWindowSubclass,
    },
    UI::WindowsAndMessaging::{
        GWL_STYLE, GetClientRect, GetCursorPos, GetSystemMenu,
        GetWindowLongPtrW, GetWindowThreadProcessId, IsWindow, MINMAXINFO, NCCALCSIZE_PARAMS,
        SWP_NOACTIVATE, SWP_NOZORDER, SendMessageW, SetWindowLongPtrW, SetWindowPos,
        TPM_RETURNCMD, TPM_RIGHTBUTTON, TrackPopupMenu, WINDOW_STYLE, WM_DPICHANGED,
        WM_DWMCOLORIZATIONCOLORCHANGED, WM_DWMCOMPOSITIONCHANGED, WM_GETMINMAXINFO,
        WM_NCACTIVATE, WM_NCCALCSIZE, WM_NCDESTROY, WM_NCHITTEST, WM_NCPAINT, WM_NCRBUTTONUP,
        WM_SETICON, WM_SETTEXT, WM_SETTINGCHANGE, WM_SYSCOMMAND, WM_THEMECHANGED,
        WM_WINDOWPOSCHANGED, WS_CLIPCHILDREN, WS_CLIPSIBLINGS, WS_OVERLAPPEDWINDOW, WS_VISIBLE,
    },
};
use windows::core::PCWSTR;

use crate::error::{PlatformError, Result as PlatformResult};
use crate::hit_test::{HitTestContext, classify_point};
use crate::interceptor::Interceptor;
use crate::params::WindowParams;
use crate::theme::ThemeWatcher;
use crate::types::{
    FrameMetrics, HitTestResult, Point, Size, WindowId, WindowOptions, WindowSettings,
};
use crate::win_dwm;

const SUBCLASS_ID: usize = 0x436C; // "Cl"

// Undocumented user-activity-hint messages that repaint the legacy caption.
const WM_NCUAHDRAWCAPTION: u32 = 0x00AE;
const WM_NCUAHDRAWFRAME: u32 = 0x00AF;

// Nonclient hit-test codes returned from WM_NCHITTEST.
const HTNOWHERE: u32 = 0;
const HTCLIENT: u32 = 1;
const HTCAPTION: u32 = 2;
const HTMINBUTTON: u32 = 8;
const HTMAXBUTTON: u32 = 9;
const HTLEFT: u32 = 10;
const HTRIGHT: u32 = 11;
const HTTOP: u32 = 12;
const HTTOPLEFT: u32 = 13;
const HTTOPRIGHT: u32 = 14;
const HTBOTTOM: u32 = 15;
const HTBOTTOMLEFT: u32 = 16;
const HTBOTTOMRIGHT: u32 = 17;
const HTCLOSE: u32 = 20;

// SystemParametersInfo action broadcast with WM_SETTINGCHANGE when the
// desktop wallpaper changes.
const SPI_SETDESKWALLPAPER_ACTION: usize = 0x0014;

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct WinTuning {
    /// Report the maximize button as plain client area so Windows 11 snap
    /// layouts never appear.
    pub snap_layouts_disabled: bool,
    /// Process-wide blur request; merged with the per-window options.
    pub blur_behind: bool,
}

/// Per-window state carried as subclass refdata. Owned by the interceptor;
/// the subclass proc only ever borrows it on the window's thread.
struct SubclassContext {
    settings: WindowSettings,
    params: Arc<dyn WindowParams>,
    theme_watcher: Option<Arc<ThemeWatcher>>,
    tuning: WinTuning,
    /// Message delivery order relative to registration is not guaranteed, so
    /// the first intercepted message finishes initialization if attach has
    /// not already done it.
    inited: bool,
    composition_enabled: bool,
    dpi: u32,
    metrics: FrameMetrics,
}

impl SubclassContext {
    fn ensure_inited(&mut self, hwnd: HWND) {
        if self.inited {
            return;
        }
        self.inited = true;
        self.composition_enabled = win_dwm::is_composition_enabled();
        self.refresh_metrics(hwnd);
    }

    fn refresh_metrics(&mut self, hwnd: HWND) {
        self.dpi = win_dwm::window_dpi(hwnd);
        self.metrics = win_dwm::frame_metrics(self.dpi, self.settings.title_bar_height);
    }

    fn blur_requested(&self) -> bool {
        if self
            .settings
            .options
            .contains(WindowOptions::FORCE_NON_NATIVE_BACKGROUND_BLUR)
        {
            return false;
        }
        self.tuning.blur_behind
            || self
                .settings
                .options
                .contains(WindowOptions::ENABLE_BLUR_BEHIND_WINDOW)
    }
}

pub(crate) struct WinInterceptor {
    settings: WindowSettings,
    params: Arc<dyn WindowParams>,
    theme_watcher: Option<Arc<ThemeWatcher>>,
    tuning: WinTuning,
    /// Raw context pointer while attached; freed exactly once, in detach.
    context: *mut SubclassContext,
    original_style: isize,
}

// The raw context pointer is only dereferenced on the window's owning
// thread; moving the interceptor between threads is safe.
unsafe impl Send for WinInterceptor {}

impl WinInterceptor {
    pub(crate) fn new(
        settings: WindowSettings,
        params: Arc<dyn WindowParams>,
        theme_watcher: Option<Arc<ThemeWatcher>>,
        tuning: WinTuning,
    ) -> Self {
        Self {
            settings,
            params,
            theme_watcher,
            tuning,
            context: std::ptr::null_mut(),
            original_style: 0,
        }
    }

    fn hwnd(&self) -> HWND {
        HWND(self.params.window_id().0 as *mut c_void)
    }
}

impl Interceptor for WinInterceptor {
    fn attach(&mut self) -> PlatformResult<()> {
        if !self.context.is_null() {
            return Ok(());
        }
        let hwnd = self.hwnd();
        let id = self.params.window_id();
        if id.is_null() || !unsafe { IsWindow(Some(hwnd)) }.as_bool() {
            return Err(PlatformError::InvalidHandle(format!(
                "window {id:?} is not a live native window"
            )));
        }
        debug_assert_eq!(
            unsafe { GetWindowThreadProcessId(hwnd, None) },
            unsafe { GetCurrentThreadId() },
            "interceptor attach must run on the window's owning thread"
        );

        let mut context = Box::new(SubclassContext {
            settings: self.settings.clone(),
            params: self.params.clone(),
            theme_watcher: self.theme_watcher.clone(),
            tuning: self.tuning,
            inited: false,
            composition_enabled: false,
            dpi: win_dwm::USER_DEFAULT_SCREEN_DPI,
            metrics: FrameMetrics::default(),
        });
        context.ensure_inited(hwnd);
        let blur = context.blur_requested();
        let context = Box::into_raw(context);

        if !unsafe {
            SetWindowSubclass(hwnd, Some(subclass_proc), SUBCLASS_ID, context as usize)
        }
        .as_bool()
        {
            // Reclaim the box before reporting failure.
            drop(unsafe { Box::from_raw(context) });
            return Err(PlatformError::InitializationFailed(format!(
                "SetWindowSubclass failed for {id:?}"
            )));
        }
        self.context = context;

        unsafe {
            self.original_style = GetWindowLongPtrW(hwnd, GWL_STYLE);
            let style = WS_OVERLAPPEDWINDOW | WS_CLIPCHILDREN | WS_CLIPSIBLINGS;
            SetWindowLongPtrW(hwnd, GWL_STYLE, style.0 as isize);
        }
        win_dwm::update_frame_shadow(hwnd);
        if blur {
            win_dwm::set_blur_behind(hwnd, true);
        }
        win_dwm::trigger_frame_change(id);
        log::debug!("frameless interception attached to {id:?}");
        Ok(())
    }

    fn detach(&mut self) {
        if self.context.is_null() {
            return;
        }
        let hwnd = self.hwnd();
        if unsafe { IsWindow(Some(hwnd)) }.as_bool() {
            unsafe {
                let _ = RemoveWindowSubclass(hwnd, Some(subclass_proc), SUBCLASS_ID);
                if self.original_style != 0 {
                    SetWindowLongPtrW(hwnd, GWL_STYLE, self.original_style);
                }
            }
            win_dwm::set_blur_behind(hwnd, false);
            win_dwm::trigger_frame_change(self.params.window_id());
        }
        // The window may already be gone; the subclass then died with it and
        // only the context box is left to reclaim.
        drop(unsafe { Box::from_raw(self.context) });
        self.context = std::ptr::null_mut();
        log::debug!(
            "frameless interception detached from {:?}",
            self.params.window_id()
        );
    }
}

impl Drop for WinInterceptor {
    fn drop(&mut self) {
        self.detach();
    }
}

unsafe extern "system" fn subclass_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
    _subclass_id: usize,
    refdata: usize,
) -> LRESULT {
    let context = refdata as *mut SubclassContext;
    if context.is_null() {
        return unsafe { DefSubclassProc(hwnd, msg, wparam, lparam) };
    }
    let context = unsafe { &mut *context };
    context.ensure_inited(hwnd);

    match msg {
        WM_NCCALCSIZE => handle_nccalcsize(context, hwnd, wparam, lparam),
        WM_NCHITTEST => handle_nchittest(context, hwnd, lparam),
        WM_NCUAHDRAWCAPTION | WM_NCUAHDRAWFRAME => LRESULT(0),
        WM_NCPAINT => {
            // With composition on, DWM draws the (invisible) frame and the
            // shadow; blocking the message would kill the shadow.
            if context.composition_enabled {
                unsafe { DefSubclassProc(hwnd, msg, wparam, lparam) }
            } else {
                LRESULT(0)
            }
        }
        WM_NCACTIVATE => {
            if context.composition_enabled {
                // lparam -1 suppresses the default nonclient repaint.
                unsafe { DefSubclassProc(hwnd, msg, wparam, LPARAM(-1)) }
            } else {
                LRESULT(1)
            }
        }
        WM_DWMCOMPOSITIONCHANGED => {
            context.composition_enabled = win_dwm::is_composition_enabled();
            win_dwm::update_frame_shadow(hwnd);
            unsafe { DefSubclassProc(hwnd, msg, wparam, lparam) }
        }
        WM_WINDOWPOSCHANGED => {
            let result = unsafe { DefSubclassProc(hwnd, msg, wparam, lparam) };
            // The nonclient area does not repaint on its own after a
            // move/resize once the frame is stripped.
            unsafe {
                let _ = InvalidateRect(Some(hwnd), None, true);
            }
            result
        }
        WM_DPICHANGED => handle_dpichanged(context, hwnd, wparam, lparam),
        WM_GETMINMAXINFO => handle_getminmaxinfo(context, hwnd, wparam, lparam),
        WM_SETICON | WM_SETTEXT => handle_seticon_settext(context, hwnd, msg, wparam, lparam),
        WM_THEMECHANGED | WM_DWMCOLORIZATIONCOLORCHANGED => {
            if let Some(watcher) = &context.theme_watcher {
                watcher.refresh();
            }
            unsafe { DefSubclassProc(hwnd, msg, wparam, lparam) }
        }
        WM_SETTINGCHANGE => {
            if let Some(watcher) = &context.theme_watcher {
                if wparam.0 == SPI_SETDESKWALLPAPER_ACTION {
                    watcher.refresh_wallpaper();
                } else if setting_change_is_immersive_color(lparam) {
                    watcher.refresh();
                }
            }
            unsafe { DefSubclassProc(hwnd, msg, wparam, lparam) }
        }
        WM_NCRBUTTONUP => {
            if wparam.0 as u32 == HTCAPTION
                && !context
                    .settings
                    .options
                    .contains(WindowOptions::DONT_INSTALL_SYSTEM_MENU_HOOK)
            {
                show_system_menu(hwnd);
                return LRESULT(0);
            }
            unsafe { DefSubclassProc(hwnd, msg, wparam, lparam) }
        }
        WM_NCDESTROY => {
            // The window dies with the subclass installed; tear the hook out
            // but leave the context for the owning interceptor to free.
            unsafe {
                let _ = RemoveWindowSubclass(hwnd, Some(subclass_proc), SUBCLASS_ID);
                DefSubclassProc(hwnd, msg, wparam, lparam)
            }
        }
        _ => unsafe { DefSubclassProc(hwnd, msg, wparam, lparam) },
    }
}

/*
 * WM_NCCALCSIZE with a non-zero wparam proposes the new client rectangle in
 * rgrc[0]; returning 0 without shrinking it is what actually removes the
 * frame. Maximized windows need the rect clamped to the work area manually
 * since the OS normally hides the frame off-screen instead.
 */
fn handle_nccalcsize(
    context: &mut SubclassContext,
    hwnd: HWND,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    if wparam.0 == 0 || lparam.0 == 0 {
        return unsafe { DefSubclassProc(hwnd, WM_NCCALCSIZE, wparam, lparam) };
    }
    if context.params.window_state().is_expanded() {
        let calc_params = unsafe { &mut *(lparam.0 as *mut NCCALCSIZE_PARAMS) };
        if let Some((work, monitor)) = win_dwm::monitor_work_area(hwnd) {
            let compensate = win_dwm::is_at_least(win_dwm::WindowsVersion::WIN8);
            let edge = win_dwm::autohide_taskbar_edge(monitor);
            calc_params.rgrc[0] = maximized_client_rect(work, compensate, edge);
        }
    }
    LRESULT(0)
}

/// Work-area rect adjusted for a maximized frameless window. The 1px bottom
/// inset stops Windows from treating the window as fullscreen; the taskbar
/// gutter keeps an auto-hidden taskbar able to fly out. Both adjustments are
/// version-gated off on legacy systems.
fn maximized_client_rect(work: RECT, compensate: bool, autohide_edge: Option<u32>) -> RECT {
    let mut rect = work;
    if !compensate {
        return rect;
    }
    match autohide_edge {
        Some(edge) if edge == ABE_LEFT => rect.left += 1,
        Some(edge) if edge == ABE_TOP => rect.top += 1,
        Some(edge) if edge == ABE_RIGHT => rect.right -= 1,
        Some(_) => rect.bottom -= 1,
        None => rect.bottom -= 1,
    }
    rect
}

fn handle_nchittest(context: &mut SubclassContext, hwnd: HWND, lparam: LPARAM) -> LRESULT {
    let mut point = POINT {
        x: (lparam.0 as i32 & 0xFFFF) as i16 as i32,
        y: ((lparam.0 as i32 >> 16) & 0xFFFF) as i16 as i32,
    };
    if !unsafe { ScreenToClient(hwnd, &mut point) }.as_bool() {
        return LRESULT(HTNOWHERE as isize);
    }
    let mut client = RECT::default();
    if unsafe { GetClientRect(hwnd, &mut client) }.is_err() {
        return LRESULT(HTNOWHERE as isize);
    }
    let ctx = HitTestContext {
        size: Size::new(client.right - client.left, client.bottom - client.top),
        metrics: context.metrics,
        window_state: context.params.window_state(),
        fixed_size: context.params.is_fixed_size(),
        ignore_areas: &context.settings.ignore_areas,
        draggable_areas: &context.settings.draggable_areas,
    };
    let params = &context.params;
    let hit = classify_point(&ctx, Point::new(point.x, point.y), |p| {
        params.hit_test_system_button(p)
    });
    LRESULT(ht_code_for(hit, context.tuning.snap_layouts_disabled) as isize)
}

fn ht_code_for(hit: HitTestResult, snap_layouts_disabled: bool) -> u32 {
    match hit {
        HitTestResult::Nowhere => HTNOWHERE,
        HitTestResult::Client => HTCLIENT,
        HitTestResult::Caption => HTCAPTION,
        HitTestResult::Left => HTLEFT,
        HitTestResult::Right => HTRIGHT,
        HitTestResult::Top => HTTOP,
        HitTestResult::Bottom => HTBOTTOM,
        HitTestResult::TopLeft => HTTOPLEFT,
        HitTestResult::TopRight => HTTOPRIGHT,
        HitTestResult::BottomLeft => HTBOTTOMLEFT,
        HitTestResult::BottomRight => HTBOTTOMRIGHT,
        HitTestResult::MinimizeButton => HTMINBUTTON,
        // Reporting HTMAXBUTTON is what summons Windows 11 snap layouts.
        HitTestResult::MaximizeButton => {
            if snap_layouts_disabled {
                HTCLIENT
            } else {
                HTMAXBUTTON
            }
        }
        HitTestResult::CloseButton => HTCLOSE,
    }
}

fn handle_dpichanged(
    context: &mut SubclassContext,
    hwnd: HWND,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    context.dpi = (wparam.0 & 0xFFFF) as u32;
    context.metrics = win_dwm::frame_metrics(context.dpi, context.settings.title_bar_height);
    if lparam.0 != 0 {
        let suggested = unsafe { &*(lparam.0 as *const RECT) };
        unsafe {
            let _ = SetWindowPos(
                hwnd,
                None,
                suggested.left,
                suggested.top,
                suggested.right - suggested.left,
                suggested.bottom - suggested.top,
                SWP_NOZORDER | SWP_NOACTIVATE,
            );
        }
    }
    LRESULT(0)
}

fn handle_getminmaxinfo(
    context: &mut SubclassContext,
    hwnd: HWND,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    if lparam.0 == 0 {
        return unsafe { DefSubclassProc(hwnd, WM_GETMINMAXINFO, wparam, lparam) };
    }
    let mmi = unsafe { &mut *(lparam.0 as *mut MINMAXINFO) };
    if let Some((work, monitor)) = win_dwm::monitor_work_area(hwnd) {
        mmi.ptMaxPosition.x = work.left - monitor.left;
        mmi.ptMaxPosition.y = work.top - monitor.top;
        mmi.ptMaxSize.x = work.right - work.left;
        mmi.ptMaxSize.y = work.bottom - work.top;
    }
    if let Some(min) = context.settings.minimum_size {
        let scale = |v: i32| {
            ((v as i64 * context.dpi as i64) / win_dwm::USER_DEFAULT_SCREEN_DPI as i64) as i32
        };
        mmi.ptMinTrackSize.x = scale(min.width);
        mmi.ptMinTrackSize.y = scale(min.height);
    }
    LRESULT(0)
}

/*
 * Without DWM composition, setting the icon or title makes the legacy frame
 * flash in for one frame. Hiding the window around the default handling and
 * restoring the style afterwards suppresses the flicker.
 */
fn handle_seticon_settext(
    context: &mut SubclassContext,
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    if context.composition_enabled {
        return unsafe { DefSubclassProc(hwnd, msg, wparam, lparam) };
    }
    unsafe {
        let style = GetWindowLongPtrW(hwnd, GWL_STYLE);
        let was_visible = WINDOW_STYLE(style as u32).contains(WS_VISIBLE);
        if was_visible {
            SetWindowLongPtrW(hwnd, GWL_STYLE, style & !(WS_VISIBLE.0 as isize));
        }
        let result = DefSubclassProc(hwnd, msg, wparam, lparam);
        if was_visible {
            SetWindowLongPtrW(hwnd, GWL_STYLE, style);
            win_dwm::trigger_frame_change(WindowId(hwnd.0 as isize));
        }
        result
    }
}

fn setting_change_is_immersive_color(lparam: LPARAM) -> bool {
    if lparam.0 == 0 {
        return false;
    }
    let name = unsafe { PCWSTR(lparam.0 as *const u16).to_string() };
    matches!(name, Ok(s) if s == "ImmersiveColorSet")
}

/// Standard system menu at the cursor, command returned and re-posted as
/// WM_SYSCOMMAND so the host sees the usual restore/move/size/close flow.
fn show_system_menu(hwnd: HWND) {
    unsafe {
        let menu = GetSystemMenu(hwnd, false);
        if menu.is_invalid() {
            return;
        }
        let mut cursor = POINT::default();
        if GetCursorPos(&mut cursor).is_err() {
            return;
        }
        let command = TrackPopupMenu(
            menu,
            TPM_RIGHTBUTTON | TPM_RETURNCMD,
            cursor.x,
            cursor.y,
            0,
            hwnd,
            None,
        );
        if command.as_bool() {
            SendMessageW(
                hwnd,
                WM_SYSCOMMAND,
                Some(WPARAM(command.0 as usize)),
                Some(LPARAM(0)),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ResizeEdges;

    /*
     * Pure-logic tests: rectangle math and code mapping, no live windows.
     */

    fn rect(left: i32, top: i32, right: i32, bottom: i32) -> RECT {
        RECT {
            left,
            top,
            right,
            bottom,
        }
    }

    #[test]
    // [CHL-MaximizedWorkAreaV1] Maximized client rect is the work area with
    // a 1px inset so the OS never mistakes the window for fullscreen.
    fn test_maximized_client_rect_plain() {
        let work = rect(0, 0, 1920, 1040);
        let out = maximized_client_rect(work, true, None);
        assert_eq!(out, rect(0, 0, 1920, 1039));
    }

    #[test]
    fn test_maximized_client_rect_autohide_taskbar_edges() {
        let work = rect(0, 0, 1920, 1080);
        assert_eq!(
            maximized_client_rect(work, true, Some(ABE_LEFT)),
            rect(1, 0, 1920, 1080)
        );
        assert_eq!(
            maximized_client_rect(work, true, Some(ABE_TOP)),
            rect(0, 1, 1920, 1080)
        );
        assert_eq!(
            maximized_client_rect(work, true, Some(ABE_RIGHT)),
            rect(0, 0, 1919, 1080)
        );
    }

    #[test]
    // Legacy systems get the work area untouched; the compensation is a
    // platform-support checklist item there, not guessed behavior.
    fn test_maximized_client_rect_without_compensation() {
        let work = rect(0, 0, 1280, 984);
        assert_eq!(maximized_client_rect(work, false, None), work);
        assert_eq!(
            maximized_client_rect(work, false, Some(ABE_TOP)),
            work
        );
    }

    #[test]
    fn test_ht_code_mapping() {
        assert_eq!(ht_code_for(HitTestResult::Caption, false), HTCAPTION);
        assert_eq!(ht_code_for(HitTestResult::TopLeft, false), HTTOPLEFT);
        assert_eq!(ht_code_for(HitTestResult::Client, false), HTCLIENT);
        assert_eq!(ht_code_for(HitTestResult::Nowhere, false), HTNOWHERE);
        assert_eq!(ht_code_for(HitTestResult::CloseButton, false), HTCLOSE);
    }

    #[test]
    // [CHL-SnapLayoutToggleV1] Disabling snap layouts only affects the
    // maximize button code.
    fn test_snap_layout_toggle_downgrades_maximize_button() {
        assert_eq!(
            ht_code_for(HitTestResult::MaximizeButton, false),
            HTMAXBUTTON
        );
        assert_eq!(ht_code_for(HitTestResult::MaximizeButton, true), HTCLIENT);
        assert_eq!(
            ht_code_for(HitTestResult::MinimizeButton, true),
            HTMINBUTTON
        );
    }

    #[test]
    fn test_resize_edge_codes_cover_grid() {
        let pairs = [
            (HitTestResult::Left, HTLEFT),
            (HitTestResult::Right, HTRIGHT),
            (HitTestResult::Top, HTTOP),
            (HitTestResult::Bottom, HTBOTTOM),
            (HitTestResult::TopRight, HTTOPRIGHT),
            (HitTestResult::BottomLeft, HTBOTTOMLEFT),
            (HitTestResult::BottomRight, HTBOTTOMRIGHT),
        ];
        for (hit, code) in pairs {
            assert_eq!(ht_code_for(hit, false), code, "{hit:?}");
            assert!(!hit.resize_edges().is_empty() || !hit.is_resize_border());
        }
        let _ = ResizeEdges::NONE;
    }
}
