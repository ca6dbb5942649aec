/*
 * Windows compositor and metrics plumbing shared by the message interceptor:
 * OS version detection, the DPI resolution chain, nonclient frame metrics,
 * DWM shadow extension, background blur, and the native move/resize handoff.
 *
 * APIs that do not exist on every supported Windows build (per-window DPI,
 * SetWindowCompositionAttribute, RtlGetVersion) are resolved once through
 * GetProcAddress and cached in OnceLock statics; a missing export degrades to
 * the next fallback in the chain, never to a failure.
 */

use std::ffi::c_void;
use std::sync::OnceLock;

use windows::Win32::{
    Foundation::{HMODULE, HWND, LPARAM, RECT, WPARAM},
    Graphics::Dwm::{
        DWM_BB_ENABLE, DWM_BLURBEHIND, DWMNCRENDERINGPOLICY, DWMNCRP_ENABLED,
        DWMWA_NCRENDERING_POLICY, DwmEnableBlurBehindWindow, DwmExtendFrameIntoClientArea,
        DwmIsCompositionEnabled, DwmSetWindowAttribute,
    },
    Graphics::Gdi::{
        GetDC, GetDeviceCaps, GetMonitorInfoW, HMONITOR, LOGPIXELSX, MONITOR_DEFAULTTONEAREST,
        MONITORINFO, MonitorFromWindow, ReleaseDC,
    },
    System::LibraryLoader::{GetProcAddress, LoadLibraryW},
    UI::Controls::MARGINS,
    UI::Input::KeyboardAndMouse::ReleaseCapture,
    UI::Shell::{
        ABM_GETSTATE, ABM_GETTASKBARPOS, ABS_AUTOHIDE, APPBARDATA, SHAppBarMessage,
    },
    UI::WindowsAndMessaging::{
        GetSystemMetrics, SM_CXFRAME, SM_CXPADDEDBORDER, SM_CYCAPTION, SM_CYFRAME,
        SWP_FRAMECHANGED, SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOOWNERZORDER, SWP_NOSIZE,
        SWP_NOZORDER, SendMessageW, SetWindowPos, WM_NCLBUTTONDOWN,
    },
};
use windows::core::{BOOL, PCSTR, w};

use crate::types::{FrameMetrics, ResizeEdges, WindowId};

pub(crate) const USER_DEFAULT_SCREEN_DPI: u32 = 96;

// Hit-test codes used for the WM_NCLBUTTONDOWN resize/move handoff.
const HTCAPTION_CODE: u32 = 2;
const HTLEFT_CODE: u32 = 10;
const HTRIGHT_CODE: u32 = 11;
const HTTOP_CODE: u32 = 12;
const HTTOPLEFT_CODE: u32 = 13;
const HTTOPRIGHT_CODE: u32 = 14;
const HTBOTTOM_CODE: u32 = 15;
const HTBOTTOMLEFT_CODE: u32 = 16;
const HTBOTTOMRIGHT_CODE: u32 = 17;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub(crate) struct WindowsVersion {
    pub major: u32,
    pub minor: u32,
    pub build: u32,
}

impl WindowsVersion {
    pub(crate) const WIN8: WindowsVersion = WindowsVersion {
        major: 6,
        minor: 2,
        build: 0,
    };
    pub(crate) const WIN10: WindowsVersion = WindowsVersion {
        major: 10,
        minor: 0,
        build: 0,
    };
    pub(crate) const WIN10_1607: WindowsVersion = WindowsVersion {
        major: 10,
        minor: 0,
        build: 14393,
    };
    pub(crate) const WIN10_1709: WindowsVersion = WindowsVersion {
        major: 10,
        minor: 0,
        build: 16299,
    };
}

#[repr(C)]
struct OsVersionInfo {
    dw_os_version_info_size: u32,
    dw_major_version: u32,
    dw_minor_version: u32,
    dw_build_number: u32,
    dw_platform_id: u32,
    sz_csd_version: [u16; 128],
}

type RtlGetVersionFn = unsafe extern "system" fn(*mut OsVersionInfo) -> i32;
type GetDpiForWindowFn = unsafe extern "system" fn(HWND) -> u32;
type GetDpiForMonitorFn = unsafe extern "system" fn(HMONITOR, u32, *mut u32, *mut u32) -> i32;
type GetSystemMetricsForDpiFn = unsafe extern "system" fn(i32, u32) -> i32;
type SetWindowCompositionAttributeFn =
    unsafe extern "system" fn(HWND, *mut WindowCompositionAttribData) -> BOOL;

fn load_proc(module: windows::core::PCWSTR, name: PCSTR) -> Option<*const c_void> {
    let module: HMODULE = unsafe { LoadLibraryW(module) }.ok()?;
    unsafe { GetProcAddress(module, name) }.map(|f| f as *const c_void)
}

/// True OS version via RtlGetVersion, immune to compatibility shims. Cached
/// for the process lifetime; a load failure reports Windows 10 so feature
/// gates stay on their modern path.
pub(crate) fn windows_version() -> WindowsVersion {
    static VERSION: OnceLock<WindowsVersion> = OnceLock::new();
    *VERSION.get_or_init(|| {
        let Some(ptr) = load_proc(w!("ntdll.dll"), PCSTR(c"RtlGetVersion".as_ptr().cast())) else {
            log::warn!("RtlGetVersion unavailable, assuming Windows 10");
            return WindowsVersion::WIN10;
        };
        let rtl_get_version: RtlGetVersionFn =
            unsafe { std::mem::transmute::<*const c_void, RtlGetVersionFn>(ptr) };
        let mut info = OsVersionInfo {
            dw_os_version_info_size: std::mem::size_of::<OsVersionInfo>() as u32,
            dw_major_version: 0,
            dw_minor_version: 0,
            dw_build_number: 0,
            dw_platform_id: 0,
            sz_csd_version: [0; 128],
        };
        if unsafe { rtl_get_version(&mut info) } != 0 {
            log::warn!("RtlGetVersion failed, assuming Windows 10");
            return WindowsVersion::WIN10;
        }
        WindowsVersion {
            major: info.dw_major_version,
            minor: info.dw_minor_version,
            build: info.dw_build_number,
        }
    })
}

pub(crate) fn is_at_least(version: WindowsVersion) -> bool {
    windows_version() >= version
}

/// Effective DPI for a window: GetDpiForWindow, then the monitor's effective
/// DPI, then the primary device caps, then the 96-dpi default.
pub(crate) fn window_dpi(hwnd: HWND) -> u32 {
    static GET_DPI_FOR_WINDOW: OnceLock<Option<GetDpiForWindowFn>> = OnceLock::new();
    let get_dpi_for_window = GET_DPI_FOR_WINDOW.get_or_init(|| {
        load_proc(w!("user32.dll"), PCSTR(c"GetDpiForWindow".as_ptr().cast()))
            .map(|ptr| unsafe { std::mem::transmute::<*const c_void, GetDpiForWindowFn>(ptr) })
    });
    if let Some(get_dpi) = get_dpi_for_window {
        let dpi = unsafe { get_dpi(hwnd) };
        if dpi != 0 {
            return dpi;
        }
    }

    static GET_DPI_FOR_MONITOR: OnceLock<Option<GetDpiForMonitorFn>> = OnceLock::new();
    let get_dpi_for_monitor = GET_DPI_FOR_MONITOR.get_or_init(|| {
        load_proc(w!("shcore.dll"), PCSTR(c"GetDpiForMonitor".as_ptr().cast()))
            .map(|ptr| unsafe { std::mem::transmute::<*const c_void, GetDpiForMonitorFn>(ptr) })
    });
    if let Some(get_dpi) = get_dpi_for_monitor {
        const MDT_EFFECTIVE_DPI: u32 = 0;
        let monitor = unsafe { MonitorFromWindow(hwnd, MONITOR_DEFAULTTONEAREST) };
        let (mut dpi_x, mut dpi_y) = (0u32, 0u32);
        let hr = unsafe { get_dpi(monitor, MDT_EFFECTIVE_DPI, &mut dpi_x, &mut dpi_y) };
        if hr == 0 && dpi_x != 0 {
            return dpi_x;
        }
    }

    unsafe {
        let hdc = GetDC(Some(hwnd));
        if !hdc.is_invalid() {
            let dpi = GetDeviceCaps(Some(hdc), LOGPIXELSX);
            ReleaseDC(Some(hwnd), hdc);
            if dpi > 0 {
                return dpi as u32;
            }
        }
    }
    USER_DEFAULT_SCREEN_DPI
}

fn system_metric_for_dpi(index: i32, dpi: u32) -> i32 {
    static GET_METRICS_FOR_DPI: OnceLock<Option<GetSystemMetricsForDpiFn>> = OnceLock::new();
    let get_metrics = GET_METRICS_FOR_DPI.get_or_init(|| {
        load_proc(
            w!("user32.dll"),
            PCSTR(c"GetSystemMetricsForDpi".as_ptr().cast()),
        )
        .map(|ptr| unsafe { std::mem::transmute::<*const c_void, GetSystemMetricsForDpiFn>(ptr) })
    });
    if let Some(get_metrics) = get_metrics {
        return unsafe { get_metrics(index, dpi) };
    }
    // Pre-1607: GetSystemMetrics reports at system DPI; rescale to the
    // window's DPI.
    let value = unsafe { GetSystemMetrics(windows::Win32::UI::WindowsAndMessaging::SYSTEM_METRICS_INDEX(index)) };
    ((value as i64 * dpi as i64) / USER_DEFAULT_SCREEN_DPI as i64) as i32
}

/// Nonclient metrics at the given DPI. Border thickness is the resize frame
/// plus the padded border; the title-bar height includes the top border so
/// the caption strip starts at y = 0 of the frameless client area.
pub(crate) fn frame_metrics(dpi: u32, title_bar_override: Option<i32>) -> FrameMetrics {
    let border_width =
        system_metric_for_dpi(SM_CXFRAME.0, dpi) + system_metric_for_dpi(SM_CXPADDEDBORDER.0, dpi);
    let border_height =
        system_metric_for_dpi(SM_CYFRAME.0, dpi) + system_metric_for_dpi(SM_CXPADDEDBORDER.0, dpi);
    let title_bar_height = match title_bar_override {
        Some(logical) => ((logical as i64 * dpi as i64) / USER_DEFAULT_SCREEN_DPI as i64) as i32,
        None => border_height + system_metric_for_dpi(SM_CYCAPTION.0, dpi),
    };
    FrameMetrics {
        border_width,
        border_height,
        title_bar_height,
    }
}

pub(crate) fn is_composition_enabled() -> bool {
    // Composition is mandatory since Windows 8; the query only matters on 7.
    if is_at_least(WindowsVersion::WIN8) {
        return true;
    }
    unsafe { DwmIsCompositionEnabled() }.map(|b| b.as_bool()).unwrap_or(false)
}

/// Re-requests nonclient rendering and extends the frame into the client
/// area by one invisible pixel on every side so the window keeps its DWM
/// drop-shadow after the visual frame is stripped.
pub(crate) fn update_frame_shadow(hwnd: HWND) {
    let policy: i32 = DWMNCRP_ENABLED.0;
    unsafe {
        if let Err(err) = DwmSetWindowAttribute(
            hwnd,
            DWMWA_NCRENDERING_POLICY,
            &policy as *const i32 as *const c_void,
            std::mem::size_of::<DWMNCRENDERINGPOLICY>() as u32,
        ) {
            log::warn!("DWMWA_NCRENDERING_POLICY failed for {hwnd:?}: {err}");
        }
        let margins = MARGINS {
            cxLeftWidth: -1,
            cxRightWidth: -1,
            cyTopHeight: -1,
            cyBottomHeight: -1,
        };
        if let Err(err) = DwmExtendFrameIntoClientArea(hwnd, &margins) {
            log::warn!("DwmExtendFrameIntoClientArea failed for {hwnd:?}: {err}");
        }
    }
}

#[repr(C)]
struct AccentPolicy {
    accent_state: u32,
    accent_flags: u32,
    gradient_color: u32,
    animation_id: u32,
}

#[repr(C)]
struct WindowCompositionAttribData {
    attrib: u32,
    pv_data: *mut c_void,
    cb_data: usize,
}

const WCA_ACCENT_POLICY: u32 = 19;
const ACCENT_DISABLED: u32 = 0;
const ACCENT_ENABLE_TRANSPARENTGRADIENT: u32 = 2;
const ACCENT_ENABLE_BLURBEHIND: u32 = 3;
const ACCENT_ENABLE_ACRYLICBLURBEHIND: u32 = 4;

/// Picks the accent state for the given build; `None` routes through the
/// legacy Win7 DWM call instead. Enable and disable must take the same route
/// on a given build, so the pre-Win8 check comes before the enable flag.
fn accent_state_for(version: WindowsVersion, enable: bool) -> Option<u32> {
    if version < WindowsVersion::WIN8 {
        return None;
    }
    if !enable {
        return Some(ACCENT_DISABLED);
    }
    if version >= WindowsVersion::WIN10_1709 {
        Some(ACCENT_ENABLE_ACRYLICBLURBEHIND)
    } else if version >= WindowsVersion::WIN10 {
        Some(ACCENT_ENABLE_BLURBEHIND)
    } else {
        Some(ACCENT_ENABLE_TRANSPARENTGRADIENT)
    }
}

fn blur_accent_state(enable: bool) -> Option<u32> {
    accent_state_for(windows_version(), enable)
}

/// Enables or disables background blur behind the window, choosing the best
/// mechanism for the OS build. Missing APIs log once and leave blur off.
pub(crate) fn set_blur_behind(hwnd: HWND, enable: bool) {
    match blur_accent_state(enable) {
        Some(state) => {
            static SET_WCA: OnceLock<Option<SetWindowCompositionAttributeFn>> = OnceLock::new();
            let set_wca = SET_WCA.get_or_init(|| {
                load_proc(
                    w!("user32.dll"),
                    PCSTR(c"SetWindowCompositionAttribute".as_ptr().cast()),
                )
                .map(|ptr| unsafe {
                    std::mem::transmute::<*const c_void, SetWindowCompositionAttributeFn>(ptr)
                })
            });
            let Some(set_wca) = set_wca else {
                log::warn!("SetWindowCompositionAttribute unavailable, blur disabled");
                return;
            };
            let mut policy = AccentPolicy {
                accent_state: state,
                accent_flags: 0,
                gradient_color: 0,
                animation_id: 0,
            };
            let mut data = WindowCompositionAttribData {
                attrib: WCA_ACCENT_POLICY,
                pv_data: &mut policy as *mut AccentPolicy as *mut c_void,
                cb_data: std::mem::size_of::<AccentPolicy>(),
            };
            if !unsafe { set_wca(hwnd, &mut data) }.as_bool() {
                log::warn!("SetWindowCompositionAttribute rejected accent state {state}");
            }
        }
        None => {
            // Windows 7 path.
            let blur_behind = DWM_BLURBEHIND {
                dwFlags: DWM_BB_ENABLE,
                fEnable: BOOL::from(enable),
                ..Default::default()
            };
            if let Err(err) = unsafe { DwmEnableBlurBehindWindow(hwnd, &blur_behind) } {
                log::warn!("DwmEnableBlurBehindWindow failed for {hwnd:?}: {err}");
            }
        }
    }
}

/// Work area of the monitor the window currently occupies.
pub(crate) fn monitor_work_area(hwnd: HWND) -> Option<(RECT, RECT)> {
    let monitor = unsafe { MonitorFromWindow(hwnd, MONITOR_DEFAULTTONEAREST) };
    if monitor.is_invalid() {
        return None;
    }
    let mut info = MONITORINFO {
        cbSize: std::mem::size_of::<MONITORINFO>() as u32,
        ..Default::default()
    };
    unsafe { GetMonitorInfoW(monitor, &mut info) }
        .as_bool()
        .then_some((info.rcWork, info.rcMonitor))
}

/// Edge (ABE_*) of an auto-hiding taskbar overlapping the given monitor
/// rect, if there is one. Used to leave a 1px gutter so the hidden taskbar
/// can still fly out over a maximized frameless window.
pub(crate) fn autohide_taskbar_edge(monitor_rect: RECT) -> Option<u32> {
    let mut appbar = APPBARDATA {
        cbSize: std::mem::size_of::<APPBARDATA>() as u32,
        ..Default::default()
    };
    let state = unsafe { SHAppBarMessage(ABM_GETSTATE, &mut appbar) } as u32;
    if state & ABS_AUTOHIDE == 0 {
        return None;
    }
    let mut taskbar = APPBARDATA {
        cbSize: std::mem::size_of::<APPBARDATA>() as u32,
        ..Default::default()
    };
    if unsafe { SHAppBarMessage(ABM_GETTASKBARPOS, &mut taskbar) } == 0 {
        return None;
    }
    let rc = taskbar.rc;
    let intersects = rc.left < monitor_rect.right
        && rc.right > monitor_rect.left
        && rc.top < monitor_rect.bottom
        && rc.bottom > monitor_rect.top;
    intersects.then_some(taskbar.uEdge)
}

fn hwnd_from(window: WindowId) -> Option<HWND> {
    (!window.is_null()).then(|| HWND(window.0 as *mut c_void))
}

/// Forces a WM_NCCALCSIZE round-trip without moving, resizing, or activating
/// the window. Called after attach; host adapters call it from their
/// screen-changed signal so a monitor move recomputes the frame. Null ids
/// are a no-op.
pub fn trigger_frame_change(window: WindowId) {
    let Some(hwnd) = hwnd_from(window) else {
        return;
    };
    unsafe {
        if let Err(err) = SetWindowPos(
            hwnd,
            None,
            0,
            0,
            0,
            0,
            SWP_FRAMECHANGED
                | SWP_NOMOVE
                | SWP_NOSIZE
                | SWP_NOZORDER
                | SWP_NOOWNERZORDER
                | SWP_NOACTIVATE,
        ) {
            log::warn!("trigger_frame_change failed for {hwnd:?}: {err}");
        }
    }
}

/// Hands the current drag to the OS move loop. The Win32 building block for
/// a host adapter's `WindowParams::start_system_move`.
pub fn start_system_move(window: WindowId) {
    let Some(hwnd) = hwnd_from(window) else {
        return;
    };
    unsafe {
        let _ = ReleaseCapture();
        SendMessageW(
            hwnd,
            WM_NCLBUTTONDOWN,
            Some(WPARAM(HTCAPTION_CODE as usize)),
            Some(LPARAM(0)),
        );
    }
}

/// Hands off to the OS resize loop for the given edge set; an empty or
/// contradictory set, or a null id, is a no-op. Counterpart of
/// `start_system_move` for `WindowParams::start_system_resize`.
pub fn start_system_resize(window: WindowId, edges: ResizeEdges) {
    let Some(code) = ht_code_for_edges(edges) else {
        return;
    };
    let Some(hwnd) = hwnd_from(window) else {
        return;
    };
    unsafe {
        let _ = ReleaseCapture();
        SendMessageW(
            hwnd,
            WM_NCLBUTTONDOWN,
            Some(WPARAM(code as usize)),
            Some(LPARAM(0)),
        );
    }
}

fn ht_code_for_edges(edges: ResizeEdges) -> Option<u32> {
    let top = edges.contains(ResizeEdges::TOP);
    let bottom = edges.contains(ResizeEdges::BOTTOM);
    let left = edges.contains(ResizeEdges::LEFT);
    let right = edges.contains(ResizeEdges::RIGHT);
    match (top, bottom, left, right) {
        (true, false, true, false) => Some(HTTOPLEFT_CODE),
        (true, false, false, true) => Some(HTTOPRIGHT_CODE),
        (false, true, true, false) => Some(HTBOTTOMLEFT_CODE),
        (false, true, false, true) => Some(HTBOTTOMRIGHT_CODE),
        (true, false, false, false) => Some(HTTOP_CODE),
        (false, true, false, false) => Some(HTBOTTOM_CODE),
        (false, false, true, false) => Some(HTLEFT_CODE),
        (false, false, false, true) => Some(HTRIGHT_CODE),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ht_code_for_edges_covers_all_valid_sets() {
        assert_eq!(
            ht_code_for_edges(ResizeEdges::TOP | ResizeEdges::LEFT),
            Some(HTTOPLEFT_CODE)
        );
        assert_eq!(
            ht_code_for_edges(ResizeEdges::BOTTOM | ResizeEdges::RIGHT),
            Some(HTBOTTOMRIGHT_CODE)
        );
        assert_eq!(ht_code_for_edges(ResizeEdges::TOP), Some(HTTOP_CODE));
        assert_eq!(ht_code_for_edges(ResizeEdges::LEFT), Some(HTLEFT_CODE));
        // Empty or contradictory sets refuse the handoff.
        assert_eq!(ht_code_for_edges(ResizeEdges::NONE), None);
        assert_eq!(
            ht_code_for_edges(ResizeEdges::TOP | ResizeEdges::BOTTOM),
            None
        );
    }

    #[test]
    fn test_windows_version_ordering() {
        assert!(WindowsVersion::WIN10_1709 > WindowsVersion::WIN10);
        assert!(WindowsVersion::WIN10 > WindowsVersion::WIN8);
        let win7 = WindowsVersion {
            major: 6,
            minor: 1,
            build: 7601,
        };
        assert!(win7 < WindowsVersion::WIN8);
    }

    #[test]
    // Enable and disable take the same mechanism on every build; Win7 routes
    // both through the legacy DWM call.
    fn test_accent_state_version_routing() {
        let win7 = WindowsVersion {
            major: 6,
            minor: 1,
            build: 7601,
        };
        assert_eq!(accent_state_for(win7, true), None);
        assert_eq!(accent_state_for(win7, false), None);
        assert_eq!(
            accent_state_for(WindowsVersion::WIN8, true),
            Some(ACCENT_ENABLE_TRANSPARENTGRADIENT)
        );
        assert_eq!(
            accent_state_for(WindowsVersion::WIN8, false),
            Some(ACCENT_DISABLED)
        );
        assert_eq!(
            accent_state_for(WindowsVersion::WIN10, true),
            Some(ACCENT_ENABLE_BLURBEHIND)
        );
        assert_eq!(
            accent_state_for(WindowsVersion::WIN10_1709, true),
            Some(ACCENT_ENABLE_ACRYLICBLURBEHIND)
        );
        assert_eq!(
            accent_state_for(WindowsVersion::WIN10_1709, false),
            Some(ACCENT_DISABLED)
        );
    }

    #[test]
    // Null window ids and empty edge sets bail out before any handle is
    // touched, so the handoff entry points are safe for defensive callers.
    fn test_system_handoff_guards_null_and_empty_inputs() {
        start_system_move(WindowId(0));
        start_system_resize(WindowId(0), ResizeEdges::LEFT);
        start_system_resize(WindowId(0x1234), ResizeEdges::NONE);
        start_system_resize(
            WindowId(0x1234),
            ResizeEdges::TOP | ResizeEdges::BOTTOM,
        );
        trigger_frame_change(WindowId(0));
    }
}
