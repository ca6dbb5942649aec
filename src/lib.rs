/*
 * Provides the public entry point for the chromeless crate, a native
 * frameless-window layer: nonclient hit-testing, frame removal, DPI-aware
 * frame metrics, and system theme tracking behind one registry-based API.
 *
 * The library exposes only the safe surface (`WindowRegistry`, `WindowParams`,
 * `ThemeWatcher`, `Config`) while keeping OS internals scoped to the crate.
 * Conditional compilation keeps portable pieces (types, the hit-test core,
 * the generic input filter) available on every platform so non-Windows builds
 * can still compile and test logic that depends on these types.
 */
pub mod config;
pub mod error;
pub(crate) mod generic_interceptor;
pub mod interceptor;
#[cfg(target_os = "macos")]
pub(crate) mod mac_interceptor;
pub mod params;
pub mod registry;
pub mod theme;
#[cfg(target_os = "macos")]
pub(crate) mod theme_probe_macos;
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
pub(crate) mod theme_probe_stub;
#[cfg(target_os = "windows")]
pub(crate) mod theme_probe_windows;
#[cfg(target_os = "macos")]
pub(crate) use theme_probe_macos as theme_probe;
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
pub(crate) use theme_probe_stub as theme_probe;
#[cfg(target_os = "windows")]
pub(crate) use theme_probe_windows as theme_probe;
pub mod types;
#[cfg(target_os = "windows")]
pub(crate) mod win_dwm;
#[cfg(target_os = "windows")]
pub(crate) mod win_interceptor;

pub use config::{Config, ConfigOption};
pub use error::{PlatformError, Result as PlatformResult};
pub use hit_test::{HitTestContext, classify_point, is_in_title_bar};
pub use interceptor::{InputEvent, Interceptor, MouseButton};
pub use params::WindowParams;
pub use registry::{AddOutcome, RegisteredWindow, RemoveOutcome, WindowRegistry};
pub use theme::{ThemeEvent, ThemeListener, ThemeProbe, ThemeWatcher};
pub use types::{
    AccentColor, ColorizationArea, CursorShape, FrameMetrics, HitTestResult, Point, Rect,
    ResizeEdges, Size, SystemButton, SystemTheme, ThemeSnapshot, WallpaperAspectStyle, WindowId,
    WindowOptions, WindowSettings, WindowState,
};
// Win32 building blocks for host adapters: native move/resize handoff for
// their `WindowParams` implementation, and the frame recalc to call from a
// screen-changed signal.
#[cfg(target_os = "windows")]
pub use win_dwm::{start_system_move, start_system_resize, trigger_frame_change};

/// Theme watcher backed by the running platform's probe. Hosts that need a
/// synthetic probe (tests, headless builds) construct `ThemeWatcher::new`
/// with their own instead.
pub fn system_theme_watcher() -> ThemeWatcher {
    ThemeWatcher::new(Box::new(theme_probe::SystemThemeProbe::new()))
}
