/*
 * Platform-agnostic types shared by the registry, the hit-test core, the
 * interceptors, and the theme watcher. Everything here is plain data with no
 * OS dependencies so logic built on these types can compile and be tested on
 * any platform.
 *
 * All geometry is expressed in physical (device) pixels unless a function
 * explicitly documents otherwise; DPI scaling happens at the platform
 * boundary before values enter these types.
 */

use std::path::PathBuf;

/// Opaque native window handle value (HWND / NSWindow pointer / XID).
/// Equality is by raw handle value; a zero value is never a valid window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(pub isize);

impl WindowId {
    pub fn is_null(&self) -> bool {
        self.0 == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// Axis-aligned rectangle, position + extent. `right()`/`bottom()` are
/// exclusive, matching Win32 RECT conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }
}

/// Cached nonclient metrics for one window, already scaled to the window's
/// current DPI. Recomputed on WM_DPICHANGED (or the platform equivalent).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameMetrics {
    /// Thickness of the left/right resize bands.
    pub border_width: i32,
    /// Thickness of the top/bottom resize bands.
    pub border_height: i32,
    /// Height of the draggable caption strip, measured from the top edge and
    /// inclusive of the top resize band.
    pub title_bar_height: i32,
}

/// Logical (96-dpi) defaults used when the caller supplies no metrics and the
/// OS metrics are unavailable.
pub const DEFAULT_BORDER_THICKNESS: i32 = 8;
pub const DEFAULT_TITLE_BAR_HEIGHT: i32 = 32;

impl FrameMetrics {
    pub fn new(border_width: i32, border_height: i32, title_bar_height: i32) -> Self {
        Self {
            border_width,
            border_height,
            title_bar_height,
        }
    }

    /// Scales the logical default metrics by a device pixel ratio, rounding
    /// to the nearest physical pixel.
    pub fn scaled_defaults(device_pixel_ratio: f64) -> Self {
        let scale = |v: i32| ((v as f64) * device_pixel_ratio).round() as i32;
        Self {
            border_width: scale(DEFAULT_BORDER_THICKNESS),
            border_height: scale(DEFAULT_BORDER_THICKNESS),
            title_bar_height: scale(DEFAULT_TITLE_BAR_HEIGHT),
        }
    }
}

impl Default for FrameMetrics {
    fn default() -> Self {
        Self::new(
            DEFAULT_BORDER_THICKNESS,
            DEFAULT_BORDER_THICKNESS,
            DEFAULT_TITLE_BAR_HEIGHT,
        )
    }
}

/// The three caption buttons a caller can declare rectangles for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemButton {
    Minimize,
    Maximize,
    Close,
}

/// Nonclient classification of a client-space point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTestResult {
    /// Outside the window rectangle entirely.
    Nowhere,
    /// Ordinary content, no special OS handling.
    Client,
    /// Draggable title-bar strip (drag to move, double-click to maximize).
    Caption,
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    MinimizeButton,
    MaximizeButton,
    CloseButton,
}

impl HitTestResult {
    /// The resize edges this classification maps to; empty for everything
    /// that is not a resize band.
    pub fn resize_edges(&self) -> ResizeEdges {
        match self {
            HitTestResult::Left => ResizeEdges::LEFT,
            HitTestResult::Right => ResizeEdges::RIGHT,
            HitTestResult::Top => ResizeEdges::TOP,
            HitTestResult::Bottom => ResizeEdges::BOTTOM,
            HitTestResult::TopLeft => ResizeEdges::TOP | ResizeEdges::LEFT,
            HitTestResult::TopRight => ResizeEdges::TOP | ResizeEdges::RIGHT,
            HitTestResult::BottomLeft => ResizeEdges::BOTTOM | ResizeEdges::LEFT,
            HitTestResult::BottomRight => ResizeEdges::BOTTOM | ResizeEdges::RIGHT,
            _ => ResizeEdges::NONE,
        }
    }

    pub fn is_resize_border(&self) -> bool {
        !self.resize_edges().is_empty()
    }
}

/// Set of window edges participating in a system resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResizeEdges(pub u32);

impl ResizeEdges {
    pub const NONE: ResizeEdges = ResizeEdges(0);
    pub const LEFT: ResizeEdges = ResizeEdges(1 << 0);
    pub const RIGHT: ResizeEdges = ResizeEdges(1 << 1);
    pub const TOP: ResizeEdges = ResizeEdges(1 << 2);
    pub const BOTTOM: ResizeEdges = ResizeEdges(1 << 3);

    pub fn contains(&self, other: ResizeEdges) -> bool {
        (self.0 & other.0) == other.0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for ResizeEdges {
    type Output = ResizeEdges;

    fn bitor(self, rhs: ResizeEdges) -> ResizeEdges {
        ResizeEdges(self.0 | rhs.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowState {
    #[default]
    Normal,
    Minimized,
    Maximized,
    Fullscreen,
}

impl WindowState {
    /// Maximized and fullscreen windows collapse resize hit-testing the same
    /// way; both count as "expanded".
    pub fn is_expanded(&self) -> bool {
        matches!(self, WindowState::Maximized | WindowState::Fullscreen)
    }
}

/// Cursor shapes the generic interceptor may request from the host toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorShape {
    Arrow,
    /// Horizontal double arrow (left/right edges).
    SizeHorizontal,
    /// Vertical double arrow (top/bottom edges).
    SizeVertical,
    /// Diagonal, top-left to bottom-right (NW-SE).
    SizeFdiag,
    /// Diagonal, top-right to bottom-left (NE-SW).
    SizeBdiag,
}

/// Per-window behavior switches, fixed at registration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowOptions(pub u32);

impl WindowOptions {
    pub const NONE: WindowOptions = WindowOptions(0);
    /// Leave the cursor alone on hover; the host draws its own cursors.
    pub const DONT_TOUCH_CURSOR_SHAPE: WindowOptions = WindowOptions(1 << 0);
    /// Skip the right-click system menu on the caption strip.
    pub const DONT_INSTALL_SYSTEM_MENU_HOOK: WindowOptions = WindowOptions(1 << 1);
    /// Request background blur behind the window where the OS supports it.
    pub const ENABLE_BLUR_BEHIND_WINDOW: WindowOptions = WindowOptions(1 << 2);
    /// The host paints its own translucency; never engage the OS blur even
    /// when blur-behind is requested globally.
    pub const FORCE_NON_NATIVE_BACKGROUND_BLUR: WindowOptions = WindowOptions(1 << 3);

    pub fn contains(&self, other: WindowOptions) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl std::ops::BitOr for WindowOptions {
    type Output = WindowOptions;

    fn bitor(self, rhs: WindowOptions) -> WindowOptions {
        WindowOptions(self.0 | rhs.0)
    }
}

/// Immutable per-window configuration captured by `WindowRegistry::add_window`.
#[derive(Debug, Clone, Default)]
pub struct WindowSettings {
    pub options: WindowOptions,
    /// Logical title-bar height override; `None` selects the platform metric
    /// (or `DEFAULT_TITLE_BAR_HEIGHT` where no platform metric exists).
    pub title_bar_height: Option<i32>,
    /// Minimum tracking size enforced during native resize.
    pub minimum_size: Option<Size>,
    /// Client-space rectangles carved out of the caption strip (a toolbar or
    /// search box living inside the title bar).
    pub ignore_areas: Vec<Rect>,
    /// When non-empty, only these client-space rectangles drag the window;
    /// empty means the whole caption strip drags.
    pub draggable_areas: Vec<Rect>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SystemTheme {
    /// Not detected yet, or used as the "clear override" sentinel.
    #[default]
    Unknown,
    Light,
    Dark,
    HighContrast,
}

/// 8-bit RGBA accent color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccentColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl AccentColor {
    /// Mid-gray fallback when the OS exposes no accent color.
    pub const NEUTRAL: AccentColor = AccentColor {
        r: 0x80,
        g: 0x80,
        b: 0x80,
        a: 0xFF,
    };

    /// Unpacks a 0xAARRGGBB value (DWM colorization format).
    pub fn from_argb(argb: u32) -> Self {
        Self {
            a: ((argb >> 24) & 0xFF) as u8,
            r: ((argb >> 16) & 0xFF) as u8,
            g: ((argb >> 8) & 0xFF) as u8,
            b: (argb & 0xFF) as u8,
        }
    }
}

impl Default for AccentColor {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Where the OS applies the accent color. Only meaningful on Windows; other
/// platforms report `None_`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorizationArea {
    #[default]
    None_,
    StartMenuTaskbarTitleBar,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WallpaperAspectStyle {
    #[default]
    Fill,
    Fit,
    Stretch,
    Tile,
    Center,
    Span,
}

/// Point-in-time view of OS appearance state. Compared field-wise and
/// replaced as a whole by the theme watcher; consumers only ever see a
/// complete snapshot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ThemeSnapshot {
    pub system_theme: SystemTheme,
    pub accent_color: AccentColor,
    pub colorization_area: ColorizationArea,
    pub wallpaper_path: Option<PathBuf>,
    pub wallpaper_aspect_style: WallpaperAspectStyle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains_is_half_open() {
        let r = Rect::new(10, 10, 20, 20);
        assert!(r.contains(Point::new(10, 10)));
        assert!(r.contains(Point::new(29, 29)));
        assert!(!r.contains(Point::new(30, 29)));
        assert!(!r.contains(Point::new(29, 30)));
        assert!(!r.contains(Point::new(9, 15)));
    }

    #[test]
    fn test_resize_edges_compose_and_query() {
        let corner = ResizeEdges::TOP | ResizeEdges::LEFT;
        assert!(corner.contains(ResizeEdges::TOP));
        assert!(corner.contains(ResizeEdges::LEFT));
        assert!(!corner.contains(ResizeEdges::RIGHT));
        assert!(ResizeEdges::NONE.is_empty());
        assert!(!corner.is_empty());
    }

    #[test]
    fn test_hit_test_result_maps_to_resize_edges() {
        assert_eq!(
            HitTestResult::TopLeft.resize_edges(),
            ResizeEdges::TOP | ResizeEdges::LEFT
        );
        assert_eq!(HitTestResult::Bottom.resize_edges(), ResizeEdges::BOTTOM);
        assert!(HitTestResult::Caption.resize_edges().is_empty());
        assert!(HitTestResult::TopRight.is_resize_border());
        assert!(!HitTestResult::Client.is_resize_border());
    }

    #[test]
    fn test_window_options_bitmask() {
        let opts = WindowOptions::DONT_TOUCH_CURSOR_SHAPE | WindowOptions::ENABLE_BLUR_BEHIND_WINDOW;
        assert!(opts.contains(WindowOptions::DONT_TOUCH_CURSOR_SHAPE));
        assert!(!opts.contains(WindowOptions::DONT_INSTALL_SYSTEM_MENU_HOOK));
    }

    #[test]
    fn test_accent_color_from_argb_unpacks_channels() {
        let c = AccentColor::from_argb(0xC80A_7CFF);
        assert_eq!(c.a, 0xC8);
        assert_eq!(c.r, 0x0A);
        assert_eq!(c.g, 0x7C);
        assert_eq!(c.b, 0xFF);
    }

    #[test]
    fn test_scaled_defaults_round_to_physical_pixels() {
        let m = FrameMetrics::scaled_defaults(1.5);
        assert_eq!(m.border_width, 12);
        assert_eq!(m.title_bar_height, 48);
        let unscaled = FrameMetrics::scaled_defaults(1.0);
        assert_eq!(unscaled, FrameMetrics::default());
    }

    #[test]
    fn test_window_state_expanded_covers_fullscreen() {
        assert!(WindowState::Maximized.is_expanded());
        assert!(WindowState::Fullscreen.is_expanded());
        assert!(!WindowState::Normal.is_expanded());
    }
}
