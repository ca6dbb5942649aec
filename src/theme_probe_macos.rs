/*
 * macOS theme probe. Dark mode comes from the `AppleInterfaceStyle` user
 * default (absent means light), the accent from `NSColor.controlAccentColor`
 * converted through sRGB so component reads are well-defined regardless of
 * the display profile. macOS has no wallpaper aspect notion we can query
 * cheaply, so the wallpaper fields stay at their defaults.
 */

use objc2_app_kit::{NSColor, NSColorSpace};
use objc2_foundation::{NSString, NSUserDefaults};

use crate::theme::ThemeProbe;
use crate::types::{AccentColor, SystemTheme, ThemeSnapshot};

pub(crate) struct SystemThemeProbe;

impl SystemThemeProbe {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl ThemeProbe for SystemThemeProbe {
    fn current_snapshot(&self) -> ThemeSnapshot {
        ThemeSnapshot {
            system_theme: query_system_theme(),
            accent_color: query_accent_color().unwrap_or(AccentColor::NEUTRAL),
            ..ThemeSnapshot::default()
        }
    }
}

fn query_system_theme() -> SystemTheme {
    let defaults = unsafe { NSUserDefaults::standardUserDefaults() };
    let style = unsafe { defaults.stringForKey(&NSString::from_str("AppleInterfaceStyle")) };
    match style {
        Some(value) if value.to_string().eq_ignore_ascii_case("dark") => SystemTheme::Dark,
        _ => SystemTheme::Light,
    }
}

fn query_accent_color() -> Option<AccentColor> {
    let accent = unsafe { NSColor::controlAccentColor() };
    let srgb = unsafe { NSColorSpace::sRGBColorSpace() };
    let converted = unsafe { accent.colorUsingColorSpace(&srgb) }?;
    let component = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    unsafe {
        Some(AccentColor {
            r: component(converted.redComponent()),
            g: component(converted.greenComponent()),
            b: component(converted.blueComponent()),
            a: component(converted.alphaComponent()),
        })
    }
}
