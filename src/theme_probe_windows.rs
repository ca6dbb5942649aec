/*
 * Windows theme probe. Reads appearance state straight from the OS on every
 * call: high contrast via SystemParametersInfo, dark mode and colorization
 * prevalence from the per-user registry, the accent color from DWM, and the
 * wallpaper from SystemParametersInfo plus the desktop registry key.
 *
 * Every query degrades independently; a failed read falls back to the
 * documented defaults instead of failing the snapshot.
 */

use std::ffi::c_void;
use std::path::PathBuf;

use windows::Win32::{
    Foundation::ERROR_SUCCESS,
    Graphics::Dwm::DwmGetColorizationColor,
    System::Registry::{HKEY_CURRENT_USER, RRF_RT_REG_DWORD, RRF_RT_REG_SZ, RegGetValueW},
    UI::Accessibility::{HCF_HIGHCONTRASTON, HIGHCONTRASTW},
    UI::WindowsAndMessaging::{
        SPI_GETDESKWALLPAPER, SPI_GETHIGHCONTRAST, SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS,
        SystemParametersInfoW,
    },
};
use windows::core::{BOOL, PCWSTR, w};

use crate::theme::ThemeProbe;
use crate::types::{
    AccentColor, ColorizationArea, SystemTheme, ThemeSnapshot, WallpaperAspectStyle,
};

const PERSONALIZE_KEY: PCWSTR =
    w!("Software\\Microsoft\\Windows\\CurrentVersion\\Themes\\Personalize");
const DWM_KEY: PCWSTR = w!("Software\\Microsoft\\Windows\\DWM");
const DESKTOP_KEY: PCWSTR = w!("Control Panel\\Desktop");

pub(crate) struct SystemThemeProbe;

impl SystemThemeProbe {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl ThemeProbe for SystemThemeProbe {
    fn current_snapshot(&self) -> ThemeSnapshot {
        let high_contrast = query_high_contrast();
        let apps_use_light = read_registry_dword(PERSONALIZE_KEY, w!("AppsUseLightTheme"));
        let (wallpaper_path, wallpaper_aspect_style) = query_wallpaper();
        ThemeSnapshot {
            system_theme: resolve_system_theme(high_contrast, apps_use_light),
            accent_color: query_accent_color(),
            colorization_area: resolve_colorization_area(
                read_registry_dword(DWM_KEY, w!("ColorPrevalence")),
                read_registry_dword(PERSONALIZE_KEY, w!("ColorPrevalence")),
            ),
            wallpaper_path,
            wallpaper_aspect_style,
        }
    }
}

fn query_high_contrast() -> bool {
    let mut hc = HIGHCONTRASTW {
        cbSize: std::mem::size_of::<HIGHCONTRASTW>() as u32,
        ..Default::default()
    };
    let ok = unsafe {
        SystemParametersInfoW(
            SPI_GETHIGHCONTRAST,
            hc.cbSize,
            Some(&mut hc as *mut HIGHCONTRASTW as *mut c_void),
            SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS(0),
        )
    };
    match ok {
        Ok(()) => hc.dwFlags.contains(HCF_HIGHCONTRASTON),
        Err(err) => {
            log::warn!("SPI_GETHIGHCONTRAST failed, assuming off: {err}");
            false
        }
    }
}

fn query_accent_color() -> AccentColor {
    let mut colorization: u32 = 0;
    let mut opaque_blend = BOOL(0);
    match unsafe { DwmGetColorizationColor(&mut colorization, &mut opaque_blend) } {
        Ok(()) => AccentColor::from_argb(colorization),
        Err(err) => {
            log::warn!("DwmGetColorizationColor failed, using neutral accent: {err}");
            AccentColor::NEUTRAL
        }
    }
}

fn query_wallpaper() -> (Option<PathBuf>, WallpaperAspectStyle) {
    let mut buffer = [0u16; 512];
    let path = unsafe {
        SystemParametersInfoW(
            SPI_GETDESKWALLPAPER,
            buffer.len() as u32,
            Some(buffer.as_mut_ptr() as *mut c_void),
            SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS(0),
        )
    }
    .ok()
    .and_then(|_| {
        let len = buffer.iter().position(|&c| c == 0).unwrap_or(buffer.len());
        if len == 0 {
            None
        } else {
            Some(PathBuf::from(String::from_utf16_lossy(&buffer[..len])))
        }
    });
    let style = read_registry_string(DESKTOP_KEY, w!("WallpaperStyle"));
    let tile = read_registry_string(DESKTOP_KEY, w!("TileWallpaper"));
    (
        path,
        resolve_wallpaper_aspect_style(style.as_deref(), tile.as_deref()),
    )
}

fn resolve_system_theme(high_contrast: bool, apps_use_light_theme: Option<u32>) -> SystemTheme {
    if high_contrast {
        return SystemTheme::HighContrast;
    }
    match apps_use_light_theme {
        Some(0) => SystemTheme::Dark,
        Some(_) => SystemTheme::Light,
        // Missing value means a pre-1809 system that only knows light mode.
        None => SystemTheme::Light,
    }
}

fn resolve_colorization_area(
    dwm_prevalence: Option<u32>,
    personalize_prevalence: Option<u32>,
) -> ColorizationArea {
    let dwm = dwm_prevalence.unwrap_or(0) != 0;
    let personalize = personalize_prevalence.unwrap_or(0) != 0;
    if dwm && personalize {
        ColorizationArea::All
    } else if personalize {
        ColorizationArea::StartMenuTaskbarTitleBar
    } else {
        ColorizationArea::None_
    }
}

/// Maps the `Control Panel\Desktop` registry pair to an aspect style. The
/// tile flag wins over the style value, mirroring how the shell interprets
/// the pair.
fn resolve_wallpaper_aspect_style(
    style: Option<&str>,
    tile: Option<&str>,
) -> WallpaperAspectStyle {
    if tile == Some("1") {
        return WallpaperAspectStyle::Tile;
    }
    match style {
        Some("0") => WallpaperAspectStyle::Center,
        Some("2") => WallpaperAspectStyle::Stretch,
        Some("6") => WallpaperAspectStyle::Fit,
        Some("10") => WallpaperAspectStyle::Fill,
        Some("22") => WallpaperAspectStyle::Span,
        _ => WallpaperAspectStyle::Fill,
    }
}

fn read_registry_dword(subkey: PCWSTR, value: PCWSTR) -> Option<u32> {
    let mut data: u32 = 0;
    let mut size = std::mem::size_of::<u32>() as u32;
    let status = unsafe {
        RegGetValueW(
            HKEY_CURRENT_USER,
            subkey,
            value,
            RRF_RT_REG_DWORD,
            None,
            Some(&mut data as *mut u32 as *mut c_void),
            Some(&mut size),
        )
    };
    (status == ERROR_SUCCESS).then_some(data)
}

fn read_registry_string(subkey: PCWSTR, value: PCWSTR) -> Option<String> {
    let mut buffer = [0u16; 128];
    let mut size = (buffer.len() * 2) as u32;
    let status = unsafe {
        RegGetValueW(
            HKEY_CURRENT_USER,
            subkey,
            value,
            RRF_RT_REG_SZ,
            None,
            Some(buffer.as_mut_ptr() as *mut c_void),
            Some(&mut size),
        )
    };
    if status != ERROR_SUCCESS {
        return None;
    }
    let len = buffer.iter().position(|&c| c == 0).unwrap_or(buffer.len());
    Some(String::from_utf16_lossy(&buffer[..len]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_high_contrast_wins_over_dark_mode() {
        assert_eq!(
            resolve_system_theme(true, Some(0)),
            SystemTheme::HighContrast
        );
        assert_eq!(resolve_system_theme(false, Some(0)), SystemTheme::Dark);
        assert_eq!(resolve_system_theme(false, Some(1)), SystemTheme::Light);
        assert_eq!(resolve_system_theme(false, None), SystemTheme::Light);
    }

    #[test]
    fn test_colorization_area_resolution() {
        assert_eq!(
            resolve_colorization_area(Some(1), Some(1)),
            ColorizationArea::All
        );
        assert_eq!(
            resolve_colorization_area(Some(0), Some(1)),
            ColorizationArea::StartMenuTaskbarTitleBar
        );
        assert_eq!(
            resolve_colorization_area(Some(1), Some(0)),
            ColorizationArea::None_
        );
        assert_eq!(resolve_colorization_area(None, None), ColorizationArea::None_);
    }

    #[test]
    fn test_wallpaper_aspect_style_mapping() {
        assert_eq!(
            resolve_wallpaper_aspect_style(Some("10"), Some("0")),
            WallpaperAspectStyle::Fill
        );
        assert_eq!(
            resolve_wallpaper_aspect_style(Some("0"), Some("1")),
            WallpaperAspectStyle::Tile
        );
        assert_eq!(
            resolve_wallpaper_aspect_style(Some("6"), None),
            WallpaperAspectStyle::Fit
        );
        assert_eq!(
            resolve_wallpaper_aspect_style(Some("22"), Some("0")),
            WallpaperAspectStyle::Span
        );
        assert_eq!(
            resolve_wallpaper_aspect_style(None, None),
            WallpaperAspectStyle::Fill
        );
    }
}
