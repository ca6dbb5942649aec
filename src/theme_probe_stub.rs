/*
 * Fallback theme probe for platforms without a native implementation.
 * Reports the documented degraded defaults so portable consumers always get
 * a complete snapshot.
 */

use crate::theme::ThemeProbe;
use crate::types::{SystemTheme, ThemeSnapshot};

pub(crate) struct SystemThemeProbe;

impl SystemThemeProbe {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl ThemeProbe for SystemThemeProbe {
    fn current_snapshot(&self) -> ThemeSnapshot {
        ThemeSnapshot {
            system_theme: SystemTheme::Light,
            ..ThemeSnapshot::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AccentColor;

    #[test]
    fn test_stub_reports_light_with_neutral_accent() {
        let snapshot = SystemThemeProbe::new().current_snapshot();
        assert_eq!(snapshot.system_theme, SystemTheme::Light);
        assert_eq!(snapshot.accent_color, AccentColor::NEUTRAL);
        assert!(snapshot.wallpaper_path.is_none());
    }
}
