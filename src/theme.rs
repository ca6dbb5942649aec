/*
 * Theme watcher: owns the process's current `ThemeSnapshot`, recomputes it
 * when a platform interceptor reports an OS appearance notification, and
 * tells subscribers when something actually changed.
 *
 * Like the registry this is an explicitly owned service, constructed once at
 * the composition root with the platform's probe injected. The snapshot and
 * the override flag live behind one mutex; compare-and-replace happens wholly
 * inside it, and listeners run after it is released so a subscriber can call
 * back into the watcher without deadlocking.
 */

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::types::{SystemTheme, ThemeSnapshot};

/// Synchronous query of current OS appearance state. No caching: every call
/// re-reads the OS. Failures degrade to the documented defaults (Light theme,
/// neutral accent) instead of erroring.
pub trait ThemeProbe: Send + Sync {
    fn current_snapshot(&self) -> ThemeSnapshot;
}

/// Payload-free change notifications; consumers re-read `snapshot()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeEvent {
    SystemThemeChanged,
    WallpaperChanged,
}

pub type ThemeListener = Arc<dyn Fn(ThemeEvent) + Send + Sync>;

struct ThemeState {
    snapshot: ThemeSnapshot,
    override_theme: Option<SystemTheme>,
}

pub struct ThemeWatcher {
    probe: Box<dyn ThemeProbe>,
    state: Mutex<ThemeState>,
    listeners: Mutex<Vec<ThemeListener>>,
}

impl ThemeWatcher {
    pub fn new(probe: Box<dyn ThemeProbe>) -> Self {
        let snapshot = probe.current_snapshot();
        Self {
            probe,
            state: Mutex::new(ThemeState {
                snapshot,
                override_theme: None,
            }),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Complete copy of the stored snapshot. Fields are only ever replaced
    /// together, so a caller never sees a half-updated set.
    pub fn snapshot(&self) -> ThemeSnapshot {
        self.lock_state().snapshot.clone()
    }

    /// Effective theme: the override while one is active, else the detected
    /// value.
    pub fn system_theme(&self) -> SystemTheme {
        let state = self.lock_state();
        state.override_theme.unwrap_or(state.snapshot.system_theme)
    }

    pub fn subscribe(&self, listener: ThemeListener) {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(listener);
    }

    /// Recomputes theme, accent, and colorization area, replacing them as a
    /// set when any differs. Fires at most one `SystemThemeChanged`; while an
    /// override is active the new detected values are stored silently.
    pub fn refresh(&self) {
        let current = self.probe.current_snapshot();
        let notify = {
            let mut state = self.lock_state();
            let changed = state.snapshot.system_theme != current.system_theme
                || state.snapshot.accent_color != current.accent_color
                || state.snapshot.colorization_area != current.colorization_area;
            if changed {
                state.snapshot.system_theme = current.system_theme;
                state.snapshot.accent_color = current.accent_color;
                state.snapshot.colorization_area = current.colorization_area;
            }
            changed && state.override_theme.is_none()
        };
        if notify {
            self.emit(ThemeEvent::SystemThemeChanged);
        }
    }

    /// Wallpaper counterpart of `refresh`; the two field groups change on
    /// unrelated OS notifications so they compare independently.
    pub fn refresh_wallpaper(&self) {
        let current = self.probe.current_snapshot();
        let notify = {
            let mut state = self.lock_state();
            let changed = state.snapshot.wallpaper_path != current.wallpaper_path
                || state.snapshot.wallpaper_aspect_style != current.wallpaper_aspect_style;
            if changed {
                state.snapshot.wallpaper_path = current.wallpaper_path;
                state.snapshot.wallpaper_aspect_style = current.wallpaper_aspect_style;
            }
            changed
        };
        if notify {
            self.emit(ThemeEvent::WallpaperChanged);
        }
    }

    /// Forces the effective theme. `Unknown` clears the override, notifying
    /// whenever one was actually active; consumers treat the clear itself as
    /// observable even when the detected theme happens to match. A value
    /// equal to the current effective theme is a no-op; any other value fires
    /// exactly one notification.
    pub fn set_override_theme(&self, theme: SystemTheme) {
        let notify = {
            let mut state = self.lock_state();
            let effective = state.override_theme.unwrap_or(state.snapshot.system_theme);
            if theme == SystemTheme::Unknown {
                state.override_theme.take().is_some()
            } else if theme == effective {
                false
            } else {
                state.override_theme = Some(theme);
                true
            }
        };
        if notify {
            self.emit(ThemeEvent::SystemThemeChanged);
        }
    }

    pub fn is_theme_overridden(&self) -> bool {
        self.lock_state().override_theme.is_some()
    }

    fn emit(&self, event: ThemeEvent) {
        // Copy the listener handles out so user callbacks run without any
        // watcher lock held.
        let listeners: Vec<ThemeListener> = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for listener in listeners {
            listener(event);
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, ThemeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AccentColor, ColorizationArea, WallpaperAspectStyle};
    use std::path::PathBuf;

    /// Probe fake whose snapshot the test mutates between refreshes.
    struct FakeProbe {
        snapshot: Mutex<ThemeSnapshot>,
    }

    impl FakeProbe {
        fn new(snapshot: ThemeSnapshot) -> Arc<Self> {
            Arc::new(Self {
                snapshot: Mutex::new(snapshot),
            })
        }

        fn set(&self, snapshot: ThemeSnapshot) {
            *self.snapshot.lock().unwrap() = snapshot;
        }
    }

    impl ThemeProbe for Arc<FakeProbe> {
        fn current_snapshot(&self) -> ThemeSnapshot {
            self.snapshot.lock().unwrap().clone()
        }
    }

    fn light_snapshot() -> ThemeSnapshot {
        ThemeSnapshot {
            system_theme: SystemTheme::Light,
            accent_color: AccentColor::from_argb(0xFF00_78D4),
            colorization_area: ColorizationArea::None_,
            wallpaper_path: Some(PathBuf::from("/tmp/wall.jpg")),
            wallpaper_aspect_style: WallpaperAspectStyle::Fill,
        }
    }

    struct Harness {
        probe: Arc<FakeProbe>,
        watcher: Arc<ThemeWatcher>,
        events: Arc<Mutex<Vec<ThemeEvent>>>,
    }

    fn harness() -> Harness {
        let probe = FakeProbe::new(light_snapshot());
        let watcher = Arc::new(ThemeWatcher::new(Box::new(probe.clone())));
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        watcher.subscribe(Arc::new(move |event| {
            sink.lock().unwrap().push(event);
        }));
        Harness {
            probe,
            watcher,
            events,
        }
    }

    #[test]
    // [CHL-ThemeSnapshotV1] No OS change means no notification and a
    // field-wise identical snapshot.
    fn test_refresh_without_change_is_silent() {
        let h = harness();
        let before = h.watcher.snapshot();
        h.watcher.refresh();
        h.watcher.refresh_wallpaper();
        assert_eq!(h.watcher.snapshot(), before);
        assert!(h.events.lock().unwrap().is_empty());
    }

    #[test]
    // A single changed field produces exactly one notification, and the
    // snapshot seen afterwards carries the whole new set.
    fn test_accent_change_notifies_once_with_atomic_snapshot() {
        let h = harness();
        let mut changed = light_snapshot();
        changed.accent_color = AccentColor::from_argb(0xFFE8_1123);
        h.probe.set(changed.clone());
        // Act
        h.watcher.refresh();
        // Assert
        assert_eq!(
            h.events.lock().unwrap().as_slice(),
            &[ThemeEvent::SystemThemeChanged]
        );
        let snapshot = h.watcher.snapshot();
        assert_eq!(snapshot.accent_color, changed.accent_color);
        assert_eq!(snapshot.system_theme, SystemTheme::Light);
        // A second refresh against the same OS state stays silent.
        h.watcher.refresh();
        assert_eq!(h.events.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_wallpaper_change_fires_wallpaper_event_only() {
        let h = harness();
        let mut changed = light_snapshot();
        changed.wallpaper_path = Some(PathBuf::from("/tmp/other.png"));
        changed.wallpaper_aspect_style = WallpaperAspectStyle::Tile;
        h.probe.set(changed);
        // refresh() only looks at theme fields; the wallpaper path must not
        // leak a SystemThemeChanged.
        h.watcher.refresh();
        assert!(h.events.lock().unwrap().is_empty());
        h.watcher.refresh_wallpaper();
        assert_eq!(
            h.events.lock().unwrap().as_slice(),
            &[ThemeEvent::WallpaperChanged]
        );
        assert_eq!(
            h.watcher.snapshot().wallpaper_aspect_style,
            WallpaperAspectStyle::Tile
        );
    }

    #[test]
    // [CHL-ThemeOverrideV1] Override equal to the effective theme is a no-op.
    fn test_override_equal_to_effective_theme_is_noop() {
        let h = harness();
        h.watcher.set_override_theme(SystemTheme::Light);
        assert!(h.events.lock().unwrap().is_empty());
        assert!(!h.watcher.is_theme_overridden());
        assert_eq!(h.watcher.system_theme(), SystemTheme::Light);
    }

    #[test]
    fn test_override_takes_priority_and_suppresses_detection_events() {
        let h = harness();
        h.watcher.set_override_theme(SystemTheme::Dark);
        assert_eq!(
            h.events.lock().unwrap().as_slice(),
            &[ThemeEvent::SystemThemeChanged]
        );
        assert_eq!(h.watcher.system_theme(), SystemTheme::Dark);

        // An OS flip to high contrast is stored but not announced while the
        // override is active.
        let mut changed = light_snapshot();
        changed.system_theme = SystemTheme::HighContrast;
        h.probe.set(changed);
        h.watcher.refresh();
        assert_eq!(h.events.lock().unwrap().len(), 1);
        assert_eq!(h.watcher.system_theme(), SystemTheme::Dark);
        assert_eq!(h.watcher.snapshot().system_theme, SystemTheme::HighContrast);
    }

    #[test]
    fn test_clearing_override_notifies_when_detected_differs() {
        let h = harness();
        h.watcher.set_override_theme(SystemTheme::Dark);
        h.events.lock().unwrap().clear();
        // Detected theme is Light, override is Dark: clearing changes the
        // effective theme and must announce it.
        h.watcher.set_override_theme(SystemTheme::Unknown);
        assert_eq!(
            h.events.lock().unwrap().as_slice(),
            &[ThemeEvent::SystemThemeChanged]
        );
        assert!(!h.watcher.is_theme_overridden());
        assert_eq!(h.watcher.system_theme(), SystemTheme::Light);
    }

    #[test]
    // Clearing an active override is itself observable, even when the
    // override happens to equal the detected theme.
    fn test_clearing_active_override_always_notifies() {
        let h = harness();
        let mut dark = light_snapshot();
        dark.system_theme = SystemTheme::Dark;
        h.probe.set(dark);
        h.watcher.refresh();
        // Detour through HighContrast so Dark installs as a real override
        // instead of being folded into the equal-to-effective no-op.
        h.watcher.set_override_theme(SystemTheme::HighContrast);
        h.watcher.set_override_theme(SystemTheme::Dark);
        h.events.lock().unwrap().clear();
        // Act
        h.watcher.set_override_theme(SystemTheme::Unknown);
        // Assert
        assert_eq!(
            h.events.lock().unwrap().as_slice(),
            &[ThemeEvent::SystemThemeChanged]
        );
        assert!(!h.watcher.is_theme_overridden());
        assert_eq!(h.watcher.system_theme(), SystemTheme::Dark);
    }

    #[test]
    fn test_clearing_without_active_override_is_noop() {
        let h = harness();
        h.watcher.set_override_theme(SystemTheme::Unknown);
        assert!(h.events.lock().unwrap().is_empty());
    }
}
