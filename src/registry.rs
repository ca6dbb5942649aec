/*
 * Process-wide window registry: one record per registered window, holding the
 * captured settings, the capability table, and the attached interceptor.
 *
 * The registry is an explicitly owned service: the embedding application
 * constructs it once at its composition root and passes references down.
 * A single mutex serializes add/remove/lookup/dispatch so registration racing
 * a native event for the same window can never observe a half-built record.
 */

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::{Config, ConfigOption};
use crate::generic_interceptor::GenericInterceptor;
use crate::interceptor::{InputEvent, Interceptor};
use crate::params::WindowParams;
use crate::theme::ThemeWatcher;
use crate::types::{WindowId, WindowSettings};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// The id already has a live record; nothing was attached twice.
    AlreadyRegistered,
    /// Null handle or interceptor attachment refused the window.
    InvalidWindow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    NotFound,
}

/// Read-only view of one record, cheap to hand out under the lock.
#[derive(Debug, Clone)]
pub struct RegisteredWindow {
    pub settings: WindowSettings,
    /// Fixed-size flag as captured at registration time.
    pub fixed_size: bool,
}

struct WindowRecord {
    settings: WindowSettings,
    #[allow(dead_code)]
    params: Arc<dyn WindowParams>,
    interceptor: Box<dyn Interceptor>,
    fixed_size: bool,
}

type InterceptorFactory = Box<
    dyn Fn(
            WindowSettings,
            Arc<dyn WindowParams>,
            Option<Arc<ThemeWatcher>>,
        ) -> Box<dyn Interceptor>
        + Send
        + Sync,
>;

/// Config-derived knobs the native interceptors need at attach time.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(not(target_os = "windows"), allow(dead_code))]
struct PlatformTuning {
    use_portable: bool,
    snap_layouts_disabled: bool,
    blur_behind: bool,
}

pub struct WindowRegistry {
    factory: InterceptorFactory,
    theme_watcher: Option<Arc<ThemeWatcher>>,
    windows: Mutex<HashMap<WindowId, WindowRecord>>,
}

impl WindowRegistry {
    /// Builds the registry with the interception strategy selected by the
    /// config toggle: native message hook where one exists, otherwise the
    /// portable event filter. The toggle is read once, here.
    ///
    /// When a theme watcher is supplied, native interceptors forward OS
    /// appearance notifications to it.
    pub fn new(config: &mut Config, theme_watcher: Option<Arc<ThemeWatcher>>) -> Self {
        config.load();
        let tuning = PlatformTuning {
            use_portable: config.is_set(ConfigOption::UseCrossPlatformImplementation),
            snap_layouts_disabled: config.is_set(ConfigOption::DisableWindowsSnapLayout),
            blur_behind: config.is_set(ConfigOption::EnableBlurBehindWindow),
        };
        let mut registry = Self::with_factory(platform_factory(tuning));
        registry.theme_watcher = theme_watcher;
        registry
    }

    fn with_factory(factory: InterceptorFactory) -> Self {
        Self {
            factory,
            theme_watcher: None,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Registers a window and attaches its interceptor. Idempotent per id:
    /// the second call is `AlreadyRegistered` and changes nothing.
    pub fn add_window(
        &self,
        settings: WindowSettings,
        params: Arc<dyn WindowParams>,
    ) -> AddOutcome {
        let id = params.window_id();
        if id.is_null() {
            log::warn!("add_window rejected: null window id");
            return AddOutcome::InvalidWindow;
        }
        let mut windows = self.lock_windows();
        if windows.contains_key(&id) {
            return AddOutcome::AlreadyRegistered;
        }
        let mut interceptor =
            (self.factory)(settings.clone(), params.clone(), self.theme_watcher.clone());
        if let Err(err) = interceptor.attach() {
            log::warn!("add_window failed to attach interceptor for {id:?}: {err}");
            return AddOutcome::InvalidWindow;
        }
        let fixed_size = params.is_fixed_size();
        windows.insert(
            id,
            WindowRecord {
                settings,
                params,
                interceptor,
                fixed_size,
            },
        );
        AddOutcome::Added
    }

    /// Detaches and drops the record. Safe during window teardown; removing
    /// an unknown id is a no-op reporting `NotFound`.
    pub fn remove_window(&self, id: WindowId) -> RemoveOutcome {
        let mut windows = self.lock_windows();
        match windows.remove(&id) {
            Some(mut record) => {
                record.interceptor.detach();
                RemoveOutcome::Removed
            }
            None => RemoveOutcome::NotFound,
        }
    }

    pub fn lookup(&self, id: WindowId) -> Option<RegisteredWindow> {
        let windows = self.lock_windows();
        windows.get(&id).map(|record| RegisteredWindow {
            settings: record.settings.clone(),
            fixed_size: record.fixed_size,
        })
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.lock_windows().contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.lock_windows().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_windows().is_empty()
    }

    /// Offers a toolkit input event to the window's interceptor. A missing
    /// record means "not our window": the event is reported unhandled so the
    /// host processes it normally. This is what makes removal safe to race
    /// with in-flight dispatch.
    pub fn dispatch_event(&self, id: WindowId, event: &InputEvent) -> bool {
        let mut windows = self.lock_windows();
        match windows.get_mut(&id) {
            Some(record) => record.interceptor.handle_event(event),
            None => false,
        }
    }

    fn lock_windows(&self) -> MutexGuard<'_, HashMap<WindowId, WindowRecord>> {
        // A panicking interceptor must not brick every other window.
        self.windows.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn platform_factory(tuning: PlatformTuning) -> InterceptorFactory {
    if !tuning.use_portable {
        #[cfg(target_os = "windows")]
        return Box::new(move |settings, params, theme_watcher| {
            Box::new(crate::win_interceptor::WinInterceptor::new(
                settings,
                params,
                theme_watcher,
                crate::win_interceptor::WinTuning {
                    snap_layouts_disabled: tuning.snap_layouts_disabled,
                    blur_behind: tuning.blur_behind,
                },
            ))
        });
        #[cfg(target_os = "macos")]
        return Box::new(move |settings, params, theme_watcher| {
            Box::new(crate::mac_interceptor::MacWindowProxy::new(
                settings,
                params,
                theme_watcher,
            ))
        });
    }
    Box::new(|settings, params, _theme_watcher| {
        Box::new(GenericInterceptor::new(settings, params))
    })
}
