/*
 * macOS interception strategy: an owned proxy around the host's NSWindow.
 *
 * AppKit already draws no frame once the title bar is collapsed into the
 * content area, so the proxy only flips the window properties that produce a
 * frameless look (full-size content view, transparent and title-less
 * titlebar, hidden standard buttons) and restores the saved state on detach.
 * Input handling is delegated to the portable filter; AppKit windows resize
 * from their edges natively, so only caption drags and double-clicks matter
 * here.
 *
 * The interface-theme distributed notification is bridged to the theme
 * watcher so hosts get the same change event on every platform.
 */

use std::ptr::NonNull;
use std::sync::Arc;

use block2::RcBlock;
use objc2::rc::Retained;
use objc2::runtime::{NSObjectProtocol, ProtocolObject};
use objc2_app_kit::{NSWindow, NSWindowButton, NSWindowStyleMask, NSWindowTitleVisibility};
use objc2_foundation::{NSDistributedNotificationCenter, NSNotification, NSString};

use crate::error::{PlatformError, Result as PlatformResult};
use crate::generic_interceptor::GenericInterceptor;
use crate::interceptor::{InputEvent, Interceptor};
use crate::params::WindowParams;
use crate::theme::ThemeWatcher;
use crate::types::WindowSettings;

const INTERFACE_THEME_NOTIFICATION: &str = "AppleInterfaceThemeChangedNotification";

/// Window state captured at attach so detach can restore it exactly.
struct SavedAppearance {
    style_mask: NSWindowStyleMask,
    titlebar_transparent: bool,
    title_visibility: NSWindowTitleVisibility,
}

pub(crate) struct MacWindowProxy {
    params: Arc<dyn WindowParams>,
    theme_watcher: Option<Arc<ThemeWatcher>>,
    input_filter: GenericInterceptor,
    saved: Option<SavedAppearance>,
    theme_observer: Option<Retained<ProtocolObject<dyn NSObjectProtocol>>>,
}

// AppKit windows are main-thread confined and the registry attaches and
// detaches on the host's UI thread; the proxy itself may be moved across
// threads while idle.
unsafe impl Send for MacWindowProxy {}

impl MacWindowProxy {
    pub(crate) fn new(
        settings: WindowSettings,
        params: Arc<dyn WindowParams>,
        theme_watcher: Option<Arc<ThemeWatcher>>,
    ) -> Self {
        Self {
            params: params.clone(),
            theme_watcher,
            input_filter: GenericInterceptor::new(settings, params),
            saved: None,
            theme_observer: None,
        }
    }

    /// The host hands us the NSWindow as an opaque id; the registry has
    /// already rejected null ids before attach runs.
    fn window(&self) -> Option<&NSWindow> {
        let ptr = self.params.window_id().0 as *const NSWindow;
        unsafe { ptr.as_ref() }
    }

    fn set_standard_buttons_hidden(window: &NSWindow, hidden: bool) {
        let buttons = [
            NSWindowButton::CloseButton,
            NSWindowButton::MiniaturizeButton,
            NSWindowButton::ZoomButton,
        ];
        for kind in buttons {
            if let Some(button) = window.standardWindowButton(kind) {
                button.setHidden(hidden);
            }
        }
    }

    fn subscribe_theme_notification(&mut self) {
        let Some(watcher) = self.theme_watcher.clone() else {
            return;
        };
        let block = RcBlock::new(move |_notification: NonNull<NSNotification>| {
            watcher.refresh();
        });
        let center = unsafe { NSDistributedNotificationCenter::defaultCenter() };
        let observer = unsafe {
            center.addObserverForName_object_queue_usingBlock(
                Some(&NSString::from_str(INTERFACE_THEME_NOTIFICATION)),
                None,
                None,
                &block,
            )
        };
        self.theme_observer = Some(observer);
    }

    fn unsubscribe_theme_notification(&mut self) {
        if let Some(observer) = self.theme_observer.take() {
            let center = unsafe { NSDistributedNotificationCenter::defaultCenter() };
            unsafe { center.removeObserver(observer.as_ref()) };
        }
    }
}

impl Interceptor for MacWindowProxy {
    fn attach(&mut self) -> PlatformResult<()> {
        if self.saved.is_some() {
            return Ok(());
        }
        let id = self.params.window_id();
        let Some(window) = self.window() else {
            return Err(PlatformError::InvalidHandle(format!(
                "window {id:?} is not a live NSWindow"
            )));
        };
        self.saved = Some(SavedAppearance {
            style_mask: window.styleMask(),
            titlebar_transparent: window.titlebarAppearsTransparent(),
            title_visibility: window.titleVisibility(),
        });
        unsafe {
            window.setStyleMask(window.styleMask() | NSWindowStyleMask::FullSizeContentView);
            window.setTitlebarAppearsTransparent(true);
            window.setTitleVisibility(NSWindowTitleVisibility::Hidden);
        }
        Self::set_standard_buttons_hidden(window, true);
        self.subscribe_theme_notification();
        self.input_filter.attach()?;
        log::debug!("frameless proxy attached to {id:?}");
        Ok(())
    }

    fn detach(&mut self) {
        let Some(saved) = self.saved.take() else {
            return;
        };
        self.input_filter.detach();
        self.unsubscribe_theme_notification();
        if let Some(window) = self.window() {
            unsafe {
                window.setStyleMask(saved.style_mask);
                window.setTitlebarAppearsTransparent(saved.titlebar_transparent);
                window.setTitleVisibility(saved.title_visibility);
            }
            Self::set_standard_buttons_hidden(window, false);
        }
        log::debug!("frameless proxy detached from {:?}", self.params.window_id());
    }

    fn handle_event(&mut self, event: &InputEvent) -> bool {
        self.input_filter.handle_event(event)
    }
}

impl Drop for MacWindowProxy {
    fn drop(&mut self) {
        self.detach();
    }
}
