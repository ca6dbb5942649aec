/*
 * Process-wide behavior toggles sourced from environment variables and an
 * optional `chromeless.toml` next to the executable. Environment variables
 * win over the file; both sources are read once per process (`load`), with
 * `reload(force)` available so tests can re-drive the parse.
 *
 * The most important switch is `UseCrossPlatformImplementation`, which makes
 * the registry pick the portable input-event filter instead of the native
 * message hook on platforms that have one.
 */

use std::path::PathBuf;

use serde::Deserialize;

pub const CONFIG_FILE_NAME: &str = "chromeless.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigOption {
    /// Use the portable event-filter interceptor even where a native
    /// variant exists.
    UseCrossPlatformImplementation,
    ForceHideFrameBorder,
    ForceShowFrameBorder,
    EnableBlurBehindWindow,
    ForceNonNativeBackgroundBlur,
    DisableWindowsSnapLayout,
}

const OPTION_COUNT: usize = 6;

const ALL_OPTIONS: [ConfigOption; OPTION_COUNT] = [
    ConfigOption::UseCrossPlatformImplementation,
    ConfigOption::ForceHideFrameBorder,
    ConfigOption::ForceShowFrameBorder,
    ConfigOption::EnableBlurBehindWindow,
    ConfigOption::ForceNonNativeBackgroundBlur,
    ConfigOption::DisableWindowsSnapLayout,
];

impl ConfigOption {
    pub fn env_var(&self) -> &'static str {
        match self {
            ConfigOption::UseCrossPlatformImplementation => {
                "CHROMELESS_USE_CROSS_PLATFORM_IMPLEMENTATION"
            }
            ConfigOption::ForceHideFrameBorder => "CHROMELESS_FORCE_HIDE_FRAME_BORDER",
            ConfigOption::ForceShowFrameBorder => "CHROMELESS_FORCE_SHOW_FRAME_BORDER",
            ConfigOption::EnableBlurBehindWindow => "CHROMELESS_ENABLE_BLUR_BEHIND_WINDOW",
            ConfigOption::ForceNonNativeBackgroundBlur => {
                "CHROMELESS_FORCE_NON_NATIVE_BACKGROUND_BLUR"
            }
            ConfigOption::DisableWindowsSnapLayout => "CHROMELESS_DISABLE_WINDOWS_SNAP_LAYOUT",
        }
    }

    fn index(&self) -> usize {
        match self {
            ConfigOption::UseCrossPlatformImplementation => 0,
            ConfigOption::ForceHideFrameBorder => 1,
            ConfigOption::ForceShowFrameBorder => 2,
            ConfigOption::EnableBlurBehindWindow => 3,
            ConfigOption::ForceNonNativeBackgroundBlur => 4,
            ConfigOption::DisableWindowsSnapLayout => 5,
        }
    }
}

/// `[options]` table of `chromeless.toml`. Absent keys default to off.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
struct OptionsSection {
    use_cross_platform_implementation: bool,
    force_hide_frame_border: bool,
    force_show_frame_border: bool,
    enable_blur_behind_window: bool,
    force_non_native_background_blur: bool,
    disable_windows_snap_layout: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    options: OptionsSection,
}

#[derive(Debug, Default)]
pub struct Config {
    loaded: bool,
    env_source_disabled: bool,
    file_source_disabled: bool,
    values: [bool; OPTION_COUNT],
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads both sources the first time; later calls are no-ops.
    pub fn load(&mut self) {
        self.reload(false);
    }

    pub fn reload(&mut self, force: bool) {
        if self.loaded && !force {
            return;
        }
        self.loaded = true;
        self.values = [false; OPTION_COUNT];
        if !self.file_source_disabled {
            if let Some(text) = read_adjacent_config_file() {
                self.apply_file_text(&text);
            }
        }
        if !self.env_source_disabled {
            self.apply_env(|name| std::env::var(name).ok());
        }
        self.warn_inappropriate_options();
    }

    pub fn is_set(&self, option: ConfigOption) -> bool {
        self.values[option.index()]
    }

    /// Programmatic override, wins over both sources until the next forced
    /// reload.
    pub fn set(&mut self, option: ConfigOption, on: bool) {
        self.values[option.index()] = on;
    }

    pub fn set_env_source_disabled(&mut self, disabled: bool) {
        self.env_source_disabled = disabled;
    }

    pub fn set_file_source_disabled(&mut self, disabled: bool) {
        self.file_source_disabled = disabled;
    }

    /// Applies environment variables through an injected lookup so tests can
    /// drive this without touching the process environment.
    fn apply_env(&mut self, get: impl Fn(&str) -> Option<String>) {
        for option in ALL_OPTIONS {
            if let Some(value) = get(option.env_var()) {
                if env_value_is_on(&value) {
                    self.values[option.index()] = true;
                }
            }
        }
    }

    fn apply_file_text(&mut self, text: &str) {
        let parsed: ConfigFile = match toml::from_str(text) {
            Ok(parsed) => parsed,
            Err(err) => {
                log::warn!("Ignoring malformed {CONFIG_FILE_NAME}: {err}");
                return;
            }
        };
        let opts = parsed.options;
        let pairs = [
            (
                ConfigOption::UseCrossPlatformImplementation,
                opts.use_cross_platform_implementation,
            ),
            (ConfigOption::ForceHideFrameBorder, opts.force_hide_frame_border),
            (ConfigOption::ForceShowFrameBorder, opts.force_show_frame_border),
            (
                ConfigOption::EnableBlurBehindWindow,
                opts.enable_blur_behind_window,
            ),
            (
                ConfigOption::ForceNonNativeBackgroundBlur,
                opts.force_non_native_background_blur,
            ),
            (
                ConfigOption::DisableWindowsSnapLayout,
                opts.disable_windows_snap_layout,
            ),
        ];
        for (option, on) in pairs {
            if on {
                self.values[option.index()] = true;
            }
        }
    }

    /// Flags option combinations that contradict each other; the later
    /// platform code resolves each conflict in favor of the safer choice.
    fn warn_inappropriate_options(&self) {
        if self.is_set(ConfigOption::ForceHideFrameBorder)
            && self.is_set(ConfigOption::ForceShowFrameBorder)
        {
            log::warn!(
                "Both force-hide-frame-border and force-show-frame-border are set; \
                 the frame border will stay visible"
            );
        }
        if self.is_set(ConfigOption::EnableBlurBehindWindow)
            && self.is_set(ConfigOption::ForceNonNativeBackgroundBlur)
        {
            log::warn!(
                "enable-blur-behind-window is ignored because \
                 force-non-native-background-blur is set"
            );
        }
    }
}

/// "1", any non-zero integer, or "true"/"on" (case-insensitive) enable an
/// option; everything else, including empty, leaves it off.
fn env_value_is_on(value: &str) -> bool {
    let trimmed = value.trim();
    if let Ok(number) = trimmed.parse::<i64>() {
        return number != 0;
    }
    trimmed.eq_ignore_ascii_case("true") || trimmed.eq_ignore_ascii_case("on")
}

fn read_adjacent_config_file() -> Option<String> {
    let path = adjacent_config_path()?;
    match std::fs::read_to_string(&path) {
        Ok(text) => Some(text),
        Err(_) => None,
    }
}

fn adjacent_config_path() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    Some(exe.parent()?.join(CONFIG_FILE_NAME))
}
