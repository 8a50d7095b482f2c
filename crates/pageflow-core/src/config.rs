//! Process-wide settings with a validating patch-merge.
//!
//! Settings are read by every component and mutated only through
//! [`Settings::set_options`], which validates the whole patch before touching
//! anything. An unknown key or a wrongly-typed value is a fatal configuration
//! error, never a silent no-op.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The active-section marker class. Deliberately not configurable.
pub const ACTIVE_CLASS: &str = "active";

/// Named navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Vertical,
    Horizontal,
}

/// How visual scrolling should be performed by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    #[default]
    Smooth,
    Instant,
}

/// Physical mouse buttons, for the swipe discard list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    Back,
    Forward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
    All,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields, default)]
pub struct Settings {
    pub classes: ClassesConfig,
    pub logger: LoggerConfig,
    pub observer: ObserverConfig,
    pub scroll: ScrollConfig,
    pub swipe: SwipeConfig,
    pub keybindings: KeybindingsConfig,
}

/// Marker class-name constants. The `active` marker is a literal and lives
/// in [`ACTIVE_CLASS`], not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ClassesConfig {
    /// Prefix applied to injected style class names
    pub prefix: String,
    /// Id attribute of the root container element
    pub root_id: String,
    /// Marker class for full-viewport sections
    pub section: String,
    /// Marker class for slider wrapper containers
    pub slider: String,
    /// Marker class for individual slides
    pub slide: String,
    /// Marker class for the overflow-scroll wrapper
    pub overflow: String,
}

impl Default for ClassesConfig {
    fn default() -> Self {
        Self {
            prefix: "pf".to_string(),
            root_id: "pageflow".to_string(),
            section: "section".to_string(),
            slider: "slider-ctn".to_string(),
            slide: "slide".to_string(),
            overflow: "overflow".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct LoggerConfig {
    pub enabled: bool,
    /// Enabled level set; `all` turns everything on
    pub levels: Vec<LogLevel>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            levels: vec![LogLevel::All],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ObserverConfig {
    /// Wire document-mutation notifications into the slider lists
    pub enabled: bool,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ScrollConfig {
    /// Time in ms before navigation is allowed again after a transition
    pub unlock_timeout_ms: u64,
    /// Enable navigation with the keyboard
    pub keyboard_scroll: bool,
    /// Enable navigation by mouse dragging (press + direction)
    pub swipe_scroll: bool,
    /// Let scrollable section content consume input before navigating
    pub overflow_scroll: bool,
    /// Pixels scrolled per keypress inside an overflow region
    pub speed: u32,
    pub direction: Direction,
    pub behavior: ScrollBehavior,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            unlock_timeout_ms: 300,
            keyboard_scroll: true,
            swipe_scroll: false,
            overflow_scroll: false,
            speed: 256,
            direction: Direction::Vertical,
            behavior: ScrollBehavior::Smooth,
        }
    }
}

impl ScrollConfig {
    pub fn unlock_timeout(&self) -> Duration {
        Duration::from_millis(self.unlock_timeout_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SwipeConfig {
    /// Minimum displacement in pixels to count a gesture as a swipe
    pub touch_threshold: f64,
    /// Mouse buttons whose pointer events never start or end a swipe
    pub discarded_buttons: Vec<MouseButton>,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            touch_threshold: 30.0,
            discarded_buttons: vec![MouseButton::Right],
        }
    }
}

/// Accepted key identifiers per direction, using web-style key names
/// ("ArrowUp", "PageDown") alongside plain characters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct KeybindingsConfig {
    pub up: Vec<String>,
    pub down: Vec<String>,
    pub left: Vec<String>,
    pub right: Vec<String>,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            up: str_vec(&["ArrowUp", "k", "PageUp"]),
            down: str_vec(&["ArrowDown", "j", "PageDown"]),
            left: str_vec(&["ArrowLeft", "h"]),
            right: str_vec(&["ArrowRight", "l"]),
        }
    }
}

fn str_vec(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Settings {
    /// Load settings from a TOML file, or return defaults when absent.
    pub fn load(path: &std::path::Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let settings: Settings =
                toml::from_str(&content).map_err(|e| Error::Config(e.to_string()))?;
            settings.validate()?;
            Ok(settings)
        } else {
            Ok(Self::default())
        }
    }

    /// Load from the default configuration path.
    pub fn load_default_path() -> Result<Self> {
        Self::load(&Self::config_path())
    }

    /// Save settings to a TOML file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// `~/.config/pageflow/config.toml` on all platforms.
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("pageflow")
            .join("config.toml")
    }

    /// Apply a partial update. The patch is merged into a copy of the
    /// current settings and the copy is validated in full; only a valid
    /// result replaces the live settings.
    pub fn set_options(&mut self, patch: SettingsPatch) -> Result<()> {
        let mut merged = self.clone();
        patch.apply(&mut merged);
        merged.validate()?;
        *self = merged;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("classes.prefix", &self.classes.prefix),
            ("classes.root_id", &self.classes.root_id),
            ("classes.section", &self.classes.section),
            ("classes.slider", &self.classes.slider),
            ("classes.slide", &self.classes.slide),
            ("classes.overflow", &self.classes.overflow),
        ] {
            if value.trim().is_empty() {
                return Err(config_error(format!("{name} must not be empty")));
            }
        }

        if self.scroll.unlock_timeout_ms == 0 {
            return Err(config_error("scroll.unlock_timeout_ms must be greater than zero"));
        }
        if self.scroll.speed == 0 {
            return Err(config_error("scroll.speed must be greater than zero"));
        }
        if !(self.swipe.touch_threshold > 0.0) {
            return Err(config_error("swipe.touch_threshold must be positive"));
        }
        if self.logger.levels.is_empty() {
            return Err(config_error("logger.levels must not be empty"));
        }

        for (name, keys) in [
            ("keybindings.up", &self.keybindings.up),
            ("keybindings.down", &self.keybindings.down),
            ("keybindings.left", &self.keybindings.left),
            ("keybindings.right", &self.keybindings.right),
        ] {
            if keys.is_empty() {
                return Err(config_error(format!("{name} must not be empty")));
            }
            if keys.iter().any(|key| key.trim().is_empty()) {
                return Err(config_error(format!(
                    "{name} contains an empty key name"
                )));
            }
        }

        Ok(())
    }
}

fn config_error(msg: impl Into<String>) -> Error {
    let msg = msg.into();
    tracing::error!("settings rejected: {msg}");
    Error::Config(msg)
}

/// Partial settings update. Every field is optional; anything left `None`
/// keeps its current value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SettingsPatch {
    pub classes: Option<ClassesConfig>,
    pub logger: Option<LoggerConfig>,
    pub observer: Option<ObserverConfig>,
    pub scroll: Option<ScrollPatch>,
    pub swipe: Option<SwipeConfig>,
    pub keybindings: Option<KeybindingsConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ScrollPatch {
    pub unlock_timeout_ms: Option<u64>,
    pub keyboard_scroll: Option<bool>,
    pub swipe_scroll: Option<bool>,
    pub overflow_scroll: Option<bool>,
    pub speed: Option<u32>,
    pub direction: Option<Direction>,
    pub behavior: Option<ScrollBehavior>,
}

impl SettingsPatch {
    fn apply(&self, settings: &mut Settings) {
        if let Some(classes) = &self.classes {
            settings.classes = classes.clone();
        }
        if let Some(logger) = &self.logger {
            settings.logger = logger.clone();
        }
        if let Some(observer) = &self.observer {
            settings.observer = observer.clone();
        }
        if let Some(scroll) = &self.scroll {
            let target = &mut settings.scroll;
            if let Some(v) = scroll.unlock_timeout_ms {
                target.unlock_timeout_ms = v;
            }
            if let Some(v) = scroll.keyboard_scroll {
                target.keyboard_scroll = v;
            }
            if let Some(v) = scroll.swipe_scroll {
                target.swipe_scroll = v;
            }
            if let Some(v) = scroll.overflow_scroll {
                target.overflow_scroll = v;
            }
            if let Some(v) = scroll.speed {
                target.speed = v;
            }
            if let Some(v) = scroll.direction {
                target.direction = v;
            }
            if let Some(v) = scroll.behavior {
                target.behavior = v;
            }
        }
        if let Some(swipe) = &self.swipe {
            settings.swipe = swipe.clone();
        }
        if let Some(keybindings) = &self.keybindings {
            settings.keybindings = keybindings.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.scroll.unlock_timeout_ms, 300);
        assert!(settings.scroll.keyboard_scroll);
        assert!(!settings.scroll.swipe_scroll);
        assert!(!settings.scroll.overflow_scroll);
        assert_eq!(settings.scroll.speed, 256);
        assert_eq!(settings.swipe.touch_threshold, 30.0);
        assert_eq!(settings.swipe.discarded_buttons, vec![MouseButton::Right]);
        assert_eq!(settings.classes.section, "section");
        assert_eq!(settings.classes.slider, "slider-ctn");
        assert_eq!(settings.classes.slide, "slide");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_patch_applies_only_given_fields() {
        let mut settings = Settings::default();
        let patch = SettingsPatch {
            scroll: Some(ScrollPatch {
                swipe_scroll: Some(true),
                unlock_timeout_ms: Some(150),
                ..Default::default()
            }),
            ..Default::default()
        };

        settings.set_options(patch).unwrap();
        assert!(settings.scroll.swipe_scroll);
        assert_eq!(settings.scroll.unlock_timeout_ms, 150);
        // Untouched fields keep their defaults
        assert!(settings.scroll.keyboard_scroll);
        assert_eq!(settings.scroll.speed, 256);
    }

    #[test]
    fn test_invalid_patch_mutates_nothing() {
        let mut settings = Settings::default();
        let patch = SettingsPatch {
            scroll: Some(ScrollPatch {
                speed: Some(0),
                swipe_scroll: Some(true),
                ..Default::default()
            }),
            ..Default::default()
        };

        assert!(settings.set_options(patch).is_err());
        assert_eq!(settings.scroll.speed, 256);
        assert!(!settings.scroll.swipe_scroll);
    }

    #[test]
    fn test_unknown_key_is_fatal() {
        let err = toml::from_str::<Settings>("[scroll]\nwarp_speed = 9\n");
        assert!(err.is_err());
    }

    #[test]
    fn test_empty_keybindings_rejected() {
        let mut settings = Settings::default();
        settings.keybindings.up.clear();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_blank_key_name_rejected() {
        let mut settings = Settings::default();
        settings.keybindings.down.push("  ".to_string());
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_patch_validated_against_merged_result() {
        let mut settings = Settings::default();
        let patch = SettingsPatch {
            keybindings: Some(KeybindingsConfig {
                up: vec![String::new()],
                ..Default::default()
            }),
            ..Default::default()
        };

        assert!(settings.set_options(patch).is_err());
        // The live settings never saw the bad keybindings
        assert_eq!(settings.keybindings.up, KeybindingsConfig::default().up);
    }
}
