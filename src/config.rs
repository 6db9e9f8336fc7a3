use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::clock::HandMotion;
use crate::style::{DialStyle, DisplayMetrics};

/// Neither `XDG_CONFIG_HOME` nor `HOME` names a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no configuration directory: XDG_CONFIG_HOME and HOME are both unset")]
pub struct NoConfigHome;

const APP_DIR: &str = "clockface";
const APP_CONFIG_FILE: &str = "config.json";

/// Configuration for the application window
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Clock".to_string(),
            width: 300,
            height: 300,
        }
    }
}

/// Settings from `config.json`. Every field is optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    pub window: WindowConfig,
    pub font_path: Option<PathBuf>,
    pub hand_motion: HandMotion,
    pub density: f32,
    pub font_scale: f32,
    /// Named dial attributes such as `hour_line_color`. Values are strings
    /// (`"#ff0000"`, `"12dp"`) or bare numbers, which count as pixels.
    pub attributes: BTreeMap<String, serde_json::Value>,
}

impl Default for ClockConfig {
    fn default() -> Self {
        let metrics = DisplayMetrics::default();
        Self {
            window: WindowConfig::default(),
            font_path: None,
            hand_motion: HandMotion::default(),
            density: metrics.density,
            font_scale: metrics.font_scale,
            attributes: BTreeMap::new(),
        }
    }
}

impl ClockConfig {
    pub fn display_metrics(&self) -> DisplayMetrics {
        DisplayMetrics {
            density: self.density,
            font_scale: self.font_scale,
        }
    }

    pub fn dial_style(&self) -> DialStyle {
        let attributes: Vec<(&str, String)> = self
            .attributes
            .iter()
            .filter_map(|(name, value)| match value {
                serde_json::Value::String(text) => Some((name.as_str(), text.clone())),
                serde_json::Value::Number(number) => Some((name.as_str(), number.to_string())),
                other => {
                    tracing::warn!(
                        attribute = %name,
                        value = %other,
                        "ignoring attribute that is neither a string nor a number"
                    );
                    None
                }
            })
            .collect();
        DialStyle::from_attributes(
            attributes.iter().map(|(name, value)| (*name, value.as_str())),
            &self.display_metrics(),
        )
    }
}

pub fn load_clock_config() -> ClockConfig {
    let xdg_config_home = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from);
    let home = std::env::var_os("HOME").map(PathBuf::from);
    load_clock_config_with(xdg_config_home.as_deref(), home.as_deref())
}

fn load_clock_config_with(xdg_config_home: Option<&Path>, home: Option<&Path>) -> ClockConfig {
    let path = match config_file_path(xdg_config_home, home) {
        Ok(path) => path,
        Err(err) => {
            tracing::debug!(%err, "using default clock settings");
            return ClockConfig::default();
        }
    };
    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(?path, "no config file; using defaults");
            return ClockConfig::default();
        }
        Err(err) => {
            tracing::warn!(%err, ?path, "cannot read config file; using defaults");
            return ClockConfig::default();
        }
    };
    serde_json::from_str(&contents).unwrap_or_else(|err| {
        tracing::warn!(%err, ?path, "cannot parse config file; using defaults");
        ClockConfig::default()
    })
}

/// `<config home>/clockface/config.json`, where the config home is a
/// non-empty `XDG_CONFIG_HOME` or else `$HOME/.config`.
fn config_file_path(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, NoConfigHome> {
    let config_home = match xdg_config_home.filter(|dir| !dir.as_os_str().is_empty()) {
        Some(dir) => dir.to_path_buf(),
        None => home.ok_or(NoConfigHome)?.join(".config"),
    };
    Ok(config_home.join(APP_DIR).join(APP_CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;

    fn write_config(root: &Path, contents: &str) {
        let dir = root.join(APP_DIR);
        std::fs::create_dir_all(&dir).expect("config dir should be created");
        std::fs::write(dir.join(APP_CONFIG_FILE), contents).expect("config should be written");
    }

    #[test]
    fn empty_xdg_config_home_falls_back_to_home() {
        let path = config_file_path(Some(Path::new("")), Some(Path::new("/home/ada")))
            .expect("HOME should be enough");

        assert_eq!(path, PathBuf::from("/home/ada/.config/clockface/config.json"));
    }

    #[test]
    fn xdg_config_home_wins_over_home() {
        let path = config_file_path(Some(Path::new("/srv/kiosk/etc")), Some(Path::new("/home/ada")))
            .expect("XDG_CONFIG_HOME should be used");

        assert_eq!(path, PathBuf::from("/srv/kiosk/etc/clockface/config.json"));
    }

    #[test]
    fn no_config_home_means_defaults() {
        assert_eq!(config_file_path(Some(Path::new("")), None), Err(NoConfigHome));
        assert_eq!(load_clock_config_with(None, None), ClockConfig::default());
    }

    #[test]
    fn config_is_read_from_home_when_xdg_is_empty() {
        let home = tempfile::tempdir().expect("tempdir");
        write_config(&home.path().join(".config"), r#"{ "hand_motion": "stepped" }"#);

        let config = load_clock_config_with(Some(Path::new("")), Some(home.path()));
        assert_eq!(config.hand_motion, HandMotion::Stepped);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let root = tempfile::tempdir().expect("tempdir");
        let config = load_clock_config_with(Some(root.path()), None);

        assert_eq!(config, ClockConfig::default());
        assert_eq!(config.window.width, 300);
        assert_eq!(config.hand_motion, HandMotion::Sweep);
    }

    #[test]
    fn malformed_file_yields_defaults() {
        let root = tempfile::tempdir().expect("tempdir");
        write_config(root.path(), "{ not json");

        assert_eq!(
            load_clock_config_with(Some(root.path()), None),
            ClockConfig::default()
        );
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let root = tempfile::tempdir().expect("tempdir");
        write_config(
            root.path(),
            r##"{
                "window": { "width": 480 },
                "hand_motion": "stepped",
                "density": 2.0,
                "attributes": {
                    "hour_line_color": "#ff0000",
                    "hour_line_length": "30dp"
                }
            }"##,
        );

        let config = load_clock_config_with(Some(root.path()), None);
        assert_eq!(config.window.width, 480);
        assert_eq!(config.window.height, 300);
        assert_eq!(config.window.title, "Clock");
        assert_eq!(config.hand_motion, HandMotion::Stepped);

        let style = config.dial_style();
        assert_eq!(style.hour_line_color, Color::new(0xff, 0x00, 0x00));
        assert_eq!(style.hour_line_length, 60.0);
        assert_eq!(style.minute_line_length, 0.0);
    }

    #[test]
    fn numeric_attribute_keeps_rest_of_file() {
        let root = tempfile::tempdir().expect("tempdir");
        write_config(
            root.path(),
            r##"{
                "window": { "width": 480 },
                "attributes": {
                    "hour_line_color": "#ff0000",
                    "hour_line_length": 60,
                    "minute_line_width": 2.5,
                    "second_line_color": ["not", "a", "color"]
                }
            }"##,
        );

        let config = load_clock_config_with(Some(root.path()), None);
        assert_eq!(config.window.width, 480);

        let style = config.dial_style();
        assert_eq!(style.hour_line_color, Color::new(0xff, 0x00, 0x00));
        assert_eq!(style.hour_line_length, 60.0);
        assert_eq!(style.minute_line_width, 2.5);
        assert_eq!(style.second_line_color, Color::BLACK);
    }
}
