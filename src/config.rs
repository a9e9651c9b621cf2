use std::{
    fmt::Write,
    fs, io,
    ops::Not,
    path::{Path, PathBuf},
};

use chrono::NaiveDateTime;
use eframe::egui;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("couldn't find a home directory to put the config in")]
    NoProjectDir,
    #[error("couldn't access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("couldn't parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("couldn't serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("{key} `{format}` isn't a valid strftime format")]
    BadFormat { key: &'static str, format: String },
}

#[derive(Debug, Serialize, Deserialize, Default, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Not for Theme {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

impl From<Theme> for egui::Visuals {
    fn from(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self::dark(),
            Theme::Light => Self::light(),
        }
    }
}

/// the beep played when an alarm goes off
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct Tone {
    /// in hertz
    pub frequency: f32,
    pub duration_ms: u64,
    /// gain between 0 and 1
    pub volume: f32,
}

impl Default for Tone {
    fn default() -> Self {
        Self {
            frequency: 800.0,
            duration_ms: 500,
            volume: 0.5,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct RegistrationConfig {
    /// sheet endpoint used for both the lookup and the insert
    pub endpoint: String,
    pub allowed_domains: Vec<String>,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://sheetdb.io/api/v1/83hri246cxso1".to_string(),
            allowed_domains: ["kei.edu.in", "myntra.com", "google.com", "ibm.in"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Settings read at startup. Nothing the user does in the app is written back.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub time_format: String,
    pub date_format: String,
    pub theme: Theme,
    pub tone: Tone,
    pub registration: RegistrationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            time_format: "%-I:%M:%S %p".to_string(),
            date_format: "%A, %B %-d, %Y".to_string(),
            theme: Theme::Dark,
            tone: Tone::default(),
            registration: RegistrationConfig::default(),
        }
    }
}

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&config).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.check_formats()?;
        Ok(config)
    }

    /// The clock formats a local time with no offset, and chrono panics when
    /// a format can't be displayed. Unknown specifiers and timezone ones
    /// (`%Z`, `%z`) both fail here instead.
    fn check_formats(&self) -> Result<(), ConfigError> {
        let sample = NaiveDateTime::default();
        for (key, format) in [
            ("time_format", &self.time_format),
            ("date_format", &self.date_format),
        ] {
            let mut shown = String::new();
            if write!(shown, "{}", sample.format(format)).is_err() {
                return Err(ConfigError::BadFormat {
                    key,
                    format: format.clone(),
                });
            }
        }
        Ok(())
    }

    /// like [`Config::load`] but a missing file just means default settings
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::info!("no config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let config = toml::to_string(self)?;
        let io_error = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        fs::write(path, config).map_err(io_error)
    }

    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let mut path = directories::ProjectDirs::from("", "", "clock_desk")
            .ok_or(ConfigError::NoProjectDir)?
            .config_dir()
            .to_path_buf();
        path.push("config.toml");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_toggles_back_and_forth() {
        assert_eq!(!Theme::Dark, Theme::Light);
        assert_eq!(!!Theme::Dark, Theme::Dark);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            theme = "Light"

            [tone]
            frequency = 440.0
            "#,
        )
        .unwrap();
        assert_eq!(config.theme, Theme::Light);
        assert!((config.tone.frequency - 440.0).abs() < f32::EPSILON);
        assert_eq!(config.tone.duration_ms, 500);
        assert_eq!(config.time_format, Config::default().time_format);
        assert_eq!(config.registration.allowed_domains.len(), 4);
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::new();
        config.registration.endpoint = "http://localhost:1234/sheet".to_string();
        config.save(&path).unwrap();
        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn bad_time_format_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "time_format = \"%Q\"").unwrap();
        assert!(matches!(
            Config::load(&path),
            Err(ConfigError::BadFormat {
                key: "time_format",
                ..
            })
        ));
    }

    #[test]
    fn timezone_formats_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "time_format = \"%H:%M %Z\"").unwrap();
        assert!(matches!(
            Config::load(&path),
            Err(ConfigError::BadFormat {
                key: "time_format",
                ..
            })
        ));
        fs::write(&path, "date_format = \"%Y-%m-%d %:z\"").unwrap();
        assert!(matches!(
            Config::load(&path),
            Err(ConfigError::BadFormat {
                key: "date_format",
                ..
            })
        ));
    }

    #[test]
    fn default_formats_pass_the_check() {
        assert!(Config::default().check_formats().is_ok());
    }

    #[test]
    fn garbage_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "theme = [").unwrap();
        assert!(matches!(
            Config::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
