use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::constants::{FPS, SLIDE_PERIOD};

pub const DEFAULT_CONFIG_FILE: &str = "carousel.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub period_ms: u64,
    pub deck: Option<PathBuf>,
    pub window_width: i32,
    pub window_height: i32,
    pub fps: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            period_ms: SLIDE_PERIOD.as_millis() as u64,
            deck: None,
            window_width: 960,
            window_height: 540,
            fps: FPS,
        }
    }
}

impl Settings {
    pub fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }

    /// Reads `path` when it exists; a missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("Invalid settings {}", path.display()))
    }

    /// Applies `CAROUSEL_*` overrides from `vars`.
    pub fn apply_env<I>(&mut self, vars: I) -> Result<()>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            match key.as_str() {
                "CAROUSEL_PERIOD_MS" => {
                    self.period_ms = value
                        .parse()
                        .with_context(|| format!("CAROUSEL_PERIOD_MS is not a number: {value}"))?;
                }
                "CAROUSEL_DECK" => self.deck = Some(PathBuf::from(value)),
                _ => {}
            }
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.period_ms == 0 {
            bail!("period_ms must be greater than zero");
        }
        if self.window_width <= 0 || self.window_height <= 0 {
            bail!("window size must be positive, got {}x{}", self.window_width, self.window_height);
        }
        if self.fps == 0 {
            bail!("fps must be greater than zero");
        }
        Ok(())
    }
}

/// Defaults, then the settings file, then the process environment.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
    let mut settings = Settings::from_file(path)?;
    settings.apply_env(std::env::vars())?;
    tracing::debug!(?settings, "settings loaded");
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_match_showcase() {
        let settings = Settings::default();
        assert_eq!(settings.period(), Duration::from_millis(3800));
        assert_eq!(settings.deck, None);
        settings.validate().unwrap();
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::from_file(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "period_ms = 1500\ndeck = \"decks/iot.toml\"").unwrap();

        let settings = Settings::from_file(file.path()).unwrap();
        assert_eq!(settings.period_ms, 1500);
        assert_eq!(settings.deck, Some(PathBuf::from("decks/iot.toml")));
        assert_eq!(settings.fps, FPS);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "period_ms = \"soon\"").unwrap();
        assert!(Settings::from_file(file.path()).is_err());
    }

    #[test]
    fn environment_overrides_file() {
        let mut settings = Settings { period_ms: 1500, ..Settings::default() };
        settings
            .apply_env(vars(&[
                ("CAROUSEL_PERIOD_MS", "2500"),
                ("CAROUSEL_DECK", "/tmp/deck.toml"),
                ("HOME", "/root"),
            ]))
            .unwrap();

        assert_eq!(settings.period_ms, 2500);
        assert_eq!(settings.deck, Some(PathBuf::from("/tmp/deck.toml")));
    }

    #[test]
    fn bad_environment_value_is_reported() {
        let mut settings = Settings::default();
        let err = settings
            .apply_env(vars(&[("CAROUSEL_PERIOD_MS", "fast")]))
            .unwrap_err();
        assert!(err.to_string().contains("CAROUSEL_PERIOD_MS"));
    }

    #[test]
    fn zero_period_fails_validation() {
        let settings = Settings { period_ms: 0, ..Settings::default() };
        assert!(settings.validate().is_err());
    }
}
