//! Viewer configuration.
//!
//! Settings are read from an optional TOML file and then overridden by
//! `GALLERY__*` environment variables.

use crate::details::{BrandFieldSet, BrandFields};
use crate::source::PropsSource;
use crate::view::Labels;
use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Config file used when none is given on the command line.
pub const DEFAULT_CONFIG_PATH: &str = "gallery.toml";

/// Settings for the simulated media element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Delay before a play attempt resolves.
    pub play_delay_ms: u64,
    /// Reject every play attempt, as a strict autoplay policy would.
    pub reject_playback: bool,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            play_delay_ms: 150,
            reject_playback: false,
        }
    }
}

impl SimulationSettings {
    pub fn play_delay(&self) -> Duration {
        Duration::from_millis(self.play_delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fallback tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
    /// Path or http(s) URL of the page props JSON.
    pub props: String,
    pub labels: Labels,
    pub brand_fields: Vec<BrandFieldSet>,
    pub simulation: SimulationSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
            props: "gallery.json".into(),
            labels: Labels::default(),
            brand_fields: Vec::new(),
            simulation: SimulationSettings::default(),
        }
    }
}

/// `GALLERY__SIMULATION__REJECT_PLAYBACK=true` sets `simulation.reject_playback`.
fn environment() -> Environment {
    Environment::with_prefix("GALLERY").separator("__")
}

impl Settings {
    /// Load settings from `path` (or the default file) and the environment.
    ///
    /// A missing file is not an error; defaults apply.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, environment())
    }

    fn load_with_env(path: Option<&Path>, env: Environment) -> Result<Self> {
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));

        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(env)
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?
            .try_deserialize::<Settings>()
            .context("Failed to parse configuration")?;

        Ok(settings)
    }

    pub fn props_source(&self) -> PropsSource {
        PropsSource::parse(&self.props)
    }

    pub fn brand_fields(&self) -> BrandFields {
        BrandFields::new(&self.brand_fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::details::DetailField;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("absent.toml");
        let settings = Settings::load(Some(path.as_path())).expect("load should succeed");

        assert_eq!(settings.labels, Labels::default());
        assert_eq!(settings.simulation, SimulationSettings::default());
        assert!(settings.brand_fields().for_brand("Boveda").is_empty());
    }

    #[test]
    fn toml_file_overrides_sections() {
        let mut file = NamedTempFile::new().expect("failed to create temp file");
        writeln!(
            file,
            r#"
log_level = "debug"
props = "https://shop.example.com/gallery.json"

[labels]
coming_soon = "Bientôt disponible"

[simulation]
reject_playback = true

[[brand_fields]]
brand = "Magic Rosin"
fields = ["SKU", "Brands", "Style"]
"#
        )
        .expect("failed to write config");

        let settings = Settings::load(Some(file.path())).expect("load should succeed");

        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.labels.coming_soon, "Bientôt disponible");
        assert_eq!(settings.labels.retry, "Retry");
        assert!(settings.simulation.reject_playback);
        assert_eq!(settings.simulation.play_delay_ms, 150);
        assert_eq!(
            settings.brand_fields().for_brand("Magic Rosin"),
            [DetailField::Sku, DetailField::Brands, DetailField::Style]
        );
        assert!(matches!(settings.props_source(), PropsSource::Remote(_)));
    }

    #[test]
    fn environment_overrides_file() {
        let mut file = NamedTempFile::new().expect("failed to create temp file");
        writeln!(
            file,
            r#"
log_level = "debug"

[simulation]
play_delay_ms = 500
"#
        )
        .expect("failed to write config");

        let vars = HashMap::from([
            ("GALLERY__LOG_LEVEL".to_string(), "trace".to_string()),
            ("GALLERY__PROPS".to_string(), "pages/cello.json".to_string()),
            (
                "GALLERY__SIMULATION__REJECT_PLAYBACK".to_string(),
                "true".to_string(),
            ),
            ("OTHER__LOG_LEVEL".to_string(), "error".to_string()),
        ]);
        let env = environment().source(Some(vars));

        let settings = Settings::load_with_env(Some(file.path()), env).expect("load should succeed");

        assert_eq!(settings.log_level, "trace");
        assert_eq!(settings.props, "pages/cello.json");
        assert!(settings.simulation.reject_playback);
        assert_eq!(settings.simulation.play_delay_ms, 500);
    }
}
