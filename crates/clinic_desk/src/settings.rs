use std::path::PathBuf;
use std::str::FromStr;

use anyhow::anyhow;
use aside::AsideSettings;
use color_eyre::Result;
use serde::{Deserialize, Serialize};
use settings::SettingsStore;
use tracing::{info, warn};

use crate::cli::Cli;
use crate::department::Department;

/// Desk section of the settings file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeskSettings {
    pub tick_rate_ms: u64,
    pub frame_rate: f64,
    /// Department shown at startup, by name.
    pub start_department: String,
}

impl Default for DeskSettings {
    fn default() -> Self {
        Self {
            tick_rate_ms: 250,
            frame_rate: 30.0,
            start_department: Department::default().to_string(),
        }
    }
}

impl settings::Settings for DeskSettings {
    const SECTION: &'static str = "desk";
}

impl DeskSettings {
    pub fn start_department(&self) -> anyhow::Result<Department> {
        Department::from_str(&self.start_department)
            .map_err(|_| anyhow!("Invalid department: '{}'", self.start_department))
    }
}

/// Open the settings file and register every section the desk reads.
pub fn build_desk_settings_store(path: PathBuf) -> Result<SettingsStore> {
    let store = SettingsStore::builder().with_settings_file(path).build()?;
    store.register::<DeskSettings>()?;
    store.register::<AsideSettings>()?;
    Ok(store)
}

/// Effective runtime configuration: settings file overlaid with CLI flags.
#[derive(Debug, Clone, PartialEq)]
pub struct DeskConfig {
    pub department: Department,
    pub tick_rate: f64,
    pub frame_rate: f64,
    pub aside: AsideSettings,
}

impl DeskConfig {
    pub fn resolve(cli: &Cli, store: &SettingsStore) -> Result<Self> {
        let desk = store.get::<DeskSettings>()?;
        let mut aside = store.get::<AsideSettings>()?;

        let department = match cli.department {
            Some(department) => department,
            None => desk.start_department().unwrap_or_else(|err| {
                warn!("{err}, falling back to {}", Department::default());
                Department::default()
            }),
        };
        let tick_rate_ms = cli.tick_rate.unwrap_or(desk.tick_rate_ms).max(1);
        if let Some(settle_delay_ms) = cli.settle_delay {
            aside.settle_delay_ms = settle_delay_ms;
        }

        let config = Self {
            department,
            tick_rate: 1000.0 / tick_rate_ms as f64,
            frame_rate: sane_frame_rate(cli.frame_rate.unwrap_or(desk.frame_rate)),
            aside,
        };
        info!(?config, "desk configuration resolved");
        Ok(config)
    }
}

/// Frames per second must be finite and positive; anything else would
/// produce an invalid render interval.
fn sane_frame_rate(frame_rate: f64) -> f64 {
    if frame_rate.is_finite() && frame_rate > 0.0 {
        return frame_rate;
    }
    let fallback = DeskSettings::default().frame_rate;
    warn!(frame_rate, fallback, "invalid frame rate, using default");
    fallback
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use clap::Parser;
    use pretty_assertions::assert_eq;

    use super::*;

    fn store() -> SettingsStore {
        let store = SettingsStore::in_memory();
        store.register::<DeskSettings>().unwrap();
        store.register::<AsideSettings>().unwrap();
        store
    }

    #[test]
    fn defaults_without_flags() {
        let cli = Cli::parse_from(["clinic_desk"]);
        let config = DeskConfig::resolve(&cli, &store()).unwrap();
        assert_eq!(config.department, Department::Reception);
        assert_eq!(config.tick_rate, 4.0);
        assert_eq!(config.aside.settle_delay(), Duration::from_millis(300));
    }

    #[test]
    fn flags_override_settings() {
        let store = store();
        store
            .update::<DeskSettings, _>(|d| d.start_department = "billing".into())
            .unwrap();
        let cli = Cli::parse_from([
            "clinic_desk",
            "--department",
            "clinic",
            "--tick-rate",
            "100",
            "--settle-delay",
            "50",
        ]);
        let config = DeskConfig::resolve(&cli, &store).unwrap();
        assert_eq!(config.department, Department::Clinic);
        assert_eq!(config.tick_rate, 10.0);
        assert_eq!(config.aside.settle_delay(), Duration::from_millis(50));
    }

    #[test]
    fn non_positive_frame_rate_falls_back() {
        let cli = Cli::parse_from(["clinic_desk", "--frame-rate", "0"]);
        let config = DeskConfig::resolve(&cli, &store()).unwrap();
        assert_eq!(config.frame_rate, 30.0);

        let cli = Cli::parse_from(["clinic_desk", "--frame-rate=-5"]);
        let config = DeskConfig::resolve(&cli, &store()).unwrap();
        assert_eq!(config.frame_rate, 30.0);
    }

    #[test]
    fn invalid_frame_rate_in_settings_falls_back() {
        let store = store();
        store
            .update::<DeskSettings, _>(|d| d.frame_rate = -1.0)
            .unwrap();
        let cli = Cli::parse_from(["clinic_desk", "--frame-rate", "60"]);
        assert_eq!(DeskConfig::resolve(&cli, &store).unwrap().frame_rate, 60.0);

        let cli = Cli::parse_from(["clinic_desk"]);
        assert_eq!(DeskConfig::resolve(&cli, &store).unwrap().frame_rate, 30.0);
    }

    #[test]
    fn unknown_start_department_falls_back() {
        let store = store();
        store
            .update::<DeskSettings, _>(|d| d.start_department = "radiology".into())
            .unwrap();
        let cli = Cli::parse_from(["clinic_desk"]);
        let config = DeskConfig::resolve(&cli, &store).unwrap();
        assert_eq!(config.department, Department::Reception);
    }
}
