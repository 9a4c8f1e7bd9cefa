//! # Application Configuration
//!
//! Settings loaded once at startup.
//!
//! ## Load Order (later overrides earlier)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Defaults (this file)                                                │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  2. TOML file: --config PATH, else <config dir>/printcost.toml          │
//! │        │      (a missing default file is fine; a missing --config       │
//! │        │       file is an error)                                        │
//! │        ▼                                                                │
//! │  3. Environment                                                         │
//! │        PRINTCOST_DB_PATH           → storage.database_path              │
//! │        PRINTCOST_FONTS_DIR         → report.fonts_dir                   │
//! │        PRINTCOST_DURATION_FORMAT   → input.duration_format              │
//! │        PRINTCOST_BUSINESS_NAME     → report.business_name               │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  4. validate()                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example File
//! ```toml
//! [storage]
//! database_path = "/home/ana/.local/share/printcost/quote.db"
//!
//! [input]
//! duration_format = "hours_minutes"
//!
//! [defaults]
//! power_w = 220.0
//! energy_rate = 0.7
//!
//! [report]
//! business_name = "Ateliê 3D"
//! signatory = "Ana Lima"
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use printcost_core::parse::DurationFormat;
use printcost_core::{ParameterSet, DEFAULT_MATERIAL};
use printcost_report::ReportSettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

const CONFIG_FILE: &str = "printcost.toml";
const DATABASE_FILE: &str = "quote.db";

// =============================================================================
// Errors
// =============================================================================

/// Configuration problems.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Cannot serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

// =============================================================================
// Sections
// =============================================================================

/// `[storage]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub database_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            database_path: project_dirs()
                .map(|dirs| dirs.data_dir().join(DATABASE_FILE))
                .unwrap_or_else(|| PathBuf::from(DATABASE_FILE)),
        }
    }
}

/// `[input]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// How `--time` is read.
    pub duration_format: DurationFormat,
}

/// `[defaults]`: values used when a `calc` parameter is omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub filament_price: f64,
    pub power_w: f64,
    pub energy_rate: f64,
    pub labor_rate: f64,
    pub printer_value: f64,
    pub depreciation_hours: f64,
    pub margin_pct: f64,
    pub material: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        DefaultsConfig {
            filament_price: 0.0,
            power_w: 220.0,
            energy_rate: 0.70,
            labor_rate: 0.0,
            printer_value: 0.0,
            depreciation_hours: 0.0,
            margin_pct: 0.0,
            material: DEFAULT_MATERIAL.to_string(),
        }
    }
}

impl DefaultsConfig {
    /// Basic-model parameter set filled with these defaults.
    pub fn parameter_set(&self) -> ParameterSet {
        ParameterSet {
            filament_price: self.filament_price,
            power_w: self.power_w,
            energy_rate: self.energy_rate,
            labor_rate: self.labor_rate,
            printer_value: self.printer_value,
            depreciation_hours: self.depreciation_hours,
            margin_pct: self.margin_pct,
            ..ParameterSet::default()
        }
    }

    fn numbers(&self) -> [(&'static str, f64); 7] {
        [
            ("filament_price", self.filament_price),
            ("power_w", self.power_w),
            ("energy_rate", self.energy_rate),
            ("labor_rate", self.labor_rate),
            ("printer_value", self.printer_value),
            ("depreciation_hours", self.depreciation_hours),
            ("margin_pct", self.margin_pct),
        ]
    }
}

/// `[report]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub business_name: String,

    /// Name on the signature line; no signature block when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signatory: Option<String>,
    pub signatory_role: String,
    pub payment_terms: String,
    pub lead_time: String,

    /// Directory holding `<font_family>-Regular.ttf` and friends.
    pub fonts_dir: PathBuf,
    pub font_family: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        let settings = ReportSettings::default();
        ReportConfig {
            business_name: settings.business_name,
            signatory: settings.signatory,
            signatory_role: settings.signatory_role,
            payment_terms: settings.payment_terms,
            lead_time: settings.lead_time,
            fonts_dir: project_dirs()
                .map(|dirs| dirs.data_dir().join("fonts"))
                .unwrap_or_else(|| PathBuf::from("fonts")),
            font_family: "LiberationSans".to_string(),
        }
    }
}

impl ReportConfig {
    /// Business details handed to the exporters.
    pub fn settings(&self) -> ReportSettings {
        ReportSettings {
            business_name: self.business_name.clone(),
            payment_terms: self.payment_terms.clone(),
            lead_time: self.lead_time.clone(),
            signatory: self.signatory.clone().filter(|s| !s.trim().is_empty()),
            signatory_role: self.signatory_role.clone(),
        }
    }
}

// =============================================================================
// App Config
// =============================================================================

/// Effective configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub input: InputConfig,
    pub defaults: DefaultsConfig,
    pub report: ReportConfig,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Parses one TOML file; missing sections and keys take defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        info!(?path, "Loading config file");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents).map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }

    pub fn from_toml(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|e| e.to_string())
    }

    /// The effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.database_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("storage.database_path is empty".into()));
        }

        if self.report.font_family.trim().is_empty() {
            return Err(ConfigError::Invalid("report.font_family is empty".into()));
        }

        for (name, value) in self.defaults.numbers() {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "defaults.{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `PRINTCOST_*` overrides read through `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("PRINTCOST_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.storage.database_path = PathBuf::from(path);
        }

        if let Some(dir) = lookup("PRINTCOST_FONTS_DIR") {
            debug!(dir = %dir, "Overriding fonts directory from environment");
            self.report.fonts_dir = PathBuf::from(dir);
        }

        if let Some(format) = lookup("PRINTCOST_DURATION_FORMAT") {
            match format.parse() {
                Ok(parsed) => self.input.duration_format = parsed,
                Err(e) => warn!(error = %e, "Ignoring PRINTCOST_DURATION_FORMAT"),
            }
        }

        if let Some(name) = lookup("PRINTCOST_BUSINESS_NAME") {
            self.report.business_name = name;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "printcost")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.defaults.power_w, 220.0);
        assert_eq!(config.defaults.energy_rate, 0.70);
        assert_eq!(config.defaults.margin_pct, 0.0);
        assert_eq!(config.input.duration_format, DurationFormat::HoursMinutes);
        assert!(config.storage.database_path.ends_with("quote.db"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = AppConfig::default();
        config.report.signatory = Some("Ana Lima".to_string());
        config.input.duration_format = DurationFormat::DecimalHours;

        let text = config.to_toml().unwrap();
        assert!(text.contains("[storage]"));
        assert!(text.contains("[report]"));
        assert!(text.contains("duration_format = \"decimal_hours\""));

        let back = AppConfig::from_toml(&text).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [report]
            business_name = "Ateliê 3D"

            [defaults]
            margin_pct = 80.0
            "#,
        )
        .unwrap();

        assert_eq!(config.report.business_name, "Ateliê 3D");
        assert_eq!(config.report.font_family, "LiberationSans");
        assert_eq!(config.defaults.margin_pct, 80.0);
        assert_eq!(config.defaults.power_w, 220.0);
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        assert!(AppConfig::from_toml("[input]\nduration_format = \"weeks\"").is_err());
        assert!(AppConfig::from_toml("not toml at all [").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("PRINTCOST_DB_PATH", "/tmp/other.db"),
            ("PRINTCOST_FONTS_DIR", "/usr/share/fonts/liberation"),
            ("PRINTCOST_DURATION_FORMAT", "decimal_hours"),
            ("PRINTCOST_BUSINESS_NAME", "Oficina Maker"),
        ]);

        let mut config = AppConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.storage.database_path, PathBuf::from("/tmp/other.db"));
        assert_eq!(
            config.report.fonts_dir,
            PathBuf::from("/usr/share/fonts/liberation")
        );
        assert_eq!(config.input.duration_format, DurationFormat::DecimalHours);
        assert_eq!(config.report.business_name, "Oficina Maker");
    }

    #[test]
    fn test_invalid_env_duration_format_is_ignored() {
        let mut config = AppConfig::default();
        config.apply_overrides(|key| {
            (key == "PRINTCOST_DURATION_FORMAT").then(|| "fortnights".to_string())
        });
        assert_eq!(config.input.duration_format, DurationFormat::HoursMinutes);
    }

    #[test]
    fn test_validation() {
        let mut config = AppConfig::default();
        config.report.font_family = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.defaults.energy_rate = -0.5;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let path = std::env::temp_dir().join(format!("missing-{}.toml", uuid::Uuid::new_v4()));
        assert!(matches!(
            AppConfig::load(Some(path)),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn test_report_settings_drop_blank_signatory() {
        let mut config = ReportConfig::default();
        config.signatory = Some(" ".to_string());
        assert_eq!(config.settings().signatory, None);
    }
}
