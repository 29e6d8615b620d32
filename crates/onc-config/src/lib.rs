//! Bring-up configuration for the onclite device family
//!
//! TOML-based configuration for the boot-time bring-up binary: where the
//! vibrator control files live, where boot identification comes from and
//! where the staged property overrides get published. Every field has a
//! production default, so a missing file is not an error.

use onc_hal::VibratorConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Standard configuration paths
pub const CONFIG_DIR: &str = "/vendor/etc/onc";
pub const LOCAL_CONFIG_DIR: &str = "/data/local/tmp/onc";

/// Property staging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropsConfig {
    /// Kernel command line to seed boot identification from.
    pub cmdline: PathBuf,
    /// File the staged property overrides are published to.
    pub output: PathBuf,
}

impl Default for PropsConfig {
    fn default() -> Self {
        Self {
            cmdline: PathBuf::from("/proc/cmdline"),
            output: PathBuf::from("/run/onc/props"),
        }
    }
}

/// Main bring-up configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BringupConfig {
    #[serde(default)]
    pub vibrator: VibratorConfig,

    #[serde(default)]
    pub props: PropsConfig,
}

impl BringupConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load_default() -> Result<Self, ConfigError> {
        // A local override wins over the vendor image copy
        let local_config = Path::new(LOCAL_CONFIG_DIR).join("bringup.toml");
        if local_config.exists() {
            return Self::load(&local_config);
        }

        let vendor_config = Path::new(CONFIG_DIR).join("bringup.toml");
        if vendor_config.exists() {
            return Self::load(&vendor_config);
        }

        tracing::warn!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, contents)?;
        tracing::info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = BringupConfig::default();
        assert_eq!(
            config.vibrator.device_dir,
            PathBuf::from("/sys/class/leds/vibrator")
        );
        assert_eq!(config.props.cmdline, PathBuf::from("/proc/cmdline"));
        assert_eq!(config.props.output, PathBuf::from("/run/onc/props"));
    }

    #[test]
    fn test_serialize_deserialize() {
        let config = BringupConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: BringupConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.vibrator.device_dir, parsed.vibrator.device_dir);
        assert_eq!(config.props.output, parsed.props.output);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[vibrator]\ndevice_dir = \"/tmp/vib\"\n\n[props]\ncmdline = \"/tmp/cmdline\"\noutput = \"/tmp/props\"\n"
        )
        .unwrap();

        let config = BringupConfig::load(file.path()).unwrap();
        assert_eq!(config.vibrator.device_dir, PathBuf::from("/tmp/vib"));
        assert_eq!(config.props.cmdline, PathBuf::from("/tmp/cmdline"));
    }

    #[test]
    fn test_partial_file_keeps_section_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[props]\ncmdline = \"/tmp/cmdline\"\noutput = \"/tmp/props\"").unwrap();

        let config = BringupConfig::load(file.path()).unwrap();
        assert_eq!(
            config.vibrator.device_dir,
            PathBuf::from("/sys/class/leds/vibrator")
        );
        assert_eq!(config.props.cmdline, PathBuf::from("/tmp/cmdline"));
    }

    #[test]
    fn test_save_round_trip() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("etc/bringup.toml");

        let mut config = BringupConfig::default();
        config.vibrator.device_dir = PathBuf::from("/tmp/vib");
        config.save(&path).unwrap();

        let loaded = BringupConfig::load(&path).unwrap();
        assert_eq!(loaded.vibrator.device_dir, PathBuf::from("/tmp/vib"));
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let err = BringupConfig::load(Path::new("/nonexistent/bringup.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::NotFound(PathBuf::from("/vendor/etc/onc/bringup.toml"));
        assert!(format!("{}", err).contains("not found"));
    }
}
