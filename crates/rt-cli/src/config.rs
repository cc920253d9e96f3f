//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory that exported reports are written to.
    pub output_dir: PathBuf,

    /// Emit GPS race-start/race-end zone markers during analysis.
    pub area_markers: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            area_markers: false,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (RT_*)
        figment = figment.merge(Env::prefixed("RT_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for rt.
///
/// On Linux: `~/.config/rt`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("rt"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirs_config_path_ends_with_rt() {
        let path = dirs_config_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "rt");
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert!(!config.area_markers);
    }

    #[test]
    fn test_explicit_file_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "custom.toml",
                "output_dir = \"reports\"\narea_markers = true\n",
            )?;
            let config = Config::load_from(Some(Path::new("custom.toml")))?;
            assert_eq!(config.output_dir, PathBuf::from("reports"));
            assert!(config.area_markers);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("custom.toml", "area_markers = true\n")?;
            jail.set_env("RT_AREA_MARKERS", "false");
            jail.set_env("RT_OUTPUT_DIR", "out");
            let config = Config::load_from(Some(Path::new("custom.toml")))?;
            assert!(!config.area_markers);
            assert_eq!(config.output_dir, PathBuf::from("out"));
            Ok(())
        });
    }
}
