//! Configuration loading and data folder resolution

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::feed::gesture::DEFAULT_SWIPE_THRESHOLD;
use crate::photo::THUMBNAIL_SIZE;

/// Environment variable overriding the data folder
pub const DATA_DIR_ENV: &str = "FOODSWIPE_DATA_DIR";

const APP_DIR: &str = "food-swipe";
const CONFIG_FILENAME: &str = "config.toml";
const RECIPES_FILENAME: &str = "recipes.json";
const FAVORITES_FILENAME: &str = "favorites.json";

/// Optional settings read from `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub data_dir: Option<PathBuf>,
    pub swipe_threshold: Option<f32>,
    pub persist_favorites: Option<bool>,
    pub thumbnail_size: Option<u32>,
}

/// Resolved runtime configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Folder holding recipes.json and favorites.json
    pub data_dir: PathBuf,
    /// Drag distance that commits a swipe
    pub swipe_threshold: f32,
    /// Keep favorites across launches
    pub persist_favorites: bool,
    /// Edge length for card thumbnails
    pub thumbnail_size: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
            persist_favorites: true,
            thumbnail_size: THUMBNAIL_SIZE,
        }
    }
}

impl AppConfig {
    /// Resolve configuration from the environment. Data folder priority:
    /// 1. Command-line argument
    /// 2. `FOODSWIPE_DATA_DIR`
    /// 3. `data_dir` in the config file
    /// 4. OS-dependent default
    ///
    /// A broken config file is logged and ignored.
    pub fn resolve(cli_data_dir: Option<&Path>) -> Self {
        let env_dir = std::env::var_os(DATA_DIR_ENV).map(PathBuf::from);
        Self::resolve_from(cli_data_dir.map(Path::to_path_buf), env_dir, default_config_path())
    }

    /// Same as `resolve`, with the config file location supplied
    pub fn resolve_from(
        cli_dir: Option<PathBuf>,
        env_dir: Option<PathBuf>,
        config_path: Option<PathBuf>,
    ) -> Self {
        let file = config_path
            .filter(|path| path.exists())
            .and_then(|path| match Self::load_file(&path) {
                Ok(file) => Some(file),
                Err(e) => {
                    tracing::warn!("⚠️  Ignoring config file {}: {}", path.display(), e);
                    None
                }
            });

        Self::resolve_with(cli_dir, env_dir, file.unwrap_or_default())
    }

    /// Resolution without touching the environment
    pub fn resolve_with(cli_dir: Option<PathBuf>, env_dir: Option<PathBuf>, file: FileConfig) -> Self {
        let defaults = Self::default();

        let data_dir = cli_dir
            .or(env_dir)
            .or(file.data_dir)
            .unwrap_or(defaults.data_dir);

        let swipe_threshold = match file.swipe_threshold {
            Some(t) if t.is_finite() && t > 0.0 => t,
            Some(t) => {
                tracing::warn!("Swipe threshold {} is not usable, keeping {}", t, defaults.swipe_threshold);
                defaults.swipe_threshold
            }
            None => defaults.swipe_threshold,
        };

        let thumbnail_size = match file.thumbnail_size {
            Some(0) | None => defaults.thumbnail_size,
            Some(size) => size,
        };

        Self {
            data_dir,
            swipe_threshold,
            persist_favorites: file.persist_favorites.unwrap_or(defaults.persist_favorites),
            thumbnail_size,
        }
    }

    /// Parse a TOML config file
    pub fn load_file(path: &Path) -> Result<FileConfig> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("read {}: {}", path.display(), e)))?;
        toml::from_str(&content).map_err(|e| Error::Config(format!("parse {}: {}", path.display(), e)))
    }

    pub fn recipes_path(&self) -> PathBuf {
        self.data_dir.join(RECIPES_FILENAME)
    }

    pub fn favorites_path(&self) -> PathBuf {
        self.data_dir.join(FAVORITES_FILENAME)
    }
}

/// Where the config file lives:
/// - Linux: ~/.config/food-swipe/config.toml
/// - macOS: ~/Library/Application Support/food-swipe/config.toml
/// - Windows: %APPDATA%\food-swipe\config.toml
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join(CONFIG_FILENAME))
}

/// OS-dependent default data folder, falling back to the working directory
fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .or_else(dirs::home_dir)
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("./food-swipe-data"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_beats_env_beats_file() {
        let file = FileConfig {
            data_dir: Some(PathBuf::from("/from/file")),
            ..FileConfig::default()
        };

        let cfg = AppConfig::resolve_with(
            Some(PathBuf::from("/from/cli")),
            Some(PathBuf::from("/from/env")),
            file.clone(),
        );
        assert_eq!(cfg.data_dir, PathBuf::from("/from/cli"));

        let cfg = AppConfig::resolve_with(None, Some(PathBuf::from("/from/env")), file.clone());
        assert_eq!(cfg.data_dir, PathBuf::from("/from/env"));

        let cfg = AppConfig::resolve_with(None, None, file);
        assert_eq!(cfg.data_dir, PathBuf::from("/from/file"));
    }

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::resolve_with(None, None, FileConfig::default());
        assert_eq!(cfg.data_dir, default_data_dir());
        assert_eq!(cfg.swipe_threshold, DEFAULT_SWIPE_THRESHOLD);
        assert!(cfg.persist_favorites);
        assert_eq!(cfg.thumbnail_size, THUMBNAIL_SIZE);
    }

    #[test]
    fn test_bad_threshold_keeps_default() {
        let file = FileConfig {
            swipe_threshold: Some(-5.0),
            thumbnail_size: Some(0),
            ..FileConfig::default()
        };
        let cfg = AppConfig::resolve_with(None, None, file);
        assert_eq!(cfg.swipe_threshold, DEFAULT_SWIPE_THRESHOLD);
        assert_eq!(cfg.thumbnail_size, THUMBNAIL_SIZE);
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "data_dir = \"/tmp/recipes\"\nswipe_threshold = 80.0\npersist_favorites = false\n",
        )
        .unwrap();

        let file = AppConfig::load_file(&path).unwrap();
        let cfg = AppConfig::resolve_with(None, None, file);
        assert_eq!(cfg.data_dir, PathBuf::from("/tmp/recipes"));
        assert_eq!(cfg.swipe_threshold, 80.0);
        assert!(!cfg.persist_favorites);
        assert_eq!(cfg.recipes_path(), PathBuf::from("/tmp/recipes/recipes.json"));
        assert_eq!(cfg.favorites_path(), PathBuf::from("/tmp/recipes/favorites.json"));
    }

    #[test]
    fn test_resolve_ignores_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "swipe_threshold = [oops").unwrap();

        let cfg = AppConfig::resolve_from(None, None, Some(path));
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn test_resolve_reads_file_and_skips_missing_one() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "swipe_threshold = 60.0\n").unwrap();

        let cfg = AppConfig::resolve_from(Some(PathBuf::from("/cli")), None, Some(path));
        assert_eq!(cfg.swipe_threshold, 60.0);
        assert_eq!(cfg.data_dir, PathBuf::from("/cli"));

        let missing = dir.path().join("nope.toml");
        assert_eq!(AppConfig::resolve_from(None, None, Some(missing)), AppConfig::default());
    }

    #[test]
    fn test_malformed_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "swipe_threshold = \"far\"").unwrap();

        let err = AppConfig::load_file(&path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
