use crate::models::BookstoreConfig;
use crate::persistence::{self, FileManager};
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Name of the configuration file inside the configuration directory.
pub const CONFIG_FILE_NAME: &str = "bookstore.yaml";

/// Configuration manager for loading and saving `bookstore.yaml`.
///
/// The configuration directory doubles as the base for relative data paths,
/// so a default setup keeps `books.txt`, `sales.txt` and `backup/` next to the
/// YAML file.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: Utf8PathBuf,
    config_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the specified configuration directory.
    ///
    /// # Arguments
    /// * `config_dir` - Directory holding `bookstore.yaml` (e.g., "Bookstore Data")
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref().to_path_buf();

        // Create config directory if it doesn't exist
        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {}", config_dir))?;
        }

        Ok(Self {
            config_path: config_dir.join(CONFIG_FILE_NAME),
            config_dir,
        })
    }

    /// Load the configuration file.
    ///
    /// # Returns
    /// The loaded BookstoreConfig, or default if the file doesn't exist
    pub fn load_config(&self) -> Result<BookstoreConfig> {
        if !self.config_path.exists() {
            tracing::warn!(
                "Config file not found at {}, using defaults",
                self.config_path
            );
            return Ok(BookstoreConfig::default());
        }

        let file_contents = fs::read_to_string(&self.config_path)
            .with_context(|| format!("Failed to read config: {}", self.config_path))?;

        let config: BookstoreConfig = serde_yaml_ng::from_str(&file_contents)
            .with_context(|| format!("Failed to parse config: {}", self.config_path))?;

        tracing::info!("Loaded config from {}", self.config_path);
        Ok(config)
    }

    /// Save the configuration file.
    pub fn save_config(&self, config: &BookstoreConfig) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(config).context("Failed to serialize config to YAML")?;

        fs::write(&self.config_path, yaml_string)
            .with_context(|| format!("Failed to write config: {}", self.config_path))?;

        tracing::info!("Saved config to {}", self.config_path);
        Ok(())
    }

    /// File manager for the data files named in `config`.
    pub fn file_manager(&self, config: &BookstoreConfig) -> FileManager {
        FileManager::from_settings(&self.config_dir, &config.data)
    }

    /// Root directory for timestamped backups.
    pub fn backup_dir(&self, config: &BookstoreConfig) -> Utf8PathBuf {
        persistence::resolve(&self.config_dir, &config.data.backup_dir)
    }

    /// Destinations of the books and sales CSV exports.
    pub fn csv_paths(&self, config: &BookstoreConfig) -> (Utf8PathBuf, Utf8PathBuf) {
        (
            persistence::resolve(&self.config_dir, &config.data.books_csv),
            persistence::resolve(&self.config_dir, &config.data.sales_csv),
        )
    }

    /// Get the configuration directory path.
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    /// Get the configuration file path.
    pub fn config_path(&self) -> &Utf8Path {
        &self.config_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_config_manager() -> (ConfigManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        let manager = ConfigManager::new(&config_path).unwrap();
        (manager, temp_dir)
    }

    #[test]
    fn test_missing_config_uses_defaults() {
        let (manager, _temp_dir) = create_test_config_manager();
        let config = manager.load_config().unwrap();
        assert_eq!(config, BookstoreConfig::default());
    }

    #[test]
    fn test_load_save_config() {
        let (manager, _temp_dir) = create_test_config_manager();

        let mut config = BookstoreConfig::default();
        config.data.books_file = "inventory.txt".to_string();
        config.logging.debug_mode = true;
        manager.save_config(&config).unwrap();

        let loaded = manager.load_config().unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let (manager, _temp_dir) = create_test_config_manager();
        fs::write(manager.config_path(), "Data: [unclosed").unwrap();
        assert!(manager.load_config().is_err());
    }

    #[test]
    fn test_paths_resolve_against_config_dir() {
        let (manager, _temp_dir) = create_test_config_manager();
        let config = BookstoreConfig::default();

        let files = manager.file_manager(&config);
        assert_eq!(files.books_path(), manager.config_dir().join("books.txt").as_path());
        assert_eq!(manager.backup_dir(&config), manager.config_dir().join("backup"));

        let (books_csv, sales_csv) = manager.csv_paths(&config);
        assert_eq!(books_csv, manager.config_dir().join("books.csv"));
        assert_eq!(sales_csv, manager.config_dir().join("sales.csv"));
    }
}
