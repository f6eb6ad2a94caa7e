use serde::{Deserialize, Serialize};

/// Configuration from `bookstore.yaml`
///
/// Every field has a serde default, so a partial file (or no file at all)
/// still produces a usable configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookstoreConfig {
    #[serde(rename = "Data", default)]
    pub data: DataSettings,

    #[serde(rename = "Logging", default)]
    pub logging: LogSettings,
}

/// Locations of the persisted data files.
///
/// Relative paths are resolved against the configuration directory by
/// [`ConfigManager`](crate::config::ConfigManager).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSettings {
    #[serde(rename = "Books File", default = "default_books_file")]
    pub books_file: String,

    #[serde(rename = "Sales File", default = "default_sales_file")]
    pub sales_file: String,

    #[serde(rename = "Backup Dir", default = "default_backup_dir")]
    pub backup_dir: String,

    #[serde(rename = "Books CSV", default = "default_books_csv")]
    pub books_csv: String,

    #[serde(rename = "Sales CSV", default = "default_sales_csv")]
    pub sales_csv: String,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            books_file: default_books_file(),
            sales_file: default_sales_file(),
            backup_dir: default_backup_dir(),
            books_csv: default_books_csv(),
            sales_csv: default_sales_csv(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogSettings {
    #[serde(rename = "Log Dir", default = "default_log_dir")]
    pub log_dir: String,

    #[serde(rename = "Log Prefix", default = "default_log_prefix")]
    pub log_prefix: String,

    #[serde(rename = "Debug Mode", default)]
    pub debug_mode: bool,

    #[serde(rename = "Console Output", default = "default_true")]
    pub console_output: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            log_prefix: default_log_prefix(),
            debug_mode: false,
            console_output: true,
        }
    }
}

fn default_books_file() -> String {
    "books.txt".to_string()
}

fn default_sales_file() -> String {
    "sales.txt".to_string()
}

fn default_backup_dir() -> String {
    "backup".to_string()
}

fn default_books_csv() -> String {
    "books.csv".to_string()
}

fn default_sales_csv() -> String {
    "sales.csv".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_log_prefix() -> String {
    "bookstore".to_string()
}

fn default_true() -> bool {
    true
}
