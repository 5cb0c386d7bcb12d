use std::env;
use std::path::{Path, PathBuf};

const DATA_DIR_VAR: &str = "DIET_PLANNER_DATA_DIR";
const FOODS_FILE_VAR: &str = "DIET_PLANNER_FOODS_FILE";
const LEDGER_FILE_VAR: &str = "DIET_PLANNER_LEDGER_FILE";

pub const DEFAULT_FOODS_FILE: &str = "foods.json";
pub const DEFAULT_LEDGER_FILE: &str = "meals_log.json";

/// Where the custom foods and the intake ledger live.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub foods_file: PathBuf,
    pub ledger_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self::in_dir(".")
    }
}

impl Config {
    /// Default file names under `data_dir`.
    pub fn in_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            foods_file: PathBuf::from(DEFAULT_FOODS_FILE),
            ledger_file: PathBuf::from(DEFAULT_LEDGER_FILE),
        }
    }

    /// Read `DIET_PLANNER_*` variables, loading `.env` first if present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = match env::var(DATA_DIR_VAR) {
            Ok(dir) if !dir.is_empty() => Self::in_dir(dir),
            _ => Self::default(),
        };
        if let Ok(file) = env::var(FOODS_FILE_VAR) {
            if !file.is_empty() {
                config.foods_file = PathBuf::from(file);
            }
        }
        if let Ok(file) = env::var(LEDGER_FILE_VAR) {
            if !file.is_empty() {
                config.ledger_file = PathBuf::from(file);
            }
        }
        config
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn foods_path(&self) -> PathBuf {
        resolve(&self.data_dir, &self.foods_file)
    }

    pub fn ledger_path(&self) -> PathBuf {
        resolve(&self.data_dir, &self.ledger_file)
    }
}

// Absolute file paths ignore the data dir.
fn resolve(dir: &Path, file: &Path) -> PathBuf {
    if file.is_absolute() {
        file.to_path_buf()
    } else {
        dir.join(file)
    }
}
