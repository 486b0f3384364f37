use crate::error::AppError;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use strum::{Display, EnumString};

/// Default minimum sample size for a win-rate entry to be shown.
pub const DEFAULT_MIN_GAME_COUNT: u32 = 5000;

/// How win-rate-like fields are rendered.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, clap::ValueEnum,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum ResultFormat {
    #[default]
    WinRate,
    Grade,
    Rating,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub result_format: ResultFormat,
    pub min_game_count: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            result_format: ResultFormat::WinRate,
            min_game_count: DEFAULT_MIN_GAME_COUNT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub settings: Settings,
    pub data_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let result_format = match env::var("DRAFT_RESULT_FORMAT") {
            Ok(raw) => ResultFormat::from_str(raw.trim()).map_err(|_| {
                AppError::Config(format!(
                    "DRAFT_RESULT_FORMAT must be win-rate, grade or rating (got '{}')",
                    raw
                ))
            })?,
            Err(_) => ResultFormat::default(),
        };

        let min_game_count = match env::var("DRAFT_MIN_GAME_COUNT") {
            Ok(raw) => raw.trim().parse::<u32>().map_err(|_| {
                AppError::Config(format!(
                    "DRAFT_MIN_GAME_COUNT must be a non-negative integer (got '{}')",
                    raw
                ))
            })?,
            Err(_) => DEFAULT_MIN_GAME_COUNT,
        };

        let data_dir = env::var("DRAFT_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| Self::default_data_dir());

        Ok(Config {
            settings: Settings {
                result_format,
                min_game_count,
            },
            data_dir,
        })
    }

    pub fn default_data_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".draft_lens")
    }

    /// Resolve a user-supplied path against the data directory when it is relative
    /// and does not exist in the working directory.
    pub fn resolve(&self, path: &str) -> PathBuf {
        let candidate = PathBuf::from(path);
        if candidate.is_absolute() || candidate.exists() {
            candidate
        } else {
            self.data_dir.join(candidate)
        }
    }
}
