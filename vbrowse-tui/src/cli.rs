use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use simplelog::LevelFilter;
use vbrowse::OverlayConfig;

use crate::error::AppError;

/// Browse a paginated table and search it.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// JSON file holding an array of records. Sample rows are generated
    /// without it.
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// JSON file with search overlay options.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of sample rows to generate.
    #[arg(long, default_value_t = 250)]
    pub rows: usize,

    /// Rows per page; 0 shows every row on one page.
    #[arg(long, default_value_t = 20)]
    pub page_size: usize,

    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    #[arg(long, default_value = "vbrowse-tui.log")]
    pub log_file: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

pub fn load_config(path: &Path) -> Result<OverlayConfig, AppError> {
    let text = fs::read_to_string(path).map_err(|source| AppError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| AppError::Config {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["vbrowse-tui"]);
        assert_eq!(cli.rows, 250);
        assert_eq!(cli.page_size, 20);
        assert_eq!(cli.log_level, LogLevel::Info);
        assert!(cli.data.is_none());
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from([
            "vbrowse-tui",
            "--data",
            "people.json",
            "--page-size",
            "0",
            "--log-level",
            "debug",
        ]);
        assert_eq!(cli.data, Some(PathBuf::from("people.json")));
        assert_eq!(cli.page_size, 0);
        assert_eq!(LevelFilter::from(cli.log_level), LevelFilter::Debug);
    }

    #[test]
    fn test_load_config_reports_path() {
        let err = load_config(Path::new("does-not-exist.json")).unwrap_err();
        assert!(matches!(err, AppError::Read { .. }));
        assert!(err.to_string().contains("does-not-exist.json"));
    }
}
