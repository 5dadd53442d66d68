use std::path::{Path, PathBuf};

use clap::Parser;

/// Environment variable naming the course file to open at startup.
pub const DATA_ENV_VAR: &str = "COURSE_BROWSER_DATA";

/// Opened automatically when present in the working directory.
pub const DEFAULT_DATA_FILE: &str = "UdemyCleanedTitle.csv";

// ---------------------------------------------------------------------------
// Startup configuration
// ---------------------------------------------------------------------------

/// Course Browser: search course titles and chart descriptive statistics.
#[derive(Parser, Debug, Clone, Default, PartialEq)]
#[command(name = "course-browser", version, about)]
pub struct AppConfig {
    /// Course file (.csv, .json or .parquet) loaded before the first frame.
    ///
    /// Falls back to `UdemyCleanedTitle.csv` in the working directory when
    /// it exists; otherwise the viewer starts empty.
    #[arg(env = DATA_ENV_VAR)]
    pub data_path: Option<PathBuf>,
}

impl AppConfig {
    /// Fall back to `DEFAULT_DATA_FILE` when no path was given and the file exists.
    pub fn with_default_file(self) -> Self {
        self.or_default_file(Path::new(DEFAULT_DATA_FILE).is_file())
    }

    fn or_default_file(mut self, default_exists: bool) -> Self {
        if self.data_path.is_none() && default_exists {
            self.data_path = Some(PathBuf::from(DEFAULT_DATA_FILE));
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_path_is_parsed() {
        let config = AppConfig::try_parse_from(["course-browser", "a.csv"]).unwrap();
        assert_eq!(config.data_path, Some(PathBuf::from("a.csv")));
    }

    #[test]
    fn argument_wins_over_default_file() {
        let config = AppConfig::try_parse_from(["course-browser", "b.parquet"])
            .unwrap()
            .or_default_file(true);
        assert_eq!(config.data_path, Some(PathBuf::from("b.parquet")));
    }

    #[test]
    fn environment_then_default_file() {
        std::env::set_var(DATA_ENV_VAR, "env.json");
        let from_env = AppConfig::try_parse_from(["course-browser"]).unwrap();
        let with_arg = AppConfig::try_parse_from(["course-browser", "arg.csv"]).unwrap();
        std::env::remove_var(DATA_ENV_VAR);

        assert_eq!(from_env.data_path, Some(PathBuf::from("env.json")));
        assert_eq!(with_arg.data_path, Some(PathBuf::from("arg.csv")));

        let bare = AppConfig::try_parse_from(["course-browser"]).unwrap();
        assert_eq!(bare.clone().or_default_file(false), AppConfig::default());
        assert_eq!(
            bare.or_default_file(true).data_path,
            Some(PathBuf::from(DEFAULT_DATA_FILE))
        );
    }

    #[test]
    fn help_flag_is_not_a_path() {
        let err = AppConfig::try_parse_from(["course-browser", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }
}
