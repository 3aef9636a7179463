//! Wall configuration loaded via OrthoConfig.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_DATA_DIR: &str = "wall-data";

/// Configuration values for the `wall` binary.
///
/// Values come from `WALL_*` environment variables and configuration files.
/// The CLI `--data-dir` flag overrides `data_dir`.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "WALL")]
pub struct WallSettings {
    /// Directory holding the persisted records.
    pub data_dir: Option<PathBuf>,
    /// Emit logs as JSON lines instead of compact text.
    #[ortho_config(default = false)]
    pub log_json: bool,
}

impl WallSettings {
    /// Return the store directory, preferring `override_dir` when given.
    pub fn data_dir(&self, override_dir: Option<PathBuf>) -> PathBuf {
        override_dir
            .or_else(|| self.data_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for wall configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> WallSettings {
        WallSettings::load_from_iter([OsString::from("wall")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("WALL_DATA_DIR", None::<String>),
            ("WALL_LOG_JSON", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert!(!settings.log_json);
        assert!(settings.data_dir.is_none());
        assert_eq!(settings.data_dir(None), PathBuf::from(DEFAULT_DATA_DIR));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("WALL_DATA_DIR", Some("/tmp/wall-env".to_owned())),
            ("WALL_LOG_JSON", Some("true".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert!(settings.log_json);
        assert_eq!(settings.data_dir(None), PathBuf::from("/tmp/wall-env"));
    }

    #[rstest]
    fn cli_override_wins_over_environment() {
        let _guard = lock_env([("WALL_DATA_DIR", Some("/tmp/wall-env".to_owned()))]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.data_dir(Some(PathBuf::from("/tmp/wall-cli"))),
            PathBuf::from("/tmp/wall-cli")
        );
    }
}
