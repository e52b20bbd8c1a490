//! Process configuration for the Flutter host.
//!
//! # Invariants
//! - Resolved once per process; later environment changes are ignored.

use std::path::PathBuf;
use std::sync::OnceLock;

const DB_PATH_ENV: &str = "MINDFUL_GROVE_DB_PATH";
const DEFAULT_DB_FILE_NAME: &str = "mindful_grove.sqlite3";

static GARDEN_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Garden database location: `MINDFUL_GROVE_DB_PATH` when set and
/// non-blank, otherwise a file in the system temp directory.
pub fn garden_db_path() -> PathBuf {
    GARDEN_DB_PATH
        .get_or_init(|| db_path_from(std::env::var(DB_PATH_ENV).ok()))
        .clone()
}

fn db_path_from(raw: Option<String>) -> PathBuf {
    raw.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::db_path_from;
    use std::path::PathBuf;

    #[test]
    fn blank_env_value_falls_back_to_temp_dir() {
        let fallback = db_path_from(Some("   ".to_string()));
        assert!(fallback.starts_with(std::env::temp_dir()));
        assert!(fallback.ends_with("mindful_grove.sqlite3"));
    }

    #[test]
    fn explicit_path_is_trimmed() {
        assert_eq!(
            db_path_from(Some(" /data/grove.db ".to_string())),
            PathBuf::from("/data/grove.db")
        );
    }
}
