//! Platform data directory resolution.

use std::env;
use std::path::PathBuf;

use super::error::PathError;

/// Environment variable overriding the data root.
pub const DATA_DIR_ENV: &str = "WMARKET_DATA_DIR";

/// Get the root directory for application data (ledger, files, `.env`).
///
/// Resolution order:
/// 1. `WMARKET_DATA_DIR` environment variable (highest priority)
/// 2. System data directory (e.g., `~/.local/share/wmarket`)
///
/// The directory is not created here; see [`super::ensure_directory`].
pub fn data_root() -> Result<PathBuf, PathError> {
    if let Ok(path) = env::var(DATA_DIR_ENV) {
        if !path.trim().is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    let data_dir = dirs::data_local_dir().ok_or(PathError::NoDataDir)?;
    Ok(data_dir.join("wmarket"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::test_utils::DataDirOverride;

    #[test]
    fn test_env_override_wins() {
        let _env = DataDirOverride::set("/tmp/wmarket-test-root");
        assert_eq!(data_root().unwrap(), PathBuf::from("/tmp/wmarket-test-root"));
    }

    #[test]
    fn test_blank_override_ignored() {
        let _env = DataDirOverride::set("  ");
        if let Ok(root) = data_root() {
            assert!(root.ends_with("wmarket"));
        }
    }
}
