//! Data directory layout.

use std::path::{Path, PathBuf};

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `CHATBOARD_DATA_DIR` environment variable
/// 2. `~/.chatboard`
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CHATBOARD_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".chatboard");
    }

    // Last resort: current directory
    PathBuf::from(".chatboard")
}

/// Resolve a configured file path: absolute paths are kept, relative ones
/// live under the data directory.
pub fn resolve_in_data_dir(data_dir: &Path, file: &str) -> PathBuf {
    let path = Path::new(file);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        data_dir.join(path)
    }
}
