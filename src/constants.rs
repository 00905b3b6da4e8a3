use std::path::PathBuf;

use dirs::preference_dir;

/// Directory holding the settings file, the working directory when the platform has none.
pub fn base_path() -> PathBuf {
    preference_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kmaze")
}
