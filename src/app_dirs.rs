use directories::ProjectDirs;
use std::path::PathBuf;

/// Environment variable that pins the storage file to an explicit path.
pub const STORAGE_PATH_ENV: &str = "SAKHATYPE_STORAGE";

const STORAGE_FILE: &str = "session.json";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// Location of the persisted session/preferences file.
    pub fn storage_path() -> PathBuf {
        if let Some(path) = std::env::var_os(STORAGE_PATH_ENV).filter(|p| !p.is_empty()) {
            return PathBuf::from(path);
        }

        if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("sakhatype")
                .join(STORAGE_FILE)
        } else if let Some(proj_dirs) = ProjectDirs::from("", "", "sakhatype") {
            proj_dirs.data_local_dir().join(STORAGE_FILE)
        } else {
            PathBuf::from(format!("sakhatype_{STORAGE_FILE}"))
        }
    }
}
