use std::path::PathBuf;

/// XDG app name used for the config directory.
pub const APP_NAME: &str = "founder-intake";

/// Config directory: `~/.config/founder-intake` on Linux.
///
/// Returns `None` when no home directory can be determined (e.g. bare containers).
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Path of the service config file inside [`config_dir`].
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}
