use dirs::data_dir;
use std::env;
use std::path::PathBuf;

/// Overrides the program home (tests, portable installs).
pub const ENV_HOME: &str = "SHELLPACK_HOME";

/// ~/.local/share/Shellpack   (or platform-equivalent, or $SHELLPACK_HOME)
pub fn shellpack_home() -> PathBuf {
    if let Some(p) = env::var_os(ENV_HOME).filter(|p| !p.is_empty()) {
        return PathBuf::from(p);
    }
    data_dir()
        .unwrap_or_else(|| PathBuf::from("~/.local/share"))
        .join("Shellpack")
}

/// ~/.local/share/Shellpack/packages
pub fn packages_dir() -> PathBuf {
    shellpack_home().join("packages")
}

/// ~/.local/share/Shellpack/sources.json
pub fn sources_path() -> PathBuf {
    shellpack_home().join("sources.json")
}

/// ~/.local/share/Shellpack/config.json
pub fn config_path() -> PathBuf {
    shellpack_home().join("config.json")
}

/// ~/.local/share/Shellpack/logs
pub fn logs_dir() -> PathBuf {
    shellpack_home().join("logs")
}
