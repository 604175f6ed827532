use crate::errors::{Result, StoreError};
use once_cell::sync::Lazy;
use std::process::{Command, Stdio};

/// Requirements the host already ships; never handed to the installer.
pub static BUNDLED_REQUIREMENTS: Lazy<Vec<&'static str>> =
    Lazy::new(|| vec!["colorama", "requests", "datetime", "json"]);

pub fn is_bundled(requirement: &str) -> bool {
    BUNDLED_REQUIREMENTS
        .iter()
        .any(|b| b.eq_ignore_ascii_case(requirement.trim()))
}

/// The host environment's installer for a package's runtime dependencies.
pub trait DependencyInstaller {
    fn install(&self, requirement: &str) -> Result<()>;
}

/// `<python> -m pip install <requirement>`, output discarded.
pub struct PipInstaller {
    python: String,
}

impl PipInstaller {
    pub fn new(python: impl Into<String>) -> Self {
        Self {
            python: python.into(),
        }
    }
}

impl DependencyInstaller for PipInstaller {
    fn install(&self, requirement: &str) -> Result<()> {
        let status = Command::new(&self.python)
            .args(["-m", "pip", "install", requirement])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()?;
        if !status.success() {
            return Err(StoreError::Msg(format!(
                "pip install {requirement} exited with code {:?}",
                status.code().unwrap_or(-1)
            )));
        }
        Ok(())
    }
}
