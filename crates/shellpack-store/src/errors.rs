use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Msg(String),

    #[error("invalid input: {0}")]
    Validation(String),

    #[error("cannot remove the official package source {0}")]
    ProtectedSource(String),

    #[error("package {0} not found in any configured source")]
    PackageNotFound(String),

    #[error("package {0} is already installed; use update to replace it")]
    AlreadyInstalled(String),

    #[error("package {0} is not installed")]
    NotInstalled(String),

    #[error("nothing to run at {0}")]
    NotFound(String),

    #[error("permission denied on {}: {source}", path.display())]
    Permission {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Net(#[from] reqwest::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl StoreError {
    /// Wraps an I/O error on `path`, keeping permission failures distinct.
    pub fn fs(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::PermissionDenied {
            StoreError::Permission {
                path: path.into(),
                source: err,
            }
        } else {
            StoreError::Io(err)
        }
    }

    pub fn is_permission(&self) -> bool {
        matches!(self, StoreError::Permission { .. })
    }
}

/// Context-wrapped transport errors stay `Net`; anything else becomes `Msg`.
impl From<anyhow::Error> for StoreError {
    fn from(e: anyhow::Error) -> Self {
        let msg = format!("{e:#}");
        match e.downcast::<reqwest::Error>() {
            Ok(net) => StoreError::Net(net),
            Err(_) => StoreError::Msg(msg),
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
