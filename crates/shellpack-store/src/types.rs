use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Where a source sits in the trust order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceTier {
    Official,
    UserAdded,
}

/// A remote repository packages may be fetched from (`owner/repo`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub id: String,
    pub tier: SourceTier,
}

impl Source {
    pub fn official(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tier: SourceTier::Official,
        }
    }

    pub fn user(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tier: SourceTier::UserAdded,
        }
    }

    pub fn is_official(&self) -> bool {
        self.tier == SourceTier::Official
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// Parsed `description.txt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDescriptor {
    pub description: String,
    pub author: String,
    pub version: String,
    pub requirements: Vec<String>,
}

impl Default for PackageDescriptor {
    fn default() -> Self {
        Self {
            description: "No description available".to_string(),
            author: "Unknown".to_string(),
            version: "0.0".to_string(),
            requirements: Vec::new(),
        }
    }
}

/// A package directory under the local package root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstalledPackage {
    pub name: String,
    pub dir: PathBuf,
    pub files: Vec<PathBuf>, // relative to `dir`, sorted
    pub descriptor: Option<PackageDescriptor>,
}

/// Result of materializing one package from one source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadOutcome {
    pub written: usize,
    pub failed: usize,
    /// True iff the top-level listing was retrieved.
    pub success: bool,
}

/// How an install or update ended. `Partial` still counts as installed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstallStatus {
    Complete {
        source: String,
        written: usize,
    },
    Partial {
        source: String,
        written: usize,
        failed: usize,
    },
}

impl InstallStatus {
    pub fn source(&self) -> &str {
        match self {
            InstallStatus::Complete { source, .. } | InstallStatus::Partial { source, .. } => source,
        }
    }

    pub fn is_partial(&self) -> bool {
        matches!(self, InstallStatus::Partial { .. })
    }
}

/// An installed package whose remote version differs from the local one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCandidate {
    pub name: String,
    pub local_version: String,
    pub remote_version: String,
}

/// Outcome of checking every installed package against its remote.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateScan {
    pub outdated: Vec<UpdateCandidate>,
    pub up_to_date: Vec<String>,
    /// Remote metadata could not be fetched.
    pub inconclusive: Vec<String>,
}

/// Where a descriptor shown to the user came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Origin {
    Installed,
    Remote(String),
}

/// A search or browse row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub source: String,
    pub installed: bool,
    pub descriptor: Option<PackageDescriptor>,
}

/// What happened when a package ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutcome {
    pub entry: PathBuf,
    pub exit_code: Option<i32>,
    pub nested: bool,
}
