//! Pull-only access to package sources.
//!
//! `Remote` is the seam between the installer and the network: the store owns
//! one boxed implementation (`GithubRemote` in production, in-memory fakes in
//! tests).

pub mod fetch;
pub mod github;

pub use fetch::fetch_package;
pub use github::GithubRemote;

use crate::errors::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
}

/// One row of a remote directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEntry {
    pub kind: EntryKind,
    pub name: String,
    /// Download URL for files, listing URL for directories.
    pub locator: String,
}

impl RemoteEntry {
    pub fn file(name: impl Into<String>, locator: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::File,
            name: name.into(),
            locator: locator.into(),
        }
    }

    pub fn dir(name: impl Into<String>, locator: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Dir,
            name: name.into(),
            locator: locator.into(),
        }
    }
}

pub trait Remote {
    /// Entries directly under `<source>/<package>`.
    fn list_package(&self, source: &str, package: &str) -> Result<Vec<RemoteEntry>>;

    /// Entries under a directory locator returned by a previous listing.
    fn list_dir(&self, locator: &str) -> Result<Vec<RemoteEntry>>;

    fn fetch_bytes(&self, locator: &str) -> Result<Vec<u8>>;

    /// Raw text of `<source>/<package>/<file>`, `None` if the source lacks it.
    fn fetch_text(&self, source: &str, package: &str, file: &str) -> Result<Option<String>>;

    /// Top-level package directories of a source.
    fn list_packages(&self, source: &str) -> Result<Vec<String>>;

    /// Whether the repository behind `source` exists and is reachable.
    fn probe_source(&self, source: &str) -> Result<bool>;
}
