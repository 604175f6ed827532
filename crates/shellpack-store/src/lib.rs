//! shellpack-store
//!
//! Blocking package store for the shellpack shell.
//! - Keeps an ordered list of remote sources (official first).
//! - Fetches a package tree from the first source that has it and installs its
//!   declared dependencies.
//! - Resolves dotted addresses (`pkg`, `pkg.file`, `pkg.dir.file`) to entry
//!   files and runs them as child processes.
//!
//! Callers that only want `ok` + a status line go through [`api`]; the typed
//! modules return [`StoreError`].

pub mod api;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod exec;
pub mod install;
pub mod logging;
pub mod manifest;
pub mod net;
pub mod paths;
pub mod resolve;
pub mod sources;
pub mod spinner;
pub mod store;
pub mod types;
pub mod updates;

pub use config::{Layout, Settings, OFFICIAL_SOURCE};
pub use errors::{Result, StoreError};
pub use exec::{is_nested_session, run, REENTRANCY_MARKER};
pub use install::{install, install_package, uninstall, update, DependencyInstaller};
pub use manifest::{parse_descriptor, DESCRIPTOR_FILE};
pub use net::{fetch_package, EntryKind, Remote, RemoteEntry};
pub use paths::*;
pub use resolve::{is_valid, resolve, PackageAddress};
pub use sources::{add_source, list_sources, remove_source};
pub use store::Store;
pub use types::*;
pub use updates::{check_all, Selection};
