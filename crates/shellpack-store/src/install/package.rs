use super::deps::is_bundled;
use super::{remove_package_dir, validate_package_name};
use crate::errors::{Result, StoreError};
use crate::manifest;
use crate::net::fetch_package;
use crate::resolve::is_valid;
use crate::sources::list_sources;
use crate::spinner::with_spinner;
use crate::store::Store;
use crate::types::{DownloadOutcome, InstallStatus, Source};
use log::{error, info, warn};
use std::fs;
use std::path::Path;

pub fn install(store: &Store, name: &str) -> Result<InstallStatus> {
    install_package(store, name, false)
}

/// Replace an installed package. Behaves like `install` when it is absent.
pub fn update(store: &Store, name: &str) -> Result<InstallStatus> {
    install_package(store, name, true)
}

/// Shared install/update path.
///
/// Sources are tried official first; the first one whose listing succeeds is
/// accepted even if some files failed. Dependency failures are logged and
/// never undo the package.
pub fn install_package(store: &Store, name: &str, is_update: bool) -> Result<InstallStatus> {
    let name = validate_package_name(name)?;
    let root = store.root();
    fs::create_dir_all(root).map_err(|e| StoreError::fs(root, e))?;

    let dir = store.package_dir(name);
    if dir.exists() {
        if !is_update {
            warn!("package {name} already installed");
            return Err(StoreError::AlreadyInstalled(name.to_string()));
        }
        remove_package_dir(&dir)?;
        info!("removed {} for update", dir.display());
    }
    fs::create_dir_all(&dir).map_err(|e| StoreError::fs(&dir, e))?;

    let Some((source, outcome)) = fetch_from_first_source(store, name, &dir) else {
        if let Err(e) = remove_package_dir(&dir) {
            warn!("could not clean up {}: {e}", dir.display());
        }
        error!("package {name} not found in any source");
        return Err(StoreError::PackageNotFound(name.to_string()));
    };

    if !is_valid(store, name) {
        warn!(
            "{name} has no {}; it may not be runnable",
            store.layout().default_entry()
        );
    }

    install_requirements(store, name, &dir);

    let verb = if is_update { "updated" } else { "installed" };
    let status = if outcome.failed == 0 {
        info!("{name} {verb} from {source}: {} files", outcome.written);
        InstallStatus::Complete {
            source: source.id,
            written: outcome.written,
        }
    } else {
        warn!(
            "{name} {verb} from {source} with {} failed files",
            outcome.failed
        );
        InstallStatus::Partial {
            source: source.id,
            written: outcome.written,
            failed: outcome.failed,
        }
    };
    Ok(status)
}

/// Install several packages in order; one failure does not stop the rest.
pub fn install_many(store: &Store, names: &[String]) -> Vec<(String, Result<InstallStatus>)> {
    let mut results = Vec::with_capacity(names.len());
    for (i, name) in names.iter().enumerate() {
        info!("installing {name} ({}/{})", i + 1, names.len());
        results.push((name.clone(), install(store, name)));
    }
    let ok = results.iter().filter(|(_, r)| r.is_ok()).count();
    info!("installed {ok} of {} packages", names.len());
    results
}

fn fetch_from_first_source(
    store: &Store,
    name: &str,
    dir: &Path,
) -> Option<(Source, DownloadOutcome)> {
    for source in list_sources(store) {
        info!("trying source {source} for {name}");
        let outcome = with_spinner(
            store.is_quiet(),
            &format!("Fetching {name} from {source}"),
            || fetch_package(store.remote(), &source.id, name, dir),
        );
        if outcome.success {
            return Some((source, outcome));
        }
    }
    None
}

fn install_requirements(store: &Store, name: &str, dir: &Path) {
    let desc = match manifest::read_local(dir) {
        Ok(Some(desc)) => desc,
        Ok(None) => return,
        Err(e) => {
            warn!("cannot read descriptor of {name}: {e}");
            return;
        }
    };

    for req in &desc.requirements {
        if is_bundled(req) {
            info!("skipping requirement {req} of {name} (bundled)");
            continue;
        }
        let res = with_spinner(store.is_quiet(), &format!("Installing {req}"), || {
            store.deps().install(req)
        });
        match res {
            Ok(()) => info!("installed requirement {req} for {name}"),
            Err(e) => error!("installing requirement {req} for {name} failed: {e}"),
        }
    }
}
