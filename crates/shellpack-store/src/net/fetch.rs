use super::{EntryKind, Remote, RemoteEntry};
use crate::errors::{Result, StoreError};
use crate::types::DownloadOutcome;
use log::{debug, warn};
use std::fs;
use std::path::Path;

/// Materialize `<source>/<package>` into `dest`.
///
/// A failed top-level listing returns `success = false` with nothing written,
/// so the caller can move on to the next source. Individual file failures only
/// bump `failed`. Directories are followed one level deep.
pub fn fetch_package(
    remote: &dyn Remote,
    source: &str,
    package: &str,
    dest: &Path,
) -> DownloadOutcome {
    let mut outcome = DownloadOutcome::default();

    let entries = match remote.list_package(source, package) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("listing {source}/{package} failed: {e}");
            return outcome;
        }
    };
    outcome.success = true;

    for entry in &entries {
        if !is_safe_name(&entry.name) {
            warn!("rejecting remote entry name {:?} in {source}/{package}", entry.name);
            outcome.failed += 1;
            continue;
        }
        match entry.kind {
            EntryKind::File => write_file(remote, entry, dest, &mut outcome),
            EntryKind::Dir => fetch_subdir(remote, entry, dest, &mut outcome),
        }
    }

    debug!(
        "fetched {source}/{package}: written={} failed={}",
        outcome.written, outcome.failed
    );
    outcome
}

fn fetch_subdir(remote: &dyn Remote, entry: &RemoteEntry, dest: &Path, outcome: &mut DownloadOutcome) {
    let dir = dest.join(&entry.name);
    if let Err(e) = fs::create_dir_all(&dir) {
        warn!("cannot create {}: {e}", dir.display());
        outcome.failed += 1;
        return;
    }

    let children = match remote.list_dir(&entry.locator) {
        Ok(children) => children,
        Err(e) => {
            warn!("listing subdirectory {} failed: {e}", entry.name);
            return;
        }
    };

    for child in &children {
        match child.kind {
            EntryKind::File if is_safe_name(&child.name) => {
                write_file(remote, child, &dir, outcome)
            }
            EntryKind::File => {
                warn!("rejecting remote entry name {:?} in {}", child.name, entry.name);
                outcome.failed += 1;
            }
            EntryKind::Dir => {
                debug!("skipping nested directory {}/{}", entry.name, child.name)
            }
        }
    }
}

fn write_file(remote: &dyn Remote, entry: &RemoteEntry, dir: &Path, outcome: &mut DownloadOutcome) {
    match download_into(remote, entry, dir) {
        Ok(()) => outcome.written += 1,
        Err(e) => {
            warn!("failed to fetch {}: {e}", entry.name);
            outcome.failed += 1;
        }
    }
}

fn download_into(remote: &dyn Remote, entry: &RemoteEntry, dir: &Path) -> Result<()> {
    let bytes = remote.fetch_bytes(&entry.locator)?;
    let path = dir.join(&entry.name);
    fs::write(&path, bytes).map_err(|e| StoreError::fs(&path, e))?;
    Ok(())
}

/// Remote names become single path components; nothing may escape `dest`.
fn is_safe_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && !name.contains('\0')
}
