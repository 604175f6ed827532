//! Caller-facing operations. Each one returns `ok` plus a human-readable
//! status line and logs the outcome; typed errors never escape from here.

use crate::errors::StoreError;
use crate::install as installer;
use crate::resolve;
use crate::sources;
use crate::store::Store;
use crate::types::{InstallStatus, Origin, UpdateScan};
use crate::updates::{self, Selection};
use crate::{catalog, exec};
use log::{error, info, warn};
use serde::Serialize;
use std::ffi::OsStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub ok: bool,
    pub message: String,
}

impl Report {
    pub fn ok(message: impl Into<String>) -> Self {
        let message = message.into();
        info!("{message}");
        Self { ok: true, message }
    }

    pub fn warn(message: impl Into<String>) -> Self {
        let message = message.into();
        warn!("{message}");
        Self { ok: true, message }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        let message = message.into();
        error!("{message}");
        Self { ok: false, message }
    }
}

fn install_report(name: &str, res: Result<InstallStatus, StoreError>, is_update: bool) -> Report {
    let (action, verb) = if is_update {
        ("update", "updated")
    } else {
        ("install", "installed")
    };
    match res {
        Ok(InstallStatus::Complete { source, written }) => Report::ok(format!(
            "Package {name} successfully {verb} from {source} ({written} files)."
        )),
        Ok(InstallStatus::Partial {
            source, failed, ..
        }) => Report::warn(format!(
            "Package {name} {verb} from {source} with {failed} errors. Some functionality may be limited."
        )),
        Err(e @ StoreError::Permission { .. }) => Report::fail(format!(
            "Permission error replacing {name}: {e}. Try closing any applications using it."
        )),
        Err(e) => Report::fail(format!("Could not {action} {name}: {e}")),
    }
}

pub fn install(store: &Store, name: &str) -> Report {
    install_report(name, installer::install(store, name), false)
}

pub fn update(store: &Store, name: &str) -> Report {
    install_report(name, installer::update(store, name), true)
}

/// Installs each name in turn and returns one report per package plus a
/// summary line.
pub fn install_many(store: &Store, names: &[String]) -> (Vec<Report>, Report) {
    let reports: Vec<Report> = installer::install_many(store, names)
        .into_iter()
        .map(|(name, res)| install_report(&name, res, false))
        .collect();
    let ok = reports.iter().filter(|r| r.ok).count();
    let summary = if ok == names.len() {
        Report::ok(format!("All {} packages installed successfully.", names.len()))
    } else {
        Report::fail(format!("Installed {ok} of {} packages.", names.len()))
    };
    (reports, summary)
}

pub fn uninstall(store: &Store, name: &str) -> Report {
    uninstall_report(name, installer::uninstall(store, name))
}

fn uninstall_report(name: &str, res: Result<(), StoreError>) -> Report {
    match res {
        Ok(()) => Report::ok(format!("Removed {name}.")),
        Err(e @ StoreError::Permission { .. }) => Report::fail(format!(
            "Permission error uninstalling {name}: {e}. Try closing any applications using it."
        )),
        Err(e) => Report::fail(format!("Error uninstalling {name}: {e}")),
    }
}

pub fn run<S: AsRef<OsStr>>(store: &Store, address: &str, argv: &[S]) -> Report {
    match exec::run(store, address, argv) {
        Ok(out) => match out.exit_code {
            Some(0) => Report::ok(format!("{address} finished.")),
            Some(code) => Report::ok(format!("{address} exited with code {code}.")),
            None => Report::ok(format!("{address} was terminated by a signal.")),
        },
        Err(e @ StoreError::NotFound(_)) => Report::fail(format!("File not found: {e}")),
        Err(e) => Report::fail(format!("Error running {address}: {e}")),
    }
}

pub fn is_valid(store: &Store, address: &str) -> Report {
    match resolve::resolve(store, address) {
        Some(p) => Report::ok(format!("{address} -> {}", p.display())),
        None => Report {
            ok: false,
            message: format!("{address} is not a runnable package."),
        },
    }
}

pub fn add_source(store: &Store, id: &str) -> Report {
    match sources::add_source(store, id) {
        Ok(s) => Report::ok(format!("Added source: {s}")),
        Err(e) => Report::fail(format!("Could not add source: {e}")),
    }
}

pub fn remove_source(store: &Store, id: &str) -> Report {
    match sources::remove_source(store, id) {
        Ok(()) => Report::ok(format!("Removed source: {id}")),
        Err(e) => Report::fail(format!("Could not remove source: {e}")),
    }
}

/// Scan for updates. The caller presents `outdated` and passes the user's
/// answer to [`apply_updates`].
pub fn check_updates(store: &Store) -> (Option<UpdateScan>, Report) {
    match updates::check_all(store) {
        Ok(scan) => {
            let report = if scan.outdated.is_empty() && scan.inconclusive.is_empty() {
                Report::ok("All packages are up to date!")
            } else if scan.outdated.is_empty() {
                Report::warn(format!(
                    "No updates found; could not check: {}",
                    scan.inconclusive.join(", ")
                ))
            } else {
                Report::ok(format!(
                    "Updates available for {} packages.",
                    scan.outdated.len()
                ))
            };
            (Some(scan), report)
        }
        Err(e) => (None, Report::fail(format!("Error checking updates: {e}"))),
    }
}

pub fn apply_updates(store: &Store, scan: &UpdateScan, answer: &str) -> (Vec<Report>, Report) {
    let selection = match Selection::parse(answer) {
        Ok(s) => s,
        Err(e) => return (Vec::new(), Report::fail(format!("Invalid input: {e}"))),
    };
    if selection == Selection::Nothing {
        return (Vec::new(), Report::ok("No packages updated."));
    }

    let results = updates::apply_selection(store, scan, &selection);
    if results.is_empty() {
        return (
            Vec::new(),
            Report::fail("No valid packages selected for update."),
        );
    }
    let total = results.len();
    let reports: Vec<Report> = results
        .into_iter()
        .map(|(name, res)| install_report(&name, res, true))
        .collect();
    let ok = reports.iter().filter(|r| r.ok).count();
    let summary = if ok == total {
        Report::ok(format!("All {total} packages updated successfully!"))
    } else {
        Report::fail(format!("Updated {ok} of {total} packages."))
    };
    (reports, summary)
}

/// Update one package. Unless `force`, refuses when the remote version
/// already matches.
pub fn update_checked(store: &Store, name: &str, force: bool) -> Report {
    match updates::check_one(store, name) {
        Err(e) => Report::fail(format!("Could not update {name}: {e}")),
        Ok((local, Some(remote))) if local == remote && !force => Report {
            ok: false,
            message: format!(
                "Package {name} is already at the latest version ({local}); use --force to reinstall."
            ),
        },
        Ok((local, None)) if !force => Report {
            ok: false,
            message: format!(
                "Could not check the online version of {name} (local {local}); use --force to update anyway."
            ),
        },
        Ok(_) => update(store, name),
    }
}

/// Full descriptor of one package, local copy first.
pub fn describe(store: &Store, name: &str) -> Report {
    match catalog::describe(store, name) {
        Ok(Some((d, origin))) => {
            let from = match origin {
                Origin::Installed => "installed".to_string(),
                Origin::Remote(src) => src,
            };
            let mut msg = format!(
                "Package information for {name} (from {from}):\n[description]\n{}\n[author]\n{}\n[version]\n{}",
                d.description, d.author, d.version
            );
            if !d.requirements.is_empty() {
                msg.push_str("\n[requirements]\n");
                msg.push_str(&d.requirements.join("\n"));
            }
            Report::ok(msg)
        }
        Ok(None) => Report::fail(format!("No description available for {name}")),
        Err(e) => Report::fail(format!("Error reading description of {name}: {e}")),
    }
}

pub fn version(store: &Store, name: &str) -> Report {
    let status = if catalog::is_installed(store, name) {
        "installed"
    } else {
        "available"
    };
    match catalog::describe(store, name) {
        Ok(Some((d, _))) => Report::ok(format!("Package {name} ({status})\nVersion: {}", d.version)),
        Ok(None) => Report::fail(format!("Package {name} not found.")),
        Err(e) => Report::fail(format!("Error reading version of {name}: {e}")),
    }
}
