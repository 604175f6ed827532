use crate::catalog::{self, remote_descriptor};
use crate::errors::{Result, StoreError};
use crate::install::update;
use crate::spinner::with_spinner;
use crate::store::Store;
use crate::types::{InstallStatus, PackageDescriptor, UpdateCandidate, UpdateScan};
use log::{info, warn};

/// Compare every installed package with its remote descriptor.
///
/// Versions are opaque: any difference counts as an update. Packages whose
/// remote metadata cannot be fetched land in `inconclusive`.
pub fn check_all(store: &Store) -> Result<UpdateScan> {
    let installed = catalog::installed(store)?;
    let mut scan = UpdateScan::default();

    for pkg in installed {
        let local = local_version(pkg.descriptor);
        let remote = with_spinner(
            store.is_quiet(),
            &format!("Checking {}", pkg.name),
            || remote_descriptor(store, &pkg.name),
        );
        match remote {
            Some((_, d)) if d.version != local => {
                info!("update available for {}: {local} -> {}", pkg.name, d.version);
                scan.outdated.push(UpdateCandidate {
                    name: pkg.name,
                    local_version: local,
                    remote_version: d.version,
                });
            }
            Some(_) => scan.up_to_date.push(pkg.name),
            None => {
                warn!("could not fetch remote metadata for {}", pkg.name);
                scan.inconclusive.push(pkg.name);
            }
        }
    }
    Ok(scan)
}

/// Local and remote version of one installed package.
pub fn check_one(store: &Store, name: &str) -> Result<(String, Option<String>)> {
    if !catalog::is_installed(store, name) {
        return Err(StoreError::NotInstalled(name.to_string()));
    }
    let local = local_version(crate::manifest::read_local(&store.package_dir(name))?);
    let remote = remote_descriptor(store, name).map(|(_, d)| d.version);
    Ok((local, remote))
}

fn local_version(desc: Option<PackageDescriptor>) -> String {
    desc.unwrap_or_default().version
}

/// Which update candidates to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    All,
    Nothing,
    /// 1-based positions in `UpdateScan::outdated`.
    Indices(Vec<usize>),
}

impl Selection {
    /// `all`, `none`, or comma-separated 1-based indices (`1, 3`).
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.eq_ignore_ascii_case("all") {
            return Ok(Selection::All);
        }
        if input.eq_ignore_ascii_case("none") {
            return Ok(Selection::Nothing);
        }
        let indices = input
            .split(',')
            .map(|tok| {
                tok.trim().parse::<usize>().map_err(|_| {
                    StoreError::Validation(format!("invalid selection {:?}", tok.trim()))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Selection::Indices(indices))
    }
}

/// Names picked by `selection`, in order, without duplicates. Out-of-range
/// indices are logged and skipped.
pub fn selected_names(scan: &UpdateScan, selection: &Selection) -> Vec<String> {
    match selection {
        Selection::All => scan.outdated.iter().map(|c| c.name.clone()).collect(),
        Selection::Nothing => Vec::new(),
        Selection::Indices(idx) => {
            let mut out: Vec<String> = Vec::new();
            for &i in idx {
                match i.checked_sub(1).and_then(|i| scan.outdated.get(i)) {
                    Some(c) if !out.contains(&c.name) => out.push(c.name.clone()),
                    Some(_) => {}
                    None => warn!("invalid selection: {i}"),
                }
            }
            out
        }
    }
}

/// Forward the selected candidates to `update`.
pub fn apply_selection(
    store: &Store,
    scan: &UpdateScan,
    selection: &Selection,
) -> Vec<(String, Result<InstallStatus>)> {
    selected_names(scan, selection)
        .into_iter()
        .map(|name| {
            let res = update(store, &name);
            (name, res)
        })
        .collect()
}
