//! Read-only views: installed packages, package info, browse and search.

use crate::errors::{Result, StoreError};
use crate::manifest::{self, parse_descriptor, DESCRIPTOR_FILE};
use crate::sources::list_sources;
use crate::store::Store;
use crate::types::{CatalogEntry, InstalledPackage, Origin, PackageDescriptor};
use log::warn;
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Installed packages sorted by name. Hidden directories are skipped.
pub fn installed(store: &Store) -> Result<Vec<InstalledPackage>> {
    let root = store.root();
    let rd = match fs::read_dir(root) {
        Ok(rd) => rd,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(StoreError::fs(root, e)),
    };

    let mut out = Vec::new();
    for ent in rd {
        let ent = ent?;
        let name = ent.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') || !ent.file_type()?.is_dir() {
            continue;
        }
        let dir = ent.path();
        let descriptor = manifest::read_local(&dir).unwrap_or_else(|e| {
            warn!("cannot read descriptor of {name}: {e}");
            None
        });
        out.push(InstalledPackage {
            files: package_files(&name, &dir),
            name,
            dir,
            descriptor,
        });
    }
    out.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(out)
}

pub fn is_installed(store: &Store, name: &str) -> bool {
    !name.starts_with('.') && store.package_dir(name).is_dir()
}

/// First remote copy of a package's descriptor, official source first.
/// `None` when no source serves it or every attempt failed.
pub fn remote_descriptor(store: &Store, name: &str) -> Option<(String, PackageDescriptor)> {
    for source in list_sources(store) {
        match store.remote().fetch_text(&source.id, name, DESCRIPTOR_FILE) {
            Ok(Some(text)) => return Some((source.id, parse_descriptor(&text))),
            Ok(None) => {}
            Err(e) => warn!("fetching descriptor of {name} from {source} failed: {e}"),
        }
    }
    None
}

/// Local descriptor when installed, otherwise the first remote one.
pub fn describe(store: &Store, name: &str) -> Result<Option<(PackageDescriptor, Origin)>> {
    if is_installed(store, name) {
        if let Some(d) = manifest::read_local(&store.package_dir(name))? {
            return Ok(Some((d, Origin::Installed)));
        }
    }
    Ok(remote_descriptor(store, name).map(|(src, d)| (d, Origin::Remote(src))))
}

/// Every package of one source with its descriptor, if it ships one.
pub fn browse(store: &Store, source: &str) -> Result<Vec<CatalogEntry>> {
    let names = store.remote().list_packages(source)?;
    let mut out = Vec::with_capacity(names.len());
    for name in names {
        let descriptor = match store.remote().fetch_text(source, &name, DESCRIPTOR_FILE) {
            Ok(text) => text.map(|t| parse_descriptor(&t)),
            Err(e) => {
                warn!("fetching descriptor of {name} from {source} failed: {e}");
                None
            }
        };
        out.push(CatalogEntry {
            installed: is_installed(store, &name),
            source: source.to_string(),
            name,
            descriptor,
        });
    }
    Ok(out)
}

/// Case-insensitive match on package names, then on remote descriptions.
/// Each name is reported once, from the first source it matched in.
pub fn search(store: &Store, term: &str) -> Vec<CatalogEntry> {
    let term = term.trim().to_lowercase();
    let mut seen: HashSet<String> = HashSet::new();
    let mut hits = Vec::new();

    for source in list_sources(store) {
        let names = match store.remote().list_packages(&source.id) {
            Ok(n) => n,
            Err(e) => {
                warn!("listing {source} failed: {e}");
                continue;
            }
        };

        let mut by_desc = Vec::new();
        for name in names {
            if seen.contains(&name) {
                continue;
            }
            if name.to_lowercase().contains(&term) {
                seen.insert(name.clone());
                hits.push(entry_for(store, &source.id, name));
            } else {
                by_desc.push(name);
            }
        }

        for name in by_desc {
            let Some(entry) = description_match(store, &source.id, &name, &term) else {
                continue;
            };
            seen.insert(name);
            hits.push(entry);
        }
    }
    hits
}

fn entry_for(store: &Store, source: &str, name: String) -> CatalogEntry {
    let descriptor = store
        .remote()
        .fetch_text(source, &name, DESCRIPTOR_FILE)
        .ok()
        .flatten()
        .map(|t| parse_descriptor(&t));
    CatalogEntry {
        installed: is_installed(store, &name),
        source: source.to_string(),
        name,
        descriptor,
    }
}

fn description_match(store: &Store, source: &str, name: &str, term: &str) -> Option<CatalogEntry> {
    let text = store
        .remote()
        .fetch_text(source, name, DESCRIPTOR_FILE)
        .ok()
        .flatten()?;
    let descriptor = parse_descriptor(&text);
    descriptor
        .description
        .to_lowercase()
        .contains(term)
        .then(|| CatalogEntry {
            installed: is_installed(store, name),
            source: source.to_string(),
            name: name.to_string(),
            descriptor: Some(descriptor),
        })
}

/// An unreadable package lists no files instead of failing the whole scan.
fn package_files(name: &str, dir: &Path) -> Vec<PathBuf> {
    list_files(dir).unwrap_or_else(|e| {
        warn!("cannot list files of {name}: {e}");
        Vec::new()
    })
}

/// Files under `dir`, relative and sorted.
fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    let mut stack = vec![dir.to_path_buf()];
    while let Some(cur) = stack.pop() {
        for ent in fs::read_dir(&cur)? {
            let ent = ent?;
            let path = ent.path();
            if ent.file_type()?.is_dir() {
                stack.push(path);
            } else if let Ok(rel) = path.strip_prefix(dir) {
                out.push(rel.to_path_buf());
            }
        }
    }
    out.sort();
    Ok(out)
}
