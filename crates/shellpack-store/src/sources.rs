//! Ordered list of package sources.
//!
//! Only user-added ids are persisted (`sources.json`, a JSON array). The
//! official id comes from the store and is always placed first.

use crate::errors::{Result, StoreError};
use crate::store::Store;
use crate::types::Source;
use log::{error, info, warn};
use once_cell::sync::Lazy;
use std::fs;
use std::io::ErrorKind;

/// Curated third-party sources, shown by `src verified`.
pub static VERIFIED_SOURCES: Lazy<Vec<&'static str>> = Lazy::new(Vec::new);

/// Official first, then user-added sources in the order they were added.
pub fn list_sources(store: &Store) -> Vec<Source> {
    let mut out = vec![Source::official(store.official())];
    out.extend(load_user_sources(store).into_iter().map(Source::user));
    out
}

pub fn add_source(store: &Store, id: &str) -> Result<Source> {
    let id = id.trim();
    validate_source_id(id)?;

    let mut user = load_user_sources(store);
    if id == store.official() || user.iter().any(|s| s == id) {
        return Err(StoreError::Validation(format!("source {id} already exists")));
    }

    let reachable = store.remote().probe_source(id).unwrap_or_else(|e| {
        warn!("probing source {id} failed: {e}");
        false
    });
    if !reachable {
        return Err(StoreError::Validation(format!(
            "repository not found or inaccessible: {id}"
        )));
    }

    user.push(id.to_string());
    save_user_sources(store, &user)?;
    info!("added source {id}");
    Ok(Source::user(id))
}

pub fn remove_source(store: &Store, id: &str) -> Result<()> {
    let id = id.trim();
    if id == store.official() {
        return Err(StoreError::ProtectedSource(id.to_string()));
    }

    let mut user = load_user_sources(store);
    let before = user.len();
    user.retain(|s| s != id);
    if user.len() == before {
        return Err(StoreError::Validation(format!("source not configured: {id}")));
    }

    save_user_sources(store, &user)?;
    info!("removed source {id}");
    Ok(())
}

pub fn verified_sources() -> &'static [&'static str] {
    VERIFIED_SOURCES.as_slice()
}

/// `owner/repo`, each part made of ASCII alphanumerics, `-`, `_` or `.`.
pub fn validate_source_id(id: &str) -> Result<()> {
    let valid_part = |p: &str| {
        !p.is_empty()
            && p != "."
            && p != ".."
            && p
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    };

    match id.split_once('/') {
        Some((owner, repo)) if valid_part(owner) && valid_part(repo) => Ok(()),
        _ => Err(StoreError::Validation(format!(
            "invalid source {id:?}; use the owner/repo format"
        ))),
    }
}

/// User-added ids, deduplicated, official id stripped. Unreadable or
/// malformed files are logged and treated as empty.
fn load_user_sources(store: &Store) -> Vec<String> {
    let path = store.sources_path();
    let bytes = match fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
        Err(e) => {
            error!("reading {} failed: {e}", path.display());
            return Vec::new();
        }
    };

    let raw: Vec<String> = match serde_json::from_slice(&bytes) {
        Ok(v) => v,
        Err(e) => {
            error!("ignoring malformed {}: {e}", path.display());
            return Vec::new();
        }
    };

    let mut out: Vec<String> = Vec::with_capacity(raw.len());
    for id in raw {
        let id = id.trim().to_string();
        if id.is_empty() || id == store.official() || out.contains(&id) {
            continue;
        }
        out.push(id);
    }
    out
}

fn save_user_sources(store: &Store, user: &[String]) -> Result<()> {
    let path = store.sources_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| StoreError::fs(parent, e))?;
    }
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, serde_json::to_vec_pretty(user)?).map_err(|e| StoreError::fs(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| StoreError::fs(path, e))?;
    Ok(())
}
