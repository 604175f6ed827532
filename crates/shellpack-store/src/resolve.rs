use crate::config::Layout;
use crate::errors::{Result, StoreError};
use crate::store::Store;
use std::fmt;
use std::path::{Path, PathBuf};

/// Dotted package address: `pkg`, `pkg.file`, `pkg.dir.sub.file`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageAddress {
    segments: Vec<String>,
}

impl PackageAddress {
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        let segments: Vec<String> = raw.split('.').map(str::to_string).collect();
        let bad = segments
            .iter()
            .any(|s| s.is_empty() || s.contains(['/', '\\', '\0']) || s.trim() != s);
        if raw.is_empty() || bad {
            return Err(StoreError::Validation(format!("invalid package address {raw:?}")));
        }
        Ok(Self { segments })
    }

    /// The package directory name (first segment).
    pub fn package(&self) -> &str {
        &self.segments[0]
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Local file this address points at.
    ///
    /// - 1 segment: `<root>/<pkg>/<entry_stem>.<ext>`
    /// - 2 segments: `<root>/<pkg>/<seg1>.<ext>`
    /// - 3+: every segment but the last is a directory, the last is the stem
    pub fn entry_path(&self, root: &Path, layout: &Layout) -> PathBuf {
        let (stem, dirs) = match self.segments.as_slice() {
            [pkg] => (layout.entry_stem.as_str(), std::slice::from_ref(pkg)),
            [dirs @ .., last] => (last.as_str(), dirs),
            [] => unreachable!("parse guarantees at least one segment"),
        };
        let mut path = root.to_path_buf();
        path.extend(dirs);
        path.push(layout.file_name(stem));
        path
    }
}

impl fmt::Display for PackageAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

/// Existing entry file for `address`, if any.
pub fn resolve(store: &Store, address: &str) -> Option<PathBuf> {
    let addr = PackageAddress::parse(address).ok()?;
    if !store.package_dir(addr.package()).is_dir() {
        return None;
    }
    let path = addr.entry_path(store.root(), store.layout());
    path.is_file().then_some(path)
}

pub fn is_valid(store: &Store, address: &str) -> bool {
    resolve(store, address).is_some_and(|p| p.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_of(addr: &str) -> PathBuf {
        PackageAddress::parse(addr)
            .unwrap()
            .entry_path(Path::new("/pk"), &Layout::default())
    }

    #[test]
    fn one_segment_uses_default_entry() {
        assert_eq!(path_of("editor"), PathBuf::from("/pk/editor/main.py"));
    }

    #[test]
    fn two_segments_is_file_in_package() {
        assert_eq!(path_of("editor.config"), PathBuf::from("/pk/editor/config.py"));
    }

    #[test]
    fn deeper_segments_are_directories() {
        assert_eq!(
            path_of("editor.plugins.git.status"),
            PathBuf::from("/pk/editor/plugins/git/status.py")
        );
    }

    #[test]
    fn custom_layout() {
        let layout = Layout {
            entry_stem: "run".into(),
            extension: "sh".into(),
            interpreter: "sh".into(),
        };
        let p = PackageAddress::parse("tool").unwrap().entry_path(Path::new("/r"), &layout);
        assert_eq!(p, PathBuf::from("/r/tool/run.sh"));
    }

    #[test]
    fn rejects_malformed() {
        for bad in ["", ".", "a..b", "a.", ".a", "a/b", "a\\b", "a. b"] {
            assert!(PackageAddress::parse(bad).is_err(), "{bad:?} should be rejected");
        }
        assert_eq!(PackageAddress::parse(" a.b ").unwrap().to_string(), "a.b");
    }
}
