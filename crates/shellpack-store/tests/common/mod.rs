#![allow(dead_code)]

use shellpack_store::{
    DependencyInstaller, Layout, Remote, RemoteEntry, Result, Store, StoreError,
};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

pub const OFFICIAL: &str = "official/packages";

/// In-memory sources: `source -> { "pkg/dir/file" -> bytes }`.
#[derive(Clone, Default)]
pub struct FakeRemote {
    inner: Arc<Mutex<FakeState>>,
}

#[derive(Default)]
struct FakeState {
    repos: BTreeMap<String, BTreeMap<String, Vec<u8>>>,
    failing_files: HashSet<String>,
    broken_sources: HashSet<String>,
    calls: Vec<String>,
}

impl FakeRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or overwrite) `path` = `pkg/...` in `source`.
    pub fn put(&self, source: &str, path: &str, content: &str) -> &Self {
        self.inner
            .lock()
            .unwrap()
            .repos
            .entry(source.to_string())
            .or_default()
            .insert(path.to_string(), content.as_bytes().to_vec());
        self
    }

    /// An existing repository with no packages.
    pub fn empty_repo(&self, source: &str) -> &Self {
        self.inner
            .lock()
            .unwrap()
            .repos
            .entry(source.to_string())
            .or_default();
        self
    }

    /// Downloads of `source`/`path` fail.
    pub fn fail_file(&self, source: &str, path: &str) -> &Self {
        self.inner
            .lock()
            .unwrap()
            .failing_files
            .insert(file_locator(source, path));
        self
    }

    /// Every request against `source` errors.
    pub fn break_source(&self, source: &str) -> &Self {
        self.inner
            .lock()
            .unwrap()
            .broken_sources
            .insert(source.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.inner.lock().unwrap().calls.clear();
    }

    fn record(&self, call: String) {
        self.inner.lock().unwrap().calls.push(call);
    }

    fn children(&self, source: &str, prefix: &str) -> Result<Vec<RemoteEntry>> {
        let st = self.inner.lock().unwrap();
        if st.broken_sources.contains(source) {
            return Err(StoreError::Msg(format!("{source} unreachable")));
        }
        let repo = st
            .repos
            .get(source)
            .ok_or_else(|| StoreError::Msg(format!("404 {source}")))?;

        let want = format!("{prefix}/");
        let mut files = BTreeSet::new();
        let mut dirs = BTreeSet::new();
        for path in repo.keys() {
            let Some(rest) = path.strip_prefix(&want) else {
                continue;
            };
            match rest.split_once('/') {
                Some((dir, _)) => dirs.insert(dir.to_string()),
                None => files.insert(rest.to_string()),
            };
        }
        if files.is_empty() && dirs.is_empty() {
            return Err(StoreError::Msg(format!("404 {source}/{prefix}")));
        }

        let mut out: Vec<RemoteEntry> = files
            .into_iter()
            .map(|f| RemoteEntry::file(f.clone(), file_locator(source, &format!("{prefix}/{f}"))))
            .collect();
        out.extend(
            dirs.into_iter()
                .map(|d| RemoteEntry::dir(d.clone(), format!("dir|{source}|{prefix}/{d}"))),
        );
        Ok(out)
    }
}

fn file_locator(source: &str, path: &str) -> String {
    format!("file|{source}|{path}")
}

impl Remote for FakeRemote {
    fn list_package(&self, source: &str, package: &str) -> Result<Vec<RemoteEntry>> {
        self.record(format!("list {source}/{package}"));
        self.children(source, package)
    }

    fn list_dir(&self, locator: &str) -> Result<Vec<RemoteEntry>> {
        self.record(format!("list_dir {locator}"));
        let mut parts = locator.splitn(3, '|');
        let (_, source, prefix) = (parts.next(), parts.next(), parts.next());
        match (source, prefix) {
            (Some(s), Some(p)) => self.children(s, p),
            _ => Err(StoreError::Msg(format!("bad locator {locator}"))),
        }
    }

    fn fetch_bytes(&self, locator: &str) -> Result<Vec<u8>> {
        self.record(format!("fetch {locator}"));
        let st = self.inner.lock().unwrap();
        if st.failing_files.contains(locator) {
            return Err(StoreError::Msg(format!("500 {locator}")));
        }
        let mut parts = locator.splitn(3, '|');
        let (_, source, path) = (parts.next(), parts.next(), parts.next());
        source
            .zip(path)
            .and_then(|(s, p)| st.repos.get(s)?.get(p).cloned())
            .ok_or_else(|| StoreError::Msg(format!("404 {locator}")))
    }

    fn fetch_text(&self, source: &str, package: &str, file: &str) -> Result<Option<String>> {
        self.record(format!("text {source}/{package}/{file}"));
        let st = self.inner.lock().unwrap();
        if st.broken_sources.contains(source) {
            return Err(StoreError::Msg(format!("{source} unreachable")));
        }
        Ok(st
            .repos
            .get(source)
            .and_then(|r| r.get(&format!("{package}/{file}")))
            .map(|b| String::from_utf8_lossy(b).into_owned()))
    }

    fn list_packages(&self, source: &str) -> Result<Vec<String>> {
        self.record(format!("packages {source}"));
        let st = self.inner.lock().unwrap();
        if st.broken_sources.contains(source) {
            return Err(StoreError::Msg(format!("{source} unreachable")));
        }
        let repo = st
            .repos
            .get(source)
            .ok_or_else(|| StoreError::Msg(format!("404 {source}")))?;
        let names: BTreeSet<String> = repo
            .keys()
            .filter_map(|p| p.split_once('/').map(|(pkg, _)| pkg.to_string()))
            .filter(|p| !p.starts_with('.'))
            .collect();
        Ok(names.into_iter().collect())
    }

    fn probe_source(&self, source: &str) -> Result<bool> {
        self.record(format!("probe {source}"));
        let st = self.inner.lock().unwrap();
        if st.broken_sources.contains(source) {
            return Err(StoreError::Msg(format!("{source} unreachable")));
        }
        Ok(st.repos.contains_key(source))
    }
}

/// Records every requirement handed to it; names in `failing` error out.
#[derive(Clone, Default)]
pub struct RecordingDeps {
    installed: Arc<Mutex<Vec<String>>>,
    failing: Arc<Mutex<HashSet<String>>>,
}

impl RecordingDeps {
    pub fn calls(&self) -> Vec<String> {
        self.installed.lock().unwrap().clone()
    }

    pub fn fail_on(&self, req: &str) {
        self.failing.lock().unwrap().insert(req.to_string());
    }
}

impl DependencyInstaller for RecordingDeps {
    fn install(&self, requirement: &str) -> Result<()> {
        self.installed.lock().unwrap().push(requirement.to_string());
        if self.failing.lock().unwrap().contains(requirement) {
            return Err(StoreError::Msg(format!("pip failed for {requirement}")));
        }
        Ok(())
    }
}

pub struct Fixture {
    pub dir: tempfile::TempDir,
    pub remote: FakeRemote,
    pub deps: RecordingDeps,
    pub store: Store,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_layout(Layout::default())
    }

    pub fn with_layout(layout: Layout) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let remote = FakeRemote::new();
        remote.empty_repo(OFFICIAL);
        let deps = RecordingDeps::default();
        let store = Store::new(
            dir.path().join("packages"),
            dir.path().join("sources.json"),
            Box::new(remote.clone()),
            Box::new(deps.clone()),
        )
        .with_official(OFFICIAL)
        .with_layout(layout)
        .quiet(true);
        Self {
            dir,
            remote,
            deps,
            store,
        }
    }

    pub fn packages(&self) -> PathBuf {
        self.dir.path().join("packages")
    }

    pub fn pkg(&self, name: &str) -> PathBuf {
        self.packages().join(name)
    }
}

/// Relative path -> contents for every file under `dir`.
pub fn snapshot(dir: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    let mut out = BTreeMap::new();
    let mut stack = vec![dir.to_path_buf()];
    while let Some(cur) = stack.pop() {
        for ent in std::fs::read_dir(&cur).unwrap() {
            let ent = ent.unwrap();
            let p = ent.path();
            if p.is_dir() {
                stack.push(p);
            } else {
                out.insert(
                    p.strip_prefix(dir).unwrap().to_path_buf(),
                    std::fs::read(&p).unwrap(),
                );
            }
        }
    }
    out
}
