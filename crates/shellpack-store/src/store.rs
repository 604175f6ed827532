use crate::config::{Layout, Settings, OFFICIAL_SOURCE};
use crate::errors::Result;
use crate::install::deps::{DependencyInstaller, PipInstaller};
use crate::net::{GithubRemote, Remote};
use crate::paths;
use std::path::{Path, PathBuf};

/// Everything a package operation needs, passed explicitly.
///
/// There is no process-wide state: tests build one store per temp directory
/// with in-memory `Remote` / `DependencyInstaller` fakes.
pub struct Store {
    root: PathBuf,
    sources_path: PathBuf,
    official: String,
    layout: Layout,
    remote: Box<dyn Remote>,
    deps: Box<dyn DependencyInstaller>,
    quiet: bool,
}

impl Store {
    pub fn new(
        root: impl Into<PathBuf>,
        sources_path: impl Into<PathBuf>,
        remote: Box<dyn Remote>,
        deps: Box<dyn DependencyInstaller>,
    ) -> Self {
        Self {
            root: root.into(),
            sources_path: sources_path.into(),
            official: OFFICIAL_SOURCE.to_string(),
            layout: Layout::default(),
            remote,
            deps,
            quiet: false,
        }
    }

    /// Production wiring: GitHub remote, pip dependencies, paths under the
    /// program home.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let remote = GithubRemote::new(settings)?;
        let deps = PipInstaller::new(settings.python.clone());
        Ok(Self::new(
            settings.packages_root(),
            paths::sources_path(),
            Box::new(remote),
            Box::new(deps),
        )
        .with_official(settings.official_source.clone())
        .with_layout(settings.layout()))
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_official(mut self, id: impl Into<String>) -> Self {
        self.official = id.into();
        self
    }

    /// Hide the console spinner (non-interactive callers, tests).
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Local package root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn package_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    pub fn sources_path(&self) -> &Path {
        &self.sources_path
    }

    pub fn official(&self) -> &str {
        &self.official
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn remote(&self) -> &dyn Remote {
        self.remote.as_ref()
    }

    pub fn deps(&self) -> &dyn DependencyInstaller {
        self.deps.as_ref()
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
}
