use super::{EntryKind, Remote, RemoteEntry};
use crate::config::Settings;
use crate::errors::Result;
use anyhow::Context;
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;

const GITHUB_JSON: &str = "application/vnd.github.v3+json";

/// Shape of one element of the contents API response.
#[derive(Debug, Deserialize)]
struct ContentItem {
    #[serde(rename = "type")]
    kind: String, // "file" | "dir" | "symlink" | "submodule"
    name: String,
    url: String,
    download_url: Option<String>,
}

/// GitHub-backed source access over blocking HTTPS with rustls.
pub struct GithubRemote {
    client: Client,
    api_base: String,
    raw_base: String,
    branch: String,
}

impl GithubRemote {
    pub fn new(settings: &Settings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_JSON));

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(concat!("shellpack/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            api_base: settings.api_base.trim_end_matches('/').to_string(),
            raw_base: settings.raw_base.trim_end_matches('/').to_string(),
            branch: settings.branch.clone(),
        })
    }

    fn get(&self, url: &str) -> Result<Response> {
        let resp = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("GET {url}"))?;
        Ok(resp)
    }

    fn get_ok(&self, url: &str) -> Result<Response> {
        Ok(self.get(url)?.error_for_status()?)
    }

    fn listing(&self, url: &str) -> Result<Vec<RemoteEntry>> {
        let items: Vec<ContentItem> = self.get_ok(url)?.json()?;
        Ok(items.into_iter().filter_map(to_entry).collect())
    }
}

fn to_entry(item: ContentItem) -> Option<RemoteEntry> {
    match item.kind.as_str() {
        "file" => Some(RemoteEntry {
            kind: EntryKind::File,
            locator: item.download_url?,
            name: item.name,
        }),
        "dir" => Some(RemoteEntry {
            kind: EntryKind::Dir,
            locator: item.url,
            name: item.name,
        }),
        other => {
            log::debug!("skipping remote entry {} of type {other}", item.name);
            None
        }
    }
}

impl Remote for GithubRemote {
    fn list_package(&self, source: &str, package: &str) -> Result<Vec<RemoteEntry>> {
        let url = format!("{}/repos/{source}/contents/{package}", self.api_base);
        self.listing(&url)
    }

    fn list_dir(&self, locator: &str) -> Result<Vec<RemoteEntry>> {
        self.listing(locator)
    }

    fn fetch_bytes(&self, locator: &str) -> Result<Vec<u8>> {
        let bytes = self.get_ok(locator)?.bytes()?;
        Ok(bytes.to_vec())
    }

    fn fetch_text(&self, source: &str, package: &str, file: &str) -> Result<Option<String>> {
        let url = format!("{}/{source}/{}/{package}/{file}", self.raw_base, self.branch);
        let resp = self.get(&url)?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(resp.error_for_status()?.text()?))
    }

    fn list_packages(&self, source: &str) -> Result<Vec<String>> {
        let url = format!("{}/repos/{source}/contents/", self.api_base);
        let items: Vec<ContentItem> = self.get_ok(&url)?.json()?;
        Ok(items
            .into_iter()
            .filter(|i| i.kind == "dir" && !i.name.starts_with('.'))
            .map(|i| i.name)
            .collect())
    }

    fn probe_source(&self, source: &str) -> Result<bool> {
        let url = format!("{}/repos/{source}", self.api_base);
        Ok(self.get(&url)?.status().is_success())
    }
}
