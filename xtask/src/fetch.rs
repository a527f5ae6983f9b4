// Licensed under the Apache-2.0 license

//! Registry sources: live HTTP retrieval and a local directory of saved copies.

use anyhow::{bail, Context, Result};
use iana_registries_generator::RegistrySource;
use log::debug;
use reqwest::blocking::Client;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Fetches registries over HTTP with a fixed per-request timeout.
pub(crate) struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub(crate) fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { client })
    }
}

impl RegistrySource for HttpSource {
    fn fetch(&self, url: &str) -> Result<String> {
        debug!("GET {url}");
        let resp = self.client.get(url).send()?;
        let status = resp.status();
        if !status.is_success() {
            bail!("got non-success status ({status})");
        }
        Ok(resp.text()?)
    }
}

/// Reads registries from `<dir>/<last URL segment>`, e.g. a directory of
/// previously downloaded `capability-codes.xml` and friends.
pub(crate) struct DirSource {
    dir: PathBuf,
}

impl DirSource {
    pub(crate) fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }
}

/// Last path segment of `url`.
pub(crate) fn file_name(url: &str) -> &str {
    url.trim_end_matches('/').rsplit('/').next().unwrap_or(url)
}

impl RegistrySource for DirSource {
    fn fetch(&self, url: &str) -> Result<String> {
        let path = self.dir.join(file_name(url));
        debug!("reading {}", path.display());
        fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))
    }
}
