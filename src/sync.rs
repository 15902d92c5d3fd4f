use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt::Display;
use std::path::{Path, PathBuf};

use crate::authorized_keys;
use crate::error::Result;
use crate::github::KeyFetcher;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    /// Keys published on GitHub
    pub remote: usize,
    /// Lines in the key file before the sync
    pub local: usize,
    /// Lines written
    pub merged: usize,
    /// Lines written that were not in the key file before
    pub added: usize,
}

pub struct KeySync {
    fetcher: KeyFetcher,
    keys_path: PathBuf,
}

impl KeySync {
    pub fn new(fetcher: KeyFetcher, keys_path: PathBuf) -> Self {
        Self { fetcher, keys_path }
    }

    pub fn keys_path(&self) -> &Path {
        &self.keys_path
    }

    /// Merges the keys of `username` into the key file.
    pub fn run(&self, username: &str) -> Result<SyncReport> {
        let remote: Vec<Vec<u8>> = self
            .fetcher
            .fetch(username)?
            .into_iter()
            .map(String::into_bytes)
            .collect();
        log::debug!("Fetched keys: {:?}", lossy(&remote));

        let local = authorized_keys::read(&self.keys_path)?;
        log::debug!("Local keys: {:?}", lossy(&local));

        let (remote_count, local_count) = (remote.len(), local.len());
        let existing: HashSet<Vec<u8>> = local.iter().cloned().collect();

        let merged = authorized_keys::merge(remote, local);
        log::debug!("Merged keys: {:?}", lossy(&merged));

        authorized_keys::write(&self.keys_path, &merged)?;

        Ok(SyncReport {
            remote: remote_count,
            local: local_count,
            merged: merged.len(),
            added: merged.iter().filter(|key| !existing.contains(*key)).count(),
        })
    }
}

fn lossy(keys: &[Vec<u8>]) -> Vec<Cow<'_, str>> {
    keys.iter().map(|key| String::from_utf8_lossy(key)).collect()
}

impl Display for SyncReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} keys ({} new, {} from GitHub, {} already present)",
            self.merged, self.added, self.remote, self.local
        )
    }
}
