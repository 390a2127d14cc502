// SPDX-License-Identifier: MIT

//! Login token cache (spec.md §6 external interfaces), grounded on
//! `pkg/client/cache/token.go`. Only the cache file mechanics are in
//! scope; the OAuth exchange that produces a token is out of scope.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenCacheError {
    #[error("failed to read token cache at {path}: {source}")]
    Read { path: PathBuf, #[source] source: io::Error },

    #[error("failed to write token cache at {path}: {source}")]
    Write { path: PathBuf, #[source] source: io::Error },

    #[error("malformed token cache at {path}: {source}")]
    Malformed { path: PathBuf, #[source] source: serde_json::Error },
}

/// A cached OAuth token, persisted as `tokens.json` under the user's
/// config directory.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CachedToken {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at_epoch_ms: u64,
}

impl CachedToken {
    pub fn is_expired(&self, now_epoch_ms: u64) -> bool {
        now_epoch_ms >= self.expires_at_epoch_ms
    }
}

/// Atomic file-backed cache for one [`CachedToken`].
///
/// Writes go to a temp file in the same directory and are renamed into
/// place, so a reader never observes a partially written `tokens.json`.
pub struct TokenCache {
    path: PathBuf,
}

impl TokenCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> Result<Option<CachedToken>, TokenCacheError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(TokenCacheError::Read { path: self.path.clone(), source }),
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| TokenCacheError::Malformed { path: self.path.clone(), source })
    }

    pub fn save(&self, token: &CachedToken) -> Result<(), TokenCacheError> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir).map_err(|source| TokenCacheError::Write {
            path: self.path.clone(),
            source,
        })?;

        let raw = serde_json::to_string_pretty(token)
            .map_err(|source| TokenCacheError::Malformed { path: self.path.clone(), source })?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)
            .map_err(|source| TokenCacheError::Write { path: self.path.clone(), source })?;
        use std::io::Write;
        tmp.write_all(raw.as_bytes())
            .map_err(|source| TokenCacheError::Write { path: self.path.clone(), source })?;
        tmp.persist(&self.path)
            .map_err(|e| TokenCacheError::Write { path: self.path.clone(), source: e.error })?;
        Ok(())
    }

    pub fn clear(&self) -> Result<(), TokenCacheError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(TokenCacheError::Write { path: self.path.clone(), source }),
        }
    }
}

#[cfg(test)]
#[path = "token_tests.rs"]
mod tests;
