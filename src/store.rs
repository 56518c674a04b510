use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::model::{Credential, SessionKeys};

mod file;
mod memory;

pub use self::file::{FileStore, LocalStore};
pub use self::memory::MemoryStore;

/// Process-wide key/value store holding session credentials. Nothing here
/// expires on its own; the session guard decides when values are stale.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

pub fn read_credential(store: &dyn SessionStore, keys: &SessionKeys) -> Result<Credential> {
    Ok(Credential {
        access_token: store.get(&keys.access_token)?,
        refresh_token: store.get(&keys.refresh_token)?,
        refresh_count: store.get(&keys.refresh_count)?,
        last_access: store.get(&keys.last_access)?,
    })
}

pub fn clear_credential(store: &dyn SessionStore, keys: &SessionKeys) -> Result<()> {
    for key in keys.all() {
        store
            .remove(key)
            .with_context(|| format!("remove {}", key))?;
    }
    Ok(())
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("create parent directories")?;
    }
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    fs::write(&tmp, bytes).with_context(|| format!("write temp file {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}
