use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::AppConfig;

use super::{SessionStore, write_atomic};

const STATE_VERSION: u32 = 1;

/// The `.bankdesk` directory: `config.json` plus the session state file.
#[derive(Clone, Debug)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn open_or_init(root: &Path) -> Result<Self> {
        fs::create_dir_all(root).with_context(|| format!("create {}", root.display()))?;
        let store = Self {
            root: root.to_path_buf(),
        };
        if !store.config_path().exists() {
            store
                .write_config(&AppConfig::default())
                .context("write default config.json")?;
        }
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn config_path(&self) -> PathBuf {
        self.root.join("config.json")
    }

    pub fn read_config(&self) -> Result<AppConfig> {
        let bytes = fs::read(self.config_path()).context("read config.json")?;
        let cfg: AppConfig = serde_json::from_slice(&bytes).context("parse config.json")?;
        if cfg.version != 1 {
            anyhow::bail!("unsupported config version {}", cfg.version);
        }
        Ok(cfg)
    }

    pub fn write_config(&self, cfg: &AppConfig) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(cfg).context("serialize config")?;
        write_atomic(&self.config_path(), &bytes).context("write config.json")?;
        Ok(())
    }

    pub fn session_store(&self) -> FileStore {
        FileStore::new(self.root.join("state.json"))
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredState {
    version: u32,

    #[serde(default)]
    values: BTreeMap<String, String>,
}

/// Session store persisted as a JSON file. Every mutation rewrites the file
/// atomically; the mutex serializes writers within this process only.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_state(&self) -> Result<StoredState> {
        if !self.path.exists() {
            return Ok(StoredState {
                version: STATE_VERSION,
                values: BTreeMap::new(),
            });
        }
        let bytes = fs::read(&self.path).context("read state.json")?;
        let st: StoredState = serde_json::from_slice(&bytes).context("parse state.json")?;
        if st.version != STATE_VERSION {
            anyhow::bail!("unsupported session state version {}", st.version);
        }
        Ok(st)
    }

    fn write_state(&self, st: &StoredState) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(st).context("serialize state")?;
        write_atomic(&self.path, &bytes).context("write state.json")?;
        Ok(())
    }

    fn update(&self, f: impl FnOnce(&mut BTreeMap<String, String>)) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut st = self.read_state()?;
        f(&mut st.values);
        self.write_state(&st)
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.read_state()?.values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.update(|values| {
            values.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.update(|values| {
            values.remove(key);
        })
    }
}

#[cfg(test)]
#[path = "../tests/store/file_tests.rs"]
mod tests;
