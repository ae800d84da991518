// Persisted user preferences (the saved endpoint address)
//
// A small TOML key/value file: read once at startup, rewritten on every edit.

use anyhow::Context;
use std::path::{Path, PathBuf};

/// Key under which the last-entered endpoint address is saved.
pub const ENDPOINT_ADDRESS_KEY: &str = "endpoint_address";

pub struct PrefsStore {
    path: PathBuf,
}

impl PrefsStore {
    /// Store at the platform config dir, e.g. `~/.config/dockwatch/prefs.toml`.
    pub fn open_default() -> anyhow::Result<Self> {
        let dir = dirs::config_dir().context("no config directory for this platform")?;
        Ok(Self::open(dir.join("dockwatch").join("prefs.toml")))
    }

    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read one string value. Absent file, unparseable file, or missing key
    /// all read as None; a fresh install has no preferences.
    pub fn get(&self, key: &str) -> Option<String> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        let table: toml::Table = raw.parse().ok()?;
        table.get(key)?.as_str().map(str::to_string)
    }

    /// Write one string value, keeping any other keys in the file.
    pub fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut table = std::fs::read_to_string(&self.path)
            .ok()
            .and_then(|raw| raw.parse::<toml::Table>().ok())
            .unwrap_or_default();
        table.insert(key.to_string(), toml::Value::String(value.to_string()));

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        std::fs::write(&self.path, toml::to_string(&table)?)
            .with_context(|| format!("writing {}", self.path.display()))?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
