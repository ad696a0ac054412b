//! Path resolution and raw reads under `data/`.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Root of the `data/` tree.
///
/// `LF_DATA_ROOT` wins; otherwise prefer the workspace-level `data/` so tests
/// and tools can run from any crate.
pub fn data_root() -> PathBuf {
    if let Ok(root) = std::env::var("LF_DATA_ROOT") {
        return PathBuf::from(root);
    }
    let here = Path::new(env!("CARGO_MANIFEST_DIR"));
    let ws = here.join("../../data");
    if ws.is_dir() { ws } else { here.join("data") }
}

/// Read a TOML config if present. `Ok(None)` when the file does not exist.
pub fn read_config(path: &Path) -> Result<Option<String>> {
    if !path.is_file() {
        log::debug!("config not found, using defaults: {}", path.display());
        return Ok(None);
    }
    let txt = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    Ok(Some(txt))
}

/// Parse an env value into `T`, logging and ignoring values that do not parse.
pub fn parse_env<T: std::str::FromStr>(
    env: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    let raw = env(key)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("ignoring {key}={raw:?}: not a valid value");
            None
        }
    }
}

/// Env lookup backed by the process environment.
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
