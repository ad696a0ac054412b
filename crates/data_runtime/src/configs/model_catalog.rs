//! Model catalogue: which OBJ files back each body variant, the layer slider,
//! and the named extras. Loaded from data/config/models.toml.

use anyhow::{Context, Result};
use lf_assets::util::resolve_asset_path;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::loader::{data_root, process_env, read_config};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelCatalogCfg {
    pub assets_root: Option<String>,
    pub male: Option<String>,
    pub female: Option<String>,
    pub medical: Option<String>,
    pub background: Option<String>,
    /// Skin / muscle / skeleton, in slider order.
    pub layers: Option<Vec<String>>,
    pub extras: Option<BTreeMap<String, String>>,
}

/// Resolved catalogue with absolute (root-joined) paths.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelCatalog {
    pub assets_root: PathBuf,
    pub male: PathBuf,
    pub female: PathBuf,
    pub medical: PathBuf,
    pub background: PathBuf,
    pub layers: Vec<PathBuf>,
    pub extras: BTreeMap<String, PathBuf>,
}

const DEFAULT_LAYERS: [&str; 3] = [
    "models/humano.obj",
    "models/musculo.obj",
    "models/esqueleto.obj",
];

const DEFAULT_EXTRAS: [(&str, &str); 6] = [
    ("coronavirus", "patogens/covid_19/coronavirus.obj"),
    ("coronavirus_internal", "patogens/covid_19/coronavirus_interno.obj"),
    ("heart", "extra_parts/heart/heart.obj"),
    ("sperm", "extra_parts/reproductive_sys/sperm.obj"),
    ("red_cells", "extra_parts/blood/red_cells.obj"),
    ("ear", "extra_parts/ear/ear.obj"),
];

impl ModelCatalog {
    /// Resolve config values against the assets root, filling defaults.
    #[must_use]
    pub fn resolve(cfg: &ModelCatalogCfg, default_root: &Path) -> Self {
        let root = cfg
            .assets_root
            .as_deref()
            .map_or_else(|| default_root.to_path_buf(), PathBuf::from);
        let at = |v: &Option<String>, d: &str| {
            resolve_asset_path(&root, Path::new(v.as_deref().unwrap_or(d)))
        };
        let layers = match &cfg.layers {
            Some(l) if !l.is_empty() => l.iter().map(|p| resolve_asset_path(&root, Path::new(p))).collect(),
            _ => DEFAULT_LAYERS.iter().map(|p| root.join(p)).collect(),
        };
        let extras = match &cfg.extras {
            Some(map) => map
                .iter()
                .map(|(k, v)| (k.clone(), resolve_asset_path(&root, Path::new(v))))
                .collect(),
            None => DEFAULT_EXTRAS
                .iter()
                .map(|(k, v)| ((*k).to_string(), root.join(v)))
                .collect(),
        };
        Self {
            male: at(&cfg.male, "anatomy/male.obj"),
            female: at(&cfg.female, "anatomy/female.obj"),
            medical: at(&cfg.medical, "anatomy/medical.obj"),
            background: at(&cfg.background, "backgrounds/bg.gif"),
            layers,
            extras,
            assets_root: root,
        }
    }

    /// Map a 0..=100 slider position onto a layer model.
    ///
    /// The range is split evenly; with three layers that is <33, <66, rest.
    #[must_use]
    pub fn layer_for_slider(&self, value: u8) -> Option<&Path> {
        let n = self.layers.len();
        if n == 0 {
            return None;
        }
        let band = 100 / n.max(1);
        let idx = (usize::from(value.min(100)) / band.max(1)).min(n - 1);
        self.layers.get(idx).map(PathBuf::as_path)
    }

    #[must_use]
    pub fn extra(&self, name: &str) -> Option<&Path> {
        self.extras.get(name).map(PathBuf::as_path)
    }
}

/// Default assets root: `LF_ASSETS_ROOT` or `<workspace>/assets`.
pub fn default_assets_root() -> PathBuf {
    process_env("LF_ASSETS_ROOT").map_or_else(
        || data_root().join("../assets"),
        PathBuf::from,
    )
}

pub fn load_default() -> Result<ModelCatalog> {
    load_from(&data_root().join("config/models.toml"), &default_assets_root())
}

pub fn load_from(path: &Path, default_root: &Path) -> Result<ModelCatalog> {
    let cfg = match read_config(path)? {
        Some(txt) => toml::from_str::<ModelCatalogCfg>(&txt).context("parse models TOML")?,
        None => ModelCatalogCfg::default(),
    };
    Ok(ModelCatalog::resolve(&cfg, default_root))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> ModelCatalog {
        ModelCatalog::resolve(&ModelCatalogCfg::default(), Path::new("/a"))
    }

    #[test]
    fn defaults_resolve_under_root() {
        let c = catalog();
        assert_eq!(c.male, PathBuf::from("/a/anatomy/male.obj"));
        assert_eq!(c.female, PathBuf::from("/a/anatomy/female.obj"));
        assert_eq!(c.background, PathBuf::from("/a/backgrounds/bg.gif"));
        assert_eq!(c.extra("heart"), Some(Path::new("/a/extra_parts/heart/heart.obj")));
    }

    #[test]
    fn slider_bands_match_thirds() {
        let c = catalog();
        let name = |v: u8| {
            c.layer_for_slider(v)
                .and_then(|p| p.file_stem())
                .and_then(|s| s.to_str())
                .map(str::to_owned)
        };
        assert_eq!(name(0).as_deref(), Some("humano"));
        assert_eq!(name(32).as_deref(), Some("humano"));
        assert_eq!(name(33).as_deref(), Some("musculo"));
        assert_eq!(name(65).as_deref(), Some("musculo"));
        assert_eq!(name(66).as_deref(), Some("esqueleto"));
        assert_eq!(name(100).as_deref(), Some("esqueleto"));
        assert_eq!(name(255).as_deref(), Some("esqueleto"));
    }
}
