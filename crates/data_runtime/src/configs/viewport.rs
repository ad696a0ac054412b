//! Viewport tuning loaded from data/config/viewport.toml with env overrides.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::loader::{data_root, parse_env, process_env, read_config};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewportCfg {
    /// Yaw degrees per pixel of horizontal drag.
    pub drag_deg_per_px: Option<f32>,
    /// Zoom units per wheel notch.
    pub zoom_step: Option<f32>,
    pub zoom_min: Option<f32>,
    pub zoom_max: Option<f32>,
    pub zoom_initial: Option<f32>,
    /// Background animation cadence.
    pub frame_delay_ms: Option<u64>,
    /// Repaint tick.
    pub tick_ms: Option<u64>,
    pub double_click_ms: Option<u64>,
}

pub fn load_default() -> Result<ViewportCfg> {
    load_from(&data_root().join("config/viewport.toml"), process_env)
}

/// Load from an explicit path, then apply overrides from `env`.
///
/// Every field has an `LF_<FIELD>` override, e.g. `LF_ZOOM_INITIAL`.
pub fn load_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Result<ViewportCfg> {
    let mut cfg = match read_config(path)? {
        Some(txt) => toml::from_str::<ViewportCfg>(&txt).context("parse viewport TOML")?,
        None => ViewportCfg::default(),
    };
    // Env overrides for quick tuning (optional)
    if let Some(v) = parse_env(&env, "LF_DRAG_DEG_PER_PX") {
        cfg.drag_deg_per_px = Some(v);
    }
    if let Some(v) = parse_env(&env, "LF_ZOOM_STEP") {
        cfg.zoom_step = Some(v);
    }
    if let Some(v) = parse_env(&env, "LF_ZOOM_MIN") {
        cfg.zoom_min = Some(v);
    }
    if let Some(v) = parse_env(&env, "LF_ZOOM_MAX") {
        cfg.zoom_max = Some(v);
    }
    if let Some(v) = parse_env(&env, "LF_ZOOM_INITIAL") {
        cfg.zoom_initial = Some(v);
    }
    if let Some(v) = parse_env(&env, "LF_FRAME_DELAY_MS") {
        cfg.frame_delay_ms = Some(v);
    }
    if let Some(v) = parse_env(&env, "LF_TICK_MS") {
        cfg.tick_ms = Some(v);
    }
    if let Some(v) = parse_env(&env, "LF_DOUBLE_CLICK_MS") {
        cfg.double_click_ms = Some(v);
    }
    Ok(cfg)
}
