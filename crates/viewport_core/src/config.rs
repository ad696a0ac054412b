//! Resolved viewport tuning (defaults filled, ranges sanitized).

use std::time::Duration;

use data_runtime::configs::viewport::ViewportCfg;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportConfig {
    pub drag_deg_per_px: f32,
    pub zoom_step: f32,
    pub zoom_min: f32,
    pub zoom_max: f32,
    pub zoom_initial: f32,
    pub frame_delay: Duration,
    pub tick: Duration,
    pub double_click: Duration,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            drag_deg_per_px: 0.3,
            zoom_step: 0.6,
            zoom_min: -20.0,
            zoom_max: -2.0,
            zoom_initial: -6.0,
            frame_delay: Duration::from_millis(100),
            tick: Duration::from_millis(30),
            double_click: Duration::from_millis(400),
        }
    }
}

impl ViewportConfig {
    /// Overlay file/env values on the defaults.
    #[must_use]
    pub fn from_cfg(cfg: &ViewportCfg) -> Self {
        let d = Self::default();
        let mut zoom_min = finite("zoom_min", cfg.zoom_min).unwrap_or(d.zoom_min);
        let mut zoom_max = finite("zoom_max", cfg.zoom_max).unwrap_or(d.zoom_max);
        if zoom_min > zoom_max {
            log::warn!("viewport: zoom_min {zoom_min} > zoom_max {zoom_max}; swapping");
            std::mem::swap(&mut zoom_min, &mut zoom_max);
        }
        let zoom_initial = finite("zoom_initial", cfg.zoom_initial)
            .unwrap_or(d.zoom_initial)
            .clamp(zoom_min, zoom_max);
        let ms = |v: Option<u64>, fallback: Duration| v.map_or(fallback, Duration::from_millis);
        Self {
            drag_deg_per_px: finite("drag_deg_per_px", cfg.drag_deg_per_px)
                .unwrap_or(d.drag_deg_per_px),
            zoom_step: finite("zoom_step", cfg.zoom_step).unwrap_or(d.zoom_step),
            zoom_min,
            zoom_max,
            zoom_initial,
            frame_delay: ms(cfg.frame_delay_ms, d.frame_delay),
            // A zero tick would spin the event loop.
            tick: ms(cfg.tick_ms, d.tick).max(Duration::from_millis(1)),
            double_click: ms(cfg.double_click_ms, d.double_click),
        }
    }
}

/// NaN and infinities fall back to the default.
fn finite(name: &str, v: Option<f32>) -> Option<f32> {
    match v {
        Some(x) if !x.is_finite() => {
            log::warn!("viewport: {name} = {x} is not finite; using default");
            None
        }
        other => other,
    }
}
