//! Orbit camera driven by horizontal drag and the mouse wheel.

use glam::{Mat4, Vec3};

use crate::config::ViewportConfig;

pub const FOVY_DEG: f32 = 50.0;
pub const ZNEAR: f32 = 0.1;
pub const ZFAR: f32 = 100.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitCamera {
    /// Degrees around +Y, always in [0, 360).
    yaw_deg: f32,
    /// Translation along the view axis; negative is in front of the eye.
    zoom: f32,
    drag_anchor: Option<f32>,
    deg_per_px: f32,
    zoom_step: f32,
    zoom_min: f32,
    zoom_max: f32,
    zoom_initial: f32,
}

impl OrbitCamera {
    pub fn new(cfg: &ViewportConfig) -> Self {
        Self {
            yaw_deg: 0.0,
            zoom: cfg.zoom_initial,
            drag_anchor: None,
            deg_per_px: cfg.drag_deg_per_px,
            zoom_step: cfg.zoom_step,
            zoom_min: cfg.zoom_min,
            zoom_max: cfg.zoom_max,
            zoom_initial: cfg.zoom_initial,
        }
    }

    pub fn yaw_deg(&self) -> f32 {
        self.yaw_deg
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn drag_anchor(&self) -> Option<f32> {
        self.drag_anchor
    }

    pub fn drag_start(&mut self, x: f32) {
        self.drag_anchor = Some(x);
    }

    /// Returns true when the yaw changed.
    pub fn drag_move(&mut self, x: f32) -> bool {
        let Some(anchor) = self.drag_anchor.replace(x) else {
            return false;
        };
        let dx = x - anchor;
        if dx == 0.0 {
            return false;
        }
        self.yaw_deg = wrap_degrees(self.yaw_deg + dx * self.deg_per_px);
        true
    }

    pub fn drag_end(&mut self) {
        self.drag_anchor = None;
    }

    /// Apply `notches` wheel steps. Returns true when the zoom changed.
    pub fn scroll(&mut self, notches: f32) -> bool {
        if !notches.is_finite() {
            return false;
        }
        let z = (self.zoom + notches * self.zoom_step).clamp(self.zoom_min, self.zoom_max);
        let changed = z != self.zoom;
        self.zoom = z;
        changed
    }

    pub fn reset(&mut self) {
        self.yaw_deg = 0.0;
        self.zoom = self.zoom_initial;
        self.drag_anchor = None;
    }

    /// Translate by zoom along the view axis, then yaw about +Y.
    pub fn model_view(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, 0.0, self.zoom))
            * Mat4::from_rotation_y(self.yaw_deg.to_radians())
    }

    pub fn projection(aspect: f32) -> Mat4 {
        Mat4::perspective_rh(FOVY_DEG.to_radians(), aspect.max(1e-3), ZNEAR, ZFAR)
    }
}

/// Wrap an angle in degrees into [0, 360).
pub fn wrap_degrees(deg: f32) -> f32 {
    if !deg.is_finite() {
        return 0.0;
    }
    let w = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if w >= 360.0 { 0.0 } else { w }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn cam() -> OrbitCamera {
        OrbitCamera::new(&ViewportConfig::default())
    }

    #[test]
    fn first_move_without_anchor_only_sets_anchor() {
        let mut c = cam();
        assert!(!c.drag_move(50.0));
        assert_eq!(c.yaw_deg(), 0.0);
        assert_eq!(c.drag_anchor(), Some(50.0));
        assert!(c.drag_move(60.0));
        assert_relative_eq!(c.yaw_deg(), 3.0, epsilon = 1e-5);
    }

    #[test]
    fn negative_drag_wraps_below_zero() {
        let mut c = cam();
        c.drag_start(100.0);
        c.drag_move(90.0);
        assert_relative_eq!(c.yaw_deg(), 357.0, epsilon = 1e-4);
    }

    #[test]
    fn drag_end_clears_anchor() {
        let mut c = cam();
        c.drag_start(1.0);
        c.drag_end();
        assert_eq!(c.drag_anchor(), None);
    }

    #[test]
    fn wrap_handles_edges() {
        assert_eq!(wrap_degrees(360.0), 0.0);
        assert_eq!(wrap_degrees(720.5), 0.5);
        assert_eq!(wrap_degrees(-1e-8), 0.0);
        assert_eq!(wrap_degrees(f32::NAN), 0.0);
        assert!(wrap_degrees(-0.0001) < 360.0);
    }

    #[test]
    fn scroll_clamps_and_reports_change() {
        let mut c = cam();
        assert!(c.scroll(1.0));
        assert_relative_eq!(c.zoom(), -5.4, epsilon = 1e-5);
        for _ in 0..50 {
            c.scroll(1.0);
        }
        assert_eq!(c.zoom(), -2.0);
        assert!(!c.scroll(1.0));
        for _ in 0..50 {
            c.scroll(-1.0);
        }
        assert_eq!(c.zoom(), -20.0);
        assert!(!c.scroll(f32::NAN));
    }

    #[test]
    fn reset_restores_initial_pose() {
        let mut c = cam();
        c.drag_start(0.0);
        c.drag_move(100.0);
        c.scroll(-3.0);
        c.reset();
        assert_eq!(c.yaw_deg(), 0.0);
        assert_eq!(c.zoom(), -6.0);
        assert_eq!(c.drag_anchor(), None);
    }

    #[test]
    fn model_view_places_origin_at_zoom_depth() {
        let c = cam();
        let p = c.model_view().transform_point3(Vec3::ZERO);
        assert_relative_eq!(p.z, -6.0, epsilon = 1e-6);
    }
}
