use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use approx::assert_relative_eq;
use viewport_core::headless::{HeadlessBackend, Recorded};
use viewport_core::reaction::NEUTRAL_TINT;
use viewport_core::{BodyVariant, DrawStatus, MeshAsset, ViewportConfig, ViewportController};

type Ctl = ViewportController<HeadlessBackend>;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../shared/assets/tests/fixtures")
        .join(name)
}

fn controller() -> Ctl {
    ViewportController::new(ViewportConfig::default())
}

#[test]
fn quad_file_renders_and_leaves_a_compiled_handle() {
    let mut be = HeadlessBackend::new();
    let mut c = controller();
    c.set_active_mesh(&fixture("quad.obj")).expect("load quad");
    let report = c.render_frame(&mut be, Instant::now());
    assert_eq!(report.mesh, DrawStatus::Drawn);
    let asset = c.active_asset().expect("active");
    assert_eq!(asset.vertices().len(), 4);
    let handle = asset.compiled().expect("compiled handle");
    assert_eq!(handle.triangles, 2);
}

#[test]
fn drag_from_100_to_130_adds_nine_degrees() {
    let mut c = controller();
    let before = c.yaw_deg();
    c.drag_start(100.0);
    c.drag_move(130.0);
    c.drag_end();
    assert_relative_eq!(c.yaw_deg() - before, 9.0, epsilon = 1e-4);
}

#[test]
fn yaw_stays_wrapped_for_any_drag_sequence() {
    let mut c = controller();
    c.drag_start(0.0);
    let mut x = 0.0f32;
    for i in 0..2000 {
        // Mixed large and small steps in both directions.
        let step = ((i * 7919) % 613) as f32 - 300.0;
        x += step;
        c.drag_move(x);
        let y = c.yaw_deg();
        assert!((0.0..360.0).contains(&y), "yaw {y} after step {i}");
    }
}

#[test]
fn zoom_never_leaves_range() {
    let mut c = controller();
    for i in 0..500 {
        let notches = ((i * 31) % 17) as f32 - 8.0;
        c.scroll(notches * 0.7);
        let z = c.zoom();
        assert!((-20.0..=-2.0).contains(&z), "zoom {z}");
    }
}

#[test]
fn reaction_alpha_starts_at_half_and_clears_to_zero() {
    let mut c = controller();
    let now = Instant::now();
    c.apply_reaction(Some("X"), now);
    assert_relative_eq!(c.reaction_alpha(now), 0.5);
    c.apply_reaction(None, now);
    for s in [0, 1, 5, 60] {
        assert_eq!(c.reaction_alpha(now + Duration::from_secs(s)), 0.0);
    }
}

#[test]
fn reaction_tints_the_mesh_draw() {
    let mut be = HeadlessBackend::new();
    let mut c = controller();
    c.set_active_mesh(&fixture("triangle.obj")).expect("load");
    let now = Instant::now();
    c.render_frame(&mut be, now);
    let neutral = be.take_frame();
    assert!(neutral.iter().any(|r| matches!(r, Recorded::Mesh { tint, .. } if *tint == NEUTRAL_TINT)));

    c.apply_reaction(Some("covid"), now);
    c.render_frame(&mut be, now);
    let frame = be.take_frame();
    let tint = frame
        .iter()
        .find_map(|r| match r {
            Recorded::Mesh { tint, .. } => Some(*tint),
            _ => None,
        })
        .expect("mesh drawn");
    assert_relative_eq!(tint[0], 1.0);
    assert_relative_eq!(tint[1], 0.3, epsilon = 1e-6);
}

#[test]
fn missing_file_gives_empty_asset_and_placeholder() {
    let mut be = HeadlessBackend::new();
    let mut c = controller();
    let asset = MeshAsset::load(&fixture("missing.obj"));
    assert!(asset.vertices().is_empty());
    assert!(asset.faces().is_empty());
    c.set_active_asset(asset);
    let report = c.render_frame(&mut be, Instant::now());
    assert_eq!(report.mesh, DrawStatus::Empty);
    assert!(be.frame().iter().any(|r| matches!(r, Recorded::Placeholder { .. })));
    assert_eq!(be.compile_calls(), 0);
}

#[test]
fn compile_happens_once_across_frames() {
    let mut be = HeadlessBackend::new();
    let mut c = controller();
    c.set_active_mesh(&fixture("quad.obj")).expect("load");
    let t0 = Instant::now();
    for i in 0..10 {
        c.render_frame(&mut be, t0 + Duration::from_millis(30 * i));
    }
    assert_eq!(be.compile_calls(), 1);
    assert_eq!(be.live_meshes(), 1);
}

#[test]
fn compile_failure_retries_next_frame() {
    let mut be = HeadlessBackend::new();
    be.fail_compiles(2);
    let mut c = controller();
    c.set_active_mesh(&fixture("quad.obj")).expect("load");
    let now = Instant::now();
    assert_eq!(c.render_frame(&mut be, now).mesh, DrawStatus::Failed);
    assert_eq!(c.render_frame(&mut be, now).mesh, DrawStatus::Failed);
    assert_eq!(be.live_meshes(), 0);
    assert_eq!(c.render_frame(&mut be, now).mesh, DrawStatus::Drawn);
    assert_eq!(be.compile_calls(), 3);
}

#[test]
fn draw_failure_falls_back_for_one_frame_only() {
    let mut be = HeadlessBackend::new();
    let mut c = controller();
    c.set_active_mesh(&fixture("quad.obj")).expect("load");
    let now = Instant::now();
    be.fail_draws(1);
    assert_eq!(c.render_frame(&mut be, now).mesh, DrawStatus::Failed);
    let failed = be.take_frame();
    assert!(failed.iter().any(|r| matches!(r, Recorded::Placeholder { .. })));
    assert_eq!(c.render_frame(&mut be, now).mesh, DrawStatus::Drawn);
    let ok = be.take_frame();
    assert!(!ok.iter().any(|r| matches!(r, Recorded::Placeholder { .. })));
}

#[test]
fn replacing_the_active_mesh_releases_the_old_handle() {
    let mut be = HeadlessBackend::new();
    let mut c = controller();
    let now = Instant::now();
    c.set_active_mesh(&fixture("quad.obj")).expect("load");
    c.render_frame(&mut be, now);
    assert_eq!(be.live_meshes(), 1);
    c.set_active_mesh(&fixture("triangle.obj")).expect("load");
    assert_eq!(be.live_meshes(), 0);
    c.render_frame(&mut be, now);
    assert_eq!(be.live_meshes(), 1);
}

#[test]
fn variants_keep_their_handles_while_switching() {
    let mut be = HeadlessBackend::new();
    let mut c = controller();
    c.preload_variant(BodyVariant::Male, &fixture("quad.obj")).expect("male");
    c.preload_variant(BodyVariant::Female, &fixture("triangle.obj")).expect("female");
    let now = Instant::now();
    assert!(c.set_gender_model("male"));
    c.render_frame(&mut be, now);
    assert!(c.set_gender_model("female"));
    c.render_frame(&mut be, now);
    assert!(c.set_gender_model("m"));
    c.render_frame(&mut be, now);
    assert_eq!(be.compile_calls(), 2);
    assert_eq!(be.live_meshes(), 2);
}

#[test]
fn background_gif_cycles_on_delay() {
    let mut be = HeadlessBackend::new();
    let mut c = controller();
    let t0 = Instant::now();
    let n = c.load_background(&mut be, &fixture("pulse.gif"), t0);
    assert_eq!(n, 3);
    assert_eq!(be.texture_uploads(), 3);

    let at = |ms| t0 + Duration::from_millis(ms);
    assert_eq!(c.render_frame(&mut be, at(30)).background_frame, Some(0));
    assert_eq!(c.render_frame(&mut be, at(90)).background_frame, Some(0));
    assert_eq!(c.render_frame(&mut be, at(120)).background_frame, Some(1));
    assert_eq!(c.render_frame(&mut be, at(150)).background_frame, Some(1));
    assert_eq!(c.render_frame(&mut be, at(240)).background_frame, Some(2));
    assert_eq!(c.render_frame(&mut be, at(360)).background_frame, Some(0));
    let frame = be.take_frame();
    assert!(!frame.iter().any(|r| matches!(r, Recorded::Clear(_))));
}

#[test]
fn unreadable_background_falls_back_to_clear() {
    let mut be = HeadlessBackend::new();
    let mut c = controller();
    let now = Instant::now();
    assert_eq!(c.load_background(&mut be, &fixture("quad.obj"), now), 0);
    let report = c.render_frame(&mut be, now);
    assert_eq!(report.background_frame, None);
    assert!(matches!(be.frame()[0], Recorded::Clear(_)));
}

#[test]
fn texture_upload_failure_drops_partial_frames() {
    let mut be = HeadlessBackend::new();
    be.fail_textures(1);
    let mut c = controller();
    assert_eq!(c.load_background(&mut be, &fixture("pulse.gif"), Instant::now()), 0);
    assert_eq!(c.background_frame_count(), 0);
}

#[test]
fn camera_transform_reaches_the_backend() {
    let mut be = HeadlessBackend::new();
    let mut c = controller();
    c.set_active_mesh(&fixture("triangle.obj")).expect("load");
    c.scroll(2.0);
    c.drag_start(0.0);
    c.drag_move(300.0);
    c.render_frame(&mut be, Instant::now());
    let mv = be
        .frame()
        .iter()
        .find_map(|r| match r {
            Recorded::Mesh { model_view, .. } => Some(*model_view),
            _ => None,
        })
        .expect("mesh");
    let origin = mv.transform_point3(glam::Vec3::ZERO);
    assert_relative_eq!(origin.z, -4.8, epsilon = 1e-5);
    // 90 degrees of yaw sends +X to -Z.
    let x = mv.transform_vector3(glam::Vec3::X);
    assert_relative_eq!(x.z, -1.0, epsilon = 1e-5);
}

#[test]
fn reset_camera_restores_defaults() {
    let mut c = controller();
    c.drag_start(0.0);
    c.drag_move(77.0);
    c.scroll(-5.0);
    c.reset_camera();
    assert_eq!(c.yaw_deg(), 0.0);
    assert_eq!(c.zoom(), -6.0);
}
