use std::path::PathBuf;

use lf_assets::load_gif_frames;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

#[test]
fn decodes_every_frame_in_order() {
    let frames = load_gif_frames(&fixture("pulse.gif")).expect("decode");
    assert_eq!(frames.len(), 3);
    for f in &frames {
        assert_eq!((f.width, f.height), (1, 1));
        assert_eq!(f.pixels.len(), 4);
        assert!(f.srgb);
    }
    assert_eq!(&frames[0].pixels[..3], &[255, 255, 255]);
    assert_eq!(&frames[1].pixels[..3], &[0, 0, 0]);
    assert_eq!(&frames[2].pixels[..3], &[255, 255, 255]);
}

#[test]
fn obj_file_is_not_a_gif() {
    assert!(load_gif_frames(&fixture("triangle.obj")).is_err());
}
