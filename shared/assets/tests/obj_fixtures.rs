use std::path::{Path, PathBuf};

use lf_assets::{AssetError, FaceVertex, build_draw_mesh, load_obj};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

#[test]
fn triangle_file_yields_three_vertices_and_one_face() {
    let (mesh, report) = load_obj(&fixture("triangle.obj")).expect("load");
    assert_eq!(mesh.vertices.len(), 3);
    assert_eq!(mesh.faces.len(), 1);
    assert_eq!(
        mesh.faces[0],
        vec![
            FaceVertex::new(Some(0), None, None),
            FaceVertex::new(Some(1), None, None),
            FaceVertex::new(Some(2), None, None),
        ]
    );
    assert!(report.is_clean());
}

#[test]
fn full_references_resolve_every_slot() {
    let (mesh, _) = load_obj(&fixture("textured_triangle.obj")).expect("load");
    for (i, corner) in mesh.faces[0].iter().enumerate() {
        let i = u32::try_from(i).expect("small");
        assert_eq!(*corner, FaceVertex::new(Some(i), Some(i), Some(i)));
    }
}

#[test]
fn missing_file_is_not_found() {
    let err = load_obj(&fixture("nope.obj")).expect_err("missing");
    assert!(matches!(err, AssetError::NotFound(_)));
    assert!(err.is_not_found());
}

#[test]
fn directory_is_not_a_file() {
    let err = load_obj(&fixture("")).expect_err("dir");
    assert!(err.is_not_found());
}

#[test]
fn broken_lines_are_counted_not_fatal() {
    let (mesh, report) = load_obj(&fixture("mixed.obj")).expect("load");
    assert_eq!(mesh.vertices.len(), 5);
    assert_eq!(mesh.texcoords.len(), 1);
    assert_eq!(mesh.faces.len(), 4);
    assert_eq!(report.skipped_lines, 2);

    let cpu = build_draw_mesh(&mesh);
    // quad -> 2, two triangles -> 2, face with a dangling corner -> 0
    assert_eq!(cpu.triangle_count(), 4);
}

#[test]
fn quad_fans_into_two_triangles_with_normals() {
    let (mesh, _) = load_obj(&fixture("quad.obj")).expect("load");
    let cpu = build_draw_mesh(&mesh);
    assert_eq!(cpu.triangle_count(), 2);
    assert!(cpu.vertices.iter().all(|v| v.attrs & lf_assets::ATTR_NORMAL != 0));
    assert!(cpu.vertices.iter().all(|v| v.attrs & lf_assets::ATTR_TEXCOORD == 0));
}
