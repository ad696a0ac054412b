use std::path::{Path, PathBuf};

/// Resolve an asset path against a root directory. Absolute paths pass through.
#[must_use]
pub fn resolve_asset_path(root: &Path, rel: &Path) -> PathBuf {
    if rel.is_absolute() {
        rel.to_path_buf()
    } else {
        root.join(rel)
    }
}

/// True when the path carries an `.obj` extension (case-insensitive).
#[must_use]
pub fn is_obj_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("obj"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_joins_root() {
        let p = resolve_asset_path(Path::new("/srv/assets"), Path::new("anatomy/male.obj"));
        assert_eq!(p, PathBuf::from("/srv/assets/anatomy/male.obj"));
    }

    #[test]
    fn absolute_passes_through() {
        let p = resolve_asset_path(Path::new("/srv/assets"), Path::new("/tmp/heart.obj"));
        assert_eq!(p, PathBuf::from("/tmp/heart.obj"));
    }

    #[test]
    fn obj_extension_check() {
        assert!(is_obj_path(Path::new("a/b/Male.OBJ")));
        assert!(!is_obj_path(Path::new("a/b/male.gltf")));
        assert!(!is_obj_path(Path::new("noext")));
    }
}
