use std::path::{Path, PathBuf};

/// Resolve a `res://` virtual path against a project root. Plain relative
/// paths are treated as already relative to the root.
pub fn resolve_res_path(root: &Path, path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("res://") {
        root.join("res").join(stripped.trim_start_matches('/'))
    } else {
        root.join(path)
    }
}

/// Virtual `res://` form of a file under the project's `res/` tree, with
/// forward slashes regardless of platform. `None` for files outside `res/`.
pub fn res_path_of(root: &Path, file: &Path) -> Option<String> {
    let rel = file.strip_prefix(root.join("res")).ok()?;
    Some(format!(
        "res://{}",
        rel.to_string_lossy().replace('\\', "/")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_res_prefix() {
        let root = Path::new("/proj");
        assert_eq!(
            resolve_res_path(root, "res://scenes/main.scn"),
            PathBuf::from("/proj/res/scenes/main.scn")
        );
        assert_eq!(
            resolve_res_path(root, "res:///scenes/main.scn"),
            PathBuf::from("/proj/res/scenes/main.scn")
        );
    }

    #[test]
    fn resolve_plain_relative() {
        let root = Path::new("/proj");
        assert_eq!(
            resolve_res_path(root, "res/scenes/main.scn"),
            PathBuf::from("/proj/res/scenes/main.scn")
        );
    }

    #[test]
    fn res_path_of_roundtrips() {
        let root = Path::new("/proj");
        let file = root.join("res/textures/player.png");
        assert_eq!(
            res_path_of(root, &file).as_deref(),
            Some("res://textures/player.png")
        );
        assert_eq!(res_path_of(root, Path::new("/elsewhere/x.png")), None);
    }
}
