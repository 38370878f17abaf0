// asset_index.rs - in-memory asset registry for one auditor run
//
// The index is session-scoped and ephemeral: it is rebuilt from the `res/`
// tree on every run and never persisted, so renames made by external tools
// cannot leave stale uid mappings behind. Each asset path gets a
// deterministic uid (hash of the `res://` path), which is also the id space
// reference slots use to point at assets.

use rustc_hash::FxHashMap;
use std::fs;
use std::io;
use std::path::Path;

use super::paths::res_path_of;
use crate::resolve::ResolveRef;
use crate::uid32::{AssetID, Uid32};

/// File suffix of scene and prefab-style object documents.
pub const SCENE_DOC_SUFFIX: &str = ".scn";

/// In-memory asset registry keyed by deterministic path-hash uids.
#[derive(Debug, Clone, Default)]
pub struct AssetIndex {
    assets: FxHashMap<AssetID, String>,
    path_to_uid: FxHashMap<String, AssetID>,
}

impl AssetIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk the project's `res/` tree and register every file. A project
    /// without a `res/` directory is empty, not an error.
    pub fn build(root: &Path) -> io::Result<Self> {
        let mut index = Self::new();
        let res_dir = root.join("res");
        if !res_dir.is_dir() {
            return Ok(index);
        }

        walk_dir(&res_dir, &mut |file| {
            if let Some(res_path) = res_path_of(root, file) {
                index.register(res_path);
            }
            Ok(())
        })?;

        Ok(index)
    }

    /// Register an asset path, returning its uid. Registering the same path
    /// twice yields the same uid.
    pub fn register(&mut self, path: impl Into<String>) -> AssetID {
        let path = path.into();
        if let Some(uid) = self.path_to_uid.get(&path) {
            return *uid;
        }

        let uid = AssetID::from_uid32(Uid32::from_string(&path));
        self.assets.insert(uid, path.clone());
        self.path_to_uid.insert(path, uid);
        uid
    }

    pub fn uid_of(&self, path: impl AsRef<str>) -> Option<AssetID> {
        self.path_to_uid.get(path.as_ref()).copied()
    }

    pub fn path_of(&self, uid: AssetID) -> Option<&str> {
        self.assets.get(&uid).map(String::as_str)
    }

    pub fn uids(&self) -> impl Iterator<Item = Uid32> + '_ {
        self.assets.keys().map(|id| id.as_uid32())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// `res://` paths of every registered scene document, sorted for a stable
    /// enumeration order.
    pub fn scene_documents(&self) -> Vec<String> {
        let mut docs: Vec<String> = self
            .path_to_uid
            .keys()
            .filter(|p| p.ends_with(SCENE_DOC_SUFFIX))
            .cloned()
            .collect();
        docs.sort();
        docs
    }
}

impl ResolveRef for AssetIndex {
    fn is_live(&self, id: Uid32) -> bool {
        self.assets.contains_key(&AssetID::from_uid32(id))
    }
}

/// Visits all files in a directory tree in name order, calling the callback
/// for each file.
pub fn walk_dir<F>(dir: &Path, callback: &mut F) -> io::Result<()>
where
    F: FnMut(&Path) -> io::Result<()>,
{
    let mut entries: Vec<_> = fs::read_dir(dir)?
        .collect::<io::Result<Vec<_>>>()?
        .into_iter()
        .map(|entry| entry.path())
        .collect();
    entries.sort();

    for path in entries {
        if path.is_dir() {
            walk_dir(&path, callback)?;
        } else if path.is_file() {
            callback(&path)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static TEST_DIR_SEQ: AtomicU64 = AtomicU64::new(0);

    fn temp_test_dir() -> std::path::PathBuf {
        let seq = TEST_DIR_SEQ.fetch_add(1, Ordering::Relaxed);
        let pid = std::process::id();
        let nonce = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("sabueso_index_test_{pid}_{nonce}_{seq}"))
    }

    #[test]
    fn register_is_deterministic() {
        let mut index1 = AssetIndex::new();
        let mut index2 = AssetIndex::new();

        let uid1 = index1.register("res://textures/player.png");
        let uid2 = index2.register("res://textures/player.png");
        assert_eq!(uid1, uid2);

        // Same path again is a no-op.
        assert_eq!(index1.register("res://textures/player.png"), uid1);
        assert_eq!(index1.len(), 1);

        assert_eq!(index1.path_of(uid1), Some("res://textures/player.png"));
        assert_eq!(index1.uid_of("res://textures/player.png"), Some(uid1));
        assert!(index1.is_live(uid1.as_uid32()));
        assert!(!index1.is_live(Uid32::from_u32(0xdead)));
    }

    #[test]
    fn build_registers_res_tree() -> io::Result<()> {
        let base = temp_test_dir();
        let res = base.join("res");
        fs::create_dir_all(res.join("scenes"))?;
        fs::write(res.join("scenes/main.scn"), b"{}")?;
        fs::write(res.join("scenes/level_1.scn"), b"{}")?;
        fs::write(res.join("player.png"), b"png")?;

        let index = AssetIndex::build(&base)?;
        assert_eq!(index.len(), 3);
        assert!(index.uid_of("res://scenes/main.scn").is_some());
        assert!(index.uid_of("res://player.png").is_some());

        assert_eq!(
            index.scene_documents(),
            vec![
                "res://scenes/level_1.scn".to_string(),
                "res://scenes/main.scn".to_string(),
            ]
        );

        let _ = fs::remove_dir_all(&base);
        Ok(())
    }

    #[test]
    fn build_without_res_dir_is_empty() -> io::Result<()> {
        let base = temp_test_dir();
        fs::create_dir_all(&base)?;

        let index = AssetIndex::build(&base)?;
        assert!(index.is_empty());

        let _ = fs::remove_dir_all(&base);
        Ok(())
    }
}
