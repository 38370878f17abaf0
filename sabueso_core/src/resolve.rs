use rustc_hash::FxHashSet;

use crate::project::AssetIndex;
use crate::scene::SceneDoc;
use crate::uid32::Uid32;

/// Seam between the scanner and whatever object table can answer "does this
/// identifier still dereference to something".
pub trait ResolveRef {
    fn is_live(&self, id: Uid32) -> bool;
}

/// Live identifiers for one scan: the loaded scene's node ids plus every
/// registered project asset. A reference slot may legitimately target either.
#[derive(Debug, Clone, Default)]
pub struct LiveSet {
    ids: FxHashSet<Uid32>,
}

impl LiveSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_scene(doc: &SceneDoc, assets: &AssetIndex) -> Self {
        let mut live = Self::new();
        live.extend_scene(doc);
        live.extend_assets(assets);
        live
    }

    pub fn extend_scene(&mut self, doc: &SceneDoc) {
        for id in doc.nodes.keys() {
            self.ids.insert(id.as_uid32());
        }
    }

    pub fn extend_assets(&mut self, assets: &AssetIndex) {
        self.ids.extend(assets.uids());
    }

    pub fn insert(&mut self, id: Uid32) {
        self.ids.insert(id);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl ResolveRef for LiveSet {
    fn is_live(&self, id: Uid32) -> bool {
        self.ids.contains(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uid32::NodeID;

    #[test]
    fn live_set_unions_scene_and_assets() {
        let doc = SceneDoc::from_str(
            r#"{"root_id": "00000001", "nodes": {"00000001": {"name": "Root"}}}"#,
        )
        .unwrap();

        let mut assets = AssetIndex::new();
        let asset_uid = assets.register("res://textures/player.png");

        let live = LiveSet::for_scene(&doc, &assets);
        assert_eq!(live.len(), 2);
        assert!(live.is_live(NodeID::from_u32(1).as_uid32()));
        assert!(live.is_live(asset_uid.as_uid32()));
        assert!(!live.is_live(Uid32::from_u32(0xbeef)));
    }
}
