use crate::scene::SceneDoc;
use crate::uid32::NodeID;

/// Full `/`-joined location of a node, ancestor names first, e.g.
/// `Root/Child/Grandchild`. A parent pointer that no longer dereferences is
/// treated as absent, so such a node prints as a root instead of failing.
/// Recursion is bounded by tree depth; the document model never holds cycles.
pub fn full_path(doc: &SceneDoc, id: NodeID) -> String {
    let Some(node) = doc.get(id) else {
        return String::new();
    };

    match node.parent.filter(|p| doc.get(*p).is_some()) {
        None => node.name.clone(),
        Some(parent) => format!("{}/{}", full_path(doc, parent), node.name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> SceneDoc {
        SceneDoc::from_str(
            r#"{
                "root_id": "00000001",
                "nodes": {
                    "00000001": {"name": "Root"},
                    "00000002": {"name": "Child", "parent": "00000001"},
                    "00000003": {"name": "Grandchild", "parent": "00000002"},
                    "00000004": {"name": "Orphan", "parent": "000000ff"}
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn parentless_node_is_its_own_path() {
        assert_eq!(full_path(&doc(), NodeID::from_u32(1)), "Root");
    }

    #[test]
    fn chain_joins_names_root_first() {
        let doc = doc();
        assert_eq!(full_path(&doc, NodeID::from_u32(2)), "Root/Child");
        assert_eq!(
            full_path(&doc, NodeID::from_u32(3)),
            "Root/Child/Grandchild"
        );
    }

    #[test]
    fn dangling_parent_degrades_to_root() {
        assert_eq!(full_path(&doc(), NodeID::from_u32(4)), "Orphan");
    }

    #[test]
    fn unknown_node_is_empty() {
        assert_eq!(full_path(&doc(), NodeID::from_u32(0x99)), "");
    }
}
