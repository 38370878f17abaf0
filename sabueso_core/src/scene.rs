use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::object::SceneObject;
use crate::uid32::NodeID;

/// Errors produced while reading a scene document.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to read scene file: {0}")]
    Io(#[from] io::Error),

    #[error("malformed scene document: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<SceneError> for io::Error {
    fn from(err: SceneError) -> Self {
        match err {
            SceneError::Io(e) => e,
            SceneError::Parse(e) => io::Error::new(io::ErrorKind::InvalidData, e),
        }
    }
}

/// Pure serializable scene document (no runtime state). Also the shape of
/// prefab-style object assets: any `.scn` file is a node tree with the same
/// schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneDoc {
    pub root_id: NodeID,
    pub nodes: IndexMap<NodeID, SceneObject>,
}

impl<'de> Deserialize<'de> for SceneDoc {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RawSceneDoc {
            root_id: NodeID,
            nodes: IndexMap<NodeID, SceneObject>,
        }

        let raw = RawSceneDoc::deserialize(deserializer)?;

        // The map key is the node's id; child lists are rebuilt from parent
        // pointers so the document stays consistent no matter what wrote it.
        let mut nodes = IndexMap::with_capacity(raw.nodes.len());
        let mut parent_children: IndexMap<NodeID, Vec<NodeID>> = IndexMap::new();

        for (id, mut node) in raw.nodes {
            node.id = id;
            node.children.clear();

            if let Some(parent) = node.parent {
                parent_children.entry(parent).or_default().push(id);
            }

            nodes.insert(id, node);
        }

        for (parent_id, children) in parent_children {
            if let Some(parent) = nodes.get_mut(&parent_id) {
                for child in children {
                    parent.children.push(child);
                }
            }
        }

        Ok(SceneDoc {
            root_id: raw.root_id,
            nodes,
        })
    }
}

impl SceneDoc {
    /// Create a new document with a single root object.
    pub fn new(mut root: SceneObject) -> Self {
        if root.id.is_nil() {
            root.id = NodeID::new();
        }
        let root_id = root.id;
        let mut nodes = IndexMap::new();
        nodes.insert(root_id, root);
        Self { root_id, nodes }
    }

    pub fn from_str(src: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(src)?)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, SceneError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Load a scene document from disk.
    pub fn load(path: &Path) -> Result<Self, SceneError> {
        let bytes = std::fs::read(path)?;
        Self::from_slice(&bytes)
    }

    /// Save the document to disk as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let data = serde_json::to_vec_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, data)
    }

    #[inline]
    pub fn get(&self, id: NodeID) -> Option<&SceneObject> {
        self.nodes.get(&id)
    }

    #[inline]
    pub fn name_of(&self, id: NodeID) -> Option<&str> {
        self.get(id).map(|n| n.name.as_str())
    }

    #[inline]
    pub fn parent_of(&self, id: NodeID) -> Option<NodeID> {
        self.get(id).and_then(|n| n.parent)
    }

    #[inline]
    pub fn children_of(&self, id: NodeID) -> &[NodeID] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Objects eligible for scanning: every loaded node in document order,
    /// excluding editor-internal helpers.
    pub fn objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.nodes.values().filter(|n| !n.internal)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
