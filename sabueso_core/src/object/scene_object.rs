use indexmap::IndexMap;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::property::{PropertyIter, PropertyIterable, PropertyValue};
use crate::uid32::{NodeID, Uid32};

/// A component body as serialized in a scene document: a type display name
/// plus its properties in declaration order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Component {
    #[serde(rename = "type")]
    pub ty: String,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, PropertyValue>,
}

impl Component {
    pub fn new(ty: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            properties: IndexMap::new(),
        }
    }
}

impl PropertyIterable for Component {
    fn iter_properties(&self, include_nested: bool) -> PropertyIter<'_> {
        PropertyIter::over(&self.properties, include_nested)
    }
}

/// One component slot on a scene object. Editors write `null` into a slot
/// whose component type no longer exists; such a slot has no readable
/// properties and is itself a reportable condition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentSlot(pub Option<Component>);

impl ComponentSlot {
    pub fn live(component: Component) -> Self {
        Self(Some(component))
    }

    pub fn missing() -> Self {
        Self(None)
    }

    pub fn is_missing(&self) -> bool {
        self.0.is_none()
    }

    pub fn component(&self) -> Option<&Component> {
        self.0.as_ref()
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Accepts either a Uid32 hex string (e.g. "a1b2c3d4"), a plain u32, or null.
fn deserialize_parent<'de, D>(deserializer: D) -> Result<Option<NodeID>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;

    match value {
        Value::Null => Ok(None),
        Value::String(s) => Uid32::parse_str(&s)
            .map(|uid| Some(NodeID::from_uid32(uid)))
            .map_err(D::Error::custom),
        Value::Number(n) => n
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .map(|v| Some(NodeID::from_u32(v)))
            .ok_or_else(|| D::Error::custom("parent index must be a u32")),
        _ => Err(D::Error::custom(
            "parent must be a hex id string, a u32 index, or null",
        )),
    }
}

/// One inspectable object in a scene document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    #[serde(skip)]
    pub id: NodeID,

    pub name: String,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_parent"
    )]
    pub parent: Option<NodeID>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ComponentSlot>,

    /// Editor-internal helper objects are kept out of scans.
    #[serde(default, skip_serializing_if = "is_false")]
    pub internal: bool,

    #[serde(skip)]
    pub children: Vec<NodeID>,
}

impl SceneObject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: NodeID::nil(),
            name: name.into(),
            parent: None,
            components: Vec::new(),
            internal: false,
            children: Vec::new(),
        }
    }
}
