use indexmap::IndexMap;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use smallvec::SmallVec;

use crate::uid32::Uid32;

/// Display-string prefix left on references whose target *type* no longer
/// exists. Writers that hit this state collapse the raw id to nil, so the
/// prefix is the only remaining evidence a target was ever assigned.
pub const MISSING_MARKER: &str = "Missing";

/// Raw serialized object reference: the target identifier plus the legacy
/// display form, when the writer recorded one. `repr` is best-effort; current
/// tooling does not write it, and classification must work without it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RefSlot {
    pub target: Uid32,
    pub repr: Option<String>,
}

impl RefSlot {
    pub fn new(target: Uid32) -> Self {
        Self { target, repr: None }
    }

    pub fn unset() -> Self {
        Self::default()
    }

    pub fn with_repr(target: Uid32, repr: impl Into<String>) -> Self {
        Self {
            target,
            repr: Some(repr.into()),
        }
    }
}

impl Serialize for RefSlot {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;
        let len = if self.repr.is_some() { 2 } else { 1 };
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("ref", &self.target)?;
        if let Some(repr) = &self.repr {
            map.serialize_entry("repr", repr)?;
        }
        map.end()
    }
}

/// Reference slots appear in three forms:
/// - `{"ref": "a1b2c3d4"}` with an optional `"repr"` (current format)
/// - `"ref://a1b2c3d4"` (legacy string format)
/// - `"Missing..."` (legacy display string for a broken-type reference:
///   nil id, marker prefix retained)
///
/// Anything else must fail here so that sibling `PropertyValue` variants can
/// claim the value instead.
impl<'de> Deserialize<'de> for RefSlot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;

        match value {
            Value::String(s) => {
                if let Some(hex) = s.strip_prefix("ref://") {
                    let target = Uid32::parse_str(hex).map_err(D::Error::custom)?;
                    return Ok(RefSlot {
                        target,
                        repr: Some(s),
                    });
                }
                if s.starts_with(MISSING_MARKER) {
                    return Ok(RefSlot {
                        target: Uid32::nil(),
                        repr: Some(s),
                    });
                }
                Err(D::Error::custom("not a reference string"))
            }
            Value::Object(map) => {
                let raw = map
                    .get("ref")
                    .ok_or_else(|| D::Error::custom("reference object without `ref` field"))?;
                let target = match raw {
                    Value::Null => Uid32::nil(),
                    other => {
                        Uid32::deserialize(other.clone()).map_err(D::Error::custom)?
                    }
                };
                let repr = match map.get("repr") {
                    Some(Value::String(s)) => Some(s.clone()),
                    Some(Value::Null) | None => None,
                    Some(_) => return Err(D::Error::custom("`repr` must be a string")),
                };
                Ok(RefSlot { target, repr })
            }
            _ => Err(D::Error::custom(
                "reference must be a `{\"ref\": ...}` object or a legacy reference string",
            )),
        }
    }
}

/// One serialized property value. Untagged: reference slots are recognized
/// first, then scalars, then the nested containers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Ref(RefSlot),
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<PropertyValue>),
    Map(IndexMap<String, PropertyValue>),
}

impl PropertyValue {
    /// Type tag check: only these slots are inspected by the scanner.
    pub fn as_ref_slot(&self) -> Option<&RefSlot> {
        match self {
            PropertyValue::Ref(slot) => Some(slot),
            _ => None,
        }
    }
}

/// One visited property: the leaf name under which it was declared and the
/// value it holds.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyEntry<'a> {
    pub name: String,
    pub value: &'a PropertyValue,
}

/// Capability for anything whose serialized properties can be walked without
/// executing code.
pub trait PropertyIterable {
    /// Lazy depth-first iterator over properties in declaration order. With
    /// `include_nested`, child entries of lists and maps are visited too,
    /// each parent before its children.
    fn iter_properties(&self, include_nested: bool) -> PropertyIter<'_>;
}

/// Explicit-stack walker backing [`PropertyIterable`].
pub struct PropertyIter<'a> {
    stack: SmallVec<[(String, &'a PropertyValue); 8]>,
    include_nested: bool,
}

impl<'a> PropertyIter<'a> {
    pub fn over(properties: &'a IndexMap<String, PropertyValue>, include_nested: bool) -> Self {
        let mut stack = SmallVec::new();
        for (name, value) in properties.iter().rev() {
            stack.push((name.clone(), value));
        }
        Self {
            stack,
            include_nested,
        }
    }

    pub fn empty() -> Self {
        Self {
            stack: SmallVec::new(),
            include_nested: false,
        }
    }
}

impl<'a> Iterator for PropertyIter<'a> {
    type Item = PropertyEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (name, value) = self.stack.pop()?;

        if self.include_nested {
            // Children are pushed in reverse so they pop in declaration order,
            // right after their parent.
            match value {
                PropertyValue::List(items) => {
                    for (i, item) in items.iter().enumerate().rev() {
                        self.stack.push((format!("{name}[{i}]"), item));
                    }
                }
                PropertyValue::Map(map) => {
                    for (key, item) in map.iter().rev() {
                        self.stack.push((key.clone(), item));
                    }
                }
                _ => {}
            }
        }

        Some(PropertyEntry { name, value })
    }
}

/// Humanized display form of a serialized property name:
/// `texture_ref` becomes `Texture Ref`, `materials[2]` becomes `Materials[2]`.
pub fn nicify_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = true;
    for c in name.chars() {
        if c == '_' {
            out.push(' ');
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
