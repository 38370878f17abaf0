//! 32-bit identifiers with a reserved nil sentinel and type-safe wrappers.
//!
//! `0` is nil everywhere in this crate: a reference slot holding a nil id was
//! never assigned a target, which is what separates "deliberately empty" from
//! "assigned and later broken".

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

/// Base 32-bit identifier type.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Uid32(u32);

impl Uid32 {
    pub fn nil() -> Self {
        Self(0)
    }

    pub fn from_u32(value: u32) -> Self {
        Self(value)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// Deterministic id from a string (FNV-1a). Never yields nil, so hashed
    /// ids can always be told apart from never-assigned slots.
    pub fn from_string(s: &str) -> Self {
        const FNV_OFFSET_BASIS: u32 = 0x811c9dc5;
        const FNV_PRIME: u32 = 0x01000193;

        let mut hash = FNV_OFFSET_BASIS;
        for byte in s.as_bytes() {
            hash ^= *byte as u32;
            hash = hash.wrapping_mul(FNV_PRIME);
        }

        Self(if hash == 0 { 1 } else { hash })
    }

    pub fn parse_str(s: &str) -> Result<Self, String> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        u32::from_str_radix(s, 16)
            .map(Self)
            .map_err(|e| format!("Invalid Uid32 string: {}", e))
    }

    pub fn is_nil(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Uid32 {
    fn default() -> Self {
        Self::nil()
    }
}

impl fmt::Debug for Uid32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Uid32({:08x})", self.0)
    }
}

impl fmt::Display for Uid32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

// Serde trait implementations: hex string on the wire, u32 accepted on input.
impl Serialize for Uid32 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{:08x}", self.0))
    }
}

impl<'de> Deserialize<'de> for Uid32 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct Uid32Visitor;

        impl<'de> serde::de::Visitor<'de> for Uid32Visitor {
            type Value = Uid32;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a hex string or u32")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Uid32::parse_str(v).map_err(E::custom)
            }

            fn visit_u32<E: serde::de::Error>(self, v: u32) -> Result<Self::Value, E> {
                Ok(Uid32::from_u32(v))
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Self::Value, E> {
                u32::try_from(v).map(Uid32::from_u32).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(Uid32Visitor)
    }
}

// Type-safe ID wrappers with separate atomic counters per type.
static NODE_COUNTER: AtomicU32 = AtomicU32::new(1);
static ASSET_COUNTER: AtomicU32 = AtomicU32::new(1);

macro_rules! define_id_type {
    ($type_name:ident, $counter:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $type_name(Uid32);

        impl $type_name {
            pub fn new() -> Self {
                let counter = $counter.fetch_add(1, Ordering::Relaxed);
                let id_value = if counter == 0 { 1 } else { counter };
                Self(Uid32::from_u32(id_value))
            }

            pub fn nil() -> Self {
                Self(Uid32::nil())
            }

            /// Create from a u32 value directly (bypasses the atomic counter).
            /// Useful for deserialization and deterministic ID creation.
            pub fn from_u32(value: u32) -> Self {
                Self(Uid32::from_u32(value))
            }

            pub fn from_uid32(uid: Uid32) -> Self {
                Self(uid)
            }

            pub fn as_uid32(&self) -> Uid32 {
                self.0
            }

            pub fn is_nil(&self) -> bool {
                self.0.is_nil()
            }
        }

        impl Default for $type_name {
            fn default() -> Self {
                Self::nil()
            }
        }

        impl From<Uid32> for $type_name {
            fn from(uid: Uid32) -> Self {
                Self(uid)
            }
        }

        impl From<$type_name> for Uid32 {
            fn from(id: $type_name) -> Self {
                id.0
            }
        }

        impl fmt::Debug for $type_name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($type_name), "({})"), self.0.as_u32())
            }
        }

        impl fmt::Display for $type_name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl Serialize for $type_name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                self.0.serialize(serializer)
            }
        }

        impl<'de> Deserialize<'de> for $type_name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                Uid32::deserialize(deserializer).map(Self)
            }
        }
    };
}

define_id_type!(NodeID, NODE_COUNTER, "Scene object IDs");
define_id_type!(AssetID, ASSET_COUNTER, "Project asset IDs");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_node_ids_are_distinct_and_non_nil() {
        let id1 = NodeID::new();
        let id2 = NodeID::new();
        assert_ne!(id1, id2);
        assert!(!id1.is_nil());
        assert!(!id2.is_nil());
    }

    #[test]
    fn nil_is_zero() {
        let nil = Uid32::nil();
        assert_eq!(nil.as_u32(), 0);
        assert!(nil.is_nil());
        assert!(NodeID::nil().is_nil());
        assert!(AssetID::nil().is_nil());
    }

    #[test]
    fn from_string_is_deterministic_and_never_nil() {
        let uid1 = Uid32::from_string("res://scenes/main.scn");
        let uid2 = Uid32::from_string("res://scenes/main.scn");
        assert_eq!(uid1, uid2);
        assert!(!uid1.is_nil());

        let other = Uid32::from_string("res://scenes/other.scn");
        assert_ne!(uid1, other);
    }

    #[test]
    fn parse_str_accepts_bare_and_prefixed_hex() {
        let uid = Uid32::parse_str("a1b2c3d4").unwrap();
        assert_eq!(uid.as_u32(), 0xa1b2c3d4);

        let uid2 = Uid32::parse_str("0x0000002a").unwrap();
        assert_eq!(uid2.as_u32(), 42);

        assert!(Uid32::parse_str("not hex").is_err());
    }

    #[test]
    fn serde_roundtrip_is_hex_string() {
        let uid = Uid32::from_u32(0x12345678);
        let json = serde_json::to_string(&uid).unwrap();
        assert_eq!(json, "\"12345678\"");

        let back: Uid32 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, uid);
    }
}
