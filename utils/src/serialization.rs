//! Serde adapters for [arkworks](http://arkworks.rs/) types implementing
//! [CanonicalSerialize] and [CanonicalDeserialize].
//!
//! Field elements go through their compressed canonical encoding and are
//! written as a byte string, so the encoding of a circuit or an assignment is
//! stable across serde formats.

use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use serde_with::{Bytes, DeserializeAs, SerializeAs};

/// Use with `#[serde_as(as = "blueprint_utils::serialization::SerdeAs")]`,
/// also on containers (`Vec<SerdeAs>`, `Option<SerdeAs>`, ...)
pub struct SerdeAs;

impl<T> SerializeAs<T> for SerdeAs
where
    T: CanonicalSerialize,
{
    fn serialize_as<S>(val: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut bytes = vec![];
        val.serialize_compressed(&mut bytes)
            .map_err(serde::ser::Error::custom)?;

        Bytes::serialize_as(&bytes, serializer)
    }
}

impl<'de, T> DeserializeAs<'de, T> for SerdeAs
where
    T: CanonicalDeserialize,
{
    fn deserialize_as<D>(deserializer: D) -> Result<T, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bytes: Vec<u8> = Bytes::deserialize_as(deserializer)?;
        T::deserialize_compressed(&mut &bytes[..]).map_err(serde::de::Error::custom)
    }
}
