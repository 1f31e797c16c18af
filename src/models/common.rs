//! Common types shared across ConnectWise API models.
//!
//! This module defines the nested reference type used by most entities
//! and the patch operation used for partial updates.

use serde::{Deserialize, Deserializer, Serialize};

/// A reference to another entity, as embedded in API responses.
///
/// ConnectWise returns links such as `{"id": 5, "name": "Open", "_info": {...}}`;
/// only the id and name are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    /// Referenced entity ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Display name of the referenced entity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Reference {
    /// Creates a reference by id, as expected in request payloads.
    pub fn id(id: u64) -> Self {
        Self {
            id: Some(id),
            name: None,
        }
    }
}

/// Helpers for optional references.
pub(crate) fn ref_name(reference: &Option<Reference>) -> Option<&str> {
    reference.as_ref().and_then(|r| r.name.as_deref())
}

pub(crate) fn ref_id(reference: &Option<Reference>) -> Option<u64> {
    reference.as_ref().and_then(|r| r.id)
}

/// Deserializes an explicit `null` as the type's default.
///
/// Pair with `#[serde(default)]` so a missing key behaves the same way.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The kind of a patch operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    /// Replace the value at the path.
    Replace,
    /// Add a value at the path.
    Add,
    /// Remove the value at the path.
    Remove,
}

/// A single field-level partial-update instruction.
///
/// A PATCH body is a JSON array of these, applied by the server in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchOperation {
    /// Operation kind.
    pub op: PatchOp,

    /// Field path (e.g., `/status` or `summary`).
    pub path: String,

    /// New value. Ignored by the server for `remove`.
    pub value: serde_json::Value,
}

impl PatchOperation {
    /// Creates a `replace` operation.
    pub fn replace(path: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self {
            op: PatchOp::Replace,
            path: path.into(),
            value: value.into(),
        }
    }

    /// Creates an `add` operation.
    pub fn add(path: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self {
            op: PatchOp::Add,
            path: path.into(),
            value: value.into(),
        }
    }

    /// Creates a `remove` operation.
    pub fn remove(path: impl Into<String>) -> Self {
        Self {
            op: PatchOp::Remove,
            path: path.into(),
            value: serde_json::Value::Null,
        }
    }
}
