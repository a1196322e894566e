//! Wire shape exchanged with the remote store
//!
//! Records are what the store returns and accepts: nested `items` arrays,
//! optional ids, status strings. They carry no synthesized identities;
//! decorating a record into a [`Node`](crate::Node) is the engine's job.

use crate::status::Status;
use crate::text::LocalizedText;
use serde::{Deserialize, Deserializer, Serialize};

/// Stored representation of a menu or item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    /// Server-issued id, absent until first save
    #[serde(
        default,
        deserialize_with = "deserialize_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    /// Top-level marker
    #[serde(default, skip_serializing_if = "is_false")]
    pub menu: bool,

    #[serde(default)]
    pub title: LocalizedText,

    #[serde(default, deserialize_with = "deserialize_text")]
    pub path: String,

    #[serde(default, deserialize_with = "deserialize_text")]
    pub redirect: String,

    #[serde(default)]
    pub order: i64,

    #[serde(default)]
    pub status: Status,

    /// Nested items; `null` and a missing field both mean none
    #[serde(default, deserialize_with = "deserialize_items")]
    pub items: Vec<NodeRecord>,
}

impl NodeRecord {
    /// Parse a forest document (JSON array of root records)
    ///
    /// # Errors
    /// Returns error if the document is not a JSON array of records
    pub fn parse_forest(json: &str) -> Result<Vec<NodeRecord>, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Number of records in this subtree, including `self`
    #[must_use]
    pub fn subtree_len(&self) -> usize {
        1 + self.items.iter().map(NodeRecord::subtree_len).sum::<usize>()
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(value: &bool) -> bool {
    !*value
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawId>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawId::Text(text)) if text.trim().is_empty() => None,
        Some(RawId::Text(text)) => Some(text),
        Some(RawId::Number(n)) => Some(n.to_string()),
        None => None,
    })
}

fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn deserialize_items<'de, D>(deserializer: D) -> Result<Vec<NodeRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<NodeRecord>>::deserialize(deserializer)?.unwrap_or_default())
}
