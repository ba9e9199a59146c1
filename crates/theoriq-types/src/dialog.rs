//! Dialog model: items authored by users or agents, each carrying blocks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Value, json};

use crate::TypesError;

/// Block type tag for plain text.
pub const TEXT_BLOCK: &str = "text";

/// Author of a dialog item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceType {
    User,
    Agent,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Agent => "agent",
        }
    }
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SourceType {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "user" => Ok(Self::User),
            "agent" => Ok(Self::Agent),
            _ => Err(TypesError::UnknownSourceType(s.to_string())),
        }
    }
}

impl Serialize for SourceType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SourceType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A single unit of content inside a dialog item.
///
/// Only `text` blocks are interpreted; other block types are carried
/// through untouched in `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub data: Value,
}

impl ItemBlock {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            block_type: TEXT_BLOCK.to_string(),
            data: json!({ "text": text.into() }),
        }
    }

    /// Text payload, if this is a text block with a string `data.text`.
    pub fn as_text(&self) -> Option<&str> {
        if self.block_type != TEXT_BLOCK {
            return None;
        }
        self.data.get("text").and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogItem {
    pub timestamp: DateTime<Utc>,
    pub source_type: SourceType,
    pub source: String,
    #[serde(default)]
    pub blocks: Vec<ItemBlock>,
}

impl DialogItem {
    /// New item stamped with the current time.
    pub fn new(source_type: SourceType, source: impl Into<String>, blocks: Vec<ItemBlock>) -> Self {
        Self {
            timestamp: Utc::now(),
            source_type,
            source: source.into(),
            blocks,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dialog {
    #[serde(default)]
    pub items: Vec<DialogItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_block_shape() {
        let block = ItemBlock::text("hi");
        assert_eq!(
            serde_json::to_value(&block).unwrap(),
            json!({"type": "text", "data": {"text": "hi"}})
        );
        assert_eq!(block.as_text(), Some("hi"));
    }

    #[test]
    fn test_non_text_block_has_no_text() {
        let block: ItemBlock =
            serde_json::from_value(json!({"type": "code", "data": {"text": "fn main() {}"}}))
                .unwrap();
        assert_eq!(block.as_text(), None);
    }

    #[test]
    fn test_item_field_names() {
        let item: DialogItem = serde_json::from_value(json!({
            "timestamp": "2024-05-01T12:00:00Z",
            "sourceType": "User",
            "source": "0xabc",
            "blocks": [{"type": "text", "data": {"text": "World"}}]
        }))
        .unwrap();
        assert_eq!(item.source_type, SourceType::User);
        assert_eq!(item.blocks[0].as_text(), Some("World"));

        let out = serde_json::to_value(&item).unwrap();
        assert_eq!(out["sourceType"], json!("user"));
        assert!(out.get("source_type").is_none());
    }

    #[test]
    fn test_unknown_source_type_rejected() {
        let err = "robot".parse::<SourceType>().unwrap_err();
        assert_eq!(err, TypesError::UnknownSourceType("robot".into()));
    }
}
