//! Request bodies for write calls.

use serde::{Deserialize, Serialize};

use crate::enums::{CollectionType, MediaType};

/// Body of `account/{id}/favorite` and `account/{id}/watchlist`.
///
/// The flag's key is the collection name, so it is serialized by hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkMedia {
    pub media_type: MediaType,
    pub media_id: i64,
    pub collection: CollectionType,
    pub include: bool,
}

impl Serialize for MarkMedia {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("media_type", &self.media_type)?;
        map.serialize_entry("media_id", &self.media_id)?;
        map.serialize_entry(self.collection.as_str(), &self.include)?;
        map.end()
    }
}

/// Body of `list/{id}/add_item` and `list/{id}/remove_item`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    pub media_type: MediaType,
    pub media_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewList {
    pub name: String,
    pub description: String,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteSession {
    pub session_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_media_uses_collection_as_flag_key() {
        let body = MarkMedia {
            media_type: MediaType::Movie,
            media_id: 550,
            collection: CollectionType::Watchlist,
            include: true,
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"media_type":"movie","media_id":550,"watchlist":true}"#
        );
    }

    #[test]
    fn free_text_is_escaped() {
        let body = NewList {
            name: r#"My "best" list"#.to_string(),
            description: "a\nb".to_string(),
            language: "en".to_string(),
        };
        let json = serde_json::to_string(&body).unwrap();
        let back: NewList = serde_json::from_str(&json).unwrap();
        assert_eq!(back, body);
    }
}
