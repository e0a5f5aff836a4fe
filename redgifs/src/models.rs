//! Data structures shared with the RedGifs API

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A tag as listed by the service, with its popularity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRecord {
    /// Canonical (display-cased) tag name
    pub name: String,
    /// Number of media carrying the tag
    #[serde(default)]
    pub count: u64,
}

impl TagRecord {
    pub fn new(name: impl Into<String>, count: u64) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}

/// Body of the tag list endpoint (`GET /v1/tags`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagList {
    #[serde(default)]
    pub tags: Vec<TagRecord>,
}

impl TagList {
    /// Parses a tag list response body
    pub fn from_json(body: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(body)?)
    }
}

/// Order of the results of a search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    #[default]
    Trending,
    Top,
    Latest,
    Oldest,
    // Not offered by the web UI but accepted by the API
    Recent,
    Best,
    Top28,
    New,
}

impl Order {
    pub const ALL: [Order; 8] = [
        Order::Trending,
        Order::Top,
        Order::Latest,
        Order::Oldest,
        Order::Recent,
        Order::Best,
        Order::Top28,
        Order::New,
    ];

    /// Value sent in the `order` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Order::Trending => "trending",
            Order::Top => "top",
            Order::Latest => "latest",
            Order::Oldest => "oldest",
            Order::Recent => "recent",
            Order::Best => "best",
            Order::Top28 => "top28",
            Order::New => "new",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Order {
    type Err = crate::RedgifsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Order::ALL
            .into_iter()
            .find(|order| order.as_str() == lower)
            .ok_or_else(|| crate::RedgifsError::other(format!("Unknown order: {}", s)))
    }
}

/// Kind of media returned by a search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MediaType {
    #[serde(rename = "i")]
    Image,
    #[default]
    #[serde(rename = "g")]
    Gif,
}

impl MediaType {
    /// Value sent in the `type` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Image => "i",
            MediaType::Gif => "g",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = crate::RedgifsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "i" | "image" => Ok(MediaType::Image),
            "g" | "gif" => Ok(MediaType::Gif),
            _ => Err(crate::RedgifsError::other(format!("Unknown media type: {}", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_list_deserialization() {
        let body = r#"{"tags": [{"name": "Hitomi Tanaka", "count": 1520}, {"name": "Ass"}]}"#;
        let list = TagList::from_json(body).unwrap();
        assert_eq!(list.tags.len(), 2);
        assert_eq!(list.tags[0], TagRecord::new("Hitomi Tanaka", 1520));
        assert_eq!(list.tags[1].count, 0);
    }

    #[test]
    fn test_order_round_trip_through_str() {
        for order in Order::ALL {
            assert_eq!(order.as_str().parse::<Order>().unwrap(), order);
        }
        assert_eq!("TOP28".parse::<Order>().unwrap(), Order::Top28);
        assert!("sideways".parse::<Order>().is_err());
        assert_eq!(Order::default(), Order::Trending);
    }

    #[test]
    fn test_order_serde_uses_api_values() {
        assert_eq!(serde_json::to_string(&Order::Top28).unwrap(), "\"top28\"");
        let order: Order = serde_json::from_str("\"latest\"").unwrap();
        assert_eq!(order, Order::Latest);
    }

    #[test]
    fn test_media_type() {
        assert_eq!(MediaType::Image.to_string(), "i");
        assert_eq!("gif".parse::<MediaType>().unwrap(), MediaType::Gif);
        assert_eq!(serde_json::to_string(&MediaType::Image).unwrap(), "\"i\"");
        assert!("video".parse::<MediaType>().is_err());
    }
}
