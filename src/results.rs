use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// One link of a tag group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub title: Option<String>,
    pub href: Option<String>,
}

/// Value stored in a document's open `other_data` map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OtherValue {
    Text(String),
    Tags(Vec<Tag>),
}

/// An article record produced by the crawl
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Assigned by the host after the crawl
    #[serde(default)]
    pub identifier: Option<String>,

    pub title: String,

    /// URL the article was read from
    pub web_link: String,

    pub publication_date: DateTime<FixedOffset>,

    /// Moment the record was built
    pub processing_date: DateTime<Utc>,

    /// Body text, omitted when the page has none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub other_data: BTreeMap<String, OtherValue>,
}

impl Document {
    /// Create a document from its required fields, stamped with the current time
    pub fn new(title: String, web_link: String, publication_date: DateTime<FixedOffset>) -> Self {
        Self {
            identifier: None,
            title,
            web_link,
            publication_date,
            processing_date: Utc::now(),
            text: None,
            other_data: BTreeMap::new(),
        }
    }

    /// Identity key compared against the last known document
    ///
    /// Covers title, link and publication date only, so a re-crawl of an
    /// unchanged article yields the same value.
    pub fn hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.title.as_bytes());
        hasher.update([0x1f_u8]);
        hasher.update(self.web_link.as_bytes());
        hasher.update([0x1f_u8]);
        hasher.update(self.publication_date.to_rfc3339().as_bytes());
        hasher.update([0x1f_u8]);
        format!("{:x}", hasher.finalize())
    }

    pub fn author(&self) -> Option<&str> {
        match self.other_data.get("author") {
            Some(OtherValue::Text(author)) => Some(author),
            _ => None,
        }
    }

    pub fn tags(&self, key: &str) -> Option<&[Tag]> {
        match self.other_data.get(key) {
            Some(OtherValue::Tags(tags)) => Some(tags),
            _ => None,
        }
    }

    /// One-line summary used when a document is accepted
    pub fn log_line(&self) -> String {
        format!(
            "Find document | name: {} | link to web: {} | publication date: {}",
            self.title, self.web_link, self.publication_date
        )
    }
}
