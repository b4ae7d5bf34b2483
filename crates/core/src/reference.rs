//! Reference and image payload types carried on enriched items.
//!
//! Stored as JSONB ordered lists on the item row; order is meaningful
//! for display and preserved verbatim.

use serde::{Deserialize, Serialize};

/// Where a recommended reference comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
    Paper,
    Blog,
    Other,
}

/// A recommended further-reading entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub kind: ReferenceKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

/// An illustration attached to an answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqImage {
    pub url: String,
    pub caption: String,
    /// Origin of the image, e.g. `"paper"` or `"blog"`.
    pub source: String,
}
