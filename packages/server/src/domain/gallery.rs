//! Photo gallery model.
//!
//! The gallery document is a JSON array of photos. Uploading is handled
//! elsewhere; this model covers likes, comments and removal.

use serde::{Deserialize, Serialize};

/// A gallery photo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: String,
    pub url: String,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comments: Vec<PhotoComment>,
    #[serde(default)]
    pub liked_by_user: bool,
    /// RFC 3339 upload time
    #[serde(default)]
    pub uploaded_at: String,
}

/// A comment on a photo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoComment {
    pub id: String,
    pub user: String,
    pub text: String,
    /// RFC 3339 creation time
    pub timestamp: String,
}

fn default_title() -> String {
    "Untitled Photo".to_string()
}

impl Photo {
    /// A photo with default metadata
    pub fn untitled(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            title: default_title(),
            description: String::new(),
            likes: 0,
            comments: Vec::new(),
            liked_by_user: false,
            uploaded_at: String::new(),
        }
    }

    /// File name component of the photo URL (`/uploads/<name>`), if it is a
    /// plain file name.
    pub fn file_name(&self) -> Option<&str> {
        let name = self.url.rsplit('/').next()?;
        let is_plain = !name.is_empty() && name != "." && name != ".." && !name.contains('\\');
        is_plain.then_some(name)
    }
}
