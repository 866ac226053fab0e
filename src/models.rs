// Core data structures for WordPress REST snapshots

use serde::{Deserialize, Serialize};

/// Parent id of a top-level category
pub const ROOT_CATEGORY: u64 = 0;

/// A title as served by the REST API: either `{"rendered": "..."}` or a bare string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Title {
    Raw(String),
    Rendered {
        #[serde(default)]
        rendered: String,
    },
    /// Any other shape; renders as an empty string
    Other(serde_json::Value),
}

impl Title {
    /// Text to display for this title
    pub fn text(&self) -> &str {
        match self {
            Self::Raw(s) => s,
            Self::Rendered { rendered } => rendered,
            Self::Other(_) => "",
        }
    }
}

impl Default for Title {
    fn default() -> Self {
        Self::Raw(String::new())
    }
}

impl From<&str> for Title {
    fn from(s: &str) -> Self {
        Self::Rendered {
            rendered: s.to_string(),
        }
    }
}

/// `{"rendered": "..."}` wrapper used by fields such as `guid`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedField {
    #[serde(default)]
    pub rendered: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Category {
    pub id: u64,
    pub name: String,
    pub parent: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tag {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Post {
    pub title: Title,
    pub categories: Vec<u64>,
    pub author: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Page {
    pub title: Title,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Media {
    pub title: Title,
    pub source_url: Option<String>,
    pub guid: Option<RenderedField>,
}

impl Media {
    /// `source_url`, falling back to `guid.rendered`
    pub fn url(&self) -> &str {
        match (&self.source_url, &self.guid) {
            (Some(url), _) => url,
            (None, Some(guid)) => &guid.rendered,
            (None, None) => "",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub username: Option<String>,
}

impl User {
    /// `name` when non-empty, else `username`
    pub fn display_name(&self) -> &str {
        match (&self.name, &self.username) {
            (Some(name), _) if !name.is_empty() => name,
            (_, Some(username)) => username,
            _ => "",
        }
    }
}

/// Site description stored in `info.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteInfo {
    pub url: Option<String>,
    pub name: Option<String>,
}

/// `info.json` is either a single object or a list of them
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum InfoDocument {
    Many(Vec<SiteInfo>),
    One(SiteInfo),
}

impl InfoDocument {
    /// Normalize to a single record; an empty list yields `None`
    pub fn into_info(self) -> Option<SiteInfo> {
        match self {
            Self::One(info) => Some(info),
            Self::Many(list) => list.into_iter().next(),
        }
    }
}

/// REST collections mirrored into the snapshot directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Categories,
    Tags,
    Posts,
    Pages,
    Media,
    Users,
}

impl Collection {
    /// Endpoint name under `/wp-json/wp/v2/`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Categories => "categories",
            Self::Tags => "tags",
            Self::Posts => "posts",
            Self::Pages => "pages",
            Self::Media => "media",
            Self::Users => "users",
        }
    }

    /// Snapshot file name
    pub fn file_name(&self) -> String {
        format!("{}.json", self.as_str())
    }

    pub fn all() -> Vec<Self> {
        vec![
            Self::Categories,
            Self::Tags,
            Self::Posts,
            Self::Pages,
            Self::Media,
            Self::Users,
        ]
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Everything a report run needs, loaded once up front
///
/// Absent files are already replaced by empty collections here.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub info: Option<SiteInfo>,
    pub categories: Vec<Category>,
    pub tags: Vec<Tag>,
    pub posts: Vec<Post>,
    pub pages: Vec<Page>,
    pub media: Vec<Media>,
    pub users: Vec<User>,
}
