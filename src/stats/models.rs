use serde::{Deserialize, Serialize};
use std::fmt;

/// One ranked subject, as listed in the entity listing file
/// (`[{"name": "...", "uuid": "..."}]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    #[serde(rename = "name", default)]
    pub display_name: String,
    #[serde(rename = "uuid", default)]
    pub id: String,
}

impl EntityRef {
    pub fn new(display_name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            id: id.into(),
        }
    }
}

/// Locates a stat inside an entity's raw document and names its unit scaling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatMapping {
    #[serde(rename = "Path", default)]
    pub path: Vec<String>,
    #[serde(rename = "Transform", default)]
    pub transform: Option<String>,
}

impl StatMapping {
    pub fn new<I, S>(path: I, transform: Option<&str>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: path.into_iter().map(Into::into).collect(),
            transform: transform.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl From<&str> for SortOrder {
    fn from(value: &str) -> Self {
        if value.eq_ignore_ascii_case("asc") {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        }
    }
}

impl From<String> for SortOrder {
    fn from(value: String) -> Self {
        SortOrder::from(value.as_str())
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => f.write_str("asc"),
            SortOrder::Desc => f.write_str("desc"),
        }
    }
}

impl Serialize for SortOrder {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for SortOrder {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(SortOrder::from(raw))
    }
}

fn default_top_n() -> usize {
    10
}

/// Negative counts show no lines rather than rejecting the whole settings file.
fn deserialize_top_n<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    Ok(usize::try_from(raw.max(0)).unwrap_or(usize::MAX))
}

/// A single leaderboard report: which stat, how to title it, how to render
/// each line, and how many lines to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankCommandSpec {
    #[serde(rename = "Keyword", default)]
    pub keyword: String,
    /// Empty means the command has no "show everyone" variant.
    #[serde(rename = "KeywordAll", default)]
    pub keyword_all: String,
    #[serde(rename = "Type", default)]
    pub stat_type: String,
    #[serde(rename = "Title", default)]
    pub title: String,
    /// Template with `{index}`, `{name}` and `{value}` placeholders.
    #[serde(rename = "Format", default)]
    pub line_format: String,
    #[serde(rename = "SortOrder", default)]
    pub sort_order: SortOrder,
    #[serde(
        rename = "TopN",
        default = "default_top_n",
        deserialize_with = "deserialize_top_n"
    )]
    pub top_n: usize,
}

impl Default for RankCommandSpec {
    fn default() -> Self {
        Self {
            keyword: String::new(),
            keyword_all: String::new(),
            stat_type: String::new(),
            title: String::new(),
            line_format: String::new(),
            sort_order: SortOrder::Desc,
            top_n: default_top_n(),
        }
    }
}

impl RankCommandSpec {
    /// Returns `Some(include_all)` when `text` triggers this command.
    pub fn matches(&self, text: &str) -> Option<bool> {
        if !self.keyword_all.is_empty() && self.keyword_all == text {
            Some(true)
        } else if self.keyword == text {
            Some(false)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankEntry {
    pub name: String,
    pub value: i64,
}

impl RankEntry {
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}
