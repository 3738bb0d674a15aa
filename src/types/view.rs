use serde::{Deserialize, Serialize};

/// Presentation mode for the bookmark collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Card,
    Table,
}

impl ViewMode {
    /// The mode the toggle switches to.
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Card => ViewMode::Table,
            ViewMode::Table => ViewMode::Card,
        }
    }

    /// Stable string form used for persistence.
    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Card => "card",
            ViewMode::Table => "table",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "card" => Some(ViewMode::Card),
            "table" => Some(ViewMode::Table),
            _ => None,
        }
    }
}

impl Default for ViewMode {
    fn default() -> Self {
        ViewMode::Card
    }
}

/// Bookmark field the collection is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Title,
    /// Sorts on the short description.
    Description,
    Link,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Title => "title",
            SortKey::Description => "description",
            SortKey::Link => "link",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "title" => Some(SortKey::Title),
            "description" => Some(SortKey::Description),
            "link" => Some(SortKey::Link),
            _ => None,
        }
    }
}

impl Default for SortKey {
    fn default() -> Self {
        SortKey::Title
    }
}
