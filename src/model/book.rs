use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_COVER_COLOR: &str = "#5D4037";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub title: String,
    pub author: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Book {
    /// Cover color to paint, falling back to a dark leather brown.
    pub fn cover_color(&self) -> &str {
        self.cover_color
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_COVER_COLOR)
    }

    pub fn has_dark_cover(&self) -> bool {
        is_dark_color(self.cover_color())
    }
}

/// Approximate perceived brightness of a hex color.
///
/// Accepts `#rgb` and `#rrggbb` (the `#` is optional). Anything that cannot be
/// read as one of those counts as dark, so light text stays the safe default.
pub fn is_dark_color(color: &str) -> bool {
    let hex = color.trim().trim_start_matches('#');
    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => return true,
    };

    let rgb = match u32::from_str_radix(&expanded, 16) {
        Ok(v) => v,
        Err(_) => return true,
    };

    let r = ((rgb >> 16) & 0xff) as f64;
    let g = ((rgb >> 8) & 0xff) as f64;
    let b = (rgb & 0xff) as f64;
    let luma = 0.2126 * r + 0.7152 * g + 0.0722 * b;

    luma < 128.0
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Analysis {
    pub summary: String,
    pub themes: Vec<String>,
    pub fun_fact: String,
}

impl Analysis {
    pub fn unavailable() -> Self {
        Self {
            summary: "Analysis unavailable.".to_string(),
            themes: vec![],
            fun_fact: String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.summary.trim().is_empty() && self.themes.is_empty() && self.fun_fact.trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViewState {
    Home,
    SearchResults,
    BookDetails,
}

/// The curated shelves shown on the home view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shelf {
    Classics,
    SciFi,
}

impl Shelf {
    pub const ALL: [Shelf; 2] = [Shelf::Classics, Shelf::SciFi];

    /// Display title, also sent as the theme of the shelf request.
    pub fn label(self) -> &'static str {
        match self {
            Shelf::Classics => "American Classics",
            Shelf::SciFi => "Thought-Provoking Sci-Fi",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// A prior chat message as sent to the remote collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

impl From<&ChatMessage> for ChatTurn {
    fn from(m: &ChatMessage) -> Self {
        Self {
            role: m.role,
            text: m.text.clone(),
        }
    }
}
