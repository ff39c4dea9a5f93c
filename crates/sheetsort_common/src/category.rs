//! Post categories and their worksheet routing.
//!
//! The classifier produces one of exactly eight labels. Each label maps to
//! a fixed worksheet name; anything else falls back to the `AI` worksheet,
//! which makes routing total over arbitrary input strings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Worksheet used when a category is unknown or malformed.
pub const DEFAULT_WORKSHEET: &str = "AI";

/// The eight classification labels the LLM is instructed to choose from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "MCP")]
    Mcp,
    #[serde(rename = "RAG")]
    Rag,
    #[serde(rename = "Repo")]
    Repo,
    #[serde(rename = "Tool")]
    Tool,
    #[serde(rename = "Automation")]
    Automation,
    #[serde(rename = "Learning")]
    Learning,
    #[serde(rename = "Trend")]
    Trend,
    #[serde(rename = "General_AI")]
    GeneralAi,
}

impl Category {
    /// All labels, in prompt order.
    pub const ALL: [Category; 8] = [
        Category::Mcp,
        Category::Rag,
        Category::Repo,
        Category::Tool,
        Category::Automation,
        Category::Learning,
        Category::Trend,
        Category::GeneralAi,
    ];

    /// Parse a wire label. Returns `None` for anything outside the fixed set.
    pub fn parse(label: &str) -> Option<Category> {
        match label {
            "MCP" => Some(Category::Mcp),
            "RAG" => Some(Category::Rag),
            "Repo" => Some(Category::Repo),
            "Tool" => Some(Category::Tool),
            "Automation" => Some(Category::Automation),
            "Learning" => Some(Category::Learning),
            "Trend" => Some(Category::Trend),
            "General_AI" => Some(Category::GeneralAi),
            _ => None,
        }
    }

    /// The wire label as the LLM and the sheet rows use it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Mcp => "MCP",
            Category::Rag => "RAG",
            Category::Repo => "Repo",
            Category::Tool => "Tool",
            Category::Automation => "Automation",
            Category::Learning => "Learning",
            Category::Trend => "Trend",
            Category::GeneralAi => "General_AI",
        }
    }

    /// Route a category to its worksheet.
    ///
    /// Note the deliberate mismatch between label and tab for `Trend` and
    /// `Repo`: the spreadsheet tabs predate the label set.
    pub fn worksheet_name(&self) -> &'static str {
        match self {
            Category::Mcp => "MCP",
            Category::Rag => "RAG",
            Category::Repo => "Repos in github",
            Category::Tool => "Tools",
            Category::Automation => "Automation flow",
            Category::Learning => "Learning",
            Category::Trend => "Trends",
            Category::GeneralAi => DEFAULT_WORKSHEET,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Route an arbitrary label string to a worksheet name.
///
/// Total over all inputs: unknown labels (including the empty string) go to
/// the default worksheet.
pub fn route_label(label: &str) -> &'static str {
    Category::parse(label)
        .map(|c| c.worksheet_name())
        .unwrap_or(DEFAULT_WORKSHEET)
}
