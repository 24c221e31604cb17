//! Canonical tool registry and slug index.
//!
//! The registry is the single source of truth every URL is validated
//! against: an ordered list of tools, each owning a unique slug, a display
//! title, a category, and its effect items. It is loaded once per run
//! (from a JSON file matching the storefront's registry export) and is
//! read-only from then on.
//!
//! Lookups go through a slug index built at construction time. Both the
//! slug as given and its lowercase form map to the same record, so lookups
//! are case-insensitive without altering the canonical slug value.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Registry parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Effect kind. Each kind is bound to exactly one URL path prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Video,
    Photo,
}

impl Category {
    /// The URL path prefix effect pages of this category live under.
    pub fn path_prefix(self) -> &'static str {
        match self {
            Category::Video => "/video-effects",
            Category::Photo => "/photo-effects",
        }
    }

    /// Map a path prefix (leading slash included) back to its category.
    pub fn from_path_prefix(prefix: &str) -> Option<Category> {
        match prefix {
            "/video-effects" => Some(Category::Video),
            "/photo-effects" => Some(Category::Photo),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Category::Video => "video",
            Category::Photo => "photo",
        })
    }
}

/// One effect variant under a tool. Identity is positional within the
/// owning tool; items carry display strings and media asset paths only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolItem {
    pub title: String,
    /// Path to the "before" still.
    pub original_src: String,
    /// Path to the "after" still.
    pub effect_src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_src: Option<String>,
    /// Short marketing tag ("HOT", "NEW").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    /// Default generation prompt for this effect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

/// A canonical tool record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
    /// Unique, case-sensitive, URL-safe identifier.
    pub slug: String,
    /// Display title for the tool.
    pub title: String,
    #[serde(rename = "type")]
    pub category: Category,
    pub items: Vec<ToolItem>,
}

/// Slug-indexed view over the canonical tool list.
#[derive(Debug)]
pub struct Registry {
    tools: Vec<Tool>,
    index: HashMap<String, usize>,
}

impl Registry {
    /// Build the index from a tool list. Each slug is inserted as given and
    /// in lowercase form, both pointing at the same record.
    pub fn new(tools: Vec<Tool>) -> Self {
        let mut index = HashMap::new();
        for (position, tool) in tools.iter().enumerate() {
            index.insert(tool.slug.clone(), position);
            index.insert(tool.slug.to_lowercase(), position);
        }
        Self { tools, index }
    }

    /// Load the registry from a JSON file holding an array of tools.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let content = fs::read_to_string(path)?;
        let tools: Vec<Tool> = serde_json::from_str(&content)?;
        Ok(Self::new(tools))
    }

    /// True if the slug (or its lowercase form) is present.
    pub fn exists(&self, slug: &str) -> bool {
        self.index.contains_key(slug) || self.index.contains_key(&slug.to_lowercase())
    }

    /// Record for a slug, falling back to its lowercase form.
    pub fn get(&self, slug: &str) -> Option<&Tool> {
        self.index
            .get(slug)
            .or_else(|| self.index.get(&slug.to_lowercase()))
            .map(|&position| &self.tools[position])
    }

    /// All tools of one category, registry order preserved.
    pub fn by_category(&self, category: Category) -> Vec<&Tool> {
        self.tools
            .iter()
            .filter(|tool| tool.category == category)
            .collect()
    }

    /// All tools in registry order.
    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    /// All canonical slugs in registry order.
    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.tools.iter().map(|tool| tool.slug.as_str())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
