//! Shared test fixtures for the effects-lint test suite.
//!
//! The sample registry mirrors the shape of the production registry export:
//! video and photo tools, Chinese item titles, badge tags, and asset paths.

use crate::registry::{Category, Registry, Tool, ToolItem};

/// Build one tool with items named after `item_titles`.
pub fn tool(slug: &str, title: &str, category: Category, item_titles: &[&str]) -> Tool {
    Tool {
        slug: slug.to_string(),
        title: title.to_string(),
        category,
        items: item_titles
            .iter()
            .map(|item_title| ToolItem {
                title: item_title.to_string(),
                original_src: format!("/img_video/imgs/{slug}_{item_title}_1.png"),
                effect_src: format!("/img_video/imgs/{slug}_{item_title}_2.png"),
                video_src: None,
                badge: None,
                prompt: None,
            })
            .collect(),
    }
}

/// Five-tool registry used across the module tests.
pub fn sample_registry() -> Registry {
    Registry::new(vec![
        tool(
            "ai-kissing",
            "AI Kissing",
            Category::Video,
            &["正常接吻", "法式接吻"],
        ),
        tool("ai-hug", "AI Hug", Category::Video, &["拥抱"]),
        tool(
            "muscle-generator",
            "Muscle Generator",
            Category::Video,
            &["肌肉展示"],
        ),
        tool("art-style", "Art Style", Category::Photo, &["艺术风格"]),
        tool(
            "old-photo-restore",
            "Old Photo Restoration",
            Category::Photo,
            &[],
        ),
    ])
}
