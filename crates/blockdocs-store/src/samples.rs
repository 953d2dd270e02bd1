// SPDX-License-Identifier: AGPL-3.0-or-later
//! Welcome documents seeded into a fresh collection

use blockdocs_core::{Block, BlockKind, Document};
use chrono::{DateTime, Utc};

fn sample(
    id: &str,
    title: &str,
    tags: &[&str],
    blocks: Vec<Block>,
    now: DateTime<Utc>,
) -> Document {
    let blocks = blocks
        .into_iter()
        .enumerate()
        .map(|(i, block)| block.with_id(format!("{}-{}", id, i + 1)))
        .collect();
    Document {
        id: id.into(),
        title: title.to_string(),
        blocks,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        created_at: now,
        updated_at: now,
    }
}

/// The two documents a first session starts with
pub fn welcome_documents(now: DateTime<Utc>) -> Vec<Document> {
    use BlockKind::*;

    vec![
        sample(
            "1",
            "Welcome to DonoDocs",
            &["welcome", "guide"],
            vec![
                Block::with_text(Heading1, "Welcome to DonoDocs! 🚀"),
                Block::with_text(
                    Paragraph,
                    "DonoDocs is a modern, minimalist document editor. Create, edit, \
                     and manage your documents with ease.",
                ),
                Block::with_text(Heading2, "Features"),
                Block::with_text(BulletItem, "Multiple block types"),
                Block::with_text(BulletItem, "Auto-save"),
                Block::with_text(BulletItem, "Export as Markdown or plain text"),
                Block::with_text(BulletItem, "Dark mode support"),
                Block::with_text(Heading3, "Getting Started"),
                Block::with_text(
                    Paragraph,
                    "Start by creating a new document or editing this one.",
                ),
                Block::code("console.log(\"Happy writing!\");", Some("javascript")),
            ],
            now,
        ),
        sample(
            "2",
            "Project Ideas",
            &["projects", "brainstorm"],
            vec![
                Block::with_text(Heading1, "Project Ideas"),
                Block::checkbox("Build a personal portfolio website", true),
                Block::checkbox("Create a mobile app for productivity", false),
                Block::checkbox("Write technical blog posts", false),
                Block::with_text(Heading2, "Web Development"),
                Block::with_text(NumberItem, "E-commerce platform"),
                Block::with_text(NumberItem, "Real-time chat application"),
                Block::with_text(NumberItem, "Task management system"),
            ],
            now,
        ),
    ]
}
