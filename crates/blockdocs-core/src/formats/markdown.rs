// SPDX-License-Identifier: AGPL-3.0-or-later
//! Markdown exporter

use crate::block::{Block, BlockKind};
use crate::document::Document;
use crate::export::ExportFormat;
use crate::traits::Renderer;

use super::numbered;

/// Markdown exporter (GFM task lists, fenced code)
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for MarkdownRenderer {
    fn format(&self) -> ExportFormat {
        ExportFormat::Markdown
    }

    fn render(&self, doc: &Document) -> String {
        let mut output = format!("# {}\n\n", doc.title);

        if !doc.tags.is_empty() {
            let tags: Vec<String> = doc.tags.iter().map(|t| format!("#{}", t)).collect();
            output.push_str(&format!("*Tags: {}*\n\n", tags.join(", ")));
        }

        for (block, number) in numbered(&doc.blocks) {
            render_block(&mut output, block, number);
        }

        output
    }
}

/// Render a document as Markdown
pub fn to_markdown(doc: &Document) -> String {
    MarkdownRenderer.render(doc)
}

fn render_block(output: &mut String, block: &Block, number: Option<u32>) {
    let text = &block.text;
    match block.kind {
        BlockKind::Heading1 => output.push_str(&format!("# {}\n\n", text)),
        BlockKind::Heading2 => output.push_str(&format!("## {}\n\n", text)),
        BlockKind::Heading3 => output.push_str(&format!("### {}\n\n", text)),
        BlockKind::Paragraph => output.push_str(&format!("{}\n\n", text)),
        BlockKind::BulletItem => output.push_str(&format!("- {}\n", text)),
        BlockKind::NumberItem => {
            output.push_str(&format!("{}. {}\n", number.unwrap_or(1), text));
        }
        BlockKind::CheckboxItem => {
            output.push_str(if block.is_checked() { "- [x] " } else { "- [ ] " });
            output.push_str(text);
            output.push('\n');
        }
        BlockKind::Code => {
            output.push_str("```");
            output.push_str(block.language().unwrap_or(""));
            output.push('\n');
            output.push_str(text);
            output.push_str("\n```\n\n");
        }
    }
}
