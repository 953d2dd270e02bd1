// SPDX-License-Identifier: AGPL-3.0-or-later
//! Plain text exporter

use crate::block::{utf16_len, Block, BlockKind};
use crate::document::Document;
use crate::export::ExportFormat;
use crate::traits::Renderer;

use super::numbered;

/// Plain text exporter
pub struct PlainTextRenderer;

impl PlainTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for PlainTextRenderer {
    fn format(&self) -> ExportFormat {
        ExportFormat::PlainText
    }

    fn render(&self, doc: &Document) -> String {
        let mut output = String::new();
        push_underlined(&mut output, &doc.title, '=');

        if !doc.tags.is_empty() {
            output.push_str(&format!("Tags: {}\n\n", doc.tags.join(", ")));
        }

        for (block, number) in numbered(&doc.blocks) {
            render_block(&mut output, block, number);
        }

        output
    }
}

/// Render a document as plain text
pub fn to_plain_text(doc: &Document) -> String {
    PlainTextRenderer.render(doc)
}

fn push_underlined(output: &mut String, text: &str, rule: char) {
    output.push_str(text);
    output.push('\n');
    output.extend(std::iter::repeat(rule).take(utf16_len(text)));
    output.push_str("\n\n");
}

fn render_block(output: &mut String, block: &Block, number: Option<u32>) {
    let text = &block.text;
    match block.kind {
        BlockKind::Heading1 => push_underlined(output, text, '='),
        BlockKind::Heading2 => push_underlined(output, text, '-'),
        BlockKind::Heading3 | BlockKind::Paragraph | BlockKind::Code => {
            output.push_str(text);
            output.push_str("\n\n");
        }
        BlockKind::BulletItem => output.push_str(&format!("• {}\n", text)),
        BlockKind::NumberItem => {
            output.push_str(&format!("{}. {}\n", number.unwrap_or(1), text));
        }
        BlockKind::CheckboxItem => {
            let mark = if block.is_checked() { '☑' } else { '☐' };
            output.push_str(&format!("{} {}\n", mark, text));
        }
    }
}
