//! Markdown rendering for the result panes.
//!
//! Two renderings of the same source: sanitized HTML (what the result holds
//! as its preview) and a flat list of blocks the egui preview pane can draw.

use pulldown_cmark::{html, CodeBlockKind, Event, Options, Parser, Tag};

fn parser(markdown: &str) -> Parser<'_, '_> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    Parser::new_ext(markdown, options)
}

/// Renders Markdown to HTML. Raw HTML in the source is emitted as escaped text.
pub fn render_html(markdown: &str) -> String {
    let events = parser(markdown).map(|event| match event {
        Event::Html(raw) => Event::Text(raw),
        other => other,
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, events);
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewBlock {
    Heading { level: u8, text: String },
    Paragraph(String),
    ListItem { depth: usize, text: String },
    Code { language: Option<String>, text: String },
    Quote(String),
    TableRow(Vec<String>),
    /// A raw HTML block, kept as source text.
    Html(String),
    Rule,
}

#[derive(Default)]
struct Flattener {
    blocks: Vec<PreviewBlock>,
    text: String,
    html: String,
    row: Vec<String>,
    item_depth: usize,
    quote_depth: usize,
    in_leaf: bool,
}

impl Flattener {
    /// Emits pending text as the block its container calls for.
    fn flush_text(&mut self) {
        if self.text.trim().is_empty() {
            self.text.clear();
            return;
        }
        let text = take_trimmed(&mut self.text);
        let block = if self.item_depth > 0 {
            PreviewBlock::ListItem {
                depth: self.item_depth - 1,
                text,
            }
        } else if self.quote_depth > 0 {
            PreviewBlock::Quote(text)
        } else {
            PreviewBlock::Paragraph(text)
        };
        self.blocks.push(block);
    }

    fn flush_html(&mut self) {
        if !self.html.trim().is_empty() {
            let source = self.html.trim_end().to_string();
            self.blocks.push(PreviewBlock::Html(source));
        }
        self.html.clear();
    }

    fn at_top_level(&self) -> bool {
        !self.in_leaf && self.item_depth == 0 && self.quote_depth == 0
    }

    fn push(&mut self, event: Event<'_>) {
        if !matches!(event, Event::Html(_)) {
            self.flush_html();
        }

        match event {
            Event::Start(Tag::Item) => {
                self.flush_text();
                self.item_depth += 1;
            }
            Event::End(Tag::Item) => {
                self.flush_text();
                self.item_depth = self.item_depth.saturating_sub(1);
            }
            Event::Start(Tag::BlockQuote) => {
                self.flush_text();
                self.quote_depth += 1;
            }
            Event::End(Tag::BlockQuote) => {
                if !self.text.trim().is_empty() {
                    let text = take_trimmed(&mut self.text);
                    self.blocks.push(PreviewBlock::Quote(text));
                }
                self.quote_depth = self.quote_depth.saturating_sub(1);
            }
            Event::Start(Tag::Heading(..)) | Event::Start(Tag::CodeBlock(_)) => {
                self.flush_text();
                self.in_leaf = true;
            }
            Event::Start(Tag::Paragraph) => {
                if self.item_depth == 0 && self.quote_depth == 0 {
                    self.flush_text();
                }
                self.in_leaf = true;
            }
            Event::End(Tag::Heading(level, ..)) => {
                self.in_leaf = false;
                let text = take_trimmed(&mut self.text);
                self.blocks.push(PreviewBlock::Heading {
                    level: level as u8,
                    text,
                });
            }
            Event::End(Tag::Paragraph) => {
                self.in_leaf = false;
                if self.item_depth == 0 && self.quote_depth == 0 {
                    self.flush_text();
                } else {
                    // Loose items and quotes keep their paragraphs together.
                    self.text.push('\n');
                }
            }
            Event::End(Tag::CodeBlock(kind)) => {
                self.in_leaf = false;
                let language = match kind {
                    CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                    _ => None,
                };
                let text = std::mem::take(&mut self.text);
                self.blocks.push(PreviewBlock::Code {
                    language,
                    text: text.trim_end_matches('\n').to_string(),
                });
            }
            Event::Start(Tag::TableHead) | Event::Start(Tag::TableRow) => self.row.clear(),
            Event::Start(Tag::TableCell) => self.text.clear(),
            Event::End(Tag::TableCell) => {
                let cell = take_trimmed(&mut self.text);
                self.row.push(cell);
            }
            Event::End(Tag::TableHead) | Event::End(Tag::TableRow) => {
                let row = std::mem::take(&mut self.row);
                self.blocks.push(PreviewBlock::TableRow(row));
            }
            Event::Html(raw) if self.at_top_level() => self.html.push_str(&raw),
            Event::Text(text) | Event::Code(text) | Event::Html(text) => {
                self.text.push_str(&text)
            }
            Event::SoftBreak => self.text.push(' '),
            Event::HardBreak => self.text.push('\n'),
            Event::Rule => {
                self.flush_text();
                self.blocks.push(PreviewBlock::Rule);
            }
            Event::TaskListMarker(done) => {
                self.text.push_str(if done { "[x] " } else { "[ ] " })
            }
            _ => {}
        }
    }

    fn finish(mut self) -> Vec<PreviewBlock> {
        self.flush_html();
        self.flush_text();
        self.blocks
    }
}

/// Flattens Markdown into drawable blocks. Inline styling is dropped; HTML
/// blocks are kept as their source.
pub fn preview_blocks(markdown: &str) -> Vec<PreviewBlock> {
    let mut flattener = Flattener::default();
    for event in parser(markdown) {
        flattener.push(event);
    }
    flattener.finish()
}

fn take_trimmed(buf: &mut String) -> String {
    let text = buf.trim().to_string();
    buf.clear();
    text
}
