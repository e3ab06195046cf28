//! The parsed document tree.
//!
//! Nodes mirror what a markdown parser with span tracking produces: block
//! containers and leaves, inline runs inside leaves, and byte spans into the
//! raw source the document owns. Attribute runs (`{…}`) are assumed to be
//! consumed by the parser, so they never appear as inline content; the text
//! survives in the gaps between node spans and is recovered by the extraction
//! methods in [`crate::source`].

use markflow_style::Alignment;
use markflow_types::ElementType;

use crate::source::Span;

/// A parsed document: the block tree plus the raw source its spans index into.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub(crate) source: String,
    pub(crate) line_starts: Vec<usize>,
    pub blocks: Vec<Block>,
}

impl Default for Document {
    fn default() -> Self {
        Document::new("")
    }
}

impl Document {
    /// An empty document over the given source text.
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let line_starts = compute_line_starts(&source);
        Document { source, line_starts, blocks: Vec::new() }
    }

    pub fn with_blocks(source: impl Into<String>, blocks: Vec<Block>) -> Self {
        let mut doc = Document::new(source);
        doc.blocks = blocks;
        doc
    }

    /// A synthetic tree with no backing source. Span-based attribute
    /// extraction finds nothing on such documents.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Document { source: String::new(), line_starts: vec![0], blocks }
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

fn compute_line_starts(source: &str) -> Vec<usize> {
    let mut starts = vec![0];
    for (i, b) in source.bytes().enumerate() {
        if b == b'\n' {
            starts.push(i + 1);
        }
    }
    starts
}

/// How a heading was written in source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeadingMarkup {
    #[default]
    Atx,
    Setext,
}

/// List numbering scheme, carried on the list node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// Bullet list; `bullet` is the marker character used in source.
    Unordered { bullet: char },
    /// Numbered list starting at `start`; `delimiter` is `.` or `)`.
    Ordered { start: u32, delimiter: char },
}

impl ListKind {
    pub fn is_ordered(self) -> bool {
        matches!(self, ListKind::Ordered { .. })
    }
}

/// A block-level node.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph {
        span: Option<Span>,
        inlines: Vec<Inline>,
    },
    Heading {
        span: Option<Span>,
        level: u8,
        markup: HeadingMarkup,
        inlines: Vec<Inline>,
    },
    /// Fenced (`info` is the fence info string, possibly empty) or indented
    /// (`info` is `None`) code. `text` holds the code lines joined by `\n`.
    CodeBlock {
        span: Option<Span>,
        info: Option<String>,
        text: String,
    },
    Quote {
        span: Option<Span>,
        blocks: Vec<Block>,
    },
    List {
        span: Option<Span>,
        kind: ListKind,
        items: Vec<Block>,
    },
    /// One list item. `number` is the parsed ordinal for ordered lists;
    /// `check` is the task-list checkbox state when the item carries one.
    ListItem {
        span: Option<Span>,
        number: Option<u32>,
        check: Option<bool>,
        blocks: Vec<Block>,
    },
    Table {
        span: Option<Span>,
        columns: Vec<ColumnDef>,
        rows: Vec<TableRow>,
    },
    /// A thematic break.
    Break { span: Option<Span> },
    CustomContainer {
        span: Option<Span>,
        info: Option<String>,
        blocks: Vec<Block>,
    },
    /// The collected footnote bodies at the end of the document. Children are
    /// expected to be `Footnote` blocks; footnote ordinals are 1-based indexes
    /// into this list.
    FootnoteGroup {
        span: Option<Span>,
        notes: Vec<Block>,
    },
    Footnote {
        span: Option<Span>,
        blocks: Vec<Block>,
    },
}

impl Block {
    pub fn span(&self) -> Option<Span> {
        match self {
            Block::Paragraph { span, .. }
            | Block::Heading { span, .. }
            | Block::CodeBlock { span, .. }
            | Block::Quote { span, .. }
            | Block::List { span, .. }
            | Block::ListItem { span, .. }
            | Block::Table { span, .. }
            | Block::Break { span }
            | Block::CustomContainer { span, .. }
            | Block::FootnoteGroup { span, .. }
            | Block::Footnote { span, .. } => *span,
        }
    }

    /// Child blocks of container nodes. Leaves and tables return an empty
    /// slice; table content is reached through `rows`.
    pub fn children(&self) -> &[Block] {
        match self {
            Block::Quote { blocks, .. }
            | Block::ListItem { blocks, .. }
            | Block::CustomContainer { blocks, .. }
            | Block::Footnote { blocks, .. } => blocks,
            Block::List { items, .. } => items,
            Block::FootnoteGroup { notes, .. } => notes,
            _ => &[],
        }
    }

    /// Inline content of leaf nodes; empty for containers and code.
    pub fn inlines(&self) -> &[Inline] {
        match self {
            Block::Paragraph { inlines, .. } | Block::Heading { inlines, .. } => inlines,
            _ => &[],
        }
    }

    /// Returns a string identifier for the node type, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Paragraph { .. } => "paragraph",
            Block::Heading { .. } => "heading",
            Block::CodeBlock { .. } => "code-block",
            Block::Quote { .. } => "quote",
            Block::List { .. } => "list",
            Block::ListItem { .. } => "list-item",
            Block::Table { .. } => "table",
            Block::Break { .. } => "break",
            Block::CustomContainer { .. } => "custom-container",
            Block::FootnoteGroup { .. } => "footnote-group",
            Block::Footnote { .. } => "footnote",
        }
    }

    /// Concatenated literal text of the node's inline content. Code blocks
    /// return their code text.
    pub fn plain_text(&self) -> String {
        match self {
            Block::CodeBlock { text, .. } => text.clone(),
            _ => {
                let mut out = String::new();
                for inline in self.inlines() {
                    inline.collect_plain_text(&mut out);
                }
                out
            }
        }
    }
}

/// An inline-level node inside a paragraph or heading.
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Text {
        span: Option<Span>,
        text: String,
    },
    /// Delimiter-run emphasis. The delimiter character and run length select
    /// the element kind, see [`Inline::emphasis_type`].
    Emphasis {
        span: Option<Span>,
        delimiter: char,
        count: u8,
        inlines: Vec<Inline>,
    },
    /// A backtick code span.
    Code {
        span: Option<Span>,
        text: String,
    },
    Link {
        span: Option<Span>,
        url: String,
        title: Option<String>,
        inlines: Vec<Inline>,
    },
    Image {
        span: Option<Span>,
        url: String,
        title: Option<String>,
        inlines: Vec<Inline>,
    },
    AutoLink {
        span: Option<Span>,
        url: String,
    },
    LineBreak {
        span: Option<Span>,
        hard: bool,
    },
    /// A reference to the footnote with the given 1-based ordinal.
    FootnoteLink {
        span: Option<Span>,
        ordinal: usize,
    },
    Math {
        span: Option<Span>,
        text: String,
    },
}

impl Inline {
    pub fn span(&self) -> Option<Span> {
        match self {
            Inline::Text { span, .. }
            | Inline::Emphasis { span, .. }
            | Inline::Code { span, .. }
            | Inline::Link { span, .. }
            | Inline::Image { span, .. }
            | Inline::AutoLink { span, .. }
            | Inline::LineBreak { span, .. }
            | Inline::FootnoteLink { span, .. }
            | Inline::Math { span, .. } => *span,
        }
    }

    pub fn children(&self) -> &[Inline] {
        match self {
            Inline::Emphasis { inlines, .. }
            | Inline::Link { inlines, .. }
            | Inline::Image { inlines, .. } => inlines,
            _ => &[],
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Inline::Text { .. } => "text",
            Inline::Emphasis { .. } => "emphasis",
            Inline::Code { .. } => "code-span",
            Inline::Link { .. } => "link",
            Inline::Image { .. } => "image",
            Inline::AutoLink { .. } => "auto-link",
            Inline::LineBreak { .. } => "line-break",
            Inline::FootnoteLink { .. } => "footnote-link",
            Inline::Math { .. } => "math",
        }
    }

    /// The element kind an emphasis run maps to, if this is an emphasis node
    /// with a recognized delimiter/length combination. Unrecognized runs are
    /// rendered transparently.
    pub fn emphasis_type(&self) -> Option<ElementType> {
        let Inline::Emphasis { delimiter, count, .. } = self else {
            return None;
        };
        match (delimiter, count) {
            ('*' | '_', 2) => Some(ElementType::Bold),
            ('*' | '_', 1) => Some(ElementType::Italic),
            ('^', 1) => Some(ElementType::Superscript),
            ('~', 1) => Some(ElementType::Subscript),
            ('~', 2) => Some(ElementType::Strike),
            ('"', 2) => Some(ElementType::Cite),
            ('+', 2) => Some(ElementType::Inserted),
            ('=', 2) => Some(ElementType::Marked),
            _ => None,
        }
    }

    /// Concatenated text of literal and code-span content, recursing into
    /// containers. Links contribute their label text.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_plain_text(&mut out);
        out
    }

    fn collect_plain_text(&self, out: &mut String) {
        match self {
            Inline::Text { text, .. } | Inline::Code { text, .. } => out.push_str(text),
            _ => {
                for child in self.children() {
                    child.collect_plain_text(out);
                }
            }
        }
    }
}

/// Parsed pipe-table column metadata.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ColumnDef {
    pub alignment: Option<Alignment>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableRow {
    pub span: Option<Span>,
    pub header: bool,
    pub cells: Vec<TableCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableCell {
    pub span: Option<Span>,
    pub col_span: usize,
    pub row_span: usize,
    pub blocks: Vec<Block>,
}

impl Default for TableCell {
    fn default() -> Self {
        TableCell { span: None, col_span: 1, row_span: 1, blocks: Vec::new() }
    }
}
