//! Shorthand constructors for assembling trees without a parser.
//!
//! All nodes come out span-less, so attribute extraction finds nothing on
//! them; callers that need attributes supply real spans and a source string.

use markflow_style::Alignment;

use crate::tree::{Block, ColumnDef, HeadingMarkup, Inline, ListKind, TableCell, TableRow};

pub fn text(content: impl Into<String>) -> Inline {
    Inline::Text { span: None, text: content.into() }
}

pub fn emphasis(delimiter: char, count: u8, inlines: Vec<Inline>) -> Inline {
    Inline::Emphasis { span: None, delimiter, count, inlines }
}

pub fn bold(content: impl Into<String>) -> Inline {
    emphasis('*', 2, vec![text(content)])
}

pub fn italic(content: impl Into<String>) -> Inline {
    emphasis('*', 1, vec![text(content)])
}

pub fn code_span(content: impl Into<String>) -> Inline {
    Inline::Code { span: None, text: content.into() }
}

pub fn link(url: impl Into<String>, label: impl Into<String>) -> Inline {
    Inline::Link { span: None, url: url.into(), title: None, inlines: vec![text(label)] }
}

pub fn image(url: impl Into<String>) -> Inline {
    Inline::Image { span: None, url: url.into(), title: None, inlines: Vec::new() }
}

pub fn math(content: impl Into<String>) -> Inline {
    Inline::Math { span: None, text: content.into() }
}

pub fn footnote_link(ordinal: usize) -> Inline {
    Inline::FootnoteLink { span: None, ordinal }
}

pub fn line_break(hard: bool) -> Inline {
    Inline::LineBreak { span: None, hard }
}

pub fn paragraph(content: impl Into<String>) -> Block {
    paragraph_of(vec![text(content)])
}

pub fn paragraph_of(inlines: Vec<Inline>) -> Block {
    Block::Paragraph { span: None, inlines }
}

pub fn heading(level: u8, content: impl Into<String>) -> Block {
    Block::Heading {
        span: None,
        level,
        markup: HeadingMarkup::Atx,
        inlines: vec![text(content)],
    }
}

pub fn code_block(info: impl Into<String>, code: impl Into<String>) -> Block {
    Block::CodeBlock { span: None, info: Some(info.into()), text: code.into() }
}

pub fn indented_code(code: impl Into<String>) -> Block {
    Block::CodeBlock { span: None, info: None, text: code.into() }
}

pub fn quote(blocks: Vec<Block>) -> Block {
    Block::Quote { span: None, blocks }
}

pub fn bullet_list(items: Vec<Block>) -> Block {
    Block::List { span: None, kind: ListKind::Unordered { bullet: '-' }, items }
}

pub fn ordered_list(start: u32, items: Vec<Block>) -> Block {
    let mut items = items;
    for (i, item) in items.iter_mut().enumerate() {
        if let Block::ListItem { number, .. } = item {
            *number = Some(start + i as u32);
        }
    }
    Block::List { span: None, kind: ListKind::Ordered { start, delimiter: '.' }, items }
}

pub fn list_item(blocks: Vec<Block>) -> Block {
    Block::ListItem { span: None, number: None, check: None, blocks }
}

pub fn task_item(checked: bool, blocks: Vec<Block>) -> Block {
    Block::ListItem { span: None, number: None, check: Some(checked), blocks }
}

pub fn custom_container(info: impl Into<String>, blocks: Vec<Block>) -> Block {
    Block::CustomContainer { span: None, info: Some(info.into()), blocks }
}

pub fn thematic_break() -> Block {
    Block::Break { span: None }
}

pub fn footnote_group(notes: Vec<Block>) -> Block {
    Block::FootnoteGroup { span: None, notes }
}

pub fn footnote(blocks: Vec<Block>) -> Block {
    Block::Footnote { span: None, blocks }
}

pub fn column(alignment: Option<Alignment>) -> ColumnDef {
    ColumnDef { alignment }
}

pub fn table(columns: Vec<ColumnDef>, rows: Vec<TableRow>) -> Block {
    Block::Table { span: None, columns, rows }
}

pub fn header_row(cells: Vec<TableCell>) -> TableRow {
    TableRow { span: None, header: true, cells }
}

pub fn row(cells: Vec<TableCell>) -> TableRow {
    TableRow { span: None, header: false, cells }
}

pub fn cell(content: impl Into<String>) -> TableCell {
    TableCell { blocks: vec![paragraph(content)], ..TableCell::default() }
}

pub fn cell_of(blocks: Vec<Block>) -> TableCell {
    TableCell { blocks, ..TableCell::default() }
}
