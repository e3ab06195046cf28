//! Names of the built-in styles.
//!
//! Every element type converted by the pipeline is bound to one of
//! these styles out of the box. User code reaches them through
//! [`Composer::styles`](crate::Composer::styles) to tweak values or to
//! rebase its own styles on them.

/// Fallback style for elements nothing is bound to.
pub const UNDEFINED: &str = markflow_style::UNDEFINED_STYLE;

/// Root of the style tree; carries the default font.
pub const ROOT: &str = "Root";

pub const PARAGRAPH: &str = "Paragraph";
pub const UNORDERED_LIST: &str = "UnorderedList";
pub const UNORDERED_LIST_ITEM: &str = "UnorderedListItem";
pub const ORDERED_LIST: &str = "OrderedList";
pub const ORDERED_LIST_ITEM: &str = "OrderedListItem";
pub const QUOTE: &str = "Quote";
/// Paragraphs anywhere inside a quote.
pub const QUOTE_PARAGRAPH: &str = "QuoteParagraph";
pub const FOOTNOTE_GROUP: &str = "FootnoteGroup";
pub const FOOTNOTE: &str = "Footnote";
/// Paragraphs directly inside a footnote definition.
pub const FOOTNOTE_PARAGRAPH: &str = "FootnoteParagraph";
pub const TABLE: &str = "Table";
pub const TABLE_HEADER: &str = "TableHeader";
pub const TABLE_ROW_EVEN: &str = "TableRowEven";
pub const TABLE_ROW_ODD: &str = "TableRowOdd";
pub const TABLE_CELL: &str = "TableCell";
pub const CUSTOM_CONTAINER: &str = "CustomContainer";
/// Thematic break.
pub const BREAK: &str = "Break";
pub const CODE: &str = "Code";
pub const IMAGE: &str = "Image";
pub const PLUGIN: &str = "Plugin";

pub const BOLD: &str = "Bold";
pub const ITALIC: &str = "Italic";
pub const INLINE_CODE: &str = "InlineCode";
pub const HYPERLINK: &str = "Hyperlink";
pub const SUBSCRIPT: &str = "Subscript";
pub const SUPERSCRIPT: &str = "Superscript";
pub const CITE: &str = "Cite";
pub const MARKED: &str = "Marked";
pub const INSERTED: &str = "Inserted";
pub const STRIKE: &str = "Strike";
pub const FOOTNOTE_REFERENCE: &str = "FootnoteReference";
pub const INDEX: &str = "Index";
pub const INLINE_IMAGE: &str = "InlineImage";
pub const INLINE_PLUGIN: &str = "InlinePlugin";

pub const HEADING1: &str = "Heading1";
pub const HEADING2: &str = "Heading2";
pub const HEADING3: &str = "Heading3";
pub const HEADING4: &str = "Heading4";
pub const HEADING5: &str = "Heading5";
pub const HEADING6: &str = "Heading6";

pub const TOC1: &str = "Toc1";
pub const TOC2: &str = "Toc2";
pub const TOC3: &str = "Toc3";
pub const TOC4: &str = "Toc4";
pub const TOC5: &str = "Toc5";
pub const TOC6: &str = "Toc6";

/// Name of the heading style for a depth of 1 to 6.
pub fn heading(level: u8) -> String {
    format!("Heading{}", level.clamp(1, 6))
}

/// Name of the table-of-contents entry style for a depth of 1 to 6.
pub fn toc(level: u8) -> String {
    format!("Toc{}", level.clamp(1, 6))
}
