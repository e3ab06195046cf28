use serde::{Deserialize, Serialize};

/// The closed vocabulary of element kinds a styling descriptor can carry.
///
/// Selectors match against these; `Any` is the wildcard and never appears in
/// a descriptor, `Root` is the document sentinel that descriptor chains stop
/// short of.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementType {
    #[default]
    Any,

    // Containers
    Root,
    UnorderedList,
    OrderedList,
    UnorderedListItem,
    OrderedListItem,
    Quote,
    FootnoteGroup,
    Footnote,
    Table,
    TableHeader,
    TableRowEven,
    TableRowOdd,
    TableCell,
    CustomContainer,

    // Leaf blocks
    Paragraph,
    Heading1,
    Heading2,
    Heading3,
    Heading4,
    Heading5,
    Heading6,
    Code,
    Break,
    Image,
    Plugin,

    // Inlines
    Bold,
    Italic,
    Hyperlink,
    InlineCode,
    FootnoteReference,
    Superscript,
    Subscript,
    Cite,
    Strike,
    Inserted,
    Marked,
    InlineImage,
    InlinePlugin,

    // Special inlines
    Toc1,
    Toc2,
    Toc3,
    Toc4,
    Toc5,
    Toc6,
    Index,
}

impl ElementType {
    /// Heading kind for a 1-based level, clamped to the supported range.
    pub fn heading(level: u8) -> ElementType {
        match level {
            0 | 1 => ElementType::Heading1,
            2 => ElementType::Heading2,
            3 => ElementType::Heading3,
            4 => ElementType::Heading4,
            5 => ElementType::Heading5,
            _ => ElementType::Heading6,
        }
    }

    /// TOC entry kind for a 1-based level, clamped to the supported range.
    pub fn toc(level: u8) -> ElementType {
        match level {
            0 | 1 => ElementType::Toc1,
            2 => ElementType::Toc2,
            3 => ElementType::Toc3,
            4 => ElementType::Toc4,
            5 => ElementType::Toc5,
            _ => ElementType::Toc6,
        }
    }

    pub fn heading_level(self) -> Option<u8> {
        match self {
            ElementType::Heading1 => Some(1),
            ElementType::Heading2 => Some(2),
            ElementType::Heading3 => Some(3),
            ElementType::Heading4 => Some(4),
            ElementType::Heading5 => Some(5),
            ElementType::Heading6 => Some(6),
            _ => None,
        }
    }

    pub fn is_list_item(self) -> bool {
        matches!(self, ElementType::UnorderedListItem | ElementType::OrderedListItem)
    }

    pub fn is_table_row(self) -> bool {
        matches!(
            self,
            ElementType::TableHeader | ElementType::TableRowEven | ElementType::TableRowOdd
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_levels_clamp() {
        assert_eq!(ElementType::heading(1), ElementType::Heading1);
        assert_eq!(ElementType::heading(6), ElementType::Heading6);
        assert_eq!(ElementType::heading(9), ElementType::Heading6);
        assert_eq!(ElementType::Heading3.heading_level(), Some(3));
        assert_eq!(ElementType::Paragraph.heading_level(), None);
    }
}
