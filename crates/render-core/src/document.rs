//! The flat document a composer produces and a renderer consumes.
//!
//! A [`Document`] is a list of sections. Each section carries its page
//! geometry, optional running headers and footers and a body of block
//! elements. Block content everywhere (section bodies, headers, table
//! cells) is a [`BlockList`], so converters can target any of them
//! through one interface.

use crate::paragraph::Paragraph;
use crate::table::Table;

fn cm(value: f32) -> f32 {
    value / 2.54 * 72.0
}

/// Physical page geometry of a section. All values are points.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSetup {
    pub page_width: f32,
    pub page_height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    /// Distance of the header area from the top page edge.
    pub header_distance: f32,
    /// Distance of the footer area from the bottom page edge.
    pub footer_distance: f32,
    /// Page number the section starts at. `None` continues the count.
    pub first_page_number: Option<u32>,
}

impl Default for PageSetup {
    /// A4 portrait with the customary 2.5 cm margins.
    fn default() -> Self {
        PageSetup {
            page_width: cm(21.0),
            page_height: cm(29.7),
            margin_top: cm(2.5),
            margin_bottom: cm(2.0),
            margin_left: cm(2.5),
            margin_right: cm(2.5),
            header_distance: cm(1.25),
            footer_distance: cm(1.25),
            first_page_number: None,
        }
    }
}

impl PageSetup {
    /// Width of the printable area between the left and right margins.
    pub fn body_width(&self) -> f32 {
        self.page_width - self.margin_left - self.margin_right
    }
}

/// A block-level output element.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyElement {
    Paragraph(Paragraph),
    Table(Table),
}

/// An ordered run of block elements shared by section bodies, headers,
/// footers and table cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockList {
    pub elements: Vec<BodyElement>,
}

impl BlockList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an empty paragraph and returns it for filling.
    pub fn add_paragraph(&mut self) -> &mut Paragraph {
        self.elements.push(BodyElement::Paragraph(Paragraph::default()));
        match self.elements.last_mut() {
            Some(BodyElement::Paragraph(paragraph)) => paragraph,
            _ => unreachable!(),
        }
    }

    /// Appends an empty table and returns it for filling.
    pub fn add_table(&mut self) -> &mut Table {
        self.elements.push(BodyElement::Table(Table::default()));
        match self.elements.last_mut() {
            Some(BodyElement::Table(table)) => table,
            _ => unreachable!(),
        }
    }

    /// The trailing element, if it is a paragraph.
    pub fn last_paragraph_mut(&mut self) -> Option<&mut Paragraph> {
        match self.elements.last_mut() {
            Some(BodyElement::Paragraph(paragraph)) => Some(paragraph),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }
}

/// Header or footer content of a section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderFooter {
    pub content: BlockList,
}

impl HeaderFooter {
    pub fn new() -> Self {
        Self::default()
    }
}

/// One output section.
///
/// `first_header` and `first_footer` apply to the first page of the
/// section only; when unset the primary header and footer run on every
/// page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Section {
    pub page_setup: PageSetup,
    /// Name reported by section label fields in headers and footers.
    pub label: Option<String>,
    pub header: Option<HeaderFooter>,
    pub first_header: Option<HeaderFooter>,
    pub footer: Option<HeaderFooter>,
    pub first_footer: Option<HeaderFooter>,
    pub body: BlockList,
}

/// The complete flat document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub title: Option<String>,
    pub author: Option<String>,
    pub sections: Vec<Section>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new section with default page setup and returns it.
    pub fn add_section(&mut self) -> &mut Section {
        self.sections.push(Section::default());
        match self.sections.last_mut() {
            Some(section) => section,
            None => unreachable!(),
        }
    }

    /// The section currently being filled, creating the first one on
    /// demand.
    pub fn last_section_mut(&mut self) -> &mut Section {
        if self.sections.is_empty() {
            self.sections.push(Section::default());
        }
        match self.sections.last_mut() {
            Some(section) => section,
            None => unreachable!(),
        }
    }
}
