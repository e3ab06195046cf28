//! Shared helpers for the integration tests: composing fixtures and
//! picking paragraphs out of the flat result.

use markflow::{BodyElement, Document, Paragraph, Section, Table};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// The document's single section, asserting there is exactly one.
pub fn only_section(document: &Document) -> &Section {
    assert_eq!(document.sections.len(), 1, "expected exactly one section");
    &document.sections[0]
}

/// All paragraphs of a section body, fillers included, in body order.
pub fn paragraphs(section: &Section) -> Vec<&Paragraph> {
    section
        .body
        .elements
        .iter()
        .filter_map(|element| match element {
            BodyElement::Paragraph(paragraph) => Some(paragraph),
            BodyElement::Table(_) => None,
        })
        .collect()
}

/// Synthesized filler paragraphs only.
pub fn fillers(section: &Section) -> Vec<&Paragraph> {
    paragraphs(section)
        .into_iter()
        .filter(|paragraph| paragraph.is_filler())
        .collect()
}

/// The first paragraph whose plain text contains `needle`.
pub fn paragraph_containing<'a>(section: &'a Section, needle: &str) -> &'a Paragraph {
    paragraphs(section)
        .into_iter()
        .find(|paragraph| paragraph.plain_text().contains(needle))
        .unwrap_or_else(|| panic!("no paragraph contains {needle:?}"))
}

/// The first table of the section body.
pub fn first_table(section: &Section) -> &Table {
    section
        .body
        .elements
        .iter()
        .find_map(|element| match element {
            BodyElement::Table(table) => Some(table),
            BodyElement::Paragraph(_) => None,
        })
        .expect("no table in section body")
}
