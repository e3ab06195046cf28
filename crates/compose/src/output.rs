//! Where converted blocks land.
//!
//! Most content goes into the body of the current section, but table
//! cells, headers, footers and footnote definitions fill detached block
//! lists. [`Target`] lets the converter treat both the same while keeping
//! section-level commands available only where a document is in reach.

use markflow_render_core::{BlockList, Document, Section};

pub(crate) enum Target<'t> {
    /// The body of the document's current section.
    Body(&'t mut Document),
    /// A detached block list such as a cell or header content.
    Fragment(&'t mut BlockList),
}

impl Target<'_> {
    pub(crate) fn blocks(&mut self) -> &mut BlockList {
        match self {
            Target::Body(document) => &mut document.last_section_mut().body,
            Target::Fragment(blocks) => blocks,
        }
    }

    pub(crate) fn is_body(&self) -> bool {
        matches!(self, Target::Body(_))
    }

    /// Starts a new section carrying over page setup and running headers,
    /// or reports `false` where no document is in reach.
    pub(crate) fn start_section(&mut self) -> bool {
        match self {
            Target::Body(document) => {
                let previous = document.last_section_mut().clone();
                let section = document.add_section();
                *section = Section {
                    page_setup: previous.page_setup,
                    label: None,
                    header: previous.header,
                    first_header: previous.first_header,
                    footer: previous.footer,
                    first_footer: previous.first_footer,
                    body: BlockList::new(),
                };
                true
            }
            Target::Fragment(_) => false,
        }
    }

    /// Names the current section, or reports `false` where no document is
    /// in reach.
    pub(crate) fn set_section_label(&mut self, label: &str) -> bool {
        match self {
            Target::Body(document) => {
                document.last_section_mut().label = Some(label.to_string());
                true
            }
            Target::Fragment(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_breaks_carry_page_setup_but_not_the_label() {
        let mut document = Document::new();
        let mut target = Target::Body(&mut document);

        target.blocks().add_paragraph().add_text("first");
        target.set_section_label("intro");
        target.start_section();

        assert_eq!(document.sections.len(), 2);
        assert_eq!(document.sections[0].label.as_deref(), Some("intro"));
        assert!(document.sections[1].label.is_none());
        assert!(document.sections[1].body.is_empty());
        assert_eq!(
            document.sections[1].page_setup,
            document.sections[0].page_setup
        );
    }

    #[test]
    fn fragments_reject_section_commands() {
        let mut blocks = BlockList::new();
        let mut target = Target::Fragment(&mut blocks);
        assert!(!target.start_section());
        assert!(!target.set_section_label("x"));
    }
}
