//! Page geometry and section plumbing through the session facade.

mod common;

use common::{TestResult, only_section, paragraph_containing};
use markflow::{
    BodyElement, BoxSpacing, Composer, Dimension, Field, HeaderFooter, PaperOrientation,
    PaperSize, Paragraph, Run, Tree, build,
};

fn mm(value: f32) -> f32 {
    value / 25.4 * 72.0
}

fn cm(value: f32) -> f32 {
    value / 2.54 * 72.0
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

fn marginal_paragraph(marginal: &Option<HeaderFooter>) -> &Paragraph {
    let content = &marginal.as_ref().expect("marginal content").content;
    match &content.elements[0] {
        BodyElement::Paragraph(paragraph) => paragraph,
        other => panic!("expected a paragraph, got {other:?}"),
    }
}

#[test]
fn paper_size_and_orientation_shape_the_section() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut session = Composer::new()?;
    session
        .set_paper_size(PaperSize::A5)
        .set_paper_orientation(PaperOrientation::Landscape)
        .append(Tree::from_blocks(vec![build::paragraph("wide")]));

    let document = session.compose()?;
    let setup = &only_section(&document).page_setup;
    assert!(close(setup.page_width, mm(210.0)));
    assert!(close(setup.page_height, mm(148.0)));
    Ok(())
}

#[test]
fn sections_carry_their_setup_forward_unless_reset() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut session = Composer::new()?;
    session.append(Tree::from_blocks(vec![build::paragraph("one")]));
    session.set_paper_size(PaperSize::A5);
    session
        .add_section(false)
        .append(Tree::from_blocks(vec![build::paragraph("two")]));
    session
        .add_section(true)
        .append(Tree::from_blocks(vec![build::paragraph("three")]));

    let document = session.compose()?;
    assert_eq!(document.sections.len(), 3);
    assert!(close(document.sections[0].page_setup.page_width, mm(148.0)));
    assert!(close(document.sections[1].page_setup.page_width, mm(148.0)));
    assert!(close(document.sections[2].page_setup.page_width, cm(21.0)));
    assert!(close(document.sections[2].page_setup.page_height, cm(29.7)));
    Ok(())
}

#[test]
fn margins_evaluate_once_against_the_open_page() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut session = Composer::new()?;
    session.set_page_margins(BoxSpacing::all(Dimension::percent(10.0)))?;
    session.set_header_distance(Dimension::cm(2.0))?;
    session.set_footer_distance(Dimension::em(2.0))?;
    session.set_first_page_number(7);
    session.append(Tree::from_blocks(vec![build::paragraph("body")]));

    let document = session.compose()?;
    let setup = &only_section(&document).page_setup;

    // Ten percent of the A4 body width, and the same width snapshot for
    // every side: the left write must not shift the right one.
    let margin = (cm(21.0) - 2.0 * cm(2.5)) / 10.0;
    assert!(close(setup.margin_left, margin));
    assert!(close(setup.margin_right, margin));
    assert!(close(setup.margin_top, margin));
    assert!(close(setup.margin_bottom, margin));

    assert!(close(setup.header_distance, cm(2.0)));
    assert!(close(setup.footer_distance, 22.0));
    assert_eq!(setup.first_page_number, Some(7));
    Ok(())
}

#[test]
fn headers_and_footers_attach_to_their_section() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut session = Composer::new()?;
    session
        .set_header(Tree::from_blocks(vec![build::paragraph("Confidential")]))
        .set_footer(Tree::from_blocks(vec![build::paragraph("{page} of {pages}")]))
        .set_first_page_footer(Tree::from_blocks(vec![build::paragraph("cover")]))
        .append(Tree::from_blocks(vec![build::paragraph("body")]));

    let document = session.compose()?;
    let section = only_section(&document);

    let header = marginal_paragraph(&section.header);
    assert_eq!(header.plain_text(), "Confidential");
    assert!(section.first_header.is_none());

    let footer = marginal_paragraph(&section.footer);
    assert!(matches!(footer.runs[0], Run::Field(Field::Page)));
    assert!(matches!(&footer.runs[1], Run::Text { text, .. } if text == " of "));
    assert!(matches!(footer.runs[2], Run::Field(Field::PageCount)));

    let cover = marginal_paragraph(&section.first_footer);
    assert_eq!(cover.plain_text(), "cover");
    Ok(())
}

#[test]
fn section_breaks_inside_content_split_inherited_sections() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut session = Composer::new()?;
    session.set_paper_size(PaperSize::Letter);
    session.append(Tree::from_blocks(vec![
        build::paragraph("one"),
        build::paragraph("{sectionbreak}"),
        build::paragraph("two"),
        build::paragraph("{setsectionname Appendix}"),
    ]));

    let document = session.compose()?;
    assert_eq!(document.sections.len(), 2);
    assert!(close(document.sections[0].page_setup.page_width, mm(216.0)));
    assert!(close(document.sections[1].page_setup.page_width, mm(216.0)));
    assert_eq!(document.sections[1].label.as_deref(), Some("Appendix"));

    paragraph_containing(&document.sections[0], "one");
    paragraph_containing(&document.sections[1], "two");
    Ok(())
}
