//! The built-in style set and its element bindings.
//!
//! [`install`] fills a fresh [`StyleManager`] with one named style per
//! element kind, the values a plain document renders with, and the
//! binding of every element type to its style. All styles stay
//! reachable by name afterwards, so sessions can retune any of them.
//!
//! Two bindings are scoped rather than per-type: paragraphs anywhere
//! inside a quote get `QuoteParagraph`, paragraphs directly inside a
//! footnote definition get `FootnoteParagraph`. Both derive from
//! `Paragraph`, so a tweak there carries over.

use markflow_style::{
    Alignment, BoxSpacing, CascadingStyle, Dimension, LineKind, OutlineLevel, SharedStyle,
    StyleError, StyleManager, Underline,
};
use markflow_types::{Color, ElementType};

use crate::style_names as names;

/// Font the root style starts with.
pub const DEFAULT_FONT_NAME: &str = "Arial";

/// Root font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 11.0;

/// Ratio between the font sizes of two adjacent heading levels.
pub const DEFAULT_HEADING_SCALE: f32 = 1.125;

/// Indent step, in font sizes, shared by lists, quotes and TOC levels.
const DEFAULT_INDENT: f32 = 2.0;

fn edit(style: &SharedStyle, configure: impl FnOnce(&mut CascadingStyle)) {
    configure(&mut style.borrow_mut());
}

fn named(styles: &StyleManager, name: &str) -> Result<SharedStyle, StyleError> {
    styles
        .style(name)
        .ok_or_else(|| StyleError::UnknownStyle(name.to_string()))
}

/// Creates, fills and binds the whole default style set.
pub fn install(styles: &mut StyleManager) -> Result<(), StyleError> {
    if let Some(undefined) = styles.style(names::UNDEFINED) {
        edit(&undefined, |style| {
            style.font.color = Some(Color::rgb(0, 128, 0));
            style.font.underline = Some(Underline::Dotted);
        });
    }

    install_containers(styles)?;
    install_leaf_blocks(styles)?;
    install_inlines(styles);
    install_headings(styles)?;
    bind(styles)?;
    Ok(())
}

fn install_containers(styles: &mut StyleManager) -> Result<(), StyleError> {
    edit(&styles.add_style(names::ROOT), |style| {
        style.font.name = Some(DEFAULT_FONT_NAME.to_string());
        style.font.size = Dimension::pt(DEFAULT_FONT_SIZE);
    });

    edit(&styles.add_style(names::UNORDERED_LIST), |style| {
        style.margin.left = Dimension::em(DEFAULT_INDENT);
        style.margin.top = Dimension::em(0.75);
        style.margin.bottom = Dimension::em(0.75);
    });

    edit(&styles.add_style(names::UNORDERED_LIST_ITEM), |style| {
        style.bullet.normal.content = Some("\u{2022}".to_string());
        style.bullet.unchecked.content = Some("\u{a8}".to_string());
        style.bullet.unchecked.font.name = Some("Wingdings".to_string());
        style.bullet.checked.content = Some("\u{fe}".to_string());
        style.bullet.checked.font.name = Some("Wingdings".to_string());
        // Markers never inherit typeface flags from the item text.
        for bullet in [
            &mut style.bullet.normal,
            &mut style.bullet.unchecked,
            &mut style.bullet.checked,
        ] {
            bullet.font.bold = Some(false);
            bullet.font.italic = Some(false);
            bullet.font.superscript = Some(false);
            bullet.font.subscript = Some(false);
        }
        style.bullet.text_indent = Dimension::em(DEFAULT_INDENT);
        style.bullet.bullet_indent = Dimension::em(DEFAULT_INDENT * 0.5);
        style.margin.top = Dimension::em(0.5);
    });

    // Ordered lists reuse the unordered list style until someone binds
    // their own; the style exists so that rebinding stays a one-liner.
    styles.derive_style(names::ORDERED_LIST, names::UNORDERED_LIST)?;

    edit(&styles.add_style(names::ORDERED_LIST_ITEM), |style| {
        style.bullet.normal.content = Some(".".to_string());
        style.bullet.text_indent = Dimension::em(DEFAULT_INDENT);
        style.bullet.bullet_indent = Dimension::em(DEFAULT_INDENT * 0.75);
        style.margin.top = Dimension::em(0.5);
    });

    edit(&styles.add_style(names::QUOTE), |style| {
        style.font.color = Some(Color::rgb(80, 80, 80));
        style.background = Some(Color::rgb(255, 255, 255));
        style.margin.top = Dimension::em(1.0);
        style.margin.bottom = Dimension::em(1.0);
        style.margin.left = Dimension::em(DEFAULT_INDENT);
        style.padding.top = Dimension::em(1.0);
        style.padding.bottom = Dimension::em(0.5);
    });

    edit(&styles.add_style(names::FOOTNOTE), |style| {
        style.bullet.normal.content = Some(".".to_string());
        style.bullet.text_indent = Dimension::em(DEFAULT_INDENT);
        style.bullet.bullet_indent = Dimension::em(DEFAULT_INDENT * 0.8);
    });

    edit(&styles.add_style(names::FOOTNOTE_GROUP), |style| {
        style.margin.top = Dimension::pt(DEFAULT_FONT_SIZE);
    });

    edit(&styles.add_style(names::TABLE), |style| {
        style.margin.top = Dimension::em(1.0);
        style.margin.bottom = Dimension::em(1.0);
        style.table.cell_spacing = BoxSpacing::all(Dimension::em(0.5));
        style.table.cell_spacing.bottom = Dimension::em(0.0);
        style.border.set_width(Dimension::pt(0.8));
        style.border.set_color(Color::gray(128));
    });

    edit(&styles.add_style(names::TABLE_HEADER), |style| {
        style.font.bold = Some(true);
        style.border.bottom.width = Dimension::pt(0.8);
        style.border.bottom.color = Some(Color::gray(128));
    });

    styles.add_style(names::TABLE_ROW_ODD);
    styles.add_style(names::TABLE_ROW_EVEN);

    edit(&styles.add_style(names::TABLE_CELL), |style| {
        style.border.set_width(Dimension::pt(0.4));
        style.border.set_color(Color::gray(128));
        // An unset bottom side lets row styles such as the header rule
        // shine through; the shared width still covers plain cells.
        style.border.bottom.width = Dimension::default();
        style.border.bottom.color = None;
    });

    edit(&styles.add_style(names::CUSTOM_CONTAINER), |style| {
        style.background = Some(Color::rgb(240, 248, 255));
        style.padding = BoxSpacing::all(Dimension::em(1.0));
        style.margin.top = Dimension::em(1.0);
        style.margin.bottom = Dimension::em(1.0);
    });

    Ok(())
}

fn install_leaf_blocks(styles: &mut StyleManager) -> Result<(), StyleError> {
    edit(&styles.add_style(names::PARAGRAPH), |style| {
        style.paragraph.widow_control = Some(true);
        style.margin.bottom = Dimension::em(0.75);
    });

    edit(&styles.add_style(names::BREAK), |style| {
        style.border.bottom.color = Some(Color::gray(128));
        style.border.bottom.width = Dimension::pt(0.25);
        style.margin.bottom = Dimension::em(1.5);
    });

    let quote_paragraph = styles.derive_style(names::QUOTE_PARAGRAPH, names::PARAGRAPH)?;
    edit(&quote_paragraph, |style| {
        style.border.left.line = Some(LineKind::Single);
        style.border.left.color = Some(Color::rgb(211, 211, 211));
        style.border.left.width = Dimension::em(0.25);
        style.padding.left = Dimension::em(DEFAULT_INDENT * 0.5);
        style.margin.bottom = Dimension::pt(0.0);
    });

    styles.derive_style(names::FOOTNOTE_PARAGRAPH, names::PARAGRAPH)?;

    edit(&styles.add_style(names::CODE), |style| {
        style.font.name = Some("Consolas".to_string());
        style.font.size = Dimension::em(1.0);
        style.background = Some(Color::rgb(240, 240, 240));
        style.margin.top = Dimension::em(0.5);
        style.margin.bottom = Dimension::pt(DEFAULT_FONT_SIZE);
        style.padding = BoxSpacing::all(Dimension::em(0.5));
    });

    edit(&styles.add_style(names::IMAGE), |style| {
        style.paragraph.alignment = Some(Alignment::Center);
        style.margin.top = Dimension::em(1.0);
        style.margin.bottom = Dimension::em(1.0);
    });

    edit(&styles.add_style(names::PLUGIN), |style| {
        style.paragraph.alignment = Some(Alignment::Center);
        style.margin.top = Dimension::em(1.0);
        style.margin.bottom = Dimension::em(1.0);
    });

    Ok(())
}

fn install_inlines(styles: &mut StyleManager) {
    edit(&styles.add_style(names::BOLD), |style| {
        style.font.bold = Some(true);
    });
    edit(&styles.add_style(names::ITALIC), |style| {
        style.font.italic = Some(true);
    });
    edit(&styles.add_style(names::HYPERLINK), |style| {
        style.font.color = Some(Color::rgb(0, 0, 255));
    });
    edit(&styles.add_style(names::INLINE_CODE), |style| {
        style.font.name = Some("Consolas".to_string());
        style.font.color = Some(Color::rgb(210, 105, 30));
    });
    edit(&styles.add_style(names::FOOTNOTE_REFERENCE), |style| {
        style.font.superscript = Some(true);
    });
    edit(&styles.add_style(names::SUPERSCRIPT), |style| {
        style.font.superscript = Some(true);
    });
    edit(&styles.add_style(names::SUBSCRIPT), |style| {
        style.font.subscript = Some(true);
    });
    edit(&styles.add_style(names::CITE), |style| {
        style.font.underline = Some(Underline::Dotted);
    });
    edit(&styles.add_style(names::MARKED), |style| {
        style.font.color = Some(Color::rgb(255, 0, 0));
        style.font.bold = Some(true);
    });
    edit(&styles.add_style(names::INSERTED), |style| {
        style.font.color = Some(Color::rgb(0, 128, 0));
    });
    edit(&styles.add_style(names::STRIKE), |style| {
        style.font.color = Some(Color::gray(128));
        style.font.italic = Some(true);
    });
    edit(&styles.add_style(names::INDEX), |style| {
        style.font.color = Some(Color::rgb(0, 0, 0));
    });

    styles.add_style(names::INLINE_IMAGE);
    styles.add_style(names::INLINE_PLUGIN);
}

fn install_headings(styles: &mut StyleManager) -> Result<(), StyleError> {
    for level in 1..=6u8 {
        edit(&styles.add_style(&names::heading(level)), |style| {
            style.font.bold = Some(true);
            style.paragraph.keep_with_next = Some(true);
            style.paragraph.outline_level = Some(OutlineLevel::for_heading(level));
        });

        edit(&styles.add_style(&names::toc(level)), |style| {
            style.font.color = Some(Color::rgb(0, 0, 0));
            style.margin.left = Dimension::em(DEFAULT_INDENT * f32::from(level - 1));
        });
    }
    update_headings(styles, DEFAULT_HEADING_SCALE)
}

/// Rescales the heading sizes: heading N gets `scale ^ (6 - N)` em.
/// Works on installed defaults only; the flags set at install time stay.
pub fn update_headings(styles: &StyleManager, scale: f32) -> Result<(), StyleError> {
    for level in 1..=6u8 {
        let style = named(styles, &names::heading(level))?;
        edit(&style, |style| {
            style.font.size = Dimension::em(scale.powi(6 - i32::from(level)));
            style.margin.top = Dimension::em(0.8);
            style.margin.bottom = Dimension::em(0.5);
        });
    }
    Ok(())
}

/// Points the root style at another font. Every style without an own
/// font name inherits it from here.
pub fn set_default_font(styles: &StyleManager, name: &str, size: f32) -> Result<(), StyleError> {
    let root = named(styles, names::ROOT)?;
    edit(&root, |style| {
        style.font.name = Some(name.to_string());
        style.font.size = Dimension::pt(size);
    });
    Ok(())
}

fn bind(styles: &mut StyleManager) -> Result<(), StyleError> {
    for level in 1..=6u8 {
        styles
            .for_element(ElementType::heading(level))
            .bind(&names::heading(level))?;
        styles
            .for_element(ElementType::toc(level))
            .bind(&names::toc(level))?;
    }

    styles.for_element(ElementType::Root).bind(names::ROOT)?;
    styles
        .for_element(ElementType::UnorderedList)
        .bind(names::UNORDERED_LIST)?;
    styles
        .for_element(ElementType::OrderedList)
        .bind(names::UNORDERED_LIST)?;
    styles
        .for_element(ElementType::UnorderedListItem)
        .bind(names::UNORDERED_LIST_ITEM)?;
    styles
        .for_element(ElementType::OrderedListItem)
        .bind(names::ORDERED_LIST_ITEM)?;
    styles.for_element(ElementType::Quote).bind(names::QUOTE)?;
    styles
        .for_element(ElementType::FootnoteGroup)
        .bind(names::FOOTNOTE_GROUP)?;
    styles
        .for_element(ElementType::Footnote)
        .bind(names::FOOTNOTE)?;
    styles.for_element(ElementType::Table).bind(names::TABLE)?;
    styles
        .for_element(ElementType::TableHeader)
        .bind(names::TABLE_HEADER)?;
    styles
        .for_element(ElementType::TableRowEven)
        .bind(names::TABLE_ROW_EVEN)?;
    styles
        .for_element(ElementType::TableRowOdd)
        .bind(names::TABLE_ROW_ODD)?;
    styles
        .for_element(ElementType::TableCell)
        .bind(names::TABLE_CELL)?;
    styles
        .for_element(ElementType::CustomContainer)
        .bind(names::CUSTOM_CONTAINER)?;

    styles
        .for_element(ElementType::Paragraph)
        .bind(names::PARAGRAPH)?;
    styles.for_element(ElementType::Break).bind(names::BREAK)?;
    styles.for_element(ElementType::Code).bind(names::CODE)?;
    styles.for_element(ElementType::Image).bind(names::IMAGE)?;
    styles.for_element(ElementType::Plugin).bind(names::PLUGIN)?;
    styles
        .for_element(ElementType::Paragraph)
        .with_ancestor(ElementType::Quote)
        .bind(names::QUOTE_PARAGRAPH)?;
    styles
        .for_element(ElementType::Paragraph)
        .with_parent(ElementType::Footnote)
        .bind(names::FOOTNOTE_PARAGRAPH)?;

    styles.for_element(ElementType::Bold).bind(names::BOLD)?;
    styles.for_element(ElementType::Italic).bind(names::ITALIC)?;
    styles
        .for_element(ElementType::Hyperlink)
        .bind(names::HYPERLINK)?;
    styles
        .for_element(ElementType::InlineCode)
        .bind(names::INLINE_CODE)?;
    styles
        .for_element(ElementType::FootnoteReference)
        .bind(names::FOOTNOTE_REFERENCE)?;
    styles
        .for_element(ElementType::Subscript)
        .bind(names::SUBSCRIPT)?;
    styles
        .for_element(ElementType::Superscript)
        .bind(names::SUPERSCRIPT)?;
    styles.for_element(ElementType::Cite).bind(names::CITE)?;
    styles.for_element(ElementType::Marked).bind(names::MARKED)?;
    styles
        .for_element(ElementType::Inserted)
        .bind(names::INSERTED)?;
    styles.for_element(ElementType::Strike).bind(names::STRIKE)?;
    styles.for_element(ElementType::Index).bind(names::INDEX)?;

    Ok(())
}
