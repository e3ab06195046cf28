//! Merging evaluated styles into flat output formats.
//!
//! An evaluated [`CascadingStyle`] still holds symbolic dimensions and
//! optional fields; the flat side wants points and concrete values. The
//! functions here fold the style into an existing format, letting set
//! style fields win and leaving the rest of the format alone.

use markflow_render_core::{BorderLine, BorderSet, FontSpec, LineSpacing, ParagraphFormat};
use markflow_style::{
    BorderStyle, CascadingStyle, Dimension, FontStyle, LineKind, LineSpacingRule, StyleError,
};
use markflow_types::{BoxSide, Color};

const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 1.0 };

/// Folds the paragraph-level parts of `style` into `format`: alignment,
/// indents, line spacing, pagination flags, the font, a shading fallback
/// and borders. Dimensions evaluate against `font_size` and `width`.
pub(crate) fn merge_format(
    style: &CascadingStyle,
    format: &mut ParagraphFormat,
    font_size: f32,
    width: f32,
) -> Result<(), StyleError> {
    let paragraph = &style.paragraph;

    if let Some(alignment) = paragraph.alignment {
        format.alignment = Some(alignment);
    }
    if !paragraph.first_line_indent.is_empty() {
        format.first_line_indent = paragraph.first_line_indent.eval(font_size, width)?;
    }
    if let Some(rule) = paragraph.line_spacing_rule {
        format.line_spacing = match rule {
            LineSpacingRule::Single => LineSpacing::Single,
            LineSpacingRule::OnePtFive => LineSpacing::Multiple(1.5),
            LineSpacingRule::Double => LineSpacing::Multiple(2.0),
            LineSpacingRule::AtLeast => {
                LineSpacing::AtLeast(paragraph.line_spacing.eval(font_size, width)?)
            }
            LineSpacingRule::Exactly => {
                LineSpacing::Exactly(paragraph.line_spacing.eval(font_size, width)?)
            }
            LineSpacingRule::Multiple => {
                LineSpacing::Multiple(paragraph.line_spacing.eval(font_size, width)?)
            }
        };
    }
    if let Some(keep) = paragraph.keep_together {
        format.keep_together = keep;
    }
    if let Some(keep) = paragraph.keep_with_next {
        format.keep_with_next = keep;
    }
    if let Some(page_break) = paragraph.page_break_before {
        format.page_break_before = page_break;
    }
    if paragraph.widow_control.is_some() {
        format.widow_control = paragraph.widow_control;
    }
    if let Some(level) = paragraph.outline_level {
        format.outline_level = Some(level);
    }

    format.font = merge_font(&style.font, &format.font, font_size, width, true)?;

    if format.shading.is_none() {
        format.shading = style.background;
    }
    merge_borders(&style.border, &mut format.borders, font_size, width)?;
    Ok(())
}

/// Folds a style font into a flat font. With `already_scaled` the caller
/// has evaluated the size beforehand and `font_size` is used as-is,
/// otherwise a set size evaluates against `font_size` and `width`.
///
/// Setting either script flag resets both before applying, so a style can
/// cancel an inherited superscript by declaring `subscript`.
pub(crate) fn merge_font(
    font: &FontStyle,
    base: &FontSpec,
    font_size: f32,
    width: f32,
    already_scaled: bool,
) -> Result<FontSpec, StyleError> {
    let mut merged = base.clone();

    if font.name.is_some() {
        merged.name = font.name.clone();
    }
    if !font.size.is_empty() {
        merged.size = Some(if already_scaled {
            font_size
        } else {
            font.size.eval(font_size, width)?
        });
    }
    if let Some(bold) = font.bold {
        merged.bold = bold;
    }
    if let Some(italic) = font.italic {
        merged.italic = italic;
    }
    if font.underline.is_some() {
        merged.underline = font.underline;
    }
    if font.color.is_some() {
        merged.color = font.color;
    }
    if font.superscript.is_some() || font.subscript.is_some() {
        merged.superscript = font.superscript == Some(true);
        merged.subscript = font.subscript == Some(true);
    }
    Ok(merged)
}

fn border_line(
    width: &Dimension,
    line: Option<LineKind>,
    color: Option<Color>,
    font_size: f32,
    container_width: f32,
) -> Result<BorderLine, StyleError> {
    Ok(BorderLine::new(
        width.eval(font_size, container_width)?,
        line.unwrap_or(LineKind::Single),
        Some(color.unwrap_or(BLACK)),
    ))
}

/// Writes a border style into a flat border set. The shared shorthand
/// fills all four sides first, then sides with their own width override.
/// A side with no line kind renders as a single line, a side with no
/// color as black.
pub(crate) fn merge_borders(
    border: &BorderStyle,
    borders: &mut BorderSet,
    font_size: f32,
    width: f32,
) -> Result<(), StyleError> {
    if border.has_value() {
        let shared = border_line(border.width(), border.line(), border.color(), font_size, width)?;
        borders.top = Some(shared);
        borders.bottom = Some(shared);
        borders.left = Some(shared);
        borders.right = Some(shared);
    }

    for side in BoxSide::ALL {
        let single = border.side(side);
        if !single.has_value() {
            continue;
        }
        let line = border_line(&single.width, single.line, single.color, font_size, width)?;
        match side {
            BoxSide::Top => borders.top = Some(line),
            BoxSide::Bottom => borders.bottom = Some(line),
            BoxSide::Left => borders.left = Some(line),
            BoxSide::Right => borders.right = Some(line),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_style_fields_override_the_format() {
        let mut style = CascadingStyle::default();
        style.paragraph.alignment = Some(markflow_style::Alignment::Center);
        style.paragraph.keep_with_next = Some(true);
        style.font.bold = Some(true);
        style.background = Some(BLACK);

        let mut format = ParagraphFormat::default();
        format.alignment = Some(markflow_style::Alignment::Right);
        merge_format(&style, &mut format, 10.0, 500.0).unwrap();

        assert_eq!(format.alignment, Some(markflow_style::Alignment::Center));
        assert!(format.keep_with_next);
        assert!(format.font.bold);
        assert_eq!(format.shading, Some(BLACK));
    }

    #[test]
    fn existing_shading_is_not_replaced() {
        let red = Color::rgb(255, 0, 0);
        let mut style = CascadingStyle::default();
        style.background = Some(BLACK);

        let mut format = ParagraphFormat::default();
        format.shading = Some(red);
        merge_format(&style, &mut format, 10.0, 500.0).unwrap();

        assert_eq!(format.shading, Some(red));
    }

    #[test]
    fn already_scaled_size_short_circuits_evaluation() {
        let mut font = FontStyle::default();
        font.size = Dimension::em(2.0);

        let scaled = merge_font(&font, &FontSpec::default(), 24.0, 500.0, true).unwrap();
        assert_eq!(scaled.size, Some(24.0));

        let raw = merge_font(&font, &FontSpec::default(), 24.0, 500.0, false).unwrap();
        assert_eq!(raw.size, Some(48.0));
    }

    #[test]
    fn script_flags_reset_before_applying() {
        let mut base = FontSpec::default();
        base.superscript = true;

        let mut font = FontStyle::default();
        font.subscript = Some(true);

        let merged = merge_font(&font, &base, 10.0, 500.0, true).unwrap();
        assert!(!merged.superscript);
        assert!(merged.subscript);

        // A font with no script opinion leaves the base alone.
        let neutral = merge_font(&FontStyle::default(), &base, 10.0, 500.0, true).unwrap();
        assert!(neutral.superscript);
    }

    #[test]
    fn shared_border_fills_all_sides_then_sides_override() {
        let mut border = BorderStyle::default();
        border.set_width(Dimension::pt(1.0));
        border.left.width = Dimension::pt(3.0);
        border.left.line = Some(LineKind::Dash);

        let mut borders = BorderSet::default();
        merge_borders(&border, &mut borders, 10.0, 500.0).unwrap();

        assert_eq!(borders.top.unwrap().width, 1.0);
        assert_eq!(borders.top.unwrap().line, LineKind::Single);
        assert_eq!(borders.left.unwrap().width, 3.0);
        assert_eq!(borders.left.unwrap().line, LineKind::Dash);
        assert_eq!(borders.left.unwrap().color, Some(BLACK));
    }
}
