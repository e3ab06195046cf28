//! A plain-text backend that dumps the document structure.
//!
//! One element per line, nesting shown by indentation, with every
//! non-default format field spelled out. Integration tests assert on
//! this dump instead of inspecting the model by hand.

use std::io::Write;

use crate::document::{BlockList, BodyElement, Document, HeaderFooter, Section};
use crate::error::RenderError;
use crate::paragraph::{BorderSet, LineSpacing, Paragraph, ParagraphFormat};
use crate::run::{Field, FontSpec, HyperlinkKind, Run};
use crate::table::Table;
use crate::traits::DocumentRenderer;

pub struct TextRenderer<W: Write> {
    writer: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(writer: W) -> Self {
        TextRenderer { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn line(&mut self, indent: usize, text: &str) -> Result<(), RenderError> {
        writeln!(self.writer, "{:width$}{text}", "", width = indent * 2)?;
        Ok(())
    }

    fn write_section(&mut self, section: &Section) -> Result<(), RenderError> {
        let setup = &section.page_setup;
        let mut head = format!("section {:.1}x{:.1}", setup.page_width, setup.page_height);
        if let Some(number) = setup.first_page_number {
            head.push_str(&format!(" start={number}"));
        }
        if let Some(label) = &section.label {
            head.push_str(&format!(" label={label:?}"));
        }
        self.line(0, &head)?;
        self.write_header_footer("header", section.header.as_ref())?;
        self.write_header_footer("first-header", section.first_header.as_ref())?;
        self.write_header_footer("footer", section.footer.as_ref())?;
        self.write_header_footer("first-footer", section.first_footer.as_ref())?;
        self.write_blocks(&section.body, 1)
    }

    fn write_header_footer(
        &mut self,
        kind: &str,
        part: Option<&HeaderFooter>,
    ) -> Result<(), RenderError> {
        let Some(part) = part else {
            return Ok(());
        };
        self.line(1, kind)?;
        self.write_blocks(&part.content, 2)
    }

    fn write_blocks(&mut self, blocks: &BlockList, indent: usize) -> Result<(), RenderError> {
        for element in &blocks.elements {
            match element {
                BodyElement::Paragraph(paragraph) => self.write_paragraph(paragraph, indent)?,
                BodyElement::Table(table) => self.write_table(table, indent)?,
            }
        }
        Ok(())
    }

    fn write_paragraph(
        &mut self,
        paragraph: &Paragraph,
        indent: usize,
    ) -> Result<(), RenderError> {
        let mut head = String::from("p");
        let notes = format_notes(&paragraph.format);
        if !notes.is_empty() {
            head.push(' ');
            head.push_str(&notes);
        }
        self.line(indent, &head)?;
        for run in &paragraph.runs {
            self.write_run(run, indent + 1)?;
        }
        Ok(())
    }

    fn write_run(&mut self, run: &Run, indent: usize) -> Result<(), RenderError> {
        match run {
            Run::Text { text, font } => {
                let mut line = format!("text {text:?}");
                let notes = font_notes(font);
                if !notes.is_empty() {
                    line.push(' ');
                    line.push_str(&notes);
                }
                self.line(indent, &line)
            }
            Run::Bookmark { id } => self.line(indent, &format!("bookmark {id}")),
            Run::Hyperlink(link) => {
                let marker = match link.kind {
                    HyperlinkKind::Local => "#",
                    HyperlinkKind::Web => "",
                };
                self.line(indent, &format!("link {marker}{}", link.target))?;
                for nested in &link.runs {
                    self.write_run(nested, indent + 1)?;
                }
                Ok(())
            }
            Run::Image(image) => {
                let mut line = format!("image {}", image.path);
                if let Some(width) = image.width {
                    line.push_str(&format!(" w={width:.1}"));
                }
                if let Some(height) = image.height {
                    line.push_str(&format!(" h={height:.1}"));
                }
                if let Some(dpi) = image.dpi {
                    line.push_str(&format!(" dpi={dpi:.0}"));
                }
                self.line(indent, &line)
            }
            Run::Field(field) => {
                let text = match field {
                    Field::Page => "field page".to_string(),
                    Field::PageCount => "field pages".to_string(),
                    Field::PageRef { target } => format!("field pageref:{target}"),
                    Field::SectionLabel => "field section".to_string(),
                };
                self.line(indent, &text)
            }
            Run::Tab => self.line(indent, "tab"),
            Run::LineBreak => self.line(indent, "br"),
            Run::Space { count } => self.line(indent, &format!("space x{count}")),
        }
    }

    fn write_table(&mut self, table: &Table, indent: usize) -> Result<(), RenderError> {
        let widths = table
            .columns
            .iter()
            .map(|column| format!("{:.1}", column.width))
            .collect::<Vec<_>>()
            .join(", ");
        let mut head = format!("table cols=[{widths}]");
        if let Some(alignment) = table.alignment {
            head.push_str(&format!(" align={alignment:?}"));
        }
        if table.left_indent != 0.0 {
            head.push_str(&format!(" indent={:.1}", table.left_indent));
        }
        if let Some(color) = table.shading {
            head.push_str(&format!(" shading={color}"));
        }
        if [
            table.padding_left,
            table.padding_right,
            table.padding_top,
            table.padding_bottom,
        ]
        .iter()
        .any(|value| *value != 0.0)
        {
            head.push_str(&format!(
                " padding={:.1}/{:.1}/{:.1}/{:.1}",
                table.padding_left, table.padding_right, table.padding_top, table.padding_bottom
            ));
        }
        self.line(indent, &head)?;

        for row in &table.rows {
            let mut row_head = String::from("row");
            if row.heading {
                row_head.push_str(" heading");
            }
            if let Some(height) = row.height {
                row_head.push_str(&format!(" height={height:.1}"));
            }
            if let Some(color) = row.shading {
                row_head.push_str(&format!(" shading={color}"));
            }
            self.line(indent + 1, &row_head)?;

            for cell in &row.cells {
                let mut cell_head = String::from("cell");
                if cell.col_span > 1 || cell.row_span > 1 {
                    cell_head.push_str(&format!(" span={}x{}", cell.col_span, cell.row_span));
                }
                if let Some(color) = cell.shading {
                    cell_head.push_str(&format!(" shading={color}"));
                }
                if let Some(alignment) = cell.vertical_alignment {
                    cell_head.push_str(&format!(" valign={alignment:?}"));
                }
                let borders = border_notes(&cell.borders);
                if !borders.is_empty() {
                    cell_head.push(' ');
                    cell_head.push_str(&borders);
                }
                self.line(indent + 2, &cell_head)?;
                self.write_blocks(&cell.content, indent + 3)?;
            }
        }
        Ok(())
    }
}

impl<W: Write> DocumentRenderer for TextRenderer<W> {
    fn render(&mut self, document: &Document) -> Result<(), RenderError> {
        if let Some(title) = &document.title {
            self.line(0, &format!("title {title:?}"))?;
        }
        if let Some(author) = &document.author {
            self.line(0, &format!("author {author:?}"))?;
        }
        for section in &document.sections {
            self.write_section(section)?;
        }
        Ok(())
    }
}

/// Renders `document` into a string.
pub fn render_to_string(document: &Document) -> Result<String, RenderError> {
    let mut buffer = Vec::new();
    TextRenderer::new(&mut buffer).render(document)?;
    String::from_utf8(buffer).map_err(|_| RenderError::from("dump is not valid utf-8"))
}

fn push_points(parts: &mut Vec<String>, name: &str, value: f32) {
    if value != 0.0 {
        parts.push(format!("{name}={value:.1}"));
    }
}

fn format_notes(format: &ParagraphFormat) -> String {
    let mut parts: Vec<String> = Vec::new();
    if let Some(alignment) = format.alignment {
        parts.push(format!("align={alignment:?}"));
    }
    push_points(&mut parts, "left", format.left_indent);
    push_points(&mut parts, "right", format.right_indent);
    push_points(&mut parts, "first", format.first_line_indent);
    push_points(&mut parts, "before", format.space_before);
    push_points(&mut parts, "after", format.space_after);
    match format.line_spacing {
        LineSpacing::Single => {}
        LineSpacing::Exactly(points) => parts.push(format!("line=exact:{points:.1}")),
        LineSpacing::AtLeast(points) => parts.push(format!("line=min:{points:.1}")),
        LineSpacing::Multiple(factor) => parts.push(format!("line=multi:{factor:.2}")),
    }
    if format.keep_with_next {
        parts.push("keep-next".to_string());
    }
    if format.keep_together {
        parts.push("keep".to_string());
    }
    if let Some(widows) = format.widow_control {
        parts.push(format!("widows={widows}"));
    }
    if format.page_break_before {
        parts.push("break-before".to_string());
    }
    if let Some(level) = format.outline_level {
        parts.push(format!("outline={level:?}"));
    }
    if let Some(color) = format.shading {
        parts.push(format!("shading={color}"));
    }
    let borders = border_notes(&format.borders);
    if !borders.is_empty() {
        parts.push(borders);
    }
    for stop in &format.tab_stops {
        parts.push(format!(
            "tabstop={:.1}:{:?}:{:?}",
            stop.position, stop.alignment, stop.leader
        ));
    }
    let font = font_notes(&format.font);
    if !font.is_empty() {
        parts.push(format!("font[{font}]"));
    }
    parts.join(" ")
}

fn border_notes(borders: &BorderSet) -> String {
    let mut parts: Vec<String> = Vec::new();
    for (name, side) in [
        ("top", &borders.top),
        ("bottom", &borders.bottom),
        ("left", &borders.left),
        ("right", &borders.right),
    ] {
        if let Some(line) = side {
            parts.push(format!("border-{name}={:.1}", line.width));
        }
    }
    push_points(&mut parts, "dist-top", borders.distance_top);
    push_points(&mut parts, "dist-bottom", borders.distance_bottom);
    push_points(&mut parts, "dist-left", borders.distance_left);
    push_points(&mut parts, "dist-right", borders.distance_right);
    parts.join(" ")
}

fn font_notes(font: &FontSpec) -> String {
    let mut parts: Vec<String> = Vec::new();
    if let Some(name) = &font.name {
        parts.push(name.clone());
    }
    if let Some(size) = font.size {
        parts.push(format!("{size:.1}pt"));
    }
    if font.bold {
        parts.push("bold".to_string());
    }
    if font.italic {
        parts.push("italic".to_string());
    }
    if let Some(underline) = font.underline {
        parts.push(format!("underline={underline:?}"));
    }
    if let Some(color) = font.color {
        parts.push(format!("{color}"));
    }
    if font.superscript {
        parts.push("sup".to_string());
    }
    if font.subscript {
        parts.push("sub".to_string());
    }
    parts.join(" ")
}
