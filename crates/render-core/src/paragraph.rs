//! Flat paragraphs and their format block.

use markflow_style::{Alignment, LineKind, OutlineLevel};
use markflow_types::Color;

use crate::run::{Field, FontSpec, Hyperlink, HyperlinkKind, ImageRun, Run};

/// Resolved line spacing of a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LineSpacing {
    #[default]
    Single,
    /// Exact line height in points. Filler paragraphs rely on this to render
    /// colored bands of a precise height.
    Exactly(f32),
    /// Minimum line height in points.
    AtLeast(f32),
    /// Multiple of the single line height.
    Multiple(f32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabAlignment {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TabLeader {
    #[default]
    None,
    Dots,
    Dashes,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TabStop {
    /// Position in points from the left text edge.
    pub position: f32,
    pub alignment: TabAlignment,
    pub leader: TabLeader,
}

/// One rendered border line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderLine {
    pub width: f32,
    pub line: LineKind,
    pub color: Option<Color>,
}

impl BorderLine {
    pub fn new(width: f32, line: LineKind, color: Option<Color>) -> Self {
        BorderLine { width, line, color }
    }
}

/// Per-side borders plus the text-to-border distances the box model uses to
/// express padding.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BorderSet {
    pub top: Option<BorderLine>,
    pub bottom: Option<BorderLine>,
    pub left: Option<BorderLine>,
    pub right: Option<BorderLine>,
    pub distance_top: f32,
    pub distance_bottom: f32,
    pub distance_left: f32,
    pub distance_right: f32,
}

impl BorderSet {
    pub fn is_empty(&self) -> bool {
        self.top.is_none()
            && self.bottom.is_none()
            && self.left.is_none()
            && self.right.is_none()
            && self.distance_top == 0.0
            && self.distance_bottom == 0.0
            && self.distance_left == 0.0
            && self.distance_right == 0.0
    }
}

/// Paragraph-level format. Everything is pre-evaluated to points; `None` and
/// zero values leave the renderer default in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParagraphFormat {
    /// Base character format for runs that do not carry their own.
    pub font: FontSpec,
    pub alignment: Option<Alignment>,
    pub left_indent: f32,
    pub right_indent: f32,
    pub first_line_indent: f32,
    pub space_before: f32,
    pub space_after: f32,
    pub line_spacing: LineSpacing,
    pub keep_with_next: bool,
    pub keep_together: bool,
    /// `None` leaves widow and orphan handling to the renderer.
    pub widow_control: Option<bool>,
    pub page_break_before: bool,
    pub outline_level: Option<OutlineLevel>,
    pub shading: Option<Color>,
    pub borders: BorderSet,
    pub tab_stops: Vec<TabStop>,
}

impl ParagraphFormat {
    pub fn add_tab_stop(&mut self, position: f32, alignment: TabAlignment, leader: TabLeader) {
        self.tab_stops.push(TabStop { position, alignment, leader });
    }
}

/// A flat paragraph: a format block plus inline runs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paragraph {
    pub format: ParagraphFormat,
    pub runs: Vec<Run>,
}

impl Paragraph {
    pub fn add_text(&mut self, text: impl Into<String>) {
        self.runs.push(Run::Text { text: text.into(), font: FontSpec::default() });
    }

    pub fn add_formatted_text(&mut self, text: impl Into<String>, font: FontSpec) {
        self.runs.push(Run::Text { text: text.into(), font });
    }

    pub fn add_bookmark(&mut self, id: impl Into<String>) {
        self.runs.push(Run::Bookmark { id: id.into() });
    }

    pub fn add_hyperlink(
        &mut self,
        target: impl Into<String>,
        kind: HyperlinkKind,
    ) -> &mut Hyperlink {
        self.runs.push(Run::Hyperlink(Hyperlink::new(target, kind)));
        match self.runs.last_mut() {
            Some(Run::Hyperlink(link)) => link,
            _ => unreachable!(),
        }
    }

    pub fn add_image(&mut self, path: impl Into<String>) -> &mut ImageRun {
        self.runs.push(Run::Image(ImageRun::new(path)));
        match self.runs.last_mut() {
            Some(Run::Image(image)) => image,
            _ => unreachable!(),
        }
    }

    pub fn add_page_field(&mut self) {
        self.runs.push(Run::Field(Field::Page));
    }

    pub fn add_page_count_field(&mut self) {
        self.runs.push(Run::Field(Field::PageCount));
    }

    pub fn add_page_ref_field(&mut self, target: impl Into<String>) {
        self.runs.push(Run::Field(Field::PageRef { target: target.into() }));
    }

    pub fn add_section_label_field(&mut self) {
        self.runs.push(Run::Field(Field::SectionLabel));
    }

    pub fn add_tab(&mut self) {
        self.runs.push(Run::Tab);
    }

    pub fn add_line_break(&mut self) {
        self.runs.push(Run::LineBreak);
    }

    pub fn add_space(&mut self, count: usize) {
        self.runs.push(Run::Space { count });
    }

    /// Concatenated literal text of all runs.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(Run::plain_text).collect::<Vec<_>>().concat()
    }

    /// True when the paragraph carries no visible content, only format.
    pub fn is_filler(&self) -> bool {
        self.runs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_hyperlink_text_shows_in_plain_text() {
        let mut par = Paragraph::default();
        par.add_text("see ");
        let link = par.add_hyperlink("https://example.org", HyperlinkKind::Web);
        link.add_text("the site");
        par.add_bookmark("anchor");
        assert_eq!(par.plain_text(), "see the site");
        assert!(!par.is_filler());
    }

    #[test]
    fn empty_paragraphs_count_as_fillers() {
        let mut par = Paragraph::default();
        assert!(par.is_filler());
        par.format.shading = Some(Color::rgb(200, 200, 200));
        par.format.line_spacing = LineSpacing::Exactly(6.0);
        assert!(par.is_filler());
        par.add_text("x");
        assert!(!par.is_filler());
    }
}
