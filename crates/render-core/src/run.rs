//! Inline content of a flat paragraph.

use markflow_style::Underline;
use markflow_types::Color;

/// A fully resolved character format. Unset fields mean "renderer default";
/// by the time runs are emitted all cascading has already happened.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FontSpec {
    pub name: Option<String>,
    /// Size in points.
    pub size: Option<f32>,
    pub bold: bool,
    pub italic: bool,
    pub underline: Option<Underline>,
    pub color: Option<Color>,
    pub superscript: bool,
    pub subscript: bool,
}

impl FontSpec {
    pub fn sized(size: f32) -> Self {
        FontSpec { size: Some(size), ..FontSpec::default() }
    }
}

/// Hyperlink target flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HyperlinkKind {
    /// A bookmark inside the document.
    Local,
    /// An external URL.
    Web,
}

/// A generated field the renderer resolves at pagination time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    /// Current page number.
    Page,
    /// Total page count.
    PageCount,
    /// Page number of the named bookmark.
    PageRef { target: String },
    /// The label of the current section.
    SectionLabel,
}

/// A hyperlink wrapping nested runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Hyperlink {
    pub target: String,
    pub kind: HyperlinkKind,
    /// Character format applied to the nested runs unless they override it.
    pub font: FontSpec,
    pub runs: Vec<Run>,
}

impl Hyperlink {
    pub fn new(target: impl Into<String>, kind: HyperlinkKind) -> Self {
        Hyperlink { target: target.into(), kind, font: FontSpec::default(), runs: Vec::new() }
    }

    pub fn add_text(&mut self, text: impl Into<String>) {
        self.runs.push(Run::Text { text: text.into(), font: self.font.clone() });
    }

    pub fn add_formatted_text(&mut self, text: impl Into<String>, font: FontSpec) {
        self.runs.push(Run::Text { text: text.into(), font });
    }

    pub fn add_tab(&mut self) {
        self.runs.push(Run::Tab);
    }

    pub fn add_page_ref_field(&mut self, target: impl Into<String>) {
        self.runs.push(Run::Field(Field::PageRef { target: target.into() }));
    }
}

/// An inline image placed in the text flow.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRun {
    pub path: String,
    /// Width in points, when fixed by attributes or style.
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub dpi: Option<f32>,
}

impl ImageRun {
    pub fn new(path: impl Into<String>) -> Self {
        ImageRun { path: path.into(), width: None, height: None, dpi: None }
    }
}

/// One piece of inline content.
#[derive(Debug, Clone, PartialEq)]
pub enum Run {
    Text { text: String, font: FontSpec },
    Bookmark { id: String },
    Hyperlink(Hyperlink),
    Image(ImageRun),
    Field(Field),
    Tab,
    LineBreak,
    /// A run of non-collapsing spaces, as code conversion emits them.
    Space { count: usize },
}

impl Run {
    /// Literal text this run contributes, fields and images excluded.
    pub fn plain_text(&self) -> String {
        match self {
            Run::Text { text, .. } => text.clone(),
            Run::Hyperlink(link) => {
                link.runs.iter().map(Run::plain_text).collect::<Vec<_>>().concat()
            }
            Run::Tab => "\t".to_string(),
            Run::LineBreak => "\n".to_string(),
            Run::Space { count } => " ".repeat(*count),
            _ => String::new(),
        }
    }
}
