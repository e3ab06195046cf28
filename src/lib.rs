//! Style-cascade resolution and box-model flattening for parsed
//! markdown-like documents.
//!
//! The pipeline takes a [`Tree`] of block and inline nodes, resolves a
//! cascading style per element through selector bindings, simulates the
//! nested box model, and emits a flat [`Document`] of paragraphs and
//! tables that renderers consume one primitive at a time.
//!
//! A [`Composer`] is the front door: it owns the style registry with
//! the built-in defaults, collects content and page settings, and
//! produces the flat document.
//!
//! ```
//! use markflow::{build, Composer, Tree};
//!
//! # fn main() -> Result<(), markflow::PipelineError> {
//! let mut session = Composer::new()?;
//! session.set_title("Field Notes").append(Tree::from_blocks(vec![
//!     build::heading(1, "Day One"),
//!     build::paragraph("Nothing but rain."),
//! ]));
//!
//! let document = session.compose()?;
//! let dump = markflow::render_to_string(&document)?;
//! assert!(dump.contains("Day One"));
//! # Ok(())
//! # }
//! ```

mod composer;
mod error;
mod page;

pub mod defaults;
pub mod style_names;

pub use composer::Composer;
pub use error::PipelineError;
pub use page::{PaperOrientation, PaperSize};

pub use markflow_compose::{
    ComposeError, ComposeOptions, GeneratedImage, HighlightProvider, Highlighted, HighlightedSpan,
    ImageProvider,
};
pub use markflow_doc::{
    Block, ColumnDef, Document as Tree, HeadingMarkup, Inline, ListKind, Span, TableCell, TableRow,
    build,
};
pub use markflow_render_core::{
    BlockList, BodyElement, BorderLine, BorderSet, Cell, Column, Document, DocumentRenderer,
    Edges, Field, FontSpec, HeaderFooter, Hyperlink, HyperlinkKind, ImageRun, LineSpacing,
    PageSetup, Paragraph, ParagraphFormat, RenderError, Row, Run, Section, TabAlignment,
    TabLeader, TabStop, Table, TextRenderer, render_to_string,
};
pub use markflow_style::{
    Alignment, BoxSpacing, CascadingStyle, Dimension, LineKind, OutlineLevel, SharedStyle,
    StyleError, StyleManager, StylingDescriptor, TableAlignment, Underline, VerticalAlignment,
};
pub use markflow_types::{Color, ElementType, Warning, WarningKind};
