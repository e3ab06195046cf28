//! Flat output primitives for composed documents.
//!
//! This crate defines the renderer-facing side of the pipeline:
//! - the flat document model (sections, paragraphs with runs and
//!   formats, tables with rows, cells and edges),
//! - the `DocumentRenderer` trait rendering backends implement,
//! - a `TextRenderer` backend that dumps the structure as indented
//!   plain text.
//!
//! Everything here is fully resolved: dimensions are points, colors are
//! concrete, and no cascading remains to be done.

mod document;
mod error;
mod paragraph;
mod run;
mod table;
mod text;
mod traits;

pub use document::{BlockList, BodyElement, Document, HeaderFooter, PageSetup, Section};
pub use error::RenderError;
pub use paragraph::{
    BorderLine, BorderSet, LineSpacing, Paragraph, ParagraphFormat, TabAlignment, TabLeader,
    TabStop,
};
pub use run::{Field, FontSpec, Hyperlink, HyperlinkKind, ImageRun, Run};
pub use table::{Cell, Column, Edges, Row, Table};
pub use text::{TextRenderer, render_to_string};
pub use traits::DocumentRenderer;
