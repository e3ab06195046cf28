//! The markdown-shaped document tree consumed by the conversion pipeline.
//!
//! A [`Document`] owns the raw source text and the parsed block tree; nodes
//! carry optional byte spans back into the source. Besides the tree itself,
//! this crate recovers the `{…}` attribute text sitting in the gaps between
//! node spans (the parser consumes those runs) and offers the [`build`]
//! shorthand constructors used by tests and demos.

pub mod build;
pub mod source;
pub mod tree;

pub use source::{SourceError, Span};
pub use tree::{
    Block, ColumnDef, Document, HeadingMarkup, Inline, ListKind, TableCell, TableRow,
};
