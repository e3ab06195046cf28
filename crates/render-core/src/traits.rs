use crate::document::Document;
use crate::error::RenderError;

/// A trait for rendering backends, abstracting over the output format.
///
/// Backends receive a finished [`Document`] and walk it in one pass.
/// The document is borrowed, so a renderer can be run repeatedly or
/// several renderers can consume the same composition.
pub trait DocumentRenderer {
    fn render(&mut self, document: &Document) -> Result<(), RenderError>;
}
