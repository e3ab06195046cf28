//! Tree-to-flat conversion.
//!
//! This crate walks a parsed document tree and resolves each element's
//! cascading style against a [`markflow_style::StyleManager`]. Margins,
//! paddings, backgrounds and borders are simulated on top of the flat
//! output model, which only knows indents, spacing and per-paragraph
//! shading. The result is a renderer-ready
//! [`Document`](markflow_render_core::Document).
//!
//! [`Converter`] is the entry point: construct it over a style set and
//! a tree, then call [`Converter::convert_into`] for a full document or
//! [`Converter::convert_fragment`] for header and footer content. A
//! [`ProviderSet`] supplies syntax highlighting and generated images,
//! and [`Hooks`] exposes callbacks that observe and adjust styling as
//! it is prepared and applied.

mod blocks;
mod boxmodel;
mod context;
mod error;
mod inline;
mod merge;
mod output;
mod plugin;
mod table;

pub use context::{
    ComposeOptions, Converter, Hooks, LiteralHook, StylingAppliedHook, StylingPreparedHook,
};
pub use error::ComposeError;
pub use plugin::{
    GeneratedImage, HighlightProvider, Highlighted, HighlightedSpan, ImageProvider, ProviderSet,
};
