//! Conversion errors.

use markflow_style::StyleError;
use thiserror::Error;

/// Hard failures while converting a document tree. Recoverable trouble
/// (unknown constructs, bad attribute values, plugin failures) is
/// reported as warnings instead and conversion continues.
#[derive(Debug, Error)]
pub enum ComposeError {
    #[error(transparent)]
    Style(#[from] StyleError),

    #[error("page width must be positive, got {width}pt")]
    PageWidth { width: f32 },
}
