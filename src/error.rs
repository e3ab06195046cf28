//! The session-level error type.

use markflow_compose::ComposeError;
use markflow_render_core::RenderError;
use markflow_style::StyleError;
use thiserror::Error;

/// Everything a [`Composer`](crate::Composer) call can fail with, plus
/// the renderer side, so a session and the backend it feeds share one
/// error path.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Style(#[from] StyleError),

    #[error(transparent)]
    Compose(#[from] ComposeError),

    #[error("style overlay is not valid JSON: {0}")]
    Overlay(#[from] serde_json::Error),

    #[error(transparent)]
    Render(#[from] RenderError),
}
