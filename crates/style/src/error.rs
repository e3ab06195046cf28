use crate::parsers::StyleParseError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StyleError {
    #[error(
        "invalid dimension evaluation context: font size {font_size} and container width {container_width} must both be positive"
    )]
    EvalContext { font_size: f32, container_width: f32 },

    #[error("unknown style '{0}'")]
    UnknownStyle(String),

    #[error("style '{0}' is already registered")]
    StyleExists(String),

    #[error("base style cycle through '{0}'")]
    BaseCycle(String),

    #[error(transparent)]
    Parse(#[from] StyleParseError),
}
