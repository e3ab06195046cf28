use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a recoverable conversion problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WarningKind {
    /// Missing or malformed source span data, attribute text skipped.
    Structure,
    /// An element kind the converter does not handle.
    Unsupported,
    /// Invalid table geometry or column widths.
    Table,
    /// A dimension string that failed to parse or evaluate.
    Dimension,
    /// Image data that could not be read or measured.
    Image,
    /// A highlighting or image provider returned an error.
    Plugin,
    /// Style registry misuse detected while converting.
    Styling,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WarningKind::Structure => "structure",
            WarningKind::Unsupported => "unsupported",
            WarningKind::Table => "table",
            WarningKind::Dimension => "dimension",
            WarningKind::Image => "image",
            WarningKind::Plugin => "plugin",
            WarningKind::Styling => "styling",
        };
        f.write_str(name)
    }
}

/// A non-fatal conversion diagnostic surfaced to observers.
///
/// Warnings never abort the run; malformed input degrades to a sensible
/// fallback and the condition is reported here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}
