pub mod color;
pub mod element;
pub mod side;
pub mod warning;

pub use color::Color;
pub use element::ElementType;
pub use side::BoxSide;
pub use warning::{Warning, WarningKind};
