pub mod attributes;
pub mod border;
pub mod bullet;
pub mod cascading;
pub mod descriptor;
pub mod dimension;
pub mod error;
pub mod font;
pub mod manager;
pub mod paragraph;
pub mod parsers;
pub mod selector;
pub mod spacing;
pub mod table;

pub use attributes::ElementAttributes;
pub use border::{BorderStyle, LineKind, SingleBorderStyle};
pub use bullet::{BulletStyle, SingleBulletStyle};
pub use cascading::{CascadingStyle, SharedStyle};
pub use descriptor::{ElementPosition, SingleElementDescriptor, StylingDescriptor};
pub use dimension::{Dimension, LengthUnit};
pub use error::StyleError;
pub use font::{FontStyle, Underline};
pub use manager::{StyleManager, StyleModifier, UNDEFINED_STYLE};
pub use paragraph::{Alignment, LineSpacingRule, OutlineLevel, ParagraphStyle};
pub use parsers::StyleParseError;
pub use selector::{SelectorBuilder, SelectorStep, StepKind};
pub use spacing::BoxSpacing;
pub use table::{TableAlignment, TableColumnStyle, TableStyle, VerticalAlignment};
