//! Bullet and numbering properties for list items, footnotes and
//! thematic breaks.

use serde::{Deserialize, Serialize};

use crate::dimension::Dimension;
use crate::font::FontStyle;

/// One bullet variant: the marker text and its font. For numbered items
/// the content is appended after the number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SingleBulletStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "FontStyle::is_empty")]
    pub font: FontStyle,
}

impl SingleBulletStyle {
    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.font.is_empty()
    }

    pub fn apply_to(&self, base: &Self) -> Self {
        Self {
            content: self.content.clone().or_else(|| base.content.clone()),
            font: self.font.apply_to(&base.font),
        }
    }
}

/// Bullet variants plus the two indents that place bullet and item text.
///
/// `bullet_indent` positions the right edge of the marker; a longer
/// marker grows to the left. `text_indent` positions the item text
/// relative to the line start.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BulletStyle {
    #[serde(skip_serializing_if = "SingleBulletStyle::is_empty")]
    pub normal: SingleBulletStyle,
    #[serde(skip_serializing_if = "SingleBulletStyle::is_empty")]
    pub unchecked: SingleBulletStyle,
    #[serde(skip_serializing_if = "SingleBulletStyle::is_empty")]
    pub checked: SingleBulletStyle,
    #[serde(skip_serializing_if = "Dimension::is_empty")]
    pub bullet_indent: Dimension,
    #[serde(skip_serializing_if = "Dimension::is_empty")]
    pub text_indent: Dimension,
}

impl BulletStyle {
    pub fn is_empty(&self) -> bool {
        self.normal.is_empty()
            && self.unchecked.is_empty()
            && self.checked.is_empty()
            && self.bullet_indent.is_empty()
            && self.text_indent.is_empty()
    }

    pub fn apply_to(&self, base: &Self) -> Self {
        Self {
            normal: self.normal.apply_to(&base.normal),
            unchecked: self.unchecked.apply_to(&base.unchecked),
            checked: self.checked.apply_to(&base.checked),
            bullet_indent: if self.bullet_indent.is_empty() {
                base.bullet_indent.clone()
            } else {
                self.bullet_indent.clone()
            },
            text_indent: if self.text_indent.is_empty() {
                base.text_indent.clone()
            } else {
                self.text_indent.clone()
            },
        }
    }
}
