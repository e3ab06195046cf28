//! Paragraph formatting properties of a cascading style.

use serde::{Deserialize, Serialize};

use crate::dimension::Dimension;

/// Horizontal alignment of paragraph text.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}

/// How the line spacing value of a paragraph is interpreted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum LineSpacingRule {
    Single,
    OnePtFive,
    Double,
    AtLeast,
    Exactly,
    Multiple,
}

/// Position of a paragraph in the document outline, used for bookmarks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum OutlineLevel {
    BodyText,
    Level1,
    Level2,
    Level3,
    Level4,
    Level5,
    Level6,
}

impl OutlineLevel {
    /// Outline level for a heading depth of 1 to 6.
    pub fn for_heading(level: u8) -> Self {
        match level {
            0 | 1 => OutlineLevel::Level1,
            2 => OutlineLevel::Level2,
            3 => OutlineLevel::Level3,
            4 => OutlineLevel::Level4,
            5 => OutlineLevel::Level5,
            _ => OutlineLevel::Level6,
        }
    }
}

/// Paragraph layout flags and spacing. Unset fields inherit through the
/// cascade.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParagraphStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    #[serde(skip_serializing_if = "Dimension::is_empty")]
    pub first_line_indent: Dimension,
    #[serde(skip_serializing_if = "Dimension::is_empty")]
    pub line_spacing: Dimension,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_spacing_rule: Option<LineSpacingRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_break_before: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_together: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_with_next: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub widow_control: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline_level: Option<OutlineLevel>,
}

impl ParagraphStyle {
    pub fn is_empty(&self) -> bool {
        self.alignment.is_none()
            && self.first_line_indent.is_empty()
            && self.line_spacing.is_empty()
            && self.line_spacing_rule.is_none()
            && self.page_break_before.is_none()
            && self.keep_together.is_none()
            && self.keep_with_next.is_none()
            && self.widow_control.is_none()
            && self.outline_level.is_none()
    }

    pub fn apply_to(&self, base: &Self) -> Self {
        Self {
            alignment: self.alignment.or(base.alignment),
            first_line_indent: if self.first_line_indent.is_empty() {
                base.first_line_indent.clone()
            } else {
                self.first_line_indent.clone()
            },
            line_spacing: if self.line_spacing.is_empty() {
                base.line_spacing.clone()
            } else {
                self.line_spacing.clone()
            },
            line_spacing_rule: self.line_spacing_rule.or(base.line_spacing_rule),
            page_break_before: self.page_break_before.or(base.page_break_before),
            keep_together: self.keep_together.or(base.keep_together),
            keep_with_next: self.keep_with_next.or(base.keep_with_next),
            widow_control: self.widow_control.or(base.widow_control),
            outline_level: self.outline_level.or(base.outline_level),
        }
    }
}
