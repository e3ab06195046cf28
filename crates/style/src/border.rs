//! Border properties for leaf blocks, tables and table cells.

use serde::{Deserialize, Serialize};

use markflow_types::{BoxSide, Color};

use crate::dimension::Dimension;

/// Stroke pattern of a border line.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum LineKind {
    None,
    Single,
    Dot,
    Dash,
    DashDot,
    DashDotDot,
}

/// Border of one side of a box.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SingleBorderStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<LineKind>,
    #[serde(skip_serializing_if = "Dimension::is_empty")]
    pub width: Dimension,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

impl SingleBorderStyle {
    /// A side takes effect only once its width is set.
    pub fn has_value(&self) -> bool {
        !self.width.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.line.is_none() && self.width.is_empty() && self.color.is_none()
    }

    pub fn apply_to(&self, base: &Self) -> Self {
        Self {
            line: self.line.or(base.line),
            width: if self.width.is_empty() {
                base.width.clone()
            } else {
                self.width.clone()
            },
            color: self.color.or(base.color),
        }
    }
}

/// Borders of all four sides plus shared defaults.
///
/// The shared width, color and line kind act as a shorthand: setting one
/// of them also fills every side that has no own value yet, so a later
/// per-side tweak only overrides the side it names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BorderStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<LineKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<Color>,
    #[serde(skip_serializing_if = "Dimension::is_empty")]
    width: Dimension,
    #[serde(skip_serializing_if = "SingleBorderStyle::is_empty")]
    pub top: SingleBorderStyle,
    #[serde(skip_serializing_if = "SingleBorderStyle::is_empty")]
    pub bottom: SingleBorderStyle,
    #[serde(skip_serializing_if = "SingleBorderStyle::is_empty")]
    pub left: SingleBorderStyle,
    #[serde(skip_serializing_if = "SingleBorderStyle::is_empty")]
    pub right: SingleBorderStyle,
}

impl BorderStyle {
    pub fn line(&self) -> Option<LineKind> {
        self.line
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn width(&self) -> &Dimension {
        &self.width
    }

    pub fn set_width(&mut self, value: Dimension) {
        for side in BoxSide::ALL {
            let own = &mut self.side_mut(side).width;
            if own.is_empty() {
                *own = value.clone();
            }
        }
        self.width = value;
    }

    pub fn set_color(&mut self, value: Color) {
        for side in BoxSide::ALL {
            let own = &mut self.side_mut(side).color;
            if own.is_none() {
                *own = Some(value);
            }
        }
        self.color = Some(value);
    }

    pub fn set_line(&mut self, value: LineKind) {
        for side in BoxSide::ALL {
            let own = &mut self.side_mut(side).line;
            if own.is_none() {
                *own = Some(value);
            }
        }
        self.line = Some(value);
    }

    pub fn side(&self, side: BoxSide) -> &SingleBorderStyle {
        match side {
            BoxSide::Top => &self.top,
            BoxSide::Bottom => &self.bottom,
            BoxSide::Left => &self.left,
            BoxSide::Right => &self.right,
        }
    }

    fn side_mut(&mut self, side: BoxSide) -> &mut SingleBorderStyle {
        match side {
            BoxSide::Top => &mut self.top,
            BoxSide::Bottom => &mut self.bottom,
            BoxSide::Left => &mut self.left,
            BoxSide::Right => &mut self.right,
        }
    }

    /// Tests whether the shared border is set, ignoring per-side values.
    pub fn has_value(&self) -> bool {
        !self.width.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.line.is_none()
            && self.color.is_none()
            && self.width.is_empty()
            && self.top.is_empty()
            && self.bottom.is_empty()
            && self.left.is_empty()
            && self.right.is_empty()
    }

    pub fn apply_to(&self, base: &Self) -> Self {
        Self {
            line: self.line.or(base.line),
            color: self.color.or(base.color),
            width: if self.width.is_empty() {
                base.width.clone()
            } else {
                self.width.clone()
            },
            top: self.top.apply_to(&base.top),
            bottom: self.bottom.apply_to(&base.bottom),
            left: self.left.apply_to(&base.left),
            right: self.right.apply_to(&base.right),
        }
    }
}
