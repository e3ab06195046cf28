//! Table properties of a cascading style.

use serde::{Deserialize, Serialize};

use markflow_types::Color;

use crate::dimension::Dimension;
use crate::font::FontStyle;
use crate::paragraph::Alignment;
use crate::spacing::BoxSpacing;

/// Placement of the whole table within its container.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum TableAlignment {
    Left,
    Center,
    Right,
}

/// Vertical alignment of cell content.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum VerticalAlignment {
    Top,
    Center,
    Bottom,
}

/// Style of one table column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableColumnStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal_alignment: Option<Alignment>,
    #[serde(skip_serializing_if = "Dimension::is_empty")]
    pub width: Dimension,
    #[serde(skip_serializing_if = "FontStyle::is_empty")]
    pub font: FontStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<Color>,
}

impl TableColumnStyle {
    pub fn apply_to(&self, base: &Self) -> Self {
        Self {
            horizontal_alignment: self.horizontal_alignment.or(base.horizontal_alignment),
            width: if self.width.is_empty() {
                base.width.clone()
            } else {
                self.width.clone()
            },
            font: self.font.apply_to(&base.font),
            background: self.background.or(base.background),
        }
    }
}

/// Table alignment, cell spacing, optional explicit width and the column
/// definitions. When the width is unset it is derived from the columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal_alignment: Option<TableAlignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_cell_alignment: Option<VerticalAlignment>,
    #[serde(skip_serializing_if = "BoxSpacing::is_empty")]
    pub cell_spacing: BoxSpacing,
    #[serde(skip_serializing_if = "Dimension::is_empty")]
    pub width: Dimension,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<TableColumnStyle>,
}

impl TableStyle {
    /// Appends a new column definition and returns it for configuration.
    pub fn add_column(&mut self) -> &mut TableColumnStyle {
        self.columns.push(TableColumnStyle::default());
        self.columns.last_mut().unwrap()
    }

    /// Style for the column at `index`. Indexes past the last defined
    /// column reuse the last definition; with no columns at all the
    /// default style is returned.
    pub fn column_style(&self, index: usize) -> TableColumnStyle {
        match self.columns.get(index) {
            Some(column) => column.clone(),
            None => self.columns.last().cloned().unwrap_or_default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.horizontal_alignment.is_none()
            && self.vertical_cell_alignment.is_none()
            && self.cell_spacing.is_empty()
            && self.width.is_empty()
            && self.columns.is_empty()
    }

    pub fn apply_to(&self, base: &Self) -> Self {
        let count = self.columns.len().max(base.columns.len());
        let mut columns = Vec::with_capacity(count);
        for i in 0..count {
            match (self.columns.get(i), base.columns.get(i)) {
                (Some(own), Some(under)) => columns.push(own.apply_to(under)),
                (Some(own), None) => columns.push(own.clone()),
                (None, Some(under)) => columns.push(under.clone()),
                (None, None) => {}
            }
        }
        Self {
            horizontal_alignment: self.horizontal_alignment.or(base.horizontal_alignment),
            vertical_cell_alignment: self
                .vertical_cell_alignment
                .or(base.vertical_cell_alignment),
            cell_spacing: self.cell_spacing.apply_to(&base.cell_spacing),
            width: if self.width.is_empty() {
                base.width.clone()
            } else {
                self.width.clone()
            },
            columns,
        }
    }
}
