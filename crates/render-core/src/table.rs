//! Flat table primitives.

use markflow_style::{LineKind, TableAlignment, VerticalAlignment};
use markflow_types::Color;

use crate::document::BlockList;
use crate::paragraph::{BorderLine, BorderSet};

/// One table column. Widths are resolved points.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Column {
    pub width: f32,
}

/// One table row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    /// Heading rows repeat at the top of every page the table spans.
    pub heading: bool,
    /// Fixed row height in points. `None` sizes the row to content.
    pub height: Option<f32>,
    pub shading: Option<Color>,
    pub cells: Vec<Cell>,
}

impl Row {
    /// Appends an empty cell and returns it for filling.
    pub fn add_cell(&mut self) -> &mut Cell {
        self.cells.push(Cell::default());
        match self.cells.last_mut() {
            Some(cell) => cell,
            None => unreachable!(),
        }
    }
}

/// One table cell. Content is a full block list, so a cell can hold
/// paragraphs and nested tables.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub content: BlockList,
    pub col_span: usize,
    pub row_span: usize,
    pub shading: Option<Color>,
    pub borders: BorderSet,
    pub vertical_alignment: Option<VerticalAlignment>,
}

impl Default for Cell {
    fn default() -> Self {
        Cell {
            content: BlockList::new(),
            col_span: 1,
            row_span: 1,
            shading: None,
            borders: BorderSet::default(),
            vertical_alignment: None,
        }
    }
}

/// Which sides of a cell range [`Table::set_edge`] touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edges {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl Edges {
    /// The outer boundary of the range.
    pub const BOX: Edges = Edges {
        top: true,
        bottom: true,
        left: true,
        right: true,
    };
}

/// A flat table.
///
/// The `padding_*` fields are the default gap between a cell border and
/// its content; `borders` is the default border set cells start from.
/// Specific ranges get their outline via [`Table::set_edge`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
    pub alignment: Option<TableAlignment>,
    /// Indent of the table from the left edge of its container.
    pub left_indent: f32,
    pub padding_left: f32,
    pub padding_right: f32,
    pub padding_top: f32,
    pub padding_bottom: f32,
    pub shading: Option<Color>,
    pub borders: BorderSet,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_column(&mut self, width: f32) -> &mut Column {
        self.columns.push(Column { width });
        match self.columns.last_mut() {
            Some(column) => column,
            None => unreachable!(),
        }
    }

    pub fn add_row(&mut self) -> &mut Row {
        self.rows.push(Row::default());
        match self.rows.last_mut() {
            Some(row) => row,
            None => unreachable!(),
        }
    }

    /// Applies a border to the requested sides of the cell range
    /// `n_cols` wide and `n_rows` high starting at (`col`, `row`).
    ///
    /// Only cells on the boundary of the range are touched: the top
    /// side goes on the first row of the range, the bottom side on the
    /// last, and so on. Positions outside the table are ignored, so a
    /// range may safely overshoot ragged rows.
    #[allow(clippy::too_many_arguments)]
    pub fn set_edge(
        &mut self,
        col: usize,
        row: usize,
        n_cols: usize,
        n_rows: usize,
        edges: Edges,
        line: LineKind,
        width: f32,
        color: Option<Color>,
    ) {
        if n_cols == 0 || n_rows == 0 {
            return;
        }
        let border = BorderLine::new(width, line, color);
        for r in row..row + n_rows {
            let Some(out_row) = self.rows.get_mut(r) else {
                continue;
            };
            for c in col..col + n_cols {
                let Some(cell) = out_row.cells.get_mut(c) else {
                    continue;
                };
                if edges.top && r == row {
                    cell.borders.top = Some(border.clone());
                }
                if edges.bottom && r + 1 == row + n_rows {
                    cell.borders.bottom = Some(border.clone());
                }
                if edges.left && c == col {
                    cell.borders.left = Some(border.clone());
                }
                if edges.right && c + 1 == col + n_cols {
                    cell.borders.right = Some(border.clone());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(n_cols: usize, n_rows: usize) -> Table {
        let mut table = Table::new();
        for _ in 0..n_cols {
            table.add_column(100.0);
        }
        for _ in 0..n_rows {
            let row = table.add_row();
            for _ in 0..n_cols {
                row.add_cell();
            }
        }
        table
    }

    #[test]
    fn box_edge_outlines_the_range_and_skips_the_interior() {
        let mut table = grid(3, 3);
        table.set_edge(0, 1, 3, 2, Edges::BOX, LineKind::Single, 0.5, None);

        let top_left = &table.rows[1].cells[0].borders;
        assert!(top_left.top.is_some());
        assert!(top_left.left.is_some());
        assert!(top_left.bottom.is_none());
        assert!(top_left.right.is_none());

        let bottom_right = &table.rows[2].cells[2].borders;
        assert!(bottom_right.bottom.is_some());
        assert!(bottom_right.right.is_some());
        assert!(bottom_right.top.is_none());

        let untouched = &table.rows[0].cells[1].borders;
        assert!(untouched.is_empty());

        let middle = &table.rows[1].cells[1].borders;
        assert!(middle.top.is_some());
        assert!(middle.left.is_none());
        assert!(middle.right.is_none());
    }

    #[test]
    fn ranges_past_the_table_are_ignored() {
        let mut table = grid(2, 1);
        table.set_edge(0, 0, 5, 4, Edges::BOX, LineKind::Single, 1.0, None);
        assert!(table.rows[0].cells[0].borders.top.is_some());
        assert!(table.rows[0].cells[1].borders.top.is_some());
        // The bottom of the range lies past the last row, so nothing
        // receives a bottom border.
        assert!(table.rows[0].cells[0].borders.bottom.is_none());
    }
}
