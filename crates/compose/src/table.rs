//! Table conversion.
//!
//! A parsed table becomes one flat [`Table`] with resolved column
//! widths. Styling runs through the same scope machinery as block
//! containers: rows resolve under the table's scope and each cell
//! converts as a standalone scope into its own block list.
//!
//! The flat model has no side padding on tables, only a left indent
//! and per-cell spacing, so side padding folds into the margins up
//! front. Vertical margins render as synthetic rows carrying the
//! table background, which keeps a painted table's color running
//! across the gap above and below the grid.

use markflow_doc::{ColumnDef, Span, TableCell, TableRow};
use markflow_render_core::{Edges, Row, Table};
use markflow_style::{
    Dimension, ElementPosition, LineKind, SingleElementDescriptor, StyleError, TableAlignment,
    TableColumnStyle,
};
use markflow_types::{BoxSide, Color, ElementType, WarningKind};

use crate::blocks::{self, Prepared};
use crate::boxmodel;
use crate::context::{Converter, Scope};
use crate::error::ComposeError;
use crate::merge;
use crate::output::Target;

#[allow(clippy::too_many_arguments)]
pub(crate) fn convert_table<'a>(
    cv: &mut Converter<'a>,
    span: Option<Span>,
    columns: &'a [ColumnDef],
    rows: &'a [TableRow],
    position: ElementPosition,
    prev_span: Option<Span>,
    parent_span: Option<Span>,
    target: &mut Target<'_>,
) -> Result<(), ComposeError> {
    let attributes = blocks::container_attributes(cv, span, prev_span, parent_span);
    let descriptor = SingleElementDescriptor {
        element_type: ElementType::Table,
        attributes,
        position,
        plain_text: None,
    };
    let mut prepared = blocks::prepare(cv, descriptor, false)?;

    let line = cv.line_of(span);
    let parent_width = cv.scope().width;
    let width_set = adjust_table_style(cv, &mut prepared, parent_width, line)?;
    let attribute_widths = attribute_column_widths(cv, &prepared, line);
    blocks::run_prepared_hook(cv, &mut prepared);
    let Prepared { mut scope, .. } = prepared;

    let top_marginal = boxmodel::is_marginal(&scope, BoxSide::Top);
    let bottom_marginal = boxmodel::is_marginal(&scope, BoxSide::Bottom);
    let top = boxmodel::pending_stripes(
        &mut scope.style,
        &cv.scopes,
        BoxSide::Top,
        top_marginal,
        scope.font_size,
        scope.width,
    )?;
    let bottom = boxmodel::pending_stripes(
        &mut scope.style,
        &cv.scopes,
        BoxSide::Bottom,
        bottom_marginal,
        scope.font_size,
        scope.width,
    )?;
    boxmodel::normalize_vertical(&mut scope.style);

    boxmodel::emit_fillers(
        target.blocks(),
        &top,
        BoxSide::Top,
        &scope.style,
        scope.font_size,
        scope.width,
    )?;

    let widths = column_point_widths(&scope, columns, rows, attribute_widths, width_set)?;
    let font_size = scope.font_size;
    let width = scope.width;
    let top_margin = scope.style.margin.top.eval(font_size, width)?;
    let bottom_margin = scope.style.margin.bottom.eval(font_size, width)?;

    let out = target.blocks().add_table();
    out.alignment = scope.style.table.horizontal_alignment;
    out.left_indent = scope.style.margin.left.eval(font_size, width)?;
    out.padding_left = scope.style.table.cell_spacing.left.eval(font_size, width)?;
    out.padding_right = scope.style.table.cell_spacing.right.eval(font_size, width)?;
    out.padding_top = scope.style.table.cell_spacing.top.eval(font_size, width)?;
    out.padding_bottom = scope.style.table.cell_spacing.bottom.eval(font_size, width)?;
    out.shading = scope.style.background;
    for column_width in &widths {
        out.add_column(*column_width);
    }

    let has_top_band = add_margin_row(out, scope.style.background, top_margin, true);

    cv.scopes.push(scope);
    let filled = convert_rows(cv, rows, columns, widths.len(), out);
    let scope = match cv.scopes.pop() {
        Some(scope) => scope,
        None => unreachable!(),
    };
    filled?;

    let has_bottom_band = add_margin_row(out, scope.style.background, bottom_margin, false);

    // The border box wraps the real grid only, never the margin bands.
    if !scope
        .style
        .border
        .width()
        .is_empty_or_zero(font_size, width)?
    {
        let first = usize::from(has_top_band);
        let count = out.rows.len() - first - usize::from(has_bottom_band);
        out.set_edge(
            0,
            first,
            out.columns.len(),
            count,
            Edges::BOX,
            scope.style.border.line().unwrap_or(LineKind::Single),
            scope.style.border.width().eval(font_size, width)?,
            scope.style.border.color(),
        );
    }

    boxmodel::emit_fillers(
        target.blocks(),
        &bottom,
        BoxSide::Bottom,
        &scope.style,
        font_size,
        width,
    )?;
    Ok(())
}

/// Table-specific styling adjustments, run between the shared
/// preparation and the styling-prepared hook.
///
/// Side padding folds into the side margins since the flat table only
/// carries a left indent. A width from the style's table section or a
/// `width` attribute replaces the derived content width; the returned
/// flag records that the width was explicit, so column scaling later
/// squeezes the columns into it even when they would fit.
fn adjust_table_style(
    cv: &mut Converter<'_>,
    prepared: &mut Prepared,
    parent_width: f32,
    line: usize,
) -> Result<bool, ComposeError> {
    let scope = &mut prepared.scope;
    scope.style.margin.left = scope.style.margin.left.clone() + scope.style.padding.left.clone();
    scope.style.margin.right = scope.style.margin.right.clone() + scope.style.padding.right.clone();
    scope.style.padding.left = Dimension::pt(0.0);
    scope.style.padding.right = Dimension::pt(0.0);

    let mut width_set = false;
    if !scope.style.table.width.is_empty() {
        scope.width = scope.style.table.width.eval(scope.font_size, parent_width)?;
        width_set = true;
    }

    let alignment = match scope.descriptor.attributes.get("align") {
        Some("left") => Some(TableAlignment::Left),
        Some("right") => Some(TableAlignment::Right),
        Some("center") => Some(TableAlignment::Center),
        _ => None,
    };
    if let Some(alignment) = alignment {
        scope.style.table.horizontal_alignment = Some(alignment);
    }

    if let Some(value) = scope.descriptor.attributes.get("width").map(str::to_owned) {
        let evaluated = value
            .parse::<Dimension>()
            .map_err(StyleError::from)
            .and_then(|parsed| parsed.eval(scope.font_size, parent_width));
        match evaluated {
            Ok(points) => {
                scope.width = points;
                width_set = true;
            }
            Err(err) => cv.warn(
                WarningKind::Table,
                format!("invalid width: {err}, line {line}"),
            ),
        }
    }
    Ok(width_set)
}

/// Column widths from a `columns` attribute, split on `;` or `,`. One
/// bad entry discards the whole list so the style's columns apply.
fn attribute_column_widths(
    cv: &mut Converter<'_>,
    prepared: &Prepared,
    line: usize,
) -> Option<Vec<Dimension>> {
    let value = prepared.scope.descriptor.attributes.get("columns")?;
    let mut widths = Vec::new();
    for part in value.split([';', ',']) {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        match part.parse::<Dimension>() {
            Ok(width) => widths.push(width),
            Err(err) => {
                cv.warn(
                    WarningKind::Table,
                    format!("invalid column width: {err}, line {line}"),
                );
                return None;
            }
        }
    }
    Some(widths)
}

/// Resolved column widths in points.
///
/// The column count comes from the first row's cells, spans included,
/// and falls back to the parsed column definitions for empty tables.
/// Attribute widths win over the style's columns; a column with no
/// width at all takes the full table width. The total scales down to
/// the table width when it overflows or when the width was explicit.
fn column_point_widths(
    scope: &Scope,
    columns: &[ColumnDef],
    rows: &[TableRow],
    attribute_widths: Option<Vec<Dimension>>,
    width_set: bool,
) -> Result<Vec<f32>, ComposeError> {
    let count = match rows.first() {
        Some(row) => row.cells.iter().map(|cell| cell.col_span.max(1)).sum(),
        None => columns.len(),
    };
    let mut points = Vec::with_capacity(count);
    for index in 0..count {
        let dimension = match &attribute_widths {
            Some(widths) => match widths.get(index.min(widths.len().saturating_sub(1))) {
                Some(width) => width.clone(),
                None => Dimension::percent(100.0),
            },
            None => {
                if scope.style.table.columns.is_empty() {
                    Dimension::percent(100.0)
                } else {
                    scope.style.table.column_style(index).width
                }
            }
        };
        points.push(dimension.eval(scope.font_size, scope.width)?);
    }

    let total: f32 = points.iter().sum();
    if total > 0.0 && (total > scope.width || width_set) {
        let scale = scope.width / total;
        for width in &mut points {
            *width *= scale;
        }
    }
    Ok(points)
}

/// A non-zero vertical margin renders as an extra row so the gap keeps
/// the table's background. Cell spacing already pads every row, so the
/// row height gives back what the spacing adds.
fn add_margin_row(out: &mut Table, background: Option<Color>, margin: f32, top: bool) -> bool {
    if margin == 0.0 {
        return false;
    }
    let inset = out.padding_top + out.padding_bottom;
    let row = out.add_row();
    row.heading = top;
    row.height = Some((margin - inset).max(0.0));
    row.shading = background;
    true
}

fn convert_rows<'a>(
    cv: &mut Converter<'a>,
    rows: &'a [TableRow],
    columns: &'a [ColumnDef],
    column_count: usize,
    out: &mut Table,
) -> Result<(), ComposeError> {
    let count = rows.len();
    let mut carry = vec![0usize; column_count];
    for (index, row) in rows.iter().enumerate() {
        convert_row(
            cv,
            row,
            ElementPosition::new(index, count),
            columns,
            &mut carry,
            out,
        )?;
    }
    Ok(())
}

fn convert_row<'a>(
    cv: &mut Converter<'a>,
    row: &'a TableRow,
    position: ElementPosition,
    columns: &'a [ColumnDef],
    carry: &mut [usize],
    out: &mut Table,
) -> Result<(), ComposeError> {
    let element_type = if row.header {
        ElementType::TableHeader
    } else if position.index % 2 == 1 {
        ElementType::TableRowOdd
    } else {
        ElementType::TableRowEven
    };
    let descriptor = SingleElementDescriptor {
        element_type,
        position,
        ..SingleElementDescriptor::default()
    };
    let mut prepared = blocks::prepare(cv, descriptor, false)?;
    if prepared.scope.style.table.vertical_cell_alignment.is_none() {
        prepared.scope.style.table.vertical_cell_alignment =
            cv.scope().style.table.vertical_cell_alignment;
    }
    blocks::run_prepared_hook(cv, &mut prepared);

    let out_row = out.add_row();
    out_row.heading = row.header;

    cv.scopes.push(prepared.scope);
    let filled = convert_cells(cv, row, columns, carry, out_row);
    cv.scopes.pop();
    filled
}

/// Converts one row's cells, keeping the output row positional.
///
/// Columns covered by a `row_span` from above and by a `col_span` to
/// the left still get placeholder cells: the border pass addresses
/// cells by column index.
fn convert_cells<'a>(
    cv: &mut Converter<'a>,
    row: &'a TableRow,
    columns: &'a [ColumnDef],
    carry: &mut [usize],
    out_row: &mut Row,
) -> Result<(), ComposeError> {
    let count = row.cells.len();
    let mut column = 0usize;
    for (index, cell) in row.cells.iter().enumerate() {
        while column < carry.len() && carry[column] > 0 {
            carry[column] -= 1;
            out_row.add_cell();
            column += 1;
        }

        let span_cols = cell.col_span.max(1);
        convert_cell(
            cv,
            cell,
            ElementPosition::new(index, count),
            columns,
            column,
            out_row,
        )?;
        if cell.row_span > 1 && column < carry.len() {
            let end = (column + span_cols).min(carry.len());
            for covered in &mut carry[column..end] {
                *covered = cell.row_span - 1;
            }
        }
        for _ in 1..span_cols {
            out_row.add_cell();
        }
        column += span_cols;
    }
    while column < carry.len() && carry[column] > 0 {
        carry[column] -= 1;
        out_row.add_cell();
        column += 1;
    }
    Ok(())
}

fn convert_cell<'a>(
    cv: &mut Converter<'a>,
    cell: &'a TableCell,
    position: ElementPosition,
    columns: &'a [ColumnDef],
    column: usize,
    out_row: &mut Row,
) -> Result<(), ComposeError> {
    let descriptor = SingleElementDescriptor {
        element_type: ElementType::TableCell,
        position,
        ..SingleElementDescriptor::default()
    };
    let mut prepared = blocks::prepare(cv, descriptor, false)?;

    let column_style = enclosing_column_style(cv, column);
    {
        let style = &mut prepared.scope.style;
        if style.table.vertical_cell_alignment.is_none() {
            style.table.vertical_cell_alignment = cv.scope().style.table.vertical_cell_alignment;
        }
        if style.background.is_none() {
            style.background = column_style.background;
        }
        style.font = column_style.font.apply_to(&style.font);
        style.border = style.border.apply_to(&cv.scope().style.border);
        if let Some(alignment) = columns.get(column).and_then(|def| def.alignment) {
            style.paragraph.alignment = Some(alignment);
        }
    }
    blocks::run_prepared_hook(cv, &mut prepared);
    let mut scope = prepared.scope;
    scope.standalone = true;

    let out_cell = out_row.add_cell();
    out_cell.col_span = cell.col_span.max(1);
    out_cell.row_span = cell.row_span.max(1);
    merge::merge_borders(
        &scope.style.border,
        &mut out_cell.borders,
        scope.font_size,
        scope.width,
    )?;
    out_cell.vertical_alignment = scope.style.table.vertical_cell_alignment;
    out_cell.shading = scope.style.background;

    cv.scopes.push(scope);
    let mut fragment = Target::Fragment(&mut out_cell.content);
    let filled = blocks::convert_blocks(cv, &cell.blocks, cell.span, &mut fragment);
    cv.scopes.pop();
    filled
}

/// Column styles hang off the table's style, one scope above the row a
/// cell is converted under.
fn enclosing_column_style(cv: &Converter<'_>, column: usize) -> TableColumnStyle {
    cv.scopes
        .len()
        .checked_sub(2)
        .and_then(|index| cv.scopes.get(index))
        .map(|table| table.style.table.column_style(column))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use markflow_doc::{Block, Document as Tree, Inline};
    use markflow_render_core::{BlockList, BodyElement, Document, Paragraph, Run};
    use markflow_style::{Alignment, StyleManager, VerticalAlignment};
    use markflow_types::Warning;

    use super::*;
    use crate::context::{ComposeOptions, Converter, Hooks};
    use crate::plugin::ProviderSet;

    fn cell(content: &str) -> TableCell {
        TableCell {
            blocks: vec![Block::Paragraph {
                span: None,
                inlines: vec![Inline::Text { span: None, text: content.to_string() }],
            }],
            ..TableCell::default()
        }
    }

    fn row(header: bool, cells: Vec<TableCell>) -> TableRow {
        TableRow { span: None, header, cells }
    }

    fn table_tree(columns: Vec<ColumnDef>, rows: Vec<TableRow>) -> Tree {
        Tree::from_blocks(vec![Block::Table { span: None, columns, rows }])
    }

    fn compose_with(styles: &StyleManager, tree: &Tree) -> (Document, Vec<Warning>) {
        let providers = ProviderSet::new();
        let mut hooks = Hooks::default();
        let options = ComposeOptions::default();
        let mut converter =
            Converter::new(styles, tree, &providers, &mut hooks, &options).unwrap();
        let mut document = Document::new();
        converter.convert_into(&mut document).unwrap();
        (document, converter.take_warnings())
    }

    fn body_table(document: &Document) -> &Table {
        match &document.sections[0].body.elements[0] {
            BodyElement::Table(table) => table,
            other => panic!("expected a table, got {other:?}"),
        }
    }

    fn first_paragraph(content: &BlockList) -> &Paragraph {
        match &content.elements[0] {
            BodyElement::Paragraph(paragraph) => paragraph,
            other => panic!("expected a paragraph, got {other:?}"),
        }
    }

    #[test]
    fn header_rows_repeat_and_stripes_alternate() {
        let mut styles = StyleManager::new();
        let stripe = styles.add_style("stripe");
        stripe.borrow_mut().background = Some(Color::rgb(0xEE, 0xEE, 0xEE));
        styles.for_element(ElementType::TableRowOdd).bind("stripe").unwrap();

        let tree = table_tree(
            vec![],
            vec![
                row(true, vec![cell("h1"), cell("h2")]),
                row(false, vec![cell("a"), cell("b")]),
                row(false, vec![cell("c"), cell("d")]),
            ],
        );
        let (document, warnings) = compose_with(&styles, &tree);
        assert!(warnings.is_empty());

        let table = body_table(&document);
        assert_eq!(table.rows.len(), 3);
        assert!(table.rows[0].heading);
        assert!(!table.rows[1].heading);
        assert_eq!(table.rows[1].cells[0].shading, Some(Color::rgb(0xEE, 0xEE, 0xEE)));
        assert_eq!(table.rows[2].cells[0].shading, None);
    }

    #[test]
    fn default_columns_share_the_width_evenly() {
        let tree = table_tree(vec![], vec![row(false, vec![cell("a"), cell("b")])]);
        let (document, warnings) = compose_with(&StyleManager::new(), &tree);
        assert!(warnings.is_empty());

        let table = body_table(&document);
        let body = ComposeOptions::default().page_width;
        assert_eq!(table.columns.len(), 2);
        assert!((table.columns[0].width - body / 2.0).abs() < 0.01);
        assert!((table.columns[1].width - body / 2.0).abs() < 0.01);
    }

    #[test]
    fn an_explicit_table_width_forces_column_scaling() {
        let mut styles = StyleManager::new();
        let fixed = styles.add_style("fixed");
        fixed.borrow_mut().table.width = Dimension::pt(100.0);
        styles.for_element(ElementType::Table).bind("fixed").unwrap();

        let tree = table_tree(vec![], vec![row(false, vec![cell("a"), cell("b")])]);
        let (document, _) = compose_with(&styles, &tree);

        let table = body_table(&document);
        assert!((table.columns[0].width - 50.0).abs() < 0.01);
        assert!((table.columns[1].width - 50.0).abs() < 0.01);
    }

    #[test]
    fn style_columns_set_their_own_widths() {
        let mut styles = StyleManager::new();
        let grid = styles.add_style("grid");
        {
            let mut style = grid.borrow_mut();
            style.table.add_column().width = Dimension::pt(40.0);
            style.table.add_column().width = Dimension::pt(80.0);
        }
        styles.for_element(ElementType::Table).bind("grid").unwrap();

        let tree = table_tree(vec![], vec![row(false, vec![cell("a"), cell("b")])]);
        let (document, _) = compose_with(&styles, &tree);

        let table = body_table(&document);
        assert!((table.columns[0].width - 40.0).abs() < 0.01);
        assert!((table.columns[1].width - 80.0).abs() < 0.01);
    }

    #[test]
    fn row_spans_reserve_their_columns_below() {
        let tree = table_tree(
            vec![],
            vec![
                row(false, vec![TableCell { row_span: 2, ..cell("tall") }, cell("top")]),
                row(false, vec![cell("under")]),
            ],
        );
        let (document, warnings) = compose_with(&StyleManager::new(), &tree);
        assert!(warnings.is_empty());

        let table = body_table(&document);
        assert_eq!(table.columns.len(), 2);
        assert_eq!(table.rows[0].cells[0].row_span, 2);
        assert_eq!(table.rows[1].cells.len(), 2);
        assert!(table.rows[1].cells[0].content.is_empty());
        assert!(!table.rows[1].cells[1].content.is_empty());
    }

    #[test]
    fn column_spans_pad_the_row_with_placeholders() {
        let tree = table_tree(
            vec![],
            vec![
                row(false, vec![TableCell { col_span: 2, ..cell("wide") }, cell("right")]),
                row(false, vec![cell("a"), cell("b"), cell("c")]),
            ],
        );
        let (document, _) = compose_with(&StyleManager::new(), &tree);

        let table = body_table(&document);
        assert_eq!(table.columns.len(), 3);
        assert_eq!(table.rows[0].cells.len(), 3);
        assert_eq!(table.rows[0].cells[0].col_span, 2);
        assert!(table.rows[0].cells[1].content.is_empty());
        assert!(!table.rows[0].cells[2].content.is_empty());
    }

    #[test]
    fn short_rows_stay_ragged() {
        let tree = table_tree(
            vec![],
            vec![
                row(false, vec![cell("a"), cell("b")]),
                row(false, vec![cell("only")]),
            ],
        );
        let (document, _) = compose_with(&StyleManager::new(), &tree);

        let table = body_table(&document);
        assert_eq!(table.columns.len(), 2);
        assert_eq!(table.rows[1].cells.len(), 1);
    }

    #[test]
    fn vertical_margins_become_background_rows() {
        let mut styles = StyleManager::new();
        let banner = styles.add_style("banner");
        {
            let mut style = banner.borrow_mut();
            style.background = Some(Color::rgb(0, 0, 0x80));
            style.margin.top = Dimension::pt(12.0);
            style.margin.bottom = Dimension::pt(6.0);
        }
        styles.for_element(ElementType::Table).bind("banner").unwrap();

        let tree = table_tree(vec![], vec![row(false, vec![cell("x")])]);
        let (document, warnings) = compose_with(&styles, &tree);
        assert!(warnings.is_empty());

        let table = body_table(&document);
        assert_eq!(table.rows.len(), 3);
        assert!(table.rows[0].heading);
        assert_eq!(table.rows[0].height, Some(12.0));
        assert_eq!(table.rows[0].shading, Some(Color::rgb(0, 0, 0x80)));
        assert!(table.rows[0].cells.is_empty());
        assert!(!table.rows[2].heading);
        assert_eq!(table.rows[2].height, Some(6.0));
    }

    #[test]
    fn the_border_box_skips_the_margin_rows() {
        let mut styles = StyleManager::new();
        let framed = styles.add_style("framed");
        {
            let mut style = framed.borrow_mut();
            style.border.set_width(Dimension::pt(1.0));
            style.margin.top = Dimension::pt(10.0);
        }
        styles.for_element(ElementType::Table).bind("framed").unwrap();

        let tree = table_tree(vec![], vec![row(false, vec![cell("a"), cell("b")])]);
        let (document, _) = compose_with(&styles, &tree);

        let table = body_table(&document);
        assert_eq!(table.rows.len(), 2);
        assert!(table.rows[0].cells.is_empty());
        let left = &table.rows[1].cells[0];
        let right = &table.rows[1].cells[1];
        assert!(left.borders.top.is_some());
        assert!(left.borders.bottom.is_some());
        assert!(left.borders.left.is_some());
        assert!(left.borders.right.is_none());
        assert!(right.borders.right.is_some());
    }

    #[test]
    fn column_styles_paint_and_format_their_cells() {
        let mut styles = StyleManager::new();
        let grid = styles.add_style("grid");
        {
            let mut style = grid.borrow_mut();
            let first = style.table.add_column();
            first.font.bold = Some(true);
            first.background = Some(Color::rgb(0xFF, 0xF0, 0xF0));
            style.table.add_column();
        }
        styles.for_element(ElementType::Table).bind("grid").unwrap();

        let tree = table_tree(vec![], vec![row(false, vec![cell("left"), cell("right")])]);
        let (document, warnings) = compose_with(&styles, &tree);
        assert!(warnings.is_empty());

        let table = body_table(&document);
        assert_eq!(table.rows[0].cells[0].shading, Some(Color::rgb(0xFF, 0xF0, 0xF0)));
        assert_eq!(table.rows[0].cells[1].shading, None);
        let paragraph = first_paragraph(&table.rows[0].cells[0].content);
        assert!(matches!(&paragraph.runs[0], Run::Text { font, .. } if font.bold));
        let plain = first_paragraph(&table.rows[0].cells[1].content);
        assert!(matches!(&plain.runs[0], Run::Text { font, .. } if !font.bold));
    }

    #[test]
    fn column_alignment_reaches_the_cell_paragraphs() {
        let tree = table_tree(
            vec![ColumnDef { alignment: Some(Alignment::Center) }, ColumnDef::default()],
            vec![row(false, vec![cell("mid"), cell("plain")])],
        );
        let (document, _) = compose_with(&StyleManager::new(), &tree);

        let table = body_table(&document);
        let mid = first_paragraph(&table.rows[0].cells[0].content);
        assert_eq!(mid.format.alignment, Some(Alignment::Center));
        let plain = first_paragraph(&table.rows[0].cells[1].content);
        assert_eq!(plain.format.alignment, None);
    }

    #[test]
    fn vertical_alignment_falls_from_the_table_to_its_cells() {
        let mut styles = StyleManager::new();
        let low = styles.add_style("low");
        low.borrow_mut().table.vertical_cell_alignment = Some(VerticalAlignment::Bottom);
        styles.for_element(ElementType::Table).bind("low").unwrap();

        let tree = table_tree(vec![], vec![row(false, vec![cell("x")])]);
        let (document, _) = compose_with(&styles, &tree);

        let table = body_table(&document);
        assert_eq!(table.rows[0].cells[0].vertical_alignment, Some(VerticalAlignment::Bottom));
    }

    #[test]
    fn an_aligned_style_moves_the_whole_table() {
        let mut styles = StyleManager::new();
        let pushed = styles.add_style("pushed");
        pushed.borrow_mut().table.horizontal_alignment = Some(TableAlignment::Right);
        styles.for_element(ElementType::Table).bind("pushed").unwrap();

        let tree = table_tree(vec![], vec![row(false, vec![cell("x")])]);
        let (document, _) = compose_with(&styles, &tree);

        assert_eq!(body_table(&document).alignment, Some(TableAlignment::Right));
    }

    #[test]
    fn cell_spacing_pads_the_table() {
        let mut styles = StyleManager::new();
        let roomy = styles.add_style("roomy");
        {
            let mut style = roomy.borrow_mut();
            style.table.cell_spacing.top = Dimension::pt(2.0);
            style.table.cell_spacing.left = Dimension::pt(3.0);
        }
        styles.for_element(ElementType::Table).bind("roomy").unwrap();

        let tree = table_tree(vec![], vec![row(false, vec![cell("x")])]);
        let (document, _) = compose_with(&styles, &tree);

        let table = body_table(&document);
        assert!((table.padding_top - 2.0).abs() < 0.01);
        assert!((table.padding_left - 3.0).abs() < 0.01);
        assert!(table.padding_bottom.abs() < 0.01);
    }

    #[test]
    fn side_margins_and_padding_indent_the_table() {
        let mut styles = StyleManager::new();
        let inset = styles.add_style("inset");
        {
            let mut style = inset.borrow_mut();
            style.margin.left = Dimension::pt(20.0);
            style.padding.left = Dimension::pt(5.0);
        }
        styles.for_element(ElementType::Table).bind("inset").unwrap();

        let tree = table_tree(vec![], vec![row(false, vec![cell("x")])]);
        let (document, _) = compose_with(&styles, &tree);

        let table = body_table(&document);
        let body = ComposeOptions::default().page_width;
        assert!((table.left_indent - 25.0).abs() < 0.01);
        assert!((table.columns[0].width - (body - 25.0)).abs() < 0.01);
    }

    #[test]
    fn a_table_can_nest_inside_a_cell() {
        let inner = Block::Table {
            span: None,
            columns: vec![],
            rows: vec![row(false, vec![cell("deep")])],
        };
        let outer = TableCell { blocks: vec![inner], ..TableCell::default() };
        let tree = table_tree(vec![], vec![row(false, vec![outer])]);
        let (document, warnings) = compose_with(&StyleManager::new(), &tree);
        assert!(warnings.is_empty());

        let table = body_table(&document);
        match &table.rows[0].cells[0].content.elements[0] {
            BodyElement::Table(nested) => {
                assert_eq!(nested.rows.len(), 1);
                assert!(!nested.rows[0].cells[0].content.is_empty());
            }
            other => panic!("expected a nested table, got {other:?}"),
        }
    }
}
