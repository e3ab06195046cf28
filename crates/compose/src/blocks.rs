//! Block conversion: the tree walk, the box-model driver and the
//! individual block converters.
//!
//! Containers push a [`Scope`] and recurse; they emit nothing
//! themselves. Leaves run the full sequence: resolve and fold the
//! style, gather pending margin stripes, paint top fillers, create the
//! output paragraph, apply the format, convert content, paint bottom
//! fillers.

use markflow_doc::{Block, HeadingMarkup, Inline, ListKind, Span};
use markflow_render_core::{FontSpec, Paragraph, TabAlignment, TabLeader};
use markflow_style::{
    Alignment, ElementAttributes, ElementPosition, OutlineLevel, SingleElementDescriptor,
    StylingDescriptor, Underline,
};
use markflow_types::{BoxSide, ElementType, WarningKind};

use crate::boxmodel;
use crate::context::{Converter, ItemMarker, Scope};
use crate::error::ComposeError;
use crate::inline;
use crate::merge;
use crate::output::Target;
use crate::table;

pub(crate) fn convert_blocks<'a>(
    cv: &mut Converter<'a>,
    blocks: &'a [Block],
    parent_span: Option<Span>,
    target: &mut Target<'_>,
) -> Result<(), ComposeError> {
    let count = blocks.len();
    let mut prev_span = None;
    for (index, block) in blocks.iter().enumerate() {
        let position = ElementPosition::new(index, count);
        convert_block(cv, block, position, prev_span, parent_span, target)?;
        prev_span = block.span().or(prev_span);
    }
    Ok(())
}

fn convert_block<'a>(
    cv: &mut Converter<'a>,
    block: &'a Block,
    position: ElementPosition,
    prev_span: Option<Span>,
    parent_span: Option<Span>,
    target: &mut Target<'_>,
) -> Result<(), ComposeError> {
    match block {
        Block::Paragraph { span, inlines } => {
            convert_paragraph(cv, *span, inlines, position, target)
        }
        Block::Heading {
            span,
            level,
            markup,
            inlines,
        } => convert_heading(cv, *span, *level, *markup, inlines, position, target),
        Block::CodeBlock { span, info, text } => {
            convert_code_block(cv, *span, info.as_deref(), text, position, target)
        }
        Block::Quote { span, blocks } => {
            let attributes = container_attributes(cv, *span, prev_span, parent_span);
            let descriptor = SingleElementDescriptor {
                element_type: ElementType::Quote,
                attributes,
                position,
                plain_text: None,
            };
            convert_container(cv, descriptor, blocks, *span, target, None)
        }
        Block::List { span, kind, items } => {
            convert_list(cv, *span, *kind, items, position, prev_span, parent_span, target)
        }
        // A list item outside a list still renders, as a bulleted item.
        Block::ListItem {
            span,
            number,
            check,
            blocks,
        } => convert_list_item(
            cv,
            *span,
            ListKind::Unordered { bullet: '-' },
            *number,
            *check,
            blocks,
            position,
            target,
        ),
        Block::Table {
            span,
            columns,
            rows,
        } => table::convert_table(
            cv, *span, columns, rows, position, prev_span, parent_span, target,
        ),
        Block::Break { span } => convert_break(cv, *span, position, target),
        Block::CustomContainer { span, info, blocks } => {
            let mut attributes = container_attributes(cv, *span, prev_span, parent_span);
            if attributes.info.is_none() {
                attributes.info = info.clone();
            }
            let descriptor = SingleElementDescriptor {
                element_type: ElementType::CustomContainer,
                attributes,
                position,
                plain_text: None,
            };
            convert_container(cv, descriptor, blocks, *span, target, None)
        }
        Block::FootnoteGroup { span: _, notes } => {
            convert_footnote_group(cv, notes, position, target)
        }
        Block::Footnote { span, blocks } => {
            convert_footnote(cv, *span, blocks, position, target)
        }
    }
}

// ---- shared preparation ----

pub(crate) struct Prepared {
    pub(crate) scope: Scope,
    pub(crate) chain: StylingDescriptor,
}

/// Resolves the style for `descriptor` under the current scope stack and
/// derives the block's font size and usable width. Left and right
/// margins of the ancestry are folded in first, so the width already
/// accounts for inherited indentation.
pub(crate) fn prepare<'a>(
    cv: &mut Converter<'a>,
    descriptor: SingleElementDescriptor,
    leaf: bool,
) -> Result<Prepared, ComposeError> {
    let chain = cv.chain_with(descriptor.clone());
    let mut style = cv.styles.resolve(&chain);
    let parent = cv.scope().clone();

    boxmodel::fold_side_margins(&mut style, &parent);
    style.font = style.font.apply_to(&parent.style.font);
    if style.background.is_none() {
        style.background = parent.style.background;
    }
    if leaf {
        if style.paragraph.alignment.is_none() {
            style.paragraph.alignment = parent.style.paragraph.alignment;
        }
        match descriptor.attributes.get("align") {
            Some("left") => style.paragraph.alignment = Some(Alignment::Left),
            Some("right") => style.paragraph.alignment = Some(Alignment::Right),
            Some("center") => style.paragraph.alignment = Some(Alignment::Center),
            Some("justify") => style.paragraph.alignment = Some(Alignment::Justify),
            _ => {}
        }
    }

    let font_size = style.font.size.eval(parent.font_size, parent.width)?;
    let horizontal = style.margin.left.clone()
        + style.margin.right.clone()
        + style.padding.left.clone()
        + style.padding.right.clone();
    let width = parent.width - horizontal.eval(font_size, parent.width)?;

    Ok(Prepared {
        scope: Scope {
            descriptor,
            style,
            font_size,
            width,
            standalone: false,
            marker: None,
        },
        chain,
    })
}

/// Fires the styling-prepared hook. Runs once per element, after the
/// element's converter has finished every styling adjustment of its own.
pub(crate) fn run_prepared_hook(cv: &mut Converter<'_>, prepared: &mut Prepared) {
    if let Some(hook) = &mut cv.hooks.styling_prepared {
        hook(&mut prepared.scope.style, &prepared.chain);
    }
}

// ---- containers ----

fn convert_container<'a>(
    cv: &mut Converter<'a>,
    descriptor: SingleElementDescriptor,
    blocks: &'a [Block],
    span: Option<Span>,
    target: &mut Target<'_>,
    marker: Option<ItemMarker>,
) -> Result<(), ComposeError> {
    let mut prepared = prepare(cv, descriptor, false)?;
    run_prepared_hook(cv, &mut prepared);
    let mut scope = prepared.scope;
    scope.marker = marker;
    cv.scopes.push(scope);
    let result = convert_blocks(cv, blocks, span, target);
    cv.scopes.pop();
    result
}

#[allow(clippy::too_many_arguments)]
fn convert_list<'a>(
    cv: &mut Converter<'a>,
    span: Option<Span>,
    kind: ListKind,
    items: &'a [Block],
    position: ElementPosition,
    prev_span: Option<Span>,
    parent_span: Option<Span>,
    target: &mut Target<'_>,
) -> Result<(), ComposeError> {
    let (element_type, markup) = match kind {
        ListKind::Unordered { bullet } => (ElementType::UnorderedList, bullet.to_string()),
        ListKind::Ordered { .. } => (ElementType::OrderedList, "Number".to_string()),
    };
    let mut attributes = container_attributes(cv, span, prev_span, parent_span);
    attributes.markup = Some(markup);
    let descriptor = SingleElementDescriptor {
        element_type,
        attributes,
        position,
        plain_text: None,
    };
    let mut prepared = prepare(cv, descriptor, false)?;
    run_prepared_hook(cv, &mut prepared);
    cv.scopes.push(prepared.scope);
    let result = convert_list_items(cv, span, kind, items, target);
    cv.scopes.pop();
    result
}

fn convert_list_items<'a>(
    cv: &mut Converter<'a>,
    span: Option<Span>,
    kind: ListKind,
    items: &'a [Block],
    target: &mut Target<'_>,
) -> Result<(), ComposeError> {
    let count = items.len();
    let mut prev_span = None;
    for (index, item) in items.iter().enumerate() {
        let position = ElementPosition::new(index, count);
        match item {
            Block::ListItem {
                span: item_span,
                number,
                check,
                blocks,
            } => convert_list_item(
                cv, *item_span, kind, *number, *check, blocks, position, target,
            )?,
            other => convert_block(cv, other, position, prev_span, span, target)?,
        }
        prev_span = item.span().or(prev_span);
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn convert_list_item<'a>(
    cv: &mut Converter<'a>,
    span: Option<Span>,
    kind: ListKind,
    number: Option<u32>,
    check: Option<bool>,
    blocks: &'a [Block],
    position: ElementPosition,
    target: &mut Target<'_>,
) -> Result<(), ComposeError> {
    let (element_type, marker_number) = match kind {
        ListKind::Unordered { .. } => (ElementType::UnorderedListItem, None),
        ListKind::Ordered { start, .. } => (
            ElementType::OrderedListItem,
            Some(number.unwrap_or(start + position.index as u32)),
        ),
    };
    let descriptor = SingleElementDescriptor {
        element_type,
        position,
        ..Default::default()
    };
    let marker = ItemMarker {
        number: marker_number,
        check,
    };
    convert_container(cv, descriptor, blocks, span, target, Some(marker))
}

fn convert_footnote_group<'a>(
    cv: &mut Converter<'a>,
    notes: &'a [Block],
    position: ElementPosition,
    target: &mut Target<'_>,
) -> Result<(), ComposeError> {
    let descriptor = SingleElementDescriptor {
        element_type: ElementType::FootnoteGroup,
        position,
        ..Default::default()
    };
    let mut prepared = prepare(cv, descriptor, false)?;
    run_prepared_hook(cv, &mut prepared);
    cv.scopes.push(prepared.scope);
    let result = convert_footnotes(cv, notes, target);
    cv.scopes.pop();
    result
}

/// Anything but a footnote inside the group is dropped.
fn convert_footnotes<'a>(
    cv: &mut Converter<'a>,
    notes: &'a [Block],
    target: &mut Target<'_>,
) -> Result<(), ComposeError> {
    let footnotes: Vec<&Block> = notes
        .iter()
        .filter(|note| matches!(note, Block::Footnote { .. }))
        .collect();
    let count = footnotes.len();
    for (index, note) in footnotes.into_iter().enumerate() {
        if let Block::Footnote { span, blocks } = note {
            convert_footnote(cv, *span, blocks, ElementPosition::new(index, count), target)?;
        }
    }
    Ok(())
}

fn convert_footnote<'a>(
    cv: &mut Converter<'a>,
    span: Option<Span>,
    blocks: &'a [Block],
    position: ElementPosition,
    target: &mut Target<'_>,
) -> Result<(), ComposeError> {
    // A lone `{...}` line right above the definition styles the note.
    let attributes = match span {
        Some(span) => {
            let tree = cv.tree;
            let line = cv.line_of(Some(span));
            let text = cv.attr_or_warn(line, tree.leaf_attribute_prefix(span, None));
            ElementAttributes::parse(text)
        }
        None => ElementAttributes::default(),
    };
    let descriptor = SingleElementDescriptor {
        element_type: ElementType::Footnote,
        attributes,
        position,
        plain_text: None,
    };
    let marker = ItemMarker {
        number: Some(position.index as u32 + 1),
        check: None,
    };
    convert_container(cv, descriptor, blocks, span, target, Some(marker))
}

// ---- the leaf driver ----

/// Runs one leaf block through the box model and into an output
/// paragraph. `apply` tweaks the format after the style merge; `content`
/// fills the paragraph with the leaf's scope pushed.
fn render_leaf<'a>(
    cv: &mut Converter<'a>,
    target: &mut Target<'_>,
    mut prepared: Prepared,
    bookmark: bool,
    apply: impl FnOnce(&mut Paragraph, &Scope),
    content: impl FnOnce(&mut Converter<'a>, &mut Paragraph) -> Result<(), ComposeError>,
) -> Result<(), ComposeError> {
    run_prepared_hook(cv, &mut prepared);
    let Prepared { mut scope, chain } = prepared;

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
    // Colored bands below must stay on the same page as the content.
    if !bottom.is_empty() {
        scope.style.paragraph.keep_with_next = Some(true);
    }

    let paragraph = target.blocks().add_paragraph();
    apply_leaf_format(paragraph, &scope, bookmark)?;
    apply(paragraph, &scope);
    if let Some(hook) = &mut cv.hooks.styling_applied {
        hook(&mut paragraph.format, &chain);
    }

    cv.scopes.push(scope);
    let filled = content(cv, paragraph);
    let scope = match cv.scopes.pop() {
        Some(scope) => scope,
        None => unreachable!(),
    };
    filled?;

    boxmodel::emit_fillers(
        target.blocks(),
        &bottom,
        BoxSide::Bottom,
        &scope.style,
        scope.font_size,
        scope.width,
    )?;
    Ok(())
}

/// Merges the resolved style into the paragraph format and lays the
/// block's own box onto it: margins become indents and spacing, padding
/// becomes border distances.
fn apply_leaf_format(
    paragraph: &mut Paragraph,
    scope: &Scope,
    bookmark: bool,
) -> Result<(), ComposeError> {
    let style = &scope.style;
    let font_size = scope.font_size;
    let width = scope.width;
    merge::merge_format(style, &mut paragraph.format, font_size, width)?;

    let left =
        style.border.left.width.clone() + style.margin.left.clone() + style.padding.left.clone();
    paragraph.format.left_indent = left.eval(font_size, width)?;
    let right =
        style.border.right.width.clone() + style.margin.right.clone() + style.padding.right.clone();
    paragraph.format.right_indent = right.eval(font_size, width)?;
    paragraph.format.space_before = style.margin.top.eval(font_size, width)?;
    paragraph.format.space_after = style.margin.bottom.eval(font_size, width)?;
    paragraph.format.borders.distance_top = style.padding.top.eval(font_size, width)?;
    paragraph.format.borders.distance_bottom = style.padding.bottom.eval(font_size, width)?;
    paragraph.format.borders.distance_left = style.padding.left.eval(font_size, width)?;
    paragraph.format.borders.distance_right = style.padding.right.eval(font_size, width)?;

    if bookmark {
        if let Some(id) = &scope.descriptor.attributes.id {
            paragraph.add_bookmark(id.clone());
        }
    }
    Ok(())
}

// ---- paragraphs ----

fn convert_paragraph<'a>(
    cv: &mut Converter<'a>,
    span: Option<Span>,
    inlines: &'a [Inline],
    position: ElementPosition,
    target: &mut Target<'_>,
) -> Result<(), ComposeError> {
    if let Some((key, value)) = sole_command(inlines) {
        match key.to_ascii_lowercase().as_str() {
            "pagebreak" => {
                let paragraph = target.blocks().add_paragraph();
                paragraph.format.page_break_before = true;
                return Ok(());
            }
            "sectionbreak" => {
                if !target.start_section() {
                    let line = cv.line_of(span);
                    cv.warn(
                        WarningKind::Structure,
                        format!("section breaks only work in the document body, line {line}"),
                    );
                }
                return Ok(());
            }
            "setsectionname" => {
                if !target.set_section_label(value) {
                    let line = cv.line_of(span);
                    cv.warn(
                        WarningKind::Structure,
                        format!("section names only work in the document body, line {line}"),
                    );
                }
                return Ok(());
            }
            _ => {}
        }
    }

    let element_type = paragraph_element_type(inlines);
    let first = inlines.first().and_then(Inline::span);
    let last = inlines.last().and_then(Inline::span);
    let last_is_link = matches!(
        inlines.last(),
        Some(Inline::Link { .. } | Inline::Image { .. })
    );
    let attributes = leaf_attributes(cv, span, first, last, last_is_link);
    let plain: String = inlines.iter().map(Inline::plain_text).collect();
    let descriptor = SingleElementDescriptor {
        element_type,
        attributes,
        position,
        plain_text: Some(plain),
    };
    let prepared = prepare(cv, descriptor, true)?;
    render_leaf(cv, target, prepared, true, |_, _| {}, |cv, paragraph| {
        add_footnote_bookmark(cv, paragraph);
        add_bullet(cv, paragraph)?;
        inline::convert_inlines(cv, paragraph, inlines, span)
    })
}

/// A paragraph holding nothing but an image or a math inline is styled
/// as that element instead.
fn paragraph_element_type(inlines: &[Inline]) -> ElementType {
    match inlines {
        [Inline::Image { url, .. }] => {
            if url.starts_with("md:plugin") {
                ElementType::Plugin
            } else {
                ElementType::Image
            }
        }
        [Inline::Math { .. }] => ElementType::Plugin,
        _ => ElementType::Paragraph,
    }
}

/// A paragraph whose only content is `{word ...}` is a command
/// candidate. Style and id runs are ordinary attributes, not commands.
fn sole_command(inlines: &[Inline]) -> Option<(&str, &str)> {
    let [Inline::Text { text, .. }] = inlines else {
        return None;
    };
    let inner = text.trim().strip_prefix('{')?.strip_suffix('}')?.trim();
    if inner.is_empty() || inner.starts_with(['.', '#']) || inner.contains(['{', '}']) {
        return None;
    }
    let (key, value) = match inner.split_once(char::is_whitespace) {
        Some((key, value)) => (key, value.trim()),
        None => (inner, ""),
    };
    if key.chars().all(|c| c.is_ascii_alphanumeric()) {
        Some((key, value))
    } else {
        None
    }
}

/// First paragraphs of footnote definitions get the bookmark that
/// footnote references jump to.
fn add_footnote_bookmark(cv: &Converter<'_>, paragraph: &mut Paragraph) {
    let Some(parent) = cv.parent_scope() else {
        return;
    };
    if parent.descriptor.element_type != ElementType::Footnote {
        return;
    }
    if cv.scope().descriptor.position.index != 0 {
        return;
    }
    if let Some(number) = parent.marker.and_then(|marker| marker.number) {
        paragraph.add_bookmark(format!("Footnote_{number}"));
    }
}

/// Renders the hanging bullet of a list item or footnote into its first
/// paragraph. Every paragraph of the item gets the hanging indent and
/// tab stops; later paragraphs just tab past the bullet column.
fn add_bullet(cv: &Converter<'_>, paragraph: &mut Paragraph) -> Result<(), ComposeError> {
    let Some(parent) = cv.parent_scope() else {
        return Ok(());
    };
    let Some(marker) = parent.marker else {
        return Ok(());
    };
    let scope = cv.scope();
    let bullet = &parent.style.bullet;
    let font_size = scope.font_size;
    let width = scope.width;
    let text_indent = bullet.text_indent.eval(font_size, width)?;
    let bullet_indent = bullet.bullet_indent.eval(font_size, width)?;

    paragraph.format.first_line_indent = -text_indent;
    let indent = paragraph.format.left_indent;
    paragraph.format.left_indent += text_indent;
    paragraph.format.tab_stops.clear();
    paragraph
        .format
        .add_tab_stop(indent + bullet_indent, TabAlignment::Right, TabLeader::None);
    paragraph
        .format
        .add_tab_stop(indent + text_indent, TabAlignment::Left, TabLeader::None);

    if scope.descriptor.position.index != 0 {
        paragraph.add_text("\t\t");
        return Ok(());
    }

    let (content, bullet_font) = match (marker.number, marker.check) {
        (Some(number), _) => (
            Some(format!(
                "{number}{}",
                bullet.normal.content.as_deref().unwrap_or_default()
            )),
            &bullet.normal.font,
        ),
        (None, Some(true)) => (bullet.checked.content.clone(), &bullet.checked.font),
        (None, Some(false)) => (bullet.unchecked.content.clone(), &bullet.unchecked.font),
        (None, None) => (bullet.normal.content.clone(), &bullet.normal.font),
    };
    let font = merge::merge_font(
        bullet_font,
        &paragraph.format.font,
        parent.font_size,
        parent.width,
        true,
    )?;
    paragraph.add_formatted_text(format!("\t{}\t", content.unwrap_or_default()), font);
    Ok(())
}

// ---- headings ----

fn convert_heading<'a>(
    cv: &mut Converter<'a>,
    span: Option<Span>,
    level: u8,
    markup: HeadingMarkup,
    inlines: &'a [Inline],
    position: ElementPosition,
    target: &mut Target<'_>,
) -> Result<(), ComposeError> {
    let first = inlines.first().and_then(Inline::span);
    let last = inlines.last().and_then(Inline::span);
    let last_is_link = matches!(
        inlines.last(),
        Some(Inline::Link { .. } | Inline::Image { .. })
    );
    let mut attributes = leaf_attributes(cv, span, first, last, last_is_link);
    attributes.markup = Some(
        match markup {
            HeadingMarkup::Atx => "Atx",
            HeadingMarkup::Setext => "Setext",
        }
        .to_string(),
    );
    let plain: String = inlines.iter().map(Inline::plain_text).collect();
    let descriptor = SingleElementDescriptor {
        element_type: ElementType::heading(level),
        attributes,
        position,
        plain_text: Some(plain.clone()),
    };
    let prepared = prepare(cv, descriptor, true)?;
    render_leaf(
        cv,
        target,
        prepared,
        false,
        |paragraph, scope| {
            let level = scope.descriptor.element_type.heading_level().unwrap_or(1);
            match scope.descriptor.attributes.get("outline") {
                Some("false") => paragraph.format.outline_level = Some(OutlineLevel::BodyText),
                Some("true") => {
                    paragraph.format.outline_level = Some(OutlineLevel::for_heading(level));
                }
                _ => {}
            }
        },
        |cv, paragraph| {
            let anchor = match &cv.scope().descriptor.attributes.id {
                Some(id) => id.trim_start_matches('#').to_string(),
                None => anchor_id(&plain),
            };
            paragraph.add_bookmark(anchor);
            inline::convert_inlines(cv, paragraph, inlines, span)
        },
    )
}

/// Anchor generated for headings without an explicit id: the heading
/// text lower-cased, with whitespace turned into hyphens.
fn anchor_id(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect()
}

// ---- code blocks ----

fn convert_code_block<'a>(
    cv: &mut Converter<'a>,
    span: Option<Span>,
    info: Option<&'a str>,
    text: &'a str,
    position: ElementPosition,
    target: &mut Target<'_>,
) -> Result<(), ComposeError> {
    let (language, mut attributes) = split_code_info(info.unwrap_or(""));
    if !language.is_empty() && attributes.info.is_none() {
        attributes.info = Some(language.to_string());
    }
    let descriptor = SingleElementDescriptor {
        element_type: ElementType::Code,
        attributes,
        position,
        plain_text: Some(text.to_string()),
    };
    let mut prepared = prepare(cv, descriptor, true)?;

    // The plugin runs before the box model: a highlighter-supplied
    // background recolors the whole box, fillers included.
    let highlighted = if language.is_empty() {
        None
    } else {
        cv.providers.highlight(text, language)
    };
    if let Some(highlighted) = &highlighted {
        if let Some(message) = &highlighted.message {
            cv.warn(WarningKind::Plugin, message.clone());
        }
        if let Some(background) = highlighted.background {
            prepared.scope.style.background = Some(background);
        }
    }

    render_leaf(cv, target, prepared, true, |_, _| {}, move |_, paragraph| {
        let font = paragraph.format.font.clone();
        match highlighted {
            Some(highlighted) => {
                for span in &highlighted.spans {
                    let mut span_font = font.clone();
                    if span.bold {
                        span_font.bold = true;
                    }
                    if span.italic {
                        span_font.italic = true;
                    }
                    if span.underline {
                        span_font.underline = Some(Underline::Single);
                    }
                    if let Some(color) = span.color {
                        span_font.color = Some(color);
                    }
                    emit_code_runs(paragraph, &span.text, &span_font);
                }
            }
            None => emit_code_runs(paragraph, &detab(text), &font),
        }
        Ok(())
    })
}

/// Splits a fence info string into the language word and any trailing
/// `{...}` attribute run.
fn split_code_info(info: &str) -> (&str, ElementAttributes) {
    match info.find('{') {
        Some(at) => (info[..at].trim(), ElementAttributes::parse(&info[at..])),
        None => (info.trim(), ElementAttributes::default()),
    }
}

/// Expands tabs to spaces on a four-column grid, restarting the column
/// count at every line.
fn detab(text: &str) -> String {
    let mut out = String::new();
    let mut column = 0usize;
    for ch in text.chars() {
        match ch {
            '\t' => {
                let spaces = 4 - column % 4;
                for _ in 0..spaces {
                    out.push(' ');
                }
                column += spaces;
            }
            '\n' => {
                out.push('\n');
                column = 0;
            }
            _ => {
                out.push(ch);
                column += 1;
            }
        }
    }
    out
}

/// Emits code text as runs: line breaks between lines, runs of two or
/// more spaces as non-collapsing space runs, the rest as formatted text.
fn emit_code_runs(paragraph: &mut Paragraph, text: &str, font: &FontSpec) {
    let mut first = true;
    for line in text.split('\n') {
        if !first {
            paragraph.add_line_break();
        }
        first = false;

        let mut buffer = String::new();
        let mut spaces = 0usize;
        for ch in line.trim_end_matches('\r').chars() {
            if ch == ' ' {
                spaces += 1;
                continue;
            }
            flush_spaces(paragraph, &mut buffer, &mut spaces, font);
            buffer.push(ch);
        }
        flush_spaces(paragraph, &mut buffer, &mut spaces, font);
        if !buffer.is_empty() {
            paragraph.add_formatted_text(buffer, font.clone());
        }
    }
}

fn flush_spaces(paragraph: &mut Paragraph, buffer: &mut String, spaces: &mut usize, font: &FontSpec) {
    if *spaces >= 2 {
        if !buffer.is_empty() {
            paragraph.add_formatted_text(std::mem::take(buffer), font.clone());
        }
        paragraph.add_space(*spaces);
    } else {
        for _ in 0..*spaces {
            buffer.push(' ');
        }
    }
    *spaces = 0;
}

// ---- thematic breaks ----

fn convert_break<'a>(
    cv: &mut Converter<'a>,
    span: Option<Span>,
    position: ElementPosition,
    target: &mut Target<'_>,
) -> Result<(), ComposeError> {
    // A separator should not end up alone at the top of a page.
    if target.is_body() {
        if let Some(previous) = target.blocks().last_paragraph_mut() {
            previous.format.keep_with_next = true;
        }
    }

    let mut attributes = ElementAttributes::default();
    if let Some(span) = span {
        if let Ok(text) = cv.tree.slice(span) {
            if let Some(first) = text.trim_start().chars().next() {
                attributes.markup = Some(first.to_string());
            }
        }
    }
    let descriptor = SingleElementDescriptor {
        element_type: ElementType::Break,
        attributes,
        position,
        plain_text: None,
    };
    let prepared = prepare(cv, descriptor, true)?;
    render_leaf(cv, target, prepared, true, |_, _| {}, |cv, paragraph| {
        let scope = cv.scope();
        let bullet = &scope.style.bullet.normal;
        let content = bullet.content.clone().filter(|content| !content.is_empty());
        if let Some(content) = content {
            let font = merge::merge_font(
                &bullet.font,
                &paragraph.format.font,
                scope.font_size,
                scope.width,
                false,
            )?;
            paragraph.add_formatted_text(content, font);
        }
        Ok(())
    })
}

// ---- attribute recovery ----

pub(crate) fn container_attributes<'a>(
    cv: &mut Converter<'a>,
    span: Option<Span>,
    prev_span: Option<Span>,
    parent_span: Option<Span>,
) -> ElementAttributes {
    let Some(span) = span else {
        return ElementAttributes::default();
    };
    let tree = cv.tree;
    let line = cv.line_of(Some(span));
    let text = cv.attr_or_warn(line, tree.container_attribute_prefix(span, prev_span, parent_span));
    ElementAttributes::parse(text)
}

fn leaf_attributes<'a>(
    cv: &mut Converter<'a>,
    span: Option<Span>,
    first_inline: Option<Span>,
    last_inline: Option<Span>,
    last_is_link: bool,
) -> ElementAttributes {
    let Some(span) = span else {
        return ElementAttributes::default();
    };
    let tree = cv.tree;
    let line = cv.line_of(Some(span));
    let prefix = cv.attr_or_warn(line, tree.leaf_attribute_prefix(span, first_inline));
    let mut attributes = ElementAttributes::parse(prefix);
    let suffix = cv.attr_or_warn(line, tree.leaf_attribute_suffix(span, last_inline, last_is_link));
    if !suffix.is_empty() {
        attributes.merge(&ElementAttributes::parse(suffix));
    }
    attributes
}

#[cfg(test)]
mod tests {
    use markflow_doc::Document as Tree;
    use markflow_render_core::{BodyElement, Document, Run};
    use markflow_style::StyleManager;
    use markflow_types::Warning;

    use super::*;
    use crate::context::{ComposeOptions, Converter, Hooks};
    use crate::plugin::ProviderSet;

    fn text(content: &str) -> Inline {
        Inline::Text { span: None, text: content.to_string() }
    }

    fn paragraph(content: &str) -> Block {
        Block::Paragraph { span: None, inlines: vec![text(content)] }
    }

    fn compose(tree: &Tree) -> (Document, Vec<Warning>) {
        let styles = StyleManager::new();
        let providers = ProviderSet::new();
        let mut hooks = Hooks::default();
        let options = ComposeOptions::default();
        let mut converter =
            Converter::new(&styles, tree, &providers, &mut hooks, &options).unwrap();
        let mut document = Document::new();
        converter.convert_into(&mut document).unwrap();
        (document, converter.take_warnings())
    }

    fn body_paragraph(document: &Document, index: usize) -> &Paragraph {
        match &document.sections[0].body.elements[index] {
            BodyElement::Paragraph(paragraph) => paragraph,
            other => panic!("expected a paragraph, got {other:?}"),
        }
    }

    #[test]
    fn sole_commands_parse_but_attribute_runs_do_not() {
        let command = vec![text("{setsectionname Intro}")];
        assert_eq!(sole_command(&command), Some(("setsectionname", "Intro")));
        assert_eq!(sole_command(&[text("{pagebreak}")]), Some(("pagebreak", "")));
        assert_eq!(sole_command(&[text("{.quote}")]), None);
        assert_eq!(sole_command(&[text("{#anchor}")]), None);
        assert_eq!(sole_command(&[text("plain text")]), None);
        assert_eq!(sole_command(&[text("{a {b}}")]), None);
    }

    #[test]
    fn a_pagebreak_paragraph_sets_the_break_flag() {
        let mut tree = Tree::new("{pagebreak}\n");
        tree.blocks = vec![paragraph("{pagebreak}")];

        let (document, warnings) = compose(&tree);
        assert!(warnings.is_empty());
        assert_eq!(document.sections[0].body.elements.len(), 1);
        assert!(body_paragraph(&document, 0).format.page_break_before);
        assert!(body_paragraph(&document, 0).runs.is_empty());
    }

    #[test]
    fn a_sectionbreak_outside_the_body_raises_a_warning() {
        let tree = {
            let mut tree = Tree::new("{sectionbreak}\n");
            tree.blocks = vec![paragraph("{sectionbreak}")];
            tree
        };
        let styles = StyleManager::new();
        let providers = ProviderSet::new();
        let mut hooks = Hooks::default();
        let options = ComposeOptions::default();
        let mut converter =
            Converter::new(&styles, &tree, &providers, &mut hooks, &options).unwrap();

        let mut fragment = markflow_render_core::BlockList::new();
        converter.convert_fragment(&mut fragment).unwrap();

        let warnings = converter.take_warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::Structure);
        assert!(warnings[0].message.contains("section breaks"));
        assert!(fragment.is_empty());
    }

    #[test]
    fn ordered_items_number_from_the_list_start() {
        let mut tree = Tree::new("3. first\n4. second\n");
        tree.blocks = vec![Block::List {
            span: None,
            kind: ListKind::Ordered { start: 3, delimiter: '.' },
            items: vec![
                Block::ListItem {
                    span: None,
                    number: None,
                    check: None,
                    blocks: vec![paragraph("first")],
                },
                Block::ListItem {
                    span: None,
                    number: None,
                    check: None,
                    blocks: vec![paragraph("second"), paragraph("more")],
                },
            ],
        }];

        let (document, _) = compose(&tree);
        let first = body_paragraph(&document, 0);
        assert!(matches!(&first.runs[0], Run::Text { text, .. } if text == "\t3\t"));
        assert_eq!(first.format.tab_stops.len(), 2);

        let second = body_paragraph(&document, 1);
        assert!(matches!(&second.runs[0], Run::Text { text, .. } if text == "\t4\t"));

        let continuation = body_paragraph(&document, 2);
        assert!(matches!(&continuation.runs[0], Run::Text { text, .. } if text == "\t\t"));
        assert_eq!(continuation.format.tab_stops.len(), 2);
    }

    #[test]
    fn footnote_paragraphs_bookmark_their_ordinal() {
        let mut tree = Tree::new("[^1]: note\n");
        tree.blocks = vec![Block::FootnoteGroup {
            span: None,
            notes: vec![Block::Footnote { span: None, blocks: vec![paragraph("note")] }],
        }];

        let (document, _) = compose(&tree);
        let note = body_paragraph(&document, 0);
        assert!(matches!(&note.runs[0], Run::Bookmark { id } if id == "Footnote_1"));
        assert!(matches!(&note.runs[1], Run::Text { text, .. } if text == "\t1\t"));
    }

    #[test]
    fn headings_bookmark_a_hyphenated_anchor() {
        let mut tree = Tree::new("## Big Title\n");
        tree.blocks = vec![Block::Heading {
            span: None,
            level: 2,
            markup: HeadingMarkup::Atx,
            inlines: vec![text("Big Title")],
        }];

        let (document, _) = compose(&tree);
        let heading = body_paragraph(&document, 0);
        assert!(matches!(&heading.runs[0], Run::Bookmark { id } if id == "big-title"));
    }

    #[test]
    fn explicit_heading_ids_win_over_generated_anchors() {
        let source = "## Big Title {#custom}\n";
        let mut tree = Tree::new(source);
        tree.blocks = vec![Block::Heading {
            span: Some(Span::new(0, 22)),
            level: 2,
            markup: HeadingMarkup::Atx,
            inlines: vec![Inline::Text {
                span: Some(Span::new(3, 12)),
                text: "Big Title".to_string(),
            }],
        }];

        let (document, warnings) = compose(&tree);
        assert!(warnings.is_empty());
        let heading = body_paragraph(&document, 0);
        assert!(matches!(&heading.runs[0], Run::Bookmark { id } if id == "custom"));
    }

    #[test]
    fn align_attributes_override_the_style_alignment() {
        let source = "hello {align=center}\n";
        let mut tree = Tree::new(source);
        tree.blocks = vec![Block::Paragraph {
            span: Some(Span::new(0, 20)),
            inlines: vec![Inline::Text {
                span: Some(Span::new(0, 5)),
                text: "hello".to_string(),
            }],
        }];

        let (document, _) = compose(&tree);
        assert_eq!(body_paragraph(&document, 0).format.alignment, Some(Alignment::Center));
    }

    #[test]
    fn tabs_expand_on_a_four_column_grid() {
        assert_eq!(detab("\tx"), "    x");
        assert_eq!(detab("ab\tc"), "ab  c");
        assert_eq!(detab("abc\td\ne\tf"), "abc d\ne   f");
    }

    #[test]
    fn code_blocks_split_runs_on_double_spaces() {
        let mut tree = Tree::new("    a  b\n    c\n");
        tree.blocks = vec![Block::CodeBlock {
            span: None,
            info: None,
            text: "a  b\nc".to_string(),
        }];

        let (document, _) = compose(&tree);
        let code = body_paragraph(&document, 0);
        assert!(matches!(&code.runs[0], Run::Text { text, .. } if text == "a"));
        assert!(matches!(&code.runs[1], Run::Space { count: 2 }));
        assert!(matches!(&code.runs[2], Run::Text { text, .. } if text == "b"));
        assert!(matches!(&code.runs[3], Run::LineBreak));
        assert!(matches!(&code.runs[4], Run::Text { text, .. } if text == "c"));
    }

    #[test]
    fn a_break_keeps_the_previous_paragraph_attached() {
        let mut tree = Tree::new("before\n\n---\n");
        tree.blocks = vec![paragraph("before"), Block::Break { span: None }];

        let (document, _) = compose(&tree);
        assert!(body_paragraph(&document, 0).format.keep_with_next);
        assert!(body_paragraph(&document, 1).runs.is_empty());
    }
}
