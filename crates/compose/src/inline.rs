//! Inline conversion: literal runs, emphasis nesting, code spans,
//! links, images and generated fields inside one output paragraph.
//!
//! Formatting accumulates top-down: every recognized emphasis or code
//! span folds its resolved style font into the accumulator its children
//! inherit, and a literal run flattens the accumulator over the
//! container's base font. Inline styles resolve against the descriptor
//! chain of their enclosing inline containers plus the open block
//! scopes.

use std::sync::LazyLock;

use markflow_doc::{Inline, Span};
use markflow_render_core::{
    Field, FontSpec, Hyperlink, HyperlinkKind, ImageRun, Paragraph, Run, TabAlignment, TabLeader,
};
use markflow_style::{
    Alignment, Dimension, ElementAttributes, ElementPosition, FontStyle, SingleElementDescriptor,
    Underline,
};
use markflow_types::{ElementType, WarningKind};
use regex::Regex;

use crate::context::Converter;
use crate::error::ComposeError;
use crate::merge;

/// A `{...}` run in literal text that spells a generated field or a
/// misplaced block command. Attribute runs (`.style`, `#id`, `key=value`)
/// do not match.
static FIELD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{(?:[A-Za-z0-9]+(?:[ \t][^{}]*)?|#:[^{}]*)\}").expect("field pattern")
});

/// Converts a leaf block's inline list into `paragraph`. A soft line
/// break at the very start is dropped; it is markup residue, not
/// content.
pub(crate) fn convert_inlines<'a>(
    cv: &mut Converter<'a>,
    paragraph: &mut Paragraph,
    inlines: &'a [Inline],
    span: Option<Span>,
) -> Result<(), ComposeError> {
    let mut walk = Walk {
        block_span: span,
        ancestors: Vec::new(),
    };
    let mut sink = Sink::Paragraph(paragraph);
    let count = inlines.len();
    for (index, inline) in inlines.iter().enumerate() {
        if index == 0 && matches!(inline, Inline::LineBreak { hard: false, .. }) {
            continue;
        }
        let next = inlines.get(index + 1).and_then(Inline::span);
        let position = ElementPosition::new(index, count);
        convert_one(cv, &mut walk, &mut sink, inline, position, next, &FontStyle::default())?;
    }
    Ok(())
}

/// State threaded through one paragraph's inline walk.
struct Walk {
    /// Span of the enclosing leaf block, the outer edge of attribute
    /// windows.
    block_span: Option<Span>,
    /// Descriptors of the open inline containers, outermost first.
    ancestors: Vec<SingleElementDescriptor>,
}

/// Where inline runs land: the paragraph itself or an open hyperlink.
enum Sink<'p> {
    Paragraph(&'p mut Paragraph),
    Link(&'p mut Hyperlink),
}

impl Sink<'_> {
    /// Base character format runs in this container inherit.
    fn font(&self) -> &FontSpec {
        match self {
            Sink::Paragraph(paragraph) => &paragraph.format.font,
            Sink::Link(link) => &link.font,
        }
    }

    fn push(&mut self, run: Run) {
        match self {
            Sink::Paragraph(paragraph) => paragraph.runs.push(run),
            Sink::Link(link) => link.runs.push(run),
        }
    }

    fn add_text(&mut self, text: &str) {
        match self {
            Sink::Paragraph(paragraph) => paragraph.add_text(text),
            Sink::Link(link) => link.add_text(text),
        }
    }

    fn add_formatted_text(&mut self, text: String, font: FontSpec) {
        match self {
            Sink::Paragraph(paragraph) => paragraph.add_formatted_text(text, font),
            Sink::Link(link) => link.add_formatted_text(text, font),
        }
    }
}

fn convert_children<'a>(
    cv: &mut Converter<'a>,
    walk: &mut Walk,
    sink: &mut Sink<'_>,
    inlines: &'a [Inline],
    formatting: &FontStyle,
) -> Result<(), ComposeError> {
    let count = inlines.len();
    for (index, inline) in inlines.iter().enumerate() {
        let next = inlines.get(index + 1).and_then(Inline::span);
        convert_one(cv, walk, sink, inline, ElementPosition::new(index, count), next, formatting)?;
    }
    Ok(())
}

fn convert_one<'a>(
    cv: &mut Converter<'a>,
    walk: &mut Walk,
    sink: &mut Sink<'_>,
    inline: &'a Inline,
    position: ElementPosition,
    next: Option<Span>,
    formatting: &FontStyle,
) -> Result<(), ComposeError> {
    match inline {
        Inline::Text { span, text } => convert_text(cv, walk, sink, *span, text, formatting),
        Inline::Emphasis { inlines, .. } => {
            convert_emphasis(cv, walk, sink, inline, inlines, position, formatting)
        }
        Inline::Code { span, text } => {
            convert_code(cv, walk, sink, *span, text, position, next, formatting)
        }
        Inline::Link {
            span,
            url,
            inlines,
            ..
        } => convert_link(cv, walk, sink, *span, url, inlines, position, next, formatting),
        Inline::Image { span, url, .. } => {
            convert_image(cv, walk, sink, *span, url, position, next)
        }
        Inline::AutoLink { span: _, url } => convert_autolink(cv, walk, sink, url, position),
        Inline::LineBreak { hard, .. } => {
            if *hard {
                sink.push(Run::LineBreak);
            } else {
                sink.add_text(" ");
            }
            Ok(())
        }
        Inline::FootnoteLink { span: _, ordinal } => {
            convert_footnote_link(cv, walk, sink, *ordinal, position)
        }
        Inline::Math { span: _, text } => convert_math(cv, sink, text, formatting),
    }
}

// ---- literal text and fields ----

fn convert_text(
    cv: &mut Converter<'_>,
    walk: &Walk,
    sink: &mut Sink<'_>,
    span: Option<Span>,
    text: &str,
    formatting: &FontStyle,
) -> Result<(), ComposeError> {
    let mut cursor = 0;
    for found in FIELD_RE.find_iter(text) {
        if found.start() > cursor {
            add_text_span(cv, sink, &text[cursor..found.start()], formatting)?;
        }
        emit_field(cv, walk, sink, span, found.as_str(), formatting)?;
        cursor = found.end();
    }
    if cursor < text.len() {
        add_text_span(cv, sink, &text[cursor..], formatting)?;
    }
    Ok(())
}

/// One literal run: the accumulated formatting flattened over the
/// container's base font, with the literal hook applied last.
fn add_text_span(
    cv: &mut Converter<'_>,
    sink: &mut Sink<'_>,
    text: &str,
    formatting: &FontStyle,
) -> Result<(), ComposeError> {
    let font = {
        let scope = cv.scope();
        merge::merge_font(formatting, sink.font(), scope.font_size, scope.width, true)?
    };
    let text = match &mut cv.hooks.literal {
        Some(hook) => hook(text).unwrap_or_else(|| text.to_string()),
        None => text.to_string(),
    };
    sink.add_formatted_text(text, font);
    Ok(())
}

fn emit_field(
    cv: &mut Converter<'_>,
    walk: &Walk,
    sink: &mut Sink<'_>,
    span: Option<Span>,
    matched: &str,
    formatting: &FontStyle,
) -> Result<(), ComposeError> {
    let inner = matched
        .trim_start_matches('{')
        .trim_end_matches('}')
        .trim();
    if let Some(target) = inner.strip_prefix("#:") {
        sink.push(Run::Field(Field::PageRef {
            target: target.trim().to_string(),
        }));
        return Ok(());
    }
    let key = match inner.split_once(char::is_whitespace) {
        Some((key, _)) => key,
        None => inner,
    };
    match key.to_ascii_lowercase().as_str() {
        "page" => sink.push(Run::Field(Field::Page)),
        "pages" => sink.push(Run::Field(Field::PageCount)),
        "sectionname" => sink.push(Run::Field(Field::SectionLabel)),
        "pagebreak" | "sectionbreak" | "setsectionname" => {
            let line = cv.line_of(span.or(walk.block_span));
            cv.warn(
                WarningKind::Unsupported,
                format!("command '{key}' must be the only content of a paragraph, line {line}"),
            );
        }
        _ => {
            let line = cv.line_of(span.or(walk.block_span));
            cv.warn(
                WarningKind::Unsupported,
                format!("unknown command '{key}', line {line}"),
            );
            add_text_span(cv, sink, matched, formatting)?;
        }
    }
    Ok(())
}

// ---- emphasis ----

fn convert_emphasis<'a>(
    cv: &mut Converter<'a>,
    walk: &mut Walk,
    sink: &mut Sink<'_>,
    inline: &'a Inline,
    children: &'a [Inline],
    position: ElementPosition,
    formatting: &FontStyle,
) -> Result<(), ComposeError> {
    let Inline::Emphasis { delimiter, .. } = inline else {
        return Ok(());
    };
    let emphasis_type = inline.emphasis_type();
    let mut attributes = ElementAttributes::default();
    attributes.markup = Some(delimiter.to_string());
    let descriptor = SingleElementDescriptor {
        element_type: emphasis_type.unwrap_or(ElementType::Any),
        attributes,
        position,
        plain_text: Some(inline.plain_text()),
    };

    // Unrecognized delimiter runs render transparently.
    let formatting = match emphasis_type {
        Some(_) => {
            let chain = cv.chain_through(descriptor.clone(), &walk.ancestors);
            let style = cv.styles.resolve(&chain);
            style.font.apply_to(formatting)
        }
        None => formatting.clone(),
    };

    walk.ancestors.push(descriptor);
    let converted = convert_children(cv, walk, sink, children, &formatting);
    walk.ancestors.pop();
    converted
}

// ---- code spans ----

/// A backtick span. Highlight providers get a shot at it, keyed by a
/// `lang` attribute when one is attached.
#[allow(clippy::too_many_arguments)]
fn convert_code<'a>(
    cv: &mut Converter<'a>,
    walk: &Walk,
    sink: &mut Sink<'_>,
    span: Option<Span>,
    text: &'a str,
    position: ElementPosition,
    next: Option<Span>,
    formatting: &FontStyle,
) -> Result<(), ComposeError> {
    let attributes = inline_attributes(cv, span, next, walk.block_span);
    let language = attributes.get("lang").unwrap_or_default().to_string();
    let descriptor = SingleElementDescriptor {
        element_type: ElementType::InlineCode,
        attributes,
        position,
        plain_text: Some(text.to_string()),
    };
    let chain = cv.chain_through(descriptor, &walk.ancestors);
    let style = cv.styles.resolve(&chain);
    let mut formatting = style.font.apply_to(formatting);

    match cv.providers.highlight(text, &language) {
        Some(highlighted) => {
            if let Some(message) = &highlighted.message {
                cv.warn(WarningKind::Plugin, message.clone());
            }
            for piece in &highlighted.spans {
                if let Some(color) = piece.color {
                    formatting.color = Some(color);
                }
                if piece.bold {
                    formatting.bold = Some(true);
                }
                if piece.italic {
                    formatting.italic = Some(true);
                }
                if piece.underline {
                    formatting.underline = Some(Underline::Single);
                }
                add_text_span(cv, sink, &piece.text, &formatting)?;
            }
        }
        None => add_text_span(cv, sink, text, &formatting)?,
    }
    Ok(())
}

// ---- links ----

fn convert_footnote_link(
    cv: &mut Converter<'_>,
    walk: &Walk,
    sink: &mut Sink<'_>,
    ordinal: usize,
    position: ElementPosition,
) -> Result<(), ComposeError> {
    let descriptor = SingleElementDescriptor {
        element_type: ElementType::FootnoteReference,
        position,
        ..Default::default()
    };
    let chain = cv.chain_through(descriptor, &walk.ancestors);
    let style = cv.styles.resolve(&chain);
    let formatting = style.font.apply_to(&FontStyle::default());

    let (font_size, width) = {
        let scope = cv.scope();
        (scope.font_size, scope.width)
    };
    let mut link = Hyperlink::new(format!("Footnote_{ordinal}"), HyperlinkKind::Local);
    let font = merge::merge_font(&formatting, &FontSpec::default(), font_size, width, false)?;
    link.add_formatted_text(ordinal.to_string(), font);
    sink.push(Run::Hyperlink(link));
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn convert_link<'a>(
    cv: &mut Converter<'a>,
    walk: &mut Walk,
    sink: &mut Sink<'_>,
    span: Option<Span>,
    url: &'a str,
    children: &'a [Inline],
    position: ElementPosition,
    next: Option<Span>,
    formatting: &FontStyle,
) -> Result<(), ComposeError> {
    let attributes = inline_attributes(cv, span, next, walk.block_span);
    let toc = attributes.style.as_deref().and_then(toc_element_type);
    let plain: String = children.iter().map(Inline::plain_text).collect();
    let descriptor = SingleElementDescriptor {
        element_type: toc.unwrap_or(ElementType::Hyperlink),
        attributes,
        position,
        plain_text: Some(plain),
    };
    let chain = cv.chain_through(descriptor.clone(), &walk.ancestors);
    let style = cv.styles.resolve(&chain);
    let (font_size, width) = {
        let scope = cv.scope();
        (scope.font_size, scope.width)
    };

    let target = url.trim_start_matches('#');
    let kind = if url.starts_with('#') {
        HyperlinkKind::Local
    } else {
        HyperlinkKind::Web
    };
    let mut link = Hyperlink::new(target, kind);
    link.font = merge::merge_font(&style.font, &link.font, font_size, width, false)?;

    walk.ancestors.push(descriptor);
    let converted = {
        let mut inner = Sink::Link(&mut link);
        convert_children(cv, walk, &mut inner, children, formatting)
    };
    walk.ancestors.pop();
    converted?;

    if toc.is_some() {
        let tab_font = link.font.clone();
        link.add_formatted_text("\t", tab_font);
        link.add_page_ref_field(target);
    }
    sink.push(Run::Hyperlink(link));

    // Entry paragraphs take the level's format and a dotted leader
    // running to the right page edge.
    if toc.is_some() {
        if let Sink::Paragraph(paragraph) = sink {
            merge::merge_format(&style, &mut paragraph.format, font_size, width)?;
            paragraph.format.left_indent += style.margin.left.eval(font_size, width)?;
            paragraph.format.add_tab_stop(
                cv.options.page_width,
                TabAlignment::Right,
                TabLeader::Dots,
            );
        }
    }
    Ok(())
}

fn convert_autolink(
    cv: &mut Converter<'_>,
    walk: &Walk,
    sink: &mut Sink<'_>,
    url: &str,
    position: ElementPosition,
) -> Result<(), ComposeError> {
    let descriptor = SingleElementDescriptor {
        element_type: ElementType::Hyperlink,
        position,
        plain_text: Some(url.to_string()),
        ..Default::default()
    };
    let chain = cv.chain_through(descriptor, &walk.ancestors);
    let style = cv.styles.resolve(&chain);
    let (font_size, width) = {
        let scope = cv.scope();
        (scope.font_size, scope.width)
    };
    let mut link = Hyperlink::new(url, HyperlinkKind::Web);
    link.font = merge::merge_font(&style.font, &link.font, font_size, width, false)?;
    link.add_text(url);
    sink.push(Run::Hyperlink(link));
    Ok(())
}

// ---- images ----

fn convert_image<'a>(
    cv: &mut Converter<'a>,
    walk: &Walk,
    sink: &mut Sink<'_>,
    span: Option<Span>,
    url: &'a str,
    position: ElementPosition,
    next: Option<Span>,
) -> Result<(), ComposeError> {
    if let Some(content) = url.strip_prefix("md:plugin") {
        if let Some(image) = cv.providers.generate_image(content, "plugin") {
            if let Some(message) = &image.message {
                cv.warn(WarningKind::Plugin, message.clone());
            }
            sink.push(Run::Image(ImageRun::new(image.path)));
        }
        return Ok(());
    }

    let attributes = inline_attributes(cv, span, next, walk.block_span);
    let line = cv.line_of(span.or(walk.block_span));
    let (font_size, width) = {
        let scope = cv.scope();
        (scope.font_size, scope.width)
    };

    let mut path = cv.options.image_dir.clone();
    if !path.is_empty() && !path.ends_with(['/', '\\']) {
        path.push(std::path::MAIN_SEPARATOR);
    }
    path.push_str(url);
    let mut image = ImageRun::new(path);

    if let Some(value) = attributes.get("dpi") {
        match value.parse::<f32>() {
            Ok(dpi) => image.dpi = Some(dpi),
            Err(_) => cv.warn(
                WarningKind::Dimension,
                format!("bad dpi '{value}', line {line}"),
            ),
        }
    }
    image.height = dimension_attr(cv, &attributes, "height", font_size, width, line);
    image.width = dimension_attr(cv, &attributes, "width", font_size, width, line);
    sink.push(Run::Image(image));

    // An image standing alone in its block may align the whole
    // paragraph.
    if walk.ancestors.is_empty() && position.count == 1 {
        if let Sink::Paragraph(paragraph) = sink {
            match attributes.get("align") {
                Some("right") => paragraph.format.alignment = Some(Alignment::Right),
                Some("center") => paragraph.format.alignment = Some(Alignment::Center),
                Some("left") => paragraph.format.alignment = Some(Alignment::Left),
                _ => {}
            }
        }
    }
    Ok(())
}

/// Reads a dimension-valued attribute, in the block's evaluation
/// context. Bad values warn and count as absent.
fn dimension_attr(
    cv: &mut Converter<'_>,
    attributes: &ElementAttributes,
    key: &str,
    font_size: f32,
    width: f32,
    line: usize,
) -> Option<f32> {
    let value = attributes.get(key)?;
    if value.is_empty() {
        return None;
    }
    let parsed = match value.parse::<Dimension>() {
        Ok(parsed) => parsed,
        Err(err) => {
            cv.warn(WarningKind::Dimension, format!("{err}, line {line}"));
            return None;
        }
    };
    match parsed.eval(font_size, width) {
        Ok(points) => Some(points),
        Err(err) => {
            cv.warn(WarningKind::Dimension, format!("{err}, line {line}"));
            None
        }
    }
}

fn convert_math(
    cv: &mut Converter<'_>,
    sink: &mut Sink<'_>,
    text: &str,
    formatting: &FontStyle,
) -> Result<(), ComposeError> {
    match cv.providers.generate_image(text, "math") {
        Some(image) => {
            if let Some(message) = &image.message {
                cv.warn(WarningKind::Plugin, message.clone());
            }
            sink.push(Run::Image(ImageRun::new(image.path)));
            Ok(())
        }
        // No provider accepted: the raw source stays in the text flow.
        None => add_text_span(cv, sink, text, formatting),
    }
}

// ---- helpers ----

/// Attribute run directly after an inline node. Only links, images and
/// code spans carry one.
fn inline_attributes<'a>(
    cv: &mut Converter<'a>,
    span: Option<Span>,
    next: Option<Span>,
    block: Option<Span>,
) -> ElementAttributes {
    let Some(span) = span else {
        return ElementAttributes::default();
    };
    let tree = cv.tree;
    let line = cv.line_of(Some(span));
    let text = cv.attr_or_warn(line, tree.inline_attribute_suffix(span, next, block));
    ElementAttributes::parse(text)
}

/// Style names that turn a link into a table-of-contents entry.
fn toc_element_type(style: &str) -> Option<ElementType> {
    match style {
        "Index" => Some(ElementType::Index),
        "Toc1" => Some(ElementType::toc(1)),
        "Toc2" => Some(ElementType::toc(2)),
        "Toc3" => Some(ElementType::toc(3)),
        "Toc4" => Some(ElementType::toc(4)),
        "Toc5" => Some(ElementType::toc(5)),
        "Toc6" => Some(ElementType::toc(6)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use markflow_doc::{Block, Document as Tree};
    use markflow_render_core::{BodyElement, Document, PageSetup};
    use markflow_style::StyleManager;
    use markflow_types::Warning;

    use super::*;
    use crate::context::{ComposeOptions, Converter, Hooks};
    use crate::plugin::{GeneratedImage, ImageProvider, ProviderSet};

    fn text(content: &str) -> Inline {
        Inline::Text { span: None, text: content.to_string() }
    }

    fn tree_of(inlines: Vec<Inline>) -> Tree {
        Tree::from_blocks(vec![Block::Paragraph { span: None, inlines }])
    }

    fn compose_with(
        styles: &StyleManager,
        providers: &ProviderSet,
        tree: &Tree,
    ) -> (Document, Vec<Warning>) {
        let mut hooks = Hooks::default();
        let options = ComposeOptions::default();
        let mut converter =
            Converter::new(styles, tree, providers, &mut hooks, &options).unwrap();
        let mut document = Document::new();
        converter.convert_into(&mut document).unwrap();
        (document, converter.take_warnings())
    }

    fn compose(tree: &Tree) -> (Document, Vec<Warning>) {
        compose_with(&StyleManager::new(), &ProviderSet::new(), tree)
    }

    fn runs(document: &Document) -> &[Run] {
        match &document.sections[0].body.elements[0] {
            BodyElement::Paragraph(paragraph) => &paragraph.runs,
            other => panic!("expected a paragraph, got {other:?}"),
        }
    }

    #[test]
    fn nested_emphasis_accumulates_formatting() {
        let mut styles = StyleManager::new();
        let strong = styles.add_style("strong");
        strong.borrow_mut().font.bold = Some(true);
        let slanted = styles.add_style("slanted");
        slanted.borrow_mut().font.italic = Some(true);
        styles.for_element(ElementType::Bold).bind("strong").unwrap();
        styles.for_element(ElementType::Italic).bind("slanted").unwrap();

        let inner = Inline::Emphasis {
            span: None,
            delimiter: '*',
            count: 1,
            inlines: vec![text("both")],
        };
        let tree = tree_of(vec![Inline::Emphasis {
            span: None,
            delimiter: '*',
            count: 2,
            inlines: vec![text("loud "), inner],
        }]);

        let (document, warnings) = compose_with(&styles, &ProviderSet::new(), &tree);
        assert!(warnings.is_empty());
        let runs = runs(&document);
        assert!(matches!(&runs[0], Run::Text { text, font } if text == "loud " && font.bold && !font.italic));
        assert!(matches!(&runs[1], Run::Text { text, font } if text == "both" && font.bold && font.italic));
    }

    #[test]
    fn unrecognized_delimiter_runs_render_transparently() {
        let mut styles = StyleManager::new();
        let strong = styles.add_style("strong");
        strong.borrow_mut().font.bold = Some(true);
        styles.for_element(ElementType::Bold).bind("strong").unwrap();

        let tree = tree_of(vec![Inline::Emphasis {
            span: None,
            delimiter: '*',
            count: 3,
            inlines: vec![text("x")],
        }]);
        let (document, _) = compose_with(&styles, &ProviderSet::new(), &tree);
        assert!(matches!(&runs(&document)[0], Run::Text { text, font } if text == "x" && !font.bold));
    }

    #[test]
    fn fields_split_the_literal_text() {
        let tree = tree_of(vec![text("see page {page} of {pages}")]);
        let (document, warnings) = compose(&tree);
        assert!(warnings.is_empty());
        let runs = runs(&document);
        assert!(matches!(&runs[0], Run::Text { text, .. } if text == "see page "));
        assert!(matches!(&runs[1], Run::Field(Field::Page)));
        assert!(matches!(&runs[2], Run::Text { text, .. } if text == " of "));
        assert!(matches!(&runs[3], Run::Field(Field::PageCount)));
    }

    #[test]
    fn page_references_name_their_target() {
        let tree = tree_of(vec![text("on page {#:intro}")]);
        let (document, _) = compose(&tree);
        assert!(matches!(
            &runs(&document)[1],
            Run::Field(Field::PageRef { target }) if target == "intro"
        ));
    }

    #[test]
    fn misplaced_block_commands_warn_and_vanish() {
        let tree = tree_of(vec![text("middle {pagebreak} text")]);
        let (document, warnings) = compose(&tree);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::Unsupported);
        assert!(warnings[0].message.contains("pagebreak"));
        let runs = runs(&document);
        assert_eq!(runs.len(), 2);
        assert!(matches!(&runs[1], Run::Text { text, .. } if text == " text"));
    }

    #[test]
    fn unknown_commands_warn_but_stay_in_the_text() {
        let tree = tree_of(vec![text("a {frobnicate} b")]);
        let (document, warnings) = compose(&tree);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("frobnicate"));
        let runs = runs(&document);
        assert!(matches!(&runs[1], Run::Text { text, .. } if text == "{frobnicate}"));
    }

    #[test]
    fn footnote_references_link_to_their_bookmark() {
        let tree = tree_of(vec![text("claim"), Inline::FootnoteLink { span: None, ordinal: 2 }]);
        let (document, _) = compose(&tree);
        let Run::Hyperlink(link) = &runs(&document)[1] else {
            panic!("expected a hyperlink run");
        };
        assert_eq!(link.target, "Footnote_2");
        assert_eq!(link.kind, HyperlinkKind::Local);
        assert!(matches!(&link.runs[0], Run::Text { text, .. } if text == "2"));
    }

    #[test]
    fn hard_breaks_break_and_soft_breaks_space() {
        let tree = tree_of(vec![
            text("a"),
            Inline::LineBreak { span: None, hard: true },
            text("b"),
            Inline::LineBreak { span: None, hard: false },
            text("c"),
        ]);
        let (document, _) = compose(&tree);
        let runs = runs(&document);
        assert!(matches!(&runs[1], Run::LineBreak));
        assert!(matches!(&runs[3], Run::Text { text, .. } if text == " "));
    }

    #[test]
    fn a_leading_soft_break_is_dropped() {
        let tree = tree_of(vec![
            Inline::LineBreak { span: None, hard: false },
            text("x"),
        ]);
        let (document, _) = compose(&tree);
        let runs = runs(&document);
        assert_eq!(runs.len(), 1);
        assert!(matches!(&runs[0], Run::Text { text, .. } if text == "x"));
    }

    #[test]
    fn anchors_make_local_links_and_urls_make_web_links() {
        let tree = tree_of(vec![Inline::Link {
            span: None,
            url: "#intro".to_string(),
            title: None,
            inlines: vec![text("Intro")],
        }]);
        let (document, _) = compose(&tree);
        let Run::Hyperlink(link) = &runs(&document)[0] else {
            panic!("expected a hyperlink run");
        };
        assert_eq!(link.target, "intro");
        assert_eq!(link.kind, HyperlinkKind::Local);
        assert!(matches!(&link.runs[0], Run::Text { text, .. } if text == "Intro"));

        let tree = tree_of(vec![Inline::Link {
            span: None,
            url: "https://example.com".to_string(),
            title: None,
            inlines: vec![text("site")],
        }]);
        let (document, _) = compose(&tree);
        let Run::Hyperlink(link) = &runs(&document)[0] else {
            panic!("expected a hyperlink run");
        };
        assert_eq!(link.target, "https://example.com");
        assert_eq!(link.kind, HyperlinkKind::Web);
    }

    #[test]
    fn autolinks_show_their_url() {
        let tree = tree_of(vec![Inline::AutoLink {
            span: None,
            url: "https://example.com".to_string(),
        }]);
        let (document, _) = compose(&tree);
        let Run::Hyperlink(link) = &runs(&document)[0] else {
            panic!("expected a hyperlink run");
        };
        assert_eq!(link.target, "https://example.com");
        assert!(matches!(&link.runs[0], Run::Text { text, .. } if text == "https://example.com"));
    }

    #[test]
    fn toc_links_run_a_dotted_leader_to_a_page_reference() {
        let source = "[Intro](#intro){.Toc1}\n";
        let mut tree = Tree::new(source);
        tree.blocks = vec![Block::Paragraph {
            span: Some(Span::new(0, 22)),
            inlines: vec![Inline::Link {
                span: Some(Span::new(0, 15)),
                url: "#intro".to_string(),
                title: None,
                inlines: vec![Inline::Text {
                    span: Some(Span::new(1, 6)),
                    text: "Intro".to_string(),
                }],
            }],
        }];

        let (document, warnings) = compose(&tree);
        assert!(warnings.is_empty());
        let BodyElement::Paragraph(paragraph) = &document.sections[0].body.elements[0] else {
            panic!("expected a paragraph");
        };
        let stop = paragraph.format.tab_stops.last().expect("tab stop");
        assert!(matches!(stop.alignment, TabAlignment::Right));
        assert!(matches!(stop.leader, TabLeader::Dots));
        assert!((stop.position - ComposeOptions::default().page_width).abs() < 0.01);

        let Run::Hyperlink(link) = &paragraph.runs[0] else {
            panic!("expected a hyperlink run");
        };
        assert_eq!(link.target, "intro");
        assert!(matches!(&link.runs[0], Run::Text { text, .. } if text == "Intro"));
        assert!(matches!(&link.runs[1], Run::Text { text, .. } if text == "\t"));
        assert!(matches!(
            &link.runs[2],
            Run::Field(Field::PageRef { target }) if target == "intro"
        ));
    }

    #[test]
    fn images_join_the_image_dir_and_read_size_attributes() {
        let source = "![alt](pic.png){width=50% dpi=96}\n";
        let mut tree = Tree::new(source);
        tree.blocks = vec![Block::Paragraph {
            span: Some(Span::new(0, 33)),
            inlines: vec![Inline::Image {
                span: Some(Span::new(0, 15)),
                url: "pic.png".to_string(),
                title: None,
                inlines: vec![],
            }],
        }];

        let styles = StyleManager::new();
        let providers = ProviderSet::new();
        let mut hooks = Hooks::default();
        let options = ComposeOptions {
            image_dir: "assets".to_string(),
            ..Default::default()
        };
        let mut converter =
            Converter::new(&styles, &tree, &providers, &mut hooks, &options).unwrap();
        let mut document = Document::new();
        converter.convert_into(&mut document).unwrap();
        assert!(converter.take_warnings().is_empty());

        let Run::Image(image) = &runs(&document)[0] else {
            panic!("expected an image run");
        };
        assert_eq!(image.path, format!("assets{}pic.png", std::path::MAIN_SEPARATOR));
        assert_eq!(image.dpi, Some(96.0));
        let width = image.width.expect("width attribute");
        let half = PageSetup::default().body_width() / 2.0;
        assert!((width - half).abs() < 0.01);
        assert_eq!(image.height, None);
    }

    struct Formula;

    impl ImageProvider for Formula {
        fn generate(&self, _content: &str, info: &str) -> Option<GeneratedImage> {
            (info == "math").then(|| GeneratedImage {
                path: "formula.png".to_string(),
                message: None,
            })
        }
    }

    #[test]
    fn math_renders_through_a_provider_or_stays_text() {
        let tree = tree_of(vec![Inline::Math { span: None, text: "E=mc^2".to_string() }]);

        let (document, _) = compose(&tree);
        assert!(matches!(&runs(&document)[0], Run::Text { text, .. } if text == "E=mc^2"));

        let mut providers = ProviderSet::new();
        providers.add_image_provider(Formula);
        let (document, warnings) = compose_with(&StyleManager::new(), &providers, &tree);
        assert!(warnings.is_empty());
        assert!(matches!(&runs(&document)[0], Run::Image(image) if image.path == "formula.png"));
    }

    struct Diagram;

    impl ImageProvider for Diagram {
        fn generate(&self, content: &str, info: &str) -> Option<GeneratedImage> {
            (info == "plugin" && content == ":dot").then(|| GeneratedImage {
                path: "diagram.png".to_string(),
                message: None,
            })
        }
    }

    #[test]
    fn plugin_images_go_through_the_image_providers() {
        let mut providers = ProviderSet::new();
        providers.add_image_provider(Diagram);
        let tree = tree_of(vec![Inline::Image {
            span: None,
            url: "md:plugin:dot".to_string(),
            title: None,
            inlines: vec![],
        }]);
        let (document, warnings) = compose_with(&StyleManager::new(), &providers, &tree);
        assert!(warnings.is_empty());
        assert!(matches!(&runs(&document)[0], Run::Image(image) if image.path == "diagram.png"));
    }

    #[test]
    fn the_literal_hook_rewrites_text_runs() {
        let tree = tree_of(vec![text("shout")]);
        let styles = StyleManager::new();
        let providers = ProviderSet::new();
        let mut hooks = Hooks::default();
        hooks.literal = Some(Box::new(|text| Some(text.to_uppercase())));
        let options = ComposeOptions::default();
        let mut converter =
            Converter::new(&styles, &tree, &providers, &mut hooks, &options).unwrap();
        let mut document = Document::new();
        converter.convert_into(&mut document).unwrap();
        assert!(matches!(&runs(&document)[0], Run::Text { text, .. } if text == "SHOUT"));
    }
}
