//! Raw-source access and attribute-text recovery.
//!
//! The parser consumes `{…}` attribute runs, so the literal text is only
//! reachable through the source string, in the gaps between node spans: in
//! front of a block, after a leaf's last inline, between siblings, or (for a
//! container) between the previous sibling and the container's first line.
//! The methods here slice those windows and apply the recognition rules; the
//! result feeds `ElementAttributes::parse`.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::tree::Document;

/// A byte range into the document source, end exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// A node span that does not line up with the source text. Recoverable:
/// callers treat it as "no attribute text" and report a structural warning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("span {start}..{end} does not lie on the source text")]
    Bounds { start: usize, end: usize },
    #[error("missing span data on {0}")]
    MissingSpan(&'static str),
}

static BRACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[^}]*\}").expect("brace pattern"));
static LONE_BRACE_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\{[^}]+\}\s*$").expect("lone brace line pattern"));
static HEADING_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#+ *\{[^}]+\}").expect("heading suffix pattern"));
static BRACE_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[^}]+\}").expect("brace suffix pattern"));

impl Document {
    /// The source text covered by `span`.
    pub fn slice(&self, span: Span) -> Result<&str, SourceError> {
        let bounds = SourceError::Bounds { start: span.start, end: span.end };
        if span.start > span.end || span.end > self.source.len() {
            return Err(bounds);
        }
        self.source.get(span.start..span.end).ok_or(bounds)
    }

    /// 0-based index of the line containing the byte offset.
    pub fn line_index(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(insertion) => insertion - 1,
        }
    }

    /// One source line including its terminator; the last line may be
    /// unterminated.
    pub fn line(&self, index: usize) -> Option<&str> {
        let start = *self.line_starts.get(index)?;
        let end = self.line_starts.get(index + 1).copied().unwrap_or(self.source.len());
        self.source.get(start..end)
    }

    /// Attribute text in front of a leaf block: the window between the block
    /// start and its first inline, or, when that holds no `{…}` group, a
    /// preceding line consisting solely of one.
    ///
    /// Code blocks have no inlines; passing `None` goes straight to the
    /// preceding-line rule.
    pub fn leaf_attribute_prefix(
        &self,
        block: Span,
        first_inline: Option<Span>,
    ) -> Result<&str, SourceError> {
        if let Some(first) = first_inline {
            let window = self.slice(Span::new(block.start, first.start))?;
            if BRACE_RE.is_match(window) {
                return Ok(window);
            }
        }
        self.preceding_attribute_line(block)
    }

    /// A whole preceding line of the form `{…}` styling the block under it.
    /// Only applies when the block starts at the beginning of its own line;
    /// an indented continuation belongs to an enclosing container instead.
    fn preceding_attribute_line(&self, block: Span) -> Result<&str, SourceError> {
        if block.start > self.source.len() {
            return Err(SourceError::Bounds { start: block.start, end: block.end });
        }
        let line = self.line_index(block.start);
        if line == 0 {
            return Ok("");
        }
        let previous = self.line(line - 1).unwrap_or("");
        if !LONE_BRACE_LINE_RE.is_match(previous) {
            return Ok("");
        }
        if block.start > 0 && self.source.as_bytes()[block.start - 1] != b'\n' {
            return Ok("");
        }
        Ok(previous)
    }

    /// Attribute text after a leaf block: the window between its last inline
    /// and the block end, or a `{…}` group on the remainder of the block's
    /// final line. When the last inline is a link and the group follows the
    /// block without a separating space, the group belongs to the link and
    /// this returns nothing.
    pub fn leaf_attribute_suffix(
        &self,
        block: Span,
        last_inline: Option<Span>,
        last_is_link: bool,
    ) -> Result<&str, SourceError> {
        let Some(last) = last_inline else {
            return Ok("");
        };
        let window = self.slice(Span::new(last.end, block.end))?;
        if !last_is_link && BRACE_RE.is_match(window) {
            return Ok(window);
        }

        let following = self.rest_of_line(block.end)?;

        // A hash run after a heading separates inline attributes from the
        // heading's own: `# Title # {.style}` styles the block.
        if let Some(found) = HEADING_SUFFIX_RE.find(following) {
            return Ok(found.as_str());
        }
        if let Some(found) = BRACE_SUFFIX_RE.find(following) {
            if last_is_link && self.source.as_bytes().get(block.end) != Some(&b' ') {
                return Ok("");
            }
            return Ok(found.as_str());
        }
        Ok("")
    }

    /// Attribute text in front of a container block: everything between the
    /// previous sibling (or the parent's start) and the container itself.
    pub fn container_attribute_prefix(
        &self,
        block: Span,
        prev_sibling: Option<Span>,
        parent: Option<Span>,
    ) -> Result<&str, SourceError> {
        let start = match (prev_sibling, parent) {
            (Some(prev), _) => prev.end,
            (None, Some(parent)) => parent.start,
            (None, None) => return Ok(""),
        };
        self.slice(Span::new(start, block.start))
    }

    /// Attribute text directly after an inline node: the gap up to the next
    /// sibling, or to the end of the enclosing block for a trailing inline.
    pub fn inline_attribute_suffix(
        &self,
        inline: Span,
        next_sibling: Option<Span>,
        enclosing_block: Option<Span>,
    ) -> Result<&str, SourceError> {
        match (next_sibling, enclosing_block) {
            (Some(next), _) => self.slice(Span::new(inline.end, next.start)),
            (None, Some(block)) => self.slice(Span::new(inline.end, block.end)),
            (None, None) => Ok(""),
        }
    }

    fn rest_of_line(&self, offset: usize) -> Result<&str, SourceError> {
        if offset > self.source.len() {
            return Err(SourceError::Bounds { start: offset, end: offset });
        }
        let end = self.source[offset..]
            .find('\n')
            .map(|i| offset + i + 1)
            .unwrap_or(self.source.len());
        self.slice(Span::new(offset, end))
    }
}
