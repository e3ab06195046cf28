//! Conversion state shared by the block and inline converters.
//!
//! A [`Converter`] borrows the style registry, the source tree and the
//! provider set, and carries the mutable pieces of a run: the stack of
//! open ancestor [`Scope`]s, the hook set and the warning log.

use std::fmt;

use markflow_doc::{Document as Tree, SourceError, Span};
use markflow_render_core::{BlockList, Document, PageSetup, ParagraphFormat};
use markflow_style::{CascadingStyle, SingleElementDescriptor, StyleManager, StylingDescriptor};
use markflow_types::{ElementType, Warning, WarningKind};

use crate::error::ComposeError;
use crate::output::Target;
use crate::plugin::ProviderSet;

/// Font size, in points, a document falls back to when no style names one.
pub(crate) const DEFAULT_FONT_SIZE: f32 = 12.0;

/// Runs after a block's style is resolved, before the box model sees it.
pub type StylingPreparedHook = Box<dyn FnMut(&mut CascadingStyle, &StylingDescriptor)>;

/// Runs after a resolved style has been merged into the output
/// paragraph format.
pub type StylingAppliedHook = Box<dyn FnMut(&mut ParagraphFormat, &StylingDescriptor)>;

/// May rewrite literal text before it reaches the output. Returning
/// `None` keeps the text as is.
pub type LiteralHook = Box<dyn FnMut(&str) -> Option<String>>;

/// Override points observers can hang on a conversion run.
#[derive(Default)]
pub struct Hooks {
    pub styling_prepared: Option<StylingPreparedHook>,
    pub styling_applied: Option<StylingAppliedHook>,
    pub literal: Option<LiteralHook>,
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("styling_prepared", &self.styling_prepared.is_some())
            .field("styling_applied", &self.styling_applied.is_some())
            .field("literal", &self.literal.is_some())
            .finish()
    }
}

/// Settings a conversion run is parameterised with.
#[derive(Debug, Clone)]
pub struct ComposeOptions {
    /// Usable page width in points. Block widths cascade down from it.
    pub page_width: f32,
    /// Directory that image paths in the source resolve against.
    pub image_dir: String,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        ComposeOptions {
            page_width: PageSetup::default().body_width(),
            image_dir: String::new(),
        }
    }
}

/// What the first paragraph of a list item or footnote shows in its
/// bullet slot.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ItemMarker {
    /// 1-based number for ordered items and footnotes.
    pub(crate) number: Option<u32>,
    /// Task list state, when the item carries a checkbox.
    pub(crate) check: Option<bool>,
}

/// Everything the converter knows about one open ancestor block.
#[derive(Debug, Clone)]
pub(crate) struct Scope {
    pub(crate) descriptor: SingleElementDescriptor,
    pub(crate) style: CascadingStyle,
    /// Resolved font size of the block, in points.
    pub(crate) font_size: f32,
    /// Usable content width of the block, in points.
    pub(crate) width: f32,
    /// Standalone blocks cut the margin cascade: descendants do not
    /// inherit margins through them and stripe walks stop here.
    pub(crate) standalone: bool,
    /// Set on scopes whose child paragraphs render a bullet.
    pub(crate) marker: Option<ItemMarker>,
}

/// Drives a document tree through style resolution and the box model
/// into flat output.
pub struct Converter<'a> {
    pub(crate) styles: &'a StyleManager,
    pub(crate) tree: &'a Tree,
    pub(crate) providers: &'a ProviderSet,
    pub(crate) hooks: &'a mut Hooks,
    pub(crate) options: &'a ComposeOptions,
    pub(crate) scopes: Vec<Scope>,
    warnings: Vec<Warning>,
}

impl<'a> Converter<'a> {
    pub fn new(
        styles: &'a StyleManager,
        tree: &'a Tree,
        providers: &'a ProviderSet,
        hooks: &'a mut Hooks,
        options: &'a ComposeOptions,
    ) -> Result<Self, ComposeError> {
        if !(options.page_width > 0.0) {
            return Err(ComposeError::PageWidth {
                width: options.page_width,
            });
        }
        Ok(Converter {
            styles,
            tree,
            providers,
            hooks,
            options,
            scopes: Vec::new(),
            warnings: Vec::new(),
        })
    }

    /// Converts the whole tree into the body of `document`, appending
    /// to its last section.
    pub fn convert_into(&mut self, document: &mut Document) -> Result<(), ComposeError> {
        self.run(&mut Target::Body(document))
    }

    /// Converts the whole tree into a bare block list. Section commands
    /// are rejected with a warning on this target.
    pub fn convert_fragment(&mut self, blocks: &mut BlockList) -> Result<(), ComposeError> {
        self.run(&mut Target::Fragment(blocks))
    }

    fn run(&mut self, target: &mut Target<'_>) -> Result<(), ComposeError> {
        let root = self.root_scope()?;
        self.scopes.clear();
        self.scopes.push(root);
        let tree = self.tree;
        let result = crate::blocks::convert_blocks(self, &tree.blocks, None, target);
        self.scopes.pop();
        result
    }

    /// The outermost scope. Its width is the full usable page width;
    /// its margins and paddings reach children through the cascade, not
    /// through the width.
    fn root_scope(&self) -> Result<Scope, ComposeError> {
        let descriptor = SingleElementDescriptor {
            element_type: ElementType::Root,
            ..Default::default()
        };
        let style = self
            .styles
            .resolve(&StylingDescriptor::new(vec![descriptor.clone()]));
        let width = self.options.page_width;
        let font_size = style.font.size.eval(DEFAULT_FONT_SIZE, width)?;
        Ok(Scope {
            descriptor,
            style,
            font_size,
            width,
            standalone: true,
            marker: None,
        })
    }

    /// Innermost open scope. The stack always holds at least the root
    /// while a conversion is running.
    pub(crate) fn scope(&self) -> &Scope {
        match self.scopes.last() {
            Some(scope) => scope,
            None => unreachable!(),
        }
    }

    /// The scope enclosing the innermost one, if any.
    pub(crate) fn parent_scope(&self) -> Option<&Scope> {
        self.scopes.len().checked_sub(2).and_then(|i| self.scopes.get(i))
    }

    /// Builds the descriptor chain for an element sitting under the
    /// current scope stack. Innermost first, root sentinel excluded.
    pub(crate) fn chain_with(&self, current: SingleElementDescriptor) -> StylingDescriptor {
        self.chain_through(current, &[])
    }

    /// Like [`Self::chain_with`], with the descriptors of enclosing
    /// inline containers slotted between the element and the block
    /// scopes. `enclosing` is ordered outermost first.
    pub(crate) fn chain_through(
        &self,
        current: SingleElementDescriptor,
        enclosing: &[SingleElementDescriptor],
    ) -> StylingDescriptor {
        let mut elements = vec![current];
        elements.extend(enclosing.iter().rev().cloned());
        elements.extend(
            self.scopes
                .iter()
                .rev()
                .filter(|scope| scope.descriptor.element_type != ElementType::Root)
                .map(|scope| scope.descriptor.clone()),
        );
        StylingDescriptor::new(elements)
    }

    /// 1-based source line of a span, 0 when the node carries none.
    pub(crate) fn line_of(&self, span: Option<Span>) -> usize {
        match span {
            Some(span) => self.tree.line_index(span.start) + 1,
            None => 0,
        }
    }

    pub(crate) fn warn(&mut self, kind: WarningKind, message: impl Into<String>) {
        let warning = Warning::new(kind, message);
        log::warn!("{warning}");
        self.warnings.push(warning);
    }

    /// Unwraps recovered attribute text, downgrading extraction errors
    /// to a warning and empty text.
    pub(crate) fn attr_or_warn(
        &mut self,
        line: usize,
        recovered: Result<&'a str, SourceError>,
    ) -> &'a str {
        match recovered {
            Ok(text) => text,
            Err(err) => {
                self.warn(WarningKind::Structure, format!("{err}, line {line}"));
                ""
            }
        }
    }

    /// Warnings raised so far, in order.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Drains the recorded warnings.
    pub fn take_warnings(&mut self) -> Vec<Warning> {
        std::mem::take(&mut self.warnings)
    }
}
