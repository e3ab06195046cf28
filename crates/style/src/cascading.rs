//! The cascading style itself: a bundle of property groups plus a live
//! link to a base style.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use markflow_types::Color;

use crate::border::BorderStyle;
use crate::bullet::BulletStyle;
use crate::font::FontStyle;
use crate::paragraph::ParagraphStyle;
use crate::spacing::BoxSpacing;
use crate::table::TableStyle;

/// Shared handle to a registered style. Styles reference their base
/// through this handle, so editing a base later is visible to every
/// derived style.
pub type SharedStyle = Rc<RefCell<CascadingStyle>>;

/// A named style whose unset properties fall through to its base.
///
/// Base chains are acyclic; the style manager rejects a rebase that
/// would close a loop. [`CascadingStyle::eval`] flattens the chain into
/// a single self-contained style.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CascadingStyle {
    #[serde(skip)]
    name: String,
    #[serde(skip)]
    base: Option<SharedStyle>,
    #[serde(skip_serializing_if = "FontStyle::is_empty")]
    pub font: FontStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<Color>,
    #[serde(skip_serializing_if = "BoxSpacing::is_empty")]
    pub margin: BoxSpacing,
    #[serde(skip_serializing_if = "BoxSpacing::is_empty")]
    pub padding: BoxSpacing,
    #[serde(skip_serializing_if = "BorderStyle::is_empty")]
    pub border: BorderStyle,
    #[serde(skip_serializing_if = "ParagraphStyle::is_empty")]
    pub paragraph: ParagraphStyle,
    #[serde(skip_serializing_if = "BulletStyle::is_empty")]
    pub bullet: BulletStyle,
    #[serde(skip_serializing_if = "TableStyle::is_empty")]
    pub table: TableStyle,
}

impl CascadingStyle {
    pub(crate) fn new(name: impl Into<String>, base: Option<SharedStyle>) -> Self {
        Self {
            name: name.into(),
            base,
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub fn base(&self) -> Option<&SharedStyle> {
        self.base.as_ref()
    }

    pub(crate) fn set_base(&mut self, base: Option<SharedStyle>) {
        self.base = base;
    }

    /// Flattens the base chain into one style without a base link.
    ///
    /// The chain is folded root first, each level overlaying the result
    /// of the levels above it, so the returned style carries a value for
    /// every property some level set. Font sizes stay relative: a level
    /// that did not set a size contributes `1em`.
    pub fn eval(&self) -> CascadingStyle {
        let mut res = match &self.base {
            Some(base) => base.borrow().eval(),
            None => CascadingStyle::default(),
        };
        self.apply_to(&mut res);
        res.name = self.name.clone();
        res.base = None;
        res
    }

    fn apply_to(&self, res: &mut CascadingStyle) {
        res.background = self.background.or(res.background);
        res.font = self.font.apply_to(&res.font);
        res.paragraph = self.paragraph.apply_to(&res.paragraph);
        res.margin = self.margin.apply_to(&res.margin);
        res.padding = self.padding.apply_to(&res.padding);
        res.border = self.border.apply_to(&res.border);
        res.bullet = self.bullet.apply_to(&res.bullet);
        res.table = self.table.apply_to(&res.table);
    }

    /// Folds `patch` over `self`: properties the patch sets win, the
    /// rest keep their current values. The name and base link stay.
    ///
    /// Unlike the cascade merge, an unset patch size keeps the own size
    /// instead of rebasing it to `1em`.
    pub fn patch_with(&mut self, patch: &CascadingStyle) {
        let size = self.font.size.clone();
        patch.apply_to(self);
        if patch.font.size.is_empty() {
            self.font.size = size;
        }
    }

    /// Copies all property groups of `other` into `self`, keeping the
    /// own name and base link. Used when a registered style is updated
    /// in place.
    pub(crate) fn overwrite_with(&mut self, other: &CascadingStyle) {
        self.font = other.font.clone();
        self.background = other.background;
        self.margin = other.margin.clone();
        self.padding = other.padding.clone();
        self.border = other.border.clone();
        self.paragraph = other.paragraph.clone();
        self.bullet = other.bullet.clone();
        self.table = other.table.clone();
    }
}
