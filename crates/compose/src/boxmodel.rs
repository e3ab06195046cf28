//! Box-model simulation for a flat paragraph renderer.
//!
//! The target document model has no nested boxes. Ancestor margins,
//! paddings and background bands are therefore simulated: left/right sides
//! fold into indentation on the block itself, top/bottom sides become a
//! list of pending [`Stripe`]s that render as synthesized filler
//! paragraphs with an exact line height and a shading color.

use itertools::Itertools;
use markflow_render_core::{BlockList, LineSpacing};
use markflow_style::{CascadingStyle, Dimension, StyleError};
use markflow_types::{BoxSide, Color};

use crate::context::Scope;

/// One horizontal band of vertical space. `color == None` is transparent
/// whitespace, anything else is a painted background band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stripe {
    /// Height in points, already evaluated.
    pub height: f32,
    pub color: Option<Color>,
}

impl Stripe {
    pub fn new(height: f32, color: Option<Color>) -> Self {
        Stripe { height, color }
    }
}

pub(crate) fn is_marginal(scope: &Scope, side: BoxSide) -> bool {
    match side {
        BoxSide::Top => scope.descriptor.position.is_first,
        BoxSide::Bottom => scope.descriptor.position.is_last,
        _ => false,
    }
}

/// Folds the parent's left and right margins and paddings into the block's
/// own style. When the parent paints a background or keeps padding on a
/// side, the block absorbs the parent's padding into its own (so the band
/// stays painted across the full parent width) and inherits the parent's
/// margin; otherwise the margins simply accumulate.
///
/// Unset sides are pinned to an explicit zero afterwards.
pub(crate) fn fold_side_margins(style: &mut CascadingStyle, parent: &Scope) {
    if parent.standalone {
        return;
    }

    for side in [BoxSide::Left, BoxSide::Right] {
        let parent_padding = parent.style.padding.side(side).clone();
        let parent_margin = parent.style.margin.side(side).clone();

        if parent.style.background.is_some() || !parent_padding.is_empty() {
            let padding = style.padding.side(side).clone()
                + parent_padding
                + style.margin.side(side).clone();
            style.padding.set_side(side, padding);
            style.margin.set_side(side, parent_margin);
        } else {
            let margin = style.margin.side(side).clone() + parent_margin;
            style.margin.set_side(side, margin);
        }
    }

    for side in [BoxSide::Left, BoxSide::Right] {
        if style.padding.side(side).is_empty() {
            style.padding.set_side(side, Dimension::pt(0.0));
        }
        if style.margin.side(side).is_empty() {
            style.margin.set_side(side, Dimension::pt(0.0));
        }
    }
}

/// Pins unset top/bottom margins and paddings to explicit zeros. Run after
/// the pending stripes for both sides have been collected.
pub(crate) fn normalize_vertical(style: &mut CascadingStyle) {
    for side in [BoxSide::Top, BoxSide::Bottom] {
        if style.padding.side(side).is_empty() {
            style.padding.set_side(side, Dimension::pt(0.0));
        }
        if style.margin.side(side).is_empty() {
            style.margin.set_side(side, Dimension::pt(0.0));
        }
    }
}

/// Resolves one vertical side of the block into pending stripes, mutating
/// the block's own margin/padding along the way.
///
/// A block that is marginal on the side (first child for top, last child
/// for bottom) takes over the vertical edges of every enclosing container
/// it is flush with. Over a transparent parent that is plain margin
/// accumulation; over a painted parent the edges are gathered as colored
/// stripes, merged, and partially folded back into the block's own padding
/// and margin where colors line up. The remaining stripes must be rendered
/// as fillers by the caller.
///
/// All dimensions evaluate against the block's own font size and width.
pub(crate) fn pending_stripes(
    style: &mut CascadingStyle,
    ancestors: &[Scope],
    side: BoxSide,
    marginal: bool,
    font_size: f32,
    width: f32,
) -> Result<Vec<Stripe>, StyleError> {
    let Some(parent) = ancestors.last() else {
        return Ok(Vec::new());
    };

    if !marginal {
        return interior_stripe(style, parent, side, font_size, width);
    }

    if parent.style.background.is_none() {
        let margin = style.margin.side(side).clone()
            + parent.style.padding.side(side).clone()
            + parent.style.margin.side(side).clone();
        style.margin.set_side(side, margin);
        return Ok(Vec::new());
    }

    let mut pending = gather_stripes(style, ancestors, side, font_size, width)?;
    style.margin.set_side(side, Dimension::pt(0.0));
    pending = merge_stripes(pending);

    // Fold what we can into the block itself before resorting to fillers.
    let borderless = style
        .border
        .side(side)
        .width
        .is_empty_or_zero(font_size, width)?;
    if let Some(first) = pending.first().copied() {
        if borderless && style.background == first.color {
            let padding = style.padding.side(side).clone() + Dimension::pt(first.height);
            style.padding.set_side(side, padding);
            pending.remove(0);
        }
    }
    if let Some(first) = pending.first().copied() {
        if first.color.is_none() {
            let margin = style.margin.side(side).clone() + Dimension::pt(first.height);
            style.margin.set_side(side, margin);
            pending.remove(0);
        }
    }

    // Stripes were collected innermost first but the top side paints
    // outermost first.
    if side == BoxSide::Top {
        pending.reverse();
    }
    Ok(pending)
}

/// An interior sibling inside a painted parent cannot let its margin
/// collapse into transparent space. Either the margin folds into the
/// block's own padding (same background, no border in the way) or it
/// becomes a single stripe of the parent's color.
fn interior_stripe(
    style: &mut CascadingStyle,
    parent: &Scope,
    side: BoxSide,
    font_size: f32,
    width: f32,
) -> Result<Vec<Stripe>, StyleError> {
    let mut pending = Vec::new();
    if parent.style.background.is_none() {
        return Ok(pending);
    }

    let borderless = style
        .border
        .side(side)
        .width
        .is_empty_or_zero(font_size, width)?;
    if parent.style.background == style.background && borderless {
        let padding = style.padding.side(side).clone() + style.margin.side(side).clone();
        style.padding.set_side(side, padding);
    } else if !style.margin.side(side).is_empty_or_zero(font_size, width)? {
        pending.push(Stripe::new(
            style.margin.side(side).eval(font_size, width)?,
            parent.style.background,
        ));
    }
    style.margin.set_side(side, Dimension::pt(0.0));
    Ok(pending)
}

/// Walks outward from the block and collects the vertical edge of every
/// container the block is flush with, innermost first. Each level
/// contributes its padding (painted with its own background) and its
/// margin (painted with the background of the level above, margin space
/// lies outside the box). The walk stops at a standalone scope or at the
/// first container the chain is not flush with; that terminal container
/// still contributes the edge the block sits against.
fn gather_stripes(
    style: &CascadingStyle,
    ancestors: &[Scope],
    side: BoxSide,
    font_size: f32,
    width: f32,
) -> Result<Vec<Stripe>, StyleError> {
    let mut stripes = Vec::new();
    let parent = &ancestors[ancestors.len() - 1];

    if !style.margin.side(side).is_empty_or_zero(font_size, width)? {
        stripes.push(Stripe::new(
            style.margin.side(side).eval(font_size, width)?,
            parent.style.background,
        ));
    }

    let mut level = ancestors.len() - 1;
    while level > 0 && !ancestors[level].standalone && is_marginal(&ancestors[level], side) {
        let scope = &ancestors[level];
        let above = &ancestors[level - 1];

        if !scope.style.padding.side(side).is_empty_or_zero(font_size, width)? {
            stripes.push(Stripe::new(
                scope.style.padding.side(side).eval(font_size, width)?,
                scope.style.background,
            ));
        }
        if !scope.style.margin.side(side).is_empty_or_zero(font_size, width)? {
            stripes.push(Stripe::new(
                scope.style.margin.side(side).eval(font_size, width)?,
                above.style.background,
            ));
        }
        level -= 1;
    }

    if level > 0 && !ancestors[level].standalone {
        let scope = &ancestors[level];
        let above = &ancestors[level - 1];
        stripes.push(Stripe::new(
            scope.style.padding.side(side).eval(font_size, width)?,
            scope.style.background,
        ));
        stripes.push(Stripe::new(
            scope.style.margin.side(side).eval(font_size, width)?,
            above.style.background,
        ));
    }
    Ok(stripes)
}

/// Merges adjacent stripes of equal color by summing heights, preserving
/// order. Zero-height stripes are dropped first.
pub(crate) fn merge_stripes(stripes: Vec<Stripe>) -> Vec<Stripe> {
    stripes
        .into_iter()
        .filter(|s| s.height != 0.0)
        .coalesce(|a, b| {
            if a.color == b.color {
                Ok(Stripe::new(a.height + b.height, a.color))
            } else {
                Err((a, b))
            }
        })
        .collect()
}

/// Renders pending stripes as filler paragraphs: no text, exact line
/// height, shading in the stripe color, indentation copied from the owning
/// block. Transparent stripes do not get a paragraph of their own; a
/// leading one becomes the first filler's `space_before`, later ones add
/// to the preceding filler's `space_after`.
///
/// Every filler keeps with the next paragraph except the last one on the
/// bottom side, which would otherwise drag following content along.
pub(crate) fn emit_fillers(
    out: &mut BlockList,
    stripes: &[Stripe],
    side: BoxSide,
    style: &CascadingStyle,
    font_size: f32,
    width: f32,
) -> Result<(), StyleError> {
    if stripes.is_empty() {
        return Ok(());
    }

    let left_indent =
        (style.margin.left.clone() + style.padding.left.clone()).eval(font_size, width)?;
    let right_indent =
        (style.margin.right.clone() + style.padding.right.clone()).eval(font_size, width)?;
    let distance_left = style.padding.left.eval(font_size, width)?;
    let distance_right = style.padding.right.eval(font_size, width)?;
    let last_filler = stripes.iter().rposition(|s| s.color.is_some());

    let mut space_before = 0.0;
    let mut has_filler = false;
    for (index, stripe) in stripes.iter().enumerate() {
        let Some(color) = stripe.color else {
            if has_filler {
                if let Some(filler) = out.last_paragraph_mut() {
                    filler.format.space_after += stripe.height;
                }
            } else {
                space_before += stripe.height;
            }
            continue;
        };

        let filler = out.add_paragraph();
        if space_before != 0.0 {
            filler.format.space_before = space_before;
            space_before = 0.0;
        }
        filler.format.shading = Some(color);
        filler.format.line_spacing = LineSpacing::Exactly(stripe.height);
        filler.format.left_indent = left_indent;
        filler.format.right_indent = right_indent;
        filler.format.borders.distance_left = distance_left;
        filler.format.borders.distance_right = distance_right;
        if !(side == BoxSide::Bottom && Some(index) == last_filler) {
            filler.format.keep_with_next = true;
        }
        has_filler = true;
    }
    Ok(())
}
