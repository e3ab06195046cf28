//! Font properties of a cascading style.

use serde::{Deserialize, Serialize};

use markflow_types::Color;

use crate::dimension::Dimension;

/// Underline decoration of a run of text.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Underline {
    None,
    Single,
    Words,
    Dotted,
    Dash,
    DotDash,
    DotDotDash,
}

/// Font face, size and typeface flags. Every field is optional; unset
/// fields inherit from the base style during a cascade merge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FontStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Dimension::is_empty")]
    pub size: Dimension,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<Underline>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub superscript: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscript: Option<bool>,
}

impl FontStyle {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.size.is_empty()
            && self.bold.is_none()
            && self.italic.is_none()
            && self.underline.is_none()
            && self.color.is_none()
            && self.superscript.is_none()
            && self.subscript.is_none()
    }

    /// Overlays `self` onto `base`.
    ///
    /// The size never falls through to the base: an unset size becomes
    /// `1em`, otherwise a size inherited once would scale again at every
    /// level of the cascade.
    pub fn apply_to(&self, base: &Self) -> Self {
        Self {
            name: self.name.clone().or_else(|| base.name.clone()),
            size: if self.size.is_empty() {
                Dimension::em(1.0)
            } else {
                self.size.clone()
            },
            bold: self.bold.or(base.bold),
            italic: self.italic.or(base.italic),
            underline: self.underline.or(base.underline),
            color: self.color.or(base.color),
            superscript: self.superscript.or(base.superscript),
            subscript: self.subscript.or(base.subscript),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_fields_inherit_from_base() {
        let base = FontStyle {
            name: Some("Georgia".into()),
            bold: Some(true),
            ..FontStyle::default()
        };
        let layer = FontStyle {
            italic: Some(true),
            ..FontStyle::default()
        };
        let merged = layer.apply_to(&base);
        assert_eq!(merged.name.as_deref(), Some("Georgia"));
        assert_eq!(merged.bold, Some(true));
        assert_eq!(merged.italic, Some(true));
    }

    #[test]
    fn unset_size_becomes_one_em_never_the_base_size() {
        let base = FontStyle {
            size: Dimension::pt(24.0),
            ..FontStyle::default()
        };
        let merged = FontStyle::default().apply_to(&base);
        assert_eq!(merged.size, Dimension::em(1.0));

        let explicit = FontStyle {
            size: Dimension::pt(9.0),
            ..FontStyle::default()
        };
        assert_eq!(explicit.apply_to(&base).size, Dimension::pt(9.0));
    }

    #[test]
    fn set_fields_win_over_base() {
        let base = FontStyle {
            color: Some(Color::rgb(10, 10, 10)),
            underline: Some(Underline::Single),
            ..FontStyle::default()
        };
        let layer = FontStyle {
            color: Some(Color::rgb(200, 0, 0)),
            ..FontStyle::default()
        };
        let merged = layer.apply_to(&base);
        assert_eq!(merged.color, Some(Color::rgb(200, 0, 0)));
        assert_eq!(merged.underline, Some(Underline::Single));
    }
}
