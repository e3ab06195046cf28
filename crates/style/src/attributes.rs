//! Generic element attributes written in the source text, e.g.
//! `{.note #intro width=50%}`.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

static ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(.+)\}").expect("invalid attribute regex"));

/// Attributes attached to one element.
///
/// `.name` selects a style, `#name` sets the element id and `key=value`
/// pairs land in the attribute map. `markup` and `info` are not written
/// in the attribute block; they carry the syntax variant and the info
/// string of fenced blocks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementAttributes {
    pub(crate) attributes: HashMap<String, String>,
    /// Name of the style requested for the element.
    pub style: Option<String>,
    /// Element id, usable as a cross-reference target.
    pub id: Option<String>,
    /// Syntax variant when the element has several source spellings.
    pub markup: Option<String>,
    /// Info text of fenced blocks, e.g. the code language.
    pub info: Option<String>,
}

impl ElementAttributes {
    /// Reads the first `{...}` span of `text`. The span is greedy, from
    /// the first `{` to the last `}`. Without a span all fields stay
    /// unset.
    pub fn parse(text: &str) -> Self {
        let mut res = Self::default();
        let Some(caps) = ATTR_RE.captures(text) else {
            return res;
        };
        for token in caps[1].split([' ', '\t']).filter(|t| !t.is_empty()) {
            let mut parts = token.split('=');
            let key = parts.next().unwrap_or_default();
            let value = parts.next().unwrap_or_default();
            if let Some(style) = key.strip_prefix('.') {
                if !style.is_empty() {
                    res.style = Some(style.to_string());
                }
            } else if let Some(id) = key.strip_prefix('#') {
                if !id.is_empty() {
                    res.id = Some(id.to_string());
                }
            } else if !res.attributes.contains_key(key) {
                res.attributes
                    .insert(key.to_string(), value.to_string());
            }
        }
        res
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// Folds `other` into `self`. Identity fields of `other` win when
    /// set; attribute pairs only fill keys not present yet.
    pub fn merge(&mut self, other: &ElementAttributes) {
        if other.id.is_some() {
            self.id = other.id.clone();
        }
        if other.style.is_some() {
            self.style = other.style.clone();
        }
        if other.markup.is_some() {
            self.markup = other.markup.clone();
        }
        for (key, value) in &other.attributes {
            self.attributes
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_style_id_and_attributes() {
        let attrs = ElementAttributes::parse("{.quote #intro width=50% wrap}");
        assert_eq!(attrs.style.as_deref(), Some("quote"));
        assert_eq!(attrs.id.as_deref(), Some("intro"));
        assert_eq!(attrs.get("width"), Some("50%"));
        assert_eq!(attrs.get("wrap"), Some(""));
        assert_eq!(attrs.get("missing"), None);
    }

    #[test]
    fn duplicate_keys_keep_the_first_value() {
        let attrs = ElementAttributes::parse("{k=1 k=2}");
        assert_eq!(attrs.get("k"), Some("1"));
        let attrs = ElementAttributes::parse("{.a .b}");
        assert_eq!(attrs.style.as_deref(), Some("b"));
    }

    #[test]
    fn span_reaches_from_first_to_last_brace() {
        let attrs = ElementAttributes::parse("text {#left} more {k=v}");
        assert_eq!(attrs.id.as_deref(), Some("left}"));
        assert_eq!(attrs.get("{k"), Some("v"));
        assert!(attrs.contains_key("more"));
    }

    #[test]
    fn no_braces_means_no_attributes() {
        let attrs = ElementAttributes::parse("plain text");
        assert_eq!(attrs, ElementAttributes::default());
    }

    #[test]
    fn merge_prefers_other_identity_and_keeps_existing_pairs() {
        let mut attrs = ElementAttributes::parse("{.original #one k=old}");
        let other = ElementAttributes::parse("{.override k=new extra=x}");
        attrs.merge(&other);
        assert_eq!(attrs.style.as_deref(), Some("override"));
        assert_eq!(attrs.id.as_deref(), Some("one"));
        assert_eq!(attrs.get("k"), Some("old"));
        assert_eq!(attrs.get("extra"), Some("x"));
    }
}
