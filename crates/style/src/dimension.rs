//! Absolute and context-relative lengths.
//!
//! A [`Dimension`] is a sum of terms, each tied to a unit. Absolute terms
//! (points, millimeters, ...) are fixed at construction; relative terms
//! (`em`, `%`) stay symbolic until [`Dimension::eval`] receives the font
//! size and container width they refer to. Arithmetic on dimensions is
//! lazy: adding `1em` to `2pt` keeps both terms.

use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::StyleError;
use crate::parsers;
use crate::parsers::StyleParseError;

/// Unit of a single dimension term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LengthUnit {
    Point,
    Centimeter,
    Millimeter,
    Inch,
    /// Multiple of the current font size (`em`).
    FontSize,
    /// Percentage of the parent container width (`%`).
    ContainerWidth,
}

impl LengthUnit {
    fn suffix(self) -> &'static str {
        match self {
            LengthUnit::Point => "pt",
            LengthUnit::Centimeter => "cm",
            LengthUnit::Millimeter => "mm",
            LengthUnit::Inch => "in",
            LengthUnit::FontSize => "em",
            LengthUnit::ContainerWidth => "%",
        }
    }
}

/// A length made of zero or more unit terms.
///
/// The default value is *empty*, which is distinct from zero: an empty
/// dimension means "not set" and loses against any explicit value when
/// styles are merged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dimension {
    terms: Vec<(LengthUnit, f32)>,
}

impl Dimension {
    pub(crate) fn term(unit: LengthUnit, value: f32) -> Self {
        Self {
            terms: vec![(unit, value)],
        }
    }

    /// An absolute length in points (1/72 inch).
    pub fn pt(value: f32) -> Self {
        Self::term(LengthUnit::Point, value)
    }

    /// An absolute length in centimeters.
    pub fn cm(value: f32) -> Self {
        Self::term(LengthUnit::Centimeter, value)
    }

    /// An absolute length in millimeters.
    pub fn mm(value: f32) -> Self {
        Self::term(LengthUnit::Millimeter, value)
    }

    /// An absolute length in inches.
    pub fn inches(value: f32) -> Self {
        Self::term(LengthUnit::Inch, value)
    }

    /// A length relative to the current font size.
    pub fn em(value: f32) -> Self {
        Self::term(LengthUnit::FontSize, value)
    }

    /// A length in percent of the parent container width, clamped to
    /// the range -100..=100.
    pub fn percent(value: f32) -> Self {
        Self::term(LengthUnit::ContainerWidth, value.clamp(-100.0, 100.0))
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Resolves the dimension to points.
    ///
    /// `font_size` substitutes `em` terms and `container_width` substitutes
    /// `%` terms; both must be positive even when no relative term is
    /// present. An empty dimension evaluates to zero.
    pub fn eval(&self, font_size: f32, container_width: f32) -> Result<f32, StyleError> {
        if font_size <= 0.0 || container_width <= 0.0 {
            return Err(StyleError::EvalContext {
                font_size,
                container_width,
            });
        }
        let mut total = 0.0;
        for &(unit, value) in &self.terms {
            total += match unit {
                LengthUnit::Point => value,
                LengthUnit::Centimeter => value / 2.54 * 72.0,
                LengthUnit::Millimeter => value / 25.4 * 72.0,
                LengthUnit::Inch => value * 72.0,
                LengthUnit::FontSize => value * font_size,
                LengthUnit::ContainerWidth => value * container_width / 100.0,
            };
        }
        Ok(total)
    }

    /// True when the dimension is unset or resolves to exactly zero.
    pub fn is_empty_or_zero(
        &self,
        font_size: f32,
        container_width: f32,
    ) -> Result<bool, StyleError> {
        if self.is_empty() {
            return Ok(true);
        }
        Ok(self.eval(font_size, container_width)? == 0.0)
    }
}

impl From<f32> for Dimension {
    fn from(value: f32) -> Self {
        Dimension::pt(value)
    }
}

impl Add for Dimension {
    type Output = Dimension;

    fn add(self, other: Dimension) -> Dimension {
        if other.is_empty() {
            return self;
        }
        if self.is_empty() {
            return other;
        }
        let mut terms = self.terms;
        terms.extend(other.terms);
        Dimension { terms }
    }
}

impl Sub for Dimension {
    type Output = Dimension;

    fn sub(self, other: Dimension) -> Dimension {
        if other.is_empty() {
            return self;
        }
        let mut terms = self.terms;
        terms.extend(other.terms.into_iter().map(|(unit, value)| (unit, -value)));
        Dimension { terms }
    }
}

impl FromStr for Dimension {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parsers::parse_dimension(s)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &(unit, value)) in self.terms.iter().enumerate() {
            if i == 0 {
                write!(f, "{}{}", value, unit.suffix())?;
            } else if value < 0.0 {
                write!(f, " - {}{}", -value, unit.suffix())?;
            } else {
                write!(f, " + {}{}", value, unit.suffix())?;
            }
        }
        Ok(())
    }
}

impl Serialize for Dimension {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.terms.as_slice() {
            [] => serializer.serialize_str(""),
            [(unit, value)] => serializer.serialize_str(&format!("{}{}", value, unit.suffix())),
            terms => {
                let mut seq = serializer.serialize_seq(Some(terms.len()))?;
                for &(unit, value) in terms {
                    seq.serialize_element(&format!("{}{}", value, unit.suffix()))?;
                }
                seq.end()
            }
        }
    }
}

struct DimensionVisitor;

impl<'de> Visitor<'de> for DimensionVisitor {
    type Value = Dimension;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a length string like \"1.5cm\", a number of points, or a list of terms")
    }

    fn visit_str<E>(self, v: &str) -> Result<Dimension, E>
    where
        E: de::Error,
    {
        if v.trim().is_empty() {
            return Ok(Dimension::default());
        }
        v.parse().map_err(de::Error::custom)
    }

    fn visit_f64<E>(self, v: f64) -> Result<Dimension, E>
    where
        E: de::Error,
    {
        Ok(Dimension::pt(v as f32))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Dimension, E>
    where
        E: de::Error,
    {
        Ok(Dimension::pt(v as f32))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Dimension, E>
    where
        E: de::Error,
    {
        Ok(Dimension::pt(v as f32))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Dimension, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut total = Dimension::default();
        while let Some(term) = seq.next_element::<Dimension>()? {
            total = total + term;
        }
        Ok(total)
    }
}

impl<'de> Deserialize<'de> for Dimension {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(DimensionVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn plain_numbers_are_points() {
        let d: Dimension = "12".parse().unwrap();
        assert!(close(d.eval(10.0, 100.0).unwrap(), 12.0));
        let d: Dimension = "0.5".parse().unwrap();
        assert!(close(d.eval(10.0, 100.0).unwrap(), 0.5));
    }

    #[test]
    fn absolute_units_convert_to_points() {
        let cm: Dimension = "1.5cm".parse().unwrap();
        assert!(close(cm.eval(10.0, 100.0).unwrap(), 1.5 / 2.54 * 72.0));
        let mm: Dimension = "10mm".parse().unwrap();
        assert!(close(mm.eval(10.0, 100.0).unwrap(), 10.0 / 25.4 * 72.0));
        let inch: Dimension = "2in".parse().unwrap();
        assert!(close(inch.eval(10.0, 100.0).unwrap(), 144.0));
    }

    #[test]
    fn relative_units_use_context() {
        let em: Dimension = "2em".parse().unwrap();
        assert!(close(em.eval(10.0, 100.0).unwrap(), 20.0));
        let pct: Dimension = "50%".parse().unwrap();
        assert!(close(pct.eval(10.0, 200.0).unwrap(), 100.0));
    }

    #[test]
    fn rejects_malformed_input() {
        assert!("-3pt".parse::<Dimension>().is_err());
        assert!("1,5cm".parse::<Dimension>().is_err());
        assert!("3px".parse::<Dimension>().is_err());
        assert!("em".parse::<Dimension>().is_err());
        assert!("".parse::<Dimension>().is_err());
    }

    #[test]
    fn eval_needs_positive_context() {
        let err = Dimension::pt(1.0).eval(0.0, 100.0).unwrap_err();
        assert!(matches!(err, StyleError::EvalContext { .. }));
        assert!(Dimension::em(1.0).eval(10.0, -5.0).is_err());
    }

    #[test]
    fn empty_is_additive_identity() {
        let d = Dimension::em(1.0);
        assert_eq!(Dimension::default() + d.clone(), d);
        assert_eq!(d.clone() + Dimension::default(), d);
        assert!((Dimension::default() + Dimension::default()).is_empty());
    }

    #[test]
    fn subtraction_negates_terms() {
        let d = Dimension::pt(10.0) - Dimension::em(1.0);
        assert!(close(d.eval(4.0, 100.0).unwrap(), 6.0));
        let same = Dimension::pt(10.0) - Dimension::default();
        assert!(close(same.eval(4.0, 100.0).unwrap(), 10.0));
    }

    #[test]
    fn percent_factory_clamps_but_parse_does_not() {
        let clamped = Dimension::percent(150.0);
        assert!(close(clamped.eval(10.0, 100.0).unwrap(), 100.0));
        let parsed: Dimension = "150%".parse().unwrap();
        assert!(close(parsed.eval(10.0, 100.0).unwrap(), 150.0));
    }

    #[test]
    fn mixed_terms_stay_symbolic() {
        let d = Dimension::pt(2.0) + Dimension::em(1.0);
        assert!(close(d.eval(10.0, 100.0).unwrap(), 12.0));
        assert!(close(d.eval(20.0, 100.0).unwrap(), 22.0));
    }

    #[test]
    fn empty_or_zero_detection() {
        assert!(Dimension::default().is_empty_or_zero(10.0, 100.0).unwrap());
        assert!(Dimension::pt(0.0).is_empty_or_zero(10.0, 100.0).unwrap());
        let sum = Dimension::pt(5.0) - Dimension::pt(5.0);
        assert!(sum.is_empty_or_zero(10.0, 100.0).unwrap());
        assert!(!Dimension::em(1.0).is_empty_or_zero(10.0, 100.0).unwrap());
    }

    #[test]
    fn deserializes_from_strings_numbers_and_lists() {
        let d: Dimension = serde_json::from_str("\"1em\"").unwrap();
        assert_eq!(d, Dimension::em(1.0));
        let d: Dimension = serde_json::from_str("12").unwrap();
        assert_eq!(d, Dimension::pt(12.0));
        let d: Dimension = serde_json::from_str("[\"1em\", \"2pt\"]").unwrap();
        assert!(close(d.eval(10.0, 100.0).unwrap(), 12.0));
        let d: Dimension = serde_json::from_str("\"\"").unwrap();
        assert!(d.is_empty());
    }

    #[test]
    fn serializes_single_terms_as_strings() {
        let json = serde_json::to_string(&Dimension::cm(1.5)).unwrap();
        assert_eq!(json, "\"1.5cm\"");
        let json = serde_json::to_string(&(Dimension::pt(2.0) + Dimension::em(1.0))).unwrap();
        assert_eq!(json, "[\"2pt\",\"1em\"]");
    }
}
