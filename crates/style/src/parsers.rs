//! Low-level nom parsers for style value strings.
//!
//! The grammar is deliberately small: an unsigned decimal followed by an
//! optional unit suffix, and the CSS-like box shorthand built from it.
//! Unit suffixes are case sensitive.

use nom::IResult;
use nom::Parser;
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{char, digit0, digit1, space0, space1};
use nom::combinator::{map, map_res, opt, recognize, value};
use nom::multi::separated_list1;
use nom::sequence::preceded;
use thiserror::Error;

use crate::dimension::{Dimension, LengthUnit};
use crate::spacing::BoxSpacing;

/// Errors produced while parsing style value strings.
#[derive(Error, Debug, Clone)]
pub enum StyleParseError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid value for '{property}': {value}")]
    InvalidValue { property: String, value: String },
}

fn decimal(input: &str) -> IResult<&str, f32> {
    map_res(
        recognize(alt((recognize((digit0, char('.'), digit1)), digit1))),
        |s: &str| s.parse::<f32>(),
    )
    .parse(input)
}

fn unit(input: &str) -> IResult<&str, LengthUnit> {
    alt((
        value(LengthUnit::FontSize, tag("em")),
        value(LengthUnit::Centimeter, tag("cm")),
        value(LengthUnit::Millimeter, tag("mm")),
        value(LengthUnit::Inch, tag("in")),
        value(LengthUnit::Point, tag("pt")),
        value(LengthUnit::ContainerWidth, tag("%")),
    ))
    .parse(input)
}

fn dimension_term(input: &str) -> IResult<&str, Dimension> {
    map(
        (decimal, opt(preceded(space0, unit))),
        |(amount, suffix)| Dimension::term(suffix.unwrap_or(LengthUnit::Point), amount),
    )
    .parse(input)
}

/// Parses a single dimension like `12`, `1.5cm` or `50%`. A bare number
/// is read as points. Signs are not accepted.
pub(crate) fn parse_dimension(input: &str) -> Result<Dimension, StyleParseError> {
    match dimension_term(input.trim()) {
        Ok(("", dim)) => Ok(dim),
        _ => Err(StyleParseError::Parse(format!(
            "invalid dimension '{}'",
            input.trim()
        ))),
    }
}

/// Parses a box shorthand with 1, 2 or 4 whitespace-separated values in
/// CSS order: all, vertical/horizontal, or top/right/bottom/left.
pub(crate) fn parse_box_shorthand(input: &str) -> Result<BoxSpacing, StyleParseError> {
    let parts = match separated_list1(space1, dimension_term).parse(input.trim()) {
        Ok(("", parts)) => parts,
        _ => {
            return Err(StyleParseError::Parse(format!(
                "invalid box shorthand '{}'",
                input.trim()
            )));
        }
    };
    match parts.as_slice() {
        [all] => Ok(BoxSpacing::all(all.clone())),
        [vertical, horizontal] => Ok(BoxSpacing {
            top: vertical.clone(),
            right: horizontal.clone(),
            bottom: vertical.clone(),
            left: horizontal.clone(),
        }),
        [top, right, bottom, left] => Ok(BoxSpacing {
            top: top.clone(),
            right: right.clone(),
            bottom: bottom.clone(),
            left: left.clone(),
        }),
        parts => Err(StyleParseError::Parse(format!(
            "box shorthand takes 1, 2 or 4 values, got {}",
            parts.len()
        ))),
    }
}
