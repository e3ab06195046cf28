//! Per-side box spacing used for margins, padding and cell spacing.

use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use markflow_types::BoxSide;

use crate::dimension::Dimension;
use crate::parsers;

/// Four independent side lengths. Each side is an own [`Dimension`] and
/// may be empty, so a partially set spacing merges side by side.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxSpacing {
    #[serde(skip_serializing_if = "Dimension::is_empty")]
    pub top: Dimension,
    #[serde(skip_serializing_if = "Dimension::is_empty")]
    pub right: Dimension,
    #[serde(skip_serializing_if = "Dimension::is_empty")]
    pub bottom: Dimension,
    #[serde(skip_serializing_if = "Dimension::is_empty")]
    pub left: Dimension,
}

impl BoxSpacing {
    /// The same length on all four sides.
    pub fn all(size: Dimension) -> Self {
        Self {
            top: size.clone(),
            right: size.clone(),
            bottom: size.clone(),
            left: size,
        }
    }

    /// Left and right set, top and bottom left empty.
    pub fn x(size: Dimension) -> Self {
        Self {
            left: size.clone(),
            right: size,
            ..Self::default()
        }
    }

    /// Top and bottom set, left and right left empty.
    pub fn y(size: Dimension) -> Self {
        Self {
            top: size.clone(),
            bottom: size,
            ..Self::default()
        }
    }

    pub fn side(&self, side: BoxSide) -> &Dimension {
        match side {
            BoxSide::Top => &self.top,
            BoxSide::Right => &self.right,
            BoxSide::Bottom => &self.bottom,
            BoxSide::Left => &self.left,
        }
    }

    pub fn set_side(&mut self, side: BoxSide, value: Dimension) {
        match side {
            BoxSide::Top => self.top = value,
            BoxSide::Right => self.right = value,
            BoxSide::Bottom => self.bottom = value,
            BoxSide::Left => self.left = value,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_empty() && self.right.is_empty() && self.bottom.is_empty() && self.left.is_empty()
    }

    /// Overlays `self` onto `base`. A side set here wins, an empty side
    /// falls through to the base value.
    pub fn apply_to(&self, base: &Self) -> Self {
        let pick = |own: &Dimension, under: &Dimension| {
            if own.is_empty() {
                under.clone()
            } else {
                own.clone()
            }
        };
        Self {
            top: pick(&self.top, &base.top),
            right: pick(&self.right, &base.right),
            bottom: pick(&self.bottom, &base.bottom),
            left: pick(&self.left, &base.left),
        }
    }
}

impl<'de> Deserialize<'de> for BoxSpacing {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct BoxSpacingVisitor;

        impl<'de> Visitor<'de> for BoxSpacingVisitor {
            type Value = BoxSpacing;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a shorthand string like \"1em 2em\" or a map of sides")
            }

            fn visit_str<E>(self, v: &str) -> Result<BoxSpacing, E>
            where
                E: de::Error,
            {
                parsers::parse_box_shorthand(v).map_err(de::Error::custom)
            }

            fn visit_map<A>(self, mut map: A) -> Result<BoxSpacing, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut spacing = BoxSpacing::default();
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "top" => spacing.top = map.next_value()?,
                        "right" => spacing.right = map.next_value()?,
                        "bottom" => spacing.bottom = map.next_value()?,
                        "left" => spacing.left = map.next_value()?,
                        _ => {
                            let _ = map.next_value::<de::IgnoredAny>()?;
                        }
                    }
                }
                Ok(spacing)
            }
        }

        deserializer.deserialize_any(BoxSpacingVisitor)
    }
}
