use serde::{Deserialize, Serialize};

/// Box side id (left, right, ...) for index based access to the four-sided
/// style groups (margins, paddings, borders, cell spacing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoxSide {
    Left,
    Right,
    Top,
    Bottom,
}

impl BoxSide {
    pub const ALL: [BoxSide; 4] = [BoxSide::Left, BoxSide::Right, BoxSide::Top, BoxSide::Bottom];

    /// The opposite side, used when a bottom edge meets the following
    /// block's top edge.
    pub fn opposite(self) -> BoxSide {
        match self {
            BoxSide::Left => BoxSide::Right,
            BoxSide::Right => BoxSide::Left,
            BoxSide::Top => BoxSide::Bottom,
            BoxSide::Bottom => BoxSide::Top,
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, BoxSide::Top | BoxSide::Bottom)
    }
}
