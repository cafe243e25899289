mod coord;

pub use coord::CanvasTransform;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role a point plays for its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    /// First point of a pair.
    Before,
    /// Second point of a pair.
    After,
}

impl Slot {
    pub const ALL: [Self; 2] = [Self::Before, Self::After];

    /// The other slot of the pair.
    pub const fn opposite(self) -> Self {
        match self {
            Self::Before => Self::After,
            Self::After => Self::Before,
        }
    }

    /// Lowercase name, also used as the `type` column value.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::After => "after",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sequential pair identifier, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointId(pub u32);

impl PointId {
    pub const FIRST: Self = Self(1);

    /// `None` once the id range is used up.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A recorded point in math coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub id: PointId,
    pub slot: Slot,
    pub x: f64,
    pub y: f64,
    /// Locked by a commit; never reverts.
    pub fixed: bool,
}

impl Point {
    pub const fn unfixed(id: PointId, slot: Slot, x: f64, y: f64) -> Self {
        Self {
            id,
            slot,
            x,
            y,
            fixed: false,
        }
    }

    pub const fn fixed(id: PointId, slot: Slot, x: f64, y: f64) -> Self {
        Self {
            id,
            slot,
            x,
            y,
            fixed: true,
        }
    }
}
