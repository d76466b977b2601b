//! Display surface description

use serde::{Deserialize, Serialize};

use super::geometry::Rect;

/// Vertical origin convention of a screen's native coordinate space
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OriginConvention {
    /// y grows downward from the top edge
    #[default]
    TopLeft,
    /// y grows upward from the bottom edge
    BottomLeft,
}

/// A capturable display surface
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Screen {
    /// Output identifier, e.g. a connector name like "DP-1"
    pub name: String,
    /// Frame of the screen in global coordinates
    pub frame: Rect,
    /// Origin convention of the screen's native space
    pub origin: OriginConvention,
}

impl Screen {
    pub fn new(name: impl Into<String>, frame: Rect, origin: OriginConvention) -> Self {
        Self {
            name: name.into(),
            frame,
            origin,
        }
    }
}
