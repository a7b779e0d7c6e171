//! Pointer-position scrubbing of the companion window list.
//!
//! The pointer's position inside the list maps straight to a scroll offset. Nothing accumulates
//! between events, so dropped or reordered moves only cost precision.

use serde::{Deserialize, Serialize};

use crate::model::{Orientation, PointerPosition, ScrollState};

/// DOM id of the dock window list the pointer scrubs.
pub const WINDOW_LIST_DOM_ID: &str = "DockWindowList";

/// Padding added past the end of the last list child when measuring content.
pub const LIST_END_PADDING: i32 = 10;

/// Measured box of the list element, in the same coordinate space as the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ListBounds {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

/// List box plus the scrollable content length; `None` content means the list has no children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ListMeasurement {
    pub bounds: ListBounds,
    pub content_extent: Option<i32>,
}

impl ListMeasurement {
    /// Builds a measurement from the far edge of the last child (`offset + size`), if any.
    pub fn from_last_child(bounds: ListBounds, last_child_end: Option<i32>) -> Self {
        Self {
            bounds,
            content_extent: last_child_end.map(|end| end + LIST_END_PADDING),
        }
    }
}

/// Offset along one axis: 0 at the list origin, `content_extent - list_length` at its last pixel.
pub fn axis_offset(coordinate: i32, origin: i32, list_length: i32, content_extent: i32) -> f64 {
    if list_length <= 1 {
        return 0.0;
    }
    let within = (coordinate - origin).clamp(0, list_length - 1);
    let ratio = f64::from(within) / f64::from(list_length - 1);
    let overflow = f64::from((content_extent - list_length).max(0));
    ratio * overflow
}

/// Maps a pointer to the list's scroll offsets. Only the orientation's axis scrolls; the other
/// is pinned to zero, and an empty list resets both.
pub fn map_pointer_to_scroll(
    pointer: PointerPosition,
    measurement: ListMeasurement,
    orientation: Orientation,
) -> ScrollState {
    let Some(content_extent) = measurement.content_extent else {
        return ScrollState::default();
    };
    let bounds = measurement.bounds;
    match orientation {
        Orientation::Horizontal => ScrollState {
            scroll_left: axis_offset(pointer.x, bounds.left, bounds.width, content_extent),
            scroll_top: 0.0,
        },
        Orientation::Vertical => ScrollState {
            scroll_left: 0.0,
            scroll_top: axis_offset(pointer.y, bounds.top, bounds.height, content_extent),
        },
    }
}
