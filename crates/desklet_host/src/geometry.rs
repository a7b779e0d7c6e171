//! Viewport, parent-region, and theme metric contracts.

use serde::{Deserialize, Serialize};

/// Title bar height used when the theme does not report one.
pub const DEFAULT_TITLE_BAR_HEIGHT: i32 = 32;

/// Screen axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Left-to-right axis.
    Horizontal,
    /// Top-to-bottom axis.
    Vertical,
}

/// Theme-derived constants the desklet layout depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeMetric {
    /// Height of the screen title bar at the top of the parent region.
    ScreenTitleHeight,
}

/// Outer size of the companion dock sharing the desklet's edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DockExtent {
    /// Dock width in pixels.
    pub width: i32,
    /// Dock height in pixels.
    pub height: i32,
}

/// Per-edge pixel insets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EdgeInsets {
    /// Top inset.
    pub top: i32,
    /// Left inset.
    pub left: i32,
    /// Right inset.
    pub right: i32,
    /// Bottom inset.
    pub bottom: i32,
}

impl EdgeInsets {
    /// All-zero insets.
    pub const ZERO: Self = Self {
        top: 0,
        left: 0,
        right: 0,
        bottom: 0,
    };
}

/// Host service reporting the measured geometry the desklet lays itself out against.
pub trait GeometryProvider {
    /// Returns the full screen extent along `axis`.
    fn viewport_extent(&self, axis: Axis) -> i32;

    /// Returns the extent of the region the desklet is mounted in along `axis`.
    fn parent_extent(&self, axis: Axis) -> i32;

    /// Returns a theme metric, or `None` when the theme does not define it.
    fn theme_metric(&self, metric: ThemeMetric) -> Option<i32>;

    /// Returns the companion dock's size when one is mounted.
    fn companion_dock(&self) -> Option<DockExtent>;

    /// Returns whether the dock window list region is mounted.
    fn window_list_present(&self) -> bool;
}

/// Fixed geometry snapshot, used by tests and non-browser targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticGeometry {
    /// Viewport width.
    pub viewport_width: i32,
    /// Viewport height.
    pub viewport_height: i32,
    /// Parent region width.
    pub parent_width: i32,
    /// Parent region height.
    pub parent_height: i32,
    /// Reported title bar height.
    pub title_bar_height: Option<i32>,
    /// Companion dock, if any.
    pub dock: Option<DockExtent>,
    /// Whether the window list is mounted.
    pub window_list: bool,
}

impl Default for StaticGeometry {
    fn default() -> Self {
        Self {
            viewport_width: 1024,
            viewport_height: 768,
            parent_width: 1024,
            parent_height: 768,
            title_bar_height: Some(DEFAULT_TITLE_BAR_HEIGHT),
            dock: None,
            window_list: false,
        }
    }
}

impl GeometryProvider for StaticGeometry {
    fn viewport_extent(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.viewport_width,
            Axis::Vertical => self.viewport_height,
        }
    }

    fn parent_extent(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.parent_width,
            Axis::Vertical => self.parent_height,
        }
    }

    fn theme_metric(&self, metric: ThemeMetric) -> Option<i32> {
        match metric {
            ThemeMetric::ScreenTitleHeight => self.title_bar_height,
        }
    }

    fn companion_dock(&self) -> Option<DockExtent> {
        self.dock
    }

    fn window_list_present(&self) -> bool {
        self.window_list
    }
}
