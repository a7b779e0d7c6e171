//! Viewport and theme geometry read from the live document.

use desklet_host::{Axis, DockExtent, GeometryProvider, StaticGeometry, ThemeMetric};

/// DOM id of the main dock, the first desklet the shell creates.
pub const MAIN_DOCK_ID: &str = "desklet_0";
/// DOM id of the dock's window list.
pub const DOCK_WINDOW_LIST_ID: &str = "DockWindowList";

/// CSS selectors naming the regions the desklet measures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomSelectors {
    /// Screen region the desklet is placed inside.
    pub parent: String,
    /// Main dock container; its outer size is reserved on the desklet's edge.
    pub dock: String,
    /// Dock window list; its presence widens the layout reserve.
    pub window_list: String,
    /// CSS custom property carrying the screen title-bar height.
    pub title_height_property: String,
}

impl Default for DomSelectors {
    fn default() -> Self {
        Self {
            parent: "#DoorsScreen".to_string(),
            dock: format!("#{MAIN_DOCK_ID}"),
            window_list: format!("#{DOCK_WINDOW_LIST_ID}"),
            title_height_property: "--screen-title-height".to_string(),
        }
    }
}

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn parse_px(value: &str) -> Option<i32> {
    let value = value.trim();
    let number = value.strip_suffix("px").unwrap_or(value).trim();
    number.parse::<f64>().ok().map(|px| px.round() as i32)
}

/// Geometry provider backed by the browser window and document.
///
/// Native builds report the [`StaticGeometry`] defaults.
#[derive(Debug, Clone, Default)]
pub struct BrowserGeometry {
    selectors: DomSelectors,
    fallback: StaticGeometry,
}

impl BrowserGeometry {
    /// Measures the regions named by `selectors`.
    pub fn new(selectors: DomSelectors) -> Self {
        Self {
            selectors,
            fallback: StaticGeometry::default(),
        }
    }

    /// Selectors in use.
    pub fn selectors(&self) -> &DomSelectors {
        &self.selectors
    }
}

#[cfg(target_arch = "wasm32")]
impl GeometryProvider for BrowserGeometry {
    fn viewport_extent(&self, axis: Axis) -> i32 {
        use crate::interop::{window, window_extent};

        let measured = window().and_then(|window| match axis {
            Axis::Horizontal => window_extent(window.inner_width()),
            Axis::Vertical => window_extent(window.inner_height()),
        });
        measured.unwrap_or_else(|| self.fallback.viewport_extent(axis))
    }

    fn parent_extent(&self, axis: Axis) -> i32 {
        match crate::interop::html_element(&self.selectors.parent) {
            Some(parent) => match axis {
                Axis::Horizontal => parent.client_width(),
                Axis::Vertical => parent.client_height(),
            },
            None => self.viewport_extent(axis),
        }
    }

    fn theme_metric(&self, metric: ThemeMetric) -> Option<i32> {
        use crate::interop::{document, window};

        match metric {
            ThemeMetric::ScreenTitleHeight => {
                let root = document()?.document_element()?;
                let style = window()?.get_computed_style(&root).ok().flatten()?;
                let value = style
                    .get_property_value(&self.selectors.title_height_property)
                    .ok()?;
                parse_px(&value)
            }
        }
    }

    fn companion_dock(&self) -> Option<DockExtent> {
        let dock = crate::interop::html_element(&self.selectors.dock)?;
        Some(DockExtent {
            width: dock.offset_width(),
            height: dock.offset_height(),
        })
    }

    fn window_list_present(&self) -> bool {
        crate::interop::html_element(&self.selectors.window_list).is_some()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl GeometryProvider for BrowserGeometry {
    fn viewport_extent(&self, axis: Axis) -> i32 {
        self.fallback.viewport_extent(axis)
    }

    fn parent_extent(&self, axis: Axis) -> i32 {
        self.fallback.parent_extent(axis)
    }

    fn theme_metric(&self, metric: ThemeMetric) -> Option<i32> {
        self.fallback.theme_metric(metric)
    }

    fn companion_dock(&self) -> Option<DockExtent> {
        self.fallback.companion_dock()
    }

    fn window_list_present(&self) -> bool {
        self.fallback.window_list_present()
    }
}
