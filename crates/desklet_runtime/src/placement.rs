//! Maps anchors or fixed coordinates to container offsets and reserves scroller margins for the
//! companion dock.

use desklet_host::{DockExtent, EdgeInsets};
use serde::{Deserialize, Serialize};

use crate::model::{
    CrossAlignment, DeskletConfig, EdgeAlignment, EdgeSide, LayoutEnvironment, PixelSize,
};

/// Inset of the mobile overlay from the bottom-right screen corner.
pub const MOBILE_OVERLAY_INSET: i32 = 10;
/// Width of the mobile overlay strip.
pub const MOBILE_OVERLAY_WIDTH: i32 = 64;

/// CSS-style offsets of the container inside its parent; `None` renders as `auto`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Placement {
    pub left: Option<i32>,
    pub top: Option<i32>,
    pub right: Option<i32>,
    pub bottom: Option<i32>,
    /// Mobile overlay: fixed narrow strip with automatic height.
    pub mobile_overlay: bool,
}

impl Placement {
    pub fn fixed(x: i32, y: i32) -> Self {
        Self {
            left: Some(x),
            top: Some(y),
            ..Self::default()
        }
    }

    pub fn mobile_overlay() -> Self {
        Self {
            right: Some(MOBILE_OVERLAY_INSET),
            bottom: Some(MOBILE_OVERLAY_INSET),
            mobile_overlay: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPlacement {
    pub placement: Placement,
    /// Scroller padding to apply, or `None` when the scroller must be left alone.
    pub reserved_margins: Option<EdgeInsets>,
}

/// Resolves an anchor against the parent region.
///
/// `*_center` anchors on a vertical edge center around the midpoint of the parent below the title
/// bar; on a horizontal edge they center across the full parent width. `*_top` style anchors clear
/// the title bar, bottom anchors sit flush with the bottom edge.
pub fn resolve_anchor(
    anchor: EdgeAlignment,
    container: PixelSize,
    parent: PixelSize,
    title_bar_height: i32,
) -> Placement {
    let th = title_bar_height;
    let mid_height = f64::from(parent.height - th) * 0.5 + f64::from(th);
    let centered_top = (mid_height - f64::from(container.height) * 0.5).floor() as i32;
    let centered_left =
        (f64::from(parent.width) * 0.5 - f64::from(container.width) * 0.5).floor() as i32;

    let mut placement = Placement::default();
    match anchor.side() {
        EdgeSide::Left | EdgeSide::Right => {
            if anchor.side() == EdgeSide::Left {
                placement.left = Some(0);
            } else {
                placement.right = Some(0);
            }
            match anchor.alignment() {
                CrossAlignment::Start => placement.top = Some(th),
                CrossAlignment::Center => placement.top = Some(centered_top),
                CrossAlignment::End => placement.bottom = Some(0),
            }
        }
        EdgeSide::Top | EdgeSide::Bottom => {
            if anchor.side() == EdgeSide::Top {
                placement.top = Some(th);
            } else {
                placement.bottom = Some(0);
            }
            match anchor.alignment() {
                CrossAlignment::Start => placement.left = Some(0),
                CrossAlignment::Center => placement.left = Some(centered_left),
                CrossAlignment::End => placement.right = Some(0),
            }
        }
    }
    placement
}

/// Scroller padding keeping desktop icons clear of the companion dock on the anchored edge.
/// A missing dock reserves nothing.
pub fn reserved_margins(anchor: EdgeAlignment, dock: Option<DockExtent>) -> EdgeInsets {
    let Some(dock) = dock else {
        return EdgeInsets::ZERO;
    };
    let mut insets = EdgeInsets::ZERO;
    match anchor.side() {
        EdgeSide::Left => insets.left = dock.width,
        EdgeSide::Right => insets.right = dock.width,
        EdgeSide::Top => insets.top = dock.height,
        EdgeSide::Bottom => insets.bottom = dock.height,
    }
    insets
}

/// Picks the placement for a desklet of `container` size under `config`.
pub fn resolve_placement(
    config: &DeskletConfig,
    environment: &LayoutEnvironment,
    container: PixelSize,
) -> ResolvedPlacement {
    if config.is_fixed() {
        return ResolvedPlacement {
            placement: Placement::fixed(config.fixed_x, config.fixed_y),
            reserved_margins: None,
        };
    }
    if environment.mobile {
        return ResolvedPlacement {
            placement: Placement::mobile_overlay(),
            reserved_margins: None,
        };
    }
    let parent = PixelSize {
        width: environment.parent_width,
        height: environment.parent_height,
    };
    ResolvedPlacement {
        placement: resolve_anchor(
            config.anchor,
            container,
            parent,
            environment.title_bar_height,
        ),
        reserved_margins: Some(reserved_margins(config.anchor, environment.dock)),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::DEFAULT_TITLE_BAR_HEIGHT;

    fn size(width: i32, height: i32) -> PixelSize {
        PixelSize { width, height }
    }

    #[test]
    fn top_center_centers_horizontally_below_the_title_bar() {
        let placement = resolve_anchor(
            EdgeAlignment::TopCenter,
            size(300, 72),
            size(1000, 700),
            DEFAULT_TITLE_BAR_HEIGHT,
        );
        assert_eq!(
            placement,
            Placement {
                left: Some(350),
                top: Some(DEFAULT_TITLE_BAR_HEIGHT),
                ..Placement::default()
            }
        );
    }

    #[test]
    fn vertical_center_accounts_for_the_title_bar() {
        let placement = resolve_anchor(
            EdgeAlignment::LeftCenter,
            size(72, 201),
            size(1000, 732),
            32,
        );
        // midpoint = (732 - 32) / 2 + 32 = 382; top = floor(382 - 100.5)
        assert_eq!(placement.left, Some(0));
        assert_eq!(placement.top, Some(281));
        assert_eq!(placement.right, None);
        assert_eq!(placement.bottom, None);
    }

    #[test]
    fn edge_anchors_flush_to_their_edges() {
        let container = size(72, 200);
        let parent = size(1000, 700);
        let cases = [
            (EdgeAlignment::LeftTop, (Some(0), Some(32), None, None)),
            (EdgeAlignment::LeftBottom, (Some(0), None, None, Some(0))),
            (EdgeAlignment::RightTop, (None, Some(32), Some(0), None)),
            (EdgeAlignment::RightBottom, (None, None, Some(0), Some(0))),
            (EdgeAlignment::TopLeft, (Some(0), Some(32), None, None)),
            (EdgeAlignment::TopRight, (None, Some(32), Some(0), None)),
            (EdgeAlignment::BottomLeft, (Some(0), None, None, Some(0))),
            (EdgeAlignment::BottomRight, (None, None, Some(0), Some(0))),
        ];
        for (anchor, (left, top, right, bottom)) in cases {
            let placement = resolve_anchor(anchor, container, parent, 32);
            assert_eq!(
                (
                    placement.left,
                    placement.top,
                    placement.right,
                    placement.bottom
                ),
                (left, top, right, bottom),
                "{}",
                anchor.as_str()
            );
        }
    }

    #[test]
    fn reserved_margins_follow_the_anchored_edge() {
        let dock = Some(DockExtent {
            width: 80,
            height: 60,
        });
        assert_eq!(
            reserved_margins(EdgeAlignment::LeftCenter, dock),
            EdgeInsets {
                left: 80,
                ..EdgeInsets::ZERO
            }
        );
        assert_eq!(
            reserved_margins(EdgeAlignment::BottomRight, dock),
            EdgeInsets {
                bottom: 60,
                ..EdgeInsets::ZERO
            }
        );
        assert_eq!(
            reserved_margins(EdgeAlignment::TopCenter, None),
            EdgeInsets::ZERO
        );
    }

    #[test]
    fn fixed_position_bypasses_anchor_and_reserves_nothing() {
        let config = DeskletConfig::fixed(120, 45);
        let environment = LayoutEnvironment {
            dock: Some(DockExtent {
                width: 80,
                height: 60,
            }),
            ..LayoutEnvironment::default()
        };
        let resolved = resolve_placement(&config, &environment, size(72, 200));
        assert_eq!(resolved.placement, Placement::fixed(120, 45));
        assert_eq!(resolved.reserved_margins, None);
    }

    #[test]
    fn mobile_anchored_desklet_uses_the_overlay_strip() {
        let environment = LayoutEnvironment {
            mobile: true,
            ..LayoutEnvironment::default()
        };
        let resolved = resolve_placement(
            &DeskletConfig::anchored(EdgeAlignment::BottomCenter),
            &environment,
            size(72, 200),
        );
        assert_eq!(resolved.placement, Placement::mobile_overlay());
        assert_eq!(resolved.reserved_margins, None);
    }
}
