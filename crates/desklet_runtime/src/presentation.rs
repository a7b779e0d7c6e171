//! Projects desklet state onto class lists and inline styles.
//!
//! Presentation is derived on every render and never read back; `OpenState`, orientation and
//! layout stay the source of truth.

use crate::{
    model::{DeskletState, ItemId, ItemKind, LauncherIcon, OpenState},
    placement::{Placement, MOBILE_OVERLAY_WIDTH},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemView {
    pub id: ItemId,
    pub kind: ItemKind,
    pub class_name: String,
    pub style: String,
    pub title: Option<String>,
    pub label: Option<String>,
    pub icon: Option<LauncherIcon>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeskletProjection {
    pub dom_id: String,
    pub class_name: String,
    pub container_style: String,
    pub items: Vec<ItemView>,
}

fn px_or_auto(value: Option<i32>) -> String {
    value.map_or_else(|| "auto".to_string(), |value| format!("{value}px"))
}

fn placement_style(placement: &Placement) -> String {
    format!(
        "left:{};top:{};right:{};bottom:{};",
        px_or_auto(placement.left),
        px_or_auto(placement.top),
        px_or_auto(placement.right),
        px_or_auto(placement.bottom),
    )
}

pub fn container_classes(state: &DeskletState) -> Vec<&'static str> {
    let mut classes = vec!["Desklet", state.orientation.class_name()];
    if !state.config.is_fixed() {
        classes.push(state.config.anchor.side().class_name());
    }
    if state.initializing_class {
        classes.push("Initializing");
    }
    if state.placement.mobile_overlay {
        classes.push("Mobile");
    }
    match state.open_state {
        OpenState::Closed => {}
        OpenState::Opening | OpenState::Closing => classes.push("Open"),
        OpenState::Open => classes.extend(["Open", "Opened"]),
    }
    classes
}

pub fn project(state: &DeskletState) -> DeskletProjection {
    let mut container_style = placement_style(&state.placement);
    if state.placement.mobile_overlay {
        container_style.push_str(&format!("width:{MOBILE_OVERLAY_WIDTH}px;height:auto;"));
    } else if let Some(layout) = &state.layout {
        container_style.push_str(&format!(
            "width:{}px;height:{}px;",
            layout.container_width, layout.container_height
        ));
    }

    let item_size = state.config.item_size();
    let items = state
        .ordered_items()
        .into_iter()
        .map(|item| {
            let position = state
                .layout
                .as_ref()
                .and_then(|layout| layout.position_of(item.id));
            let style = position
                .map(|position| {
                    format!(
                        "left:{}px;top:{}px;width:{item_size}px;height:{item_size}px;",
                        position.x, position.y
                    )
                })
                .unwrap_or_default();
            match (&item.kind, &item.launcher) {
                (ItemKind::Launcher, Some(record)) => {
                    let mut class_name = String::from("Launcher");
                    if let Some(extra) = &record.class_name {
                        class_name.push(' ');
                        class_name.push_str(extra);
                    }
                    if record.running {
                        class_name.push_str(" Running");
                    }
                    ItemView {
                        id: item.id,
                        kind: item.kind,
                        class_name,
                        style,
                        title: record.title.clone(),
                        label: Some(record.label()),
                        icon: Some(record.icon.clone()),
                    }
                }
                (kind, _) => ItemView {
                    id: item.id,
                    kind: *kind,
                    class_name: match kind {
                        ItemKind::WindowList => "ViewList",
                        ItemKind::Menu => "DockMenu",
                        ItemKind::Launcher => "Launcher",
                    }
                    .to_string(),
                    style,
                    title: None,
                    label: None,
                    icon: None,
                },
            }
        })
        .collect();

    DeskletProjection {
        dom_id: state.dom_id.clone(),
        class_name: container_classes(state).join(" "),
        container_style,
        items,
    }
}
