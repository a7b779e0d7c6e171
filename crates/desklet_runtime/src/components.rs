//! Leptos view over a desklet projection.

use leptos::*;

use crate::{
    events::DeskletEvent,
    model::{DeskletId, ItemId, LauncherIcon, Orientation, PointerPosition},
    presentation::{project, ItemView},
    runtime_context::use_desklet_runtime,
    scroll::ListMeasurement,
};

#[cfg(target_arch = "wasm32")]
use crate::scroll::WINDOW_LIST_DOM_ID;

fn pointer_of(ev: &web_sys::MouseEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}

/// Measures the dock window list, if mounted.
#[cfg(target_arch = "wasm32")]
fn measure_list(orientation: Orientation) -> Option<ListMeasurement> {
    use wasm_bindgen::JsCast;

    use crate::scroll::ListBounds;

    let list = document()
        .get_element_by_id(WINDOW_LIST_DOM_ID)?
        .dyn_into::<web_sys::HtmlElement>()
        .ok()?;
    let bounds = ListBounds {
        left: list.offset_left(),
        top: list.offset_top(),
        width: list.offset_width(),
        height: list.offset_height(),
    };
    let last_child_end = list
        .last_element_child()
        .and_then(|child| child.dyn_into::<web_sys::HtmlElement>().ok())
        .map(|child| match orientation {
            Orientation::Horizontal => child.offset_left() + child.offset_width(),
            Orientation::Vertical => child.offset_top() + child.offset_height(),
        });
    Some(ListMeasurement::from_last_child(bounds, last_child_end))
}

#[cfg(not(target_arch = "wasm32"))]
fn measure_list(_orientation: Orientation) -> Option<ListMeasurement> {
    None
}

#[component]
/// Renders one desklet from [`DeskletRuntimeContext`] state and routes its input back.
pub fn DeskletView(
    /// Desklet to render.
    id: DeskletId,
) -> impl IntoView {
    let runtime = use_desklet_runtime();
    let state = runtime.state_of(id);
    let projection = create_memo(move |_| {
        state
            .get()
            .map(|state| project(&state))
            .unwrap_or_default()
    });

    let forward = move |ev: &web_sys::MouseEvent, event: DeskletEvent| {
        if runtime.dispatch_event(id, event) {
            ev.stop_propagation();
        }
    };
    let on_activate = Callback::new(move |item_id: ItemId| runtime.activate(id, item_id));

    view! {
        <div
            id=move || projection.get().dom_id
            class=move || projection.get().class_name
            style=move || projection.get().container_style
            on:click=move |ev: ev::MouseEvent| {
                let pointer = pointer_of(&ev);
                forward(&ev, DeskletEvent::Click { pointer });
            }
            on:pointerdown=move |ev: ev::PointerEvent| {
                let pointer = pointer_of(&ev);
                forward(&ev, DeskletEvent::PointerDown { pointer });
            }
            on:pointerup=move |ev: ev::PointerEvent| {
                let pointer = pointer_of(&ev);
                forward(&ev, DeskletEvent::PointerUp { pointer });
            }
            on:pointermove=move |ev: ev::PointerEvent| {
                let Some(orientation) = state.with_untracked(|state| {
                    state.as_ref().map(|state| state.orientation)
                }) else {
                    return;
                };
                let pointer = pointer_of(&ev);
                let list = measure_list(orientation);
                forward(&ev, DeskletEvent::PointerMove { pointer, list });
            }
        >
            <For
                each=move || projection.get().items
                key=|item| (item.id, item.class_name.clone(), item.style.clone(), item.icon.clone())
                children=move |item| view! { <DeskletItemTile item=item on_activate=on_activate/> }
            />
        </div>
    }
}

#[component]
fn DeskletItemTile(item: ItemView, on_activate: Callback<ItemId>) -> impl IntoView {
    let label = item.label.clone().unwrap_or_default();
    let mut style = item.style.clone();
    let body = match item.icon.clone() {
        None => ().into_view(),
        Some(LauncherIcon::Image(src)) => {
            style.push_str(&format!("background-image:url('{src}');background-size:contain;"));
            view! { <span>{label}</span> }.into_view()
        }
        Some(LauncherIcon::TypeGlyph(token)) => view! {
            <div class="File">
                <div class="Icon"><div class=format!("Type{token}")></div></div>
                <span>{label}</span>
            </div>
        }
        .into_view(),
        Some(LauncherIcon::Bookmark { label, favicon }) => view! {
            <div class="File">
                <div class="Icon">
                    <div class="TypeWebUrl" style="background-size: contain">
                        {favicon.map(|src| view! { <img class="Favicon" src=src/> })}
                        <span>{label.clone()}</span>
                    </div>
                </div>
                <span>{label}</span>
            </div>
        }
        .into_view(),
    };
    let id = item.id;
    let is_launcher = item.icon.is_some();

    view! {
        <div
            class=item.class_name
            style=style
            title=item.title
            on:click=move |_| {
                if is_launcher {
                    on_activate.call(id);
                }
            }
        >
            {body}
        </div>
    }
}
