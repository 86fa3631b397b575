//! Console header: active division selector and the gate blocking scoped
//! screens while no division is selected.

use contracts::division::{DivisionSelection, ALL_DIVISIONS};
use contracts::domain::Division;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::api::ScopedClient;
use crate::shared::division::use_division;
use crate::system::auth::storage;

/// Division selector. Offered only when the stored profile carries the
/// `showDivisions` flag; everyone else just sees the current division name.
#[component]
pub fn DivisionSelect() -> impl IntoView {
    let division = use_division();
    let (divisions, set_divisions) = signal(Vec::<Division>::new());

    let show_selector = storage::get_user_profile()
        .map(|profile| profile.show_divisions)
        .unwrap_or(false);

    if show_selector {
        // The division list itself is the one deliberately unscoped fetch.
        spawn_local(async move {
            match ScopedClient::new()
                .get_collection("/api/divisions", &[], None, "divisions")
                .await
            {
                Ok(items) => {
                    let parsed: Vec<Division> = items
                        .into_iter()
                        .filter_map(|v| serde_json::from_value(v).ok())
                        .collect();
                    set_divisions.set(parsed);
                }
                Err(err) => {
                    log::error!("Failed to load divisions: {}", err);
                }
            }
        });
    }

    let on_change = move |ev: web_sys::Event| {
        let id = event_target_value(&ev);
        if id.is_empty() {
            return;
        }
        if id == ALL_DIVISIONS {
            division.set_selection(DivisionSelection::all());
            return;
        }
        let name = divisions
            .get_untracked()
            .iter()
            .find(|d| d.id == id)
            .map(|d| d.name.clone())
            .unwrap_or_default();
        division.set_selection(DivisionSelection::new(id, name));
    };

    view! {
        <div class="division-select">
            {move || {
                if !show_selector {
                    let name = division
                        .selection()
                        .map(|sel| sel.name)
                        .unwrap_or_else(|| "No division".to_string());
                    return view! { <span class="division-select__name">{name}</span> }.into_any();
                }
                let current = division.selection().map(|sel| sel.id).unwrap_or_default();
                view! {
                    <select class="division-select__control" on:change=on_change prop:value=current.clone()>
                        <option value="" disabled=true selected=current.is_empty()>
                            "Select division..."
                        </option>
                        <option value=ALL_DIVISIONS selected=(current == ALL_DIVISIONS)>
                            "All divisions"
                        </option>
                        {divisions
                            .get()
                            .into_iter()
                            .map(|d| {
                                let selected = d.id == current;
                                view! {
                                    <option value=d.id.clone() selected=selected>{d.name.clone()}</option>
                                }
                            })
                            .collect_view()}
                    </select>
                }
                    .into_any()
            }}
        </div>
    }
}

/// Blocks division-scoped content until a selection exists. The prompt is
/// a blocking state, not an error.
#[component]
pub fn DivisionGate(children: ChildrenFn) -> impl IntoView {
    let division = use_division();
    view! {
        {move || {
            if division.selection().is_some() {
                children().into_any()
            } else {
                view! {
                    <div class="division-gate">
                        <p>"Select a division to continue."</p>
                    </div>
                }
                    .into_any()
            }
        }}
    }
}
