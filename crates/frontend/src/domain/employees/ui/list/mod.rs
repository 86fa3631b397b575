//! Employee management: division-scoped list plus create/delete. A failed
//! mutation keeps the form open with the entered values and shows the
//! error dialog; a successful one refreshes the list through the registry.

use contracts::domain::{Employee, NewEmployee};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::super::api;
use crate::shared::components::error_modal::ErrorModal;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::division::use_division;
use crate::shared::list_controller::refresh::use_refresh_registry;
use crate::shared::list_controller::ListController;

#[component]
pub fn EmployeesList() -> impl IntoView {
    let division = use_division();
    let registry = use_refresh_registry();
    let controller = ListController::new(api::endpoint_policy(), division);

    let load = move || {
        spawn_local(async move {
            controller.load().await;
        })
    };

    Effect::new(move |_| {
        division.signal().track();
        controller.invalidate();
        load();
    });

    registry.register(api::REFRESH_KEY, load);
    {
        let registry = registry.clone();
        on_cleanup(move || {
            registry.unregister(api::REFRESH_KEY);
            controller.invalidate();
        });
    }

    // Create form. Field signals survive a failed submit by design.
    let form_open = RwSignal::new(false);
    let first_name = RwSignal::new(String::new());
    let last_name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let position = RwSignal::new(String::new());
    let form_error = RwSignal::new(String::new());
    let form_error_open = RwSignal::new(false);
    let saving = RwSignal::new(false);

    let registry_for_submit = registry.clone();
    let submit = move |_| {
        if first_name.get_untracked().trim().is_empty()
            || last_name.get_untracked().trim().is_empty()
        {
            form_error.set("First and last name are required".to_string());
            form_error_open.set(true);
            return;
        }
        let dto = NewEmployee {
            first_name: first_name.get_untracked(),
            last_name: last_name.get_untracked(),
            email: email.get_untracked(),
            position: position.get_untracked(),
        };
        let registry = registry_for_submit.clone();
        saving.set(true);
        spawn_local(async move {
            match api::create_employee(&dto).await {
                Ok(response) => {
                    log::debug!("Employee created: {}", response.message);
                    saving.set(false);
                    form_open.set(false);
                    first_name.set(String::new());
                    last_name.set(String::new());
                    email.set(String::new());
                    position.set(String::new());
                    registry.refresh(api::REFRESH_KEY);
                }
                Err(err) => {
                    // Keep the form open and the entered values intact.
                    saving.set(false);
                    form_error.set(err.user_message("Failed to create employee"));
                    form_error_open.set(true);
                }
            }
        });
    };

    let registry_for_delete = registry.clone();
    let delete = move |id: String| {
        let registry = registry_for_delete.clone();
        spawn_local(async move {
            match api::delete_employee(&id).await {
                Ok(response) => {
                    log::debug!("Employee deleted: {}", response.message);
                    registry.refresh(api::REFRESH_KEY);
                }
                Err(err) => {
                    controller
                        .error
                        .set(Some(err));
                    controller.error_open.set(true);
                }
            }
        });
    };

    let employees = Memo::new(move |_| {
        controller
            .page_items
            .get()
            .into_iter()
            .filter_map(|row| serde_json::from_value::<Employee>(row).ok())
            .collect::<Vec<_>>()
    });

    view! {
        <div class="page employees-list">
            <div class="page-header">
                <h2>"Employees"</h2>
                <div class="page-header__actions">
                    <button class="btn btn--primary" on:click=move |_| form_open.set(true)>
                        "Add employee"
                    </button>
                </div>
            </div>

            <PaginationControls
                current_page=Signal::derive(move || controller.query.with(|q| q.page))
                total_pages=controller.total_pages
                total_count=Signal::derive(move || controller.filtered_items.with(Vec::len))
                limit=Signal::derive(move || controller.query.with(|q| q.limit))
                on_page_change=Callback::new(move |page| controller.set_page(page))
                on_limit_change=Callback::new(move |limit| controller.set_limit(limit))
            />

            {move || {
                if controller.loading.get() {
                    return view! { <div class="skeleton">"Loading..."</div> }.into_any();
                }
                let rows = employees.get();
                if rows.is_empty() {
                    return view! { <div class="empty-state">"No employees"</div> }.into_any();
                }
                view! {
                    <table class="data-table">
                        <thead>
                            <tr>
                                <th>"Name"</th>
                                <th>"Email"</th>
                                <th>"Position"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            {rows
                                .into_iter()
                                .map(|employee| {
                                    let delete = delete.clone();
                                    let id = employee.id.clone();
                                    view! {
                                        <tr>
                                            <td>
                                                {format!("{} {}", employee.first_name, employee.last_name)}
                                            </td>
                                            <td>{employee.email.clone().unwrap_or_default()}</td>
                                            <td>{employee.position.clone().unwrap_or_default()}</td>
                                            <td>
                                                <button
                                                    class="btn btn--danger"
                                                    on:click=move |_| delete(id.clone())
                                                >
                                                    "Delete"
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                })
                                .collect_view()}
                        </tbody>
                    </table>
                }
                    .into_any()
            }}

            {move || {
                if !form_open.get() {
                    return view! { <></> }.into_any();
                }
                let submit = submit.clone();
                view! {
                    <div class="modal-overlay">
                        <div class="modal">
                            <div class="modal__title">"New employee"</div>
                            <label class="form-field">
                                <span>"First name"</span>
                                <input
                                    prop:value=move || first_name.get()
                                    on:input=move |ev| first_name.set(event_target_value(&ev))
                                />
                            </label>
                            <label class="form-field">
                                <span>"Last name"</span>
                                <input
                                    prop:value=move || last_name.get()
                                    on:input=move |ev| last_name.set(event_target_value(&ev))
                                />
                            </label>
                            <label class="form-field">
                                <span>"Email"</span>
                                <input
                                    prop:value=move || email.get()
                                    on:input=move |ev| email.set(event_target_value(&ev))
                                />
                            </label>
                            <label class="form-field">
                                <span>"Position"</span>
                                <input
                                    prop:value=move || position.get()
                                    on:input=move |ev| position.set(event_target_value(&ev))
                                />
                            </label>
                            <div class="modal__actions">
                                <button class="btn btn--primary" disabled=move || saving.get() on:click=submit>
                                    {move || if saving.get() { "Saving..." } else { "Save" }}
                                </button>
                                <button class="btn" on:click=move |_| form_open.set(false)>
                                    "Cancel"
                                </button>
                            </div>
                        </div>
                    </div>
                }
                    .into_any()
            }}

            <ErrorModal open=form_error_open message=form_error />

            <ErrorModal
                open=controller.error_open
                message=Signal::derive(move || {
                    controller
                        .error
                        .with(|e| {
                            e.as_ref()
                                .map(|err| err.user_message("Failed to load employees"))
                                .unwrap_or_default()
                        })
                })
                on_retry=Callback::new(move |_| load())
            />
        </div>
    }
}
