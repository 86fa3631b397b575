//! Damaged goods register: division-scoped list with column search,
//! client-side pagination and export.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::super::api;
use crate::shared::components::data_table::{ColumnDef, DataTable};
use crate::shared::components::error_modal::ErrorModal;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::division::use_division;
use crate::shared::export::{export_rows, ExportFormat};
use crate::shared::list_controller::refresh::use_refresh_registry;
use crate::shared::list_controller::ListController;

fn columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::searchable("Product", "product.name"),
        ColumnDef::new("SKU", "product.sku"),
        ColumnDef::new("Quantity", "quantity"),
        ColumnDef::searchable("Reason", "reason"),
        ColumnDef::date("Reported", "reportedAt"),
    ]
}

#[component]
pub fn DamagedGoodsList() -> impl IntoView {
    let division = use_division();
    let registry = use_refresh_registry();
    let controller = ListController::new(api::endpoint_policy(), division);

    let load = move || {
        spawn_local(async move {
            controller.load().await;
        })
    };

    // Initial load, and a full re-fetch whenever the division changes.
    // Invalidate first so an in-flight response for the old division
    // cannot commit.
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

    let export = move |format: ExportFormat| {
        let rows = controller.filtered_items.get_untracked();
        if let Err(err) = export_rows(format, &columns(), &rows, "damaged-goods") {
            log::warn!("Export failed: {}", err);
        }
    };

    let search_terms = Signal::derive(move || controller.query.with(|q| q.search_terms.clone()));

    view! {
        <div class="page damaged-goods-list">
            <div class="page-header">
                <h2>"Damaged goods"</h2>
                <div class="page-header__actions">
                    <button class="btn" on:click=move |_| export(ExportFormat::Xls)>"XLS"</button>
                    <button class="btn" on:click=move |_| export(ExportFormat::Pdf)>"PDF"</button>
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
                    view! { <div class="skeleton">"Loading..."</div> }.into_any()
                } else {
                    view! {
                        <DataTable
                            columns=columns()
                            rows=controller.page_items
                            search_terms=search_terms
                            on_search=Callback::new(move |(accessor, term): (String, String)| {
                                controller.set_search(&accessor, Some(term));
                            })
                            empty_message="No damaged goods recorded"
                        />
                    }
                        .into_any()
                }
            }}

            <ErrorModal
                open=controller.error_open
                message=Signal::derive(move || {
                    controller
                        .error
                        .with(|e| {
                            e.as_ref()
                                .map(|err| err.user_message("Failed to load damaged goods"))
                                .unwrap_or_default()
                        })
                })
                on_retry=Callback::new(move |_| load())
            />
        </div>
    }
}
