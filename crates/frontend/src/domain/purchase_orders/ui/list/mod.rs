//! Purchase order report: cascading warehouse → product → order filters
//! feeding the list controller, with export.

use contracts::domain::FilterOption;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::super::api;
use crate::shared::components::data_table::{ColumnDef, DataTable};
use crate::shared::components::error_modal::ErrorModal;
use crate::shared::components::filter_panel::FilterPanel;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::division::use_division;
use crate::shared::export::{export_rows, ExportFormat};
use crate::shared::filters::FilterCascade;
use crate::shared::list_controller::refresh::use_refresh_registry;
use crate::shared::list_controller::ListController;

const CASCADE_LEVELS: [&str; 3] = ["warehouseId", "productId", "orderId"];
const CASCADE_LABELS: [&str; 3] = ["Warehouse", "Product", "Order"];

fn columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::searchable("Order #", "orderNumber"),
        ColumnDef::searchable("Supplier", "supplier"),
        ColumnDef::new("Status", "status"),
        ColumnDef::new("Total", "total"),
        ColumnDef::date("Created", "createdAt"),
    ]
}

#[component]
pub fn PurchaseOrdersList() -> impl IntoView {
    let division = use_division();
    let registry = use_refresh_registry();
    let controller = ListController::new(api::endpoint_policy(), division);
    let cascade = RwSignal::new(FilterCascade::new(&CASCADE_LEVELS));
    let is_filter_expanded = RwSignal::new(true);

    let load = move || {
        spawn_local(async move {
            controller.load().await;
        })
    };

    let load_options = move |level: usize, parent: String| {
        spawn_local(async move {
            let selection = division.selection_untracked();
            match api::fetch_options(level, &parent, selection.as_ref()).await {
                Ok(options) => cascade.update(|c| c.set_options(level, options)),
                Err(err) => {
                    // Degraded mode: keep the screen usable on clearly
                    // marked sample options instead of blocking it.
                    log::warn!(
                        "Options for cascade level {} unavailable ({}), falling back to samples",
                        level,
                        err
                    );
                    cascade.update(|c| {
                        c.apply_degraded_options(level);
                    });
                }
            }
        })
    };

    // Division change: reset the whole cascade, reload root options and
    // the list itself.
    Effect::new(move |_| {
        division.signal().track();
        controller.invalidate();
        cascade.update(|c| c.set_value(0, None));
        controller.query.update(|q| {
            q.filters.clear();
            q.page = 1;
        });
        load_options(api::LEVEL_WAREHOUSE, String::new());
        load();
    });

    // Selecting a cascade value clears all deeper levels, repopulates the
    // next level's options and re-fetches with the new filter set.
    let on_cascade_change = Callback::new(move |(level, value): (usize, String)| {
        let value = Some(value).filter(|v| !v.is_empty());
        cascade.update(|c| c.set_value(level, value.clone()));
        controller.query.update(|q| {
            q.filters.clear();
            for (name, v) in cascade.get_untracked().active_values() {
                q.filters.insert(name.to_string(), v);
            }
            q.page = 1;
        });
        if let Some(parent) = value {
            if level + 1 < CASCADE_LEVELS.len() {
                load_options(level + 1, parent);
            }
        }
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
        if let Err(err) = export_rows(format, &columns(), &rows, "purchase-orders") {
            log::warn!("Export failed: {}", err);
        }
    };

    let search_terms = Signal::derive(move || controller.query.with(|q| q.search_terms.clone()));

    view! {
        <div class="page purchase-orders-list">
            <div class="page-header">
                <h2>"Purchase orders"</h2>
                <div class="page-header__actions">
                    <button class="btn" on:click=move |_| export(ExportFormat::Xls)>"XLS"</button>
                    <button class="btn" on:click=move |_| export(ExportFormat::Pdf)>"PDF"</button>
                </div>
            </div>

            <FilterPanel
                is_expanded=is_filter_expanded
                active_filters_count=Signal::derive(move || {
                    controller.query.with(|q| q.active_filter_count())
                })
            >
                <div class="filter-row">
                    {(0..CASCADE_LEVELS.len())
                        .map(|level| {
                            view! {
                                <CascadeSelect
                                    cascade=cascade
                                    level=level
                                    label=CASCADE_LABELS[level]
                                    on_change=on_cascade_change
                                />
                            }
                        })
                        .collect_view()}
                </div>
            </FilterPanel>

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
                            empty_message="No purchase orders for this filter"
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
                                .map(|err| err.user_message("Failed to load purchase orders"))
                                .unwrap_or_default()
                        })
                })
                on_retry=Callback::new(move |_| load())
            />
        </div>
    }
}

/// One dropdown of the cascade. Disabled until every ancestor level has a
/// value; degraded-mode placeholder options are visibly marked.
#[component]
fn CascadeSelect(
    cascade: RwSignal<FilterCascade>,
    level: usize,
    label: &'static str,
    on_change: Callback<(usize, String)>,
) -> impl IntoView {
    view! {
        <label class="filter-field">
            <span class="filter-field__label">
                {label}
                {move || {
                    if cascade.with(|c| c.is_degraded(level)) {
                        view! { <span class="badge badge--warning">"sample data"</span> }.into_any()
                    } else {
                        view! { <></> }.into_any()
                    }
                }}
            </span>
            <select
                disabled=move || !cascade.with(|c| c.is_enabled(level))
                on:change=move |ev| on_change.run((level, event_target_value(&ev)))
                prop:value=move || {
                    cascade.with(|c| c.value(level).unwrap_or_default().to_string())
                }
            >
                <option value="">"All"</option>
                {move || {
                    cascade
                        .with(|c| c.options(level).to_vec())
                        .into_iter()
                        .map(|option: FilterOption| {
                            let selected = cascade
                                .with_untracked(|c| c.value(level) == Some(option.id.as_str()));
                            let text = if option.placeholder {
                                format!("{} (sample)", option.label)
                            } else {
                                option.label.clone()
                            };
                            view! {
                                <option value=option.id.clone() selected=selected>{text}</option>
                            }
                        })
                        .collect_view()
                }}
            </select>
        </label>
    }
}
