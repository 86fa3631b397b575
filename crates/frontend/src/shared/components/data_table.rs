//! Generic table over the controller's current page. Columns resolve
//! their cells through dotted accessors; searchable columns toggle an
//! inline per-column search input on header click.

use std::collections::BTreeMap;

use contracts::list::lookup_field;
use leptos::prelude::*;
use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnDef {
    pub title: &'static str,
    /// Dotted path into the row JSON, e.g. `product.name`.
    pub accessor: &'static str,
    /// Clicking the header toggles a search input for this column.
    pub searchable: bool,
    /// Render the value as DD.MM.YYYY instead of the raw ISO string.
    pub date: bool,
}

impl ColumnDef {
    pub fn new(title: &'static str, accessor: &'static str) -> Self {
        Self {
            title,
            accessor,
            searchable: false,
            date: false,
        }
    }

    pub fn searchable(title: &'static str, accessor: &'static str) -> Self {
        Self {
            searchable: true,
            ..Self::new(title, accessor)
        }
    }

    pub fn date(title: &'static str, accessor: &'static str) -> Self {
        Self {
            date: true,
            ..Self::new(title, accessor)
        }
    }
}

/// Text rendering of one cell value.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Cell text with the column's formatting applied.
pub fn column_text(row: &Value, column: &ColumnDef) -> String {
    let text = lookup_field(row, column.accessor)
        .map(cell_text)
        .unwrap_or_default();
    if column.date && !text.is_empty() {
        crate::shared::date_utils::format_date(&text)
    } else {
        text
    }
}

#[component]
pub fn DataTable(
    columns: Vec<ColumnDef>,

    /// Current page of rows.
    #[prop(into)]
    rows: Signal<Vec<Value>>,

    /// Active per-column search terms, keyed by accessor.
    #[prop(into)]
    search_terms: Signal<BTreeMap<String, String>>,

    /// Called with (accessor, term) when a search input changes.
    on_search: Callback<(String, String)>,

    /// Shown when `rows` is empty and no error is pending.
    #[prop(optional)]
    empty_message: Option<&'static str>,
) -> impl IntoView {
    let empty_message = empty_message.unwrap_or("No data");
    let open_search = RwSignal::new(Vec::<&'static str>::new());
    let header_columns = columns.clone();
    let body_columns = columns;

    view! {
        <table class="data-table">
            <thead>
                <tr>
                    {header_columns
                        .into_iter()
                        .map(|column| {
                            let toggle = move |_| {
                                if !column.searchable {
                                    return;
                                }
                                open_search.update(|open| {
                                    if let Some(i) = open.iter().position(|a| *a == column.accessor) {
                                        open.remove(i);
                                    } else {
                                        open.push(column.accessor);
                                    }
                                });
                            };
                            view! {
                                <th
                                    class=move || {
                                        if column.searchable { "data-table__header data-table__header--searchable" }
                                        else { "data-table__header" }
                                    }
                                    on:click=toggle
                                >
                                    {column.title}
                                    {move || {
                                        let is_open = open_search.get().contains(&column.accessor);
                                        if is_open {
                                            let term = search_terms
                                                .get()
                                                .get(column.accessor)
                                                .cloned()
                                                .unwrap_or_default();
                                            view! {
                                                <input
                                                    class="data-table__search"
                                                    placeholder="Search..."
                                                    prop:value=term
                                                    on:click=move |ev| ev.stop_propagation()
                                                    on:input=move |ev| {
                                                        on_search.run((
                                                            column.accessor.to_string(),
                                                            event_target_value(&ev),
                                                        ));
                                                    }
                                                />
                                            }
                                                .into_any()
                                        } else {
                                            view! { <></> }.into_any()
                                        }
                                    }}
                                </th>
                            }
                        })
                        .collect_view()}
                </tr>
            </thead>
            <tbody>
                {move || {
                    let current = rows.get();
                    if current.is_empty() {
                        let span = body_columns.len().to_string();
                        view! {
                            <tr>
                                <td class="data-table__empty" colspan=span>{empty_message}</td>
                            </tr>
                        }
                            .into_any()
                    } else {
                        current
                            .into_iter()
                            .map(|row| {
                                let cells = body_columns
                                    .iter()
                                    .map(|column| {
                                        let text = column_text(&row, column);
                                        view! { <td>{text}</td> }
                                    })
                                    .collect_view();
                                view! { <tr>{cells}</tr> }
                            })
                            .collect_view()
                            .into_any()
                    }
                }}
            </tbody>
        </table>
    }
}
