use leptos::prelude::*;

/// Collapsible wrapper around a screen's filter controls. The header
/// shows a badge with the number of active filters so a collapsed panel
/// still tells the user the list is narrowed.
#[component]
pub fn FilterPanel(
    #[prop(into)] is_expanded: RwSignal<bool>,

    #[prop(into)] active_filters_count: Signal<usize>,

    children: ChildrenFn,
) -> impl IntoView {
    view! {
        <section class="filters">
            <button
                class="filters__toggle"
                on:click=move |_| is_expanded.update(|expanded| *expanded = !*expanded)
            >
                <span class=move || {
                    if is_expanded.get() { "filters__arrow filters__arrow--open" } else { "filters__arrow" }
                }>
                    "▸"
                </span>
                <span class="filters__title">"Filters"</span>
                {move || {
                    let count = active_filters_count.get();
                    (count > 0)
                        .then(|| view! { <span class="badge badge--primary">{count}</span> })
                }}
            </button>
            <div class=move || {
                if is_expanded.get() { "filters__body" } else { "filters__body filters__body--hidden" }
            }>{children()}</div>
        </section>
    }
}
