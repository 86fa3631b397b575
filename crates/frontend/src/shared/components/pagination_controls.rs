use contracts::list::{DEFAULT_LIMIT, PAGE_LIMITS};
use leptos::prelude::*;

/// Pager strip shown above every list: first/prev/next/last buttons, a
/// "page X of Y" readout over the filtered count, and the page-size
/// selector. Pages are 1-based.
#[component]
pub fn PaginationControls(
    #[prop(into)] current_page: Signal<usize>,

    #[prop(into)] total_pages: Signal<usize>,

    /// Size of the filtered set the pages are cut from.
    #[prop(into)]
    total_count: Signal<usize>,

    #[prop(into)] limit: Signal<usize>,

    on_page_change: Callback<usize>,

    on_limit_change: Callback<usize>,

    /// Page sizes to offer; defaults to the standard steps.
    #[prop(optional)]
    limit_options: Option<Vec<usize>>,
) -> impl IntoView {
    let limit_opts = limit_options.unwrap_or_else(|| PAGE_LIMITS.to_vec());

    let last = move || total_pages.get().max(1);
    let at_first = move || current_page.get() <= 1;
    let at_last = move || current_page.get() >= last();
    let go = move |target: usize| {
        let clamped = target.clamp(1, last());
        if clamped != current_page.get_untracked() {
            on_page_change.run(clamped);
        }
    };

    view! {
        <div class="pager">
            <button class="pager__btn" disabled=at_first title="First page"
                on:click=move |_| go(1)>
                "«"
            </button>
            <button class="pager__btn" disabled=at_first title="Previous page"
                on:click=move |_| go(current_page.get().saturating_sub(1))>
                "‹"
            </button>
            <span class="pager__status">
                {move || {
                    format!(
                        "Page {} of {} · {} items",
                        current_page.get(),
                        last(),
                        total_count.get()
                    )
                }}
            </span>
            <button class="pager__btn" disabled=at_last title="Next page"
                on:click=move |_| go(current_page.get() + 1)>
                "›"
            </button>
            <button class="pager__btn" disabled=at_last title="Last page"
                on:click=move |_| go(last())>
                "»"
            </button>
            <select
                class="pager__limit"
                prop:value=move || limit.get().to_string()
                on:change=move |ev| {
                    on_limit_change.run(event_target_value(&ev).parse().unwrap_or(DEFAULT_LIMIT));
                }
            >
                {limit_opts
                    .iter()
                    .map(|&size| {
                        view! {
                            <option value=size.to_string() selected=move || limit.get() == size>
                                {size.to_string()}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </div>
    }
}
