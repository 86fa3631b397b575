use leptos::prelude::*;

/// The one error-dialog pattern reused everywhere: a dismissible modal
/// with the error message and, for full-page fetch failures, a Retry
/// action that re-runs the same load.
#[component]
pub fn ErrorModal(
    open: RwSignal<bool>,

    #[prop(into)] message: Signal<String>,

    /// Present for retryable full-page loads; absent for mutation errors.
    #[prop(optional)]
    on_retry: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        {move || {
            if !open.get() {
                return view! { <></> }.into_any();
            }
            view! {
                <div class="modal-overlay">
                    <div class="modal modal--error">
                        <div class="modal__title">"Error"</div>
                        <div class="modal__message">{message.get()}</div>
                        <div class="modal__actions">
                            {on_retry
                                .map(|retry| {
                                    view! {
                                        <button
                                            class="btn btn--primary"
                                            on:click=move |_| {
                                                open.set(false);
                                                retry.run(());
                                            }
                                        >
                                            "Retry"
                                        </button>
                                    }
                                })}
                            <button class="btn" on:click=move |_| open.set(false)>
                                "Dismiss"
                            </button>
                        </div>
                    </div>
                </div>
            }
                .into_any()
        }}
    }
}
