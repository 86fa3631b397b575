//! Single source of truth for "which division am I operating as".
//!
//! A provider component owns the selection signal; views subscribe through
//! `use_division()`. Same-tab updates are synchronous (a fetch issued right
//! after `set_selection` observes the new value); other tabs catch up via
//! the window `storage` event.

use contracts::division::DivisionSelection;
use leptos::prelude::*;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;

use super::storage;

#[derive(Clone, Copy)]
pub struct DivisionContext {
    selection: RwSignal<Option<DivisionSelection>>,
}

impl DivisionContext {
    pub fn new(initial: Option<DivisionSelection>) -> Self {
        Self {
            selection: RwSignal::new(initial),
        }
    }

    /// Current selection; never throws. `None` means the view must prompt
    /// for a division before loading scoped data.
    pub fn selection(&self) -> Option<DivisionSelection> {
        self.selection.get()
    }

    pub fn selection_untracked(&self) -> Option<DivisionSelection> {
        self.selection.get_untracked()
    }

    /// Reactive handle for views that re-fetch on division change.
    pub fn signal(&self) -> RwSignal<Option<DivisionSelection>> {
        self.selection
    }

    /// Persist and broadcast a new selection. The in-memory signal is
    /// updated before returning, so dependent fetches never race a stale
    /// read; subscribers re-fetch through their own effects.
    pub fn set_selection(&self, selection: DivisionSelection) {
        storage::save_selection(&selection);
        self.selection.set(Some(selection));
    }

    /// Drop the selection (logout / session clear).
    pub fn clear(&self) {
        storage::clear_selection();
        self.selection.set(None);
    }

    pub fn is_all_selected(&self) -> bool {
        self.selection
            .get()
            .map(|sel| sel.is_all())
            .unwrap_or(false)
    }
}

/// Division context provider component.
#[component]
pub fn DivisionProvider(children: ChildrenFn) -> impl IntoView {
    let ctx = DivisionContext::new(storage::load_selection());
    provide_context(ctx);

    // Cross-tab change broadcast: another tab re-selecting a division fires
    // a storage event here; re-read and let subscribers re-fetch.
    if let Some(window) = web_sys::window() {
        let on_storage = Closure::<dyn FnMut(web_sys::StorageEvent)>::new(
            move |event: web_sys::StorageEvent| {
                let key = event.key().unwrap_or_default();
                if key == storage::DIVISION_ID_KEY || key == storage::DIVISION_NAME_KEY {
                    ctx.selection.set(storage::load_selection());
                }
            },
        );
        let _ = window
            .add_event_listener_with_callback("storage", on_storage.as_ref().unchecked_ref());
        // The listener lives as long as the app does.
        on_storage.forget();
    }

    children()
}

/// Hook to access the division context.
pub fn use_division() -> DivisionContext {
    use_context::<DivisionContext>().expect("DivisionProvider not found in component tree")
}
