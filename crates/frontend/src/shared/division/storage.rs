//! Durable mirror of the active division selection.
//!
//! The id and name live under scalar keys so every scoped fetch can read
//! them synchronously; descriptive attributes are not persisted.

use contracts::division::DivisionSelection;
use web_sys::window;

pub const DIVISION_ID_KEY: &str = "currentDivisionId";
pub const DIVISION_NAME_KEY: &str = "currentDivisionName";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Load the persisted selection. Anything malformed (blank id) reads as
/// "no selection" — recoverable, logged, never fatal.
pub fn load_selection() -> Option<DivisionSelection> {
    let storage = get_local_storage()?;
    let id = storage.get_item(DIVISION_ID_KEY).ok()??;
    if id.trim().is_empty() {
        log::warn!("Blank division id in storage, treating as no selection");
        return None;
    }
    let name = storage
        .get_item(DIVISION_NAME_KEY)
        .ok()
        .flatten()
        .unwrap_or_default();
    Some(DivisionSelection::new(id, name))
}

pub fn save_selection(selection: &DivisionSelection) {
    if let Some(storage) = get_local_storage() {
        let _ = storage.set_item(DIVISION_ID_KEY, &selection.id);
        let _ = storage.set_item(DIVISION_NAME_KEY, &selection.name);
    }
}

pub fn clear_selection() {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(DIVISION_ID_KEY);
        let _ = storage.remove_item(DIVISION_NAME_KEY);
    }
}
