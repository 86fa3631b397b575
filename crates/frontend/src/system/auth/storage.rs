//! Session credentials and profile in localStorage. Token issuance and
//! refresh belong to the external auth client; this module only reads
//! what it left behind.

use contracts::domain::UserProfile;
use web_sys::window;

const ACCESS_TOKEN_KEY: &str = "accessToken";
const USER_KEY: &str = "user";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Read the bearer token. Called at request time, never cached, so a
/// token refreshed mid-session is honored on the next call.
pub fn get_access_token() -> Option<String> {
    get_local_storage()?.get_item(ACCESS_TOKEN_KEY).ok()?
}

pub fn save_access_token(token: &str) {
    if let Some(storage) = get_local_storage() {
        let _ = storage.set_item(ACCESS_TOKEN_KEY, token);
    }
}

/// Stored profile, or `None` when absent or unparseable (logged).
pub fn get_user_profile() -> Option<UserProfile> {
    let raw = get_local_storage()?.get_item(USER_KEY).ok()??;
    match serde_json::from_str(&raw) {
        Ok(profile) => Some(profile),
        Err(err) => {
            log::warn!("Malformed user profile in storage, ignoring: {}", err);
            None
        }
    }
}

pub fn save_user_profile(profile: &UserProfile) {
    if let Some(storage) = get_local_storage() {
        if let Ok(raw) = serde_json::to_string(profile) {
            let _ = storage.set_item(USER_KEY, &raw);
        }
    }
}

/// Drop credentials and profile on logout.
pub fn clear_session() {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(ACCESS_TOKEN_KEY);
        let _ = storage.remove_item(USER_KEY);
    }
}
