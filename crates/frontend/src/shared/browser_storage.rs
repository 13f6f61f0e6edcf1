use web_sys::{window, Storage};

const ACCESS_TOKEN_KEY: &str = "auth_access_token";

fn get_local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

fn get_session_storage() -> Option<Storage> {
    window()?.session_storage().ok()?
}

/// Read a value from localStorage
pub fn get_local(key: &str) -> Option<String> {
    get_local_storage()?.get_item(key).ok()?
}

/// Save a value to localStorage
pub fn set_local(key: &str, value: &str) {
    if let Some(storage) = get_local_storage() {
        let _ = storage.set_item(key, value);
    }
}

/// Read a value from sessionStorage
pub fn get_session(key: &str) -> Option<String> {
    get_session_storage()?.get_item(key).ok()?
}

/// Save a value to sessionStorage
pub fn set_session(key: &str, value: &str) {
    if let Some(storage) = get_session_storage() {
        let _ = storage.set_item(key, value);
    }
}

/// Remove a value from sessionStorage
pub fn remove_session(key: &str) {
    if let Some(storage) = get_session_storage() {
        let _ = storage.remove_item(key);
    }
}

/// Access token saved by the login page
pub fn get_access_token() -> Option<String> {
    get_local(ACCESS_TOKEN_KEY).filter(|t| !t.is_empty())
}
