//! Browser-backed payload channels: the event's DataTransfer, the session
//! storage and a property on `window`.

use wasm_bindgen::JsValue;
use web_sys::{DataTransfer, DragEvent};

use super::channels::PayloadChannel;
use crate::shared::browser_storage;

pub const DRAG_MIME_JSON: &str = "application/json";
pub const DRAG_MIME_TEXT: &str = "text/plain";
pub const SESSION_STORAGE_KEY: &str = "draggedStandardItem";
pub const WINDOW_GLOBAL_KEY: &str = "currentDragData";

/// Native drag data of a single drag event.
pub struct DataTransferChannel {
    transfer: Option<DataTransfer>,
}

impl DataTransferChannel {
    pub fn from_event(ev: &DragEvent) -> Self {
        Self {
            transfer: ev.data_transfer(),
        }
    }
}

impl PayloadChannel for DataTransferChannel {
    fn name(&self) -> &'static str {
        "dataTransfer"
    }

    fn store(&self, payload: &str) {
        if let Some(transfer) = &self.transfer {
            let _ = transfer.set_data(DRAG_MIME_JSON, payload);
            let _ = transfer.set_data(DRAG_MIME_TEXT, payload);
            transfer.set_effect_allowed("copy");
        }
    }

    fn load(&self) -> Option<String> {
        let transfer = self.transfer.as_ref()?;
        [DRAG_MIME_JSON, DRAG_MIME_TEXT]
            .into_iter()
            .filter_map(|mime| transfer.get_data(mime).ok())
            .find(|data| !data.is_empty())
    }

    fn clear(&self) {
        // Read-only outside dragstart; the browser drops it after the gesture.
        if let Some(transfer) = &self.transfer {
            let _ = transfer.clear_data();
        }
    }
}

pub struct SessionStorageChannel;

impl PayloadChannel for SessionStorageChannel {
    fn name(&self) -> &'static str {
        "sessionStorage"
    }

    fn store(&self, payload: &str) {
        browser_storage::set_session(SESSION_STORAGE_KEY, payload);
    }

    fn load(&self) -> Option<String> {
        browser_storage::get_session(SESSION_STORAGE_KEY)
    }

    fn clear(&self) {
        browser_storage::remove_session(SESSION_STORAGE_KEY);
    }
}

/// `window.currentDragData`
pub struct WindowGlobalChannel;

impl PayloadChannel for WindowGlobalChannel {
    fn name(&self) -> &'static str {
        "window"
    }

    fn store(&self, payload: &str) {
        if let Some(window) = web_sys::window() {
            let _ = js_sys::Reflect::set(
                &window,
                &JsValue::from_str(WINDOW_GLOBAL_KEY),
                &JsValue::from_str(payload),
            );
        }
    }

    fn load(&self) -> Option<String> {
        let window = web_sys::window()?;
        js_sys::Reflect::get(&window, &JsValue::from_str(WINDOW_GLOBAL_KEY))
            .ok()?
            .as_string()
    }

    fn clear(&self) {
        if let Some(window) = web_sys::window() {
            let _ = js_sys::Reflect::delete_property(&window, &JsValue::from_str(WINDOW_GLOBAL_KEY));
        }
    }
}

/// Channels for a drag event, in recovery priority order.
pub fn drag_channels(ev: Option<&DragEvent>) -> Vec<Box<dyn PayloadChannel>> {
    let mut channels: Vec<Box<dyn PayloadChannel>> = Vec::with_capacity(3);
    if let Some(ev) = ev {
        channels.push(Box::new(DataTransferChannel::from_event(ev)));
    }
    channels.push(Box::new(SessionStorageChannel));
    channels.push(Box::new(WindowGlobalChannel));
    channels
}
