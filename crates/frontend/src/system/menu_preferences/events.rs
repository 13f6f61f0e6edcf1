//! `menuPreferencesChanged` notifications.
//!
//! Fired on `window` so any part of the UI (or plain JS) can refresh
//! without depending on the gateway. Delivery is synchronous to the
//! listeners registered at dispatch time; nothing is replayed later.

use contracts::system::menu_preferences::{MenuPreferencesChanged, MENU_PREFERENCES_CHANGED_EVENT};
use serde::Serialize;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

pub trait MenuChangeNotifier {
    fn notify(&self, change: &MenuPreferencesChanged);
}

/// Dispatches a `CustomEvent` on `window` with the change as `detail`.
pub struct WindowEventNotifier;

impl MenuChangeNotifier for WindowEventNotifier {
    fn notify(&self, change: &MenuPreferencesChanged) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let detail = match change.serialize(&serde_wasm_bindgen::Serializer::json_compatible()) {
            Ok(detail) => detail,
            Err(e) => {
                log::warn!("Cannot serialize {} detail: {}", MENU_PREFERENCES_CHANGED_EVENT, e);
                return;
            }
        };

        let init = web_sys::CustomEventInit::new();
        init.set_detail(&detail);
        match web_sys::CustomEvent::new_with_event_init_dict(MENU_PREFERENCES_CHANGED_EVENT, &init) {
            Ok(event) => {
                let _ = window.dispatch_event(&event);
            }
            Err(e) => log::warn!("Cannot create {}: {:?}", MENU_PREFERENCES_CHANGED_EVENT, e),
        }
    }
}

/// Window listener for `menuPreferencesChanged`; removed when dropped.
pub struct MenuChangeSubscription {
    window: web_sys::Window,
    on_change: Closure<dyn FnMut(web_sys::Event)>,
}

impl Drop for MenuChangeSubscription {
    fn drop(&mut self) {
        let _ = self.window.remove_event_listener_with_callback(
            MENU_PREFERENCES_CHANGED_EVENT,
            self.on_change.as_ref().unchecked_ref(),
        );
    }
}

/// Call `callback` for every `menuPreferencesChanged` event fired on
/// `window` while the returned subscription is alive.
pub fn listen_menu_preferences_changed<F>(callback: F) -> Option<MenuChangeSubscription>
where
    F: Fn(MenuPreferencesChanged) + 'static,
{
    let window = web_sys::window()?;

    let on_change = Closure::<dyn FnMut(web_sys::Event)>::new(move |ev: web_sys::Event| {
        let Some(custom) = ev.dyn_ref::<web_sys::CustomEvent>() else {
            return;
        };
        match serde_wasm_bindgen::from_value::<MenuPreferencesChanged>(custom.detail()) {
            Ok(change) => callback(change),
            Err(e) => log::warn!("Ignoring malformed {} detail: {}", MENU_PREFERENCES_CHANGED_EVENT, e),
        }
    });

    if let Err(e) = window.add_event_listener_with_callback(
        MENU_PREFERENCES_CHANGED_EVENT,
        on_change.as_ref().unchecked_ref(),
    ) {
        log::warn!("Cannot listen for {}: {:?}", MENU_PREFERENCES_CHANGED_EVENT, e);
        return None;
    }
    Some(MenuChangeSubscription { window, on_change })
}
