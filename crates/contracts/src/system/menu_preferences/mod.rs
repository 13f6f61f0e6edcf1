//! Menu personalization contracts: standard catalog items, user menu items
//! and the request/event payloads exchanged around them.

mod events;
mod item;
mod requests;

pub use events::MenuPreferencesChanged;
pub use item::{MenuItemPatch, MenuItemType, MenuNode, StandardMenuItem, UserMenuItem};
pub use requests::{SaveCustomMenuRequest, StandardMenuConfiguration};

/// Name of the window event fired after the user menu changes.
pub const MENU_PREFERENCES_CHANGED_EVENT: &str = "menuPreferencesChanged";
