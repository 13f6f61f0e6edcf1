use serde::{Deserialize, Serialize};

use super::UserMenuItem;

/// Detail of the `menuPreferencesChanged` event.
///
/// Two flavours exist: a full save from the customization page
/// (`fromCustomizationPage` + `savedAt`) and a single item edit
/// (`fromEdit` + `editedItemId`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuPreferencesChanged {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub from_customization_page: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub from_edit: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_item_id: Option<String>,
    pub menu_items_count: usize,
    pub menu_items: Vec<UserMenuItem>,
}

impl MenuPreferencesChanged {
    pub fn saved(saved_at: impl Into<String>, menu_items: Vec<UserMenuItem>) -> Self {
        Self {
            from_customization_page: true,
            from_edit: false,
            saved_at: Some(saved_at.into()),
            edited_item_id: None,
            menu_items_count: menu_items.len(),
            menu_items,
        }
    }

    pub fn edited(edited_item_id: impl Into<String>, menu_items: Vec<UserMenuItem>) -> Self {
        Self {
            from_customization_page: false,
            from_edit: true,
            saved_at: None,
            edited_item_id: Some(edited_item_id.into()),
            menu_items_count: menu_items.len(),
            menu_items,
        }
    }
}
