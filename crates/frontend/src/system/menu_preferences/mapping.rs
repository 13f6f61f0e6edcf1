//! Lenient mapping of the user menu payload into `UserMenuItem`s.
//!
//! Saved menus come from older clients too, so missing `orderIndex`,
//! `isVisible` or `children` are filled in instead of rejecting the whole
//! payload. Entries without an id or with an unknown type are skipped.

use contracts::system::menu_preferences::{MenuItemType, UserMenuItem};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

use super::title::resolve_title;
use crate::shared::i18n::Language;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawUserMenuItem {
    id: String,
    #[serde(default)]
    parent_id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(rename = "type")]
    item_type: MenuItemType,
    #[serde(default)]
    program_id: Option<String>,
    #[serde(default)]
    external_url: Option<String>,
    #[serde(default)]
    query_builder_id: Option<String>,
    #[serde(default)]
    order_index: Option<i32>,
    #[serde(default)]
    is_visible: Option<bool>,
    #[serde(default)]
    children: Option<Vec<Value>>,
    #[serde(default)]
    custom_title: Option<String>,
    #[serde(default)]
    title_translations: Option<BTreeMap<String, String>>,
    #[serde(default)]
    custom_icon: Option<String>,
    #[serde(default)]
    custom_icon_color: Option<String>,
    #[serde(default)]
    is_user_created: Option<bool>,
}

/// Map the `data` of the custom-menu response. `None` if it is not a list.
pub fn map_user_menu(raw: &Value, lang: &Language) -> Option<Vec<UserMenuItem>> {
    raw.as_array().map(|items| map_items(items, None, lang))
}

fn map_items(raw: &[Value], parent_id: Option<&str>, lang: &Language) -> Vec<UserMenuItem> {
    raw.iter()
        .enumerate()
        .filter_map(|(index, value)| map_item(value, index, parent_id, lang))
        .collect()
}

fn map_item(
    value: &Value,
    index: usize,
    parent_id: Option<&str>,
    lang: &Language,
) -> Option<UserMenuItem> {
    let raw = match RawUserMenuItem::deserialize(value) {
        Ok(raw) => raw,
        Err(e) => {
            log::warn!("Skipping malformed user menu item: {}", e);
            return None;
        }
    };

    let mut item = UserMenuItem::new(
        raw.id.clone(),
        raw.title.unwrap_or_else(|| raw.id.clone()),
        raw.item_type,
    );
    item.parent_id = parent_id.map(str::to_string).or(raw.parent_id);
    item.program_id = raw.program_id;
    item.external_url = raw.external_url;
    item.query_builder_id = raw.query_builder_id;
    item.order_index = raw.order_index.unwrap_or(index as i32);
    item.is_visible = raw.is_visible.unwrap_or(true);
    item.custom_title = raw.custom_title;
    item.title_translations = raw.title_translations.unwrap_or_default();
    item.custom_icon = raw.custom_icon;
    item.custom_icon_color = raw.custom_icon_color;
    item.is_user_created = raw.is_user_created.unwrap_or(false);
    item.children = raw
        .children
        .map(|children| map_items(&children, Some(raw.id.as_str()), lang))
        .unwrap_or_default();
    item.display_title = resolve_title(&item, lang);
    Some(item)
}

/// Re-resolve `display_title` on every node, e.g. after a language switch
/// or when the tree arrived through an event (titles are not serialized).
pub fn refresh_display_titles(mut items: Vec<UserMenuItem>, lang: &Language) -> Vec<UserMenuItem> {
    fn walk(items: &mut [UserMenuItem], lang: &Language) {
        for item in items.iter_mut() {
            item.display_title = resolve_title(item, lang);
            walk(&mut item.children, lang);
        }
    }

    walk(&mut items, lang);
    items
}
