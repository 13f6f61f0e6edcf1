//! "Create folder / link / data view" actions of the customization page.

use contracts::system::menu_preferences::{MenuItemType, UserMenuItem};
use i18n_embed_fl::fl;

use super::ids::IdMinter;
use crate::shared::i18n::{language_loader, Language};

fn new_user_item(
    ids: &IdMinter,
    item_type: MenuItemType,
    title: Option<&str>,
    default_title: impl FnOnce() -> String,
) -> UserMenuItem {
    let title = title
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .unwrap_or_else(default_title);
    let kind = item_type.as_str().to_ascii_lowercase();
    let mut item = UserMenuItem::new(ids.mint(&kind), title, item_type);
    item.is_user_created = true;
    item
}

pub fn new_folder(ids: &IdMinter, lang: &Language, title: Option<&str>) -> UserMenuItem {
    let loader = language_loader(lang);
    new_user_item(ids, MenuItemType::Folder, title, || fl!(loader, "menu-new-folder"))
}

pub fn new_link(ids: &IdMinter, lang: &Language, title: Option<&str>, url: &str) -> UserMenuItem {
    let loader = language_loader(lang);
    let mut item = new_user_item(ids, MenuItemType::Link, title, || fl!(loader, "menu-new-link"));
    item.external_url = Some(url.trim().to_string());
    item
}

pub fn new_data_view(
    ids: &IdMinter,
    lang: &Language,
    title: Option<&str>,
    query_builder_id: &str,
) -> UserMenuItem {
    let loader = language_loader(lang);
    let mut item = new_user_item(ids, MenuItemType::DataView, title, || {
        fl!(loader, "menu-new-data-view")
    });
    item.query_builder_id = Some(query_builder_id.to_string());
    item
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_folder_uses_localized_default_title() {
        let folder = new_folder(&IdMinter::default(), &Language::new("en"), None);
        assert_eq!(folder.title, "New folder");
        assert_eq!(folder.item_type, MenuItemType::Folder);
        assert!(folder.is_user_created);
        assert!(folder.id.starts_with("user-folder-"));
    }

    #[test]
    fn test_new_link_keeps_payload() {
        let link = new_link(
            &IdMinter::new("u"),
            &Language::new("ru"),
            Some(" Wildberries "),
            "https://seller.wildberries.ru ",
        );
        assert_eq!(link.title, "Wildberries");
        assert_eq!(link.external_url.as_deref(), Some("https://seller.wildberries.ru"));
        assert!(link.id.starts_with("u-link-"));
    }

    #[test]
    fn test_new_data_view() {
        let view = new_data_view(&IdMinter::default(), &Language::new("ru"), None, "qb-17");
        assert_eq!(view.title, "Новое представление");
        assert_eq!(view.query_builder_id.as_deref(), Some("qb-17"));
        assert!(view.program_id.is_none() && view.external_url.is_none());
    }
}
