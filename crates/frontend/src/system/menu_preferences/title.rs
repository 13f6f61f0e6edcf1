//! Display title resolution for menu items.

use contracts::system::menu_preferences::MenuNode;

use crate::shared::i18n::Language;

/// Title to show for `item` in `lang`.
///
/// First match wins: translation for the language, custom title, default
/// title.
pub fn resolve_title<T: MenuNode>(item: &T, lang: &Language) -> String {
    if let Some(translated) = item
        .title_translation(lang.code())
        .filter(|t| !t.trim().is_empty())
    {
        return translated.to_string();
    }
    if let Some(custom) = item.custom_title().map(str::trim).filter(|t| !t.is_empty()) {
        return custom.to_string();
    }
    item.title().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::system::menu_preferences::{MenuItemType, StandardMenuItem, UserMenuItem};

    fn item() -> UserMenuItem {
        UserMenuItem::new("a", "Orders", MenuItemType::Program)
    }

    #[test]
    fn test_translation_wins_over_custom_title() {
        let mut item = item();
        item.custom_title = Some("Мои заказы".into());
        item.title_translations.insert("en".into(), "My orders".into());

        assert_eq!(resolve_title(&item, &Language::new("en")), "My orders");
        assert_eq!(resolve_title(&item, &Language::new("ru")), "Мои заказы");
    }

    #[test]
    fn test_custom_title_is_trimmed() {
        let mut item = item();
        item.custom_title = Some("  Заказы WB ".into());
        assert_eq!(resolve_title(&item, &Language::new("ru")), "Заказы WB");
    }

    #[test]
    fn test_blank_values_fall_through() {
        let mut item = item();
        item.custom_title = Some("   ".into());
        item.title_translations.insert("ru".into(), "".into());
        assert_eq!(resolve_title(&item, &Language::new("ru")), "Orders");
    }

    #[test]
    fn test_standard_item_uses_title() {
        let item = StandardMenuItem::new("s", "Nomenclature", MenuItemType::Program);
        assert_eq!(resolve_title(&item, &Language::new("en")), "Nomenclature");
    }
}
