use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Closed set of menu entry kinds. Only `Folder` may carry children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MenuItemType {
    Folder,
    Program,
    Link,
    DataView,
}

impl MenuItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MenuItemType::Folder => "Folder",
            MenuItemType::Program => "Program",
            MenuItemType::Link => "Link",
            MenuItemType::DataView => "DataView",
        }
    }
}

fn default_true() -> bool {
    true
}

/// Read-only entry of the server-defined menu catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardMenuItem {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub title: String,
    #[serde(rename = "type")]
    pub item_type: MenuItemType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_builder_id: Option<String>,
    #[serde(default)]
    pub order_index: i32,
    #[serde(default = "default_true")]
    pub is_visible: bool,
    /// Nesting level, assigned when the catalog is loaded.
    #[serde(default)]
    pub depth: u32,
    #[serde(default)]
    pub children: Vec<StandardMenuItem>,
}

/// Entry of the user's own, editable menu tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserMenuItem {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub title: String,
    #[serde(rename = "type")]
    pub item_type: MenuItemType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_builder_id: Option<String>,
    #[serde(default)]
    pub order_index: i32,
    #[serde(default = "default_true")]
    pub is_visible: bool,
    #[serde(default)]
    pub children: Vec<UserMenuItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_title: Option<String>,
    /// Language code -> localized title.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub title_translations: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_icon_color: Option<String>,
    #[serde(default)]
    pub is_user_created: bool,
    /// Title resolved for the current language when the item was loaded.
    /// Client-side only, never sent to the backend.
    #[serde(skip)]
    pub display_title: String,
}

impl UserMenuItem {
    /// Bare item of the given type with no payload and no children.
    pub fn new(id: impl Into<String>, title: impl Into<String>, item_type: MenuItemType) -> Self {
        let title = title.into();
        Self {
            id: id.into(),
            parent_id: None,
            display_title: title.clone(),
            title,
            item_type,
            program_id: None,
            external_url: None,
            query_builder_id: None,
            order_index: 0,
            is_visible: true,
            children: vec![],
            custom_title: None,
            title_translations: BTreeMap::new(),
            custom_icon: None,
            custom_icon_color: None,
            is_user_created: false,
        }
    }
}

impl StandardMenuItem {
    pub fn new(id: impl Into<String>, title: impl Into<String>, item_type: MenuItemType) -> Self {
        Self {
            id: id.into(),
            parent_id: None,
            title: title.into(),
            item_type,
            program_id: None,
            external_url: None,
            query_builder_id: None,
            order_index: 0,
            is_visible: true,
            depth: 0,
            children: vec![],
        }
    }
}

/// Shape shared by standard and user menu items, so tree algorithms can
/// walk either tree.
pub trait MenuNode: Clone {
    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
    fn parent_id(&self) -> Option<&str>;
    fn set_parent_id(&mut self, parent_id: Option<String>);
    fn title(&self) -> &str;
    fn item_type(&self) -> MenuItemType;
    fn order_index(&self) -> i32;
    fn set_order_index(&mut self, order_index: i32);
    fn is_visible(&self) -> bool;
    fn children(&self) -> &[Self];
    fn children_mut(&mut self) -> &mut Vec<Self>;

    /// User-defined title override, if the variant supports one.
    fn custom_title(&self) -> Option<&str> {
        None
    }

    /// Localized title for `lang`, if the variant supports translations.
    fn title_translation(&self, _lang: &str) -> Option<&str> {
        None
    }

    /// Copy of this node's own fields as a user item, without children.
    fn to_user_item(&self) -> UserMenuItem;

    fn is_folder(&self) -> bool {
        self.item_type() == MenuItemType::Folder
    }
}

macro_rules! menu_node_accessors {
    () => {
        fn id(&self) -> &str {
            &self.id
        }

        fn set_id(&mut self, id: String) {
            self.id = id;
        }

        fn parent_id(&self) -> Option<&str> {
            self.parent_id.as_deref()
        }

        fn set_parent_id(&mut self, parent_id: Option<String>) {
            self.parent_id = parent_id;
        }

        fn title(&self) -> &str {
            &self.title
        }

        fn item_type(&self) -> MenuItemType {
            self.item_type
        }

        fn order_index(&self) -> i32 {
            self.order_index
        }

        fn set_order_index(&mut self, order_index: i32) {
            self.order_index = order_index;
        }

        fn is_visible(&self) -> bool {
            self.is_visible
        }

        fn children(&self) -> &[Self] {
            &self.children
        }

        fn children_mut(&mut self) -> &mut Vec<Self> {
            &mut self.children
        }
    };
}

impl MenuNode for StandardMenuItem {
    menu_node_accessors!();

    fn to_user_item(&self) -> UserMenuItem {
        UserMenuItem {
            parent_id: self.parent_id.clone(),
            program_id: self.program_id.clone(),
            external_url: self.external_url.clone(),
            query_builder_id: self.query_builder_id.clone(),
            order_index: self.order_index,
            is_visible: self.is_visible,
            ..UserMenuItem::new(self.id.clone(), self.title.clone(), self.item_type)
        }
    }
}

impl MenuNode for UserMenuItem {
    menu_node_accessors!();

    fn custom_title(&self) -> Option<&str> {
        self.custom_title.as_deref()
    }

    fn title_translation(&self, lang: &str) -> Option<&str> {
        self.title_translations.get(lang).map(String::as_str)
    }

    fn to_user_item(&self) -> UserMenuItem {
        UserMenuItem {
            id: self.id.clone(),
            parent_id: self.parent_id.clone(),
            title: self.title.clone(),
            item_type: self.item_type,
            program_id: self.program_id.clone(),
            external_url: self.external_url.clone(),
            query_builder_id: self.query_builder_id.clone(),
            order_index: self.order_index,
            is_visible: self.is_visible,
            children: vec![],
            custom_title: self.custom_title.clone(),
            title_translations: self.title_translations.clone(),
            custom_icon: self.custom_icon.clone(),
            custom_icon_color: self.custom_icon_color.clone(),
            is_user_created: self.is_user_created,
            display_title: self.display_title.clone(),
        }
    }
}

/// Partial update of the user-editable fields of a single menu item.
/// `None` leaves the field untouched; an empty string clears it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemPatch {
    #[serde(default)]
    pub custom_title: Option<String>,
    #[serde(default)]
    pub title_translations: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub custom_icon: Option<String>,
    #[serde(default)]
    pub custom_icon_color: Option<String>,
    #[serde(default)]
    pub is_visible: Option<bool>,
}

impl MenuItemPatch {
    pub fn apply(&self, item: &mut UserMenuItem) {
        fn set_or_clear(slot: &mut Option<String>, value: &Option<String>) {
            if let Some(v) = value {
                *slot = if v.trim().is_empty() {
                    None
                } else {
                    Some(v.clone())
                };
            }
        }

        set_or_clear(&mut item.custom_title, &self.custom_title);
        set_or_clear(&mut item.custom_icon, &self.custom_icon);
        set_or_clear(&mut item.custom_icon_color, &self.custom_icon_color);
        if let Some(translations) = &self.title_translations {
            item.title_translations = translations
                .iter()
                .filter(|(_, title)| !title.trim().is_empty())
                .map(|(lang, title)| (lang.clone(), title.clone()))
                .collect();
        }
        if let Some(visible) = self.is_visible {
            item.is_visible = visible;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_item_wire_format() {
        let json = r#"{
            "id": "a",
            "title": "X",
            "type": "Folder",
            "orderIndex": 0,
            "isVisible": true,
            "children": [],
            "customTitle": "Мои отчёты",
            "titleTranslations": {"en": "My reports"}
        }"#;
        let item: UserMenuItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.item_type, MenuItemType::Folder);
        assert_eq!(item.custom_title.as_deref(), Some("Мои отчёты"));
        assert_eq!(item.title_translation("en"), Some("My reports"));

        let back = serde_json::to_value(&item).unwrap();
        assert_eq!(back["type"], "Folder");
        assert_eq!(back["orderIndex"], 0);
        assert!(back.get("displayTitle").is_none());
        assert!(back.get("display_title").is_none());
    }

    #[test]
    fn test_standard_item_defaults() {
        let item: StandardMenuItem =
            serde_json::from_str(r#"{"id":"s1","title":"Sales","type":"Program","programId":"p900"}"#)
                .unwrap();
        assert!(item.is_visible);
        assert_eq!(item.order_index, 0);
        assert!(item.children.is_empty());
        assert_eq!(item.program_id.as_deref(), Some("p900"));
    }

    #[test]
    fn test_to_user_item_drops_children() {
        let mut folder = StandardMenuItem::new("f", "Folder", MenuItemType::Folder);
        folder
            .children
            .push(StandardMenuItem::new("p", "Prog", MenuItemType::Program));
        let user = folder.to_user_item();
        assert_eq!(user.id, "f");
        assert!(user.children.is_empty());
        assert!(!user.is_user_created);
    }

    #[test]
    fn test_patch_apply() {
        let mut item = UserMenuItem::new("a", "Orders", MenuItemType::Program);
        item.custom_icon = Some("box".into());

        let patch = MenuItemPatch {
            custom_title: Some("My orders".into()),
            custom_icon: Some("  ".into()),
            is_visible: Some(false),
            ..Default::default()
        };
        patch.apply(&mut item);

        assert_eq!(item.custom_title.as_deref(), Some("My orders"));
        assert_eq!(item.custom_icon, None);
        assert!(!item.is_visible);
        assert_eq!(item.title, "Orders");
    }
}
