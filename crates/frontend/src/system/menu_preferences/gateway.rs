//! Menu preferences gateway
//!
//! Loads the standard catalog and the user's menu, saves the user's menu
//! and announces successful saves. Failures never escape as panics or
//! half-updated state: loads fall back to an empty menu and failed saves
//! skip the notification. The error is still returned so the UI can show
//! it if it wants to.

use contracts::shared::api_response::ApiResponse;
use contracts::system::menu_preferences::{
    MenuItemPatch, MenuPreferencesChanged, SaveCustomMenuRequest, StandardMenuConfiguration,
    StandardMenuItem, UserMenuItem,
};
use serde_json::Value;
use std::cell::{Cell, RefCell};
use thiserror::Error;

use super::api::MenuApi;
use super::events::MenuChangeNotifier;
use super::mapping::{map_user_menu, refresh_display_titles};
use super::tree_ops;
use crate::shared::i18n::Language;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MenuGatewayError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request rejected by server: {0}")]
    Unsuccessful(String),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Menu item not found: {0}")]
    ItemNotFound(String),
}

/// Raises a flag for the lifetime of the guard.
struct FlagGuard<'a>(&'a Cell<bool>);

impl<'a> FlagGuard<'a> {
    fn raise(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self(flag)
    }
}

impl Drop for FlagGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

fn success_data(envelope: ApiResponse<Value>) -> Result<Value, MenuGatewayError> {
    if !envelope.success {
        return Err(MenuGatewayError::Unsuccessful(
            envelope.message.unwrap_or_else(|| "success=false".to_string()),
        ));
    }
    envelope
        .data
        .ok_or_else(|| MenuGatewayError::MalformedPayload("missing data".to_string()))
}

pub struct MenuPreferencesGateway<A, N> {
    api: A,
    notifier: N,
    language: RefCell<Language>,
    standard_menu: RefCell<Vec<StandardMenuItem>>,
    user_menu: RefCell<Vec<UserMenuItem>>,
    loading: Cell<bool>,
    saving: Cell<bool>,
}

impl<A: MenuApi, N: MenuChangeNotifier> MenuPreferencesGateway<A, N> {
    pub fn new(api: A, notifier: N, language: Language) -> Self {
        Self {
            api,
            notifier,
            language: RefCell::new(language),
            standard_menu: RefCell::new(vec![]),
            user_menu: RefCell::new(vec![]),
            loading: Cell::new(false),
            saving: Cell::new(false),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    pub fn is_saving(&self) -> bool {
        self.saving.get()
    }

    pub fn language(&self) -> Language {
        self.language.borrow().clone()
    }

    /// Switch language and re-resolve titles of the cached user menu
    pub fn set_language(&self, language: Language) {
        let items = self.user_menu.take();
        self.user_menu
            .replace(refresh_display_titles(items, &language));
        self.language.replace(language);
    }

    pub fn standard_menu(&self) -> Vec<StandardMenuItem> {
        self.standard_menu.borrow().clone()
    }

    pub fn user_menu(&self) -> Vec<UserMenuItem> {
        self.user_menu.borrow().clone()
    }

    /// Fetch the active standard menu. Any failure leaves it empty.
    pub async fn load_standard_menu(&self) -> Result<usize, MenuGatewayError> {
        let _loading = FlagGuard::raise(&self.loading);

        let result = self.fetch_standard_menu().await;
        let items = match &result {
            Ok(items) => tree_ops::assign_depth(items.clone()),
            Err(e) => {
                log::warn!("Standard menu unavailable: {}", e);
                vec![]
            }
        };
        let count = items.len();
        self.standard_menu.replace(items);
        result.map(|_| count)
    }

    async fn fetch_standard_menu(&self) -> Result<Vec<StandardMenuItem>, MenuGatewayError> {
        let envelope = self
            .api
            .fetch_standard_menu()
            .await
            .map_err(MenuGatewayError::Network)?;
        let data = success_data(envelope)?;
        let config: StandardMenuConfiguration = serde_json::from_value(data)
            .map_err(|e| MenuGatewayError::MalformedPayload(e.to_string()))?;
        Ok(config.menu_tree)
    }

    /// Fetch the caller's saved menu. Any failure leaves it empty.
    pub async fn load_user_menu(&self) -> Result<usize, MenuGatewayError> {
        let _loading = FlagGuard::raise(&self.loading);

        let result = self.fetch_user_menu().await;
        let items = match result {
            Ok(items) => items,
            Err(e) => {
                log::warn!("User menu unavailable: {}", e);
                self.user_menu.replace(vec![]);
                return Err(e);
            }
        };
        let count = items.len();
        self.user_menu.replace(items);
        Ok(count)
    }

    async fn fetch_user_menu(&self) -> Result<Vec<UserMenuItem>, MenuGatewayError> {
        let envelope = self
            .api
            .fetch_user_menu()
            .await
            .map_err(MenuGatewayError::Network)?;
        let data = success_data(envelope)?;
        let language = self.language();
        map_user_menu(&data, &language)
            .ok_or_else(|| MenuGatewayError::MalformedPayload("user menu is not a list".to_string()))
    }

    /// Persist the whole user menu and announce it on success.
    pub async fn save_user_menu(&self, items: Vec<UserMenuItem>) -> Result<(), MenuGatewayError> {
        let saved_at = chrono::Utc::now().to_rfc3339();
        self.persist(items, |items| MenuPreferencesChanged::saved(saved_at, items))
            .await
    }

    /// Apply `patch` to one item of `items` (the tree the caller holds,
    /// unsaved changes included) and persist the result.
    pub async fn edit_item(
        &self,
        items: Vec<UserMenuItem>,
        item_id: &str,
        patch: &MenuItemPatch,
    ) -> Result<(), MenuGatewayError> {
        let items = tree_ops::update_item(items, item_id, patch)
            .ok_or_else(|| MenuGatewayError::ItemNotFound(item_id.to_string()))?;
        let item_id = item_id.to_string();
        self.persist(items, |items| MenuPreferencesChanged::edited(item_id, items))
            .await
    }

    async fn persist<F>(&self, items: Vec<UserMenuItem>, event: F) -> Result<(), MenuGatewayError>
    where
        F: FnOnce(Vec<UserMenuItem>) -> MenuPreferencesChanged,
    {
        let _saving = FlagGuard::raise(&self.saving);

        let items = tree_ops::renumber(items);
        let request = SaveCustomMenuRequest { menu_items: items };
        let envelope = match self.api.save_user_menu(&request).await {
            Ok(envelope) => envelope,
            Err(e) => {
                log::warn!("Saving user menu failed: {}", e);
                return Err(MenuGatewayError::Network(e));
            }
        };
        if !envelope.success {
            let message = envelope
                .message
                .unwrap_or_else(|| "success=false".to_string());
            log::warn!("Saving user menu rejected: {}", message);
            return Err(MenuGatewayError::Unsuccessful(message));
        }

        let language = self.language();
        let items = refresh_display_titles(request.menu_items, &language);
        self.user_menu.replace(items.clone());
        log::debug!(
            "User menu saved ({} root items, {} total)",
            items.len(),
            tree_ops::count_items(&items)
        );
        self.notifier.notify(&event(items));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use contracts::system::menu_preferences::MenuItemType;
    use futures::executor::block_on;
    use serde_json::json;
    use std::rc::{Rc, Weak};

    type Reply = Result<ApiResponse<Value>, String>;
    type TestGateway = MenuPreferencesGateway<FakeApi, RecordingNotifier>;

    /// Canned replies; records the gateway's `(loading, saving)` flags as
    /// seen from inside every request.
    struct FakeApi {
        standard: Reply,
        user: Reply,
        save: Reply,
        saved_requests: RefCell<Vec<SaveCustomMenuRequest>>,
        gateway: RefCell<Weak<TestGateway>>,
        flags_in_flight: RefCell<Vec<(bool, bool)>>,
    }

    impl FakeApi {
        fn new(standard: Reply, user: Reply, save: Reply) -> Self {
            Self {
                standard,
                user,
                save,
                saved_requests: RefCell::new(vec![]),
                gateway: RefCell::new(Weak::new()),
                flags_in_flight: RefCell::new(vec![]),
            }
        }

        fn saving(save: Reply) -> Self {
            Self::new(Err("unused".into()), Err("unused".into()), save)
        }

        fn record_flags(&self) {
            if let Some(gw) = self.gateway.borrow().upgrade() {
                self.flags_in_flight
                    .borrow_mut()
                    .push((gw.is_loading(), gw.is_saving()));
            }
        }
    }

    #[async_trait(?Send)]
    impl MenuApi for FakeApi {
        async fn fetch_standard_menu(&self) -> Reply {
            self.record_flags();
            self.standard.clone()
        }

        async fn fetch_user_menu(&self) -> Reply {
            self.record_flags();
            self.user.clone()
        }

        async fn save_user_menu(&self, request: &SaveCustomMenuRequest) -> Reply {
            self.record_flags();
            self.saved_requests.borrow_mut().push(request.clone());
            self.save.clone()
        }
    }

    #[derive(Clone, Default)]
    struct RecordingNotifier {
        events: Rc<RefCell<Vec<MenuPreferencesChanged>>>,
    }

    impl MenuChangeNotifier for RecordingNotifier {
        fn notify(&self, change: &MenuPreferencesChanged) {
            self.events.borrow_mut().push(change.clone());
        }
    }

    fn gateway(api: FakeApi) -> (Rc<TestGateway>, RecordingNotifier) {
        let notifier = RecordingNotifier::default();
        let gw = Rc::new(MenuPreferencesGateway::new(
            api,
            notifier.clone(),
            Language::new("ru"),
        ));
        gw.api.gateway.replace(Rc::downgrade(&gw));
        (gw, notifier)
    }

    fn flags_in_flight(gw: &TestGateway) -> Vec<(bool, bool)> {
        gw.api.flags_in_flight.borrow().clone()
    }

    fn folder_a() -> UserMenuItem {
        UserMenuItem::new("a", "X", MenuItemType::Folder)
    }

    fn saved_ok() -> Reply {
        Ok(ApiResponse::ok(json!({"success": true})))
    }

    #[test]
    fn test_load_standard_menu() {
        let data = json!({"menuTree": [
            {"id": "r", "title": "Reports", "type": "Folder", "children": [
                {"id": "p900", "title": "Sales", "type": "Program", "programId": "p900"}
            ]}
        ]});
        let (gw, _) = gateway(FakeApi::new(
            Ok(ApiResponse::ok(data)),
            Err("unused".into()),
            Err("unused".into()),
        ));

        assert_eq!(block_on(gw.load_standard_menu()), Ok(1));
        let menu = gw.standard_menu();
        assert_eq!(menu[0].children[0].depth, 1);
        assert_eq!(menu[0].children[0].parent_id.as_deref(), Some("r"));
        assert_eq!(flags_in_flight(&gw), vec![(true, false)]);
        assert!(!gw.is_loading());
    }

    #[test]
    fn test_load_standard_menu_fail_soft() {
        let replies: Vec<Reply> = vec![
            Err("connection refused".into()),
            Ok(ApiResponse::failed("no active configuration")),
            Ok(ApiResponse::ok(json!({"menuTree": "oops"}))),
            Ok(ApiResponse {
                success: true,
                data: None,
                message: None,
            }),
        ];
        for reply in replies {
            let (gw, _) = gateway(FakeApi::new(reply, Err("unused".into()), Err("unused".into())));
            assert!(block_on(gw.load_standard_menu()).is_err());
            assert!(gw.standard_menu().is_empty());
            assert_eq!(flags_in_flight(&gw), vec![(true, false)]);
            assert!(!gw.is_loading());
        }
    }

    #[test]
    fn test_load_standard_menu_without_tree_is_empty() {
        let (gw, _) = gateway(FakeApi::new(
            Ok(ApiResponse::ok(json!({}))),
            Err("unused".into()),
            Err("unused".into()),
        ));
        assert_eq!(block_on(gw.load_standard_menu()), Ok(0));
        assert!(gw.standard_menu().is_empty());
    }

    #[test]
    fn test_load_user_menu_maps_items() {
        let data = json!([
            {"id": "f1", "title": "Reports", "type": "Folder", "customTitle": "Отчёты",
             "children": [{"id": "p1", "title": "Sales", "type": "Program"}]}
        ]);
        let (gw, _) = gateway(FakeApi::new(
            Err("unused".into()),
            Ok(ApiResponse::ok(data)),
            Err("unused".into()),
        ));

        assert_eq!(block_on(gw.load_user_menu()), Ok(1));
        let menu = gw.user_menu();
        assert_eq!(menu[0].display_title, "Отчёты");
        assert_eq!(menu[0].children[0].parent_id.as_deref(), Some("f1"));
        assert_eq!(flags_in_flight(&gw), vec![(true, false)]);
        assert!(!gw.is_loading());
    }

    #[test]
    fn test_load_user_menu_fail_soft() {
        let replies: Vec<Reply> = vec![
            Err("timeout".into()),
            Ok(ApiResponse::failed("forbidden")),
            Ok(ApiResponse::ok(json!({"not": "a list"}))),
        ];
        for reply in replies {
            let (gw, _) = gateway(FakeApi::new(Err("unused".into()), reply, Err("unused".into())));
            assert!(block_on(gw.load_user_menu()).is_err());
            assert!(gw.user_menu().is_empty());
            assert_eq!(flags_in_flight(&gw), vec![(true, false)]);
            assert!(!gw.is_loading());
        }
    }

    #[test]
    fn test_save_emits_one_event_on_success() {
        let (gw, notifier) = gateway(FakeApi::saving(saved_ok()));

        assert_eq!(block_on(gw.save_user_menu(vec![folder_a()])), Ok(()));

        let events = notifier.events.borrow();
        assert_eq!(events.len(), 1);
        assert!(events[0].from_customization_page);
        assert_eq!(events[0].menu_items_count, 1);
        assert!(events[0].saved_at.is_some());
        assert_eq!(gw.user_menu().len(), 1);
        assert_eq!(flags_in_flight(&gw), vec![(false, true)]);
        assert!(!gw.is_saving());
    }

    #[test]
    fn test_save_failure_emits_nothing() {
        for reply in [Ok(ApiResponse::failed("db locked")), Err("offline".to_string())] {
            let (gw, notifier) = gateway(FakeApi::saving(reply));
            assert!(block_on(gw.save_user_menu(vec![folder_a()])).is_err());
            assert!(notifier.events.borrow().is_empty());
            assert!(gw.user_menu().is_empty());
            assert_eq!(flags_in_flight(&gw), vec![(false, true)]);
            assert!(!gw.is_saving());
        }
    }

    #[test]
    fn test_save_renumbers_before_posting() {
        let (gw, _) = gateway(FakeApi::saving(saved_ok()));
        let mut second = UserMenuItem::new("b", "Y", MenuItemType::Link);
        second.order_index = 7;

        block_on(gw.save_user_menu(vec![folder_a(), second])).unwrap();

        let requests = gw.api.saved_requests.borrow();
        let order: Vec<i32> = requests[0].menu_items.iter().map(|i| i.order_index).collect();
        assert_eq!(order, vec![0, 1]);
    }

    #[test]
    fn test_edit_item_emits_edit_event() {
        let (gw, notifier) = gateway(FakeApi::saving(saved_ok()));

        let patch = MenuItemPatch {
            custom_title: Some("Мои отчёты".into()),
            ..Default::default()
        };
        block_on(gw.edit_item(vec![folder_a()], "a", &patch)).unwrap();

        let events = notifier.events.borrow();
        assert_eq!(events.len(), 1);
        assert!(events[0].from_edit);
        assert_eq!(events[0].edited_item_id.as_deref(), Some("a"));
        assert_eq!(gw.user_menu()[0].display_title, "Мои отчёты");
        assert_eq!(flags_in_flight(&gw), vec![(false, true)]);
        assert!(!gw.is_saving());

        assert_eq!(
            block_on(gw.edit_item(vec![folder_a()], "ghost", &patch)),
            Err(MenuGatewayError::ItemNotFound("ghost".into()))
        );
    }

    #[test]
    fn test_edit_keeps_unsaved_local_items() {
        let api = FakeApi::new(
            Err("unused".into()),
            Ok(ApiResponse::ok(json!([{"id": "a", "title": "X", "type": "Folder"}]))),
            saved_ok(),
        );
        let (gw, notifier) = gateway(api);
        block_on(gw.load_user_menu()).unwrap();

        // Appended in the UI, never saved
        let local = tree_ops::append_to_root(
            gw.user_menu(),
            UserMenuItem::new("b", "Y", MenuItemType::Link),
        );
        let patch = MenuItemPatch {
            custom_title: Some("Сайт".into()),
            ..Default::default()
        };
        block_on(gw.edit_item(local, "b", &patch)).unwrap();
        block_on(gw.edit_item(gw.user_menu(), "a", &patch)).unwrap();

        let events = notifier.events.borrow();
        let sent: Vec<&str> = events[0].menu_items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(sent, vec!["a", "b"]);
        assert_eq!(events[0].menu_items[1].display_title, "Сайт");

        let saved: Vec<String> = gw.user_menu().into_iter().map(|i| i.id).collect();
        assert_eq!(saved, vec!["a", "b"]);
        let requests = gw.api.saved_requests.borrow();
        assert_eq!(requests[1].menu_items.len(), 2);
    }

    #[test]
    fn test_set_language_refreshes_titles() {
        let data = json!([{"id": "a", "title": "X", "type": "Program",
                           "titleTranslations": {"en": "Orders"}}]);
        let (gw, _) = gateway(FakeApi::new(
            Err("unused".into()),
            Ok(ApiResponse::ok(data)),
            Err("unused".into()),
        ));
        block_on(gw.load_user_menu()).unwrap();
        assert_eq!(gw.user_menu()[0].display_title, "X");

        gw.set_language(Language::new("en"));
        assert_eq!(gw.user_menu()[0].display_title, "Orders");
        assert_eq!(gw.language().code(), "en");
    }
}
