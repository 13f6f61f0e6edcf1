use contracts::system::menu_preferences::{MenuItemPatch, StandardMenuItem, UserMenuItem};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;
use web_sys::DragEvent;

use super::api::HttpMenuApi;
use super::dnd::{drag_channels, DragCoordinator, DropOutcome, DropTarget};
use super::events::{listen_menu_preferences_changed, WindowEventNotifier};
use super::gateway::MenuPreferencesGateway;
use super::ids::IdMinter;
use super::mapping::refresh_display_titles;
use super::{factory, tree_ops};
use crate::shared::config::load_config;
use crate::shared::i18n::Language;

type BrowserGateway = MenuPreferencesGateway<HttpMenuApi, WindowEventNotifier>;

/// Reactive state of the menu customization feature.
///
/// Local edits (create, remove, drag and drop) only touch `user_menu`;
/// nothing reaches the backend until `save` is called.
#[derive(Clone, Copy)]
pub struct MenuPreferencesContext {
    pub standard_menu: RwSignal<Vec<StandardMenuItem>>,
    pub user_menu: RwSignal<Vec<UserMenuItem>>,
    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    pub language: RwSignal<Language>,
    pub last_error: RwSignal<Option<String>>,
    gateway: StoredValue<Rc<BrowserGateway>, LocalStorage>,
    drag: StoredValue<DragCoordinator>,
    ids: StoredValue<IdMinter>,
}

impl MenuPreferencesContext {
    pub fn new() -> Self {
        let config = load_config();
        let language = Language::detect(&config.default_language);
        let ids = IdMinter::new(config.user_item_id_prefix);
        let gateway = MenuPreferencesGateway::new(
            HttpMenuApi::from_window(config.api_port),
            WindowEventNotifier,
            language.clone(),
        );

        Self {
            standard_menu: RwSignal::new(vec![]),
            user_menu: RwSignal::new(vec![]),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
            language: RwSignal::new(language),
            last_error: RwSignal::new(None),
            gateway: StoredValue::new_local(Rc::new(gateway)),
            drag: StoredValue::new(DragCoordinator::new(ids.clone())),
            ids: StoredValue::new(ids),
        }
    }

    /// Fetch both menus. Failures leave the affected menu empty.
    pub fn reload(&self) {
        let this = *self;
        let gateway = self.gateway.get_value();
        this.loading.set(true);
        spawn_local(async move {
            let standard = gateway.load_standard_menu().await;
            let user = gateway.load_user_menu().await;

            this.standard_menu.set(gateway.standard_menu());
            this.user_menu.set(gateway.user_menu());
            this.last_error
                .set(standard.err().or(user.err()).map(|e| e.to_string()));
            this.loading.set(false);
        });
    }

    /// Persist the current user menu.
    pub fn save(&self) {
        let this = *self;
        let gateway = self.gateway.get_value();
        let items = self.user_menu.get_untracked();
        this.saving.set(true);
        spawn_local(async move {
            match gateway.save_user_menu(items).await {
                Ok(()) => {
                    this.user_menu.set(gateway.user_menu());
                    this.last_error.set(None);
                }
                Err(e) => this.last_error.set(Some(e.to_string())),
            }
            this.saving.set(false);
        });
    }

    /// Persist an edit of a single item together with the rest of the
    /// current (possibly unsaved) user menu.
    pub fn edit_item(&self, item_id: String, patch: MenuItemPatch) {
        let this = *self;
        let gateway = self.gateway.get_value();
        let items = self.user_menu.get_untracked();
        this.saving.set(true);
        spawn_local(async move {
            match gateway.edit_item(items, &item_id, &patch).await {
                Ok(()) => {
                    this.user_menu.set(gateway.user_menu());
                    this.last_error.set(None);
                }
                Err(e) => this.last_error.set(Some(e.to_string())),
            }
            this.saving.set(false);
        });
    }

    /// Add a new item at root, or into `folder_id` when it names a folder.
    fn add_item(&self, item: UserMenuItem, folder_id: Option<&str>) {
        self.user_menu.update(|menu| {
            let items = std::mem::take(menu);
            *menu = match folder_id {
                Some(folder_id) if tree_ops::is_folder_id(&items, folder_id) => {
                    tree_ops::insert_into_folder(items, folder_id, item)
                }
                _ => tree_ops::append_to_root(items, item),
            };
        });
    }

    pub fn create_folder(&self, title: Option<&str>, folder_id: Option<&str>) {
        let lang = self.language.get_untracked();
        let item = self
            .ids
            .with_value(|ids| factory::new_folder(ids, &lang, title));
        self.add_item(item, folder_id);
    }

    pub fn create_link(&self, title: Option<&str>, url: &str, folder_id: Option<&str>) {
        let lang = self.language.get_untracked();
        let item = self
            .ids
            .with_value(|ids| factory::new_link(ids, &lang, title, url));
        self.add_item(item, folder_id);
    }

    pub fn create_data_view(
        &self,
        title: Option<&str>,
        query_builder_id: &str,
        folder_id: Option<&str>,
    ) {
        let lang = self.language.get_untracked();
        let item = self
            .ids
            .with_value(|ids| factory::new_data_view(ids, &lang, title, query_builder_id));
        self.add_item(item, folder_id);
    }

    pub fn remove_item(&self, item_id: &str) {
        self.user_menu.update(|menu| {
            *menu = tree_ops::remove_by_id(std::mem::take(menu), item_id);
        });
    }

    pub fn begin_reorder(&self, item_id: &str) {
        self.drag.update_value(|drag| drag.begin_reorder(item_id));
    }

    pub fn begin_standard_drag(&self, ev: &DragEvent, item: &StandardMenuItem) {
        let channels = drag_channels(Some(ev));
        self.drag
            .update_value(|drag| drag.begin_standard_drag(item, &channels));
    }

    pub fn is_dragging_from_external(&self) -> bool {
        self.drag.with_value(|drag| drag.is_dragging_from_external())
    }

    /// `target == None` when released outside every drop zone.
    pub fn handle_drop(&self, ev: Option<&DragEvent>, target: Option<DropTarget>) -> DropOutcome {
        let channels = drag_channels(ev);
        let menu = self.user_menu.get_untracked();
        let result = self
            .drag
            .try_update_value(|drag| drag.handle_drop(target, &channels, menu));
        let Some((menu, outcome)) = result else {
            return DropOutcome::NoOp;
        };
        if !matches!(outcome, DropOutcome::NoOp | DropOutcome::Cancelled) {
            log::debug!("Menu drop: {:?}", outcome);
            self.user_menu.set(menu);
        }
        outcome
    }

    pub fn cancel_drag(&self, ev: Option<&DragEvent>) {
        let channels = drag_channels(ev);
        self.drag.update_value(|drag| drag.cancel(&channels));
    }

    pub fn set_language(&self, language: Language) {
        language.persist();
        self.gateway
            .with_value(|gateway| gateway.set_language(language.clone()));
        self.user_menu.update(|menu| {
            *menu = refresh_display_titles(std::mem::take(menu), &language);
        });
        self.language.set(language);
    }
}

impl Default for MenuPreferencesContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Provides `MenuPreferencesContext` and loads both menus on mount.
#[component]
pub fn MenuPreferencesProvider(children: ChildrenFn) -> impl IntoView {
    let ctx = MenuPreferencesContext::new();

    Effect::new(move |_| {
        ctx.reload();
    });

    // Saves from anywhere on the page (including other widgets) land here.
    let subscription = StoredValue::new_local(listen_menu_preferences_changed(move |change| {
        let lang = ctx.language.get_untracked();
        ctx.user_menu
            .set(refresh_display_titles(change.menu_items, &lang));
    }));
    on_cleanup(move || {
        subscription.try_update_value(|listener| listener.take());
    });

    provide_context(ctx);

    children()
}

/// Hook to access the menu preferences context
pub fn use_menu_preferences() -> MenuPreferencesContext {
    use_context::<MenuPreferencesContext>()
        .expect("MenuPreferencesProvider not found in component tree")
}
