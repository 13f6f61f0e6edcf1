//! Navigation sidebar built from the user's saved menu

use contracts::system::menu_preferences::{MenuItemType, MenuNode, UserMenuItem};
use i18n_embed_fl::fl;
use leptos::prelude::*;

use crate::shared::i18n::language_loader;
use crate::system::menu_preferences::tree_ops::visible_tree;
use crate::system::menu_preferences::use_menu_preferences;

/// Where a leaf item navigates to; `None` when its payload is missing.
fn item_href(item: &UserMenuItem) -> Option<String> {
    match item.item_type {
        MenuItemType::Folder => None,
        MenuItemType::Program => item.program_id.as_ref().map(|id| format!("#/program/{}", id)),
        MenuItemType::Link => item.external_url.clone(),
        MenuItemType::DataView => item
            .query_builder_id
            .as_ref()
            .map(|id| format!("#/data-view/{}", id)),
    }
}

fn render_level(items: Vec<UserMenuItem>, depth: usize, expanded: RwSignal<Vec<String>>) -> AnyView {
    items
        .into_iter()
        .map(|item| render_item(item, depth, expanded))
        .collect_view()
        .into_any()
}

fn render_item(item: UserMenuItem, depth: usize, expanded: RwSignal<Vec<String>>) -> AnyView {
    let padding = format!("{}px", 12 + depth * 10);
    let title = if item.display_title.is_empty() {
        item.title.clone()
    } else {
        item.display_title.clone()
    };

    if !item.is_folder() {
        let external = item.item_type == MenuItemType::Link;
        return view! {
            <a
                class="app-sidebar__item"
                href=item_href(&item)
                target=external.then_some("_blank")
                style:padding-left=padding
            >
                <div class="app-sidebar__item-content">
                    <span>{title}</span>
                </div>
            </a>
        }
        .into_any();
    }

    let folder_id = StoredValue::new(item.id.clone());
    let children = StoredValue::new(item.children);
    let is_expanded = move || folder_id.with_value(|id| expanded.get().contains(id));

    view! {
        <div>
            <div
                class="app-sidebar__item"
                style:padding-left=padding
                on:click=move |_| {
                    let id = folder_id.get_value();
                    expanded.update(move |open| {
                        if let Some(pos) = open.iter().position(|x| x == &id) {
                            open.remove(pos);
                        } else {
                            open.push(id);
                        }
                    });
                }
            >
                <div class="app-sidebar__item-content">
                    <span>{title}</span>
                </div>
                <div class="app-sidebar__chevron" class:app-sidebar__chevron--expanded=is_expanded>
                    "›"
                </div>
            </div>
            <Show when=is_expanded>
                <div class="app-sidebar__children">
                    {move || render_level(children.get_value(), depth + 1, expanded)}
                </div>
            </Show>
        </div>
    }
    .into_any()
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let menu = use_menu_preferences();
    let expanded = RwSignal::new(Vec::<String>::new());
    let visible = Memo::new(move |_| menu.user_menu.with(|items| visible_tree(items)));

    view! {
        <div class="app-sidebar__content">
            {move || {
                let lang = menu.language.get();
                if menu.loading.get() {
                    return view! { <div class="app-sidebar__status">{fl!(language_loader(&lang), "menu-loading")}</div> }
                        .into_any();
                }
                let items = visible.get();
                if items.is_empty() {
                    return view! { <div class="app-sidebar__status">{fl!(language_loader(&lang), "menu-empty")}</div> }
                        .into_any();
                }
                render_level(items, 0, expanded)
            }}
            <Show when=move || menu.saving.get()>
                <div class="app-sidebar__status">{move || fl!(language_loader(&menu.language.get()), "menu-saving")}</div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_href_by_type() {
        let mut program = UserMenuItem::new("p", "Sales", MenuItemType::Program);
        program.program_id = Some("p900".into());
        assert_eq!(item_href(&program).as_deref(), Some("#/program/p900"));

        let mut link = UserMenuItem::new("l", "Docs", MenuItemType::Link);
        link.external_url = Some("https://example.com".into());
        assert_eq!(item_href(&link).as_deref(), Some("https://example.com"));

        let view = UserMenuItem::new("v", "View", MenuItemType::DataView);
        assert_eq!(item_href(&view), None);

        let folder = UserMenuItem::new("f", "Folder", MenuItemType::Folder);
        assert_eq!(item_href(&folder), None);
    }
}
