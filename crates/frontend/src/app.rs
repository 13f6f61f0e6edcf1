use crate::layout::left::Sidebar;
use crate::system::menu_preferences::MenuPreferencesProvider;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <MenuPreferencesProvider>
            <div class="app-layout">
                <div class="app-body">
                    <div data-zone="left" class="left">
                        <Sidebar />
                    </div>
                </div>
            </div>
        </MenuPreferencesProvider>
    }
}
