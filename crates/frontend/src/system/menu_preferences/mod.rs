//! User menu personalization: the user's own navigation tree, built from
//! the standard catalog by drag and drop, edited locally and saved as a
//! whole.

pub mod api;
pub mod context;
pub mod dnd;
pub mod events;
pub mod factory;
pub mod gateway;
pub mod ids;
pub mod mapping;
pub mod title;
pub mod tree_ops;

pub use context::{use_menu_preferences, MenuPreferencesContext, MenuPreferencesProvider};
pub use gateway::{MenuGatewayError, MenuPreferencesGateway};
