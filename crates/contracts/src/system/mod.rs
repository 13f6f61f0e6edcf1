pub mod menu_preferences;
