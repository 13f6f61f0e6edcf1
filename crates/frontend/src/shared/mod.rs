pub mod api_utils;
pub mod browser_storage;
pub mod config;
pub mod i18n;
