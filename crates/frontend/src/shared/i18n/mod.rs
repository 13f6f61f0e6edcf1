//! Internationalization: the current language value and the Fluent
//! loaders for UI strings.
//!
//! The language is an ordinary value passed to whoever needs it; there is
//! no process-wide "current language".

mod localization;

pub use localization::language_loader;

use i18n_embed::WebLanguageRequester;

use crate::shared::browser_storage;

/// localStorage key of the language picked by the user
const LANGUAGE_KEY: &str = "app_language";

/// Language code used to pick translations, e.g. `"ru"` or `"en"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Language(String);

impl Language {
    /// Normalizes a BCP 47 tag to its lowercase primary subtag
    /// (`"en-US"` -> `"en"`).
    pub fn new(code: &str) -> Self {
        let primary = code
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        Self(primary)
    }

    pub fn code(&self) -> &str {
        &self.0
    }

    /// Saved choice, then browser language, then `fallback`.
    pub fn detect(fallback: &str) -> Self {
        let saved = browser_storage::get_local(LANGUAGE_KEY);
        let browser = WebLanguageRequester::requested_languages()
            .into_iter()
            .next()
            .map(|id| id.to_string());
        Self::pick(saved.as_deref(), browser.as_deref(), fallback)
    }

    fn pick(saved: Option<&str>, browser: Option<&str>, fallback: &str) -> Self {
        [saved, browser]
            .into_iter()
            .flatten()
            .map(Language::new)
            .find(|lang| !lang.0.is_empty())
            .unwrap_or_else(|| Language::new(fallback))
    }

    /// Remember this language for the next session
    pub fn persist(&self) {
        browser_storage::set_local(LANGUAGE_KEY, &self.0);
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::new("ru")
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_tags() {
        assert_eq!(Language::new("en-US").code(), "en");
        assert_eq!(Language::new("RU").code(), "ru");
        assert_eq!(Language::new("pt_BR").code(), "pt");
    }

    #[test]
    fn test_pick_order() {
        assert_eq!(Language::pick(Some("de"), Some("en-GB"), "ru").code(), "de");
        assert_eq!(Language::pick(None, Some("en-GB"), "ru").code(), "en");
        assert_eq!(Language::pick(Some(" "), None, "ru").code(), "ru");
    }
}
