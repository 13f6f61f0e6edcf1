//! Fluent bundles for the UI strings under `i18n/`.

use i18n_embed::fluent::{fluent_language_loader, FluentLanguageLoader};
use i18n_embed::unic_langid::LanguageIdentifier;
use once_cell::sync::Lazy;
use rust_embed::RustEmbed;

use super::Language;

#[derive(RustEmbed)]
#[folder = "i18n"]
struct Localizations;

static RU_LOADER: Lazy<FluentLanguageLoader> = Lazy::new(|| loader_for("ru"));
static EN_LOADER: Lazy<FluentLanguageLoader> = Lazy::new(|| loader_for("en"));

fn loader_for(code: &str) -> FluentLanguageLoader {
    let loader = fluent_language_loader!();
    let requested: Vec<LanguageIdentifier> =
        code.parse::<LanguageIdentifier>().into_iter().collect();
    if let Err(e) = i18n_embed::select(&loader, &Localizations, &requested) {
        log::warn!("Cannot load '{}' translations: {}", code, e);
    }
    loader
}

/// Loader for `lang`. Languages without their own bundle get English,
/// and so do messages missing from a bundle.
pub fn language_loader(lang: &Language) -> &'static FluentLanguageLoader {
    match lang.code() {
        "ru" => &*RU_LOADER,
        _ => &*EN_LOADER,
    }
}
