//! Localization for `musclemap-ui`.
//!
//! `i18n-embed` selects languages and formats the embedded `.ftl` bundles;
//! `i18n-embed-fl` checks keys at compile time.
//!
//! Folder layout (relative to this crate root):
//! ```text
//! i18n.toml
//! i18n/
//!   en-US/musclemap-ui.ftl   (fallback/reference)
//!   es-ES/musclemap-ui.ftl
//!   fr-FR/musclemap-ui.ftl
//! ```
//!
//! Usage in a component (after calling `i18n::init()` once at app start):
//! ```ignore
//! use crate::t;
//! let title = t!("map-title");
//! let selected = t!("map-selected", region = "Chest");
//! ```
//!
//! Desktop requests the OS locale list, web requests `navigator.languages`.
use std::sync::Once;

use i18n_embed::fluent::FluentLanguageLoader;
use i18n_embed::LanguageLoader;
use once_cell::sync::Lazy;
use rust_embed::Embed;
use unic_langid::LanguageIdentifier;

pub use i18n_embed_fl::fl; // Re-export for convenience.

/// Shorthand for `fl!(&*LOADER, ...)`, e.g. `t!("export-done", path = shown)`.
#[macro_export]
macro_rules! t {
    ($key:literal) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key)
    };
    ($key:literal, $( $arg:ident = $value:expr ),+ $(,)?) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key, $( $arg = $value ),+ )
    };
}

/// Fluent domain; the fallback bundle lives at `i18n/en-US/{DOMAIN}.ftl`.
const DOMAIN: &str = "musclemap-ui";

/// Embed all locale folders under `i18n/`.
#[derive(Embed)]
#[folder = "i18n"]
struct Localizations;

/// Global language loader used with the `fl!` macro.
pub static LOADER: Lazy<FluentLanguageLoader> = Lazy::new(|| {
    let fallback: LanguageIdentifier = "en-US".parse().expect("valid fallback language identifier");
    FluentLanguageLoader::new(DOMAIN, fallback)
});

static INIT: Once = Once::new();

/// Initialize i18n (idempotent).
pub fn init() {
    INIT.call_once(|| {
        let requested = requested_languages();
        if let Err(err) = i18n_embed::select(&*LOADER, &Localizations, &requested) {
            tracing::warn!(%err, "failed selecting languages; continuing with fallback");
        }
    });
}

/// Switch language at runtime. Unparseable tags are ignored.
pub fn set_language(tag: &str) -> Result<(), i18n_embed::I18nEmbedError> {
    let Ok(lang) = tag.parse::<LanguageIdentifier>() else {
        tracing::debug!(tag, "ignoring unparseable language tag");
        return Ok(());
    };
    i18n_embed::select(&*LOADER, &Localizations, &[lang]).map(|_| ())
}

/// Currently selected language tag, e.g. `en-US`.
pub fn current_language() -> String {
    LOADER.current_language().to_string()
}

/// List available (embedded) language identifiers.
pub fn available_languages() -> Vec<String> {
    let mut langs = Localizations::iter()
        .filter_map(|path| path.split('/').next().map(|s| s.to_string()))
        .collect::<Vec<_>>();
    langs.sort();
    langs.dedup();
    langs
}

#[cfg(target_arch = "wasm32")]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::WebLanguageRequester::requested_languages()
}

#[cfg(not(target_arch = "wasm32"))]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::DesktopLanguageRequester::requested_languages()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::fl;

    #[test]
    fn fallback_language_is_present() {
        let langs = available_languages();
        assert!(langs.iter().any(|l| l == "en-US"));
        assert!(langs.iter().any(|l| l == "fr-FR"));
    }

    #[test]
    fn tooltip_labels_resolve() {
        init();
        let _ = set_language("en-US");
        assert_eq!(fl!(&*LOADER, "tooltip-relative"), "Relative Activation");
        assert_eq!(fl!(&*LOADER, "tooltip-absolute"), "Absolute Activation");
    }

    #[test]
    fn unknown_language_keeps_current_bundle() {
        init();
        let _ = set_language("en-US");
        let before = fl!(&*LOADER, "map-title");
        let _ = set_language("zz-ZZ");
        assert_eq!(before, fl!(&*LOADER, "map-title"));
        let _ = set_language("not a tag!");
        assert_eq!(before, fl!(&*LOADER, "map-title"));
    }
}
