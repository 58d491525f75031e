use dioxus::prelude::*;

use crate::t;

#[component]
pub fn Home() -> Element {
    // Subscribe to the platform's language signal (if provided) so labels refresh on change.
    let lang_code: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let lang = lang_code.map(|code| code()).unwrap_or_default();
    tracing::trace!(%lang, "home render");

    rsx! {
        section { class: "page page-home",
            h1 { {t!("home-title")} }
            p { {t!("home-intro")} }

            ul { class: "page-home__features",
                li { {t!("home-feature-colors")} }
                li { {t!("home-feature-hover")} }
                li { {t!("home-feature-export")} }
            }
            p { class: "page-home__cta", {t!("home-cta")} }
        }
    }
}
