use dioxus::prelude::*;
use serde::Deserialize;

use crate::core::activation::ActivationInput;
use crate::core::region::RegionId;
use crate::muscle_map::{MuscleMap, SnapshotPanel};
use crate::t;

const DEMO_JSON: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/demo/activation.json"
));

/// Sample week measured both ways.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DemoData {
    pub weight: ActivationInput,
    pub sets: ActivationInput,
}

impl DemoData {
    pub fn bundled() -> Result<Self, serde_json::Error> {
        serde_json::from_str(DEMO_JSON)
    }
}

#[component]
pub fn MapDemo() -> Element {
    let lang_code: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let _lang = lang_code.map(|code| code()).unwrap_or_default();

    let demo = use_hook(|| {
        DemoData::bundled().map_err(|err| {
            tracing::error!(%err, "demo activation data failed to parse");
            err.to_string()
        })
    });
    let mut by_weight = use_signal(|| true);
    let mut selected = use_signal(|| None::<RegionId>);

    let demo = match demo {
        Ok(demo) => demo,
        Err(err) => {
            return rsx! {
                section { class: "page page-map",
                    h1 { {t!("page-map-title")} }
                    p { class: "page-map__error", "{err}" }
                }
            };
        }
    };

    let input = if by_weight() { &demo.weight } else { &demo.sets };
    let activation = input.dataset();
    let mode = input.mode();

    let selection = match selected() {
        Some(region) => t!("map-selected", region = region.display_name()),
        None => t!("map-selected-none"),
    };

    rsx! {
        section { class: "page page-map",
            h1 { {t!("page-map-title")} }
            p { {t!("page-map-intro")} }

            div { class: "page-map__toolbar",
                span { class: "page-map__toolbar-label", {t!("map-mode-label")} }
                button {
                    r#type: "button",
                    class: if by_weight() { "button button--primary" } else { "button button--ghost" },
                    onclick: move |_| by_weight.set(true),
                    {t!("map-mode-weight")}
                }
                button {
                    r#type: "button",
                    class: if by_weight() { "button button--ghost" } else { "button button--primary" },
                    onclick: move |_| by_weight.set(false),
                    {t!("map-mode-sets")}
                }
            }

            div { class: "page-map__layout",
                div { class: "card page-map__card",
                    h2 { {t!("map-title")} }
                    if activation.is_empty() {
                        p { class: "page-map__empty", {t!("map-empty")} }
                    }
                    MuscleMap {
                        activation: activation.clone(),
                        mode,
                        on_select: move |region: RegionId| selected.set(Some(region)),
                    }
                    p { class: "page-map__selection", "{selection}" }
                }

                div { class: "card page-map__card",
                    SnapshotPanel { activation }
                }
            }
        }
    }
}
