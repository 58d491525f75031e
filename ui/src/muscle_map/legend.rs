use dioxus::prelude::*;

use crate::core::activation::VolumeMode;
use crate::core::legend::legend_swatches;
use crate::t;

#[component]
pub fn MuscleLegend(max: f64, mode: VolumeMode) -> Element {
    if max <= 0.0 {
        return rsx! {
            p { class: "muscle-legend muscle-legend--empty", {t!("legend-empty")} }
        };
    }

    let swatches = legend_swatches(max, &mode);

    rsx! {
        section { class: "muscle-legend",
            h4 { class: "muscle-legend__title", {t!("legend-title")} }
            ul { class: "muscle-legend__items",
                for swatch in swatches {
                    li { key: "{swatch.level}", class: "muscle-legend__item",
                        span {
                            class: "muscle-legend__swatch",
                            style: "background-color: {swatch.color};",
                        }
                        span { class: "muscle-legend__label", "{swatch.label}" }
                    }
                }
            }
        }
    }
}
