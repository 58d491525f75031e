use dioxus::prelude::*;

use crate::core::overlay::Tooltip;
use crate::t;

/// Floating card for the hovered region, positioned from the tooltip anchor.
#[component]
pub fn TooltipCard(tooltip: Tooltip) -> Element {
    let placement = tooltip.placement_style();
    let title = tooltip.title();
    let value = tooltip.value_label();
    let relative = tooltip.relative_label();
    let absolute = tooltip.absolute_label();

    rsx! {
        div { class: "muscle-map__tooltip", role: "tooltip", style: "{placement}",
            h3 { class: "muscle-map__tooltip-title", "{title}" }
            p { class: "muscle-map__tooltip-value", "{value}" }
            dl { class: "muscle-map__tooltip-stats",
                dt { {t!("tooltip-relative")} }
                dd { "{relative}" }
                dt { {t!("tooltip-absolute")} }
                dd { "{absolute}" }
            }
        }
    }
}
