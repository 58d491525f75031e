use dioxus::prelude::*;

use crate::core::activation::ActivationDataset;
use crate::core::outline::BodyOutline;
use crate::core::snapshot::{save_snapshot, SnapshotFormat};
use crate::t;

#[derive(Clone, Debug, PartialEq)]
enum ExportStatus {
    Idle,
    Done(String),
    Error(String),
}

/// Buttons that write the current map to disk as SVG or PNG.
#[component]
pub fn SnapshotPanel(
    activation: ActivationDataset,
    #[props(default)] outline: Option<BodyOutline>,
) -> Element {
    let status = use_signal(|| ExportStatus::Idle);

    let export = {
        let activation = activation.clone();
        let outline = outline.clone();
        move |format: SnapshotFormat| {
            let activation = activation.clone();
            let outline = outline.clone();
            let mut status = status;
            move |_: MouseEvent| {
                let outline = outline.as_ref().unwrap_or(BodyOutline::bundled());
                match save_snapshot(format, outline, &activation) {
                    Ok(path) => status.set(ExportStatus::Done(path.display().to_string())),
                    Err(err) => {
                        tracing::warn!(%err, ?format, "snapshot export failed");
                        status.set(ExportStatus::Error(err.to_string()));
                    }
                }
            }
        }
    };

    let feedback = match status() {
        ExportStatus::Idle => None,
        ExportStatus::Done(path) => Some((
            "muscle-export__status muscle-export__status--success",
            t!("export-done", path = path),
        )),
        ExportStatus::Error(error) => Some((
            "muscle-export__status muscle-export__status--error",
            t!("export-error", error = error),
        )),
    };

    rsx! {
        section { class: "muscle-export",
            h3 { {t!("export-title")} }
            p { {t!("export-intro")} }
            div { class: "muscle-export__actions",
                button {
                    r#type: "button",
                    class: "button button--primary",
                    onclick: export(SnapshotFormat::Svg),
                    {t!("export-svg")}
                }
                button {
                    r#type: "button",
                    class: "button button--ghost",
                    onclick: export(SnapshotFormat::Png),
                    {t!("export-png")}
                }
            }
            if let Some((class_name, message)) = feedback {
                p { class: "{class_name}", "{message}" }
            }
        }
    }
}
