use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;

use super::{MuscleLegend, TooltipCard};
use crate::core::activation::{ActivationDataset, VolumeMode};
use crate::core::binder::RegionBinder;
use crate::core::geometry::{Point, Rect};
use crate::core::outline::{BodyOutline, OutlineSurface, ShapeRef};
use crate::core::overlay::{OverlayController, OverlayTarget, SelectionCallback, SharedOverlay};
use crate::core::region::RegionId;
use crate::core::surface::{PointerEvent, PointerKind};

const MUSCLE_MAP_CSS: Asset = asset!("/assets/styling/muscle_map.css");
const MUSCLE_MAP_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/styling/muscle_map.css"
));

/// Class scope for the generated fill rules.
const FILL_SCOPE: &str = ".muscle-map";

/// Binder, surface and overlay for one mounted map. Lives for the component's lifetime.
struct MapState {
    surface: OutlineSurface,
    binder: RegionBinder,
    overlay: Rc<SharedOverlay>,
    target: Rc<dyn OverlayTarget>,
}

impl MapState {
    fn new(outline: BodyOutline, overlay: Rc<SharedOverlay>) -> Self {
        let target: Rc<dyn OverlayTarget> = overlay.clone();
        Self {
            surface: OutlineSurface::new(outline),
            binder: RegionBinder::new(),
            overlay,
            target,
        }
    }

    fn replace_outline(&mut self, outline: &BodyOutline) {
        if self.surface.outline() == outline {
            return;
        }
        tracing::debug!(shapes = outline.shapes.len(), "muscle map outline replaced");
        self.binder.unbind(&self.surface);
        self.overlay.reset();
        self.surface = OutlineSurface::new(outline.clone());
    }

    fn set_regions(&mut self, regions: &[RegionId]) {
        let MapState {
            surface, binder, ..
        } = self;
        binder.set_regions(surface, regions.iter().copied());
    }

    fn sync(&mut self, dataset: &ActivationDataset) {
        let MapState {
            surface,
            binder,
            target,
            ..
        } = self;
        binder.sync(surface, dataset, target);
    }
}

fn to_rect(rect: dioxus::html::geometry::PixelsRect) -> Rect {
    Rect::new(rect.origin.x, rect.origin.y, rect.size.width, rect.size.height)
}

/// Body outline colored by activation, with hover tooltip, click selection and legend.
///
/// The map rebinds only when `activation`, `mode`'s dataset or `regions` change;
/// listeners are released when the component unmounts.
#[component]
pub fn MuscleMap(
    activation: ActivationDataset,
    #[props(default)] mode: VolumeMode,
    #[props(default)] outline: Option<BodyOutline>,
    #[props(default)] regions: Option<Vec<RegionId>>,
    #[props(default = true)] show_legend: bool,
    on_select: Option<EventHandler<RegionId>>,
) -> Element {
    let revision = use_signal(|| 0u64);
    // Surface bounds in page space stay valid while the page scrolls.
    let page_bounds = use_signal(Rect::default);
    let scroll = use_signal(Point::default);
    let mut mounted = use_signal(|| None::<Rc<MountedData>>);

    let state = use_hook(|| {
        let overlay = SharedOverlay::new(OverlayController::new(activation.clone(), mode.clone()));
        overlay.set_on_change(Some(Rc::new(move || {
            let mut revision = revision;
            *revision.write() += 1;
        })));
        let outline = outline.as_ref().unwrap_or(BodyOutline::bundled()).clone();
        Rc::new(RefCell::new(MapState::new(outline, overlay)))
    });

    {
        let state = state.clone();
        use_drop(move || {
            let mut map = state.borrow_mut();
            map.overlay.set_on_change(None);
            map.overlay.set_on_select(None);
            let MapState {
                surface, binder, ..
            } = &mut *map;
            binder.unbind(surface);
        });
    }

    // Subscribe to hover changes pushed from the overlay.
    let _ = revision();

    let (surface, overlay) = {
        let mut map = state.borrow_mut();
        map.replace_outline(outline.as_ref().unwrap_or(BodyOutline::bundled()));
        map.overlay.replace_dataset(activation.clone());
        map.overlay.set_mode(mode.clone());
        map.overlay.set_on_select(on_select.map(|handler| {
            Rc::new(move |region: RegionId| handler.call(region)) as SelectionCallback
        }));
        let wanted = regions.clone().unwrap_or_else(|| RegionId::ALL.to_vec());
        map.set_regions(&wanted);
        map.sync(&activation);
        (map.surface.clone(), map.overlay.clone())
    };

    let fills = surface.stylesheet(FILL_SCOPE);
    let tooltip = overlay.tooltip();
    let hovered = overlay.state().region();
    let view_box = surface.outline().view_box.clone();
    let silhouette = surface.outline().silhouette.clone();

    // Client rect measured now, shifted into page space by the scroll offset seen at `at`.
    let measure = move |at: Point| {
        let Some(data) = mounted() else {
            return;
        };
        spawn(async move {
            if let Ok(rect) = data.get_client_rect().await {
                let mut page_bounds = page_bounds;
                page_bounds.set(to_rect(rect).translated(at));
            }
        });
    };

    let forward = {
        let surface = surface.clone();
        move |kind: PointerKind, shape: ShapeRef| {
            let surface = surface.clone();
            move |evt: MouseEvent| {
                let client = evt.client_coordinates();
                let client = Point::new(client.x, client.y);
                let page = evt.page_coordinates();
                let page = Point::new(page.x, page.y);

                let mut scroll = scroll;
                scroll.set(page - client);
                if kind == PointerKind::Enter {
                    measure(page - client);
                }

                let bounds = page_bounds.peek().page_to_client(page, client);
                surface.dispatch(&shape, &PointerEvent::new(kind, client, bounds));
            }
        }
    };

    rsx! {
        document::Link { rel: "stylesheet", href: MUSCLE_MAP_CSS }
        if cfg!(all(not(debug_assertions), not(target_arch = "wasm32"))) {
            document::Style { "{MUSCLE_MAP_CSS_INLINE}" }
        }

        div { class: "muscle-map",
            style { "{fills}" }

            div {
                class: "muscle-map__surface",
                onmounted: move |evt: MountedEvent| {
                    mounted.set(Some(evt.data()));
                    measure(*scroll.peek());
                },
                onmouseenter: move |evt: MouseEvent| {
                    let client = evt.client_coordinates();
                    let page = evt.page_coordinates();
                    let at = Point::new(page.x - client.x, page.y - client.y);
                    let mut scroll = scroll;
                    scroll.set(at);
                    measure(at);
                },
                onresize: move |_| measure(*scroll.peek()),

                svg {
                    class: "muscle-map__svg",
                    view_box: "{view_box}",
                    xmlns: "http://www.w3.org/2000/svg",
                    role: "img",

                    g { class: "muscle-map__silhouette",
                        for (index, d) in silhouette.into_iter().enumerate() {
                            path { key: "silhouette-{index}", d }
                        }
                    }

                    for (shape_ref, shape) in surface.shapes() {
                        path {
                            key: "{shape_ref.index}",
                            class: if hovered == Some(shape.region) {
                                "muscle-map__region muscle-map__region--hovered {shape.region.key()}"
                            } else {
                                "muscle-map__region {shape.region.key()}"
                            },
                            d: "{shape.d}",
                            onmouseenter: forward(PointerKind::Enter, shape_ref.clone()),
                            onmousemove: forward(PointerKind::Move, shape_ref.clone()),
                            onmouseleave: forward(PointerKind::Leave, shape_ref.clone()),
                            onclick: forward(PointerKind::Click, shape_ref.clone()),
                            title { "{shape.region.display_name()}" }
                        }
                    }
                }

                if let Some(tooltip) = tooltip {
                    TooltipCard { tooltip }
                }
            }

            if show_legend {
                MuscleLegend { max: activation.max(), mode: mode.clone() }
            }
        }
    }
}
