//! Body outline asset and the headless surface built on top of it.
//!
//! The outline is a list of SVG path shapes, each tagged with a lower-cased
//! region key. It says nothing about activation; [`OutlineSurface`] carries the
//! fill rules and listeners the binder installs, and the UI forwards DOM pointer
//! events into it.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use once_cell::sync::Lazy;
use serde::Deserialize;

use super::ramp::Rgba;
use super::region::RegionId;
use super::surface::{
    Listener, ListenerRegistry, PointerEvent, PointerHandler, PointerKind, VisualSurface,
};

const BUNDLED_OUTLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/body/outline.json"
));

static BUNDLED: Lazy<BodyOutline> = Lazy::new(|| {
    BodyOutline::from_json(BUNDLED_OUTLINE).unwrap_or_else(|err| {
        tracing::error!(%err, "bundled body outline failed to load; rendering without shapes");
        BodyOutline::default()
    })
});

#[derive(Debug, thiserror::Error)]
pub enum OutlineError {
    #[error("invalid outline asset: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("outline shape {index} names unknown region `{key}`")]
    UnknownRegion { index: usize, key: String },
    #[error("outline shape {index} has no path data")]
    EmptyPath { index: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutlineShape {
    pub region: RegionId,
    pub d: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BodyOutline {
    pub view_box: String,
    /// Decorative paths drawn beneath the regions; never bound.
    pub silhouette: Vec<String>,
    pub shapes: Vec<OutlineShape>,
}

impl Default for BodyOutline {
    fn default() -> Self {
        Self {
            view_box: "0 0 400 300".to_string(),
            silhouette: Vec::new(),
            shapes: Vec::new(),
        }
    }
}

#[derive(Deserialize)]
struct RawOutline {
    view_box: String,
    #[serde(default)]
    silhouette: Vec<String>,
    shapes: Vec<RawShape>,
}

#[derive(Deserialize)]
struct RawShape {
    region: String,
    d: String,
}

impl BodyOutline {
    pub fn from_json(raw: &str) -> Result<Self, OutlineError> {
        let parsed: RawOutline = serde_json::from_str(raw)?;

        let shapes = parsed
            .shapes
            .into_iter()
            .enumerate()
            .map(|(index, shape)| {
                let region = RegionId::from_key(&shape.region).ok_or_else(|| {
                    OutlineError::UnknownRegion {
                        index,
                        key: shape.region.clone(),
                    }
                })?;
                if shape.d.trim().is_empty() {
                    return Err(OutlineError::EmptyPath { index });
                }
                Ok(OutlineShape {
                    region,
                    d: shape.d,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            view_box: parsed.view_box,
            silhouette: parsed.silhouette,
            shapes,
        })
    }

    /// Schematic front/back outline shipped with the crate.
    pub fn bundled() -> &'static Self {
        &BUNDLED
    }

    pub fn regions(&self) -> BTreeSet<RegionId> {
        self.shapes.iter().map(|shape| shape.region).collect()
    }

    pub fn shapes_for(&self, region: RegionId) -> impl Iterator<Item = &OutlineShape> + '_ {
        self.shapes.iter().filter(move |shape| shape.region == region)
    }
}

/// Handle to one outline shape; the element type of [`OutlineSurface`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShapeRef {
    pub index: usize,
    pub region: RegionId,
}

/// Headless [`VisualSurface`] over a [`BodyOutline`]. Clones share state.
#[derive(Clone)]
pub struct OutlineSurface {
    outline: Rc<BodyOutline>,
    fills: Rc<RefCell<BTreeMap<String, Rgba>>>,
    listeners: ListenerRegistry<ShapeRef>,
}

impl OutlineSurface {
    pub fn new(outline: BodyOutline) -> Self {
        Self {
            outline: Rc::new(outline),
            fills: Rc::new(RefCell::new(BTreeMap::new())),
            listeners: ListenerRegistry::new(),
        }
    }

    pub fn outline(&self) -> &BodyOutline {
        &self.outline
    }

    pub fn shapes(&self) -> Vec<(ShapeRef, OutlineShape)> {
        self.outline
            .shapes
            .iter()
            .enumerate()
            .map(|(index, shape)| {
                (
                    ShapeRef {
                        index,
                        region: shape.region,
                    },
                    shape.clone(),
                )
            })
            .collect()
    }

    pub fn fill(&self, key: &str) -> Option<Rgba> {
        self.fills.borrow().get(key).copied()
    }

    /// Style rules for every filled key, scoped under `scope` (e.g. `.muscle-map`).
    pub fn stylesheet(&self, scope: &str) -> String {
        self.fills
            .borrow()
            .iter()
            .map(|(key, fill)| format!("{scope} .{key} {{ fill: {fill}; }}\n"))
            .collect()
    }

    /// Forward a host pointer event for `shape`. Returns the number of handlers run.
    pub fn dispatch(&self, shape: &ShapeRef, event: &PointerEvent) -> usize {
        self.listeners.dispatch(shape, event)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl VisualSurface for OutlineSurface {
    type Element = ShapeRef;

    fn elements(&self, key: &str) -> Vec<ShapeRef> {
        self.outline
            .shapes
            .iter()
            .enumerate()
            .filter(|(_, shape)| shape.region.key() == key)
            .map(|(index, shape)| ShapeRef {
                index,
                region: shape.region,
            })
            .collect()
    }

    fn set_fill(&self, key: &str, fill: Rgba) {
        self.fills.borrow_mut().insert(key.to_string(), fill);
    }

    fn clear_fill(&self, key: &str) {
        self.fills.borrow_mut().remove(key);
    }

    fn listen(&self, element: &ShapeRef, kind: PointerKind, handler: PointerHandler) -> Listener {
        self.listeners.register(element.clone(), kind, handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_outline_parses_and_covers_every_region() {
        let outline = BodyOutline::from_json(BUNDLED_OUTLINE).expect("bundled outline parses");
        assert_eq!(outline.regions().len(), RegionId::COUNT);
        assert!(outline.shapes_for(RegionId::Chest).count() >= 2);
    }

    #[test]
    fn bundled_accessor_shares_one_instance() {
        assert!(std::ptr::eq(BodyOutline::bundled(), BodyOutline::bundled()));
        assert_eq!(BodyOutline::bundled().view_box, "0 0 400 300");
    }

    #[test]
    fn unknown_region_is_rejected() {
        let raw = r#"{"view_box":"0 0 10 10","shapes":[{"region":"chest","d":"M0 0h1v1z"},{"region":"elbow","d":"M0 0h1v1z"}]}"#;
        match BodyOutline::from_json(raw) {
            Err(OutlineError::UnknownRegion { index, key }) => {
                assert_eq!(index, 1);
                assert_eq!(key, "elbow");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn surface_addresses_shapes_by_key() {
        let raw = r#"{"view_box":"0 0 10 10","shapes":[
            {"region":"quads","d":"M0 0h1v1z"},
            {"region":"quads","d":"M2 0h1v1z"},
            {"region":"abs","d":"M4 0h1v1z"}
        ]}"#;
        let surface = OutlineSurface::new(BodyOutline::from_json(raw).unwrap());

        assert_eq!(surface.elements("quads").len(), 2);
        assert!(surface.elements("traps").is_empty());

        let fill = Rgba {
            r: 255,
            g: 155,
            b: 0,
            alpha: 0.8,
        };
        surface.set_fill("quads", fill);
        assert_eq!(
            surface.stylesheet(".map"),
            ".map .quads { fill: rgba(255, 155, 0, 0.8); }\n"
        );
        surface.clear_fill("quads");
        assert!(surface.stylesheet(".map").is_empty());
    }
}
