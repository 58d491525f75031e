//! Binds activation colors and pointer listeners onto a visual surface.
//!
//! A [`RegionBinder`] owns at most one live [`Binding`]. Every (re)bind tears the
//! previous binding down first, and a binding's listener guards release their
//! handlers when it is dropped, so consecutive rebinds never stack handlers.

use std::rc::Rc;

use super::activation::ActivationDataset;
use super::overlay::{OverlayInput, OverlayTarget};
use super::ramp::color_for;
use super::region::RegionId;
use super::surface::{Listener, PointerEvent, PointerHandler, PointerKind, VisualSurface};

/// Live registrations and the inputs they were built from.
pub struct Binding {
    dataset: ActivationDataset,
    regions: Vec<RegionId>,
    target: Rc<dyn OverlayTarget>,
    painted: Vec<RegionId>,
    listeners: Vec<Listener>,
}

impl Binding {
    pub fn dataset(&self) -> &ActivationDataset {
        &self.dataset
    }

    /// Regions that had at least one element on the surface.
    pub fn painted(&self) -> &[RegionId] {
        &self.painted
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

pub struct RegionBinder {
    regions: Vec<RegionId>,
    active: Option<Binding>,
}

impl Default for RegionBinder {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionBinder {
    /// Binder over the full region catalogue.
    pub fn new() -> Self {
        Self::with_regions(RegionId::ALL)
    }

    pub fn with_regions(regions: impl IntoIterator<Item = RegionId>) -> Self {
        Self {
            regions: dedup(regions),
            active: None,
        }
    }

    pub fn regions(&self) -> &[RegionId] {
        &self.regions
    }

    pub fn binding(&self) -> Option<&Binding> {
        self.active.as_ref()
    }

    pub fn is_bound(&self) -> bool {
        self.active.is_some()
    }

    pub fn listener_count(&self) -> usize {
        self.active.as_ref().map_or(0, Binding::listener_count)
    }

    /// Rebind only when the dataset, region set or target differ from the live binding.
    /// Returns `true` when a rebind happened.
    pub fn sync<S: VisualSurface>(
        &mut self,
        surface: &S,
        dataset: &ActivationDataset,
        target: &Rc<dyn OverlayTarget>,
    ) -> bool {
        let current = self.active.as_ref().is_some_and(|binding| {
            binding.dataset == *dataset
                && binding.regions == self.regions
                && Rc::ptr_eq(&binding.target, target)
        });
        if current {
            return false;
        }
        self.rebind(surface, dataset, target);
        true
    }

    /// Full teardown followed by a fresh setup.
    pub fn rebind<S: VisualSurface>(
        &mut self,
        surface: &S,
        dataset: &ActivationDataset,
        target: &Rc<dyn OverlayTarget>,
    ) {
        self.teardown();

        let mut painted = Vec::new();
        let mut listeners = Vec::new();
        let max = dataset.max();

        for &region in &self.regions {
            let elements = surface.elements(region.key());
            if elements.is_empty() {
                tracing::debug!(region = %region, "surface has no element for region; skipping");
                continue;
            }

            let fill = color_for(dataset.get(region), max).clamped();
            surface.set_fill(region.key(), fill);

            let handler = pointer_handler(region, target.clone());
            for element in &elements {
                for kind in PointerKind::ALL {
                    listeners.push(surface.listen(element, kind, handler.clone()));
                }
            }
            painted.push(region);
        }

        tracing::debug!(
            regions = painted.len(),
            listeners = listeners.len(),
            max,
            "bound activation to surface"
        );

        self.active = Some(Binding {
            dataset: dataset.clone(),
            regions: self.regions.clone(),
            target: target.clone(),
            painted,
            listeners,
        });
    }

    /// Replace the region set. Rebinds immediately when a binding is live.
    pub fn set_regions<S: VisualSurface>(
        &mut self,
        surface: &S,
        regions: impl IntoIterator<Item = RegionId>,
    ) {
        let regions = dedup(regions);
        if regions == self.regions {
            return;
        }

        let previous = self.teardown();
        self.regions = regions;
        if let Some(binding) = previous {
            for region in &binding.painted {
                surface.clear_fill(region.key());
            }
            let dropped: Vec<RegionId> = binding
                .painted
                .iter()
                .copied()
                .filter(|region| !self.regions.contains(region))
                .collect();
            self.rebind(surface, &binding.dataset, &binding.target);
            if !dropped.is_empty() {
                binding.target.regions_unbound(&dropped);
            }
        }
    }

    /// Release all listeners and clear every fill this binder wrote.
    pub fn unbind<S: VisualSurface>(&mut self, surface: &S) {
        if let Some(binding) = self.teardown() {
            for region in &binding.painted {
                surface.clear_fill(region.key());
            }
            tracing::debug!(regions = binding.painted.len(), "unbound activation surface");
            binding.target.regions_unbound(&binding.painted);
        }
    }

    fn teardown(&mut self) -> Option<Binding> {
        let mut binding = self.active.take()?;
        for listener in binding.listeners.drain(..) {
            listener.release();
        }
        Some(binding)
    }
}

fn pointer_handler(region: RegionId, target: Rc<dyn OverlayTarget>) -> PointerHandler {
    Rc::new(move |event: &PointerEvent| {
        let position = event.position();
        let input = match event.kind {
            PointerKind::Enter => OverlayInput::Enter { region, position },
            PointerKind::Move => OverlayInput::Move { region, position },
            PointerKind::Leave => OverlayInput::Leave { region },
            PointerKind::Click => OverlayInput::Click { region },
        };
        target.dispatch(input);
    })
}

fn dedup(regions: impl IntoIterator<Item = RegionId>) -> Vec<RegionId> {
    let mut unique = Vec::new();
    for region in regions {
        if !unique.contains(&region) {
            unique.push(region);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::core::geometry::{Point, Rect};
    use crate::core::outline::{BodyOutline, OutlineSurface};

    #[derive(Default)]
    struct Recorder {
        inputs: RefCell<Vec<OverlayInput>>,
        unbound: RefCell<Vec<RegionId>>,
    }

    impl OverlayTarget for Recorder {
        fn dispatch(&self, input: OverlayInput) {
            self.inputs.borrow_mut().push(input);
        }

        fn regions_unbound(&self, regions: &[RegionId]) {
            self.unbound.borrow_mut().extend_from_slice(regions);
        }
    }

    fn surface() -> OutlineSurface {
        let raw = r#"{"view_box":"0 0 100 100","shapes":[
            {"region":"chest","d":"M0 0h10v10z"},
            {"region":"chest","d":"M20 0h10v10z"},
            {"region":"quads","d":"M0 50h10v30z"}
        ]}"#;
        OutlineSurface::new(BodyOutline::from_json(raw).unwrap())
    }

    fn dataset(chest: f64) -> ActivationDataset {
        ActivationDataset::new([(RegionId::Chest, chest), (RegionId::Quads, 50.0)], 500.0)
    }

    #[test]
    fn paints_present_regions_and_skips_missing() {
        let surface = surface();
        let recorder: Rc<dyn OverlayTarget> = Rc::new(Recorder::default());
        let mut binder = RegionBinder::new();

        binder.rebind(&surface, &dataset(100.0), &recorder);

        let binding = binder.binding().unwrap();
        assert_eq!(binding.painted(), &[RegionId::Chest, RegionId::Quads]);
        // 3 shapes × 4 pointer kinds
        assert_eq!(binder.listener_count(), 12);
        assert_eq!(surface.listener_count(), 12);
        assert_eq!(
            surface.fill("chest").map(|fill| fill.css()),
            Some("rgba(139, 0, 0, 0.8)".to_string())
        );
        assert_eq!(
            surface.fill("quads").map(|fill| fill.css()),
            Some("rgba(255, 155, 0, 0.8)".to_string())
        );
        assert!(surface.fill("traps").is_none());
    }

    #[test]
    fn events_translate_to_surface_relative_input() {
        let surface = surface();
        let recorder = Rc::new(Recorder::default());
        let target: Rc<dyn OverlayTarget> = recorder.clone();
        let mut binder = RegionBinder::new();
        binder.rebind(&surface, &dataset(10.0), &target);

        let shape = surface.elements("quads").remove(0);
        let bounds = Rect::new(100.0, 50.0, 400.0, 300.0);
        surface.dispatch(
            &shape,
            &PointerEvent::new(PointerKind::Enter, Point::new(130.0, 90.0), bounds),
        );
        surface.dispatch(
            &shape,
            &PointerEvent::new(PointerKind::Click, Point::new(130.0, 90.0), bounds),
        );

        assert_eq!(
            recorder.inputs.borrow().as_slice(),
            &[
                OverlayInput::Enter {
                    region: RegionId::Quads,
                    position: Point::new(30.0, 40.0)
                },
                OverlayInput::Click {
                    region: RegionId::Quads
                },
            ]
        );
    }

    #[test]
    fn sync_is_idempotent_and_detects_changes() {
        let surface = surface();
        let target: Rc<dyn OverlayTarget> = Rc::new(Recorder::default());
        let mut binder = RegionBinder::new();

        assert!(binder.sync(&surface, &dataset(100.0), &target));
        assert!(!binder.sync(&surface, &dataset(100.0), &target));
        assert_eq!(surface.listener_count(), 12);

        assert!(binder.sync(&surface, &dataset(20.0), &target));
        assert_eq!(surface.listener_count(), 12);
        // Quads is now the maximum, so it turns red.
        assert_eq!(surface.fill("quads").unwrap().css(), "rgba(139, 0, 0, 0.8)");
    }

    #[test]
    fn sync_treats_nan_dataset_as_unchanged() {
        let surface = surface();
        let target: Rc<dyn OverlayTarget> = Rc::new(Recorder::default());
        let mut binder = RegionBinder::new();
        let nan = dataset(f64::NAN);

        assert!(binder.sync(&surface, &nan, &target));
        assert!(!binder.sync(&surface, &nan.clone(), &target));
        assert_eq!(surface.listener_count(), 12);
    }

    #[test]
    fn region_set_change_rebinds() {
        let surface = surface();
        let recorder = Rc::new(Recorder::default());
        let target: Rc<dyn OverlayTarget> = recorder.clone();
        let mut binder = RegionBinder::new();
        binder.rebind(&surface, &dataset(100.0), &target);

        binder.set_regions(&surface, [RegionId::Quads]);
        assert_eq!(binder.regions(), &[RegionId::Quads]);
        assert_eq!(surface.listener_count(), 4);
        assert_eq!(recorder.unbound.borrow().as_slice(), &[RegionId::Chest]);
    }

    #[test]
    fn unbind_reports_every_painted_region() {
        let surface = surface();
        let recorder = Rc::new(Recorder::default());
        let target: Rc<dyn OverlayTarget> = recorder.clone();
        let mut binder = RegionBinder::new();
        binder.rebind(&surface, &dataset(100.0), &target);
        binder.rebind(&surface, &dataset(40.0), &target);
        assert!(recorder.unbound.borrow().is_empty());

        binder.unbind(&surface);
        assert_eq!(
            recorder.unbound.borrow().as_slice(),
            &[RegionId::Chest, RegionId::Quads]
        );
    }

    #[test]
    fn unbind_releases_everything() {
        let surface = surface();
        let target: Rc<dyn OverlayTarget> = Rc::new(Recorder::default());
        let mut binder = RegionBinder::new();
        binder.rebind(&surface, &dataset(100.0), &target);

        binder.unbind(&surface);
        assert!(!binder.is_bound());
        assert_eq!(surface.listener_count(), 0);
        assert!(surface.stylesheet(".map").is_empty());
    }

    #[test]
    fn dropping_binder_releases_listeners() {
        let surface = surface();
        let target: Rc<dyn OverlayTarget> = Rc::new(Recorder::default());
        {
            let mut binder = RegionBinder::new();
            binder.rebind(&surface, &dataset(100.0), &target);
            assert_eq!(surface.listener_count(), 12);
        }
        assert_eq!(surface.listener_count(), 0);
    }
}
