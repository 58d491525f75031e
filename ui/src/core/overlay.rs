//! Hover / selection state machine and tooltip model.
//!
//! ```text
//!   Idle ──enter(r, p)──▶ Hovering(r, p) ──move(r, p')──▶ Hovering(r, p')
//!     ▲                        │
//!     └────────leave───────────┘
//! ```
//!
//! Clicks never change hover state; they surface a [`SelectionEvent`] which
//! [`SharedOverlay`] forwards to the selection callback.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use super::activation::{ActivationDataset, VolumeMode};
use super::format::{format_percent, format_volume};
use super::geometry::Point;
use super::region::RegionId;

/// Tooltip offset relative to its own box: right of and above the pointer.
pub const TOOLTIP_SHIFT_X_PERCENT: f64 = 10.0;
pub const TOOLTIP_SHIFT_Y_PERCENT: f64 = -110.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum HoverState {
    #[default]
    Idle,
    Hovering { region: RegionId, position: Point },
}

impl HoverState {
    pub fn region(&self) -> Option<RegionId> {
        match self {
            HoverState::Idle => None,
            HoverState::Hovering { region, .. } => Some(*region),
        }
    }

    pub fn position(&self) -> Option<Point> {
        match self {
            HoverState::Idle => None,
            HoverState::Hovering { position, .. } => Some(*position),
        }
    }
}

/// Surface-relative pointer input, as produced by the region binder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverlayInput {
    Enter { region: RegionId, position: Point },
    Move { region: RegionId, position: Point },
    Leave { region: RegionId },
    Click { region: RegionId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionEvent {
    pub region: RegionId,
}

#[derive(Debug, Clone)]
pub struct OverlayController {
    state: HoverState,
    dataset: ActivationDataset,
    mode: VolumeMode,
}

impl OverlayController {
    pub fn new(dataset: ActivationDataset, mode: VolumeMode) -> Self {
        Self {
            state: HoverState::Idle,
            dataset,
            mode,
        }
    }

    pub fn state(&self) -> HoverState {
        self.state
    }

    pub fn dataset(&self) -> &ActivationDataset {
        &self.dataset
    }

    pub fn mode(&self) -> &VolumeMode {
        &self.mode
    }

    /// Swap in a new dataset. An active hover stays put and shows the new values.
    pub fn replace_dataset(&mut self, dataset: ActivationDataset) {
        self.dataset = dataset;
    }

    pub fn set_mode(&mut self, mode: VolumeMode) {
        self.mode = mode;
    }

    pub fn reset(&mut self) {
        self.state = HoverState::Idle;
    }

    /// End a hover on any of `regions`, which no longer deliver pointer events.
    /// Returns `true` when the state changed.
    pub fn release_regions(&mut self, regions: &[RegionId]) -> bool {
        match self.state.region() {
            Some(hovered) if regions.contains(&hovered) => {
                self.state = HoverState::Idle;
                true
            }
            _ => false,
        }
    }

    pub fn handle(&mut self, input: OverlayInput) -> Option<SelectionEvent> {
        match input {
            OverlayInput::Enter { region, position } => {
                self.state = HoverState::Hovering { region, position };
                None
            }
            OverlayInput::Move { region, position } => {
                // A move without a preceding enter happens when listeners are
                // re-attached under a pointer that is already inside the region.
                self.state = HoverState::Hovering { region, position };
                None
            }
            OverlayInput::Leave { .. } => {
                self.state = HoverState::Idle;
                None
            }
            OverlayInput::Click { region } => Some(SelectionEvent { region }),
        }
    }

    pub fn tooltip(&self) -> Option<Tooltip> {
        let HoverState::Hovering { region, position } = self.state else {
            return None;
        };

        Some(Tooltip {
            region,
            anchor: position,
            value: self.dataset.get(region),
            unit: self.mode.unit_label().to_string(),
            relative_percent: self.dataset.relative_percent(region),
            absolute_percent: self.dataset.absolute_percent(region),
        })
    }
}

/// Tooltip content for the hovered region.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub region: RegionId,
    pub anchor: Point,
    pub value: f64,
    pub unit: String,
    pub relative_percent: f64,
    pub absolute_percent: f64,
}

impl Tooltip {
    pub fn title(&self) -> &'static str {
        self.region.display_name()
    }

    pub fn value_label(&self) -> String {
        format_volume(self.value, &self.unit)
    }

    pub fn relative_label(&self) -> String {
        format_percent(self.relative_percent)
    }

    pub fn absolute_label(&self) -> String {
        format_percent(self.absolute_percent)
    }

    /// Inline CSS positioning the tooltip box above-right of the anchor.
    pub fn placement_style(&self) -> String {
        format!(
            "left: {}px; top: {}px; transform: translate({}%, {}%);",
            self.anchor.x, self.anchor.y, TOOLTIP_SHIFT_X_PERCENT, TOOLTIP_SHIFT_Y_PERCENT
        )
    }
}

impl fmt::Display for Tooltip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title())?;
        writeln!(f, "{}", self.value_label())?;
        writeln!(f, "Relative Activation: {}", self.relative_label())?;
        write!(f, "Absolute Activation: {}", self.absolute_label())
    }
}

/// Receiver for binder-generated input.
pub trait OverlayTarget {
    fn dispatch(&self, input: OverlayInput);

    /// Listeners for `regions` were removed; no leave will arrive for them.
    fn regions_unbound(&self, _regions: &[RegionId]) {}
}

pub type SelectionCallback = Rc<dyn Fn(RegionId)>;
pub type ChangeCallback = Rc<dyn Fn()>;

/// Controller shared between listeners and the view that renders it.
pub struct SharedOverlay {
    controller: RefCell<OverlayController>,
    on_select: RefCell<Option<SelectionCallback>>,
    on_change: RefCell<Option<ChangeCallback>>,
}

impl SharedOverlay {
    pub fn new(controller: OverlayController) -> Rc<Self> {
        Rc::new(Self {
            controller: RefCell::new(controller),
            on_select: RefCell::new(None),
            on_change: RefCell::new(None),
        })
    }

    pub fn controller(&self) -> Ref<'_, OverlayController> {
        self.controller.borrow()
    }

    pub fn tooltip(&self) -> Option<Tooltip> {
        self.controller.borrow().tooltip()
    }

    pub fn state(&self) -> HoverState {
        self.controller.borrow().state()
    }

    pub fn replace_dataset(&self, dataset: ActivationDataset) {
        self.controller.borrow_mut().replace_dataset(dataset);
    }

    pub fn set_mode(&self, mode: VolumeMode) {
        self.controller.borrow_mut().set_mode(mode);
    }

    pub fn reset(&self) {
        self.controller.borrow_mut().reset();
    }

    pub fn set_on_select(&self, callback: Option<SelectionCallback>) {
        *self.on_select.borrow_mut() = callback;
    }

    /// Hook invoked after every hover state change (used to schedule a re-render).
    pub fn set_on_change(&self, callback: Option<ChangeCallback>) {
        *self.on_change.borrow_mut() = callback;
    }
}

impl OverlayTarget for SharedOverlay {
    fn dispatch(&self, input: OverlayInput) {
        let (changed, selection) = {
            let mut controller = self.controller.borrow_mut();
            let before = controller.state();
            let selection = controller.handle(input);
            (controller.state() != before, selection)
        };

        // Callbacks run with the controller released so they may query it again.
        if let Some(SelectionEvent { region }) = selection {
            tracing::debug!(region = %region, "muscle region selected");
            let callback = self.on_select.borrow().clone();
            if let Some(callback) = callback {
                callback(region);
            }
        }

        if changed {
            self.notify_change();
        }
    }

    fn regions_unbound(&self, regions: &[RegionId]) {
        let changed = self.controller.borrow_mut().release_regions(regions);
        if changed {
            tracing::debug!(?regions, "hovered region unbound; hover cleared");
            self.notify_change();
        }
    }
}

impl SharedOverlay {
    fn notify_change(&self) {
        let callback = self.on_change.borrow().clone();
        if let Some(callback) = callback {
            callback();
        }
    }
}
