//! Platform-independent muscle map logic: data, colors, binding and hover state.

pub mod activation;
pub mod binder;
pub mod format;
pub mod geometry;
pub mod legend;
pub mod outline;
pub mod overlay;
pub mod ramp;
pub mod region;
pub mod snapshot;
pub mod surface;

pub use activation::{ActivationDataset, ActivationInput, VolumeMode, VolumeType};
pub use binder::RegionBinder;
pub use outline::{BodyOutline, OutlineSurface};
pub use overlay::{HoverState, OverlayController, OverlayInput, SharedOverlay, Tooltip};
pub use ramp::{color_for, Rgba};
pub use region::RegionId;
