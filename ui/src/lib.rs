//! Shared UI crate for Muscle Map. The activation model and every view live here.

pub mod core;
pub mod i18n;
pub mod muscle_map;
pub mod views;

pub mod components {
    // Localized application navbar (components/app_navbar.rs)
    pub mod app_navbar;
    pub use app_navbar::register_nav;
    pub use app_navbar::AppNavbar;
    pub use app_navbar::NavBuilder;
}

pub use muscle_map::{MuscleLegend, MuscleMap, SnapshotPanel, TooltipCard};
