mod view;
pub use view::MuscleMap;

mod tooltip;
pub use tooltip::TooltipCard;

mod legend;
pub use legend::MuscleLegend;

mod export;
pub use export::SnapshotPanel;
