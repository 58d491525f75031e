//! Legend swatches sampled from the same ramp as the region fills.

use super::activation::VolumeMode;
use super::format::format_number;
use super::ramp::{color_for, Rgba};

/// Percent-of-max levels shown in the legend, strongest first.
pub const LEGEND_LEVELS: [f64; 5] = [100.0, 75.0, 50.0, 25.0, 10.0];

#[derive(Debug, Clone, PartialEq)]
pub struct LegendSwatch {
    pub level: f64,
    pub value: f64,
    pub label: String,
    pub color: Rgba,
}

pub fn legend_swatches(max: f64, mode: &VolumeMode) -> Vec<LegendSwatch> {
    LEGEND_LEVELS
        .iter()
        .map(|&level| {
            let value = max * level / 100.0;
            let label = format!(
                "{} {}",
                format_number(value, mode.legend_decimals()),
                mode.unit_label()
            );
            LegendSwatch {
                level,
                value,
                label,
                color: color_for(value, max).clamped(),
            }
        })
        .collect()
}
