//! Activation → fill color gradient.
//!
//! Four segments keyed on the activation ratio `r = value / max * 100`:
//!
//! | ratio        | color                                   |
//! |--------------|-----------------------------------------|
//! | `r <= 5`     | flat neutral gray                       |
//! | `5 < r <= 25`| gray blending toward yellow             |
//! | `25 < r <= 75`| yellow toward orange                   |
//! | `r > 75`     | orange toward red                       |
//!
//! The breakpoints and channel formulas are shared with the legend, which samples
//! this function independently; both must produce identical fills.
//!
//! [`color_for`] returns raw channels. The gray→yellow red channel carries a 1.1
//! multiplier that can overshoot 255, so fills go through [`ColorSample::clamped`]
//! before they reach a surface.

use std::fmt;

/// Alpha shared by every segment.
pub const FILL_ALPHA: f64 = 0.8;

/// Neutral gray used at and below [`GRAY_CEILING`].
pub const NEUTRAL_GRAY: f64 = 171.0;

pub const GRAY_CEILING: f64 = 5.0;
pub const YELLOW_CEILING: f64 = 25.0;
pub const ORANGE_CEILING: f64 = 75.0;

/// Unclamped ramp output. Channels may fall outside `0..=255` for ratios outside
/// `[0, 100]` and at the top of the gray→yellow segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorSample {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub alpha: f64,
}

impl ColorSample {
    pub const fn new(r: f64, g: f64, b: f64, alpha: f64) -> Self {
        Self { r, g, b, alpha }
    }

    /// Color-application boundary: round and clamp each channel into `0..=255`.
    pub fn clamped(self) -> Rgba {
        Rgba {
            r: clamp_channel(self.r),
            g: clamp_channel(self.g),
            b: clamp_channel(self.b),
            alpha: if self.alpha.is_finite() {
                self.alpha.clamp(0.0, 1.0)
            } else {
                FILL_ALPHA
            },
        }
    }

    pub fn is_finite(&self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.alpha.is_finite()
    }
}

/// Clamped 8-bit color ready to be written into a style rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub alpha: f64,
}

impl Rgba {
    /// CSS `rgba(...)` text. Legend swatches and region fills are compared on this form.
    pub fn css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.alpha)
    }
}

/// Activation ratio in percent. Degenerate maxima and non-finite ratios map to 0.
pub fn activation_ratio(value: f64, max: f64) -> f64 {
    if max <= 0.0 {
        return 0.0;
    }
    let ratio = (value / max) * 100.0;
    if ratio.is_finite() {
        ratio
    } else {
        0.0
    }
}

/// Fill color for `value` relative to `max`.
pub fn color_for(value: f64, max: f64) -> ColorSample {
    sample_ratio(activation_ratio(value, max))
}

/// Ramp evaluated directly on a percentage.
pub fn sample_ratio(ratio: f64) -> ColorSample {
    if ratio <= GRAY_CEILING {
        ColorSample::new(NEUTRAL_GRAY, NEUTRAL_GRAY, NEUTRAL_GRAY, FILL_ALPHA)
    } else if ratio <= YELLOW_CEILING {
        let t = (ratio - GRAY_CEILING) / 20.0;
        let r = round_half_up(NEUTRAL_GRAY + t * (255.0 - NEUTRAL_GRAY)) * 1.1;
        let g = round_half_up(NEUTRAL_GRAY + t * (245.0 - NEUTRAL_GRAY) * 0.5);
        let b = round_half_up(NEUTRAL_GRAY - t * NEUTRAL_GRAY * 1.4);
        ColorSample::new(r, g, b, FILL_ALPHA)
    } else if ratio <= ORANGE_CEILING {
        let g = 155.0 - round_half_up(((ratio - 50.0) / 25.0) * (255.0 - 165.0));
        ColorSample::new(255.0, g, 0.0, FILL_ALPHA)
    } else {
        let progress = (ratio - ORANGE_CEILING) / 25.0;
        let r = 255.0 - round_half_up(progress * (255.0 - 139.0));
        let g = 165.0 - round_half_up(progress * 165.0);
        ColorSample::new(r, g, 0.0, FILL_ALPHA)
    }
}

/// Rounds halves toward positive infinity (`-2.5 → -2`, `2.5 → 3`).
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

fn clamp_channel(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    round_half_up(value.clamp(0.0, 255.0)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn channels(sample: ColorSample) -> (u8, u8, u8) {
        let rgba = sample.clamped();
        (rgba.r, rgba.g, rgba.b)
    }

    #[test]
    fn zero_activation_is_flat_gray() {
        for max in [1.0, 37.5, 10_000.0] {
            let sample = color_for(0.0, max);
            assert_eq!(sample, ColorSample::new(171.0, 171.0, 171.0, 0.8));
        }
    }

    #[test]
    fn zero_max_is_gray_without_nan() {
        for value in [0.0, 12.0, 1e9] {
            let sample = color_for(value, 0.0);
            assert!(sample.is_finite());
            assert_eq!(channels(sample), (171, 171, 171));
        }
        assert!(color_for(5.0, -3.0).is_finite());
    }

    #[test]
    fn breakpoints_use_lower_branch() {
        assert_eq!(channels(color_for(5.0, 100.0)), (171, 171, 171));

        // Top of the gray→yellow segment: R overshoots (255 * 1.1) and B goes negative.
        let at_25 = color_for(25.0, 100.0);
        assert!((at_25.r - 280.5).abs() < 1e-9);
        assert_eq!(at_25.g, 208.0);
        assert_eq!(at_25.b, -68.0);
        assert_eq!(channels(at_25), (255, 208, 0));

        let at_75 = color_for(75.0, 100.0);
        assert_eq!(at_75, ColorSample::new(255.0, 65.0, 0.0, 0.8));
    }

    #[test]
    fn gray_to_yellow_midpoint() {
        let sample = color_for(15.0, 100.0);
        assert!((sample.r - 234.3).abs() < 1e-9);
        assert_eq!(sample.g, 190.0);
        assert_eq!(sample.b, 51.0);
        assert_eq!(channels(sample), (234, 190, 51));
    }

    #[test]
    fn orange_and_red_segments() {
        assert_eq!(channels(color_for(50.0, 100.0)), (255, 155, 0));
        assert_eq!(channels(color_for(100.0, 100.0)), (139, 0, 0));
        assert_eq!(channels(color_for(87.5, 100.0)), (197, 82, 0));
    }

    #[test]
    fn overflowing_value_is_tolerated() {
        let sample = color_for(250.0, 100.0);
        assert!(sample.is_finite());
        assert!(sample.r < 0.0);
        assert_eq!(channels(sample), (0, 0, 0));
    }

    #[test]
    fn css_text_is_stable() {
        assert_eq!(color_for(0.0, 10.0).clamped().css(), "rgba(171, 171, 171, 0.8)");
        assert_eq!(color_for(50.0, 100.0).clamped().css(), "rgba(255, 155, 0, 0.8)");
    }

    #[test]
    fn half_up_rounding() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-68.4), -68.0);
    }

    proptest! {
        #[test]
        fn in_range_values_keep_alpha_and_bucket_shape(max in 0.001f64..1e6, fraction in 0.0f64..=1.0) {
            let value = max * fraction;
            let sample = color_for(value, max);
            let ratio = activation_ratio(value, max);

            prop_assert_eq!(sample.alpha, 0.8);
            prop_assert!(sample.is_finite());

            if ratio <= 5.0 {
                prop_assert_eq!((sample.r, sample.g, sample.b), (171.0, 171.0, 171.0));
            } else if ratio <= 25.0 {
                prop_assert!(sample.r >= 171.0 * 1.1);
                prop_assert!(sample.g >= 171.0 && sample.g <= 208.0);
                prop_assert!(sample.b <= 171.0);
            } else if ratio <= 75.0 {
                prop_assert_eq!(sample.r, 255.0);
                prop_assert_eq!(sample.b, 0.0);
                prop_assert!(sample.g >= 65.0 && sample.g <= 245.0);
            } else {
                prop_assert!(sample.r >= 139.0 && sample.r <= 255.0);
                prop_assert!(sample.g >= 0.0 && sample.g <= 165.0);
                prop_assert_eq!(sample.b, 0.0);
            }
        }

        #[test]
        fn degenerate_max_never_produces_nan(value in proptest::num::f64::ANY, max in -1e6f64..=0.0) {
            let sample = color_for(value, max);
            prop_assert!(sample.is_finite());
            prop_assert_eq!(sample.clamped().alpha, 0.8);
        }
    }
}
