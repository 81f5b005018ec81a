//! Configuration surface of the field.
//!
//! [`OtpFieldStyle`] gathers every externally settable property. It is built
//! once through [`OtpFieldStyleBuilder`] and afterwards mutated only through
//! the setters on [`crate::field::OtpField`], which re-validate the corner
//! radius invariant before applying anything.

use derive_builder::Builder;
use thiserror::Error;

use crate::{color::Color, dp::Dp};

/// How each segment outlines itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewStyle {
    /// A full rounded-rectangle border around every segment.
    #[default]
    Rectangle,
    /// Only a thin bar along the bottom edge of every segment.
    Underline,
    /// No border or line at all; backgrounds, cursor and content still draw.
    None,
}

/// The kind of content the host's input channel feeds the field.
///
/// Drives the masking precedence in the render pipeline: numeric and secret
/// inputs honor a configured masking character, secret inputs without one
/// fall back to a filled dot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputKind {
    #[default]
    Text,
    Number,
    SecretText,
    SecretNumber,
}

impl InputKind {
    pub fn is_numeric(self) -> bool {
        matches!(self, InputKind::Number | InputKind::SecretNumber)
    }

    pub fn is_secret(self) -> bool {
        matches!(self, InputKind::SecretText | InputKind::SecretNumber)
    }
}

/// Border/line colors per interaction state.
///
/// `selected` and `focused` are optional; absent entries fall back to
/// `normal`, so a plain single-color configuration is just
/// [`LineColors::uniform`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineColors {
    pub normal: Color,
    pub selected: Option<Color>,
    pub focused: Option<Color>,
}

impl LineColors {
    /// A single color for every interaction state.
    pub const fn uniform(color: Color) -> Self {
        Self {
            normal: color,
            selected: None,
            focused: None,
        }
    }

    /// Resolves the color for one segment's border.
    ///
    /// `selected` refers to the segment being the next to fill; `focused` to
    /// the widget holding input focus.
    pub fn resolve(&self, selected: bool, focused: bool) -> Color {
        if selected {
            self.selected.or(self.focused).unwrap_or(self.normal)
        } else if focused {
            self.focused.unwrap_or(self.normal)
        } else {
            self.normal
        }
    }

    /// The color used by the highlight pass over the next-to-fill segment.
    pub fn selected_color(&self) -> Color {
        self.selected.or(self.focused).unwrap_or(self.normal)
    }
}

impl Default for LineColors {
    fn default() -> Self {
        Self::uniform(Color::GRAY)
    }
}

/// A configuration mutation that the field rejected.
///
/// Raised synchronously by the violating setter (or by
/// [`OtpFieldStyle::validate`] at construction); the field's prior valid
/// state stays in effect.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error(
        "item radius ({radius} dp) must not exceed half the line width ({line_width} dp) for underline style"
    )]
    RadiusExceedsHalfLineWidth { radius: f64, line_width: f64 },

    #[error(
        "item radius ({radius} dp) must not exceed half the item width ({item_width} dp) for rectangle style"
    )]
    RadiusExceedsHalfItemWidth { radius: f64, item_width: f64 },

    #[error("item count must be at least 1")]
    ZeroItemCount,
}

/// Every externally settable property of the field.
///
/// Dimensions are in [`Dp`]; the RTL flag is construction-only (there is no
/// runtime setter on `OtpField`).
#[derive(Builder, Clone, Debug, PartialEq)]
#[builder(pattern = "owned")]
pub struct OtpFieldStyle {
    /// Segment outline style.
    #[builder(default)]
    pub view_style: ViewStyle,
    /// Number of segments; one character slot each.
    #[builder(default = "4")]
    pub item_count: usize,
    /// Width of a single segment.
    #[builder(default = "Dp(48.0)")]
    pub item_width: Dp,
    /// Height of a single segment.
    #[builder(default = "Dp(48.0)")]
    pub item_height: Dp,
    /// Gap between adjacent segments. Zero collapses adjacent borders into a
    /// single shared line.
    #[builder(default = "Dp(8.0)")]
    pub item_spacing: Dp,
    /// Corner radius of the segment outline (or of the underline bar).
    #[builder(default = "Dp::ZERO")]
    pub item_radius: Dp,
    /// Stroke width of the border or underline.
    #[builder(default = "Dp(2.0)")]
    pub line_width: Dp,
    /// Border/line colors per interaction state.
    #[builder(default)]
    pub line_colors: LineColors,
    /// Whether the blinking cursor is shown in the next-to-fill segment.
    #[builder(default = "true")]
    pub cursor_visible: bool,
    /// Stroke width of the cursor line.
    #[builder(default = "Dp(2.0)")]
    pub cursor_width: Dp,
    /// Cursor color; falls back to the glyph color when unset.
    #[builder(default, setter(strip_option))]
    pub cursor_color: Option<Color>,
    /// Color of rendered glyphs, masking characters and secret dots.
    #[builder(default = "Color::BLACK")]
    pub text_color: Color,
    /// Substitute glyph drawn in place of entered characters, for privacy.
    #[builder(default, setter(strip_option))]
    pub mask_char: Option<char>,
    /// Kind of content the host feeds in; drives masking precedence.
    #[builder(default)]
    pub input_kind: InputKind,
    /// Placeholder shown in empty segments. Only honored when its grapheme
    /// length equals `item_count`.
    #[builder(default, setter(strip_option, into))]
    pub placeholder: Option<String>,
    /// Right-to-left layout: fill order and content placement mirror.
    /// Immutable after construction.
    #[builder(default = "false")]
    pub rtl: bool,
    /// Skip drawing the border of segments that already hold a character.
    #[builder(default = "false")]
    pub hide_line_when_filled: bool,
    /// Enable the one-shot enter animation on newly filled segments.
    #[builder(default = "false")]
    pub animation_enabled: bool,
    /// Background color applied to every segment regardless of state.
    #[builder(default, setter(strip_option))]
    pub item_background: Option<Color>,
    /// Background for segments that hold a character; falls back to
    /// `item_background`.
    #[builder(default, setter(strip_option))]
    pub item_background_filled: Option<Color>,
    /// Background for empty and selected segments; falls back to
    /// `item_background`.
    #[builder(default, setter(strip_option))]
    pub item_background_unfilled: Option<Color>,
}

impl Default for OtpFieldStyle {
    fn default() -> Self {
        OtpFieldStyleBuilder::default()
            .build()
            .expect("OtpFieldStyleBuilder default build should succeed")
    }
}

impl OtpFieldStyle {
    /// Checks the configuration invariants.
    ///
    /// The corner radius must not exceed half the line width (underline
    /// style) or half the item width (rectangle style). Run at construction
    /// and re-run by every setter that touches radius, line width, item
    /// width or view style.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.item_count == 0 {
            return Err(ConfigError::ZeroItemCount);
        }
        match self.view_style {
            ViewStyle::Underline if self.item_radius.0 > self.line_width.0 / 2.0 => {
                Err(ConfigError::RadiusExceedsHalfLineWidth {
                    radius: self.item_radius.0,
                    line_width: self.line_width.0,
                })
            }
            ViewStyle::Rectangle if self.item_radius.0 > self.item_width.0 / 2.0 => {
                Err(ConfigError::RadiusExceedsHalfItemWidth {
                    radius: self.item_radius.0,
                    item_width: self.item_width.0,
                })
            }
            _ => Ok(()),
        }
    }

    /// The background color for one segment, by fill state.
    ///
    /// Falls back from the state-specific color to the base background; a
    /// fully unset background means the segment paints nothing.
    pub fn background_for(&self, filled: bool) -> Option<Color> {
        let state_color = if filled {
            self.item_background_filled
        } else {
            self.item_background_unfilled
        };
        state_color.or(self.item_background)
    }

    /// The placeholder, when its grapheme length matches the item count.
    pub(crate) fn effective_placeholder(&self) -> Option<&str> {
        use unicode_segmentation::UnicodeSegmentation;
        self.placeholder
            .as_deref()
            .filter(|p| p.graphemes(true).count() == self.item_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_style_is_valid() {
        let style = OtpFieldStyle::default();
        assert_eq!(style.item_count, 4);
        assert_eq!(style.view_style, ViewStyle::Rectangle);
        assert!(style.validate().is_ok());
    }

    #[test]
    fn underline_radius_invariant() {
        // line_width = 10: radius 6 is rejected, radius 5 is the limit.
        let style = OtpFieldStyleBuilder::default()
            .view_style(ViewStyle::Underline)
            .line_width(Dp(10.0))
            .item_radius(Dp(6.0))
            .build()
            .unwrap();
        assert_eq!(
            style.validate(),
            Err(ConfigError::RadiusExceedsHalfLineWidth {
                radius: 6.0,
                line_width: 10.0,
            })
        );

        let style = OtpFieldStyleBuilder::default()
            .view_style(ViewStyle::Underline)
            .line_width(Dp(10.0))
            .item_radius(Dp(5.0))
            .build()
            .unwrap();
        assert!(style.validate().is_ok());
    }

    #[test]
    fn rectangle_radius_invariant() {
        let style = OtpFieldStyleBuilder::default()
            .item_width(Dp(40.0))
            .item_radius(Dp(21.0))
            .build()
            .unwrap();
        assert_eq!(
            style.validate(),
            Err(ConfigError::RadiusExceedsHalfItemWidth {
                radius: 21.0,
                item_width: 40.0,
            })
        );
    }

    #[test]
    fn zero_item_count_rejected() {
        let style = OtpFieldStyleBuilder::default()
            .item_count(0)
            .build()
            .unwrap();
        assert_eq!(style.validate(), Err(ConfigError::ZeroItemCount));
    }

    #[test]
    fn line_colors_fall_back_to_normal() {
        let colors = LineColors::uniform(Color::GRAY);
        assert_eq!(colors.resolve(true, true), Color::GRAY);
        assert_eq!(colors.resolve(false, true), Color::GRAY);
        assert_eq!(colors.resolve(false, false), Color::GRAY);

        let colors = LineColors {
            normal: Color::GRAY,
            selected: Some(Color::BLACK),
            focused: Some(Color::WHITE),
        };
        assert_eq!(colors.resolve(true, true), Color::BLACK);
        assert_eq!(colors.resolve(false, true), Color::WHITE);
        assert_eq!(colors.resolve(false, false), Color::GRAY);
    }

    #[test]
    fn placeholder_requires_matching_length() {
        let style = OtpFieldStyleBuilder::default()
            .placeholder("----")
            .build()
            .unwrap();
        assert_eq!(style.effective_placeholder(), Some("----"));

        let style = OtpFieldStyleBuilder::default()
            .placeholder("---")
            .build()
            .unwrap();
        assert_eq!(style.effective_placeholder(), None);
    }

    #[test]
    fn background_fallback_chain() {
        let style = OtpFieldStyleBuilder::default()
            .item_background(Color::WHITE)
            .item_background_filled(Color::GRAY)
            .build()
            .unwrap();
        assert_eq!(style.background_for(true), Some(Color::GRAY));
        assert_eq!(style.background_for(false), Some(Color::WHITE));

        let bare = OtpFieldStyle::default();
        assert_eq!(bare.background_for(true), None);
    }
}
