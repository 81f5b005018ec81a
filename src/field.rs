//! The field itself.
//!
//! [`OtpField`] owns the entered text, focus state, configuration, blink
//! timer and completion callback, and exposes the event surface a host
//! toolkit binding adapts to its native widget base: content, focus and
//! selection changes, window attach/detach, screen on/off, measurement and
//! drawing.
//!
//! All methods run on the host UI thread. Methods that (re)arm the blink
//! cycle return the deadline the host must schedule an
//! [`OtpField::on_blink_fire`] call for; configuration setters return an
//! [`Invalidation`] telling the host whether to coalesce a re-layout or just
//! repaint.

use std::{sync::Arc, time::Instant};

use tracing::{debug, warn};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    animation::EnterAnimation,
    blink::{BlinkPhase, BlinkTimer},
    color::Color,
    config::{ConfigError, InputKind, LineColors, OtpFieldStyle, ViewStyle},
    dp::Dp,
    geometry::{ContentOrigin, MeasureSpec, measure},
    render::{FrameInput, RenderScratch, render},
    surface::DrawSurface,
};

/// Callback invoked with the full text once it reaches the item count.
pub type CompletionListener = Arc<dyn Fn(&str) + Send + Sync>;

/// What a configuration mutation requires from the host.
///
/// Layout-affecting setters never repaint synchronously; the host coalesces
/// the re-layout request through its own queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Invalidation {
    /// Nothing visible changed.
    None,
    /// Repaint with the existing layout.
    Paint,
    /// Re-measure and re-layout, then repaint.
    Layout,
}

/// The rendering and input-state core of a segmented OTP entry widget.
pub struct OtpField {
    style: OtpFieldStyle,
    text: String,
    /// `text` split into grapheme cells; one cell per segment slot.
    cells: Vec<String>,
    focused: bool,
    blink: BlinkTimer,
    enter_anim: Option<EnterAnimation>,
    on_complete: Option<CompletionListener>,
    scratch: RenderScratch,
}

impl OtpField {
    /// Creates a field from a validated style.
    ///
    /// Construction-time misconfiguration (corner radius invariant, zero
    /// item count) fails fast here.
    pub fn new(style: OtpFieldStyle) -> Result<Self, ConfigError> {
        style.validate()?;
        Ok(Self {
            style,
            text: String::new(),
            cells: Vec::new(),
            focused: false,
            blink: BlinkTimer::new(),
            enter_anim: None,
            on_complete: None,
            scratch: RenderScratch::default(),
        })
    }

    /// Registers the completion callback. `None` unregisters; an absent
    /// listener means completion is silently skipped.
    pub fn set_completion_listener(&mut self, listener: Option<CompletionListener>) {
        self.on_complete = listener;
    }

    pub fn style(&self) -> &OtpFieldStyle {
        &self.style
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Current text length in grapheme cells.
    pub fn text_len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Maximum accepted text length, for the host's input-length filter.
    pub fn max_length(&self) -> usize {
        self.style.item_count
    }

    pub fn blink_phase(&self) -> BlinkPhase {
        self.blink.phase()
    }

    // --- Inbound host events ---

    /// Handles a text-content change from the host's input channel.
    ///
    /// Fires the completion callback on every change event where the new
    /// length equals the item count, restarts the enter animation on net
    /// additions, and re-arms the blink cycle. Returns the blink deadline to
    /// schedule, if any.
    pub fn on_content_changed(&mut self, new_text: &str, now: Instant) -> Option<Instant> {
        let old_len = self.cells.len();
        self.text = new_text.to_owned();
        self.cells = new_text.graphemes(true).map(str::to_owned).collect();
        let len = self.cells.len();

        if len > self.style.item_count {
            // The host's input filter should have capped this; render as
            // fully filled instead of indexing out of range.
            warn!(
                len,
                item_count = self.style.item_count,
                "entered text exceeds item count"
            );
        }

        if len > old_len && self.style.animation_enabled {
            if let Some(target) =
                crate::state::newest_filled_index(len, self.style.item_count, self.style.rtl)
            {
                self.enter_anim = Some(EnterAnimation::start(target, now));
            }
        }

        if len == self.style.item_count {
            debug!(len, "otp complete");
            if let Some(listener) = &self.on_complete {
                listener(&self.text);
            }
        }

        self.blink.make_blink(now, self.blink_eligible())
    }

    /// Handles a focus change. Returns the blink deadline to schedule.
    pub fn on_focus_changed(&mut self, focused: bool, now: Instant) -> Option<Instant> {
        self.focused = focused;
        self.blink.make_blink(now, self.blink_eligible())
    }

    /// Handles a selection change reported by the host.
    ///
    /// The field supports no mid-text cursor placement: whenever the
    /// reported selection is not already at the end of the text, the host
    /// must move it there. Returns the forced end-of-text position, or
    /// `None` when the selection is already correct.
    pub fn on_selection_changed(&mut self, _start: usize, end: usize) -> Option<usize> {
        let len = self.cells.len();
        (end != len).then_some(len)
    }

    /// Handles attachment to a window. Resumes the blink cycle; returns the
    /// deadline to schedule.
    pub fn on_attached_to_window(&mut self, now: Instant) -> Option<Instant> {
        self.blink.resume(now, self.blink_eligible())
    }

    /// Handles detachment from the window. Suspends the blink cycle.
    pub fn on_detached_from_window(&mut self) {
        self.blink.suspend();
    }

    /// Handles the screen turning on or off.
    pub fn on_screen_state_changed(&mut self, screen_on: bool, now: Instant) -> Option<Instant> {
        if screen_on {
            self.blink.resume(now, self.blink_eligible())
        } else {
            self.blink.suspend();
            None
        }
    }

    /// Handles one scheduled blink toggle. Returns the next deadline; `None`
    /// once the cycle stops (cancelled or no longer eligible).
    pub fn on_blink_fire(&mut self, now: Instant) -> Option<Instant> {
        self.blink.fire(now, self.blink_eligible())
    }

    /// Re-arms the blink cycle against the current configuration.
    ///
    /// Call after setters that change blink eligibility (for example
    /// [`OtpField::set_cursor_visible`]).
    pub fn refresh_blink(&mut self, now: Instant) -> Option<Instant> {
        self.blink.make_blink(now, self.blink_eligible())
    }

    /// Measures the field under the host's constraints, in physical pixels.
    pub fn measure(
        &self,
        width_spec: MeasureSpec,
        height_spec: MeasureSpec,
        h_padding: f32,
        v_padding: f32,
    ) -> (f32, f32) {
        measure(&self.style, width_spec, height_spec, h_padding, v_padding)
    }

    /// Draws the field onto the host surface.
    ///
    /// `origin` is the host's scroll-plus-padding offset of the segment row;
    /// `now` drives the enter animation sampling.
    pub fn draw(&mut self, surface: &mut dyn DrawSurface, origin: ContentOrigin, now: Instant) {
        let input = FrameInput {
            style: &self.style,
            cells: &self.cells,
            focused: self.focused,
            cursor_on: self.blink.cursor_visible(),
            enter_anim: self.enter_anim,
            origin,
            now,
        };
        render(&input, &mut self.scratch, surface);
    }

    fn blink_eligible(&self) -> bool {
        self.style.cursor_visible && self.focused
    }

    // --- Configuration setters ---

    /// Applies a mutation only if the resulting style still validates; on
    /// rejection the prior valid state stays in effect untouched.
    fn try_update(
        &mut self,
        mutate: impl FnOnce(&mut OtpFieldStyle),
        invalidation: Invalidation,
    ) -> Result<Invalidation, ConfigError> {
        let mut candidate = self.style.clone();
        mutate(&mut candidate);
        candidate.validate()?;
        self.style = candidate;
        Ok(invalidation)
    }

    pub fn set_view_style(&mut self, view_style: ViewStyle) -> Result<Invalidation, ConfigError> {
        self.try_update(|s| s.view_style = view_style, Invalidation::Paint)
    }

    pub fn set_item_count(&mut self, item_count: usize) -> Result<Invalidation, ConfigError> {
        self.try_update(|s| s.item_count = item_count, Invalidation::Layout)
    }

    pub fn set_item_width(&mut self, item_width: Dp) -> Result<Invalidation, ConfigError> {
        self.try_update(|s| s.item_width = item_width, Invalidation::Layout)
    }

    pub fn set_item_height(&mut self, item_height: Dp) -> Invalidation {
        self.style.item_height = item_height;
        Invalidation::Layout
    }

    pub fn set_item_spacing(&mut self, item_spacing: Dp) -> Invalidation {
        self.style.item_spacing = item_spacing;
        Invalidation::Layout
    }

    pub fn set_item_radius(&mut self, item_radius: Dp) -> Result<Invalidation, ConfigError> {
        self.try_update(|s| s.item_radius = item_radius, Invalidation::Paint)
    }

    /// Line width affects measured width under zero spacing, so this always
    /// requests a re-layout.
    pub fn set_line_width(&mut self, line_width: Dp) -> Result<Invalidation, ConfigError> {
        self.try_update(|s| s.line_width = line_width, Invalidation::Layout)
    }

    pub fn set_line_colors(&mut self, line_colors: LineColors) -> Invalidation {
        self.style.line_colors = line_colors;
        Invalidation::Paint
    }

    /// Convenience for the single-color case.
    pub fn set_line_color(&mut self, color: Color) -> Invalidation {
        self.set_line_colors(LineColors::uniform(color))
    }

    /// Toggles the cursor. Blink eligibility changes take effect on the next
    /// fire; call [`OtpField::refresh_blink`] to re-arm immediately.
    pub fn set_cursor_visible(&mut self, cursor_visible: bool) -> Invalidation {
        self.style.cursor_visible = cursor_visible;
        Invalidation::Paint
    }

    pub fn set_cursor_width(&mut self, cursor_width: Dp) -> Invalidation {
        self.style.cursor_width = cursor_width;
        Invalidation::Paint
    }

    pub fn set_cursor_color(&mut self, cursor_color: Option<Color>) -> Invalidation {
        self.style.cursor_color = cursor_color;
        Invalidation::Paint
    }

    pub fn set_text_color(&mut self, text_color: Color) -> Invalidation {
        self.style.text_color = text_color;
        Invalidation::Paint
    }

    pub fn set_mask_char(&mut self, mask_char: Option<char>) -> Invalidation {
        self.style.mask_char = mask_char;
        Invalidation::Paint
    }

    pub fn set_input_kind(&mut self, input_kind: InputKind) -> Invalidation {
        self.style.input_kind = input_kind;
        Invalidation::Paint
    }

    pub fn set_placeholder(&mut self, placeholder: Option<String>) -> Invalidation {
        self.style.placeholder = placeholder;
        Invalidation::Paint
    }

    pub fn set_hide_line_when_filled(&mut self, hide: bool) -> Invalidation {
        self.style.hide_line_when_filled = hide;
        Invalidation::Paint
    }

    pub fn set_animation_enabled(&mut self, enabled: bool) -> Invalidation {
        self.style.animation_enabled = enabled;
        if !enabled {
            self.enter_anim = None;
        }
        Invalidation::None
    }

    pub fn set_item_background(&mut self, color: Option<Color>) -> Invalidation {
        self.style.item_background = color;
        Invalidation::Paint
    }

    pub fn set_item_background_filled(&mut self, color: Option<Color>) -> Invalidation {
        self.style.item_background_filled = color;
        Invalidation::Paint
    }

    pub fn set_item_background_unfilled(&mut self, color: Option<Color>) -> Invalidation {
        self.style.item_background_unfilled = color;
        Invalidation::Paint
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use parking_lot::Mutex;

    use super::*;
    use crate::config::OtpFieldStyleBuilder;

    fn field(count: usize) -> OtpField {
        OtpField::new(
            OtpFieldStyleBuilder::default()
                .item_count(count)
                .build()
                .unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn completion_fires_exactly_once_on_reaching_full_length() {
        let mut field = field(6);
        let fired = Arc::new(AtomicUsize::new(0));
        let last: Arc<Mutex<String>> = Arc::default();
        {
            let fired = fired.clone();
            let last = last.clone();
            field.set_completion_listener(Some(Arc::new(move |text| {
                fired.fetch_add(1, Ordering::SeqCst);
                *last.lock() = text.to_owned();
            })));
        }

        let now = Instant::now();
        let mut entered = String::new();
        for ch in "123456".chars() {
            entered.push(ch);
            field.on_content_changed(&entered, now);
        }
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert_eq!(*last.lock(), "123456");

        // Deleting below full length and refilling fires again.
        field.on_content_changed("12345", now);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        field.on_content_changed("123450", now);
        assert_eq!(fired.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn completion_skipped_without_listener() {
        let mut field = field(4);
        field.on_content_changed("1234", Instant::now());
        assert_eq!(field.text(), "1234");
    }

    #[test]
    fn selection_is_forced_to_end_of_text() {
        let mut field = field(4);
        field.on_content_changed("12", Instant::now());
        assert_eq!(field.on_selection_changed(0, 1), Some(2));
        assert_eq!(field.on_selection_changed(2, 2), None);
        assert_eq!(field.on_selection_changed(0, 2), None);
    }

    #[test]
    fn rejected_setter_retains_prior_state() {
        let mut field = OtpField::new(
            OtpFieldStyleBuilder::default()
                .view_style(ViewStyle::Underline)
                .line_width(Dp(10.0))
                .item_radius(Dp(5.0))
                .build()
                .unwrap(),
        )
        .unwrap();

        let err = field.set_item_radius(Dp(6.0)).unwrap_err();
        assert!(matches!(err, ConfigError::RadiusExceedsHalfLineWidth { .. }));
        assert_eq!(field.style().item_radius, Dp(5.0));

        // Shrinking the line width below twice the radius is also rejected.
        assert!(field.set_line_width(Dp(9.0)).is_err());
        assert_eq!(field.style().line_width, Dp(10.0));
    }

    #[test]
    fn construction_rejects_invalid_style() {
        let style = OtpFieldStyleBuilder::default()
            .view_style(ViewStyle::Underline)
            .line_width(Dp(10.0))
            .item_radius(Dp(6.0))
            .build()
            .unwrap();
        assert!(OtpField::new(style).is_err());
    }

    #[test]
    fn setter_invalidation_classes() {
        let mut field = field(4);
        assert_eq!(field.set_item_width(Dp(40.0)).unwrap(), Invalidation::Layout);
        assert_eq!(field.set_item_spacing(Dp(0.0)), Invalidation::Layout);
        assert_eq!(field.set_line_width(Dp(3.0)).unwrap(), Invalidation::Layout);
        assert_eq!(field.set_item_radius(Dp(4.0)).unwrap(), Invalidation::Paint);
        assert_eq!(field.set_line_color(Color::BLACK), Invalidation::Paint);
        assert_eq!(field.set_mask_char(Some('*')), Invalidation::Paint);
        assert_eq!(field.set_animation_enabled(true), Invalidation::None);
    }

    #[test]
    fn blink_lifecycle_follows_focus_and_attachment() {
        let mut field = field(4);
        let now = Instant::now();
        assert_eq!(field.blink_phase(), BlinkPhase::Stopped);

        let deadline = field.on_focus_changed(true, now).unwrap();
        assert_eq!(field.blink_phase(), BlinkPhase::RunningHidden);

        let next = field.on_blink_fire(deadline).unwrap();
        assert_eq!(field.blink_phase(), BlinkPhase::RunningVisible);

        field.on_detached_from_window();
        assert_eq!(field.blink_phase(), BlinkPhase::RunningHidden);
        // The stale toggle queued before the detach is a no-op.
        assert_eq!(field.on_blink_fire(next), None);

        let deadline = field.on_attached_to_window(next).unwrap();
        assert!(field.on_blink_fire(deadline).is_some());
        assert_eq!(field.blink_phase(), BlinkPhase::RunningVisible);
    }

    #[test]
    fn blink_never_starts_unfocused_or_with_cursor_disabled() {
        let mut field = field(4);
        let now = Instant::now();
        assert_eq!(field.on_content_changed("1", now), None);

        field.set_cursor_visible(false);
        assert_eq!(field.on_focus_changed(true, now), None);
        assert_eq!(field.blink_phase(), BlinkPhase::Stopped);

        field.set_cursor_visible(true);
        assert!(field.refresh_blink(now).is_some());
    }

    #[test]
    fn measured_size_matches_configuration() {
        let field = OtpField::new(
            OtpFieldStyleBuilder::default()
                .item_count(6)
                .item_width(Dp(40.0))
                .item_spacing(Dp(8.0))
                .build()
                .unwrap(),
        )
        .unwrap();
        let (w, _) = field.measure(
            MeasureSpec::Unspecified,
            MeasureSpec::Unspecified,
            0.0,
            0.0,
        );
        assert_eq!(w, 280.0);
    }

    #[test]
    fn overlength_text_is_kept_but_clamped_for_reads() {
        let mut field = field(4);
        field.on_content_changed("123456", Instant::now());
        assert_eq!(field.text(), "123456");
        assert_eq!(field.text_len(), 6);
        assert_eq!(field.max_length(), 4);
    }
}
