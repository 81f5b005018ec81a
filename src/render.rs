//! Render pipeline.
//!
//! Orchestrates the geometry engine, segment state model, blink state and
//! enter animation into draw calls against a [`DrawSurface`], once per draw
//! request. Pure consumption of derived state: no mutation besides the
//! reusable scratch arena, no I/O, O(item_count) work.

use std::time::Instant;

use smallvec::SmallVec;

use crate::{
    animation::EnterAnimation,
    config::{OtpFieldStyle, ViewStyle},
    geometry::{
        ContentOrigin, CornerFlags, SegmentGeometry, corner_flags, rounded_rect_path,
        segment_geometry, underline_bar,
    },
    state::{SegmentState, content_index, next_to_fill, placeholder_index, segment_state},
    surface::{DrawSurface, GlyphPaint},
};

/// Fraction of the segment's inner height spanned by the cursor line.
const CURSOR_HEIGHT_RATIO: f32 = 0.6;

/// Fraction of the segment's inner height used as the secret-dot radius.
const SECRET_DOT_RATIO: f32 = 0.125;

/// Reusable per-instance scratch for one draw pass.
///
/// Holds the derived segment geometry so the highlight pass can revisit the
/// next-to-fill segment without recomputing; reset at the start of every
/// pass, never shared across instances.
#[derive(Debug, Default)]
pub(crate) struct RenderScratch {
    geoms: SmallVec<[SegmentGeometry; 8]>,
}

/// Everything one draw pass reads, borrowed from the field.
pub(crate) struct FrameInput<'a> {
    pub style: &'a OtpFieldStyle,
    /// Entered text split into grapheme cells.
    pub cells: &'a [String],
    pub focused: bool,
    /// Whether the blink cycle currently shows the cursor.
    pub cursor_on: bool,
    pub enter_anim: Option<EnterAnimation>,
    pub origin: ContentOrigin,
    pub now: Instant,
}

pub(crate) fn render(input: &FrameInput, scratch: &mut RenderScratch, surface: &mut dyn DrawSurface) {
    let style = input.style;
    let count = style.item_count;
    let len = input.cells.len().min(count);
    let rtl = style.rtl;
    let spacing_is_zero = style.item_spacing.to_pixels_f32() == 0.0;
    let radius = style.item_radius.to_pixels_f32();
    let stroke = style.line_width.to_pixels_f32();

    scratch.geoms.clear();

    for index in 0..count {
        let geom = segment_geometry(style, index, input.origin);
        scratch.geoms.push(geom);

        let state = segment_state(index, len, count, input.focused, rtl);
        let filled = content_index(index, len, count, rtl).is_some();
        let corners = corner_flags(index, count, spacing_is_zero);
        let outline = rounded_rect_path(geom.rect, radius, corners);

        // Background, clipped to the outline for rectangle style.
        if let Some(background) = style.background_for(filled) {
            if style.view_style == ViewStyle::Rectangle {
                surface.push_clip(&outline);
                surface.fill_path(&outline, background);
                surface.pop_clip();
            } else {
                let plain = rounded_rect_path(geom.rect, 0.0, CornerFlags::NONE);
                surface.fill_path(&plain, background);
            }
        }

        if state == SegmentState::Selected && input.cursor_on {
            draw_cursor(style, geom, surface);
        }

        match style.view_style {
            ViewStyle::Rectangle => {
                if !(style.hide_line_when_filled && filled) {
                    let color = style
                        .line_colors
                        .resolve(state == SegmentState::Selected, input.focused);
                    surface.stroke_path(&outline, color, stroke);
                }
            }
            ViewStyle::Underline => {
                if !(style.hide_line_when_filled && filled) {
                    let bar = underline_bar(geom.rect, stroke);
                    let bar_path = rounded_rect_path(bar, radius, corners);
                    let color = style
                        .line_colors
                        .resolve(state == SegmentState::Selected, input.focused);
                    surface.fill_path(&bar_path, color);
                }
            }
            ViewStyle::None => {}
        }

        draw_content(input, index, len, geom, surface);
    }

    // Highlight pass: re-stroke the active segment's border on top so its
    // emphasis survives overlapping neighbors at zero spacing.
    if input.focused && len < count && style.view_style == ViewStyle::Rectangle {
        let active = next_to_fill(len, count, rtl);
        if let Some(geom) = scratch.geoms.get(active) {
            let corners = corner_flags(active, count, spacing_is_zero);
            let outline = rounded_rect_path(geom.rect, radius, corners);
            surface.stroke_path(&outline, style.line_colors.selected_color(), stroke);
        }
    }
}

fn draw_cursor(style: &OtpFieldStyle, geom: SegmentGeometry, surface: &mut dyn DrawSurface) {
    let (cx, cy) = geom.center;
    let half = geom.rect.height() * CURSOR_HEIGHT_RATIO / 2.0;
    let color = style.cursor_color.unwrap_or(style.text_color);
    surface.draw_line(
        (cx, cy - half),
        (cx, cy + half),
        color,
        style.cursor_width.to_pixels_f32(),
    );
}

/// Draws the segment's content: an entered character (masked, dotted or
/// literal per the input kind) or its placeholder position.
fn draw_content(
    input: &FrameInput,
    index: usize,
    len: usize,
    geom: SegmentGeometry,
    surface: &mut dyn DrawSurface,
) {
    let style = input.style;
    let count = style.item_count;

    if let Some(cell) = content_index(index, len, count, style.rtl)
        .and_then(|ci| input.cells.get(ci))
    {
        let mask = style
            .mask_char
            .filter(|_| style.input_kind.is_numeric() || style.input_kind.is_secret());
        if let Some(mask) = mask {
            draw_glyph_centered(input, index, &mask.to_string(), geom, surface);
        } else if style.input_kind.is_secret() {
            let radius = geom.rect.height() * SECRET_DOT_RATIO;
            surface.fill_circle(geom.center, radius, style.text_color);
        } else {
            draw_glyph_centered(input, index, cell, geom, surface);
        }
    } else if let Some(placeholder) = style.effective_placeholder() {
        use unicode_segmentation::UnicodeSegmentation;
        let pi = placeholder_index(index, count, style.rtl);
        if let Some(glyph) = placeholder.graphemes(true).nth(pi) {
            draw_glyph_centered(input, index, glyph, geom, surface);
        }
    }
}

fn draw_glyph_centered(
    input: &FrameInput,
    index: usize,
    glyph: &str,
    geom: SegmentGeometry,
    surface: &mut dyn DrawSurface,
) {
    let bounds = surface.glyph_bounds(glyph);
    let (cx, cy) = geom.center;
    let x = cx - bounds.width / 2.0 - bounds.left;
    let y = cy + bounds.height / 2.0 - bounds.bottom;

    let mut paint = GlyphPaint::opaque(input.style.text_color);
    if let Some(tween) = input
        .enter_anim
        .and_then(|anim| anim.sample(index, input.now))
    {
        paint.scale = tween.scale;
        paint.color = paint.color.scale_alpha(tween.alpha);
    }
    surface.draw_glyph(glyph, x, y, paint);
}
