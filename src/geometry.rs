//! Geometry engine.
//!
//! Computes, per segment index, the bounding rectangle, center point and the
//! (possibly partially) rounded outline path, plus the field's measured size.
//! Everything here is a pure function of the style and the host-supplied
//! content origin; nothing is cached across configuration changes.

use lyon_geom::point;
use lyon_path::Path;

use crate::config::OtpFieldStyle;

/// A segment's bounding rectangle in physical pixels.
///
/// Edges are inset by half the stroke width so the border stroke stays inside
/// the segment's allotted cell.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SegmentRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl SegmentRect {
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center(&self) -> (f32, f32) {
        (
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }
}

/// Which corners of a segment outline are rounded.
///
/// Each corner is flagged independently; unflagged corners stay perfectly
/// square even when the radius is nonzero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CornerFlags {
    pub top_left: bool,
    pub top_right: bool,
    pub bottom_right: bool,
    pub bottom_left: bool,
}

impl CornerFlags {
    pub const ALL: Self = Self {
        top_left: true,
        top_right: true,
        bottom_right: true,
        bottom_left: true,
    };

    pub const NONE: Self = Self {
        top_left: false,
        top_right: false,
        bottom_right: false,
        bottom_left: false,
    };

    /// Only the two left-side corners.
    pub const LEFT: Self = Self {
        top_left: true,
        bottom_left: true,
        top_right: false,
        bottom_right: false,
    };

    /// Only the two right-side corners.
    pub const RIGHT: Self = Self {
        top_left: false,
        bottom_left: false,
        top_right: true,
        bottom_right: true,
    };
}

/// Geometry derived for one segment on one draw pass.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SegmentGeometry {
    pub rect: SegmentRect,
    pub center: (f32, f32),
}

/// Origin of the segment row: the host's scroll plus padding offsets, in
/// physical pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ContentOrigin {
    pub x: f32,
    pub y: f32,
}

/// Computes the bounding rectangle and center of segment `index`.
///
/// With nonzero spacing, segments sit `spacing` apart. With zero spacing the
/// left edge is pulled back by `line_width * index` so adjacent borders
/// collapse onto a single shared line instead of doubling up at each seam.
pub fn segment_geometry(
    style: &OtpFieldStyle,
    index: usize,
    origin: ContentOrigin,
) -> SegmentGeometry {
    let item_width = style.item_width.to_pixels_f32();
    let item_height = style.item_height.to_pixels_f32();
    let spacing = style.item_spacing.to_pixels_f32();
    let stroke = style.line_width.to_pixels_f32();
    let half_stroke = stroke / 2.0;

    let mut left = origin.x + index as f32 * (spacing + item_width) + half_stroke;
    if spacing == 0.0 {
        left -= stroke * index as f32;
    }
    let right = left + item_width - stroke;
    let top = origin.y + half_stroke;
    let bottom = top + item_height - stroke;

    let rect = SegmentRect {
        left,
        top,
        right,
        bottom,
    };
    SegmentGeometry {
        center: rect.center(),
        rect,
    }
}

/// Corner rounding policy for segment `index` of `count`.
///
/// Nonzero spacing renders segments as visually separate boxes, so every
/// corner rounds. Zero spacing joins them into one continuous pill: only the
/// outer corners of the first and last segment round, middle segments round
/// none. A single-segment field under zero spacing is both first and last
/// and rounds all four corners.
pub fn corner_flags(index: usize, count: usize, spacing_is_zero: bool) -> CornerFlags {
    if !spacing_is_zero {
        return CornerFlags::ALL;
    }
    match (index == 0, index + 1 == count) {
        (true, true) => CornerFlags::ALL,
        (true, false) => CornerFlags::LEFT,
        (false, true) => CornerFlags::RIGHT,
        (false, false) => CornerFlags::NONE,
    }
}

/// Builds the outline path of a rectangle with per-corner rounding.
///
/// Walks the four edges clockwise from the top-left. A flagged corner emits a
/// quadratic curve through the corner point; an unflagged corner emits two
/// straight segments meeting exactly at the corner, so it stays square even
/// when `radius > 0`.
pub fn rounded_rect_path(rect: SegmentRect, radius: f32, corners: CornerFlags) -> Path {
    let r = radius.max(0.0);
    let tl = if corners.top_left { r } else { 0.0 };
    let tr = if corners.top_right { r } else { 0.0 };
    let br = if corners.bottom_right { r } else { 0.0 };
    let bl = if corners.bottom_left { r } else { 0.0 };

    let mut builder = Path::builder().with_svg();
    builder.move_to(point(rect.left + tl, rect.top));

    builder.line_to(point(rect.right - tr, rect.top));
    if tr > 0.0 {
        builder.quadratic_bezier_to(point(rect.right, rect.top), point(rect.right, rect.top + tr));
    } else {
        builder.line_to(point(rect.right, rect.top));
    }

    builder.line_to(point(rect.right, rect.bottom - br));
    if br > 0.0 {
        builder.quadratic_bezier_to(
            point(rect.right, rect.bottom),
            point(rect.right - br, rect.bottom),
        );
    } else {
        builder.line_to(point(rect.right, rect.bottom));
    }

    builder.line_to(point(rect.left + bl, rect.bottom));
    if bl > 0.0 {
        builder.quadratic_bezier_to(
            point(rect.left, rect.bottom),
            point(rect.left, rect.bottom - bl),
        );
    } else {
        builder.line_to(point(rect.left, rect.bottom));
    }

    builder.line_to(point(rect.left, rect.top + tl));
    if tl > 0.0 {
        builder.quadratic_bezier_to(point(rect.left, rect.top), point(rect.left + tl, rect.top));
    } else {
        builder.line_to(point(rect.left, rect.top));
    }

    builder.close();
    builder.build()
}

/// The underline bar for one segment: a thin rectangle centered on the
/// segment's bottom edge, spanning the full item width.
pub fn underline_bar(rect: SegmentRect, line_width: f32) -> SegmentRect {
    let half = line_width / 2.0;
    SegmentRect {
        left: rect.left - half,
        top: rect.bottom - half,
        right: rect.right + half,
        bottom: rect.bottom + half,
    }
}

/// Host size constraint for one axis of [`measure`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MeasureSpec {
    /// The host dictates this exact size in physical pixels.
    Exactly(f32),
    /// The field chooses its natural size.
    Unspecified,
}

/// Measures the field, in physical pixels.
///
/// Natural width is `count * item_width + (count - 1) * spacing`, minus the
/// collapsed shared borders when spacing is zero, plus horizontal padding;
/// natural height is `item_height` plus vertical padding. Exact host
/// constraints override either axis.
pub fn measure(
    style: &OtpFieldStyle,
    width_spec: MeasureSpec,
    height_spec: MeasureSpec,
    h_padding: f32,
    v_padding: f32,
) -> (f32, f32) {
    let width = match width_spec {
        MeasureSpec::Exactly(w) => w,
        MeasureSpec::Unspecified => {
            let count = style.item_count as f32;
            let item_width = style.item_width.to_pixels_f32();
            let spacing = style.item_spacing.to_pixels_f32();
            let mut width = count * item_width + (count - 1.0) * spacing;
            if spacing == 0.0 {
                width -= (count - 1.0) * style.line_width.to_pixels_f32();
            }
            width + h_padding
        }
    };
    let height = match height_spec {
        MeasureSpec::Exactly(h) => h,
        MeasureSpec::Unspecified => style.item_height.to_pixels_f32() + v_padding,
    };
    (width, height)
}
