//! The external drawing boundary.
//!
//! The render pipeline draws through [`DrawSurface`], a minimal 2D surface
//! any host toolkit binding can implement over its native canvas: path fill
//! and stroke, lines, circles, glyph runs and clipping. Glyph measurement
//! also lives here since only the host's text stack knows real font metrics.

use lyon_path::Path;

use crate::color::Color;

/// Measured ink bounds of a single glyph, relative to its draw origin.
///
/// Mirrors the usual text bounding-box convention: `left` and `bottom` are
/// offsets of the ink box from the origin, used to center the glyph on a
/// segment.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GlyphBounds {
    pub width: f32,
    pub height: f32,
    pub left: f32,
    pub bottom: f32,
}

/// Paint state for one glyph draw call.
///
/// `scale` is applied uniformly around the glyph's draw position; the enter
/// animation drives it together with the color's alpha.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphPaint {
    pub color: Color,
    pub scale: f32,
}

impl GlyphPaint {
    pub fn opaque(color: Color) -> Self {
        Self { color, scale: 1.0 }
    }
}

/// A 2D drawing surface provided by the host binding.
///
/// Calls arrive in paint order on the host UI thread; implementations must
/// not block. Clip regions nest: every `push_clip` is paired with a
/// `pop_clip` before the draw pass ends.
pub trait DrawSurface {
    fn fill_path(&mut self, path: &Path, color: Color);
    fn stroke_path(&mut self, path: &Path, color: Color, stroke_width: f32);
    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), color: Color, stroke_width: f32);
    fn fill_circle(&mut self, center: (f32, f32), radius: f32, color: Color);
    /// Draws one grapheme cluster with its origin at `(x, y)` per the
    /// bounding-box convention of [`GlyphBounds`].
    fn draw_glyph(&mut self, glyph: &str, x: f32, y: f32, paint: GlyphPaint);
    /// Measures one grapheme cluster in the surface's current font.
    fn glyph_bounds(&mut self, glyph: &str) -> GlyphBounds;
    fn push_clip(&mut self, path: &Path);
    fn pop_clip(&mut self);
}

/// A [`DrawSurface`] that records draw calls instead of rasterizing.
///
/// Intended for tests of the render pipeline and of host bindings; glyph
/// metrics are fixed so expectations stay deterministic.
pub mod recording {
    use super::*;

    /// One recorded draw call.
    #[derive(Clone, Debug, PartialEq)]
    pub enum DrawOp {
        FillPath {
            color: Color,
        },
        StrokePath {
            color: Color,
            stroke_width: f32,
        },
        Line {
            from: (f32, f32),
            to: (f32, f32),
            color: Color,
            stroke_width: f32,
        },
        Circle {
            center: (f32, f32),
            radius: f32,
            color: Color,
        },
        Glyph {
            glyph: String,
            x: f32,
            y: f32,
            color: Color,
            scale: f32,
        },
        PushClip,
        PopClip,
    }

    /// Records every draw call in order.
    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub ops: Vec<DrawOp>,
    }

    impl RecordingSurface {
        pub fn new() -> Self {
            Self::default()
        }

        /// All recorded glyph strings, in draw order.
        pub fn glyphs(&self) -> Vec<&str> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    DrawOp::Glyph { glyph, .. } => Some(glyph.as_str()),
                    _ => None,
                })
                .collect()
        }
    }

    impl DrawSurface for RecordingSurface {
        fn fill_path(&mut self, _path: &Path, color: Color) {
            self.ops.push(DrawOp::FillPath { color });
        }

        fn stroke_path(&mut self, _path: &Path, color: Color, stroke_width: f32) {
            self.ops.push(DrawOp::StrokePath {
                color,
                stroke_width,
            });
        }

        fn draw_line(
            &mut self,
            from: (f32, f32),
            to: (f32, f32),
            color: Color,
            stroke_width: f32,
        ) {
            self.ops.push(DrawOp::Line {
                from,
                to,
                color,
                stroke_width,
            });
        }

        fn fill_circle(&mut self, center: (f32, f32), radius: f32, color: Color) {
            self.ops.push(DrawOp::Circle {
                center,
                radius,
                color,
            });
        }

        fn draw_glyph(&mut self, glyph: &str, x: f32, y: f32, paint: GlyphPaint) {
            self.ops.push(DrawOp::Glyph {
                glyph: glyph.to_owned(),
                x,
                y,
                color: paint.color,
                scale: paint.scale,
            });
        }

        fn glyph_bounds(&mut self, _glyph: &str) -> GlyphBounds {
            // Fixed metrics keep test expectations deterministic.
            GlyphBounds {
                width: 10.0,
                height: 14.0,
                left: 1.0,
                bottom: 2.0,
            }
        }

        fn push_clip(&mut self, _path: &Path) {
            self.ops.push(DrawOp::PushClip);
        }

        fn pop_clip(&mut self) {
            self.ops.push(DrawOp::PopClip);
        }
    }
}
