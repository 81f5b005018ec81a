//! Rendering and input-state core for a segmented one-time-password entry
//! widget.
//!
//! The field renders itself as a row of discrete segments (boxes or
//! underlines), tracks a bounded-length code, and notifies a listener once
//! the code reaches its configured length. It is toolkit-agnostic: a host
//! binding adapts [`OtpField`]'s event surface to its native widget base,
//! implements [`DrawSurface`] over its canvas, and schedules the blink
//! deadlines the field hands back.
//!
//! # Example
//!
//! ```
//! use std::time::Instant;
//!
//! use otp_field::{
//!     ContentOrigin, Dp, MeasureSpec, OtpField, OtpFieldStyleBuilder,
//!     surface::recording::RecordingSurface,
//! };
//!
//! let style = OtpFieldStyleBuilder::default()
//!     .item_count(6)
//!     .item_width(Dp(40.0))
//!     .item_spacing(Dp(8.0))
//!     .build()
//!     .unwrap();
//! let mut field = OtpField::new(style).unwrap();
//! field.set_completion_listener(Some(std::sync::Arc::new(|code| {
//!     println!("entered: {code}");
//! })));
//!
//! let now = Instant::now();
//! field.on_focus_changed(true, now);
//! field.on_content_changed("123456", now);
//!
//! let (width, _) = field.measure(
//!     MeasureSpec::Unspecified,
//!     MeasureSpec::Unspecified,
//!     0.0,
//!     0.0,
//! );
//! assert_eq!(width, 280.0);
//!
//! let mut surface = RecordingSurface::new();
//! field.draw(&mut surface, ContentOrigin::default(), now);
//! ```

mod animation;
mod render;

pub mod blink;
pub mod color;
pub mod config;
pub mod dp;
pub mod field;
pub mod geometry;
pub mod state;
pub mod surface;

pub use animation::GlyphTween;
pub use blink::{BLINK_INTERVAL, BlinkPhase};
pub use color::Color;
pub use config::{
    ConfigError, InputKind, LineColors, OtpFieldStyle, OtpFieldStyleBuilder, ViewStyle,
};
pub use dp::Dp;
pub use field::{CompletionListener, Invalidation, OtpField};
pub use geometry::{ContentOrigin, CornerFlags, MeasureSpec, SegmentGeometry, SegmentRect};
pub use state::SegmentState;
pub use surface::{DrawSurface, GlyphBounds, GlyphPaint};
