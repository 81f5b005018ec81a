//! End-to-end flow through the public API: measure, type a full code,
//! observe segment states, draw, and receive the completion callback.

use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Instant,
};

use otp_field::{
    BlinkPhase, ContentOrigin, Dp, MeasureSpec, OtpField, OtpFieldStyleBuilder, SegmentState,
    state::segment_state,
    surface::recording::{DrawOp, RecordingSurface},
};

fn six_digit_field() -> OtpField {
    OtpField::new(
        OtpFieldStyleBuilder::default()
            .item_count(6)
            .item_width(Dp(40.0))
            .item_height(Dp(48.0))
            .item_spacing(Dp(8.0))
            .build()
            .unwrap(),
    )
    .unwrap()
}

#[test]
fn typing_a_full_code() {
    let mut field = six_digit_field();
    let completions = Arc::new(AtomicUsize::new(0));
    {
        let completions = completions.clone();
        field.set_completion_listener(Some(Arc::new(move |code| {
            assert_eq!(code, "123456");
            completions.fetch_add(1, Ordering::SeqCst);
        })));
    }

    let (width, height) = field.measure(
        MeasureSpec::Unspecified,
        MeasureSpec::Unspecified,
        0.0,
        0.0,
    );
    assert_eq!(width, 6.0 * 40.0 + 5.0 * 8.0);
    assert_eq!(height, 48.0);

    let now = Instant::now();
    field.on_focus_changed(true, now);

    let mut entered = String::new();
    for (i, ch) in "123456".chars().enumerate() {
        entered.push(ch);
        field.on_content_changed(&entered, now);
        // Completion only at the moment the sixth character lands.
        assert_eq!(completions.load(Ordering::SeqCst), usize::from(i == 5));
    }

    // All six segments filled, none selected.
    for i in 0..6 {
        assert_eq!(
            segment_state(i, field.text_len(), 6, field.is_focused(), false),
            SegmentState::Filled
        );
    }

    let mut surface = RecordingSurface::new();
    field.draw(&mut surface, ContentOrigin::default(), now);
    assert_eq!(surface.glyphs(), vec!["1", "2", "3", "4", "5", "6"]);
    // One border stroke per segment and no highlight pass on a full field.
    let strokes = surface
        .ops
        .iter()
        .filter(|op| matches!(op, DrawOp::StrokePath { .. }))
        .count();
    assert_eq!(strokes, 6);
}

#[test]
fn blink_cycle_across_focus_and_detach() {
    let mut field = six_digit_field();
    let now = Instant::now();

    let deadline = field
        .on_focus_changed(true, now)
        .expect("focused field with visible cursor must blink");
    assert_eq!(field.blink_phase(), BlinkPhase::RunningHidden);

    let next = field.on_blink_fire(deadline).unwrap();
    assert_eq!(field.blink_phase(), BlinkPhase::RunningVisible);

    field.on_detached_from_window();
    assert_eq!(field.blink_phase(), BlinkPhase::RunningHidden);
    assert_eq!(field.on_blink_fire(next), None);
}

#[test]
fn rtl_field_draws_cursor_and_fills_from_the_right() {
    let mut field = OtpField::new(
        OtpFieldStyleBuilder::default()
            .item_count(4)
            .rtl(true)
            .build()
            .unwrap(),
    )
    .unwrap();

    let now = Instant::now();
    field.on_content_changed("7", now);
    assert_eq!(
        segment_state(3, field.text_len(), 4, false, true),
        SegmentState::Filled
    );
    assert_eq!(
        segment_state(0, field.text_len(), 4, false, true),
        SegmentState::Empty
    );

    let mut surface = RecordingSurface::new();
    field.draw(&mut surface, ContentOrigin::default(), now);
    assert_eq!(surface.glyphs(), vec!["7"]);
}
