//! Segment state model.
//!
//! Pure derivations from (text length, index, item count, focus, direction):
//! which segments are filled, which one is the next to receive input, and
//! which entered character or placeholder position a segment displays.
//!
//! Text lengths are clamped to the item count throughout; over-length content
//! (which the host's input filter should prevent) reads as fully filled
//! rather than indexing out of bounds.

/// Visual state of one segment for one draw pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentState {
    /// Holds no character.
    Empty,
    /// Holds an entered character.
    Filled,
    /// The next segment to receive input, while the field is focused and not
    /// yet full. Hosts the blinking cursor and the highlight border.
    Selected,
}

/// The index of the next segment expected to receive input.
///
/// LTR fills left to right, so the fill pointer is the text length. RTL
/// fills from the last segment backward; its conceptual "next" slot is
/// pinned at the last index, with actual fill progress read through the
/// reversed content mapping.
pub fn next_to_fill(text_len: usize, count: usize, rtl: bool) -> usize {
    if rtl {
        count.saturating_sub(1)
    } else {
        text_len.min(count)
    }
}

/// Whether segment `index` holds an entered character.
pub fn is_filled(index: usize, text_len: usize, count: usize, rtl: bool) -> bool {
    if index >= count {
        return false;
    }
    let len = text_len.min(count);
    if rtl {
        count - index <= len
    } else {
        index < len
    }
}

/// Derives the visual state of segment `index`.
///
/// At most one segment is `Selected` at a time, and only while the field is
/// focused and not fully filled. Selection takes precedence over fill for
/// the pinned RTL slot so the highlight always lands on the active segment.
pub fn segment_state(
    index: usize,
    text_len: usize,
    count: usize,
    focused: bool,
    rtl: bool,
) -> SegmentState {
    let len = text_len.min(count);
    if focused && len < count && index == next_to_fill(len, count, rtl) {
        SegmentState::Selected
    } else if is_filled(index, len, count, rtl) {
        SegmentState::Filled
    } else {
        SegmentState::Empty
    }
}

/// Which entered character segment `index` displays, as an index into the
/// text's grapheme cells, or `None` when the segment shows no entered
/// character.
///
/// LTR is the identity mapping while `index < len`. RTL right-aligns the
/// entered block: segment `i` shows grapheme `|count - i - len|` once
/// `count - i <= len`.
pub fn content_index(index: usize, text_len: usize, count: usize, rtl: bool) -> Option<usize> {
    if index >= count {
        return None;
    }
    let len = text_len.min(count);
    if rtl {
        ((count - index) <= len).then(|| (count - index).abs_diff(len))
    } else {
        (index < len).then_some(index)
    }
}

/// Which placeholder position segment `index` displays when empty. RTL
/// mirrors the placeholder across the row.
pub fn placeholder_index(index: usize, count: usize, rtl: bool) -> usize {
    if rtl {
        count.saturating_sub(index + 1)
    } else {
        index
    }
}

/// The segment that most recently received a character, used as the target
/// of the one-shot enter animation.
pub fn newest_filled_index(text_len: usize, count: usize, rtl: bool) -> Option<usize> {
    let len = text_len.min(count);
    if len == 0 {
        return None;
    }
    Some(if rtl { count - len } else { len - 1 })
}
