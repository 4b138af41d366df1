use crate::dom::HeadingMark;

/// How far below the viewport top a heading already counts as reached.
pub const DEFAULT_LOOKAHEAD_PX: f64 = 20.0;

/// Fragment of the section being read at `scroll_offset`.
///
/// That is the last heading, in document order, whose top is at or above
/// `scroll_offset + lookahead`. Returns `None` while the reader is still above
/// the first such heading.
pub fn compute_active_fragment(
    headings: &[HeadingMark],
    scroll_offset: f64,
    lookahead: f64,
) -> Option<&str> {
    let threshold = scroll_offset + lookahead;
    headings
        .iter()
        .rev()
        .find(|heading| heading.top <= threshold)
        .map(|heading| heading.fragment.as_str())
}
