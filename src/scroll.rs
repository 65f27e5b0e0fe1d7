use crate::selection::ScrollTo;
use crate::window::DateWindow;
use std::ops::{Range, RangeInclusive};
use time::Date;

/// The single scroll position shared by the capsule row and the ruler.
///
/// The position is keyed by day rather than by index so that it stays put
/// when days are prepended to the window.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct ScrollPosition {
    /// The day to center on.  `None` until the first scroll instruction, in
    /// which case the view starts at the beginning of the window.
    anchor: Option<Date>,
    /// First and last days shown by the previous render
    visible: Option<(Date, Date)>,
}

impl ScrollPosition {
    pub(crate) fn new() -> ScrollPosition {
        ScrollPosition::default()
    }

    #[cfg(test)]
    pub(crate) fn anchor(&self) -> Option<Date> {
        self.anchor
    }

    /// Returns `false` (and does nothing) if the target is not in `window`
    pub(crate) fn scroll_to(&mut self, target: ScrollTo, window: &DateWindow) -> bool {
        let ScrollTo(day) = target;
        if window.contains(day) {
            self.anchor = Some(day);
            true
        } else {
            log::debug!("not scrolling to {day}, which is outside the window");
            false
        }
    }

    /// Move the view by `delta` days, stopping once either end of the window
    /// is on screen
    pub(crate) fn scroll_by(&mut self, window: &DateWindow, delta: isize, slots: usize) -> bool {
        let Some(centers) = center_range(window.len(), slots) else {
            return false;
        };
        let current = self.center_index(window, slots);
        let target = current
            .saturating_add_signed(delta)
            .clamp(*centers.start(), *centers.end());
        if target == current {
            return false;
        }
        self.anchor = window.get(target);
        true
    }

    /// Indices of the window elements to show in a list `slots` days wide
    pub(crate) fn viewport(&self, window: &DateWindow, slots: usize) -> Range<usize> {
        let len = window.len();
        let slots = slots.min(len);
        let start = match self.anchor.and_then(|d| window.index_of(d)) {
            Some(center) => center.saturating_sub(slots / 2).min(len - slots),
            None => 0,
        };
        start..(start + slots)
    }

    /// Record which days the latest render showed, and return the ends of the
    /// window that have just come into view
    pub(crate) fn record_visible(
        &mut self,
        window: &DateWindow,
        visible: Option<(Date, Date)>,
    ) -> Vec<Date> {
        let previous = std::mem::replace(&mut self.visible, visible);
        let Some((lo, hi)) = visible else {
            return Vec::new();
        };
        let was_visible = |d: &Date| previous.is_some_and(|(plo, phi)| (plo..=phi).contains(d));
        let mut appeared = [window.first(), window.last()]
            .into_iter()
            .filter(|d| (lo..=hi).contains(d) && !was_visible(d))
            .collect::<Vec<_>>();
        appeared.dedup();
        appeared
    }

    // The index that the view is visually centered on, which may differ from
    // the anchor's index when the anchor is near an end of the window
    fn center_index(&self, window: &DateWindow, slots: usize) -> usize {
        let Some(centers) = center_range(window.len(), slots) else {
            return 0;
        };
        self.anchor
            .and_then(|d| window.index_of(d))
            .unwrap_or(0)
            .clamp(*centers.start(), *centers.end())
    }
}

// Indices that can be at the center of a full viewport
fn center_range(len: usize, slots: usize) -> Option<RangeInclusive<usize>> {
    let slots = slots.min(len);
    (slots > 0).then(|| (slots / 2)..=(len - slots + slots / 2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::WindowSpan;
    use time::macros::date;

    fn window() -> DateWindow {
        DateWindow::initialize(date!(2025 - 01 - 15), WindowSpan::default())
    }

    #[test]
    fn test_viewport_before_first_scroll() {
        let window = window();
        let scroll = ScrollPosition::new();
        assert_eq!(scroll.viewport(&window, 8), 0..8);
    }

    #[test]
    fn test_viewport_centered() {
        let window = window();
        let mut scroll = ScrollPosition::new();
        assert!(scroll.scroll_to(ScrollTo(date!(2025 - 01 - 20)), &window));
        // 2025-01-20 is at index 12
        assert_eq!(scroll.viewport(&window, 9), 8..17);
        assert_eq!(scroll.viewport(&window, 8), 8..16);
    }

    #[test]
    fn test_viewport_clamped_at_ends() {
        let window = window();
        let mut scroll = ScrollPosition::new();
        assert!(scroll.scroll_to(ScrollTo(date!(2025 - 01 - 09)), &window));
        assert_eq!(scroll.viewport(&window, 9), 0..9);
        assert!(scroll.scroll_to(ScrollTo(date!(2025 - 02 - 18)), &window));
        assert_eq!(scroll.viewport(&window, 9), 34..43);
    }

    #[test]
    fn test_viewport_wider_than_window() {
        let window = window();
        let mut scroll = ScrollPosition::new();
        assert!(scroll.scroll_to(ScrollTo(date!(2025 - 01 - 20)), &window));
        assert_eq!(scroll.viewport(&window, 100), 0..43);
    }

    #[test]
    fn test_viewport_survives_prepend() {
        let mut window = window();
        let mut scroll = ScrollPosition::new();
        assert!(scroll.scroll_to(ScrollTo(date!(2025 - 01 - 20)), &window));
        assert_eq!(window.on_edge_reached(date!(2025 - 01 - 08)), Ok(()));
        assert_eq!(scroll.anchor(), Some(date!(2025 - 01 - 20)));
        assert_eq!(scroll.viewport(&window, 9), 18..27);
    }

    #[test]
    fn test_scroll_to_outside_window() {
        let window = window();
        let mut scroll = ScrollPosition::new();
        assert!(scroll.scroll_to(ScrollTo(date!(2025 - 01 - 20)), &window));
        assert!(!scroll.scroll_to(ScrollTo(date!(2025 - 03 - 20)), &window));
        assert_eq!(scroll.anchor(), Some(date!(2025 - 01 - 20)));
    }

    #[test]
    fn test_scroll_by() {
        let window = window();
        let mut scroll = ScrollPosition::new();
        assert!(scroll.scroll_to(ScrollTo(date!(2025 - 01 - 20)), &window));
        assert!(scroll.scroll_by(&window, 9, 9));
        assert_eq!(scroll.anchor(), Some(date!(2025 - 01 - 29)));
        assert!(scroll.scroll_by(&window, -3, 9));
        assert_eq!(scroll.anchor(), Some(date!(2025 - 01 - 26)));
    }

    #[test]
    fn test_scroll_by_stops_at_ends() {
        let window = window();
        let mut scroll = ScrollPosition::new();
        assert!(scroll.scroll_by(&window, 100, 9));
        assert_eq!(scroll.anchor(), Some(date!(2025 - 02 - 15)));
        assert_eq!(scroll.viewport(&window, 9), 34..43);
        assert!(!scroll.scroll_by(&window, 1, 9));
        assert!(scroll.scroll_by(&window, -100, 9));
        assert_eq!(scroll.anchor(), Some(date!(2025 - 01 - 12)));
        assert_eq!(scroll.viewport(&window, 9), 0..9);
        assert!(!scroll.scroll_by(&window, -1, 9));
    }

    #[test]
    fn test_record_visible_reports_appearing_edges() {
        let window = window();
        let mut scroll = ScrollPosition::new();
        assert_eq!(
            scroll.record_visible(&window, Some((date!(2025 - 01 - 08), date!(2025 - 01 - 15)))),
            vec![date!(2025 - 01 - 08)]
        );
        // Still on screen, so it has not "appeared" again
        assert_eq!(
            scroll.record_visible(&window, Some((date!(2025 - 01 - 08), date!(2025 - 01 - 16)))),
            Vec::<Date>::new()
        );
        assert_eq!(
            scroll.record_visible(&window, Some((date!(2025 - 01 - 20), date!(2025 - 01 - 28)))),
            Vec::<Date>::new()
        );
        assert_eq!(
            scroll.record_visible(&window, Some((date!(2025 - 01 - 08), date!(2025 - 01 - 16)))),
            vec![date!(2025 - 01 - 08)]
        );
    }

    #[test]
    fn test_record_visible_both_edges() {
        let window = window();
        let mut scroll = ScrollPosition::new();
        assert_eq!(
            scroll.record_visible(&window, Some((window.first(), window.last()))),
            vec![date!(2025 - 01 - 08), date!(2025 - 02 - 19)]
        );
    }

    #[test]
    fn test_record_nothing_visible() {
        let window = window();
        let mut scroll = ScrollPosition::new();
        assert_eq!(scroll.record_visible(&window, None), Vec::<Date>::new());
    }
}
