use crate::clock::Clock;
use crate::window::DateWindow;
use time::Date;

/// Instruction to center both the capsule row and the ruler on a day
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct ScrollTo(pub(crate) Date);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct SelectionController {
    selected: Date,
}

impl SelectionController {
    pub(crate) fn new(today: Date) -> SelectionController {
        SelectionController { selected: today }
    }

    pub(crate) fn selected(&self) -> Date {
        self.selected
    }

    pub(crate) fn select(&mut self, day: Date) -> ScrollTo {
        if day != self.selected {
            log::debug!("selected {day}");
        }
        self.selected = day;
        ScrollTo(day)
    }

    /// Select today, provided it is within `window`
    pub(crate) fn jump_to_today<C: Clock>(
        &mut self,
        window: &DateWindow,
        clock: &C,
    ) -> Option<ScrollTo> {
        let today = clock.today();
        window.contains(today).then(|| self.select(today))
    }

    /// Scroll to today, provided it is within `window`, without changing the
    /// selection
    pub(crate) fn center_on_today<C: Clock>(
        &self,
        window: &DateWindow,
        clock: &C,
    ) -> Option<ScrollTo> {
        let today = clock.today();
        window.contains(today).then_some(ScrollTo(today))
    }

    /// Select the day `offset` places away from the current selection.  Does
    /// nothing if that day (or the current selection) is not in `window`.
    pub(crate) fn select_adjacent(
        &mut self,
        window: &DateWindow,
        offset: isize,
    ) -> Option<ScrollTo> {
        let day = window
            .index_of(self.selected)
            .and_then(|i| i.checked_add_signed(offset))
            .and_then(|i| window.get(i))?;
        Some(self.select(day))
    }
}
