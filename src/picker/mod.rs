mod buttons;
mod capsules;
mod ruler;
pub(crate) use self::buttons::{Button, ButtonBar, BUTTON_HEIGHT};
pub(crate) use self::capsules::{CapsuleRow, CAPSULE_HEIGHT};
pub(crate) use self::ruler::{Ruler, RULER_HEIGHT};
use crate::theme::picker::{CAPSULE_STYLE, SELECTED_STYLE, TODAY_STYLE};
use ratatui::{layout::Rect, style::Style};
use time::{macros::format_description, Date, Weekday};

/// Number of columns given to each day, shared by the capsule row and the
/// ruler so that a day's capsule sits directly above its tick
pub(crate) const DAY_WIDTH: u16 = 9;

/// Width of a capsule's box, including its borders
pub(crate) const CAPSULE_WIDTH: u16 = 8;

/// Days falling on this weekday get a major tick on the ruler
const MAJOR_WEEKDAY: Weekday = Weekday::Monday;

/// Label shown inside a capsule, e.g., "02 Jan"
pub(crate) fn day_label(day: Date) -> String {
    day.format(format_description!("[day] [month repr:short]"))
        .unwrap_or_else(|_| day.to_string())
}

pub(crate) fn slots_for_width(width: u16) -> usize {
    usize::from(width / DAY_WIDTH)
}

/// Per-day facts that drive how a capsule or tick is drawn
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct DayFacts {
    pub(crate) selected: bool,
    pub(crate) today: bool,
    pub(crate) major: bool,
}

impl DayFacts {
    pub(crate) fn new(day: Date, selected: Date, today: Date) -> DayFacts {
        DayFacts {
            selected: day == selected,
            today: day == today,
            major: day.weekday() == MAJOR_WEEKDAY,
        }
    }

    // Selection takes precedence over today
    fn patch(self, mut style: Style) -> Style {
        if self.today {
            style = style.patch(TODAY_STYLE);
        }
        if self.selected {
            style = style.patch(SELECTED_STYLE);
        }
        style
    }

    pub(crate) fn capsule_style(self) -> Style {
        self.patch(CAPSULE_STYLE)
    }
}

/// The days currently on screen, laid out left to right and centered in the
/// area they were computed for.  The capsule row and the ruler both draw from
/// the same `Strip`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Strip {
    left: u16,
    days: Vec<(Date, DayFacts)>,
}

impl Strip {
    pub(crate) fn new<I>(area: Rect, days: I, selected: Date, today: Date) -> Strip
    where
        I: IntoIterator<Item = Date>,
    {
        let days = days
            .into_iter()
            .map(|d| (d, DayFacts::new(d, selected, today)))
            .collect::<Vec<_>>();
        let width = u16::try_from(days.len())
            .unwrap_or(u16::MAX)
            .saturating_mul(DAY_WIDTH);
        let left = area.x.saturating_add(area.width.saturating_sub(width) / 2);
        Strip { left, days }
    }

    /// Yields the leftmost column, date, and facts of each day
    pub(crate) fn columns(&self) -> impl Iterator<Item = (u16, Date, DayFacts)> + '_ {
        std::iter::zip(0u16.., &self.days).map(|(i, &(d, facts))| {
            let x = self.left.saturating_add(i.saturating_mul(DAY_WIDTH));
            (x, d, facts)
        })
    }

    pub(crate) fn width(&self) -> u16 {
        u16::try_from(self.days.len())
            .unwrap_or(u16::MAX)
            .saturating_mul(DAY_WIDTH)
    }

    pub(crate) fn left(&self) -> u16 {
        self.left
    }

    pub(crate) fn day_at(&self, column: u16) -> Option<Date> {
        let offset = column.checked_sub(self.left)? / DAY_WIDTH;
        self.days.get(usize::from(offset)).map(|&(d, _)| d)
    }

    /// First and last days on screen
    pub(crate) fn bounds(&self) -> Option<(Date, Date)> {
        Some((self.days.first()?.0, self.days.last()?.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_day_label() {
        assert_eq!(day_label(date!(2025 - 01 - 02)), "02 Jan");
        assert_eq!(day_label(date!(2024 - 12 - 29)), "29 Dec");
    }

    #[test]
    fn test_day_facts() {
        let today = date!(2025 - 01 - 15);
        let selected = date!(2025 - 01 - 20);
        assert_eq!(
            DayFacts::new(today, selected, today),
            DayFacts {
                selected: false,
                today: true,
                major: false
            }
        );
        // 2025-01-20 is a Monday
        assert_eq!(
            DayFacts::new(selected, selected, today),
            DayFacts {
                selected: true,
                today: false,
                major: true
            }
        );
        assert_eq!(
            DayFacts::new(date!(2025 - 01 - 21), selected, today),
            DayFacts::default()
        );
    }

    #[test]
    fn test_selected_style_wins() {
        let facts = DayFacts {
            selected: true,
            today: true,
            major: false,
        };
        assert_eq!(facts.capsule_style().bg, SELECTED_STYLE.bg);
        assert_eq!(facts.capsule_style().fg, SELECTED_STYLE.fg);
    }

    #[test]
    fn test_strip_layout() {
        let today = date!(2025 - 01 - 15);
        let days = [date!(2025 - 01 - 14), today, date!(2025 - 01 - 16)];
        let strip = Strip::new(Rect::new(0, 0, 40, 3), days, today, today);
        // 27 columns of days centered in 40
        assert_eq!(strip.left(), 6);
        assert_eq!(strip.width(), 27);
        let columns = strip.columns().map(|(x, d, _)| (x, d)).collect::<Vec<_>>();
        assert_eq!(
            columns,
            [
                (6, date!(2025 - 01 - 14)),
                (15, today),
                (24, date!(2025 - 01 - 16)),
            ]
        );
        assert_eq!(strip.day_at(5), None);
        assert_eq!(strip.day_at(6), Some(date!(2025 - 01 - 14)));
        assert_eq!(strip.day_at(23), Some(today));
        assert_eq!(strip.day_at(32), Some(date!(2025 - 01 - 16)));
        assert_eq!(strip.day_at(33), None);
        assert_eq!(strip.bounds(), Some((date!(2025 - 01 - 14), date!(2025 - 01 - 16))));
    }

    #[test]
    fn test_empty_strip() {
        let today = date!(2025 - 01 - 15);
        let strip = Strip::new(Rect::new(0, 0, 5, 3), [], today, today);
        assert_eq!(strip.bounds(), None);
        assert_eq!(strip.day_at(2), None);
    }
}
