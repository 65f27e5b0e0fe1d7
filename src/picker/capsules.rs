use super::{day_label, Strip, CAPSULE_WIDTH};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    widgets::{Block, BorderType, Paragraph, Widget},
};

/// Height of a capsule: the label plus top and bottom borders
pub(crate) const CAPSULE_HEIGHT: u16 = 3;

/*
 * ╭──────╮ ╭──────╮ ╭──────╮
 * │14 Jan│ │15 Jan│ │16 Jan│
 * ╰──────╯ ╰──────╯ ╰──────╯
 */

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct CapsuleRow<'a> {
    strip: &'a Strip,
}

impl<'a> CapsuleRow<'a> {
    pub(crate) fn new(strip: &'a Strip) -> Self {
        CapsuleRow { strip }
    }
}

impl Widget for CapsuleRow<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (x, date, facts) in self.strip.columns() {
            let capsule = Rect {
                x,
                y: area.y,
                width: CAPSULE_WIDTH,
                height: CAPSULE_HEIGHT,
            }
            .intersection(area);
            if capsule.is_empty() {
                continue;
            }
            Paragraph::new(day_label(date))
                .alignment(Alignment::Center)
                .block(Block::bordered().border_type(BorderType::Rounded))
                .style(facts.capsule_style())
                .render(capsule, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::picker::{CAPSULE_STYLE, SELECTED_STYLE, TODAY_STYLE};
    use time::macros::date;

    #[test]
    fn test_render() {
        let today = date!(2025 - 01 - 15);
        let days = [date!(2025 - 01 - 14), today, date!(2025 - 01 - 16)];
        let area = Rect::new(0, 0, 27, 3);
        let strip = Strip::new(area, days, date!(2025 - 01 - 16), today);
        let mut buffer = Buffer::empty(area);
        CapsuleRow::new(&strip).render(area, &mut buffer);
        let mut expected = Buffer::with_lines([
            "╭──────╮ ╭──────╮ ╭──────╮ ",
            "│14 Jan│ │15 Jan│ │16 Jan│ ",
            "╰──────╯ ╰──────╯ ╰──────╯ ",
        ]);
        expected.set_style(Rect::new(0, 0, 8, 3), CAPSULE_STYLE);
        expected.set_style(Rect::new(9, 0, 8, 3), CAPSULE_STYLE.patch(TODAY_STYLE));
        expected.set_style(Rect::new(18, 0, 8, 3), CAPSULE_STYLE.patch(SELECTED_STYLE));
        assert_eq!(buffer, expected);
    }

    #[test]
    fn test_render_clipped() {
        let today = date!(2025 - 01 - 15);
        let area = Rect::new(0, 0, 5, 3);
        let strip = Strip::new(Rect::new(0, 0, 9, 3), [today], today, today);
        let mut buffer = Buffer::empty(area);
        CapsuleRow::new(&strip).render(area, &mut buffer);
        assert_eq!(buffer[(0, 0)].symbol(), "╭");
        assert_eq!(buffer[(1, 0)].symbol(), "─");
        assert_eq!(buffer[(4, 0)].symbol(), "╮");
    }
}
