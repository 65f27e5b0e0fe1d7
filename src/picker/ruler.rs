use super::{DayFacts, Strip, CAPSULE_WIDTH};
use crate::theme::{
    picker::{MAJOR_TICK_STYLE, RULE_STYLE},
    BASE_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Style,
    widgets::Widget,
};

/// Number of lines taken up by the ruler: the rule with its ticks, then the
/// day numbers
pub(crate) const RULER_HEIGHT: u16 = 2;

const ACS_HLINE: char = '─';
const MINOR_TICK: char = '┬';
const MAJOR_TICK: char = '┼';
const TODAY_TICK: char = '◆';

/*
 * ────◆────────┼────────┬────
 *    19       20       21
 */

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Ruler<'a> {
    strip: &'a Strip,
}

impl<'a> Ruler<'a> {
    pub(crate) fn new(strip: &'a Strip) -> Self {
        Ruler { strip }
    }
}

impl Widget for Ruler<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let rule_end = self.strip.left().saturating_add(self.strip.width());
        for x in self.strip.left()..rule_end {
            put(buf, area, x, area.y, ACS_HLINE, RULE_STYLE);
        }
        for (x, date, facts) in self.strip.columns() {
            // Ticks sit under the middle of their capsule
            let tick_x = x.saturating_add(CAPSULE_WIDTH / 2);
            let (tick, style) = tick(facts);
            put(buf, area, tick_x, area.y, tick, style);
            if facts.major || facts.selected || facts.today {
                let day = date.day();
                let label = format!("{day:2}");
                let y = area.y.saturating_add(1);
                for (lx, ch) in std::iter::zip(tick_x.saturating_sub(1).., label.chars()) {
                    put(buf, area, lx, y, ch, facts.patch(BASE_STYLE));
                }
            }
        }
    }
}

fn tick(facts: DayFacts) -> (char, Style) {
    let ch = if facts.today {
        TODAY_TICK
    } else if facts.major {
        MAJOR_TICK
    } else {
        MINOR_TICK
    };
    let base = if facts.major {
        MAJOR_TICK_STYLE
    } else {
        RULE_STYLE
    };
    (ch, facts.patch(base))
}

fn put(buf: &mut Buffer, area: Rect, x: u16, y: u16, ch: char, style: Style) {
    if area.contains(Position::new(x, y)) {
        if let Some(cell) = buf.cell_mut((x, y)) {
            cell.set_char(ch).set_style(style);
        }
    }
}
