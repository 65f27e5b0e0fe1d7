use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Clear, Padding, Paragraph, Widget},
};

/// Width of the key column
const KEY_WIDTH: usize = 14;

struct Section {
    title: &'static str,
    keys: &'static [(&'static str, &'static str)],
}

static SECTIONS: &[Section] = &[
    Section {
        title: "Selection",
        keys: &[
            ("h, LEFT", "Select previous day"),
            ("l, RIGHT", "Select next day"),
            ("t, HOME", "Select today"),
        ],
    },
    Section {
        title: "Scrolling",
        keys: &[
            ("H, PAGE UP", "Scroll back one page"),
            ("L, PAGE DOWN", "Scroll forward one page"),
            ("c", "Center on today"),
        ],
    },
    Section {
        title: "Other",
        keys: &[
            ("a", "Add product"),
            ("o", "Options"),
            ("?", "Show this help"),
            ("q, ESC", "Quit"),
        ],
    },
];

static FOOTER: &[&str] = &[
    "Click a day to select it; double-click",
    "the ruler to center on today.",
    "",
    "Press any key to dismiss.",
];

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help(pub(crate) Style);

impl Help {
    fn text() -> Text<'static> {
        let mut lines = Vec::new();
        for sec in SECTIONS {
            lines.push(Line::from(Span::styled(
                sec.title,
                Style::new().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )));
            lines.extend(
                sec.keys
                    .iter()
                    .map(|&(keys, what)| Line::raw(format!("  {keys:KEY_WIDTH$}{what}"))),
            );
            lines.push(Line::default());
        }
        lines.extend(FOOTER.iter().map(|&s| Line::raw(s)));
        Text::from(lines)
    }
}

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Help::text();
        // Borders plus one column of padding on each side
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .saturating_add(4)
            .min(area.width);
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .min(area.height);
        let popup = Rect {
            x: area.x.saturating_add(area.width.saturating_sub(width) / 2),
            y: area.y.saturating_add(area.height.saturating_sub(height) / 2),
            width,
            height,
        };
        Clear.render(popup, buf);
        Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(" Commands ")
                    .title_alignment(Alignment::Center)
                    .padding(Padding::horizontal(1)),
            )
            .style(self.0)
            .render(popup, buf);
    }
}
