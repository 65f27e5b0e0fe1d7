use crate::theme::picker::BUTTON_STYLE;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Rect},
    widgets::{Block, BorderType, Paragraph, Widget},
};

/// Height of a button: the label plus top and bottom borders
pub(crate) const BUTTON_HEIGHT: u16 = 3;

/// Columns between adjacent buttons
const BUTTON_GAP: u16 = 2;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Button {
    Today,
    AddProduct,
    Options,
}

impl Button {
    pub(crate) const ALL: [Button; 3] = [Button::Today, Button::AddProduct, Button::Options];

    pub(crate) fn label(self) -> &'static str {
        match self {
            Button::Today => "Today",
            Button::AddProduct => "Add Product",
            Button::Options => "Options",
        }
    }

    // Label plus a border and a space of padding on each side
    fn width(self) -> u16 {
        u16::try_from(self.label().len())
            .unwrap_or(u16::MAX)
            .saturating_add(4)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct ButtonBar;

impl ButtonBar {
    /// Where each button is drawn within `area`
    pub(crate) fn areas(area: Rect) -> [(Button, Rect); 3] {
        let [today, add_product, options] = Layout::horizontal(Button::ALL.map(Button::width))
            .flex(Flex::Center)
            .spacing(BUTTON_GAP)
            .areas(area);
        [
            (Button::Today, today),
            (Button::AddProduct, add_product),
            (Button::Options, options),
        ]
    }
}

impl Widget for ButtonBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (button, rect) in ButtonBar::areas(area) {
            Paragraph::new(button.label())
                .alignment(Alignment::Center)
                .block(Block::bordered().border_type(BorderType::Rounded))
                .style(BUTTON_STYLE)
                .render(rect, buf);
        }
    }
}
