use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const HEADER_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const STATUS_STYLE: Style = BASE_STYLE.fg(Color::Gray);

pub(crate) mod picker {
    use super::*;

    pub(crate) const CAPSULE_STYLE: Style = BASE_STYLE;

    pub(crate) const TODAY_STYLE: Style = Style::new()
        .fg(Color::LightYellow)
        .add_modifier(Modifier::BOLD);

    pub(crate) const SELECTED_STYLE: Style = Style::new()
        .fg(Color::Black)
        .bg(Color::LightCyan)
        .add_modifier(Modifier::BOLD);

    pub(crate) const RULE_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

    pub(crate) const MAJOR_TICK_STYLE: Style = BASE_STYLE;

    pub(crate) const BUTTON_STYLE: Style = BASE_STYLE;
}
