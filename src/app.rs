use crate::clock::Clock;
use crate::help::Help;
use crate::picker::{
    slots_for_width, Button, ButtonBar, CapsuleRow, Ruler, Strip, BUTTON_HEIGHT, CAPSULE_HEIGHT,
    RULER_HEIGHT,
};
use crate::scroll::ScrollPosition;
use crate::selection::{ScrollTo, SelectionController};
use crate::tasks::TaskQueue;
use crate::theme::{BASE_STYLE, HEADER_STYLE, STATUS_STYLE};
use crate::window::{DateWindow, Extension, WindowSpan};
use crossterm::event::{
    read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Position, Rect},
    widgets::{Paragraph, Widget},
    Terminal,
};
use std::io::{self, Write};
use std::time::{Duration, Instant};
use time::Date;

/// Two clicks on the same part of the screen within this interval make a
/// double-click
const DOUBLE_CLICK: Duration = Duration::from_millis(400);

#[derive(Clone, Debug)]
pub(crate) struct App<C> {
    clock: C,
    window: DateWindow,
    selection: SelectionController,
    scroll: ScrollPosition,
    tasks: TaskQueue<Deferred>,
    state: AppState,
    status: Option<String>,
    hits: Hits,
    clicks: ClickTracker,
}

impl<C: Clock> App<C> {
    pub(crate) fn new(clock: C) -> App<C> {
        let today = clock.today();
        let window = DateWindow::initialize(today, WindowSpan::default());
        log::info!(
            "today is {today}; loaded {} through {}",
            window.first(),
            window.last()
        );
        let mut tasks = TaskQueue::new();
        // Center on today once the first frame is up
        tasks.push(Deferred::ScrollToSelection);
        App {
            clock,
            window,
            selection: SelectionController::new(today),
            scroll: ScrollPosition::new(),
            tasks,
            state: AppState::Picker,
            status: None,
            hits: Hits::default(),
            clicks: ClickTracker::default(),
        }
    }

    pub(crate) fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(terminal)?;
            if self.after_render() {
                // The frame just drawn is stale.
                continue;
            }
            self.handle_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(&mut *self, frame.area()))?;
        Ok(())
    }

    /// Turn any window edges that the last render brought into view into
    /// extension requests, then run all deferred work.  Returns `true` if any
    /// work was run.
    fn after_render(&mut self) -> bool {
        for day in self
            .scroll
            .record_visible(&self.window, self.hits.strip.bounds())
        {
            match self.window.request_extension(day) {
                Ok(extension) => self.tasks.push(Deferred::Extend(extension)),
                Err(e) => log::debug!("dropped edge signal for {day}: {e}"),
            }
        }
        let mut ran = false;
        while let Some(task) = self.tasks.pop() {
            self.run_task(task);
            ran = true;
        }
        ran
    }

    fn run_task(&mut self, task: Deferred) {
        match task {
            Deferred::ScrollToSelection => {
                self.scroll_to(Some(ScrollTo(self.selection.selected())));
            }
            Deferred::Extend(extension) => {
                match &extension {
                    Extension::Before(run) => {
                        log::debug!("prepending {} days to the window", run.len());
                    }
                    Extension::After(run) => {
                        log::debug!("appending {} days to the window", run.len());
                    }
                }
                self.window.apply(extension);
            }
        }
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        match read()? {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) => {
                if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                    self.state = AppState::Quitting;
                } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                    self.beep()?;
                }
            }
            Event::Mouse(MouseEvent {
                kind, column, row, ..
            }) => self.handle_mouse(kind, column, row),
            // Redraw on resize, and we might as well redraw on other stuff
            // too
            _ => (),
        }
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.state {
            AppState::Picker => match key {
                KeyCode::Char('h') | KeyCode::Left => self.select_adjacent(-1),
                KeyCode::Char('l') | KeyCode::Right => self.select_adjacent(1),
                KeyCode::Char('H') | KeyCode::PageUp => self.scroll_page(-1),
                KeyCode::Char('L') | KeyCode::PageDown => self.scroll_page(1),
                KeyCode::Char('t') | KeyCode::Home => {
                    self.handle_gesture(Gesture::Press(Button::Today));
                    true
                }
                KeyCode::Char('c') => {
                    self.handle_gesture(Gesture::DoubleTapRuler);
                    true
                }
                KeyCode::Char('a') => {
                    self.handle_gesture(Gesture::Press(Button::AddProduct));
                    true
                }
                KeyCode::Char('o') => {
                    self.handle_gesture(Gesture::Press(Button::Options));
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Picker;
                true
            }
            AppState::Quitting => false,
        }
    }

    fn handle_mouse(&mut self, kind: MouseEventKind, column: u16, row: u16) {
        if self.state == AppState::Helping {
            if matches!(kind, MouseEventKind::Down(_)) {
                self.state = AppState::Picker;
            }
            return;
        }
        match kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.handle_click(column, row, Instant::now());
            }
            MouseEventKind::ScrollUp | MouseEventKind::ScrollLeft => {
                self.scroll.scroll_by(&self.window, -1, self.hits.slots);
            }
            MouseEventKind::ScrollDown | MouseEventKind::ScrollRight => {
                self.scroll.scroll_by(&self.window, 1, self.hits.slots);
            }
            _ => (),
        }
    }

    fn handle_click(&mut self, column: u16, row: u16, at: Instant) {
        let Some(region) = self.hits.region_at(Position::new(column, row)) else {
            self.clicks = ClickTracker::default();
            return;
        };
        let before = self.clicks.register(at, region, self.selection.selected());
        let gesture = match (region, before) {
            (Region::Ruler, Some(before)) => {
                // Undo the tap made by the first click of the pair
                self.selection.select(before);
                Some(Gesture::DoubleTapRuler)
            }
            (Region::Capsules | Region::Ruler, _) => {
                self.hits.strip.day_at(column).map(Gesture::Tap)
            }
            (Region::Button(button), _) => Some(Gesture::Press(button)),
        };
        if let Some(gesture) = gesture {
            self.handle_gesture(gesture);
        }
    }

    pub(crate) fn handle_gesture(&mut self, gesture: Gesture) {
        self.status = None;
        match gesture {
            Gesture::Tap(day) => {
                let target = self.selection.select(day);
                self.scroll_to(Some(target));
            }
            Gesture::DoubleTapRuler => {
                let target = self.selection.center_on_today(&self.window, &self.clock);
                self.scroll_to(target);
            }
            Gesture::Press(Button::Today) => {
                let target = self.selection.jump_to_today(&self.window, &self.clock);
                if target.is_none() {
                    log::debug!("today is outside the window; selection unchanged");
                }
                self.scroll_to(target);
            }
            Gesture::Press(button @ (Button::AddProduct | Button::Options)) => {
                log::info!("{} pressed", button.label());
                self.status = Some(format!("{} is not available yet", button.label()));
            }
        }
    }

    fn scroll_to(&mut self, target: Option<ScrollTo>) -> bool {
        target.is_some_and(|t| self.scroll.scroll_to(t, &self.window))
    }

    fn select_adjacent(&mut self, offset: isize) -> bool {
        self.status = None;
        let target = self.selection.select_adjacent(&self.window, offset);
        self.scroll_to(target)
    }

    fn scroll_page(&mut self, direction: isize) -> bool {
        let slots = self.hits.slots;
        let delta = isize::try_from(slots)
            .unwrap_or(isize::MAX)
            .saturating_mul(direction);
        self.scroll.scroll_by(&self.window, delta, slots)
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }
}

impl<C: Clock> Widget for &mut App<C> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let [header, _, capsules, _, ruler, _, buttons, _, status] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(CAPSULE_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(RULER_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(BUTTON_HEIGHT),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);
        let selected = self.selection.selected();
        let slots = slots_for_width(capsules.width);
        let days = self
            .scroll
            .viewport(&self.window, slots)
            .filter_map(|i| self.window.get(i));
        let strip = Strip::new(capsules, days, selected, self.clock.today());
        Paragraph::new(format!("{} {}", selected.month(), selected.year()))
            .alignment(Alignment::Center)
            .style(HEADER_STYLE)
            .render(header, buf);
        CapsuleRow::new(&strip).render(capsules, buf);
        Ruler::new(&strip).render(ruler, buf);
        ButtonBar.render(buttons, buf);
        if let Some(msg) = &self.status {
            Paragraph::new(msg.as_str())
                .alignment(Alignment::Center)
                .style(STATUS_STYLE)
                .render(status, buf);
        }
        self.hits = Hits {
            capsules,
            ruler,
            buttons: ButtonBar::areas(buttons).to_vec(),
            strip,
            slots,
        };
        if self.state == AppState::Helping {
            Help(BASE_STYLE).render(area, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Picker,
    Helping,
    Quitting,
}

/// Something the user did to the picker
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Gesture {
    /// Tap (click) on a capsule or a ruler tick
    Tap(Date),
    DoubleTapRuler,
    Press(Button),
}

/// Work that must wait until the current event handler and render pass are
/// done
#[derive(Clone, Debug, Eq, PartialEq)]
enum Deferred {
    ScrollToSelection,
    Extend(Extension),
}

/// Screen geometry recorded by the latest render, for resolving clicks
#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Hits {
    capsules: Rect,
    ruler: Rect,
    buttons: Vec<(Button, Rect)>,
    strip: Strip,
    slots: usize,
}

impl Hits {
    fn region_at(&self, pos: Position) -> Option<Region> {
        if self.capsules.contains(pos) {
            Some(Region::Capsules)
        } else if self.ruler.contains(pos) {
            Some(Region::Ruler)
        } else {
            self.buttons
                .iter()
                .find(|(_, r)| r.contains(pos))
                .map(|&(b, _)| Region::Button(b))
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Region {
    Capsules,
    Ruler,
    Button(Button),
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
struct ClickTracker {
    last: Option<Click>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Click {
    at: Instant,
    region: Region,
    /// Selection just before the click was handled
    selected: Date,
}

impl ClickTracker {
    /// Record a click made while `selected` was the selection.  If the click
    /// completes a double-click, returns the selection from before the first
    /// click of the pair.
    fn register(&mut self, at: Instant, region: Region, selected: Date) -> Option<Date> {
        let first = self.last.filter(|prev| {
            prev.region == region && at.saturating_duration_since(prev.at) <= DOUBLE_CLICK
        });
        // A third click starts over rather than making another double-click.
        self.last = match first {
            Some(_) => None,
            None => Some(Click {
                at,
                region,
                selected,
            }),
        };
        first.map(|prev| prev.selected)
    }
}
