use crate::help::Help;
use crate::jumpto::{JumpTo, JumpToInput, JumpToOutput, JumpToState};
use crossterm::event::{read, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};
use stripcal::calendar::widget::STRIP_HEIGHT;
use stripcal::calendar::{Locale, StripCalendar, StripNavigator, Theme};
use time::Date;

#[derive(Debug)]
pub(crate) struct App {
    nav: StripNavigator,
    theme: Theme,
    state: AppState,
    chosen: Option<Date>,
}

impl App {
    pub(crate) fn new(nav: StripNavigator, theme: Theme) -> App {
        App {
            nav,
            theme,
            state: AppState::Calendar,
            chosen: None,
        }
    }

    /// Run the event loop until the user quits.  Returns the selected date if
    /// the user confirmed it with Enter.
    pub(crate) fn run<B: Backend>(
        mut self,
        terminal: &mut Terminal<B>,
    ) -> io::Result<Option<Date>> {
        while !self.quitting() {
            self.draw(terminal)?;
            self.handle_input()?;
        }
        Ok(self.chosen)
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(&mut *self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the key was invalid or did nothing
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match &mut self.state {
            AppState::Calendar => match key {
                KeyCode::Char('h') | KeyCode::Left => self.nav.select_previous_day(),
                KeyCode::Char('l') | KeyCode::Right => self.nav.select_next_day(),
                KeyCode::Char('[') | KeyCode::PageUp => self.nav.go_to_previous_week(),
                KeyCode::Char(']') | KeyCode::PageDown => self.nav.go_to_next_week(),
                KeyCode::Char('0') | KeyCode::Home => self.nav.go_to_today(),
                KeyCode::Char('g') => {
                    self.state = AppState::Jumping(JumpToState::new());
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                KeyCode::Enter => {
                    self.chosen = Some(self.nav.selected_date());
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Jumping(state) => {
                if matches!(key, KeyCode::Char('q' | 'g') | KeyCode::Esc) {
                    self.state = AppState::Calendar;
                    return true;
                }
                let input = match key {
                    KeyCode::Char('-') => JumpToInput::Negative,
                    KeyCode::Char('+') => JumpToInput::Positive,
                    KeyCode::Char(c) => {
                        match c.to_digit(10).and_then(|d| u8::try_from(d).ok()) {
                            Some(d) => JumpToInput::Digit(d),
                            None => return false,
                        }
                    }
                    KeyCode::Backspace | KeyCode::Delete => JumpToInput::Backspace,
                    KeyCode::Enter => JumpToInput::Enter,
                    _ => return false,
                };
                match state.handle_input(input) {
                    JumpToOutput::Ok => true,
                    JumpToOutput::Invalid => false,
                    JumpToOutput::Jump(date) => {
                        self.state = AppState::Calendar;
                        self.nav.jump_to(date)
                    }
                }
            }
            AppState::Quitting => false,
        }
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }
}

fn beep() -> io::Result<()> {
    let mut stdout = io::stdout();
    stdout.write_all(b"\x07")?;
    stdout.flush()
}

/// Header showing the month and year of the selected date
fn month_header(date: Date, locale: Locale) -> String {
    format!("{} {}", locale.month_name(date.month()), date.year())
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, self.theme.base);
        let [strip_area] = Layout::vertical([STRIP_HEIGHT])
            .flex(Flex::Center)
            .areas(area);
        StripCalendar::new()
            .theme(self.theme)
            .header(month_header)
            .render(strip_area, buf, &mut self.nav);
        if self.state == AppState::Helping {
            Help(self.theme.base).render(area, buf);
        } else if let AppState::Jumping(ref mut state) = self.state {
            JumpTo(self.theme.base).render(area, buf, state);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    Jumping(JumpToState),
    Quitting,
}
