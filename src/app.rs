use crate::dates::{first_of_month, month_after, month_before, week_start_of};
use crate::help::Help;
use crate::planner::Planner;
use crate::store::{KeyValue, StoreError};
use crate::theme::BASE_STYLE;
use crate::view::{
    ColorMenu, DescriptionView, LineEditor, MonthState, MonthView, TextEditor, WeekView,
};
use crate::week::{ANCHORS_PER_DAY, ANCHOR_LABELS, GOLDEN, TRANSPARENT};
use crossterm::event::{read, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::Backend, buffer::Buffer, layout::Rect, widgets::Widget, Terminal};
use std::io::{self, Write};
use time::{Date, Duration};

#[derive(Debug)]
pub(crate) struct App<S> {
    planner: Planner<S>,
    today: Date,
    selected_day: usize,
    selected_slot: usize,
    state: AppState,
}

#[derive(Clone, Debug)]
enum AppState {
    Week,
    Month(MonthState),
    EditingText(LineEditor),
    EditingDescription(TextEditor),
    ColorMenu,
    Helping,
    Quitting,
}

impl<S: KeyValue> App<S> {
    pub(crate) fn new(planner: Planner<S>, today: Date) -> App<S> {
        let selected_day = if week_start_of(today) == planner.monday() {
            usize::from(today.weekday().number_days_from_monday())
        } else {
            0
        };
        App {
            planner,
            today,
            selected_day,
            selected_slot: 0,
            state: AppState::Week,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        while !self.quitting() {
            self.draw(terminal)?;
            self.handle_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> anyhow::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code)? {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `Ok(false)` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> anyhow::Result<bool> {
        match &self.state {
            AppState::Week => self.handle_week_key(key),
            AppState::Month(_) => self.handle_month_key(key),
            AppState::EditingText(_) => self.handle_text_key(key),
            AppState::EditingDescription(_) => self.handle_description_key(key),
            AppState::ColorMenu => self.handle_color_key(key),
            AppState::Helping => {
                self.state = AppState::Week;
                Ok(true)
            }
            AppState::Quitting => Ok(false),
        }
    }

    fn handle_week_key(&mut self, key: KeyCode) -> anyhow::Result<bool> {
        let handled = match key {
            KeyCode::Char('h') | KeyCode::Left => {
                if self.selected_day > 0 {
                    self.selected_day -= 1;
                    true
                } else {
                    false
                }
            }
            KeyCode::Char('l') | KeyCode::Right => {
                if self.selected_day + 1 < self.planner.week().days().len() {
                    self.selected_day += 1;
                    true
                } else {
                    false
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if self.selected_slot > 0 {
                    self.selected_slot -= 1;
                    true
                } else {
                    false
                }
            }
            KeyCode::Char('j') | KeyCode::Down => {
                if self.selected_slot + 1 < ANCHORS_PER_DAY {
                    self.selected_slot += 1;
                    true
                } else {
                    false
                }
            }
            KeyCode::Char('[') | KeyCode::PageUp => self.shift_week(-7)?,
            KeyCode::Char(']') | KeyCode::PageDown => self.shift_week(7)?,
            KeyCode::Char('0') | KeyCode::Home => {
                self.jump_to_today()?;
                true
            }
            KeyCode::Enter | KeyCode::Char('e') => {
                let text = self
                    .planner
                    .anchor(self.selected_day, self.selected_slot)
                    .text
                    .clone();
                self.state = AppState::EditingText(LineEditor::new(&text));
                true
            }
            KeyCode::Char('d') => {
                let description = self
                    .planner
                    .anchor(self.selected_day, self.selected_slot)
                    .description
                    .clone();
                self.state = AppState::EditingDescription(TextEditor::new(&description));
                true
            }
            KeyCode::Char('c') => {
                self.state = AppState::ColorMenu;
                true
            }
            KeyCode::Char('m') => {
                let month = MonthState::new(self.planner.monday(), &self.planner)?;
                self.state = AppState::Month(month);
                true
            }
            KeyCode::Char('?') => {
                self.state = AppState::Helping;
                true
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                self.state = AppState::Quitting;
                true
            }
            _ => false,
        };
        Ok(handled)
    }

    fn handle_month_key(&mut self, key: KeyCode) -> anyhow::Result<bool> {
        let AppState::Month(ref mut month) = self.state else {
            return Ok(false);
        };
        let cursor = month.cursor();
        let target = match key {
            KeyCode::Char('m' | 'q') | KeyCode::Esc => {
                self.state = AppState::Week;
                return Ok(true);
            }
            KeyCode::Enter => {
                self.planner.select_week(cursor)?;
                self.selected_day = usize::from(cursor.weekday().number_days_from_monday());
                self.selected_slot = 0;
                self.state = AppState::Week;
                return Ok(true);
            }
            KeyCode::Char('h') | KeyCode::Left => cursor.previous_day(),
            KeyCode::Char('l') | KeyCode::Right => cursor.next_day(),
            KeyCode::Char('k') | KeyCode::Up => cursor.checked_sub(Duration::days(7)),
            KeyCode::Char('j') | KeyCode::Down => cursor.checked_add(Duration::days(7)),
            KeyCode::Char('[') | KeyCode::PageUp => {
                let (year, month_name) = month_before(cursor.year(), cursor.month());
                Some(first_of_month(year, month_name))
            }
            KeyCode::Char(']') | KeyCode::PageDown => {
                let (year, month_name) = month_after(cursor.year(), cursor.month());
                Some(first_of_month(year, month_name))
            }
            KeyCode::Char('0') | KeyCode::Home => Some(self.today),
            _ => return Ok(false),
        };
        match target {
            Some(date) => {
                month.move_cursor(date, &self.planner)?;
                Ok(true)
            }
            // Walked off the supported calendar range.
            None => Ok(false),
        }
    }

    fn handle_text_key(&mut self, key: KeyCode) -> anyhow::Result<bool> {
        let AppState::EditingText(ref mut editor) = self.state else {
            return Ok(false);
        };
        let changed = match key {
            KeyCode::Enter | KeyCode::Esc => {
                self.state = AppState::Week;
                return Ok(true);
            }
            KeyCode::Char(c) => {
                editor.insert(c);
                true
            }
            KeyCode::Backspace => editor.backspace(),
            KeyCode::Left => return Ok(editor.left()),
            KeyCode::Right => return Ok(editor.right()),
            KeyCode::Home => return Ok(editor.home()),
            KeyCode::End => return Ok(editor.end()),
            _ => return Ok(false),
        };
        if changed {
            let text = editor.text();
            self.planner
                .set_anchor_text(self.selected_day, self.selected_slot, text)?;
        }
        Ok(changed)
    }

    fn handle_description_key(&mut self, key: KeyCode) -> anyhow::Result<bool> {
        let AppState::EditingDescription(ref mut editor) = self.state else {
            return Ok(false);
        };
        let changed = match key {
            KeyCode::Esc => {
                self.state = AppState::Week;
                return Ok(true);
            }
            KeyCode::Enter => {
                editor.newline();
                true
            }
            KeyCode::Char(c) => {
                editor.push(c);
                true
            }
            KeyCode::Backspace => editor.backspace(),
            _ => return Ok(false),
        };
        if changed {
            let description = editor.text().to_owned();
            self.planner
                .set_anchor_description(self.selected_day, self.selected_slot, description)?;
        }
        Ok(changed)
    }

    fn handle_color_key(&mut self, key: KeyCode) -> anyhow::Result<bool> {
        let token = match key {
            KeyCode::Esc | KeyCode::Char('c') => {
                self.state = AppState::Week;
                return Ok(true);
            }
            KeyCode::Char('g') => GOLDEN,
            KeyCode::Char('x') => TRANSPARENT,
            KeyCode::Char(c) => match c.to_digit(10).and_then(ColorMenu::token_for_digit) {
                Some(token) => token,
                None => return Ok(false),
            },
            _ => return Ok(false),
        };
        self.planner
            .set_anchor_color(self.selected_day, self.selected_slot, token)?;
        self.state = AppState::Week;
        Ok(true)
    }

    fn shift_week(&mut self, days: i64) -> Result<bool, StoreError> {
        let Some(target) = self.planner.monday().checked_add(Duration::days(days)) else {
            return Ok(false);
        };
        self.planner.select_week(target)?;
        Ok(true)
    }

    fn jump_to_today(&mut self) -> Result<(), StoreError> {
        self.planner.select_week(self.today)?;
        self.selected_day = usize::from(self.today.weekday().number_days_from_monday());
        Ok(())
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        matches!(self.state, AppState::Quitting)
    }
}

impl<S: KeyValue> Widget for &mut App<S> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        match &self.state {
            AppState::Month(month) => {
                MonthView {
                    state: month,
                    today: self.today,
                    open_monday: self.planner.monday(),
                }
                .render(area, buf);
            }
            AppState::EditingDescription(editor) => {
                let anchor = self.planner.anchor(self.selected_day, self.selected_slot);
                DescriptionView {
                    slot_label: ANCHOR_LABELS[self.selected_slot],
                    title: &anchor.text,
                    editor,
                }
                .render(area, buf);
            }
            state => {
                let editor = if let AppState::EditingText(editor) = state {
                    Some(editor)
                } else {
                    None
                };
                WeekView {
                    week: self.planner.week(),
                    monday: self.planner.monday(),
                    today: self.today,
                    selected_day: self.selected_day,
                    selected_slot: self.selected_slot,
                    editor,
                }
                .render(area, buf);
                if matches!(state, AppState::Helping) {
                    Help.render(area, buf);
                } else if matches!(state, AppState::ColorMenu) {
                    ColorMenu.render(area, buf);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, WeekStore};
    use time::macros::date;

    fn test_app() -> App<MemoryStore> {
        let planner = Planner::open(WeekStore::new(MemoryStore::default()), date!(2024 - 03 - 12))
            .expect("open succeeds");
        App::new(planner, date!(2024 - 03 - 12))
    }

    fn press(app: &mut App<MemoryStore>, keys: &[KeyCode]) {
        for &key in keys {
            app.handle_key(key).expect("key handling succeeds");
        }
    }

    fn type_chars(app: &mut App<MemoryStore>, text: &str) {
        for c in text.chars() {
            app.handle_key(KeyCode::Char(c)).expect("typing succeeds");
        }
    }

    #[test]
    fn test_initial_selection_is_today() {
        let app = test_app();
        assert_eq!(app.planner.monday(), date!(2024 - 03 - 11));
        assert_eq!(app.selected_day, 1);
        assert_eq!(app.selected_slot, 0);
    }

    #[test]
    fn test_navigation_clamps_at_edges() {
        let mut app = test_app();
        press(&mut app, &[KeyCode::Char('j')]);
        assert_eq!(app.selected_slot, 1);
        press(&mut app, &[KeyCode::Char('j'), KeyCode::Char('j')]);
        assert_eq!(app.selected_slot, 2);
        assert!(!app.handle_key(KeyCode::Char('j')).expect("handled"));
        press(&mut app, &[KeyCode::Char('h')]);
        assert_eq!(app.selected_day, 0);
        assert!(!app.handle_key(KeyCode::Char('h')).expect("handled"));
        press(&mut app, &[KeyCode::Right]);
        assert_eq!(app.selected_day, 1);
    }

    #[test]
    fn test_edit_writes_through_to_storage() {
        let mut app = test_app();
        press(&mut app, &[KeyCode::Enter]);
        type_chars(&mut app, "gym at noon");
        press(&mut app, &[KeyCode::Esc]);
        assert!(matches!(app.state, AppState::Week));
        assert_eq!(app.planner.anchor(1, 0).text, "gym at noon");

        // The record was persisted on every keystroke; reloading proves it.
        app.planner
            .select_week(date!(2024 - 03 - 12))
            .expect("reload succeeds");
        assert_eq!(app.planner.anchor(1, 0).text, "gym at noon");
    }

    #[test]
    fn test_backspace_during_edit() {
        let mut app = test_app();
        press(&mut app, &[KeyCode::Enter]);
        type_chars(&mut app, "read");
        press(&mut app, &[KeyCode::Backspace, KeyCode::Enter]);
        assert_eq!(app.planner.anchor(1, 0).text, "rea");
    }

    #[test]
    fn test_color_menu_tags_golden() {
        let mut app = test_app();
        press(&mut app, &[KeyCode::Char('c'), KeyCode::Char('g')]);
        assert!(matches!(app.state, AppState::Week));
        assert_eq!(app.planner.anchor(1, 0).color.as_deref(), Some(GOLDEN));
        assert!(app
            .planner
            .is_golden(date!(2024 - 03 - 12))
            .expect("lookup"));
        assert!(!app
            .planner
            .is_golden(date!(2024 - 03 - 13))
            .expect("lookup"));
    }

    #[test]
    fn test_color_menu_palette_and_reset() {
        let mut app = test_app();
        press(&mut app, &[KeyCode::Char('c'), KeyCode::Char('2')]);
        assert_eq!(app.planner.anchor(1, 0).color.as_deref(), Some("#E8F8F0"));
        press(&mut app, &[KeyCode::Char('c'), KeyCode::Char('x')]);
        assert_eq!(
            app.planner.anchor(1, 0).color.as_deref(),
            Some(TRANSPARENT)
        );
    }

    #[test]
    fn test_description_editing() {
        let mut app = test_app();
        press(&mut app, &[KeyCode::Char('d')]);
        type_chars(&mut app, "slow morning");
        press(&mut app, &[KeyCode::Enter]);
        type_chars(&mut app, "no screens");
        press(&mut app, &[KeyCode::Esc]);
        assert_eq!(
            app.planner.anchor(1, 0).description,
            "slow morning\nno screens"
        );
        assert_eq!(app.planner.anchor(1, 0).text, "");
    }

    #[test]
    fn test_week_paging_and_today() {
        let mut app = test_app();
        press(&mut app, &[KeyCode::Char(']')]);
        assert_eq!(app.planner.monday(), date!(2024 - 03 - 18));
        press(&mut app, &[KeyCode::Char(']')]);
        assert_eq!(app.planner.monday(), date!(2024 - 03 - 25));
        press(&mut app, &[KeyCode::Char('[')]);
        assert_eq!(app.planner.monday(), date!(2024 - 03 - 18));
        press(&mut app, &[KeyCode::Char('0')]);
        assert_eq!(app.planner.monday(), date!(2024 - 03 - 11));
        assert_eq!(app.selected_day, 1);
    }

    #[test]
    fn test_month_view_opens_selected_week() {
        let mut app = test_app();
        press(&mut app, &[KeyCode::Char('m')]);
        assert!(matches!(app.state, AppState::Month(_)));
        press(&mut app, &[KeyCode::Char(']'), KeyCode::Enter]);
        assert!(matches!(app.state, AppState::Week));
        assert_eq!(app.planner.monday(), date!(2024 - 04 - 01));
        assert_eq!(app.selected_day, 0);
    }

    #[test]
    fn test_month_cursor_movement() {
        let mut app = test_app();
        press(&mut app, &[KeyCode::Char('m')]);
        let AppState::Month(ref month) = app.state else {
            panic!("expected month state");
        };
        assert_eq!(month.cursor(), date!(2024 - 03 - 11));
        press(&mut app, &[KeyCode::Char('j'), KeyCode::Char('l')]);
        let AppState::Month(ref month) = app.state else {
            panic!("expected month state");
        };
        assert_eq!(month.cursor(), date!(2024 - 03 - 19));
        press(&mut app, &[KeyCode::Esc]);
        assert!(matches!(app.state, AppState::Week));
    }

    #[test]
    fn test_help_overlay_dismisses() {
        let mut app = test_app();
        press(&mut app, &[KeyCode::Char('?')]);
        assert!(matches!(app.state, AppState::Helping));
        press(&mut app, &[KeyCode::Char('x')]);
        assert!(matches!(app.state, AppState::Week));
    }

    #[test]
    fn test_quit_keys() {
        let mut app = test_app();
        press(&mut app, &[KeyCode::Char('q')]);
        assert!(app.quitting());
    }
}
