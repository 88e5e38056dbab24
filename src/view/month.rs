use crate::dates::{first_of_month, week_start_of};
use crate::planner::Planner;
use crate::store::{KeyValue, StoreError};
use crate::theme::{
    BASE_STYLE, CURRENT_WEEK_STYLE, GOLDEN_DAY_STYLE, HINT_STYLE, TITLE_STYLE, TODAY_STYLE,
    WEEKDAY_STYLE,
};
use crate::week::WEEKDAYS;
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    text::{Line, Span, Text},
    widgets::Widget,
};
use std::collections::HashSet;
use time::{Date, Month};

/// Cursor position and the golden-day set for the month under view.
///
/// The set is rebuilt from storage whenever the cursor crosses into a
/// different month; within a month the view is a pure function of it.
#[derive(Clone, Debug)]
pub(crate) struct MonthState {
    cursor: Date,
    golden: HashSet<Date>,
}

impl MonthState {
    pub(crate) fn new<S: KeyValue>(
        cursor: Date,
        planner: &Planner<S>,
    ) -> Result<MonthState, StoreError> {
        let golden = golden_days(cursor.year(), cursor.month(), planner)?;
        Ok(MonthState { cursor, golden })
    }

    pub(crate) fn cursor(&self) -> Date {
        self.cursor
    }

    pub(crate) fn move_cursor<S: KeyValue>(
        &mut self,
        target: Date,
        planner: &Planner<S>,
    ) -> Result<(), StoreError> {
        let month_changed =
            (target.year(), target.month()) != (self.cursor.year(), self.cursor.month());
        self.cursor = target;
        if month_changed {
            self.golden = golden_days(target.year(), target.month(), planner)?;
        }
        Ok(())
    }

    pub(crate) fn is_golden_day(&self, date: Date) -> bool {
        self.golden.contains(&date)
    }
}

fn golden_days<S: KeyValue>(
    year: i32,
    month: Month,
    planner: &Planner<S>,
) -> Result<HashSet<Date>, StoreError> {
    let mut golden = HashSet::new();
    let mut date = first_of_month(year, month);
    loop {
        if planner.is_golden(date)? {
            golden.insert(date);
        }
        match date.next_day() {
            Some(next) if next.month() == month => date = next,
            _ => break,
        }
    }
    Ok(golden)
}

/// Cells of a Monday-first month grid: leading `None`s up to the weekday
/// of the 1st, then every day of the month.
pub(crate) fn month_cells(year: i32, month: Month) -> Vec<Option<Date>> {
    let first = first_of_month(year, month);
    let offset = usize::from(first.weekday().number_days_from_monday());
    let mut cells: Vec<Option<Date>> = vec![None; offset];
    let mut date = Some(first);
    while let Some(day) = date {
        if day.month() != month {
            break;
        }
        cells.push(Some(day));
        date = day.next_day();
    }
    cells
}

const EMPTY_CELL: &str = "    ";

#[derive(Clone, Copy, Debug)]
pub(crate) struct MonthView<'a> {
    pub(crate) state: &'a MonthState,
    pub(crate) today: Date,
    pub(crate) open_monday: Date,
}

impl MonthView<'_> {
    fn to_text(self) -> Text<'static> {
        let cursor = self.state.cursor();
        let title = format!(
            "{} {}",
            cursor.month().to_string().to_lowercase(),
            cursor.year()
        );
        let header = WEEKDAYS
            .iter()
            .map(|weekday| format!(" {} ", &weekday.to_string()[..2]))
            .collect::<String>();

        let mut lines = vec![
            Line::styled(title, TITLE_STYLE),
            Line::styled("", BASE_STYLE),
            Line::styled(header, WEEKDAY_STYLE),
        ];
        let cells = month_cells(cursor.year(), cursor.month());
        for row in cells.chunks(7) {
            let mut spans = Vec::with_capacity(7);
            for cell in row {
                spans.push(self.cell_span(*cell));
            }
            for _ in row.len()..7 {
                spans.push(Span::styled(EMPTY_CELL, BASE_STYLE));
            }
            lines.push(Line::from_iter(spans));
        }
        lines.push(Line::styled("", BASE_STYLE));
        lines.push(Line::styled(
            "ENTER open week   [ ] month   0 today   ESC back",
            HINT_STYLE,
        ));
        Text::from_iter(lines)
    }

    fn cell_span(self, cell: Option<Date>) -> Span<'static> {
        let Some(date) = cell else {
            return Span::styled(EMPTY_CELL, BASE_STYLE);
        };
        let day = date.day();
        let s = if date == self.state.cursor() {
            format!("[{day:2}]")
        } else {
            format!(" {day:2} ")
        };
        let style = if self.state.is_golden_day(date) {
            GOLDEN_DAY_STYLE
        } else if date == self.today {
            TODAY_STYLE
        } else if week_start_of(date) == self.open_monday {
            CURRENT_WEEK_STYLE
        } else {
            BASE_STYLE
        };
        Span::styled(s, style)
    }
}

impl Widget for MonthView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = self.to_text();
        let height = u16::try_from(text.height()).unwrap_or(u16::MAX).min(area.height);
        let [view_area] = Layout::vertical([height]).flex(Flex::Center).areas(area);
        text.centered().render(view_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, WeekStore};
    use crate::week::GOLDEN;
    use time::macros::date;

    #[test]
    fn test_month_cells_march_2024() {
        let cells = month_cells(2024, Month::March);
        // March 2024 opens on a Friday, four blanks ahead of it.
        assert_eq!(cells.len(), 35);
        assert!(cells[..4].iter().all(Option::is_none));
        assert_eq!(cells[4], Some(date!(2024 - 03 - 01)));
        assert_eq!(cells[34], Some(date!(2024 - 03 - 31)));
    }

    #[test]
    fn test_month_cells_monday_start() {
        let cells = month_cells(2024, Month::January);
        assert_eq!(cells.len(), 31);
        assert_eq!(cells[0], Some(date!(2024 - 01 - 01)));
    }

    #[test]
    fn test_month_cells_sunday_start() {
        let cells = month_cells(2024, Month::December);
        assert_eq!(cells.len(), 37);
        assert!(cells[..6].iter().all(Option::is_none));
        assert_eq!(cells[6], Some(date!(2024 - 12 - 01)));
    }

    #[test]
    fn test_golden_set_follows_storage() {
        let mut planner =
            Planner::open(WeekStore::new(MemoryStore::default()), date!(2024 - 03 - 12))
                .expect("open succeeds");
        planner
            .set_anchor_color(1, 2, GOLDEN)
            .expect("edit succeeds");
        let state = MonthState::new(date!(2024 - 03 - 01), &planner).expect("state builds");
        assert!(state.is_golden_day(date!(2024 - 03 - 12)));
        assert!(!state.is_golden_day(date!(2024 - 03 - 13)));
    }

    #[test]
    fn test_move_cursor_rebuilds_on_month_change() {
        let mut planner =
            Planner::open(WeekStore::new(MemoryStore::default()), date!(2024 - 03 - 12))
                .expect("open succeeds");
        planner
            .set_anchor_color(1, 0, GOLDEN)
            .expect("edit succeeds");
        let mut state = MonthState::new(date!(2024 - 04 - 01), &planner).expect("state builds");
        assert!(!state.is_golden_day(date!(2024 - 03 - 12)));
        state
            .move_cursor(date!(2024 - 03 - 31), &planner)
            .expect("move succeeds");
        assert!(state.is_golden_day(date!(2024 - 03 - 12)));
        assert_eq!(state.cursor(), date!(2024 - 03 - 31));
    }
}
