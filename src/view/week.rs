use crate::theme::{
    anchor_style, BASE_STYLE, HINT_STYLE, PLACEHOLDER_STYLE, SELECTED_STYLE, SUBTITLE_STYLE,
    TITLE_STYLE, TODAY_STYLE,
};
use crate::view::editor::LineEditor;
use crate::week::{Week, ANCHOR_LABELS, ANCHORS_PER_DAY, WEEKDAYS};
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    text::{Line, Span, Text},
    widgets::Widget,
};
use time::{Date, Duration};

const PILL_WIDTH: usize = 36;
const SLOT_MARKER: &str = "\u{25b8} ";

#[derive(Clone, Copy, Debug)]
pub(crate) struct WeekView<'a> {
    pub(crate) week: &'a Week,
    pub(crate) monday: Date,
    pub(crate) today: Date,
    pub(crate) selected_day: usize,
    pub(crate) selected_slot: usize,
    pub(crate) editor: Option<&'a LineEditor>,
}

impl WeekView<'_> {
    fn to_text(self) -> Text<'static> {
        let mut lines = vec![
            Line::styled("kiyo", TITLE_STYLE),
            Line::styled("weekly intentions", SUBTITLE_STYLE),
            Line::styled("", BASE_STYLE),
            self.strip_line(),
            Line::styled("", BASE_STYLE),
            self.heading_line(),
            Line::styled("", BASE_STYLE),
        ];
        for slot in 0..ANCHORS_PER_DAY {
            lines.push(self.pill_line(slot));
            lines.push(Line::styled("", BASE_STYLE));
        }
        lines.push(Line::styled(
            "ENTER edit   d describe   c color   m month   ? help",
            HINT_STYLE,
        ));
        Text::from_iter(lines)
    }

    // One cell per day, e.g. ` Mon 11 `, with today and the selection marked.
    fn strip_line(self) -> Line<'static> {
        let mut spans = Vec::with_capacity(WEEKDAYS.len());
        for (idx, weekday) in WEEKDAYS.iter().enumerate() {
            let date = self
                .monday
                .checked_add(Duration::days(idx as i64))
                .expect("week fits in the supported calendar range");
            let label = format!(" {} {:>2} ", &weekday.to_string()[..3], date.day());
            let style = if idx == self.selected_day {
                SELECTED_STYLE
            } else if date == self.today {
                TODAY_STYLE
            } else {
                BASE_STYLE
            };
            spans.push(Span::styled(label, style));
        }
        Line::from_iter(spans)
    }

    fn heading_line(self) -> Line<'static> {
        let day = &self.week.days()[self.selected_day];
        Line::styled(format!("{}, {}", day.name, day.date), TITLE_STYLE)
    }

    fn pill_line(self, slot: usize) -> Line<'static> {
        let anchor = &self.week.days()[self.selected_day].anchors[slot];
        let selected = slot == self.selected_slot;
        let (content, style) = if let (true, Some(editor)) = (selected, self.editor) {
            (editor.display(), SELECTED_STYLE)
        } else if anchor.text.is_empty() {
            (ANCHOR_LABELS[slot].to_owned(), PLACEHOLDER_STYLE)
        } else {
            let mut text = anchor.text.clone();
            if !anchor.description.is_empty() {
                text.push_str(" \u{2026}");
            }
            (text, anchor_style(anchor.color.as_deref()))
        };
        let marker = if selected && self.editor.is_none() {
            SLOT_MARKER
        } else {
            "  "
        };
        let width = PILL_WIDTH;
        Line::from_iter([
            Span::styled(marker.to_owned(), BASE_STYLE),
            Span::styled(format!("{content:^width$}"), style),
            Span::styled("  ", BASE_STYLE),
        ])
    }
}

impl Widget for WeekView<'_> {
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
    use crate::theme::GOLDEN_PILL_STYLE;
    use crate::week::GOLDEN;
    use time::macros::date;

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    fn view(week: &Week) -> WeekView<'_> {
        WeekView {
            week,
            monday: date!(2024 - 03 - 11),
            today: date!(2024 - 03 - 12),
            selected_day: 2,
            selected_slot: 0,
            editor: None,
        }
    }

    #[test]
    fn test_strip_shows_all_seven_days() {
        let week = Week::fresh(date!(2024 - 03 - 11));
        let text = view(&week).to_text();
        let strip = line_text(&text.lines[3]);
        assert!(strip.contains("Mon 11"));
        assert!(strip.contains("Wed 13"));
        assert!(strip.contains("Sun 17"));
    }

    #[test]
    fn test_heading_names_selected_day() {
        let week = Week::fresh(date!(2024 - 03 - 11));
        let text = view(&week).to_text();
        assert_eq!(line_text(&text.lines[5]), "Wednesday, 13 Mar");
    }

    #[test]
    fn test_empty_pills_show_placeholders() {
        let week = Week::fresh(date!(2024 - 03 - 11));
        let text = view(&week).to_text();
        assert!(line_text(&text.lines[7]).contains("morning intention"));
        assert!(line_text(&text.lines[9]).contains("daily movement"));
        assert!(line_text(&text.lines[11]).contains("evening rest"));
    }

    #[test]
    fn test_golden_anchor_gets_golden_pill() {
        let mut week = Week::fresh(date!(2024 - 03 - 11));
        week.days_mut()[2].anchors[0].text = "rest day".to_owned();
        week.days_mut()[2].anchors[0].color = Some(GOLDEN.to_owned());
        let text = view(&week).to_text();
        let pill = &text.lines[7].spans[1];
        assert!(pill.content.contains("rest day"));
        assert_eq!(pill.style, GOLDEN_PILL_STYLE);
    }

    #[test]
    fn test_description_marker_on_pill() {
        let mut week = Week::fresh(date!(2024 - 03 - 11));
        week.days_mut()[2].anchors[1].text = "gym".to_owned();
        week.days_mut()[2].anchors[1].description = "legs".to_owned();
        let text = view(&week).to_text();
        assert!(line_text(&text.lines[9]).contains("gym \u{2026}"));
    }

    #[test]
    fn test_editing_pill_shows_cursor() {
        let week = Week::fresh(date!(2024 - 03 - 11));
        let editor = LineEditor::new("dra");
        let mut v = view(&week);
        v.editor = Some(&editor);
        let text = v.to_text();
        assert!(line_text(&text.lines[7]).contains(&editor.display()));
    }
}
