use crate::theme::{BASE_STYLE, HINT_STYLE, SUBTITLE_STYLE, TITLE_STYLE};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Margin, Rect},
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Widget, Wrap},
};

pub(crate) const CURSOR_MARK: char = '\u{258f}';

/// Single-line input over an anchor's text, with a movable cursor.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct LineEditor {
    chars: Vec<char>,
    cursor: usize,
}

impl LineEditor {
    pub(crate) fn new(initial: &str) -> LineEditor {
        let chars = initial.chars().collect::<Vec<_>>();
        let cursor = chars.len();
        LineEditor { chars, cursor }
    }

    pub(crate) fn insert(&mut self, c: char) {
        self.chars.insert(self.cursor, c);
        self.cursor += 1;
    }

    pub(crate) fn backspace(&mut self) -> bool {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.chars.remove(self.cursor);
            true
        } else {
            false
        }
    }

    pub(crate) fn left(&mut self) -> bool {
        if self.cursor > 0 {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    pub(crate) fn right(&mut self) -> bool {
        if self.cursor < self.chars.len() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    pub(crate) fn home(&mut self) -> bool {
        if self.cursor > 0 {
            self.cursor = 0;
            true
        } else {
            false
        }
    }

    pub(crate) fn end(&mut self) -> bool {
        if self.cursor < self.chars.len() {
            self.cursor = self.chars.len();
            true
        } else {
            false
        }
    }

    pub(crate) fn text(&self) -> String {
        self.chars.iter().collect()
    }

    /// The buffer with the cursor mark inserted, for inline rendering.
    pub(crate) fn display(&self) -> String {
        let mut s = String::with_capacity(self.chars.len() + 1);
        s.extend(&self.chars[..self.cursor]);
        s.push(CURSOR_MARK);
        s.extend(&self.chars[self.cursor..]);
        s
    }
}

/// Append-only multi-line input over an anchor's description.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct TextEditor {
    text: String,
}

impl TextEditor {
    pub(crate) fn new(initial: &str) -> TextEditor {
        TextEditor {
            text: initial.to_owned(),
        }
    }

    pub(crate) fn push(&mut self, c: char) {
        self.text.push(c);
    }

    pub(crate) fn newline(&mut self) {
        self.text.push('\n');
    }

    pub(crate) fn backspace(&mut self) -> bool {
        self.text.pop().is_some()
    }

    pub(crate) fn text(&self) -> &str {
        &self.text
    }
}

const COLUMN_WIDTH: u16 = 64;

/// Full-screen editing surface for one anchor's longer description.
#[derive(Clone, Copy, Debug)]
pub(crate) struct DescriptionView<'a> {
    pub(crate) slot_label: &'a str,
    pub(crate) title: &'a str,
    pub(crate) editor: &'a TextEditor,
}

impl Widget for DescriptionView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        Block::new().style(BASE_STYLE).render(area, buf);
        let [column] = Layout::horizontal([COLUMN_WIDTH.min(area.width)])
            .flex(Flex::Center)
            .areas(area);
        let column = column.inner(Margin::new(0, 1));
        let [header_area, body_area, hint_area] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(column);

        let title = if self.title.is_empty() {
            self.slot_label
        } else {
            self.title
        };
        let header = Text::from_iter([
            Line::styled("activity description", SUBTITLE_STYLE),
            Line::styled("", BASE_STYLE),
            Line::styled(title.to_owned(), TITLE_STYLE),
        ]);
        header.centered().render(header_area, buf);

        let mut body = self.editor.text().to_owned();
        body.push(CURSOR_MARK);
        Paragraph::new(body)
            .style(BASE_STYLE)
            .wrap(Wrap { trim: false })
            .render(body_area, buf);

        Line::styled("ESC  back to planner", HINT_STYLE)
            .centered()
            .render(hint_area, buf);
    }
}
