use crate::theme::{anchor_style, BASE_STYLE, GOLDEN_PILL_STYLE, HINT_STYLE, PALETTE};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Clear, Paragraph, Widget},
};

/// Popup offering the pastel palette plus the golden and reset sentinels.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct ColorMenu;

impl ColorMenu {
    /// The palette token for a digit key, if it names a palette entry.
    pub(crate) fn token_for_digit(digit: u32) -> Option<&'static str> {
        let idx = usize::try_from(digit).ok()?.checked_sub(1)?;
        PALETTE.get(idx).map(|(_, token)| *token)
    }

    fn to_text() -> Text<'static> {
        let mut lines = Vec::with_capacity(PALETTE.len() + 4);
        for (idx, (name, token)) in PALETTE.iter().enumerate() {
            lines.push(Line::from_iter([
                Span::styled(format!(" {} ", idx + 1), BASE_STYLE),
                Span::styled("  ", anchor_style(Some(token))),
                Span::styled(format!("  {name}"), BASE_STYLE),
            ]));
        }
        lines.push(Line::from_iter([
            Span::styled(" g ".to_owned(), BASE_STYLE),
            Span::styled("  ", GOLDEN_PILL_STYLE),
            Span::styled("  golden".to_owned(), BASE_STYLE),
        ]));
        lines.push(Line::styled(" x     reset", BASE_STYLE));
        lines.push(Line::styled("", BASE_STYLE));
        lines.push(Line::styled(" ESC   cancel", HINT_STYLE));
        Text::from_iter(lines)
    }
}

impl Widget for ColorMenu {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Self::to_text();
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .min(area.height)
            .saturating_add(2);
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .min(area.width)
            .saturating_add(4);
        let [menu_area] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [menu_area] = Layout::vertical([height]).flex(Flex::Center).areas(menu_area);
        Clear.render(menu_area, buf);
        Block::new().style(BASE_STYLE).render(menu_area, buf);
        Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(" color ")
                    .title_alignment(Alignment::Center),
            )
            .style(BASE_STYLE)
            .render(menu_area, buf);
    }
}
