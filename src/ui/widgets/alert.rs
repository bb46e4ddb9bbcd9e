//! Modal alert box

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

/// Centered message box drawn over the screen
pub struct AlertWidget<'a> {
    message: &'a str,
}

impl<'a> AlertWidget<'a> {
    pub fn new(message: &'a str) -> Self {
        Self { message }
    }

    /// Popup area for the alert inside `area`
    pub fn area(area: Rect) -> Rect {
        let width = area.width.saturating_sub(4).clamp(1, 44);
        let [row] = Layout::vertical([Constraint::Length(7)]).flex(Flex::Center).areas(area);
        let [popup] = Layout::horizontal([Constraint::Length(width)]).flex(Flex::Center).areas(row);
        popup
    }
}

impl Widget for AlertWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = Self::area(area);
        Clear.render(popup, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .style(Style::default().bg(Color::Black).fg(Color::White));

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(self.message, Style::default().add_modifier(Modifier::BOLD))),
            Line::from(""),
            Line::from(Span::styled("[ OK ]", Style::default().fg(Color::Yellow))),
        ];

        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(popup, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_shows_message() {
        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        AlertWidget::new("Đã nhấn nút khác!").render(area, &mut buf);

        let popup = AlertWidget::area(area);
        let text: String = (popup.y..popup.bottom())
            .flat_map(|y| (popup.x..popup.right()).map(move |x| (x, y)))
            .map(|pos| buf[pos].symbol().to_string())
            .collect();
        assert!(text.contains("Đã nhấn nút khác!"));
        assert!(text.contains("[ OK ]"));
    }

    #[test]
    fn test_area_is_centered() {
        let popup = AlertWidget::area(Rect::new(0, 0, 60, 21));
        assert_eq!(popup, Rect::new(8, 7, 44, 7));
    }
}
