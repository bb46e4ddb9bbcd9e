//! Text input widget for ratatui
//!
//! A bordered box with centered text and a placeholder.

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Widget},
};

use crate::form::TextField;

/// Widget for rendering one form field
pub struct TextInputWidget<'a> {
    field: &'a TextField,
    placeholder: &'a str,
    focused: bool,
}

impl<'a> TextInputWidget<'a> {
    pub fn new(field: &'a TextField) -> Self {
        Self {
            field,
            placeholder: "",
            focused: false,
        }
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Where the terminal cursor belongs when this field has focus
    pub fn cursor_position(field: &TextField, area: Rect) -> Option<Position> {
        let inner = inner(area);
        if inner.width == 0 || inner.height == 0 {
            return None;
        }
        let len = field.value().chars().count() as u16;
        let start = inner.x + inner.width.saturating_sub(len) / 2;
        let x = (start + len).min(inner.right().saturating_sub(1));
        Some(Position::new(x, inner.y))
    }
}

fn inner(area: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(area)
}

impl Widget for TextInputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_color = if self.focused { Color::White } else { Color::Gray };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(Color::White));

        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let (text, style) = if self.field.is_empty() {
            (self.placeholder, Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC))
        } else {
            (self.field.value(), Style::default().fg(Color::Black).add_modifier(Modifier::BOLD))
        };

        // Center, truncating placeholders that do not fit
        let shown: String = text.chars().take(inner.width as usize).collect();
        let len = shown.chars().count() as u16;
        let x = inner.x + (inner.width - len) / 2;
        buf.set_string(x, inner.y, &shown, style.bg(Color::White));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol().to_string()).collect()
    }

    #[test]
    fn test_placeholder_when_empty() {
        let field = TextField::new(2);
        let area = Rect::new(0, 0, 14, 3);
        let mut buf = Buffer::empty(area);

        TextInputWidget::new(&field).placeholder("Ngày (DD)").render(area, &mut buf);
        assert!(row(&buf, 1).contains("Ngày (DD)"));
    }

    #[test]
    fn test_value_replaces_placeholder() {
        let mut field = TextField::new(2);
        field.set("07");
        let area = Rect::new(0, 0, 14, 3);
        let mut buf = Buffer::empty(area);

        TextInputWidget::new(&field).placeholder("Ngày (DD)").render(area, &mut buf);
        let line = row(&buf, 1);
        assert!(line.contains("07"));
        assert!(!line.contains("Ngày"));
    }

    #[test]
    fn test_cursor_follows_text() {
        let mut field = TextField::new(4);
        let area = Rect::new(0, 0, 12, 3);
        let empty = TextInputWidget::cursor_position(&field, area).unwrap();
        field.set("20");
        let typed = TextInputWidget::cursor_position(&field, area).unwrap();
        assert_eq!(typed.y, 1);
        assert!(typed.x > empty.x);
    }
}
