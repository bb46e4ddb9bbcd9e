//! Push button widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Widget},
};

const BUTTON_BLUE: Color = Color::Rgb(33, 150, 243);

/// A labelled button
pub struct ButtonWidget<'a> {
    label: &'a str,
    focused: bool,
    enabled: bool,
}

impl<'a> ButtonWidget<'a> {
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            focused: false,
            enabled: true,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

impl Widget for ButtonWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (bg, fg) = if self.enabled {
            (BUTTON_BLUE, Color::White)
        } else {
            (Color::Gray, Color::DarkGray)
        };
        let mut label_style = Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD);
        let border_style = if self.focused {
            label_style = label_style.add_modifier(Modifier::UNDERLINED);
            Style::default().fg(Color::White).bg(bg)
        } else {
            Style::default().fg(bg).bg(bg)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(if self.focused { BorderType::Double } else { BorderType::Plain })
            .border_style(border_style)
            .style(Style::default().bg(bg));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let label = self.label.to_uppercase();
        let shown: String = label.chars().take(inner.width as usize).collect();
        let len = shown.chars().count() as u16;
        let x = inner.x + (inner.width - len) / 2;
        let y = inner.y + inner.height / 2;
        buf.set_string(x, y, &shown, label_style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_is_centered() {
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        ButtonWidget::new("Xem Ngày").render(area, &mut buf);

        let line: String = (0..20).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert!(line.contains("XEM NGÀY"));
        assert_eq!(buf[(1, 1)].bg, BUTTON_BLUE);
    }

    #[test]
    fn test_disabled_is_grey() {
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        ButtonWidget::new("Xem Ngày").enabled(false).render(area, &mut buf);
        assert_eq!(buf[(1, 1)].bg, Color::Gray);
    }
}
