//! Main UI Application
//!
//! Owns the screen state, the dimension subscription and the picture, and
//! translates terminal events into state actions.

use std::cell::Cell;
use std::io::{self, Write};
use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use crate::calendar::CalendarWidget;
use crate::config::ScreenConfig;
use crate::date::SelectedDate;
use crate::form::Field;
use crate::orientation::{Dimensions, HeaderSize, Subscription, WindowSize};
use crate::render::{KittyGraphics, Picture, PictureWidget, RenderMode};
use super::layout::ScreenLayout;
use super::state::{Action, Effect, Focus, ScreenState};
use super::widgets::{AlertWidget, ButtonWidget, TextInputWidget};

pub const TITLE: &str = "Lịch";
pub const SUBMIT_LABEL: &str = "Xem Ngày";
pub const OTHER_LABEL: &str = "Hành Động Khác";
pub const SELECTED_INFO_PREFIX: &str = "Ngày đã chọn: ";

const KEY_HELP: &str = "Tab: chuyển • Enter: chọn • Esc: thoát";

/// Kitty upload state for the picture
struct KittyPicture {
    graphics: KittyGraphics,
    image_id: Option<u32>,
}

/// Main UI application
pub struct App {
    state: ScreenState,
    /// Latest size reported by the dimension listener, not yet applied
    pending_size: Rc<Cell<Option<WindowSize>>>,
    /// Keeps the dimension listener registered while the screen is mounted
    subscription: Option<Subscription>,
    picture: Picture,
    render_mode: RenderMode,
    kitty: Option<KittyPicture>,
    cell_aspect: f32,
    /// Layout of the last drawn frame, for mouse hit-testing
    layout: ScreenLayout,
}

impl App {
    /// Mount the screen: subscribe to dimension changes and load the picture
    pub fn mount(dimensions: &Dimensions, config: &ScreenConfig, today: SelectedDate) -> Self {
        let initial = dimensions.current().unwrap_or(WindowSize::new(0.0, 1.0));

        let pending_size = Rc::new(Cell::new(None));
        let sink = Rc::clone(&pending_size);
        let subscription = dimensions.add_listener(move |size| sink.set(Some(size)));
        log::info!("Screen mounted");

        let picture = Picture::bundled().unwrap_or_else(|e| {
            log::warn!("{}. Using placeholder picture.", e);
            Picture::placeholder()
        });

        let render_mode = config.image.resolve();
        log::info!("Using render mode: {}", render_mode.name());
        let kitty = render_mode.supports_images().then(|| KittyPicture {
            graphics: KittyGraphics::new(),
            image_id: None,
        });

        Self {
            state: ScreenState::new(today, initial),
            pending_size,
            subscription: Some(subscription),
            picture,
            render_mode,
            kitty,
            cell_aspect: config.effective_cell_aspect(),
            layout: ScreenLayout::default(),
        }
    }

    /// Unmount the screen: release the subscription and any terminal images
    pub fn unmount(mut self, out: &mut impl Write) -> io::Result<()> {
        self.subscription.take();
        if let Some(kitty) = self.kitty.as_mut() {
            kitty.graphics.clear_all(out)?;
        }
        log::info!("Screen unmounted");
        Ok(())
    }

    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    /// Apply the newest size delivered by the dimension listener
    pub fn sync_dimensions(&mut self) {
        if let Some(size) = self.pending_size.take() {
            self.state.apply(Action::Resized(size));
        }
    }

    pub fn dispatch(&mut self, action: Action) -> Effect {
        self.state.apply(action)
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) -> Effect {
        match self.key_action(key) {
            Some(action) => self.dispatch(action),
            None => Effect::None,
        }
    }

    fn key_action(&self, key: KeyEvent) -> Option<Action> {
        // Global quit shortcut
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c'))
        {
            return Some(Action::Quit);
        }

        if self.state.alert.is_some() {
            return match key.code {
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => Some(Action::DismissAlert),
                _ => None,
            };
        }

        match key.code {
            KeyCode::Esc => return Some(Action::Quit),
            KeyCode::Tab => return Some(Action::FocusNext),
            KeyCode::BackTab => return Some(Action::FocusPrev),
            _ => {}
        }

        match self.state.focus {
            Focus::Field(_) => match key.code {
                KeyCode::Char(c) => Some(Action::Input(c)),
                KeyCode::Backspace => Some(Action::Backspace),
                KeyCode::Enter => Some(Action::Submit),
                KeyCode::Right => Some(Action::FocusNext),
                KeyCode::Left => Some(Action::FocusPrev),
                _ => None,
            },
            Focus::Submit | Focus::Other => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Activate),
                KeyCode::Right | KeyCode::Down => Some(Action::FocusNext),
                KeyCode::Left | KeyCode::Up => Some(Action::FocusPrev),
                _ => None,
            },
            Focus::Calendar => match key.code {
                KeyCode::Left | KeyCode::Char('h') => Some(Action::MoveCursor(-1)),
                KeyCode::Right | KeyCode::Char('l') => Some(Action::MoveCursor(1)),
                KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveCursor(-7)),
                KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveCursor(7)),
                KeyCode::PageUp => Some(Action::ShiftMonth { forward: false }),
                KeyCode::PageDown => Some(Action::ShiftMonth { forward: true }),
                KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Activate),
                _ => None,
            },
        }
    }

    /// Handle mouse input; only left clicks do anything
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Effect {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Effect::None;
        }
        if self.state.alert.is_some() {
            let popup = AlertWidget::area(self.layout.status.union(self.layout.footer));
            if popup.contains((mouse.column, mouse.row).into()) {
                return self.dispatch(Action::DismissAlert);
            }
            return Effect::None;
        }

        for action in self.click_actions(mouse.column, mouse.row) {
            if self.dispatch(action) == Effect::Quit {
                return Effect::Quit;
            }
        }
        Effect::None
    }

    fn click_actions(&self, column: u16, row: u16) -> Vec<Action> {
        let hit = |rect: Rect| rect.contains((column, row).into());

        for (rect, field) in self.layout.inputs.iter().zip(Field::ALL) {
            if hit(*rect) {
                return vec![Action::Focus(Focus::Field(field))];
            }
        }

        let [submit, other] = self.layout.buttons;
        if hit(submit) {
            return vec![Action::Focus(Focus::Submit), Action::Activate];
        }
        if hit(other) {
            return vec![Action::Focus(Focus::Other), Action::Activate];
        }

        if hit(self.layout.calendar) {
            let mut actions = vec![Action::Focus(Focus::Calendar)];
            if let Some(date) = self.state.calendar.day_at(self.layout.calendar, column, row) {
                actions.push(Action::DayTapped(date));
            }
            return actions;
        }

        Vec::new()
    }

    /// Render the screen
    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let state = &self.state;
        let orientation = &state.orientation;
        self.layout = ScreenLayout::compute(area, orientation, self.cell_aspect, state.selected_info.is_some());
        let layout = self.layout;

        frame.render_widget(Block::default().style(Style::default().bg(orientation.background)), area);

        // Status bar
        let bar_style = Style::default().fg(orientation.status_bar.text_color()).bg(orientation.background);
        let clock = chrono::Local::now().format("%H:%M").to_string();
        let status = Line::from(vec![
            Span::styled(format!(" {}", clock), bar_style.add_modifier(Modifier::BOLD)),
            Span::styled(format!("  {}", state.selected), bar_style),
        ]);
        frame.render_widget(Paragraph::new(status), layout.status);

        // Header
        let header_style = match orientation.header_size() {
            HeaderSize::Large => Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            HeaderSize::Small => Style::default().add_modifier(Modifier::BOLD),
        };
        frame.render_widget(
            Paragraph::new(Line::styled(TITLE, header_style.fg(orientation.status_bar.text_color())))
                .alignment(Alignment::Center),
            layout.header,
        );

        // Date fields
        for (rect, field) in layout.inputs.iter().zip(Field::ALL) {
            let focused = state.focus == Focus::Field(field);
            let text_field = state.form.field(field);
            frame.render_widget(
                TextInputWidget::new(text_field)
                    .placeholder(field.placeholder())
                    .focused(focused),
                *rect,
            );
            if focused && state.alert.is_none() {
                if let Some(position) = TextInputWidget::cursor_position(text_field, *rect) {
                    frame.set_cursor_position(position);
                }
            }
        }

        // Buttons
        frame.render_widget(
            ButtonWidget::new(SUBMIT_LABEL)
                .focused(state.focus == Focus::Submit)
                .enabled(state.submit_enabled()),
            layout.buttons[0],
        );
        frame.render_widget(
            ButtonWidget::new(OTHER_LABEL).focused(state.focus == Focus::Other),
            layout.buttons[1],
        );

        // Calendar
        frame.render_widget(
            CalendarWidget::new(&state.calendar, &state.marked)
                .today(state.today)
                .focused(state.focus == Focus::Calendar),
            layout.calendar,
        );

        if let Some(info) = &state.selected_info {
            let text = format!("{}{}", SELECTED_INFO_PREFIX, info);
            frame.render_widget(
                Paragraph::new(Line::styled(text, Style::default().fg(Color::Black)))
                    .alignment(Alignment::Center),
                layout.info,
            );
        }

        frame.render_widget(PictureWidget::new(&self.picture, self.render_mode), layout.image);

        let footer_text = state.hint.unwrap_or(KEY_HELP);
        frame.render_widget(
            Paragraph::new(Line::styled(footer_text, bar_style)).alignment(Alignment::Center),
            layout.footer,
        );

        if let Some(alert) = &state.alert {
            frame.render_widget(AlertWidget::new(&alert.message), area);
        }
    }

    /// Place terminal images after a frame has been drawn
    pub fn place_images(&mut self, out: &mut impl Write) -> io::Result<()> {
        let Some(kitty) = self.kitty.as_mut() else {
            return Ok(());
        };

        let image_id = match kitty.image_id {
            Some(id) => id,
            None => {
                let id = kitty.graphics.upload_image(out, self.picture.image())?;
                kitty.image_id = Some(id);
                id
            }
        };

        // Hide the picture while an alert is open so it cannot cover the popup
        let area = if self.state.alert.is_some() {
            Rect::default()
        } else {
            self.layout.image
        };
        kitty.graphics.place(out, image_id, area)
    }
}
