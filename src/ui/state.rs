//! Screen state and its transitions
//!
//! All screen behavior goes through [`ScreenState::apply`]; the event loop
//! only translates terminal events into [`Action`]s.

use chrono::NaiveDate;

use crate::calendar::{CalendarState, MarkedDates};
use crate::date::{day_info, SelectedDate};
use crate::form::{Field, FormInput, SubmitOutcome};
use crate::orientation::{OrientationState, WindowSize};

/// Shown after pressing the secondary button
pub const OTHER_ACTION_MESSAGE: &str = "Đã nhấn nút khác!";
/// Shown in the footer when submit is pressed on an incomplete form
pub const INCOMPLETE_HINT: &str = "Nhập đủ ngày, tháng và năm để xem ngày.";

/// Focusable elements, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(Field),
    Submit,
    Other,
    Calendar,
}

impl Focus {
    const ORDER: [Focus; 6] = [
        Focus::Field(Field::Day),
        Focus::Field(Field::Month),
        Focus::Field(Field::Year),
        Focus::Submit,
        Focus::Other,
        Focus::Calendar,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Blocking message box
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub message: String,
}

/// Everything the user can do to the screen
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Input(char),
    Backspace,
    FocusNext,
    FocusPrev,
    Focus(Focus),
    /// Enter or space on the focused element
    Activate,
    Submit,
    OtherAction,
    MoveCursor(i64),
    ShiftMonth { forward: bool },
    DayTapped(NaiveDate),
    Resized(WindowSize),
    DismissAlert,
    Quit,
}

/// What the event loop should do after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
}

/// State owned by the screen
#[derive(Debug, Clone)]
pub struct ScreenState {
    pub form: FormInput,
    pub selected: SelectedDate,
    pub marked: MarkedDates,
    pub calendar: CalendarState,
    pub selected_info: Option<String>,
    pub orientation: OrientationState,
    pub focus: Focus,
    pub alert: Option<Alert>,
    pub hint: Option<&'static str>,
    pub today: NaiveDate,
}

impl ScreenState {
    pub fn new(today: SelectedDate, size: WindowSize) -> Self {
        Self {
            form: FormInput::new(),
            selected: today,
            marked: MarkedDates::single(today.date()),
            calendar: CalendarState::new(today.date()),
            selected_info: None,
            orientation: OrientationState::from_size(size),
            focus: Focus::Field(Field::Day),
            alert: None,
            hint: None,
            today: today.date(),
        }
    }

    pub fn submit_enabled(&self) -> bool {
        self.form.is_complete()
    }

    /// Apply one action
    pub fn apply(&mut self, action: Action) -> Effect {
        // An open alert swallows everything except dismissal, resizes and quit
        if self.alert.is_some() {
            match action {
                Action::DismissAlert | Action::Activate => self.alert = None,
                Action::Resized(size) => self.resize(size),
                Action::Quit => return Effect::Quit,
                _ => {}
            }
            return Effect::None;
        }

        match action {
            Action::Input(c) => {
                if let Focus::Field(field) = self.focus {
                    if self.form.field_mut(field).push(c) {
                        self.hint = None;
                    }
                }
            }
            Action::Backspace => {
                if let Focus::Field(field) = self.focus {
                    self.form.field_mut(field).backspace();
                    self.hint = None;
                }
            }
            Action::FocusNext => self.focus = self.focus.next(),
            Action::FocusPrev => self.focus = self.focus.prev(),
            Action::Focus(focus) => self.focus = focus,
            Action::Activate => {
                return match self.focus {
                    Focus::Field(_) | Focus::Submit => self.apply(Action::Submit),
                    Focus::Other => self.apply(Action::OtherAction),
                    Focus::Calendar => self.apply(Action::DayTapped(self.calendar.cursor())),
                };
            }
            Action::Submit => self.submit(),
            Action::OtherAction => {
                log::debug!("Secondary button pressed");
                self.alert = Some(Alert {
                    message: OTHER_ACTION_MESSAGE.to_string(),
                });
            }
            Action::MoveCursor(days) => self.calendar.move_cursor(days),
            Action::ShiftMonth { forward } => self.calendar.shift_month(forward),
            Action::DayTapped(date) => {
                let info = day_info(date);
                log::info!("Day tapped: {}", info);
                self.calendar.set_current(date);
                self.selected_info = Some(info);
            }
            Action::Resized(size) => self.resize(size),
            Action::DismissAlert => {}
            Action::Quit => return Effect::Quit,
        }

        Effect::None
    }

    fn submit(&mut self) {
        match self.form.submit() {
            SubmitOutcome::Incomplete => {
                log::debug!("Submit ignored, form incomplete");
                self.hint = Some(INCOMPLETE_HINT);
            }
            SubmitOutcome::Accepted(date) => {
                log::info!("Selected date {}", date);
                self.selected = date;
                self.marked = MarkedDates::single(date.date());
                self.calendar.set_current(date.date());
                self.hint = None;
            }
            SubmitOutcome::Rejected(e) => {
                log::info!("Rejected date input: {:?}", e);
                self.alert = Some(Alert {
                    message: e.to_string(),
                });
            }
        }
    }

    fn resize(&mut self, size: WindowSize) {
        let next = OrientationState::from_size(size);
        if next.portrait != self.orientation.portrait {
            log::info!("Orientation changed to {:?}", next.orientation());
        }
        self.orientation = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orientation::{StatusBarStyle, DARK_GREEN, LIGHT_GREEN};

    fn state() -> ScreenState {
        let today = crate::date::validate(15, 6, 2024).unwrap();
        ScreenState::new(today, WindowSize::new(400.0, 800.0))
    }

    fn type_into(state: &mut ScreenState, field: Field, text: &str) {
        state.apply(Action::Focus(Focus::Field(field)));
        for c in text.chars() {
            state.apply(Action::Input(c));
        }
    }

    #[test]
    fn test_starts_on_today() {
        let state = state();
        assert_eq!(state.selected.to_string(), "2024-06-15");
        assert!(state.marked.get(state.today).is_some());
        assert!(!state.submit_enabled());
    }

    #[test]
    fn test_accepted_submission() {
        let mut state = state();
        type_into(&mut state, Field::Day, "29");
        type_into(&mut state, Field::Month, "2");
        type_into(&mut state, Field::Year, "2024");
        assert!(state.submit_enabled());

        state.apply(Action::Submit);

        assert_eq!(state.selected.to_string(), "2024-02-29");
        assert!(state.form.day.is_empty() && state.form.month.is_empty() && state.form.year.is_empty());
        assert_eq!(state.calendar.visible_month(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert!(state.marked.get(state.selected.date()).is_some());
        assert_eq!(state.marked.len(), 1);
        assert!(state.alert.is_none());
    }

    #[test]
    fn test_rejected_submission_keeps_input() {
        let mut state = state();
        type_into(&mut state, Field::Day, "31");
        type_into(&mut state, Field::Month, "4");
        type_into(&mut state, Field::Year, "2024");

        state.apply(Action::Submit);

        assert_eq!(state.selected.to_string(), "2024-06-15");
        assert_eq!(state.form.day.value(), "31");
        assert_eq!(state.form.month.value(), "4");
        assert_eq!(state.form.year.value(), "2024");
        assert_eq!(
            state.alert.as_ref().map(|a| a.message.as_str()),
            Some("Ngày, tháng hoặc năm không hợp lệ.")
        );
    }

    #[test]
    fn test_incomplete_submission_changes_nothing() {
        let mut state = state();
        type_into(&mut state, Field::Day, "1");
        type_into(&mut state, Field::Year, "2024");
        let form_before = state.form.clone();

        state.apply(Action::Submit);

        assert_eq!(state.form, form_before);
        assert_eq!(state.selected.to_string(), "2024-06-15");
        assert!(state.alert.is_none());
        assert_eq!(state.hint, Some(INCOMPLETE_HINT));
    }

    #[test]
    fn test_alert_blocks_input() {
        let mut state = state();
        state.apply(Action::Focus(Focus::Other));
        state.apply(Action::Activate);
        assert_eq!(state.alert.as_ref().map(|a| a.message.as_str()), Some(OTHER_ACTION_MESSAGE));

        state.apply(Action::Focus(Focus::Field(Field::Day)));
        state.apply(Action::Input('4'));
        assert_eq!(state.focus, Focus::Other);
        assert!(state.form.day.is_empty());

        state.apply(Action::DismissAlert);
        assert!(state.alert.is_none());
    }

    #[test]
    fn test_day_tap_sets_info_only() {
        let mut state = state();
        let tapped = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();

        state.apply(Action::DayTapped(tapped));

        assert_eq!(state.selected_info.as_deref(), Some("3-6-2024"));
        assert_eq!(state.selected.to_string(), "2024-06-15");
    }

    #[test]
    fn test_resize_updates_orientation() {
        let mut state = state();
        assert_eq!(state.orientation.background, LIGHT_GREEN);

        state.apply(Action::Resized(WindowSize::new(800.0, 400.0)));
        assert!(!state.orientation.portrait);
        assert_eq!(state.orientation.status_bar, StatusBarStyle::Light);
        assert_eq!(state.orientation.background, DARK_GREEN);
    }

    #[test]
    fn test_focus_cycles() {
        let mut state = state();
        for _ in 0..6 {
            state.apply(Action::FocusNext);
        }
        assert_eq!(state.focus, Focus::Field(Field::Day));
        state.apply(Action::FocusPrev);
        assert_eq!(state.focus, Focus::Calendar);
    }

    #[test]
    fn test_quit() {
        let mut state = state();
        assert_eq!(state.apply(Action::Quit), Effect::Quit);
    }
}
