//! Date entry form
//!
//! Three numeric fields and the submit state machine:
//! Editing -> Validating -> Accepted | Rejected -> Editing.

use crate::date::{parse_and_validate, DateError, SelectedDate};

/// One of the three date fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Day,
    Month,
    Year,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Day, Field::Month, Field::Year];

    pub fn placeholder(&self) -> &'static str {
        match self {
            Field::Day => "Ngày (DD)",
            Field::Month => "Tháng (MM)",
            Field::Year => "Năm (YYYY)",
        }
    }

    pub fn max_len(&self) -> usize {
        match self {
            Field::Day | Field::Month => 2,
            Field::Year => 4,
        }
    }
}

/// A numeric text field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: String,
    max_len: usize,
}

impl TextField {
    pub fn new(max_len: usize) -> Self {
        Self {
            value: String::new(),
            max_len,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Append a character; only digits are taken, up to the field length
    pub fn push(&mut self, c: char) -> bool {
        if c.is_ascii_digit() && self.value.len() < self.max_len {
            self.value.push(c);
            true
        } else {
            false
        }
    }

    pub fn backspace(&mut self) {
        self.value.pop();
    }

    /// Replace the contents, keeping only what the field would accept
    pub fn set(&mut self, text: &str) {
        self.value.clear();
        for c in text.chars() {
            self.push(c);
        }
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }
}

/// Result of pressing submit
///
/// Validation happens inside [`FormInput::submit`], so the form itself only
/// ever rests in editing; the accepted or rejected step is this value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// At least one field is empty; nothing changed
    Incomplete,
    Accepted(SelectedDate),
    Rejected(DateError),
}

/// The day/month/year form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInput {
    pub day: TextField,
    pub month: TextField,
    pub year: TextField,
}

impl Default for FormInput {
    fn default() -> Self {
        Self::new()
    }
}

impl FormInput {
    pub fn new() -> Self {
        Self {
            day: TextField::new(Field::Day.max_len()),
            month: TextField::new(Field::Month.max_len()),
            year: TextField::new(Field::Year.max_len()),
        }
    }

    pub fn field(&self, field: Field) -> &TextField {
        match field {
            Field::Day => &self.day,
            Field::Month => &self.month,
            Field::Year => &self.year,
        }
    }

    pub fn field_mut(&mut self, field: Field) -> &mut TextField {
        match field {
            Field::Day => &mut self.day,
            Field::Month => &mut self.month,
            Field::Year => &mut self.year,
        }
    }

    /// All three fields have a value
    pub fn is_complete(&self) -> bool {
        Field::ALL.iter().all(|f| !self.field(*f).is_empty())
    }

    pub fn clear(&mut self) {
        self.day.clear();
        self.month.clear();
        self.year.clear();
    }

    /// Run validation on the current fields
    ///
    /// Accepted clears the fields; rejected keeps them.
    pub fn submit(&mut self) -> SubmitOutcome {
        if !self.is_complete() {
            return SubmitOutcome::Incomplete;
        }

        match parse_and_validate(self.day.value(), self.month.value(), self.year.value()) {
            Ok(date) => {
                self.clear();
                SubmitOutcome::Accepted(date)
            }
            Err(e) => SubmitOutcome::Rejected(e),
        }
    }
}
