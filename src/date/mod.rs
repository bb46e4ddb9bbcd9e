//! Date module - Calendar date validation and formatting

mod validator;

pub use validator::{
    SelectedDate, DateError,
    is_valid_date, validate, parse_and_validate, day_info,
};
