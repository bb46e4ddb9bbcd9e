//! UI widgets

pub mod alert;
pub mod button;
pub mod text_input;

pub use alert::AlertWidget;
pub use button::ButtonWidget;
pub use text_input::TextInputWidget;
