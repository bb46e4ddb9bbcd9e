//! Orientation module - Window dimensions and the presentation values derived from them

mod dimensions;
mod state;

pub use dimensions::{Dimensions, Subscription, WindowSize};
pub use state::{
    Orientation, OrientationState, StatusBarStyle, FlexDirection, HeaderSize,
    LIGHT_GREEN, DARK_GREEN,
};
