//! Rendering of the bundled picture
//!
//! Supports multiple rendering modes:
//! - ASCII: shade characters
//! - Half blocks: two true-color pixels per cell
//! - Kitty: the real image via the Kitty graphics protocol

pub mod mode;
pub mod kitty;
pub mod picture;

pub use mode::{RenderMode, ImagePreference, detect_render_mode};
pub use kitty::KittyGraphics;
pub use picture::{Picture, PictureWidget, AssetError, fit_cells};
