//! Render mode detection and configuration
//!
//! Picks how the bundled image is drawn from terminal capabilities,
//! unless the config forces a mode.

use std::env;

use serde::{Deserialize, Serialize};

/// How the picture is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Shade characters (. : * #)
    /// Works everywhere
    #[default]
    Ascii,

    /// Unicode half blocks with true color, two pixels per cell
    HalfBlock,

    /// Kitty Graphics Protocol
    /// Full image support
    /// Supported by: Ghostty, Kitty, WezTerm, iTerm2
    Kitty,

    /// Image area left empty
    Off,
}

impl RenderMode {
    /// Get a human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            RenderMode::Ascii => "ASCII",
            RenderMode::HalfBlock => "Half blocks",
            RenderMode::Kitty => "Kitty Graphics",
            RenderMode::Off => "Off",
        }
    }

    /// Check if this mode sends real images to the terminal
    pub fn supports_images(&self) -> bool {
        matches!(self, RenderMode::Kitty)
    }
}

/// Image preference from the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ImagePreference {
    /// Detect from the environment
    #[default]
    Auto,
    Kitty,
    Blocks,
    Ascii,
    Off,
}

impl ImagePreference {
    /// Turn the preference into a concrete mode
    pub fn resolve(self) -> RenderMode {
        match self {
            ImagePreference::Auto => detect_render_mode(),
            ImagePreference::Kitty => RenderMode::Kitty,
            ImagePreference::Blocks => RenderMode::HalfBlock,
            ImagePreference::Ascii => RenderMode::Ascii,
            ImagePreference::Off => RenderMode::Off,
        }
    }
}

/// Detect the best rendering mode for the current terminal
pub fn detect_render_mode() -> RenderMode {
    let vars = |name: &str| env::var(name).ok();

    if is_kitty_supported(vars) {
        log::info!("Detected Kitty graphics protocol support");
        return RenderMode::Kitty;
    }

    if is_unicode_supported(vars) {
        log::info!("Using half-block image rendering");
        return RenderMode::HalfBlock;
    }

    log::info!("Falling back to ASCII image rendering");
    RenderMode::Ascii
}

/// Check if Kitty graphics protocol is likely supported
fn is_kitty_supported(var: impl Fn(&str) -> Option<String>) -> bool {
    if let Some(term) = var("TERM") {
        let term_lower = term.to_lowercase();
        if term_lower.contains("kitty") || term_lower.contains("ghostty") {
            return true;
        }
    }

    if let Some(term_prog) = var("TERM_PROGRAM") {
        let prog_lower = term_prog.to_lowercase();
        if prog_lower.contains("kitty")
            || prog_lower.contains("ghostty")
            || prog_lower.contains("wezterm")
            || prog_lower.contains("iterm")
        {
            return true;
        }
    }

    // Set by Kitty, Ghostty and WezTerm respectively
    ["KITTY_WINDOW_ID", "GHOSTTY_RESOURCES_DIR", "WEZTERM_PANE"]
        .into_iter()
        .any(|name| var(name).is_some())
}

/// Check if Unicode is well-supported
fn is_unicode_supported(var: impl Fn(&str) -> Option<String>) -> bool {
    for name in ["LC_ALL", "LANG"] {
        if let Some(value) = var(name) {
            let upper = value.to_uppercase();
            if upper.contains("UTF") {
                return true;
            }
            if upper == "C" || upper == "POSIX" {
                return false;
            }
        }
    }

    // Modern terminals generally support Unicode
    true
}
