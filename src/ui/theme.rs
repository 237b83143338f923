//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection, plus
//! settings-driven bar colors.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic selection based on the
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and the header.
    pub highlight: Color,
    /// Color for the unavailable-device warning.
    pub warning: Color,
    /// Color for dimmed/secondary text.
    pub dim: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Gauge color for the inbound channel.
    pub bar_in: Color,
    /// Gauge color for the outbound channel.
    pub bar_out: Color,
    /// Style for the header line.
    pub header: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            warning: Color::Yellow,
            dim: Color::DarkGray,
            border: Color::Gray,
            bar_in: Color::LightRed,
            bar_out: Color::Yellow,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            warning: Color::Yellow,
            dim: Color::Gray,
            border: Color::DarkGray,
            bar_in: Color::Red,
            bar_out: Color::Magenta,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Override the gauge colors with the configured hex values.
    ///
    /// Unparseable strings leave the theme's own colors in place.
    pub fn with_bar_colors(mut self, color_in: &str, color_out: &str) -> Self {
        if let Some(color) = parse_color(color_in) {
            self.bar_in = color;
        }
        if let Some(color) = parse_color(color_out) {
            self.bar_out = color;
        }
        self
    }
}

/// Parse a `#RRGGBB` hex string into a ratatui color.
pub fn parse_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}
