//! Terminal colors for the resident list.
//!
//! Every function takes an `enabled` switch so rendering stays a pure
//! function of its inputs; when enabled, owo-colors still honours
//! `NO_COLOR`/`FORCE_COLOR` and TTY detection.

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

#[derive(Debug, Clone, Copy)]
struct Rgb {
    r: u8,
    g: u8,
    b: u8,
}

impl Rgb {
    const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }
}

const ACCENT: Rgb = Rgb::from_hex(0x1A5F7A); // spinner, links
const DANGER: Rgb = Rgb::from_hex(0xB91C1C); // errors, delete
const MUTED: Rgb = Rgb::from_hex(0x6B7280); // empty state, placeholders

fn paint(text: &str, color: Rgb, enabled: bool) -> String {
    if !enabled {
        return text.to_string();
    }
    text.if_supports_color(Stdout, |t| t.truecolor(color.r, color.g, color.b))
        .to_string()
}

pub fn accent(text: &str, enabled: bool) -> String {
    paint(text, ACCENT, enabled)
}

pub fn danger(text: &str, enabled: bool) -> String {
    paint(text, DANGER, enabled)
}

pub fn muted(text: &str, enabled: bool) -> String {
    paint(text, MUTED, enabled)
}

pub fn bold(text: &str, enabled: bool) -> String {
    if !enabled {
        return text.to_string();
    }
    text.if_supports_color(Stdout, |t| t.bold()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_color_is_identity() {
        assert_eq!(danger("Delete", false), "Delete");
        assert_eq!(bold("Name", false), "Name");
    }
}
