use colored::Colorize;
use kdiff_diff::{Palette, Tone};

/// Bright ANSI colors: green additions, red removals and taint, yellow
/// modifications.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnsiPalette;

impl Palette for AnsiPalette {
    fn paint(&self, tone: Tone, text: &str) -> String {
        match tone {
            Tone::Addition => text.bright_green().to_string(),
            Tone::Removal | Tone::Taint => text.bright_red().to_string(),
            Tone::Modification => text.bright_yellow().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tones_map_to_bright_colors() {
        colored::control::set_override(true);
        assert_eq!(AnsiPalette.paint(Tone::Addition, "+ a"), "\x1b[92m+ a\x1b[0m");
        assert_eq!(AnsiPalette.paint(Tone::Removal, "- a"), "\x1b[91m- a\x1b[0m");
        assert_eq!(AnsiPalette.paint(Tone::Taint, "! "), "\x1b[91m! \x1b[0m");
        assert_eq!(AnsiPalette.paint(Tone::Modification, "~ a:"), "\x1b[93m~ a:\x1b[0m");
    }
}
