//! Terminal output through termimad, with a plain-text fallback.

use std::io::{self, Write};

use anyhow::{Context, Result};
use termimad::{crossterm::style::Color, MadSkin};

/// Writes command output either styled or verbatim.
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Print `text` to stdout.
    ///
    /// Plain mode writes the text unchanged, so its exact bytes are what
    /// scripts and tests see. Rich mode keeps the `##` markers of step
    /// headings visible and colors them, and styles every other line inline.
    pub fn render(&self, text: &str) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();

        if !self.rich_enabled {
            out.write_all(text.as_bytes())
                .context("Failed to write to stdout")?;
            return out.flush().context("Failed to flush stdout");
        }

        for line in text.lines() {
            let written = if line.starts_with('#') {
                writeln!(out, "\x1b[34m{line}\x1b[0m")
            } else {
                writeln!(out, "{}", self.skin.inline(line))
            };
            written.context("Failed to write to stdout")?;
        }
        out.flush().context("Failed to flush stdout")
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}
