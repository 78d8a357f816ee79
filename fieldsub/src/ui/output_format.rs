//! Styled status messages on stderr.

use owo_colors::{AnsiColors, OwoColorize};
use std::io::{self, Write};

/// The kinds of status line the CLI prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warn,
    Error,
}

impl MessageKind {
    fn ansi_color(self) -> AnsiColors {
        match self {
            MessageKind::Info => AnsiColors::Blue,
            MessageKind::Success => AnsiColors::Green,
            MessageKind::Warn => AnsiColors::Yellow,
            MessageKind::Error => AnsiColors::Red,
        }
    }

    fn prefix(self) -> &'static str {
        match self {
            MessageKind::Info => "info",
            MessageKind::Success => "ok",
            MessageKind::Warn => "warning",
            MessageKind::Error => "error",
        }
    }
}

/// Writes `[prefix] message`, coloring the prefix only when `enable_colors` is set.
pub fn print_message<W: Write>(
    writer: &mut W,
    kind: MessageKind,
    message: &str,
    enable_colors: bool,
) -> io::Result<()> {
    if enable_colors {
        writeln!(writer, "[{}] {}", kind.prefix().color(kind.ansi_color()), message)
    } else {
        writeln!(writer, "[{}] {}", kind.prefix(), message)
    }
}
