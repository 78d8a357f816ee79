//! Subcommand implementations.

pub mod apply;
pub mod check;
pub mod codec;

use is_terminal::IsTerminal;
use std::io;

use crate::ui::output_format::{self, MessageKind};

/// Helper for printing info messages to stderr.
pub fn info_msg(msg: impl AsRef<str>) {
    status_msg(MessageKind::Info, msg.as_ref());
}

/// Helper for printing success messages to stderr.
pub fn success_msg(msg: impl AsRef<str>) {
    status_msg(MessageKind::Success, msg.as_ref());
}

/// Helper for printing warning messages to stderr.
pub fn warn_msg(msg: impl AsRef<str>) {
    status_msg(MessageKind::Warn, msg.as_ref());
}

/// Helper for printing error messages to stderr.
pub fn error_msg(msg: impl AsRef<str>) {
    status_msg(MessageKind::Error, msg.as_ref());
}

fn status_msg(kind: MessageKind, msg: &str) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_message(&mut io::stderr(), kind, msg, stderr_supports_color);
}
