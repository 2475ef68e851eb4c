//! Status lines for the interactive menu.
//!
//! Everything writes to a caller-supplied writer so the controller can be
//! driven against a buffer.

use crate::ui::{theme, Icons};
use owo_colors::OwoColorize;
use std::io::{self, Write};

pub fn header(out: &mut impl Write, text: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{} {}", Icons::MOVIE, text.style(theme().banner.clone()))
}

pub fn rule(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", "─".repeat(32).style(theme().rule.clone()))
}

pub fn menu_item(out: &mut impl Write, key: &str, label: &str) -> io::Result<()> {
    writeln!(out, "  {} {}", format!("{}.", key).style(theme().menu_key.clone()), label)
}

/// Print a prompt without a newline and flush so it shows before input
pub fn prompt(out: &mut impl Write, label: &str) -> io::Result<()> {
    write!(out, "{} {}", Icons::PROMPT.style(theme().rule.clone()), label.style(theme().prompt.clone()))?;
    out.flush()
}

pub fn success(out: &mut impl Write, label: &str) -> io::Result<()> {
    writeln!(out, "{} {}", Icons::CHECK, label.style(theme().success.clone()))
}

pub fn error(out: &mut impl Write, label: &str) -> io::Result<()> {
    writeln!(out, "{} {}", Icons::CROSS, label.style(theme().error.clone()))
}

pub fn warn(out: &mut impl Write, label: &str) -> io::Result<()> {
    writeln!(out, "{} {}", Icons::WARN, label.style(theme().warn.clone()))
}

pub fn info(out: &mut impl Write, label: &str) -> io::Result<()> {
    writeln!(out, "{} {}", Icons::INFO.style(theme().note.clone()), label)
}
