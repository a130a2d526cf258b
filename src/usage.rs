// CLASSIFICATION: COMMUNITY
// Filename: usage.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Usage text rendering.
//!
//! One header line followed by one entry per option in declaration order.
//! Long text is wrapped greedily at the last space that fits the column
//! budget; a word longer than the budget is emitted whole.

use serde::{Deserialize, Serialize};

use crate::registry::Options;

/// Column budget for usage text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsageLayout {
    /// Budget for program name plus message on a one-line header.
    pub width: usize,
    /// Content budget for option lines and wrapped header text.
    pub description_width: usize,
    /// Spaces before continuation text and between names and description.
    pub indent: usize,
}

impl Default for UsageLayout {
    fn default() -> Self {
        Self {
            width: 120,
            description_width: 116,
            indent: 4,
        }
    }
}

impl Options {
    /// Usage text with the default layout.
    pub fn usage(&self, program: &str, message: &str) -> String {
        self.usage_with(&UsageLayout::default(), program, message)
    }

    /// Usage text with an explicit layout.
    pub fn usage_with(&self, layout: &UsageLayout, program: &str, message: &str) -> String {
        let mut out = header(layout, program, message);
        for processor in self.processors() {
            let descriptor = processor.descriptor();
            let names = descriptor.usage_names(processor.has_value());
            out.push_str(&describe(layout, names, &descriptor.description));
            out.push('\n');
        }
        out
    }
}

fn header(layout: &UsageLayout, program: &str, message: &str) -> String {
    if program.chars().count() + message.chars().count() <= layout.width {
        return format!("usage: {program} {message}\n");
    }
    let pad = " ".repeat(layout.indent);
    let mut out = format!("usage: {program}\n");
    let mut rest = message.trim_start_matches(' ');
    while rest.chars().count() > layout.description_width {
        match last_space(rest, layout.description_width + 1) {
            Some(at) => {
                out.push_str(&pad);
                out.push_str(&rest[..at]);
                out.push('\n');
                rest = rest[at..].trim_start_matches(' ');
            }
            None => break,
        }
    }
    if !rest.is_empty() {
        out.push_str(&pad);
        out.push_str(rest);
        out.push('\n');
    }
    out
}

fn describe(layout: &UsageLayout, names: String, description: &str) -> String {
    let pad = " ".repeat(layout.indent);
    let mut out = names;
    if description.is_empty() {
        return out;
    }
    let mut line_len = out.chars().count();
    if description.chars().count() + line_len < layout.description_width {
        out.push_str(&pad);
        out.push_str(description);
        return out;
    }
    let mut rest = description;
    while !rest.is_empty() {
        let room = layout.description_width.saturating_sub(line_len);
        if rest.chars().count() < room {
            out.push_str(&pad);
            out.push_str(rest);
            break;
        }
        let Some(at) = last_space(rest, room) else {
            out.push_str(&pad);
            out.push_str(rest);
            break;
        };
        out.push_str(&pad);
        out.push_str(&rest[..at]);
        rest = rest[at..].trim_start_matches(' ');
        if !rest.is_empty() {
            out.push('\n');
            line_len = 0;
        }
    }
    out
}

/// Byte offset of the last space among the first `limit` characters,
/// ignoring the first character.
fn last_space(text: &str, limit: usize) -> Option<usize> {
    text.char_indices()
        .take(limit)
        .skip(1)
        .filter(|&(_, c)| c == ' ')
        .map(|(at, _)| at)
        .last()
}
