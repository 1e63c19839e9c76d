//! Trace logging of raw console input.
//!
//! Lines come straight off stdin as bytes. A player can paste terminal escape sequences, hit
//! Ctrl keys or type in a non-UTF-8 locale, and the game still has to log what it received on a
//! single line without garbling the log file.

use std::fmt::Write;

/// Longest input preview written to the log, counted in characters and stray bytes.
const MAX_PREVIEW: usize = 80;

/// Render a raw input line for the log.
///
/// Backslash, `\n`, `\r` and `\t` get their usual escapes. Other control characters and bytes
/// that are not valid UTF-8 are shown as `\xNN`. Anything past the preview limit becomes `…`.
pub fn escape_input(raw: &[u8]) -> String {
    let mut out = String::with_capacity(raw.len().min(MAX_PREVIEW) + 8);
    let mut shown = 0;
    let mut rest = raw;
    while !rest.is_empty() {
        let (text, bad) = match std::str::from_utf8(rest) {
            Ok(text) => (text, 0),
            Err(e) => {
                let (good, tail) = rest.split_at(e.valid_up_to());
                let bad = e.error_len().unwrap_or(tail.len());
                (std::str::from_utf8(good).unwrap_or_default(), bad)
            }
        };
        for ch in text.chars() {
            if shown == MAX_PREVIEW {
                out.push('…');
                return out;
            }
            match ch {
                '\\' => out.push_str("\\\\"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                c if c.is_control() => {
                    let _ = write!(out, "\\x{:02X}", c as u32);
                }
                c => out.push(c),
            }
            shown += 1;
        }
        rest = &rest[text.len()..];
        for byte in &rest[..bad] {
            if shown == MAX_PREVIEW {
                out.push('…');
                return out;
            }
            let _ = write!(out, "\\x{:02X}", byte);
            shown += 1;
        }
        rest = &rest[bad..];
    }
    out
}
