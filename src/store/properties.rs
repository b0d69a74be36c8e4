//! Ordered, line-preserving properties document.
//!
//! Reads the Java properties dialect (`key=value`, `key: value`, `key value`,
//! `#`/`!` comments, backslash continuation and escapes). `\n`, `\r\n` and a
//! lone `\r` all end a line. Lines that are not modified are written back
//! exactly as they were read, each with its own terminator.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static ENTRY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \t\x0C]*((?:\\.|[^\\=: \t\x0C])*)[ \t\x0C]*(?:[=:][ \t\x0C]*)?(.*)$")
        .expect("entry pattern is valid")
});

#[derive(Debug, Clone, PartialEq)]
enum Content {
    /// Comment or blank line, kept as-is
    Verbatim(String),
    /// Key/value entry; `raw` is dropped once the value changes
    Entry {
        key: String,
        value: String,
        raw: Option<String>,
    },
}

/// One logical line and the terminator that followed it (empty at EOF)
#[derive(Debug, Clone, PartialEq)]
struct Line {
    content: Content,
    ending: &'static str,
}

/// Properties document that remembers line order, comments and line endings
#[derive(Debug, Clone, PartialEq)]
pub struct Properties {
    lines: Vec<Line>,
    /// Terminator for appended lines: the first one found in the file
    default_ending: &'static str,
}

impl Default for Properties {
    fn default() -> Self {
        Properties {
            lines: Vec::new(),
            default_ending: "\n",
        }
    }
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse properties text. Never fails: anything that is not a comment
    /// or blank line is read as an entry, as Java does.
    pub fn parse(text: &str) -> Self {
        let physical = split_lines(text);
        let default_ending = physical
            .iter()
            .map(|(_, ending)| *ending)
            .find(|ending| !ending.is_empty())
            .unwrap_or("\n");

        let mut lines = Vec::new();
        let mut iter = physical.into_iter();
        while let Some((line, mut ending)) = iter.next() {
            let trimmed = line.trim_start_matches([' ', '\t', '\x0C']);
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                lines.push(Line {
                    content: Content::Verbatim(line.to_string()),
                    ending,
                });
                continue;
            }

            let mut raw = line.to_string();
            let mut logical = String::new();
            let mut current = trimmed;
            loop {
                if ends_with_continuation(current) {
                    logical.push_str(&current[..current.len() - 1]);
                    match iter.next() {
                        Some((next, next_ending)) => {
                            raw.push_str(ending);
                            raw.push_str(next);
                            ending = next_ending;
                            current = next.trim_start_matches([' ', '\t', '\x0C']);
                        }
                        None => break,
                    }
                } else {
                    logical.push_str(current);
                    break;
                }
            }

            let content = match ENTRY_RE.captures(&logical) {
                Some(caps) => {
                    let key = caps.get(1).map(|m| m.as_str()).unwrap_or("");
                    let value = caps.get(2).map(|m| m.as_str()).unwrap_or("");
                    Content::Entry {
                        key: unescape(key),
                        value: unescape(value),
                        raw: Some(raw),
                    }
                }
                None => Content::Verbatim(raw),
            };
            lines.push(Line { content, ending });
        }

        Properties {
            lines,
            default_ending,
        }
    }

    /// Value of `key`; the last occurrence wins, as in Java.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.lines.iter().rev().find_map(|line| match &line.content {
            Content::Entry { key: k, value, .. } if k.as_str() == key => Some(value.as_str()),
            _ => None,
        })
    }

    /// Set `key` in place, or append it when absent.
    ///
    /// Setting the value it already has keeps the original line text.
    pub fn set(&mut self, key: &str, new_value: impl Into<String>) {
        let new_value = new_value.into();
        let existing = self.lines.iter_mut().rev().find_map(|line| match &mut line.content {
            Content::Entry { key: k, value, raw } if k.as_str() == key => Some((value, raw)),
            _ => None,
        });

        match existing {
            Some((value, raw)) => {
                if *value != new_value {
                    *value = new_value;
                    *raw = None;
                }
            }
            None => {
                let default_ending = self.default_ending;
                // keep a missing final newline missing
                let ending = match self.lines.last_mut() {
                    Some(last) if last.ending.is_empty() => {
                        last.ending = default_ending;
                        ""
                    }
                    _ => default_ending,
                };
                self.lines.push(Line {
                    content: Content::Entry {
                        key: key.to_string(),
                        value: new_value,
                        raw: None,
                    },
                    ending,
                });
            }
        }
    }

    /// Keys in file order (duplicates included)
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().filter_map(|line| match &line.content {
            Content::Entry { key, .. } => Some(key.as_str()),
            Content::Verbatim(_) => None,
        })
    }

    pub fn len(&self) -> usize {
        self.keys().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Properties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            match &line.content {
                Content::Verbatim(text) => f.write_str(text)?,
                Content::Entry {
                    raw: Some(text), ..
                } => f.write_str(text)?,
                Content::Entry {
                    key,
                    value,
                    raw: None,
                } => write!(f, "{}={}", escape(key, true), escape(value, false))?,
            }
            f.write_str(line.ending)?;
        }
        Ok(())
    }
}

/// Split into physical lines, each with its terminator (`\n`, `\r\n` or `\r`).
fn split_lines(text: &str) -> Vec<(&str, &'static str)> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        let ending = match bytes[i] {
            b'\n' => "\n",
            b'\r' if bytes.get(i + 1) == Some(&b'\n') => "\r\n",
            b'\r' => "\r",
            _ => {
                i += 1;
                continue;
            }
        };
        lines.push((&text[start..i], ending));
        i += ending.len();
        start = i;
    }
    if start < text.len() {
        lines.push((&text[start..], ""));
    }
    lines
}

fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0C'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push('u');
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

fn escape(text: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, c) in text.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x0C' => out.push_str("\\f"),
            ' ' if is_key || i == 0 => out.push_str("\\ "),
            '=' | ':' | '#' | '!' if is_key => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}
