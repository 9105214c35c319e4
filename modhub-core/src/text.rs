//! Normalization of free-text metadata fields.
//!
//! Mod authors decorate names and descriptions with the game's color markup
//! (`[red]Big[] Mod`, `[#ff00ff]...`). None of that belongs in the catalog,
//! so every free-text field passes through [`ColorMarkup::strip`] before it
//! lands in a [`CatalogEntry`](crate::CatalogEntry).

use std::collections::HashSet;

/// Color markup recognizer for a fixed set of named colors.
#[derive(Debug, Clone)]
pub struct ColorMarkup {
    names: HashSet<String>,
}

enum Tag {
    /// `[[`: a literal `[`
    Escape,
    /// A markup tag whose body is this many bytes long
    Markup(usize),
    /// Not markup, keep the `[`
    Literal,
}

impl ColorMarkup {
    /// Build a recognizer. Names match case-insensitively.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .map(|n| n.as_ref().to_ascii_lowercase())
                .collect(),
        }
    }

    /// Remove all color markup from `text`.
    ///
    /// Recognized tags are `[name]` for a known color, `[#hex]` with 1 to 8
    /// hex digits, and `[]`. `[[` is an escaped `[`. Anything else in
    /// brackets is kept verbatim.
    pub fn strip(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(open) = rest.find('[') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            match self.classify(after) {
                Tag::Escape => {
                    out.push('[');
                    rest = &after[1..];
                }
                Tag::Markup(len) => rest = &after[len + 1..],
                Tag::Literal => {
                    out.push('[');
                    rest = after;
                }
            }
        }

        out.push_str(rest);
        out
    }

    fn classify(&self, after: &str) -> Tag {
        if after.starts_with('[') {
            return Tag::Escape;
        }
        let Some(close) = after.find(']') else {
            return Tag::Literal;
        };
        let body = &after[..close];

        if body.is_empty() {
            return Tag::Markup(0);
        }
        if let Some(hex) = body.strip_prefix('#') {
            let valid = (1..=8).contains(&hex.len()) && hex.chars().all(|c| c.is_ascii_hexdigit());
            return if valid { Tag::Markup(close) } else { Tag::Literal };
        }
        if self.names.contains(&body.to_ascii_lowercase()) {
            Tag::Markup(close)
        } else {
            Tag::Literal
        }
    }
}

/// Drop escaped (`\n` as two characters) and literal line breaks.
pub fn remove_newlines(text: &str) -> String {
    text.replace("\\n", "").replace(['\n', '\r'], "")
}

/// Truncate to `max` characters, marking the cut with `...`.
pub fn truncate_name(name: &str, max: usize) -> String {
    match name.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &name[..cut]),
        None => name.to_string(),
    }
}

#[cfg(test)]
#[path = "tests/text_tests.rs"]
mod tests;
