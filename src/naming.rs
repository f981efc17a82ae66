//! Filename conventions for directory catalogs.
//!
//! Images dropped into a catalog directory may carry an optional numeric
//! prefix (`NNN-`) that fixes their order and id, followed by a name that
//! becomes the alt text:
//!
//! - `012-Science-Fair.jpg` → number 12, alt "Science Fair"
//! - `IMG_7124.jpg` → unnumbered, alt "IMG 7124"
//! - `007.png` → number 7, no name (alt falls back to the category)
//!
//! Directory names use the same convention for category titles, so
//! `020-Sports-Day/` becomes the category "Sports Day".

/// A file or directory name split into its ordering prefix and display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    /// Numeric prefix, if present.
    pub number: Option<u32>,
    /// Human-readable text: separators (`-`, `_`) turned into spaces.
    /// Empty for number-only names.
    pub display: String,
}

fn humanize(raw: &str) -> String {
    raw.split(['-', '_'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse a name following the optional `NNN-name` convention.
pub fn parse_name(name: &str) -> ParsedName {
    if let Some((prefix, rest)) = name.split_once('-')
        && let Ok(number) = prefix.parse::<u32>()
    {
        return ParsedName {
            number: Some(number),
            display: humanize(rest),
        };
    }
    if let Ok(number) = name.parse::<u32>() {
        return ParsedName {
            number: Some(number),
            display: String::new(),
        };
    }
    ParsedName {
        number: None,
        display: humanize(name),
    }
}

/// Alt text for an image: its display name, or `"<category> photo <n>"`
/// when the filename carries no words.
pub fn alt_text(parsed: &ParsedName, category: &str, id: u32) -> String {
    if parsed.display.is_empty() {
        format!("{category} photo {id}")
    } else {
        parsed.display.clone()
    }
}
