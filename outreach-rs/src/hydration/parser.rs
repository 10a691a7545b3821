//! Placeholder tokenizer
//!
//! Splits a template into literal text and placeholder segments in one
//! pass. Recognized tags:
//!
//! - `{{snippet:<slug>}}` where the slug is one or more non-`}` characters
//! - `{{name}}` where the name is ASCII letters, digits or `_`
//!
//! Anything else between braces stays literal text. A `{{` that does not
//! open a valid tag is consumed one character at a time, so a valid tag
//! starting one brace later is still found (`{{{name}}}` holds `{{name}}`).

const OPEN: &str = "{{";
const CLOSE: &str = "}}";
const SNIPPET_PREFIX: &str = "snippet:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    /// `{{name}}`
    Variable { raw: &'a str, name: &'a str },
    /// `{{snippet:slug}}`; `slug` is trimmed and may be empty
    Snippet { raw: &'a str, slug: &'a str },
}

impl<'a> Segment<'a> {
    /// Source text of the segment
    pub fn raw(&self) -> &'a str {
        match self {
            Segment::Text(text) => *text,
            Segment::Variable { raw, .. } | Segment::Snippet { raw, .. } => *raw,
        }
    }
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Try to read a tag starting at the `{{` at the beginning of `input`
///
/// Returns the segment and its byte length.
fn read_tag(input: &str) -> Option<(Segment<'_>, usize)> {
    let inner_start = OPEN.len();
    let rest = &input[inner_start..];

    if let Some(slug_and_rest) = rest.strip_prefix(SNIPPET_PREFIX) {
        let slug_len = slug_and_rest.find('}')?;
        if slug_len == 0 || !slug_and_rest[slug_len..].starts_with(CLOSE) {
            return None;
        }
        let end = inner_start + SNIPPET_PREFIX.len() + slug_len + CLOSE.len();
        let slug = slug_and_rest[..slug_len].trim();
        return Some((Segment::Snippet { raw: &input[..end], slug }, end));
    }

    let name_len = rest.find(CLOSE)?;
    let name = &rest[..name_len];
    if !is_identifier(name) {
        return None;
    }
    let end = inner_start + name_len + CLOSE.len();
    Some((Segment::Variable { raw: &input[..end], name }, end))
}

/// Tokenize a template into segments
///
/// Adjacent literal text is merged into a single `Text` segment.
pub fn tokenize(template: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut text_start = 0;
    let mut pos = 0;

    while let Some(offset) = template[pos..].find(OPEN) {
        let tag_start = pos + offset;

        match read_tag(&template[tag_start..]) {
            Some((segment, len)) => {
                if text_start < tag_start {
                    segments.push(Segment::Text(&template[text_start..tag_start]));
                }
                segments.push(segment);
                pos = tag_start + len;
                text_start = pos;
            }
            // '{' is one byte, so the next char boundary is tag_start + 1
            None => pos = tag_start + 1,
        }
    }

    if text_start < template.len() {
        segments.push(Segment::Text(&template[text_start..]));
    }

    segments
}
