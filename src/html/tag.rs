// src/html/tag.rs
//
// Byte-level tag primitives shared by the matcher and the alert locator.
//
// - All delimiters looked at ('<', '>', quotes, '/', '=', '!', whitespace) are ASCII,
//   so every offset returned here is a valid `str` char boundary.
// - Quote-aware: a '>' inside a "..." or '...' attribute value never ends a tag.
// - Nothing in here panics on truncated input; "unterminated" is reported as `None`.

use memchr::{memchr, memmem};

/* =============================== Core sets =============================== */

const RAW_TEXT: &[&[u8]] = &[b"script", b"style", b"textarea", b"xmp"];

pub fn is_raw_text(name: &[u8]) -> bool {
    RAW_TEXT.iter().any(|&s| name.eq_ignore_ascii_case(s))
}

/* ============================ Utility predicates ========================= */

#[inline]
fn is_name_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b':'
}

#[inline]
pub(crate) fn is_ws(b: u8) -> bool {
    b == b' ' || b == b'\t' || b == b'\n' || b == b'\r' || b == b'\x0c'
}

/* =============================== Tag parsing ============================= */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TagInfo<'a> {
    pub name: &'a [u8],
    pub is_end: bool,
    pub self_closing: bool,
}

/// What sits at a `<` in the source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token {
    /// `<` not followed by a tag, or a tag that never closes: literal
    /// text, resume right after it.
    Text,
    /// Comment, doctype or processing instruction ending at the given offset.
    Markup(usize),
    /// Start or end tag whose `>` is at the given offset.
    Tag(usize),
}

/// Find the '>' for a tag starting at `i` (s[i] == '<').
///
/// A quote only opens an attribute value right after '=' (whitespace allowed
/// in between), so `alt=don't` does not hide the tag's '>'.
pub fn find_tag_end(s: &[u8], mut i: usize) -> Option<usize> {
    let n = s.len();
    i += 1;
    let mut after_eq = false;
    while i < n {
        let b = s[i];
        if b == b'>' {
            return Some(i);
        }
        if after_eq && (b == b'"' || b == b'\'') {
            // quoted value: jump to its closing quote
            i += 1 + memchr(b, &s[i + 1..])? + 1;
            after_eq = false;
            continue;
        }
        if b == b'=' {
            after_eq = true;
        } else if !is_ws(b) {
            after_eq = false;
        }
        i += 1;
    }
    None
}

/// Extract tag name, end/self-closing flags from raw `<...>` bytes.
pub fn parse_tag(tag: &[u8]) -> TagInfo<'_> {
    let n = tag.len();
    let mut i = 1;

    let mut is_end = false;
    if i < n && tag[i] == b'/' {
        is_end = true;
        i += 1;
    }
    while i < n && is_ws(tag[i]) {
        i += 1;
    }
    let start = i;
    while i < n && is_name_char(tag[i]) {
        i += 1;
    }
    let name = &tag[start..i];

    // self-closing? check before '>'
    let mut j = n.saturating_sub(1);
    while j > 0 && is_ws(tag[j - 1]) {
        j -= 1;
    }
    let self_closing = j >= 2 && tag[j - 1] == b'/';

    TagInfo {
        name,
        is_end,
        self_closing,
    }
}

/// Classify the token starting at `lt` (s[lt] == '<').
///
/// Returns `None` only for a comment or declaration that runs off the end of
/// the input; an unterminated tag reads as text.
pub fn classify(s: &[u8], lt: usize) -> Option<Token> {
    let next = match s.get(lt + 1) {
        Some(&b) => b,
        None => return Some(Token::Text),
    };
    if next == b'!' || next == b'?' {
        return skip_markup_declaration(s, lt).map(Token::Markup);
    }
    if is_ws(next) || next == b'>' || next == b'<' {
        return Some(Token::Text);
    }
    Some(find_tag_end(s, lt).map_or(Token::Text, Token::Tag))
}

/* ============================== Comments ================================ */

/// Offset just past a comment (`<!-- ... -->`) or other `<!...>` / `<?...>`
/// declaration starting at `i`. `None` if unterminated.
pub fn skip_markup_declaration(s: &[u8], i: usize) -> Option<usize> {
    let rest = &s[i..];
    if rest.starts_with(b"<!--") {
        // "<!-->" and "<!--->" are complete (empty) comments.
        let body = i + 4;
        if s[body..].starts_with(b">") {
            return Some(body + 1);
        }
        if s[body..].starts_with(b"->") {
            return Some(body + 2);
        }
        return memmem::find(&s[body..], b"-->").map(|p| body + p + 3);
    }
    memchr(b'>', rest).map(|p| i + p + 1)
}

/* ============================ Raw-text skipping ========================== */

/// Offset just past the `</name>` that ends a raw-text element whose content
/// starts at `i`. Raw text has no nesting: the first matching end tag wins.
pub fn skip_raw_text(s: &[u8], i: usize, name: &[u8]) -> Option<usize> {
    let n = s.len();
    let mut j = i;
    while j < n {
        let pos = j + memchr(b'<', &s[j..])?;
        if s.get(pos + 1) != Some(&b'/') {
            j = pos + 1;
            continue;
        }
        let end = find_tag_end(s, pos)?;
        if parse_tag(&s[pos..=end]).name.eq_ignore_ascii_case(name) {
            return Some(end + 1);
        }
        j = end + 1;
    }
    None
}

/* =========================== Attribute scanning ========================== */

/// Value of attribute `wanted` in a raw start tag.
///
/// Attribute grammar: [name] ( '=' [value] )?, value quoted or unquoted.
/// A valueless attribute yields `Some(b"")`.
pub fn attr_value<'a>(tag: &'a [u8], wanted: &[u8]) -> Option<&'a [u8]> {
    let len = tag.len();
    if len < 2 {
        return None;
    }
    // skip '<' and the tag name
    let mut i = 1usize;
    while i < len && is_name_char(tag[i]) {
        i += 1;
    }

    while i < len && tag[i] != b'>' {
        // skip whitespace and slashes
        while i < len && (is_ws(tag[i]) || tag[i] == b'/') {
            i += 1;
        }
        if i >= len || tag[i] == b'>' {
            break;
        }

        if !is_name_char(tag[i]) {
            // stray byte; advance to keep making progress
            i += 1;
            continue;
        }
        let name_start = i;
        i += 1;
        while i < len && is_name_char(tag[i]) {
            i += 1;
        }
        let name = &tag[name_start..i];

        while i < len && is_ws(tag[i]) {
            i += 1;
        }

        let mut value: &[u8] = b"";
        if i < len && tag[i] == b'=' {
            i += 1;
            while i < len && is_ws(tag[i]) {
                i += 1;
            }
            if i >= len || tag[i] == b'>' {
                break;
            }

            if tag[i] == b'"' || tag[i] == b'\'' {
                let q = tag[i];
                i += 1;
                let value_start = i;
                while i < len && tag[i] != q {
                    i += 1;
                }
                value = &tag[value_start..i];
                if i < len {
                    i += 1;
                }
            } else {
                let value_start = i;
                while i < len && !is_ws(tag[i]) && tag[i] != b'>' {
                    i += 1;
                }
                value = &tag[value_start..i];
            }
        }

        if name.eq_ignore_ascii_case(wanted) {
            return Some(value);
        }
    }
    None
}

/// Does a class attribute value carry `marker`?
///
/// With `token_match` off this is a plain substring test, so
/// `class="notalert-messagexyz"` matches `alert-message`. With it on, the
/// marker must be one whitespace-separated class token.
pub fn class_contains(value: &[u8], marker: &[u8], token_match: bool) -> bool {
    if marker.is_empty() {
        return false;
    }
    if token_match {
        value.split(|&b| is_ws(b)).any(|class| class == marker)
    } else {
        memmem::find(value, marker).is_some()
    }
}
