// src/html/matcher.rs
//
// Depth-tracking search for the end tag that balances an already-consumed start tag.
//
// - Depth starts at 1: the scan begins just after the start tag's '>'.
// - A start tag with the same name (and not ending in "/>") nests one level deeper.
// - An end tag with the same name closes one level; at depth 0 the match is done.
// - Comments, doctypes and a bare '<' in text are stepped over.
// - Raw-text elements (script, style, ...) are skipped whole unless they are the
//   element being matched.
// - The cursor always moves past the current token.

use memchr::memchr;

use super::tag::{classify, is_raw_text, parse_tag, skip_raw_text, Token};

/// Offset just past the `>` of the end tag that closes `tag_name`, or `None`
/// if the input ends (or a comment or raw-text element is left unterminated)
/// before depth returns to 0. A tag without its `>` counts as text.
///
/// `search_start` should point just after the start tag. Offsets past the end
/// of the input or inside a multi-byte character give `None`, never a panic.
pub fn find_matching_close_end(html: &str, search_start: usize, tag_name: &str) -> Option<usize> {
    if !html.is_char_boundary(search_start) {
        return None;
    }
    let s = html.as_bytes();
    let want = tag_name.as_bytes();
    let mut depth = 1usize;
    let mut cursor = search_start;

    while cursor < s.len() {
        let lt = cursor + memchr(b'<', &s[cursor..])?;

        let end = match classify(s, lt)? {
            Token::Text => {
                cursor = lt + 1;
                continue;
            }
            Token::Markup(after) => {
                cursor = after;
                continue;
            }
            Token::Tag(end) => end,
        };

        let info = parse_tag(&s[lt..=end]);
        cursor = end + 1;

        if info.name.eq_ignore_ascii_case(want) {
            if info.is_end {
                depth -= 1;
                if depth == 0 {
                    return Some(cursor);
                }
            } else if !info.self_closing {
                depth += 1;
            }
            continue;
        }

        if !info.is_end && !info.self_closing && is_raw_text(info.name) {
            cursor = skip_raw_text(s, cursor, info.name)?;
        }
    }
    None
}
