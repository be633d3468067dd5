//! Cutting alerts out of a page and prepending them in a wrapper.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use super::AlertOptions;
use crate::debug;

/// `<hr>`, `<hr/>` or `<hr />` as the very last content.
static TRAILING_HR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i-u)\s*<hr\s*/?>\s*\z").unwrap());

/// Result of one promotion pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Promoted<'a> {
    pub html: Cow<'a, str>,
    /// Number of alerts moved into the wrapper.
    pub lifted: usize,
}

impl AlertOptions {
    /// Move every alert to a wrapper at the top of `html`.
    ///
    /// Returns the input borrowed and untouched when there is no alert.
    pub fn promote<'a>(&self, html: &'a str) -> Cow<'a, str> {
        self.reflow(html).html
    }

    /// Like [`AlertOptions::promote`], also reporting how many alerts moved.
    pub fn reflow<'a>(&self, html: &'a str) -> Promoted<'a> {
        let spans = self.find_spans(html);
        if spans.is_empty() {
            return Promoted {
                html: Cow::Borrowed(html),
                lifted: 0,
            };
        }

        // Back to front, so offsets of spans not yet removed stay valid.
        let mut body = html.to_owned();
        for span in spans.iter().rev() {
            body.replace_range(span.start..span.end, "");
        }

        if self.strip_trailing_hr {
            if let Some(hr) = TRAILING_HR.find(&body) {
                body.truncate(hr.start());
            }
        }
        let rest = body.trim();

        let open = self.wrapper_open();
        let close = self.wrapper_close();
        let lifted_len: usize = spans.iter().map(|s| s.len()).sum();
        let mut out = String::with_capacity(open.len() + lifted_len + close.len() + rest.len());
        out.push_str(&open);
        for span in &spans {
            out.push_str(span.text);
        }
        out.push_str(&close);
        out.push_str(rest);

        debug!("alerts"; "lifted {} alert(s), {} -> {} bytes", spans.len(), html.len(), out.len());

        Promoted {
            html: Cow::Owned(out),
            lifted: spans.len(),
        }
    }
}
