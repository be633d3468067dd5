//! Finding alert elements in a page.

use memchr::memchr;

use super::AlertOptions;
use crate::debug;
use crate::html::find_matching_close_end;
use crate::html::tag::{attr_value, class_contains, classify, is_raw_text, parse_tag, skip_raw_text, Token};

/// One complete alert element, borrowed from the page it was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagSpan<'a> {
    /// Offset of the start tag's `<`.
    pub start: usize,
    /// Offset just past the end tag's `>`.
    pub end: usize,
    /// `html[start..end]`
    pub text: &'a str,
}

impl TagSpan<'_> {
    /// Never zero: a span holds at least its start and end tags.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.end - self.start
    }
}

impl AlertOptions {
    /// Alert spans in ascending document order.
    ///
    /// Alerts nested in another alert belong to the outer span. Alerts whose
    /// end tag cannot be found are skipped, as is the content of an existing
    /// wrapper and of raw-text elements.
    pub fn find_spans<'a>(&self, html: &'a str) -> Vec<TagSpan<'a>> {
        let s = html.as_bytes();
        let marker = self.marker.as_bytes();
        let mut spans = Vec::new();
        let mut cursor = 0usize;

        while cursor < s.len() {
            let Some(off) = memchr(b'<', &s[cursor..]) else {
                break;
            };
            let lt = cursor + off;

            let end = match classify(s, lt) {
                Some(Token::Text) => {
                    cursor = lt + 1;
                    continue;
                }
                Some(Token::Markup(after)) => {
                    cursor = after;
                    continue;
                }
                Some(Token::Tag(end)) => end,
                // unterminated comment: the rest of the page is inside it
                None => break,
            };

            let raw = &s[lt..=end];
            let info = parse_tag(raw);
            let after = end + 1;
            cursor = after;

            if info.is_end || info.self_closing {
                continue;
            }

            if is_raw_text(info.name) {
                match skip_raw_text(s, after, info.name) {
                    Some(next) => cursor = next,
                    None => break,
                }
                continue;
            }

            let class = attr_value(raw, b"class").unwrap_or_default();

            if self.is_wrapper(info.name, class) {
                if let Some(next) = find_matching_close_end(html, after, &self.wrapper_tag) {
                    cursor = next;
                }
                continue;
            }

            let Some(tag) = self.alert_tag(info.name) else {
                continue;
            };
            if !class_contains(class, marker, self.token_match) {
                continue;
            }

            match find_matching_close_end(html, after, tag) {
                Some(close) => {
                    spans.push(TagSpan {
                        start: lt,
                        end: close,
                        text: &html[lt..close],
                    });
                    cursor = close;
                }
                None => {
                    debug!("alerts"; "unterminated <{}> alert at byte {}, left in place", tag, lt);
                }
            }
        }

        spans
    }

    fn is_wrapper(&self, name: &[u8], class: &[u8]) -> bool {
        let Some(first) = self.wrapper_classes.first() else {
            return false;
        };
        name.eq_ignore_ascii_case(self.wrapper_tag.as_bytes())
            && class_contains(class, first.as_bytes(), true)
    }
}

#[cfg(test)]
mod tests {
    use super::super::find_alert_spans;
    use super::*;

    fn texts<'a>(spans: &[TagSpan<'a>]) -> Vec<&'a str> {
        spans.iter().map(|s| s.text).collect()
    }

    #[test]
    fn no_alerts() {
        assert!(find_alert_spans("<p>plain <a href=\"/x\">link</a></p>").is_empty());
        assert!(find_alert_spans("").is_empty());
    }

    #[test]
    fn finds_a_and_div_in_order() {
        let html = r#"<a class="alert-message">One</a><p>mid</p><div class="alert-message">Two</div>"#;
        let spans = find_alert_spans(html);
        assert_eq!(
            texts(&spans),
            [
                r#"<a class="alert-message">One</a>"#,
                r#"<div class="alert-message">Two</div>"#
            ]
        );
        assert_eq!(spans[0].start, 0);
        assert_eq!(spans[1].end, html.len());
        assert!(spans.windows(2).all(|w| w[0].end <= w[1].start));
    }

    #[test]
    fn offsets_slice_the_document() {
        let html = r#"<p>x</p><a href="/x" class="info alert-message">Hi</a>"#;
        let spans = find_alert_spans(html);
        assert_eq!(spans.len(), 1);
        assert_eq!(&html[spans[0].start..spans[0].end], spans[0].text);
        assert_eq!(spans[0].len(), spans[0].text.len());
    }

    #[test]
    fn nested_alert_belongs_to_outer_span() {
        let html = r#"<div class="alert-message"><div class="alert-message">in</div><div>x</div></div><p>after</p>"#;
        let spans = find_alert_spans(html);
        assert_eq!(spans.len(), 1);
        assert!(spans[0].text.ends_with("<div>x</div></div>"));
    }

    #[test]
    fn other_tags_and_attributes_are_ignored() {
        let html = r#"<span class="alert-message">s</span><div data-class="alert-message">d</div><p title='class="alert-message"'>p</p>"#;
        assert!(find_alert_spans(html).is_empty());
    }

    #[test]
    fn quote_styles_and_case() {
        let html = "<DIV CLASS='alert-message'>a</DIV><a class=alert-message>b</a>";
        assert_eq!(find_alert_spans(html).len(), 2);
    }

    #[test]
    fn bare_apostrophe_in_unquoted_value() {
        let html = r#"<p><img src=/a.png alt=don't></p><a class="alert-message">A</a>"#;
        assert_eq!(texts(&find_alert_spans(html)), [r#"<a class="alert-message">A</a>"#]);

        let html = r#"<div class="alert-message"><img alt=it's></div><p>x</p>"#;
        assert_eq!(
            texts(&find_alert_spans(html)),
            [r#"<div class="alert-message"><img alt=it's></div>"#]
        );
    }

    #[test]
    fn stray_unterminated_tag_does_not_hide_later_alerts() {
        let html = r#"<p>x <b"</p><a class="alert-message">A</a><p>y</p>"#;
        assert_eq!(texts(&find_alert_spans(html)), [r#"<a class="alert-message">A</a>"#]);

        let html = r#"<p><img alt='oops></p><a class="alert-message">A</a>"#;
        assert_eq!(texts(&find_alert_spans(html)), [r#"<a class="alert-message">A</a>"#]);
    }

    #[test]
    fn unterminated_alert_is_skipped() {
        let html = r#"<div class="alert-message">never closed<a class="alert-message">ok</a>"#;
        assert_eq!(texts(&find_alert_spans(html)), [r#"<a class="alert-message">ok</a>"#]);
    }

    #[test]
    fn commented_and_scripted_alerts_are_ignored() {
        let html = r#"<!-- <a class="alert-message">c</a> --><script>x = '<a class="alert-message">s</a>';</script><a class="alert-message">real</a>"#;
        assert_eq!(
            texts(&find_alert_spans(html)),
            [r#"<a class="alert-message">real</a>"#]
        );
    }

    #[test]
    fn existing_wrapper_content_is_skipped() {
        let html = r#"<div class="post-alerts no-external-indicators"><a class="alert-message">a</a></div><p>x</p>"#;
        assert!(find_alert_spans(html).is_empty());
    }

    #[test]
    fn substring_match_is_the_default() {
        let html = r#"<div class="notalert-messagexyz">x</div>"#;
        assert_eq!(find_alert_spans(html).len(), 1);

        let opts = AlertOptions {
            token_match: true,
            ..AlertOptions::default()
        };
        assert!(opts.find_spans(html).is_empty());
    }

    #[test]
    fn custom_marker_and_tags() {
        let opts = AlertOptions {
            marker: "callout".into(),
            tags: vec!["aside".into()],
            ..AlertOptions::default()
        };
        let html = r#"<aside class="callout">c</aside><div class="alert-message">d</div>"#;
        assert_eq!(texts(&opts.find_spans(html)), [r#"<aside class="callout">c</aside>"#]);
    }
}
