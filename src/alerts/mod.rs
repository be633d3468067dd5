//! Alert call-out promotion.
//!
//! An alert is an `<a>` or `<div>` whose `class` carries `alert-message`.
//! [`AlertOptions::promote`] cuts every alert out of a rendered page and puts
//! them, in source order, inside one wrapper at the top:
//!
//! ```
//! use alertlift::promote_alerts;
//!
//! let html = r#"<p>intro</p><a class="alert-message warn">Be careful</a><p>more</p><hr>"#;
//! assert_eq!(
//!     promote_alerts(html),
//!     r#"<div class="post-alerts no-external-indicators"><a class="alert-message warn">Be careful</a></div><p>intro</p><p>more</p>"#
//! );
//! ```

mod locate;
mod reflow;

use std::sync::LazyLock;

use serde::Deserialize;

pub use locate::TagSpan;
pub use reflow::Promoted;

static DEFAULT_OPTIONS: LazyLock<AlertOptions> = LazyLock::new(AlertOptions::default);

/// `[alerts]` section: what counts as an alert and how the wrapper looks.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AlertOptions {
    /// Class substring that marks an alert.
    pub marker: String,

    /// Element names that may carry the marker.
    pub tags: Vec<String>,

    /// Element used for the wrapper.
    pub wrapper_tag: String,

    /// Classes put on the wrapper. The first one also identifies an existing
    /// wrapper, whose content is left alone on later runs.
    pub wrapper_classes: Vec<String>,

    /// Layouts the render hook acts on.
    pub layouts: Vec<String>,

    /// Drop a `<hr>` left dangling at the end once alerts are gone.
    pub strip_trailing_hr: bool,

    /// Require `marker` to be a whole class token instead of a substring.
    pub token_match: bool,

    /// Layout assumed by the command line when none is given.
    pub default_layout: String,
}

impl Default for AlertOptions {
    fn default() -> Self {
        Self {
            marker: "alert-message".into(),
            tags: vec!["a".into(), "div".into()],
            wrapper_tag: "div".into(),
            wrapper_classes: vec!["post-alerts".into(), "no-external-indicators".into()],
            layouts: vec!["post".into(), "project".into()],
            strip_trailing_hr: true,
            token_match: false,
            default_layout: "post".into(),
        }
    }
}

impl AlertOptions {
    /// Shared default options.
    pub fn defaults() -> &'static Self {
        &DEFAULT_OPTIONS
    }

    /// Configured alert tag matching `name`, case-insensitively.
    fn alert_tag(&self, name: &[u8]) -> Option<&str> {
        self.tags
            .iter()
            .map(String::as_str)
            .find(|t| t.as_bytes().eq_ignore_ascii_case(name))
    }

    /// `<div class="post-alerts no-external-indicators">`
    fn wrapper_open(&self) -> String {
        format!(
            "<{} class=\"{}\">",
            self.wrapper_tag,
            self.wrapper_classes.join(" ")
        )
    }

    fn wrapper_close(&self) -> String {
        format!("</{}>", self.wrapper_tag)
    }
}

/// Spans of all alerts in `html`, using default options.
pub fn find_alert_spans(html: &str) -> Vec<TagSpan<'_>> {
    AlertOptions::defaults().find_spans(html)
}

/// Lift all alerts in `html` to the top, using default options.
pub fn promote_alerts(html: &str) -> std::borrow::Cow<'_, str> {
    AlertOptions::defaults().promote(html)
}
