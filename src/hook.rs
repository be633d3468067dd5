//! Post-render hook: `(html, layout) -> html`.
//!
//! The site generator calls this once per rendered page. Only the layouts
//! listed in [`AlertOptions::layouts`] (`post` and `project` by default) are
//! touched; every other page comes back borrowed and unchanged.

use std::borrow::Cow;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::alerts::AlertOptions;

/// Page layout identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Layout {
    Post,
    Project,
    Other(String),
}

impl Layout {
    pub fn new(id: &str) -> Self {
        let id = id.trim();
        if id.eq_ignore_ascii_case("post") {
            Self::Post
        } else if id.eq_ignore_ascii_case("project") {
            Self::Project
        } else {
            Self::Other(id.to_ascii_lowercase())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Post => "post",
            Self::Project => "project",
            Self::Other(s) => s,
        }
    }
}

impl FromStr for Layout {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AlertOptions {
    /// Whether pages with `layout` get their alerts promoted.
    pub fn handles(&self, layout: &Layout) -> bool {
        self.layouts
            .iter()
            .any(|l| l.trim().eq_ignore_ascii_case(layout.as_str()))
    }

    /// Run the hook for one rendered page.
    pub fn apply<'a>(&self, html: &'a str, layout: &Layout) -> Cow<'a, str> {
        if self.handles(layout) {
            self.promote(html)
        } else {
            Cow::Borrowed(html)
        }
    }
}

/// Run the hook with default options. `layout` is the page's layout
/// identifier as the generator names it.
pub fn render_hook<'a>(html: &'a str, layout: &str) -> Cow<'a, str> {
    AlertOptions::defaults().apply(html, &Layout::new(layout))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<p>x</p><a class="alert-message">A</a>"#;

    #[test]
    fn parse_layouts() {
        assert_eq!("post".parse::<Layout>(), Ok(Layout::Post));
        assert_eq!(" Project ".parse::<Layout>(), Ok(Layout::Project));
        assert_eq!(
            "Page".parse::<Layout>(),
            Ok(Layout::Other("page".into()))
        );
        assert_eq!(Layout::Other("index".into()).to_string(), "index");
    }

    #[test]
    fn post_and_project_are_transformed() {
        for layout in ["post", "project", "POST"] {
            let out = render_hook(PAGE, layout);
            assert!(out.starts_with(r#"<div class="post-alerts"#), "{layout}");
        }
    }

    #[test]
    fn other_layouts_pass_through() {
        for layout in ["page", "index", ""] {
            let out = render_hook(PAGE, layout);
            assert!(matches!(out, Cow::Borrowed(_)));
            assert_eq!(out, PAGE);
        }
    }

    #[test]
    fn configured_layouts() {
        let opts = AlertOptions {
            layouts: vec!["page".into()],
            ..AlertOptions::default()
        };
        assert!(opts.handles(&Layout::Other("page".into())));
        assert!(!opts.handles(&Layout::Post));
        assert_eq!(opts.apply(PAGE, &Layout::Post), PAGE);
    }
}
