//! alertlift — post-render filter that lifts alert call-outs to the top of a page.
//!
//! Rendered `post` and `project` pages may contain alert blocks (`<a>` or
//! `<div>` elements whose class carries `alert-message`) anywhere in their
//! body. [`render_hook`] cuts them out and prepends them, in source order,
//! inside one `<div class="post-alerts no-external-indicators">`.
//!
//! The filter never fails: markup it cannot match is left where it was.

pub mod logger;

pub mod alerts;
pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod hook;
pub mod html;

pub use alerts::{find_alert_spans, promote_alerts, AlertOptions, Promoted, TagSpan};
pub use hook::{render_hook, Layout};
pub use html::find_matching_close_end;
