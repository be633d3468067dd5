//! Hand-written HTML scanning.
//!
//! Pages fed to the filter are produced by the site generator, so a small
//! quote- and comment-aware tag scanner is enough; no DOM is built.

pub mod matcher;
pub mod tag;

pub use matcher::find_matching_close_end;
