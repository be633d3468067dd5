//! Applying the hook to rendered pages on disk.
//!
//! A single file is rewritten in place or to an explicit output path; a
//! directory is walked for `.html` / `.htm` pages which are processed in
//! parallel and rewritten in place only when something changed. `-` reads
//! one page from stdin and writes it to stdout.

use std::borrow::Cow;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use jwalk::WalkDir;
use rayon::prelude::*;

use crate::alerts::{AlertOptions, Promoted};
use crate::error::BatchError;
use crate::hook::Layout;
use crate::{debug, log};

/// Path meaning "stdin / stdout".
pub const STDIO: &str = "-";

/// What to do with each page.
#[derive(Debug, Clone)]
pub struct Job<'a> {
    pub options: &'a AlertOptions,
    pub layout: Layout,
    /// Report only; never write.
    pub check: bool,
}

/// Result for one page that was read successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub lifted: usize,
}

impl FileOutcome {
    pub fn changed(&self) -> bool {
        self.lifted > 0
    }
}

/// Totals over a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub scanned: usize,
    pub changed: usize,
    pub lifted: usize,
    pub failed: usize,
}

impl Summary {
    fn record(&mut self, outcome: &FileOutcome) {
        self.scanned += 1;
        if outcome.changed() {
            self.changed += 1;
            self.lifted += outcome.lifted;
        }
    }
}

impl Job<'_> {
    /// Transform one page's markup.
    pub fn transform<'h>(&self, html: &'h str) -> Promoted<'h> {
        if self.options.handles(&self.layout) {
            self.options.reflow(html)
        } else {
            Promoted {
                html: Cow::Borrowed(html),
                lifted: 0,
            }
        }
    }

    /// Process `input`, which is a page, a directory of pages, or `-`.
    pub fn run(&self, input: &Path, output: Option<&Path>) -> Result<Summary> {
        if input.as_os_str() == STDIO {
            return self.run_stdio(output);
        }
        if input.is_dir() {
            if output.is_some() {
                return Err(BatchError::OutputForDirectory(input.to_path_buf()).into());
            }
            return self.run_dir(input);
        }

        let outcome = self.process_file(input, output)?;
        let mut summary = Summary::default();
        summary.record(&outcome);
        Ok(summary)
    }

    fn run_stdio(&self, output: Option<&Path>) -> Result<Summary> {
        let mut html = String::new();
        io::stdin()
            .read_to_string(&mut html)
            .context("Failed to read page from stdin")?;

        let promoted = self.transform(&html);
        if !self.check {
            match output {
                Some(path) if path.as_os_str() != STDIO => fs::write(path, promoted.html.as_bytes())
                    .map_err(|err| BatchError::Io(path.to_path_buf(), err))?,
                _ => {
                    let mut out = io::stdout().lock();
                    out.write_all(promoted.html.as_bytes())
                        .and_then(|()| out.flush())
                        .context("Failed to write page to stdout")?;
                }
            }
        }

        let mut summary = Summary::default();
        summary.record(&FileOutcome {
            path: PathBuf::from(STDIO),
            lifted: promoted.lifted,
        });
        Ok(summary)
    }

    fn run_dir(&self, dir: &Path) -> Result<Summary> {
        let files = collect_pages(dir)?;
        debug!("batch"; "{} page(s) under {}", files.len(), dir.display());

        let results: Vec<_> = files
            .par_iter()
            .map(|path| self.process_file(path, None))
            .collect();

        let mut summary = Summary::default();
        for result in results {
            match result {
                Ok(outcome) => summary.record(&outcome),
                Err(err) => {
                    summary.failed += 1;
                    log!("error"; "{:#}", anyhow::Error::from(err));
                }
            }
        }
        Ok(summary)
    }

    /// Read, transform and (unless checking) write one page.
    ///
    /// With `output` set the result is always written there; otherwise the
    /// page is overwritten only if it changed.
    pub fn process_file(&self, path: &Path, output: Option<&Path>) -> Result<FileOutcome, BatchError> {
        let bytes = fs::read(path).map_err(|err| BatchError::Io(path.to_path_buf(), err))?;
        let html = String::from_utf8(bytes).map_err(|_| BatchError::NotUtf8(path.to_path_buf()))?;

        let promoted = self.transform(&html);
        let outcome = FileOutcome {
            path: path.to_path_buf(),
            lifted: promoted.lifted,
        };

        if outcome.changed() {
            if self.check {
                log!("check"; "{}: {} alert(s) would move", path.display(), outcome.lifted);
            } else {
                debug!("batch"; "{}: {} alert(s) moved", path.display(), outcome.lifted);
            }
        }

        if !self.check {
            let target = match output {
                Some(out) => Some(out),
                None if outcome.changed() => Some(path),
                None => None,
            };
            if let Some(target) = target {
                fs::write(target, promoted.html.as_bytes())
                    .map_err(|err| BatchError::Io(target.to_path_buf(), err))?;
            }
        }

        Ok(outcome)
    }
}

fn is_page(path: &Path) -> bool {
    path.extension().is_some_and(|e| {
        let e = e.to_string_lossy();
        e.eq_ignore_ascii_case("html") || e.eq_ignore_ascii_case("htm")
    })
}

/// Pages under `dir`, sorted, hidden entries skipped.
fn collect_pages(dir: &Path) -> Result<Vec<PathBuf>, BatchError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort(true) {
        let entry = entry.map_err(|err| BatchError::Walk(dir.to_path_buf(), err))?;
        let path = entry.path();
        if entry.file_type().is_file() && is_page(&path) {
            files.push(path);
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const ALERT_PAGE: &str = r#"<p>intro</p><a class="alert-message warn">Be careful</a><p>more</p><hr>"#;
    const PLAIN_PAGE: &str = "<p>nothing to see</p>\n";

    fn job(options: &AlertOptions, check: bool) -> Job<'_> {
        Job {
            options,
            layout: Layout::Post,
            check,
        }
    }

    #[test]
    fn page_extensions() {
        assert!(is_page(Path::new("a/index.html")));
        assert!(is_page(Path::new("A.HTM")));
        assert!(!is_page(Path::new("style.css")));
        assert!(!is_page(Path::new("html")));
    }

    #[test]
    fn transform_respects_layout() {
        let opts = AlertOptions::default();
        let mut j = job(&opts, false);
        assert_eq!(j.transform(ALERT_PAGE).lifted, 1);
        j.layout = Layout::new("page");
        let out = j.transform(ALERT_PAGE);
        assert_eq!(out.lifted, 0);
        assert_eq!(out.html, ALERT_PAGE);
    }

    #[test]
    fn collect_skips_non_pages_and_sorts() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("posts/b")).unwrap();
        fs::write(dir.path().join("posts/b/index.html"), PLAIN_PAGE).unwrap();
        fs::write(dir.path().join("posts/a.htm"), PLAIN_PAGE).unwrap();
        fs::write(dir.path().join("posts/feed.xml"), PLAIN_PAGE).unwrap();

        let files = collect_pages(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            [PathBuf::from("posts/a.htm"), PathBuf::from("posts/b/index.html")]
        );
    }

    #[test]
    fn unchanged_file_is_not_rewritten() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plain.html");
        fs::write(&path, PLAIN_PAGE).unwrap();
        let before = fs::metadata(&path).unwrap().modified().unwrap();

        let opts = AlertOptions::default();
        let outcome = job(&opts, false).process_file(&path, None).unwrap();
        assert!(!outcome.changed());
        assert_eq!(fs::read_to_string(&path).unwrap(), PLAIN_PAGE);
        assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), before);
    }

    #[test]
    fn non_utf8_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.html");
        fs::write(&path, b"<\xff\xfe>").unwrap();
        let opts = AlertOptions::default();
        assert!(matches!(
            job(&opts, false).process_file(&path, None),
            Err(BatchError::NotUtf8(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let opts = AlertOptions::default();
        assert!(matches!(
            job(&opts, false).process_file(&dir.path().join("nope.html"), None),
            Err(BatchError::Io(..))
        ));
    }
}
