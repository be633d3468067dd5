//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{ArgAction, ColorChoice, Parser};

use crate::config::DEFAULT_CONFIG;

/// Lift alert call-outs to the top of rendered blog pages
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Cli {
    /// Layout of the page(s) being filtered (default: `default_layout` from config)
    #[arg(short, long)]
    pub layout: Option<String>,

    /// Config file path (default: alertlift.toml, used only if present)
    #[arg(short = 'C', long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Report pages that would change without writing anything
    #[arg(long, action = ArgAction::SetTrue)]
    pub check: bool,

    /// Print debug output
    #[arg(short, long, action = ArgAction::SetTrue)]
    pub verbose: bool,

    /// Control colored output (auto, always, never)
    #[arg(long, default_value = "auto")]
    pub color: ColorChoice,

    /// Input page, directory of pages, or `-` for stdin
    pub input: PathBuf,

    /// Output file (default: overwrite input; not allowed for directories)
    pub output: Option<PathBuf>,
}

impl Cli {
    /// Config path to load, and whether it must exist.
    pub fn config_path(&self) -> (PathBuf, bool) {
        match &self.config {
            Some(path) => (path.clone(), true),
            None => (PathBuf::from(DEFAULT_CONFIG), false),
        }
    }
}
