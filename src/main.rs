// src/main.rs
//
// alertlift — lift alert call-outs to the top of rendered blog pages
//
// - INPUT may be one page, a directory of pages (*.html, *.htm) or '-' (stdin → stdout).
// - A single page is written to OUTPUT, or overwrites INPUT when no OUTPUT is given.
// - Pages of a directory are processed in parallel and rewritten in place, only if changed.
// - Only pages whose layout is in scope ("post", "project" unless configured) are touched.
//
// Exit status: 1 if any page failed, or with --check if any page would change.

use std::process::ExitCode;

use anyhow::Result;
use clap::{ColorChoice, Parser};

use alertlift::batch::{Job, STDIO};
use alertlift::cli::Cli;
use alertlift::config::Config;
use alertlift::hook::Layout;
use alertlift::{debug, log, logger};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {}
    }
    logger::set_verbose(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            log!("error"; "{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let (config_path, required) = cli.config_path();
    let config = Config::load(&config_path, required)?;
    debug!("config"; "{:?}", config.alerts);

    let layout = Layout::new(cli.layout.as_deref().unwrap_or(&config.alerts.default_layout));
    if !config.alerts.handles(&layout) {
        debug!("config"; "layout `{}` is out of scope, pages pass through", layout);
    }

    let job = Job {
        options: &config.alerts,
        layout,
        check: cli.check,
    };
    let summary = job.run(&cli.input, cli.output.as_deref())?;

    if cli.input.as_os_str() != STDIO || cli.check {
        let verb = if cli.check { "would change" } else { "changed" };
        log!(
            "batch";
            "{} page(s) scanned, {} {}, {} alert(s) lifted{}",
            summary.scanned,
            summary.changed,
            verb,
            summary.lifted,
            if summary.failed > 0 {
                format!(", {} failed", summary.failed)
            } else {
                String::new()
            }
        );
    }

    let failed = summary.failed > 0 || (cli.check && summary.changed > 0);
    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
