use crate::args::Args;
use clap::Parser;
use eyre::eyre;
use m2c_capabilities::{Capabilities, Capability};
use m2c_parsing::{parse_file, ParseOutcome, Severity};
use owo_colors::OwoColorize;
use owo_colors::Stream::{Stderr, Stdout};
use std::io::stderr;
use std::path::Path;
use strum::IntoEnumIterator;
use tracing::metadata::LevelFilter;
use tracing::{debug, trace};
use tracing_error::ErrorLayer;
use tracing_subscriber::fmt::format;
use tracing_subscriber::prelude::*;
use tracing_subscriber::Registry;

mod args;

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    init_logging(args.logging().log_level_filter())?;
    trace!("starting m2c with args: {args:?}");
    debug!("m2c version: {}", env!("CARGO_PKG_VERSION"));

    let capabilities = args.capabilities()?;
    debug!("dialect: {}", capabilities.dialect());
    if args.list_capabilities {
        list_capabilities(&capabilities);
    }

    let options = args.diagnostic_options();
    let mut failed = 0;
    for file in &args.files {
        debug!("parsing {file:?}");
        let outcome = parse_file(file, &capabilities, options)?;
        report(file, &outcome);
        if args.dump_ast {
            println!("{}", outcome.ast.display(outcome.root));
        }
        if !outcome.is_ok() {
            failed += 1;
        }
    }

    if failed > 0 {
        return Err(eyre!(
            "{failed} of {} files had errors",
            args.files.len()
        ));
    }
    Ok(())
}

fn list_capabilities(capabilities: &Capabilities) {
    for capability in Capability::iter() {
        let state = if capabilities.is_enabled(capability) {
            "on"
        } else {
            "off"
        };
        let fixed = if capabilities.is_mutable_for_current_dialect(capability) {
            ""
        } else {
            " (fixed)"
        };
        let name = format!("{:<24}", capability.name());
        println!(
            "{} {state}{fixed}",
            name.if_supports_color(Stdout, |text| text.bold().to_string())
        );
    }
}

/// Prints every diagnostic as `file:line:col: severity: message`
fn report(file: &Path, outcome: &ParseOutcome) {
    for diagnostic in outcome.diagnostics.iter() {
        eprintln!(
            "{}:{}: {}: {}",
            file.display(),
            diagnostic.position,
            diagnostic
                .severity
                .if_supports_color(Stderr, |text| match text {
                    Severity::Warning => text.bright_yellow().to_string(),
                    Severity::Error => text.bright_red().to_string(),
                    Severity::InternalError => text.purple().to_string(),
                }),
            diagnostic.kind
        );
    }
    debug!(
        "{:?}: {} errors, {} warnings",
        file,
        outcome.error_count(),
        outcome.warning_count()
    );
}

fn init_logging(level_filter: LevelFilter) -> eyre::Result<()> {
    let registry = Registry::default()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format().with_thread_ids(true))
                .with_writer(stderr)
                .with_filter(level_filter),
        )
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(registry)?;

    Ok(())
}
