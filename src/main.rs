#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate tracing;

mod cli;
mod cloud;
mod config;
mod editor;
mod errors;
mod rulefile;
mod rules;
mod session;
mod ui;

use crate::cloud::softlayer::SlCloud;
use crate::editor::LazyEditor;
use crate::editor::ProcessEditor;
use crate::errors::*;
use crate::ui::TerminalUi;
use std::env;
use std::io;
use tracing_subscriber::EnvFilter;

quick_main!(run);

fn run() -> Result<()> {
    let invocation = match cli::parse_from_safe(env::args_os()) {
        Err(Error(ErrorKind::Clap(e), _)) => e.exit(),
        other => other?,
    };

    init_logging(invocation.verbose);
    init_tls();

    // the config is only read once the firewall turns out to be editable
    let overrides = invocation.overrides;
    let editor = LazyEditor::new(|| {
        let config = config::resolve(&overrides)?;
        ProcessEditor::new(&config.editor_command(|k| env::var(k).ok()))
    });

    cli::dispatch(
        invocation.command,
        || SlCloud::new(&config::resolve(&overrides)?),
        &editor,
        &TerminalUi,
    )
}

// logs go to stderr so they never interleave with the rule file on stdout
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[allow(deprecated)]
fn init_tls() {
    openssl_probe::init_ssl_cert_env_vars();
}
