//! # CLI Layer
//!
//! **One possible UI client** for storefront. This is the only place that
//! knows about terminal output, exit codes and the tokio runtime.
//!
//! - `setup`: argument parsing via clap
//! - `commands`: per-command handlers that call the API and print the result
//! - `print`: coloured output for every `CmdResult` shape
//!
//! Logging goes to stderr through `tracing-subscriber`. `RUST_LOG` wins when
//! set; otherwise `--verbose` selects `debug` and the default is `warn`.

mod commands;
mod print;
pub mod setup;

pub use commands::run;

use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    // A second init (tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
