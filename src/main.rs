use std::process::ExitCode;

use args::cli;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use workflow::PolyglotWorkflow;

mod args;
mod console;
mod copy;
mod host;
mod model;
mod plan;
mod render;
mod workflow;

// Copy and progress animation share one thread
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
  let args = cli::get_cli_args();
  init_logging(args.verbose);

  let outcome = PolyglotWorkflow::new(args).run().await;
  debug!("finished: {}", outcome.summary());

  outcome.exit_code()
}

fn init_logging(verbose: bool) {
  let default_level = if verbose { "debug" } else { "warn" };
  let filter =
    EnvFilter::try_from_default_env()
      .unwrap_or_else(|_| EnvFilter::new(default_level));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_target(false)
    .with_writer(std::io::stderr)
    .init();
}
