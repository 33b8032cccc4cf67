use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::cli::Args;
use crate::console::{PolyglotConsole, UserResult};
use crate::copy::{CopyEngine, OutputSink};
use crate::host::HostQueue;
use crate::model::{size_pretty, PolyglotError, ProgressModel, R};
use crate::plan::{Invocation, PolyglotPlan};
use crate::render::{RenderLoop, Surface, TerminalSurface};

#[derive(Debug)]
pub enum Outcome {
  ShowedUsage,
  Completed(PathBuf),
  Failed(PolyglotError),
}

impl Outcome {
  pub fn is_success(&self) -> bool {
    !matches!(self, Outcome::Failed(_))
  }

  /// One line on how the run ended, for the log.
  pub fn summary(&self) -> String {
    match self {
      Outcome::ShowedUsage => "showed usage".to_owned(),
      Outcome::Completed(output) => format!("wrote {}", output.display()),
      Outcome::Failed(error) => format!("failed: {error}"),
    }
  }

  pub fn exit_code(&self) -> ExitCode {
    if self.is_success() {
      ExitCode::SUCCESS
    } else {
      ExitCode::FAILURE
    }
  }
}

pub struct PolyglotWorkflow {
  args: Args
}

impl PolyglotWorkflow {

  pub fn new(args: Args) -> Self {
    Self {
      args
    }
  }

  pub async fn run(self) -> Outcome {
    let args = self.args;

    let output_dir = match std::env::current_dir() {
      Ok(dir) => dir,
      Err(e) => return Self::failed(PolyglotError::CurrentDir(e)),
    };

    let plan = match Invocation::from_paths(&args.paths, output_dir) {
      Invocation::Polyglot(plan) => plan,
      Invocation::Usage => {
        PolyglotConsole::show_usage();
        return Outcome::ShowedUsage
      }
    };

    if let Err(e) = plan.check_output_is_not_an_input() {
      return Self::failed(e)
    }

    let mut model = ProgressModel::new(Instant::now());
    let mut host = HostQueue::new(RenderLoop::default(), TerminalSurface::new());
    let mut engine = CopyEngine::new(args.chunk_size().bytes());
    debug!("copying in chunks of {}", size_pretty(engine.chunk_size() as u64));

    if let Err(e) = Self::write_polyglot(&plan, &mut engine, &mut model, &mut host).await {
      host.into_surface().dismiss();
      return Self::failed(e)
    }

    host.settle(&mut model).await;
    let surface = host.into_surface();

    match PolyglotConsole::show_completed(plan.output(), args.skip_confirm) {
      UserResult::Continue => surface.dismiss(),
      UserResult::Cancel => surface.keep(),
      UserResult::Error(e) => {
        warn!("{e}");
        surface.dismiss()
      }
    }

    Outcome::Completed(plan.output().to_path_buf())
  }

  /// Creates the output, then appends the image and the archive to it.
  ///
  /// Any failure after the output exists removes it again.
  pub async fn write_polyglot<S: Surface>(
    plan: &PolyglotPlan,
    engine: &mut CopyEngine,
    model: &mut ProgressModel,
    host: &mut HostQueue<S>) -> R<u64> {

    info!(
      "writing {} from image {} and archive {}",
      plan.output().display(),
      plan.image().display(),
      plan.archive().display()
    );

    let mut sink = OutputSink::create(plan.output())?;

    let result =
      Self::copy_phases(plan, engine, &mut sink, model, host)
        .await
        .and_then(|written| sink.finish().map(|_| written));

    match result {
      Ok(written) => {
        info!("wrote {} to {}", size_pretty(sink.written()), plan.output().display());
        Ok(written)
      },
      Err(e) => {
        sink.discard();
        Err(e)
      }
    }
  }

  async fn copy_phases<W: Write, S: Surface>(
    plan: &PolyglotPlan,
    engine: &mut CopyEngine,
    sink: &mut OutputSink<W>,
    model: &mut ProgressModel,
    host: &mut HostQueue<S>) -> R<u64> {

    let mut written = 0;
    for phase in plan.phases() {
      written += engine.transfer(phase, sink, model, host).await?;
    }

    Ok(written)
  }

  fn failed(error: PolyglotError) -> Outcome {
    PolyglotConsole::show_error(&error);
    Outcome::Failed(error)
  }
}
