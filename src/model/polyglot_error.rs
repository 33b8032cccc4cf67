use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can abort a run. None of these are retried.
#[derive(Debug, Error)]
pub enum PolyglotError {
  #[error("could not open '{path}': {source}")]
  Open {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("could not create output file '{path}': {source}")]
  Create {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("could not read '{path}': {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("could not write to '{path}': {source}")]
  Write {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("output file '{0}' would overwrite one of its inputs")]
  OutputIsInput(PathBuf),

  #[error("could not determine the current directory: {0}")]
  CurrentDir(#[source] io::Error),
}

impl PolyglotError {

  pub fn open<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
    Self::Open { path: path.into(), source }
  }

  pub fn create<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
    Self::Create { path: path.into(), source }
  }

  pub fn read<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
    Self::Read { path: path.into(), source }
  }

  pub fn write<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
    Self::Write { path: path.into(), source }
  }
}
