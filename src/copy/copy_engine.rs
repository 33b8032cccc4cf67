use std::fs::File;
use std::io::{ErrorKind, Read, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::host::HostQueue;
use crate::model::{size_pretty, Phase, PolyglotError, ProgressModel, R};
use crate::render::Surface;

use super::OutputSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
  /// A non-empty chunk of this many bytes went to the sink
  Copied(u64),
  Exhausted,
}

/// Copies one phase's source into the sink, a chunk per `step`.
#[derive(Debug)]
pub struct Transfer<F = File> {
  phase: Phase,
  label: String,
  source: F,
  total_bytes: u64,
  processed_bytes: u64,
  chunks: u64,
}

impl Transfer<File> {

  pub fn open(phase: Phase) -> R<Self> {
    let source = Self::open_source_file(phase.source())?;
    let total_bytes = Self::get_file_length(&source, phase.source())?;

    Ok(Self::from_reader(phase, source, total_bytes))
  }

  fn open_source_file(path: &Path) -> R<File> {
    File::open(path)
      .map_err(|e| PolyglotError::open(path, e))
  }

  fn get_file_length(file: &File, path: &Path) -> R<u64> {
    file
      .metadata()
      .map(|meta| meta.len())
      .map_err(|e| PolyglotError::open(path, e))
  }
}

impl<F: Read> Transfer<F> {

  pub fn from_reader(phase: Phase, source: F, total_bytes: u64) -> Self {
    let label = phase.label();

    Self {
      phase,
      label,
      source,
      total_bytes,
      processed_bytes: 0,
      chunks: 0,
    }
  }

  /// Moves at most one chunk from the source to the sink and reports the new target.
  ///
  /// An empty source reports the end of its range once, so the bar still moves on.
  pub fn step<W: Write>(&mut self, buffer: &mut [u8], sink: &mut OutputSink<W>, model: &mut ProgressModel) -> R<Step> {
    let bytes_read = self.read_to_buffer(buffer)?;

    if bytes_read == 0 {
      if self.chunks == 0 {
        model.set_target(&self.label, 0, 0, self.phase.end_percent());
      }
      return Ok(Step::Exhausted)
    }

    sink.write_chunk(&buffer[..bytes_read])?;

    self.chunks += 1;
    self.processed_bytes += bytes_read as u64;
    // the source may have grown since we asked for its length
    self.total_bytes = self.total_bytes.max(self.processed_bytes);

    let percent = self.phase.percent_at(self.processed_bytes, self.total_bytes);
    model.set_target(&self.label, self.processed_bytes, self.total_bytes, percent);

    Ok(Step::Copied(bytes_read as u64))
  }

  fn read_to_buffer(&mut self, buffer: &mut [u8]) -> R<usize> {
    loop {
      match self.source.read(buffer) {
        Ok(bytes_read) => return Ok(bytes_read),
        Err(e) if e.kind() == ErrorKind::Interrupted => continue,
        Err(e) => return Err(PolyglotError::read(self.phase.source(), e)),
      }
    }
  }

  pub fn processed_bytes(&self) -> u64 {
    self.processed_bytes
  }

  pub fn total_bytes(&self) -> u64 {
    self.total_bytes
  }

  pub fn chunks(&self) -> u64 {
    self.chunks
  }
}

/// Drives transfers, giving the host queue the thread back after every chunk.
#[derive(Debug)]
pub struct CopyEngine {
  buffer: Vec<u8>,
}

impl CopyEngine {

  pub fn new(chunk_size: usize) -> Self {
    Self {
      buffer: vec![0; chunk_size.max(1)],
    }
  }

  pub fn chunk_size(&self) -> usize {
    self.buffer.len()
  }

  pub async fn transfer<W: Write, S: Surface>(
    &mut self,
    phase: Phase,
    sink: &mut OutputSink<W>,
    model: &mut ProgressModel,
    host: &mut HostQueue<S>) -> R<u64> {

    let transfer = Transfer::open(phase)?;
    self.drive(transfer, sink, model, host).await
  }

  pub async fn drive<F: Read, W: Write, S: Surface>(
    &mut self,
    mut transfer: Transfer<F>,
    sink: &mut OutputSink<W>,
    model: &mut ProgressModel,
    host: &mut HostQueue<S>) -> R<u64> {

    info!(
      "copying {} ({}) into {} at {}%..{}%",
      transfer.phase.source().display(),
      size_pretty(transfer.total_bytes()),
      sink.path().display(),
      transfer.phase.start_percent(),
      transfer.phase.end_percent()
    );

    loop {
      let step = transfer.step(&mut self.buffer, sink, model)?;
      host.pump(model).await;

      if let Step::Exhausted = step {
        break
      }
    }

    debug!(
      "copied {} in {} chunk(s), progress target now {}%",
      size_pretty(transfer.processed_bytes()),
      transfer.chunks(),
      model.target()
    );
    Ok(transfer.processed_bytes())
  }
}
