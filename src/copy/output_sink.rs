use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::model::{PolyglotError, R};

/// The append-only destination shared by both phases.
///
/// Transfers only write to it. Whoever created it decides whether to
/// `finish` it or `discard` it.
#[derive(Debug)]
pub struct OutputSink<W = File> {
  path: PathBuf,
  writer: W,
  written: u64,
}

impl OutputSink<File> {

  pub fn create<P: AsRef<Path>>(path: P) -> R<Self> {
    let path = path.as_ref();
    let file =
      File::create(path)
        .map_err(|e| PolyglotError::create(path, e))?;

    debug!("created output file {}", path.display());
    Ok(Self::from_writer(path, file))
  }

  /// Flushes everything to disk.
  pub fn finish(&mut self) -> R<()> {
    self
      .writer
      .flush()
      .and_then(|_| self.writer.sync_all())
      .map_err(|e| PolyglotError::write(&self.path, e))
  }

  /// Closes and removes a partially written output.
  pub fn discard(self) {
    let path = self.path;
    drop(self.writer);

    match fs::remove_file(&path) {
      Ok(()) => debug!("removed incomplete output file {}", path.display()),
      Err(e) => warn!("could not remove incomplete output file {}: {}", path.display(), e),
    }
  }
}

impl<W: Write> OutputSink<W> {

  pub fn from_writer<P: AsRef<Path>>(path: P, writer: W) -> Self {
    Self {
      path: path.as_ref().to_path_buf(),
      writer,
      written: 0,
    }
  }

  /// Writes the whole chunk. Anything less is an error.
  pub fn write_chunk(&mut self, chunk: &[u8]) -> R<()> {
    self
      .writer
      .write_all(chunk)
      .map_err(|e| PolyglotError::write(&self.path, e))?;

    self.written += chunk.len() as u64;
    Ok(())
  }

  pub fn path(&self) -> &Path {
    self.path.as_path()
  }

  pub fn written(&self) -> u64 {
    self.written
  }

  #[cfg(test)]
  pub fn writer(&self) -> &W {
    &self.writer
  }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use pretty_assertions::assert_eq;

    struct FullDisk;

    impl Write for FullDisk {
      fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Ok(0)
      }

      fn flush(&mut self) -> io::Result<()> {
        Ok(())
      }
    }

    #[test]
    fn appends_chunks_in_order() {
      let mut sink = OutputSink::from_writer("out_fake.jpg", Vec::new());

      sink.write_chunk(b"image").unwrap();
      sink.write_chunk(b"archive").unwrap();

      assert_eq!(sink.writer().as_slice(), b"imagearchive");
      assert_eq!(sink.written(), 12);
    }

    #[test]
    fn short_write_is_an_error() {
      let mut sink = OutputSink::from_writer("out_fake.jpg", FullDisk);

      let error = sink.write_chunk(b"image").unwrap_err();

      assert!(matches!(error, PolyglotError::Write { .. }));
      assert_eq!(sink.written(), 0);
    }

    #[test]
    fn create_fails_in_a_missing_directory() {
      let dir = tempfile::tempdir().unwrap();
      let path = dir.path().join("missing").join("out_fake.jpg");

      let error = OutputSink::create(&path).unwrap_err();

      assert!(matches!(error, PolyglotError::Create { .. }));
    }

    #[test]
    fn discard_removes_the_file() {
      let dir = tempfile::tempdir().unwrap();
      let path = dir.path().join("out_fake.jpg");
      let mut sink = OutputSink::create(&path).unwrap();
      sink.write_chunk(b"partial").unwrap();

      sink.discard();

      assert!(!path.exists());
    }
}
