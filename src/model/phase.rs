use std::path::{Path, PathBuf};

/// One source file mapped onto a slice of the overall percentage scale.
#[derive(Debug, Clone, PartialEq)]
pub struct Phase {
  source: PathBuf,
  start_percent: u8,
  end_percent: u8,
}

impl Phase {

  pub const IMAGE_RANGE: (u8, u8) = (0, 50);
  pub const ARCHIVE_RANGE: (u8, u8) = (50, 100);

  pub fn new<P: AsRef<Path>>(source: P, start_percent: u8, end_percent: u8) -> Self {
    debug_assert!(start_percent < end_percent && end_percent <= 100, "invalid phase range {start_percent}..{end_percent}");

    Self {
      source: source.as_ref().to_path_buf(),
      start_percent,
      end_percent,
    }
  }

  pub fn image<P: AsRef<Path>>(source: P) -> Self {
    let (start, end) = Self::IMAGE_RANGE;
    Self::new(source, start, end)
  }

  pub fn archive<P: AsRef<Path>>(source: P) -> Self {
    let (start, end) = Self::ARCHIVE_RANGE;
    Self::new(source, start, end)
  }

  pub fn source(&self) -> &Path {
    self.source.as_path()
  }

  /// File name shown next to the bar
  pub fn label(&self) -> String {
    self
      .source
      .file_name()
      .unwrap_or(self.source.as_os_str())
      .to_string_lossy()
      .into()
  }

  pub fn start_percent(&self) -> u8 {
    self.start_percent
  }

  pub fn end_percent(&self) -> u8 {
    self.end_percent
  }

  /// Overall percentage once `processed` of `total` bytes of this phase are done.
  ///
  /// Truncates, so the result can trail the true fractional progress by up to a percent.
  /// An empty source counts as complete.
  pub fn percent_at(&self, processed: u64, total: u64) -> u8 {
    if total == 0 {
      return self.end_percent
    }

    let span = u128::from(self.end_percent - self.start_percent);
    let done = u128::from(processed.min(total));
    let within = done * span / u128::from(total);

    self.start_percent + within as u8
  }
}
