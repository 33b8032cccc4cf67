use tokio::time::Instant;

/// Fraction of the remaining gap closed by every animation tick.
pub const SMOOTHING: f64 = 0.1;

/// Displayed and target percentages closer than this are considered converged.
pub const CONVERGENCE_EPSILON: f64 = 0.01;

/// The latest reported state of a run together with the smoothing and ETA arithmetic.
///
/// `target` is what the copy has actually achieved, `displayed` chases it one
/// tick at a time. Only the copy engine moves the target and only ticks move
/// the displayed value.
#[derive(Debug, Clone)]
pub struct ProgressModel {
  target: f64,
  displayed: f64,
  label: String,
  processed_bytes: u64,
  total_bytes: u64,
  started: Instant,
  dirty: bool,
}

impl ProgressModel {

  pub fn new(started: Instant) -> Self {
    Self {
      target: 0.0,
      displayed: 0.0,
      label: String::new(),
      processed_bytes: 0,
      total_bytes: 0,
      started,
      dirty: false,
    }
  }

  /// Records the progress of the current file and requests a repaint.
  /// Leaves the displayed percentage alone.
  pub fn set_target(&mut self, label: &str, processed_bytes: u64, total_bytes: u64, percent: u8) {
    if self.label != label {
      self.label = label.to_owned();
    }
    self.processed_bytes = processed_bytes;
    self.total_bytes = total_bytes.max(processed_bytes);
    self.target = f64::from(percent.min(100));
    self.dirty = true;
  }

  /// Moves the displayed percentage one smoothing step towards the target.
  pub fn tick(&mut self) -> f64 {
    let delta = self.target - self.displayed;
    self.displayed = (self.displayed + delta * SMOOTHING).clamp(0.0, 100.0);
    self.displayed
  }

  /// Linear extrapolation of the seconds left, based on the displayed percentage.
  ///
  /// Recomputed on every frame, so it jitters and is not monotonic.
  pub fn remaining_estimate(&self, elapsed_seconds: f64) -> f64 {
    if self.displayed > 0.0 {
      elapsed_seconds * (100.0 - self.displayed) / self.displayed
    } else {
      0.0
    }
  }

  pub fn gap(&self) -> f64 {
    (self.target - self.displayed).abs()
  }

  pub fn is_converged(&self) -> bool {
    self.gap() < CONVERGENCE_EPSILON
  }

  /// Returns whether a repaint was requested since the last call, clearing the request.
  pub fn take_dirty(&mut self) -> bool {
    std::mem::replace(&mut self.dirty, false)
  }

  pub fn target(&self) -> f64 {
    self.target
  }

  pub fn displayed(&self) -> f64 {
    self.displayed
  }

  pub fn label(&self) -> &str {
    &self.label
  }

  pub fn processed_bytes(&self) -> u64 {
    self.processed_bytes
  }

  pub fn total_bytes(&self) -> u64 {
    self.total_bytes
  }

  pub fn started(&self) -> Instant {
    self.started
  }
}
