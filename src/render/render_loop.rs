use std::time::Duration;

use tokio::time::Instant;

use crate::model::{minutes_seconds, whole_megabytes, ProgressModel};

use super::{Rgb, Surface};

pub const TICK_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
  Idle,
  Animating,
  Converged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
  pub background: Rgb,
  pub gradient_from: Rgb,
  pub gradient_to: Rgb,
  pub text: Rgb,
}

impl Default for Palette {
  fn default() -> Self {
    Self {
      background: Rgb(230, 230, 230),
      gradient_from: Rgb(0, 122, 204),
      gradient_to: Rgb(0, 204, 255),
      text: Rgb(0, 0, 0),
    }
  }
}

/// Animates the displayed percentage towards the target and paints each frame.
///
/// Ticks are only scheduled while there is a gap to close. Whoever drives the
/// loop asks `next_tick` when the next frame is due.
#[derive(Debug, Clone)]
pub struct RenderLoop {
  state: RenderState,
  interval: Duration,
  next_tick: Option<Instant>,
  palette: Palette,
}

impl RenderLoop {

  pub fn new(interval: Duration, palette: Palette) -> Self {
    Self {
      state: RenderState::Idle,
      interval,
      next_tick: None,
      palette,
    }
  }

  #[cfg(test)]
  pub fn state(&self) -> RenderState {
    self.state
  }

  pub fn next_tick(&self) -> Option<Instant> {
    self.next_tick
  }

  pub fn is_tick_due(&self, now: Instant) -> bool {
    self
      .next_tick
      .is_some_and(|deadline| deadline <= now)
  }

  /// Starts animating if the model moved away from what is displayed.
  pub fn on_target_changed(&mut self, model: &ProgressModel, now: Instant) {
    if self.state != RenderState::Animating && !model.is_converged() {
      self.state = RenderState::Animating;
      self.next_tick = Some(now + self.interval);
    }
  }

  /// One animation frame: smooth, repaint, then either reschedule or stop.
  pub fn on_tick<S: Surface>(&mut self, model: &mut ProgressModel, surface: &mut S, now: Instant) {
    if self.state != RenderState::Animating {
      return
    }

    model.tick();
    self.paint(model, surface, now);

    if model.is_converged() {
      self.state = RenderState::Converged;
      self.next_tick = None;
    } else {
      self.next_tick = Some(now + self.interval);
    }
  }

  pub fn paint<S: Surface>(&self, model: &ProgressModel, surface: &mut S, now: Instant) {
    surface.fill_background(self.palette.background);

    let fill_width = Self::fill_width(surface.width(), model.displayed());
    if fill_width > 0 {
      surface.fill_gradient(fill_width, self.palette.gradient_from, self.palette.gradient_to);
    }

    surface.draw_centered_text(&Self::status_text(model, now), self.palette.text);
    surface.present();
  }

  pub fn fill_width(surface_width: u16, displayed: f64) -> u16 {
    (f64::from(surface_width) * displayed.clamp(0.0, 100.0) / 100.0) as u16
  }

  pub fn status_text(model: &ProgressModel, now: Instant) -> String {
    let elapsed = now.saturating_duration_since(model.started()).as_secs_f64();
    let remaining = model.remaining_estimate(elapsed);

    format!(
      "{} {}% ({}/{} MB) remaining {}",
      model.label(),
      model.displayed() as u8,
      whole_megabytes(model.processed_bytes()),
      whole_megabytes(model.total_bytes()),
      minutes_seconds(remaining)
    )
  }
}

impl Default for RenderLoop {
  fn default() -> Self {
    Self::new(TICK_INTERVAL, Palette::default())
  }
}
