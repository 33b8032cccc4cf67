use tokio::time::{self, Instant};

use crate::model::ProgressModel;
use crate::render::{RenderLoop, Surface};

/// The event queue of the progress "window".
///
/// It shares the one runtime thread with the copy. Paint requests and
/// animation ticks that become due while a chunk is being copied wait for the
/// next `pump`.
#[derive(Debug)]
pub struct HostQueue<S> {
  render: RenderLoop,
  surface: S,
}

impl<S: Surface> HostQueue<S> {

  pub fn new(render: RenderLoop, surface: S) -> Self {
    Self {
      render,
      surface,
    }
  }

  /// Hands the thread back to the runtime once, then dispatches whatever is pending right now.
  pub async fn pump(&mut self, model: &mut ProgressModel) {
    tokio::task::yield_now().await;
    self.dispatch(model, Instant::now());
  }

  /// Keeps the animation running until the displayed value has caught up with the target.
  pub async fn settle(&mut self, model: &mut ProgressModel) {
    loop {
      self.dispatch(model, Instant::now());

      match self.render.next_tick() {
        Some(deadline) => time::sleep_until(deadline).await,
        None => return,
      }
    }
  }

  fn dispatch(&mut self, model: &mut ProgressModel, now: Instant) {
    if model.take_dirty() {
      self.render.on_target_changed(model, now);
      self.render.paint(model, &mut self.surface, now);
    }

    if self.render.is_tick_due(now) {
      self.render.on_tick(model, &mut self.surface, now);
    }
  }

  #[cfg(test)]
  pub fn render(&self) -> &RenderLoop {
    &self.render
  }

  #[cfg(test)]
  pub fn surface(&self) -> &S {
    &self.surface
  }

  pub fn into_surface(self) -> S {
    self.surface
  }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use crate::render::recording::RecordingSurface;
    use crate::render::{RenderState, TICK_INTERVAL};
    use pretty_assertions::assert_eq;

    fn host() -> HostQueue<RecordingSurface> {
      HostQueue::new(RenderLoop::default(), RecordingSurface::new(60))
    }

    #[tokio::test(start_paused = true)]
    async fn pump_repaints_a_dirty_model_and_schedules_a_tick() {
      let mut host = host();
      let mut model = ProgressModel::new(Instant::now());
      model.set_target("image.jpg", 1, 2, 25);

      host.pump(&mut model).await;

      assert_eq!(host.surface().frames(), 1);
      assert_eq!(host.render().state(), RenderState::Animating);
      assert_eq!(model.displayed(), 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_wait_for_their_deadline() {
      let mut host = host();
      let mut model = ProgressModel::new(Instant::now());
      model.set_target("image.jpg", 1, 2, 25);
      host.pump(&mut model).await;

      host.pump(&mut model).await;
      assert_eq!(host.surface().frames(), 1);

      time::advance(TICK_INTERVAL).await;
      host.pump(&mut model).await;

      assert_eq!(host.surface().frames(), 2);
      assert!((model.displayed() - 2.5).abs() < 1e-9);
    }

    #[tokio::test(start_paused = true)]
    async fn a_late_pump_fires_a_single_tick() {
      let mut host = host();
      let mut model = ProgressModel::new(Instant::now());
      model.set_target("image.jpg", 1, 2, 25);
      host.pump(&mut model).await;

      time::advance(Duration::from_secs(2)).await;
      host.pump(&mut model).await;

      assert_eq!(host.surface().frames(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn pump_without_changes_draws_nothing() {
      let mut host = host();
      let mut model = ProgressModel::new(Instant::now());

      host.pump(&mut model).await;

      assert_eq!(host.surface().frames(), 0);
      assert_eq!(host.render().state(), RenderState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn settle_animates_until_converged() {
      let mut host = host();
      let mut model = ProgressModel::new(Instant::now());
      model.set_target("archive.zip", 2, 2, 100);

      host.settle(&mut model).await;

      assert!(model.is_converged());
      assert_eq!(host.render().state(), RenderState::Converged);
      assert_eq!(host.render().next_tick(), None);
      // one paint for the new target plus one per tick: 100 * 0.9^n < 0.01 first holds at n = 88
      assert_eq!(host.surface().frames(), 89);
    }
}
