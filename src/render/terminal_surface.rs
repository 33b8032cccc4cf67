use console::{measure_text_width, Style};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use super::{Rgb, Surface, TICK_INTERVAL};

/// A fixed-width, single line "window" drawn on stderr.
///
/// Each cell has its own background colour; text is laid over the cells.
/// indicatif takes care of redrawing the line in place, and draws nothing
/// when stderr is not a terminal.
#[derive(Debug)]
pub struct TerminalSurface {
  bar: ProgressBar,
  cells: Vec<Rgb>,
  text: String,
  text_color: Rgb,
}

impl TerminalSurface {

  pub const WIDTH: u16 = 60;

  /// Redraws per second; one per animation tick.
  pub const REFRESH_HZ: u8 = (1000 / TICK_INTERVAL.as_millis()) as u8;

  pub fn new() -> Self {
    let style = ProgressStyle::with_template("{msg}").unwrap();
    let bar =
      ProgressBar::with_draw_target(Some(100), ProgressDrawTarget::stderr_with_hz(Self::REFRESH_HZ))
        .with_style(style);

    Self::with_bar(bar)
  }

  #[cfg(test)]
  pub fn hidden() -> Self {
    let style = ProgressStyle::with_template("{msg}").unwrap();
    Self::with_bar(ProgressBar::hidden().with_style(style))
  }

  fn with_bar(bar: ProgressBar) -> Self {
    Self {
      bar,
      cells: vec![Rgb(0, 0, 0); Self::WIDTH as usize],
      text: String::new(),
      text_color: Rgb(0, 0, 0),
    }
  }

  /// Removes the line from the terminal.
  pub fn dismiss(&self) {
    self.bar.finish_and_clear()
  }

  /// Leaves the last frame on screen.
  pub fn keep(&self) {
    self.bar.abandon()
  }

  /// The current frame as styled text, exactly one terminal column per cell.
  ///
  /// A double-width glyph covers two cells and takes the colour of the first.
  pub fn compose(&self) -> String {
    let (glyphs, columns) = self.fit_text();
    let offset = (self.cells.len() - columns) / 2;
    let foreground = self.text_color.ansi256();

    let mut glyphs = glyphs.into_iter();
    let mut line = String::new();
    let mut column = 0;

    while column < self.cells.len() {
      let background = self.cells[column];
      let next = if column >= offset { glyphs.next() } else { None };
      let (glyph, width) = next.unwrap_or_else(|| (" ".to_owned(), 1));

      let styled =
        Style::new()
          .for_stderr()
          .color256(foreground)
          .on_color256(background.ansi256())
          .apply_to(glyph);

      line.push_str(&styled.to_string());
      column += width;
    }

    line
  }

  /// Splits the text into glyphs with their column widths, dropping whatever does not fit.
  fn fit_text(&self) -> (Vec<(String, usize)>, usize) {
    let mut glyphs: Vec<(String, usize)> = vec![];
    let mut columns = 0;

    for ch in self.text.chars() {
      let mut utf8 = [0; 4];
      let width = measure_text_width(ch.encode_utf8(&mut utf8));

      if width == 0 {
        // combining marks ride on the glyph before them
        if let Some((glyph, _)) = glyphs.last_mut() {
          glyph.push(ch)
        }
        continue
      }

      if columns + width > self.cells.len() {
        break
      }

      glyphs.push((ch.to_string(), width));
      columns += width;
    }

    (glyphs, columns)
  }
}

impl Default for TerminalSurface {
  fn default() -> Self {
    Self::new()
  }
}

impl Surface for TerminalSurface {
  fn width(&self) -> u16 {
    self.cells.len() as u16
  }

  fn fill_background(&mut self, color: Rgb) {
    self.cells.fill(color)
  }

  fn fill_gradient(&mut self, width: u16, from: Rgb, to: Rgb) {
    let width = usize::from(width).min(self.cells.len());
    let last = width.saturating_sub(1).max(1) as f64;

    for (index, cell) in self.cells.iter_mut().take(width).enumerate() {
      *cell = from.lerp(to, index as f64 / last);
    }
  }

  fn draw_centered_text(&mut self, text: &str, color: Rgb) {
    self.text.clear();
    self.text.push_str(text);
    self.text_color = color;
  }

  fn present(&mut self) {
    self.bar.set_message(self.compose())
  }
}
