/// A 24-bit colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {

  /// Linear interpolation towards `other`, `t` in `[0, 1]`.
  pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;

    Rgb(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
  }

  /// Nearest entry of the 6x6x6 colour cube in the 256-colour terminal palette.
  pub fn ansi256(self) -> u8 {
    let level = |v: u8| ((u16::from(v) * 5 + 127) / 255) as u8;

    16 + 36 * level(self.0) + 6 * level(self.1) + level(self.2)
  }
}

/// The minimal drawing interface the progress animation needs.
///
/// Widths are in surface units (terminal cells for the terminal surface).
/// Nothing is visible until `present` is called.
pub trait Surface {
  fn width(&self) -> u16;

  fn fill_background(&mut self, color: Rgb);

  /// Horizontal two-stop gradient covering `width` units from the left edge.
  fn fill_gradient(&mut self, width: u16, from: Rgb, to: Rgb);

  fn draw_centered_text(&mut self, text: &str, color: Rgb);

  fn present(&mut self);
}
