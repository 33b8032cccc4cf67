mod render_loop;
mod surface;
mod terminal_surface;

pub use render_loop::{RenderLoop, TICK_INTERVAL};
pub use surface::{Rgb, Surface};
pub use terminal_surface::TerminalSurface;

#[cfg(test)]
pub use render_loop::RenderState;
#[cfg(test)]
pub use surface::recording;
