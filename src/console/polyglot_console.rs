use std::path::Path;

use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm};

use crate::model::PolyglotError;
use crate::plan::IMAGE_EXTENSIONS;

pub struct PolyglotConsole;

pub enum UserResult {
  Continue,
  Cancel,
  Error(String)
}

impl PolyglotConsole {

  pub fn usage() -> String {
    let extensions: Vec<_> =
      IMAGE_EXTENSIONS
        .iter()
        .map(|ext| format!(".{ext}"))
        .collect();

    format!(
      "Usage: {name} <image> <archive>\n\
       Pass an image file ({}) and an archive file together, in either order.\n\
       Example: {name} test.jpg test.zip",
      extensions.join(", "),
      name = env!("CARGO_PKG_NAME")
    )
  }

  pub fn show_usage() {
    println!("{}", Self::usage())
  }

  pub fn show_error(error: &PolyglotError) {
    eprintln!("{} {}", style("Error:").red().bold().for_stderr(), error)
  }

  /// Announces the finished file and, when someone is watching, waits for them to acknowledge it.
  /// `Cancel` means they asked to keep the progress line on screen.
  pub fn show_completed(output: &Path, skip_confirm: bool) -> UserResult {
    println!("✅ Polyglot written to {}", output.display());

    if skip_confirm || !console::user_attended() {
      return UserResult::Continue
    }

    Confirm::with_theme(&ColorfulTheme::default())
      .with_prompt("Done. Clear the progress bar?")
      .default(true)
      .wait_for_newline(true)
      .interact()
      .map_or_else(
        |e| UserResult::Error(format!("Could not retrieve user confirmation: {e}")),
        |clear| if clear { UserResult::Continue } else { UserResult::Cancel }
      )
  }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_lists_the_image_extensions_and_an_example() {
      let usage = PolyglotConsole::usage();

      assert!(usage.starts_with("Usage: polyglot <image> <archive>"));
      assert!(usage.contains("(.jpg, .png, .jpeg)"));
      assert!(usage.contains("Example: polyglot test.jpg test.zip"));
    }
}
