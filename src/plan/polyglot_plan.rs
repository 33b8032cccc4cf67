use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::model::{Phase, PolyglotError, R};

/// Extensions (without the dot, case-sensitive) that mark a path as the image.
pub const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "png", "jpeg"];

const OUTPUT_SUFFIX: &str = "_fake";

#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
  Usage,
  Polyglot(PolyglotPlan),
}

impl Invocation {

  /// Anything other than exactly two paths asks for the usage message.
  pub fn from_paths<D: AsRef<Path>>(paths: &[PathBuf], output_dir: D) -> Self {
    match paths {
      [first, second] => Invocation::Polyglot(PolyglotPlan::new(first, second, output_dir)),
      _ => Invocation::Usage,
    }
  }
}

/// Which input is the image, which is the archive, and where the result goes.
#[derive(Debug, Clone, PartialEq)]
pub struct PolyglotPlan {
  image: PathBuf,
  archive: PathBuf,
  output: PathBuf,
}

impl PolyglotPlan {

  /// The first path is the image if it looks like one, otherwise the second is.
  pub fn new<A: AsRef<Path>, B: AsRef<Path>, D: AsRef<Path>>(first: A, second: B, output_dir: D) -> Self {
    let first = first.as_ref();
    let second = second.as_ref();

    let (image, archive) =
      if Self::is_image(first) {
        (first, second)
      } else {
        if !Self::is_image(second) {
          warn!(
            "neither {} nor {} has an image extension ({}), treating {} as the image",
            first.display(),
            second.display(),
            IMAGE_EXTENSIONS.join(", "),
            second.display()
          );
        }
        (second, first)
      };

    Self {
      image: image.to_path_buf(),
      archive: archive.to_path_buf(),
      output: output_dir.as_ref().join(Self::output_name(image)),
    }
  }

  pub fn is_image(path: &Path) -> bool {
    path
      .extension()
      .and_then(|ext| ext.to_str())
      .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext))
  }

  /// `<stem>_fake<.ext>` of the image.
  pub fn output_name(image: &Path) -> OsString {
    let mut name = image.file_stem().map(|s| s.to_os_string()).unwrap_or_default();
    name.push(OUTPUT_SUFFIX);

    if let Some(ext) = image.extension() {
      name.push(".");
      name.push(ext);
    }

    name
  }

  /// Fails if writing the output would clobber one of the inputs.
  pub fn check_output_is_not_an_input(&self) -> R<()> {
    let output = match fs::canonicalize(&self.output) {
      Ok(output) => output,
      // nothing there yet, so it can't be an input
      Err(_) => return Ok(()),
    };

    let clobbers =
      [&self.image, &self.archive]
        .iter()
        .filter_map(|input| fs::canonicalize(input).ok())
        .any(|input| input == output);

    if clobbers {
      Err(PolyglotError::OutputIsInput(self.output.clone()))
    } else {
      Ok(())
    }
  }

  pub fn phases(&self) -> [Phase; 2] {
    [Phase::image(&self.image), Phase::archive(&self.archive)]
  }

  pub fn image(&self) -> &Path {
    self.image.as_path()
  }

  pub fn archive(&self) -> &Path {
    self.archive.as_path()
  }

  pub fn output(&self) -> &Path {
    self.output.as_path()
  }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn paths(values: &[&str]) -> Vec<PathBuf> {
      values.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn two_paths_make_a_plan() {
      let invocation = Invocation::from_paths(&paths(&["cat.jpg", "secret.zip"]), "/work");

      let expected = PolyglotPlan {
        image: PathBuf::from("cat.jpg"),
        archive: PathBuf::from("secret.zip"),
        output: PathBuf::from("/work").join("cat_fake.jpg"),
      };
      assert_eq!(invocation, Invocation::Polyglot(expected))
    }

    #[test]
    fn any_other_count_shows_usage() {
      assert_eq!(Invocation::from_paths(&paths(&[]), "/work"), Invocation::Usage);
      assert_eq!(Invocation::from_paths(&paths(&["cat.jpg"]), "/work"), Invocation::Usage);
      assert_eq!(Invocation::from_paths(&paths(&["cat.jpg", "a.zip", "b.zip"]), "/work"), Invocation::Usage);
    }

    #[test]
    fn roles_do_not_depend_on_argument_order() {
      let forwards = PolyglotPlan::new("cat.png", "secret.rar", "/work");
      let backwards = PolyglotPlan::new("secret.rar", "cat.png", "/work");

      assert_eq!(forwards, backwards);
      assert_eq!(forwards.image(), Path::new("cat.png"));
      assert_eq!(forwards.archive(), Path::new("secret.rar"));
    }

    #[test]
    fn archive_extension_does_not_matter() {
      let plan = PolyglotPlan::new("data.bin", "photo.jpeg", "/work");

      assert_eq!(plan.image(), Path::new("photo.jpeg"));
      assert_eq!(plan.output(), Path::new("/work").join("photo_fake.jpeg"));
    }

    #[test]
    fn extensions_are_case_sensitive() {
      assert!(PolyglotPlan::is_image(Path::new("a.jpg")));
      assert!(!PolyglotPlan::is_image(Path::new("a.JPG")));
      assert!(!PolyglotPlan::is_image(Path::new(".jpg")));
    }

    #[test]
    fn two_images_keep_the_first_as_the_image() {
      let plan = PolyglotPlan::new("a.png", "b.jpg", "/work");

      assert_eq!(plan.image(), Path::new("a.png"));
    }

    #[test]
    fn without_any_image_the_second_path_is_the_image() {
      let plan = PolyglotPlan::new("a.zip", "b.7z", "/work");

      assert_eq!(plan.image(), Path::new("b.7z"));
      assert_eq!(plan.output(), Path::new("/work").join("b_fake.7z"));
    }

    #[test]
    fn output_keeps_only_the_image_file_name() {
      let image = Path::new("photos").join("holiday.v2.jpg");

      assert_eq!(PolyglotPlan::output_name(&image), OsString::from("holiday.v2_fake.jpg"));
      assert_eq!(PolyglotPlan::output_name(Path::new("noext")), OsString::from("noext_fake"));
    }

    #[test]
    fn phases_cover_the_whole_scale() {
      let plan = PolyglotPlan::new("cat.jpg", "secret.zip", "/work");
      let [image, archive] = plan.phases();

      assert_eq!((image.start_percent(), image.end_percent()), (0, 50));
      assert_eq!((archive.start_percent(), archive.end_percent()), (50, 100));
      assert_eq!(image.source(), Path::new("cat.jpg"));
      assert_eq!(archive.source(), Path::new("secret.zip"));
    }

    #[test]
    fn refuses_to_overwrite_an_input() {
      let dir = tempfile::tempdir().unwrap();
      let image = dir.path().join("cat.jpg");
      let archive = dir.path().join("cat_fake.jpg");
      fs::write(&image, b"img").unwrap();
      fs::write(&archive, b"zip").unwrap();

      // both look like images, so the first one wins and its output is the second
      let plan = PolyglotPlan::new(&image, &archive, dir.path());

      assert!(matches!(plan.check_output_is_not_an_input(), Err(PolyglotError::OutputIsInput(_))));
    }

    #[test]
    fn an_existing_unrelated_output_is_fine() {
      let dir = tempfile::tempdir().unwrap();
      let image = dir.path().join("cat.jpg");
      fs::write(&image, b"img").unwrap();
      fs::write(dir.path().join("cat_fake.jpg"), b"old").unwrap();

      let plan = PolyglotPlan::new(&image, dir.path().join("secret.zip"), dir.path());

      assert!(plan.check_output_is_not_an_input().is_ok());
    }
}
