use std::path::PathBuf;

use clap::Parser;

use super::chunk_size::ChunkSize;

/// Hide an archive inside an image: writes <image-name>_fake.<ext> into the
/// current directory, which opens as the image and as the archive
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
   /// Verbose debug logging
   #[arg(long)]
   pub verbose: bool,

   /// The image (.jpg, .jpeg or .png) and the archive, in either order. Options go before them
   #[arg(allow_hyphen_values = true)]
   pub paths: Vec<PathBuf>,

   /// The maximum number of bytes copied between screen updates. Maximum of 1024KB or 128MB. [default: 32MB]
   #[arg(short, long, env = "POLYGLOT_CHUNK_SIZE", value_parser = clap::value_parser!(ChunkSize))]
   pub chunk_size: Option<ChunkSize>,

   /// Skip waiting for confirmation once the file is written
   #[arg(long)]
   pub skip_confirm: bool
}

impl Args {
  pub fn chunk_size(&self) -> ChunkSize {
    self.chunk_size.clone().unwrap_or_default()
  }
}

pub fn get_cli_args() -> Args {
  Args::parse()
}
