use std::cmp::min;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::model::{KB, MB};

pub static CHUNK_SIZE_REG: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)(KB|MB)$").unwrap());

const EXPECTED_FORMAT: &str = "Expected format: <num><unit>, where num = <number>, unit = <KB|MB>, max KB is 1024, max MB is 128";

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum SizeUnit {
  KB,
  MB
}

/// How many bytes each copy step moves at most.
#[derive(Debug, PartialEq, Clone)]
pub struct ChunkSize(u16, SizeUnit);

#[derive(Debug, PartialEq, Error)]
pub enum ChunkSizeError {
  #[error("Invalid chunk size format supplied: '{0}'. {expected}", expected = EXPECTED_FORMAT)]
  Format(String),

  #[error("Invalid chunk size supplied: {0}. {expected}", expected = EXPECTED_FORMAT)]
  Size(String),

  #[error("Chunk size must be greater than zero. {expected}", expected = EXPECTED_FORMAT)]
  Zero,
}

impl ChunkSize {

  // Large chunks keep the per-chunk overhead low
  pub const DEFAULT: ChunkSize = ChunkSize(32, SizeUnit::MB);

  pub fn bytes(&self) -> usize {
    let unit = match self.1 {
      SizeUnit::KB => KB,
      SizeUnit::MB => MB,
    };

    (unit * u64::from(self.0)) as usize
  }
}

impl Default for ChunkSize {
  fn default() -> Self {
    Self::DEFAULT
  }
}

impl FromStr for ChunkSize {
  type Err = ChunkSizeError;

  fn from_str(arg: &str) -> Result<Self, Self::Err> {
    let matches =
      CHUNK_SIZE_REG
        .captures(arg)
        .ok_or_else(|| ChunkSizeError::Format(arg.to_owned()))?;

    let size =
      matches[1]
        .parse::<u16>()
        .map_err(|e| ChunkSizeError::Size(e.to_string()))?;

    if size == 0 {
      return Err(ChunkSizeError::Zero)
    }

    let unit =
      if &matches[2] == "MB" {
        SizeUnit::MB
      } else {
        SizeUnit::KB
      };

    let checked_size =
      match unit {
        SizeUnit::KB => min(1024, size),
        SizeUnit::MB => min(128, size),
      };

    Ok(ChunkSize(checked_size, unit))
  }
}

impl fmt::Display for ChunkSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = match self.1 {
          SizeUnit::KB => "KB",
          SizeUnit::MB => "MB",
        };
        write!(f, "{}{}", self.0, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_is_thirty_two_megabytes() {
      assert_eq!(ChunkSize::default().bytes(), 33_554_432);
      assert_eq!(ChunkSize::default().to_string(), "32MB");
    }

    #[test]
    fn parses_kilobytes() {
      let chunk: ChunkSize = "64KB".parse().unwrap();

      assert_eq!(chunk, ChunkSize(64, SizeUnit::KB));
      assert_eq!(chunk.bytes(), 65_536);
    }

    #[test]
    fn clamps_oversized_values() {
      assert_eq!("4096KB".parse::<ChunkSize>(), Ok(ChunkSize(1024, SizeUnit::KB)));
      assert_eq!("512MB".parse::<ChunkSize>(), Ok(ChunkSize(128, SizeUnit::MB)));
    }

    #[test]
    fn rejects_zero() {
      assert_eq!("0MB".parse::<ChunkSize>(), Err(ChunkSizeError::Zero));
    }

    #[test]
    fn rejects_numbers_that_do_not_fit() {
      let error = "70000MB".parse::<ChunkSize>().unwrap_err();

      assert!(matches!(error, ChunkSizeError::Size(_)));
    }

    #[test]
    fn rejects_bad_formats() {
      for arg in ["", "MB", "1GB", " 1KB", "1KB ", "1mb", "one MB"] {
        let error = arg.parse::<ChunkSize>().unwrap_err();
        assert_eq!(error, ChunkSizeError::Format(arg.to_owned()));
      }
    }

    #[test]
    fn format_errors_explain_the_expected_format() {
      let error = "1GB".parse::<ChunkSize>().unwrap_err();

      assert_eq!(
        error.to_string(),
        "Invalid chunk size format supplied: '1GB'. Expected format: <num><unit>, where num = <number>, unit = <KB|MB>, max KB is 1024, max MB is 128"
      );
    }
}
