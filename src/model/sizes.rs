pub const KB: u64 = 1024;
pub const MB: u64 = 1048576;
pub const GB: u64 = 1073741824;

pub fn size_pretty(size: u64) -> String {
  if size >= GB {
    format!("{:.2}GB", size as f64 / GB as f64)
  } else if size >= MB {
    format!("{:.2}MB", size as f64 / MB as f64)
  } else if size >= KB {
    format!("{:.2}KB", size as f64 / KB as f64)
  } else {
    format!("{}B", size)
  }
}

/// Complete mebibytes in `size`, as shown on the progress surface.
pub fn whole_megabytes(size: u64) -> u64 {
  size / MB
}

/// Formats a duration in seconds as `mm:ss`. Minutes are not wrapped into hours.
pub fn minutes_seconds(seconds: f64) -> String {
  let seconds =
    if seconds.is_finite() && seconds > 0.0 {
      seconds as u64
    } else {
      0
    };

  format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
