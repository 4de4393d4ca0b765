//! Parsing of yt-dlp progress output

/// Percentage from a yt-dlp `[download]` line, clamped to 0-100.
///
/// ```text
/// [download]  42.3% of ~ 10.00MiB at  1.00MiB/s ETA 00:05
/// [download] 100% of   10.00MiB in 00:00:05 at 2.00MiB/s
/// ```
pub fn parse_progress_line(line: &str) -> Option<f32> {
    let rest = line.trim_start().strip_prefix("[download]")?.trim_start();
    let (number, _) = rest.split_once('%')?;
    if number.is_empty() || !number.chars().all(|ch| ch.is_ascii_digit() || ch == '.') {
        return None;
    }
    let value = number.parse::<f32>().ok()?;

    if value.is_finite() {
        Some(value.clamp(0.0, 100.0))
    } else {
        None
    }
}

/// Keeps reported progress from moving backwards.
///
/// yt-dlp restarts at 0% for every stream it fetches (video, then audio), the
/// item as a whole should not.
#[derive(Debug, Default, Clone, Copy)]
pub struct MonotonicProgress {
    last: Option<f32>,
}

impl MonotonicProgress {
    /// Returns the value to publish, or `None` if it would not advance
    pub fn advance(&mut self, percent: f32) -> Option<f32> {
        match self.last {
            Some(last) if percent <= last => None,
            _ => {
                self.last = Some(percent);
                Some(percent)
            }
        }
    }
}
