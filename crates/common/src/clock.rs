//! Clock and timing utilities.
//!
//! - ISO 8601 timestamps for outgoing payloads
//! - `m:ss` timecodes for video overlay windows
//! - A frame throttle used to batch preview redraws

/// Current wall-clock time as an ISO 8601 / RFC 3339 string (UTC, millisecond precision).
pub fn now_iso8601() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Format seconds as `m:ss`. Negative and non-finite inputs render as `0:00`.
pub fn format_timecode(secs: f64) -> String {
    let total = if secs.is_finite() && secs > 0.0 {
        secs.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

/// Parse a timecode into seconds.
///
/// Accepts plain seconds (`"12.5"`), `m:ss` (`"1:05"`), or `h:mm:ss`.
/// Returns `None` for malformed or negative values.
pub fn parse_timecode(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut total = 0.0;
    for part in trimmed.split(':') {
        let value: f64 = part.trim().parse().ok()?;
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        total = total * 60.0 + value;
    }
    Some(total)
}

/// Frame throttle for batching redraws.
#[derive(Debug)]
pub struct FrameThrottle {
    target_interval_ns: u64,
    last_tick_ns: Option<u64>,
}

impl FrameThrottle {
    /// Create a throttle targeting the given Hz rate.
    pub fn new(target_hz: u32) -> Self {
        Self {
            target_interval_ns: 1_000_000_000 / target_hz.max(1) as u64,
            last_tick_ns: None,
        }
    }

    /// Check if enough time has passed for the next frame.
    /// Returns true and updates internal state if ready.
    /// The first call always returns true.
    pub fn should_tick(&mut self, current_ns: u64) -> bool {
        match self.last_tick_ns {
            None => {
                self.last_tick_ns = Some(current_ns);
                true
            }
            Some(last) if current_ns >= last + self.target_interval_ns => {
                self.last_tick_ns = Some(current_ns);
                true
            }
            _ => false,
        }
    }

    /// Target interval in nanoseconds.
    pub fn interval_ns(&self) -> u64 {
        self.target_interval_ns
    }
}
