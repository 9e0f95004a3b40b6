use chrono::{DateTime, FixedOffset, Local};
use jarvis_core::Clock;

/// Wall-clock time in the machine's local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}
