use alloc::format;
use alloc::string::String;

/// Whole-second counter advanced by an external once-per-second tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Clock {
    seconds: u32,
    running: bool,
}

impl Clock {
    pub const fn new() -> Self {
        Self {
            seconds: 0,
            running: false,
        }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Advances by one second; a stopped clock ignores the tick.
    pub fn tick(&mut self) -> bool {
        if self.running {
            self.seconds = self.seconds.saturating_add(1);
        }
        self.running
    }

    pub const fn is_running(&self) -> bool {
        self.running
    }

    pub const fn elapsed_secs(&self) -> u32 {
        self.seconds
    }

    pub fn formatted(&self) -> String {
        format_elapsed(self.seconds)
    }
}

/// Formats seconds as `MM:SS`; minutes keep growing past 99.
pub fn format_elapsed(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Inverse of [`format_elapsed`], `None` for anything that is not `M:S`.
pub fn parse_elapsed(text: &str) -> Option<u32> {
    let (minutes, seconds) = text.trim().split_once(':')?;
    let minutes: u32 = minutes.parse().ok()?;
    let seconds: u32 = seconds.parse().ok()?;
    minutes.checked_mul(60)?.checked_add(seconds)
}
