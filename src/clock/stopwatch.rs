use std::time::Duration;

/// how much every stopwatch tick adds
pub const STEP_MS: u64 = 10;
pub const STEP: Duration = Duration::from_millis(STEP_MS);

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stopwatch {
    elapsed_ms: u64,
    running: bool,
}

impl Stopwatch {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            elapsed_ms: 0,
            running: false,
        }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// zeroes the time but keeps running if it was
    pub fn reset(&mut self) {
        self.elapsed_ms = 0;
    }

    /// late ticks that arrive after a stop don't count
    pub fn tick(&mut self) {
        if self.running {
            self.elapsed_ms += STEP_MS;
        }
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub const fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// MM:SS.CC
    #[must_use]
    pub fn display(&self) -> String {
        format_elapsed(self.elapsed_ms)
    }
}

#[must_use]
pub fn format_elapsed(ms: u64) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1000;
    let centis = (ms % 1000) / 10;
    format!("{minutes:02}:{seconds:02}.{centis:02}")
}
