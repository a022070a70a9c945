//! Frame clock sources

#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// Monotonic millisecond timestamps for the host loop
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Wall clock measured from construction
///
/// `Instant` is unavailable on `wasm32-unknown-unknown`; browser hosts supply
/// their own [`Clock`] backed by `performance.now()`.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Clock that only moves when told to (tests, headless runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualClock {
    now_ms: f64,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self { now_ms: start_ms }
    }

    pub fn advance(&mut self, ms: f64) {
        self.now_ms += ms.max(0.0);
    }

    pub fn set(&mut self, now_ms: f64) {
        self.now_ms = now_ms;
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock() {
        let mut clock = ManualClock::new(100.0);
        clock.advance(16.0);
        clock.advance(-5.0);
        assert_eq!(clock.now_ms(), 116.0);
        clock.set(0.0);
        assert_eq!(clock.now_ms(), 0.0);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_system_clock_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
    }
}
