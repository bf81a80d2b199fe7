//! Fixed-period timers
//!
//! Gameplay and countdown run on separate accumulators so the countdown never
//! drifts with render frame rate. Every start/stop bumps the clock epoch;
//! timer fires stamped with an older epoch must be ignored by the caller.

use crate::consts::*;

/// Which periodic timer fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Player follow, consumption, particles
    Gameplay,
    /// One-second countdown
    Countdown,
}

/// Accumulating fixed-period timer
#[derive(Debug, Clone)]
pub struct FixedTimer {
    period_ms: f64,
    accumulator_ms: f64,
    /// Cap on fires per advance; excess time is dropped
    max_fires: Option<u32>,
}

impl FixedTimer {
    pub fn new(period_ms: f64, max_fires: Option<u32>) -> Self {
        Self {
            period_ms,
            accumulator_ms: 0.0,
            max_fires,
        }
    }

    /// Feed elapsed time, returning how many periods completed
    pub fn advance(&mut self, elapsed_ms: f64) -> u32 {
        if !elapsed_ms.is_finite() || elapsed_ms <= 0.0 {
            return 0;
        }
        self.accumulator_ms += elapsed_ms;
        let mut fires = (self.accumulator_ms / self.period_ms).floor() as u32;
        self.accumulator_ms -= fires as f64 * self.period_ms;

        if let Some(cap) = self.max_fires {
            if fires > cap {
                log::debug!("Dropping {} gameplay ticks (frame too long)", fires - cap);
                fires = cap;
            }
        }
        fires
    }

    pub fn reset(&mut self) {
        self.accumulator_ms = 0.0;
    }
}

/// Fires produced by one `SimClock::advance`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fires {
    pub gameplay: u32,
    pub countdown: u32,
}

/// Both session timers plus the cancellation epoch
#[derive(Debug, Clone)]
pub struct SimClock {
    epoch: u64,
    running: bool,
    gameplay: FixedTimer,
    countdown: FixedTimer,
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SimClock {
    pub fn new() -> Self {
        Self {
            epoch: 0,
            running: false,
            gameplay: FixedTimer::new(GAMEPLAY_TICK_MS, Some(MAX_SUBSTEPS)),
            countdown: FixedTimer::new(COUNTDOWN_TICK_MS, None),
        }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// True if a fire stamped with `epoch` belongs to the running timers
    pub fn is_current(&self, epoch: u64) -> bool {
        self.running && epoch == self.epoch
    }

    /// Start fresh timers; returns the new epoch
    pub fn start(&mut self) -> u64 {
        self.epoch += 1;
        self.running = true;
        self.gameplay.reset();
        self.countdown.reset();
        self.epoch
    }

    /// Cancel both timers; outstanding fires become stale
    pub fn stop(&mut self) {
        self.epoch += 1;
        self.running = false;
        self.gameplay.reset();
        self.countdown.reset();
    }

    pub fn advance(&mut self, elapsed_ms: f64) -> Fires {
        if !self.running {
            return Fires::default();
        }
        Fires {
            gameplay: self.gameplay.advance(elapsed_ms),
            countdown: self.countdown.advance(elapsed_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_timer_accumulates() {
        let mut t = FixedTimer::new(16.0, None);
        assert_eq!(t.advance(10.0), 0);
        assert_eq!(t.advance(10.0), 1);
        assert_eq!(t.advance(28.0), 2);
        assert_eq!(t.advance(-5.0), 0);
        assert_eq!(t.advance(f64::NAN), 0);
    }

    #[test]
    fn test_fixed_timer_cap_drops_excess() {
        let mut t = FixedTimer::new(16.0, Some(8));
        assert_eq!(t.advance(1000.0), 8);
        // Remainder below one period was kept, the rest dropped
        assert_eq!(t.advance(0.0), 0);
        assert_eq!(t.advance(16.0), 1);
    }

    #[test]
    fn test_countdown_does_not_drift_with_frame_rate() {
        let mut clock = SimClock::new();
        clock.start();
        let mut seconds = 0;
        // 60 seconds of uneven frames
        let frames: [f64; 5] = [16.0, 33.0, 8.0, 50.0, 12.0];
        let mut elapsed: f64 = 0.0;
        while elapsed < 60_000.0 - 1e-6 {
            let dt = frames[(elapsed as usize) % frames.len()].min(60_000.0 - elapsed);
            seconds += clock.advance(dt).countdown;
            elapsed += dt;
        }
        assert_eq!(seconds, 60);
    }

    #[test]
    fn test_stop_invalidates_epoch() {
        let mut clock = SimClock::new();
        let epoch = clock.start();
        assert!(clock.is_current(epoch));
        clock.stop();
        assert!(!clock.is_current(epoch));
        assert_eq!(clock.advance(5000.0), Fires::default());

        let next = clock.start();
        assert_ne!(epoch, next);
        assert!(clock.is_current(next));
        assert!(!clock.is_current(epoch));
    }
}
