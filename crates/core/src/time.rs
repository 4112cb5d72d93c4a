use chrono::{DateTime, Duration, Utc};

/// Where a game reads "now" from when it stamps `started_at` and `finished_at`.
///
/// Production games read the wall clock. A frozen clock holds one instant until a
/// test pushes it forward with [`Clock::advance`], which makes elapsed-time
/// assertions exact.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    #[must_use]
    pub fn system() -> Self {
        Self::System
    }

    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(at) => *at,
        }
    }

    /// Pushes a frozen clock forward by `delta`; the wall clock ignores this.
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(at) = self {
            *at += delta;
        }
    }
}

/// Unix seconds of the instant test clocks start at (2023-11-14T22:13:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// The instant test clocks start at.
///
/// # Panics
///
/// Never in practice: the constant is well inside chrono's range.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frozen_clock_moves_only_when_advanced() {
        let mut clock = Clock::fixed(fixed_now());
        assert_eq!(clock.now(), clock.now());
        clock.advance(Duration::milliseconds(1500));
        assert_eq!(clock.now(), fixed_now() + Duration::milliseconds(1500));
    }

    #[test]
    fn wall_clock_ignores_advance() {
        let mut clock = Clock::system();
        clock.advance(Duration::days(365));
        assert!(clock.now() < Utc::now() + Duration::days(1));
    }
}
