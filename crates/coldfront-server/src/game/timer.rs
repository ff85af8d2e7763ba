//! Round timer with pause support.
//!
//! All clock readings are `Instant` values passed in by the caller, so timer
//! behaviour is fully deterministic under test. The timer models an explicit
//! duration-remaining value: while paused, `seconds_left` is frozen; while
//! running, the remaining time is `seconds_left` minus the time elapsed since
//! the last unpause (and may go negative past the deadline).

use std::time::{Duration, Instant};

use crate::config::GameConfig;

#[derive(Clone, Copy, Debug)]
pub struct RoundTimer {
    round_length: Duration,
    unpause_delay: Duration,
    unpause_time: Instant,
    seconds_left: i64,
    is_paused: bool,
}

fn signed_secs(later: Instant, earlier: Instant) -> i64 {
    if later >= earlier {
        later.duration_since(earlier).as_secs() as i64
    } else {
        -(earlier.duration_since(later).as_secs() as i64)
    }
}

impl RoundTimer {
    /// A fresh timer starts paused with a full round on the clock.
    pub fn new(config: &GameConfig, now: Instant) -> Self {
        Self {
            round_length: config.round_length,
            unpause_delay: config.unpause_delay,
            unpause_time: now,
            seconds_left: config.round_length.as_secs() as i64,
            is_paused: true,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    /// True while an unpause grace window is still pending.
    pub fn is_starting(&self, now: Instant) -> bool {
        self.starting_delay(now) > 0
    }

    /// Seconds until the pending unpause deadline (negative once past it).
    pub fn starting_delay(&self, now: Instant) -> i64 {
        signed_secs(self.unpause_time, now)
    }

    /// Toggle between paused and running. A no-op during the unpause grace
    /// window. Pausing freezes the remaining seconds; unpausing arms a new
    /// deadline `unpause_delay` in the future.
    pub fn toggle_pause(&mut self, now: Instant) -> bool {
        if self.is_starting(now) {
            return false;
        }
        if self.is_paused {
            self.unpause_time = now + self.unpause_delay;
        } else {
            self.seconds_left -= signed_secs(now, self.unpause_time);
        }
        self.is_paused = !self.is_paused;
        true
    }

    /// Remaining seconds in the round; may be negative.
    pub fn time_left(&self, now: Instant) -> i64 {
        if self.is_paused {
            self.seconds_left
        } else {
            self.seconds_left - signed_secs(now, self.unpause_time)
        }
    }

    /// Rewind the clock for a new round.
    pub fn reset_round(&mut self, now: Instant) {
        self.unpause_time = now;
        self.seconds_left = self.round_length.as_secs() as i64;
    }

    /// Whether the round is past its deadline plus `grace`.
    pub fn expired(&self, now: Instant, grace: Duration) -> bool {
        self.time_left(now) < -(grace.as_secs() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timer() -> (RoundTimer, Instant) {
        let now = Instant::now();
        (RoundTimer::new(&GameConfig::default(), now), now)
    }

    #[test]
    fn starts_paused_with_a_full_round() {
        let (timer, now) = timer();
        assert!(timer.is_paused());
        assert_eq!(timer.time_left(now), 180);
        assert!(!timer.is_starting(now));
    }

    #[test]
    fn unpause_arms_a_grace_deadline() {
        let (mut timer, now) = timer();
        assert!(timer.toggle_pause(now));
        assert!(!timer.is_paused());
        assert!(timer.is_starting(now));
        assert_eq!(timer.starting_delay(now), 5);

        // A second toggle during the grace window is refused.
        assert!(!timer.toggle_pause(now + Duration::from_secs(2)));
        assert!(!timer.is_paused());
    }

    #[test]
    fn pausing_freezes_the_remaining_time() {
        let (mut timer, now) = timer();
        timer.toggle_pause(now);

        // 65 seconds after the grace deadline, 115 remain.
        let later = now + Duration::from_secs(5 + 65);
        assert_eq!(timer.time_left(later), 115);

        assert!(timer.toggle_pause(later));
        assert!(timer.is_paused());
        assert_eq!(timer.time_left(later + Duration::from_secs(500)), 115);
    }

    #[test]
    fn deadline_overrun_expires_past_the_grace() {
        let (mut timer, now) = timer();
        timer.toggle_pause(now);

        let deadline = now + Duration::from_secs(5 + 180);
        assert!(!timer.expired(deadline, Duration::from_secs(5)));
        assert!(!timer.expired(deadline + Duration::from_secs(5), Duration::from_secs(5)));
        assert!(timer.expired(deadline + Duration::from_secs(6), Duration::from_secs(5)));
    }

    #[test]
    fn reset_rewinds_the_clock() {
        let (mut timer, now) = timer();
        timer.toggle_pause(now);
        let later = now + Duration::from_secs(400);
        assert!(timer.expired(later, Duration::from_secs(5)));

        timer.reset_round(later);
        assert!(!timer.expired(later, Duration::from_secs(5)));
        assert_eq!(timer.time_left(later), 180);
    }
}
